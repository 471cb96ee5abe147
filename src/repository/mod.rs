pub mod database;
pub mod memory;
pub mod schema;

mod store;

pub use database::Database;
pub use memory::MemoryStore;
pub use store::{StoreError, TodoStore};
