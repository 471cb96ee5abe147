use thiserror::Error;

use crate::models::todo::{CreateTodo, Todo};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("database connection unavailable: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database migration failed: {0}")]
    Migration(String),
}

/// Gateway over the `todos` table.
///
/// Lookups and updates return every matching row, so "not found" is an empty
/// result rather than an error; callers decide what that means for them.
pub trait TodoStore: Send + Sync {
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError>;

    fn get_todo(&self, todo_id: &str) -> Result<Vec<Todo>, StoreError>;

    fn create_todo(&self, new_todo: CreateTodo) -> Result<Vec<Todo>, StoreError>;

    /// Sets `is_done` when supplied and stamps `done_at` and `updated_at` with
    /// the current time. Zero matched rows is not an error.
    fn mark_done(&self, todo_id: &str, is_done: Option<bool>) -> Result<Vec<Todo>, StoreError>;

    /// Returns the number of deleted rows.
    fn delete_todo(&self, todo_id: &str) -> Result<usize, StoreError>;

    fn delete_all(&self) -> Result<usize, StoreError>;

    fn insert_todos(&self, records: Vec<Todo>) -> Result<usize, StoreError>;
}
