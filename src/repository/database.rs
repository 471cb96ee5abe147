use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::models::todo::{CreateTodo, Todo, TodoPatch};
use crate::repository::schema::todos::dsl::*;
use crate::repository::store::{StoreError, TodoStore};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Rows per INSERT statement. Postgres caps a statement at 65535 bind
/// parameters and every row binds one per column.
pub const INSERT_CHUNK_ROWS: usize = 1000;

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone)]
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool: DBPool = r2d2::Pool::builder().build(manager)?;
        Ok(Database { pool })
    }

    pub fn run_migrations(&self) -> Result<(), StoreError> {
        let mut conn = self.conn()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        tracing::info!(count = applied.len(), "applied pending migrations");
        Ok(())
    }

    fn conn(&self) -> Result<DBConnection, StoreError> {
        Ok(self.pool.get()?)
    }
}

impl TodoStore for Database {
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = todos
            .select(Todo::as_select())
            .load(&mut self.conn()?)?;
        Ok(rows)
    }

    fn get_todo(&self, todo_id: &str) -> Result<Vec<Todo>, StoreError> {
        let rows = todos
            .find(todo_id)
            .select(Todo::as_select())
            .load(&mut self.conn()?)?;
        Ok(rows)
    }

    fn create_todo(&self, new_todo: CreateTodo) -> Result<Vec<Todo>, StoreError> {
        let todo = Todo::new(new_todo);
        let rows = diesel::insert_into(todos)
            .values(&todo)
            .returning(Todo::as_returning())
            .get_results(&mut self.conn()?)?;
        Ok(rows)
    }

    fn mark_done(&self, todo_id: &str, done: Option<bool>) -> Result<Vec<Todo>, StoreError> {
        let patch = TodoPatch::mark_done(done);
        let rows = diesel::update(todos.find(todo_id))
            .set(&patch)
            .returning(Todo::as_returning())
            .get_results(&mut self.conn()?)?;
        Ok(rows)
    }

    fn delete_todo(&self, todo_id: &str) -> Result<usize, StoreError> {
        let count = diesel::delete(todos.find(todo_id)).execute(&mut self.conn()?)?;
        Ok(count)
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let count = diesel::delete(todos).execute(&mut self.conn()?)?;
        Ok(count)
    }

    fn insert_todos(&self, records: Vec<Todo>) -> Result<usize, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            records
                .chunks(INSERT_CHUNK_ROWS)
                .try_fold(0usize, |count, chunk| -> Result<usize, StoreError> {
                    let inserted = diesel::insert_into(todos).values(chunk).execute(&mut *conn)?;
                    Ok(count + inserted)
                })
        })
    }
}
