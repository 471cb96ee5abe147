use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::todo::{CreateTodo, Todo, TodoPatch};
use crate::repository::store::{StoreError, TodoStore};

/// Process-local store with the same semantics as [`crate::repository::Database`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    todos: Arc<Mutex<Vec<Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Todo>> {
        // rows are plain values, so a poisoned lock still holds consistent data
        self.todos.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TodoStore for MemoryStore {
    fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        Ok(self.lock().clone())
    }

    fn get_todo(&self, todo_id: &str) -> Result<Vec<Todo>, StoreError> {
        let todos = self.lock();
        Ok(todos.iter().filter(|todo| todo.id == todo_id).cloned().collect())
    }

    fn create_todo(&self, new_todo: CreateTodo) -> Result<Vec<Todo>, StoreError> {
        let todo = Todo::new(new_todo);
        self.lock().push(todo.clone());
        Ok(vec![todo])
    }

    fn mark_done(&self, todo_id: &str, is_done: Option<bool>) -> Result<Vec<Todo>, StoreError> {
        let patch = TodoPatch::mark_done(is_done);
        let mut todos = self.lock();
        let updated = todos
            .iter_mut()
            .filter(|todo| todo.id == todo_id)
            .map(|todo| {
                todo.apply(&patch);
                todo.clone()
            })
            .collect();
        Ok(updated)
    }

    fn delete_todo(&self, todo_id: &str) -> Result<usize, StoreError> {
        let mut todos = self.lock();
        let before = todos.len();
        todos.retain(|todo| todo.id != todo_id);
        Ok(before - todos.len())
    }

    fn delete_all(&self) -> Result<usize, StoreError> {
        let mut todos = self.lock();
        let count = todos.len();
        todos.clear();
        Ok(count)
    }

    fn insert_todos(&self, records: Vec<Todo>) -> Result<usize, StoreError> {
        let count = records.len();
        self.lock().extend(records);
        Ok(count)
    }
}
