use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub task: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub is_done: bool,
    pub done_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh, not yet done record from a create request.
    pub fn new(new_todo: CreateTodo) -> Self {
        let now = Utc::now();
        Todo {
            id: uuid::Uuid::new_v4().to_string(),
            task: new_todo.task,
            description: new_todo.description,
            due_date: new_todo.due_date,
            is_done: false,
            done_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: &TodoPatch) {
        if let Some(is_done) = patch.is_done {
            self.is_done = is_done;
        }
        if let Some(done_at) = patch.done_at {
            self.done_at = Some(done_at);
        }
        self.updated_at = patch.updated_at;
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub task: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MarkDone {
    #[serde(default)]
    pub is_done: Option<bool>,
}

/// Columns written by a mark-done update. `None` fields are left untouched.
///
/// `done_at` is stamped even when `is_done` goes back to `false`, so an open
/// todo can carry the time it was last toggled.
#[derive(Debug, Clone, PartialEq, AsChangeset)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct TodoPatch {
    pub is_done: Option<bool>,
    pub done_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl TodoPatch {
    pub fn mark_done(is_done: Option<bool>) -> Self {
        let now = Utc::now();
        TodoPatch {
            is_done,
            done_at: Some(now),
            updated_at: now,
        }
    }
}
