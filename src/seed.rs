use chrono::{DateTime, Duration, Utc};
use fake::faker::boolean::en::Boolean;
use fake::faker::chrono::en::DateTimeBetween;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::Fake;

use crate::models::todo::Todo;
use crate::repository::{StoreError, TodoStore};

pub const DEFAULT_SEED_COUNT: usize = 20;

fn any_time(now: DateTime<Utc>) -> DateTime<Utc> {
    let year = Duration::days(365);
    DateTimeBetween(now - year, now + year).fake()
}

/// Bookkeeping timestamps never lie in the future, so a later update at
/// `now` cannot move `updated_at` backwards or below `created_at`.
fn past_time(now: DateTime<Utc>) -> DateTime<Utc> {
    DateTimeBetween(now - Duration::days(365), now).fake()
}

pub fn fake_todo() -> Todo {
    let now = Utc::now();
    let first = past_time(now);
    let second = past_time(now);
    Todo {
        id: uuid::Uuid::new_v4().to_string(),
        task: Sentence(3..6).fake(),
        description: Some(Paragraph(3..6).fake()),
        due_date: Some(any_time(now)),
        is_done: Boolean(50).fake(),
        done_at: Some(any_time(now)),
        created_at: first.min(second),
        updated_at: first.max(second),
    }
}

/// Replaces every stored todo with `count` freshly generated ones.
pub fn seed(store: &dyn TodoStore, count: usize) -> Result<usize, StoreError> {
    let removed = store.delete_all()?;
    tracing::info!(removed, "cleared todos");

    let records: Vec<Todo> = (0..count).map(|_| fake_todo()).collect();
    let inserted = store.insert_todos(records)?;
    tracing::info!(inserted, "inserted fake todos");
    Ok(inserted)
}
