use actix_web::{delete, get, patch, post, web, HttpResponse};

use crate::error::ApiError;
use crate::models::todo::{CreateTodo, MarkDone};
use crate::repository::TodoStore;

#[get("/todos")]
pub async fn get_todos(db: web::Data<dyn TodoStore>) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.list_todos()).await??;
    Ok(HttpResponse::Ok().json(todos))
}

#[get("/todos/{id}")]
pub async fn get_todo_by_id(
    db: web::Data<dyn TodoStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.get_todo(&id)).await??;
    if todos.is_empty() {
        return Ok(HttpResponse::NotFound().json(todos));
    }
    Ok(HttpResponse::Ok().json(todos))
}

#[post("/todos")]
pub async fn create_todo(
    db: web::Data<dyn TodoStore>,
    new_todo: web::Json<CreateTodo>,
) -> Result<HttpResponse, ApiError> {
    let todos = web::block(move || db.create_todo(new_todo.into_inner())).await??;
    Ok(HttpResponse::Created().json(todos))
}

/// Always 200, an unknown id just yields an empty array.
#[patch("/todos/{id}")]
pub async fn mark_todo_done(
    db: web::Data<dyn TodoStore>,
    id: web::Path<String>,
    body: web::Json<MarkDone>,
) -> Result<HttpResponse, ApiError> {
    let is_done = body.into_inner().is_done;
    let todos = web::block(move || db.mark_done(&id, is_done)).await??;
    Ok(HttpResponse::Ok().json(todos))
}

#[delete("/todos/{id}")]
pub async fn delete_todo_by_id(
    db: web::Data<dyn TodoStore>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let count = web::block(move || db.delete_todo(&id)).await??;
    match count {
        1 => Ok(HttpResponse::Ok().finish()),
        _ => Ok(HttpResponse::NotFound().finish()),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(get_todos)
            .service(get_todo_by_id)
            .service(create_todo)
            .service(mark_todo_done)
            .service(delete_todo_by_id),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::error::ErrorResponse;
    use crate::models::todo::{CreateTodo, Todo};
    use crate::repository::{MemoryStore, StoreError};
    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::App;
    use serde_json::json;
    use std::sync::Arc;

    struct FailingStore;

    fn fault() -> StoreError {
        StoreError::Query(diesel::result::Error::BrokenTransactionManager)
    }

    impl TodoStore for FailingStore {
        fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
            Err(fault())
        }
        fn get_todo(&self, _todo_id: &str) -> Result<Vec<Todo>, StoreError> {
            Err(fault())
        }
        fn create_todo(&self, _new_todo: CreateTodo) -> Result<Vec<Todo>, StoreError> {
            Err(fault())
        }
        fn mark_done(&self, _todo_id: &str, _is_done: Option<bool>) -> Result<Vec<Todo>, StoreError> {
            Err(fault())
        }
        fn delete_todo(&self, _todo_id: &str) -> Result<usize, StoreError> {
            Err(fault())
        }
        fn delete_all(&self) -> Result<usize, StoreError> {
            Err(fault())
        }
        fn insert_todos(&self, _records: Vec<Todo>) -> Result<usize, StoreError> {
            Err(fault())
        }
    }

    fn data(store: impl TodoStore + 'static) -> web::Data<dyn TodoStore> {
        let store: Arc<dyn TodoStore> = Arc::new(store);
        web::Data::from(store)
    }

    fn create_one_test_todo(task: &str) -> TestRequest {
        TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({ "task": task, "description": "from the corner shop" }))
    }

    #[actix_web::test]
    async fn test_create_todo() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let resp = test::call_service(&app, create_one_test_todo("Buy milk").to_request()).await;
        assert_eq!(StatusCode::CREATED, resp.status());
        let result: Vec<Todo> = test::read_body_json(resp).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].task, "Buy milk");
        assert!(!result[0].is_done);
        assert!(result[0].done_at.is_none());
        assert!(!result[0].id.is_empty());
    }

    #[actix_web::test]
    async fn test_create_todo_without_task_is_rejected() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let req = TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({ "description": "no task" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::BAD_REQUEST, resp.status());
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.contains("task"));
    }

    #[actix_web::test]
    async fn test_get_todos() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let req = TestRequest::get().uri("/api/v1/todos").to_request();
        let result: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
        assert!(result.is_empty());

        test::call_service(&app, create_one_test_todo("first").to_request()).await;
        test::call_service(&app, create_one_test_todo("second").to_request()).await;

        let req = TestRequest::get().uri("/api/v1/todos").to_request();
        let result: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(result.len(), 2);
    }

    #[actix_web::test]
    async fn test_get_todo_round_trip() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let req = TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({
                "task": "File taxes",
                "description": "before the deadline",
                "dueDate": "2024-04-15T23:59:00Z"
            }))
            .to_request();
        let created: Vec<Todo> = test::call_and_read_body_json(&app, req).await;
        let created = &created[0];

        let req = TestRequest::get()
            .uri(&format!("/api/v1/todos/{}", created.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let result: Vec<Todo> = test::read_body_json(resp).await;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].task, "File taxes");
        assert_eq!(result[0].description.as_deref(), Some("before the deadline"));
        assert_eq!(result[0].due_date, created.due_date);
        assert!(result[0].due_date.is_some());
    }

    #[actix_web::test]
    async fn test_get_unknown_todo_is_404_with_empty_array() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let req = TestRequest::get().uri("/api/v1/todos/unknown").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());
        let result: Vec<Todo> = test::read_body_json(resp).await;
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn test_mark_todo_done() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let created: Vec<Todo> =
            test::call_and_read_body_json(&app, create_one_test_todo("Walk the dog").to_request()).await;
        let created = &created[0];

        let req = TestRequest::patch()
            .uri(&format!("/api/v1/todos/{}", created.id))
            .set_json(json!({ "isDone": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let result: Vec<Todo> = test::read_body_json(resp).await;
        assert_eq!(result.len(), 1);
        assert!(result[0].is_done);
        assert!(result[0].done_at.is_some());
        assert!(result[0].updated_at >= created.updated_at);
        assert_eq!(result[0].created_at, created.created_at);
    }

    #[actix_web::test]
    async fn test_mark_unknown_todo_done_is_200_with_empty_array() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let req = TestRequest::patch()
            .uri("/api/v1/todos/unknown")
            .set_json(json!({ "isDone": true }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::OK, resp.status());
        let result: Vec<Todo> = test::read_body_json(resp).await;
        assert!(result.is_empty());
    }

    #[actix_web::test]
    async fn test_delete_todo_twice() {
        let app = test::init_service(
            App::new().app_data(data(MemoryStore::new())).configure(api::config),
        )
        .await;

        let created: Vec<Todo> =
            test::call_and_read_body_json(&app, create_one_test_todo("Delete me").to_request()).await;
        let uri = format!("/api/v1/todos/{}", created[0].id);

        let resp = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
        assert_eq!(StatusCode::OK, resp.status());

        for _ in 0..2 {
            let resp = test::call_service(&app, TestRequest::delete().uri(&uri).to_request()).await;
            assert_eq!(StatusCode::NOT_FOUND, resp.status());
        }

        let resp = test::call_service(&app, TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(StatusCode::NOT_FOUND, resp.status());
    }

    #[actix_web::test]
    async fn test_store_failure_maps_to_500_message() {
        let app = test::init_service(
            App::new().app_data(data(FailingStore)).configure(api::config),
        )
        .await;

        let req = TestRequest::get().uri("/api/v1/todos").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, resp.status());
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.starts_with("database query failed"));

        let resp = test::call_service(&app, TestRequest::delete().uri("/api/v1/todos/x").to_request()).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, resp.status());
    }
}
