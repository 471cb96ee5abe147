use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::ContentType;
use actix_web::middleware::{Compress, DefaultHeaders, Logger};
use actix_web::{get, web, App, HttpResponse, Responder, Result};

use crate::error::{ApiError, ErrorResponse};
use crate::repository::TodoStore;

pub mod todos;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("Hello World!")
}

/// Liveness only, the store is not consulted.
#[get("/healthcheck")]
async fn healthcheck() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK")
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(ErrorResponse::new("Resource not found")))
}

/// Registers every route plus the JSON body config, so malformed bodies are
/// answered by [`ApiError`] like any other failure.
pub fn config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
    cfg.app_data(json_config)
        .service(index)
        .service(healthcheck)
        .configure(todos::config);
}

/// The full application: routes, JSON 404 fallback, security headers,
/// response compression and access logging.
pub fn app(
    store: web::Data<dyn TodoStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(store)
        .configure(config)
        .default_service(web::route().to(not_found))
        .wrap(
            DefaultHeaders::new()
                .add(("X-Content-Type-Options", "nosniff"))
                .add(("X-Frame-Options", "DENY"))
                .add(("Referrer-Policy", "no-referrer")),
        )
        .wrap(Compress::default())
        .wrap(Logger::default())
}
