use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod categories;
pub mod products;
pub mod tags;

/// Map a service error to its HTTP response; `context` labels the log line
/// for faults the caller cannot act on.
pub(crate) fn error_response(context: &str, err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().json(json!({"error": "not found"})),
        ServiceError::Form(message) => HttpResponse::BadRequest().json(json!({"error": message})),
        ServiceError::Conflict(message) => {
            HttpResponse::Conflict().json(json!({"error": message}))
        }
        err => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError().json(json!({"error": "internal error"}))
        }
    }
}
