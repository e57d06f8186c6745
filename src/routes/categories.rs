use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::forms::categories::CreateCategoryPayload;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::categories;

#[get("")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match categories::list_categories(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response("Failed to list categories", err),
    }
}

#[post("")]
pub async fn create_category(
    payload: web::Json<CreateCategoryPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match categories::create_category(repo.get_ref(), payload.into_inner()) {
        Ok(category) => HttpResponse::Ok().json(category),
        Err(err) => error_response("Failed to create category", err),
    }
}

#[delete("/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match categories::remove_category(repo.get_ref(), category_id) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response("Failed to delete category", err),
    }
}
