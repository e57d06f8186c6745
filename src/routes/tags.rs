use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::forms::tags::CreateTagPayload;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tags;

#[get("")]
pub async fn list_tags(repo: web::Data<DieselRepository>) -> impl Responder {
    match tags::list_tags(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => error_response("Failed to list tags", err),
    }
}

#[post("")]
pub async fn create_tag(
    payload: web::Json<CreateTagPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tags::create_tag(repo.get_ref(), payload.into_inner()) {
        Ok(tag) => HttpResponse::Ok().json(tag),
        Err(err) => error_response("Failed to create tag", err),
    }
}

#[delete("/{tag_id}")]
pub async fn delete_tag(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let tag_id = path.into_inner();

    match tags::remove_tag(repo.get_ref(), tag_id) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(err) => error_response("Failed to delete tag", err),
    }
}
