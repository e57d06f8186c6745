use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::json;

use crate::forms::products::{CreateProductPayload, UpdateProductPayload};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products;

#[get("")]
pub async fn list_products(repo: web::Data<DieselRepository>) -> impl Responder {
    match products::list_products(repo.get_ref()) {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().json(json!({"error": "failed to fetch products"}))
        }
    }
}

#[get("/{product_id}")]
pub async fn get_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::get_product(repo.get_ref(), product_id) {
        // a missing id answers with a JSON null body, not a 404
        Ok(found) => HttpResponse::Ok().json(found),
        Err(err) => error_response("Failed to fetch product", err),
    }
}

#[post("")]
pub async fn create_product(
    payload: web::Json<CreateProductPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), payload.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response("Failed to create product", err),
    }
}

#[put("/{product_id}")]
pub async fn update_product(
    path: web::Path<i32>,
    payload: web::Json<UpdateProductPayload>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::update_product(repo.get_ref(), product_id, payload.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => error_response("Failed to update product", err),
    }
}

#[delete("/{product_id}")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::delete_product(repo.get_ref(), product_id) {
        // zero rows is still a success
        Ok(deleted) => HttpResponse::Ok().json(json!({"deleted": deleted})),
        Err(err) => error_response("Failed to delete product", err),
    }
}
