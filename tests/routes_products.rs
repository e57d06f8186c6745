use actix_web::{App, test, web};
use serde_json::{Value, json};

use catalog_api::repository::DieselRepository;
use catalog_api::routes::products::{
    create_product, delete_product, get_product, list_products, update_product,
};

mod common;

macro_rules! product_app {
    ($repo:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .service(
                    web::scope("/api/products")
                        .service(list_products)
                        .service(create_product)
                        .service(get_product)
                        .service(update_product)
                        .service(delete_product),
                ),
        )
        .await
    };
}

#[actix_web::test]
async fn product_endpoints_round_trip() {
    let test_db = common::TestDb::new("routes_product_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());
    let tags = common::seed_tags(&repo, 4);
    let app = product_app!(repo);

    // empty catalog lists as an empty array
    let req = test::TestRequest::get().uri("/api/products").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));

    // create with tags answers with the sync result
    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({
            "name": "Basketball",
            "price": 200.00,
            "stock": 3,
            "tagIds": [tags[0], tags[1], tags[2]],
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let product_id = body
        .get("product_id")
        .and_then(Value::as_i64)
        .expect("expected a tag sync body");
    assert_eq!(
        body.get("attached").and_then(Value::as_array).map(Vec::len),
        Some(3)
    );

    // get-one returns the product with its tags nested
    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{product_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("name").and_then(Value::as_str), Some("Basketball"));
    assert_eq!(body.get("price").and_then(Value::as_f64), Some(200.0));
    let loaded_tags = body
        .get("tags")
        .and_then(Value::as_array)
        .expect("tags array");
    assert_eq!(loaded_tags.len(), 3);

    // update with a shifted tag set answers with the reconciliation result
    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{product_id}"))
        .set_json(json!({"tagIds": [tags[1], tags[2], tags[3]]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("detached").and_then(Value::as_u64), Some(1));
    assert_eq!(
        body.get("attached").and_then(Value::as_array).map(Vec::len),
        Some(1)
    );

    // update without tags answers with the product itself
    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{product_id}"))
        .set_json(json!({"stock": 5}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("stock").and_then(Value::as_i64), Some(5));

    // delete reports the removed row count, zero the second time
    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{product_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"deleted": 1}));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{product_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"deleted": 0}));
}

#[actix_web::test]
async fn get_missing_product_returns_null_with_success_status() {
    let test_db = common::TestDb::new("routes_product_missing_null.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = product_app!(repo);

    let req = test::TestRequest::get()
        .uri("/api/products/12345")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn create_product_rejects_invalid_payload() {
    let test_db = common::TestDb::new("routes_product_invalid_payload.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = product_app!(repo);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(json!({"name": "Basketball", "price": -1.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_missing_product_returns_not_found() {
    let test_db = common::TestDb::new("routes_product_update_missing.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = product_app!(repo);

    let req = test::TestRequest::put()
        .uri("/api/products/9999")
        .set_json(json!({"stock": 1}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}
