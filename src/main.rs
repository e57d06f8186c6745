use std::env;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use catalog_api::db::establish_connection_pool;
use catalog_api::repository::DieselRepository;
use catalog_api::routes::categories::{create_category, delete_category, list_categories};
use catalog_api::routes::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use catalog_api::routes::tags::{create_tag, delete_tag, list_tags};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/products")
                    .service(list_products)
                    .service(create_product)
                    .service(get_product)
                    .service(update_product)
                    .service(delete_product),
            )
            .service(
                web::scope("/api/categories")
                    .service(list_categories)
                    .service(create_category)
                    .service(delete_category),
            )
            .service(
                web::scope("/api/tags")
                    .service(list_tags)
                    .service(create_tag)
                    .service(delete_tag),
            )
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
