mod api;
mod config;
mod database;
mod middleware;
mod models;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::database::{MongoDB, ProfileStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();

    log::info!("🚀 Starting User Profile Service...");
    log::info!("📊 Database: {} ({}.{})", config.mongodb_uri, config.database, config.collection);

    // Conexão e índice são fatais: sem eles o processo não sobe
    let db = MongoDB::new(&config).await.map_err(|e| {
        log::error!("❌ Failed to initialize MongoDB: {}", e);
        std::io::Error::other(e)
    })?;
    log::info!("✅ MongoDB connected successfully");

    let store: Arc<dyn ProfileStore> = Arc::new(db);
    let store_data = web::Data::from(store);

    let (host, port) = config.bind_address();
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::Recover)
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((host, port))?
    .run()
    .await?;

    // run() só retorna após shutdown gracioso (SIGINT/SIGTERM)
    log::info!("👋 Server closed");
    Ok(())
}
