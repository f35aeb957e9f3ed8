use actix_web::{web, App, HttpServer};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use linkbox::config::Config;
use linkbox::middleware::LinkDispatch;
use linkbox::services::{AdminService, AuthService, FrontendService, VisitCounter};
use linkbox::storage::StoreFactory;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let store = StoreFactory::create().await.map_err(|e| {
        std::io::Error::other(format!("Failed to create storage backend: {}", e))
    })?;
    info!("Using storage backend: {}", store.backend_name().await);

    let visits = Arc::new(VisitCounter::new(store.clone()));

    let bind_addr = (config.server_host.clone(), config.server_port);
    info!("Listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .wrap(LinkDispatch::new(store.clone(), visits.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(config.clone()))
            .service(
                web::scope("/api")
                    .route("/login", web::post().to(AuthService::login))
                    .route("/links", web::get().to(AdminService::get_all_links))
                    .route("/links", web::post().to(AdminService::post_link))
                    .route("/links/{code}", web::put().to(AdminService::update_link))
                    .route("/links/{code}", web::delete().to(AdminService::delete_link)),
            )
            .route("/", web::get().to(FrontendService::handle_index))
            .route("/login", web::get().to(FrontendService::handle_index))
            .route("/dashboard", web::get().to(FrontendService::handle_index))
            .route("/robots.txt", web::get().to(FrontendService::handle_robots))
            .route(
                "/assets/{path:.*}",
                web::get().to(FrontendService::handle_static),
            )
            .default_service(web::route().to(FrontendService::handle_not_found))
    })
    .bind(bind_addr)?
    .run()
    .await
}
