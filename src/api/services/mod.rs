pub mod admin;
pub mod football;
pub mod health;
pub mod images;
pub mod proxy;
pub mod public;

pub use football::football_routes;
pub use health::{AppStartTime, HealthService, health_routes};
pub use public::public_routes;

use actix_web::web;

/// Everything under `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/proxy", web::get().to(proxy::proxy))
        .route("/blob-proxy", web::get().to(images::blob_proxy))
        .configure(football_routes)
        .configure(public_routes)
}
