//! Back-office routes under `/admin/v1`

use actix_web::web;

use crate::api::middleware::AdminAuth;

use super::ads::{ads_summary, create_ad, delete_ad, get_ad, list_ads, update_ad, upload_image};
use super::auth::{login, login_rate_limiter, verify_token};
use super::database::{database_status, table_rows};
use super::news::{list_news, sync_news};
use super::settings::{get_logo, update_logo};
use super::users::{create_user, delete_user, get_user, list_users, update_user};

/// `/auth`: login (rate limited) and token check
pub fn auth_routes() -> actix_web::Scope {
    web::scope("/auth")
        .route("/login", web::post().to(login).wrap(login_rate_limiter()))
        .route("/verify", web::get().to(verify_token))
}

/// `/ads`; fixed segments are registered before `/{id}`
pub fn ads_routes() -> actix_web::Scope {
    web::scope("/ads")
        .route("", web::get().to(list_ads))
        .route("", web::post().to(create_ad))
        .route("/summary", web::get().to(ads_summary))
        .route("/upload", web::post().to(upload_image))
        .route("/{id}", web::get().to(get_ad))
        .route("/{id}", web::put().to(update_ad))
        .route("/{id}", web::delete().to(delete_ad))
}

/// `/users`, admin role only
pub fn users_routes() -> impl actix_web::dev::HttpServiceFactory {
    web::scope("/users")
        .wrap(AdminAuth::admin())
        .route("", web::get().to(list_users))
        .route("", web::post().to(create_user))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}", web::put().to(update_user))
        .route("/{id}", web::delete().to(delete_user))
}

pub fn news_routes() -> actix_web::Scope {
    web::scope("/news")
        .route("", web::get().to(list_news))
        .route("/sync", web::post().to(sync_news))
}

pub fn settings_routes() -> actix_web::Scope {
    web::scope("/settings")
        .route("/logo", web::get().to(get_logo))
        .route("/logo", web::put().to(update_logo))
}

pub fn database_routes() -> actix_web::Scope {
    web::scope("/database")
        .route("/status", web::get().to(database_status))
        .route("/tables/{table}", web::get().to(table_rows))
}

/// Admin API v1; every route except login needs at least the editor role
pub fn admin_v1_routes() -> impl actix_web::dev::HttpServiceFactory {
    web::scope("/v1")
        .wrap(AdminAuth::editor())
        .service(auth_routes())
        .service(ads_routes())
        .service(users_routes())
        .service(news_routes())
        .service(settings_routes())
        .service(database_routes())
}
