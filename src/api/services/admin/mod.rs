//! Back-office API
//!
//! - auth (login, token check)
//! - advertisements and image upload
//! - users
//! - news sync
//! - site settings
//! - database browser

mod ads;
mod auth;
mod database;
pub mod error_code;
mod helpers;
mod news;
pub mod routes;
mod settings;
mod types;
mod users;

pub use types::*;

pub use helpers::{
    api_result, error_from_livescore, error_response, json_response, optional_result,
    success_response,
};

pub use error_code::ErrorCode;

pub use auth::login_rate_limiter;
pub use routes::admin_v1_routes;
