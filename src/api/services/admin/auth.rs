//! Back-office login and token check

use actix_governor::{Governor, GovernorConfigBuilder, KeyExtractor, SimpleKeyExtractionError};
use actix_web::dev::ServiceRequest;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::jwt::{AccessClaims, get_jwt_service};
use crate::services::UserService;

use super::error_code::ErrorCode;
use super::helpers::{error_from_livescore, error_response, success_response};
use super::types::{LoginCredentials, LoginResponse, VerifyResponse};

/// Rate-limit key: the TCP peer address
#[derive(Clone, Copy)]
pub struct LoginKeyExtractor;

impl KeyExtractor for LoginKeyExtractor {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        let conn_info = req.connection_info();
        Ok(conn_info.peer_addr().unwrap_or("unknown").to_string())
    }
}

/// 1 token per second, bursts of 5; excess gets HTTP 429
pub fn login_rate_limiter() -> Governor<LoginKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .key_extractor(LoginKeyExtractor)
        .finish()
        .expect("Invalid rate limit config");

    debug!("Login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

pub async fn login(
    body: web::Json<LoginCredentials>,
    users: web::Data<Arc<UserService>>,
) -> ActixResult<impl Responder> {
    let user = match users.authenticate(&body.username, &body.password).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            warn!("Admin API: login failed for '{}'", body.username);
            return Ok(error_response(
                StatusCode::UNAUTHORIZED,
                ErrorCode::AuthFailed,
                "Invalid username or password",
            ));
        }
        Err(e) => return Ok(error_from_livescore(&e)),
    };

    let jwt_service = get_jwt_service();
    let token = match jwt_service.generate_access_token(&user) {
        Ok(token) => token,
        Err(e) => {
            error!("Admin API: failed to generate access token: {}", e);
            return Ok(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                "Failed to generate token",
            ));
        }
    };

    info!("Admin API: '{}' logged in as {}", user.username, user.role.as_ref());
    Ok(success_response(LoginResponse {
        token,
        expires_in: jwt_service.access_token_minutes() * 60,
        user,
    }))
}

/// Reaching this handler means the middleware accepted the token
pub async fn verify_token(claims: web::ReqData<AccessClaims>) -> ActixResult<impl Responder> {
    let claims = claims.into_inner();
    Ok(success_response(VerifyResponse {
        valid: true,
        username: claims.username,
        role: claims.role,
        expires_at: claims.exp,
    }))
}
