use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode, header::CONTENT_TYPE},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

use crate::api::constants;
use crate::api::jwt::{AccessClaims, get_jwt_service};
use crate::api::services::admin::{ApiResponse, ErrorCode};
use crate::services::UserService;
use crate::storage::UserRole;

/// Bearer JWT guard for the back-office
///
/// The token only identifies the caller: the account is re-read on every
/// request, so a disabled or demoted account loses access at once.
/// Claims carrying the current role are stored in the request extensions,
/// so handlers can take `web::ReqData<AccessClaims>`.
#[derive(Clone, Copy)]
pub struct AdminAuth {
    required: UserRole,
}

impl AdminAuth {
    pub fn new(required: UserRole) -> Self {
        Self { required }
    }

    /// Content management: ads, news, settings, database status
    pub fn editor() -> Self {
        Self::new(UserRole::Editor)
    }

    /// User management
    pub fn admin() -> Self {
        Self::new(UserRole::Admin)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    required: UserRole,
}

impl<S, B> AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// Handle OPTIONS requests for CORS preflight
    fn handle_options_request(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::NoContent()
                .insert_header((CONTENT_TYPE, "text/plain; charset=utf-8"))
                .finish()
                .map_into_right_body(),
        )
    }

    fn reject(
        req: ServiceRequest,
        status: StatusCode,
        code: ErrorCode,
        message: &str,
    ) -> ServiceResponse<EitherBody<B>> {
        req.into_response(
            HttpResponse::build(status)
                .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
                .json(ApiResponse::<()> {
                    code: code as i32,
                    message: message.to_string(),
                    data: None,
                })
                .map_into_right_body(),
        )
    }

    fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
        req.headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.trim().to_string())
    }

    fn validate_bearer_token(token: &str) -> Option<AccessClaims> {
        match get_jwt_service().validate_access_token(token) {
            Ok(claims) => {
                trace!("Bearer token validation successful");
                Some(claims)
            }
            Err(e) => {
                info!("Bearer token validation failed: {}", e);
                None
            }
        }
    }
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required;

        Box::pin(async move {
            if req.method() == Method::OPTIONS {
                return Ok(Self::handle_options_request(req));
            }

            if req.path() == constants::LOGIN_PATH {
                trace!("Login endpoint accessed - bypassing authentication");
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let Some(claims) = Self::extract_bearer_token(&req)
                .as_deref()
                .and_then(Self::validate_bearer_token)
            else {
                return Ok(Self::reject(
                    req,
                    StatusCode::UNAUTHORIZED,
                    ErrorCode::Unauthorized,
                    "Unauthorized: Invalid or missing token",
                ));
            };

            let Some(users) = req.app_data::<web::Data<Arc<UserService>>>().cloned() else {
                error!("UserService is not registered; refusing {}", req.path());
                return Ok(Self::reject(
                    req,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    "Internal server error",
                ));
            };

            let current = match claims.user_id() {
                Some(id) => users.get_user(id).await,
                None => Ok(None),
            };
            let user = match current {
                Ok(Some(user)) if user.is_active => user,
                Ok(_) => {
                    info!(
                        "Token for '{}' refers to a disabled or removed account",
                        claims.username
                    );
                    return Ok(Self::reject(
                        req,
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Unauthorized: account disabled or removed",
                    ));
                }
                Err(e) => {
                    error!("Failed to load user for token check: {}", e);
                    return Ok(Self::reject(
                        req,
                        StatusCode::SERVICE_UNAVAILABLE,
                        ErrorCode::ServiceUnavailable,
                        "Service unavailable",
                    ));
                }
            };
            let claims = AccessClaims {
                username: user.username,
                role: user.role,
                ..claims
            };

            if !claims.has_role(required) {
                debug!(
                    "User '{}' ({}) lacks role '{}' for {}",
                    claims.username,
                    claims.role.as_ref(),
                    required.as_ref(),
                    req.path()
                );
                return Ok(Self::reject(
                    req,
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "Forbidden: insufficient role",
                ));
            }

            req.extensions_mut().insert(claims);
            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}
