//! User management endpoints (admin role)

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::info;

use crate::api::jwt::AccessClaims;
use crate::services::UserService;
use crate::storage::{NewUser, UserPatch};

use super::error_code::ErrorCode;
use super::helpers::{
    api_result, created_response, error_from_livescore, error_response, optional_result,
    success_response,
};
use super::types::MessageResponse;

pub async fn list_users(users: web::Data<Arc<UserService>>) -> ActixResult<impl Responder> {
    Ok(api_result(users.list_users().await))
}

pub async fn get_user(
    path: web::Path<i32>,
    users: web::Data<Arc<UserService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        users.get_user(id).await,
        ErrorCode::UserNotFound,
        &format!("User {} not found", id),
    ))
}

pub async fn create_user(
    body: web::Json<NewUser>,
    users: web::Data<Arc<UserService>>,
    claims: web::ReqData<AccessClaims>,
) -> ActixResult<impl Responder> {
    match users.create_user(body.into_inner()).await {
        Ok(user) => {
            info!(
                "Admin API: '{}' created user '{}' ({})",
                claims.username,
                user.username,
                user.role.as_ref()
            );
            Ok(created_response(user))
        }
        Err(e) => Ok(error_from_livescore(&e)),
    }
}

pub async fn update_user(
    path: web::Path<i32>,
    body: web::Json<UserPatch>,
    users: web::Data<Arc<UserService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        users.update_user(id, body.into_inner()).await,
        ErrorCode::UserNotFound,
        &format!("User {} not found", id),
    ))
}

pub async fn delete_user(
    path: web::Path<i32>,
    users: web::Data<Arc<UserService>>,
    claims: web::ReqData<AccessClaims>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    if claims.user_id() == Some(id) {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::UserInvalid,
            "You cannot delete your own account",
        ));
    }

    match users.delete_user(id).await {
        Ok(true) => Ok(success_response(MessageResponse {
            message: format!("User {} deleted", id),
        })),
        Ok(false) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::UserNotFound,
            &format!("User {} not found", id),
        )),
        Err(e) => Ok(error_from_livescore(&e)),
    }
}
