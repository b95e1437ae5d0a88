//! Envelope builders shared by every JSON endpoint

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use crate::errors::LivescoreError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

pub fn created_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::CREATED, ErrorCode::Success, "Created", Some(data))
}

pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// Map a crate error to its HTTP status and code. Server-side failures are
/// logged here so handlers don't have to.
pub fn error_from_livescore(err: &LivescoreError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("{}", err);
    }
    error_response(status, ErrorCode::from(err), err.message())
}

/// 200 with the data, or the mapped error
pub fn api_result<T: Serialize>(result: Result<T, LivescoreError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_livescore(&e),
    }
}

/// 200 with the data, 404 with `code` when the lookup found nothing
pub fn optional_result<T: Serialize>(
    result: Result<Option<T>, LivescoreError>,
    code: ErrorCode,
    not_found: &str,
) -> HttpResponse {
    match result {
        Ok(Some(data)) => success_response(data),
        Ok(None) => error_response(StatusCode::NOT_FOUND, code, not_found),
        Err(e) => error_from_livescore(&e),
    }
}
