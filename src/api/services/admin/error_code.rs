//! Numeric error codes carried in every API envelope

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use super::types::TS_EXPORT_PATH;
use crate::errors::LivescoreError;

/// API error codes, grouped by thousands:
/// - 0: success
/// - 1000-1099: general
/// - 2000-2099: authentication
/// - 3000-3099: advertisements and uploads
/// - 4000-4099: users
/// - 5000-5099: news
/// - 6000-6099: upstream services
/// - 7000-7099: database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    FileTooLarge = 1011,
    ServiceUnavailable = 1030,

    AuthFailed = 2000,
    TokenInvalid = 2002,
    RateLimitExceeded = 2004,

    AdNotFound = 3000,
    AdInvalid = 3001,
    UploadFailed = 3002,
    InvalidMultipartData = 3003,

    UserNotFound = 4000,
    UserInvalid = 4001,

    NewsNotFound = 5000,
    NewsSyncFailed = 5001,

    UpstreamError = 6000,
    UpstreamUnavailable = 6001,

    DatabaseError = 7000,
}

impl From<&LivescoreError> for ErrorCode {
    fn from(err: &LivescoreError) -> Self {
        match err {
            LivescoreError::Validation(_) => ErrorCode::BadRequest,
            LivescoreError::NotFound(_) => ErrorCode::NotFound,
            LivescoreError::Unauthorized(_) => ErrorCode::Unauthorized,
            LivescoreError::Forbidden(_) => ErrorCode::Forbidden,
            LivescoreError::Upstream { .. } => ErrorCode::UpstreamError,
            LivescoreError::Network(_) => ErrorCode::UpstreamUnavailable,
            LivescoreError::Storage(_) | LivescoreError::FileOperation(_) => {
                ErrorCode::UploadFailed
            }
            LivescoreError::DatabaseConnection(_) => ErrorCode::ServiceUnavailable,
            LivescoreError::DatabaseConfig(_) | LivescoreError::DatabaseOperation(_) => {
                ErrorCode::DatabaseError
            }
            LivescoreError::Serialization(_) | LivescoreError::PasswordHash(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
