//! Request and response bodies of the back-office API

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::storage::backend::TableCount;
use crate::storage::{NewsCategory, User};

pub use crate::storage::models::TS_EXPORT_PATH;

/// Envelope for every JSON answer: `{code, message, data}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: u64,
    pub user: User,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
    pub role: crate::storage::UserRole,
    pub expires_at: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Stored location, saved as the ad's `imageUrl`
    pub url: String,
    /// Browser-loadable form of `url`
    pub display_url: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAdQuery {
    #[serde(default)]
    pub delete_image: bool,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct NewsQuery {
    pub category: Option<NewsCategory>,
    pub limit: Option<u64>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TableQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub backend: String,
    pub connected: bool,
    pub tables: Vec<TableCount>,
}

#[derive(Serialize, Deserialize, Clone, Debug, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct MessageResponse {
    pub message: String,
}
