//! News endpoints for the back-office

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::info;

use crate::services::NewsSyncService;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_response, success_response};
use super::types::NewsQuery;

const ADMIN_NEWS_LIMIT: u64 = 200;

pub async fn list_news(
    query: web::Query<NewsQuery>,
    news: web::Data<Arc<NewsSyncService>>,
) -> ActixResult<impl Responder> {
    let limit = query.limit.unwrap_or(ADMIN_NEWS_LIMIT).min(ADMIN_NEWS_LIMIT);
    Ok(api_result(news.list_news(query.category, limit).await))
}

pub async fn sync_news(news: web::Data<Arc<NewsSyncService>>) -> ActixResult<impl Responder> {
    info!("Admin API: manual news sync requested");
    match news.sync_all_news().await {
        Ok(report) => Ok(success_response(report)),
        Err(e) => Ok(error_response(
            StatusCode::BAD_GATEWAY,
            ErrorCode::NewsSyncFailed,
            &format!("News sync failed: {}", e.message()),
        )),
    }
}
