//! Public site endpoints: ads, ad tracking, news and the logo

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde::Deserialize;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{trace, warn};

use crate::api::services::admin::{ErrorCode, api_result, error_from_livescore, optional_result};
use crate::errors::Result;
use crate::services::blob_storage::format_blob_url;
use crate::services::{AdvertisementService, NewsSyncService, SiteSettingsService};
use crate::storage::{AdPosition, Advertisement, NewsCategory};

const DEFAULT_NEWS_LIMIT: u64 = 20;
const MAX_NEWS_LIMIT: u64 = 100;

#[derive(Deserialize, Debug, Default)]
pub struct AdsQuery {
    pub position: Option<AdPosition>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PublicNewsQuery {
    pub category: Option<NewsCategory>,
    pub limit: Option<u64>,
}

fn for_display(mut ad: Advertisement) -> Advertisement {
    ad.image_url = format_blob_url(&ad.image_url);
    ad
}

/// Running ads for one slot, or for every slot when no position is given
pub async fn active_ads(
    query: web::Query<AdsQuery>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    let now = chrono::Utc::now();
    let positions: Vec<AdPosition> = match query.position {
        Some(position) => vec![position],
        None => AdPosition::iter().collect(),
    };

    let mut running = Vec::new();
    for position in positions {
        match ads.get_active_advertisements(position, now).await {
            Ok(found) => running.extend(found.into_iter().map(for_display)),
            Err(e) => return Ok(error_from_livescore(&e)),
        }
    }
    Ok(api_result(Ok(running)))
}

/// Tracking never fails the page: errors and unknown ids are only logged
fn tracked(kind: &str, id: i32, result: Result<bool>) -> HttpResponse {
    match result {
        Ok(true) => trace!("Tracked {} for ad {}", kind, id),
        Ok(false) => warn!("Tracking {} for unknown ad {}", kind, id),
        Err(e) => warn!("Failed to track {} for ad {}: {}", kind, id, e),
    }
    HttpResponse::NoContent().finish()
}

pub async fn track_impression(
    path: web::Path<i32>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> impl Responder {
    let id = path.into_inner();
    tracked("impression", id, ads.track_impression(id).await)
}

pub async fn track_click(
    path: web::Path<i32>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> impl Responder {
    let id = path.into_inner();
    tracked("click", id, ads.track_click(id).await)
}

pub async fn list_news(
    query: web::Query<PublicNewsQuery>,
    news: web::Data<Arc<NewsSyncService>>,
) -> ActixResult<impl Responder> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_NEWS_LIMIT)
        .clamp(1, MAX_NEWS_LIMIT);
    Ok(api_result(news.list_news(query.category, limit).await))
}

pub async fn news_by_slug(
    path: web::Path<String>,
    news: web::Data<Arc<NewsSyncService>>,
) -> ActixResult<impl Responder> {
    let slug = path.into_inner();
    Ok(optional_result(
        news.get_by_slug(&slug).await,
        ErrorCode::NewsNotFound,
        "Article not found",
    ))
}

pub async fn logo(settings: web::Data<Arc<SiteSettingsService>>) -> ActixResult<impl Responder> {
    let result = settings.get_logo_settings().await.map(|mut logo| {
        logo.image_url = format_blob_url(&logo.image_url);
        logo
    });
    Ok(api_result(result))
}

pub fn public_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ads", web::get().to(active_ads))
        .route("/ads/{id}/impression", web::post().to(track_impression))
        .route("/ads/{id}/click", web::post().to(track_click))
        .route("/news", web::get().to(list_news))
        .route("/news/{slug}", web::get().to(news_by_slug))
        .route("/settings/logo", web::get().to(logo));
}
