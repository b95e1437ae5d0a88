//! Row <-> domain conversions
//!
//! Rows keep snake_case columns and store enums as their string names; the
//! domain types serialize as camelCase for the web front-end.

use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};
use tracing::warn;

use crate::storage::models::{
    AdPosition, AdSize, AdStatus, Advertisement, NewAdvertisement, NewsArticle, NewsCategory,
    NewsDraft, User, UserRole, calculate_ctr,
};
use migration::entities::{advertisement, news_article, user};

/// Parse a stored enum name, falling back to `fallback` for unknown values
fn parse_or<T: FromStr + Copy + AsRef<str>>(raw: &str, column: &str, fallback: T) -> T {
    T::from_str(raw).unwrap_or_else(|_| {
        warn!(
            "Unknown {} value '{}' in database, using '{}'",
            column,
            raw,
            fallback.as_ref()
        );
        fallback
    })
}

pub fn model_to_advertisement(model: advertisement::Model) -> Advertisement {
    let impressions = model.impressions.max(0);
    let clicks = model.clicks.max(0);
    Advertisement {
        id: model.id,
        name: model.name,
        position: parse_or(&model.position, "position", AdPosition::Sidebar),
        size: parse_or(&model.size, "size", AdSize::Medium),
        image_url: model.image_url,
        destination_url: model.destination_url,
        status: parse_or(&model.status, "status", AdStatus::Paused),
        start_date: model.start_date,
        end_date: model.end_date,
        impressions,
        clicks,
        // Derived from the counters rather than trusting the stored column
        ctr: calculate_ctr(clicks, impressions),
        revenue: model.revenue,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// ActiveModel for a brand new advertisement: counters start at zero
pub fn ad_to_active_model(
    ad: &NewAdvertisement,
    now: chrono::DateTime<chrono::Utc>,
) -> advertisement::ActiveModel {
    advertisement::ActiveModel {
        id: NotSet,
        name: Set(ad.name.trim().to_string()),
        position: Set(ad.position.as_ref().to_string()),
        size: Set(ad.size.as_ref().to_string()),
        image_url: Set(ad.image_url.clone()),
        destination_url: Set(ad.destination_url.clone()),
        status: Set(ad.status.as_ref().to_string()),
        start_date: Set(ad.start_date),
        end_date: Set(ad.end_date),
        impressions: Set(0),
        clicks: Set(0),
        ctr: Set(0.0),
        revenue: Set(ad.revenue),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub fn model_to_news(model: news_article::Model) -> NewsArticle {
    let tags = serde_json::from_str::<Vec<String>>(&model.tags).unwrap_or_else(|e| {
        warn!("Invalid tags JSON for article {}: {}", model.slug, e);
        Vec::new()
    });
    NewsArticle {
        id: model.id,
        title: model.title,
        original_title: model.original_title,
        content: model.content,
        summary: model.summary,
        image_url: model.image_url,
        published_at: model.published_at,
        source: model.source,
        category: parse_or(&model.category, "category", NewsCategory::International),
        slug: model.slug,
        tags,
        url: model.url,
    }
}

pub fn news_to_active_model(
    draft: &NewsDraft,
    now: chrono::DateTime<chrono::Utc>,
) -> news_article::ActiveModel {
    news_article::ActiveModel {
        id: NotSet,
        title: Set(draft.title.clone()),
        original_title: Set(draft.original_title.clone()),
        content: Set(draft.content.clone()),
        summary: Set(draft.summary.clone()),
        image_url: Set(draft.image_url.clone()),
        published_at: Set(draft.published_at),
        source: Set(draft.source.clone()),
        category: Set(draft.category.as_ref().to_string()),
        slug: Set(draft.slug.clone()),
        tags: Set(serde_json::to_string(&draft.tags).unwrap_or_else(|_| "[]".to_string())),
        url: Set(draft.url.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// The password hash never leaves the storage layer
pub fn model_to_user(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        role: parse_or(&model.role, "role", UserRole::User),
        is_active: model.is_active,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}
