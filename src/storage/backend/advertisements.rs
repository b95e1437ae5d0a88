//! Advertisement operations for SeaOrmStorage

use chrono::Utc;
use sea_orm::sea_query::{CaseStatement, Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ExprTrait, QueryFilter,
    QueryOrder,
};
use tracing::{debug, info};

use super::SeaOrmStorage;
use super::converters::{ad_to_active_model, model_to_advertisement};
use super::retry;
use crate::errors::{LivescoreError, Result};
use crate::storage::models::{
    AdPosition, AdStatus, AdSummary, Advertisement, AdvertisementPatch, NewAdvertisement,
    calculate_ctr,
};

use migration::entities::advertisement;

/// Which counter a tracking call bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdCounter {
    Impression,
    Click,
}

/// `clicks * 100.0 / impressions` evaluated after the increment, 0 when nothing was shown
fn ctr_after(counter: AdCounter) -> Expr {
    let clicks = Expr::col(advertisement::Column::Clicks);
    let impressions = Expr::col(advertisement::Column::Impressions);
    match counter {
        AdCounter::Impression => clicks
            .mul(Expr::val(100.0))
            .div(impressions.add(Expr::val(1i64))),
        AdCounter::Click => CaseStatement::new()
            .case(
                Expr::col(advertisement::Column::Impressions).gt(Expr::val(0i64)),
                clicks
                    .add(Expr::val(1i64))
                    .mul(Expr::val(100.0))
                    .div(impressions),
            )
            .finally(Expr::val(0.0))
            .into(),
    }
}

/// Stored ctr derived from the current counters
fn ctr_from_stored() -> Expr {
    CaseStatement::new()
        .case(
            Expr::col(advertisement::Column::Impressions).gt(Expr::val(0i64)),
            Expr::col(advertisement::Column::Clicks)
                .mul(Expr::val(100.0))
                .div(Expr::col(advertisement::Column::Impressions)),
        )
        .finally(Expr::val(0.0))
        .into()
}

impl SeaOrmStorage {
    /// All advertisements, newest first
    pub async fn list_advertisements(&self) -> Result<Vec<Advertisement>> {
        let db = &self.db;
        let models = retry::with_retry("list_advertisements", self.retry_config, || async {
            advertisement::Entity::find()
                .order_by_desc(advertisement::Column::CreatedAt)
                .order_by_desc(advertisement::Column::Id)
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load advertisements: {}", e))
        })?;

        Ok(models.into_iter().map(model_to_advertisement).collect())
    }

    pub async fn get_advertisement(&self, id: i32) -> Result<Option<Advertisement>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_advertisement({})", id),
            self.retry_config,
            || async { advertisement::Entity::find_by_id(id).one(db).await },
        )
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load advertisement {}: {}", id, e))
        })?;

        Ok(model.map(model_to_advertisement))
    }

    /// Active ads for one slot. The schedule window is checked in Rust so
    /// timestamp comparison does not depend on how each backend stores dates.
    pub async fn list_running_advertisements(
        &self,
        position: AdPosition,
        now: chrono::DateTime<Utc>,
    ) -> Result<Vec<Advertisement>> {
        let db = &self.db;
        let models = retry::with_retry("list_running_advertisements", self.retry_config, || async {
            advertisement::Entity::find()
                .filter(advertisement::Column::Position.eq(position.as_ref()))
                .filter(advertisement::Column::Status.eq(AdStatus::Active.as_ref()))
                .order_by_desc(advertisement::Column::CreatedAt)
                .all(db)
                .await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!(
                "Failed to load advertisements for {}: {}",
                position.as_ref(),
                e
            ))
        })?;

        Ok(models
            .into_iter()
            .map(model_to_advertisement)
            .filter(|ad| ad.is_running_at(now))
            .collect())
    }

    pub async fn insert_advertisement(&self, ad: &NewAdvertisement) -> Result<Advertisement> {
        let active_model = ad_to_active_model(ad, Utc::now());
        let model = active_model.insert(&self.db).await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to create advertisement: {}", e))
        })?;

        info!("Advertisement created: {} ({})", model.id, model.name);
        Ok(model_to_advertisement(model))
    }

    /// Apply a partial update. `None` when the row does not exist.
    pub async fn update_advertisement(
        &self,
        id: i32,
        patch: &AdvertisementPatch,
    ) -> Result<Option<Advertisement>> {
        let mut update = advertisement::Entity::update_many()
            .col_expr(advertisement::Column::Ctr, ctr_from_stored())
            .col_expr(advertisement::Column::UpdatedAt, Expr::val(Utc::now()))
            .filter(advertisement::Column::Id.eq(id));

        if let Some(name) = &patch.name {
            update = update.col_expr(advertisement::Column::Name, Expr::val(name.trim()));
        }
        if let Some(position) = patch.position {
            update = update.col_expr(advertisement::Column::Position, Expr::val(position.as_ref()));
        }
        if let Some(size) = patch.size {
            update = update.col_expr(advertisement::Column::Size, Expr::val(size.as_ref()));
        }
        if let Some(image_url) = &patch.image_url {
            update = update.col_expr(advertisement::Column::ImageUrl, Expr::val(image_url.as_str()));
        }
        if let Some(destination_url) = &patch.destination_url {
            update = update.col_expr(
                advertisement::Column::DestinationUrl,
                Expr::val(destination_url.as_str()),
            );
        }
        if let Some(status) = patch.status {
            update = update.col_expr(advertisement::Column::Status, Expr::val(status.as_ref()));
        }
        if let Some(start_date) = patch.start_date {
            update = update.col_expr(advertisement::Column::StartDate, Expr::val(start_date));
        }
        if let Some(end_date) = patch.end_date {
            update = update.col_expr(advertisement::Column::EndDate, Expr::val(end_date));
        }
        if let Some(revenue) = patch.revenue {
            update = update.col_expr(advertisement::Column::Revenue, Expr::val(revenue));
        }

        let result = update.exec(&self.db).await.map_err(|e| {
            LivescoreError::database_operation(format!(
                "Failed to update advertisement {}: {}",
                id, e
            ))
        })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        info!("Advertisement updated: {}", id);
        self.get_advertisement(id).await
    }

    /// Delete and return the removed row, `None` when it did not exist
    pub async fn delete_advertisement(&self, id: i32) -> Result<Option<Advertisement>> {
        let Some(existing) = self.get_advertisement(id).await? else {
            return Ok(None);
        };

        let db = &self.db;
        let result = retry::with_retry(
            &format!("delete_advertisement({})", id),
            self.retry_config,
            || async { advertisement::Entity::delete_by_id(id).exec(db).await },
        )
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!(
                "Failed to delete advertisement {}: {}",
                id, e
            ))
        })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        info!("Advertisement deleted: {}", id);
        Ok(Some(existing))
    }

    /// Bump one counter and refresh ctr in a single UPDATE.
    ///
    /// Returns `false` when no advertisement has this id.
    pub async fn increment_ad_counter(&self, id: i32, counter: AdCounter) -> Result<bool> {
        let column = match counter {
            AdCounter::Impression => advertisement::Column::Impressions,
            AdCounter::Click => advertisement::Column::Clicks,
        };

        // ctr goes first: MySQL evaluates SET left to right, the others read
        // pre-update values throughout.
        let stmt = Query::update()
            .table(advertisement::Entity)
            .value(advertisement::Column::Ctr, ctr_after(counter))
            .value(column, Expr::col(column).add(Expr::val(1i64)))
            .and_where(Expr::col(advertisement::Column::Id).eq(Expr::val(id)))
            .to_owned();

        // Not retried: replaying an UPDATE that already committed counts twice
        let result = self.db.execute(&stmt).await.map_err(|e| {
            LivescoreError::database_operation(format!(
                "Failed to track {:?} for advertisement {}: {}",
                counter, id, e
            ))
        })?;

        debug!(
            "Tracked {:?} for advertisement {} on {}",
            counter,
            id,
            self.backend_name.to_uppercase()
        );
        Ok(result.rows_affected() > 0)
    }

    pub async fn advertisement_summary(&self) -> Result<AdSummary> {
        let ads = self.list_advertisements().await?;

        let mut summary = AdSummary {
            total_ads: ads.len(),
            ..Default::default()
        };
        for ad in &ads {
            match ad.status {
                AdStatus::Active => summary.active_ads += 1,
                AdStatus::Paused => summary.paused_ads += 1,
                AdStatus::Scheduled => summary.scheduled_ads += 1,
                AdStatus::Ended => summary.ended_ads += 1,
            }
            summary.total_impressions += ad.impressions;
            summary.total_clicks += ad.clicks;
            summary.total_revenue += ad.revenue;
        }
        summary.overall_ctr = calculate_ctr(summary.total_clicks, summary.total_impressions);

        Ok(summary)
    }
}
