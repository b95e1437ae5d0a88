//! Advertisement management and tracking

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::blob_storage::BlobStorage;
use crate::errors::{LivescoreError, Result};
use crate::storage::{
    AdCounter, AdPosition, AdSummary, Advertisement, AdvertisementPatch, NewAdvertisement,
    SeaOrmStorage,
};
use crate::utils::url_validator::validate_url_or_path;

const MAX_NAME_LEN: usize = 200;

pub struct AdvertisementService {
    storage: Arc<SeaOrmStorage>,
    blob: Arc<BlobStorage>,
}

fn validate_name(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LivescoreError::validation("Advertisement name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(LivescoreError::validation(format!(
            "Advertisement name is longer than {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

fn validate_link(field: &str, url: &str) -> Result<()> {
    validate_url_or_path(url).map_err(|e| LivescoreError::validation(format!("{}: {}", field, e)))
}

fn validate_revenue(revenue: f64) -> Result<()> {
    if !revenue.is_finite() || revenue < 0.0 {
        return Err(LivescoreError::validation("revenue must be a non-negative number"));
    }
    Ok(())
}

fn validate_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<()> {
    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        return Err(LivescoreError::validation("endDate must be after startDate"));
    }
    Ok(())
}

impl AdvertisementService {
    pub fn new(storage: Arc<SeaOrmStorage>, blob: Arc<BlobStorage>) -> Self {
        Self { storage, blob }
    }

    pub async fn get_all_advertisements(&self) -> Result<Vec<Advertisement>> {
        self.storage.list_advertisements().await
    }

    /// `None` when no advertisement has this id
    pub async fn get_advertisement_by_id(&self, id: i32) -> Result<Option<Advertisement>> {
        self.storage.get_advertisement(id).await
    }

    /// Ads currently running in one slot
    pub async fn get_active_advertisements(
        &self,
        position: AdPosition,
        now: DateTime<Utc>,
    ) -> Result<Vec<Advertisement>> {
        self.storage.list_running_advertisements(position, now).await
    }

    pub async fn create_ad(&self, ad: NewAdvertisement) -> Result<Advertisement> {
        validate_name(&ad.name)?;
        validate_link("imageUrl", &ad.image_url)?;
        validate_link("destinationUrl", &ad.destination_url)?;
        validate_revenue(ad.revenue)?;
        validate_window(ad.start_date, ad.end_date)?;

        self.storage.insert_advertisement(&ad).await
    }

    /// Partial update; `None` when the advertisement does not exist
    pub async fn update_ad(
        &self,
        id: i32,
        patch: AdvertisementPatch,
    ) -> Result<Option<Advertisement>> {
        let Some(existing) = self.storage.get_advertisement(id).await? else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(url) = &patch.image_url {
            validate_link("imageUrl", url)?;
        }
        if let Some(url) = &patch.destination_url {
            validate_link("destinationUrl", url)?;
        }
        if let Some(revenue) = patch.revenue {
            validate_revenue(revenue)?;
        }
        validate_window(
            patch.start_date.unwrap_or(existing.start_date),
            patch.end_date.unwrap_or(existing.end_date),
        )?;

        self.storage.update_advertisement(id, &patch).await
    }

    /// `false` when there was nothing to delete
    pub async fn delete_advertisement(&self, id: i32, delete_image: bool) -> Result<bool> {
        let Some(deleted) = self.storage.delete_advertisement(id).await? else {
            return Ok(false);
        };

        if delete_image {
            self.delete_image_quietly(&deleted.image_url).await;
        }
        Ok(true)
    }

    async fn delete_image_quietly(&self, url: &str) {
        match self.blob.delete_file(url).await {
            Ok(true) => info!("Removed image {}", url),
            Ok(false) => {}
            Err(e) => warn!("Failed to remove image {}: {}", url, e),
        }
    }

    /// `false` when the id is unknown
    pub async fn track_impression(&self, id: i32) -> Result<bool> {
        self.storage
            .increment_ad_counter(id, AdCounter::Impression)
            .await
    }

    /// `false` when the id is unknown
    pub async fn track_click(&self, id: i32) -> Result<bool> {
        self.storage.increment_ad_counter(id, AdCounter::Click).await
    }

    pub async fn ad_summary(&self) -> Result<AdSummary> {
        self.storage.advertisement_summary().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Hero banner").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_link_validation() {
        assert!(validate_link("imageUrl", "/ads/a.png").is_ok());
        assert!(validate_link("imageUrl", "https://cdn.example.com/a.png").is_ok());
        let err = validate_link("destinationUrl", "javascript:alert(1)").unwrap_err();
        assert!(err.message().starts_with("destinationUrl"));
    }

    #[test]
    fn test_revenue_validation() {
        assert!(validate_revenue(0.0).is_ok());
        assert!(validate_revenue(-1.0).is_err());
        assert!(validate_revenue(f64::NAN).is_err());
    }

    #[test]
    fn test_window_validation() {
        let now = Utc::now();
        assert!(validate_window(Some(now), Some(now + Duration::days(1))).is_ok());
        assert!(validate_window(Some(now), Some(now)).is_err());
        assert!(validate_window(None, Some(now)).is_ok());
    }
}
