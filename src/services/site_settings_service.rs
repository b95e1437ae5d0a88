//! Site-wide settings shown on every page

use std::sync::Arc;

use crate::errors::{LivescoreError, Result};
use crate::storage::{LogoSettings, SeaOrmStorage};
use crate::utils::url_validator::validate_url_or_path;

const MAX_LOGO_DIMENSION: i32 = 2000;

pub struct SiteSettingsService {
    storage: Arc<SeaOrmStorage>,
}

fn validate_logo(logo: &LogoSettings) -> Result<()> {
    validate_url_or_path(&logo.image_url)
        .map_err(|e| LivescoreError::validation(format!("imageUrl: {}", e)))?;

    for (field, value) in [("width", logo.width), ("height", logo.height)] {
        if !(1..=MAX_LOGO_DIMENSION).contains(&value) {
            return Err(LivescoreError::validation(format!(
                "{} must be between 1 and {}",
                field, MAX_LOGO_DIMENSION
            )));
        }
    }

    if logo.alt_text.trim().is_empty() {
        return Err(LivescoreError::validation("altText cannot be empty"));
    }
    Ok(())
}

impl SiteSettingsService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// The stored logo, or the built-in default when none was saved
    pub async fn get_logo_settings(&self) -> Result<LogoSettings> {
        Ok(self.storage.get_logo().await?.unwrap_or_default())
    }

    pub async fn update_logo_settings(&self, logo: LogoSettings) -> Result<LogoSettings> {
        let logo = LogoSettings {
            alt_text: logo.alt_text.trim().to_string(),
            ..logo
        };
        validate_logo(&logo)?;
        self.storage.upsert_logo(&logo).await?;
        Ok(logo)
    }
}
