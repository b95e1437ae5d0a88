//! Site setting rows, one per `setting_type`

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::OnConflict};
use tracing::info;

use super::SeaOrmStorage;
use super::retry;
use crate::errors::{LivescoreError, Result};
use crate::storage::models::LogoSettings;

use migration::entities::site_setting;

pub const LOGO_SETTING: &str = "logo";

impl SeaOrmStorage {
    pub async fn get_logo(&self) -> Result<Option<LogoSettings>> {
        let db = &self.db;
        let model = retry::with_retry("get_logo", self.retry_config, || async {
            site_setting::Entity::find()
                .filter(site_setting::Column::SettingType.eq(LOGO_SETTING))
                .one(db)
                .await
        })
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load logo settings: {}", e))
        })?;

        Ok(model.map(|m| LogoSettings {
            image_url: m.image_url,
            width: m.width,
            height: m.height,
            alt_text: m.alt_text,
        }))
    }

    pub async fn upsert_logo(&self, logo: &LogoSettings) -> Result<()> {
        let active_model = site_setting::ActiveModel {
            id: NotSet,
            setting_type: Set(LOGO_SETTING.to_string()),
            image_url: Set(logo.image_url.clone()),
            width: Set(logo.width),
            height: Set(logo.height),
            alt_text: Set(logo.alt_text.clone()),
            updated_at: Set(Utc::now()),
        };

        site_setting::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(site_setting::Column::SettingType)
                    .update_columns([
                        site_setting::Column::ImageUrl,
                        site_setting::Column::Width,
                        site_setting::Column::Height,
                        site_setting::Column::AltText,
                        site_setting::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                LivescoreError::database_operation(format!("Failed to save logo settings: {}", e))
            })?;

        info!("Logo settings saved: {}", logo.image_url);
        Ok(())
    }
}
