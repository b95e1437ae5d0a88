use std::sync::Arc;

use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::{AdCounter, SeaOrmStorage, UserChanges, UserCredentials};
pub use models::{
    AdPosition, AdSize, AdStatus, AdSummary, Advertisement, AdvertisementPatch, LogoSettings,
    NewAdvertisement, NewUser, NewsArticle, NewsCategory, NewsDraft, User, UserPatch, UserRole,
};

pub struct StorageFactory;

impl StorageFactory {
    /// Open the configured database and bring its schema up to date
    pub async fn create() -> Result<Arc<SeaOrmStorage>> {
        let config = crate::config::get_config();
        let database_url = &config.database.database_url;

        let backend_type = backend::infer_backend_from_url(database_url)?;

        let storage = backend::SeaOrmStorage::new(database_url, &backend_type).await?;
        Ok(Arc::new(storage))
    }
}
