//! Service layer for business logic
//!
//! Shared by the HTTP API and the CLI.

mod advertisement_service;
pub mod blob_storage;
pub mod news;
mod site_settings_service;
mod user_service;

pub use advertisement_service::AdvertisementService;
pub use blob_storage::BlobStorage;
pub use news::{NewsApiSource, NewsSource, NewsSyncService, SyncReport, ThaiSampleSource};
pub use site_settings_service::SiteSettingsService;
pub use user_service::UserService;
