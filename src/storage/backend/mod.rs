//! SeaORM storage backend
//!
//! Database access for advertisements, news, users and site settings,
//! supporting SQLite, MySQL/MariaDB and PostgreSQL.

mod advertisements;
mod connection;
mod converters;
mod news;
pub mod retry;
mod site_settings;
mod tooling;
mod users;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{LivescoreError, Result};
use crate::storage::models::StorageConfig;

pub use advertisements::AdCounter;
pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    ad_to_active_model, model_to_advertisement, model_to_news, model_to_user, news_to_active_model,
};
pub use site_settings::LOGO_SETTING;
pub use tooling::{BROWSABLE_TABLES, TableCount};
pub use users::{UserChanges, UserCredentials};

/// Infer the database kind from its URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LivescoreError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LivescoreError::database_config("database_url is not set"));
        }

        let config = crate::config::get_config();
        let retry_config = retry::RetryConfig {
            max_retries: config.database.retry_count,
            base_delay_ms: config.database.retry_base_delay_ms,
            max_delay_ms: config.database.retry_max_delay_ms,
        };

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config.database.pool_size).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// Raw connection, for callers that build their own statements
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}
