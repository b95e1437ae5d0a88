use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{StaticConfig, get_config};
use crate::football::FootballClient;
use crate::http::{HttpTransport, UreqTransport};
use crate::services::{
    AdvertisementService, BlobStorage, NewsApiSource, NewsSource, NewsSyncService,
    SiteSettingsService, ThaiSampleSource, UserService,
};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Every shared service the HTTP layer and the CLI work with
#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub football: Arc<FootballClient>,
    pub blob: Arc<BlobStorage>,
    pub ads: Arc<AdvertisementService>,
    pub users: Arc<UserService>,
    pub news: Arc<NewsSyncService>,
    pub settings: Arc<SiteSettingsService>,
}

impl StartupContext {
    /// Build the services on top of an opened storage.
    ///
    /// `transport` is shared by the football client, the blob helper and the
    /// news source; production passes a [`UreqTransport`].
    pub fn build(
        storage: Arc<SeaOrmStorage>,
        config: &StaticConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let football = Arc::new(FootballClient::new(&config.football_api, transport.clone()));
        let blob = Arc::new(BlobStorage::new(&config.blob, transport.clone()));
        let ads = Arc::new(AdvertisementService::new(storage.clone(), blob.clone()));
        let users = Arc::new(UserService::new(storage.clone()));
        let settings = Arc::new(SiteSettingsService::new(storage.clone()));

        let sources: Vec<Arc<dyn NewsSource>> = vec![
            Arc::new(ThaiSampleSource),
            Arc::new(NewsApiSource::new(config.news.clone(), transport)),
        ];
        let news = Arc::new(NewsSyncService::new(storage.clone(), sources));

        Self {
            storage,
            football,
            blob,
            ads,
            users,
            news,
            settings,
        }
    }
}

fn outbound_transport(config: &StaticConfig) -> Arc<dyn HttpTransport> {
    let timeout = config
        .football_api
        .timeout_secs
        .max(config.blob.timeout_secs)
        .max(1);
    Arc::new(UreqTransport::new(Duration::from_secs(timeout)))
}

/// Open storage (running migrations) and build the services without
/// starting any background work. Used by CLI commands.
pub async fn prepare_context() -> Result<StartupContext> {
    let config = get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        storage.get_backend_config().storage_type
    );

    let transport = outbound_transport(&config);
    Ok(StartupContext::build(storage, &config, transport))
}

/// Everything `serve` needs before binding: storage, services and the
/// periodic news sync
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|e| anyhow::anyhow!("Failed to install rustls crypto provider: {:?}", e))?;

    let context = prepare_context().await?;
    let config = get_config();

    check_component_enabled(&config);

    context
        .news
        .clone()
        .spawn_periodic(config.news.sync_interval_minutes);

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(context)
}

fn check_component_enabled(config: &StaticConfig) {
    if config.football_api.api_key.is_empty() {
        warn!("Football API key is not set, fixture routes will answer with upstream errors");
    }

    if config.blob.read_write_token.is_empty() {
        info!(
            "Blob token not set, uploads are stored under {}/ads",
            config.blob.local_dir
        );
    }

    if config.news.api_key.is_empty() {
        info!("News API key not set, only the Thai sample articles will be synced");
    }

    let secret = &config.auth.jwt_secret;
    if !secret.is_empty() && secret.len() < 32 {
        warn!(
            "WARNING: JWT Secret is too short ({} bytes). \
            Recommended minimum is 32 bytes for security.",
            secret.len()
        );
    }

    if config.cors.enabled && config.cors.allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS allows any origin");
    }
}
