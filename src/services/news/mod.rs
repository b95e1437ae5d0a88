//! News feed: fetch, translate, store, serve

mod samples;
mod source;
mod translator;

pub use samples::thai_sample_articles;
pub use source::{NewsApiSource, NewsSource, ThaiSampleSource};
pub use translator::translate_to_thai;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info};
use ts_rs::TS;

use crate::errors::Result;
use crate::storage::models::TS_EXPORT_PATH;
use crate::storage::{NewsArticle, NewsCategory, SeaOrmStorage};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct SourceCount {
    pub source: String,
    pub articles: usize,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub sources: Vec<SourceCount>,
    /// Rows written after slug de-duplication
    pub stored: usize,
    pub synced_at: DateTime<Utc>,
}

pub struct NewsSyncService {
    storage: Arc<SeaOrmStorage>,
    sources: Vec<Arc<dyn NewsSource>>,
    last_sync: RwLock<Option<DateTime<Utc>>>,
}

impl NewsSyncService {
    pub fn new(storage: Arc<SeaOrmStorage>, sources: Vec<Arc<dyn NewsSource>>) -> Self {
        Self {
            storage,
            sources,
            last_sync: RwLock::new(None),
        }
    }

    /// Pull every source and upsert the lot by slug. One failing source aborts
    /// the whole run and nothing is written.
    pub async fn sync_all_news(&self) -> Result<SyncReport> {
        let mut drafts = Vec::new();
        let mut sources = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let fetched = source.fetch().await.inspect_err(|e| {
                error!("News source '{}' failed: {}", source.name(), e);
            })?;
            debug!("News source '{}' returned {} articles", source.name(), fetched.len());
            sources.push(SourceCount {
                source: source.name().to_string(),
                articles: fetched.len(),
            });
            drafts.extend(fetched);
        }

        let stored = self.storage.upsert_news(&drafts).await?;
        let synced_at = Utc::now();
        *self.last_sync.write() = Some(synced_at);
        info!("News sync stored {} articles", stored);

        Ok(SyncReport {
            sources,
            stored,
            synced_at,
        })
    }

    /// Sync only when the last successful run is older than `max_age`
    pub async fn sync_if_stale(&self, max_age: Duration) -> Result<Option<SyncReport>> {
        let fresh = self.last_sync().is_some_and(|at| {
            Utc::now()
                .signed_duration_since(at)
                .to_std()
                .is_ok_and(|age| age < max_age)
        });
        if fresh {
            return Ok(None);
        }
        self.sync_all_news().await.map(Some)
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        *self.last_sync.read()
    }

    pub async fn list_news(
        &self,
        category: Option<NewsCategory>,
        limit: u64,
    ) -> Result<Vec<NewsArticle>> {
        self.storage.list_news(category, limit).await
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<NewsArticle>> {
        self.storage.get_news_by_slug(slug).await
    }

    /// Sync now and then every `interval_minutes`; 0 disables the task
    pub fn spawn_periodic(self: Arc<Self>, interval_minutes: u64) {
        if interval_minutes == 0 {
            info!("Periodic news sync disabled");
            return;
        }

        let interval = Duration::from_secs(interval_minutes * 60);
        tokio::spawn(async move {
            loop {
                if let Err(e) = self.sync_if_stale(interval).await {
                    error!("Periodic news sync failed: {}", e);
                }
                tokio::time::sleep(interval).await;
            }
        });

        info!(
            "News sync background task started (interval: {} minutes)",
            interval_minutes
        );
    }
}
