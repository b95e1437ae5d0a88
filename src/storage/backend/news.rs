//! News article operations for SeaOrmStorage

use chrono::Utc;
use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::OnConflict,
};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_news, news_to_active_model};
use super::retry;
use crate::errors::{LivescoreError, Result};
use crate::storage::models::{NewsArticle, NewsCategory, NewsDraft};

use migration::entities::news_article;

impl SeaOrmStorage {
    /// Insert or overwrite articles keyed by slug, in one transaction.
    ///
    /// Later drafts win when the batch itself repeats a slug.
    pub async fn upsert_news(&self, drafts: &[NewsDraft]) -> Result<usize> {
        if drafts.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut unique: Vec<&NewsDraft> = Vec::with_capacity(drafts.len());
        for draft in drafts {
            match unique.iter().position(|d| d.slug == draft.slug) {
                Some(idx) => unique[idx] = draft,
                None => unique.push(draft),
            }
        }

        let txn = self.db.begin().await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to begin transaction: {}", e))
        })?;

        for draft in &unique {
            news_article::Entity::insert(news_to_active_model(draft, now))
                .on_conflict(
                    OnConflict::column(news_article::Column::Slug)
                        .update_columns([
                            news_article::Column::Title,
                            news_article::Column::OriginalTitle,
                            news_article::Column::Content,
                            news_article::Column::Summary,
                            news_article::Column::ImageUrl,
                            news_article::Column::PublishedAt,
                            news_article::Column::Source,
                            news_article::Column::Category,
                            news_article::Column::Tags,
                            news_article::Column::Url,
                            news_article::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    LivescoreError::database_operation(format!(
                        "Failed to upsert article '{}': {}",
                        draft.slug, e
                    ))
                })?;
        }

        txn.commit().await.map_err(|e| {
            LivescoreError::database_operation(format!("Failed to commit transaction: {}", e))
        })?;

        info!("Upserted {} news articles", unique.len());
        Ok(unique.len())
    }

    /// Newest first, optionally restricted to one category
    pub async fn list_news(
        &self,
        category: Option<NewsCategory>,
        limit: u64,
    ) -> Result<Vec<NewsArticle>> {
        let db = &self.db;
        let models = retry::with_retry("list_news", self.retry_config, || async {
            let mut query = news_article::Entity::find();
            if let Some(category) = category {
                query = query.filter(news_article::Column::Category.eq(category.as_ref()));
            }
            query
                .order_by_desc(news_article::Column::PublishedAt)
                .order_by_desc(news_article::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| LivescoreError::database_operation(format!("Failed to load news: {}", e)))?;

        Ok(models.into_iter().map(model_to_news).collect())
    }

    pub async fn get_news_by_slug(&self, slug: &str) -> Result<Option<NewsArticle>> {
        let db = &self.db;
        let model = retry::with_retry(
            &format!("get_news_by_slug({})", slug),
            self.retry_config,
            || async {
                news_article::Entity::find()
                    .filter(news_article::Column::Slug.eq(slug))
                    .one(db)
                    .await
            },
        )
        .await
        .map_err(|e| {
            LivescoreError::database_operation(format!("Failed to load article '{}': {}", slug, e))
        })?;

        Ok(model.map(model_to_news))
    }
}
