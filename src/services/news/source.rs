//! Where synced articles come from

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use super::samples::thai_sample_articles;
use super::translator::translate_to_thai;
use crate::config::NewsConfig;
use crate::errors::{LivescoreError, Result};
use crate::http::{HttpRequest, HttpTransport};
use crate::storage::{NewsCategory, NewsDraft};
use crate::utils::create_slug;

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<NewsDraft>>;
}

/// Built-in Thai articles
pub struct ThaiSampleSource;

#[async_trait]
impl NewsSource for ThaiSampleSource {
    fn name(&self) -> &'static str {
        "thai-samples"
    }

    async fn fetch(&self) -> Result<Vec<NewsDraft>> {
        Ok(thai_sample_articles(Utc::now()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
    #[serde(default)]
    published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    source: Option<NewsApiSourceName>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceName {
    #[serde(default)]
    name: Option<String>,
}

/// NewsAPI-style `everything` endpoint, headlines run through the translator
pub struct NewsApiSource {
    config: NewsConfig,
    transport: Arc<dyn HttpTransport>,
}

impl NewsApiSource {
    pub fn new(config: NewsConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    fn request_url(&self) -> String {
        format!(
            "{}?q={}&language=en&sortBy=publishedAt&pageSize={}",
            self.config.api_url,
            urlencoding::encode(&self.config.query),
            self.config.page_size
        )
    }
}

fn to_draft(article: NewsApiArticle, now: DateTime<Utc>) -> Option<NewsDraft> {
    let original = article.title.map(|t| t.trim().to_string())?;
    if original.is_empty() || original == "[Removed]" {
        return None;
    }

    let title = translate_to_thai(&original);
    let slug = Some(create_slug(&title))
        .filter(|s| !s.is_empty())
        .or_else(|| Some(create_slug(&original)).filter(|s| !s.is_empty()))?;

    let summary = article.description.as_deref().map(translate_to_thai);
    let content = article
        .content
        .as_deref()
        .or(article.description.as_deref())
        .map(translate_to_thai)
        .unwrap_or_default();
    let source = article
        .source
        .and_then(|s| s.name)
        .unwrap_or_else(|| "NewsAPI".to_string());

    Some(NewsDraft {
        title,
        original_title: Some(original),
        content,
        summary,
        image_url: article.url_to_image,
        published_at: article.published_at.unwrap_or(now),
        tags: vec!["ฟุตบอลต่างประเทศ".to_string(), source.clone()],
        source,
        category: NewsCategory::International,
        slug,
        url: article.url,
    })
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn fetch(&self) -> Result<Vec<NewsDraft>> {
        if self.config.api_key.is_empty() {
            warn!("news.api_key is not set, skipping the international news feed");
            return Ok(Vec::new());
        }

        let request = HttpRequest::get(self.request_url()).header("x-api-key", &self.config.api_key);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(LivescoreError::upstream(
                response.status,
                format!("News API error! status: {}", response.status),
            ));
        }

        let body: NewsApiResponse = response.json()?;
        if body.status != "ok" {
            return Err(LivescoreError::upstream(
                502,
                body.message
                    .unwrap_or_else(|| format!("News API returned status '{}'", body.status)),
            ));
        }

        let now = Utc::now();
        let total = body.articles.len();
        let drafts: Vec<NewsDraft> = body
            .articles
            .into_iter()
            .filter_map(|a| to_draft(a, now))
            .collect();
        debug!("News API returned {} articles, {} usable", total, drafts.len());
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use serde_json::json;

    struct CannedTransport(u16, serde_json::Value);

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            assert!(request.headers.iter().any(|(k, _)| k == "x-api-key"));
            Ok(HttpResponse {
                status: self.0,
                headers: Vec::new(),
                body: serde_json::to_vec(&self.1).unwrap(),
            })
        }
    }

    fn source(api_key: &str, status: u16, body: serde_json::Value) -> NewsApiSource {
        NewsApiSource::new(
            NewsConfig {
                api_key: api_key.to_string(),
                ..Default::default()
            },
            Arc::new(CannedTransport(status, body)),
        )
    }

    #[tokio::test]
    async fn test_missing_key_skips_feed() {
        let drafts = source("", 200, json!({})).fetch().await.unwrap();
        assert!(drafts.is_empty());
    }

    #[tokio::test]
    async fn test_articles_are_translated() {
        let body = json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": {"id": null, "name": "BBC Sport"},
                    "title": "Liverpool win the Premier League",
                    "description": "A great season",
                    "content": null,
                    "url": "https://example.com/a",
                    "urlToImage": "https://example.com/a.jpg",
                    "publishedAt": "2025-03-01T10:00:00Z"
                },
                {"title": "[Removed]", "source": {"name": null}}
            ]
        });

        let drafts = source("key", 200, body).fetch().await.unwrap();
        assert_eq!(drafts.len(), 1);
        let draft = &drafts[0];
        assert_eq!(draft.title, "ลิเวอร์พูล ชนะ the พรีเมียร์ลีก");
        assert_eq!(
            draft.original_title.as_deref(),
            Some("Liverpool win the Premier League")
        );
        assert_eq!(draft.content, "A great ฤดูกาล");
        assert_eq!(draft.source, "BBC Sport");
        assert_eq!(draft.category, NewsCategory::International);
        assert_eq!(draft.slug, create_slug(&draft.title));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error() {
        let err = source("key", 401, json!({"status": "error"}))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, LivescoreError::Upstream { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_error_status_in_body() {
        let err = source(
            "key",
            200,
            json!({"status": "error", "message": "apiKeyInvalid"}),
        )
        .fetch()
        .await
        .unwrap_err();
        assert_eq!(err.message(), "apiKeyInvalid");
    }
}
