//! Football API fetch layer with a per-URL response cache

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::models::ApiEnvelope;
use crate::config::{ApiKeyStyle, FootballApiConfig};
use crate::errors::{LivescoreError, Result};
use crate::http::{HttpRequest, HttpResponse, HttpTransport};

/// One GET against the football API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path below the API base, e.g. `/fixtures`
    pub endpoint: String,
    /// Query parameters, encoded in the order given
    pub params: Vec<(String, String)>,
    /// A cached body younger than this is reused
    pub cache_duration: Duration,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>, cache_duration: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
            cache_duration,
        }
    }

    pub fn param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn param_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }
}

#[derive(Clone)]
struct CachedBody {
    body: Arc<Value>,
    fetched_at: Instant,
}

pub struct FootballClient {
    base_url: String,
    api_key: String,
    api_host: String,
    key_style: ApiKeyStyle,
    transport: Arc<dyn HttpTransport>,
    cache: Cache<String, CachedBody>,
}

impl FootballClient {
    pub fn new(config: &FootballApiConfig, transport: Arc<dyn HttpTransport>) -> Self {
        if config.api_key.is_empty() {
            warn!("football_api.api_key is empty, upstream requests will be rejected");
        }

        let cache = Cache::builder()
            .max_capacity(config.cache_max_entries)
            .time_to_live(Duration::from_secs(config.cache_max_ttl_secs.max(1)))
            .build();

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            key_style: config.key_style,
            transport,
            cache,
        }
    }

    /// Full request URL, also the cache key
    pub fn build_url(&self, endpoint: &str, params: &[(String, String)]) -> String {
        let mut url = self.base_url.clone();
        if !endpoint.starts_with('/') {
            url.push('/');
        }
        url.push_str(endpoint);

        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    fn authorized(&self, url: String) -> HttpRequest {
        let request = HttpRequest::get(url);
        match self.key_style {
            ApiKeyStyle::Rapidapi => request
                .header("x-rapidapi-key", self.api_key.as_str())
                .header("x-rapidapi-host", self.api_host.as_str()),
            ApiKeyStyle::Apisports => request.header("x-apisports-key", self.api_key.as_str()),
        }
    }

    /// GET with caching. A body younger than `cache_duration` is returned as
    /// the same `Arc` without touching the network; non-2xx is an error.
    pub async fn fetch_from_api(&self, request: &ApiRequest) -> Result<Arc<Value>> {
        let url = self.build_url(&request.endpoint, &request.params);

        if let Some(cached) = self.cache.get(&url).await
            && cached.fetched_at.elapsed() < request.cache_duration
        {
            trace!("football cache hit: {}", url);
            return Ok(cached.body);
        }

        debug!("football cache miss, fetching {}", url);
        let response = self.transport.send(self.authorized(url.clone())).await?;
        if !response.is_success() {
            return Err(LivescoreError::upstream(
                response.status,
                format!("HTTP error! status: {}", response.status),
            ));
        }

        let body = Arc::new(response.json::<Value>()?);
        self.cache
            .insert(
                url,
                CachedBody {
                    body: Arc::clone(&body),
                    fetched_at: Instant::now(),
                },
            )
            .await;
        Ok(body)
    }

    /// Uncached pass-through used by the proxy route; the status is not checked.
    pub async fn relay(&self, endpoint: &str, params: &[(String, String)]) -> Result<HttpResponse> {
        let url = self.build_url(endpoint, params);
        debug!("relaying {}", url);
        self.transport.send(self.authorized(url)).await
    }

    /// Fetch and decode the `response` array, converting each item
    pub async fn fetch_list<R, T>(&self, request: &ApiRequest) -> Result<Vec<T>>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let body = self.fetch_from_api(request).await?;
        let envelope = ApiEnvelope::<R>::deserialize(body.as_ref()).map_err(|e| {
            LivescoreError::serialization(format!(
                "Unexpected response from {}: {}",
                request.endpoint, e
            ))
        })?;

        if let Some(message) = envelope.error_message() {
            return Err(LivescoreError::upstream(502, message));
        }
        Ok(envelope.response.into_iter().map(T::from).collect())
    }

    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }
}
