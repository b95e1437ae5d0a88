//! Outbound HTTP
//!
//! All calls to third-party services go through [`HttpTransport`]. The
//! production implementation drives a blocking `ureq` agent on the tokio
//! blocking pool; tests substitute in-memory fakes.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::trace;
use ureq::Agent;

use crate::errors::{LivescoreError, Result};

/// Largest body read from an upstream response
const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A fully read response. Non-2xx statuses are returned, not raised.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(LivescoreError::from)
    }
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `ureq` agent with a global timeout
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }

    fn send_sync(agent: &Agent, request: HttpRequest) -> Result<HttpResponse> {
        trace!("{:?} {}", request.method, request.url);

        let response = match request.method {
            Method::Get | Method::Delete => {
                let mut builder = if request.method == Method::Get {
                    agent.get(&request.url)
                } else {
                    agent.delete(&request.url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            Method::Put | Method::Post => {
                let mut builder = if request.method == Method::Put {
                    agent.put(&request.url)
                } else {
                    agent.post(&request.url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send(request.body.unwrap_or_default())?
            }
        };

        let (parts, mut body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = body
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()?;

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for UreqTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || Self::send_sync(&agent, request))
            .await
            .map_err(|e| LivescoreError::network(format!("HTTP worker failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("X-RateLimit-Remaining".to_string(), "42".to_string())],
            body: Vec::new(),
        };
        assert_eq!(response.header("x-ratelimit-remaining"), Some("42"));
        assert_eq!(response.header("x-ratelimit-limit"), None);
    }

    #[test]
    fn test_success_range() {
        let mut response = HttpResponse {
            status: 204,
            ..Default::default()
        };
        assert!(response.is_success());
        response.status = 302;
        assert!(!response.is_success());
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: b"<html>".to_vec(),
        };
        let err = response.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, LivescoreError::Serialization(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_ureq_transport_real_request() {
        // Needs network access
        let transport = UreqTransport::new(Duration::from_secs(5));
        let response = transport
            .send(HttpRequest::get("https://httpbin.org/json"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert!(response.json::<serde_json::Value>().unwrap().is_object());
    }
}
