//! Shared setup for the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Once};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tempfile::TempDir;

use livescore::config::{StaticConfig, init_config};
use livescore::errors::{LivescoreError, Result};
use livescore::http::{HttpRequest, HttpResponse, HttpTransport};
use livescore::runtime::lifetime::startup::StartupContext;
use livescore::storage::{NewUser, SeaOrmStorage, User, UserRole};

static INIT: Once = Once::new();

pub fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// Fresh SQLite database inside a temp dir; keep the dir alive for the test
pub async fn temp_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("livescore_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");
    (temp_dir, Arc::new(storage))
}

/// All services over a temp database; uploads land in the same temp dir
pub async fn test_context(transport: Arc<FakeTransport>) -> (TempDir, StartupContext) {
    let (temp_dir, storage) = temp_storage().await;

    let mut config = StaticConfig::default();
    config.blob.local_dir = temp_dir.path().display().to_string();
    config.football_api.api_key = "test-key".to_string();
    config.news.api_key = String::new();

    let context = StartupContext::build(storage, &config, transport);
    (temp_dir, context)
}

pub async fn seed_user(context: &StartupContext, username: &str, role: UserRole) -> User {
    context
        .users
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "correct-horse-battery".to_string(),
            role,
            is_active: true,
        })
        .await
        .expect("Failed to seed user")
}

struct Route {
    url_prefix: String,
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

/// Answers by URL prefix (first match wins), 404 otherwise, and records
/// every request it sees
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<Vec<Route>>,
    fail_all: bool,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call fails as if the host were unreachable
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            fail_all: true,
            ..Default::default()
        })
    }

    pub fn respond_json(&self, url_prefix: &str, status: u16, body: Value) {
        self.respond(
            url_prefix,
            status,
            vec![("content-type".to_string(), "application/json".to_string())],
            serde_json::to_vec(&body).unwrap(),
        );
    }

    pub fn respond(
        &self,
        url_prefix: &str,
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) {
        self.routes.lock().push(Route {
            url_prefix: url_prefix.to_string(),
            status,
            headers,
            body,
        });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        self.requests.lock().push(request);

        if self.fail_all {
            return Err(LivescoreError::network(format!("connection refused: {}", url)));
        }

        let routes = self.routes.lock();
        Ok(routes
            .iter()
            .find(|route| url.starts_with(&route.url_prefix))
            .map(|route| HttpResponse {
                status: route.status,
                headers: route.headers.clone(),
                body: route.body.clone(),
            })
            .unwrap_or(HttpResponse {
                status: 404,
                headers: Vec::new(),
                body: b"not found".to_vec(),
            }))
    }
}
