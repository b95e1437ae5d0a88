//! `GET /api/proxy`: relays a request to the football API with the secret
//! key attached. Never cached.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::football::FootballClient;

/// Upstream headers copied onto the response
pub const RATE_LIMIT_HEADERS: &[&str] = &[
    "x-ratelimit-requests-limit",
    "x-ratelimit-requests-remaining",
    "x-ratelimit-limit",
    "x-ratelimit-remaining",
];

fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": message }))
}

/// A path below the API root: leading `/`, no scheme, host or `..`
fn is_relative_api_path(endpoint: &str) -> bool {
    endpoint.starts_with('/')
        && !endpoint.starts_with("//")
        && !endpoint.contains("://")
        && !endpoint.contains('\\')
        && !endpoint.split('/').any(|segment| segment == "..")
}

pub async fn proxy(
    query: web::Query<Vec<(String, String)>>,
    football: web::Data<Arc<FootballClient>>,
) -> impl Responder {
    let mut endpoint = None;
    let mut params = Vec::new();
    for (key, value) in query.into_inner() {
        if key == "endpoint" {
            endpoint = Some(value);
        } else {
            params.push((key, value));
        }
    }

    let Some(endpoint) = endpoint.filter(|e| !e.is_empty()) else {
        return bad_request("Missing endpoint parameter");
    };
    if !is_relative_api_path(&endpoint) {
        warn!("Proxy rejected endpoint {:?}", endpoint);
        return bad_request("Invalid endpoint parameter");
    }

    let upstream = match football.relay(&endpoint, &params).await {
        Ok(response) => response,
        Err(e) => {
            error!("Proxy request to {} failed: {}", endpoint, e);
            return HttpResponse::InternalServerError().json(json!({
                "error": "Failed to fetch data from API",
                "details": e.message(),
            }));
        }
    };

    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if !upstream.is_success() {
        debug!("Proxy upstream {} answered {}", endpoint, upstream.status);
        return HttpResponse::build(status).json(json!({
            "error": format!("API request failed with status {}", upstream.status),
            "details": upstream.text(),
        }));
    }

    let mut response = HttpResponse::build(status);
    response.content_type(
        upstream
            .header("content-type")
            .unwrap_or("application/json"),
    );
    for name in RATE_LIMIT_HEADERS {
        if let Some(value) = upstream.header(name) {
            response.insert_header((*name, value));
        }
    }
    response.body(upstream.body)
}
