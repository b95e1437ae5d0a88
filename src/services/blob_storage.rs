//! Image storage for advertisement and logo uploads
//!
//! Files go to the hosted blob store when a read/write token is configured;
//! otherwise, or when the upload fails, they are written under
//! `<local_dir>/ads/` and served from `/ads/<filename>`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::BlobConfig;
use crate::errors::{LivescoreError, Result};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method};

/// Hosts under this domain are the public blob store
const BLOB_DOMAIN: &str = "vercel-storage.com";
const BLOB_API_VERSION: &str = "7";
const LOCAL_PREFIX: &str = "/ads/";

#[derive(Debug, Deserialize)]
struct PutBlobResult {
    url: String,
}

pub struct BlobStorage {
    api_url: String,
    token: String,
    local_dir: PathBuf,
    transport: Arc<dyn HttpTransport>,
}

impl BlobStorage {
    pub fn new(config: &BlobConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.read_write_token.clone(),
            local_dir: PathBuf::from(&config.local_dir),
            transport,
        }
    }

    pub fn has_remote(&self) -> bool {
        !self.token.is_empty()
    }

    fn local_ads_dir(&self) -> PathBuf {
        self.local_dir.join("ads")
    }

    /// Store a file and return its URL: the blob URL, or `/ads/<filename>`
    /// when the remote store is unavailable.
    pub async fn upload_file(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let filename = sanitize_filename(filename);
        if !is_allowed_image_type(content_type)
            || !is_allowed_image_type(content_type_for(&filename))
        {
            return Err(LivescoreError::validation(format!(
                "Unsupported image type for {}: {}",
                filename, content_type
            )));
        }

        if self.has_remote() {
            match self.put_remote(&filename, content_type, bytes.clone()).await {
                Ok(url) => {
                    info!("Uploaded {} to blob storage", filename);
                    return Ok(url);
                }
                Err(e) => warn!(
                    "Blob upload of {} failed, storing locally instead: {}",
                    filename, e
                ),
            }
        } else {
            debug!("No blob token configured, storing {} locally", filename);
        }

        self.write_local(&filename, &bytes).await
    }

    async fn put_remote(&self, filename: &str, content_type: &str, bytes: Vec<u8>) -> Result<String> {
        let request = HttpRequest::new(
            Method::Put,
            format!("{}/ads/{}", self.api_url, urlencoding::encode(filename)),
        )
        .header("authorization", format!("Bearer {}", self.token))
        .header("x-api-version", BLOB_API_VERSION)
        .header("x-content-type", content_type)
        .header("x-add-random-suffix", "1")
        .body(bytes);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(LivescoreError::upstream(
                response.status,
                format!("Blob upload failed: {}", response.text()),
            ));
        }
        Ok(response.json::<PutBlobResult>()?.url)
    }

    async fn write_local(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let dir = self.local_ads_dir();
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            LivescoreError::file_operation(format!("Cannot create {}: {}", dir.display(), e))
        })?;

        let path = dir.join(filename);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            LivescoreError::file_operation(format!("Cannot write {}: {}", path.display(), e))
        })?;

        info!("Stored {} locally at {}", filename, path.display());
        Ok(format!("{}{}", LOCAL_PREFIX, filename))
    }

    /// Remove a previously uploaded file. `Ok(false)` when the URL is not one
    /// of ours or the file is already gone.
    pub async fn delete_file(&self, url: &str) -> Result<bool> {
        if let Some(filename) = url.strip_prefix(LOCAL_PREFIX) {
            let filename = sanitize_filename(filename);
            let path = self.local_ads_dir().join(&filename);
            return match tokio::fs::remove_file(&path).await {
                Ok(()) => {
                    info!("Deleted local file {}", path.display());
                    Ok(true)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(LivescoreError::file_operation(format!(
                    "Cannot delete {}: {}",
                    path.display(),
                    e
                ))),
            };
        }

        if !is_valid_blob_url(url) {
            debug!("Not a blob URL, nothing to delete: {}", url);
            return Ok(false);
        }
        if !self.has_remote() {
            warn!("Cannot delete {} without a blob token", url);
            return Ok(false);
        }

        let body = serde_json::to_vec(&serde_json::json!({ "urls": [url] }))?;
        let request = HttpRequest::new(Method::Post, format!("{}/delete", self.api_url))
            .header("authorization", format!("Bearer {}", self.token))
            .header("x-api-version", BLOB_API_VERSION)
            .header("content-type", "application/json")
            .body(body);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(LivescoreError::upstream(
                response.status,
                format!("Blob delete failed: {}", response.text()),
            ));
        }

        info!("Deleted blob {}", url);
        Ok(true)
    }

    /// Fetch a public blob for the image proxy route
    pub async fn fetch_blob(&self, url: &str) -> Result<HttpResponse> {
        if !is_valid_blob_url(url) {
            return Err(LivescoreError::validation(format!("Not a blob URL: {}", url)));
        }
        self.transport.send(HttpRequest::get(url)).await
    }

    /// Bytes of a locally stored fallback file, `None` when missing
    pub async fn read_local(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        let clean = sanitize_filename(filename);
        if clean != filename {
            return Ok(None);
        }
        match tokio::fs::read(self.local_ads_dir().join(&clean)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// `https://…vercel-storage.com/…`
pub fn is_valid_blob_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if parsed.scheme() != "https" {
        return false;
    }
    parsed
        .host_str()
        .is_some_and(|host| host == BLOB_DOMAIN || host.ends_with(&format!(".{}", BLOB_DOMAIN)))
}

/// URL to put in an `<img src>`
///
/// - empty stays empty
/// - site paths (`/…`) are unchanged
/// - blob store URLs go through `/api/blob-proxy?url=…`
/// - other absolute http(s) URLs are unchanged
/// - a bare filename is assumed to be a local upload: `/ads/<filename>`
pub fn format_blob_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with('/') {
        return url.to_string();
    }
    if url.contains(BLOB_DOMAIN) {
        return format!("/api/blob-proxy?url={}", urlencoding::encode(url));
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return url.to_string();
    }
    format!("{}{}", LOCAL_PREFIX, url)
}

/// Keep `[A-Za-z0-9._-]`, turn anything else into `-`; never empty and never
/// starting with a dot
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_start_matches('.').trim_matches('-');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Raster formats accepted for upload. SVG is excluded: it can carry script
/// and would run on this origin.
const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "image/avif",
];

pub fn is_allowed_image_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_TYPES.contains(&essence.as_str())
}

/// Content type guessed from the file extension
pub fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
