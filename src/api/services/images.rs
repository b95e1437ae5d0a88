//! Image delivery: the blob relay and locally stored fallback files

use actix_web::http::header::{
    CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_SECURITY_POLICY, CONTENT_TYPE,
};
use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, trace};

use crate::services::blob_storage::{
    BlobStorage, content_type_for, is_allowed_image_type, is_valid_blob_url,
};

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";
/// Served bytes never run as a document on this origin
const IMAGE_CSP: &str = "default-src 'none'; sandbox";

/// Response for relayed or stored image bytes; anything outside the raster
/// allow-list goes out as a download
fn image_response(content_type: &str, body: Vec<u8>) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    response
        .insert_header((CACHE_CONTROL, IMAGE_CACHE_CONTROL))
        .insert_header((CONTENT_SECURITY_POLICY, IMAGE_CSP));
    if is_allowed_image_type(content_type) {
        response.insert_header((CONTENT_TYPE, content_type.to_string()));
    } else {
        response
            .insert_header((CONTENT_TYPE, "application/octet-stream"))
            .insert_header((CONTENT_DISPOSITION, "attachment"));
    }
    response.body(body)
}

#[derive(Deserialize)]
pub struct BlobProxyQuery {
    pub url: Option<String>,
}

/// `GET /api/blob-proxy?url=`: relays a public object-store image so the
/// browser loads it from this origin
pub async fn blob_proxy(
    query: web::Query<BlobProxyQuery>,
    blob: web::Data<Arc<BlobStorage>>,
) -> impl Responder {
    let Some(url) = query.url.as_deref().filter(|u| is_valid_blob_url(u)) else {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid blob URL" }));
    };

    match blob.fetch_blob(url).await {
        Ok(upstream) if upstream.is_success() => {
            let content_type = upstream
                .header("content-type")
                .unwrap_or("application/octet-stream")
                .to_string();
            image_response(&content_type, upstream.body)
        }
        Ok(upstream) => {
            trace!("Blob {} answered {}", url, upstream.status);
            HttpResponse::NotFound().json(json!({ "error": "Image not found" }))
        }
        Err(e) => {
            error!("Blob proxy failed for {}: {}", url, e);
            HttpResponse::BadGateway().json(json!({ "error": "Failed to fetch image" }))
        }
    }
}

/// `GET /ads/{filename}`: files written by the local upload fallback
pub async fn local_ad_image(
    path: web::Path<String>,
    blob: web::Data<Arc<BlobStorage>>,
) -> impl Responder {
    let filename = path.into_inner();
    match blob.read_local(&filename).await {
        Ok(Some(bytes)) => image_response(content_type_for(&filename), bytes),
        Ok(None) => HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("Failed to read local image {}: {}", filename, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
