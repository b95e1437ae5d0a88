//! Advertisement management endpoints

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::{error, info, trace};

use crate::api::constants::MAX_UPLOAD_BYTES;
use crate::services::AdvertisementService;
use crate::services::blob_storage::{
    BlobStorage, content_type_for, format_blob_url, is_allowed_image_type,
};
use crate::storage::{AdvertisementPatch, NewAdvertisement};

use super::error_code::ErrorCode;
use super::helpers::{
    api_result, created_response, error_from_livescore, error_response, optional_result,
    success_response,
};
use super::types::{DeleteAdQuery, MessageResponse, UploadResponse};

pub async fn list_ads(ads: web::Data<Arc<AdvertisementService>>) -> ActixResult<impl Responder> {
    trace!("Admin API: list advertisements");
    Ok(api_result(ads.get_all_advertisements().await))
}

pub async fn get_ad(
    path: web::Path<i32>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        ads.get_advertisement_by_id(id).await,
        ErrorCode::AdNotFound,
        &format!("Advertisement {} not found", id),
    ))
}

pub async fn create_ad(
    body: web::Json<NewAdvertisement>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    match ads.create_ad(body.into_inner()).await {
        Ok(ad) => {
            info!("Admin API: created advertisement {} '{}'", ad.id, ad.name);
            Ok(created_response(ad))
        }
        Err(e) => Ok(error_from_livescore(&e)),
    }
}

pub async fn update_ad(
    path: web::Path<i32>,
    body: web::Json<AdvertisementPatch>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    Ok(optional_result(
        ads.update_ad(id, body.into_inner()).await,
        ErrorCode::AdNotFound,
        &format!("Advertisement {} not found", id),
    ))
}

pub async fn delete_ad(
    path: web::Path<i32>,
    query: web::Query<DeleteAdQuery>,
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    let id = path.into_inner();
    match ads.delete_advertisement(id, query.delete_image).await {
        Ok(true) => Ok(success_response(MessageResponse {
            message: format!("Advertisement {} deleted", id),
        })),
        Ok(false) => Ok(error_response(
            StatusCode::NOT_FOUND,
            ErrorCode::AdNotFound,
            &format!("Advertisement {} not found", id),
        )),
        Err(e) => Ok(error_from_livescore(&e)),
    }
}

pub async fn ads_summary(
    ads: web::Data<Arc<AdvertisementService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(ads.ad_summary().await))
}

/// Multipart upload; the image is read from the `file` field
pub async fn upload_image(
    mut payload: Multipart,
    blob: web::Data<Arc<BlobStorage>>,
) -> ActixResult<impl Responder> {
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to parse multipart field: {}", e);
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    ErrorCode::InvalidMultipartData,
                    &format!("Invalid multipart data: {}", e),
                ));
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .filter(|m| m != "application/octet-stream")
            .unwrap_or_else(|| content_type_for(&filename).to_string());

        if !is_allowed_image_type(&content_type)
            || !is_allowed_image_type(content_type_for(&filename))
        {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidMultipartData,
                "Only PNG, JPEG, GIF, WebP or AVIF images are accepted",
            ));
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => {
                    if data.len() + bytes.len() > MAX_UPLOAD_BYTES {
                        return Ok(error_response(
                            StatusCode::BAD_REQUEST,
                            ErrorCode::FileTooLarge,
                            &format!(
                                "File size exceeds maximum {} MB",
                                MAX_UPLOAD_BYTES / 1024 / 1024
                            ),
                        ));
                    }
                    data.extend_from_slice(&bytes);
                }
                Err(e) => {
                    error!("Failed to read upload chunk: {}", e);
                    return Ok(error_response(
                        StatusCode::BAD_REQUEST,
                        ErrorCode::InvalidMultipartData,
                        &format!("Failed to read file: {}", e),
                    ));
                }
            }
        }

        if data.is_empty() {
            return Ok(error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidMultipartData,
                "Uploaded file is empty",
            ));
        }

        let stored_name = format!("{}-{}", chrono::Utc::now().timestamp_millis(), filename);
        return match blob.upload_file(&stored_name, &content_type, data).await {
            Ok(url) => Ok(success_response(UploadResponse {
                display_url: format_blob_url(&url),
                url,
            })),
            Err(e) => Ok(error_from_livescore(&e)),
        };
    }

    Ok(error_response(
        StatusCode::BAD_REQUEST,
        ErrorCode::InvalidMultipartData,
        "Missing 'file' field",
    ))
}
