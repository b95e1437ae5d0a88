//! Site settings endpoints

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;

use crate::services::SiteSettingsService;
use crate::storage::LogoSettings;

use super::helpers::api_result;

pub async fn get_logo(
    settings: web::Data<Arc<SiteSettingsService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(settings.get_logo_settings().await))
}

pub async fn update_logo(
    body: web::Json<LogoSettings>,
    settings: web::Data<Arc<SiteSettingsService>>,
) -> ActixResult<impl Responder> {
    Ok(api_result(
        settings.update_logo_settings(body.into_inner()).await,
    ))
}
