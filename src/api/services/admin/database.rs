//! Read-only database browser for the back-office

use actix_web::{Responder, Result as ActixResult, web};
use std::sync::Arc;

use crate::storage::SeaOrmStorage;
use crate::utils::case::keys_to_camel;

use super::helpers::{api_result, error_from_livescore, success_response};
use super::types::{DatabaseStatus, TableQuery};

const DEFAULT_ROWS: u64 = 50;
const MAX_ROWS: u64 = 500;

pub async fn database_status(
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    let backend = storage.get_backend_config().storage_type;
    match storage.table_counts().await {
        Ok(tables) => Ok(success_response(DatabaseStatus {
            backend,
            connected: true,
            tables,
        })),
        Err(e) => Ok(error_from_livescore(&e)),
    }
}

/// Newest rows of one whitelisted table, keys in camelCase
pub async fn table_rows(
    path: web::Path<String>,
    query: web::Query<TableQuery>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> ActixResult<impl Responder> {
    let limit = query.limit.unwrap_or(DEFAULT_ROWS).clamp(1, MAX_ROWS);
    let rows = storage
        .table_rows(&path, limit)
        .await
        .map(|rows| rows.into_iter().map(keys_to_camel).collect::<Vec<_>>());
    Ok(api_result(rows))
}
