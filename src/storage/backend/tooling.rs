//! Read-only database inspection for the back-office "database" screen

use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use super::SeaOrmStorage;
use crate::errors::{LivescoreError, Result};
use crate::storage::models::TS_EXPORT_PATH;

use migration::entities::{advertisement, news_article, site_setting, user};

/// Tables the inspection endpoints may read
pub const BROWSABLE_TABLES: &[&str] = &["advertisements", "news_articles", "users", "site_settings"];

/// Columns never returned to the browser
const HIDDEN_COLUMNS: &[&str] = &["password_hash"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct TableCount {
    pub table: String,
    pub rows: u64,
}

fn db_error(table: &str, e: sea_orm::DbErr) -> LivescoreError {
    LivescoreError::database_operation(format!("Failed to read table '{}': {}", table, e))
}

impl SeaOrmStorage {
    pub async fn table_counts(&self) -> Result<Vec<TableCount>> {
        let db = &self.db;
        let mut counts = Vec::with_capacity(BROWSABLE_TABLES.len());
        for table in BROWSABLE_TABLES {
            let rows = match *table {
                "advertisements" => advertisement::Entity::find().count(db).await,
                "news_articles" => news_article::Entity::find().count(db).await,
                "users" => user::Entity::find().count(db).await,
                _ => site_setting::Entity::find().count(db).await,
            }
            .map_err(|e| db_error(table, e))?;
            counts.push(TableCount {
                table: table.to_string(),
                rows,
            });
        }
        Ok(counts)
    }

    /// Up to `limit` rows of a whitelisted table as JSON objects with
    /// snake_case keys, highest id first.
    pub async fn table_rows(&self, table: &str, limit: u64) -> Result<Vec<Value>> {
        let db = &self.db;
        let rows = match table {
            "advertisements" => {
                advertisement::Entity::find()
                    .order_by_desc(advertisement::Column::Id)
                    .limit(limit)
                    .into_json()
                    .all(db)
                    .await
            }
            "news_articles" => {
                news_article::Entity::find()
                    .order_by_desc(news_article::Column::Id)
                    .limit(limit)
                    .into_json()
                    .all(db)
                    .await
            }
            "users" => {
                user::Entity::find()
                    .order_by_desc(user::Column::Id)
                    .limit(limit)
                    .into_json()
                    .all(db)
                    .await
            }
            "site_settings" => {
                site_setting::Entity::find()
                    .order_by_desc(site_setting::Column::Id)
                    .limit(limit)
                    .into_json()
                    .all(db)
                    .await
            }
            other => {
                return Err(LivescoreError::validation(format!(
                    "Table '{}' cannot be browsed. Allowed: {}",
                    other,
                    BROWSABLE_TABLES.join(", ")
                )));
            }
        }
        .map_err(|e| db_error(table, e))?;

        Ok(rows.into_iter().map(strip_hidden_columns).collect())
    }
}

fn strip_hidden_columns(mut row: Value) -> Value {
    if let Value::Object(map) = &mut row {
        for column in HIDDEN_COLUMNS {
            map.remove(*column);
        }
    }
    row
}
