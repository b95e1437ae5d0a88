use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use ts_rs::TS;

/// Generated TypeScript bindings for the web front-end
pub const TS_EXPORT_PATH: &str = "livescore.generated.ts";

/// Click-through rate in percent; zero when nothing was shown yet
pub fn calculate_ctr(clicks: i64, impressions: i64) -> f64 {
    if impressions <= 0 {
        0.0
    } else {
        clicks as f64 / impressions as f64 * 100.0
    }
}

// ============ Advertisements ============

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumIter, EnumString,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdPosition {
    Hero,
    Sidebar,
    InFeed,
    Footer,
    PreContent,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, EnumIter, EnumString,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdSize {
    Small,
    #[default]
    Medium,
    Large,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, EnumIter,
    EnumString, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AdStatus {
    Active,
    #[default]
    Paused,
    Scheduled,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: i32,
    pub name: String,
    pub position: AdPosition,
    pub size: AdSize,
    pub image_url: String,
    pub destination_url: String,
    pub status: AdStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub revenue: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Advertisement {
    /// Active and inside its schedule window at `now`
    pub fn is_running_at(&self, now: DateTime<Utc>) -> bool {
        self.status == AdStatus::Active
            && self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| end > now)
    }
}

/// Payload of the admin "create advertisement" form
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct NewAdvertisement {
    pub name: String,
    pub position: AdPosition,
    #[serde(default)]
    pub size: AdSize,
    pub image_url: String,
    pub destination_url: String,
    #[serde(default)]
    pub status: AdStatus,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub revenue: f64,
}

/// Partial update; absent fields keep their stored value.
///
/// Counters are not part of the patch: they only move through tracking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementPatch {
    pub name: Option<String>,
    pub position: Option<AdPosition>,
    pub size: Option<AdSize>,
    pub image_url: Option<String>,
    pub destination_url: Option<String>,
    pub status: Option<AdStatus>,
    /// `Some(None)` clears the date
    #[serde(default, with = "double_option")]
    #[ts(type = "string | null")]
    pub start_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, with = "double_option")]
    #[ts(type = "string | null")]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub revenue: Option<f64>,
}

/// Distinguishes a missing field from an explicit `null`
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Aggregates shown on the admin analytics screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct AdSummary {
    pub total_ads: usize,
    pub active_ads: usize,
    pub paused_ads: usize,
    pub scheduled_ads: usize,
    pub ended_ads: usize,
    pub total_impressions: i64,
    pub total_clicks: i64,
    pub overall_ctr: f64,
    pub total_revenue: f64,
}

// ============ News ============

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, EnumIter, EnumString, AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NewsCategory {
    Thai,
    International,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i32,
    pub title: String,
    pub original_title: Option<String>,
    pub content: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: NewsCategory,
    pub slug: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

/// Article produced by a sync source, before it has a database id
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    pub title: String,
    pub original_title: Option<String>,
    pub content: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub category: NewsCategory,
    pub slug: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
}

// ============ Users ============

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    TS,
    EnumIter,
    EnumString,
    AsRefStr,
)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Editor,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

// ============ Site settings ============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[serde(rename_all = "camelCase")]
pub struct LogoSettings {
    pub image_url: String,
    pub width: i32,
    pub height: i32,
    pub alt_text: String,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            image_url: "/logo.png".to_string(),
            width: 150,
            height: 50,
            alt_text: "Livescore".to_string(),
        }
    }
}

/// Backend description reported by health and database tooling
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub storage_type: String,
}
