use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

/// Which authentication header set the football API expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiKeyStyle {
    /// `x-rapidapi-key` + `x-rapidapi-host`
    #[default]
    Rapidapi,
    /// `x-apisports-key`
    Apisports,
}

impl std::str::FromStr for ApiKeyStyle {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rapidapi" => Ok(Self::Rapidapi),
            "apisports" => Ok(Self::Apisports),
            _ => Err(format!(
                "Invalid API key style: '{}'. Valid: rapidapi, apisports",
                s
            )),
        }
    }
}

/// Static configuration (TOML + environment, read at startup)
///
/// Priority: ENV > config.toml > defaults.
/// ENV prefix `LS`, separator `__`, e.g. `LS__SERVER__PORT=9000`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub football_api: FootballApiConfig,
    #[serde(default)]
    pub blob: BlobConfig,
    #[serde(default)]
    pub news: NewsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// Load from `config.toml` in the working directory and the environment
    pub fn load() -> Self {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Self {
        use config::{Config, Environment, File};

        let builder = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("LS")
                    .separator("__")
                    .try_parsing(true),
            );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<StaticConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        }
    }

    /// Render the defaults as a TOML document
    pub fn generate_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config)
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_retry_max_delay_ms")]
    pub retry_max_delay_ms: u64,
}

/// Third-party football statistics API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FootballApiConfig {
    #[serde(default = "default_football_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_football_api_host")]
    pub api_host: String,
    #[serde(default)]
    pub key_style: ApiKeyStyle,
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
    /// Upper bound on cached responses
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
    /// Entries are dropped after this long no matter what a caller asks for
    #[serde(default = "default_cache_max_ttl")]
    pub cache_max_ttl_secs: u64,
}

/// Hosted object store used for advertisement and logo images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobConfig {
    #[serde(default = "default_blob_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub read_write_token: String,
    /// Directory holding `ads/` when uploads fall back to local disk
    #[serde(default = "default_blob_local_dir")]
    pub local_dir: String,
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_news_query")]
    pub query: String,
    #[serde(default = "default_news_page_size")]
    pub page_size: u32,
    /// 0 disables the background sync task
    #[serde(default = "default_news_sync_interval")]
    pub sync_interval_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Empty means a random secret is generated at startup
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "livescore.db".to_string()
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    100
}

fn default_retry_max_delay_ms() -> u64 {
    2000
}

fn default_football_base_url() -> String {
    "https://v3.football.api-sports.io".to_string()
}

fn default_football_api_host() -> String {
    "v3.football.api-sports.io".to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_cache_max_entries() -> u64 {
    5_000
}

fn default_cache_max_ttl() -> u64 {
    24 * 60 * 60
}

fn default_blob_api_url() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_blob_local_dir() -> String {
    "public".to_string()
}

fn default_news_api_url() -> String {
    "https://newsapi.org/v2/everything".to_string()
}

fn default_news_query() -> String {
    "football OR soccer".to_string()
}

fn default_news_page_size() -> u32 {
    20
}

fn default_news_sync_interval() -> u64 {
    360
}

fn default_access_token_minutes() -> u64 {
    120
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            pool_size: default_database_pool_size(),
            retry_count: default_retry_count(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            retry_max_delay_ms: default_retry_max_delay_ms(),
        }
    }
}

impl Default for FootballApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_football_base_url(),
            api_key: String::new(),
            api_host: default_football_api_host(),
            key_style: ApiKeyStyle::default(),
            timeout_secs: default_http_timeout(),
            cache_max_entries: default_cache_max_entries(),
            cache_max_ttl_secs: default_cache_max_ttl(),
        }
    }
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            api_url: default_blob_api_url(),
            read_write_token: String::new(),
            local_dir: default_blob_local_dir(),
            timeout_secs: default_http_timeout(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_url: default_news_api_url(),
            api_key: String::new(),
            query: default_news_query(),
            page_size: default_news_page_size(),
            sync_interval_minutes: default_news_sync_interval(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_minutes: default_access_token_minutes(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            allowed_origins: Vec::new(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_style_from_str() {
        assert_eq!("RapidAPI".parse::<ApiKeyStyle>(), Ok(ApiKeyStyle::Rapidapi));
        assert_eq!("apisports".parse::<ApiKeyStyle>(), Ok(ApiKeyStyle::Apisports));
        assert!("bearer".parse::<ApiKeyStyle>().is_err());
    }

    #[test]
    fn test_sample_config_round_trips_through_toml() {
        let sample = StaticConfig::generate_sample_config();
        let parsed: StaticConfig = toml::from_str(&sample).expect("sample config must parse");
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.football_api.key_style, ApiKeyStyle::Rapidapi);
        assert_eq!(parsed.news.sync_interval_minutes, 360);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: StaticConfig = toml::from_str(
            r#"
            [football_api]
            api_key = "abc"
            key_style = "apisports"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.football_api.api_key, "abc");
        assert_eq!(parsed.football_api.key_style, ApiKeyStyle::Apisports);
        assert_eq!(parsed.database.database_url, "livescore.db");
        assert_eq!(parsed.blob.local_dir, "public");
    }
}
