use serde::{Deserialize, Serialize};

/// Main configuration structure for the moderation core
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Remote gallery configuration
    #[serde(default)]
    pub gallery: GalleryConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".modbot/modbot.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// sqlx connection URL for the configured path
    pub fn url(&self) -> String {
        format!("sqlite:{}", self.path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stdout only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}

/// Remote gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GalleryConfig {
    /// Endpoint queried on every cache miss
    #[serde(default = "default_gallery_base_url")]
    pub base_url: String,

    /// Token sent as `Authorization: Client-ID <client_id>`
    #[serde(default)]
    pub client_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_gallery_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_gallery_base_url() -> String {
    "https://api.imgur.com/3/gallery/r/cats/page/".to_string()
}

const fn default_gallery_timeout_secs() -> u64 {
    30
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base_url: default_gallery_base_url(),
            client_id: String::new(),
            timeout_secs: default_gallery_timeout_secs(),
        }
    }
}

impl GalleryConfig {
    pub fn new(base_url: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            ..Default::default()
        }
    }
}
