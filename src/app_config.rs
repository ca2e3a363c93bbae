//! Application configuration from file and environment variables
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. `DATABASE_URL` for the database URL
//! 2. Environment variables prefixed with POLLS_, with `__` between the
//!    section and the key (e.g. POLLS_POLLS__LATEST_LIMIT=10)
//! 3. Config file (config.toml)
//! 4. Default values
//!
//! The session signing key is read from `SECRET_KEY` and never lives in the
//! config file.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Global application configuration. Holds defaults until [`init`] runs.
pub static APP_CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| RwLock::new(AppConfig::default()));

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Polls".to_string(),
            description: "Vote on the latest questions".to_string(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub bind: String,
    /// env_logger filter used when RUST_LOG is unset
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL. `DATABASE_URL` takes precedence when set.
    pub url: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Create missing tables from the entity definitions on boot
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://polls.db?mode=rwc".to_string(),
            max_connections: 10,
            create_schema: true,
        }
    }
}

/// Poll listing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollsConfig {
    /// Number of questions shown on the index page
    pub latest_limit: u64,
    /// Window in hours for a question to count as recently published
    pub recent_hours: i64,
}

impl Default for PollsConfig {
    fn default() -> Self {
        Self {
            latest_limit: 5,
            recent_hours: 24,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub polls: PollsConfig,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &str) -> Result<Self, ConfigError> {
        use config::FileFormat;

        let config = Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(File::new(path, FileFormat::Toml).required(false))
            // e.g., POLLS_SITE__NAME, POLLS_DATABASE__MAX_CONNECTIONS
            .add_source(
                Environment::with_prefix("POLLS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                app_config.database.url = url;
            }
        }

        Ok(app_config)
    }
}

/// Load configuration and install it globally.
///
/// Runs before the logger exists, so a load failure is returned for the
/// caller to report; defaults stay installed in that case.
pub fn init() -> Result<(), ConfigError> {
    let loaded = AppConfig::load()?;
    if let Ok(mut config) = APP_CONFIG.write() {
        *config = loaded;
    }
    Ok(())
}

/// Get the current application configuration
pub fn get_config() -> AppConfig {
    APP_CONFIG.read().map(|c| c.clone()).unwrap_or_default()
}

/// Get site configuration
pub fn site() -> SiteConfig {
    get_config().site
}

/// Get server configuration
pub fn server() -> ServerConfig {
    get_config().server
}

/// Get database configuration
pub fn database() -> DatabaseConfig {
    get_config().database
}

/// Get polls configuration
pub fn polls() -> PollsConfig {
    get_config().polls
}
