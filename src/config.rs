use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub cache: CacheSettings,
    pub recommendation: RecommendationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_shortlist_size")]
    pub shortlist_size: usize,
    #[serde(default = "default_qualified_min_score")]
    pub qualified_min_score: i32,
    #[serde(default = "default_relaxed_min_score")]
    pub relaxed_min_score: i32,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            shortlist_size: default_shortlist_size(),
            qualified_min_score: default_qualified_min_score(),
            relaxed_min_score: default_relaxed_min_score(),
        }
    }
}

fn default_shortlist_size() -> usize {
    3
}
fn default_qualified_min_score() -> i32 {
    3
}
fn default_relaxed_min_score() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with MATCHER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with MATCHER_)
            // e.g., MATCHER_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCHER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment overrides for values usually injected
/// by the deployment environment rather than the config file
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    // REDIS_URL takes precedence, then MATCHER_CACHE__REDIS_URL
    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("MATCHER_CACHE__REDIS_URL"))
        .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

    let catalog_base_url = env::var("MATCHER_CATALOG__BASE_URL").ok();
    let catalog_api_key = env::var("MATCHER_CATALOG__API_KEY").ok();

    let mut builder = Config::builder()
        .add_source(settings)
        .set_override("cache.redis_url", redis_url)?;

    if let Some(base_url) = catalog_base_url {
        builder = builder.set_override("catalog.base_url", base_url)?;
    }
    if let Some(api_key) = catalog_api_key {
        builder = builder.set_override("catalog.api_key", api_key)?;
    }

    builder.build()
}
