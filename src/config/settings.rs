//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from config files and environment variables.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
    /// Zero keeps idle connections open indefinitely
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Zero never recycles a connection by age
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_seconds: u64,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Object storage bucket configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`
    pub base_url: String,
    pub api_key: String,
    pub bucket: String,
    pub cache_control_seconds: u64,
    pub timeout_seconds: u64,
}

/// Cache invalidation notifier configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
}

fn default_true() -> bool {
    true
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "http://localhost:3000/api/cache/invalidate".to_string(),
            api_key: None,
            timeout_seconds: 5,
        }
    }
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Values from a `.env` file are exported first; environment variables use the
    /// `DEALERDESK` prefix with `__` between sections, e.g. `DEALERDESK_STORAGE__API_KEY`.
    pub fn new() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();

        let defaults = config::Config::try_from(&Settings::default())?;
        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("DEALERDESK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DealerDeskError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/dealerdesk".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: default_acquire_timeout(),
                idle_timeout_seconds: default_idle_timeout(),
                max_lifetime_seconds: default_max_lifetime(),
                run_migrations: true,
            },
            storage: StorageConfig {
                base_url: "http://localhost:54321".to_string(),
                api_key: String::new(),
                bucket: "images".to_string(),
                cache_control_seconds: 3600,
                timeout_seconds: 30,
            },
            cache: CacheConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: "logs".to_string(),
                file_prefix: "dealerdesk.log".to_string(),
            },
        }
    }
}
