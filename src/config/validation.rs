//! Configuration validation module
//!
//! This module provides validation functions for configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DealerDeskError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_database_config(&settings.database)?;
    validate_storage_config(&settings.storage)?;
    validate_cache_config(&settings.cache)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(DealerDeskError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(DealerDeskError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(DealerDeskError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0 {
        return Err(DealerDeskError::Config(
            "Database acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate bucket configuration
fn validate_storage_config(config: &super::StorageConfig) -> Result<()> {
    if url::Url::parse(&config.base_url).is_err() {
        return Err(DealerDeskError::Config(
            format!("Storage base URL is not a valid URL: {}", config.base_url)
        ));
    }

    if config.bucket.is_empty() || config.bucket.contains('/') {
        return Err(DealerDeskError::Config(
            "Storage bucket must be a non-empty name without slashes".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(DealerDeskError::Config(
            "Storage timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate cache notifier configuration
///
/// A missing API key is allowed; the notifier then skips every notification.
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.enabled && url::Url::parse(&config.endpoint).is_err() {
        return Err(DealerDeskError::Config(
            format!("Cache endpoint is not a valid URL: {}", config.endpoint)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DealerDeskError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DealerDeskError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
