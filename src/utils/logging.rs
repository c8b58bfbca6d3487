//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for DealerDesk.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{DealerDeskError, Result};

/// Initialize logging based on configuration
///
/// The returned guard flushes the file appender on drop and must be held
/// for as long as logging is needed.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
        .try_init()
        .map_err(|e| DealerDeskError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions with structured data
pub fn log_admin_action(action: &str, resource: &str, id: Option<&str>, success: bool) {
    if success {
        info!(
            action = action,
            resource = resource,
            id = id,
            "Admin action completed"
        );
    } else {
        warn!(
            action = action,
            resource = resource,
            id = id,
            "Admin action failed"
        );
    }
}

/// Log store operations
pub fn log_store_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Store operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Store operation failed"
        );
    }
}

/// Log bucket operations
pub fn log_storage_operation(operation: &str, path: &str, size_bytes: Option<usize>) {
    info!(
        operation = operation,
        path = path,
        size_bytes = size_bytes,
        "Storage operation performed"
    );
}
