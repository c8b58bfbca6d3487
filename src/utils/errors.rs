//! Error handling for DealerDesk
//!
//! This module defines the main error types used throughout the crate
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for DealerDesk operations
#[derive(Error, Debug)]
pub enum DealerDeskError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Input rejected before any write was issued
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("min_{field} must not exceed max_{field}")]
    InvertedRange { field: &'static str },
}

/// Error reported by the backing store
///
/// Mirrors the hosted database's error payload: a message and an optional
/// machine code. The no-rows code is what a single-row lookup returns when
/// nothing matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
    pub code: Option<String>,
}

impl StoreError {
    /// Code returned when a single-row request matched zero rows
    pub const NO_ROWS: &'static str = "PGRST116";

    /// Code returned when a write violates a unique constraint
    pub const UNIQUE_VIOLATION: &'static str = "23505";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }

    pub fn no_rows() -> Self {
        Self::with_code(
            "JSON object requested, multiple (or no) rows returned",
            Self::NO_ROWS,
        )
    }

    pub fn is_no_rows(&self) -> bool {
        self.code.as_deref() == Some(Self::NO_ROWS)
    }
}

/// Bucket specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload of {path} failed: {message}")]
    UploadFailed { path: String, message: String },

    #[error("Removal of {path} failed: {message}")]
    RemoveFailed { path: String, message: String },

    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias for DealerDesk operations
pub type Result<T> = std::result::Result<T, DealerDeskError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type alias for bucket operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl DealerDeskError {
    /// Whether the error means "no such record" rather than a failure
    pub fn is_not_found(&self) -> bool {
        match self {
            DealerDeskError::NotFound { .. } => true,
            DealerDeskError::Store(e) => e.is_no_rows(),
            DealerDeskError::Database(sqlx::Error::RowNotFound) => true,
            _ => false,
        }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            DealerDeskError::Validation(_) => true,
            DealerDeskError::Store(e) => e.is_no_rows(),
            DealerDeskError::NotFound { .. } => true,
            DealerDeskError::Storage(_) => true,
            DealerDeskError::Database(_) => false,
            DealerDeskError::Migration(_) => false,
            DealerDeskError::Config(_) => false,
            DealerDeskError::Http(_) => true,
            DealerDeskError::Serialization(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DealerDeskError::Database(_) => ErrorSeverity::Critical,
            DealerDeskError::Migration(_) => ErrorSeverity::Critical,
            DealerDeskError::Config(_) => ErrorSeverity::Critical,
            DealerDeskError::Validation(_) => ErrorSeverity::Info,
            DealerDeskError::NotFound { .. } => ErrorSeverity::Info,
            DealerDeskError::Store(e) if e.is_no_rows() => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
