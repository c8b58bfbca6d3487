//! Admin action handlers
//!
//! Each handler is one operator action of the admin panel: it validates input
//! before any network call, runs the write, fires cache notifications after a
//! success, and turns the outcome into a [`Notice`] for the operator:
//! - `listings`: vehicle listings and their images
//! - `reviews`: reviews and stories
//! - `content`: homepage copy, static pages and contact details
//! - `inbox`: leads and contact form submissions
//! - `partners`: banks and leasing companies

pub mod listings;
pub mod reviews;
pub mod content;
pub mod inbox;
pub mod partners;

use std::sync::Arc;
use tracing::{error, warn};
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::services::{CacheNotifier, Invalidation, MemoryBucket, ServiceFactory};
use crate::utils::errors::{DealerDeskError, Result, ValidationError};
use crate::utils::logging::log_admin_action;

/// Operator-facing outcome of an admin action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    /// Input rejected before anything was written
    Invalid(String),
    /// The store or bucket failed; details are in the log
    Failure(String),
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Invalid(message) | Notice::Failure(message) => message,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Everything an admin action needs
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub db: DatabaseService,
    pub services: ServiceFactory,
}

impl AdminContext {
    pub fn new(db: DatabaseService, services: ServiceFactory) -> Self {
        Self { db, services }
    }

    /// Connect to the configured store, bucket and cache endpoint
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let db = DatabaseService::connect(&settings.database).await?;
        let services = ServiceFactory::new(settings, &db)?;
        Ok(Self::new(db, services))
    }

    /// In-process store and bucket, notifications off
    pub fn in_memory() -> Self {
        let db = DatabaseService::in_memory();
        let services = ServiceFactory::with_parts(&db, Arc::new(MemoryBucket::default()), CacheNotifier::disabled());
        Self::new(db, services)
    }

    pub(crate) fn invalidate(&self, invalidation: Invalidation) {
        self.services.notifier.notify(invalidation);
    }
}

/// Log the outcome of an action and map failures to the notice shown to the operator
pub(crate) fn conclude<T>(
    action: &str,
    resource: &str,
    id: Option<&str>,
    outcome: Result<T>,
    failure: &str,
) -> std::result::Result<T, Notice> {
    log_admin_action(action, resource, id, outcome.is_ok());

    match outcome {
        Ok(value) => Ok(value),
        Err(DealerDeskError::Validation(e)) => Err(rejected(action, resource, e)),
        Err(e) => {
            error!(
                action = %action,
                resource = %resource,
                id = ?id,
                severity = %e.severity(),
                error = %e,
                "Admin action failed"
            );
            Err(Notice::Failure(failure.to_string()))
        }
    }
}

/// Notice for input refused before any call was made
pub(crate) fn rejected(action: &str, resource: &str, reason: ValidationError) -> Notice {
    warn!(action = %action, resource = %resource, reason = %reason, "Admin input rejected");
    Notice::Invalid(reason.to_string())
}

/// Collapse a concluded write into its notice
pub(crate) fn notice<T>(result: std::result::Result<T, Notice>, success: &str) -> Notice {
    match result {
        Ok(_) => Notice::Success(success.to_string()),
        Err(notice) => notice,
    }
}
