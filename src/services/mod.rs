//! Services module
//!
//! This module contains the collaborators around the repositories: image
//! storage, page content, and cache invalidation.

pub mod cache;
pub mod content;
pub mod storage;

// Re-export commonly used services
pub use cache::{CacheAction, CacheNotifier, Invalidation};
pub use content::ContentService;
pub use storage::{Bucket, ImageFile, ImageStorage, MemoryBucket, SupabaseBucket};

use std::sync::Arc;
use tracing::warn;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub content: ContentService,
    pub images: ImageStorage,
    pub notifier: CacheNotifier,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Result<Self> {
        let bucket = SupabaseBucket::new(&settings.storage)?;
        if settings.storage.api_key.is_empty() {
            warn!("Storage API key is empty, uploads will be rejected by the bucket");
        }

        Ok(Self {
            content: ContentService::new(database.settings.clone()),
            images: ImageStorage::new(Arc::new(bucket)),
            notifier: CacheNotifier::new(&settings.cache)?,
        })
    }

    /// Services over an explicit bucket and notifier
    pub fn with_parts(database: &DatabaseService, bucket: Arc<dyn Bucket>, notifier: CacheNotifier) -> Self {
        Self {
            content: ContentService::new(database.settings.clone()),
            images: ImageStorage::new(bucket),
            notifier,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self, database: &DatabaseService) -> ServiceHealthStatus {
        let store_healthy = match database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        };

        ServiceHealthStatus {
            store_healthy,
            bucket: self.images.bucket().name().to_string(),
            cache_enabled: self.notifier.is_enabled(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub store_healthy: bool,
    pub bucket: String,
    pub cache_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.store_healthy {
            issues.push("Store unreachable".to_string());
        }
        if !self.cache_enabled {
            issues.push("Cache notifications disabled".to_string());
        }

        issues
    }
}
