//! Cache invalidation notifier
//!
//! After a successful write the public site is told which collection changed.
//! Notifications are best effort: they run on a detached task, failures are
//! logged and never reach the admin action that triggered them.

use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use crate::config::CacheConfig;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheAction {
    Create,
    Update,
    Delete,
}

/// Body of one invalidation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invalidation {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub action: CacheAction,
}

impl Invalidation {
    pub fn new(collection: impl Into<String>, document_id: Option<String>, action: CacheAction) -> Self {
        Self {
            collection: collection.into(),
            document_id,
            action,
        }
    }

    pub fn created(collection: impl Into<String>, id: impl ToString) -> Self {
        Self::new(collection, Some(id.to_string()), CacheAction::Create)
    }

    pub fn updated(collection: impl Into<String>, id: impl ToString) -> Self {
        Self::new(collection, Some(id.to_string()), CacheAction::Update)
    }

    pub fn deleted(collection: impl Into<String>, id: impl ToString) -> Self {
        Self::new(collection, Some(id.to_string()), CacheAction::Delete)
    }

    /// Collection-wide change with no single document, e.g. a settings fan-out
    pub fn collection(collection: impl Into<String>, action: CacheAction) -> Self {
        Self::new(collection, None, action)
    }
}

#[derive(Debug, Clone)]
pub struct CacheNotifier {
    client: Client,
    config: CacheConfig,
}

impl CacheNotifier {
    pub fn new(config: &CacheConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Notifier that never sends anything
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            config: CacheConfig::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send one invalidation and wait for the answer
    ///
    /// Returns whether the endpoint acknowledged it. Errors are logged, never returned.
    pub async fn send(&self, invalidation: &Invalidation) -> bool {
        if !self.config.enabled {
            debug!(collection = %invalidation.collection, "Cache notifications disabled");
            return false;
        }
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.is_empty()) else {
            warn!("Cache invalidation API key not configured");
            return false;
        };

        let result = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(invalidation)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                info!(
                    collection = %invalidation.collection,
                    action = ?invalidation.action,
                    "Cache invalidated"
                );
                true
            }
            Ok(response) => {
                let status = response.status();
                let error_text = response.text().await.unwrap_or_default();
                error!(
                    collection = %invalidation.collection,
                    status = %status,
                    body = %error_text,
                    "Failed to invalidate cache"
                );
                false
            }
            Err(e) => {
                error!(collection = %invalidation.collection, error = %e, "Cache invalidation error");
                false
            }
        }
    }

    /// Fire-and-forget variant of [`send`](Self::send)
    ///
    /// Returns the handle of the spawned task, or `None` when notifications are disabled.
    pub fn notify(&self, invalidation: Invalidation) -> Option<JoinHandle<bool>> {
        if !self.config.enabled {
            return None;
        }

        let notifier = self.clone();
        Some(tokio::spawn(async move { notifier.send(&invalidation).await }))
    }
}
