//! Settings repository implementation
//!
//! `settings` is a key/value table with a unique `key` column. Writes are
//! upserts on that key, so setting the same key twice leaves one row holding
//! the second value.

use std::collections::BTreeMap;
use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use super::collection::Collection;
use crate::database::store::{Query, Store, Table};
use crate::models::setting::Setting;
use crate::utils::errors::Result;

#[derive(Debug, Serialize)]
struct SettingWrite<'a> {
    key: &'a str,
    value: &'a Value,
}

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    settings: Collection<Setting>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            settings: Collection::new(store, Table::Settings),
        }
    }

    /// Stored value for `key`, `None` when the key was never set
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        let setting = self.settings.find(&Query::new().eq("key", key)).await?;
        Ok(setting.map(|s| s.value))
    }

    /// Insert or overwrite the value stored under `key`
    pub async fn set(&self, key: &str, value: Value) -> Result<()> {
        debug!(key = %key, "Writing setting");
        self.settings
            .upsert("key", &SettingWrite { key, value: &value })
            .await?;
        Ok(())
    }

    /// Every stored setting keyed by name
    pub async fn get_all(&self) -> Result<BTreeMap<String, Value>> {
        let settings = self.settings.list(&Query::new()).await?;
        Ok(settings.into_iter().map(|s| (s.key, s.value)).collect())
    }

    /// Typed read of `key`
    ///
    /// A value that does not have the expected shape is logged and treated as absent.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get(key).await? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(typed) => Ok(Some(typed)),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored setting has an unexpected shape");
                Ok(None)
            }
        }
    }

    pub async fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?).await
    }
}
