//! Typed access to one store table
//!
//! Shared plumbing for the entity repositories: serializing requests into
//! rows, deserializing rows into entities, stamping `updated_at`, and turning
//! the store's no-rows code into `None` for single lookups.

use std::marker::PhantomData;
use std::sync::Arc;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use crate::database::store::{Query, Row, Store, Table};
use crate::utils::errors::{DealerDeskError, Result};

pub struct Collection<T> {
    store: Arc<dyn Store>,
    table: Table,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            table: self.table,
            _entity: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection").field("table", &self.table).finish()
    }
}

impl<T: DeserializeOwned> Collection<T> {
    pub fn new(store: Arc<dyn Store>, table: Table) -> Self {
        Self {
            store,
            table,
            _entity: PhantomData,
        }
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub async fn list(&self, query: &Query) -> Result<Vec<T>> {
        let rows = self.store.select(self.table, query).await?;
        rows.into_iter().map(from_row).collect()
    }

    /// Single-row lookup; no match is `None`, every other store error propagates
    pub async fn find(&self, query: &Query) -> Result<Option<T>> {
        match self.store.single(self.table, query).await {
            Ok(row) => from_row(row).map(Some),
            Err(e) if e.is_no_rows() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        self.find(&by_id(id)).await
    }

    pub async fn insert<R: Serialize>(&self, request: &R) -> Result<T> {
        let row = self.store.insert(self.table, to_row(request)?).await?;
        from_row(row)
    }

    /// Merge the fields of `patch` into row `id` and stamp `updated_at`
    pub async fn update<R: Serialize>(&self, id: Uuid, patch: &R) -> Result<T> {
        let mut row = to_row(patch)?;
        row.insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        let row = self.store.update(self.table, &by_id(id), row).await?;
        from_row(row)
    }

    pub async fn upsert<R: Serialize>(&self, on_conflict: &str, request: &R) -> Result<T> {
        let mut row = to_row(request)?;
        row.insert("updated_at".to_string(), Value::String(Utc::now().to_rfc3339()));
        let row = self.store.upsert(self.table, on_conflict, row).await?;
        from_row(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.store.delete(self.table, &by_id(id)).await?;
        Ok(())
    }
}

pub fn by_id(id: Uuid) -> Query {
    Query::new().eq("id", id.to_string())
}

pub fn newest_first() -> Query {
    Query::new().order_by("created_at", false)
}

pub fn by_order_index() -> Query {
    Query::new().order_by("order_index", true)
}

pub fn to_row<R: Serialize>(request: &R) -> Result<Row> {
    match serde_json::to_value(request)? {
        Value::Object(row) => Ok(row),
        other => Err(DealerDeskError::Serialization(serde_json::Error::custom(format!(
            "write payload must serialize to an object, got {}",
            other
        )))),
    }
}

pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(Value::Object(row))?)
}
