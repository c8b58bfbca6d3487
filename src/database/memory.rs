//! In-process store
//!
//! Behaves like the hosted store as far as the repositories can observe:
//! server-assigned ids and timestamps, unique keys, the no-rows code, and
//! last-write-wins updates. Used by tests and local development; failures
//! can be injected to exercise error paths.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;
use super::store::{Filter, Query, Row, Store, Table};
use crate::utils::errors::{StoreError, StoreResult};

const PERMISSION_DENIED: &str = "42501";

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    tables: HashMap<Table, Vec<StoredRow>>,
    next_seq: u64,
    offline: bool,
    rejections: Vec<(Table, Filter)>,
}

#[derive(Debug, Clone)]
struct StoredRow {
    seq: u64,
    row: Row,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the store were unreachable
    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }

    /// Reject writes to `table` whose resulting row has `column == value`
    pub async fn reject_writes_where(&self, table: Table, column: &str, value: impl Into<Value>) {
        self.state.lock().await.rejections.push((
            table,
            Filter {
                column: column.to_string(),
                value: value.into(),
            },
        ));
    }

    /// Number of rows currently stored in `table`
    pub async fn count(&self, table: Table) -> usize {
        self.state
            .lock()
            .await
            .tables
            .get(&table)
            .map_or(0, Vec::len)
    }
}

impl MemoryState {
    fn ensure_online(&self) -> StoreResult<()> {
        if self.offline {
            return Err(StoreError::new("store unreachable: connection refused"));
        }
        Ok(())
    }

    fn ensure_allowed(&self, table: Table, row: &Row) -> StoreResult<()> {
        let rejected = self
            .rejections
            .iter()
            .any(|(t, filter)| *t == table && row.get(&filter.column) == Some(&filter.value));
        if rejected {
            return Err(StoreError::with_code(
                format!("permission denied for table {}", table),
                PERMISSION_DENIED,
            ));
        }
        Ok(())
    }

    fn rows(&self, table: Table) -> &[StoredRow] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    fn matching(&self, table: Table, query: &Query) -> Vec<StoredRow> {
        let mut rows: Vec<StoredRow> = self
            .rows(table)
            .iter()
            .filter(|stored| query.matches(&stored.row))
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let by_column = compare_values(a.row.get(&order.column), b.row.get(&order.column))
                    .then(a.seq.cmp(&b.seq));
                if order.ascending {
                    by_column
                } else {
                    by_column.reverse()
                }
            });
        }

        rows
    }

    fn ensure_unique(&self, table: Table, row: &Row, skip_seq: Option<u64>) -> StoreResult<()> {
        let mut columns = vec!["id"];
        columns.extend(table.unique_key());

        for column in columns {
            let Some(value) = row.get(column) else { continue };
            let clash = self
                .rows(table)
                .iter()
                .any(|stored| Some(stored.seq) != skip_seq && stored.row.get(column) == Some(value));
            if clash {
                return Err(StoreError::with_code(
                    format!("duplicate key value violates unique constraint \"{}_{}_key\"", table, column),
                    StoreError::UNIQUE_VIOLATION,
                ));
            }
        }
        Ok(())
    }

    fn insert(&mut self, table: Table, mut row: Row) -> StoreResult<Row> {
        let now = Value::String(timestamp());
        row.entry("id").or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row.entry("created_at").or_insert_with(|| now.clone());
        row.entry("updated_at").or_insert(now);

        self.ensure_allowed(table, &row)?;
        self.ensure_unique(table, &row, None)?;

        self.next_seq += 1;
        let seq = self.next_seq;
        self.tables
            .entry(table)
            .or_default()
            .push(StoredRow { seq, row: row.clone() });
        Ok(row)
    }

    fn merge(&mut self, table: Table, seq: u64, patch: Row) -> StoreResult<Row> {
        let current = self
            .rows(table)
            .iter()
            .find(|stored| stored.seq == seq)
            .map(|stored| stored.row.clone())
            .ok_or_else(StoreError::no_rows)?;

        let mut merged = current;
        for (column, value) in patch {
            if column == "id" || column == "created_at" {
                continue;
            }
            merged.insert(column, value);
        }

        self.ensure_allowed(table, &merged)?;
        self.ensure_unique(table, &merged, Some(seq))?;

        if let Some(stored) = self
            .tables
            .get_mut(&table)
            .and_then(|rows| rows.iter_mut().find(|stored| stored.seq == seq))
        {
            stored.row = merged.clone();
        }
        Ok(merged)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>> {
        let state = self.state.lock().await;
        state.ensure_online()?;
        Ok(state.matching(table, query).into_iter().map(|stored| stored.row).collect())
    }

    async fn single(&self, table: Table, query: &Query) -> StoreResult<Row> {
        let state = self.state.lock().await;
        state.ensure_online()?;
        let mut rows = state.matching(table, query);
        if rows.len() != 1 {
            return Err(StoreError::no_rows());
        }
        Ok(rows.remove(0).row)
    }

    async fn insert(&self, table: Table, row: Row) -> StoreResult<Row> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;
        state.insert(table, row)
    }

    async fn update(&self, table: Table, query: &Query, patch: Row) -> StoreResult<Row> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;
        let matched = state.matching(table, query);
        if matched.len() != 1 {
            return Err(StoreError::no_rows());
        }
        state.merge(table, matched[0].seq, patch)
    }

    async fn upsert(&self, table: Table, on_conflict: &str, row: Row) -> StoreResult<Row> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        let Some(key) = row.get(on_conflict).cloned() else {
            return Err(StoreError::with_code(
                format!("column \"{}\" missing from upsert payload", on_conflict),
                "42703",
            ));
        };

        let existing = state
            .rows(table)
            .iter()
            .find(|stored| stored.row.get(on_conflict) == Some(&key))
            .map(|stored| stored.seq);

        match existing {
            Some(seq) => state.merge(table, seq, row),
            None => state.insert(table, row),
        }
    }

    async fn delete(&self, table: Table, query: &Query) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.ensure_online()?;

        let rows = state.tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|stored| !query.matches(&stored.row));
        if rows.len() == before {
            return Err(StoreError::no_rows());
        }
        Ok(())
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}
