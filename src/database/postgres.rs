//! Postgres-backed store
//!
//! Rows travel as `jsonb`: reads use `to_jsonb(t)`, writes go through
//! `jsonb_populate_record` so column types are resolved by the database.
//! Only the columns present in a payload are written, which leaves column
//! defaults (`id`, `created_at`, ...) to the server.

use std::sync::OnceLock;
use std::time::Instant;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use super::store::{Query, Row, Store, Table};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::logging::log_store_operation;

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_rows(&self, operation: &str, table: Table, sql: &str, payload: Option<&Row>, query: &Query) -> StoreResult<Vec<Row>> {
        let started = Instant::now();

        let mut statement = sqlx::query_scalar::<sqlx::Postgres, Json<Value>>(sql);
        if let Some(payload) = payload {
            statement = statement.bind(Json(Value::Object(payload.clone())));
        }
        for filter in &query.filters {
            statement = statement.bind(filter.column.clone()).bind(Json(filter.value.clone()));
        }

        let result = statement.fetch_all(&self.pool).await;
        log_store_operation(operation, table.name(), started.elapsed().as_millis() as u64, result.is_ok());

        result
            .map_err(store_error)?
            .into_iter()
            .map(|Json(value)| into_row(value))
            .collect()
    }
}

#[async_trait]
impl Store for PgStore {
    async fn select(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>> {
        let mut sql = format!("SELECT to_jsonb(t) FROM {} AS t", table.name());
        sql.push_str(&where_clause(query, 1));
        if let Some(order) = &query.order {
            let column = identifier(&order.column)?;
            let direction = if order.ascending { "ASC" } else { "DESC" };
            sql.push_str(&format!(" ORDER BY t.{} {}", column, direction));
        }

        self.fetch_rows("select", table, &sql, None, query).await
    }

    async fn single(&self, table: Table, query: &Query) -> StoreResult<Row> {
        let mut rows = self.select(table, query).await?;
        if rows.len() != 1 {
            return Err(StoreError::no_rows());
        }
        Ok(rows.remove(0))
    }

    async fn insert(&self, table: Table, row: Row) -> StoreResult<Row> {
        let columns = column_list(&row)?;
        let sql = if columns.is_empty() {
            format!("INSERT INTO {} AS t DEFAULT VALUES RETURNING to_jsonb(t)", table.name())
        } else {
            format!(
                "INSERT INTO {table} AS t ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) RETURNING to_jsonb(t)",
                table = table.name(),
                columns = columns.join(", "),
            )
        };
        let payload = (!columns.is_empty()).then_some(&row);

        let mut rows = self.fetch_rows("insert", table, &sql, payload, &Query::new()).await?;
        rows.pop().ok_or_else(StoreError::no_rows)
    }

    async fn update(&self, table: Table, query: &Query, patch: Row) -> StoreResult<Row> {
        let columns = column_list(&patch)?;
        if columns.is_empty() {
            return self.single(table, query).await;
        }

        let assignments: Vec<String> = columns.iter().map(|c| format!("{c} = r.{c}")).collect();
        let sql = format!(
            "UPDATE {table} AS t SET {assignments} FROM jsonb_populate_record(NULL::{table}, $1) AS r{filter} RETURNING to_jsonb(t)",
            table = table.name(),
            assignments = assignments.join(", "),
            filter = where_clause(query, 2),
        );

        let mut rows = self.fetch_rows("update", table, &sql, Some(&patch), query).await?;
        if rows.is_empty() {
            return Err(StoreError::no_rows());
        }
        Ok(rows.remove(0))
    }

    async fn upsert(&self, table: Table, on_conflict: &str, row: Row) -> StoreResult<Row> {
        let conflict = identifier(on_conflict)?;
        let columns = column_list(&row)?;
        if !columns.contains(&conflict) {
            return Err(StoreError::with_code(
                format!("column \"{}\" missing from upsert payload", conflict),
                "42703",
            ));
        }

        let mut updates: Vec<String> = columns
            .iter()
            .filter(|c| **c != conflict)
            .map(|c| format!("{c} = EXCLUDED.{c}"))
            .collect();
        if updates.is_empty() {
            updates.push(format!("{c} = EXCLUDED.{c}", c = conflict));
        }

        let sql = format!(
            "INSERT INTO {table} AS t ({columns}) SELECT {columns} FROM jsonb_populate_record(NULL::{table}, $1) \
             ON CONFLICT ({conflict}) DO UPDATE SET {updates} RETURNING to_jsonb(t)",
            table = table.name(),
            columns = columns.join(", "),
            conflict = conflict,
            updates = updates.join(", "),
        );

        let mut rows = self.fetch_rows("upsert", table, &sql, Some(&row), &Query::new()).await?;
        rows.pop().ok_or_else(StoreError::no_rows)
    }

    async fn delete(&self, table: Table, query: &Query) -> StoreResult<()> {
        let sql = format!("DELETE FROM {} AS t{}", table.name(), where_clause(query, 1));
        let started = Instant::now();

        let mut statement = sqlx::query::<sqlx::Postgres>(&sql);
        for filter in &query.filters {
            statement = statement.bind(filter.column.clone()).bind(Json(filter.value.clone()));
        }
        let result = statement.execute(&self.pool).await;
        log_store_operation("delete", table.name(), started.elapsed().as_millis() as u64, result.is_ok());

        if result.map_err(store_error)?.rows_affected() == 0 {
            return Err(StoreError::no_rows());
        }
        Ok(())
    }
}

/// `WHERE` clause comparing `to_jsonb(t) -> column` with each filter value
///
/// Column names and values are both bound, starting at `$first`.
fn where_clause(query: &Query, first: usize) -> String {
    if query.filters.is_empty() {
        return String::new();
    }

    let conditions: Vec<String> = (0..query.filters.len())
        .map(|i| {
            let column = first + i * 2;
            format!("(to_jsonb(t) -> ${}) = ${}", column, column + 1)
        })
        .collect();
    format!(" WHERE {}", conditions.join(" AND "))
}

fn identifier(name: &str) -> StoreResult<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("identifier pattern is valid"));

    if pattern.is_match(name) {
        Ok(name.to_string())
    } else {
        Err(StoreError::with_code(format!("invalid column name {:?}", name), "42602"))
    }
}

fn column_list(row: &Row) -> StoreResult<Vec<String>> {
    row.keys().map(|key| identifier(key)).collect()
}

fn into_row(value: Value) -> StoreResult<Row> {
    match value {
        Value::Object(row) => Ok(row),
        other => Err(StoreError::new(format!("expected a row object, got {}", other))),
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::no_rows(),
        sqlx::Error::Database(db) => match db.code() {
            Some(code) => StoreError::with_code(db.message(), code),
            None => StoreError::new(db.message()),
        },
        other => StoreError::new(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_where_clause_numbering() {
        assert_eq!(where_clause(&Query::new(), 1), "");
        let query = Query::new().eq("id", "x").eq("is_active", true);
        assert_eq!(
            where_clause(&query, 2),
            " WHERE (to_jsonb(t) -> $2) = $3 AND (to_jsonb(t) -> $4) = $5"
        );
    }

    #[test]
    fn test_identifier_rejects_injection() {
        assert!(identifier("order_index").is_ok());
        assert!(identifier("created_at; DROP TABLE cars").is_err());
        assert!(identifier("Key").is_err());
        assert!(identifier("").is_err());
    }

    #[test]
    fn test_column_list_from_payload() {
        let row = json!({ "key": "heroTitle", "value": "Hi" }).as_object().cloned().unwrap();
        assert_eq!(column_list(&row).unwrap(), vec!["key", "value"]);
        assert!(into_row(json!([1, 2])).is_err());
    }
}
