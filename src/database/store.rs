//! Store boundary
//!
//! The hosted database is reached through a small collection/query interface:
//! rows are JSON objects, filters are column equality, and every error is a
//! [`StoreError`] carrying the backend's message and code.

use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::utils::errors::StoreResult;

/// A row as exchanged with the store
pub type Row = Map<String, Value>;

/// Named resource collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Cars,
    Settings,
    Leads,
    Reviews,
    Stories,
    Pages,
    ContactForms,
    Banks,
    LeasingCompanies,
}

impl Table {
    pub const ALL: [Table; 9] = [
        Table::Cars,
        Table::Settings,
        Table::Leads,
        Table::Reviews,
        Table::Stories,
        Table::Pages,
        Table::ContactForms,
        Table::Banks,
        Table::LeasingCompanies,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Cars => "cars",
            Table::Settings => "settings",
            Table::Leads => "leads",
            Table::Reviews => "reviews",
            Table::Stories => "stories",
            Table::Pages => "pages",
            Table::ContactForms => "contact_forms",
            Table::Banks => "banks",
            Table::LeasingCompanies => "leasing_companies",
        }
    }

    /// Column carrying a unique constraint besides `id`
    pub fn unique_key(&self) -> Option<&'static str> {
        match self {
            Table::Settings => Some("key"),
            Table::Pages => Some("page_type"),
            _ => None,
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// Select-with-filter plus optional ordering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    /// Whether `row` satisfies every filter
    pub fn matches(&self, row: &Row) -> bool {
        self.filters
            .iter()
            .all(|filter| row.get(&filter.column) == Some(&filter.value))
    }
}

/// Request/response interface of the hosted store
///
/// Implementations assign `id`, `created_at` and `updated_at` on insert when
/// the row does not carry them.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug {
    /// All rows matching the query, in the requested order
    async fn select(&self, table: Table, query: &Query) -> StoreResult<Vec<Row>>;

    /// Exactly one matching row; zero or several rows fail with the no-rows code
    async fn single(&self, table: Table, query: &Query) -> StoreResult<Row>;

    /// Insert one row and return it as persisted
    async fn insert(&self, table: Table, row: Row) -> StoreResult<Row>;

    /// Merge `patch` into the single row matching `query`
    async fn update(&self, table: Table, query: &Query, patch: Row) -> StoreResult<Row>;

    /// Insert, or overwrite the row sharing the value of `on_conflict`
    async fn upsert(&self, table: Table, on_conflict: &str, row: Row) -> StoreResult<Row>;

    /// Delete the rows matching `query`; fails with the no-rows code when none matched
    async fn delete(&self, table: Table, query: &Query) -> StoreResult<()>;
}
