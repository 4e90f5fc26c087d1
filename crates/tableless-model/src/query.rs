//! Query source boundary
//!
//! Query execution is external. A query source runs caller-supplied SQL and
//! hands back raw rows together with the column types the store suggests.

use indexmap::IndexMap;
use tableless_types::{RawRow, RawValue, SharedStrategy};

/// Trait for executing a raw query against an external store
pub trait QuerySource: Send + Sync {
    /// Run `sql` with positional binds and return every row
    fn select_all(&self, sql: &str, binds: &[RawValue]) -> anyhow::Result<ResultSet>;
}

/// Rows returned by a query source
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    columns: Vec<String>,
    column_types: IndexMap<String, SharedStrategy>,
    rows: Vec<RawRow>,
}

impl ResultSet {
    /// Create a result set from its column list and rows
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self {
            columns,
            column_types: IndexMap::new(),
            rows,
        }
    }

    /// Build a result set whose columns are taken from the first row
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default();
        Self::new(columns, rows)
    }

    /// Attach the strategy the store suggests for a column
    pub fn with_column_type(mut self, column: impl Into<String>, strategy: SharedStrategy) -> Self {
        self.column_types.insert(column.into(), strategy);
        self
    }

    /// Column names in select order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Strategies suggested by the store, keyed by column
    pub fn column_types(&self) -> &IndexMap<String, SharedStrategy> {
        &self.column_types
    }

    /// Suggested strategy for one column
    pub fn column_type(&self, column: &str) -> Option<&SharedStrategy> {
        self.column_types.get(column)
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
