//! Schema source abstraction
//!
//! A schema source answers what a backing store knows about a record type's
//! persisted columns. Tableless record types always consult the null source.

use indexmap::IndexMap;

/// Column metadata reported by a schema source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Store-specific type name
    pub sql_type: String,
    /// Whether the store accepts null
    pub nullable: bool,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
        }
    }
}

/// Trait for answering schema questions about a record type
pub trait SchemaSource: Send + Sync {
    /// Number of persisted columns known to the store
    fn declared_field_count(&self) -> usize;

    /// Persisted columns keyed by name, in store order
    fn declared_fields(&self) -> IndexMap<String, ColumnInfo>;

    /// Whether the schema is already loaded and no introspection is needed
    fn has_cached_schema(&self) -> bool;

    /// Check if the store knows a column
    fn knows_field(&self, name: &str) -> bool {
        self.declared_fields().contains_key(name)
    }
}
