//! Null schema source
//!
//! Stands in for a real store and reports that nothing is persisted, so all
//! typing information comes from the declaration table.

use crate::schema::{ColumnInfo, SchemaSource};
use indexmap::IndexMap;

/// Shared null schema source
pub static NULL_SCHEMA: NullSchemaSource = NullSchemaSource;

/// Schema source with no persisted fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSchemaSource;

impl NullSchemaSource {
    pub fn new() -> Self {
        Self
    }
}

impl SchemaSource for NullSchemaSource {
    fn declared_field_count(&self) -> usize {
        0
    }

    fn declared_fields(&self) -> IndexMap<String, ColumnInfo> {
        IndexMap::new()
    }

    fn has_cached_schema(&self) -> bool {
        true
    }

    fn knows_field(&self, _name: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_schema_is_constant() {
        let source = NullSchemaSource::new();
        for _ in 0..3 {
            assert_eq!(source.declared_field_count(), 0);
            assert!(source.declared_fields().is_empty());
            assert!(source.has_cached_schema());
            assert!(!source.knows_field("id"));
        }
    }

    #[test]
    fn test_shared_instance_as_trait_object() {
        let source: &dyn SchemaSource = &NULL_SCHEMA;
        assert_eq!(source.declared_field_count(), 0);
    }
}
