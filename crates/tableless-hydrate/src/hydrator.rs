//! Result set hydration

use crate::attributes::AttributeSet;
use crate::error::HydrateResult;
use crate::reconcile::{ColumnTypes, reconcile};
use tableless_model::{RecordType, ResultSet};

/// Suggested strategies for the columns the record type does not know.
///
/// Columns that are declared, or that the type's schema source reports as
/// persisted, are left out so their suggestion can never replace the
/// declared strategy.
pub fn suggested_types(record_type: &RecordType, result: &ResultSet) -> ColumnTypes {
    let schema = record_type.schema();
    result
        .columns()
        .iter()
        .filter(|column| !record_type.fields().contains(column) && !schema.knows_field(column))
        .filter_map(|column| {
            result
                .column_type(column)
                .map(|strategy| (column.clone(), strategy.clone()))
        })
        .collect()
}

/// Reconcile every row of `result` against `record_type`
pub fn hydrate_all(
    record_type: &RecordType,
    result: &ResultSet,
) -> HydrateResult<Vec<AttributeSet>> {
    let additional_types = suggested_types(record_type, result);
    result
        .rows()
        .iter()
        .map(|row| reconcile(record_type, &additional_types, row))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tableless_types::{AttributeValue, RawRow, RawValue, SystemType, TypeRegistry};

    #[test]
    fn test_declared_columns_get_no_suggestion() {
        let record_type = RecordType::builder("Thing", Arc::new(TypeRegistry::new()))
            .column("count", "integer")
            .unwrap()
            .build();
        let mut row = RawRow::new();
        row.insert("count".to_string(), RawValue::from("3"));
        row.insert("note".to_string(), RawValue::from("4"));
        let result = ResultSet::from_rows(vec![row])
            .with_column_type("count", SystemType::Text.strategy())
            .with_column_type("note", SystemType::Integer.strategy());

        let suggestions = suggested_types(&record_type, &result);
        assert_eq!(suggestions.keys().collect::<Vec<_>>(), vec!["note"]);

        let rows = hydrate_all(&record_type, &result).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("count"), Some(&AttributeValue::Integer(3)));
        assert_eq!(rows[0].get("note"), Some(&AttributeValue::Integer(4)));
    }
}
