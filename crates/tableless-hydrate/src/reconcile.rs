//! Row reconciliation
//!
//! A query row may mix declared columns with columns the record type knows
//! nothing about. Declared columns are always cast with their declared
//! strategy, whatever the store suggests for them. Only undeclared columns
//! fall back to a suggested strategy, or to passthrough when there is none.

use crate::attributes::AttributeSet;
use crate::error::{AttributeError, HydrateResult};
use crate::materialize::cast_attribute;
use indexmap::IndexMap;
use log::{debug, trace};
use tableless_model::RecordType;
use tableless_types::{CoercionStrategy, PassthroughType, RawRow, SharedStrategy};

/// Strategies suggested for query columns, keyed by column name
pub type ColumnTypes = IndexMap<String, SharedStrategy>;

/// Build the attribute set of an instance loaded from `row`.
///
/// Declared fields come first in declaration order, each taken from the row
/// or from its default when the row lacks the column. Undeclared row columns
/// follow in row order. Unrecognized columns never cause an error.
pub fn reconcile(
    record_type: &RecordType,
    additional_types: &ColumnTypes,
    row: &RawRow,
) -> HydrateResult<AttributeSet> {
    let fields = record_type.fields();
    let mut attributes = AttributeSet::with_capacity(fields.len() + row.len());

    for declaration in fields.iter() {
        let name = declaration.name();
        if additional_types.contains_key(name) {
            debug!(
                "{}: ignoring suggested type for declared column '{}'",
                record_type.name(),
                name
            );
        }
        let raw = match row.get(name) {
            Some(raw) => {
                trace!(
                    "{}: column '{}' uses declared strategy {}",
                    record_type.name(),
                    name,
                    declaration.strategy().type_name()
                );
                raw
            }
            None => declaration.default(),
        };
        attributes.set(name, cast_attribute(declaration, raw)?);
    }

    for (column, raw) in row {
        if fields.contains(column) {
            continue;
        }
        let value = match additional_types.get(column) {
            Some(strategy) => {
                trace!(
                    "{}: column '{}' uses suggested strategy {}",
                    record_type.name(),
                    column,
                    strategy.type_name()
                );
                strategy.cast(raw)
            }
            None => {
                trace!("{}: column '{}' uses passthrough", record_type.name(), column);
                PassthroughType.cast(raw)
            }
        };
        let value = value.map_err(|source| AttributeError::cast(column.as_str(), raw, source))?;
        attributes.set(column.as_str(), value);
    }

    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use tableless_types::{AttributeValue, RawValue, SystemType, TypeRegistry};

    fn thing() -> Arc<RecordType> {
        RecordType::builder("Thing", Arc::new(TypeRegistry::new()))
            .column("count", "integer")
            .unwrap()
            .column("label", "text")
            .unwrap()
            .build()
    }

    fn row(pairs: &[(&str, RawValue)]) -> RawRow {
        pairs
            .iter()
            .map(|(name, value)| ((*name).to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_declared_strategy_wins_over_suggestion() {
        let mut suggestions = ColumnTypes::new();
        suggestions.insert("count".to_string(), SystemType::Text.strategy());
        let input = row(&[("count", RawValue::from("12"))]);
        let attributes = reconcile(&thing(), &suggestions, &input).unwrap();
        assert_eq!(attributes.get("count"), Some(&AttributeValue::Integer(12)));
    }

    #[test]
    fn test_undeclared_columns_follow_declared_ones() {
        let input = row(&[
            ("extra", RawValue::from("x")),
            ("label", RawValue::from("l")),
            ("more", RawValue::from(2i64)),
        ]);
        let attributes = reconcile(&thing(), &ColumnTypes::new(), &input).unwrap();
        assert_eq!(
            attributes.names().collect::<Vec<_>>(),
            vec!["count", "label", "extra", "more"]
        );
        assert_eq!(attributes.get("count"), Some(&AttributeValue::Null));
        assert_eq!(attributes.get("extra"), Some(&AttributeValue::from("x")));
        assert_eq!(attributes.get("more"), Some(&AttributeValue::Integer(2)));
    }

    #[test]
    fn test_suggestion_applies_to_undeclared_column() {
        let mut suggestions = ColumnTypes::new();
        suggestions.insert("total".to_string(), SystemType::Integer.strategy());
        let input = row(&[("total", RawValue::from("7"))]);
        let attributes = reconcile(&thing(), &suggestions, &input).unwrap();
        assert_eq!(attributes.get("total"), Some(&AttributeValue::Integer(7)));
    }

    #[test]
    fn test_cast_failure_propagates() {
        let input = row(&[("count", RawValue::from("x1"))]);
        let err = reconcile(&thing(), &ColumnTypes::new(), &input).unwrap_err();
        assert_eq!(err.field(), "count");
    }
}
