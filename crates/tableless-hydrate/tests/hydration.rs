//! Integration tests for both construction paths

use chrono::{NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::sync::Arc;
use tableless_hydrate::{AttributeError, ColumnTypes, hydrate_all, materialize, reconcile};
use tableless_model::{ColumnOptions, RecordType, ResultSet};
use tableless_types::{
    AttributeValue, CoercionResult, CoercionStrategy, RawRow, RawValue, SharedStrategy, SystemType,
    TypeConfig, TypeRegistry,
};

fn row(pairs: &[(&str, RawValue)]) -> RawRow {
    pairs
        .iter()
        .map(|(name, value)| ((*name).to_string(), value.clone()))
        .collect()
}

fn contract() -> Arc<RecordType> {
    let config = TypeConfig::new().with_time_zone("-05:00");
    let registry = Arc::new(TypeRegistry::from_config(&config).unwrap());
    RecordType::builder("Contract", registry)
        .column("signed_at", "datetime")
        .unwrap()
        .column("title", "text")
        .unwrap()
        .column_with("pages", "integer", ColumnOptions::new().with_default("1"))
        .unwrap()
        .build()
}

// === Both paths ===

#[test]
fn test_datetime_is_not_downgraded_by_reconciliation() {
    let record_type = contract();
    let raw = RawValue::from("2019-01-01 00:30:00");
    let expected = AttributeValue::DateTime(Utc.with_ymd_and_hms(2019, 1, 1, 5, 30, 0).unwrap());

    let built = materialize(&record_type, &row(&[("signed_at", raw.clone())])).unwrap();
    let loaded = reconcile(&record_type, &ColumnTypes::new(), &row(&[("signed_at", raw)])).unwrap();

    assert_eq!(built.get("signed_at"), Some(&expected));
    assert_eq!(loaded.get("signed_at"), Some(&expected));
    assert_eq!(built, loaded);
}

#[test]
fn test_datetime_survives_a_text_suggestion() {
    let record_type = contract();
    let mut suggestions = ColumnTypes::new();
    suggestions.insert("signed_at".to_string(), SystemType::Text.strategy());

    let loaded = reconcile(
        &record_type,
        &suggestions,
        &row(&[("signed_at", RawValue::from("2019-01-01 00:30:00"))]),
    )
    .unwrap();
    assert_eq!(
        loaded.get("signed_at"),
        Some(&AttributeValue::DateTime(Utc.with_ymd_and_hms(2019, 1, 1, 5, 30, 0).unwrap()))
    );
}

#[test]
fn test_undeclared_column_uses_fallback() {
    let record_type = contract();
    let loaded = reconcile(
        &record_type,
        &ColumnTypes::new(),
        &row(&[
            ("title", RawValue::from("Lease")),
            ("model_description", RawValue::from("Something")),
        ]),
    )
    .unwrap();
    assert_eq!(loaded.get("model_description"), Some(&AttributeValue::from("Something")));
    assert_eq!(loaded.get("title"), Some(&AttributeValue::from("Lease")));
}

#[test]
fn test_unknown_explicit_field() {
    let err = materialize(&contract(), &row(&[("y", RawValue::from(1i64))])).unwrap_err();
    assert_eq!(
        err,
        AttributeError::UnknownField {
            field: "y".to_string(),
            record_type: "Contract".to_string(),
        }
    );
}

#[test]
fn test_native_driver_values() {
    let record_type = contract();
    let naive = NaiveDate::from_ymd_opt(2019, 1, 1)
        .unwrap()
        .and_hms_opt(0, 30, 0)
        .unwrap();
    let loaded = reconcile(
        &record_type,
        &ColumnTypes::new(),
        &row(&[("signed_at", RawValue::from(naive)), ("pages", RawValue::from(12i64))]),
    )
    .unwrap();
    assert_eq!(
        loaded.get("signed_at"),
        Some(&AttributeValue::DateTime(Utc.with_ymd_and_hms(2019, 1, 1, 5, 30, 0).unwrap()))
    );
    assert_eq!(loaded.get("pages"), Some(&AttributeValue::Integer(12)));
}

#[test]
fn test_hydrate_result_set() {
    let record_type = contract();
    let result = ResultSet::from_rows(vec![
        row(&[("title", RawValue::from("A")), ("pages", RawValue::from("2"))]),
        row(&[("title", RawValue::from("B")), ("pages", RawValue::Null)]),
    ]);
    let rows = hydrate_all(&record_type, &result).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("pages"), Some(&AttributeValue::Integer(2)));
    assert_eq!(rows[1].get("pages"), Some(&AttributeValue::Null));
    assert_eq!(rows[1].get("title"), Some(&AttributeValue::from("B")));
}

// === Decoration ===

/// Wraps a strategy and upper-cases any text it produces
#[derive(Debug)]
struct Shouting(SharedStrategy);

impl CoercionStrategy for Shouting {
    fn type_name(&self) -> &str {
        self.0.type_name()
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        Ok(match self.0.cast(raw)? {
            AttributeValue::Text(s) => AttributeValue::Text(s.to_uppercase()),
            other => other,
        })
    }
}

#[test]
fn test_decorated_field_on_both_paths() {
    let record_type = RecordType::builder("Memo", Arc::new(TypeRegistry::new()))
        .column("subject", "text")
        .unwrap()
        .decorate("subject", |inner| Arc::new(Shouting(inner)))
        .unwrap()
        .build();
    let expected = AttributeValue::from("QUARTERLY REPORT");

    let built = materialize(&record_type, &row(&[("subject", RawValue::from("quarterly report"))]))
        .unwrap();

    let mut suggestions = ColumnTypes::new();
    suggestions.insert("subject".to_string(), SystemType::Text.strategy());
    let loaded = reconcile(
        &record_type,
        &suggestions,
        &row(&[("subject", RawValue::from("quarterly report"))]),
    )
    .unwrap();

    assert_eq!(built.get("subject"), Some(&expected));
    assert_eq!(loaded.get("subject"), Some(&expected));
    assert_eq!(built, loaded);
}

// === Properties ===

proptest! {
    #[test]
    fn test_materialize_is_idempotent(title in ".*", pages in any::<i64>()) {
        let record_type = contract();
        let inputs = row(&[("title", RawValue::from(title)), ("pages", RawValue::from(pages))]);
        let first = materialize(&record_type, &inputs).unwrap();
        let second = materialize(&record_type, &inputs).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_defaults_apply_when_absent(title in ".*") {
        let record_type = contract();
        let inputs = row(&[("title", RawValue::from(title.clone()))]);
        let built = materialize(&record_type, &inputs).unwrap();
        prop_assert_eq!(built.get("pages"), Some(&AttributeValue::Integer(1)));
        prop_assert_eq!(built.get("signed_at"), Some(&AttributeValue::Null));
        prop_assert_eq!(built.get("title"), Some(&AttributeValue::Text(title)));
    }
}
