//! Record instances

use crate::error::Result;
use log::debug;
use std::sync::Arc;
use tableless_hydrate::{
    AttributeError, AttributeSet, ColumnTypes, cast_attribute, hydrate_all, materialize, reconcile,
};
use tableless_model::{QuerySource, RecordType};
use tableless_types::{AttributeValue, RawRow, RawValue};

/// One instance of a record type
#[derive(Debug, Clone)]
pub struct Record {
    record_type: Arc<RecordType>,
    attributes: AttributeSet,
}

impl Record {
    /// Build a new instance from explicit values; missing fields take their
    /// declared defaults
    pub fn new<I, K, V>(record_type: &Arc<RecordType>, inputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        let inputs: RawRow = inputs
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        let attributes = materialize(record_type, &inputs)?;
        Ok(Self {
            record_type: Arc::clone(record_type),
            attributes,
        })
    }

    /// Load an instance from one query row
    pub fn instantiate(
        record_type: &Arc<RecordType>,
        row: &RawRow,
        additional_types: &ColumnTypes,
    ) -> Result<Self> {
        let attributes = reconcile(record_type, additional_types, row)?;
        Ok(Self {
            record_type: Arc::clone(record_type),
            attributes,
        })
    }

    /// Run `sql` against `source` and load one instance per returned row
    pub fn find_by_sql(
        record_type: &Arc<RecordType>,
        source: &dyn QuerySource,
        sql: &str,
        binds: &[RawValue],
    ) -> Result<Vec<Self>> {
        let result = source.select_all(sql, binds)?;
        debug!(
            "find_by_sql for {} returned {} row(s) with columns {:?}",
            record_type.name(),
            result.len(),
            result.columns()
        );
        let records = hydrate_all(record_type, &result)?
            .into_iter()
            .map(|attributes| Self {
                record_type: Arc::clone(record_type),
                attributes,
            })
            .collect();
        Ok(records)
    }

    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    /// Attribute names of this instance, query-only columns included
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.names().collect()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Read an attribute, failing when the instance has no such attribute
    pub fn read_attribute(&self, name: &str) -> Result<&AttributeValue> {
        self.attributes
            .get(name)
            .ok_or_else(|| AttributeError::unknown_field(name, self.record_type.name()).into())
    }

    /// Cast `raw` through the declared strategy and store it
    pub fn write_attribute(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<()> {
        let declaration = self
            .record_type
            .field(name)
            .ok_or_else(|| AttributeError::unknown_field(name, self.record_type.name()))?;
        let value = cast_attribute(declaration, &raw.into())?;
        self.attributes.set(name, value);
        Ok(())
    }

    /// Predicate view of an attribute: booleans by value, numbers when
    /// non-zero, text when not blank
    pub fn query_attribute(&self, name: &str) -> Result<bool> {
        Ok(self.read_attribute(name)?.is_truthy())
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.record_type, &other.record_type) && self.attributes == other.attributes
    }
}
