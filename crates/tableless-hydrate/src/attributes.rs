//! Attribute sets

use indexmap::IndexMap;
use serde::Serialize;
use tableless_types::AttributeValue;

/// Coerced attribute values of one instance, in attribute order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: IndexMap<String, AttributeValue>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: IndexMap::with_capacity(capacity),
        }
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name)
    }

    /// Set an attribute value, keeping the position of an existing name
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.values.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Attribute names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, AttributeValue> {
        self.values
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
