//! Built-in symbolic types and legacy aliases

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::coercion::{
    BooleanType, DateTimeType, DateType, DecimalType, IntegerType, PassthroughType,
    SharedStrategy, TextType, TimeType,
};

/// Symbolic types every registry starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemType {
    /// Free text
    Text,
    /// Short text; same strategy as text
    String,
    /// 64-bit integer
    Integer,
    /// Arbitrary precision decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Calendar date
    Date,
    /// Instant, timezone aware by default
    DateTime,
    /// Time of day on a fixed anchor date
    Time,
    /// Opaque passthrough
    Value,
}

impl SystemType {
    /// All built-in types
    pub const ALL: [SystemType; 9] = [
        Self::Text,
        Self::String,
        Self::Integer,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Time,
        Self::Value,
    ];

    /// Get the symbolic name used in declarations
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Value => "value",
        }
    }

    /// Build the undecorated strategy for this type
    pub fn strategy(&self) -> SharedStrategy {
        match self {
            Self::Text | Self::String => Arc::new(TextType),
            Self::Integer => Arc::new(IntegerType),
            Self::Decimal => Arc::new(DecimalType),
            Self::Boolean => Arc::new(BooleanType),
            Self::Date => Arc::new(DateType),
            Self::DateTime => Arc::new(DateTimeType),
            Self::Time => Arc::new(TimeType),
            Self::Value => Arc::new(PassthroughType),
        }
    }
}

/// Historical type names still found in declarations, with the name they
/// resolve to.
pub const LEGACY_ALIASES: &[(&str, &str)] = &[
    // Timestamp kept only for ordering; its value is never read back
    ("datetime_point", "integer"),
    // Generic placeholder with no casting requirement
    ("enumerable", "value"),
    ("date_time", "datetime"),
];

/// Translate a legacy alias to its current name; other names pass through.
pub fn canonical_type_name(name: &str) -> &str {
    LEGACY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, target)| *target)
}

/// Check if a name is a legacy alias
pub fn is_legacy_alias(name: &str) -> bool {
    LEGACY_ALIASES.iter().any(|(alias, _)| *alias == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::CoercionStrategy;

    #[test]
    fn test_alias_remap() {
        assert_eq!(canonical_type_name("datetime_point"), "integer");
        assert_eq!(canonical_type_name("enumerable"), "value");
        assert_eq!(canonical_type_name("date_time"), "datetime");
        assert_eq!(canonical_type_name("text"), "text");
        assert!(is_legacy_alias("datetime_point"));
        assert!(!is_legacy_alias("integer"));
    }

    #[test]
    fn test_strategy_names_match() {
        for ty in SystemType::ALL {
            if ty != SystemType::String {
                assert_eq!(ty.strategy().type_name(), ty.name());
            }
        }
    }
}
