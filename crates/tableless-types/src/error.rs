//! Errors raised while resolving types and casting values

use thiserror::Error;

/// Result type for a single coercion
pub type CoercionResult<T> = Result<T, CoercionError>;

/// A strategy could not turn a raw value into its canonical form.
///
/// Strategies do not know which field they are casting for; callers attach
/// the field name when they surface the failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// The raw string does not parse as the target type
    #[error("Cannot parse {raw:?} as {type_name}")]
    Unparseable { type_name: String, raw: String },

    /// The raw value kind has no conversion to the target type
    #[error("Cannot convert {kind} to {type_name}")]
    Unsupported { type_name: String, kind: String },

    /// The value parses but falls outside the target's range
    #[error("Value {raw} is out of range for {type_name}")]
    OutOfRange { type_name: String, raw: String },
}

impl CoercionError {
    /// Create an unparseable-input error
    pub fn unparseable(type_name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::Unparseable {
            type_name: type_name.into(),
            raw: raw.into(),
        }
    }

    /// Create an unsupported-kind error
    pub fn unsupported(type_name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
            kind: kind.into(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(type_name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::OutOfRange {
            type_name: type_name.into(),
            raw: raw.into(),
        }
    }
}

/// Static configuration problems. These abort type setup and are never
/// recovered from automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No strategy is registered under the symbolic name
    #[error("Unknown field type: {name}")]
    UnknownType { name: String },

    /// A strategy is already registered under the symbolic name
    #[error("Field type already registered: {name}")]
    DuplicateType { name: String },

    /// A field was referenced before it was declared
    #[error("Field '{field}' is not declared on {record_type}")]
    UndeclaredField { record_type: String, field: String },

    /// The reference timezone is not a valid UTC offset
    #[error("Invalid reference time zone: {value}")]
    InvalidTimeZone { value: String },
}
