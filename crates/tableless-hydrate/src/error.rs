//! Errors raised while building attribute sets

use tableless_types::{CoercionError, RawValue};
use thiserror::Error;

/// Result type for hydration operations
pub type HydrateResult<T> = Result<T, AttributeError>;

/// Errors that can occur while materializing or reconciling attributes
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// Explicit input names a field the record type does not declare
    #[error("unknown attribute '{field}' for {record_type}")]
    UnknownField { field: String, record_type: String },

    /// A field's strategy rejected its raw value
    #[error("Cannot cast {raw} for attribute '{field}': {source}")]
    Cast {
        field: String,
        raw: String,
        #[source]
        source: CoercionError,
    },
}

impl AttributeError {
    /// Create an unknown field error
    pub fn unknown_field(field: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
            record_type: record_type.into(),
        }
    }

    /// Attach the field name and raw value to a coercion failure
    pub fn cast(field: impl Into<String>, raw: &RawValue, source: CoercionError) -> Self {
        Self::Cast {
            field: field.into(),
            raw: format!("{raw:?}"),
            source,
        }
    }

    /// Name of the field the error is about
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownField { field, .. } | Self::Cast { field, .. } => field,
        }
    }
}
