//! Error type for the public API

use tableless_hydrate::AttributeError;
use tableless_types::ConfigurationError;
use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by record types and records
#[derive(Debug, Error)]
pub enum Error {
    /// Type setup failed
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An attribute could not be built, read or written
    #[error(transparent)]
    Attribute(#[from] AttributeError),

    /// The external query source failed
    #[error(transparent)]
    Query(#[from] anyhow::Error),
}

impl Error {
    /// Check if this is an unknown attribute error
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::Attribute(AttributeError::UnknownField { .. }))
    }
}
