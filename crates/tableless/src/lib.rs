//! Record types with typed columns and no backing table
//!
//! This crate lets a caller declare a record type as a list of typed columns
//! and build instances of it either from explicit values or from the rows of
//! an arbitrary query, with the same coercion on both paths.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tableless::{Record, RecordType, TypeConfig, TypeRegistry};
//!
//! let registry = TypeRegistry::from_config(&TypeConfig::new().with_time_zone("-05:00"))?;
//! let contract = RecordType::builder("Contract", Arc::new(registry))
//!     .column("title", "text")?
//!     .column("signed_at", "datetime")?
//!     .build();
//!
//! let record = Record::new(&contract, [("signed_at", "2019-01-01 00:30:00")])?;
//! assert_eq!(
//!     record.read_attribute("signed_at")?.to_string(),
//!     "2019-01-01T05:30:00+00:00"
//! );
//! # Ok::<(), tableless::Error>(())
//! ```

// Re-export all public APIs from internal crates
pub use tableless_hydrate as hydrate;
pub use tableless_model as model;
pub use tableless_types as types;

mod error;
mod record;

// Convenience re-exports
pub use error::{Error, Result};
pub use record::Record;
pub use tableless_hydrate::{AttributeError, AttributeSet, ColumnTypes};
pub use tableless_model::{
    ColumnOptions, LabelDeriver, NullSchemaSource, QuerySource, RecordType, RecordTypeBuilder,
    ResultSet, SchemaSource,
};
pub use tableless_types::{
    AttributeValue, CoercionError, ConfigurationError, RawRow, RawValue, TypeConfig, TypeRegistry,
};
