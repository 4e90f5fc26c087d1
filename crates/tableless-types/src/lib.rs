//! Field type system for tableless records
//!
//! This crate defines:
//! - Raw input values (strings, nil, native driver values)
//! - Canonical attribute values
//! - Coercion strategies for each symbolic type (text, integer, datetime, ...)
//! - Timezone decoration for time-aware strategies
//! - The type registry with its legacy alias table

pub mod coercion;
pub mod config;
pub mod error;
pub mod raw;
pub mod registry;
pub mod system_types;
pub mod temporal;
pub mod value;

pub use coercion::*;
pub use config::TypeConfig;
pub use error::*;
pub use raw::{RawRow, RawValue};
pub use registry::TypeRegistry;
pub use system_types::*;
pub use temporal::{ReferenceZone, TimeZoneConverter};
pub use value::AttributeValue;
