//! Attribute hydration for tableless records
//!
//! Both construction paths end here:
//! - [`materialize`] builds the attribute set of a new instance from explicit
//!   input values and declared defaults
//! - [`reconcile`] builds the attribute set of an instance loaded from a query
//!   row, keeping the declared strategies for declared columns
//! - [`hydrate_all`] runs reconciliation over a whole result set

pub mod attributes;
pub mod error;
pub mod hydrator;
pub mod materialize;
pub mod reconcile;

pub use attributes::AttributeSet;
pub use error::{AttributeError, HydrateResult};
pub use hydrator::{hydrate_all, suggested_types};
pub use materialize::{cast_attribute, materialize};
pub use reconcile::{ColumnTypes, reconcile};
