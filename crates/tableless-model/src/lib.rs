//! Record type model for tableless records
//!
//! This crate provides:
//! - Field declarations and the ordered declaration table
//! - Record types built and frozen through a builder, with inheritance
//! - The schema source abstraction and the null schema source
//! - Human-facing attribute labels
//! - The query source boundary used to hydrate records from arbitrary queries

pub mod declaration;
pub mod label;
pub mod null_schema;
pub mod query;
pub mod record_type;
pub mod schema;

pub use declaration::*;
pub use label::*;
pub use null_schema::*;
pub use query::*;
pub use record_type::*;
pub use schema::*;
