//! Canonical attribute values
//!
//! Every strategy casts into this enum, so two attribute sets built from the
//! same logical data compare equal no matter how the raw input looked.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::raw::RawValue;
use crate::temporal;

/// The in-memory value of one attribute after casting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
    /// Null value (missing or explicitly nil)
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// Floating point value (only produced by passthrough)
    Float(f64),
    /// Arbitrary precision decimal
    Decimal(Decimal),
    /// Text value
    Text(String),
    /// Calendar date
    Date(NaiveDate),
    /// Instant normalized to UTC
    DateTime(DateTime<Utc>),
    /// Time of day, as a UTC instant on the 2000-01-01 anchor date
    Time(DateTime<Utc>),
}

impl AttributeValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as Boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as Integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as Decimal
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            Self::Integer(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    /// Try to get as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as Date
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get as an instant (datetime or anchored time)
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::DateTime(dt) | Self::Time(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Truthiness used for generated predicates.
    ///
    /// Booleans answer with their value, numbers are true when non-zero,
    /// text is true when it is not blank, temporal values are always true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(x) => *x != 0.0,
            Self::Decimal(d) => !d.is_zero(),
            Self::Text(s) => !s.trim().is_empty(),
            Self::Date(_) | Self::DateTime(_) | Self::Time(_) => true,
        }
    }

    /// Structural conversion back to a raw value.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Self::Null => RawValue::Null,
            Self::Boolean(b) => RawValue::Boolean(*b),
            Self::Integer(i) => RawValue::Integer(*i),
            Self::Float(x) => RawValue::Float(*x),
            Self::Decimal(d) => RawValue::Decimal(*d),
            Self::Text(s) => RawValue::String(s.clone()),
            Self::Date(d) => RawValue::Date(*d),
            Self::DateTime(dt) => RawValue::Timestamp(*dt),
            Self::Time(t) => RawValue::Time(t.time()),
        }
    }

    /// Structural conversion from a raw value, without parsing strings.
    pub fn from_raw(raw: &RawValue) -> Self {
        match raw {
            RawValue::Null => Self::Null,
            RawValue::Boolean(b) => Self::Boolean(*b),
            RawValue::Integer(i) => Self::Integer(*i),
            RawValue::Float(x) => Self::Float(*x),
            RawValue::Decimal(d) => Self::Decimal(*d),
            RawValue::String(s) => Self::Text(s.clone()),
            RawValue::Date(d) => Self::Date(*d),
            RawValue::Time(t) => Self::Time(temporal::anchor_time(*t)),
            RawValue::DateTime(dt) => Self::DateTime(dt.and_utc()),
            RawValue::Timestamp(ts) => Self::DateTime(*ts),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Decimal> for AttributeValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}
