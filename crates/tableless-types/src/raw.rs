//! Raw input values
//!
//! A raw value is whatever a caller or a query driver hands over before any
//! coercion: nil, a string, or a native value already decoded by a driver.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One query result row: column name to raw value, in select order
pub type RawRow = IndexMap<String, RawValue>;

/// An untyped input value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawValue {
    /// Missing value
    Null,
    /// Native boolean
    Boolean(bool),
    /// Native integer
    Integer(i64),
    /// Native float
    Float(f64),
    /// Native arbitrary precision decimal
    Decimal(Decimal),
    /// String as typed by a user or returned by a text protocol
    String(String),
    /// Native calendar date
    Date(NaiveDate),
    /// Native time of day without zone
    Time(NaiveTime),
    /// Native datetime without zone
    DateTime(NaiveDateTime),
    /// Native instant
    Timestamp(DateTime<Utc>),
}

impl RawValue {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Timestamp(_) => "timestamp",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Time(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.f")),
            Self::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for RawValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for RawValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for RawValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for RawValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// JSON rows arrive from drivers and fixtures. Arrays and objects have no
/// scalar form and are kept as their JSON text.
impl From<serde_json::Value> for RawValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => n.as_f64().map_or_else(|| Self::String(n.to_string()), Self::Float),
            },
            serde_json::Value::String(s) => Self::String(s),
            other => Self::String(other.to_string()),
        }
    }
}
