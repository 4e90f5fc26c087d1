//! Coercion strategies
//!
//! A strategy turns a raw input into a canonical [`AttributeValue`] and back.
//! Strategies are stateless and shared between every field declared with the
//! same symbolic type, so casting must be a pure function of the input.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fmt;
use std::sync::Arc;

use crate::error::{CoercionError, CoercionResult};
use crate::raw::RawValue;
use crate::temporal::{self, ParsedInstant};
use crate::value::AttributeValue;

/// Cast/serialize pair behind a symbolic type
pub trait CoercionStrategy: fmt::Debug + Send + Sync {
    /// Symbolic name this strategy was built for (e.g. "integer")
    fn type_name(&self) -> &str;

    /// Convert a raw input into its canonical form
    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue>;

    /// Convert a canonical value into a raw value
    fn serialize(&self, value: &AttributeValue) -> RawValue {
        value.to_raw()
    }

    /// Whether naive temporal input is read in a reference timezone
    fn is_time_zone_aware(&self) -> bool {
        false
    }
}

/// Strategies are shared between declarations
pub type SharedStrategy = Arc<dyn CoercionStrategy>;

/// Strings that cast to `false`; every other non-blank string is `true`
const FALSE_VALUES: &[&str] = &["0", "f", "F", "false", "FALSE", "off", "OFF"];

/// Blank strings mean "no value" for every non-text strategy
fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextType;

impl CoercionStrategy for TextType {
    fn type_name(&self) -> &str {
        "text"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        Ok(match raw {
            RawValue::Null => AttributeValue::Null,
            RawValue::String(s) => AttributeValue::Text(s.clone()),
            RawValue::Boolean(true) => AttributeValue::from("t"),
            RawValue::Boolean(false) => AttributeValue::from("f"),
            other => AttributeValue::Text(other.to_string()),
        })
    }
}

/// 64-bit integer
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl IntegerType {
    fn parse(s: &str) -> CoercionResult<AttributeValue> {
        let Some(s) = non_blank(s) else {
            return Ok(AttributeValue::Null);
        };
        if let Ok(i) = s.parse::<i64>() {
            return Ok(AttributeValue::Integer(i));
        }
        // "1.9" truncates toward zero like a native float would
        let decimal = s
            .parse::<Decimal>()
            .map_err(|_| CoercionError::unparseable("integer", s))?;
        decimal
            .trunc()
            .to_i64()
            .map(AttributeValue::Integer)
            .ok_or_else(|| CoercionError::out_of_range("integer", s))
    }
}

impl CoercionStrategy for IntegerType {
    fn type_name(&self) -> &str {
        "integer"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match raw {
            RawValue::Null => Ok(AttributeValue::Null),
            RawValue::Boolean(b) => Ok(AttributeValue::Integer(i64::from(*b))),
            RawValue::Integer(i) => Ok(AttributeValue::Integer(*i)),
            RawValue::Float(x) => {
                let truncated = x.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Ok(AttributeValue::Integer(truncated as i64))
                } else {
                    Err(CoercionError::out_of_range("integer", x.to_string()))
                }
            }
            RawValue::Decimal(d) => d
                .trunc()
                .to_i64()
                .map(AttributeValue::Integer)
                .ok_or_else(|| CoercionError::out_of_range("integer", d.to_string())),
            RawValue::String(s) => Self::parse(s),
            // Instants order by their epoch seconds
            RawValue::DateTime(ndt) => Ok(AttributeValue::Integer(ndt.and_utc().timestamp())),
            RawValue::Timestamp(ts) => Ok(AttributeValue::Integer(ts.timestamp())),
            other => Err(CoercionError::unsupported("integer", other.kind())),
        }
    }
}

/// Arbitrary precision decimal
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalType;

impl CoercionStrategy for DecimalType {
    fn type_name(&self) -> &str {
        "decimal"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match raw {
            RawValue::Null => Ok(AttributeValue::Null),
            RawValue::Boolean(b) => Ok(AttributeValue::Decimal(Decimal::from(u8::from(*b)))),
            RawValue::Integer(i) => Ok(AttributeValue::Decimal(Decimal::from(*i))),
            RawValue::Float(x) => Decimal::try_from(*x)
                .map(AttributeValue::Decimal)
                .map_err(|_| CoercionError::out_of_range("decimal", x.to_string())),
            RawValue::Decimal(d) => Ok(AttributeValue::Decimal(*d)),
            RawValue::String(s) => {
                let Some(s) = non_blank(s) else {
                    return Ok(AttributeValue::Null);
                };
                s.parse::<Decimal>()
                    .or_else(|_| Decimal::from_scientific(s))
                    .map(AttributeValue::Decimal)
                    .map_err(|_| CoercionError::unparseable("decimal", s))
            }
            other => Err(CoercionError::unsupported("decimal", other.kind())),
        }
    }
}

/// Boolean
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl CoercionStrategy for BooleanType {
    fn type_name(&self) -> &str {
        "boolean"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        Ok(match raw {
            RawValue::Null => AttributeValue::Null,
            RawValue::Boolean(b) => AttributeValue::Boolean(*b),
            RawValue::Integer(i) => AttributeValue::Boolean(*i != 0),
            RawValue::Float(x) => AttributeValue::Boolean(*x != 0.0),
            RawValue::Decimal(d) => AttributeValue::Boolean(!d.is_zero()),
            RawValue::String(s) => {
                if s.is_empty() {
                    AttributeValue::Null
                } else {
                    AttributeValue::Boolean(!FALSE_VALUES.contains(&s.as_str()))
                }
            }
            _ => AttributeValue::Boolean(true),
        })
    }
}

/// Calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct DateType;

impl CoercionStrategy for DateType {
    fn type_name(&self) -> &str {
        "date"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match raw {
            RawValue::Null => Ok(AttributeValue::Null),
            RawValue::Date(d) => Ok(AttributeValue::Date(*d)),
            RawValue::DateTime(ndt) => Ok(AttributeValue::Date(ndt.date())),
            RawValue::Timestamp(ts) => Ok(AttributeValue::Date(ts.date_naive())),
            RawValue::String(s) => {
                let Some(s) = non_blank(s) else {
                    return Ok(AttributeValue::Null);
                };
                if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                    return Ok(AttributeValue::Date(date));
                }
                match temporal::parse_datetime(s) {
                    Some(ParsedInstant::Naive(ndt)) => Ok(AttributeValue::Date(ndt.date())),
                    Some(ParsedInstant::Zoned(dt)) => Ok(AttributeValue::Date(dt.date_naive())),
                    None => Err(CoercionError::unparseable("date", s)),
                }
            }
            other => Err(CoercionError::unsupported("date", other.kind())),
        }
    }
}

/// Datetime. Naive input is read as UTC; wrap in
/// [`TimeZoneConverter`](crate::temporal::TimeZoneConverter) to read it in a
/// reference timezone instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeType;

impl CoercionStrategy for DateTimeType {
    fn type_name(&self) -> &str {
        "datetime"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match raw {
            RawValue::Null => Ok(AttributeValue::Null),
            RawValue::Timestamp(ts) => Ok(AttributeValue::DateTime(*ts)),
            RawValue::DateTime(ndt) => Ok(AttributeValue::DateTime(ndt.and_utc())),
            RawValue::Date(d) => Ok(AttributeValue::DateTime(
                d.and_time(NaiveTime::MIN).and_utc(),
            )),
            RawValue::String(s) => {
                let Some(s) = non_blank(s) else {
                    return Ok(AttributeValue::Null);
                };
                temporal::parse_datetime(s)
                    .map(|parsed| AttributeValue::DateTime(parsed.to_utc()))
                    .ok_or_else(|| CoercionError::unparseable("datetime", s))
            }
            other => Err(CoercionError::unsupported("datetime", other.kind())),
        }
    }
}

/// Time of day, anchored to 2000-01-01 in UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeType;

impl CoercionStrategy for TimeType {
    fn type_name(&self) -> &str {
        "time"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match raw {
            RawValue::Null => Ok(AttributeValue::Null),
            RawValue::Time(t) => Ok(AttributeValue::Time(temporal::anchor_time(*t))),
            RawValue::DateTime(ndt) => Ok(AttributeValue::Time(temporal::anchor_time(ndt.time()))),
            RawValue::Timestamp(ts) => Ok(AttributeValue::Time(temporal::anchor_time(ts.time()))),
            RawValue::String(s) => {
                let Some(s) = non_blank(s) else {
                    return Ok(AttributeValue::Null);
                };
                temporal::parse_time(s)
                    .map(|parsed| AttributeValue::Time(parsed.to_utc()))
                    .ok_or_else(|| CoercionError::unparseable("time", s))
            }
            other => Err(CoercionError::unsupported("time", other.kind())),
        }
    }
}

/// Opaque passthrough: keeps the raw value's own shape without parsing.
///
/// Used for undeclared row columns and for retired type names that must
/// still declare cleanly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughType;

impl CoercionStrategy for PassthroughType {
    fn type_name(&self) -> &str {
        "value"
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        Ok(AttributeValue::from_raw(raw))
    }
}
