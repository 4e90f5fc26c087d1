//! Temporal parsing and timezone decoration

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc,
};
use chrono_tz::Tz;
use std::fmt;

use crate::coercion::{CoercionStrategy, SharedStrategy};
use crate::error::CoercionResult;
use crate::raw::RawValue;
use crate::system_types::SystemType;
use crate::value::AttributeValue;

/// Date every time-of-day value is attached to
pub const TIME_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid time anchor date"),
};

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Timezone in which naive temporal input is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceZone {
    /// Constant UTC offset
    Fixed(FixedOffset),
    /// IANA zone with its daylight saving rules, e.g. `America/New_York`
    Named(Tz),
}

impl ReferenceZone {
    /// UTC
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Parse a fixed offset (`-05:00`, `+0530`, `Z`) or an IANA zone name
    pub fn parse(value: &str) -> Option<Self> {
        if let Some(offset) = parse_offset(value) {
            return Some(Self::Fixed(offset));
        }
        value.trim().parse::<Tz>().ok().map(Self::Named)
    }

    /// Read a naive datetime in this zone and normalize it to UTC.
    ///
    /// Ambiguous wall-clock times resolve to the earlier instant. Times
    /// skipped by a daylight saving jump move forward by the gap.
    pub fn to_utc(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Fixed(offset) => resolve_local(offset, local),
            Self::Named(tz) => resolve_local(tz, local),
        }
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn resolve_local<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    let resolved = match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => zone
            .from_local_datetime(&local.checked_add_signed(TimeDelta::hours(1))?)
            .earliest()?,
    };
    Some(resolved.with_timezone(&Utc))
}

/// A parsed instant, with or without an explicit offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedInstant {
    /// No offset in the input; the reader decides the zone
    Naive(NaiveDateTime),
    /// Offset given in the input
    Zoned(DateTime<FixedOffset>),
}

impl ParsedInstant {
    /// Normalize to UTC, reading naive values as UTC
    pub fn to_utc(self) -> DateTime<Utc> {
        match self {
            Self::Naive(ndt) => ndt.and_utc(),
            Self::Zoned(dt) => dt.with_timezone(&Utc),
        }
    }

    /// Normalize to UTC, reading naive values in `zone`
    pub fn to_utc_in(self, zone: &ReferenceZone) -> Option<DateTime<Utc>> {
        match self {
            Self::Naive(ndt) => zone.to_utc(ndt),
            Self::Zoned(dt) => Some(dt.with_timezone(&Utc)),
        }
    }
}

/// Parse a datetime string. Date-only strings resolve to midnight.
pub fn parse_datetime(s: &str) -> Option<ParsedInstant> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(ParsedInstant::Zoned(dt));
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(ParsedInstant::Zoned(dt));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(ParsedInstant::Naive(ndt));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| ParsedInstant::Naive(date.and_time(NaiveTime::MIN)))
}

/// Parse a time-of-day string onto the anchor date.
///
/// Full datetime strings keep their time and offset; the date is replaced.
pub fn parse_time(s: &str) -> Option<ParsedInstant> {
    let s = s.trim();
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(s, format) {
            return Some(ParsedInstant::Naive(TIME_ANCHOR_DATE.and_time(time)));
        }
    }
    match parse_datetime(s)? {
        ParsedInstant::Naive(ndt) => {
            Some(ParsedInstant::Naive(TIME_ANCHOR_DATE.and_time(ndt.time())))
        }
        ParsedInstant::Zoned(dt) => dt
            .offset()
            .from_local_datetime(&TIME_ANCHOR_DATE.and_time(dt.time()))
            .single()
            .map(ParsedInstant::Zoned),
    }
}

/// Attach a time of day to the anchor date in UTC
pub fn anchor_time(time: NaiveTime) -> DateTime<Utc> {
    TIME_ANCHOR_DATE.and_time(time).and_utc()
}

/// Parse a UTC offset such as `-05:00`, `+0530`, `+02`, `Z` or `UTC`.
///
/// Hours must lie in `0..=23` and minutes in `0..60`.
pub fn parse_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("utc") || value == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }
    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None if (1..=2).contains(&rest.len()) => (rest, "00"),
        None => return None,
    };
    if !(1..=2).contains(&hours.len()) || minutes.len() != 2 {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Decorates a temporal strategy so that naive input is read in a
/// reference timezone before the inner strategy normalizes it to UTC.
///
/// The decorator accepts exactly what the inner strategy accepts. Input
/// that already carries an offset, native instants, and input the inner
/// strategy would reject all pass through unchanged.
#[derive(Debug, Clone)]
pub struct TimeZoneConverter {
    inner: SharedStrategy,
    zone: ReferenceZone,
}

impl TimeZoneConverter {
    /// Wrap `inner` so naive input is read in `zone`
    pub fn new(inner: SharedStrategy, zone: ReferenceZone) -> Self {
        Self { inner, zone }
    }

    fn localize(&self, raw: &RawValue) -> Option<RawValue> {
        let parsed = if self.inner.type_name() == SystemType::Time.name() {
            match raw {
                RawValue::String(s) => parse_time(s)?,
                RawValue::DateTime(ndt) => {
                    ParsedInstant::Naive(TIME_ANCHOR_DATE.and_time(ndt.time()))
                }
                RawValue::Time(t) => ParsedInstant::Naive(TIME_ANCHOR_DATE.and_time(*t)),
                _ => return None,
            }
        } else {
            match raw {
                RawValue::String(s) => parse_datetime(s)?,
                RawValue::DateTime(ndt) => ParsedInstant::Naive(*ndt),
                RawValue::Date(d) => ParsedInstant::Naive(d.and_time(NaiveTime::MIN)),
                _ => return None,
            }
        };
        parsed.to_utc_in(&self.zone).map(RawValue::Timestamp)
    }
}

impl CoercionStrategy for TimeZoneConverter {
    fn type_name(&self) -> &str {
        self.inner.type_name()
    }

    fn cast(&self, raw: &RawValue) -> CoercionResult<AttributeValue> {
        match self.localize(raw) {
            Some(localized) => self.inner.cast(&localized),
            None => self.inner.cast(raw),
        }
    }

    fn serialize(&self, value: &AttributeValue) -> RawValue {
        self.inner.serialize(value)
    }

    fn is_time_zone_aware(&self) -> bool {
        true
    }
}
