//! UTC instants with the `isot` string form used in Roman metadata.
//!
//! `isot` is `YYYY-MM-DDTHH:MM:SS.sss` with no zone suffix; every time
//! stored in a data product is UTC.

use crate::{Error, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const ISOT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const ISOT_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(DateTime<Utc>);

impl Time {
    /// Wraps an existing UTC datetime.
    #[must_use]
    pub const fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Builds a time from calendar components, or `None` if they are out of range.
    #[must_use]
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self)
    }

    /// 2020-01-01T00:00:00 UTC, the date synthesized products carry.
    #[must_use]
    pub fn reference_epoch() -> Self {
        Self(
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    /// Parses an `isot` string (`2020-01-01T00:00:00.0`) or an RFC 3339 string.
    pub fn parse(s: &str) -> Result<Self> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, ISOT_PARSE_FORMAT) {
            return Ok(Self(naive.and_utc()));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidTime {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns the underlying datetime.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Canonical `isot` representation with millisecond precision.
    #[must_use]
    pub fn isot(&self) -> String {
        self.0.format(ISOT_FORMAT).to_string()
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISOT_FORMAT))
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.isot())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
