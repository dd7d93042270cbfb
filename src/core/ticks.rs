//! Tick-count timestamps.
//!
//! A tick is 100 nanoseconds. Tick counts are measured from
//! 0001-01-01T00:00:00Z, which is the representation build callers hand us
//! and the one the generated `System.DateTime` constructors consume.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ticks between 0001-01-01T00:00:00Z and the Unix epoch.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Largest tick count `System.DateTime` accepts (9999-12-31T23:59:59.9999999Z).
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// A UTC timestamp expressed as a tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticks(pub i64);

impl Ticks {
    /// Raw tick count.
    pub fn get(self) -> i64 {
        self.0
    }

    /// Convert a UTC timestamp to ticks, truncating below 100ns.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        let secs = dt.timestamp();
        let sub = i64::from(dt.timestamp_subsec_nanos()) / 100;
        Ticks(UNIX_EPOCH_TICKS + secs * TICKS_PER_SECOND + sub)
    }

    /// Convert back to a UTC timestamp.
    ///
    /// Returns `None` for tick counts chrono cannot represent.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let since_epoch = self.0.checked_sub(UNIX_EPOCH_TICKS)?;
        let secs = since_epoch.div_euclid(TICKS_PER_SECOND);
        let nanos = since_epoch.rem_euclid(TICKS_PER_SECOND) * 100;
        DateTime::from_timestamp(secs, nanos as u32)
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a raw tick value is not an integer in
/// `0..=MAX_TICKS`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tick count '{0}', expected an integer between 0 and {max}", max = MAX_TICKS)]
pub struct TicksParseError(pub String);

impl FromStr for Ticks {
    type Err = TicksParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .filter(|ticks| (0..=MAX_TICKS).contains(ticks))
            .map(Ticks)
            .ok_or_else(|| TicksParseError(s.to_string()))
    }
}
