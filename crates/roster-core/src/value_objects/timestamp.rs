//! Platform timestamps
//!
//! The platform reports Unix seconds, but some records arrive shifted down by
//! exactly one billion seconds. Anything below that threshold is shifted back
//! before interpretation. Zero means "unknown".

use chrono::{DateTime, Utc};
use std::fmt;

/// Raw values below this are shifted by the same amount
pub const PLATFORM_EPOCH_SHIFT: i64 = 1_000_000_000;

/// Calendar date format used in every date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalized Unix timestamp in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpochSeconds(i64);

impl EpochSeconds {
    /// Normalize a raw platform timestamp; `None` when unknown
    pub fn normalize(raw: i64) -> Option<Self> {
        if raw <= 0 {
            return None;
        }
        let secs = if raw < PLATFORM_EPOCH_SHIFT {
            raw + PLATFORM_EPOCH_SHIFT
        } else {
            raw
        };
        Some(Self(secs))
    }

    /// Get the inner seconds value
    #[inline]
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Convert to a UTC datetime
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.0, 0)
    }

    /// `YYYY-MM-DD` in UTC
    pub fn date_string(self) -> String {
        self.to_datetime()
            .map(|dt| dt.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Seconds elapsed between this timestamp and `now`
    pub fn age_at(self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.0
    }
}

impl fmt::Display for EpochSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar date for a raw platform timestamp, empty when unknown
pub fn date_string(raw: i64) -> String {
    EpochSeconds::normalize(raw)
        .map(EpochSeconds::date_string)
        .unwrap_or_default()
}

/// Calendar date of `now`, used for leave and registration dates
pub fn today_string(now: DateTime<Utc>) -> String {
    now.format(DATE_FORMAT).to_string()
}
