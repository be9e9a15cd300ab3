//! Wall-clock timestamp type for submissions, suspensions and deadlines.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{PlazoError, PlazoResult};

/// Canonical textual format used for display and serialization.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted by [`Timestamp::parse`], tried in order.
const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// An instant on the local wall clock, at second precision.
///
/// All deadline arithmetic happens in a single implicit timezone. The type is
/// immutable: every transformation returns a new value, and the arithmetic
/// helpers are checked so an overflow surfaces as
/// [`PlazoError::DateOutOfRange`] instead of a panic.
///
/// # Example
///
/// ```rust
/// use plazo_core::types::Timestamp;
///
/// let created = Timestamp::parse("2024-01-15 10:00:00").unwrap();
/// let later = created.add_hours(24).unwrap();
/// assert_eq!(later.to_string(), "2024-01-16 10:00:00");
/// assert_eq!(later.end_of_day().to_string(), "2024-01-16 23:59:59");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a timestamp from its calendar and clock components.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidDate` if any component is out of range.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> PlazoResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .map(Timestamp)
            .ok_or_else(|| {
                PlazoError::invalid_date(format!(
                    "{year}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })
    }

    /// Midnight at the start of the given date.
    #[must_use]
    pub fn at_midnight(date: Date) -> Self {
        Timestamp(date.as_naive_date().and_time(NaiveTime::MIN))
    }

    /// Parses a timestamp.
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS`, the same with a `T` separator, either
    /// form without seconds, and a bare `YYYY-MM-DD` (midnight).
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidDate` if no accepted format matches.
    pub fn parse(s: &str) -> PlazoResult<Self> {
        let s = s.trim();
        for format in ACCEPTED_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Timestamp(dt));
            }
        }
        Date::parse(s)
            .map(Self::at_midnight)
            .map_err(|_| PlazoError::invalid_date(format!("Cannot parse timestamp: {s}")))
    }

    /// Returns the calendar date of this instant.
    #[must_use]
    pub fn date(&self) -> Date {
        Date::from(self.0.date())
    }

    /// Returns the time of day.
    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    /// Returns the underlying `NaiveDateTime`.
    #[must_use]
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the same time of day on another date.
    #[must_use]
    pub fn with_date(&self, date: Date) -> Self {
        Timestamp(date.as_naive_date().and_time(self.time()))
    }

    /// Returns true if both instants fall on the same calendar date.
    #[must_use]
    pub fn is_same_day(&self, other: &Timestamp) -> bool {
        self.0.date() == other.0.date()
    }

    /// Hour of day as a fraction (`14:30` is `14.5`). Seconds are ignored.
    #[must_use]
    pub fn hour_fraction(&self) -> f64 {
        f64::from(self.0.hour()) + f64::from(self.0.minute()) / 60.0
    }

    /// Last second of this instant's calendar date (`23:59:59`).
    #[must_use]
    pub fn end_of_day(&self) -> Self {
        let last = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Timestamp(self.0.date().and_time(last))
    }

    /// Midnight of this instant's calendar date.
    #[must_use]
    pub fn start_of_day(&self) -> Self {
        Self::at_midnight(self.date())
    }

    /// Adds a signed number of seconds.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` on overflow.
    pub fn add_seconds(&self, seconds: i64) -> PlazoResult<Self> {
        let delta = Duration::try_seconds(seconds)
            .ok_or_else(|| PlazoError::out_of_range(format!("{seconds} seconds")))?;
        self.checked_add(delta)
    }

    /// Adds a signed number of hours.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` on overflow.
    pub fn add_hours(&self, hours: i64) -> PlazoResult<Self> {
        let delta = Duration::try_hours(hours)
            .ok_or_else(|| PlazoError::out_of_range(format!("{hours} hours")))?;
        self.checked_add(delta)
    }

    /// Adds a signed number of calendar days, keeping the time of day.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` on overflow.
    pub fn add_days(&self, days: i64) -> PlazoResult<Self> {
        let delta = Duration::try_days(days)
            .ok_or_else(|| PlazoError::out_of_range(format!("{days} days")))?;
        self.checked_add(delta)
    }

    /// Elapsed seconds from `self` to `later` (negative if `later` is earlier).
    #[must_use]
    pub fn seconds_until(&self, later: &Timestamp) -> i64 {
        (later.0 - self.0).num_seconds()
    }

    fn checked_add(&self, delta: Duration) -> PlazoResult<Self> {
        self.0
            .checked_add_signed(delta)
            .map(Timestamp)
            .ok_or_else(|| PlazoError::out_of_range(format!("{self} + {delta}")))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = PlazoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Timestamp(dt)
    }
}

impl From<Timestamp> for NaiveDateTime {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}
