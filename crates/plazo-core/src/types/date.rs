//! Calendar date type used by business calendars.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{PlazoError, PlazoResult};

/// A calendar date without time of day.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. Dates are the unit
/// business calendars reason about: a [`Timestamp`](super::Timestamp) is
/// projected onto its date before asking whether it falls on a business day.
///
/// # Example
///
/// ```rust
/// use plazo_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 15).unwrap();
/// assert_eq!(date.add_days(1).to_string(), "2024-01-16");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> PlazoResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| PlazoError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> PlazoResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| PlazoError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date.
    ///
    /// # Panics
    ///
    /// Panics if the result is outside chrono's date range. Use
    /// [`checked_add_days`](Self::checked_add_days) for untrusted offsets.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + TimeDelta::days(days))
    }

    /// Adds a number of days, failing instead of overflowing.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` if the result is not representable.
    pub fn checked_add_days(&self, days: i64) -> PlazoResult<Self> {
        TimeDelta::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| PlazoError::out_of_range(format!("{self} + {days} days")))
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Iterates over every date from `self` to `end`, both inclusive.
    pub fn iter_to(self, end: Date) -> impl Iterator<Item = Date> {
        let mut current = Some(self);
        std::iter::from_fn(move || {
            let out = current.filter(|d| *d <= end)?;
            current = out.0.succ_opt().map(Date);
            Some(out)
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = PlazoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
        assert!(Date::parse("2025-02-30").is_err());
        assert!(Date::parse("yesterday").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-12-25".parse().unwrap();
        assert_eq!(date.to_string(), "2024-12-25");
    }

    #[test]
    fn test_arithmetic() {
        let d1 = Date::from_ymd(2024, 2, 28).unwrap();
        let d2 = d1 + 2;
        assert_eq!(d2, Date::from_ymd(2024, 3, 1).unwrap());
        assert_eq!(d2 - d1, 2);
        assert_eq!(d2 - 2, d1);
    }

    #[test]
    fn test_weekend() {
        assert!(Date::from_ymd(2024, 1, 13).unwrap().is_weekend());
        assert!(Date::from_ymd(2024, 1, 14).unwrap().is_weekend());
        assert!(!Date::from_ymd(2024, 1, 15).unwrap().is_weekend());
    }

    #[test]
    fn test_iter_to() {
        let start = Date::from_ymd(2024, 1, 30).unwrap();
        let end = Date::from_ymd(2024, 2, 2).unwrap();
        let days: Vec<_> = start.iter_to(end).collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[3], end);
        assert_eq!(end.iter_to(start).count(), 0);
    }

    #[test]
    fn test_checked_add_days_reports_overflow() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        assert_eq!(date.checked_add_days(17).unwrap(), Date::from_ymd(2024, 2, 1).unwrap());

        let last = Date::from(NaiveDate::MAX);
        assert!(matches!(
            last.checked_add_days(1),
            Err(PlazoError::DateOutOfRange { .. })
        ));
        assert!(date.checked_add_days(i64::MAX).is_err());
        // Iteration stops at the last representable date
        assert_eq!(last.add_days(-1).iter_to(last).count(), 2);
    }
}
