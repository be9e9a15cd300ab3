//! Business day calendars.
//!
//! This module provides:
//! - The [`Calendar`] trait the business-days strategy depends on
//! - A Colombian national calendar and a weekends-only calendar
//! - A data-driven calendar for holiday tables supplied at runtime
//! - [`calendar_for_jurisdiction`], an explicit factory replacing any
//!   process-wide calendar setup

use std::sync::Arc;

mod bitmap;
mod colombia;
mod dynamic;

pub use bitmap::{
    easter_sunday, next_monday, HolidayBitmap, HolidayCalendarBuilder, WeekendType, MAX_YEAR,
    MIN_YEAR,
};
pub use colombia::ColombiaCalendar;
pub use dynamic::{CalendarData, DynamicCalendar};

use crate::error::{PlazoError, PlazoResult};
use crate::types::Date;

/// Trait for business day calendars.
///
/// Implementations are immutable once built and shared read-only across
/// calculations, hence the `Send + Sync` bound.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is not a business day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the first business day strictly after `date`.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` if no business day follows
    /// `date` within chrono's date range.
    fn next_business_day(&self, date: Date) -> PlazoResult<Date> {
        let mut result = date.checked_add_days(1)?;
        while !self.is_business_day(result) {
            result = result.checked_add_days(1)?;
        }
        Ok(result)
    }

    /// Advances a date by a number of business days.
    ///
    /// Each step moves to the next business day, so the result is always a
    /// business day when `days > 0`. Zero returns `date` unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::DateOutOfRange` if stepping leaves chrono's date
    /// range.
    fn add_business_days(&self, date: Date, days: u32) -> PlazoResult<Date> {
        let mut result = date;
        let mut remaining = days;

        while remaining > 0 {
            result = result.checked_add_days(1)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Ok(result)
    }

    /// Counts business days in `(start, end]`. Zero when `end <= start`.
    fn business_days_between(&self, start: Date, end: Date) -> u32 {
        if end <= start {
            return 0;
        }
        let Ok(first) = start.checked_add_days(1) else {
            return 0;
        };
        let count = first
            .iter_to(end)
            .filter(|d| self.is_business_day(*d))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Weekdays of `year` that are not business days.
    fn holidays_in_year(&self, year: i32) -> Vec<Date> {
        let (Ok(first), Ok(last)) = (Date::from_ymd(year, 1, 1), Date::from_ymd(year, 12, 31))
        else {
            return Vec::new();
        };
        first
            .iter_to(last)
            .filter(|d| !d.is_weekend() && !self.is_business_day(*d))
            .collect()
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Builds the calendar for a jurisdiction code (case-insensitive).
///
/// Known codes: `CO` (Colombia) and `NONE` (weekends only).
///
/// # Errors
///
/// Returns `PlazoError::UnknownJurisdiction` for any other code.
pub fn calendar_for_jurisdiction(code: &str) -> PlazoResult<Arc<dyn Calendar>> {
    match code.trim().to_uppercase().as_str() {
        "CO" => Ok(Arc::new(ColombiaCalendar::new())),
        "NONE" => Ok(Arc::new(WeekendCalendar)),
        _ => Err(PlazoError::UnknownJurisdiction {
            code: code.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(cal.is_holiday(d(2025, 1, 5)));
    }

    #[test]
    fn test_next_business_day_is_strictly_after() {
        let cal = WeekendCalendar;
        // Monday -> Tuesday, even though Monday is itself a business day
        assert_eq!(cal.next_business_day(d(2024, 1, 15)).unwrap(), d(2024, 1, 16));
        // Friday -> Monday
        assert_eq!(cal.next_business_day(d(2024, 1, 12)).unwrap(), d(2024, 1, 15));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;
        let friday = d(2025, 1, 3);
        assert_eq!(cal.add_business_days(friday, 1).unwrap(), d(2025, 1, 6));
        assert_eq!(cal.add_business_days(friday, 0).unwrap(), friday);
        // Saturday + 0 stays on Saturday
        assert_eq!(cal.add_business_days(d(2025, 1, 4), 0).unwrap(), d(2025, 1, 4));
    }

    #[test]
    fn test_stepping_past_the_last_date_is_out_of_range() {
        let cal = WeekendCalendar;
        let last = Date::from(chrono::NaiveDate::MAX);
        assert!(matches!(
            cal.next_business_day(last),
            Err(PlazoError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            cal.add_business_days(last.add_days(-10), 30),
            Err(PlazoError::DateOutOfRange { .. })
        ));
        assert_eq!(cal.business_days_between(last.add_days(-7), last), 5);
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;
        // Monday to Friday = 4 business days (Tue, Wed, Thu, Fri)
        assert_eq!(cal.business_days_between(d(2025, 1, 6), d(2025, 1, 10)), 4);
        assert_eq!(cal.business_days_between(d(2025, 1, 10), d(2025, 1, 6)), 0);
        assert_eq!(cal.business_days_between(d(2025, 1, 6), d(2025, 1, 6)), 0);
    }

    #[test]
    fn test_weekend_calendar_has_no_holidays() {
        assert!(WeekendCalendar.holidays_in_year(2024).is_empty());
    }

    #[test]
    fn test_jurisdiction_factory() {
        let co = calendar_for_jurisdiction("co").unwrap();
        assert_eq!(co.name(), "Colombia");
        assert!(!co.is_business_day(d(2024, 12, 25)));

        let none = calendar_for_jurisdiction("NONE").unwrap();
        assert!(none.is_business_day(d(2024, 12, 25)));

        assert!(matches!(
            calendar_for_jurisdiction("XX"),
            Err(PlazoError::UnknownJurisdiction { .. })
        ));
    }
}
