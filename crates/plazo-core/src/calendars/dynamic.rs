//! Holiday calendar built from a table supplied at runtime.
//!
//! Holiday tables are taken as given: no attempt is made to check them
//! against any official source.
//!
//! # Example
//!
//! ```
//! use plazo_core::calendars::{Calendar, DynamicCalendar, WeekendType};
//! use plazo_core::types::Date;
//!
//! let holidays = vec![
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 12, 25).unwrap(),
//! ];
//! let cal = DynamicCalendar::from_dates("Custom", WeekendType::SaturdaySunday, holidays);
//!
//! assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 1).unwrap()));
//! assert!(cal.is_business_day(Date::from_ymd(2025, 1, 2).unwrap()));
//! ```

use super::bitmap::{HolidayBitmap, WeekendType, MAX_YEAR, MIN_YEAR};
use super::Calendar;
use crate::error::{PlazoError, PlazoResult};
use crate::types::Date;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A holiday calendar loaded from data rather than rules.
#[derive(Clone)]
pub struct DynamicCalendar {
    name: String,
    bitmap: HolidayBitmap,
}

impl std::fmt::Debug for DynamicCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicCalendar")
            .field("name", &self.name)
            .field("weekend", &self.bitmap.weekend_type())
            .field("holiday_count", &self.bitmap.count_holidays())
            .finish()
    }
}

impl DynamicCalendar {
    /// Create a new empty dynamic calendar.
    pub fn new(name: impl Into<String>, weekend: WeekendType) -> Self {
        Self {
            name: name.into(),
            bitmap: HolidayBitmap::new(weekend),
        }
    }

    /// Create a calendar from a list of holiday dates.
    pub fn from_dates(
        name: impl Into<String>,
        weekend: WeekendType,
        holidays: impl IntoIterator<Item = Date>,
    ) -> Self {
        let mut cal = Self::new(name, weekend);
        for date in holidays {
            cal.add_holiday(date);
        }
        cal
    }

    /// Load a calendar from JSON data.
    ///
    /// # JSON Format
    ///
    /// ```json
    /// {
    ///   "name": "My Calendar",
    ///   "weekend": "SaturdaySunday",
    ///   "holidays": ["2025-01-01", "2025-12-25"]
    /// }
    /// ```
    pub fn from_json(json: &str) -> PlazoResult<Self> {
        let data: CalendarData = serde_json::from_str(json)
            .map_err(|e| PlazoError::calendar(format!("Failed to parse JSON: {e}")))?;
        Self::from_calendar_data(data)
    }

    /// Load a calendar from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> PlazoResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlazoError::calendar(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Build a calendar from already-parsed data.
    ///
    /// Holidays outside the supported year range are rejected rather than
    /// silently dropped.
    pub fn from_calendar_data(data: CalendarData) -> PlazoResult<Self> {
        let weekend = data.weekend.unwrap_or_default();
        let mut cal = Self::new(data.name, weekend);

        for date_str in data.holidays {
            let date = Date::parse(&date_str).map_err(|e| {
                PlazoError::calendar(format!("Invalid holiday '{date_str}': {e}"))
            })?;
            if date.year() < MIN_YEAR || date.year() > MAX_YEAR {
                return Err(PlazoError::calendar(format!(
                    "Holiday {date} outside supported range {MIN_YEAR}-{MAX_YEAR}"
                )));
            }
            cal.add_holiday(date);
        }

        Ok(cal)
    }

    /// Add a holiday date.
    pub fn add_holiday(&mut self, date: Date) {
        self.bitmap.add_holiday(date.as_naive_date());
    }

    /// Remove a holiday date.
    pub fn remove_holiday(&mut self, date: Date) {
        self.bitmap.remove_holiday(date.as_naive_date());
    }

    /// Count total holidays in this calendar.
    pub fn holiday_count(&self) -> usize {
        self.bitmap.count_holidays()
    }

    /// Export calendar data to a serializable struct.
    pub fn to_calendar_data(&self) -> CalendarData {
        let holidays = (MIN_YEAR..=MAX_YEAR)
            .flat_map(|year| self.bitmap.holidays_in_year(year))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect();

        CalendarData {
            name: self.name.clone(),
            weekend: Some(self.bitmap.weekend_type()),
            holidays,
        }
    }

    /// Export to JSON string.
    pub fn to_json(&self) -> PlazoResult<String> {
        serde_json::to_string_pretty(&self.to_calendar_data())
            .map_err(|e| PlazoError::calendar(format!("Failed to serialize calendar: {e}")))
    }
}

impl Calendar for DynamicCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

/// JSON representation of a holiday table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    /// Calendar name.
    pub name: String,
    /// Weekend rule; Saturday/Sunday when omitted.
    #[serde(default)]
    pub weekend: Option<WeekendType>,
    /// Holiday dates as `YYYY-MM-DD`.
    #[serde(default)]
    pub holidays: Vec<String>,
}
