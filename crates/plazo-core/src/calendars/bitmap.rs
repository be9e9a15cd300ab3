//! Bitmap-based holiday storage for O(1) lookups.
//!
//! Each supported year owns 366 bits; a set bit marks a holiday. Weekend
//! rules are kept separately so a holiday table only lists the extra days off.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum year supported by the calendar.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the calendar.
pub const MAX_YEAR: i32 = 2100;

/// Total number of years in the supported range.
const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

/// Maximum days per year (leap year).
const MAX_DAYS_PER_YEAR: usize = 366;

/// Total bits needed for the entire date range.
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;

/// Number of u64 words needed to store all bits.
const WORD_COUNT: usize = (TOTAL_BITS + 63) / 64;

/// Which weekdays are always non-working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeekendType {
    /// Saturday and Sunday
    #[default]
    SaturdaySunday,
    /// Sunday only (six-day working week)
    SundayOnly,
    /// No weekends
    None,
}

impl WeekendType {
    /// Check if a weekday is a weekend day for this type.
    #[inline]
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        match self {
            WeekendType::SaturdaySunday => matches!(weekday, Weekday::Sat | Weekday::Sun),
            WeekendType::SundayOnly => matches!(weekday, Weekday::Sun),
            WeekendType::None => false,
        }
    }
}

/// Holiday set stored as a bitmap over [`MIN_YEAR`]..=[`MAX_YEAR`].
///
/// Dates outside the supported range are never holidays, only weekends.
#[derive(Clone)]
pub struct HolidayBitmap {
    /// Bitmap storage, 1 = holiday
    bits: Box<[u64; WORD_COUNT]>,
    weekend: WeekendType,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("weekend", &self.weekend)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Create a new empty holiday bitmap.
    pub fn new(weekend: WeekendType) -> Self {
        Self {
            bits: Box::new([0u64; WORD_COUNT]),
            weekend,
        }
    }

    /// Create a holiday bitmap from a set of holiday dates.
    pub fn from_holidays(weekend: WeekendType, holidays: &HashSet<NaiveDate>) -> Self {
        let mut bitmap = Self::new(weekend);
        for &date in holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }

    /// Get the weekend type.
    #[inline]
    pub fn weekend_type(&self) -> WeekendType {
        self.weekend
    }

    /// Add a holiday to the bitmap.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Remove a holiday from the bitmap.
    pub fn remove_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            self.bits[word_idx] &= !(1u64 << bit_idx);
        }
    }

    /// Check if a date is a holiday (weekends excluded).
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            (self.bits[word_idx] & (1u64 << bit_idx)) != 0
        } else {
            false
        }
    }

    /// A business day is neither a weekend nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if self.weekend.is_weekend(date.weekday()) {
            return false;
        }
        !self.is_holiday(date)
    }

    /// Count total holidays in the bitmap.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Holidays of one year, ascending.
    pub fn holidays_in_year(&self, year: i32) -> Vec<NaiveDate> {
        (1..=366)
            .filter_map(|ordinal| NaiveDate::from_yo_opt(year, ordinal))
            .filter(|date| self.is_holiday(*date))
            .collect()
    }

    /// Convert a date to (word_index, bit_index), or None if out of range.
    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if year < MIN_YEAR || year > MAX_YEAR {
            return None;
        }

        let year_offset = (year - MIN_YEAR) as usize;
        let day_of_year = date.ordinal0() as usize;

        let bit_position = year_offset * MAX_DAYS_PER_YEAR + day_of_year;
        Some((bit_position / 64, bit_position % 64))
    }
}

/// Builder for holiday bitmaps from recurring rules.
pub struct HolidayCalendarBuilder {
    weekend: WeekendType,
    holidays: HashSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl Default for HolidayCalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the whole supported range.
    pub fn new() -> Self {
        Self {
            weekend: WeekendType::SaturdaySunday,
            holidays: HashSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Set the weekend type.
    pub fn weekend(mut self, weekend: WeekendType) -> Self {
        self.weekend = weekend;
        self
    }

    /// Set the year range for generating holidays.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a fixed holiday (same date every year, never moved).
    pub fn add_fixed_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add a holiday observed on the first Monday on or after its nominal date.
    pub fn add_moved_to_monday_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(next_monday(date));
            }
        }
        self
    }

    /// Add Easter-based holiday (offset from Easter Sunday).
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Build the holiday bitmap.
    pub fn build(self) -> HolidayBitmap {
        HolidayBitmap::from_holidays(self.weekend, &self.holidays)
    }
}

/// The given date if it is a Monday, otherwise the following Monday.
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - date.weekday().num_days_from_monday()) % 7;
    date + chrono::Duration::days(i64::from(days_ahead))
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
