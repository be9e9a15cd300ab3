//! Colombian national business day calendar.

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, WeekendType};
use super::Calendar;
use crate::types::Date;

/// Colombian national calendar (jurisdiction `CO`).
///
/// Saturdays and Sundays are non-working. Public holidays follow three rules:
///
/// - **Fixed**: New Year (Jan 1), Labour Day (May 1), Independence (Jul 20),
///   Battle of Boyacá (Aug 7), Immaculate Conception (Dec 8), Christmas (Dec 25).
/// - **Moved to Monday** (Law 51 of 1983): Epiphany (Jan 6), Saint Joseph
///   (Mar 19), Saints Peter and Paul (Jun 29), Assumption (Aug 15), Columbus
///   Day (Oct 12), All Saints (Nov 1), Independence of Cartagena (Nov 11).
/// - **Easter-based**: Holy Thursday, Good Friday, and the Monday-observed
///   Ascension, Corpus Christi and Sacred Heart.
///
/// Holidays are only known for 1970 to 2100 ([`MIN_YEAR`](super::MIN_YEAR)
/// to [`MAX_YEAR`](super::MAX_YEAR)). Outside that range only weekends are
/// non-working, so business-day deadlines there skip no holidays.
#[derive(Debug, Clone)]
pub struct ColombiaCalendar {
    bitmap: HolidayBitmap,
}

impl Default for ColombiaCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl ColombiaCalendar {
    /// Builds the calendar for the whole supported year range.
    pub fn new() -> Self {
        let bitmap = HolidayCalendarBuilder::new()
            .weekend(WeekendType::SaturdaySunday)
            .add_fixed_holiday(1, 1)
            .add_fixed_holiday(5, 1)
            .add_fixed_holiday(7, 20)
            .add_fixed_holiday(8, 7)
            .add_fixed_holiday(12, 8)
            .add_fixed_holiday(12, 25)
            .add_moved_to_monday_holiday(1, 6)
            .add_moved_to_monday_holiday(3, 19)
            .add_moved_to_monday_holiday(6, 29)
            .add_moved_to_monday_holiday(8, 15)
            .add_moved_to_monday_holiday(10, 12)
            .add_moved_to_monday_holiday(11, 1)
            .add_moved_to_monday_holiday(11, 11)
            // Holy Thursday, Good Friday
            .add_easter_holiday(-3)
            .add_easter_holiday(-2)
            // Ascension, Corpus Christi, Sacred Heart (already Monday-observed)
            .add_easter_holiday(43)
            .add_easter_holiday(64)
            .add_easter_holiday(71)
            .build();
        Self { bitmap }
    }
}

impl Calendar for ColombiaCalendar {
    fn name(&self) -> &str {
        "Colombia"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}
