//! Calendar days strategy.

use super::{apply_elapsed_suspensions, check_params, DeadlineBreakdown, DeadlineCalculator};
use crate::error::PlazoResult;
use crate::suspensions::{normalize, OverlapPolicy};
use crate::types::{CalculationParams, TermUnit};

/// Counts calendar days starting on the day after submission.
///
/// The initial deadline is `created_at + 1 day + (amount - 1) days`, keeping
/// the submission's time of day. Suspensions apply as raw elapsed time, the
/// same way as [`HoursCalculator`](super::HoursCalculator). The result snaps
/// to `23:59:59` unless end-of-day snapping is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDaysCalculator {
    overlap_policy: OverlapPolicy,
}

impl Default for CalendarDaysCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarDaysCalculator {
    /// Creates a calculator using [`OverlapPolicy::ShiftStart`].
    pub fn new() -> Self {
        Self {
            overlap_policy: OverlapPolicy::ShiftStart,
        }
    }

    /// Overrides the overlap policy.
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }
}

impl DeadlineCalculator for CalendarDaysCalculator {
    fn unit(&self) -> TermUnit {
        TermUnit::CalendarDays
    }

    fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }

    fn calculate_breakdown(&self, params: &CalculationParams) -> PlazoResult<DeadlineBreakdown> {
        check_params(params, TermUnit::CalendarDays)?;

        let amount = i64::from(params.effective_amount());
        let initial = params.created_at.add_days(1)?.add_days(amount - 1)?;
        let suspensions = normalize(&params.suspensions, params.created_at, self.overlap_policy);
        let breakdown = apply_elapsed_suspensions(params, initial, suspensions)?;

        tracing::debug!(
            created_at = %params.created_at,
            days = breakdown.effective_amount,
            deadline = %breakdown.deadline,
            "calendar days deadline computed"
        );
        Ok(breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Suspension, Timestamp};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn params(created: &str, days: u32) -> CalculationParams {
        CalculationParams::new(ts(created), days, TermUnit::CalendarDays)
    }

    #[test]
    fn test_basic_calendar_days() {
        let calc = CalendarDaysCalculator::new();
        let deadline = calc.calculate(&params("2024-01-15 10:00:00", 5)).unwrap();
        assert_eq!(deadline, ts("2024-01-20 23:59:59"));
    }

    #[test]
    fn test_weekends_and_holidays_count() {
        let calc = CalendarDaysCalculator::new();
        // Submitted on Christmas, a holiday: Dec 25 + 5 = Dec 30
        assert_eq!(
            calc.calculate(&params("2024-12-25 16:30:00", 5)).unwrap(),
            ts("2024-12-30 23:59:59")
        );
        // Saturday + 1 = Sunday
        assert_eq!(
            calc.calculate(&params("2024-01-13 08:00:00", 1)).unwrap(),
            ts("2024-01-14 23:59:59")
        );
    }

    #[test]
    fn test_crosses_leap_day() {
        let calc = CalendarDaysCalculator::new();
        assert_eq!(
            calc.calculate(&params("2024-02-27 12:00:00", 3)).unwrap(),
            ts("2024-03-01 23:59:59")
        );
    }

    #[test]
    fn test_double_term() {
        let calc = CalendarDaysCalculator::new();
        let p = params("2024-01-15 10:00:00", 5).with_double_term(true);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-25 23:59:59"));
    }

    #[test]
    fn test_without_end_of_day_keeps_time() {
        let calc = CalendarDaysCalculator::new();
        let p = params("2024-01-15 10:30:45", 5).with_end_of_day(false);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-20 10:30:45"));
    }

    #[test]
    fn test_suspension_extends_by_elapsed_time() {
        let calc = CalendarDaysCalculator::new();
        // 2 days and 6 hours of suspension
        let p = params("2024-01-15 10:00:00", 5)
            .with_end_of_day(false)
            .with_suspensions(vec![Suspension::new(
                ts("2024-01-16 08:00:00"),
                ts("2024-01-18 14:00:00"),
            )]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-22 16:00:00"));
    }

    #[test]
    fn test_snap_happens_after_suspensions() {
        let calc = CalendarDaysCalculator::new();
        // Deadline 2024-01-20 10:00 + 15h crosses into the 21st before snapping
        let p = params("2024-01-15 10:00:00", 5).with_suspensions(vec![Suspension::new(
            ts("2024-01-17 00:00:00"),
            ts("2024-01-17 15:00:00"),
        )]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-21 23:59:59"));
    }

    #[test]
    fn test_suspension_after_deadline_is_ignored() {
        let calc = CalendarDaysCalculator::new();
        let p = params("2024-01-15 10:00:00", 5).with_suspensions(vec![Suspension::new(
            ts("2024-01-25 00:00:00"),
            ts("2024-01-26 00:00:00"),
        )]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-20 23:59:59"));
    }
}
