//! Hours strategy: a fixed number of elapsed hours.

use super::{apply_elapsed_suspensions, check_params, DeadlineBreakdown, DeadlineCalculator};
use crate::error::PlazoResult;
use crate::suspensions::{normalize, OverlapPolicy};
use crate::types::{CalculationParams, TermUnit};

/// Adds `base_amount` hours to the submission instant.
///
/// Day type never matters here: weekends and holidays count like any other
/// hour. Suspensions extend the deadline by their raw elapsed duration.
/// Results are not snapped to end of day unless asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoursCalculator {
    overlap_policy: OverlapPolicy,
}

impl Default for HoursCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl HoursCalculator {
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

impl DeadlineCalculator for HoursCalculator {
    fn unit(&self) -> TermUnit {
        TermUnit::Hours
    }

    fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }

    fn calculate_breakdown(&self, params: &CalculationParams) -> PlazoResult<DeadlineBreakdown> {
        check_params(params, TermUnit::Hours)?;

        let initial = params
            .created_at
            .add_hours(i64::from(params.effective_amount()))?;
        let suspensions = normalize(&params.suspensions, params.created_at, self.overlap_policy);
        let breakdown = apply_elapsed_suspensions(params, initial, suspensions)?;

        tracing::debug!(
            created_at = %params.created_at,
            hours = breakdown.effective_amount,
            deadline = %breakdown.deadline,
            "hours deadline computed"
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

    fn params(created: &str, hours: u32) -> CalculationParams {
        CalculationParams::new(ts(created), hours, TermUnit::Hours)
    }

    #[test]
    fn test_basic_hours() {
        let calc = HoursCalculator::new();
        let deadline = calc.calculate(&params("2024-01-15 10:00:00", 24)).unwrap();
        assert_eq!(deadline, ts("2024-01-16 10:00:00"));
    }

    #[test]
    fn test_weekends_and_holidays_count() {
        let calc = HoursCalculator::new();
        // Friday 18:00 + 72h lands on Monday 18:00
        assert_eq!(
            calc.calculate(&params("2024-01-12 18:00:00", 72)).unwrap(),
            ts("2024-01-15 18:00:00")
        );
        // Christmas Eve + 48h
        assert_eq!(
            calc.calculate(&params("2024-12-24 09:00:00", 48)).unwrap(),
            ts("2024-12-26 09:00:00")
        );
    }

    #[test]
    fn test_double_term() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_double_term(true);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-17 10:00:00"));
    }

    #[test]
    fn test_end_of_day_only_when_requested() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_end_of_day(true);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-16 23:59:59"));
    }

    #[test]
    fn test_suspension_adds_elapsed_time() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_suspensions(vec![Suspension::new(
            ts("2024-01-15 12:00:00"),
            ts("2024-01-15 15:30:00"),
        )]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-16 13:30:00"));
    }

    #[test]
    fn test_suspension_after_deadline_is_ignored() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_suspensions(vec![Suspension::new(
            ts("2024-01-16 10:00:00"),
            ts("2024-01-16 20:00:00"),
        )]);
        let breakdown = calc.calculate_breakdown(&p).unwrap();
        assert_eq!(breakdown.deadline, ts("2024-01-16 10:00:00"));
        assert_eq!(breakdown.ignored.len(), 1);
        assert!(breakdown.applied.is_empty());
    }

    #[test]
    fn test_suspension_before_submission_is_ignored() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_suspensions(vec![Suspension::new(
            ts("2024-01-15 08:00:00"),
            ts("2024-01-15 12:00:00"),
        )]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-16 10:00:00"));
    }

    #[test]
    fn test_running_deadline_admits_later_suspension() {
        let calc = HoursCalculator::new();
        // The first suspension pushes the deadline to 2024-01-16 20:00, which
        // lets the second one (starting at 12:00 that day) count as well.
        let p = params("2024-01-15 10:00:00", 24).with_suspensions(vec![
            Suspension::new(ts("2024-01-15 11:00:00"), ts("2024-01-15 21:00:00")),
            Suspension::new(ts("2024-01-16 12:00:00"), ts("2024-01-16 14:00:00")),
        ]);
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-16 22:00:00"));
    }

    #[test]
    fn test_overlapping_suspensions_count_their_union() {
        let calc = HoursCalculator::new();
        let p = params("2024-01-15 10:00:00", 24).with_suspensions(vec![
            Suspension::new(ts("2024-01-15 12:00:00"), ts("2024-01-15 16:00:00")),
            Suspension::new(ts("2024-01-15 14:00:00"), ts("2024-01-15 18:00:00")),
        ]);
        // Union is 12:00-18:00 = 6 hours
        assert_eq!(calc.calculate(&p).unwrap(), ts("2024-01-16 16:00:00"));
    }

    #[test]
    fn test_rejects_zero_hours() {
        let calc = HoursCalculator::new();
        assert!(calc
            .calculate(&params("2024-01-15 10:00:00", 0))
            .unwrap_err()
            .is_invalid_input());
    }
}
