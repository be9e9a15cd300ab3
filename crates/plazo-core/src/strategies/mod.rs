//! Deadline calculation strategies.
//!
//! Three strategies share one contract, [`DeadlineCalculator`]:
//!
//! - [`HoursCalculator`]: absolute hours; suspensions add raw elapsed time
//! - [`CalendarDaysCalculator`]: calendar days from the day after submission
//! - [`BusinessDaysCalculator`]: business days per a [`Calendar`]; suspensions
//!   are converted into whole business days through a working-hours window
//!
//! All three fold the normalized suspensions left to right against the
//! *running* deadline: a suspension only counts if it starts before the
//! deadline as already moved by the suspensions before it.
//!
//! [`Strategy`] is the closed set of variants, selected from a [`TermUnit`].

use serde::Serialize;
use std::sync::Arc;

mod business_days;
mod calendar_days;
mod hours;

pub use business_days::{BusinessDaysCalculator, WorkingHours};
pub use calendar_days::CalendarDaysCalculator;
pub use hours::HoursCalculator;

use crate::calendars::Calendar;
use crate::error::{PlazoError, PlazoResult};
use crate::suspensions::{DiscardedSuspension, NormalizedSuspensions, OverlapPolicy};
use crate::types::{CalculationParams, SuspensionInterval, Timestamp, TermUnit};

/// Contract shared by every strategy.
pub trait DeadlineCalculator {
    /// The unit this calculator handles.
    fn unit(&self) -> TermUnit;

    /// The overlap policy used when normalizing suspensions.
    fn overlap_policy(&self) -> OverlapPolicy;

    /// Computes the deadline together with how each suspension affected it.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidInput` if the parameters are invalid or
    /// their unit does not match [`unit`](Self::unit).
    fn calculate_breakdown(&self, params: &CalculationParams) -> PlazoResult<DeadlineBreakdown>;

    /// Computes the deadline.
    ///
    /// # Errors
    ///
    /// See [`calculate_breakdown`](Self::calculate_breakdown).
    fn calculate(&self, params: &CalculationParams) -> PlazoResult<Timestamp> {
        self.calculate_breakdown(params).map(|b| b.deadline)
    }
}

/// How much a single suspension moved the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum Extension {
    /// Raw elapsed seconds (hours and calendar-days strategies).
    Seconds(i64),
    /// Whole business days (business-days strategy).
    BusinessDays(u32),
}

/// A normalized suspension that started before the running deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedSuspension {
    /// The normalized interval.
    pub interval: SuspensionInterval,
    /// What it contributed (may be zero business days).
    pub extension: Extension,
}

/// Full result of a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadlineBreakdown {
    /// Unit used.
    pub unit: TermUnit,
    /// Term after the double term rule.
    pub effective_amount: u32,
    /// Deadline before any suspension.
    pub initial_deadline: Timestamp,
    /// Final deadline.
    pub deadline: Timestamp,
    /// Suspensions that were evaluated against the running deadline.
    pub applied: Vec<AppliedSuspension>,
    /// Normalized suspensions that started at or after the running deadline.
    pub ignored: Vec<SuspensionInterval>,
    /// Raw records dropped during normalization.
    pub discarded: Vec<DiscardedSuspension>,
}

/// The closed set of strategies, each carrying its own configuration.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Absolute hours.
    Hours(HoursCalculator),
    /// Calendar days.
    CalendarDays(CalendarDaysCalculator),
    /// Business days.
    BusinessDays(BusinessDaysCalculator),
}

impl Strategy {
    /// Default-configured strategy for a unit. The calendar is only used by
    /// the business-days variant.
    pub fn for_unit(unit: TermUnit, calendar: Arc<dyn Calendar>) -> Self {
        match unit {
            TermUnit::Hours => Strategy::Hours(HoursCalculator::new()),
            TermUnit::CalendarDays => Strategy::CalendarDays(CalendarDaysCalculator::new()),
            TermUnit::BusinessDays => {
                Strategy::BusinessDays(BusinessDaysCalculator::new(calendar))
            }
        }
    }

    fn inner(&self) -> &dyn DeadlineCalculator {
        match self {
            Strategy::Hours(c) => c,
            Strategy::CalendarDays(c) => c,
            Strategy::BusinessDays(c) => c,
        }
    }
}

impl DeadlineCalculator for Strategy {
    fn unit(&self) -> TermUnit {
        self.inner().unit()
    }

    fn overlap_policy(&self) -> OverlapPolicy {
        self.inner().overlap_policy()
    }

    fn calculate_breakdown(&self, params: &CalculationParams) -> PlazoResult<DeadlineBreakdown> {
        self.inner().calculate_breakdown(params)
    }
}

/// Validates parameters and checks they target `expected`.
fn check_params(params: &CalculationParams, expected: TermUnit) -> PlazoResult<()> {
    params.validate()?;
    if params.unit != expected {
        return Err(PlazoError::invalid_input(
            "unit",
            format!("{expected} calculator cannot compute a {} term", params.unit),
        ));
    }
    Ok(())
}

/// Shared elapsed-time rule of the hours and calendar-days strategies.
///
/// Each suspension starting before the running deadline adds its full
/// duration; later ones are ignored. Order matters, so this is a fold.
fn apply_elapsed_suspensions(
    params: &CalculationParams,
    initial_deadline: Timestamp,
    suspensions: NormalizedSuspensions,
) -> PlazoResult<DeadlineBreakdown> {
    let mut deadline = initial_deadline;
    let mut applied = Vec::new();
    let mut ignored = Vec::new();

    for interval in suspensions.iter() {
        if interval.start < deadline {
            let seconds = interval.duration_seconds();
            deadline = deadline.add_seconds(seconds)?;
            applied.push(AppliedSuspension {
                interval: *interval,
                extension: Extension::Seconds(seconds),
            });
        } else {
            ignored.push(*interval);
        }
    }

    if params.snaps_to_end_of_day() {
        deadline = deadline.end_of_day();
    }

    Ok(DeadlineBreakdown {
        unit: params.unit,
        effective_amount: params.effective_amount(),
        initial_deadline,
        deadline,
        applied,
        ignored,
        discarded: suspensions.discarded().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::ColombiaCalendar;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_for_unit_dispatch() {
        let calendar: Arc<dyn Calendar> = Arc::new(ColombiaCalendar::new());
        let created = ts("2024-01-15 10:00:00");

        let hours = Strategy::for_unit(TermUnit::Hours, calendar.clone());
        assert_eq!(hours.unit(), TermUnit::Hours);
        assert_eq!(
            hours
                .calculate(&CalculationParams::new(created, 24, TermUnit::Hours))
                .unwrap(),
            ts("2024-01-16 10:00:00")
        );

        let days = Strategy::for_unit(TermUnit::CalendarDays, calendar.clone());
        assert_eq!(
            days.calculate(&CalculationParams::new(created, 5, TermUnit::CalendarDays))
                .unwrap(),
            ts("2024-01-20 23:59:59")
        );

        let business = Strategy::for_unit(TermUnit::BusinessDays, calendar);
        assert_eq!(business.overlap_policy(), OverlapPolicy::ExtendPrevious);
        assert_eq!(
            business
                .calculate(&CalculationParams::new(created, 15, TermUnit::BusinessDays))
                .unwrap(),
            ts("2024-02-05 23:59:59")
        );
    }

    #[test]
    fn test_unit_mismatch_is_invalid_input() {
        let strategy = Strategy::Hours(HoursCalculator::new());
        let params = CalculationParams::new(ts("2024-01-15 10:00"), 5, TermUnit::CalendarDays);
        let err = strategy.calculate(&params).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_breakdown_serializes() {
        let strategy = Strategy::Hours(HoursCalculator::new());
        let params = CalculationParams::new(ts("2024-01-15 10:00"), 2, TermUnit::Hours);
        let breakdown = strategy.calculate_breakdown(&params).unwrap();
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["deadline"], "2024-01-15 12:00:00");
        assert_eq!(json["unit"], "hours");
    }
}
