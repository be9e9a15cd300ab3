//! Business days strategy.
//!
//! The term starts on the first business day strictly after submission. A
//! suspension does not add raw time here; it is converted into whole
//! business days:
//!
//! - business days strictly between its start day and its end day count in
//!   full;
//! - on the start and end days, only the hours inside the working window
//!   (08:00 to 17:00 by default) count, and only if those days are business
//!   days;
//! - the boundary hours are rounded to the nearest whole hour and every full
//!   working day's worth (8 hours by default) adds one more business day.
//!
//! A suspension that contributes at least one day moves the deadline forward
//! by that many business days and sets it to the end of that day.

use std::fmt;
use std::sync::Arc;

use super::{check_params, AppliedSuspension, DeadlineBreakdown, DeadlineCalculator, Extension};
use crate::calendars::Calendar;
use crate::error::{PlazoError, PlazoResult};
use crate::suspensions::{normalize, OverlapPolicy};
use crate::types::{CalculationParams, SuspensionInterval, TermUnit, Timestamp};

/// The daily working window used to weigh partial suspension days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingHours {
    start_hour: u32,
    end_hour: u32,
    hours_per_day: u32,
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start_hour: 8,
            end_hour: 17,
            hours_per_day: 8,
        }
    }
}

impl WorkingHours {
    /// Creates a working window.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidInput` unless
    /// `start_hour < end_hour <= 24` and `hours_per_day > 0`.
    pub fn new(start_hour: u32, end_hour: u32, hours_per_day: u32) -> PlazoResult<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(PlazoError::invalid_input(
                "working_hours",
                format!("window {start_hour}:00-{end_hour}:00 is empty or exceeds a day"),
            ));
        }
        if hours_per_day == 0 {
            return Err(PlazoError::invalid_input(
                "working_hours.hours_per_day",
                "must be at least 1",
            ));
        }
        Ok(Self {
            start_hour,
            end_hour,
            hours_per_day,
        })
    }

    /// Hour the working day starts.
    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    /// Hour the working day ends.
    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    /// Working hours that add up to one business day.
    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }
}

/// Counts business days through a [`Calendar`].
#[derive(Clone)]
pub struct BusinessDaysCalculator {
    calendar: Arc<dyn Calendar>,
    working_hours: WorkingHours,
    overlap_policy: OverlapPolicy,
}

impl fmt::Debug for BusinessDaysCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessDaysCalculator")
            .field("calendar", &self.calendar.name())
            .field("working_hours", &self.working_hours)
            .field("overlap_policy", &self.overlap_policy)
            .finish()
    }
}

impl BusinessDaysCalculator {
    /// Creates a calculator with the default working window and
    /// [`OverlapPolicy::ExtendPrevious`].
    pub fn new(calendar: Arc<dyn Calendar>) -> Self {
        Self {
            calendar,
            working_hours: WorkingHours::default(),
            overlap_policy: OverlapPolicy::ExtendPrevious,
        }
    }

    /// Overrides the working window.
    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    /// Overrides the overlap policy.
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }

    /// The calendar in use.
    pub fn calendar(&self) -> &Arc<dyn Calendar> {
        &self.calendar
    }

    /// The working window in use.
    pub fn working_hours(&self) -> WorkingHours {
        self.working_hours
    }

    /// Business days a single suspension contributes.
    pub fn contribution(&self, interval: &SuspensionInterval) -> u32 {
        let cal = self.calendar.as_ref();
        let start_day = interval.start.date();
        let end_day = interval.end.date();
        let same_day = interval.start.is_same_day(&interval.end);

        let whole_days = if same_day {
            0
        } else {
            cal.business_days_between(start_day, end_day - 1)
        };

        let window_start = f64::from(self.working_hours.start_hour);
        let window_end = f64::from(self.working_hours.end_hour);

        let initial_hours = if cal.is_business_day(start_day) {
            let until = if same_day {
                interval.end.hour_fraction()
            } else {
                window_end
            };
            (until.min(window_end) - interval.start.hour_fraction().max(window_start)).max(0.0)
        } else {
            0.0
        };

        let final_hours = if !same_day && cal.is_business_day(end_day) {
            (interval.end.hour_fraction().min(window_end) - window_start).max(0.0)
        } else {
            0.0
        };

        // Bounded by two working windows, so the cast cannot truncate.
        let rounded = (initial_hours + final_hours).round() as u32;
        whole_days.saturating_add(rounded / self.working_hours.hours_per_day)
    }
}

impl DeadlineCalculator for BusinessDaysCalculator {
    fn unit(&self) -> TermUnit {
        TermUnit::BusinessDays
    }

    fn overlap_policy(&self) -> OverlapPolicy {
        self.overlap_policy
    }

    fn calculate_breakdown(&self, params: &CalculationParams) -> PlazoResult<DeadlineBreakdown> {
        check_params(params, TermUnit::BusinessDays)?;

        let cal = self.calendar.as_ref();
        let amount = params.effective_amount();
        let first_day = cal.next_business_day(params.created_at.date())?;
        let initial_deadline = params
            .created_at
            .with_date(cal.add_business_days(first_day, amount - 1)?);

        let suspensions = normalize(&params.suspensions, params.created_at, self.overlap_policy);

        let mut deadline = initial_deadline;
        let mut applied = Vec::new();
        let mut ignored = Vec::new();

        for interval in suspensions.iter() {
            if interval.start >= deadline {
                ignored.push(*interval);
                continue;
            }
            let days = self.contribution(interval);
            if days > 0 {
                deadline = extend(cal, deadline, days)?;
            }
            tracing::debug!(
                start = %interval.start,
                end = %interval.end,
                days,
                "suspension contribution"
            );
            applied.push(AppliedSuspension {
                interval: *interval,
                extension: Extension::BusinessDays(days),
            });
        }

        if params.snaps_to_end_of_day() {
            deadline = deadline.end_of_day();
        }

        tracing::debug!(
            calendar = cal.name(),
            created_at = %params.created_at,
            days = amount,
            deadline = %deadline,
            "business days deadline computed"
        );

        Ok(DeadlineBreakdown {
            unit: TermUnit::BusinessDays,
            effective_amount: amount,
            initial_deadline,
            deadline,
            applied,
            ignored,
            discarded: suspensions.discarded().to_vec(),
        })
    }
}

fn extend(cal: &dyn Calendar, deadline: Timestamp, days: u32) -> PlazoResult<Timestamp> {
    // n business days are at least n calendar days
    deadline.date().checked_add_days(i64::from(days))?;
    let date = cal.add_business_days(deadline.date(), days)?;
    Ok(deadline.with_date(date).end_of_day())
}
