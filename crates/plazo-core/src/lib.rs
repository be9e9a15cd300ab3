//! # Plazo Core
//!
//! Statutory deadline computation for administrative requests.
//!
//! This crate provides the building blocks of the Plazo engine:
//!
//! - **Types**: `Date`, `Timestamp`, suspension records and calculation parameters
//! - **Business Day Calendars**: the Colombian national calendar, a
//!   weekends-only calendar and data-driven holiday tables
//! - **Suspensions**: normalization of raw suspension records into disjoint
//!   intervals
//! - **Strategies**: hours, calendar days and business days calculators
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use plazo_core::prelude::*;
//!
//! let calendar: Arc<dyn Calendar> = Arc::new(ColombiaCalendar::new());
//! let strategy = Strategy::for_unit(TermUnit::BusinessDays, calendar);
//!
//! let created_at = Timestamp::parse("2024-01-15 10:00:00").unwrap();
//! let params = CalculationParams::new(created_at, 15, TermUnit::BusinessDays);
//!
//! let deadline = strategy.calculate(&params).unwrap();
//! assert_eq!(deadline.to_string(), "2024-02-05 23:59:59");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod error;
pub mod strategies;
pub mod suspensions;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        calendar_for_jurisdiction, Calendar, ColombiaCalendar, DynamicCalendar, WeekendCalendar,
    };
    pub use crate::error::{PlazoError, PlazoResult};
    pub use crate::strategies::{
        BusinessDaysCalculator, CalendarDaysCalculator, DeadlineBreakdown, DeadlineCalculator,
        HoursCalculator, Strategy, WorkingHours,
    };
    pub use crate::suspensions::{normalize, NormalizedSuspensions, OverlapPolicy};
    pub use crate::types::{
        CalculationParams, Date, Suspension, SuspensionInterval, TermUnit, Timestamp,
    };
}

// Re-export commonly used types at crate root
pub use error::{PlazoError, PlazoResult};
pub use strategies::{DeadlineCalculator, Strategy};
pub use types::{CalculationParams, Date, TermUnit, Timestamp};
