//! Value types for deadline calculations.
//!
//! - [`Date`]: Calendar date, the unit business calendars reason about
//! - [`Timestamp`]: Wall-clock instant for submissions and deadlines
//! - [`Suspension`] / [`SuspensionInterval`]: Raw and validated pause periods
//! - [`CalculationParams`] / [`TermUnit`]: Input record shared by all strategies

mod date;
mod params;
mod suspension;
mod timestamp;

pub use date::Date;
pub use params::{CalculationParams, TermUnit, MAX_BASE_AMOUNT};
pub use suspension::{Suspension, SuspensionInterval};
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
