//! Calculation parameters shared by every deadline strategy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{Suspension, Timestamp};
use crate::error::{PlazoError, PlazoResult};

/// Largest accepted base term, before doubling.
pub const MAX_BASE_AMOUNT: u32 = 100_000;

/// Submission years accepted by [`CalculationParams::validate`].
const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Unit in which a base term is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUnit {
    /// Absolute elapsed hours.
    Hours,
    /// Calendar days, counted from the day after submission.
    CalendarDays,
    /// Business days per a jurisdiction's calendar.
    BusinessDays,
}

impl TermUnit {
    /// Identifier used in configuration and JSON parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            TermUnit::Hours => "hours",
            TermUnit::CalendarDays => "calendar_days",
            TermUnit::BusinessDays => "business_days",
        }
    }

    /// Whether deadlines in this unit snap to end of day unless told otherwise.
    pub fn snaps_to_end_of_day_by_default(&self) -> bool {
        !matches!(self, TermUnit::Hours)
    }
}

impl fmt::Display for TermUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TermUnit {
    type Err = PlazoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "hours" => Ok(TermUnit::Hours),
            "calendar_days" => Ok(TermUnit::CalendarDays),
            "business_days" => Ok(TermUnit::BusinessDays),
            other => Err(PlazoError::invalid_input(
                "unit",
                format!("unknown strategy '{other}'"),
            )),
        }
    }
}

/// Everything a calculator needs to produce a deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationParams {
    /// Submission instant.
    pub created_at: Timestamp,
    /// Nominal term before doubling and suspensions.
    pub base_amount: u32,
    /// Unit of `base_amount`.
    pub unit: TermUnit,
    /// Doubles `base_amount` before any date arithmetic.
    #[serde(default)]
    pub double_term: bool,
    /// Snap the result to `23:59:59`. `None` uses the unit's default.
    #[serde(default)]
    pub approximate_end_of_day: Option<bool>,
    /// Raw suspension records, filtered by the normalizer.
    #[serde(default)]
    pub suspensions: Vec<Suspension>,
}

impl CalculationParams {
    /// Creates parameters with no suspensions and default flags.
    pub fn new(created_at: Timestamp, base_amount: u32, unit: TermUnit) -> Self {
        Self {
            created_at,
            base_amount,
            unit,
            double_term: false,
            approximate_end_of_day: None,
            suspensions: Vec::new(),
        }
    }

    /// Sets the double term flag.
    pub fn with_double_term(mut self, double_term: bool) -> Self {
        self.double_term = double_term;
        self
    }

    /// Overrides the end-of-day snapping default.
    pub fn with_end_of_day(mut self, approximate: bool) -> Self {
        self.approximate_end_of_day = Some(approximate);
        self
    }

    /// Replaces the suspension list.
    pub fn with_suspensions(mut self, suspensions: Vec<Suspension>) -> Self {
        self.suspensions = suspensions;
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidInput` if the base amount is zero or
    /// larger than [`MAX_BASE_AMOUNT`], or if `created_at` is not in a
    /// four-digit year.
    pub fn validate(&self) -> PlazoResult<()> {
        if self.base_amount == 0 {
            return Err(PlazoError::invalid_input(
                "base_amount",
                "must be a positive integer",
            ));
        }
        if self.base_amount > MAX_BASE_AMOUNT {
            return Err(PlazoError::invalid_input(
                "base_amount",
                format!("must not exceed {MAX_BASE_AMOUNT}"),
            ));
        }
        let year = self.created_at.date().year();
        if !SUPPORTED_YEARS.contains(&year) {
            return Err(PlazoError::invalid_input(
                "created_at",
                format!("year {year} is outside 0001-9999"),
            ));
        }
        Ok(())
    }

    /// Base amount after applying the double term rule.
    pub fn effective_amount(&self) -> u32 {
        if self.double_term {
            self.base_amount * 2
        } else {
            self.base_amount
        }
    }

    /// Whether the final deadline snaps to end of day.
    pub fn snaps_to_end_of_day(&self) -> bool {
        self.approximate_end_of_day
            .unwrap_or_else(|| self.unit.snaps_to_end_of_day_by_default())
    }

    /// Builds parameters from a loosely-typed JSON record.
    ///
    /// Recognised keys: `created_at`, `unit` (or `strategy`), `base_amount`
    /// (or `base_days` / `base_hours`), `double_term`,
    /// `approximate_end_of_day` and `suspensions`. Malformed suspension
    /// entries are kept as empty records so the normalizer can discard them.
    ///
    /// # Errors
    ///
    /// Returns `PlazoError::InvalidInput` naming the first invalid field.
    pub fn from_json(value: &Value) -> PlazoResult<Self> {
        let record = value
            .as_object()
            .ok_or_else(|| PlazoError::invalid_input("params", "must be a JSON object"))?;

        let created_at = match record.get("created_at") {
            Some(Value::String(s)) => Timestamp::parse(s)
                .map_err(|e| PlazoError::invalid_input("created_at", e.to_string()))?,
            Some(_) => {
                return Err(PlazoError::invalid_input(
                    "created_at",
                    "must be a timestamp string",
                ))
            }
            None => return Err(PlazoError::invalid_input("created_at", "is required")),
        };

        let unit = match record.get("unit").or_else(|| record.get("strategy")) {
            Some(Value::String(s)) => s.parse::<TermUnit>()?,
            Some(_) => return Err(PlazoError::invalid_input("unit", "must be a string")),
            None => return Err(PlazoError::invalid_input("unit", "is required")),
        };

        let (amount_key, amount) = ["base_amount", "base_days", "base_hours"]
            .iter()
            .find_map(|key| record.get(*key).map(|v| (*key, v)))
            .ok_or_else(|| PlazoError::invalid_input("base_amount", "is required"))?;
        let base_amount = amount
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| PlazoError::invalid_input(amount_key, "must be a positive integer"))?;

        let double_term = optional_bool(record.get("double_term"), "double_term")?.unwrap_or(false);
        let approximate_end_of_day =
            optional_bool(record.get("approximate_end_of_day"), "approximate_end_of_day")?;

        let suspensions = match record.get("suspensions") {
            Some(list) => Suspension::list_from_json(list)?,
            None => Vec::new(),
        };

        let params = Self {
            created_at,
            base_amount,
            unit,
            double_term,
            approximate_end_of_day,
            suspensions,
        };
        params.validate()?;
        Ok(params)
    }
}

fn optional_bool(value: Option<&Value>, field: &str) -> PlazoResult<Option<bool>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(PlazoError::invalid_input(field, "must be a boolean")),
    }
}
