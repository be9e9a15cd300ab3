//! Engine settings.
//!
//! Settings are read from TOML. Every section is optional:
//!
//! ```toml
//! jurisdiction = "CO"
//! # holidays_file = "holidays.json"   # overrides the jurisdiction
//!
//! [working_hours]
//! start_hour = 8
//! end_hour = 17
//! hours_per_day = 8
//!
//! [overlap]
//! hours = "shift_start"
//! calendar_days = "shift_start"
//! business_days = "extend_previous"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use plazo_core::calendars::{calendar_for_jurisdiction, Calendar, DynamicCalendar};
use plazo_core::strategies::WorkingHours;
use plazo_core::suspensions::OverlapPolicy;
use plazo_core::TermUnit;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Jurisdictions with a built-in calendar.
pub const KNOWN_JURISDICTIONS: [&str; 2] = ["CO", "NONE"];

// =============================================================================
// ENGINE SETTINGS
// =============================================================================

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    /// Jurisdiction code selecting the built-in business calendar.
    #[serde(default = "default_jurisdiction")]
    pub jurisdiction: String,

    /// JSON holiday table used instead of the jurisdiction's calendar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays_file: Option<PathBuf>,

    /// Working window for the business-days strategy.
    #[serde(default)]
    pub working_hours: WorkingHoursSettings,

    /// Overlap policy per strategy.
    #[serde(default)]
    pub overlap: OverlapSettings,
}

fn default_jurisdiction() -> String {
    "CO".to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            jurisdiction: default_jurisdiction(),
            holidays_file: None,
            working_hours: WorkingHoursSettings::default(),
            overlap: OverlapSettings::default(),
        }
    }
}

impl EngineSettings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads settings from a TOML file.
    ///
    /// A relative `holidays_file` is resolved against the settings file's
    /// directory.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, &e))?;
        let mut settings = Self::from_toml_str(&content)?;

        if let (Some(file), Some(dir)) = (settings.holidays_file.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }

        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Serializes the settings to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Sets the jurisdiction.
    pub fn with_jurisdiction(mut self, code: impl Into<String>) -> Self {
        self.jurisdiction = code.into();
        self
    }

    /// Sets a holiday table file.
    pub fn with_holidays_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.holidays_file = Some(path.into());
        self
    }

    /// Builds the business calendar these settings describe.
    pub fn build_calendar(&self) -> ConfigResult<Arc<dyn Calendar>> {
        if let Some(path) = &self.holidays_file {
            let calendar = DynamicCalendar::from_json_file(path)?;
            tracing::info!(
                path = %path.display(),
                holidays = calendar.holiday_count(),
                "using holiday table"
            );
            return Ok(Arc::new(calendar));
        }
        Ok(calendar_for_jurisdiction(&self.jurisdiction)?)
    }

    /// The validated working window.
    pub fn working_hours(&self) -> ConfigResult<WorkingHours> {
        let w = &self.working_hours;
        Ok(WorkingHours::new(w.start_hour, w.end_hour, w.hours_per_day)?)
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.holidays_file.is_none() {
            let code = self.jurisdiction.trim().to_uppercase();
            if !KNOWN_JURISDICTIONS.contains(&code.as_str()) {
                errors.push(ValidationError::with_rule(
                    "jurisdiction",
                    format!(
                        "'{}' has no built-in calendar (known: {})",
                        self.jurisdiction,
                        KNOWN_JURISDICTIONS.join(", ")
                    ),
                    "known_jurisdiction",
                ));
            }
        }

        errors.extend(self.working_hours.validate());
        errors
    }
}

// =============================================================================
// WORKING HOURS
// =============================================================================

/// `[working_hours]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkingHoursSettings {
    /// Hour the working day starts.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Hour the working day ends.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    /// Working hours equivalent to one business day.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
}

fn default_start_hour() -> u32 {
    8
}

fn default_end_hour() -> u32 {
    17
}

fn default_hours_per_day() -> u32 {
    8
}

impl Default for WorkingHoursSettings {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
            hours_per_day: default_hours_per_day(),
        }
    }
}

impl Validate for WorkingHoursSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.end_hour > 24 {
            errors.push(ValidationError::with_rule(
                "working_hours.end_hour",
                "must be at most 24",
                "range",
            ));
        }
        if self.start_hour >= self.end_hour {
            errors.push(ValidationError::with_rule(
                "working_hours.start_hour",
                "must be before end_hour",
                "ordering",
            ));
        }
        if self.hours_per_day == 0 || self.hours_per_day > 24 {
            errors.push(ValidationError::with_rule(
                "working_hours.hours_per_day",
                "must be between 1 and 24",
                "range",
            ));
        }

        errors
    }
}

// =============================================================================
// OVERLAP POLICIES
// =============================================================================

/// `[overlap]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlapSettings {
    /// Policy for the hours strategy.
    #[serde(default = "shift_start")]
    pub hours: OverlapPolicy,
    /// Policy for the calendar-days strategy.
    #[serde(default = "shift_start")]
    pub calendar_days: OverlapPolicy,
    /// Policy for the business-days strategy.
    #[serde(default = "extend_previous")]
    pub business_days: OverlapPolicy,
}

fn shift_start() -> OverlapPolicy {
    OverlapPolicy::ShiftStart
}

fn extend_previous() -> OverlapPolicy {
    OverlapPolicy::ExtendPrevious
}

impl Default for OverlapSettings {
    fn default() -> Self {
        Self {
            hours: shift_start(),
            calendar_days: shift_start(),
            business_days: extend_previous(),
        }
    }
}

impl OverlapSettings {
    /// Policy configured for a unit.
    pub fn for_unit(&self, unit: TermUnit) -> OverlapPolicy {
        match unit {
            TermUnit::Hours => self.hours,
            TermUnit::CalendarDays => self.calendar_days,
            TermUnit::BusinessDays => self.business_days,
        }
    }
}
