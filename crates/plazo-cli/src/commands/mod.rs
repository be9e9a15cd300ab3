//! CLI command implementations.

pub mod calendar;
pub mod deadline;
pub mod types;

pub use calendar::CalendarArgs;
pub use deadline::DeadlineArgs;
pub use types::TypesArgs;

use std::path::Path;

use plazo_config::{EngineSettings, Validate};
use plazo_core::types::{Date, Suspension, Timestamp};

use crate::error::{CliError, CliResult};

/// Loads settings from `path`, or defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> CliResult<EngineSettings> {
    let settings = match path {
        Some(path) => {
            let settings = EngineSettings::from_file(path)?;
            tracing::info!(path = %path.display(), "using settings file");
            settings
        }
        None => EngineSettings::default(),
    };
    settings.validate_or_error()?;
    Ok(settings)
}

/// Parses a timestamp (`YYYY-MM-DD[ HH:MM[:SS]]`).
pub fn parse_timestamp(s: &str) -> CliResult<Timestamp> {
    Timestamp::parse(s).map_err(|_| CliError::InvalidTimestamp(s.to_string()))
}

/// Parses a date in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an inline `START..END` suspension.
pub fn parse_suspension(s: &str) -> CliResult<Suspension> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| CliError::InvalidSuspension(s.to_string()))?;
    let start = Timestamp::parse(start).map_err(|_| CliError::InvalidSuspension(s.to_string()))?;
    let end = Timestamp::parse(end).map_err(|_| CliError::InvalidSuspension(s.to_string()))?;
    Ok(Suspension::new(start, end))
}

/// Reads a JSON suspension list from a file.
pub fn read_suspensions_file(path: &Path) -> CliResult<Vec<Suspension>> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: display.clone(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| CliError::Json {
            path: display,
            message: e.to_string(),
        })?;
    Ok(Suspension::list_from_json(&value)?)
}
