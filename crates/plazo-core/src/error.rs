//! Error types for the Plazo library.
//!
//! Every calculation either returns a complete deadline or fails atomically
//! with one of these errors, before any date arithmetic takes place.

use thiserror::Error;

/// A specialized Result type for Plazo operations.
pub type PlazoResult<T> = Result<T, PlazoError>;

/// The main error type for Plazo operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlazoError {
    /// A calculation parameter is missing or malformed.
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput {
        /// Name of the offending parameter.
        field: String,
        /// Description of what is wrong with it.
        reason: String,
    },

    /// A date or timestamp could not be parsed or constructed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Date arithmetic left the representable range.
    #[error("Date out of range: {message}")]
    DateOutOfRange {
        /// Description of the overflowing operation.
        message: String,
    },

    /// No calendar is known for the requested jurisdiction.
    #[error("Unknown jurisdiction: {code}")]
    UnknownJurisdiction {
        /// The jurisdiction code that was requested.
        code: String,
    },

    /// Calendar data could not be loaded.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl PlazoError {
    /// Creates an invalid input error for the given field.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a date out of range error.
    #[must_use]
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::DateOutOfRange {
            message: message.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by caller-supplied input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlazoError::invalid_input("base_amount", "must be a positive integer");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'base_amount': must be a positive integer"
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_jurisdiction_error() {
        let err = PlazoError::UnknownJurisdiction {
            code: "XX".to_string(),
        };
        assert!(err.to_string().contains("XX"));
        assert!(!err.is_invalid_input());
    }
}
