//! Error types for the core date and convention layer.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, tenors, day counts, calendars and schedules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid or unrepresentable date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Tenor string could not be parsed.
    #[error("Invalid tenor '{input}': {reason}")]
    InvalidTenor {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// IMM contract code could not be parsed.
    #[error("Invalid IMM code '{code}'")]
    InvalidImmCode {
        /// The offending code.
        code: String,
    },

    /// Day count convention name not recognized.
    #[error("Unknown day count convention: '{name}'")]
    UnknownDayCount {
        /// The unrecognized name.
        name: String,
    },

    /// Business day convention name not recognized.
    #[error("Unknown business day convention: '{name}'")]
    UnknownBusinessDayConvention {
        /// The unrecognized name.
        name: String,
    },

    /// Calendar name not recognized.
    #[error("Unknown calendar: '{name}'")]
    UnknownCalendar {
        /// The unrecognized name.
        name: String,
    },

    /// Schedule could not be generated from the given inputs.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }
}
