//! Error types for the Section 2 engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The calculation entry points never surface these to callers: invalid
//! timestamps are logged and recovered to an all-zero breakdown. They are
//! returned from configuration loading and from the validation helpers.

use chrono::NaiveDateTime;
use thiserror::Error;

/// The main error type for the Section 2 engine.
///
/// # Example
///
/// ```
/// use section2_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/section2.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/section2.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Bank holiday data was not valid gov.uk `bank-holidays.json`.
    #[error("Failed to parse bank holiday data: {message}")]
    CalendarParseError {
        /// A description of the parse error.
        message: String,
    },

    /// The bank holiday data did not contain the requested division.
    #[error("Bank holiday division not found: {division}")]
    DivisionNotFound {
        /// The division that was requested (e.g. "england-and-wales").
        division: String,
    },

    /// A timestamp was malformed or outside the supported range.
    #[error("Invalid timestamp for '{field}': {value}")]
    InvalidTimestamp {
        /// The shift field holding the timestamp.
        field: String,
        /// The rejected value as received.
        value: String,
    },

    /// Timestamps were valid but not in `from <= planned_to <= actual_to` order.
    #[error("Timestamps out of order: from {from}, planned_to {planned_to}, actual_to {actual_to}")]
    TimestampOrder {
        /// Start of the shift.
        from: NaiveDateTime,
        /// Planned end of the shift.
        planned_to: NaiveDateTime,
        /// Actual end of the shift.
        actual_to: NaiveDateTime,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
