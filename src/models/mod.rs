//! Core data models for the Section 2 engine.
//!
//! This module contains all the domain models used throughout the engine.

mod history;
mod options;
mod pay_breakdown;
mod request;
mod shift;

pub use history::HistoricalShift;
pub use options::{LeaveReliefMethod, Section2Options};
pub use pay_breakdown::{AdditionalHours, PayBreakdown, PayBreakdownHours, UnsocialHours};
pub use request::Section2Request;
pub use shift::{FULL_TIME_WEEKLY_HOURS_MS, Overrun, RecordId, Shift, ShiftType};
