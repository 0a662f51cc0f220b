//! Calendar collaborators for the Section 2 engine.
//!
//! This module provides timestamp validation and parsing, sortable date
//! formatting, and the injectable bank holiday lookup.

mod bank_holidays;
mod timestamp;

pub use bank_holidays::{
    BankHolidayCalendar, BankHolidayDivision, BankHolidayEvent, BankHolidayLookup,
    DEFAULT_DIVISION,
};
pub use timestamp::{
    MAX_EPOCH_MILLIS, TimestampInput, end_after_start, format_sortable_date, is_valid_timestamp,
    parse_timestamp, serde_timestamp,
};
