//! Calculation logic for the Section 2 engine.
//!
//! This module contains the time window overlaps, break handling, weekly
//! threshold accounting, the additional hours and unsocial hours engines,
//! and the entry points that combine them.

mod additional_hours;
mod breaks;
mod section2;
mod threshold;
mod time_windows;
mod unsocial_hours;

pub use additional_hours::{BANK_HOLIDAY_PAY_UPLIFT, apply_bank_uplift, calculate_additional_hours};
pub use breaks::{
    BREAK_THRESHOLD_MS, BreakPolicy, DEFAULT_BREAK_MS, RateBuckets, allocate, compute_break,
    shift_hours,
};
pub use section2::{Section2Calculator, calculate_section2, resolve_shift};
pub use threshold::{cumulative_additional_hours, week_start};
pub use time_windows::{
    UnsocialOverlap, bank_holiday_overlap, higher_rate_overlap, lower_rate_overlap,
    unsocial_overlap,
};
pub use unsocial_hours::{
    FLAT_RELIEF_MS, UnsocialParams, average_unsocial, calculate_unsocial_hours,
};
