//! Unpaid break length and allocation.
//!
//! A shift longer than 6 hours carries a 30 minute unpaid break unless the
//! shift record overrides it. When part of a shift is paid at a premium, the
//! break is taken from one side first according to [`BreakPolicy`].

use chrono::NaiveDateTime;

use crate::models::Section2Options;

/// The default unpaid break (30 minutes).
pub const DEFAULT_BREAK_MS: i64 = 1_800_000;

/// Shifts longer than this (6 hours) carry the default break.
pub const BREAK_THRESHOLD_MS: i64 = 21_600_000;

/// Which side of a split shift the break comes out of first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakPolicy {
    /// Deduct from the higher paid bucket, then the lower.
    FromHigherFirst,
    /// Deduct from the lower paid bucket, then the higher.
    FromLowerFirst,
}

impl BreakPolicy {
    /// Maps the `break_from_higher` option flag to a policy.
    pub fn from_higher(break_from_higher: bool) -> Self {
        if break_from_higher {
            BreakPolicy::FromHigherFirst
        } else {
            BreakPolicy::FromLowerFirst
        }
    }
}

impl From<&Section2Options> for BreakPolicy {
    fn from(options: &Section2Options) -> Self {
        Self::from_higher(options.break_from_higher)
    }
}

/// Two portions of a shift paid at different rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateBuckets {
    /// The higher paid portion.
    pub higher: i64,
    /// The lower paid portion.
    pub lower: i64,
}

impl RateBuckets {
    /// Sum of both buckets.
    pub fn total(&self) -> i64 {
        self.higher + self.lower
    }
}

/// Returns the unpaid break for a shift of the given length.
///
/// An override is clamped to `[0, shift_length]`. Without one, shifts over
/// 6 hours take 30 minutes.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::compute_break;
///
/// assert_eq!(compute_break(36_000_000, None), 1_800_000);
/// assert_eq!(compute_break(21_600_000, None), 0);
/// assert_eq!(compute_break(3_600_000, Some(7_200_000)), 3_600_000);
/// assert_eq!(compute_break(36_000_000, Some(-1)), 0);
/// ```
pub fn compute_break(shift_length: i64, break_override: Option<i64>) -> i64 {
    match break_override {
        Some(length) => length.clamp(0, shift_length.max(0)),
        None if shift_length > BREAK_THRESHOLD_MS => DEFAULT_BREAK_MS,
        None => 0,
    }
}

/// Paid length of the interval `[from, to)`: its length less the break,
/// never negative.
pub fn shift_hours(from: NaiveDateTime, to: NaiveDateTime, break_override: Option<i64>) -> i64 {
    let length = (to - from).num_milliseconds();
    (length - compute_break(length, break_override)).max(0)
}

/// Deducts a break from two buckets, designated side first.
///
/// Negative buckets are treated as empty. The combined reduction is exactly
/// `min(break_length, higher + lower)` and neither bucket goes below zero.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::{BreakPolicy, RateBuckets, allocate};
///
/// let buckets = RateBuckets { higher: 1_000_000, lower: 20_000_000 };
/// let after = allocate(buckets, 1_800_000, BreakPolicy::FromHigherFirst);
/// assert_eq!(after, RateBuckets { higher: 0, lower: 19_200_000 });
/// ```
pub fn allocate(buckets: RateBuckets, break_length: i64, policy: BreakPolicy) -> RateBuckets {
    let higher = buckets.higher.max(0);
    let lower = buckets.lower.max(0);
    let remaining = break_length.max(0);

    match policy {
        BreakPolicy::FromHigherFirst => {
            let from_higher = remaining.min(higher);
            let from_lower = (remaining - from_higher).min(lower);
            RateBuckets {
                higher: higher - from_higher,
                lower: lower - from_lower,
            }
        }
        BreakPolicy::FromLowerFirst => {
            let from_lower = remaining.min(lower);
            let from_higher = (remaining - from_lower).min(higher);
            RateBuckets {
                higher: higher - from_higher,
                lower: lower - from_lower,
            }
        }
    }
}
