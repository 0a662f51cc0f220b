//! Additional hours decomposition.
//!
//! Splits the additional time of a shift into flat, time and a half, double,
//! TOIL and absence. Additional time is the whole paid length of `OT`,
//! `TOIL` and `Bank` shifts plus any paid overrun.
//!
//! - Additional time is paid at flat rate until the worker's weekly hours
//!   reach 37.5, and at time and a half beyond that.
//! - Over the threshold, time in a bank holiday is paid at double instead.
//! - Planned time on a bank holiday below the threshold earns TOIL for
//!   `Normal` shifts.
//! - `Bank` shifts are paid at flat rate with a holiday pay uplift.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::calendar::BankHolidayLookup;
use crate::models::{
    AdditionalHours, FULL_TIME_WEEKLY_HOURS_MS, HistoricalShift, Overrun, Shift, ShiftType,
};

use super::breaks::{BreakPolicy, RateBuckets, allocate, compute_break, shift_hours};
use super::threshold::cumulative_additional_hours;
use super::time_windows::bank_holiday_overlap;

/// Holiday pay uplift applied to `Bank` shifts (1.12004801920768).
pub const BANK_HOLIDAY_PAY_UPLIFT: Decimal = Decimal::from_parts(644_775_680, 26_078, 0, false, 14);

/// Bank holiday time split between TOIL and double.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct BankHolidayHours {
    toil: i64,
    double: i64,
}

/// Calculates the additional hours of a shift.
///
/// Returns all zeros unless `from <= planned_to <= actual_to`.
///
/// # Arguments
///
/// * `shift` - The shift to calculate
/// * `prior_shifts` - The worker's shift history, used for the weekly threshold
/// * `policy` - Which side of a split shift the break comes from first
/// * `calendar` - Bank holiday lookup
///
/// # Example
///
/// ```
/// use section2_engine::calculation::{BreakPolicy, calculate_additional_hours};
/// use section2_engine::calendar::BankHolidayCalendar;
/// use section2_engine::models::{Shift, ShiftType};
/// use chrono::NaiveDateTime;
///
/// let from = NaiveDateTime::parse_from_str("2025-10-02 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let to = NaiveDateTime::parse_from_str("2025-10-02 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let shift = Shift { shift_type: ShiftType::Ot, ..Shift::new(from, to) };
///
/// let calendar = BankHolidayCalendar::england_and_wales();
/// let hours = calculate_additional_hours(&shift, &[], BreakPolicy::FromHigherFirst, &calendar);
/// assert_eq!(hours.flat, 0);
/// assert_eq!(hours.time_and_half, 27_000_000);
/// ```
pub fn calculate_additional_hours(
    shift: &Shift,
    prior_shifts: &[HistoricalShift],
    policy: BreakPolicy,
    calendar: &dyn BankHolidayLookup,
) -> AdditionalHours {
    let mut result = AdditionalHours::default();

    if !shift.is_in_order() {
        debug!(from = %shift.from, planned_to = %shift.planned_to, actual_to = %shift.actual_to,
            "timestamps out of sequence, no additional hours");
        return result;
    }

    let shift_type = shift.shift_type;
    let touches_bank_holiday = calendar.is_bank_holiday(shift.from.date())
        || calendar.is_bank_holiday(shift.actual_to.date());

    let cumulative = match shift_type {
        ShiftType::Bank => 0,
        _ => cumulative_additional_hours(
            shift.from,
            prior_shifts,
            shift.id.as_ref(),
            shift.employment_id.as_ref(),
        ),
    };

    let planned_additional = if shift_type.is_additional_hours() {
        shift_hours(shift.from, shift.planned_to, shift.break_override)
    } else {
        0
    };
    let overrun = shift.overrun_length();
    let mut paid = planned_additional
        + match shift.overrun_type {
            Overrun::Ot => overrun,
            Overrun::Toil => 0,
        };

    let threshold = FULL_TIME_WEEKLY_HOURS_MS.saturating_sub(shift.weekly_hours);
    let remaining = threshold.saturating_sub(cumulative).max(0);

    if shift_type.is_absence() {
        result.absent_hours = shift_hours(shift.from, shift.planned_to, shift.break_override);
    } else if paid != 0 {
        let bank_holiday =
            bank_holiday_hours(shift, touches_bank_holiday, remaining, policy, calendar);
        result.toil += bank_holiday.toil;

        match shift_type {
            ShiftType::Normal | ShiftType::Ot | ShiftType::Toil => {
                if shift_type == ShiftType::Toil {
                    result.toil += planned_additional;
                    paid = (paid - planned_additional).max(0);
                }

                result.flat = paid.min(remaining);

                if paid.saturating_add(cumulative) >= threshold {
                    if touches_bank_holiday
                        && (shift_type == ShiftType::Ot || shift.overrun_type == Overrun::Ot)
                    {
                        result.double += bank_holiday.double;
                    }
                    result.time_and_half = (paid - result.double - result.flat).max(0);
                }
            }
            ShiftType::Bank => {
                result.flat = apply_bank_uplift(paid);
            }
            _ => {}
        }
    } else if shift_type == ShiftType::Normal {
        result.toil +=
            bank_holiday_hours(shift, touches_bank_holiday, remaining, policy, calendar).toil;
    }

    if matches!(
        shift_type,
        ShiftType::Normal | ShiftType::Ot | ShiftType::Toil | ShiftType::Bank
    ) && shift.overrun_type == Overrun::Toil
    {
        result.toil += overrun;
    }

    debug!(shift_type = %shift_type, cumulative, remaining, ?result, "additional hours");
    result
}

/// Applies the `Bank` holiday pay uplift, rounding down to the millisecond.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::apply_bank_uplift;
///
/// assert_eq!(apply_bank_uplift(27_000_000), 30_241_296);
/// ```
pub fn apply_bank_uplift(paid: i64) -> i64 {
    (Decimal::from(paid) * BANK_HOLIDAY_PAY_UPLIFT)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

fn offset(at: NaiveDateTime, ms: i64) -> Option<NaiveDateTime> {
    Duration::try_milliseconds(ms).and_then(|delta| at.checked_add_signed(delta))
}

/// Splits the bank holiday time of a shift into TOIL (below the weekly
/// threshold) and double (above it).
///
/// Only `Normal` shifts keep the TOIL; for the other types it is only used
/// to place the break.
fn bank_holiday_hours(
    shift: &Shift,
    touches_bank_holiday: bool,
    remaining: i64,
    policy: BreakPolicy,
    calendar: &dyn BankHolidayLookup,
) -> BankHolidayHours {
    let shift_type = shift.shift_type;
    let eligible = matches!(shift_type, ShiftType::Normal | ShiftType::Ot)
        || (shift_type == ShiftType::Toil && shift.overrun_type == Overrun::Ot);
    if !eligible || !touches_bank_holiday {
        return BankHolidayHours::default();
    }

    let from = shift.from;
    let planned_to = shift.planned_to;
    let actual_to = shift.actual_to;
    let planned_length = shift.planned_length();
    let break_length = compute_break(planned_length, shift.break_override);

    // Time after flat_to is over the weekly threshold.
    let flat_base = match shift_type {
        ShiftType::Normal | ShiftType::Toil => planned_to,
        _ => from,
    };
    let flat_allowance = remaining
        + match shift_type {
            ShiftType::Toil => 0,
            _ => break_length,
        };
    let flat_to = offset(flat_base, flat_allowance).map_or(actual_to, |t| t.min(actual_to));

    let all_flat = shift_type == ShiftType::Normal || remaining >= planned_length - break_length;
    let mut toil = 0;
    let mut double = 0;

    if all_flat {
        toil += bank_holiday_overlap(from, planned_to, calendar);
    } else if shift_type == ShiftType::Ot && remaining <= 0 {
        double += bank_holiday_overlap(from, planned_to, calendar);
    } else {
        if flat_to > from {
            toil += bank_holiday_overlap(from, planned_to.min(flat_to), calendar);
        }
        if flat_to < planned_to {
            double += bank_holiday_overlap(flat_to, planned_to, calendar);
        }
    }

    if break_length != 0 {
        if all_flat {
            if policy == BreakPolicy::FromHigherFirst || planned_length == toil {
                toil -= break_length.min((toil - break_length).max(0));
            }
        } else if remaining <= 0 {
            if double >= planned_length {
                double -= break_length.min((double - break_length).max(0));
            } else {
                double =
                    double_after_break(double, planned_length, remaining, break_length, policy);
            }
        } else {
            let outside_bank_holiday = (planned_length - toil - double).max(0);
            let after = allocate(
                RateBuckets {
                    higher: toil,
                    lower: outside_bank_holiday,
                },
                break_length,
                policy,
            );
            let toil_break = toil - after.higher;
            toil = after.higher;

            if toil_break < break_length {
                double =
                    double_after_break(double, planned_length, remaining, break_length, policy);
            }
        }
    }

    if shift.overrun_type == Overrun::Ot && actual_to > planned_to {
        let overtime_from = match shift_type {
            ShiftType::Normal => {
                offset(planned_to, remaining).map_or(actual_to, |t| t.min(actual_to))
            }
            _ => flat_to,
        };
        if overtime_from < actual_to {
            double += bank_holiday_overlap(overtime_from.max(planned_to), actual_to, calendar);
        }
    }

    debug!(toil, double, flat_to = %flat_to, "bank holiday hours");

    BankHolidayHours {
        toil: if shift_type == ShiftType::Normal { toil } else { 0 },
        double,
    }
}

/// Takes the break out of double time, with the planned time paid at time
/// and a half as the other bucket.
fn double_after_break(
    double: i64,
    planned_length: i64,
    remaining: i64,
    break_length: i64,
    policy: BreakPolicy,
) -> i64 {
    let time_and_half = (planned_length - remaining - double).max(0);
    allocate(
        RateBuckets {
            higher: double,
            lower: time_and_half,
        },
        break_length,
        policy,
    )
    .higher
}
