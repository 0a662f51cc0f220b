//! Unsocial hours (lower and higher rate) calculation.
//!
//! Unsocial time is earned on `Normal`, `OT`, `AL`, `Absent (TOIL)` and
//! `Bank` shifts, and on the paid overrun of a `TOIL` shift. Time already
//! paid over the weekly threshold does not also earn unsocial hours. Relief
//! leave earns an average taken from the worker's history.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::calendar::BankHolidayLookup;
use crate::models::{
    HistoricalShift, LeaveReliefMethod, Overrun, Section2Options, Shift, ShiftType, UnsocialHours,
};

use super::breaks::{BreakPolicy, RateBuckets, allocate, compute_break, shift_hours};
use super::time_windows::{UnsocialOverlap, unsocial_overlap};

/// Unsocial hours credited to a relief leave shift under the flat method (2 hours).
pub const FLAT_RELIEF_MS: i64 = 7_200_000;

/// Inputs to [`calculate_unsocial_hours`].
#[derive(Debug, Clone, Copy)]
pub struct UnsocialParams<'a> {
    /// The shift being calculated.
    pub shift: &'a Shift,
    /// Additional time paid over the weekly threshold, this shift included
    /// (`time_and_half + double`).
    pub hours_over_threshold: i64,
    /// The worker's shift history, in date order.
    pub shifts: &'a [HistoricalShift],
    /// Calculation options.
    pub options: &'a Section2Options,
}

/// Calculates lower and higher rate unsocial hours for a shift.
///
/// Returns zero for both bands unless `from <= planned_to <= actual_to`.
pub fn calculate_unsocial_hours(
    params: &UnsocialParams<'_>,
    calendar: &dyn BankHolidayLookup,
) -> UnsocialHours {
    let shift = params.shift;
    if !shift.is_in_order() {
        debug!(from = %shift.from, "timestamps out of sequence, no unsocial hours");
        return UnsocialHours::default();
    }

    let shift_type = shift.shift_type;
    let earns_unsocial = shift_type.is_unsocial()
        || (shift_type == ShiftType::Toil && shift.overrun_type == Overrun::Ot);

    let (planned, overrun) = if earns_unsocial {
        worked_unsocial(params, calendar)
    } else if shift_type.is_relief() {
        (
            relief_unsocial(shift, params.shifts, params.options.leave_relief_ush_type),
            UnsocialOverlap::default(),
        )
    } else {
        Default::default()
    };

    let result = UnsocialHours {
        lower_rate: planned.lower.saturating_add(overrun.lower).max(0),
        higher_rate: planned.higher.saturating_add(overrun.higher).max(0),
    };
    debug!(shift_type = %shift_type, ?result, "unsocial hours");
    result
}

fn offset(at: NaiveDateTime, ms: i64) -> NaiveDateTime {
    Duration::try_milliseconds(ms)
        .and_then(|delta| at.checked_add_signed(delta))
        .unwrap_or(at)
}

/// Planned and overrun unsocial time of a worked shift.
fn worked_unsocial(
    params: &UnsocialParams<'_>,
    calendar: &dyn BankHolidayLookup,
) -> (UnsocialOverlap, UnsocialOverlap) {
    let shift = params.shift;
    let hours_over_threshold = params.hours_over_threshold;
    let from = shift.from;

    let mut planned = if shift.shift_type.is_unsocial() {
        unsocial_overlap(from, shift.planned_to, calendar)
    } else {
        UnsocialOverlap::default()
    };
    let raw_planned_total = planned.total();

    let paid_overrun = match shift.overrun_type {
        Overrun::Ot => shift.overrun_length(),
        Overrun::Toil => 0,
    };
    let mut overrun = if paid_overrun != 0 {
        unsocial_overlap(shift.planned_to, shift.actual_to, calendar)
    } else {
        UnsocialOverlap::default()
    };

    let mut planned_length = shift.planned_length();
    let break_length = compute_break(planned_length, shift.break_override);

    // Trim the time paid over the threshold off the end of the shift.
    let mut unsocial_to = shift.planned_to;
    if hours_over_threshold != 0 {
        if shift.shift_type == ShiftType::Ot {
            unsocial_to = offset(shift.planned_to, paid_overrun - hours_over_threshold)
                .max(from)
                .min(shift.planned_to);
            planned = unsocial_overlap(from, unsocial_to, calendar);
        }
        if overrun.total() != 0 {
            let overrun_to =
                offset(shift.actual_to, -hours_over_threshold).max(shift.planned_to);
            overrun = unsocial_overlap(shift.planned_to, overrun_to, calendar);
        }
    }

    let mostly_unsocial = 2 * raw_planned_total > planned_length
        || (params.options.half_is_all_ush && 2 * raw_planned_total >= planned_length);

    if mostly_unsocial {
        let unpaid_threshold = (hours_over_threshold - paid_overrun).max(0);
        let whole_shift = (planned_length - break_length - unpaid_threshold).max(0);

        if planned.higher == 0 {
            planned.lower = whole_shift;
        } else if planned.lower == 0 {
            planned.higher = whole_shift;
        } else {
            if unpaid_threshold > 0 {
                planned_length = (unsocial_to - from).num_milliseconds();
            }
            planned = split_whole_shift(
                planned,
                planned_length,
                break_length,
                BreakPolicy::from(params.options),
            );
        }
    }

    (planned, overrun)
}

/// Credits the whole of a mostly unsocial shift to both bands.
///
/// The band the break is taken from first never exceeds its raw overlap;
/// the other band takes the rest of the shift.
fn split_whole_shift(
    raw: UnsocialOverlap,
    length: i64,
    break_length: i64,
    policy: BreakPolicy,
) -> UnsocialOverlap {
    match policy {
        BreakPolicy::FromHigherFirst => {
            let after = allocate(
                RateBuckets {
                    higher: raw.higher,
                    lower: length - raw.higher,
                },
                break_length,
                policy,
            );
            let higher_break = raw.higher - after.higher;
            UnsocialOverlap {
                lower: after.lower,
                higher: after.higher.min(length - raw.lower - higher_break),
            }
        }
        BreakPolicy::FromLowerFirst => {
            let after = allocate(
                RateBuckets {
                    higher: length - raw.lower,
                    lower: raw.lower,
                },
                break_length,
                policy,
            );
            let lower_break = raw.lower - after.lower;
            UnsocialOverlap {
                lower: after.lower.min(length - raw.higher - lower_break),
                higher: after.higher,
            }
        }
    }
}

/// Unsocial hours credited to a relief leave shift.
fn relief_unsocial(
    shift: &Shift,
    history: &[HistoricalShift],
    method: LeaveReliefMethod,
) -> UnsocialOverlap {
    match method {
        LeaveReliefMethod::Best => {
            let recent = average_unsocial(shift, history, 13);
            let year = average_unsocial(shift, history, 52);
            if recent.total() > year.total() {
                recent
            } else {
                year
            }
        }
        LeaveReliefMethod::Average13 => average_unsocial(shift, history, 13),
        LeaveReliefMethod::Average52 => average_unsocial(shift, history, 52),
        LeaveReliefMethod::Flat if shift.from.weekday() == Weekday::Sun => UnsocialOverlap {
            lower: 0,
            higher: FLAT_RELIEF_MS,
        },
        LeaveReliefMethod::Flat => UnsocialOverlap {
            lower: FLAT_RELIEF_MS,
            higher: 0,
        },
        LeaveReliefMethod::None => UnsocialOverlap::default(),
    }
}

fn counts_toward_average(record: &HistoricalShift) -> bool {
    !record.shift_type.is_relief()
        && !matches!(
            record.shift_type,
            ShiftType::Toil | ShiftType::Sick | ShiftType::Unrecognized
        )
}

/// Average unsocial hours over the `weeks` before the shift, scaled to the
/// shift's paid length.
///
/// History is assumed to be in date order: averaging stops at the first
/// counted record on or after the shift's date.
pub fn average_unsocial(
    shift: &Shift,
    history: &[HistoricalShift],
    weeks: i64,
) -> UnsocialOverlap {
    let window_start = Duration::try_weeks(weeks)
        .and_then(|span| shift.from.checked_sub_signed(span))
        .map_or(NaiveDate::MIN, |start| start.date());
    let shift_date = shift.from.date();

    let mut lower = 0i64;
    let mut higher = 0i64;
    let mut eligible = 0i64;

    for record in history {
        if record.date < window_start
            || record.employment_id != shift.employment_id
            || !counts_toward_average(record)
        {
            continue;
        }
        if record.date >= shift_date {
            break;
        }
        lower = lower.saturating_add(record.lower_rate.max(0));
        higher = higher.saturating_add(record.higher_rate.max(0));
        eligible = eligible.saturating_add(record.unsocial_eligible_hours());
    }

    if eligible == 0 {
        return UnsocialOverlap::default();
    }

    let paid = Decimal::from(shift_hours(shift.from, shift.planned_to, None));
    let eligible = Decimal::from(eligible);
    let scale = |total: i64| {
        Decimal::from(total)
            .checked_mul(paid)
            .and_then(|scaled| scaled.checked_div(eligible))
            .map(|value| value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|value| value.to_i64())
            .unwrap_or(i64::MAX)
    };

    let average = UnsocialOverlap {
        lower: scale(lower),
        higher: scale(higher),
    };
    debug!(weeks, %window_start, ?average, "relief average");
    average
}
