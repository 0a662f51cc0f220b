//! Weekly additional hours threshold accounting.
//!
//! Additional hours are paid at flat rate until a worker's contracted hours
//! plus additional hours reach 37.5 hours in the week (Monday 00:00 onward).
//! This module sums the additional hours already worked that week.

use chrono::{Datelike, Duration, NaiveDateTime};
use tracing::debug;

use crate::calendar::end_after_start;
use crate::models::{HistoricalShift, Overrun, RecordId, ShiftType};

use super::breaks::shift_hours;
use super::time_windows::start_of_day;

/// Monday 00:00 of the week containing `at`.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::week_start;
/// use chrono::NaiveDateTime;
///
/// let thursday =
///     NaiveDateTime::parse_from_str("2025-10-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(week_start(thursday).to_string(), "2025-09-29 00:00:00");
/// ```
pub fn week_start(at: NaiveDateTime) -> NaiveDateTime {
    let days_since_monday = i64::from(at.weekday().num_days_from_monday());
    start_of_day(at)
        .checked_sub_signed(Duration::days(days_since_monday))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Sums the additional hours worked between Monday 00:00 and `shift_start`.
///
/// A record counts only when it belongs to the same employment (both ids
/// equal, or both absent) and is a different shift (both ids present and
/// different, or both absent). A blank id (`0` or `""`) counts as absent.
/// `OT`, `TOIL` and `Bank` records count their whole paid length; other
/// known types count a paid `OT` overrun.
///
/// # Arguments
///
/// * `shift_start` - Start of the shift being calculated
/// * `prior_shifts` - The worker's shift history
/// * `exclude_id` - Identifier of the shift being calculated
/// * `employment_id` - Employment of the shift being calculated
pub fn cumulative_additional_hours(
    shift_start: NaiveDateTime,
    prior_shifts: &[HistoricalShift],
    exclude_id: Option<&RecordId>,
    employment_id: Option<&RecordId>,
) -> i64 {
    let window_start = week_start(shift_start);

    let employment_id = given(employment_id);

    let total = prior_shifts
        .iter()
        .filter(|record| record.from >= window_start && record.from < shift_start)
        .filter(|record| record.shift_type != ShiftType::Unrecognized)
        .filter(|record| is_other_shift(given(exclude_id), given(record.id.as_ref())))
        .filter(|record| given(record.employment_id.as_ref()) == employment_id)
        .map(additional_hours_of)
        .fold(0i64, i64::saturating_add);

    debug!(%window_start, %shift_start, total, "cumulative additional hours");
    total
}

fn given(id: Option<&RecordId>) -> Option<&RecordId> {
    id.filter(|id| !id.is_blank())
}

fn is_other_shift(exclude_id: Option<&RecordId>, record_id: Option<&RecordId>) -> bool {
    match (exclude_id, record_id) {
        (Some(own), Some(other)) => own != other,
        (None, None) => true,
        _ => false,
    }
}

fn additional_hours_of(record: &HistoricalShift) -> i64 {
    let actual_to = end_after_start(record.from, record.actual_to);

    if record.shift_type.is_additional_hours() {
        shift_hours(record.from, actual_to, record.break_override)
    } else if record.overrun_type == Some(Overrun::Ot) {
        let planned_to = end_after_start(record.from, record.planned_to);
        shift_hours(planned_to, actual_to, record.break_override)
    } else {
        0
    }
}
