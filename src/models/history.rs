//! Previously calculated shift records.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calendar::serde_timestamp;

use super::shift::{Overrun, RecordId, ShiftType};

/// A shift record with its calculated breakdown, read from the worker's log.
///
/// History is used for weekly threshold accounting and for averaging
/// unsocial hours over relief leave. Durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalShift {
    /// Identifier of the record.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Identifier of the employment the record belongs to.
    #[serde(default)]
    pub employment_id: Option<RecordId>,
    /// Calendar date of the shift.
    pub date: NaiveDate,
    /// Start of the shift.
    #[serde(with = "serde_timestamp")]
    pub from: NaiveDateTime,
    /// Planned end of the shift.
    #[serde(with = "serde_timestamp")]
    pub planned_to: NaiveDateTime,
    /// Actual end of the shift. May be stored earlier than `from` when the
    /// shift crossed midnight.
    #[serde(with = "serde_timestamp")]
    pub actual_to: NaiveDateTime,
    /// The type of shift.
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    /// How the overrun was paid, if recorded.
    #[serde(default)]
    pub overrun_type: Option<Overrun>,
    /// Break length override.
    #[serde(default)]
    pub break_override: Option<i64>,
    /// Total duration of the shift (`actual_to - from`).
    #[serde(default)]
    pub actual_hours: i64,
    /// Duration of the overrun (`actual_to - planned_to`).
    #[serde(default)]
    pub overrun_hours: Option<i64>,
    /// Time paid at time and a half.
    #[serde(default)]
    pub time_and_half: i64,
    /// Time paid at double.
    #[serde(default)]
    pub double: i64,
    /// Time paid at the lower unsocial rate.
    #[serde(default)]
    pub lower_rate: i64,
    /// Time paid at the higher unsocial rate.
    #[serde(default)]
    pub higher_rate: i64,
}

impl HistoricalShift {
    /// Time in the record that could have earned unsocial hours.
    ///
    /// Excludes time already paid over the weekly threshold and any overrun
    /// banked as TOIL. Never negative.
    pub fn unsocial_eligible_hours(&self) -> i64 {
        let toil_overrun = match self.overrun_type {
            Some(Overrun::Toil) => self.overrun_hours.unwrap_or(0),
            _ => 0,
        };
        self.actual_hours
            .saturating_sub(self.time_and_half)
            .saturating_sub(self.double)
            .saturating_sub(toil_overrun)
            .max(0)
    }
}
