//! Shift model and related types.
//!
//! This module defines the validated [`Shift`] the engines calculate over,
//! together with its shift type, overrun policy and identifiers.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calendar::serde_timestamp;
use crate::error::{EngineError, EngineResult};

/// Contracted full-time weekly hours (37.5h) in milliseconds.
pub const FULL_TIME_WEEKLY_HOURS_MS: i64 = 135_000_000;

/// The type of shift; dictates which pay categories a shift can earn.
///
/// Serialized with the labels used in rota and payroll exports, e.g.
/// `"AL (relief)"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    /// A planned shift; earns unsocial hours.
    #[default]
    Normal,
    /// Overtime; earns unsocial hours and additional hours.
    #[serde(rename = "OT")]
    Ot,
    /// Worked for time off in lieu; earns no unsocial hours.
    #[serde(rename = "TOIL")]
    Toil,
    /// Annual leave on a planned shift; earns unsocial hours.
    #[serde(rename = "AL")]
    AnnualLeave,
    /// Annual leave on unplanned relief; unsocial hours are averaged.
    #[serde(rename = "AL (relief)")]
    AnnualLeaveRelief,
    /// TOIL taken on a planned shift; earns unsocial hours.
    #[serde(rename = "Absent (TOIL)")]
    AbsentToil,
    /// TOIL taken on unplanned relief; unsocial hours are averaged.
    #[serde(rename = "Absent (TOIL relief)")]
    AbsentToilRelief,
    /// Sickness; earns nothing.
    Sick,
    /// Bank (casual) work; paid at flat rate with holiday pay uplift.
    Bank,
    /// Any other label. Earns nothing and is ignored in history.
    #[serde(other)]
    Unrecognized,
}

impl ShiftType {
    /// Types whose whole planned length counts as additional hours.
    pub fn is_additional_hours(self) -> bool {
        matches!(self, ShiftType::Ot | ShiftType::Toil | ShiftType::Bank)
    }

    /// Absence types, recorded as absent hours.
    pub fn is_absence(self) -> bool {
        matches!(self, ShiftType::AbsentToil | ShiftType::AbsentToilRelief)
    }

    /// Types that earn unsocial hours for their planned time.
    pub fn is_unsocial(self) -> bool {
        matches!(
            self,
            ShiftType::Normal
                | ShiftType::Ot
                | ShiftType::AnnualLeave
                | ShiftType::AbsentToil
                | ShiftType::Bank
        )
    }

    /// Leave or TOIL on unplanned relief.
    pub fn is_relief(self) -> bool {
        matches!(self, ShiftType::AnnualLeaveRelief | ShiftType::AbsentToilRelief)
    }

    /// The label used in serialized records.
    pub fn label(self) -> &'static str {
        match self {
            ShiftType::Normal => "Normal",
            ShiftType::Ot => "OT",
            ShiftType::Toil => "TOIL",
            ShiftType::AnnualLeave => "AL",
            ShiftType::AnnualLeaveRelief => "AL (relief)",
            ShiftType::AbsentToil => "Absent (TOIL)",
            ShiftType::AbsentToilRelief => "Absent (TOIL relief)",
            ShiftType::Sick => "Sick",
            ShiftType::Bank => "Bank",
            ShiftType::Unrecognized => "Unrecognized",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How time worked beyond `planned_to` is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Overrun {
    /// Paid as overtime; counts toward additional hours.
    #[default]
    #[serde(rename = "OT")]
    Ot,
    /// Banked as time off in lieu.
    #[serde(rename = "TOIL")]
    Toil,
}

impl fmt::Display for Overrun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overrun::Ot => write!(f, "OT"),
            Overrun::Toil => write!(f, "TOIL"),
        }
    }
}

/// A shift or employment identifier, numeric or text as delivered by the
/// source data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// A numeric database key.
    Number(i64),
    /// A text key.
    Text(String),
}

impl RecordId {
    /// Zero and the empty string stand in for a missing identifier.
    pub fn is_blank(&self) -> bool {
        match self {
            RecordId::Number(n) => *n == 0,
            RecordId::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Text(value)
    }
}

/// A shift with validated timestamps, ready for calculation.
///
/// Durations are milliseconds.
///
/// # Example
///
/// ```
/// use section2_engine::models::{Shift, ShiftType};
/// use chrono::NaiveDateTime;
///
/// let from = NaiveDateTime::parse_from_str("2025-10-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let to = NaiveDateTime::parse_from_str("2025-10-02 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// let shift = Shift::new(from, to);
/// assert_eq!(shift.shift_type, ShiftType::Normal);
/// assert_eq!(shift.planned_length(), 36_000_000);
/// assert_eq!(shift.overrun_length(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Identifier of this shift, used to exclude it from its own history.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Identifier of the employment the shift belongs to.
    #[serde(default)]
    pub employment_id: Option<RecordId>,
    /// Start of the shift.
    #[serde(with = "serde_timestamp")]
    pub from: NaiveDateTime,
    /// Planned end of the shift.
    #[serde(with = "serde_timestamp")]
    pub planned_to: NaiveDateTime,
    /// Actual end of the shift.
    #[serde(with = "serde_timestamp")]
    pub actual_to: NaiveDateTime,
    /// The type of shift.
    #[serde(rename = "type", default)]
    pub shift_type: ShiftType,
    /// How any overrun is paid.
    #[serde(default)]
    pub overrun_type: Overrun,
    /// Contracted weekly hours.
    #[serde(default = "default_weekly_hours")]
    pub weekly_hours: i64,
    /// Unpaid break length, replacing the default 30 minutes over 6 hours.
    #[serde(default)]
    pub break_override: Option<i64>,
}

fn default_weekly_hours() -> i64 {
    FULL_TIME_WEEKLY_HOURS_MS
}

impl Shift {
    /// Creates a full-time `Normal` shift that ends as planned.
    pub fn new(from: NaiveDateTime, planned_to: NaiveDateTime) -> Self {
        Self {
            id: None,
            employment_id: None,
            from,
            planned_to,
            actual_to: planned_to,
            shift_type: ShiftType::Normal,
            overrun_type: Overrun::Ot,
            weekly_hours: FULL_TIME_WEEKLY_HOURS_MS,
            break_override: None,
        }
    }

    /// Length of the planned shift.
    pub fn planned_length(&self) -> i64 {
        (self.planned_to - self.from).num_milliseconds()
    }

    /// Time worked beyond `planned_to`.
    pub fn overrun_length(&self) -> i64 {
        (self.actual_to - self.planned_to).num_milliseconds()
    }

    /// Returns true if `from <= planned_to <= actual_to`.
    pub fn is_in_order(&self) -> bool {
        self.from <= self.planned_to && self.planned_to <= self.actual_to
    }

    /// Returns `TimestampOrder` unless `from <= planned_to <= actual_to`.
    pub fn validate_order(&self) -> EngineResult<()> {
        if self.is_in_order() {
            Ok(())
        } else {
            Err(EngineError::TimestampOrder {
                from: self.from,
                planned_to: self.planned_to,
                actual_to: self.actual_to,
            })
        }
    }
}
