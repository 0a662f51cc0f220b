//! The unvalidated input to a Section 2 calculation.

use serde::{Deserialize, Serialize};

use crate::calendar::TimestampInput;

use super::history::HistoricalShift;
use super::shift::{Overrun, RecordId, ShiftType};

/// A shift as supplied by the caller, with raw timestamps and the worker's
/// shift history.
///
/// Absent fields take the documented defaults: `type` is `Normal`,
/// `overrun_type` is `OT`, and `actual_to` falls back to `planned_to`.
///
/// # Example
///
/// ```
/// use section2_engine::models::{Section2Request, ShiftType};
///
/// let request = Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00")
///     .with_type(ShiftType::Ot)
///     .with_actual_to("2025-10-02 23:00");
/// assert_eq!(request.shift_type, ShiftType::Ot);
/// assert!(request.shifts.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section2Request {
    /// Start of the shift.
    pub from: TimestampInput,
    /// Planned end of the shift.
    pub planned_to: TimestampInput,
    /// Actual end of the shift.
    #[serde(default)]
    pub actual_to: Option<TimestampInput>,
    /// The type of shift.
    #[serde(rename = "type", default)]
    pub shift_type: ShiftType,
    /// How any overrun is paid.
    #[serde(default)]
    pub overrun_type: Overrun,
    /// Identifier of this shift.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// Identifier of the employment the shift belongs to.
    #[serde(default)]
    pub employment_id: Option<RecordId>,
    /// Unpaid break length in milliseconds.
    #[serde(default)]
    pub break_override: Option<i64>,
    /// The worker's other shifts, in date order.
    #[serde(default)]
    pub shifts: Vec<HistoricalShift>,
}

impl Section2Request {
    /// Creates a `Normal` request with no history.
    pub fn new(from: impl Into<TimestampInput>, planned_to: impl Into<TimestampInput>) -> Self {
        Self {
            from: from.into(),
            planned_to: planned_to.into(),
            actual_to: None,
            shift_type: ShiftType::Normal,
            overrun_type: Overrun::Ot,
            id: None,
            employment_id: None,
            break_override: None,
            shifts: Vec::new(),
        }
    }

    /// Sets the actual end of the shift.
    pub fn with_actual_to(mut self, actual_to: impl Into<TimestampInput>) -> Self {
        self.actual_to = Some(actual_to.into());
        self
    }

    /// Sets the shift type.
    pub fn with_type(mut self, shift_type: ShiftType) -> Self {
        self.shift_type = shift_type;
        self
    }

    /// Sets the overrun policy.
    pub fn with_overrun(mut self, overrun_type: Overrun) -> Self {
        self.overrun_type = overrun_type;
        self
    }

    /// Sets the shift and employment identifiers.
    pub fn with_ids(mut self, id: Option<RecordId>, employment_id: Option<RecordId>) -> Self {
        self.id = id;
        self.employment_id = employment_id;
        self
    }

    /// Sets the break override.
    pub fn with_break_override(mut self, break_override: i64) -> Self {
        self.break_override = Some(break_override);
        self
    }

    /// Sets the shift history.
    pub fn with_shifts(mut self, shifts: Vec<HistoricalShift>) -> Self {
        self.shifts = shifts;
        self
    }
}
