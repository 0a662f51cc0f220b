//! Calculation options.

use serde::{Deserialize, Serialize};

use super::shift::FULL_TIME_WEEKLY_HOURS_MS;

/// How unsocial hours are estimated for leave or TOIL on unplanned relief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveReliefMethod {
    /// Whichever of the 13 and 52 week averages gives more unsocial time.
    #[default]
    Best,
    /// Average over the previous 13 weeks.
    Average13,
    /// Average over the previous 52 weeks.
    Average52,
    /// A flat 2 hours per shift.
    Flat,
    /// No unsocial hours.
    None,
}

/// Options controlling a Section 2 calculation.
///
/// # Example
///
/// ```
/// use section2_engine::models::{LeaveReliefMethod, Section2Options};
///
/// let options: Section2Options = serde_yaml::from_str("weekly_hours: 108000000").unwrap();
/// assert_eq!(options.weekly_hours, 108_000_000);
/// assert!(options.break_from_higher);
/// assert_eq!(options.leave_relief_ush_type, LeaveReliefMethod::Best);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section2Options {
    /// Contracted weekly hours in milliseconds.
    pub weekly_hours: i64,
    /// When true, a shift exactly half unsocial earns its whole length as
    /// unsocial; otherwise only shifts more than half unsocial do.
    pub half_is_all_ush: bool,
    /// When true, breaks come out of the higher paid portion first.
    pub break_from_higher: bool,
    /// Method for relief leave.
    pub leave_relief_ush_type: LeaveReliefMethod,
}

impl Default for Section2Options {
    fn default() -> Self {
        Self {
            weekly_hours: FULL_TIME_WEEKLY_HOURS_MS,
            half_is_all_ush: false,
            break_from_higher: true,
            leave_relief_ush_type: LeaveReliefMethod::Best,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Section2Options::default();
        assert_eq!(options.weekly_hours, 135_000_000);
        assert!(!options.half_is_all_ush);
        assert!(options.break_from_higher);
        assert_eq!(options.leave_relief_ush_type, LeaveReliefMethod::Best);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let options: Section2Options = serde_json::from_str("{}").unwrap();
        assert_eq!(options, Section2Options::default());
    }

    #[test]
    fn test_leave_relief_labels() {
        let cases = [
            ("\"best\"", LeaveReliefMethod::Best),
            ("\"average13\"", LeaveReliefMethod::Average13),
            ("\"average52\"", LeaveReliefMethod::Average52),
            ("\"flat\"", LeaveReliefMethod::Flat),
            ("\"none\"", LeaveReliefMethod::None),
        ];
        for (json, expected) in cases {
            let method: LeaveReliefMethod = serde_json::from_str(json).unwrap();
            assert_eq!(method, expected);
        }
    }
}
