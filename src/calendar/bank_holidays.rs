//! Bank holiday calendar.
//!
//! The engines only ever ask one question of the calendar: is this date a
//! bank holiday? That question is the [`BankHolidayLookup`] trait, so callers
//! can inject a fixed calendar in tests or a calendar loaded from the gov.uk
//! `bank-holidays.json` feed in production.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};

/// The division used when none is specified.
pub const DEFAULT_DIVISION: &str = "england-and-wales";

/// England and Wales bank holidays shipped with the crate.
const ENGLAND_AND_WALES: &[(i32, u32, u32)] = &[
    (2022, 1, 3),
    (2022, 4, 15),
    (2022, 4, 18),
    (2022, 5, 2),
    (2022, 6, 2),
    (2022, 6, 3),
    (2022, 8, 29),
    (2022, 9, 19),
    (2022, 12, 26),
    (2022, 12, 27),
    (2023, 1, 2),
    (2023, 4, 7),
    (2023, 4, 10),
    (2023, 5, 1),
    (2023, 5, 8),
    (2023, 5, 29),
    (2023, 8, 28),
    (2023, 12, 25),
    (2023, 12, 26),
    (2024, 1, 1),
    (2024, 3, 29),
    (2024, 4, 1),
    (2024, 5, 6),
    (2024, 5, 27),
    (2024, 8, 26),
    (2024, 12, 25),
    (2024, 12, 26),
    (2025, 1, 1),
    (2025, 4, 18),
    (2025, 4, 21),
    (2025, 5, 5),
    (2025, 5, 26),
    (2025, 8, 25),
    (2025, 12, 25),
    (2025, 12, 26),
    (2026, 1, 1),
    (2026, 4, 3),
    (2026, 4, 6),
    (2026, 5, 4),
    (2026, 5, 25),
    (2026, 8, 31),
    (2026, 12, 25),
    (2026, 12, 28),
    (2027, 1, 1),
    (2027, 3, 26),
    (2027, 3, 29),
    (2027, 5, 3),
    (2027, 5, 31),
    (2027, 8, 30),
    (2027, 12, 27),
    (2027, 12, 28),
];

/// Answers whether a calendar date is a bank holiday.
///
/// Implementations must be safe to share between threads; the engines take
/// `&dyn BankHolidayLookup` and the calculator service holds an `Arc`.
pub trait BankHolidayLookup: Send + Sync {
    /// Returns true if `date` is a bank holiday.
    fn is_bank_holiday(&self, date: NaiveDate) -> bool;
}

/// A fixed set of bank holiday dates.
///
/// # Example
///
/// ```
/// use section2_engine::calendar::{BankHolidayCalendar, BankHolidayLookup};
/// use chrono::NaiveDate;
///
/// let calendar = BankHolidayCalendar::england_and_wales();
/// assert!(calendar.is_bank_holiday(NaiveDate::from_ymd_opt(2025, 8, 25).unwrap()));
/// assert!(!calendar.is_bank_holiday(NaiveDate::from_ymd_opt(2025, 8, 26).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankHolidayCalendar {
    dates: HashSet<NaiveDate>,
}

impl BankHolidayCalendar {
    /// Creates a calendar from the given dates.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Creates a calendar with no bank holidays.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in England and Wales calendar (2022 to 2027).
    pub fn england_and_wales() -> Self {
        Self::new(
            ENGLAND_AND_WALES
                .iter()
                .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        )
    }

    /// Parses the gov.uk `bank-holidays.json` format and selects one division.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document, keyed by division name
    /// * `division` - The division to select (e.g. "england-and-wales")
    ///
    /// # Returns
    ///
    /// Returns the calendar on success, or an error if:
    /// - The document is not valid `bank-holidays.json` (`CalendarParseError`)
    /// - The division is absent (`DivisionNotFound`)
    ///
    /// # Example
    ///
    /// ```
    /// use section2_engine::calendar::{BankHolidayCalendar, BankHolidayLookup};
    /// use chrono::NaiveDate;
    ///
    /// let json = r#"{
    ///     "scotland": {
    ///         "division": "scotland",
    ///         "events": [{ "title": "St Andrew's Day", "date": "2025-12-01" }]
    ///     }
    /// }"#;
    /// let calendar = BankHolidayCalendar::from_gov_uk_json(json, "scotland")?;
    /// assert!(calendar.is_bank_holiday(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
    /// # Ok::<(), section2_engine::error::EngineError>(())
    /// ```
    pub fn from_gov_uk_json(json: &str, division: &str) -> EngineResult<Self> {
        let mut divisions: HashMap<String, BankHolidayDivision> =
            serde_json::from_str(json).map_err(|e| EngineError::CalendarParseError {
                message: e.to_string(),
            })?;

        let selected = divisions
            .remove(division)
            .ok_or_else(|| EngineError::DivisionNotFound {
                division: division.to_string(),
            })?;

        Ok(Self::new(selected.events.into_iter().map(|e| e.date)))
    }

    /// Loads a gov.uk `bank-holidays.json` file and selects one division.
    ///
    /// A missing file is `ConfigNotFound`; an unreadable document is
    /// `ConfigParseError` carrying the path.
    pub fn load<P: AsRef<Path>>(path: P, division: &str) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let calendar = Self::from_gov_uk_json(&content, division).map_err(|e| match e {
            EngineError::CalendarParseError { message } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        info!(path = %path_str, division, dates = calendar.len(), "loaded bank holiday calendar");
        Ok(calendar)
    }

    /// Number of bank holidays in the calendar.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar has no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl BankHolidayLookup for BankHolidayCalendar {
    fn is_bank_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

/// One division of the gov.uk bank holiday feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankHolidayDivision {
    /// Division name, e.g. "england-and-wales".
    pub division: String,
    /// The bank holidays in this division.
    pub events: Vec<BankHolidayEvent>,
}

/// A single bank holiday in the gov.uk feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankHolidayEvent {
    /// Display name of the holiday.
    pub title: String,
    /// The date of the holiday.
    pub date: NaiveDate,
    /// Free-text notes (e.g. "Substitute day").
    #[serde(default)]
    pub notes: String,
    /// Whether flags are flown.
    #[serde(default)]
    pub bunting: bool,
}
