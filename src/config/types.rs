//! Configuration types for the Section 2 engine.
//!
//! These types mirror the structure of `section2.yaml`.

use serde::{Deserialize, Serialize};

use crate::calendar::DEFAULT_DIVISION;
use crate::models::Section2Options;

/// Contents of `section2.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section2Config {
    /// Default calculation options.
    #[serde(default)]
    pub options: Section2Options,
    /// Where bank holiday dates come from.
    #[serde(default)]
    pub bank_holidays: BankHolidayConfig,
}

/// Bank holiday source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHolidayConfig {
    /// Division of the gov.uk data to use (e.g., "england-and-wales").
    #[serde(default = "default_division")]
    pub division: String,
    /// Path to a gov.uk `bank-holidays.json` file, relative to the
    /// configuration directory. The built-in England and Wales table is
    /// used when absent.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_division() -> String {
    DEFAULT_DIVISION.to_string()
}

impl Default for BankHolidayConfig {
    fn default() -> Self {
        Self {
            division: default_division(),
            file: None,
        }
    }
}
