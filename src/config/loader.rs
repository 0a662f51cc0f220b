//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the Section 2
//! configuration from YAML and the bank holiday calendar it names.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calendar::BankHolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::Section2Options;

use super::types::Section2Config;

/// Loads and provides access to the Section 2 configuration.
///
/// # Directory Structure
///
/// ```text
/// config/section2/
/// ├── section2.yaml       # Option defaults and bank holiday source
/// └── bank-holidays.json  # gov.uk bank holiday data (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use section2_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/section2").unwrap();
/// println!("Weekly hours: {}", loader.options().weekly_hours);
/// println!("Bank holidays loaded: {}", loader.calendar().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Section2Config,
    calendar: BankHolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/section2")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `section2.yaml` or the named bank holiday file is missing
    /// - Either file cannot be parsed
    /// - The bank holiday file has no events for the configured division
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<Section2Config>(&path.join("section2.yaml"))?;

        let calendar = match &config.bank_holidays.file {
            Some(file) => {
                BankHolidayCalendar::load(path.join(file), &config.bank_holidays.division)?
            }
            None => BankHolidayCalendar::england_and_wales(),
        };

        info!(
            path = %path.display(),
            division = %config.bank_holidays.division,
            bank_holidays = calendar.len(),
            "loaded section 2 configuration"
        );

        Ok(Self { config, calendar })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &Section2Config {
        &self.config
    }

    /// Returns the default calculation options.
    pub fn options(&self) -> &Section2Options {
        &self.config.options
    }

    /// Returns the bank holiday calendar.
    pub fn calendar(&self) -> &BankHolidayCalendar {
        &self.calendar
    }
}
