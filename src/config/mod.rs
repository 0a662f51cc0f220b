//! Configuration loading for the Section 2 engine.
//!
//! This module loads option defaults and the bank holiday calendar from a
//! configuration directory.
//!
//! # Example
//!
//! ```no_run
//! use section2_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/section2").unwrap();
//! println!("Break from higher: {}", config.options().break_from_higher);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BankHolidayConfig, Section2Config};
