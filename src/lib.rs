//! Section 2 pay decomposition engine
//!
//! This crate splits a worked shift into the pay categories of a UK
//! "Section 2" agreement: flat rate, time and a half and double additional
//! hours, TOIL, absence, and lower and higher rate unsocial hours. All
//! durations are milliseconds.

#![warn(missing_docs)]

pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
