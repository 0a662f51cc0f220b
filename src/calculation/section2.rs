//! Section 2 pay decomposition entry points.
//!
//! [`calculate_section2`] validates a request, runs the additional hours
//! engine and then the unsocial hours engine, and merges both into a
//! [`PayBreakdown`]. Invalid input never fails the call: it is logged and
//! produces an all-zero breakdown.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::calendar::{BankHolidayCalendar, BankHolidayLookup, TimestampInput, parse_timestamp};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    FULL_TIME_WEEKLY_HOURS_MS, PayBreakdown, Section2Options, Section2Request, Shift,
};

use super::additional_hours::calculate_additional_hours;
use super::breaks::BreakPolicy;
use super::unsocial_hours::{UnsocialParams, calculate_unsocial_hours};

fn resolve_instant(field: &str, input: &TimestampInput) -> EngineResult<chrono::NaiveDateTime> {
    parse_timestamp(input).ok_or_else(|| EngineError::InvalidTimestamp {
        field: field.to_string(),
        value: input.to_string(),
    })
}

/// Converts a request into a validated [`Shift`].
///
/// `actual_to` falls back to `planned_to` when it is missing or an empty
/// string. The worker's weekly hours come from `options`, clamped to
/// `0..=FULL_TIME_WEEKLY_HOURS_MS`.
///
/// # Errors
///
/// Returns `InvalidTimestamp` for a timestamp that cannot be parsed and
/// `TimestampOrder` unless `from <= planned_to <= actual_to`.
pub fn resolve_shift(request: &Section2Request, options: &Section2Options) -> EngineResult<Shift> {
    let from = resolve_instant("from", &request.from)?;
    let planned_to = resolve_instant("planned_to", &request.planned_to)?;
    let actual_to = match &request.actual_to {
        Some(input) if !input.is_empty() => resolve_instant("actual_to", input)?,
        _ => planned_to,
    };

    let shift = Shift {
        id: request.id.clone(),
        employment_id: request.employment_id.clone(),
        from,
        planned_to,
        actual_to,
        shift_type: request.shift_type,
        overrun_type: request.overrun_type,
        weekly_hours: options.weekly_hours.clamp(0, FULL_TIME_WEEKLY_HOURS_MS),
        break_override: request.break_override,
    };
    shift.validate_order()?;
    Ok(shift)
}

/// Calculates the Section 2 pay breakdown of a shift.
///
/// # Arguments
///
/// * `request` - The shift and the worker's history
/// * `options` - Calculation options
/// * `calendar` - Bank holiday lookup
///
/// # Returns
///
/// The breakdown in milliseconds. Malformed or out of order timestamps are
/// logged at `warn` level and give an all-zero breakdown.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::calculate_section2;
/// use section2_engine::calendar::BankHolidayCalendar;
/// use section2_engine::models::{Section2Options, Section2Request};
///
/// let request = Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00");
/// let breakdown = calculate_section2(
///     &request,
///     &Section2Options::default(),
///     &BankHolidayCalendar::england_and_wales(),
/// );
/// assert_eq!(breakdown.lower_rate, 7_200_000);
/// assert_eq!(breakdown.higher_rate, 0);
/// ```
pub fn calculate_section2(
    request: &Section2Request,
    options: &Section2Options,
    calendar: &dyn BankHolidayLookup,
) -> PayBreakdown {
    let shift = match resolve_shift(request, options) {
        Ok(shift) => shift,
        Err(error) => {
            warn!(%error, from = %request.from, planned_to = %request.planned_to,
                "rejected section 2 request");
            return PayBreakdown::default();
        }
    };

    let additional = calculate_additional_hours(
        &shift,
        &request.shifts,
        BreakPolicy::from(options),
        calendar,
    );
    let params = UnsocialParams {
        shift: &shift,
        hours_over_threshold: additional.hours_over_threshold(),
        shifts: &request.shifts,
        options,
    };
    let unsocial = calculate_unsocial_hours(&params, calendar);

    let breakdown = PayBreakdown::from_parts(additional, unsocial);
    debug!(shift_type = %shift.shift_type, from = %shift.from, ?breakdown, "section 2 breakdown");
    breakdown
}

/// Section 2 calculator holding default options and a shared bank holiday
/// calendar.
///
/// Cloning is cheap; the calendar is shared between clones.
#[derive(Clone)]
pub struct Section2Calculator {
    calendar: Arc<dyn BankHolidayLookup>,
    options: Section2Options,
}

impl fmt::Debug for Section2Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Section2Calculator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Section2Calculator {
    /// Creates a calculator from a calendar and default options.
    pub fn new(calendar: Arc<dyn BankHolidayLookup>, options: Section2Options) -> Self {
        Self { calendar, options }
    }

    /// Creates a calculator with default options and the built-in England
    /// and Wales calendar.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(BankHolidayCalendar::england_and_wales()),
            Section2Options::default(),
        )
    }

    /// Creates a calculator from a configuration directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use section2_engine::calculation::Section2Calculator;
    ///
    /// let calculator = Section2Calculator::from_config("./config/section2")?;
    /// # Ok::<(), section2_engine::error::EngineError>(())
    /// ```
    pub fn from_config<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let loader = ConfigLoader::load(path)?;
        Ok(Self::new(
            Arc::new(loader.calendar().clone()),
            loader.options().clone(),
        ))
    }

    /// Returns the default options.
    pub fn options(&self) -> &Section2Options {
        &self.options
    }

    /// Calculates a breakdown with the default options.
    pub fn calculate(&self, request: &Section2Request) -> PayBreakdown {
        self.calculate_with(request, &self.options)
    }

    /// Calculates a breakdown with the given options.
    pub fn calculate_with(
        &self,
        request: &Section2Request,
        options: &Section2Options,
    ) -> PayBreakdown {
        calculate_section2(request, options, self.calendar.as_ref())
    }

    /// Calculates each request independently with the default options.
    pub fn calculate_batch(&self, requests: &[Section2Request]) -> Vec<PayBreakdown> {
        requests.iter().map(|request| self.calculate(request)).collect()
    }
}

impl Default for Section2Calculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
