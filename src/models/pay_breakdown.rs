//! Calculation output types.
//!
//! Every value is a millisecond duration. [`PayBreakdown::to_hours`] gives
//! the same breakdown in decimal hours for reporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Milliseconds in one hour.
const MS_PER_HOUR: Decimal = Decimal::from_parts(3_600_000, 0, 0, false, 0);

/// Additional hours earned by a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalHours {
    /// Time paid at flat rate.
    pub flat: i64,
    /// Time paid at time and a half.
    pub time_and_half: i64,
    /// Time paid at double.
    pub double: i64,
    /// Time off in lieu earned.
    pub toil: i64,
    /// Time absent.
    pub absent_hours: i64,
}

impl AdditionalHours {
    /// Time paid above the weekly threshold, which cannot also earn
    /// unsocial hours.
    pub fn hours_over_threshold(&self) -> i64 {
        self.time_and_half + self.double
    }
}

/// Unsocial hours earned by a shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsocialHours {
    /// Time at the lower unsocial rate.
    pub lower_rate: i64,
    /// Time at the higher unsocial rate.
    pub higher_rate: i64,
}

/// The full Section 2 breakdown of a shift.
///
/// # Example
///
/// ```
/// use section2_engine::models::{AdditionalHours, PayBreakdown, UnsocialHours};
/// use rust_decimal::Decimal;
///
/// let breakdown = PayBreakdown::from_parts(
///     AdditionalHours { flat: 27_000_000, ..Default::default() },
///     UnsocialHours { lower_rate: 7_200_000, higher_rate: 0 },
/// );
/// let hours = breakdown.to_hours();
/// assert_eq!(hours.flat, Decimal::new(75, 1));
/// assert_eq!(hours.lower_rate, Decimal::new(2, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// Time paid at flat rate.
    pub flat: i64,
    /// Time paid at time and a half.
    pub time_and_half: i64,
    /// Time paid at double.
    pub double: i64,
    /// Time off in lieu earned.
    pub toil: i64,
    /// Time absent.
    pub absent_hours: i64,
    /// Time at the lower unsocial rate.
    pub lower_rate: i64,
    /// Time at the higher unsocial rate.
    pub higher_rate: i64,
}

impl PayBreakdown {
    /// Merges the two partial results.
    pub fn from_parts(additional: AdditionalHours, unsocial: UnsocialHours) -> Self {
        Self {
            flat: additional.flat,
            time_and_half: additional.time_and_half,
            double: additional.double,
            toil: additional.toil,
            absent_hours: additional.absent_hours,
            lower_rate: unsocial.lower_rate,
            higher_rate: unsocial.higher_rate,
        }
    }

    /// Returns true if every category is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// The additional hours part of the breakdown.
    pub fn additional_hours(&self) -> AdditionalHours {
        AdditionalHours {
            flat: self.flat,
            time_and_half: self.time_and_half,
            double: self.double,
            toil: self.toil,
            absent_hours: self.absent_hours,
        }
    }

    /// The unsocial hours part of the breakdown.
    pub fn unsocial_hours(&self) -> UnsocialHours {
        UnsocialHours {
            lower_rate: self.lower_rate,
            higher_rate: self.higher_rate,
        }
    }

    /// Converts every category to decimal hours.
    pub fn to_hours(&self) -> PayBreakdownHours {
        let hours = |ms: i64| Decimal::from(ms) / MS_PER_HOUR;
        PayBreakdownHours {
            flat: hours(self.flat),
            time_and_half: hours(self.time_and_half),
            double: hours(self.double),
            toil: hours(self.toil),
            absent_hours: hours(self.absent_hours),
            lower_rate: hours(self.lower_rate),
            higher_rate: hours(self.higher_rate),
        }
    }
}

/// A [`PayBreakdown`] expressed in decimal hours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayBreakdownHours {
    /// Hours paid at flat rate.
    pub flat: Decimal,
    /// Hours paid at time and a half.
    pub time_and_half: Decimal,
    /// Hours paid at double.
    pub double: Decimal,
    /// Hours of time off in lieu.
    pub toil: Decimal,
    /// Hours absent.
    pub absent_hours: Decimal,
    /// Hours at the lower unsocial rate.
    pub lower_rate: Decimal,
    /// Hours at the higher unsocial rate.
    pub higher_rate: Decimal,
}
