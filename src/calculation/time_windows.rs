//! Bank holiday and unsocial hours windows.
//!
//! Classifies an interval `[from, to)` by the day of each endpoint and
//! measures the time it spends in the bank holiday window and in the lower
//! and higher unsocial rate windows.
//!
//! - Higher rate: all of Sunday and of any bank holiday.
//! - Lower rate: all of Saturday and 20:00 to 06:00 on other nights.
//!
//! A bank holiday takes precedence over its day of the week. Only the two
//! endpoints are classified, so the results are exact for shifts shorter
//! than a day.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Weekday};

use crate::calendar::BankHolidayLookup;

/// Time an interval spends in each unsocial rate band, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnsocialOverlap {
    /// Time in the lower rate window.
    pub lower: i64,
    /// Time in the higher rate window.
    pub higher: i64,
}

impl UnsocialOverlap {
    /// Combined unsocial time.
    pub fn total(&self) -> i64 {
        self.lower + self.higher
    }
}

/// Day classification of one endpoint.
#[derive(Debug, Clone, Copy)]
struct DayClass {
    weekday: Weekday,
    bank_holiday: bool,
}

impl DayClass {
    fn of(at: NaiveDateTime, calendar: &dyn BankHolidayLookup) -> Self {
        Self {
            weekday: at.weekday(),
            bank_holiday: calendar.is_bank_holiday(at.date()),
        }
    }

    fn is(&self, weekday: Weekday) -> bool {
        self.weekday == weekday
    }
}

/// Midnight at the start of the day containing `at`.
pub(crate) fn start_of_day(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

/// `hour` o'clock on the day containing `at`; 24 is the following midnight.
/// Saturates at the last representable instant.
fn at_hour(at: NaiveDateTime, hour: i64) -> NaiveDateTime {
    start_of_day(at)
        .checked_add_signed(Duration::hours(hour))
        .unwrap_or(NaiveDateTime::MAX)
}

fn millis(duration: Duration) -> i64 {
    duration.num_milliseconds()
}

/// Time in the bank holiday window.
///
/// Both endpoints on a bank holiday counts the whole interval; otherwise
/// only the part of the interval on the bank holiday side of `to`'s
/// midnight counts.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::bank_holiday_overlap;
/// use section2_engine::calendar::BankHolidayCalendar;
/// use chrono::NaiveDateTime;
///
/// let calendar = BankHolidayCalendar::england_and_wales();
/// // Sunday 2025-08-24 into Summer bank holiday Monday
/// let from = NaiveDateTime::parse_from_str("2025-08-24 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let to = NaiveDateTime::parse_from_str("2025-08-25 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(bank_holiday_overlap(from, to, &calendar), 28_800_000);
/// ```
pub fn bank_holiday_overlap(
    from: NaiveDateTime,
    to: NaiveDateTime,
    calendar: &dyn BankHolidayLookup,
) -> i64 {
    if to <= from {
        return 0;
    }

    let from_bh = calendar.is_bank_holiday(from.date());
    let to_bh = calendar.is_bank_holiday(to.date());

    match (from_bh, to_bh) {
        (false, false) => 0,
        (true, true) => millis(to - from),
        (false, true) => millis(to - start_of_day(to)),
        (true, false) => millis(start_of_day(to) - from),
    }
}

/// Time in the lower unsocial rate window.
pub fn lower_rate_overlap(
    from: NaiveDateTime,
    to: NaiveDateTime,
    calendar: &dyn BankHolidayLookup,
) -> i64 {
    if to <= from {
        return 0;
    }

    let f = DayClass::of(from, calendar);
    let t = DayClass::of(to, calendar);

    // Sunday or bank holiday only
    if (f.is(Weekday::Sun) && t.is(Weekday::Sun))
        || (f.bank_holiday && t.bank_holiday)
        || (f.is(Weekday::Sun) && t.bank_holiday)
    {
        return 0;
    }

    if f.is(Weekday::Sat) && t.is(Weekday::Sat) {
        return millis(to - from);
    }

    // Saturday into Sunday, or anything into a bank holiday
    if (f.is(Weekday::Sat) && t.is(Weekday::Sun)) || t.bank_holiday {
        return millis(start_of_day(to) - from);
    }

    // Sunday into Monday, or bank holiday into an ordinary day
    if (f.is(Weekday::Sun) && t.is(Weekday::Mon)) || (f.bank_holiday && !t.is(Weekday::Sun)) {
        return millis(to.min(at_hour(to, 6)) - from.max(start_of_day(to)));
    }

    let from_0600 = at_hour(from, 6);
    let early = if from < from_0600 {
        millis(to.min(from_0600) - from)
    } else {
        0
    };

    let from_2000 = at_hour(from, 20);

    if f.is(Weekday::Fri) && t.is(Weekday::Sat) {
        return early + millis(to - from.max(from_2000));
    }

    let from_2400 = at_hour(from, 24);
    let mut lower = early;

    if to > from_2000 {
        lower += millis(to.min(from_2400) - from.max(from_2000));
    }

    if to > from_2400 {
        lower += millis(to.min(at_hour(to, 6)) - from_2400);
    }

    // evening of the following day, only for shifts over 20 hours
    let to_2000 = at_hour(to, 20);
    if to > to_2000 && to_2000 > from_2400 {
        lower += millis(to - to_2000.max(from));
    }

    lower
}

/// Time in the higher unsocial rate window.
pub fn higher_rate_overlap(
    from: NaiveDateTime,
    to: NaiveDateTime,
    calendar: &dyn BankHolidayLookup,
) -> i64 {
    if to <= from {
        return 0;
    }

    let f = DayClass::of(from, calendar);
    let t = DayClass::of(to, calendar);
    let from_higher = f.is(Weekday::Sun) || f.bank_holiday;
    let to_higher = t.is(Weekday::Sun) || t.bank_holiday;

    if !from_higher && !to_higher {
        return 0;
    }

    if from_higher && to_higher {
        return millis(to - from);
    }

    // Saturday into Sunday, or an ordinary day into a bank holiday
    if f.is(Weekday::Sat) || (!f.bank_holiday && t.bank_holiday) {
        return millis(to - start_of_day(to));
    }

    // Sunday into Monday, or bank holiday into an ordinary day
    if f.is(Weekday::Sun) || (f.bank_holiday && !t.bank_holiday) {
        return millis(start_of_day(to) - from);
    }

    0
}

/// Time in both unsocial rate bands.
///
/// # Example
///
/// ```
/// use section2_engine::calculation::{UnsocialOverlap, unsocial_overlap};
/// use section2_engine::calendar::BankHolidayCalendar;
/// use chrono::NaiveDateTime;
///
/// let calendar = BankHolidayCalendar::england_and_wales();
/// // Saturday 20:00 to Sunday 08:00
/// let from = NaiveDateTime::parse_from_str("2025-10-04 20:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let to = NaiveDateTime::parse_from_str("2025-10-05 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(
///     unsocial_overlap(from, to, &calendar),
///     UnsocialOverlap { lower: 14_400_000, higher: 28_800_000 }
/// );
/// ```
pub fn unsocial_overlap(
    from: NaiveDateTime,
    to: NaiveDateTime,
    calendar: &dyn BankHolidayLookup,
) -> UnsocialOverlap {
    UnsocialOverlap {
        lower: lower_rate_overlap(from, to, calendar),
        higher: higher_rate_overlap(from, to, calendar),
    }
}
