// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil dates in the proleptic Gregorian calendar.

use crate::calendar::{self, MAX_EPOCH_DAY, MIN_EPOCH_DAY};
use crate::error::Error;
use crate::math;
use crate::month::Month;
use crate::parse;
use crate::period::Period;
use crate::time::Time;
use crate::weekday::DayOfWeek;
use crate::DateTime;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A date without a time of day or time zone.
///
/// Stored as a count of days since 1970-01-01, so ordering and equality are
/// plain integer comparisons. Year, month and day are derived on demand.
///
/// # Examples
///
/// ```
/// use calzone::{Date, Month, Period};
///
/// let date = Date::new(2018, 1, 31).unwrap();
/// let next = date.checked_add_period(Period::of_months(1)).unwrap();
/// assert_eq!(next, Date::new(2018, 2, 28).unwrap());
/// assert_eq!(next.month(), Month::February);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    days: i64,
}

impl Date {
    /// The earliest supported date, `-999999999-01-01`.
    pub const MIN: Date = Date { days: MIN_EPOCH_DAY };
    /// The latest supported date, `+999999999-12-31`.
    pub const MAX: Date = Date { days: MAX_EPOCH_DAY };
    /// 1970-01-01.
    pub const UNIX_EPOCH: Date = Date { days: 0 };

    // ── constructors ──────────────────────────────────────────────────

    /// Builds a date from a year, a month number (1-12) and a day of month.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Date, Error> {
        let year = math::check_year(year as i64)?;
        let month = math::check_month(month as i64)?;
        let length = calendar::days_in_month(month, calendar::is_leap_year(year));
        if day < 1 || day > length {
            return Err(Error::InvalidDayOfMonth { year, month, day });
        }
        Ok(Date {
            days: calendar::epoch_day_from_civil(year, month, day),
        })
    }

    /// Builds a date from a year and a [`Month`].
    pub fn of(year: i32, month: Month, day: u8) -> Result<Date, Error> {
        Date::new(year, month.number(), day)
    }

    /// Builds a date from a year and a one-based day of the year.
    pub fn from_ordinal(year: i32, day_of_year: u16) -> Result<Date, Error> {
        let year = math::check_year(year as i64)?;
        if day_of_year < 1 || day_of_year > calendar::days_in_year(year) {
            return Err(Error::InvalidDayOfYear { year, day_of_year });
        }
        let first = calendar::epoch_day_from_civil(year, 1, 1);
        Ok(Date {
            days: first + day_of_year as i64 - 1,
        })
    }

    /// Builds a date from a count of days since 1970-01-01.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Date, Error> {
        Ok(Date {
            days: calendar::check_epoch_day(epoch_day)?,
        })
    }

    // Components already checked by the caller.
    pub(crate) const fn from_valid_ymd(year: i32, month: u8, day: u8) -> Date {
        Date {
            days: calendar::epoch_day_from_civil(year, month, day),
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Days since 1970-01-01.
    #[inline]
    pub const fn epoch_day(self) -> i64 {
        self.days
    }

    /// Year, month number and day of month.
    #[inline]
    pub const fn ymd(self) -> (i32, u8, u8) {
        calendar::civil_from_epoch_day(self.days)
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.ymd().0
    }

    pub fn month(self) -> Month {
        Month::from_valid(self.month_number())
    }

    #[inline]
    pub const fn month_number(self) -> u8 {
        self.ymd().1
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.ymd().2
    }

    /// One-based day of the year.
    pub fn day_of_year(self) -> u16 {
        let (year, month, day) = self.ymd();
        let leap = calendar::is_leap_year(year);
        Month::from_valid(month).first_day_of_year(leap) + day as u16
    }

    pub fn day_of_week(self) -> DayOfWeek {
        DayOfWeek::from_epoch_day(self.days)
    }

    pub const fn is_in_leap_year(self) -> bool {
        calendar::is_leap_year(self.year())
    }

    /// Number of days in this date's month.
    pub const fn length_of_month(self) -> u8 {
        let (year, month, _) = self.ymd();
        calendar::days_in_month(month, calendar::is_leap_year(year))
    }

    /// Number of days in this date's year.
    pub const fn length_of_year(self) -> u16 {
        calendar::days_in_year(self.year())
    }

    // ── adjusters ─────────────────────────────────────────────────────

    /// The first day of this date's month.
    pub fn start_of_month(self) -> Date {
        Date {
            days: self.days - (self.day() as i64 - 1),
        }
    }

    /// The last day of this date's month.
    pub fn end_of_month(self) -> Date {
        Date {
            days: self.days + (self.length_of_month() - self.day()) as i64,
        }
    }

    /// January 1 of this date's year.
    pub fn start_of_year(self) -> Date {
        Date {
            days: self.days - (self.day_of_year() as i64 - 1),
        }
    }

    /// December 31 of this date's year.
    pub fn end_of_year(self) -> Date {
        Date {
            days: self.days + (self.length_of_year() - self.day_of_year()) as i64,
        }
    }

    /// Months elapsed since January of year 0.
    pub(crate) fn months_since_year_zero(self) -> i64 {
        let (year, month, _) = self.ymd();
        year as i64 * 12 + month as i64 - 1
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Adds days, failing if the result leaves the supported range.
    pub fn checked_add_days(self, days: i64) -> Result<Date, Error> {
        let days = math::plus_exact(self.days, days)?;
        Date::from_epoch_day(days).map_err(|_| Error::overflow("add days"))
    }

    pub fn checked_add_weeks(self, weeks: i64) -> Result<Date, Error> {
        self.checked_add_days(math::times_exact(weeks, 7)?)
    }

    /// Adds months, clamping the day to the last day of the resulting month.
    pub fn checked_add_months(self, months: i64) -> Result<Date, Error> {
        if months == 0 {
            return Ok(self);
        }
        let (year, month, day) = self.ymd();
        let (year, month) = calendar::add_months(year, month, months)?;
        let day = day.min(calendar::days_in_month(month, calendar::is_leap_year(year)));
        Ok(Date {
            days: calendar::epoch_day_from_civil(year, month, day),
        })
    }

    /// Adds years, clamping February 29 to February 28 in common years.
    pub fn checked_add_years(self, years: i64) -> Result<Date, Error> {
        self.checked_add_months(math::times_exact(years, 12)?)
    }

    /// Adds a period: years first, then months, then days.
    pub fn checked_add_period(self, period: Period) -> Result<Date, Error> {
        self.checked_add_years(period.years() as i64)?
            .checked_add_months(period.months() as i64)?
            .checked_add_days(period.days() as i64)
    }

    /// Subtracts a period by adding its negation.
    pub fn checked_sub_period(self, period: Period) -> Result<Date, Error> {
        self.checked_add_period(period.checked_neg()?)
    }

    // ── differences ───────────────────────────────────────────────────

    /// Days from this date to `end_exclusive`.
    pub const fn days_until(self, end_exclusive: Date) -> i64 {
        end_exclusive.days - self.days
    }

    /// Whole weeks from this date to `end_exclusive`.
    pub const fn weeks_until(self, end_exclusive: Date) -> i64 {
        self.days_until(end_exclusive) / 7
    }

    /// Whole months from this date to `end_exclusive`.
    ///
    /// A month is only counted once the day of month has been reached, so
    /// 2018-01-31 to 2018-02-28 is zero months.
    pub fn months_until(self, end_exclusive: Date) -> i64 {
        let start = self.months_since_year_zero() * 32 + self.day() as i64;
        let end = end_exclusive.months_since_year_zero() * 32 + end_exclusive.day() as i64;
        (end - start) / 32
    }

    /// Whole years from this date to `end_exclusive`.
    pub fn years_until(self, end_exclusive: Date) -> i64 {
        self.months_until(end_exclusive) / 12
    }

    /// The period from this date to `end_exclusive`, in years, months and days.
    ///
    /// The months are counted as [`Date::months_until`] counts them and the
    /// days are what remains after moving this date by that many months.
    /// Every component has the sign of the span, so
    /// `self.checked_add_months(period.total_months())` followed by
    /// `checked_add_days(period.days())` always gives `end_exclusive`.
    ///
    /// [`Date::checked_add_period`] clamps after the years and again after
    /// the months, so adding the period itself can land elsewhere when the
    /// start is February 29: 2020-02-29 to 2021-03-29 is `P1Y1M`, but
    /// 2020-02-29 plus `P1Y1M` is 2021-03-28.
    pub fn period_until(self, end_exclusive: Date) -> Result<Period, Error> {
        let total_months = self.months_until(end_exclusive);
        // The clamped anchor never passes `end_exclusive`.
        let anchor = self.checked_add_months(total_months)?;
        let days = anchor.days_until(end_exclusive);
        Ok(Period::new(
            math::to_i32_exact(total_months / 12)?,
            (total_months % 12) as i32,
            math::to_i32_exact(days)?,
        ))
    }

    // ── combination ───────────────────────────────────────────────────

    /// Combines this date with a time of day.
    #[inline]
    pub const fn at(self, time: Time) -> DateTime {
        DateTime::new(self, time)
    }

    /// Midnight at the start of this date.
    #[inline]
    pub const fn at_start_of_day(self) -> DateTime {
        DateTime::new(self, Time::MIDNIGHT)
    }
}

/// Adds a period.
///
/// # Panics
///
/// Panics when the result is out of range. Use [`Date::checked_add_period`]
/// to handle that case.
impl Add<Period> for Date {
    type Output = Date;

    fn add(self, rhs: Period) -> Date {
        self.checked_add_period(rhs)
            .expect("adding period to date overflowed")
    }
}

/// Subtracts a period.
///
/// # Panics
///
/// Panics when the result is out of range.
impl Sub<Period> for Date {
    type Output = Date;

    fn sub(self, rhs: Period) -> Date {
        self.checked_sub_period(rhs)
            .expect("subtracting period from date overflowed")
    }
}

/// Writes a year with at least four digits and a sign outside `0..=9999`.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{year:04}")
    } else if year > 9999 {
        write!(f, "+{year}")
    } else {
        write!(f, "-{:04}", year.unsigned_abs())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day) = self.ymd();
        write_year(f, year)?;
        write!(f, "-{month:02}-{day:02}")
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Date, Error> {
        parse::parse_all(s, "Date", |c| c.date())
    }
}

impl TryFrom<Date> for chrono::NaiveDate {
    type Error = Error;

    fn try_from(date: Date) -> Result<chrono::NaiveDate, Error> {
        use chrono::Datelike;
        let (year, month, day) = date.ymd();
        chrono::NaiveDate::from_ymd_opt(year, month as u32, day as u32).ok_or_else(|| {
            Error::out_of_range(
                "chrono year",
                year as i64,
                chrono::NaiveDate::MIN.year() as i64,
                chrono::NaiveDate::MAX.year() as i64,
            )
        })
    }
}

impl From<chrono::NaiveDate> for Date {
    fn from(date: chrono::NaiveDate) -> Date {
        use chrono::Datelike;
        Date {
            days: calendar::epoch_day_from_civil(date.year(), date.month() as u8, date.day() as u8),
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Date {
    fn arbitrary(g: &mut quickcheck::Gen) -> Date {
        // Keep most samples within a few thousand years of the epoch, with
        // occasional values near the supported limits.
        use quickcheck::Arbitrary;
        let raw = i64::arbitrary(g);
        let days = if bool::arbitrary(g) {
            math::floor_mod(raw, 4_000_000) - 2_000_000
        } else {
            MIN_EPOCH_DAY + math::floor_mod(raw, MAX_EPOCH_DAY - MIN_EPOCH_DAY + 1)
        };
        Date { days }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use quickcheck::quickcheck;

    fn d(y: i32, m: u8, day: u8) -> Date {
        Date::new(y, m, day).unwrap()
    }

    #[test]
    fn rejects_invalid_components() {
        assert_eq!(
            Date::new(2019, 2, 29),
            Err(Error::InvalidDayOfMonth {
                year: 2019,
                month: 2,
                day: 29
            })
        );
        assert!(Date::new(2020, 2, 29).is_ok());
        assert!(Date::new(2020, 13, 1).is_err());
        assert!(Date::new(2020, 4, 31).is_err());
        assert!(Date::new(2020, 4, 0).is_err());
        assert!(Date::from_ordinal(2019, 366).is_err());
        assert_eq!(Date::from_ordinal(2020, 366).unwrap(), d(2020, 12, 31));
        assert!(Date::from_epoch_day(MAX_EPOCH_DAY + 1).is_err());
    }

    #[test]
    fn accessors() {
        let date = d(2018, 3, 1);
        assert_eq!(date.day_of_year(), 60);
        assert_eq!(d(2020, 3, 1).day_of_year(), 61);
        assert_eq!(date.day_of_week(), DayOfWeek::Thursday);
        assert_eq!(date.length_of_month(), 31);
        assert_eq!(d(2020, 2, 10).length_of_month(), 29);
        assert_eq!(d(2020, 2, 10).end_of_month(), d(2020, 2, 29));
        assert_eq!(d(2020, 2, 10).start_of_month(), d(2020, 2, 1));
        assert_eq!(d(2020, 2, 10).start_of_year(), d(2020, 1, 1));
        assert_eq!(d(2020, 2, 10).end_of_year(), d(2020, 12, 31));
        assert_eq!(Date::MAX.end_of_year(), Date::MAX);
        assert_eq!(Date::MIN.start_of_year(), Date::MIN);
        assert_eq!(d(1900, 6, 1).length_of_year(), 365);
    }

    #[test]
    fn month_addition_clamps_day() {
        assert_eq!(d(2018, 1, 31).checked_add_months(1).unwrap(), d(2018, 2, 28));
        assert_eq!(d(2020, 1, 31).checked_add_months(1).unwrap(), d(2020, 2, 29));
        assert_eq!(d(2018, 3, 31).checked_add_months(-1).unwrap(), d(2018, 2, 28));
        assert_eq!(d(2020, 2, 29).checked_add_years(1).unwrap(), d(2021, 2, 28));
        assert_eq!(d(2018, 12, 15).checked_add_months(14).unwrap(), d(2020, 2, 15));
    }

    #[test]
    fn period_addition_applies_years_then_months_then_days() {
        let start = d(2019, 1, 31);
        let sum = start.checked_add_period(Period::new(1, 1, 1)).unwrap();
        // 2020-01-31, then 2020-02-29 (clamped), then 2020-03-01.
        assert_eq!(sum, d(2020, 3, 1));
        assert_eq!(start + Period::of_days(1), d(2019, 2, 1));
        assert_eq!(start - Period::of_years(1), d(2018, 1, 31));
    }

    #[test]
    fn arithmetic_overflow_is_reported() {
        let err = Date::MAX.checked_add_days(1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert!(Date::MIN.checked_add_months(-1).is_err());
        assert!(Date::MAX.checked_add_years(i64::MAX).is_err());
        assert!(Date::MIN.checked_add_days(i64::MIN).is_err());
    }

    #[test]
    fn differences() {
        let start = d(2018, 1, 31);
        assert_eq!(start.days_until(d(2018, 3, 1)), 29);
        assert_eq!(start.months_until(d(2018, 2, 28)), 0);
        assert_eq!(start.months_until(d(2018, 3, 31)), 2);
        assert_eq!(d(2018, 5, 10).months_until(d(2018, 2, 11)), -2);
        assert_eq!(start.years_until(d(2020, 1, 31)), 2);
        assert_eq!(start.weeks_until(d(2018, 2, 14)), 2);
    }

    #[test]
    fn period_until_is_added_back() {
        let start = d(2018, 1, 31);
        let end = d(2019, 3, 1);
        let period = start.period_until(end).unwrap();
        assert_eq!(period, Period::new(1, 1, 1));
        assert_eq!(start.checked_add_period(period).unwrap(), end);

        let back = end.period_until(start).unwrap();
        assert_eq!(back, Period::new(-1, -1, -1));
        assert_eq!(start.period_until(start).unwrap(), Period::ZERO);
    }

    #[test]
    fn negative_period_until_clamps_like_month_addition() {
        let start = d(2018, 3, 31);
        let end = d(2018, 2, 28);
        let period = start.period_until(end).unwrap();
        assert_eq!(period, Period::of_months(-1));
        assert_eq!(start.checked_add_period(period).unwrap(), end);
        assert_eq!(start.period_until(d(2018, 2, 27)).unwrap(), Period::new(0, -1, -1));
        assert_eq!(d(2018, 1, 15).period_until(d(2017, 12, 20)).unwrap(), Period::of_days(-26));
    }

    #[test]
    fn period_until_from_leap_day() {
        let start = d(2020, 2, 29);
        let end = d(2021, 3, 29);
        let period = start.period_until(end).unwrap();
        assert_eq!(period, Period::new(1, 1, 0));
        assert_eq!(start.checked_add_months(period.total_months()).unwrap(), end);
        assert_eq!(start.checked_add_period(period).unwrap(), d(2021, 3, 28));
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(d(2018, 1, 5).to_string(), "2018-01-05");
        assert_eq!(d(10_000, 1, 1).to_string(), "+10000-01-01");
        assert_eq!(d(-1, 12, 31).to_string(), "-0001-12-31");
        assert_eq!(d(0, 1, 1).to_string(), "0000-01-01");
        assert_eq!("2018-01-05".parse::<Date>().unwrap(), d(2018, 1, 5));
        assert_eq!("+10000-01-01".parse::<Date>().unwrap(), d(10_000, 1, 1));
        assert_eq!("-0001-12-31".parse::<Date>().unwrap(), d(-1, 12, 31));
        assert!("2018-1-05".parse::<Date>().is_err());
        assert!("2018-02-30".parse::<Date>().is_err());
        assert!("2018-01-05x".parse::<Date>().is_err());
        assert_eq!(
            "20180105".parse::<Date>().unwrap_err().kind(),
            ErrorKind::Parse
        );
    }

    #[test]
    fn chrono_interop() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let date = Date::from(naive);
        assert_eq!(date, d(2024, 2, 29));
        assert_eq!(chrono::NaiveDate::try_from(date).unwrap(), naive);
        assert!(chrono::NaiveDate::try_from(Date::MAX).is_err());
    }

    quickcheck! {
        fn prop_epoch_day_bijection(date: Date) -> bool {
            let (y, m, day) = date.ymd();
            Date::new(y, m, day) == Ok(date)
                && Date::from_epoch_day(date.epoch_day()) == Ok(date)
        }

        fn prop_text_round_trip(date: Date) -> bool {
            date.to_string().parse::<Date>() == Ok(date)
        }

        fn prop_ordinal_round_trip(date: Date) -> bool {
            Date::from_ordinal(date.year(), date.day_of_year()) == Ok(date)
        }

        fn prop_period_until_moves_start_to_end(start: Date, end: Date) -> bool {
            let period = start.period_until(end).unwrap();
            let same_sign = if start <= end {
                period.years() >= 0 && period.months() >= 0 && period.days() >= 0
            } else {
                period.years() <= 0 && period.months() <= 0 && period.days() <= 0
            };
            let moved = start
                .checked_add_months(period.total_months())
                .and_then(|date| date.checked_add_days(period.days() as i64));
            same_sign
                && period.total_months() == start.months_until(end)
                && period.months().abs() < 12
                && moved == Ok(end)
        }
    }
}
