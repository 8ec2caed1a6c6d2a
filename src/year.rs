// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Whole calendar years.

use crate::calendar::{self, MAX_YEAR, MIN_YEAR};
use crate::date::{write_year, Date};
use crate::error::Error;
use crate::math;
use crate::month::Month;
use crate::parse;
use crate::range::DateRange;
use crate::year_month::YearMonth;
use std::fmt;
use std::str::FromStr;

/// A proleptic Gregorian year in the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Year {
    value: i32,
}

impl Year {
    pub const MIN: Year = Year { value: MIN_YEAR };
    pub const MAX: Year = Year { value: MAX_YEAR };

    pub fn new(value: i32) -> Result<Year, Error> {
        Ok(Year {
            value: math::check_year(value as i64)?,
        })
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.value
    }

    #[inline]
    pub const fn is_leap(self) -> bool {
        calendar::is_leap_year(self.value)
    }

    /// 365 or 366.
    #[inline]
    pub const fn length(self) -> u16 {
        calendar::days_in_year(self.value)
    }

    pub const fn start_date(self) -> Date {
        Date::from_valid_ymd(self.value, 1, 1)
    }

    pub const fn end_date(self) -> Date {
        Date::from_valid_ymd(self.value, 12, 31)
    }

    /// Every day of the year.
    pub const fn dates(self) -> DateRange {
        DateRange::new(self.start_date(), self.end_date())
    }

    /// The date on one-based `day_of_year`.
    pub fn at_day(self, day_of_year: u16) -> Result<Date, Error> {
        Date::from_ordinal(self.value, day_of_year)
    }

    pub const fn at_month(self, month: Month) -> YearMonth {
        YearMonth::of(self, month)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.value
    }

    pub fn checked_add(self, years: i64) -> Result<Year, Error> {
        let value = math::plus_exact(self.value as i64, years)?;
        math::check_year(value)
            .map(|value| Year { value })
            .map_err(|_| Error::overflow("add years"))
    }

    pub fn checked_sub(self, years: i64) -> Result<Year, Error> {
        self.checked_add(math::negate_exact(years)?)
    }

    /// Whole years from this one to `other`.
    pub const fn years_until(self, other: Year) -> i64 {
        other.value as i64 - self.value as i64
    }
}

impl Date {
    /// The year holding this date.
    pub const fn calendar_year(self) -> Year {
        Year { value: self.year() }
    }
}

impl TryFrom<i32> for Year {
    type Error = Error;

    fn try_from(value: i32) -> Result<Year, Error> {
        Year::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> i32 {
        year.value
    }
}

impl fmt::Display for Year {
    /// Four digits, with a sign outside `0..=9999`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.value)
    }
}

impl FromStr for Year {
    type Err = Error;

    fn from_str(s: &str) -> Result<Year, Error> {
        parse::parse_all(s, "Year", |c| Ok(Year { value: c.year()? }))
    }
}
