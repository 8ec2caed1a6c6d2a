// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A month of a specific year.

use crate::calendar::{self, MAX_YEAR, MIN_YEAR};
use crate::date::{write_year, Date};
use crate::error::Error;
use crate::math;
use crate::month::Month;
use crate::parse;
use crate::range::DateRange;
use crate::year::Year;
use std::fmt;
use std::str::FromStr;

/// A year and month, such as `2018-01`, without a day.
///
/// Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    pub const MIN: YearMonth = YearMonth {
        year: MIN_YEAR,
        month: Month::January,
    };
    pub const MAX: YearMonth = YearMonth {
        year: MAX_YEAR,
        month: Month::December,
    };

    /// Builds a year-month from a year and a month number (1-12).
    pub fn new(year: i32, month: u8) -> Result<YearMonth, Error> {
        let year = math::check_year(year as i64)?;
        let month = Month::from_number(month as i64)?;
        Ok(YearMonth { year, month })
    }

    pub const fn of(year: Year, month: Month) -> YearMonth {
        YearMonth {
            year: year.value(),
            month,
        }
    }

    #[inline]
    pub const fn year(self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> Month {
        self.month
    }

    #[inline]
    pub const fn is_in_leap_year(self) -> bool {
        calendar::is_leap_year(self.year)
    }

    pub const fn length_of_month(self) -> u8 {
        self.month.length(self.is_in_leap_year())
    }

    pub const fn length_of_year(self) -> u16 {
        calendar::days_in_year(self.year)
    }

    pub const fn start_date(self) -> Date {
        Date::from_valid_ymd(self.year, self.month.number(), 1)
    }

    pub const fn end_date(self) -> Date {
        Date::from_valid_ymd(self.year, self.month.number(), self.length_of_month())
    }

    /// Every day of the month.
    pub const fn dates(self) -> DateRange {
        DateRange::new(self.start_date(), self.end_date())
    }

    pub fn at_day(self, day: u8) -> Result<Date, Error> {
        Date::of(self.year, self.month, day)
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn checked_add_months(self, months: i64) -> Result<YearMonth, Error> {
        let (year, month) = calendar::add_months(self.year, self.month.number(), months)?;
        Ok(YearMonth {
            year,
            month: Month::from_valid(month),
        })
    }

    pub fn checked_add_years(self, years: i64) -> Result<YearMonth, Error> {
        self.checked_add_months(math::times_exact(years, 12)?)
    }

    /// Whole months from this one to `other`.
    pub fn months_until(self, other: YearMonth) -> i64 {
        calendar::months_between(self.year, self.month.number(), other.year, other.month.number())
    }
}

impl Date {
    /// The month of the year holding this date.
    pub fn year_month(self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    /// `YYYY-MM`, the year written as in a date.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}", self.month.number())
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<YearMonth, Error> {
        parse::parse_all(s, "YearMonth", |c| {
            let (year, month) = c.year_month()?;
            Ok(YearMonth {
                year,
                month: Month::from_valid(month),
            })
        })
    }
}
