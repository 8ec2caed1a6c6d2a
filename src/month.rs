// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Months of the Gregorian year.

use crate::error::Error;
use crate::math;
use std::fmt;

/// A month of the year, January through December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

const ALL: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

// Day of year (zero-based) on which each month starts in a common year.
const FIRST_DAY_OF_COMMON_YEAR: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

impl Month {
    /// Builds a month from its ISO number, 1 for January.
    pub fn from_number(number: i64) -> Result<Month, Error> {
        let number = math::check_month(number)?;
        Ok(ALL[usize::from(number - 1)])
    }

    /// `number` must already be in `1..=12`.
    #[inline]
    pub(crate) const fn from_valid(number: u8) -> Month {
        ALL[number as usize - 1]
    }

    /// The ISO number of this month, 1 for January.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Number of days in this month.
    #[inline]
    pub const fn length(self, is_leap_year: bool) -> u8 {
        crate::calendar::days_in_month(self as u8, is_leap_year)
    }

    /// Zero-based day of the year on which this month begins.
    #[inline]
    pub const fn first_day_of_year(self, is_leap_year: bool) -> u16 {
        let leap = if is_leap_year && self as u8 > 2 { 1 } else { 0 };
        FIRST_DAY_OF_COMMON_YEAR[self as usize - 1] + leap
    }

    /// The month `months` after this one, wrapping around the year.
    pub fn plus(self, months: i64) -> Month {
        let index = math::floor_mod(self as i64 - 1 + months, 12);
        ALL[index as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
