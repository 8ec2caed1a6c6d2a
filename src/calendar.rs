// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic.
//!
//! Conversion between `(year, month, day)` and a count of days since
//! 1970-01-01 works on whole 400-year cycles of 146 097 days, so it runs in
//! constant time for every supported year, including years before 1.
//! The inverse direction shifts the year to start in March, which moves the
//! leap day to the end of the year and turns month lengths into a closed
//! formula.

use crate::error::Error;
use crate::math;

/// Smallest supported year.
pub const MIN_YEAR: i32 = -999_999_999;
/// Largest supported year.
pub const MAX_YEAR: i32 = 999_999_999;

pub(crate) const DAYS_PER_CYCLE: i64 = 146_097;
pub(crate) const DAYS_0000_TO_1970: i64 = DAYS_PER_CYCLE * 5 - (30 * 365 + 7);

pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_MINUTE: i64 = SECONDS_PER_MINUTE * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_HOUR: i64 = SECONDS_PER_HOUR * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// Epoch day of `MIN_YEAR-01-01`.
pub const MIN_EPOCH_DAY: i64 = epoch_day_from_civil(MIN_YEAR, 1, 1);
/// Epoch day of `MAX_YEAR-12-31`.
pub const MAX_EPOCH_DAY: i64 = epoch_day_from_civil(MAX_YEAR, 12, 31);

/// Whether `year` has 366 days.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    // Divisible by 4 and not by 100, or by 400. A year divisible by 100 is
    // divisible by 25, and then divisibility by 16 is equivalent to 400.
    let d = if year % 25 != 0 { 4 } else { 16 };
    year % d == 0
}

/// Length of `month` (1-12).
#[inline]
pub const fn days_in_month(month: u8, is_leap_year: bool) -> u8 {
    if month == 2 {
        if is_leap_year {
            29
        } else {
            28
        }
    } else {
        30 | (month ^ (month >> 3))
    }
}

#[inline]
pub const fn days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Days since 1970-01-01 for a valid civil date.
pub const fn epoch_day_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let y = year as i64;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(year) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Civil date for a count of days since 1970-01-01.
///
/// The caller guarantees `MIN_EPOCH_DAY <= epoch_day <= MAX_EPOCH_DAY`.
pub const fn civil_from_epoch_day(epoch_day: i64) -> (i32, u8, u8) {
    let mut zero_day = epoch_day + DAYS_0000_TO_1970 - 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est =
        zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    }
    year_est += adjust;

    let march_month0 = (doy_est * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let day = doy_est - (march_month0 * 306 + 5) / 10 + 1;
    year_est += march_month0 / 10;

    (year_est as i32, month as u8, day as u8)
}

/// Validates an epoch day against the supported range.
pub(crate) fn check_epoch_day(epoch_day: i64) -> Result<i64, Error> {
    if !(MIN_EPOCH_DAY..=MAX_EPOCH_DAY).contains(&epoch_day) {
        return Err(Error::out_of_range(
            "epoch day",
            epoch_day,
            MIN_EPOCH_DAY,
            MAX_EPOCH_DAY,
        ));
    }
    Ok(epoch_day)
}

/// Adds `months` to `(year, month)`, carrying into the year.
pub(crate) fn add_months(year: i32, month: u8, months: i64) -> Result<(i32, u8), Error> {
    let since_year_zero = year as i64 * 12 + (month as i64 - 1);
    let total = math::plus_exact(since_year_zero, months)?;
    let new_year = math::check_year(math::floor_div(total, 12)).map_err(|_| Error::overflow("add_months"))?;
    let new_month = math::floor_mod(total, 12) as u8 + 1;
    Ok((new_year, new_month))
}

/// Whole months from `(y1, m1)` to `(y2, m2)`.
pub(crate) fn months_between(y1: i32, m1: u8, y2: i32, m2: u8) -> i64 {
    (y2 as i64 * 12 + m2 as i64) - (y1 as i64 * 12 + m1 as i64)
}
