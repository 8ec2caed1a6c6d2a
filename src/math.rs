// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Overflow-checked integer arithmetic and component validators.
//!
//! Every calendar computation in the crate funnels through these helpers so
//! that an out-of-range intermediate surfaces as [`Error::Overflow`] instead of
//! wrapping silently.

use crate::error::Error;

/// `a + b`, failing on overflow.
#[inline]
pub fn plus_exact(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_add(b).ok_or(Error::overflow("plus_exact"))
}

/// `a - b`, failing on overflow.
#[inline]
pub fn minus_exact(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_sub(b).ok_or(Error::overflow("minus_exact"))
}

/// `a * b`, failing on overflow.
#[inline]
pub fn times_exact(a: i64, b: i64) -> Result<i64, Error> {
    a.checked_mul(b).ok_or(Error::overflow("times_exact"))
}

/// `-a`, failing for `i64::MIN`.
#[inline]
pub fn negate_exact(a: i64) -> Result<i64, Error> {
    a.checked_neg().ok_or(Error::overflow("negate_exact"))
}

/// `a + b` on 32-bit values, failing on overflow.
#[inline]
pub fn plus_exact_i32(a: i32, b: i32) -> Result<i32, Error> {
    a.checked_add(b).ok_or(Error::overflow("plus_exact"))
}

/// `a * b` on 32-bit values, failing on overflow.
#[inline]
pub fn times_exact_i32(a: i32, b: i32) -> Result<i32, Error> {
    a.checked_mul(b).ok_or(Error::overflow("times_exact"))
}

/// Narrows `value` to `i32`, failing if it does not fit.
#[inline]
pub fn to_i32_exact(value: i64) -> Result<i32, Error> {
    i32::try_from(value).map_err(|_| Error::overflow("to_i32_exact"))
}

/// Quotient rounded toward negative infinity.
///
/// `b` must be non-zero.
#[inline]
pub const fn floor_div(a: i64, b: i64) -> i64 {
    a.div_euclid(b) - if b < 0 && a.rem_euclid(b) != 0 { 1 } else { 0 }
}

/// Remainder whose sign follows the divisor, so that
/// `floor_div(a, b) * b + floor_mod(a, b) == a`.
#[inline]
pub const fn floor_mod(a: i64, b: i64) -> i64 {
    a - floor_div(a, b) * b
}

#[inline]
fn check(what: &'static str, value: i64, min: i64, max: i64) -> Result<(), Error> {
    if value < min || value > max {
        return Err(Error::out_of_range(what, value, min, max));
    }
    Ok(())
}

pub fn check_year(year: i64) -> Result<i32, Error> {
    check(
        "year",
        year,
        crate::calendar::MIN_YEAR as i64,
        crate::calendar::MAX_YEAR as i64,
    )?;
    Ok(year as i32)
}

pub fn check_month(month: i64) -> Result<u8, Error> {
    check("month", month, 1, 12)?;
    Ok(month as u8)
}

pub fn check_hour(hour: i64) -> Result<u8, Error> {
    check("hour", hour, 0, 23)?;
    Ok(hour as u8)
}

pub fn check_minute(minute: i64) -> Result<u8, Error> {
    check("minute", minute, 0, 59)?;
    Ok(minute as u8)
}

pub fn check_second(second: i64) -> Result<u8, Error> {
    check("second", second, 0, 59)?;
    Ok(second as u8)
}

pub fn check_nanosecond(nanosecond: i64) -> Result<u32, Error> {
    check("nanosecond", nanosecond, 0, 999_999_999)?;
    Ok(nanosecond as u32)
}
