// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-based spans of years, months and days.

use crate::error::Error;
use crate::math;
use crate::parse;
use crate::unit::TimeUnit;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A span of calendar time made of independent year, month and day fields.
///
/// Periods are not reducible to a [`Duration`](crate::Duration): one month
/// is 28 to 31 days depending on where it is applied, and one day may be 23
/// or 25 hours across a daylight-saving change. Equality is field-wise, so
/// `P12M` and `P1Y` are different periods until [`Period::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    pub const ZERO: Period = Period::new(0, 0, 0);

    #[inline]
    pub const fn new(years: i32, months: i32, days: i32) -> Period {
        Period {
            years,
            months,
            days,
        }
    }

    #[inline]
    pub const fn of_years(years: i32) -> Period {
        Period::new(years, 0, 0)
    }

    #[inline]
    pub const fn of_months(months: i32) -> Period {
        Period::new(0, months, 0)
    }

    pub fn of_weeks(weeks: i32) -> Result<Period, Error> {
        Ok(Period::new(0, 0, math::times_exact_i32(weeks, 7)?))
    }

    #[inline]
    pub const fn of_days(days: i32) -> Period {
        Period::new(0, 0, days)
    }

    /// `amount` of a date-based unit.
    pub fn of(amount: i32, unit: TimeUnit) -> Result<Period, Error> {
        match unit {
            TimeUnit::Days => Ok(Period::of_days(amount)),
            TimeUnit::Weeks => Period::of_weeks(amount),
            TimeUnit::Months => Ok(Period::of_months(amount)),
            TimeUnit::Years => Ok(Period::of_years(amount)),
            TimeUnit::Decades | TimeUnit::Centuries => {
                let per_unit = unit.months().unwrap_or(1) as i32 / 12;
                Ok(Period::of_years(math::times_exact_i32(amount, per_unit)?))
            }
            _ => Err(Error::UnsupportedUnit {
                unit,
                operation: "a period",
            }),
        }
    }

    #[inline]
    pub const fn years(self) -> i32 {
        self.years
    }

    #[inline]
    pub const fn months(self) -> i32 {
        self.months
    }

    #[inline]
    pub const fn days(self) -> i32 {
        self.days
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Whether any field is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Years and months combined into months.
    pub const fn total_months(self) -> i64 {
        self.years as i64 * 12 + self.months as i64
    }

    /// Moves whole years out of the month field, keeping days as they are.
    ///
    /// `P1Y14M` becomes `P2Y2M`; the month field keeps the sign of the total.
    pub fn normalized(self) -> Result<Period, Error> {
        let total = self.total_months();
        Ok(Period::new(
            math::to_i32_exact(total / 12)?,
            (total % 12) as i32,
            self.days,
        ))
    }

    pub fn checked_add(self, other: Period) -> Result<Period, Error> {
        Ok(Period::new(
            math::plus_exact_i32(self.years, other.years)?,
            math::plus_exact_i32(self.months, other.months)?,
            math::plus_exact_i32(self.days, other.days)?,
        ))
    }

    pub fn checked_sub(self, other: Period) -> Result<Period, Error> {
        self.checked_add(other.checked_neg()?)
    }

    pub fn checked_neg(self) -> Result<Period, Error> {
        self.checked_mul(-1)
    }

    pub fn checked_mul(self, factor: i32) -> Result<Period, Error> {
        Ok(Period::new(
            math::times_exact_i32(self.years, factor)?,
            math::times_exact_i32(self.months, factor)?,
            math::times_exact_i32(self.days, factor)?,
        ))
    }
}

/// # Panics
///
/// Panics when a field is `i32::MIN`.
impl Neg for Period {
    type Output = Period;

    fn neg(self) -> Period {
        self.checked_neg().expect("period negation overflowed")
    }
}

impl fmt::Display for Period {
    /// `P1Y2M3D`, with zero fields omitted and `P0D` for the zero period.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("P0D");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Period, Error> {
        parse::parse_all(s, "Period", |c| c.period())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn constructors() {
        assert_eq!(Period::of_weeks(2).unwrap(), Period::of_days(14));
        assert_eq!(Period::of(3, TimeUnit::Decades).unwrap(), Period::of_years(30));
        assert_eq!(Period::of(2, TimeUnit::Centuries).unwrap(), Period::of_years(200));
        assert_eq!(
            Period::of(1, TimeUnit::Hours).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert!(Period::of_weeks(i32::MAX).is_err());
    }

    #[test]
    fn field_wise_equality() {
        assert_ne!(Period::of_months(12), Period::of_years(1));
        assert_eq!(Period::of_months(12).normalized().unwrap(), Period::of_years(1));
        assert_eq!(Period::new(1, 14, 3).normalized().unwrap(), Period::new(2, 2, 3));
        assert_eq!(Period::new(0, -14, 0).normalized().unwrap(), Period::new(-1, -2, 0));
    }

    #[test]
    fn arithmetic() {
        let a = Period::new(1, 2, 3);
        assert_eq!(a.checked_add(a).unwrap(), Period::new(2, 4, 6));
        assert_eq!(a.checked_sub(a).unwrap(), Period::ZERO);
        assert_eq!(-a, Period::new(-1, -2, -3));
        assert!(a.checked_mul(i32::MAX).is_err());
        assert!(Period::new(0, -1, 0).is_negative());
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(Period::ZERO.to_string(), "P0D");
        assert_eq!(Period::new(1, 2, 3).to_string(), "P1Y2M3D");
        assert_eq!(Period::new(0, -5, 0).to_string(), "P-5M");
        assert_eq!("P1Y2M3D".parse::<Period>().unwrap(), Period::new(1, 2, 3));
        assert_eq!("P2W".parse::<Period>().unwrap(), Period::of_days(14));
        assert_eq!("-P1Y-2M".parse::<Period>().unwrap(), Period::new(-1, 2, 0));
        assert_eq!("P0D".parse::<Period>().unwrap(), Period::ZERO);
        assert!("P".parse::<Period>().is_err());
        assert!("P1D1Y".parse::<Period>().is_err());
        assert!("PT1H".parse::<Period>().is_err());
    }
}
