// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Days of the week.

use crate::error::Error;
use crate::math;
use crate::week::WeekSettings;
use std::fmt;

/// A day of the week, numbered 1 (Monday) through 7 (Sunday) in ISO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const ALL: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

impl DayOfWeek {
    /// Builds a day from its ISO number, 1 for Monday.
    pub fn from_iso_number(number: i64) -> Result<DayOfWeek, Error> {
        if !(1..=7).contains(&number) {
            return Err(Error::out_of_range("day of week", number, 1, 7));
        }
        Ok(ALL[number as usize - 1])
    }

    /// The day of the week of an epoch day. 1970-01-01 was a Thursday.
    pub(crate) fn from_epoch_day(epoch_day: i64) -> DayOfWeek {
        ALL[math::floor_mod(epoch_day + 3, 7) as usize]
    }

    /// ISO number, 1 for Monday through 7 for Sunday.
    #[inline]
    pub const fn iso_number(self) -> u8 {
        self as u8
    }

    /// Number of this day relative to the first day of the week in `settings`,
    /// 1 for the first day.
    pub fn number(self, settings: WeekSettings) -> u8 {
        let offset = self as i64 - settings.first_day_of_week() as i64;
        math::floor_mod(offset, 7) as u8 + 1
    }

    /// The day `days` after this one, wrapping around the week.
    pub fn plus(self, days: i64) -> DayOfWeek {
        ALL[math::floor_mod(self as i64 - 1 + days, 7) as usize]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_zero_is_thursday() {
        assert_eq!(DayOfWeek::from_epoch_day(0), DayOfWeek::Thursday);
        assert_eq!(DayOfWeek::from_epoch_day(-1), DayOfWeek::Wednesday);
        assert_eq!(DayOfWeek::from_epoch_day(4), DayOfWeek::Monday);
    }

    #[test]
    fn numbering_depends_on_week_start() {
        assert_eq!(DayOfWeek::Sunday.number(WeekSettings::ISO), 7);
        assert_eq!(DayOfWeek::Sunday.number(WeekSettings::SUNDAY_START), 1);
        assert_eq!(DayOfWeek::Monday.number(WeekSettings::SUNDAY_START), 2);
        assert_eq!(DayOfWeek::Saturday.number(WeekSettings::SUNDAY_START), 7);
    }

    #[test]
    fn plus_wraps() {
        assert_eq!(DayOfWeek::Saturday.plus(2), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::Monday.plus(-1), DayOfWeek::Sunday);
    }
}
