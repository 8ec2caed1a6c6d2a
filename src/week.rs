// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Week numbering and week-based years.
//!
//! A week-based year is the year aligned to whole weeks. Its first week is
//! the first week with at least [`WeekSettings::minimum_days_in_first_week`]
//! days in the calendar year, so the first days of January can belong to the
//! last week of the previous week-based year and the last days of December
//! to week 1 of the next.
//!
//! | Settings | First day | Minimum days | Used by |
//! |----------|-----------|--------------|---------|
//! | [`WeekSettings::ISO`] | Monday | 4 | ISO-8601 |
//! | [`WeekSettings::SUNDAY_START`] | Sunday | 1 | North American calendars |

use crate::calendar;
use crate::date::Date;
use crate::error::Error;
use crate::math;
use crate::range::DateRange;
use crate::weekday::DayOfWeek;
use std::fmt;

/// Rules for numbering weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekSettings {
    first_day_of_week: DayOfWeek,
    minimum_days_in_first_week: u8,
}

impl WeekSettings {
    /// Weeks start on Monday; week 1 holds the first Thursday.
    pub const ISO: WeekSettings = WeekSettings {
        first_day_of_week: DayOfWeek::Monday,
        minimum_days_in_first_week: 4,
    };

    /// Weeks start on Sunday; week 1 holds January 1.
    pub const SUNDAY_START: WeekSettings = WeekSettings {
        first_day_of_week: DayOfWeek::Sunday,
        minimum_days_in_first_week: 1,
    };

    /// `minimum_days_in_first_week` must be in `1..=7`.
    pub fn new(
        first_day_of_week: DayOfWeek,
        minimum_days_in_first_week: u8,
    ) -> Result<WeekSettings, Error> {
        if !(1..=7).contains(&minimum_days_in_first_week) {
            return Err(Error::out_of_range(
                "minimum days in first week",
                minimum_days_in_first_week as i64,
                1,
                7,
            ));
        }
        Ok(WeekSettings {
            first_day_of_week,
            minimum_days_in_first_week,
        })
    }

    #[inline]
    pub const fn first_day_of_week(self) -> DayOfWeek {
        self.first_day_of_week
    }

    #[inline]
    pub const fn minimum_days_in_first_week(self) -> u8 {
        self.minimum_days_in_first_week
    }
}

impl Default for WeekSettings {
    fn default() -> WeekSettings {
        WeekSettings::ISO
    }
}

/// A date expressed as week-based year, week number and day of week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDate {
    pub year: i32,
    pub week: u8,
    pub day: DayOfWeek,
}

impl fmt::Display for WeekDate {
    /// `2009-W53-4`, with the ISO day number.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}-{}", self.year, self.week, self.day.iso_number())
    }
}

// Offset that shifts `day_of_month_or_year` so that week 1 starts at 1.
fn start_of_week_offset(day_of_week: DayOfWeek, day_of_month_or_year: i64, settings: WeekSettings) -> i64 {
    let adjusted = day_of_week.number(settings) as i64;
    let start_of_week = math::floor_mod(day_of_month_or_year - adjusted, 7);
    if start_of_week >= settings.minimum_days_in_first_week as i64 {
        7 - start_of_week
    } else {
        -start_of_week
    }
}

fn week_number(day_of_month_or_year: i64, start_of_week_offset: i64) -> i64 {
    (7 + start_of_week_offset + day_of_month_or_year - 1) / 7
}

// Week-based year and week for a day given by year, day of year and weekday.
fn week_fields(year: i32, day_of_year: i64, day_of_week: DayOfWeek, settings: WeekSettings) -> (i32, u8) {
    let offset = start_of_week_offset(day_of_week, day_of_year, settings);
    let week = week_number(day_of_year, offset);
    if week == 0 {
        // Last day of the previous year.
        let previous = year - 1;
        let last = calendar::days_in_year(previous) as i64;
        return week_fields(previous, last, day_of_week.plus(-day_of_year), settings);
    }
    let length = calendar::days_in_year(year) as i64;
    let week_of_next_year =
        week_number(length + settings.minimum_days_in_first_week as i64, offset);
    if week >= week_of_next_year {
        (year + 1, (week - week_of_next_year + 1) as u8)
    } else {
        (year, week as u8)
    }
}

// Epoch day on which week 1 of `week_based_year` starts. January `min_days`
// always lies in week 1.
fn start_of_week_based_year(week_based_year: i64, settings: WeekSettings) -> i64 {
    let anchor = calendar::epoch_day_from_civil(
        week_based_year as i32,
        1,
        settings.minimum_days_in_first_week,
    );
    let day_number = DayOfWeek::from_epoch_day(anchor).number(settings) as i64;
    anchor - (day_number - 1)
}

/// Number of weeks in a week-based year, 52 or 53.
///
/// Fails when `week_based_year` is outside the supported year range.
pub fn weeks_in_week_based_year(week_based_year: i32, settings: WeekSettings) -> Result<u8, Error> {
    let year = math::check_year(week_based_year as i64)? as i64;
    let length = start_of_week_based_year(year + 1, settings) - start_of_week_based_year(year, settings);
    Ok((length / 7) as u8)
}

impl Date {
    /// Week of the year, where week 0 holds days before the first full week.
    pub fn week_of_year(self, settings: WeekSettings) -> u8 {
        let day = self.day_of_year() as i64;
        week_number(day, start_of_week_offset(self.day_of_week(), day, settings)) as u8
    }

    /// Week of the month, where week 0 holds days before the first full week.
    pub fn week_of_month(self, settings: WeekSettings) -> u8 {
        let day = self.day() as i64;
        week_number(day, start_of_week_offset(self.day_of_week(), day, settings)) as u8
    }

    pub fn week_based_year(self, settings: WeekSettings) -> i32 {
        self.to_week_date(settings).year
    }

    pub fn week_of_week_based_year(self, settings: WeekSettings) -> u8 {
        self.to_week_date(settings).week
    }

    pub fn to_week_date(self, settings: WeekSettings) -> WeekDate {
        let day_of_week = self.day_of_week();
        let (year, week) =
            week_fields(self.year(), self.day_of_year() as i64, day_of_week, settings);
        WeekDate {
            year,
            week,
            day: day_of_week,
        }
    }

    /// Builds a date from a week-based year, week number and day of week.
    ///
    /// Exact inverse of [`Date::to_week_date`] for the same settings. A week
    /// that does not exist in the week-based year fails with
    /// [`Error::InvalidWeek`].
    pub fn from_week_date(
        week_based_year: i32,
        week: u8,
        day: DayOfWeek,
        settings: WeekSettings,
    ) -> Result<Date, Error> {
        let year = math::check_year(week_based_year as i64)?;
        if week < 1 || week > weeks_in_week_based_year(year, settings)? {
            return Err(Error::InvalidWeek { year, week });
        }
        let start = start_of_week_based_year(year as i64, settings);
        let epoch_day = start + (week as i64 - 1) * 7 + (day.number(settings) as i64 - 1);
        Date::from_epoch_day(epoch_day)
    }

    /// First day of the week holding this date.
    ///
    /// Fails only in the first days of the supported range.
    pub fn start_of_week(self, settings: WeekSettings) -> Result<Date, Error> {
        self.previous_or_same(settings.first_day_of_week())
    }

    /// Last day of the week holding this date.
    pub fn end_of_week(self, settings: WeekSettings) -> Result<Date, Error> {
        self.next_or_same(settings.first_day_of_week().plus(6))
    }

    /// Every day of the week holding this date.
    pub fn week(self, settings: WeekSettings) -> Result<DateRange, Error> {
        Ok(DateRange::new(
            self.start_of_week(settings)?,
            self.end_of_week(settings)?,
        ))
    }
}
