// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date-time fields and how they derive from one another.
//!
//! A [`FieldValues`] map holds whatever fields are known; [`derive`] answers
//! any other field reachable from them:
//!
//! | Field | Derived from |
//! |-------|--------------|
//! | `EpochDay` | year + month + day of month, year + day of year, or epoch second + offset |
//! | `Year`, `MonthOfYear`, `DayOfMonth`, `DayOfYear`, `ProlepticMonth` | epoch day |
//! | `DayOfWeek` | epoch day |
//! | `NanoOfDay` | hour + minute [+ second] [+ nano], second of day [+ nano], or epoch second + offset |
//! | Time-of-day fields | nano of day |
//! | `EpochSecond` | epoch day + second of day + offset |
//!
//! Values outside a field's range are treated as unknown.

use crate::calendar::{
    self, MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR, NANOS_PER_DAY, NANOS_PER_HOUR,
    NANOS_PER_MINUTE, NANOS_PER_SECOND, SECONDS_PER_DAY,
};
use crate::date::Date;
use crate::datetime::DateTime;
use crate::instant::Instant;
use crate::math;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::time::Time;
use crate::unit::TimeUnit;
use crate::weekday::DayOfWeek;
use std::collections::BTreeMap;
use std::fmt;

/// A field of a date, time or offset date-time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateTimeField {
    NanoOfSecond,
    NanoOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfDay,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    MonthOfYear,
    ProlepticMonth,
    Year,
    OffsetSeconds,
    EpochSecond,
}

impl DateTimeField {
    pub const ALL: [DateTimeField; 16] = [
        DateTimeField::NanoOfSecond,
        DateTimeField::NanoOfDay,
        DateTimeField::SecondOfMinute,
        DateTimeField::SecondOfDay,
        DateTimeField::MinuteOfHour,
        DateTimeField::MinuteOfDay,
        DateTimeField::HourOfDay,
        DateTimeField::DayOfWeek,
        DateTimeField::DayOfMonth,
        DateTimeField::DayOfYear,
        DateTimeField::EpochDay,
        DateTimeField::MonthOfYear,
        DateTimeField::ProlepticMonth,
        DateTimeField::Year,
        DateTimeField::OffsetSeconds,
        DateTimeField::EpochSecond,
    ];

    /// Inclusive bounds of the field's values.
    pub const fn range(self) -> (i64, i64) {
        match self {
            DateTimeField::NanoOfSecond => (0, NANOS_PER_SECOND - 1),
            DateTimeField::NanoOfDay => (0, NANOS_PER_DAY - 1),
            DateTimeField::SecondOfMinute | DateTimeField::MinuteOfHour => (0, 59),
            DateTimeField::SecondOfDay => (0, SECONDS_PER_DAY - 1),
            DateTimeField::MinuteOfDay => (0, 24 * 60 - 1),
            DateTimeField::HourOfDay => (0, 23),
            DateTimeField::DayOfWeek => (1, 7),
            DateTimeField::DayOfMonth => (1, 31),
            DateTimeField::DayOfYear => (1, 366),
            DateTimeField::EpochDay => (MIN_EPOCH_DAY, MAX_EPOCH_DAY),
            DateTimeField::MonthOfYear => (1, 12),
            DateTimeField::ProlepticMonth => (MIN_YEAR as i64 * 12, MAX_YEAR as i64 * 12 + 11),
            DateTimeField::Year => (MIN_YEAR as i64, MAX_YEAR as i64),
            DateTimeField::OffsetSeconds => (
                UtcOffset::MIN.total_seconds() as i64,
                UtcOffset::MAX.total_seconds() as i64,
            ),
            DateTimeField::EpochSecond => {
                (Instant::MIN.epoch_second(), Instant::MAX.epoch_second())
            }
        }
    }

    pub fn is_valid(self, value: i64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }

    /// The unit one step of the field measures.
    pub const fn base_unit(self) -> TimeUnit {
        match self {
            DateTimeField::NanoOfSecond | DateTimeField::NanoOfDay => TimeUnit::Nanoseconds,
            DateTimeField::SecondOfMinute
            | DateTimeField::SecondOfDay
            | DateTimeField::OffsetSeconds
            | DateTimeField::EpochSecond => TimeUnit::Seconds,
            DateTimeField::MinuteOfHour | DateTimeField::MinuteOfDay => TimeUnit::Minutes,
            DateTimeField::HourOfDay => TimeUnit::Hours,
            DateTimeField::DayOfWeek
            | DateTimeField::DayOfMonth
            | DateTimeField::DayOfYear
            | DateTimeField::EpochDay => TimeUnit::Days,
            DateTimeField::MonthOfYear | DateTimeField::ProlepticMonth => TimeUnit::Months,
            DateTimeField::Year => TimeUnit::Years,
        }
    }

    /// The unit the field cycles within, `None` for unbounded counts.
    pub const fn range_unit(self) -> Option<TimeUnit> {
        match self {
            DateTimeField::NanoOfSecond => Some(TimeUnit::Seconds),
            DateTimeField::SecondOfMinute => Some(TimeUnit::Minutes),
            DateTimeField::MinuteOfHour => Some(TimeUnit::Hours),
            DateTimeField::NanoOfDay
            | DateTimeField::SecondOfDay
            | DateTimeField::MinuteOfDay
            | DateTimeField::HourOfDay => Some(TimeUnit::Days),
            DateTimeField::DayOfWeek => Some(TimeUnit::Weeks),
            DateTimeField::DayOfMonth => Some(TimeUnit::Months),
            DateTimeField::DayOfYear | DateTimeField::MonthOfYear => Some(TimeUnit::Years),
            DateTimeField::EpochDay
            | DateTimeField::ProlepticMonth
            | DateTimeField::Year
            | DateTimeField::OffsetSeconds
            | DateTimeField::EpochSecond => None,
        }
    }

    pub fn is_date_based(self) -> bool {
        matches!(
            self,
            DateTimeField::DayOfWeek
                | DateTimeField::DayOfMonth
                | DateTimeField::DayOfYear
                | DateTimeField::EpochDay
                | DateTimeField::MonthOfYear
                | DateTimeField::ProlepticMonth
                | DateTimeField::Year
        )
    }

    pub fn is_time_based(self) -> bool {
        matches!(
            self,
            DateTimeField::NanoOfSecond
                | DateTimeField::NanoOfDay
                | DateTimeField::SecondOfMinute
                | DateTimeField::SecondOfDay
                | DateTimeField::MinuteOfHour
                | DateTimeField::MinuteOfDay
                | DateTimeField::HourOfDay
        )
    }
}

impl fmt::Display for DateTimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Known field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<DateTimeField, i64>,
}

impl FieldValues {
    pub fn new() -> FieldValues {
        FieldValues::default()
    }

    pub fn with(mut self, field: DateTimeField, value: i64) -> FieldValues {
        self.insert(field, value);
        self
    }

    /// Returns the previous value.
    pub fn insert(&mut self, field: DateTimeField, value: i64) -> Option<i64> {
        self.values.insert(field, value)
    }

    pub fn remove(&mut self, field: DateTimeField) -> Option<i64> {
        self.values.remove(&field)
    }

    /// The stored value, ignoring derivation.
    pub fn get(&self, field: DateTimeField) -> Option<i64> {
        self.values.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTimeField, i64)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }

    // A stored value inside the field's range.
    fn valid(&self, field: DateTimeField) -> Option<i64> {
        self.get(field).filter(|v| field.is_valid(*v))
    }
}

impl From<Date> for FieldValues {
    fn from(date: Date) -> FieldValues {
        FieldValues::new().with(DateTimeField::EpochDay, date.epoch_day())
    }
}

impl From<Time> for FieldValues {
    fn from(time: Time) -> FieldValues {
        FieldValues::new().with(DateTimeField::NanoOfDay, time.nanosecond_of_day())
    }
}

impl From<DateTime> for FieldValues {
    fn from(date_time: DateTime) -> FieldValues {
        FieldValues::from(date_time.date())
            .with(DateTimeField::NanoOfDay, date_time.time().nanosecond_of_day())
    }
}

impl From<OffsetDateTime> for FieldValues {
    fn from(value: OffsetDateTime) -> FieldValues {
        FieldValues::from(value.date_time())
            .with(DateTimeField::OffsetSeconds, value.offset().total_seconds() as i64)
    }
}

/// Resolves `field` from `values`: the stored value if present, otherwise
/// a value derived from the other fields, or `None` when they do not
/// determine it.
pub fn derive(field: DateTimeField, values: &FieldValues) -> Option<i64> {
    if let Some(value) = values.valid(field) {
        return Some(value);
    }
    match field {
        DateTimeField::EpochDay => epoch_day(values),
        DateTimeField::Year => values
            .valid(DateTimeField::ProlepticMonth)
            .map(|m| math::floor_div(m, 12))
            .or_else(|| civil(values).map(|(y, _, _)| y as i64)),
        DateTimeField::MonthOfYear => values
            .valid(DateTimeField::ProlepticMonth)
            .map(|m| math::floor_mod(m, 12) + 1)
            .or_else(|| civil(values).map(|(_, m, _)| m as i64)),
        DateTimeField::DayOfMonth => civil(values).map(|(_, _, d)| d as i64),
        DateTimeField::DayOfYear => {
            let day = epoch_day(values)?;
            let (year, _, _) = calendar::civil_from_epoch_day(day);
            Some(day - calendar::epoch_day_from_civil(year, 1, 1) + 1)
        }
        DateTimeField::ProlepticMonth => {
            let year = derive(DateTimeField::Year, values)?;
            let month = derive(DateTimeField::MonthOfYear, values)?;
            Some(year * 12 + month - 1)
        }
        DateTimeField::DayOfWeek => {
            epoch_day(values).map(|day| DayOfWeek::from_epoch_day(day).iso_number() as i64)
        }
        DateTimeField::NanoOfDay => nano_of_day(values),
        DateTimeField::NanoOfSecond => nano_of_day(values).map(|n| n % NANOS_PER_SECOND),
        DateTimeField::SecondOfMinute => nano_of_day(values).map(|n| n / NANOS_PER_SECOND % 60),
        DateTimeField::SecondOfDay => nano_of_day(values).map(|n| n / NANOS_PER_SECOND),
        DateTimeField::MinuteOfHour => nano_of_day(values).map(|n| n / NANOS_PER_MINUTE % 60),
        DateTimeField::MinuteOfDay => nano_of_day(values).map(|n| n / NANOS_PER_MINUTE),
        DateTimeField::HourOfDay => nano_of_day(values).map(|n| n / NANOS_PER_HOUR),
        DateTimeField::OffsetSeconds => None,
        DateTimeField::EpochSecond => {
            let day = epoch_day(values)?;
            let second = nano_of_day(values)? / NANOS_PER_SECOND;
            let offset = values.valid(DateTimeField::OffsetSeconds)?;
            Some(day * SECONDS_PER_DAY + second - offset).filter(|s| field.is_valid(*s))
        }
    }
}

// Never consults derived calendar fields, so derivation cannot cycle.
fn epoch_day(values: &FieldValues) -> Option<i64> {
    if let Some(day) = values.valid(DateTimeField::EpochDay) {
        return Some(day);
    }
    let year = values
        .valid(DateTimeField::Year)
        .or_else(|| values.valid(DateTimeField::ProlepticMonth).map(|m| math::floor_div(m, 12)));
    let month = values.valid(DateTimeField::MonthOfYear).or_else(|| {
        values
            .valid(DateTimeField::ProlepticMonth)
            .map(|m| math::floor_mod(m, 12) + 1)
    });
    let day_of_month = values.valid(DateTimeField::DayOfMonth);
    let day_of_year = values.valid(DateTimeField::DayOfYear);
    match (year, month, day_of_month, day_of_year) {
        (Some(y), Some(m), Some(d), _) => Date::new(y as i32, m as u8, d as u8)
            .ok()
            .map(Date::epoch_day),
        (Some(y), _, _, Some(doy)) => Date::from_ordinal(y as i32, doy as u16)
            .ok()
            .map(Date::epoch_day),
        _ => {
            let (second, offset) = epoch_second_and_offset(values)?;
            Some(math::floor_div(second + offset, SECONDS_PER_DAY))
        }
    }
}

fn civil(values: &FieldValues) -> Option<(i32, u8, u8)> {
    epoch_day(values).map(calendar::civil_from_epoch_day)
}

fn nano_of_day(values: &FieldValues) -> Option<i64> {
    if let Some(nanos) = values.valid(DateTimeField::NanoOfDay) {
        return Some(nanos);
    }
    let nano = values.valid(DateTimeField::NanoOfSecond).unwrap_or(0);
    if let Some(hour) = values.valid(DateTimeField::HourOfDay) {
        let minute = values.valid(DateTimeField::MinuteOfHour)?;
        let second = values.valid(DateTimeField::SecondOfMinute).unwrap_or(0);
        return Some(hour * NANOS_PER_HOUR + minute * NANOS_PER_MINUTE + second * NANOS_PER_SECOND + nano);
    }
    if let Some(second) = values.valid(DateTimeField::SecondOfDay) {
        return Some(second * NANOS_PER_SECOND + nano);
    }
    if let Some(minute) = values.valid(DateTimeField::MinuteOfDay) {
        return Some(minute * NANOS_PER_MINUTE);
    }
    let (second, offset) = epoch_second_and_offset(values)?;
    Some(math::floor_mod(second + offset, SECONDS_PER_DAY) * NANOS_PER_SECOND + nano)
}

fn epoch_second_and_offset(values: &FieldValues) -> Option<(i64, i64)> {
    Some((
        values.valid(DateTimeField::EpochSecond)?,
        values.valid(DateTimeField::OffsetSeconds)?,
    ))
}

impl Date {
    /// Value of `field` for this date, `None` for time-of-day fields.
    pub fn get(self, field: DateTimeField) -> Option<i64> {
        derive(field, &FieldValues::from(self))
    }
}

impl Time {
    /// Value of `field` for this time, `None` for date fields.
    pub fn get(self, field: DateTimeField) -> Option<i64> {
        derive(field, &FieldValues::from(self))
    }
}

impl DateTime {
    pub fn get(self, field: DateTimeField) -> Option<i64> {
        derive(field, &FieldValues::from(self))
    }
}

impl OffsetDateTime {
    pub fn get(self, field: DateTimeField) -> Option<i64> {
        derive(field, &FieldValues::from(self))
    }
}
