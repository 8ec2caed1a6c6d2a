// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Annually recurring daylight-saving rules.
//!
//! A [`RecurringRules`] zone has a standard offset and, optionally, a
//! [`DaylightSaving`] period entered and left each year at the moments two
//! [`TransitionRule`]s describe ("second Sunday of March at 02:00 local wall
//! time"). The transitions of a year are computed on first use and memoized.

use super::rules::{TimeZoneOffsetTransition, TimeZoneRules};
use crate::calendar::{self, SECONDS_PER_DAY, SECONDS_PER_HOUR};
use crate::error::Error;
use crate::instant::Instant;
use crate::math;
use crate::month::Month;
use crate::offset::UtcOffset;
use crate::weekday::DayOfWeek;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Which day of the month a transition happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleDay {
    /// A fixed day, clamped to the month's length.
    DayOfMonth(u8),
    /// The `n`th given weekday of the month; `5` means the last one.
    NthWeekday { n: u8, weekday: DayOfWeek },
    /// The last given weekday of the month.
    LastWeekday(DayOfWeek),
    /// The first given weekday on or after `day`; may spill into the next month.
    WeekdayOnOrAfter { day: u8, weekday: DayOfWeek },
    /// The last given weekday on or before `day`; may reach into the previous month.
    WeekdayOnOrBefore { day: u8, weekday: DayOfWeek },
}

impl RuleDay {
    fn validate(self) -> Result<RuleDay, Error> {
        let (what, value, min, max) = match self {
            RuleDay::DayOfMonth(day)
            | RuleDay::WeekdayOnOrAfter { day, .. }
            | RuleDay::WeekdayOnOrBefore { day, .. } => ("rule day of month", day, 1, 31),
            RuleDay::NthWeekday { n, .. } => ("rule weekday ordinal", n, 1, 5),
            RuleDay::LastWeekday(_) => return Ok(self),
        };
        if (min..=max).contains(&value) {
            Ok(self)
        } else {
            Err(Error::out_of_range(what, value as i64, min as i64, max as i64))
        }
    }

    // Epoch day of the rule's date in `year` and `month`.
    fn resolve(self, year: i32, month: Month) -> i64 {
        let length = month.length(calendar::is_leap_year(year)) as i64;
        let first = calendar::epoch_day_from_civil(year, month.number(), 1);
        let weekday_of = |day: i64| DayOfWeek::from_epoch_day(day).iso_number() as i64;
        match self {
            RuleDay::DayOfMonth(day) => first + (day as i64).min(length) - 1,
            RuleDay::NthWeekday { n, weekday } => {
                let delta = math::floor_mod(weekday.iso_number() as i64 - weekday_of(first), 7);
                let mut day = first + delta + (n as i64 - 1) * 7;
                if day >= first + length {
                    day -= 7;
                }
                day
            }
            RuleDay::LastWeekday(weekday) => {
                let last = first + length - 1;
                last - math::floor_mod(weekday_of(last) - weekday.iso_number() as i64, 7)
            }
            RuleDay::WeekdayOnOrAfter { day, weekday } => {
                let base = first + day as i64 - 1;
                base + math::floor_mod(weekday.iso_number() as i64 - weekday_of(base), 7)
            }
            RuleDay::WeekdayOnOrBefore { day, weekday } => {
                let base = first + day as i64 - 1;
                base - math::floor_mod(weekday_of(base) - weekday.iso_number() as i64, 7)
            }
        }
    }
}

/// The clock a rule's time of day is read on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionClock {
    /// Local time under the offset in effect just before the transition.
    #[default]
    Wall,
    /// Local standard time.
    Standard,
    Utc,
}

/// When in a year an offset change happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionRule {
    month: Month,
    day: RuleDay,
    time_seconds: i32,
    clock: TransitionClock,
}

impl TransitionRule {
    const MAX_TIME_SECONDS: i64 = 167 * SECONDS_PER_HOUR;

    /// `time_seconds` is the time of day in seconds and may run past
    /// midnight in either direction by up to 167 hours.
    pub fn new(
        month: Month,
        day: RuleDay,
        time_seconds: i32,
        clock: TransitionClock,
    ) -> Result<TransitionRule, Error> {
        let time = time_seconds as i64;
        if !(-Self::MAX_TIME_SECONDS..=Self::MAX_TIME_SECONDS).contains(&time) {
            return Err(Error::out_of_range(
                "rule time of day",
                time,
                -Self::MAX_TIME_SECONDS,
                Self::MAX_TIME_SECONDS,
            ));
        }
        Ok(TransitionRule {
            month,
            day: day.validate()?,
            time_seconds,
            clock,
        })
    }

    pub const fn month(&self) -> Month {
        self.month
    }

    pub const fn day(&self) -> RuleDay {
        self.day
    }

    pub const fn time_seconds(&self) -> i32 {
        self.time_seconds
    }

    pub const fn clock(&self) -> TransitionClock {
        self.clock
    }

    // Epoch second of the rule in `year`.
    fn epoch_second(&self, year: i32, standard: UtcOffset, before: UtcOffset) -> i64 {
        let local = self.day.resolve(year, self.month) * SECONDS_PER_DAY + self.time_seconds as i64;
        let offset = match self.clock {
            TransitionClock::Wall => before,
            TransitionClock::Standard => standard,
            TransitionClock::Utc => UtcOffset::UTC,
        };
        local - offset.total_seconds() as i64
    }
}

/// A yearly daylight-saving period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DaylightSaving {
    pub offset: UtcOffset,
    pub start: TransitionRule,
    pub end: TransitionRule,
}

/// A standard offset plus an optional annual daylight-saving period.
#[derive(Debug)]
pub struct RecurringRules {
    standard_offset: UtcOffset,
    daylight: Option<DaylightSaving>,
    years: RwLock<HashMap<i32, Arc<[TimeZoneOffsetTransition]>>>,
}

impl RecurringRules {
    /// A zone that stays at `standard_offset` all year.
    pub fn standard_only(standard_offset: UtcOffset) -> RecurringRules {
        RecurringRules {
            standard_offset,
            daylight: None,
            years: RwLock::default(),
        }
    }

    /// Fails with [`Error::InvalidTransition`] when the daylight offset
    /// equals the standard offset.
    pub fn new(standard_offset: UtcOffset, daylight: DaylightSaving) -> Result<RecurringRules, Error> {
        if daylight.offset == standard_offset {
            return Err(Error::InvalidTransition {
                offset: standard_offset.to_string(),
            });
        }
        Ok(RecurringRules {
            daylight: Some(daylight),
            ..RecurringRules::standard_only(standard_offset)
        })
    }

    pub const fn standard_offset(&self) -> UtcOffset {
        self.standard_offset
    }

    pub const fn daylight_saving(&self) -> Option<DaylightSaving> {
        self.daylight
    }

    /// Transitions whose rules fall in `year`, in timeline order.
    pub fn transitions_in_year(&self, year: i32) -> Arc<[TimeZoneOffsetTransition]> {
        let Some(daylight) = self.daylight else {
            return Arc::from(Vec::new());
        };
        if let Some(found) = self
            .years
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&year)
        {
            return Arc::clone(found);
        }
        let standard = self.standard_offset;
        let mut computed = Vec::with_capacity(2);
        for (rule, before, after) in [
            (daylight.start, standard, daylight.offset),
            (daylight.end, daylight.offset, standard),
        ] {
            let secs = rule.epoch_second(year, standard, before);
            // Rules at the very ends of the timeline are dropped.
            if let Ok(instant) = Instant::from_epoch_second(secs, 0) {
                if let Ok(transition) = TimeZoneOffsetTransition::new(instant, before, after) {
                    computed.push(transition);
                }
            }
        }
        computed.sort_by_key(|t| t.instant());
        trace!("computed {} transitions for year {year}", computed.len());
        let computed: Arc<[TimeZoneOffsetTransition]> = Arc::from(computed);
        self.years
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(year, Arc::clone(&computed));
        computed
    }

    // Transitions of the years around the UTC year of `instant`.
    fn nearby(&self, instant: Instant) -> Vec<TimeZoneOffsetTransition> {
        let year = instant.to_utc_date_time().date().year();
        let (first, last) = (
            (year - 1).max(calendar::MIN_YEAR),
            (year + 1).min(calendar::MAX_YEAR),
        );
        (first..=last)
            .flat_map(|y| self.transitions_in_year(y).iter().copied().collect::<Vec<_>>())
            .collect()
    }
}

impl Clone for RecurringRules {
    fn clone(&self) -> RecurringRules {
        RecurringRules {
            standard_offset: self.standard_offset,
            daylight: self.daylight,
            years: RwLock::default(),
        }
    }
}

impl TimeZoneRules for RecurringRules {
    fn offset_at(&self, instant: Instant) -> UtcOffset {
        let nearby = self.nearby(instant);
        match nearby.iter().rev().find(|t| t.instant() <= instant) {
            Some(t) => t.offset_after(),
            None => nearby
                .first()
                .map_or(self.standard_offset, |t| t.offset_before()),
        }
    }

    fn standard_offset_at(&self, _instant: Instant) -> UtcOffset {
        self.standard_offset
    }

    fn next_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition> {
        self.nearby(instant).into_iter().find(|t| t.instant() > instant)
    }

    fn previous_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition> {
        self.nearby(instant)
            .into_iter()
            .rev()
            .find(|t| t.instant() < instant)
    }

    fn has_fixed_offset(&self) -> bool {
        self.daylight.is_none()
    }
}
