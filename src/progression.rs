// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Stepping through a bounded [`Interval`].
//!
//! Element `k` is always `start + k * step`, computed from the start, so
//! month-end clamping and time-zone gaps never accumulate over the walk.
//! Iteration stops at the first element that is not before the end.

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::TimeInstant;
use crate::interval::Interval;
use crate::offset_datetime::OffsetDateTime;
use crate::period::Period;
use crate::zoned::ZonedDateTime;
use std::fmt;
use std::iter::FusedIterator;

type AddPeriod<T> = fn(&T, Period) -> Result<T, Error>;

#[derive(Clone, Copy)]
enum Step<T> {
    Exact(Duration),
    Calendar(Period, AddPeriod<T>),
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Exact(duration) => f.debug_tuple("Exact").field(duration).finish(),
            Step::Calendar(period, _) => f.debug_tuple("Calendar").field(period).finish(),
        }
    }
}

/// Points at a fixed step through an interval.
///
/// # Examples
///
/// ```
/// use calzone::{DateTime, DateTimeInterval, Duration};
///
/// let start: DateTime = "2018-01-01T00:00".parse().unwrap();
/// let end: DateTime = "2018-01-01T01:00".parse().unwrap();
/// let quarters = DateTimeInterval::new(start, end)
///     .step_by(Duration::of_minutes(15).unwrap())
///     .unwrap();
/// assert_eq!(quarters.count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct TimeProgression<T: TimeInstant> {
    start: T,
    end: T,
    step: Step<T>,
    k: i64,
    done: bool,
}

impl<T: TimeInstant> TimeProgression<T> {
    fn new(interval: &Interval<T>, step: Step<T>) -> Result<TimeProgression<T>, Error> {
        let (start, end) = match (interval.start(), interval.end()) {
            (Some(start), Some(end)) => (start.clone(), end.clone()),
            _ => {
                return Err(Error::Unbounded {
                    operation: "stepping through an interval",
                })
            }
        };
        let done = interval.is_empty();
        Ok(TimeProgression {
            start,
            end,
            step,
            k: 0,
            done,
        })
    }

    fn element(&self, k: i64) -> Option<T> {
        let point = match self.step {
            Step::Exact(step) => {
                let offset = step.checked_mul(k).ok()?;
                self.start.checked_add_duration(offset).ok()?
            }
            Step::Calendar(period, add) => {
                let total = period.checked_mul(i32::try_from(k).ok()?).ok()?;
                add(&self.start, total).ok()?
            }
        };
        (point < self.end).then_some(point)
    }
}

impl<T: TimeInstant> Iterator for TimeProgression<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        match self.element(self.k) {
            Some(point) => {
                self.k += 1;
                Some(point)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<T: TimeInstant> FusedIterator for TimeProgression<T> {}

impl<T: TimeInstant> Interval<T> {
    /// Every `step` from the start while before the end.
    ///
    /// # Errors
    ///
    /// [`Error::Unbounded`] unless both sides are bounded, and
    /// [`Error::InvalidSpanStep`] unless `step` is positive.
    pub fn step_by(&self, step: Duration) -> Result<TimeProgression<T>, Error> {
        if !step.is_positive() {
            return Err(Error::InvalidSpanStep {
                step: step.to_string(),
            });
        }
        TimeProgression::new(self, Step::Exact(step))
    }
}

fn calendar_step<T: TimeInstant>(
    interval: &Interval<T>,
    period: Period,
    add: AddPeriod<T>,
) -> Result<TimeProgression<T>, Error> {
    let positive = !period.is_zero() && period.years() >= 0 && period.months() >= 0 && period.days() >= 0;
    if !positive {
        return Err(Error::InvalidSpanStep {
            step: period.to_string(),
        });
    }
    TimeProgression::new(interval, Step::Calendar(period, add))
}

impl Interval<DateTime> {
    /// Every `period` from the start, keeping the time of day.
    ///
    /// # Errors
    ///
    /// As [`Interval::step_by`]; a period with any negative component is
    /// not a valid step.
    pub fn step_period(&self, period: Period) -> Result<TimeProgression<DateTime>, Error> {
        calendar_step(self, period, |start, total| start.checked_add_period(total))
    }
}

impl Interval<OffsetDateTime> {
    pub fn step_period(&self, period: Period) -> Result<TimeProgression<OffsetDateTime>, Error> {
        calendar_step(self, period, |start, total| start.checked_add_period(total))
    }
}

impl Interval<ZonedDateTime> {
    /// Every `period` from the start on the local calendar. Each element is
    /// resolved in the zone on its own, so a step landing in a gap moves
    /// forward without shifting later elements.
    pub fn step_period(&self, period: Period) -> Result<TimeProgression<ZonedDateTime>, Error> {
        calendar_step(self, period, ZonedDateTime::checked_add_period)
    }
}
