// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Closed ranges of dates.

use crate::date::Date;
use crate::error::Error;
use crate::math;
use crate::period::Period;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

/// The dates from `start` through `end_inclusive`.
///
/// [`Date::MIN`] as start and [`Date::MAX`] as end stand for an unbounded
/// side. A range whose start is after its end is empty; all empty ranges
/// compare equal.
///
/// # Examples
///
/// ```
/// use calzone::{Date, DateRange};
///
/// let range = DateRange::new(Date::new(2018, 1, 31).unwrap(), Date::new(2018, 4, 30).unwrap());
/// let steps: Vec<String> = range
///     .step_months(2)
///     .unwrap()
///     .map(|d| d.to_string())
///     .collect();
/// assert_eq!(steps, ["2018-01-31", "2018-03-31"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    start: Date,
    end_inclusive: Date,
}

impl DateRange {
    pub const EMPTY: DateRange = DateRange {
        start: Date::MAX,
        end_inclusive: Date::MIN,
    };

    pub const UNBOUNDED: DateRange = DateRange {
        start: Date::MIN,
        end_inclusive: Date::MAX,
    };

    pub const fn new(start: Date, end_inclusive: Date) -> DateRange {
        DateRange {
            start,
            end_inclusive,
        }
    }

    /// From `start` with no upper bound.
    pub const fn starting_at(start: Date) -> DateRange {
        DateRange::new(start, Date::MAX)
    }

    /// Up to `end_inclusive` with no lower bound.
    pub const fn ending_at(end_inclusive: Date) -> DateRange {
        DateRange::new(Date::MIN, end_inclusive)
    }

    pub const fn start(self) -> Date {
        self.start
    }

    pub const fn end_inclusive(self) -> Date {
        self.end_inclusive
    }

    pub fn is_empty(self) -> bool {
        self.start > self.end_inclusive
    }

    pub fn has_unbounded_start(self) -> bool {
        self.start == Date::MIN
    }

    pub fn has_unbounded_end(self) -> bool {
        self.end_inclusive == Date::MAX
    }

    pub fn contains(self, date: Date) -> bool {
        self.start <= date && date <= self.end_inclusive
    }

    /// Fails with [`Error::EmptyRange`] when empty.
    pub fn first(self) -> Result<Date, Error> {
        if self.is_empty() {
            Err(Error::EmptyRange)
        } else {
            Ok(self.start)
        }
    }

    /// Fails with [`Error::EmptyRange`] when empty.
    pub fn last(self) -> Result<Date, Error> {
        if self.is_empty() {
            Err(Error::EmptyRange)
        } else {
            Ok(self.end_inclusive)
        }
    }

    /// Number of dates in the range, zero when empty.
    pub fn length_in_days(self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.start.days_until(self.end_inclusive) + 1
        }
    }

    /// The period from the first date to the day after the last.
    ///
    /// Fails with [`Error::Unbounded`] if either side is unbounded.
    pub fn as_period(self) -> Result<Period, Error> {
        if self.has_unbounded_start() || self.has_unbounded_end() {
            return Err(Error::Unbounded {
                operation: "date range as period",
            });
        }
        if self.is_empty() {
            return Ok(Period::ZERO);
        }
        self.start.period_until(self.end_inclusive.checked_add_days(1)?)
    }

    pub fn intersection(self, other: DateRange) -> DateRange {
        DateRange::new(
            self.start.max(other.start),
            self.end_inclusive.min(other.end_inclusive),
        )
    }

    /// Every date in order.
    pub fn iter(self) -> DateRangeIter {
        DateRangeIter {
            next: self.start,
            last: self.end_inclusive,
            done: self.is_empty(),
        }
    }

    /// Every date, last first.
    pub fn reversed(self) -> std::iter::Rev<DateRangeIter> {
        self.iter().rev()
    }

    /// Every `days`th date from the first; a negative step walks back from
    /// the last. Fails with [`Error::InvalidStep`] for zero.
    pub fn step_days(self, days: i64) -> Result<DateProgression, Error> {
        DateProgression::new(self, Step::Days(days), days)
    }

    /// `first + k * months` for `k = 0, 1, ...` while inside the range.
    ///
    /// Each element is computed from the first, so day-of-month clamping in
    /// short months does not accumulate.
    pub fn step_months(self, months: i64) -> Result<DateProgression, Error> {
        DateProgression::new(self, Step::Months(months), months)
    }

    pub fn step_years(self, years: i64) -> Result<DateProgression, Error> {
        let months = math::times_exact(years, 12)?;
        DateProgression::new(self, Step::Months(months), years)
    }
}

impl PartialEq for DateRange {
    fn eq(&self, other: &DateRange) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => {
                self.start == other.start && self.end_inclusive == other.end_inclusive
            }
            _ => false,
        }
    }
}

impl Eq for DateRange {}

impl Hash for DateRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canonical = if self.is_empty() {
            DateRange::EMPTY
        } else {
            *self
        };
        canonical.start.hash(state);
        canonical.end_inclusive.hash(state);
    }
}

impl IntoIterator for DateRange {
    type Item = Date;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> DateRangeIter {
        self.iter()
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Date,
    last: Date,
    done: bool,
}

impl Iterator for DateRangeIter {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.done {
            return None;
        }
        let current = self.next;
        match current.checked_add_days(1) {
            Ok(next) if current < self.last => self.next = next,
            _ => self.done = true,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.next.days_until(self.last) + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for DateRangeIter {
    fn next_back(&mut self) -> Option<Date> {
        if self.done {
            return None;
        }
        let current = self.last;
        match current.checked_add_days(-1) {
            Ok(previous) if self.next < current => self.last = previous,
            _ => self.done = true,
        }
        Some(current)
    }
}

impl FusedIterator for DateRangeIter {}

#[derive(Debug, Clone, Copy)]
enum Step {
    Days(i64),
    Months(i64),
}

/// Dates at a fixed calendar step through a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateProgression {
    range: DateRange,
    step: Step,
    k: i64,
    done: bool,
}

impl DateProgression {
    fn new(range: DateRange, step: Step, given: i64) -> Result<DateProgression, Error> {
        if matches!(step, Step::Days(0) | Step::Months(0)) {
            return Err(Error::InvalidStep { step: given });
        }
        Ok(DateProgression {
            range,
            step,
            k: 0,
            done: range.is_empty(),
        })
    }

    // Element `k`, anchored at the first date for forward steps and at the
    // last date for backward ones.
    fn element(&self, k: i64) -> Option<Date> {
        let (anchor, amount) = match self.step {
            Step::Days(n) | Step::Months(n) if n > 0 => (self.range.start, n),
            Step::Days(n) | Step::Months(n) => (self.range.end_inclusive, n),
        };
        let total = amount.checked_mul(k)?;
        let date = match self.step {
            Step::Days(_) => anchor.checked_add_days(total),
            Step::Months(_) => anchor.checked_add_months(total),
        };
        date.ok().filter(|d| self.range.contains(*d))
    }
}

impl Iterator for DateProgression {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        if self.done {
            return None;
        }
        match self.element(self.k) {
            Some(date) => {
                self.k += 1;
                Some(date)
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl FusedIterator for DateProgression {}

impl fmt::Display for DateRange {
    /// `start/end`, with `..` for an unbounded side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_unbounded_start() {
            f.write_str("..")?;
        } else {
            write!(f, "{}", self.start)?;
        }
        if self.has_unbounded_end() {
            f.write_str("/..")
        } else {
            write!(f, "/{}", self.end_inclusive)
        }
    }
}

impl FromStr for DateRange {
    type Err = Error;

    /// Also accepts the empty string as [`DateRange::EMPTY`].
    fn from_str(s: &str) -> Result<DateRange, Error> {
        if s.is_empty() {
            return Ok(DateRange::EMPTY);
        }
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| Error::parse("DateRange", s, "expected '/' between bounds"))?;
        let side = |part: &str, unbounded: Date| match part {
            ".." => Ok(unbounded),
            _ => part
                .parse::<Date>()
                .map_err(|_| Error::parse("DateRange", s, "invalid date bound")),
        };
        Ok(DateRange::new(side(start, Date::MIN)?, side(end, Date::MAX)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u8, day: u8) -> Date {
        Date::new(y, m, day).unwrap()
    }

    #[test]
    fn month_steps_do_not_drift() {
        let range = DateRange::new(d(2018, 1, 31), d(2018, 4, 30));
        let steps: Vec<Date> = range.step_months(2).unwrap().collect();
        assert_eq!(steps, vec![d(2018, 1, 31), d(2018, 3, 31)]);
        let monthly: Vec<Date> = range.step_months(1).unwrap().collect();
        assert_eq!(
            monthly,
            vec![d(2018, 1, 31), d(2018, 2, 28), d(2018, 3, 31), d(2018, 4, 30)]
        );
    }

    #[test]
    fn negative_steps_walk_back_from_the_last() {
        let range = DateRange::new(d(2018, 1, 1), d(2018, 1, 10));
        let steps: Vec<Date> = range.step_days(-4).unwrap().collect();
        assert_eq!(steps, vec![d(2018, 1, 10), d(2018, 1, 6), d(2018, 1, 2)]);
        assert_eq!(range.step_days(0).unwrap_err(), Error::InvalidStep { step: 0 });
        let leap = DateRange::new(d(2016, 2, 29), d(2021, 1, 1));
        let years: Vec<Date> = leap.step_years(1).unwrap().collect();
        assert_eq!(
            years,
            vec![d(2016, 2, 29), d(2017, 2, 28), d(2018, 2, 28), d(2019, 2, 28), d(2020, 2, 29)]
        );
    }

    #[test]
    fn huge_year_steps_overflow() {
        let range = DateRange::new(d(2018, 1, 1), d(2019, 1, 1));
        let err = range.step_years(i64::MAX).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Overflow);
        assert_eq!(range.step_years(0).unwrap_err(), Error::InvalidStep { step: 0 });
    }

    #[test]
    fn empty_ranges() {
        let backwards = DateRange::new(d(2018, 2, 1), d(2018, 1, 1));
        assert!(backwards.is_empty());
        assert_eq!(backwards.iter().count(), 0);
        assert_eq!(backwards.step_months(1).unwrap().count(), 0);
        assert_eq!(backwards, DateRange::EMPTY);
        assert_eq!(backwards, DateRange::new(d(2000, 1, 2), d(2000, 1, 1)));
        assert_eq!(backwards.first(), Err(Error::EmptyRange));
        assert_eq!(backwards.last(), Err(Error::EmptyRange));
        assert_eq!(backwards.length_in_days(), 0);
        assert_eq!(backwards.as_period(), Ok(Period::ZERO));
    }

    #[test]
    fn iteration_both_ways() {
        let range = DateRange::new(d(2018, 12, 30), d(2019, 1, 2));
        let forward: Vec<Date> = range.into_iter().collect();
        assert_eq!(
            forward,
            vec![d(2018, 12, 30), d(2018, 12, 31), d(2019, 1, 1), d(2019, 1, 2)]
        );
        let backward: Vec<Date> = range.reversed().collect();
        assert_eq!(backward, forward.iter().rev().copied().collect::<Vec<_>>());
        assert_eq!(range.iter().size_hint(), (4, Some(4)));
        let single = DateRange::new(d(2018, 1, 1), d(2018, 1, 1));
        assert_eq!(single.iter().collect::<Vec<_>>(), vec![d(2018, 1, 1)]);
        let mut both = range.iter();
        assert_eq!(both.next(), Some(d(2018, 12, 30)));
        assert_eq!(both.next_back(), Some(d(2019, 1, 2)));
        assert_eq!(both.next_back(), Some(d(2019, 1, 1)));
        assert_eq!(both.next(), Some(d(2018, 12, 31)));
        assert_eq!(both.next(), None);
    }

    #[test]
    fn measures() {
        let range = DateRange::new(d(2018, 1, 31), d(2018, 4, 30));
        assert_eq!(range.length_in_days(), 90);
        assert_eq!(range.as_period(), Ok(Period::new(0, 3, 1)));
        let quarter = DateRange::new(d(2018, 1, 1), d(2018, 3, 31));
        assert_eq!(quarter.as_period(), Ok(Period::of_months(3)));
        assert_eq!(
            DateRange::starting_at(d(2018, 1, 1)).as_period(),
            Err(Error::Unbounded {
                operation: "date range as period"
            })
        );
        assert!(DateRange::UNBOUNDED.contains(Date::MIN));
        assert_eq!(
            range.intersection(DateRange::ending_at(d(2018, 2, 10))),
            DateRange::new(d(2018, 1, 31), d(2018, 2, 10))
        );
    }

    #[test]
    fn text_forms() {
        let range = DateRange::new(d(2018, 1, 31), d(2018, 4, 30));
        assert_eq!(range.to_string(), "2018-01-31/2018-04-30");
        assert_eq!("2018-01-31/2018-04-30".parse::<DateRange>(), Ok(range));
        assert_eq!(DateRange::UNBOUNDED.to_string(), "../..");
        assert_eq!("../..".parse::<DateRange>(), Ok(DateRange::UNBOUNDED));
        assert_eq!("".parse::<DateRange>(), Ok(DateRange::EMPTY));
        let empty = DateRange::new(d(2018, 2, 1), d(2018, 1, 1));
        assert_eq!(empty.to_string().parse::<DateRange>(), Ok(empty));
        assert!("2018-01-31".parse::<DateRange>().is_err());
        assert!("2018-01-31/2018-02-30".parse::<DateRange>().is_err());
    }
}
