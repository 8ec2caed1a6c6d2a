// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open intervals on a timeline.
//!
//! This module provides:
//! - [`Interval<T>`]: generic interval over any [`TimeInstant`], with either
//!   side optionally unbounded
//! - [`complement_within`] and [`intersect_intervals`] for sorted,
//!   non-overlapping interval lists

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::{Instant, TimeInstant};
use crate::offset_datetime::OffsetDateTime;
use crate::tz::TimeZoneRulesProvider;
use crate::zoned::ZonedDateTime;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The span `[start, end)` between two points of a timeline.
///
/// A missing bound extends the interval to the far past or far future. An
/// interval whose start is not before its end is empty; all empty intervals
/// compare equal regardless of their bounds.
///
/// # Examples
///
/// ```
/// use calzone::{Instant, InstantInterval};
///
/// let start: Instant = "2018-01-01T00:00:00Z".parse().unwrap();
/// let end: Instant = "2018-01-02T00:00:00Z".parse().unwrap();
/// let day = InstantInterval::new(start, end);
///
/// assert!(day.contains(&start));
/// assert!(!day.contains(&end));
/// assert_eq!(day.to_duration().unwrap().seconds(), 86_400);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Interval<T: TimeInstant> {
    start: Option<T>,
    end: Option<T>,
}

pub type InstantInterval = Interval<Instant>;

pub type DateTimeInterval = Interval<DateTime>;

pub type OffsetDateTimeInterval = Interval<OffsetDateTime>;

pub type ZonedDateTimeInterval = Interval<ZonedDateTime>;

// `a < b` where `a` is a start bound and `b` an end bound.
fn starts_before_end<T: PartialOrd>(start: Option<&T>, end: Option<&T>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s < e,
        _ => true,
    }
}

// Orders end bounds, with a missing end after every point.
fn cmp_ends<T: PartialOrd>(a: Option<&T>, b: Option<&T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
    }
}

// The later of two start bounds, with a missing start before every point.
fn later_start<T: TimeInstant>(a: Option<&T>, b: Option<&T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if a >= b { a.clone() } else { b.clone() }),
        (Some(x), None) | (None, Some(x)) => Some(x.clone()),
        (None, None) => None,
    }
}

fn earlier_end<T: TimeInstant>(a: Option<&T>, b: Option<&T>) -> Option<T> {
    match cmp_ends(a, b) {
        Ordering::Greater => b.cloned(),
        _ => a.cloned(),
    }
}

impl<T: TimeInstant> Interval<T> {
    /// Creates the interval `[start, end)`.
    pub fn new(start: T, end: T) -> Self {
        Interval {
            start: Some(start),
            end: Some(end),
        }
    }

    /// `None` leaves that side unbounded.
    pub fn from_bounds(start: Option<T>, end: Option<T>) -> Self {
        Interval { start, end }
    }

    /// The whole timeline.
    pub fn unbounded() -> Self {
        Interval {
            start: None,
            end: None,
        }
    }

    /// From `start` into the far future.
    pub fn starting_at(start: T) -> Self {
        Interval {
            start: Some(start),
            end: None,
        }
    }

    /// From the far past up to, but excluding, `end`.
    pub fn ending_before(end: T) -> Self {
        Interval {
            start: None,
            end: Some(end),
        }
    }

    /// `[start, start + duration)`.
    pub fn with_duration(start: T, duration: Duration) -> Result<Self, Error> {
        let end = start.checked_add_duration(duration)?;
        Ok(Interval::new(start, end))
    }

    pub fn start(&self) -> Option<&T> {
        self.start.as_ref()
    }

    pub fn end(&self) -> Option<&T> {
        self.end.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        !starts_before_end(self.start.as_ref(), self.end.as_ref())
    }

    /// Whether both sides are bounded.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, point: &T) -> bool {
        self.start.as_ref().map_or(true, |s| s <= point)
            && self.end.as_ref().map_or(true, |e| point < e)
    }

    /// Returns the overlapping sub-interval between `self` and `other`.
    ///
    /// Intervals are half-open: if one ends exactly when the other starts,
    /// the intersection is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = later_start(self.start.as_ref(), other.start.as_ref());
        let end = earlier_end(self.end.as_ref(), other.end.as_ref());
        if starts_before_end(start.as_ref(), end.as_ref()) {
            Some(Interval::from_bounds(start, end))
        } else {
            None
        }
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Exact length of a bounded interval, zero when empty.
    ///
    /// Fails with [`Error::Unbounded`] if either side is unbounded.
    pub fn to_duration(&self) -> Result<Duration, Error> {
        match (&self.start, &self.end) {
            (Some(start), Some(end)) if start < end => Ok(end.difference(start)),
            (Some(_), Some(_)) => Ok(Duration::ZERO),
            _ => Err(Error::Unbounded {
                operation: "interval duration",
            }),
        }
    }

    fn parse_bounds(
        text: &str,
        mut bound: impl FnMut(&str) -> Result<T, Error>,
    ) -> Result<Self, Error> {
        let split = split_bounds(text)
            .ok_or_else(|| Error::parse("Interval", text, "expected '/' between bounds"))?;
        let mut side = |part: &str| match part {
            ".." => Ok(None),
            _ => bound(part).map(Some),
        };
        let start = side(&text[..split])?;
        let end = side(&text[split + 1..])?;
        Ok(Interval::from_bounds(start, end))
    }
}

// Position of the `/` separating the bounds, skipping bracketed zone ids.
fn split_bounds(text: &str) -> Option<usize> {
    let mut depth = 0u32;
    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b'/' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

impl<T: TimeInstant> PartialEq for Interval<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => self.start == other.start && self.end == other.end,
            _ => false,
        }
    }
}

impl<T: TimeInstant + Eq> Eq for Interval<T> {}

impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    /// `start/end`, with `..` for an unbounded side.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.start {
            Some(start) => write!(f, "{start}/")?,
            None => f.write_str("../")?,
        }
        match &self.end {
            Some(end) => write!(f, "{end}"),
            None => f.write_str(".."),
        }
    }
}

impl<T: TimeInstant + FromStr<Err = Error>> FromStr for Interval<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Interval::parse_bounds(s, |part| part.parse())
    }
}

impl Interval<ZonedDateTime> {
    /// Parses bounds with region ids resolved through `provider`.
    pub fn parse_with(
        text: &str,
        provider: Option<&dyn TimeZoneRulesProvider>,
    ) -> Result<Self, Error> {
        Interval::parse_bounds(text, |part| ZonedDateTime::parse_with(part, provider))
    }
}

/// Returns the gaps (complement) of `intervals` within the bounding `outer`
/// interval.
///
/// `intervals` must be sorted and non-overlapping; empty elements are
/// skipped. The function runs in O(n) time with a single pass.
pub fn complement_within<T: TimeInstant>(
    outer: &Interval<T>,
    intervals: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    if outer.is_empty() {
        return gaps;
    }
    let mut cursor = outer.start.clone();
    for p in intervals.iter().filter(|p| !p.is_empty()) {
        let gap_end = earlier_end(p.start.as_ref(), outer.end.as_ref());
        let before = match (&cursor, &p.start) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(c), Some(s)) => s > c,
        };
        if before && starts_before_end(cursor.as_ref(), gap_end.as_ref()) {
            gaps.push(Interval::from_bounds(cursor.clone(), gap_end));
        }
        match &p.end {
            // Covers everything after this point.
            None => return gaps,
            Some(end) => {
                if cursor.as_ref().map_or(true, |c| end > c) {
                    cursor = Some(end.clone());
                }
            }
        }
    }
    if starts_before_end(cursor.as_ref(), outer.end.as_ref()) {
        gaps.push(Interval::from_bounds(cursor, outer.end.clone()));
    }
    gaps
}

/// Returns the intersection of two sorted, non-overlapping interval lists.
///
/// Uses an O(n+m) merge to find all overlapping spans, in chronological
/// order.
pub fn intersect_intervals<T: TimeInstant>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if cmp_ends(a[i].end.as_ref(), b[j].end.as_ref()) != Ordering::Greater {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tz::{InMemoryProvider, RecurringRules, TimeZone};
    use crate::offset::UtcOffset;

    fn dt(text: &str) -> DateTime {
        text.parse().unwrap()
    }

    fn span(start: &str, end: &str) -> DateTimeInterval {
        Interval::new(dt(start), dt(end))
    }

    #[test]
    fn intersection_overlap() {
        let a = span("2018-01-01T00:00", "2018-01-05T00:00");
        let b = span("2018-01-03T00:00", "2018-01-08T00:00");
        let overlap = a.intersection(&b).expect("expected overlap");
        assert_eq!(overlap, span("2018-01-03T00:00", "2018-01-05T00:00"));
        assert!(a.overlaps(&b));
    }

    #[test]
    fn intersection_touching_edges() {
        let a = span("2018-01-01T00:00", "2018-01-03T00:00");
        let b = span("2018-01-03T00:00", "2018-01-08T00:00");
        assert_eq!(a.intersection(&b), None);
    }

    #[test]
    fn intersection_with_unbounded_sides() {
        let after = Interval::starting_at(dt("2018-01-03T00:00"));
        let before = Interval::ending_before(dt("2018-01-05T00:00"));
        assert_eq!(
            after.intersection(&before),
            Some(span("2018-01-03T00:00", "2018-01-05T00:00"))
        );
        let all = DateTimeInterval::unbounded();
        assert_eq!(all.intersection(&after), Some(after));
        assert!(all.contains(&DateTime::MIN));
        assert!(!all.is_bounded());
    }

    #[test]
    fn emptiness_and_equality() {
        let backwards = span("2018-01-05T00:00", "2018-01-01T00:00");
        let instant = span("2018-02-01T00:00", "2018-02-01T00:00");
        assert!(backwards.is_empty());
        assert!(instant.is_empty());
        assert_eq!(backwards, instant);
        assert!(!backwards.contains(&dt("2018-01-03T00:00")));
        assert_eq!(backwards.to_duration(), Ok(Duration::ZERO));
    }

    #[test]
    fn durations() {
        let day = span("2018-03-10T12:00", "2018-03-11T12:00");
        assert_eq!(day.to_duration().unwrap(), Duration::of_hours(24).unwrap());
        let open = Interval::starting_at(dt("2018-03-10T12:00"));
        assert_eq!(
            open.to_duration(),
            Err(Error::Unbounded {
                operation: "interval duration"
            })
        );
        let built = Interval::with_duration(dt("2018-03-10T12:00"), Duration::of_hours(24).unwrap());
        assert_eq!(built.unwrap(), day);
    }

    #[test]
    fn text_forms() {
        let day = span("2018-03-10T12:00", "2018-03-11T12:00");
        assert_eq!(day.to_string(), "2018-03-10T12:00/2018-03-11T12:00");
        assert_eq!(day.to_string().parse::<DateTimeInterval>().unwrap(), day);
        let open: DateTimeInterval = "../2018-03-11T12:00".parse().unwrap();
        assert_eq!(open, Interval::ending_before(dt("2018-03-11T12:00")));
        assert_eq!(DateTimeInterval::unbounded().to_string(), "../..");
        assert!("2018-03-10T12:00".parse::<DateTimeInterval>().is_err());

        let instants: InstantInterval = "2018-01-01T00:00:00Z/..".parse().unwrap();
        assert_eq!(instants.start().unwrap().epoch_second(), 1_514_764_800);
    }

    #[test]
    fn zoned_bounds_with_region_ids() {
        let provider = InMemoryProvider::new("test").with_region(
            "Europe/Lisbon",
            RecurringRules::standard_only(UtcOffset::UTC),
        );
        let text = "2018-01-01T00:00Z[Europe/Lisbon]/2018-01-02T00:00Z[Europe/Lisbon]";
        let parsed = ZonedDateTimeInterval::parse_with(text, Some(&provider)).unwrap();
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parsed.start().unwrap().zone(), &TimeZone::region("Europe/Lisbon", &provider).unwrap());
        assert!(ZonedDateTimeInterval::parse_with(text, None).is_err());
    }

    #[test]
    fn complement_within_gaps() {
        let outer = span("2018-01-01T00:00", "2018-01-11T00:00");
        let inner = vec![
            span("2018-01-03T00:00", "2018-01-05T00:00"),
            span("2018-01-07T00:00", "2018-01-09T00:00"),
        ];
        let gaps = complement_within(&outer, &inner);
        assert_eq!(
            gaps,
            vec![
                span("2018-01-01T00:00", "2018-01-03T00:00"),
                span("2018-01-05T00:00", "2018-01-07T00:00"),
                span("2018-01-09T00:00", "2018-01-11T00:00"),
            ]
        );
        assert_eq!(complement_within(&outer, &[]), vec![outer]);
        assert!(complement_within(&outer, &[outer]).is_empty());
    }

    #[test]
    fn complement_of_unbounded() {
        let inner = [span("2018-01-03T00:00", "2018-01-05T00:00")];
        let gaps = complement_within(&DateTimeInterval::unbounded(), &inner);
        assert_eq!(
            gaps,
            vec![
                Interval::ending_before(dt("2018-01-03T00:00")),
                Interval::starting_at(dt("2018-01-05T00:00")),
            ]
        );
        let tail = [Interval::starting_at(dt("2018-01-03T00:00"))];
        let outer = span("2018-01-01T00:00", "2018-01-11T00:00");
        assert_eq!(
            complement_within(&outer, &tail),
            vec![span("2018-01-01T00:00", "2018-01-03T00:00")]
        );
    }

    #[test]
    fn complement_intersect_round_trip() {
        // above(min) ∩ complement(above(max)) = between(min, max)
        let day = |d: u8| dt(&format!("2018-01-{d:02}T00:00"));
        let outer = Interval::new(day(1), day(11));
        let above_min = [Interval::new(day(2), day(4)), Interval::new(day(6), day(10))];
        let above_max = [Interval::new(day(3), day(5)), Interval::new(day(8), day(9))];
        let below_max = complement_within(&outer, &above_max);
        let between = intersect_intervals(&above_min, &below_max);
        assert_eq!(
            between,
            vec![
                Interval::new(day(2), day(3)),
                Interval::new(day(6), day(8)),
                Interval::new(day(9), day(10)),
            ]
        );
    }
}
