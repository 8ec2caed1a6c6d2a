// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The rules protocol every time zone answers through.

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::Instant;
use crate::offset::UtcOffset;
use std::fmt;

// Any transition whose local window holds a date-time happens within this
// many seconds of that date-time read as UTC: offsets are bounded by 18 hours
// and a discontinuity by 36.
const SEARCH_WINDOW: i64 = 2 * 86_400;

/// A discontinuity in a zone's offset.
///
/// When `offset_after > offset_before` clocks jump forward and the local
/// times in `[date_time_before, date_time_after)` never occur (a gap). When
/// `offset_after < offset_before` clocks fall back and the local times in
/// `[date_time_after, date_time_before)` occur twice (an overlap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeZoneOffsetTransition {
    instant: Instant,
    offset_before: UtcOffset,
    offset_after: UtcOffset,
}

impl TimeZoneOffsetTransition {
    /// Fails with [`Error::InvalidTransition`] when both offsets are equal.
    pub fn new(
        instant: Instant,
        offset_before: UtcOffset,
        offset_after: UtcOffset,
    ) -> Result<TimeZoneOffsetTransition, Error> {
        if offset_before == offset_after {
            return Err(Error::InvalidTransition {
                offset: offset_before.to_string(),
            });
        }
        Ok(TimeZoneOffsetTransition {
            instant,
            offset_before,
            offset_after,
        })
    }

    #[inline]
    pub const fn instant(&self) -> Instant {
        self.instant
    }

    #[inline]
    pub const fn offset_before(&self) -> UtcOffset {
        self.offset_before
    }

    #[inline]
    pub const fn offset_after(&self) -> UtcOffset {
        self.offset_after
    }

    /// Local date-time of the transition under the old offset.
    pub fn date_time_before(&self) -> DateTime {
        local_reading(self.instant, self.offset_before)
    }

    /// Local date-time of the transition under the new offset.
    pub fn date_time_after(&self) -> DateTime {
        local_reading(self.instant, self.offset_after)
    }

    /// Signed size of the discontinuity, positive for a gap.
    pub fn duration(&self) -> Duration {
        Duration::of_seconds(
            self.offset_after.total_seconds() as i64 - self.offset_before.total_seconds() as i64,
        )
    }

    #[inline]
    pub fn is_gap(&self) -> bool {
        self.offset_after > self.offset_before
    }

    #[inline]
    pub fn is_overlap(&self) -> bool {
        self.offset_after < self.offset_before
    }

    /// Offsets valid for local date-times inside this transition's window:
    /// none for a gap, `[offset_before, offset_after]` for an overlap.
    pub fn valid_offsets(&self) -> Vec<UtcOffset> {
        if self.is_gap() {
            Vec::new()
        } else {
            vec![self.offset_before, self.offset_after]
        }
    }

    /// Whether `date_time` falls inside the gap or overlap window.
    pub fn contains_local(&self, date_time: DateTime) -> bool {
        let (before, after) = (self.date_time_before(), self.date_time_after());
        if self.is_gap() {
            before <= date_time && date_time < after
        } else {
            after <= date_time && date_time < before
        }
    }
}

impl fmt::Display for TimeZoneOffsetTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_gap() { "Gap" } else { "Overlap" };
        write!(
            f,
            "Transition[{kind} at {}{} to {}]",
            self.date_time_before(),
            self.offset_before,
            self.offset_after
        )
    }
}

// Local reading clamped to the supported range; only the extreme ends of the
// timeline at extreme offsets fall outside it.
fn local_reading(instant: Instant, offset: UtcOffset) -> DateTime {
    instant.to_date_time_at(offset).unwrap_or(if offset.total_seconds() < 0 {
        DateTime::MIN
    } else {
        DateTime::MAX
    })
}

/// Offset rules for one time zone.
///
/// Implementations provide the instant-based queries; the local date-time
/// queries have default implementations built on [`offset_at`] and
/// [`next_transition`] that handle gaps and overlaps for any rule set.
///
/// [`offset_at`]: TimeZoneRules::offset_at
/// [`next_transition`]: TimeZoneRules::next_transition
pub trait TimeZoneRules: fmt::Debug + Send + Sync {
    /// Offset in effect at `instant`.
    fn offset_at(&self, instant: Instant) -> UtcOffset;

    /// Standard (non-daylight) offset in effect at `instant`.
    fn standard_offset_at(&self, instant: Instant) -> UtcOffset;

    /// First transition strictly after `instant`.
    fn next_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition>;

    /// Last transition strictly before `instant`.
    fn previous_transition(&self, instant: Instant) -> Option<TimeZoneOffsetTransition>;

    /// Whether the zone never changes offset.
    fn has_fixed_offset(&self) -> bool {
        false
    }

    /// Offsets at which `date_time` denotes an instant: none in a gap, one
    /// normally, two in an overlap (earlier offset first).
    fn valid_offsets_at(&self, date_time: DateTime) -> Vec<UtcOffset> {
        let local = date_time.epoch_second_at(UtcOffset::UTC);
        let mut cursor = Instant::from_epoch_second_saturating(local - SEARCH_WINDOW);
        let limit = local + SEARCH_WINDOW;
        let mut offset = self.offset_at(cursor);
        let mut segment_start = i64::MIN;
        let mut valid = Vec::with_capacity(2);
        loop {
            let next = self
                .next_transition(cursor)
                .filter(|t| t.instant().epoch_second() <= limit);
            let segment_end = next.map_or(i64::MAX, |t| t.instant().epoch_second());
            let candidate = local - offset.total_seconds() as i64;
            if segment_start <= candidate && candidate < segment_end && !valid.contains(&offset) {
                valid.push(offset);
            }
            match next {
                Some(t) => {
                    segment_start = segment_end;
                    offset = t.offset_after();
                    cursor = t.instant();
                }
                None => break,
            }
        }
        valid
    }

    /// The transition whose gap or overlap window holds `date_time`, if any.
    fn transition_at(&self, date_time: DateTime) -> Option<TimeZoneOffsetTransition> {
        let local = date_time.epoch_second_at(UtcOffset::UTC);
        let mut cursor = Instant::from_epoch_second_saturating(local - SEARCH_WINDOW);
        let limit = local + SEARCH_WINDOW;
        while let Some(t) = self.next_transition(cursor) {
            if t.instant().epoch_second() > limit {
                break;
            }
            if t.contains_local(date_time) {
                return Some(t);
            }
            cursor = t.instant();
        }
        None
    }

    /// The offset to read `date_time` at: the only valid one, the offset
    /// after a gap, or the earlier offset of an overlap.
    fn offset_at_local(&self, date_time: DateTime) -> UtcOffset {
        let valid = self.valid_offsets_at(date_time);
        match valid.first() {
            Some(&offset) => offset,
            None => match self.transition_at(date_time) {
                Some(t) => t.offset_after(),
                None => self.offset_at(Instant::from_epoch_second_saturating(
                    date_time.epoch_second_at(UtcOffset::UTC),
                )),
            },
        }
    }

    fn is_valid_offset(&self, date_time: DateTime, offset: UtcOffset) -> bool {
        self.valid_offsets_at(date_time).contains(&offset)
    }

    fn is_daylight_savings_at(&self, instant: Instant) -> bool {
        self.offset_at(instant) != self.standard_offset_at(instant)
    }

    /// Amount of daylight saving in effect at `instant`, zero outside it.
    fn daylight_savings_at(&self, instant: Instant) -> Duration {
        let actual = self.offset_at(instant).total_seconds() as i64;
        let standard = self.standard_offset_at(instant).total_seconds() as i64;
        Duration::of_seconds(actual - standard)
    }
}
