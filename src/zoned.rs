// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date-times in a time zone.
//!
//! Turning a local date-time into a [`ZonedDateTime`] is where gaps and
//! overlaps surface:
//!
//! | Local time | Valid offsets | Resolution |
//! |------------|---------------|------------|
//! | Normal | 1 | That offset |
//! | In a gap | 0 | Shifted forward by the gap, post-transition offset |
//! | In an overlap | 2 | Picked by [`Disambiguation`], earlier offset by default |

use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::{Instant, TimeInstant};
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::parse::Cursor;
use crate::period::Period;
use crate::time::Time;
use crate::tz::{TimeZone, TimeZoneOffsetTransition, TimeZoneRulesProvider};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Which offset to pick for a local date-time that occurs twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disambiguation {
    /// The offset in effect before the transition.
    #[default]
    Earlier,
    /// The offset in effect after the transition.
    Later,
    /// Fail with [`Error::AmbiguousLocalTime`] in overlaps and gaps.
    Reject,
}

/// A date-time with its offset and time zone.
///
/// The offset is always one the zone allows at the date-time, so the value
/// denotes exactly one instant. Equality compares date-time, offset and
/// zone id; ordering is by instant, then date-time, then zone id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    date_time: DateTime,
    offset: UtcOffset,
    zone: TimeZone,
}

impl ZonedDateTime {
    /// Resolves a local date-time in `zone`, taking the earlier offset in an
    /// overlap.
    pub fn from_local(date_time: DateTime, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_local_with(date_time, zone, Disambiguation::Earlier)
    }

    pub fn from_local_with(
        date_time: DateTime,
        zone: TimeZone,
        disambiguation: Disambiguation,
    ) -> Result<ZonedDateTime, Error> {
        let valid = zone.rules().valid_offsets_at(date_time);
        let reject = |reason| Error::AmbiguousLocalTime {
            date_time: date_time.to_string(),
            zone: zone.id(),
            reason,
        };
        match (valid.as_slice(), disambiguation) {
            ([offset], _) => ZonedDateTime::checked(date_time, *offset, zone),
            ([], Disambiguation::Reject) => Err(reject("falls in a gap")),
            ([], _) => {
                let (shifted, offset) = match zone.rules().transition_at(date_time) {
                    Some(transition) => (
                        date_time.checked_add_duration(transition.duration())?,
                        transition.offset_after(),
                    ),
                    None => (date_time, zone.rules().offset_at_local(date_time)),
                };
                debug!("{date_time} falls in a gap in {zone}, shifted to {shifted}");
                ZonedDateTime::checked(shifted, offset, zone)
            }
            ([.., _], Disambiguation::Reject) => Err(reject("is ambiguous")),
            ([earlier, ..], Disambiguation::Earlier) => {
                ZonedDateTime::checked(date_time, *earlier, zone)
            }
            ([.., later], _) => ZonedDateTime::checked(date_time, *later, zone),
        }
    }

    /// Resolves a local date-time, keeping `preferred` when the zone allows
    /// it there; otherwise as [`ZonedDateTime::from_local`].
    pub fn from_local_preferring(
        date_time: DateTime,
        zone: TimeZone,
        preferred: UtcOffset,
    ) -> Result<ZonedDateTime, Error> {
        if zone.rules().is_valid_offset(date_time, preferred) {
            ZonedDateTime::checked(date_time, preferred, zone)
        } else {
            ZonedDateTime::from_local(date_time, zone)
        }
    }

    pub fn from_instant(instant: Instant, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        let offset = zone.rules().offset_at(instant);
        Ok(ZonedDateTime {
            date_time: instant.to_date_time_at(offset)?,
            offset,
            zone,
        })
    }

    /// Keeps `offset` if the zone allows it at `date_time`, otherwise keeps
    /// the instant the pair denotes.
    pub fn from_offset_date_time(value: OffsetDateTime, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        if zone.rules().is_valid_offset(value.date_time(), value.offset()) {
            ZonedDateTime::checked(value.date_time(), value.offset(), zone)
        } else {
            ZonedDateTime::from_instant(value.to_instant()?, zone)
        }
    }

    // The pair must lie inside the instant range.
    fn checked(date_time: DateTime, offset: UtcOffset, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        date_time.to_instant_at(offset)?;
        Ok(ZonedDateTime {
            date_time,
            offset,
            zone,
        })
    }

    #[inline]
    pub fn date_time(&self) -> DateTime {
        self.date_time
    }

    #[inline]
    pub fn date(&self) -> Date {
        self.date_time.date()
    }

    #[inline]
    pub fn time(&self) -> Time {
        self.date_time.time()
    }

    #[inline]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    #[inline]
    pub fn zone(&self) -> &TimeZone {
        &self.zone
    }

    pub fn to_instant(&self) -> Instant {
        // Checked when the value was built.
        self.date_time
            .to_instant_at(self.offset)
            .unwrap_or(Instant::UNIX_EPOCH)
    }

    pub fn to_offset_date_time(&self) -> OffsetDateTime {
        OffsetDateTime::new(self.date_time, self.offset)
    }

    pub fn is_same_instant(&self, other: &ZonedDateTime) -> bool {
        self.to_instant() == other.to_instant()
    }

    // ── adjustments ───────────────────────────────────────────────────

    /// In an overlap, switches to the pre-transition offset.
    pub fn with_earlier_offset_at_overlap(&self) -> ZonedDateTime {
        self.with_overlap_offset(|t| t.offset_before())
    }

    /// In an overlap, switches to the post-transition offset.
    pub fn with_later_offset_at_overlap(&self) -> ZonedDateTime {
        self.with_overlap_offset(|t| t.offset_after())
    }

    fn with_overlap_offset(
        &self,
        pick: impl FnOnce(&TimeZoneOffsetTransition) -> UtcOffset,
    ) -> ZonedDateTime {
        match self.zone.rules().transition_at(self.date_time) {
            Some(t) if t.is_overlap() => ZonedDateTime {
                offset: pick(&t),
                ..self.clone()
            },
            _ => self.clone(),
        }
    }

    /// The same date-time and offset in the fixed zone of that offset.
    pub fn with_fixed_offset_zone(&self) -> ZonedDateTime {
        ZonedDateTime {
            zone: TimeZone::fixed(self.offset),
            ..self.clone()
        }
    }

    /// The same instant in another zone.
    pub fn adjusted_to(&self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_instant(self.to_instant(), zone)
    }

    /// The same local date-time in another zone, keeping the offset if
    /// allowed there.
    pub fn with_zone_same_local(&self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_local_preferring(self.date_time, zone, self.offset)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Adds a period to the local date-time and resolves again, keeping the
    /// current offset when still valid.
    pub fn checked_add_period(&self, period: Period) -> Result<ZonedDateTime, Error> {
        let date_time = self.date_time.checked_add_period(period)?;
        ZonedDateTime::from_local_preferring(date_time, self.zone.clone(), self.offset)
    }

    pub fn checked_sub_period(&self, period: Period) -> Result<ZonedDateTime, Error> {
        self.checked_add_period(period.checked_neg()?)
    }

    /// Moves along the instant timeline; the offset follows the zone.
    pub fn checked_add_duration(&self, duration: Duration) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_instant(self.to_instant().checked_add(duration)?, self.zone.clone())
    }

    pub fn checked_sub_duration(&self, duration: Duration) -> Result<ZonedDateTime, Error> {
        self.checked_add_duration(duration.checked_neg()?)
    }

    pub fn duration_until(&self, other: &ZonedDateTime) -> Duration {
        self.to_instant().duration_until(other.to_instant())
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Parses `date-time offset [region]`, resolving the region through
    /// `provider`. Without a provider only fixed zones can be parsed and a
    /// bracketed region fails with [`Error::NoRulesProvider`].
    pub fn parse_with(
        text: &str,
        provider: Option<&dyn TimeZoneRulesProvider>,
    ) -> Result<ZonedDateTime, Error> {
        let mut cursor = Cursor::new(text, "ZonedDateTime");
        let value = cursor.offset_date_time()?;
        let zone = if cursor.eat(b'[') {
            let id = cursor.take_until(b']', "expected ']' after zone id")?;
            cursor.finish()?;
            TimeZone::of(id, provider)?
        } else {
            cursor.finish()?;
            TimeZone::fixed(value.offset())
        };
        ZonedDateTime::from_offset_date_time(value, zone)
    }
}

impl Date {
    /// The earliest instant of this date in `zone`; later than midnight
    /// when midnight falls in a gap.
    pub fn start_of_day_at(self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_local(self.at_start_of_day(), zone)
    }

    /// The last nanosecond of this date in `zone`.
    pub fn end_of_day_at(self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        let next = match self.checked_add_days(1) {
            Ok(next) => next.start_of_day_at(zone.clone())?.to_instant(),
            // The last supported day ends with the instant range.
            Err(_) => return ZonedDateTime::from_local_with(DateTime::MAX, zone, Disambiguation::Later),
        };
        ZonedDateTime::from_instant(next.checked_sub(Duration::of_nanos(1))?, zone)
    }
}

impl Instant {
    /// This instant in `zone`.
    pub fn at_zone(self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::from_instant(self, zone)
    }
}

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &ZonedDateTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedDateTime {
    fn cmp(&self, other: &ZonedDateTime) -> Ordering {
        self.to_instant()
            .cmp(&other.to_instant())
            .then_with(|| self.date_time.cmp(&other.date_time))
            .then_with(|| self.zone.cmp(&other.zone))
    }
}

impl TimeInstant for ZonedDateTime {
    fn difference(&self, other: &Self) -> Duration {
        other.duration_until(self)
    }

    fn checked_add_duration(&self, duration: Duration) -> Result<Self, Error> {
        ZonedDateTime::checked_add_duration(self, duration)
    }
}

impl fmt::Display for ZonedDateTime {
    /// `2018-03-11T03:30-04:00[America/New_York]`; fixed zones omit the
    /// bracket.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date_time, self.offset)?;
        match self.zone.region_id() {
            Some(region) => write!(f, "[{region}]"),
            None => Ok(()),
        }
    }
}

impl FromStr for ZonedDateTime {
    type Err = Error;

    /// Fixed zones only; see [`ZonedDateTime::parse_with`] for regions.
    fn from_str(s: &str) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::parse_with(s, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::month::Month;
    use crate::tz::{
        DaylightSaving, InMemoryProvider, RecurringRules, RuleDay, TransitionClock, TransitionRule,
    };
    use crate::weekday::DayOfWeek;
    use crate::ErrorKind;

    fn offset(hours: i32) -> UtcOffset {
        UtcOffset::from_hms(hours, 0, 0).unwrap()
    }

    fn provider() -> InMemoryProvider {
        let rule = |month, n| {
            TransitionRule::new(
                month,
                RuleDay::NthWeekday {
                    n,
                    weekday: DayOfWeek::Sunday,
                },
                2 * 3600,
                TransitionClock::Wall,
            )
            .unwrap()
        };
        let eastern = RecurringRules::new(
            offset(-5),
            DaylightSaving {
                offset: offset(-4),
                start: rule(Month::March, 2),
                end: rule(Month::November, 1),
            },
        )
        .unwrap();
        InMemoryProvider::new("test").with_region("America/New_York", eastern)
    }

    fn new_york() -> TimeZone {
        TimeZone::region("America/New_York", &provider()).unwrap()
    }

    fn local(text: &str) -> DateTime {
        text.parse().unwrap()
    }

    #[test]
    fn gap_shifts_forward() {
        let zoned = ZonedDateTime::from_local(local("2018-03-11T02:30"), new_york()).unwrap();
        assert_eq!(zoned.to_string(), "2018-03-11T03:30-04:00[America/New_York]");
        let err = ZonedDateTime::from_local_with(
            local("2018-03-11T02:30"),
            new_york(),
            Disambiguation::Reject,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn overlap_disambiguation() {
        let at = local("2018-11-04T01:30");
        let earlier = ZonedDateTime::from_local(at, new_york()).unwrap();
        assert_eq!(earlier.offset(), offset(-4));
        let later = ZonedDateTime::from_local_with(at, new_york(), Disambiguation::Later).unwrap();
        assert_eq!(later.offset(), offset(-5));
        assert_eq!(
            earlier.duration_until(&later),
            Duration::of_hours(1).unwrap()
        );
        assert!(matches!(
            ZonedDateTime::from_local_with(at, new_york(), Disambiguation::Reject),
            Err(Error::AmbiguousLocalTime { .. })
        ));
        assert_eq!(earlier.with_later_offset_at_overlap(), later);
        assert_eq!(later.with_earlier_offset_at_overlap(), earlier);
        let preferred = ZonedDateTime::from_local_preferring(at, new_york(), offset(-5)).unwrap();
        assert_eq!(preferred, later);
    }

    #[test]
    fn equality_and_order() {
        let a = ZonedDateTime::from_local(local("2018-06-01T12:00"), new_york()).unwrap();
        let b = a.with_fixed_offset_zone();
        assert_ne!(a, b);
        assert!(a.is_same_instant(&b));
        assert_eq!(a.cmp(&b), a.zone().cmp(b.zone()));
        let utc = a.adjusted_to(TimeZone::utc()).unwrap();
        assert_eq!(utc.to_string(), "2018-06-01T16:00Z");
        assert!(utc.is_same_instant(&a));
        assert!(utc > a);
    }

    #[test]
    fn arithmetic_across_transitions() {
        let before = ZonedDateTime::from_local(local("2018-03-10T12:00"), new_york()).unwrap();
        // Periods keep the local time.
        let next_day = before.checked_add_period(Period::of_days(1)).unwrap();
        assert_eq!(next_day.to_string(), "2018-03-11T12:00-04:00[America/New_York]");
        // Durations keep the elapsed time.
        let day_later = before.checked_add_duration(Duration::of_hours(24).unwrap()).unwrap();
        assert_eq!(day_later.to_string(), "2018-03-11T13:00-04:00[America/New_York]");
        assert_eq!(
            day_later.checked_sub_duration(Duration::of_hours(24).unwrap()).unwrap(),
            before
        );
    }

    #[test]
    fn day_boundaries() {
        let date = Date::new(2018, 3, 11).unwrap();
        let start = date.start_of_day_at(new_york()).unwrap();
        assert_eq!(start.to_string(), "2018-03-11T00:00-05:00[America/New_York]");
        let end = date.end_of_day_at(new_york()).unwrap();
        assert_eq!(
            end.to_string(),
            "2018-03-11T23:59:59.999999999-04:00[America/New_York]"
        );
        assert_eq!(
            start.duration_until(&end),
            Duration::new(23 * 3600 - 1, 999_999_999).unwrap()
        );
    }

    #[test]
    fn parsing() {
        let provider = provider();
        let text = "2018-11-04T01:30-05:00[America/New_York]";
        let zoned = ZonedDateTime::parse_with(text, Some(&provider)).unwrap();
        assert_eq!(zoned.offset(), offset(-5));
        assert_eq!(zoned.to_string(), text);
        assert_eq!(
            ZonedDateTime::parse_with(text, None).unwrap_err(),
            Error::NoRulesProvider {
                region: "America/New_York".to_owned()
            }
        );
        // An offset the zone does not allow keeps the instant.
        let moved =
            ZonedDateTime::parse_with("2018-07-01T12:00-05:00[America/New_York]", Some(&provider))
                .unwrap();
        assert_eq!(moved.to_string(), "2018-07-01T13:00-04:00[America/New_York]");
        let fixed: ZonedDateTime = "2018-07-01T12:00+02:00".parse().unwrap();
        assert_eq!(fixed.zone(), &TimeZone::fixed(offset(2)));
        assert!("2018-07-01T12:00+02:00[Europe/Paris".parse::<ZonedDateTime>().is_err());
    }
}
