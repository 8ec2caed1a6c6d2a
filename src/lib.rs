// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar and time-zone core.
//!
//! This crate models dates, times, offsets and zoned instants on the
//! proleptic Gregorian calendar, with overflow-checked arithmetic and
//! daylight-saving aware resolution of local clock readings.
//!
//! # Core types
//!
//! | Type | Meaning |
//! |------|---------|
//! | [`Date`] | calendar date, years `-999_999_999..=999_999_999` |
//! | [`Time`] | time of day with nanosecond precision |
//! | [`DateTime`] | date and time without a zone |
//! | [`UtcOffset`] | fixed offset from UTC, at most ±18h |
//! | [`Instant`] | point on the UTC timeline |
//! | [`OffsetDateTime`] | local date-time plus the offset it was read at |
//! | [`ZonedDateTime`] | local date-time resolved against a [`TimeZone`] |
//! | [`Period`] | years, months and days applied to the calendar |
//! | [`Duration`] | exact seconds and nanoseconds |
//! | [`Interval<T>`] | half-open span over any [`TimeInstant`] |
//! | [`DateRange`] | closed, iterable range of dates |
//! | [`Year`], [`YearMonth`] | a whole year, a month of a year |
//! | [`OffsetTime`] | time of day plus the offset it was read at |
//!
//! Date-bearing types share weekday and period adjusters (`next`,
//! `start_of_month`, `end_of_week`, ...). Times and timeline positions
//! round to a unit or increment with a [`RoundingMode`], and bounded
//! intervals step with [`Interval::step_by`] into a [`TimeProgression`].
//!
//! # Time zones
//!
//! Zones are resolved through a [`TimeZoneRulesProvider`](tz::TimeZoneRulesProvider)
//! that the caller supplies; nothing is registered globally. See [`tz`] for
//! the rules protocol and its gap and overlap semantics.
//!
//! ```
//! use calzone::tz::{DaylightSaving, InMemoryProvider, RecurringRules, RuleDay,
//!     TransitionClock, TransitionRule};
//! use calzone::{DateTime, DayOfWeek, Month, TimeZone, UtcOffset, ZonedDateTime};
//!
//! let est = UtcOffset::from_hms(-5, 0, 0).unwrap();
//! let edt = UtcOffset::from_hms(-4, 0, 0).unwrap();
//! let dst = DaylightSaving {
//!     offset: edt,
//!     start: TransitionRule::new(Month::March,
//!         RuleDay::NthWeekday { n: 2, weekday: DayOfWeek::Sunday },
//!         7_200, TransitionClock::Wall).unwrap(),
//!     end: TransitionRule::new(Month::November,
//!         RuleDay::NthWeekday { n: 1, weekday: DayOfWeek::Sunday },
//!         7_200, TransitionClock::Wall).unwrap(),
//! };
//! let provider = InMemoryProvider::new("local")
//!     .with_region("America/New_York", RecurringRules::new(est, dst).unwrap());
//! let zone = TimeZone::region("America/New_York", &provider).unwrap();
//!
//! // 02:30 does not exist on 2018-03-11; it resolves past the gap.
//! let local: DateTime = "2018-03-11T02:30".parse().unwrap();
//! let zoned = ZonedDateTime::from_local(local, zone).unwrap();
//! assert_eq!(zoned.to_string(), "2018-03-11T03:30-04:00[America/New_York]");
//! ```
//!
//! # Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `logging` | yes | emit `log` records for cache activity and gap shifts |
//! | `serde` | no | values serialize as their canonical ISO strings |

#[macro_use]
mod logging;

mod adjust;
pub mod calendar;
mod clock;
mod date;
mod datetime;
mod duration;
mod error;
mod field;
mod instant;
mod interval;
pub mod math;
mod month;
mod offset;
mod offset_datetime;
mod offset_time;
mod parse;
mod period;
mod progression;
mod range;
mod round;
#[cfg(feature = "serde")]
mod serde_str;
mod time;
pub mod tz;
mod unit;
mod week;
mod weekday;
mod year;
mod year_month;
mod zoned;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{MAX_EPOCH_DAY, MAX_YEAR, MIN_EPOCH_DAY, MIN_YEAR};
pub use clock::{Clock, FixedClock, OffsetClock, SystemClock};
pub use date::Date;
pub use datetime::DateTime;
pub use duration::Duration;
pub use error::{Error, ErrorKind};
pub use field::{derive, DateTimeField, FieldValues};
pub use instant::{Instant, TimeInstant};
pub use interval::{
    complement_within, intersect_intervals, DateTimeInterval, InstantInterval, Interval,
    OffsetDateTimeInterval, ZonedDateTimeInterval,
};
pub use month::Month;
pub use offset::UtcOffset;
pub use offset_datetime::{OffsetConversion, OffsetDateTime};
pub use offset_time::OffsetTime;
pub use period::Period;
pub use progression::TimeProgression;
pub use range::{DateProgression, DateRange, DateRangeIter};
pub use round::RoundingMode;
pub use time::Time;
pub use tz::TimeZone;
pub use unit::TimeUnit;
pub use week::{weeks_in_week_based_year, WeekDate, WeekSettings};
pub use weekday::DayOfWeek;
pub use year::Year;
pub use year_month::YearMonth;
pub use zoned::{Disambiguation, ZonedDateTime};
