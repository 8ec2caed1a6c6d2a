// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Offsets from UTC.

use crate::calendar::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::duration::Duration;
use crate::error::Error;
use crate::parse;
use std::fmt;
use std::str::FromStr;

const MAX_SECONDS: i32 = 18 * SECONDS_PER_HOUR as i32;

/// A fixed difference between local time and UTC, within ±18 hours.
///
/// Ordered by total seconds, so `-05:00 < Z < +01:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    pub const UTC: UtcOffset = UtcOffset { seconds: 0 };
    pub const MIN: UtcOffset = UtcOffset {
        seconds: -MAX_SECONDS,
    };
    pub const MAX: UtcOffset = UtcOffset {
        seconds: MAX_SECONDS,
    };

    /// Builds an offset from a total number of seconds.
    pub fn from_seconds(seconds: i32) -> Result<UtcOffset, Error> {
        if !(-MAX_SECONDS..=MAX_SECONDS).contains(&seconds) {
            return Err(Error::out_of_range(
                "offset seconds",
                seconds as i64,
                -MAX_SECONDS as i64,
                MAX_SECONDS as i64,
            ));
        }
        Ok(UtcOffset { seconds })
    }

    /// Builds an offset from components that share a sign.
    ///
    /// `from_hms(-5, -30, 0)` is `-05:30`; `from_hms(-5, 30, 0)` fails.
    pub fn from_hms(hours: i32, minutes: i32, seconds: i32) -> Result<UtcOffset, Error> {
        let positive = hours > 0 || minutes > 0 || seconds > 0;
        let negative = hours < 0 || minutes < 0 || seconds < 0;
        if positive && negative {
            return Err(Error::OffsetSignMismatch {
                hours,
                minutes,
                seconds,
            });
        }
        if minutes.abs() > 59 {
            return Err(Error::out_of_range("offset minutes", minutes as i64, -59, 59));
        }
        if seconds.abs() > 59 {
            return Err(Error::out_of_range("offset seconds", seconds as i64, -59, 59));
        }
        if hours.abs() > 18 {
            return Err(Error::out_of_range("offset hours", hours as i64, -18, 18));
        }
        UtcOffset::from_seconds(hours * 3_600 + minutes * 60 + seconds)
    }

    #[inline]
    pub const fn total_seconds(self) -> i32 {
        self.seconds
    }

    /// Signed hour component.
    #[inline]
    pub const fn hours(self) -> i32 {
        self.seconds / SECONDS_PER_HOUR as i32
    }

    /// Signed minute component, in `-59..=59`.
    #[inline]
    pub const fn minutes(self) -> i32 {
        self.seconds % SECONDS_PER_HOUR as i32 / SECONDS_PER_MINUTE as i32
    }

    /// Signed second component, in `-59..=59`.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.seconds % SECONDS_PER_MINUTE as i32
    }

    #[inline]
    pub const fn is_utc(self) -> bool {
        self.seconds == 0
    }

    pub const fn to_duration(self) -> Duration {
        Duration::of_seconds(self.seconds as i64)
    }
}

impl fmt::Display for UtcOffset {
    /// `Z` for UTC, otherwise `±HH:MM` with `:SS` when seconds are non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_utc() {
            return f.write_str("Z");
        }
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 3_600, abs % 3_600 / 60)?;
        if abs % 60 != 0 {
            write!(f, ":{:02}", abs % 60)?;
        }
        Ok(())
    }
}

impl FromStr for UtcOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<UtcOffset, Error> {
        parse::parse_all(s, "UtcOffset", |c| c.offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn components_share_sign() {
        let offset = UtcOffset::from_hms(-5, -30, 0).unwrap();
        assert_eq!(offset.total_seconds(), -19_800);
        assert_eq!((offset.hours(), offset.minutes(), offset.seconds()), (-5, -30, 0));
        assert_eq!(
            UtcOffset::from_hms(-5, 30, 0).unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert!(UtcOffset::from_hms(18, 0, 1).is_err());
        assert!(UtcOffset::from_hms(1, 60, 0).is_err());
        assert_eq!(UtcOffset::from_hms(0, 0, 0).unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn bounded_to_eighteen_hours() {
        assert!(UtcOffset::from_seconds(18 * 3_600).is_ok());
        assert!(UtcOffset::from_seconds(18 * 3_600 + 1).is_err());
        assert!(UtcOffset::from_seconds(-18 * 3_600 - 1).is_err());
    }

    #[test]
    fn display_and_parse() {
        assert_eq!(UtcOffset::UTC.to_string(), "Z");
        assert_eq!(UtcOffset::from_hms(5, 30, 0).unwrap().to_string(), "+05:30");
        assert_eq!(UtcOffset::from_hms(-4, 0, -5).unwrap().to_string(), "-04:00:05");
        for text in ["Z", "+05:30", "-04:00:05", "-18:00"] {
            let offset: UtcOffset = text.parse().unwrap();
            assert_eq!(offset.to_string(), text);
        }
        assert_eq!("+00:00".parse::<UtcOffset>().unwrap(), UtcOffset::UTC);
        assert_eq!("+02".parse::<UtcOffset>().unwrap(), UtcOffset::from_hms(2, 0, 0).unwrap());
        assert!("+19:00".parse::<UtcOffset>().is_err());
        assert!("05:00".parse::<UtcOffset>().is_err());
    }
}
