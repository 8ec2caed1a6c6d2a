// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Units of time and their conversion constants.
//!
//! Time-based units have an exact length in nanoseconds and feed
//! [`Duration`](crate::Duration). Date-based units are counted in months or
//! days and feed [`Period`](crate::Period). A day belongs to both families:
//! as a duration it is exactly 24 hours, as a period it is one calendar day.

use std::fmt;

/// A unit of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
}

impl TimeUnit {
    /// Every unit, shortest first.
    pub const ALL: [TimeUnit; 12] = [
        TimeUnit::Nanoseconds,
        TimeUnit::Microseconds,
        TimeUnit::Milliseconds,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
        TimeUnit::Weeks,
        TimeUnit::Months,
        TimeUnit::Years,
        TimeUnit::Decades,
        TimeUnit::Centuries,
    ];

    /// Exact length in nanoseconds, or `None` for units whose length varies.
    pub const fn nanoseconds(self) -> Option<i64> {
        match self {
            TimeUnit::Nanoseconds => Some(1),
            TimeUnit::Microseconds => Some(1_000),
            TimeUnit::Milliseconds => Some(1_000_000),
            TimeUnit::Seconds => Some(1_000_000_000),
            TimeUnit::Minutes => Some(60_000_000_000),
            TimeUnit::Hours => Some(3_600_000_000_000),
            TimeUnit::Days => Some(86_400_000_000_000),
            TimeUnit::Weeks => Some(604_800_000_000_000),
            TimeUnit::Months | TimeUnit::Years | TimeUnit::Decades | TimeUnit::Centuries => None,
        }
    }

    /// Exact length in seconds for units of at least one second.
    pub const fn seconds(self) -> Option<i64> {
        match self.nanoseconds() {
            Some(n) if n >= 1_000_000_000 => Some(n / 1_000_000_000),
            _ => None,
        }
    }

    /// Length in calendar months for month-based units.
    pub const fn months(self) -> Option<i64> {
        match self {
            TimeUnit::Months => Some(1),
            TimeUnit::Years => Some(12),
            TimeUnit::Decades => Some(120),
            TimeUnit::Centuries => Some(1_200),
            _ => None,
        }
    }

    /// Length in calendar days for day-based units.
    pub const fn days(self) -> Option<i64> {
        match self {
            TimeUnit::Days => Some(1),
            TimeUnit::Weeks => Some(7),
            _ => None,
        }
    }

    /// Whether the unit can appear in a [`Period`](crate::Period).
    pub const fn is_date_based(self) -> bool {
        matches!(
            self,
            TimeUnit::Days
                | TimeUnit::Weeks
                | TimeUnit::Months
                | TimeUnit::Years
                | TimeUnit::Decades
                | TimeUnit::Centuries
        )
    }

    /// Whether the unit has a fixed length and can appear in a
    /// [`Duration`](crate::Duration).
    pub const fn is_time_based(self) -> bool {
        self.nanoseconds().is_some()
    }

    /// ISO-8601 designator used in the textual form of spans.
    ///
    /// Sub-second units have no designator of their own and are written as a
    /// fraction of `S`.
    pub const fn iso_designator(self) -> char {
        match self {
            TimeUnit::Nanoseconds
            | TimeUnit::Microseconds
            | TimeUnit::Milliseconds
            | TimeUnit::Seconds => 'S',
            TimeUnit::Minutes | TimeUnit::Months => 'M',
            TimeUnit::Hours => 'H',
            TimeUnit::Days => 'D',
            TimeUnit::Weeks => 'W',
            TimeUnit::Years | TimeUnit::Decades | TimeUnit::Centuries => 'Y',
        }
    }

    /// Whether amounts of this unit are written with a fractional part.
    pub const fn is_fractional(self) -> bool {
        matches!(
            self,
            TimeUnit::Nanoseconds | TimeUnit::Microseconds | TimeUnit::Milliseconds
        )
    }

    /// Lower-case plural name, as used in messages.
    pub const fn name(self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
            TimeUnit::Months => "months",
            TimeUnit::Years => "years",
            TimeUnit::Decades => "decades",
            TimeUnit::Centuries => "centuries",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families() {
        for unit in TimeUnit::ALL {
            assert!(unit.is_date_based() || unit.is_time_based(), "{unit}");
            assert_eq!(unit.months().is_some(), !unit.is_time_based());
        }
        assert!(TimeUnit::Days.is_date_based() && TimeUnit::Days.is_time_based());
        assert!(!TimeUnit::Hours.is_date_based());
    }

    #[test]
    fn conversion_factors_are_consistent() {
        assert_eq!(TimeUnit::Weeks.seconds(), Some(7 * 86_400));
        assert_eq!(TimeUnit::Milliseconds.seconds(), None);
        assert_eq!(TimeUnit::Centuries.months(), Some(1_200));
        assert_eq!(TimeUnit::Weeks.days(), Some(7));
        let ordered: Vec<i64> = TimeUnit::ALL
            .iter()
            .filter_map(|u| u.nanoseconds())
            .collect();
        assert!(ordered.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn designators() {
        assert_eq!(TimeUnit::Minutes.iso_designator(), 'M');
        assert_eq!(TimeUnit::Months.iso_designator(), 'M');
        assert_eq!(TimeUnit::Milliseconds.iso_designator(), 'S');
        assert!(TimeUnit::Microseconds.is_fractional());
        assert!(!TimeUnit::Seconds.is_fractional());
    }
}
