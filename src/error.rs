// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.
//!
//! Every variant belongs to exactly one [`ErrorKind`], which is the coarse
//! classification callers usually branch on:
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`ErrorKind::Validation`] | a component is out of range or a value combination does not exist |
//! | [`ErrorKind::Overflow`] | integer arithmetic would leave its representable range |
//! | [`ErrorKind::Unsupported`] | an operation needs a bounded interval, or a unit of the other span family |
//! | [`ErrorKind::EmptyRange`] | a first/last element was requested from an empty range |
//! | [`ErrorKind::RulesLookup`] | a region id has no rules, or no provider was supplied |
//! | [`ErrorKind::Parse`] | text does not match the canonical ISO-8601 form |

use std::fmt;

/// Error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A component lies outside its allowed range.
    #[error("{what} {value} is out of range {min}..={max}")]
    OutOfRange {
        /// Name of the component.
        what: &'static str,
        /// The rejected value.
        value: i64,
        /// Smallest allowed value.
        min: i64,
        /// Largest allowed value.
        max: i64,
    },

    /// The day does not exist in the given month of the given year.
    #[error("day {day} does not exist in month {month} of year {year}")]
    InvalidDayOfMonth { year: i32, month: u8, day: u8 },

    /// The ordinal day does not exist in the given year.
    #[error("day of year {day_of_year} does not exist in year {year}")]
    InvalidDayOfYear { year: i32, day_of_year: u16 },

    /// The week does not exist in the given week-based year.
    #[error("week {week} does not exist in week-based year {year}")]
    InvalidWeek { year: i32, week: u8 },

    /// Hours, minutes and seconds of an offset were given with mixed signs.
    #[error("offset components must share a sign: {hours}h {minutes}m {seconds}s")]
    OffsetSignMismatch { hours: i32, minutes: i32, seconds: i32 },

    /// A transition was built with identical offsets on both sides.
    #[error("transition offsets must differ, both are {offset}")]
    InvalidTransition { offset: String },

    /// A local date-time falls into a gap or overlap and the caller asked to reject it.
    #[error("{date_time} {reason} in time zone {zone}")]
    AmbiguousLocalTime {
        date_time: String,
        zone: String,
        /// Either `"falls in a gap"` or `"is ambiguous"` (overlap).
        reason: &'static str,
    },

    /// A progression step of zero (or of the wrong sign) was requested.
    #[error("step must be positive, got {step}")]
    InvalidStep { step: i64 },

    /// A duration or period step through an interval was zero or negative.
    #[error("step through an interval must be positive, got {step}")]
    InvalidSpanStep { step: String },

    /// A rounding increment does not divide evenly into the next larger unit.
    #[error("rounding increment {increment} must divide evenly into a day, hour, minute or second")]
    InvalidRoundingIncrement { increment: crate::duration::Duration },

    /// Integer arithmetic overflowed.
    #[error("arithmetic overflow in {operation}")]
    Overflow {
        /// The operation that overflowed.
        operation: &'static str,
    },

    /// The operation requires a bounded interval.
    #[error("{operation} is not supported on an unbounded interval")]
    Unbounded { operation: &'static str },

    /// The unit cannot be used for this kind of span.
    #[error("{unit} cannot be used in {operation}")]
    UnsupportedUnit {
        unit: crate::unit::TimeUnit,
        operation: &'static str,
    },

    /// The range holds no elements.
    #[error("the range is empty")]
    EmptyRange,

    /// The provider has no rules for the region id.
    #[error("no time zone rules for region '{region}'")]
    RulesNotFound { region: String },

    /// A region id was used where no rules provider was supplied.
    #[error("region '{region}' needs a rules provider, none was supplied")]
    NoRulesProvider { region: String },

    /// Text does not follow the canonical form of the target type.
    #[error("cannot parse {target} from {input:?}: {reason}")]
    Parse {
        /// Name of the type being parsed.
        target: &'static str,
        input: String,
        reason: &'static str,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Overflow,
    Unsupported,
    EmptyRange,
    RulesLookup,
    Parse,
}

impl Error {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::OutOfRange { .. }
            | Error::InvalidDayOfMonth { .. }
            | Error::InvalidDayOfYear { .. }
            | Error::InvalidWeek { .. }
            | Error::OffsetSignMismatch { .. }
            | Error::InvalidTransition { .. }
            | Error::AmbiguousLocalTime { .. }
            | Error::InvalidStep { .. }
            | Error::InvalidSpanStep { .. }
            | Error::InvalidRoundingIncrement { .. } => ErrorKind::Validation,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::Unbounded { .. } | Error::UnsupportedUnit { .. } => ErrorKind::Unsupported,
            Error::EmptyRange => ErrorKind::EmptyRange,
            Error::RulesNotFound { .. } | Error::NoRulesProvider { .. } => ErrorKind::RulesLookup,
            Error::Parse { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: i64, min: i64, max: i64) -> Error {
        Error::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }

    pub(crate) fn overflow(operation: &'static str) -> Error {
        Error::Overflow { operation }
    }

    pub(crate) fn parse(target: &'static str, input: &str, reason: &'static str) -> Error {
        Error::Parse {
            target,
            input: input.to_string(),
            reason,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Overflow => "overflow",
            ErrorKind::Unsupported => "unsupported",
            ErrorKind::EmptyRange => "empty range",
            ErrorKind::RulesLookup => "rules lookup",
            ErrorKind::Parse => "parse",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_partition_variants() {
        assert_eq!(
            Error::out_of_range("month", 13, 1, 12).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::overflow("plus_exact").kind(), ErrorKind::Overflow);
        assert_eq!(
            Error::Unbounded {
                operation: "as_period"
            }
            .kind(),
            ErrorKind::Unsupported
        );
        assert_eq!(Error::EmptyRange.kind(), ErrorKind::EmptyRange);
        assert_eq!(
            Error::RulesNotFound {
                region: "Mars/Olympus".into()
            }
            .kind(),
            ErrorKind::RulesLookup
        );
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = Error::InvalidDayOfMonth {
            year: 2019,
            month: 2,
            day: 29,
        };
        assert_eq!(
            err.to_string(),
            "day 29 does not exist in month 2 of year 2019"
        );
        let err = Error::out_of_range("hour", 24, 0, 23);
        assert_eq!(err.to_string(), "hour 24 is out of range 0..=23");
    }
}
