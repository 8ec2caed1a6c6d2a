// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Serde support: every value travels as its canonical ISO string.
//!
//! Zoned values deserialize through [`FromStr`], so only fixed-offset zones
//! round-trip without a rules provider.

use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::instant::{Instant, TimeInstant};
use crate::interval::Interval;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::offset_time::OffsetTime;
use crate::period::Period;
use crate::range::DateRange;
use crate::time::Time;
use crate::year::Year;
use crate::year_month::YearMonth;
use crate::zoned::ZonedDateTime;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

struct IsoVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T: FromStr<Err = Error>> Visitor<'de> for IsoVisitor<T> {
    type Value = T;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<T, E> {
        value.parse().map_err(E::custom)
    }
}

fn deserialize_iso<'de, D, T>(deserializer: D, expecting: &'static str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = Error>,
{
    deserializer.deserialize_str(IsoVisitor {
        expecting,
        marker: PhantomData,
    })
}

macro_rules! iso_string_serde {
    ($($ty:ty => $expecting:literal),* $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserialize_iso(deserializer, $expecting)
            }
        }
    )*};
}

iso_string_serde! {
    Date => "an ISO date such as 2018-01-31",
    Time => "an ISO time such as 10:15:30",
    DateTime => "an ISO local date-time",
    UtcOffset => "a UTC offset such as +01:00 or Z",
    Instant => "an ISO instant ending in Z",
    OffsetDateTime => "an ISO date-time with offset",
    ZonedDateTime => "an ISO date-time with offset and optional [zone]",
    Period => "an ISO period such as P1Y2M3D",
    Duration => "an ISO duration such as PT1H30M",
    DateRange => "a date range such as 2018-01-01/2018-12-31",
    Year => "an ISO year such as 2018",
    YearMonth => "an ISO year-month such as 2018-01",
    OffsetTime => "an ISO time with offset such as 10:15+01:00",
}

impl<T> Serialize for Interval<T>
where
    T: TimeInstant + fmt::Display,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Interval<T>
where
    T: TimeInstant + FromStr<Err = Error>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_iso(deserializer, "an interval such as start/end")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::InstantInterval;

    #[test]
    fn values_are_strings() {
        let date = Date::new(2018, 1, 31).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2018-01-31\"");
        let back: Date = serde_json::from_str("\"2018-01-31\"").unwrap();
        assert_eq!(back, date);

        let period: Period = serde_json::from_str("\"P1Y2M3D\"").unwrap();
        assert_eq!(period, Period::new(1, 2, 3));
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"P1Y2M3D\"");
    }

    #[test]
    fn interval_and_zoned() {
        let interval: InstantInterval =
            serde_json::from_str("\"2018-01-01T00:00:00Z/..\"").unwrap();
        assert!(!interval.is_bounded());
        let json = serde_json::to_string(&interval).unwrap();
        let again: InstantInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(again, interval);

        let zoned: ZonedDateTime = serde_json::from_str("\"2018-03-11T10:00+05:30\"").unwrap();
        assert_eq!(zoned.offset(), UtcOffset::from_hms(5, 30, 0).unwrap());
    }

    #[test]
    fn partial_values() {
        let month: YearMonth = serde_json::from_str("\"2018-02\"").unwrap();
        assert_eq!(month.length_of_month(), 28);
        assert_eq!(serde_json::to_string(&month.start_date().calendar_year()).unwrap(), "\"2018\"");
        let time: OffsetTime = serde_json::from_str("\"10:15+01:00\"").unwrap();
        assert_eq!(serde_json::to_string(&time).unwrap(), "\"10:15+01:00\"");
        assert!(serde_json::from_str::<Year>("2018").is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Instant>("\"yesterday\"").is_err());
        assert!(serde_json::from_str::<Date>("17562").is_err());
    }
}
