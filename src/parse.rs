// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Parser for the canonical ISO-8601 text of every value type.
//!
//! A [`Cursor`] walks the input byte by byte. Each `Cursor` method consumes
//! one grammar element and leaves the cursor just after it, so composite
//! forms (an offset date-time is a date-time followed by an offset) are
//! sequences of calls.

use crate::date::Date;
use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::math;
use crate::offset::UtcOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::period::Period;
use crate::time::Time;

pub(crate) struct Cursor<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    target: &'static str,
}

/// Parses all of `input` with `f`, rejecting trailing text.
pub(crate) fn parse_all<T>(
    input: &str,
    target: &'static str,
    f: impl FnOnce(&mut Cursor<'_>) -> Result<T, Error>,
) -> Result<T, Error> {
    let mut cursor = Cursor::new(input, target);
    let value = f(&mut cursor)?;
    cursor.finish()?;
    Ok(value)
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str, target: &'static str) -> Cursor<'a> {
        Cursor {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            target,
        }
    }

    pub(crate) fn error(&self, reason: &'static str) -> Error {
        Error::parse(self.target, self.input, reason)
    }

    // Re-labels a validation failure as a parse failure of this input.
    fn invalid<T>(&self, result: Result<T, Error>, reason: &'static str) -> Result<T, Error> {
        result.map_err(|_| self.error(reason))
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, reason: &'static str) -> Result<(), Error> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error(reason))
        }
    }

    /// The unconsumed input up to, but excluding, `byte`; consumes it and `byte`.
    pub(crate) fn take_until(&mut self, byte: u8, reason: &'static str) -> Result<&'a str, Error> {
        let rest = &self.input[self.pos..];
        let len = rest.find(byte as char).ok_or_else(|| self.error(reason))?;
        self.pos += len + 1;
        Ok(&rest[..len])
    }

    pub(crate) fn finish(&self) -> Result<(), Error> {
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    fn sign(&mut self) -> Option<i64> {
        if self.eat(b'+') {
            Some(1)
        } else if self.eat(b'-') {
            Some(-1)
        } else {
            None
        }
    }

    /// Between `min` and `max` ASCII digits as an integer.
    fn digits(&mut self, min: usize, max: usize, reason: &'static str) -> Result<i64, Error> {
        let start = self.pos;
        let mut value: i64 = 0;
        while self.pos - start < max {
            match self.peek() {
                Some(b @ b'0'..=b'9') => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add((b - b'0') as i64))
                        .ok_or_else(|| self.error("number too large"))?;
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if self.pos - start < min {
            return Err(self.error(reason));
        }
        Ok(value)
    }

    /// Fractional seconds after `.` or `,`, as nanoseconds.
    fn fraction(&mut self) -> Result<u32, Error> {
        if !(self.eat(b'.') || self.eat(b',')) {
            return Ok(0);
        }
        let start = self.pos;
        let value = self.digits(1, 9, "expected fraction digits")?;
        let width = (self.pos - start) as u32;
        if matches!(self.peek(), Some(b'0'..=b'9')) {
            return Err(self.error("fraction has more than nine digits"));
        }
        Ok(value as u32 * 10u32.pow(9 - width))
    }

    // ── value types ───────────────────────────────────────────────────

    /// Four digits, or a sign and at least four digits.
    pub(crate) fn year(&mut self) -> Result<i32, Error> {
        let year = match self.sign() {
            Some(sign) => sign * self.digits(4, 10, "expected at least four year digits")?,
            None => self.digits(4, 4, "expected four year digits")?,
        };
        self.invalid(math::check_year(year), "year out of range")
    }

    /// `year-MM`, the month checked to be in `1..=12`.
    pub(crate) fn year_month(&mut self) -> Result<(i32, u8), Error> {
        let year = self.year()?;
        self.expect(b'-', "expected '-' after year")?;
        let month = self.digits(2, 2, "expected two month digits")?;
        let month = self.invalid(math::check_month(month), "month out of range")?;
        Ok((year, month))
    }

    pub(crate) fn date(&mut self) -> Result<Date, Error> {
        let (year, month) = self.year_month()?;
        self.expect(b'-', "expected '-' after month")?;
        let day = self.digits(2, 2, "expected two day digits")?;
        self.invalid(Date::new(year, month, day as u8), "invalid date")
    }

    pub(crate) fn time(&mut self) -> Result<Time, Error> {
        let hour = self.digits(2, 2, "expected two hour digits")?;
        self.expect(b':', "expected ':' after hour")?;
        let minute = self.digits(2, 2, "expected two minute digits")?;
        let (second, nanos) = if self.eat(b':') {
            let second = self.digits(2, 2, "expected two second digits")?;
            (second, self.fraction()?)
        } else {
            (0, 0)
        };
        if hour > 23 || minute > 59 || second > 59 {
            return Err(self.error("time component out of range"));
        }
        self.invalid(
            Time::new(hour as u8, minute as u8, second as u8, nanos),
            "invalid time",
        )
    }

    pub(crate) fn date_time(&mut self) -> Result<DateTime, Error> {
        let date = self.date()?;
        if !(self.eat(b'T') || self.eat(b't')) {
            return Err(self.error("expected 'T' between date and time"));
        }
        Ok(DateTime::new(date, self.time()?))
    }

    pub(crate) fn offset(&mut self) -> Result<UtcOffset, Error> {
        if self.eat(b'Z') || self.eat(b'z') {
            return Ok(UtcOffset::UTC);
        }
        let sign = self.sign().ok_or_else(|| self.error("expected 'Z', '+' or '-'"))?;
        let hours = self.digits(2, 2, "expected two offset hour digits")?;
        let (minutes, seconds) = if self.eat(b':') {
            let minutes = self.digits(2, 2, "expected two offset minute digits")?;
            let seconds = if self.eat(b':') {
                self.digits(2, 2, "expected two offset second digits")?
            } else {
                0
            };
            (minutes, seconds)
        } else {
            (0, 0)
        };
        if hours > 18 || minutes > 59 || seconds > 59 {
            return Err(self.error("offset component out of range"));
        }
        let (h, m, s) = (
            (sign * hours) as i32,
            (sign * minutes) as i32,
            (sign * seconds) as i32,
        );
        self.invalid(UtcOffset::from_hms(h, m, s), "offset out of range")
    }

    pub(crate) fn offset_date_time(&mut self) -> Result<OffsetDateTime, Error> {
        let date_time = self.date_time()?;
        let offset = self.offset()?;
        Ok(OffsetDateTime::new(date_time, offset))
    }

    /// `[-]P[nY][nM][nW][nD]`, at least one component, components in order.
    pub(crate) fn period(&mut self) -> Result<Period, Error> {
        let negate = self.eat(b'-');
        if !(self.eat(b'P') || self.eat(b'p')) {
            return Err(self.error("expected 'P'"));
        }
        let (mut years, mut months, mut days) = (0i64, 0i64, 0i64);
        let mut rank = 0;
        let mut seen = false;
        while self.pos < self.bytes.len() {
            let sign = self.sign().unwrap_or(1);
            let value = sign * self.digits(1, 10, "expected a number")?;
            let (unit_rank, slot) = match self.peek() {
                Some(b'Y') => (1, &mut years),
                Some(b'M') => (2, &mut months),
                Some(b'W') => (3, &mut days),
                Some(b'D') => (4, &mut days),
                _ => return Err(self.error("expected 'Y', 'M', 'W' or 'D'")),
            };
            if unit_rank <= rank {
                return Err(self.error("period components out of order"));
            }
            rank = unit_rank;
            *slot += if unit_rank == 3 { value * 7 } else { value };
            self.pos += 1;
            seen = true;
        }
        if !seen {
            return Err(self.error("expected at least one component"));
        }
        let sign = if negate { -1 } else { 1 };
        let field = |v: i64| math::to_i32_exact(sign * v);
        match (field(years), field(months), field(days)) {
            (Ok(years), Ok(months), Ok(days)) => Ok(Period::new(years, months, days)),
            _ => Err(self.error("period field out of range")),
        }
    }

    /// `[-]P[nD]T[nH][nM][n[.f]S]` or `[-]PnD`.
    pub(crate) fn duration(&mut self) -> Result<Duration, Error> {
        let negate = self.eat(b'-');
        if !(self.eat(b'P') || self.eat(b'p')) {
            return Err(self.error("expected 'P'"));
        }
        let mut total = Duration::ZERO;
        let mut seen = false;
        if !matches!(self.peek(), Some(b'T') | Some(b't')) {
            let sign = self.sign().unwrap_or(1);
            let days = sign * self.digits(1, 18, "expected a number of days")?;
            self.expect(b'D', "expected 'D'")?;
            total = self.invalid(Duration::of_days(days), "duration out of range")?;
            seen = true;
        }
        if self.eat(b'T') || self.eat(b't') {
            let mut rank = 0;
            let mut seen_time = false;
            while self.pos < self.bytes.len() {
                let sign = self.sign().unwrap_or(1);
                let whole = self.digits(1, 18, "expected a number")?;
                let nanos = self.fraction()?;
                let (unit_rank, part) = match self.peek() {
                    Some(b'H') if nanos == 0 => (1, Duration::of_hours(sign * whole)),
                    Some(b'M') if nanos == 0 => (2, Duration::of_minutes(sign * whole)),
                    Some(b'S') => (
                        3,
                        Duration::new(sign * whole, sign * nanos as i64),
                    ),
                    _ => return Err(self.error("expected 'H', 'M' or 'S'")),
                };
                if unit_rank <= rank {
                    return Err(self.error("duration components out of order"));
                }
                rank = unit_rank;
                self.pos += 1;
                let part = self.invalid(part, "duration out of range")?;
                total = self.invalid(total.checked_add(part), "duration out of range")?;
                seen_time = true;
            }
            if !seen_time {
                return Err(self.error("expected a time component after 'T'"));
            }
            seen = true;
        }
        if !seen {
            return Err(self.error("expected at least one component"));
        }
        if negate {
            total = self.invalid(total.checked_neg(), "duration out of range")?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn errors_are_parse_errors_naming_the_target() {
        let err = "2018-13-01".parse::<Date>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        match err {
            Error::Parse { target, input, .. } => {
                assert_eq!(target, "Date");
                assert_eq!(input, "2018-13-01");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn fraction_widths() {
        let mut cursor = Cursor::new(".5", "test");
        assert_eq!(cursor.fraction().unwrap(), 500_000_000);
        let mut cursor = Cursor::new(",000000001", "test");
        assert_eq!(cursor.fraction().unwrap(), 1);
        let mut cursor = Cursor::new(".1234567891", "test");
        assert!(cursor.fraction().is_err());
    }

    #[test]
    fn take_until_splits() {
        let mut cursor = Cursor::new("Europe/Paris]", "test");
        assert_eq!(cursor.take_until(b']', "missing").unwrap(), "Europe/Paris");
        assert!(cursor.finish().is_ok());
    }
}
