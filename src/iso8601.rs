//! ISO8601 codec for the repository's canonical date format.
//!
//! Accepted and produced format:
//!
//! ```text
//! ±YYYY-MM-DDThh:mm:ss.SSSTZD
//! ```
//!
//! The year sign is optional on input. `TZD` is either `Z` or `±hh:mm`.
//! Every field has a fixed width and is validated strictly; there is no
//! lenient roll-over, so `2021-02-29` or an hour of `24` are rejected.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, TimeZone, Timelike};

use crate::consts::{
    DATE_SEPARATOR, FIELD_DIGITS, FRACTION_SEPARATOR, MAX_MILLIS, MAX_OFFSET_HOURS,
    MAX_OFFSET_MINUTES, MILLIS_DIGITS, MINUS_SIGN, MINUTES_PER_HOUR, NANOS_PER_MILLI, PLUS_SIGN,
    SECONDS_PER_MINUTE, TIME_DESIGNATOR, TIME_SEPARATOR, UTC_DESIGNATOR, YEAR_DIGITS,
};
use crate::prelude::*;
use crate::types::Calendar;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Iso8601Error {
    #[display(fmt = "Empty date/time string")]
    EmptyInput,
    #[display(fmt = "Unexpected end of input at position {_0}")]
    Truncated(usize),
    #[display(fmt = "Expected '{expected}' at position {position}")]
    UnexpectedChar { expected: char, position: usize },
    #[display(fmt = "Invalid {field}: {value}")]
    InvalidField { field: &'static str, value: String },
    #[display(fmt = "Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}.{millis:03}")]
    InvalidTime {
        hour:   u32,
        minute: u32,
        second: u32,
        millis: u32,
    },
    #[display(fmt = "Invalid time zone designator: {_0}")]
    InvalidTimeZone(String),
}

impl std::error::Error for Iso8601Error {}

/// Parses an ISO8601 date/time, returning `None` if the text is not in the
/// canonical format.
pub fn parse(text: &str) -> Option<Calendar> {
    try_parse(text).ok()
}

/// Parses an ISO8601 date/time, reporting why the text was rejected.
///
/// # Errors
/// Returns an `Iso8601Error` describing the first offending field.
pub fn try_parse(text: &str) -> Result<Calendar, Iso8601Error> {
    if text.is_empty() {
        return Err(Iso8601Error::EmptyInput);
    }

    let mut cursor = Cursor::new(text);
    let negative = cursor.sign();

    let year = cursor.digits(YEAR_DIGITS, "year")?;
    cursor.expect(DATE_SEPARATOR)?;
    let month = cursor.digits(FIELD_DIGITS, "month")?;
    cursor.expect(DATE_SEPARATOR)?;
    let day = cursor.digits(FIELD_DIGITS, "day")?;
    cursor.expect(TIME_DESIGNATOR)?;
    let hour = cursor.digits(FIELD_DIGITS, "hour")?;
    cursor.expect(TIME_SEPARATOR)?;
    let minute = cursor.digits(FIELD_DIGITS, "minute")?;
    cursor.expect(TIME_SEPARATOR)?;
    let second = cursor.digits(FIELD_DIGITS, "second")?;
    cursor.expect(FRACTION_SEPARATOR)?;
    let millis = cursor.digits(MILLIS_DIGITS, "millisecond")?;
    let offset = parse_time_zone(cursor.rest())?;

    // at most four digits, always fits
    let year = i32::try_from(year).map_err(|_| Iso8601Error::InvalidField {
        field: "year",
        value: year.to_string(),
    })?;
    let year = if negative { -year } else { year };

    let date =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(Iso8601Error::InvalidDate { year, month, day })?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis).ok_or(
        Iso8601Error::InvalidTime {
            hour,
            minute,
            second,
            millis,
        },
    )?;

    offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(Iso8601Error::InvalidDate { year, month, day })
}

/// Formats a calendar in the canonical format.
///
/// Sub-millisecond precision is truncated and offsets are rendered to the
/// minute. A zero offset is always written as `Z`.
pub fn format(cal: &Calendar) -> String {
    let year = cal.year();
    let sign = if year < 0 { MINUS_SIGN.to_string() } else { String::new() };
    // leap seconds carry nanos past one second
    let millis = (cal.nanosecond() / NANOS_PER_MILLI).min(MAX_MILLIS);

    format!(
        "{sign}{:0year_width$}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}\
         {TIME_DESIGNATOR}{:02}{TIME_SEPARATOR}{:02}{TIME_SEPARATOR}{:02}\
         {FRACTION_SEPARATOR}{millis:03}{}",
        year.unsigned_abs(),
        cal.month(),
        cal.day(),
        cal.hour(),
        cal.minute(),
        cal.second(),
        time_zone_designator(*cal.offset()),
        year_width = YEAR_DIGITS,
    )
}

fn time_zone_designator(offset: FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return UTC_DESIGNATOR.to_string();
    }
    let sign = if seconds < 0 { MINUS_SIGN } else { PLUS_SIGN };
    let minutes = seconds.unsigned_abs() / SECONDS_PER_MINUTE;
    format!(
        "{sign}{:02}{TIME_SEPARATOR}{:02}",
        minutes / MINUTES_PER_HOUR,
        minutes % MINUTES_PER_HOUR
    )
}

fn parse_time_zone(tzd: &str) -> Result<FixedOffset, Iso8601Error> {
    let invalid = || Iso8601Error::InvalidTimeZone(tzd.to_owned());

    let (sign, hours, minutes) = match tzd.as_bytes() {
        [b'Z'] => return FixedOffset::east_opt(0).ok_or_else(invalid),
        [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2]
            if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit()) =>
        {
            (*sign, two_digits(*h1, *h2), two_digits(*m1, *m2))
        }
        _ => return Err(invalid()),
    };

    if hours > MAX_OFFSET_HOURS || minutes > MAX_OFFSET_MINUTES {
        return Err(invalid());
    }

    let seconds = i32::try_from((hours * MINUTES_PER_HOUR + minutes) * SECONDS_PER_MINUTE)
        .map_err(|_| invalid())?;
    let seconds = if sign == b'-' { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}

#[inline]
fn two_digits(tens: u8, ones: u8) -> u32 {
    u32::from(tens - b'0') * 10 + u32::from(ones - b'0')
}

/// Forward-only reader over the ASCII prefix of the input.
struct Cursor<'a> {
    text: &'a str,
    pos:  usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Consumes an optional leading sign, returning `true` for minus
    fn sign(&mut self) -> bool {
        match self.text.as_bytes().first() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        }
    }

    fn digits(&mut self, count: usize, field: &'static str) -> Result<u32, Iso8601Error> {
        let end = self.pos + count;
        let chunk = self
            .text
            .as_bytes()
            .get(self.pos..end)
            .ok_or(Iso8601Error::Truncated(self.text.len()))?;
        if !chunk.iter().all(u8::is_ascii_digit) {
            return Err(Iso8601Error::InvalidField {
                field,
                value: String::from_utf8_lossy(chunk).into_owned(),
            });
        }
        self.pos = end;
        Ok(chunk
            .iter()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
    }

    fn expect(&mut self, expected: char) -> Result<(), Iso8601Error> {
        match self.text.as_bytes().get(self.pos) {
            None => Err(Iso8601Error::Truncated(self.pos)),
            Some(&b) if char::from(b) == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(Iso8601Error::UnexpectedChar {
                expected,
                position: self.pos,
            }),
        }
    }

    /// Remaining input. Only ASCII has been consumed, so `pos` is always a
    /// char boundary.
    fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }
}
