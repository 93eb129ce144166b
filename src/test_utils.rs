//! Shared constructors for tests.

use std::any::Any;

use chrono::{FixedOffset, NaiveDate, TimeZone};

use crate::{BaseValue, Calendar, FormatError, PropertyType, Value};

/// Builds a calendar from local fields and an offset in minutes east of UTC.
#[allow(clippy::too_many_arguments)]
pub fn calendar(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    millis: u32,
    offset_minutes: i32,
) -> Calendar {
    let offset = FixedOffset::east_opt(offset_minutes * 60).expect("offset in range");
    let local = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_milli_opt(hour, minute, second, millis))
        .expect("valid local date/time");
    offset
        .from_local_datetime(&local)
        .single()
        .expect("fixed offsets are unambiguous")
}

/// Builds a UTC calendar.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, millis: u32) -> Calendar {
    calendar(year, month, day, hour, minute, second, millis, 0)
}

/// Minimal long-typed value, used to exercise the provided trait methods
/// and cross-variant comparisons.
#[derive(Debug)]
pub struct StubLong {
    base:  BaseValue,
    value: Option<i64>,
}

impl StubLong {
    pub const fn new(value: Option<i64>) -> Self {
        Self {
            base: BaseValue::new(PropertyType::Long),
            value,
        }
    }

    fn present(&self) -> Result<i64, FormatError> {
        self.value.ok_or(FormatError::EmptyValue)
    }
}

impl Value for StubLong {
    fn base(&self) -> &BaseValue {
        &self.base
    }

    fn internal_string(&self) -> Result<String, FormatError> {
        self.present().map(|v| v.to_string())
    }

    fn get_date(&self) -> Result<Calendar, FormatError> {
        self.base.mark_consumed();
        Err(FormatError::InvalidDateFormat)
    }

    fn get_long(&self) -> Result<i64, FormatError> {
        self.base.mark_consumed();
        self.present()
    }

    #[allow(clippy::cast_precision_loss)]
    fn get_double(&self) -> Result<f64, FormatError> {
        self.base.mark_consumed();
        self.present().map(|v| v as f64)
    }

    fn get_boolean(&self) -> Result<bool, FormatError> {
        self.base.mark_consumed();
        self.present().map(|v| v != 0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
