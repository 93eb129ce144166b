mod consts;
pub mod iso8601;
mod prelude;
#[cfg(test)]
mod test_utils;
mod types;
mod value;

pub use consts::*;
pub use iso8601::Iso8601Error;
pub use types::{Calendar, PropertyType};
pub use value::{BaseValue, FormatError, Value};

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A date-typed repository value.
///
/// Holds an optional calendar value that never changes after construction.
/// Every getter marks the value consumed before converting; reads can be
/// repeated and return the same result each time.
#[derive(Debug)]
pub struct DateValue {
    base: BaseValue,
    date: Option<Calendar>,
}

impl DateValue {
    /// Type tag of every `DateValue`
    pub const TYPE: PropertyType = PropertyType::Date;

    /// Creates a value holding `date`
    pub const fn new(date: Calendar) -> Self {
        Self {
            base: BaseValue::new(Self::TYPE),
            date: Some(date),
        }
    }

    /// Creates a value holding nothing; every getter fails with
    /// `FormatError::EmptyValue`.
    pub const fn empty() -> Self {
        Self {
            base: BaseValue::new(Self::TYPE),
            date: None,
        }
    }

    /// Parses an ISO8601 date/time string (see [`iso8601`]).
    ///
    /// # Errors
    /// Returns `FormatError::InvalidDateFormat` if the codec rejects `s`.
    pub fn value_of(s: &str) -> Result<Self, FormatError> {
        iso8601::try_parse(s).map(Self::new).map_err(|reason| {
            log_rejected(s, &reason);
            FormatError::InvalidDateFormat
        })
    }

    /// Returns `true` if no date is held
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none()
    }

    /// Compares against any value. Values of other variants are never equal.
    pub fn equals(&self, other: &dyn Value) -> bool {
        if std::ptr::addr_eq(self, other) {
            return true;
        }
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    fn present(&self) -> Result<&Calendar, FormatError> {
        self.date.as_ref().ok_or(FormatError::EmptyValue)
    }
}

#[cfg(feature = "logging")]
fn log_rejected(input: &str, reason: &Iso8601Error) {
    tracing::debug!(input, %reason, "rejected date value");
}

#[cfg(not(feature = "logging"))]
const fn log_rejected(_input: &str, _reason: &Iso8601Error) {}

impl Value for DateValue {
    fn base(&self) -> &BaseValue {
        &self.base
    }

    fn internal_string(&self) -> Result<String, FormatError> {
        self.present().map(iso8601::format)
    }

    fn get_date(&self) -> Result<Calendar, FormatError> {
        self.base.mark_consumed();
        self.present().copied()
    }

    fn get_long(&self) -> Result<i64, FormatError> {
        self.base.mark_consumed();
        self.present().map(Calendar::timestamp_millis)
    }

    fn get_boolean(&self) -> Result<bool, FormatError> {
        self.base.mark_consumed();
        self.present()?;
        Err(FormatError::DateToBoolean)
    }

    /// The widening check cannot fail for any date chrono can represent;
    /// it stays as the documented failure mode of this conversion.
    #[allow(clippy::cast_precision_loss)]
    fn get_double(&self) -> Result<f64, FormatError> {
        self.base.mark_consumed();
        let millis = self.present()?.timestamp_millis();
        let widened = millis as f64;
        if widened <= f64::MAX {
            Ok(widened)
        } else {
            Err(FormatError::DateToDouble)
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl PartialEq for DateValue {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.date == other.date
    }
}

impl Eq for DateValue {}

impl Hash for DateValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
    }
}

/// Copies the date into a fresh, unconsumed value.
impl Clone for DateValue {
    fn clone(&self) -> Self {
        Self {
            base: BaseValue::new(Self::TYPE),
            date: self.date,
        }
    }
}

/// Canonical ISO8601 form; an empty value renders as the empty string.
/// Does not mark the value consumed.
impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.date {
            Some(date) => f.write_str(&iso8601::format(date)),
            None => Ok(()),
        }
    }
}

impl FromStr for DateValue {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::value_of(s)
    }
}

impl TryFrom<&str> for DateValue {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::value_of(value)
    }
}

impl From<Calendar> for DateValue {
    fn from(date: Calendar) -> Self {
        Self::new(date)
    }
}

impl serde::Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match &self.date {
            Some(date) => serializer.serialize_str(&iso8601::format(date)),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match <Option<String> as serde::Deserialize>::deserialize(deserializer)? {
            Some(s) => s.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::empty()),
        }
    }
}
