//! The contract shared by every typed value.
//!
//! A value carries a [`PropertyType`] tag fixed at construction and a
//! one-way "consumed" flag. Every public conversion getter marks the value
//! consumed before doing anything else, including getters that go on to
//! fail. The flag never blocks a read; it only lets surrounding code notice
//! that a value has already been handed out.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::types::{Calendar, PropertyType};

/// Error raised when a value cannot be produced in the requested form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The value holds nothing to convert.
    #[error("empty value")]
    EmptyValue,

    /// The string is not an ISO8601 date/time.
    #[error("not a valid date format")]
    InvalidDateFormat,

    /// Dates never convert to booleans.
    #[error("cannot convert date to boolean")]
    DateToBoolean,

    /// The date's millisecond count is not representable as a double.
    #[error("conversion from date to double failed: inconvertible types")]
    DateToDouble,

    /// Unknown property type name.
    #[error("unknown property type: {0}")]
    InvalidType(String),

    /// Unknown property type code.
    #[error("unknown property type code: {0}")]
    InvalidTypeCode(i32),
}

/// State shared by all value variants: the type tag and the consumed flag.
///
/// The flag is atomic, so values can be read from several threads at once.
#[derive(Debug)]
pub struct BaseValue {
    property_type: PropertyType,
    consumed:      AtomicBool,
}

impl BaseValue {
    /// Creates unconsumed state for a value of the given type
    pub const fn new(property_type: PropertyType) -> Self {
        Self {
            property_type,
            consumed: AtomicBool::new(false),
        }
    }

    /// Returns the type tag
    #[inline]
    pub const fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Returns `true` once any conversion getter has been called
    #[inline]
    pub fn is_consumed(&self) -> bool {
        // Relaxed: the flag orders nothing else
        self.consumed.load(Ordering::Relaxed)
    }

    /// Marks the value consumed. Idempotent; the flag is never cleared.
    pub fn mark_consumed(&self) {
        if !self.consumed.swap(true, Ordering::Relaxed) {
            trace_consumed(self.property_type);
        }
    }
}

#[cfg(feature = "logging")]
fn trace_consumed(property_type: PropertyType) {
    tracing::trace!(%property_type, "value consumed");
}

#[cfg(not(feature = "logging"))]
const fn trace_consumed(_property_type: PropertyType) {}

/// A typed repository value.
///
/// Implementors supply [`Value::base`], the [`Value::internal_string`] hook
/// and the per-type conversions; the string conversion and the type/flag
/// accessors are provided.
pub trait Value: fmt::Debug + Send + Sync {
    /// The shared type tag and consumed flag
    fn base(&self) -> &BaseValue;

    /// Canonical string form of the held value, without touching the
    /// consumed flag.
    ///
    /// # Errors
    /// Returns `FormatError::EmptyValue` if no value is held.
    fn internal_string(&self) -> Result<String, FormatError>;

    /// # Errors
    /// Returns a `FormatError` if the value is empty or has no date form.
    fn get_date(&self) -> Result<Calendar, FormatError>;

    /// # Errors
    /// Returns a `FormatError` if the value is empty or has no integer form.
    fn get_long(&self) -> Result<i64, FormatError>;

    /// # Errors
    /// Returns a `FormatError` if the value is empty or has no float form.
    fn get_double(&self) -> Result<f64, FormatError>;

    /// # Errors
    /// Returns a `FormatError` if the value is empty or has no boolean form.
    fn get_boolean(&self) -> Result<bool, FormatError>;

    /// Upcast used to compare values across variants
    fn as_any(&self) -> &dyn Any;

    /// Returns the type tag
    fn property_type(&self) -> PropertyType {
        self.base().property_type()
    }

    /// Returns `true` once any conversion getter has been called
    fn is_consumed(&self) -> bool {
        self.base().is_consumed()
    }

    /// Marks the value consumed and returns its canonical string form.
    ///
    /// # Errors
    /// Returns `FormatError::EmptyValue` if no value is held.
    fn get_string(&self) -> Result<String, FormatError> {
        self.base().mark_consumed();
        self.internal_string()
    }
}
