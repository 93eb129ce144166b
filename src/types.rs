use crate::FormatError;
use crate::prelude::*;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar value: a point in time together with the fixed UTC offset it
/// was expressed in. Equality compares instants, so the same moment written
/// with two different offsets is equal.
pub type Calendar = DateTime<FixedOffset>;

/// The property type tag carried by every value.
/// Discriminants are the numeric codes used on the wire by the repository.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(i32)]
pub enum PropertyType {
    #[display(fmt = "undefined")]
    Undefined = 0,
    #[display(fmt = "String")]
    String = 1,
    #[display(fmt = "Binary")]
    Binary = 2,
    #[display(fmt = "Long")]
    Long = 3,
    #[display(fmt = "Double")]
    Double = 4,
    #[display(fmt = "Date")]
    Date = 5,
    #[display(fmt = "Boolean")]
    Boolean = 6,
    #[display(fmt = "Name")]
    Name = 7,
    #[display(fmt = "Path")]
    Path = 8,
    #[display(fmt = "Reference")]
    Reference = 9,
}

impl PropertyType {
    /// All property types in code order
    pub const ALL: [Self; 10] = [
        Self::Undefined,
        Self::String,
        Self::Binary,
        Self::Long,
        Self::Double,
        Self::Date,
        Self::Boolean,
        Self::Name,
        Self::Path,
        Self::Reference,
    ];

    /// Returns the numeric code of this type
    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Returns the canonical name of this type
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::String => "String",
            Self::Binary => "Binary",
            Self::Long => "Long",
            Self::Double => "Double",
            Self::Date => "Date",
            Self::Boolean => "Boolean",
            Self::Name => "Name",
            Self::Path => "Path",
            Self::Reference => "Reference",
        }
    }

    /// Looks up a type by its numeric code
    ///
    /// # Errors
    /// Returns `FormatError::InvalidTypeCode` for codes with no type.
    pub fn from_value(code: i32) -> Result<Self, FormatError> {
        Self::ALL
            .into_iter()
            .find(|t| t.value() == code)
            .ok_or(FormatError::InvalidTypeCode(code))
    }
}

impl FromStr for PropertyType {
    type Err = FormatError;

    /// Names match exactly, as the repository writes them.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| FormatError::InvalidType(s.to_owned()))
    }
}

impl TryFrom<i32> for PropertyType {
    type Error = FormatError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl TryFrom<String> for PropertyType {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PropertyType> for i32 {
    fn from(property_type: PropertyType) -> Self {
        property_type.value()
    }
}

impl From<PropertyType> for &'static str {
    fn from(property_type: PropertyType) -> Self {
        property_type.name()
    }
}
