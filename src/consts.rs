/// Separator between year, month and day (`YYYY-MM-DD`)
pub const DATE_SEPARATOR: char = '-';

/// Separates the date part from the time part
pub const TIME_DESIGNATOR: char = 'T';

/// Separator between hour, minute and second (`hh:mm:ss`)
pub const TIME_SEPARATOR: char = ':';

/// Separator between seconds and milliseconds
pub const FRACTION_SEPARATOR: char = '.';

/// Time zone designator for a zero UTC offset
pub const UTC_DESIGNATOR: char = 'Z';

/// Positive offset / year sign
pub const PLUS_SIGN: char = '+';
/// Negative offset / year sign
pub const MINUS_SIGN: char = '-';

/// Number of digits in the year field
pub const YEAR_DIGITS: usize = 4;
/// Number of digits in month, day, hour, minute and second fields
pub const FIELD_DIGITS: usize = 2;
/// Number of digits in the millisecond field
pub const MILLIS_DIGITS: usize = 3;

/// Largest hour accepted in a `±hh:mm` offset
pub const MAX_OFFSET_HOURS: u32 = 23;
/// Largest minute accepted in a `±hh:mm` offset
pub const MAX_OFFSET_MINUTES: u32 = 59;

/// Largest millisecond value rendered by the formatter
pub const MAX_MILLIS: u32 = 999;

pub(crate) const NANOS_PER_MILLI: u32 = 1_000_000;
pub(crate) const SECONDS_PER_MINUTE: u32 = 60;
pub(crate) const MINUTES_PER_HOUR: u32 = 60;
