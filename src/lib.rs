//! Bikram Sambat (BS) calendar conversion for the membership platform.
//!
//! All conversions are table-driven: BS month lengths vary from year to year
//! and are taken from the published calendar for BS 1970 through BS 2090
//! (AD 1913-04-13 through AD 2034-04-13). Values outside that span are
//! rejected with an out-of-range error rather than approximated.
//!
//! The AD side of every conversion is a [`chrono::NaiveDate`].

mod consts;
mod convert;
mod format;
mod prelude;
mod range;
mod table;
mod types;

pub use consts::*;
pub use convert::{Clock, FixedClock, SystemClock, ad_to_bs, bs_to_ad, today};
pub use format::{DigitSet, FormatOptions, MonthNames, digit_value, format_bs_date, localize_digits};
pub use range::{BsDateRange, RangeError};
pub use table::{EPOCH_AD, days_in_month, days_in_year, supported_ad_range, supported_years, year_start};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use chrono::NaiveDate;
use std::str::FromStr;

/// A validated date in the Bikram Sambat calendar.
///
/// Construction checks the month against `1..=12` and the day against the
/// table's length for that year and month, so every `BsDate` converts to AD
/// without failing. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct BsDate {
    year:  Year,
    month: Month,
    day:   Day,
}

/// Broad classification of a [`CalendarError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The year or date lies outside the conversion table.
    OutOfRange,
    /// The date is structurally invalid (bad month, or day past month end).
    InvalidDate,
}

/// Error type for conversions and date construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// BS year not covered by the table.
    #[error("BS year {0} is outside the supported range {min}-{max}", min = MIN_YEAR, max = MAX_YEAR)]
    YearOutOfRange(u16),

    /// AD date before the first or after the last tabulated BS day.
    #[error("AD date {0} is outside the supported range")]
    AdDateOutOfRange(NaiveDate),

    /// Stepping from a date by a day count left the table.
    #[error("{days} days from BS {start} is outside the supported range")]
    StepOutOfRange { start: BsDate, days: i64 },

    /// Month not in `1..=12`.
    #[error("Invalid month: {0} (must be 1-{max})", max = MAX_MONTH)]
    InvalidMonth(u8),

    /// Day is zero or past the end of the month.
    #[error("Invalid day {day} for BS {year}/{month:02} (max {max_day})")]
    InvalidDay { year: u16, month: u8, day: u8, max_day: u8 },

    /// Day outside the bounds every month shares, checked without a year and month.
    #[error("Invalid day: {0} (must be 1-{max})", max = MAX_DAYS_IN_MONTH)]
    DayOutOfBounds(u8),
}

impl CalendarError {
    /// Classifies the error as out-of-range or invalid-date.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::YearOutOfRange(_) | Self::AdDateOutOfRange(_) | Self::StepOutOfRange { .. } => {
                ErrorKind::OutOfRange
            }
            Self::InvalidMonth(_) | Self::InvalidDay { .. } | Self::DayOutOfBounds(_) => ErrorKind::InvalidDate,
        }
    }

    pub const fn is_out_of_range(&self) -> bool {
        matches!(self.kind(), ErrorKind::OutOfRange)
    }

    pub const fn is_invalid_date(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidDate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Month name {name:?} does not match month {month}")]
    MonthNameMismatch { name: String, month: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "{_0}")]
    Calendar(CalendarError),
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Calendar(err) => Some(err),
            Self::InvalidFormat(_) | Self::MonthNameMismatch { .. } | Self::EmptyInput => None,
        }
    }
}

impl From<CalendarError> for ParseError {
    fn from(err: CalendarError) -> Self {
        Self::Calendar(err)
    }
}

impl BsDate {
    /// Creates a date from raw components.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` for a month outside `1..=12`,
    /// `CalendarError::YearOutOfRange` for a year the table does not cover, and
    /// `CalendarError::InvalidDay` for a day past the end of that month.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, CalendarError> {
        let month_typed = Month::new(month)?;
        let year_typed = Year::new(year)?;
        let day_typed = Day::new(day, year, month)?;
        Ok(Self {
            year:  year_typed,
            month: month_typed,
            day:   day_typed,
        })
    }

    /// Creates a date from typed components, re-checking the day against the month.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if `day` is past the end of the month.
    pub fn from_parts(year: Year, month: Month, day: Day) -> Result<Self, CalendarError> {
        Self::new(year.get(), month.get(), day.get())
    }

    /// Returns the year component
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component (1 = Baisakh)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    /// Devanagari name of this date's month.
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }

    /// Length of this date's month.
    pub fn days_in_month(&self) -> u8 {
        self.year.days_in_month(self.month)
    }

    /// First day of this date's month.
    pub fn first_of_month(&self) -> Self {
        Self::new(self.year(), self.month(), MIN_DAY).unwrap_or(*self)
    }

    /// Last day of this date's month.
    pub fn last_of_month(&self) -> Self {
        Self::new(self.year(), self.month(), self.days_in_month()).unwrap_or(*self)
    }

    fn parse_component<T: TryFrom<u32>>(s: &str) -> Result<T, ParseError> {
        format::parse_number(s)
            .and_then(|value| T::try_from(value).ok())
            .ok_or_else(|| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for BsDate {
    type Err = ParseError;

    /// Parses `YYYY-MM-DD` or `YYYY/MM/DD`, in Latin or Devanagari digits,
    /// optionally followed by a month name that must agree with `MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // anything after the last digit is an optional month name
        let numeric_end = trimmed
            .char_indices()
            .rev()
            .find(|&(_, c)| format::digit_value(c).is_some())
            .map_or(0, |(index, c)| index + c.len_utf8());
        let (numeric, rest) = trimmed.split_at(numeric_end);
        let name = Some(rest.trim()).filter(|name| !name.is_empty());

        let has_hyphen = numeric.contains(DATE_SEPARATOR);
        let has_slash = numeric.contains(DISPLAY_SEPARATOR);
        let separator = match (has_hyphen, has_slash) {
            (true, true) => {
                return Err(ParseError::InvalidFormat(format!(
                    "Mixed delimiters ({DATE_SEPARATOR} and {DISPLAY_SEPARATOR})"
                )));
            }
            (true, false) => DATE_SEPARATOR,
            (false, true) => DISPLAY_SEPARATOR,
            (false, false) => return Err(ParseError::InvalidFormat(trimmed.to_owned())),
        };

        let parts: Vec<&str> = numeric.split(separator).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(ParseError::InvalidFormat(format!(
                "Expected 3 components separated by {separator}, found {}",
                parts.len()
            )));
        };

        let date = Self::new(
            Self::parse_component(year)?,
            Self::parse_component(month)?,
            Self::parse_component(day)?,
        )?;

        if let Some(name) = name.filter(|name| Month::from_name(name) != Some(date.month)) {
            return Err(ParseError::MonthNameMismatch {
                name:  name.to_owned(),
                month: date.month(),
            });
        }

        Ok(date)
    }
}

impl TryFrom<(u16, u8, u8)> for BsDate {
    type Error = CalendarError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl serde::Serialize for BsDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for BsDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
