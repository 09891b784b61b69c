use crate::CalendarError;
use crate::consts::{
    BAISAKH, CHAITRA, MAX_DAYS_IN_MONTH, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, MONTH_NAMES, MONTH_NAMES_LATIN,
};
use crate::table;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;
use std::num::NonZeroU8;

/// A Bikram Sambat year guaranteed to be covered by the month-length table
/// (`MIN_YEAR..=MAX_YEAR`, 1970..=2090).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// Creates a new Year, validating that the table covers it
    ///
    /// # Errors
    /// Returns `CalendarError::YearOutOfRange` if the value is outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            return Err(CalendarError::YearOutOfRange(value));
        }
        let non_zero = NonZeroU16::new(value).ok_or(CalendarError::YearOutOfRange(value))?;
        Ok(Self(non_zero))
    }

    /// Returns the year value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }

    /// Days in `month` of this year.
    pub fn days_in_month(self, month: Month) -> u8 {
        table::lengths_of(self)[month.index()]
    }

    /// Total days in this year.
    pub fn days(self) -> u16 {
        table::lengths_of(self).iter().map(|&len| u16::from(len)).sum()
    }
}

impl TryFrom<u16> for Year {
    type Error = CalendarError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A month value guaranteed to be in the range `1..=MAX_MONTH` (1 = Baisakh, 12 = Chaitra)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// Creates a new Month, validating that it's non-zero and <= `MAX_MONTH`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > `MAX_MONTH`.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MAX_MONTH {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    /// Returns the month value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        usize::from(self.get() - 1)
    }

    /// Devanagari month name, e.g. `बैशाख` for month 1.
    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.index()]
    }

    /// Latin transliteration of the month name, e.g. `Baisakh` for month 1.
    pub fn latin_name(self) -> &'static str {
        MONTH_NAMES_LATIN[self.index()]
    }

    /// Looks a month up by its Devanagari name or (case-insensitively) its
    /// Latin transliteration.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        MONTH_NAMES
            .iter()
            .position(|&n| n == name)
            .or_else(|| MONTH_NAMES_LATIN.iter().position(|n| n.eq_ignore_ascii_case(name)))
            .and_then(|index| u8::try_from(index + 1).ok())
            .and_then(|value| Self::new(value).ok())
    }

    /// All twelve months in calendar order.
    pub fn all() -> impl Iterator<Item = Self> {
        (BAISAKH..=CHAITRA).filter_map(|value| Self::new(value).ok())
    }
}

impl TryFrom<u8> for Month {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A day value guaranteed to be valid for a given BS year and month
/// Uses `NonZeroU8` internally, so 0 is not a valid day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// Creates a new Day, validating it against the table's length for the given year and month
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or past the end of the month,
    /// and the errors of [`table::days_in_month`] for an unsupported year or invalid month.
    pub fn new(value: u8, year: u16, month: u8) -> Result<Self, CalendarError> {
        let max_day = table::days_in_month(year, month)?;
        let invalid = CalendarError::InvalidDay {
            year,
            month,
            day: value,
            max_day,
        };

        let non_zero = NonZeroU8::new(value).ok_or_else(|| invalid.clone())?;
        if value > max_day {
            return Err(invalid);
        }

        Ok(Self(non_zero))
    }

    /// Returns the day value as u8
    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        // Can't validate against the table without year/month context, so only
        // check the bounds every month shares
        if !(MIN_DAY..=MAX_DAYS_IN_MONTH).contains(&value) {
            return Err(CalendarError::DayOutOfBounds(value));
        }
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::DayOutOfBounds(value))?;
        Ok(Self(non_zero))
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.0.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
