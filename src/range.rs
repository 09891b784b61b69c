use std::{cmp::Ordering, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BsDate, CalendarError, ParseError, RANGE_SEPARATOR, ad_to_bs, prelude::*};

/// An inclusive span of BS days, such as an event's start and end dates.
/// The start date must be on or before the end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct BsDateRange {
    start: BsDate,
    end:   BsDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Start date is after end date.
    #[error("Invalid date range: start ({start}) is after end ({end})")]
    InvalidRange { start: BsDate, end: BsDate },

    /// Error parsing date component.
    #[error(transparent)]
    ParseError(#[from] ParseError),

    /// Conversion of an endpoint failed.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl BsDateRange {
    /// Creates a new date range with validation.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if start > end.
    pub fn new(start: BsDate, end: BsDate) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds a range from AD endpoints.
    ///
    /// # Errors
    /// Returns `RangeError::Calendar` if either endpoint is outside the table,
    /// or `RangeError::InvalidRange` if start > end.
    pub fn from_ad(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        Self::new(ad_to_bs(start)?, ad_to_bs(end)?)
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> BsDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> BsDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (BsDate, BsDate) {
        (self.start, self.end)
    }

    /// AD equivalents of both endpoints
    pub fn to_ad(&self) -> (NaiveDate, NaiveDate) {
        (self.start.to_ad(), self.end.to_ad())
    }

    /// Checks if the range contains a given date
    pub fn contains(&self, date: &BsDate) -> bool {
        self.start <= *date && *date <= self.end
    }

    /// Checks if this range overlaps with another range
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Checks if this range is completely contained within another range
    pub fn is_within(&self, other: &Self) -> bool {
        other.start <= self.start && self.end <= other.end
    }

    /// Number of days in the range, counting both ends
    pub fn len_days(&self) -> u32 {
        u32::try_from(self.start.days_until(self.end) + 1).unwrap_or(u32::MAX)
    }

    /// Every day of the range in order
    pub fn iter_days(&self) -> impl Iterator<Item = BsDate> + '_ {
        (0..self.len_days()).map_while(move |n| self.start.add_days(i64::from(n)).ok())
    }
}

impl FromStr for BsDateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: dates use '-', RANGE_SEPARATOR splits start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<BsDate>()?;
                let end = end_str.trim().parse::<BsDate>()?;

                Self::new(start, end)
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for BsDateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BsDateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for BsDateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BsDateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
