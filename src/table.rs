//! The Bikram Sambat month-length table and the lookups built on it.
//!
//! Month lengths in BS are fixed by the published almanac each year and follow
//! no arithmetic rule, so every conversion in this crate is driven by
//! [`MONTH_LENGTHS`] and the AD date of its first day, [`EPOCH_AD`].

use std::ops::RangeInclusive;

use chrono::{Days, NaiveDate};

use crate::consts::{BAISAKH, CHAITRA, MAX_MONTH, MAX_YEAR, MIN_YEAR, MONTHS_PER_YEAR};
use crate::types::{Month, Year};
use crate::CalendarError;

/// AD date of BS 1970/01/01 (Baisakh 1, 1970).
pub const EPOCH_AD: NaiveDate = match NaiveDate::from_ymd_opt(1913, 4, 13) {
    Some(date) => date,
    None => panic!("epoch is a valid Gregorian date"),
};

pub(crate) const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

/// Days in each month, one row per year starting at [`MIN_YEAR`].
///
/// Rows are the month lengths of the published Nepali patro (almanac) table
/// that the common BS converters share. Accuracy is not uniform:
///
/// - 1970-1999: historical rows, lower confidence than the rest. Shrawan 1974
///   is set to 31 days so that every year starts on 13 April and the rows
///   land on the published BS 2000/01/01 = 1943-04-14 New Year.
/// - 2000-2082: rows checked against New Years and national days from
///   issued almanacs.
/// - 2083-2090: projections published ahead of the almanac. Replace them as
///   each year's almanac is issued.
const MONTH_LENGTHS: [[u8; MONTHS_PER_YEAR as usize]; YEAR_COUNT] = [
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 1970
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 1971
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 1972
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 1973
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1974
    [31, 31, 32, 32, 30, 31, 30, 29, 30, 29, 30, 30], // 1975
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 1976
    [30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], // 1977
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1978
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 1979
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 1980
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 1981
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1982
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 1983
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 1984
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 1985
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1986
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 1987
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 1988
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 1989
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1990
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 1991
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 1992
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 1993
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1994
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 1995
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 1996
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1997
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 1998
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 1999
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2000
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2001
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2002
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2003
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2004
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2005
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2006
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2007
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2008
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2009
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2010
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2011
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2012
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2013
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2014
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2015
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2016
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2017
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2018
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2019
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2020
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2021
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2022
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2023
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2024
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2025
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2026
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2027
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2028
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2029
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2030
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2031
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2032
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2033
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2034
    [30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2035
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2036
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2037
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2038
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2039
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2040
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2041
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2042
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2043
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2044
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2045
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2046
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2047
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2048
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2049
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2050
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2051
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2052
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2053
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2054
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2055
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30], // 2056
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2057
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2058
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2059
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2060
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2061
    [30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31], // 2062
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2063
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2064
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2065
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31], // 2066
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2067
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2068
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2069
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30], // 2070
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2071
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30], // 2072
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31], // 2073
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2074
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2075
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2076
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31], // 2077
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30], // 2078
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30], // 2079
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30], // 2080
    [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2081
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2082
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2083
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30], // 2084
    [31, 32, 31, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2085
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2086
    [31, 31, 32, 31, 31, 31, 30, 30, 29, 30, 30, 30], // 2087
    [30, 31, 32, 32, 30, 31, 30, 30, 29, 30, 30, 30], // 2088
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2089
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30], // 2090
];

const fn cumulative_year_offsets() -> [u32; YEAR_COUNT + 1] {
    let mut offsets = [0u32; YEAR_COUNT + 1];
    let mut year = 0;
    while year < YEAR_COUNT {
        let mut total = 0u32;
        let mut month = 0;
        while month < MONTHS_PER_YEAR as usize {
            total += MONTH_LENGTHS[year][month] as u32;
            month += 1;
        }
        offsets[year + 1] = offsets[year] + total;
        year += 1;
    }
    offsets
}

/// Days from [`EPOCH_AD`] to the first day of each year. The final entry is
/// the total number of days the table covers.
const YEAR_OFFSETS: [u32; YEAR_COUNT + 1] = cumulative_year_offsets();

/// Number of days covered by the table.
pub(crate) const TOTAL_DAYS: u32 = YEAR_OFFSETS[YEAR_COUNT];

/// Supported BS years, inclusive.
pub const fn supported_years() -> RangeInclusive<u16> {
    MIN_YEAR..=MAX_YEAR
}

/// First and last AD dates that can be converted, inclusive.
pub fn supported_ad_range() -> (NaiveDate, NaiveDate) {
    (EPOCH_AD, EPOCH_AD + Days::new(u64::from(TOTAL_DAYS - 1)))
}

fn year_index(year: u16) -> Result<usize, CalendarError> {
    if supported_years().contains(&year) {
        Ok(usize::from(year - MIN_YEAR))
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

/// Month lengths for an already validated year.
pub(crate) fn lengths_of(year: Year) -> &'static [u8; MONTHS_PER_YEAR as usize] {
    &MONTH_LENGTHS[usize::from(year.get() - MIN_YEAR)]
}

/// Number of days in `month` of BS `year`.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` if `month` is not in `1..=12`, or
/// `CalendarError::YearOutOfRange` if the table does not cover `year`.
pub fn days_in_month(year: u16, month: u8) -> Result<u8, CalendarError> {
    if month == 0 || month > MAX_MONTH {
        return Err(CalendarError::InvalidMonth(month));
    }
    let index = year_index(year)?;
    Ok(MONTH_LENGTHS[index][usize::from(month - 1)])
}

/// Number of days in BS `year` (365 or 366 in practice, occasionally 364 or 367).
///
/// # Errors
/// Returns `CalendarError::YearOutOfRange` if the table does not cover `year`.
pub fn days_in_year(year: u16) -> Result<u16, CalendarError> {
    let index = year_index(year)?;
    let days = YEAR_OFFSETS[index + 1] - YEAR_OFFSETS[index];
    Ok(u16::try_from(days).unwrap_or(u16::MAX))
}

/// AD date of BS New Year's Day (Baisakh 1) for `year`.
///
/// # Errors
/// Returns `CalendarError::YearOutOfRange` if the table does not cover `year`.
pub fn year_start(year: u16) -> Result<NaiveDate, CalendarError> {
    let index = year_index(year)?;
    Ok(EPOCH_AD + Days::new(u64::from(YEAR_OFFSETS[index])))
}

/// Days elapsed from [`EPOCH_AD`] to the given validated date.
pub(crate) fn day_offset(year: Year, month: Month, day: u8) -> u32 {
    let preceding: u32 = lengths_of(year)[..usize::from(month.get() - 1)]
        .iter()
        .map(|&len| u32::from(len))
        .sum();
    YEAR_OFFSETS[usize::from(year.get() - MIN_YEAR)] + preceding + u32::from(day) - 1
}

/// Inverse of [`day_offset`]: the (year, month, day) that lies `offset` days
/// after [`EPOCH_AD`], or `None` past the end of the table.
pub(crate) fn locate(offset: u32) -> Option<(u16, u8, u8)> {
    if offset >= TOTAL_DAYS {
        return None;
    }
    // latest year start that is not after `offset`
    let index = YEAR_OFFSETS.partition_point(|&start| start <= offset) - 1;
    let mut remaining = offset - YEAR_OFFSETS[index];
    let year = MIN_YEAR + u16::try_from(index).ok()?;

    for (month, &len) in (BAISAKH..=CHAITRA).zip(MONTH_LENGTHS[index].iter()) {
        let len = u32::from(len);
        if remaining < len {
            return Some((year, month, u8::try_from(remaining + 1).ok()?));
        }
        remaining -= len;
    }
    None
}
