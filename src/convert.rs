//! AD <-> BS conversion, the injectable clock behind `today`, and date stepping.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc, Weekday};

use crate::consts::WEEKDAY_NAMES;
use crate::table::{self, EPOCH_AD, TOTAL_DAYS};
use crate::{BsDate, CalendarError};

/// Converts an AD date to its BS equivalent.
///
/// Finds the BS year whose New Year's Day is the latest one not after `date`,
/// then walks that year's month lengths.
///
/// # Errors
/// Returns `CalendarError::AdDateOutOfRange` if `date` falls outside
/// [`supported_ad_range`](crate::supported_ad_range).
pub fn ad_to_bs(date: NaiveDate) -> Result<BsDate, CalendarError> {
    let offset = date.signed_duration_since(EPOCH_AD).num_days();
    let (year, month, day) = u32::try_from(offset)
        .ok()
        .and_then(table::locate)
        .ok_or(CalendarError::AdDateOutOfRange(date))?;
    BsDate::new(year, month, day)
}

/// Converts raw BS components to the AD date.
///
/// # Errors
/// Returns `CalendarError::InvalidMonth` or `CalendarError::InvalidDay` for a
/// structurally invalid date and `CalendarError::YearOutOfRange` when the table
/// does not cover `year`.
pub fn bs_to_ad(year: u16, month: u8, day: u8) -> Result<NaiveDate, CalendarError> {
    BsDate::new(year, month, day).map(BsDate::to_ad)
}

/// Source of the current date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// Today's BS date according to `clock`.
///
/// # Errors
/// Returns `CalendarError::AdDateOutOfRange` once the clock passes the end of the table.
pub fn today(clock: &impl Clock) -> Result<BsDate, CalendarError> {
    ad_to_bs(clock.today())
}

impl BsDate {
    /// See [`ad_to_bs`].
    ///
    /// # Errors
    /// Returns `CalendarError::AdDateOutOfRange` outside the supported range.
    pub fn from_ad(date: NaiveDate) -> Result<Self, CalendarError> {
        ad_to_bs(date)
    }

    /// The AD date of this BS date. Infallible: construction already checked
    /// the date against the table.
    pub fn to_ad(self) -> NaiveDate {
        let offset = table::day_offset(self.year_typed(), self.month_typed(), self.day());
        EPOCH_AD + Days::new(u64::from(offset))
    }

    /// Today's BS date from the host's local clock.
    ///
    /// # Errors
    /// Returns `CalendarError::AdDateOutOfRange` once the host date passes the end of the table.
    pub fn today() -> Result<Self, CalendarError> {
        today(&SystemClock)
    }

    /// BS date of a timestamp, taken in the timestamp's own time zone.
    ///
    /// # Errors
    /// Returns `CalendarError::AdDateOutOfRange` outside the supported range.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self, CalendarError> {
        ad_to_bs(datetime.date_naive())
    }

    /// Midnight UTC at the start of the AD equivalent, the form the
    /// registration and event screens persist.
    pub fn to_utc_midnight(self) -> DateTime<Utc> {
        self.to_ad().and_time(NaiveTime::MIN).and_utc()
    }

    /// [`to_utc_midnight`](Self::to_utc_midnight) as an RFC 3339 string, e.g. `2023-04-14T00:00:00Z`.
    pub fn to_iso_string(self) -> String {
        self.to_utc_midnight().to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Moves `days` forward (or backward when negative).
    ///
    /// # Errors
    /// Returns `CalendarError::StepOutOfRange` if the result leaves the table.
    pub fn add_days(self, days: i64) -> Result<Self, CalendarError> {
        let start = table::day_offset(self.year_typed(), self.month_typed(), self.day());
        let out_of_range = CalendarError::StepOutOfRange { start: self, days };

        let target = i64::from(start)
            .checked_add(days)
            .and_then(|offset| u32::try_from(offset).ok())
            .filter(|&offset| offset < TOTAL_DAYS)
            .ok_or_else(|| out_of_range.clone())?;
        let (year, month, day) = table::locate(target).ok_or(out_of_range)?;
        Self::new(year, month, day)
    }

    /// The following day.
    ///
    /// # Errors
    /// Returns `CalendarError::StepOutOfRange` on the last tabulated day.
    pub fn succ(self) -> Result<Self, CalendarError> {
        self.add_days(1)
    }

    /// The preceding day.
    ///
    /// # Errors
    /// Returns `CalendarError::StepOutOfRange` on the first tabulated day.
    pub fn pred(self) -> Result<Self, CalendarError> {
        self.add_days(-1)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        other.to_ad().signed_duration_since(self.to_ad()).num_days()
    }

    pub fn weekday(self) -> Weekday {
        self.to_ad().weekday()
    }

    /// Devanagari weekday name, e.g. `शुक्रबार` for Friday.
    pub fn weekday_name(self) -> &'static str {
        WEEKDAY_NAMES[self.weekday().num_days_from_sunday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_MONTH, MAX_YEAR, MIN_YEAR};
    use crate::test_utils::{ad, bs};
    use crate::{ErrorKind, days_in_month, supported_ad_range, supported_years};
    use chrono::FixedOffset;

    #[test]
    fn test_golden_dates() {
        struct TestCase {
            ad:          NaiveDate,
            bs:          BsDate,
            description: &'static str,
        }

        let cases = [
            TestCase {
                ad:          ad(2023, 4, 14),
                bs:          bs(2080, 1, 1),
                description: "New Year 2080",
            },
            TestCase {
                ad:          ad(2015, 9, 20),
                bs:          bs(2072, 6, 3),
                description: "Constitution Day, Asoj 3 2072",
            },
            TestCase {
                ad:          ad(2008, 5, 28),
                bs:          bs(2065, 2, 15),
                description: "Republic Day, Jestha 15 2065",
            },
            TestCase {
                ad:          ad(2024, 4, 13),
                bs:          bs(2081, 1, 1),
                description: "New Year 2081",
            },
            TestCase {
                ad:          ad(2023, 4, 13),
                bs:          bs(2079, 12, 30),
                description: "last day of 2079",
            },
            TestCase {
                ad:          ad(1934, 1, 15),
                bs:          bs(1990, 10, 2),
                description: "Nepal-Bihar earthquake, Magh 2 1990",
            },
            TestCase {
                ad:          ad(1930, 1, 1),
                bs:          bs(1986, 9, 18),
                description: "AD new year 1930",
            },
            TestCase {
                ad:          ad(1943, 4, 13),
                bs:          bs(1999, 12, 31),
                description: "last day of 1999",
            },
            TestCase {
                ad:          ad(1913, 4, 13),
                bs:          bs(1970, 1, 1),
                description: "first tabulated day",
            },
            TestCase {
                ad:          ad(2034, 4, 13),
                bs:          bs(2090, 12, 30),
                description: "last tabulated day",
            },
        ];

        for case in &cases {
            assert_eq!(ad_to_bs(case.ad).unwrap(), case.bs, "ad_to_bs: {}", case.description);
            assert_eq!(case.bs.to_ad(), case.ad, "to_ad: {}", case.description);
        }
    }

    #[test]
    fn test_fixed_offset_arithmetic_is_wrong() {
        // adding 57 to the AD year gives 2080 for both days
        assert_eq!(ad_to_bs(ad(2023, 4, 13)).unwrap().year(), 2079);
        assert_eq!(ad_to_bs(ad(2023, 4, 14)).unwrap().year(), 2080);
    }

    #[test]
    fn test_ad_to_bs_out_of_range() {
        for date in [ad(1800, 1, 1), ad(1913, 4, 12), ad(2034, 4, 14), ad(2100, 1, 1)] {
            let err = ad_to_bs(date).unwrap_err();
            assert_eq!(err, CalendarError::AdDateOutOfRange(date));
            assert_eq!(err.kind(), ErrorKind::OutOfRange);
        }
        assert!(ad_to_bs(NaiveDate::MIN).is_err());
        assert!(ad_to_bs(NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_bs_to_ad_validity_boundary() {
        for year in [MIN_YEAR, 2046, 2080, 2081, MAX_YEAR] {
            for month in 1..=MAX_MONTH {
                let last = days_in_month(year, month).unwrap();
                assert!(bs_to_ad(year, month, last).is_ok(), "{year}/{month}/{last}");

                let err = bs_to_ad(year, month, last + 1).unwrap_err();
                assert!(err.is_invalid_date(), "{year}/{month}/{}", last + 1);
            }
        }
    }

    #[test]
    fn test_bs_to_ad_errors() {
        assert_eq!(bs_to_ad(2080, 13, 1), Err(CalendarError::InvalidMonth(13)));
        assert_eq!(bs_to_ad(2080, 0, 1), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(bs_to_ad(1969, 12, 30), Err(CalendarError::YearOutOfRange(1969)));
        assert_eq!(bs_to_ad(2110, 1, 1), Err(CalendarError::YearOutOfRange(2110)));
    }

    #[test]
    fn test_round_trip_every_ad_day() {
        let (first, last) = supported_ad_range();
        let mut date = first;
        let mut previous: Option<BsDate> = None;
        while date <= last {
            let converted = ad_to_bs(date).unwrap();
            assert_eq!(converted.to_ad(), date);
            if let Some(previous) = previous {
                assert!(previous < converted, "{previous} !< {converted}");
                assert_eq!(previous.succ().unwrap(), converted);
            }
            previous = Some(converted);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_round_trip_every_bs_day() {
        let mut expected_ad = EPOCH_AD;
        for year in supported_years() {
            for month in 1..=MAX_MONTH {
                for day in 1..=days_in_month(year, month).unwrap() {
                    let converted = bs_to_ad(year, month, day).unwrap();
                    assert_eq!(converted, expected_ad, "{year}/{month}/{day}");
                    assert_eq!(ad_to_bs(converted).unwrap(), bs(year, month, day));
                    expected_ad = expected_ad.succ_opt().unwrap();
                }
            }
        }
        assert_eq!(expected_ad, supported_ad_range().1.succ_opt().unwrap());
    }

    #[test]
    fn test_today_uses_injected_clock() {
        let clock = FixedClock(ad(2023, 4, 14));
        assert_eq!(today(&clock).unwrap(), bs(2080, 1, 1));
        assert_eq!(today(&&clock).unwrap(), bs(2080, 1, 1));

        let past_the_table = FixedClock(ad(2040, 1, 1));
        assert!(today(&past_the_table).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_system_clock_today_is_consistent() {
        // Only meaningful while the host date is inside the table.
        let host = SystemClock.today();
        if let Ok(date) = BsDate::today() {
            let host_after = SystemClock.today();
            assert!(date.to_ad() == host || date.to_ad() == host_after);
        }
    }

    #[test]
    fn test_from_datetime_uses_its_own_zone() {
        // 2023-04-13 19:00 UTC is already 2023-04-14 in Kathmandu (+05:45)
        let utc = Utc.with_ymd_and_hms(2023, 4, 13, 19, 0, 0).unwrap();
        let kathmandu = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();

        assert_eq!(BsDate::from_datetime(&utc).unwrap(), bs(2079, 12, 30));
        assert_eq!(
            BsDate::from_datetime(&utc.with_timezone(&kathmandu)).unwrap(),
            bs(2080, 1, 1)
        );
    }

    #[test]
    fn test_iso_interchange() {
        let date = bs(2080, 1, 1);
        assert_eq!(date.to_iso_string(), "2023-04-14T00:00:00Z");
        assert_eq!(BsDate::from_datetime(&date.to_utc_midnight()).unwrap(), date);
    }

    #[test]
    fn test_add_days() {
        let date = bs(2080, 1, 31);
        assert_eq!(date.add_days(1).unwrap(), bs(2080, 2, 1));
        assert_eq!(date.add_days(0).unwrap(), date);
        assert_eq!(bs(2080, 1, 1).add_days(-1).unwrap(), bs(2079, 12, 30));
        assert_eq!(bs(2080, 1, 1).add_days(365).unwrap(), bs(2081, 1, 1));
        assert_eq!(bs(2080, 1, 1).pred().unwrap(), bs(2079, 12, 30));
    }

    #[test]
    fn test_add_days_out_of_range() {
        let first = bs(MIN_YEAR, 1, 1);
        assert_eq!(
            first.pred(),
            Err(CalendarError::StepOutOfRange { start: first, days: -1 })
        );
        assert!(bs(MAX_YEAR, 12, 30).succ().unwrap_err().is_out_of_range());
        assert!(first.add_days(i64::MAX).is_err());
        assert!(first.add_days(i64::MIN).is_err());
    }

    #[test]
    fn test_days_until() {
        assert_eq!(bs(2080, 1, 1).days_until(bs(2081, 1, 1)), 365);
        assert_eq!(bs(2081, 1, 1).days_until(bs(2080, 1, 1)), -365);
        assert_eq!(bs(2080, 5, 5).days_until(bs(2080, 5, 5)), 0);
    }

    #[test]
    fn test_weekday() {
        // 2023-04-14 was a Friday
        let new_year = bs(2080, 1, 1);
        assert_eq!(new_year.weekday(), Weekday::Fri);
        assert_eq!(new_year.weekday_name(), "शुक्रबार");
        assert_eq!(bs(2081, 1, 1).weekday_name(), "शनिबार");
    }
}
