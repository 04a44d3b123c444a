//! Date/time value and the codec for the DS3231 time registers.
//!
//! The chip stores the time in 7 consecutive registers starting at
//! [`RegAddr::Seconds`](crate::RegAddr::Seconds): seconds, minutes, hours,
//! day of week, day of month, month (with the century bit) and a two digit
//! year. With a configurable year base the century bit stretches the two
//! digit year over 200 years:
//!
//! ```text
//! year = year_base + (century ? 100 : 0) + two_digit_year
//! ```
//!
//! Decoding trusts the chip and performs no calendar validation, so a
//! freshly powered chip decodes to whatever its registers hold. Convert to
//! [`chrono::NaiveDateTime`] when a validated value is needed.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::bcd::{bcd_to_bin, bin_to_bcd};
use crate::{Date, Day, Hours, Minutes, Month, Seconds, Year};

/// Number of years covered by the two digit year plus the century bit.
pub const YEAR_WINDOW: u16 = 200;

/// A calendar date and time as stored in the chip.
///
/// The fields are not validated when read from the chip; writing checks
/// their ranges. `day_of_week` is stored verbatim in the 3-bit day register; values converted from chrono count days from Sunday
/// (0-6).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    pub day_of_week: u8,
}

impl Default for DateTime {
    /// 2000-01-01 00:00:00, a Saturday.
    fn default() -> Self {
        DateTime {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
            day_of_week: 6,
        }
    }
}

impl TryFrom<&NaiveDateTime> for DateTime {
    type Error = DateTimeError;

    fn try_from(datetime: &NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(datetime.year()).map_err(|_| DateTimeError::InvalidDateTime)?;
        // chrono guarantees the remaining fields fit in a byte
        let narrow = |v: u32| u8::try_from(v).map_err(|_| DateTimeError::InvalidDateTime);
        Ok(DateTime {
            year,
            month: narrow(datetime.month())?,
            day: narrow(datetime.day())?,
            hour: narrow(datetime.hour())?,
            minute: narrow(datetime.minute())?,
            second: narrow(datetime.second())?,
            day_of_week: narrow(datetime.weekday().num_days_from_sunday())?,
        })
    }
}

impl TryFrom<DateTime> for NaiveDateTime {
    type Error = DateTimeError;

    fn try_from(datetime: DateTime) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(
            i32::from(datetime.year),
            u32::from(datetime.month),
            u32::from(datetime.day),
        )
        .and_then(|d| {
            d.and_hms_opt(
                u32::from(datetime.hour),
                u32::from(datetime.minute),
                u32::from(datetime.second),
            )
        })
        .ok_or(DateTimeError::InvalidDateTime)
    }
}

/// Errors from converting or validating a date/time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateTimeError {
    /// The value is not a valid calendar date/time
    InvalidDateTime,
    /// The year is before the configured year base
    YearBeforeBase,
    /// The year is not within 200 years of the year base
    YearAfterWindow,
}

/// The 7 time registers, in register order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct DS3231DateTime {
    seconds: Seconds,
    minutes: Minutes,
    hours: Hours,
    day: Day,
    date: Date,
    month: Month,
    year: Year,
}

impl DS3231DateTime {
    /// Encodes `datetime` for a chip whose year register counts from `year_base`.
    ///
    /// Every field is range checked before encoding. The day of month is
    /// only checked against 1-31, not against the month.
    pub(crate) fn from_datetime(
        datetime: &DateTime,
        year_base: u16,
    ) -> Result<Self, DateTimeError> {
        let offset = Self::year_offset(datetime.year, year_base)?;
        Self::check_fields(datetime)?;

        let mut seconds = Seconds::default();
        seconds.set_bcd(bin_to_bcd(datetime.second));
        let mut minutes = Minutes::default();
        minutes.set_bcd(bin_to_bcd(datetime.minute));
        let mut hours = Hours::default();
        hours.set_bcd(bin_to_bcd(datetime.hour));
        let mut day = Day::default();
        day.set_day(datetime.day_of_week);
        let mut date = Date::default();
        date.set_bcd(bin_to_bcd(datetime.day));
        let mut month = Month::default();
        month.set_bcd(bin_to_bcd(datetime.month));
        month.set_century(offset >= 100);
        let mut year = Year::default();
        year.set_bcd(bin_to_bcd(offset % 100));

        let raw = DS3231DateTime {
            seconds,
            minutes,
            hours,
            day,
            date,
            month,
            year,
        };
        debug!(
            "encoded {} with base {}: month={} year={}",
            datetime.year,
            year_base,
            u8::from(month),
            u8::from(year)
        );
        Ok(raw)
    }

    fn check_fields(datetime: &DateTime) -> Result<(), DateTimeError> {
        let valid = (1..=12).contains(&datetime.month)
            && (1..=31).contains(&datetime.day)
            && datetime.hour <= 23
            && datetime.minute <= 59
            && datetime.second <= 59
            && datetime.day_of_week <= 7;
        if !valid {
            error!(
                "invalid date/time {}-{}-{} {}:{}:{} day of week {}",
                datetime.year,
                datetime.month,
                datetime.day,
                datetime.hour,
                datetime.minute,
                datetime.second,
                datetime.day_of_week
            );
            return Err(DateTimeError::InvalidDateTime);
        }
        Ok(())
    }

    fn year_offset(year: u16, year_base: u16) -> Result<u8, DateTimeError> {
        if year < year_base {
            error!("year {} is before the year base {}", year, year_base);
            return Err(DateTimeError::YearBeforeBase);
        }
        let offset = year - year_base;
        if offset >= YEAR_WINDOW {
            error!("year {} is past the window of base {}", year, year_base);
            return Err(DateTimeError::YearAfterWindow);
        }
        u8::try_from(offset).map_err(|_| DateTimeError::YearAfterWindow)
    }

    /// Decodes the registers without any calendar validation.
    pub(crate) fn into_datetime(self, year_base: u16) -> DateTime {
        let century: u16 = if self.month.century() { 100 } else { 0 };
        let year = year_base
            .wrapping_add(century)
            .wrapping_add(u16::from(bcd_to_bin(self.year.bcd())));
        DateTime {
            year,
            month: bcd_to_bin(self.month.bcd()),
            day: bcd_to_bin(self.date.bcd()),
            hour: bcd_to_bin(self.hours.bcd()),
            minute: bcd_to_bin(self.minutes.bcd()),
            second: bcd_to_bin(self.seconds.bcd()),
            day_of_week: self.day.day(),
        }
    }
}

impl From<[u8; 7]> for DS3231DateTime {
    fn from(data: [u8; 7]) -> Self {
        DS3231DateTime {
            seconds: Seconds::from(data[0]),
            minutes: Minutes::from(data[1]),
            hours: Hours::from(data[2]),
            day: Day::from(data[3]),
            date: Date::from(data[4]),
            month: Month::from(data[5]),
            year: Year::from(data[6]),
        }
    }
}

impl From<&DS3231DateTime> for [u8; 7] {
    fn from(dt: &DS3231DateTime) -> [u8; 7] {
        [
            u8::from(dt.seconds),
            u8::from(dt.minutes),
            u8::from(dt.hours),
            u8::from(dt.day),
            u8::from(dt.date),
            u8::from(dt.month),
            u8::from(dt.year),
        ]
    }
}
