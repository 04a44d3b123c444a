//! Alarm register packing for the DS3231.
//!
//! Both alarms share one register layout: a BCD value per field plus a
//! don't-care bit (bit 7) that drops the field from the comparison. Alarm 1
//! has seconds, minutes, hours and day/date registers; alarm 2 has no
//! seconds register and always fires at 00 seconds.
//!
//! An [`AlarmMode`] packs the four don't-care bits (bit 0 seconds, bit 1
//! minutes, bit 2 hours, bit 3 day) and the day-of-week select (bit 4) into
//! one value, matching the combinations in the datasheet.

use crate::bcd::{bcd_to_bin, bin_to_bcd};
use crate::{AlarmDayDate, AlarmHours, AlarmMinutes, AlarmSeconds, DateTime, DayDateSelect};

const MASK_SECONDS: u8 = 0b0_0001;
const MASK_MINUTES: u8 = 0b0_0010;
const MASK_HOURS: u8 = 0b0_0100;
const MASK_DAY: u8 = 0b0_1000;
const DAY_OF_WEEK: u8 = 0b1_0000;

/// When an alarm fires.
///
/// `OncePerSecond` and `SecondsMatch` only make sense for alarm 1, and
/// `OncePerMinute` only for alarm 2. Every other mode works for both alarms;
/// alarm 2 ignores the seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmMode {
    /// Every second (alarm 1)
    OncePerSecond,
    /// When the seconds match (alarm 1)
    SecondsMatch,
    /// Every minute at 00 seconds (alarm 2)
    OncePerMinute,
    /// When minutes and seconds match
    MinutesSeconds,
    /// When hours, minutes and seconds match
    HoursMinutesSeconds,
    /// When day of month, hours, minutes and seconds match
    DateHoursMinutesSeconds,
    /// When day of week, hours, minutes and seconds match
    DayHoursMinutesSeconds,
}

impl AlarmMode {
    /// The packed mask bits of this mode.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            AlarmMode::OncePerSecond => 0b0_1111,
            AlarmMode::SecondsMatch | AlarmMode::OncePerMinute => 0b0_1110,
            AlarmMode::MinutesSeconds => 0b0_1100,
            AlarmMode::HoursMinutesSeconds => 0b0_1000,
            AlarmMode::DateHoursMinutesSeconds => 0b0_0000,
            AlarmMode::DayHoursMinutesSeconds => 0b1_0000,
        }
    }

    /// Mode for alarm 1 mask bits, `None` for combinations the chip does not define.
    #[must_use]
    pub const fn from_alarm1_bits(bits: u8) -> Option<Self> {
        match bits {
            0b0_1111 => Some(AlarmMode::OncePerSecond),
            0b0_1110 => Some(AlarmMode::SecondsMatch),
            0b0_1100 => Some(AlarmMode::MinutesSeconds),
            0b0_1000 => Some(AlarmMode::HoursMinutesSeconds),
            0b0_0000 => Some(AlarmMode::DateHoursMinutesSeconds),
            0b1_0000 => Some(AlarmMode::DayHoursMinutesSeconds),
            _ => None,
        }
    }

    /// Mode for alarm 2 mask bits. The seconds bit is ignored.
    #[must_use]
    pub const fn from_alarm2_bits(bits: u8) -> Option<Self> {
        match bits & !MASK_SECONDS {
            0b0_1110 => Some(AlarmMode::OncePerMinute),
            0b0_1100 => Some(AlarmMode::MinutesSeconds),
            0b0_1000 => Some(AlarmMode::HoursMinutesSeconds),
            0b0_0000 => Some(AlarmMode::DateHoursMinutesSeconds),
            0b1_0000 => Some(AlarmMode::DayHoursMinutesSeconds),
            _ => None,
        }
    }

    const fn has(self, bit: u8) -> bool {
        self.bits() & bit != 0
    }
}

/// Register image of one alarm.
///
/// For alarm 2 the seconds register does not exist; it stays at its
/// default and is left out of the transfer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AlarmRegisters {
    seconds: AlarmSeconds,
    minutes: AlarmMinutes,
    hours: AlarmHours,
    day_date: AlarmDayDate,
}

impl AlarmRegisters {
    /// Packs `mode` and the matching fields of `datetime`.
    ///
    /// For [`AlarmMode::DayHoursMinutesSeconds`] the day register holds
    /// `day_of_week + 1` with DY/DT set, otherwise it holds the day of the
    /// month.
    #[must_use]
    pub fn new(mode: AlarmMode, datetime: &DateTime) -> Self {
        let mut seconds = AlarmSeconds::default();
        seconds.set_bcd(bin_to_bcd(datetime.second));
        seconds.set_masked(mode.has(MASK_SECONDS));

        let mut minutes = AlarmMinutes::default();
        minutes.set_bcd(bin_to_bcd(datetime.minute));
        minutes.set_masked(mode.has(MASK_MINUTES));

        let mut hours = AlarmHours::default();
        hours.set_bcd(bin_to_bcd(datetime.hour));
        hours.set_masked(mode.has(MASK_HOURS));

        let mut day_date = AlarmDayDate::default();
        if mode.has(DAY_OF_WEEK) {
            day_date.set_bcd(bin_to_bcd(datetime.day_of_week.wrapping_add(1)));
            day_date.set_day_date_select(DayDateSelect::Day);
        } else {
            day_date.set_bcd(bin_to_bcd(datetime.day));
        }
        day_date.set_masked(mode.has(MASK_DAY));

        AlarmRegisters {
            seconds,
            minutes,
            hours,
            day_date,
        }
    }

    /// Register values for alarm 1, starting at `Alarm1Seconds`.
    #[must_use]
    pub fn alarm1_bytes(&self) -> [u8; 4] {
        [
            u8::from(self.seconds),
            u8::from(self.minutes),
            u8::from(self.hours),
            u8::from(self.day_date),
        ]
    }

    /// Register values for alarm 2, starting at `Alarm2Minutes`.
    #[must_use]
    pub fn alarm2_bytes(&self) -> [u8; 3] {
        [u8::from(self.minutes), u8::from(self.hours), u8::from(self.day_date)]
    }

    #[must_use]
    pub fn from_alarm1_bytes(data: [u8; 4]) -> Self {
        AlarmRegisters {
            seconds: AlarmSeconds::from(data[0]),
            minutes: AlarmMinutes::from(data[1]),
            hours: AlarmHours::from(data[2]),
            day_date: AlarmDayDate::from(data[3]),
        }
    }

    #[must_use]
    pub fn from_alarm2_bytes(data: [u8; 3]) -> Self {
        AlarmRegisters {
            seconds: AlarmSeconds::default(),
            minutes: AlarmMinutes::from(data[0]),
            hours: AlarmHours::from(data[1]),
            day_date: AlarmDayDate::from(data[2]),
        }
    }

    /// Mask bits as stored, in [`AlarmMode::bits`] layout.
    #[must_use]
    pub fn mask_bits(&self) -> u8 {
        let mut bits = 0;
        if self.seconds.masked() {
            bits |= MASK_SECONDS;
        }
        if self.minutes.masked() {
            bits |= MASK_MINUTES;
        }
        if self.hours.masked() {
            bits |= MASK_HOURS;
        }
        if self.day_date.masked() {
            bits |= MASK_DAY;
        }
        if self.day_date.day_date_select() == DayDateSelect::Day {
            bits |= DAY_OF_WEEK;
        }
        bits
    }

    /// Mode of these registers read as alarm 1.
    #[must_use]
    pub fn alarm1_mode(&self) -> Option<AlarmMode> {
        AlarmMode::from_alarm1_bits(self.mask_bits())
    }

    /// Mode of these registers read as alarm 2.
    #[must_use]
    pub fn alarm2_mode(&self) -> Option<AlarmMode> {
        AlarmMode::from_alarm2_bits(self.mask_bits())
    }

    #[must_use]
    pub fn second(&self) -> u8 {
        bcd_to_bin(self.seconds.bcd())
    }

    #[must_use]
    pub fn minute(&self) -> u8 {
        bcd_to_bin(self.minutes.bcd())
    }

    #[must_use]
    pub fn hour(&self) -> u8 {
        bcd_to_bin(self.hours.bcd())
    }

    /// Day of month, or day of week counted from 1 when DY/DT is set.
    #[must_use]
    pub fn day(&self) -> u8 {
        bcd_to_bin(self.day_date.bcd())
    }

    #[must_use]
    pub fn day_date_select(&self) -> DayDateSelect {
        self.day_date.day_date_select()
    }

    /// Gets the alarm seconds register
    #[must_use]
    pub fn seconds_register(&self) -> AlarmSeconds {
        self.seconds
    }

    /// Gets the alarm minutes register
    #[must_use]
    pub fn minutes_register(&self) -> AlarmMinutes {
        self.minutes
    }

    /// Gets the alarm hours register
    #[must_use]
    pub fn hours_register(&self) -> AlarmHours {
        self.hours
    }

    /// Gets the alarm day/date register
    #[must_use]
    pub fn day_date_register(&self) -> AlarmDayDate {
        self.day_date
    }
}
