//! A register-level driver for the DS3231 real-time clock.
//!
//! The driver translates clock operations into batched register transfers
//! and converts between the chip's BCD register layout and a plain
//! [`DateTime`] value. It covers date/time, oscillator control, both alarms,
//! the INT/SQW pin mode and the temperature sensor.
//!
//! The two digit year register plus the century bit cover 200 years counted
//! from a configurable year base (2000 by default).
//!
//! ```rust,ignore
//! use ds3231_regs::{AlarmMode, DateTime, IntPinMode, DS3231};
//!
//! let mut rtc = DS3231::new(i2c);
//! if !rtc.is_running()? {
//!     rtc.set_datetime(&DateTime { year: 2024, month: 12, day: 20, hour: 14,
//!                                  minute: 30, second: 0, day_of_week: 5 })?;
//!     rtc.enable_oscillator()?;
//! }
//! rtc.set_alarm1(AlarmMode::HoursMinutesSeconds, &alarm_time)?;
//! rtc.set_int_pin_mode(IntPinMode::Alarm1)?;
//! if rtc.is_alarm1_set()? {
//!     // the flag is cleared again
//! }
//! ```
//!
//! # Features
//!
//! - `async`: adds [`asynch::DS3231`] on top of `embedded-hal-async`
//! - `log`: log through the `log` crate
//! - `defmt`: log through `defmt` and derive `defmt::Format`
#![no_std]

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        macro_rules! debug { ($($arg:tt)*) => { defmt::debug!($($arg)*) }; }
        macro_rules! warn { ($($arg:tt)*) => { defmt::warn!($($arg)*) }; }
        macro_rules! error { ($($arg:tt)*) => { defmt::error!($($arg)*) }; }
    } else if #[cfg(feature = "log")] {
        macro_rules! debug { ($($arg:tt)*) => { log::debug!($($arg)*) }; }
        macro_rules! warn { ($($arg:tt)*) => { log::warn!($($arg)*) }; }
        macro_rules! error { ($($arg:tt)*) => { log::error!($($arg)*) }; }
    } else {
        macro_rules! debug { ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }}; }
        macro_rules! warn { ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }}; }
        macro_rules! error { ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }}; }
    }
}

pub mod alarm;
#[cfg(feature = "async")]
pub mod asynch;
pub mod bcd;
pub mod bus;
pub mod datetime;
pub mod registers;

use chrono::NaiveDateTime;
use embedded_hal::i2c::I2c;
use paste::paste;

pub use crate::alarm::{AlarmMode, AlarmRegisters};
pub use crate::bus::{BitOperation, BitResult, RegisterChip};
pub use crate::datetime::{DateTime, DateTimeError};
use crate::datetime::DS3231DateTime;
pub use crate::registers::*;

/// Year base used by [`DS3231::new`].
pub const DEFAULT_YEAR_BASE: u16 = 2000;

/// Driver configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// First year of the 200 year window stored by the chip.
    pub year_base: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            year_base: DEFAULT_YEAR_BASE,
        }
    }
}

/// Errors reported by the driver.
#[derive(Debug)]
pub enum DS3231Error<I2CE> {
    /// Communication with the chip failed
    I2c(I2CE),
    /// The date/time could not be encoded or decoded; no transfer was made
    /// when encoding failed
    DateTime(DateTimeError),
    /// A register block write was longer than the register file; no
    /// transfer was made
    BlockTooLong,
}

impl<I2CE> From<I2CE> for DS3231Error<I2CE> {
    fn from(e: I2CE) -> Self {
        DS3231Error::I2c(e)
    }
}

/// DS3231 Real-Time Clock driver on a blocking I2C bus.
///
/// Every call is one or more complete bus transfers; nothing read from the
/// chip is cached. The only local state is the year base.
pub struct DS3231<I2C> {
    bus: RegisterChip<I2C>,
    year_base: u16,
}

impl<I2C> DS3231<I2C> {
    /// Creates a driver with the default year base 2000.
    pub fn new(i2c: I2C) -> Self {
        Self::with_config(i2c, &Config::default())
    }

    /// Creates a driver with a custom configuration. No bus transfer is made.
    pub fn with_config(i2c: I2C, config: &Config) -> Self {
        Self {
            bus: RegisterChip::new(i2c, DEVICE_ADDRESS),
            year_base: config.year_base,
        }
    }

    /// First year of the window stored by the chip.
    pub fn year_base(&self) -> u16 {
        self.year_base
    }

    /// Low level register access to the chip.
    pub fn bus(&mut self) -> &mut RegisterChip<I2C> {
        &mut self.bus
    }

    /// Releases the I2C bus.
    pub fn release(self) -> I2C {
        self.bus.release()
    }
}

impl<I2C: I2c> DS3231<I2C> {
    /// Reads the current date and time.
    ///
    /// The 7 time registers are read in one transfer. Reserved bits are
    /// masked, the values are not validated.
    pub fn datetime(&mut self) -> Result<DateTime, DS3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.bus.read_registers(RegAddr::Seconds, &mut data)?;
        Ok(DS3231DateTime::from(data).into_datetime(self.year_base))
    }

    /// Sets the date and time.
    ///
    /// # Errors
    /// `DS3231Error::DateTime` without touching the bus if the year is
    /// outside `year_base..year_base + 200` or another field is out of range.
    pub fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), DS3231Error<I2C::Error>> {
        let raw = DS3231DateTime::from_datetime(datetime, self.year_base)
            .map_err(DS3231Error::DateTime)?;
        let data: [u8; 7] = (&raw).into();
        self.bus.write_registers(RegAddr::Seconds, &data)?;
        Ok(())
    }

    /// Reads the date and time as a validated chrono value.
    pub fn naive_datetime(&mut self) -> Result<NaiveDateTime, DS3231Error<I2C::Error>> {
        let datetime = self.datetime()?;
        NaiveDateTime::try_from(datetime).map_err(DS3231Error::DateTime)
    }

    /// Sets the date and time from a chrono value.
    pub fn set_naive_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let datetime = DateTime::try_from(datetime).map_err(DS3231Error::DateTime)?;
        self.set_datetime(&datetime)
    }

    /// Checks if the clock is running.
    ///
    /// `false` means the oscillator stopped at some point (usually a power
    /// loss) or is disabled; the time must be set again and the oscillator
    /// enabled with [`Self::enable_oscillator`].
    pub fn is_running(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        if self
            .bus
            .test_bits(RegAddr::ControlStatus, Status::OSF)?
            .is_set()
        {
            debug!("DS3231: oscillator stop flag set");
            return Ok(false);
        }
        let eosc = self.bus.test_bits(RegAddr::Control, Control::EOSC)?;
        Ok(eosc == BitResult::Zero)
    }

    /// Enables the oscillator and clears the oscillator stop flag.
    pub fn enable_oscillator(&mut self) -> Result<(), DS3231Error<I2C::Error>> {
        self.bus
            .change_bits(RegAddr::Control, Control::EOSC, BitOperation::Clear)?;
        self.bus
            .change_bits(RegAddr::ControlStatus, Status::OSF, BitOperation::Clear)?;
        Ok(())
    }

    /// Sets alarm 1 from the seconds, minutes, hours and day (of month, or of
    /// week for [`AlarmMode::DayHoursMinutesSeconds`]) of `datetime`.
    pub fn set_alarm1(
        &mut self,
        mode: AlarmMode,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = AlarmRegisters::new(mode, datetime);
        debug!("DS3231: alarm 1 mode bits {}", mode.bits());
        self.bus
            .write_registers(RegAddr::Alarm1Seconds, &alarm.alarm1_bytes())?;
        Ok(())
    }

    /// Sets alarm 2. Like [`Self::set_alarm1`] but the seconds are not used.
    pub fn set_alarm2(
        &mut self,
        mode: AlarmMode,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = AlarmRegisters::new(mode, datetime);
        debug!("DS3231: alarm 2 mode bits {}", mode.bits());
        self.bus
            .write_registers(RegAddr::Alarm2Minutes, &alarm.alarm2_bytes())?;
        Ok(())
    }

    /// Reads back the alarm 1 registers.
    pub fn alarm1(&mut self) -> Result<AlarmRegisters, DS3231Error<I2C::Error>> {
        let mut data = [0; 4];
        self.bus.read_registers(RegAddr::Alarm1Seconds, &mut data)?;
        Ok(AlarmRegisters::from_alarm1_bytes(data))
    }

    /// Reads back the alarm 2 registers.
    pub fn alarm2(&mut self) -> Result<AlarmRegisters, DS3231Error<I2C::Error>> {
        let mut data = [0; 3];
        self.bus.read_registers(RegAddr::Alarm2Minutes, &mut data)?;
        Ok(AlarmRegisters::from_alarm2_bytes(data))
    }

    /// Checks if alarm 1 fired, clearing the flag if it did.
    ///
    /// A failure while clearing the flag is logged but not returned.
    pub fn is_alarm1_set(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        self.take_alarm_flag(Status::A1F)
    }

    /// Checks if alarm 2 fired, clearing the flag if it did.
    ///
    /// A failure while clearing the flag is logged but not returned.
    pub fn is_alarm2_set(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        self.take_alarm_flag(Status::A2F)
    }

    fn take_alarm_flag(&mut self, flag: u8) -> Result<bool, DS3231Error<I2C::Error>> {
        let is_set = self.bus.test_bits(RegAddr::ControlStatus, flag)?.is_set();
        if is_set
            && self
                .bus
                .change_bits(RegAddr::ControlStatus, flag, BitOperation::Clear)
                .is_err()
        {
            warn!("DS3231: failed to clear alarm flag {}", flag);
        }
        Ok(is_set)
    }

    /// Sets the function of the INT/SQW pin.
    pub fn set_int_pin_mode(&mut self, mode: IntPinMode) -> Result<(), DS3231Error<I2C::Error>> {
        self.bus
            .write_bits(RegAddr::Control, IntPinMode::MASK, mode.bits())?;
        Ok(())
    }

    /// Reads the temperature in degrees celsius (0.25 resolution).
    pub fn temperature(&mut self) -> Result<f32, DS3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.bus.read_registers(RegAddr::MSBTemp, &mut data)?;
        Ok(TemperatureSample::from(data).celsius())
    }

    /// Reads all registers in one transfer, for debugging.
    pub fn register_dump(&mut self) -> Result<RegisterDump, DS3231Error<I2C::Error>> {
        let mut data = [0; REGISTER_COUNT];
        self.bus.read_registers(RegAddr::Seconds, &mut data)?;
        Ok(RegisterDump::from(data))
    }
}

// Single register accessors
macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS3231<I2C> {
            $(
                paste! {
                    #[doc = concat!("Reads the ", stringify!($name), " register.")]
                    pub fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                        Ok(<$typ>::from(self.bus.read_register($regaddr)?))
                    }

                    #[doc = concat!("Writes the ", stringify!($name), " register.")]
                    pub fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                        self.bus.write_register($regaddr, value.into())?;
                        Ok(())
                    }
                }
            )+
        }
    }
}

impl_register_access!(
    (control, RegAddr::Control, Control),
    (status, RegAddr::ControlStatus, Status),
    (aging_offset, RegAddr::AgingOffset, AgingOffset)
);
