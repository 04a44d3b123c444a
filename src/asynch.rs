//! Async implementation of the DS3231 driver.
//!
//! Same operations and register traffic as the blocking [`crate::DS3231`],
//! on top of the `embedded-hal-async` I2C trait. Only available with the
//! `async` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use ds3231_regs::asynch::DS3231;
//!
//! let mut rtc = DS3231::new(i2c);
//! if !rtc.is_running().await? {
//!     rtc.enable_oscillator().await?;
//! }
//! let datetime = rtc.datetime().await?;
//! ```

use chrono::NaiveDateTime;
use embedded_hal_async::i2c::I2c;
use paste::paste;

use crate::bus::{frame, merge_bits, MAX_FRAME};
use crate::datetime::DS3231DateTime;
use crate::{
    AgingOffset, AlarmMode, AlarmRegisters, BitOperation, BitResult, Config, Control, DS3231Error,
    DateTime, IntPinMode, RegAddr, RegisterDump, Status, TemperatureSample, DEVICE_ADDRESS,
    REGISTER_COUNT,
};

/// A chip on an async I2C bus, addressed by register.
///
/// See [`crate::RegisterChip`] for the semantics of each operation.
pub struct RegisterChip<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterChip<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// 7-bit address of the chip.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the underlying bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterChip<I2C> {
    /// Reads `data.len()` consecutive registers starting at `start`.
    pub async fn read_registers(
        &mut self,
        start: RegAddr,
        data: &mut [u8],
    ) -> Result<(), DS3231Error<I2C::Error>> {
        self.i2c
            .write_read(self.address, &[u8::from(start)], data)
            .await?;
        Ok(())
    }

    /// Writes `data` into consecutive registers starting at `start`, in one frame.
    ///
    /// # Errors
    /// `DS3231Error::BlockTooLong` without any transfer if `data` is longer
    /// than the register file.
    pub async fn write_registers(
        &mut self,
        start: RegAddr,
        data: &[u8],
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let mut buf = [0; MAX_FRAME];
        let Some(frame) = frame(&mut buf, start, data) else {
            return Err(DS3231Error::BlockTooLong);
        };
        self.i2c.write(self.address, frame).await?;
        Ok(())
    }

    pub async fn read_register(&mut self, reg: RegAddr) -> Result<u8, DS3231Error<I2C::Error>> {
        let mut data = [0];
        self.read_registers(reg, &mut data).await?;
        Ok(data[0])
    }

    pub async fn write_register(
        &mut self,
        reg: RegAddr,
        value: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        self.i2c.write(self.address, &[u8::from(reg), value]).await?;
        Ok(())
    }

    /// Tests whether all bits of `mask` are set in `reg`.
    pub async fn test_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
    ) -> Result<BitResult, DS3231Error<I2C::Error>> {
        let value = self.read_register(reg).await?;
        Ok(BitResult::test(value, mask))
    }

    /// Sets or clears the bits of `mask` in `reg`.
    pub async fn change_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
        operation: BitOperation,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let value = self.read_register(reg).await?;
        self.write_register(reg, operation.apply(value, mask)).await
    }

    /// Replaces the bits of `mask` in `reg` with the same bits of `value`.
    pub async fn write_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
        value: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let old = self.read_register(reg).await?;
        self.write_register(reg, merge_bits(old, mask, value)).await
    }
}

/// DS3231 Real-Time Clock async driver.
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
    /// Reads the current date and time, without validation.
    pub async fn datetime(&mut self) -> Result<DateTime, DS3231Error<I2C::Error>> {
        let mut data = [0; 7];
        self.bus.read_registers(RegAddr::Seconds, &mut data).await?;
        Ok(DS3231DateTime::from(data).into_datetime(self.year_base))
    }

    /// Sets the date and time.
    ///
    /// # Errors
    /// `DS3231Error::DateTime` without touching the bus if the year is
    /// outside `year_base..year_base + 200` or another field is out of range.
    pub async fn set_datetime(
        &mut self,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let raw = DS3231DateTime::from_datetime(datetime, self.year_base)
            .map_err(DS3231Error::DateTime)?;
        let data: [u8; 7] = (&raw).into();
        self.bus.write_registers(RegAddr::Seconds, &data).await?;
        Ok(())
    }

    /// Reads the date and time as a validated chrono value.
    pub async fn naive_datetime(&mut self) -> Result<NaiveDateTime, DS3231Error<I2C::Error>> {
        let datetime = self.datetime().await?;
        NaiveDateTime::try_from(datetime).map_err(DS3231Error::DateTime)
    }

    /// Sets the date and time from a chrono value.
    pub async fn set_naive_datetime(
        &mut self,
        datetime: &NaiveDateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let datetime = DateTime::try_from(datetime).map_err(DS3231Error::DateTime)?;
        self.set_datetime(&datetime).await
    }

    /// Checks if the clock is running: oscillator enabled and no stop flag.
    pub async fn is_running(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        if self
            .bus
            .test_bits(RegAddr::ControlStatus, Status::OSF)
            .await?
            .is_set()
        {
            debug!("DS3231: oscillator stop flag set");
            return Ok(false);
        }
        let eosc = self.bus.test_bits(RegAddr::Control, Control::EOSC).await?;
        Ok(eosc == BitResult::Zero)
    }

    /// Enables the oscillator and clears the oscillator stop flag.
    pub async fn enable_oscillator(&mut self) -> Result<(), DS3231Error<I2C::Error>> {
        self.bus
            .change_bits(RegAddr::Control, Control::EOSC, BitOperation::Clear)
            .await?;
        self.bus
            .change_bits(RegAddr::ControlStatus, Status::OSF, BitOperation::Clear)
            .await?;
        Ok(())
    }

    /// Sets alarm 1 from the seconds, minutes, hours and day of `datetime`.
    pub async fn set_alarm1(
        &mut self,
        mode: AlarmMode,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = AlarmRegisters::new(mode, datetime);
        self.bus
            .write_registers(RegAddr::Alarm1Seconds, &alarm.alarm1_bytes())
            .await?;
        Ok(())
    }

    /// Sets alarm 2. Like [`Self::set_alarm1`] but the seconds are not used.
    pub async fn set_alarm2(
        &mut self,
        mode: AlarmMode,
        datetime: &DateTime,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let alarm = AlarmRegisters::new(mode, datetime);
        self.bus
            .write_registers(RegAddr::Alarm2Minutes, &alarm.alarm2_bytes())
            .await?;
        Ok(())
    }

    /// Reads back the alarm 1 registers.
    pub async fn alarm1(&mut self) -> Result<AlarmRegisters, DS3231Error<I2C::Error>> {
        let mut data = [0; 4];
        self.bus
            .read_registers(RegAddr::Alarm1Seconds, &mut data)
            .await?;
        Ok(AlarmRegisters::from_alarm1_bytes(data))
    }

    /// Reads back the alarm 2 registers.
    pub async fn alarm2(&mut self) -> Result<AlarmRegisters, DS3231Error<I2C::Error>> {
        let mut data = [0; 3];
        self.bus
            .read_registers(RegAddr::Alarm2Minutes, &mut data)
            .await?;
        Ok(AlarmRegisters::from_alarm2_bytes(data))
    }

    /// Checks if alarm 1 fired, clearing the flag if it did.
    pub async fn is_alarm1_set(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        self.take_alarm_flag(Status::A1F).await
    }

    /// Checks if alarm 2 fired, clearing the flag if it did.
    pub async fn is_alarm2_set(&mut self) -> Result<bool, DS3231Error<I2C::Error>> {
        self.take_alarm_flag(Status::A2F).await
    }

    async fn take_alarm_flag(&mut self, flag: u8) -> Result<bool, DS3231Error<I2C::Error>> {
        let is_set = self
            .bus
            .test_bits(RegAddr::ControlStatus, flag)
            .await?
            .is_set();
        if is_set
            && self
                .bus
                .change_bits(RegAddr::ControlStatus, flag, BitOperation::Clear)
                .await
                .is_err()
        {
            warn!("DS3231: failed to clear alarm flag {}", flag);
        }
        Ok(is_set)
    }

    /// Sets the function of the INT/SQW pin.
    pub async fn set_int_pin_mode(
        &mut self,
        mode: IntPinMode,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        self.bus
            .write_bits(RegAddr::Control, IntPinMode::MASK, mode.bits())
            .await?;
        Ok(())
    }

    /// Reads the temperature in degrees celsius (0.25 resolution).
    pub async fn temperature(&mut self) -> Result<f32, DS3231Error<I2C::Error>> {
        let mut data = [0; 2];
        self.bus.read_registers(RegAddr::MSBTemp, &mut data).await?;
        Ok(TemperatureSample::from(data).celsius())
    }

    /// Reads all registers in one transfer, for debugging.
    pub async fn register_dump(&mut self) -> Result<RegisterDump, DS3231Error<I2C::Error>> {
        let mut data = [0; REGISTER_COUNT];
        self.bus.read_registers(RegAddr::Seconds, &mut data).await?;
        Ok(RegisterDump::from(data))
    }
}

macro_rules! impl_register_access {
    ($(($name:ident, $regaddr:expr, $typ:ty)),+) => {
        impl<I2C: I2c> DS3231<I2C> {
            $(
                paste! {
                    #[doc = concat!("Reads the ", stringify!($name), " register.")]
                    pub async fn $name(&mut self) -> Result<$typ, DS3231Error<I2C::Error>> {
                        Ok(<$typ>::from(self.bus.read_register($regaddr).await?))
                    }

                    #[doc = concat!("Writes the ", stringify!($name), " register.")]
                    pub async fn [<set_ $name>](&mut self, value: $typ) -> Result<(), DS3231Error<I2C::Error>> {
                        self.bus.write_register($regaddr, value.into()).await?;
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

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::DateTimeError;
    use alloc::vec;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    fn setup(expectations: &[I2cTrans]) -> DS3231<I2cMock> {
        DS3231::new(I2cMock::new(expectations))
    }

    fn read(reg: RegAddr, data: &[u8]) -> I2cTrans {
        I2cTrans::write_read(DEVICE_ADDRESS, vec![reg as u8], data.to_vec())
    }

    fn write(reg: RegAddr, data: &[u8]) -> I2cTrans {
        let mut bytes = vec![reg as u8];
        bytes.extend_from_slice(data);
        I2cTrans::write(DEVICE_ADDRESS, bytes)
    }

    fn sample_datetime() -> DateTime {
        DateTime {
            year: 2024,
            month: 3,
            day: 14,
            hour: 15,
            minute: 30,
            second: 0,
            day_of_week: 4,
        }
    }

    #[tokio::test]
    async fn test_async_datetime_round_trip() {
        let registers = [0x00, 0x30, 0x15, 0x04, 0x14, 0x03, 0x24];
        let mut dev = setup(&[
            write(RegAddr::Seconds, &registers),
            read(RegAddr::Seconds, &registers),
        ]);
        dev.set_datetime(&sample_datetime()).await.unwrap();
        assert_eq!(dev.datetime().await.unwrap(), sample_datetime());
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_set_datetime_out_of_window() {
        let mut dev = setup(&[]);
        let mut dt = sample_datetime();
        dt.year = 1999;
        assert!(matches!(
            dev.set_datetime(&dt).await,
            Err(DS3231Error::DateTime(DateTimeError::YearBeforeBase))
        ));
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_set_datetime_invalid_fields() {
        let mut dev = setup(&[]);
        let dt = DateTime {
            minute: 80,
            ..sample_datetime()
        };
        assert!(matches!(
            dev.set_datetime(&dt).await,
            Err(DS3231Error::DateTime(DateTimeError::InvalidDateTime))
        ));
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_oversized_bus_write() {
        let mut dev = setup(&[]);
        assert!(matches!(
            dev.bus()
                .write_registers(RegAddr::Seconds, &[0; REGISTER_COUNT + 1])
                .await,
            Err(DS3231Error::BlockTooLong)
        ));
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_is_running() {
        let mut dev = setup(&[
            read(RegAddr::ControlStatus, &[0x80]),
            read(RegAddr::ControlStatus, &[0x00]),
            read(RegAddr::Control, &[0x1C]),
        ]);
        assert!(!dev.is_running().await.unwrap());
        assert!(dev.is_running().await.unwrap());
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_enable_oscillator() {
        let mut dev = setup(&[
            read(RegAddr::Control, &[0x9C]),
            write(RegAddr::Control, &[0x1C]),
            read(RegAddr::ControlStatus, &[0x80]),
            write(RegAddr::ControlStatus, &[0x00]),
        ]);
        dev.enable_oscillator().await.unwrap();
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_alarms() {
        let mut dev = setup(&[
            write(RegAddr::Alarm1Seconds, &[0x00, 0x30, 0x15, 0x94]),
            write(RegAddr::Alarm2Minutes, &[0x30, 0x95, 0x94]),
            read(RegAddr::ControlStatus, &[0x01]),
            read(RegAddr::ControlStatus, &[0x01]),
            write(RegAddr::ControlStatus, &[0x00]),
            read(RegAddr::ControlStatus, &[0x00]),
        ]);
        dev.set_alarm1(AlarmMode::HoursMinutesSeconds, &sample_datetime())
            .await
            .unwrap();
        dev.set_alarm2(AlarmMode::MinutesSeconds, &sample_datetime())
            .await
            .unwrap();
        assert!(dev.is_alarm1_set().await.unwrap());
        assert!(!dev.is_alarm2_set().await.unwrap());
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_read_back_alarm() {
        let mut dev = setup(&[read(RegAddr::Alarm2Minutes, &[0x30, 0x15, 0x44])]);
        let alarm = dev.alarm2().await.unwrap();
        assert_eq!(alarm.alarm2_mode(), Some(AlarmMode::DayHoursMinutesSeconds));
        assert_eq!(alarm.day(), 4);
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_int_pin_and_temperature() {
        let mut dev = setup(&[
            read(RegAddr::Control, &[0x1C]),
            write(RegAddr::Control, &[0x18]),
            read(RegAddr::MSBTemp, &[0x19, 0x80]),
        ]);
        dev.set_int_pin_mode(IntPinMode::SquareWave8192Hz)
            .await
            .unwrap();
        assert_eq!(dev.temperature().await.unwrap(), 25.5);
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_bus_error() {
        let mut dev = setup(&[read(RegAddr::MSBTemp, &[0, 0]).with_error(ErrorKind::Other)]);
        assert!(matches!(
            dev.temperature().await,
            Err(DS3231Error::I2c(ErrorKind::Other))
        ));
        dev.release().done();
    }

    #[tokio::test]
    async fn test_async_register_access() {
        let mut dev = setup(&[
            read(RegAddr::Control, &[0x1C]),
            write(RegAddr::Control, &[0x1C]),
            read(RegAddr::Seconds, &[0; REGISTER_COUNT]),
        ]);
        let control = dev.control().await.unwrap();
        dev.set_control(control).await.unwrap();
        let dump = dev.register_dump().await.unwrap();
        assert_eq!(dump.value(RegAddr::Year), 0);
        dev.release().done();
    }
}
