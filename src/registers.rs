//! Register map and bitfield views for the DS3231 RTC.
//!
//! Every register the driver touches has a bitfield wrapper here so the
//! offset and width of each field is spelled out once. The codecs in
//! [`crate::datetime`] and [`crate::alarm`] build on these types.

use core::fmt;

use bitfield::bitfield;

/// 7-bit I2C address of the DS3231.
pub const DEVICE_ADDRESS: u8 = 0x68;

/// Number of registers in the chip (0x00 to 0x12).
pub const REGISTER_COUNT: usize = 0x13;

/// Register addresses for the DS3231 RTC.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegAddr {
    /// Seconds register (0-59)
    Seconds = 0x00,
    /// Minutes register (0-59)
    Minutes = 0x01,
    /// Hours register (0-23)
    Hours = 0x02,
    /// Day of week register
    Day = 0x03,
    /// Day of month register (1-31)
    Date = 0x04,
    /// Month register (1-12) with century bit
    Month = 0x05,
    /// Year register (0-99)
    Year = 0x06,
    /// Alarm 1 seconds register
    Alarm1Seconds = 0x07,
    /// Alarm 1 minutes register
    Alarm1Minutes = 0x08,
    /// Alarm 1 hours register
    Alarm1Hours = 0x09,
    /// Alarm 1 day/date register
    Alarm1DayDate = 0x0A,
    /// Alarm 2 minutes register
    Alarm2Minutes = 0x0B,
    /// Alarm 2 hours register
    Alarm2Hours = 0x0C,
    /// Alarm 2 day/date register
    Alarm2DayDate = 0x0D,
    /// Control register
    Control = 0x0E,
    /// Control/Status register
    ControlStatus = 0x0F,
    /// Aging offset register
    AgingOffset = 0x10,
    /// Temperature MSB register
    MSBTemp = 0x11,
    /// Temperature LSB register
    LSBTemp = 0x12,
}

impl From<RegAddr> for u8 {
    fn from(reg: RegAddr) -> Self {
        reg as u8
    }
}

/// Oscillator control (EOSC bit, active low).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oscillator {
    /// Oscillator runs on battery power
    Enabled = 0,
    /// Oscillator stops when switched to battery power
    Disabled = 1,
}
impl From<u8> for Oscillator {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => Oscillator::Enabled,
            1 => Oscillator::Disabled,
            _ => panic!("Invalid value for Oscillator: {}", v),
        }
    }
}
impl From<Oscillator> for u8 {
    fn from(v: Oscillator) -> Self {
        v as u8
    }
}

/// INT/SQW pin function (INTCN bit).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptControl {
    /// Output square wave on INT/SQW pin
    SquareWave = 0,
    /// Output interrupt signal on INT/SQW pin
    Interrupt = 1,
}
impl From<u8> for InterruptControl {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => InterruptControl::SquareWave,
            1 => InterruptControl::Interrupt,
            _ => panic!("Invalid value for InterruptControl: {}", v),
        }
    }
}
impl From<InterruptControl> for u8 {
    fn from(v: InterruptControl) -> Self {
        v as u8
    }
}

/// Square wave output frequency (RS2/RS1 bits).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SquareWaveFrequency {
    /// 1 Hz
    Hz1 = 0b00,
    /// 1.024 kHz
    Hz1024 = 0b01,
    /// 4.096 kHz
    Hz4096 = 0b10,
    /// 8.192 kHz
    Hz8192 = 0b11,
}
impl From<u8> for SquareWaveFrequency {
    /// # Panics
    /// Panics if the value does not fit in two bits.
    fn from(v: u8) -> Self {
        match v {
            0b00 => SquareWaveFrequency::Hz1,
            0b01 => SquareWaveFrequency::Hz1024,
            0b10 => SquareWaveFrequency::Hz4096,
            0b11 => SquareWaveFrequency::Hz8192,
            _ => panic!("Invalid value for SquareWaveFrequency: {}", v),
        }
    }
}
impl From<SquareWaveFrequency> for u8 {
    fn from(v: SquareWaveFrequency) -> Self {
        v as u8
    }
}

/// Day/Date select for the alarm day register (DY/DT bit).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayDateSelect {
    /// Match against the day of the month
    Date = 0,
    /// Match against the day of the week
    Day = 1,
}
impl From<u8> for DayDateSelect {
    /// # Panics
    /// Panics if the value is not 0 or 1.
    fn from(v: u8) -> Self {
        match v {
            0 => DayDateSelect::Date,
            1 => DayDateSelect::Day,
            _ => panic!("Invalid value for DayDateSelect: {}", v),
        }
    }
}
impl From<DayDateSelect> for u8 {
    fn from(v: DayDateSelect) -> Self {
        v as u8
    }
}

// Generates the From<u8> and Into<u8> implementations for a register type
macro_rules! from_register_u8 {
    ($typ:ty) => {
        impl From<u8> for $typ {
            fn from(v: u8) -> Self {
                paste::paste!([< $typ >](v))
            }
        }
        impl From<$typ> for u8 {
            fn from(v: $typ) -> Self {
                v.0
            }
        }
    };
}

bitfield! {
    /// Seconds register, BCD in bits 6..0.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Seconds(u8);
    impl Debug;
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(Seconds);

bitfield! {
    /// Minutes register, BCD in bits 6..0.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Minutes(u8);
    impl Debug;
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(Minutes);

bitfield! {
    /// Hours register. The driver always writes 24-hour BCD in bits 5..0.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Hours(u8);
    impl Debug;
    /// 12-hour mode select
    pub twelve_hour, set_twelve_hour: 6;
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(Hours);

bitfield! {
    /// Day of week register. Plain binary, not BCD.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Day(u8);
    impl Debug;
    pub day, set_day: 2, 0;
}
from_register_u8!(Day);

bitfield! {
    /// Day of month register, BCD in bits 5..0.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Date(u8);
    impl Debug;
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(Date);

bitfield! {
    /// Month register, BCD in bits 4..0 and the century bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Month(u8);
    impl Debug;
    /// Set when the year is in the second century after the year base
    pub century, set_century: 7;
    pub bcd, set_bcd: 4, 0;
}
from_register_u8!(Month);

bitfield! {
    /// Two digit year register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Year(u8);
    impl Debug;
    pub bcd, set_bcd: 7, 0;
}
from_register_u8!(Year);

bitfield! {
    /// Control register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Control(u8);
    impl Debug;
    /// Oscillator enable (EOSC, active low)
    pub from into Oscillator, oscillator_enable, set_oscillator_enable: 7, 7;
    /// Battery backed square wave (BBSQW)
    pub battery_backed_square_wave, set_battery_backed_square_wave: 6;
    /// Force temperature conversion (CONV)
    pub convert_temperature, set_convert_temperature: 5;
    /// Square wave rate (RS2/RS1)
    pub from into SquareWaveFrequency, square_wave_frequency, set_square_wave_frequency: 4, 3;
    /// INT/SQW pin function (INTCN)
    pub from into InterruptControl, interrupt_control, set_interrupt_control: 2, 2;
    /// Alarm 2 interrupt enable (A2IE)
    pub alarm2_interrupt_enable, set_alarm2_interrupt_enable: 1;
    /// Alarm 1 interrupt enable (A1IE)
    pub alarm1_interrupt_enable, set_alarm1_interrupt_enable: 0;
}
from_register_u8!(Control);

impl Control {
    pub const A1IE: u8 = 1 << 0;
    pub const A2IE: u8 = 1 << 1;
    pub const INTCN: u8 = 1 << 2;
    pub const RS1: u8 = 1 << 3;
    pub const RS2: u8 = 1 << 4;
    pub const CONV: u8 = 1 << 5;
    pub const BBSQW: u8 = 1 << 6;
    pub const EOSC: u8 = 1 << 7;
}

bitfield! {
    /// Control/Status register.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Status(u8);
    impl Debug;
    /// Oscillator stop flag (OSF)
    pub oscillator_stop_flag, set_oscillator_stop_flag: 7;
    /// 32kHz output enable (EN32kHz)
    pub enable_32khz_output, set_enable_32khz_output: 3;
    /// Temperature conversion busy (BSY)
    pub busy, set_busy: 2;
    /// Alarm 2 matched (A2F)
    pub alarm2_flag, set_alarm2_flag: 1;
    /// Alarm 1 matched (A1F)
    pub alarm1_flag, set_alarm1_flag: 0;
}
from_register_u8!(Status);

impl Status {
    pub const A1F: u8 = 1 << 0;
    pub const A2F: u8 = 1 << 1;
    pub const BSY: u8 = 1 << 2;
    pub const EN32KHZ: u8 = 1 << 3;
    pub const OSF: u8 = 1 << 7;
}

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Status(OSF={} EN32kHz={} BSY={} A2F={} A1F={})",
            self.oscillator_stop_flag(),
            self.enable_32khz_output(),
            self.busy(),
            self.alarm2_flag(),
            self.alarm1_flag()
        );
    }
}

bitfield! {
    /// Aging offset register, signed.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AgingOffset(u8);
    impl Debug;
    pub i8, aging_offset, set_aging_offset: 7, 0;
}
from_register_u8!(AgingOffset);

bitfield! {
    /// Temperature register, signed integer part.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct Temperature(u8);
    impl Debug;
    pub i8, temperature, set_temperature: 7, 0;
}
from_register_u8!(Temperature);

bitfield! {
    /// Temperature fraction register, quarter degrees in bits 7..6.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct TemperatureFraction(u8);
    impl Debug;
    pub temperature_fraction, set_temperature_fraction: 7, 6;
}
from_register_u8!(TemperatureFraction);

bitfield! {
    /// Alarm 1 seconds register with the A1M1 don't-care bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmSeconds(u8);
    impl Debug;
    pub masked, set_masked: 7;
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(AlarmSeconds);

bitfield! {
    /// Alarm minutes register with the AxM2 don't-care bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmMinutes(u8);
    impl Debug;
    pub masked, set_masked: 7;
    pub bcd, set_bcd: 6, 0;
}
from_register_u8!(AlarmMinutes);

bitfield! {
    /// Alarm hours register with the AxM3 don't-care bit.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmHours(u8);
    impl Debug;
    pub masked, set_masked: 7;
    pub twelve_hour, set_twelve_hour: 6;
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(AlarmHours);

bitfield! {
    /// Alarm day/date register with the AxM4 don't-care bit and DY/DT select.
    #[derive(Clone, Copy, Default, PartialEq)]
    pub struct AlarmDayDate(u8);
    impl Debug;
    pub masked, set_masked: 7;
    pub from into DayDateSelect, day_date_select, set_day_date_select: 6, 6;
    pub bcd, set_bcd: 5, 0;
}
from_register_u8!(AlarmDayDate);

/// Function of the INT/SQW pin.
///
/// Each mode is a complete value for the low five bits of the control
/// register (RS2, RS1, INTCN, A2IE, A1IE), written in one masked update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IntPinMode {
    /// Interrupt mode with both alarm interrupts off, the pin stays high.
    Disabled,
    /// Pin is driven low when alarm 1 matches.
    Alarm1,
    /// Pin is driven low when alarm 2 matches.
    Alarm2,
    /// Pin is driven low when alarm 1 or 2 matches.
    Alarm12,
    /// 1 Hz square wave.
    SquareWave1Hz,
    /// 1.024 kHz square wave.
    SquareWave1024Hz,
    /// 4.096 kHz square wave.
    SquareWave4096Hz,
    /// 8.192 kHz square wave.
    SquareWave8192Hz,
}

impl IntPinMode {
    /// Bits of the control register owned by the pin mode.
    pub const MASK: u8 = 0b0001_1111;

    /// Control register value for this mode, limited to [`Self::MASK`].
    #[must_use]
    pub fn bits(self) -> u8 {
        let mut control = Control::default();
        match self {
            IntPinMode::Disabled => {
                control.set_interrupt_control(InterruptControl::Interrupt);
            }
            IntPinMode::Alarm1 => {
                control.set_interrupt_control(InterruptControl::Interrupt);
                control.set_alarm1_interrupt_enable(true);
            }
            IntPinMode::Alarm2 => {
                control.set_interrupt_control(InterruptControl::Interrupt);
                control.set_alarm2_interrupt_enable(true);
            }
            IntPinMode::Alarm12 => {
                control.set_interrupt_control(InterruptControl::Interrupt);
                control.set_alarm1_interrupt_enable(true);
                control.set_alarm2_interrupt_enable(true);
            }
            IntPinMode::SquareWave1Hz => {
                control.set_square_wave_frequency(SquareWaveFrequency::Hz1);
            }
            IntPinMode::SquareWave1024Hz => {
                control.set_square_wave_frequency(SquareWaveFrequency::Hz1024);
            }
            IntPinMode::SquareWave4096Hz => {
                control.set_square_wave_frequency(SquareWaveFrequency::Hz4096);
            }
            IntPinMode::SquareWave8192Hz => {
                control.set_square_wave_frequency(SquareWaveFrequency::Hz8192);
            }
        }
        u8::from(control) & Self::MASK
    }
}

/// The two temperature registers read as one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TemperatureSample {
    msb: Temperature,
    lsb: TemperatureFraction,
}

impl TemperatureSample {
    /// Signed integer part in degrees celsius.
    #[must_use]
    pub fn integer(&self) -> i8 {
        self.msb.temperature()
    }

    /// Fraction in quarter degrees (0-3).
    #[must_use]
    pub fn quarters(&self) -> u8 {
        self.lsb.temperature_fraction()
    }

    /// Temperature in degrees celsius.
    ///
    /// The fraction always adds magnitude away from zero: a negative integer
    /// part has the fraction subtracted, so `-3` with one quarter is `-3.25`.
    #[must_use]
    pub fn celsius(&self) -> f32 {
        let integer = f32::from(self.integer());
        let fraction = f32::from(self.quarters()) * 0.25;
        if self.integer() < 0 {
            integer - fraction
        } else {
            integer + fraction
        }
    }
}

impl From<[u8; 2]> for TemperatureSample {
    fn from(data: [u8; 2]) -> Self {
        TemperatureSample {
            msb: Temperature(data[0]),
            lsb: TemperatureFraction(data[1]),
        }
    }
}

/// Snapshot of all registers, for debugging.
///
/// `Display` prints one `index:value:binary` line per register, index and
/// value in hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterDump([u8; REGISTER_COUNT]);

impl RegisterDump {
    /// Raw value of one register.
    #[must_use]
    pub fn value(&self, reg: RegAddr) -> u8 {
        self.0[reg as usize]
    }

    /// All register values, indexed by address.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; REGISTER_COUNT] {
        &self.0
    }
}

impl From<[u8; REGISTER_COUNT]> for RegisterDump {
    fn from(data: [u8; REGISTER_COUNT]) -> Self {
        RegisterDump(data)
    }
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.0.iter().enumerate() {
            writeln!(f, "{:02x}:{:02x}:{:08b}", index, value, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;

    #[test]
    fn test_time_register_masks() {
        // reserved bits must not leak into the BCD value
        assert_eq!(Seconds::from(0xD9).bcd(), 0x59);
        assert_eq!(Minutes::from(0x80).bcd(), 0x00);
        assert_eq!(Hours::from(0xE3).bcd(), 0x23);
        assert!(Hours::from(0x40).twelve_hour());
        assert_eq!(Day::from(0xFF).day(), 7);
        assert_eq!(Date::from(0xF1).bcd(), 0x31);
        assert_eq!(Year::from(0x99).bcd(), 0x99);
    }

    #[test]
    fn test_month_register_century() {
        let month = Month::from(0x92);
        assert!(month.century());
        assert_eq!(month.bcd(), 0x12);

        let month = Month::from(0x06);
        assert!(!month.century());
        assert_eq!(month.bcd(), 0x06);

        let mut month = Month::default();
        month.set_bcd(0x11);
        month.set_century(true);
        assert_eq!(u8::from(month), 0x91);
    }

    #[test]
    fn test_control_register_conversions() {
        let control = Control::from(0xFF);
        assert_eq!(control.oscillator_enable(), Oscillator::Disabled);
        assert!(control.battery_backed_square_wave());
        assert!(control.convert_temperature());
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz8192);
        assert_eq!(control.interrupt_control(), InterruptControl::Interrupt);
        assert!(control.alarm2_interrupt_enable());
        assert!(control.alarm1_interrupt_enable());

        let control = Control::from(0x1C);
        assert_eq!(control.oscillator_enable(), Oscillator::Enabled);
        assert_eq!(control.square_wave_frequency(), SquareWaveFrequency::Hz8192);
        assert_eq!(control.interrupt_control(), InterruptControl::Interrupt);
        assert!(!control.alarm1_interrupt_enable());
    }

    #[test]
    fn test_control_bit_constants_match_fields() {
        assert!(Control::from(Control::EOSC).oscillator_enable() == Oscillator::Disabled);
        assert!(Control::from(Control::BBSQW).battery_backed_square_wave());
        assert!(Control::from(Control::CONV).convert_temperature());
        assert_eq!(
            Control::from(Control::RS1).square_wave_frequency(),
            SquareWaveFrequency::Hz1024
        );
        assert_eq!(
            Control::from(Control::RS2).square_wave_frequency(),
            SquareWaveFrequency::Hz4096
        );
        assert_eq!(
            Control::from(Control::INTCN).interrupt_control(),
            InterruptControl::Interrupt
        );
        assert!(Control::from(Control::A2IE).alarm2_interrupt_enable());
        assert!(Control::from(Control::A1IE).alarm1_interrupt_enable());
    }

    #[test]
    fn test_status_bit_constants_match_fields() {
        assert!(Status::from(Status::OSF).oscillator_stop_flag());
        assert!(Status::from(Status::EN32KHZ).enable_32khz_output());
        assert!(Status::from(Status::BSY).busy());
        assert!(Status::from(Status::A2F).alarm2_flag());
        assert!(Status::from(Status::A1F).alarm1_flag());
        assert_eq!(u8::from(Status::from(0x8B)), 0x8B);
    }

    #[test]
    fn test_aging_offset_is_signed() {
        assert_eq!(AgingOffset::from(0x05).aging_offset(), 5);
        assert_eq!(AgingOffset::from(0xF6).aging_offset(), -10);
        assert_eq!(AgingOffset::from(0x80).aging_offset(), -128);
    }

    #[test]
    fn test_alarm_day_date_register() {
        let reg = AlarmDayDate::from(0xC4);
        assert!(reg.masked());
        assert_eq!(reg.day_date_select(), DayDateSelect::Day);
        assert_eq!(reg.bcd(), 0x04);

        let reg = AlarmDayDate::from(0x31);
        assert!(!reg.masked());
        assert_eq!(reg.day_date_select(), DayDateSelect::Date);
        assert_eq!(reg.bcd(), 0x31);
    }

    #[test]
    #[should_panic(expected = "Invalid value for DayDateSelect: 2")]
    fn test_invalid_day_date_select_conversion() {
        let _ = DayDateSelect::from(2);
    }

    #[test]
    fn test_int_pin_mode_bits() {
        assert_eq!(IntPinMode::Disabled.bits(), 0b0_0100);
        assert_eq!(IntPinMode::Alarm1.bits(), 0b0_0101);
        assert_eq!(IntPinMode::Alarm2.bits(), 0b0_0110);
        assert_eq!(IntPinMode::Alarm12.bits(), 0b0_0111);
        assert_eq!(IntPinMode::SquareWave1Hz.bits(), 0b0_0000);
        assert_eq!(IntPinMode::SquareWave1024Hz.bits(), 0b0_1000);
        assert_eq!(IntPinMode::SquareWave4096Hz.bits(), 0b1_0000);
        assert_eq!(IntPinMode::SquareWave8192Hz.bits(), 0b1_1000);
    }

    #[test]
    fn test_temperature_sample_positive() {
        let sample = TemperatureSample::from([25, 0b0100_0000]);
        assert_eq!(sample.integer(), 25);
        assert_eq!(sample.quarters(), 1);
        assert_eq!(sample.celsius(), 25.25);

        let sample = TemperatureSample::from([0x19, 0xC0]);
        assert_eq!(sample.celsius(), 25.75);
    }

    #[test]
    fn test_temperature_sample_negative_subtracts_fraction() {
        let sample = TemperatureSample::from([(-3i8) as u8, 0b0100_0000]);
        assert_eq!(sample.integer(), -3);
        assert_eq!(sample.celsius(), -3.25);

        let sample = TemperatureSample::from([0x80, 0x80]);
        assert_eq!(sample.celsius(), -128.5);
    }

    #[test]
    fn test_temperature_sample_zero_adds_fraction() {
        let sample = TemperatureSample::from([0, 0b1000_0000]);
        assert_eq!(sample.celsius(), 0.5);
    }

    #[test]
    fn test_temperature_fraction_ignores_low_bits() {
        let sample = TemperatureSample::from([10, 0b0011_1111]);
        assert_eq!(sample.quarters(), 0);
        assert_eq!(sample.celsius(), 10.0);
    }

    #[test]
    fn test_register_dump_display() {
        let mut data = [0u8; REGISTER_COUNT];
        data[0] = 0x59;
        data[0x12] = 0xC0;
        let dump = RegisterDump::from(data);
        assert_eq!(dump.value(RegAddr::Seconds), 0x59);
        assert_eq!(dump.value(RegAddr::LSBTemp), 0xC0);

        let text = alloc::format!("{}", dump);
        let lines: alloc::vec::Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), REGISTER_COUNT);
        assert_eq!(lines[0], "00:59:01011001");
        assert_eq!(lines[1], "01:00:00000000");
        assert_eq!(lines[0x12], "12:c0:11000000");
    }
}
