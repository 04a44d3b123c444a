//! Register-addressed access to a chip on a blocking I2C bus.
//!
//! [`RegisterChip`] binds an `embedded-hal` I2C bus to one device address
//! and offers block transfers over contiguous registers plus the bit level
//! helpers the driver is built from. Bit helpers are read/modify/write and
//! are not atomic with respect to other users of the bus.

use embedded_hal::i2c::I2c;

use crate::registers::REGISTER_COUNT;
use crate::{DS3231Error, RegAddr};

/// Longest write frame: the start register plus every register of the chip.
pub(crate) const MAX_FRAME: usize = REGISTER_COUNT + 1;

/// Result of testing bits in a register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitResult {
    /// Every tested bit is set
    Set,
    /// At least one tested bit is clear
    Zero,
}

impl BitResult {
    #[must_use]
    pub fn is_set(self) -> bool {
        self == BitResult::Set
    }

    pub(crate) fn test(value: u8, mask: u8) -> Self {
        if value & mask == mask {
            BitResult::Set
        } else {
            BitResult::Zero
        }
    }
}

/// Change applied by [`RegisterChip::change_bits`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOperation {
    Set,
    Clear,
}

impl BitOperation {
    pub(crate) fn apply(self, value: u8, mask: u8) -> u8 {
        match self {
            BitOperation::Set => value | mask,
            BitOperation::Clear => value & !mask,
        }
    }
}

/// Replaces the bits selected by `mask` in `old` with those of `value`.
pub(crate) fn merge_bits(old: u8, mask: u8, value: u8) -> u8 {
    (old & !mask) | (value & mask)
}

/// Builds the `[start, data...]` write frame in `buf`, `None` if `data` is
/// longer than the register file.
pub(crate) fn frame<'a>(
    buf: &'a mut [u8; MAX_FRAME],
    start: RegAddr,
    data: &[u8],
) -> Option<&'a [u8]> {
    if data.len() >= MAX_FRAME {
        return None;
    }
    buf[0] = start.into();
    buf[1..=data.len()].copy_from_slice(data);
    Some(&buf[..=data.len()])
}

/// A chip on an I2C bus, addressed by register.
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
    pub fn read_registers(
        &mut self,
        start: RegAddr,
        data: &mut [u8],
    ) -> Result<(), DS3231Error<I2C::Error>> {
        self.i2c.write_read(self.address, &[u8::from(start)], data)?;
        Ok(())
    }

    /// Writes `data` into consecutive registers starting at `start`, in one frame.
    ///
    /// # Errors
    /// `DS3231Error::BlockTooLong` without any transfer if `data` is longer
    /// than the register file.
    pub fn write_registers(
        &mut self,
        start: RegAddr,
        data: &[u8],
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let mut buf = [0; MAX_FRAME];
        let Some(frame) = frame(&mut buf, start, data) else {
            return Err(DS3231Error::BlockTooLong);
        };
        self.i2c.write(self.address, frame)?;
        Ok(())
    }

    pub fn read_register(&mut self, reg: RegAddr) -> Result<u8, DS3231Error<I2C::Error>> {
        let mut data = [0];
        self.read_registers(reg, &mut data)?;
        Ok(data[0])
    }

    pub fn write_register(
        &mut self,
        reg: RegAddr,
        value: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        self.i2c.write(self.address, &[u8::from(reg), value])?;
        Ok(())
    }

    /// Tests whether all bits of `mask` are set in `reg`.
    pub fn test_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
    ) -> Result<BitResult, DS3231Error<I2C::Error>> {
        let value = self.read_register(reg)?;
        Ok(BitResult::test(value, mask))
    }

    /// Sets or clears the bits of `mask` in `reg`.
    pub fn change_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
        operation: BitOperation,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let value = self.read_register(reg)?;
        self.write_register(reg, operation.apply(value, mask))
    }

    /// Replaces the bits of `mask` in `reg` with the same bits of `value`.
    pub fn write_bits(
        &mut self,
        reg: RegAddr,
        mask: u8,
        value: u8,
    ) -> Result<(), DS3231Error<I2C::Error>> {
        let old = self.read_register(reg)?;
        self.write_register(reg, merge_bits(old, mask, value))
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::DEVICE_ADDRESS;
    use alloc::vec;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    fn chip(expectations: &[I2cTrans]) -> RegisterChip<I2cMock> {
        RegisterChip::new(I2cMock::new(expectations), DEVICE_ADDRESS)
    }

    #[test]
    fn test_read_registers() {
        let mut chip = chip(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::MSBTemp as u8],
            vec![0x19, 0x40],
        )]);
        let mut data = [0; 2];
        chip.read_registers(RegAddr::MSBTemp, &mut data).unwrap();
        assert_eq!(data, [0x19, 0x40]);
        chip.release().done();
    }

    #[test]
    fn test_write_registers_single_frame() {
        let mut chip = chip(&[I2cTrans::write(
            DEVICE_ADDRESS,
            vec![RegAddr::Alarm2Minutes as u8, 0x01, 0x02, 0x03],
        )]);
        chip.write_registers(RegAddr::Alarm2Minutes, &[0x01, 0x02, 0x03])
            .unwrap();
        chip.release().done();
    }

    #[test]
    fn test_write_registers_whole_register_file() {
        let mut expected = vec![RegAddr::Seconds as u8];
        expected.extend_from_slice(&[0xAA; REGISTER_COUNT]);
        let mut chip = chip(&[I2cTrans::write(DEVICE_ADDRESS, expected)]);
        chip.write_registers(RegAddr::Seconds, &[0xAA; REGISTER_COUNT])
            .unwrap();
        chip.release().done();
    }

    #[test]
    fn test_write_registers_oversized_block_makes_no_transfer() {
        let mut chip = chip(&[]);
        assert!(matches!(
            chip.write_registers(RegAddr::Seconds, &[0; REGISTER_COUNT + 1]),
            Err(DS3231Error::BlockTooLong)
        ));
        chip.release().done();
    }

    #[test]
    fn test_frame_bounds() {
        let mut buf = [0; MAX_FRAME];
        assert!(frame(&mut buf, RegAddr::Seconds, &[0; MAX_FRAME]).is_none());
        assert_eq!(
            frame(&mut buf, RegAddr::Year, &[0x24]),
            Some(&[RegAddr::Year as u8, 0x24][..])
        );
    }

    #[test]
    fn test_test_bits() {
        let mut chip = chip(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::ControlStatus as u8], vec![0x88]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::ControlStatus as u8], vec![0x08]),
        ]);
        assert_eq!(
            chip.test_bits(RegAddr::ControlStatus, 0x80).unwrap(),
            BitResult::Set
        );
        assert_eq!(
            chip.test_bits(RegAddr::ControlStatus, 0x80).unwrap(),
            BitResult::Zero
        );
        chip.release().done();
    }

    #[test]
    fn test_test_bits_requires_every_bit() {
        assert_eq!(BitResult::test(0b0000_0001, 0b0000_0011), BitResult::Zero);
        assert_eq!(BitResult::test(0b0000_0111, 0b0000_0011), BitResult::Set);
    }

    #[test]
    fn test_change_bits() {
        let mut chip = chip(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x9C]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x1C]),
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0x1C]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0x1D]),
        ]);
        chip.change_bits(RegAddr::Control, 0x80, BitOperation::Clear)
            .unwrap();
        chip.change_bits(RegAddr::Control, 0x01, BitOperation::Set)
            .unwrap();
        chip.release().done();
    }

    #[test]
    fn test_write_bits_keeps_other_bits() {
        let mut chip = chip(&[
            I2cTrans::write_read(DEVICE_ADDRESS, vec![RegAddr::Control as u8], vec![0xFF]),
            I2cTrans::write(DEVICE_ADDRESS, vec![RegAddr::Control as u8, 0xE5]),
        ]);
        chip.write_bits(RegAddr::Control, 0b0001_1111, 0b0000_0101)
            .unwrap();
        chip.release().done();
    }

    #[test]
    fn test_change_bits_read_error_skips_write() {
        let mut chip = chip(&[I2cTrans::write_read(
            DEVICE_ADDRESS,
            vec![RegAddr::Control as u8],
            vec![0x00],
        )
        .with_error(ErrorKind::Other)]);
        assert!(matches!(
            chip.change_bits(RegAddr::Control, 0x80, BitOperation::Clear),
            Err(DS3231Error::I2c(ErrorKind::Other))
        ));
        chip.release().done();
    }
}
