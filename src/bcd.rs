//! Binary-coded decimal helpers.
//!
//! The DS3231 keeps every calendar field as two packed decimal digits, the
//! tens digit in the high nibble and the ones digit in the low nibble.

/// Converts a binary value (0-99) into packed BCD.
///
/// Values above 99 are not representable; the hundreds are dropped.
#[must_use]
pub const fn bin_to_bcd(value: u8) -> u8 {
    let value = value % 100;
    ((value / 10) << 4) | (value % 10)
}

/// Converts a packed BCD byte into its binary value.
///
/// No digit validation is done, `0x0A` decodes to 10 just like the chip
/// would count it.
#[must_use]
pub const fn bcd_to_bin(value: u8) -> u8 {
    (value >> 4) * 10 + (value & 0x0F)
}
