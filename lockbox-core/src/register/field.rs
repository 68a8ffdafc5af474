use getset::CopyGetters;

use super::{error::RegisterError, file::RegisterFile};
use crate::fixed_point::{FixedPointError, FixedPointFormat};

/// Bit mask of `[start_bit, start_bit + bit_width)`.
#[must_use]
pub const fn field_mask(start_bit: u8, bit_width: u8) -> u32 {
    let mask = if bit_width >= 32 {
        u32::MAX
    } else {
        (1 << bit_width) - 1
    };
    mask << start_bit
}

/// A fixed-point field inside a 32-bit register word.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct Field {
    /// Address of the word.
    address: u32,
    /// Position of the least significant bit of the field.
    start_bit: u8,
    /// Format of the field.
    format: FixedPointFormat,
}

impl Field {
    /// Creates a new [`Field`].
    #[must_use]
    pub const fn new(address: u32, start_bit: u8, format: FixedPointFormat) -> Self {
        Self {
            address,
            start_bit,
            format,
        }
    }

    /// Moves the field by `base` bytes.
    #[must_use]
    pub const fn offset(self, base: u32) -> Self {
        Self {
            address: base + self.address,
            ..self
        }
    }

    /// Width of the field in bits.
    #[must_use]
    pub fn bit_width(&self) -> u8 {
        self.format.bits()
    }

    /// Bit mask of the field inside its word.
    #[must_use]
    pub fn mask(&self) -> u32 {
        field_mask(self.start_bit, self.bit_width())
    }

    /// Whether the field is non-empty and lies inside a single aligned word.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.address % 4 == 0
            && self.bit_width() > 0
            && self.start_bit as u32 + self.bit_width() as u32 <= 32
    }

    /// Packs a raw integer into a [`FieldWrite`].
    #[must_use]
    pub fn pack_raw(&self, raw: i64) -> FieldWrite {
        FieldWrite {
            address: self.address,
            start_bit: self.start_bit,
            bit_width: self.bit_width(),
            value: self.format.to_bits(raw) << self.start_bit,
        }
    }

    /// Packs a raw integer into a [`FieldWrite`], failing if it is outside the raw range.
    pub fn try_pack_raw(&self, raw: i64) -> Result<FieldWrite, FixedPointError> {
        if raw < self.format.min_raw() || raw > self.format.max_raw() {
            return Err(FixedPointError::Overflow(
                raw as f64,
                self.format.min_raw() as f64,
                self.format.max_raw() as f64,
            ));
        }
        Ok(self.pack_raw(raw))
    }

    /// Encodes `value` and packs it into a [`FieldWrite`].
    pub fn pack(&self, value: f64) -> Result<FieldWrite, FixedPointError> {
        Ok(self.pack_raw(self.format.encode(value)?))
    }

    /// Extracts the raw integer of the field from a whole word.
    #[must_use]
    pub fn unpack_raw(&self, word: u32) -> i64 {
        self.format.from_bits(word >> self.start_bit)
    }

    /// Extracts the value of the field from a whole word.
    #[must_use]
    pub fn unpack(&self, word: u32) -> f64 {
        self.format.decode(self.unpack_raw(word))
    }

    /// Reads the raw integer of the field from the device.
    pub fn read_raw<R: RegisterFile + ?Sized>(&self, registers: &R) -> Result<i64, RegisterError> {
        let word = registers.read_field(self.address, self.start_bit, self.bit_width())?;
        Ok(self.unpack_raw(word))
    }

    /// Reads the value of the field from the device.
    pub fn read<R: RegisterFile + ?Sized>(&self, registers: &R) -> Result<f64, RegisterError> {
        Ok(self.format.decode(self.read_raw(registers)?))
    }
}

/// A pending write of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct FieldWrite {
    /// Address of the word.
    address: u32,
    /// Position of the least significant bit of the field.
    start_bit: u8,
    /// Width of the field in bits.
    bit_width: u8,
    /// Bits of the field, already shifted to `start_bit`.
    value: u32,
}

impl FieldWrite {
    /// Bit mask of the field inside its word.
    #[must_use]
    pub const fn mask(&self) -> u32 {
        field_mask(self.start_bit, self.bit_width)
    }

    /// Replaces the bits of the field in `word`.
    #[must_use]
    pub const fn apply(&self, word: u32) -> u32 {
        (word & !self.mask()) | (self.value & self.mask())
    }
}
