use super::{error::RegisterError, field::field_mask};

/// A trait that provides access to the 32-bit registers of the device.
///
/// Addresses are byte offsets of 32-bit words.
pub trait RegisterFile {
    /// Reads a whole word.
    fn read(&self, address: u32) -> Result<u32, RegisterError>;

    /// Writes a whole word.
    fn write(&mut self, address: u32, value: u32) -> Result<(), RegisterError>;

    /// Reads the bits `[start_bit, start_bit + bit_width)` of a word, not shifted.
    fn read_field(&self, address: u32, start_bit: u8, bit_width: u8) -> Result<u32, RegisterError> {
        Ok(self.read(address)? & field_mask(start_bit, bit_width))
    }

    /// Replaces the bits `[start_bit, start_bit + bit_width)` of a word, keeping the others.
    ///
    /// `value` must already be shifted to `start_bit`.
    fn write_field(
        &mut self,
        address: u32,
        start_bit: u8,
        bit_width: u8,
        value: u32,
    ) -> Result<(), RegisterError> {
        let mask = field_mask(start_bit, bit_width);
        let word = self.read(address)?;
        self.write(address, (word & !mask) | (value & mask))
    }
}

impl RegisterFile for Box<dyn RegisterFile> {
    fn read(&self, address: u32) -> Result<u32, RegisterError> {
        self.as_ref().read(address)
    }

    fn write(&mut self, address: u32, value: u32) -> Result<(), RegisterError> {
        self.as_mut().write(address, value)
    }

    fn read_field(&self, address: u32, start_bit: u8, bit_width: u8) -> Result<u32, RegisterError> {
        self.as_ref().read_field(address, start_bit, bit_width)
    }

    fn write_field(
        &mut self,
        address: u32,
        start_bit: u8,
        bit_width: u8,
        value: u32,
    ) -> Result<(), RegisterError> {
        self.as_mut().write_field(address, start_bit, bit_width, value)
    }
}

impl<R: RegisterFile + ?Sized> RegisterFile for &mut R {
    fn read(&self, address: u32) -> Result<u32, RegisterError> {
        (**self).read(address)
    }

    fn write(&mut self, address: u32, value: u32) -> Result<(), RegisterError> {
        (**self).write(address, value)
    }
}
