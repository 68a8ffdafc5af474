mod error;

pub use error::FixedPointError;

use getset::CopyGetters;

/// Fixed-point format of a register field.
///
/// A real value `v` is stored as the integer `round(v * norm)` in a field of `bits` bits,
/// interpreted as two's complement if `signed` is `true`.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedPointFormat {
    #[getset(get_copy = "pub")]
    /// Width of the field in bits.
    bits: u8,
    #[getset(get_copy = "pub")]
    /// Scale from a real value to the raw integer.
    norm: f64,
    #[getset(skip)]
    /// Whether the raw integer is two's complement.
    signed: bool,
}

impl FixedPointFormat {
    /// Creates a signed format.
    #[must_use]
    pub const fn signed(bits: u8, norm: f64) -> Self {
        Self {
            bits,
            norm,
            signed: true,
        }
    }

    /// Creates an unsigned format.
    #[must_use]
    pub const fn unsigned(bits: u8, norm: f64) -> Self {
        Self {
            bits,
            norm,
            signed: false,
        }
    }

    /// Creates an unsigned integer format.
    #[must_use]
    pub const fn integer(bits: u8) -> Self {
        Self::unsigned(bits, 1.0)
    }

    /// Whether the raw integer is two's complement.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Bit mask of the field, not shifted.
    #[must_use]
    pub const fn mask(&self) -> u32 {
        if self.bits >= 32 {
            u32::MAX
        } else {
            (1 << self.bits) - 1
        }
    }

    /// Minimum raw integer.
    #[must_use]
    pub const fn min_raw(&self) -> i64 {
        if self.signed {
            -(1 << (self.bits - 1))
        } else {
            0
        }
    }

    /// Maximum raw integer.
    #[must_use]
    pub const fn max_raw(&self) -> i64 {
        if self.signed {
            (1 << (self.bits - 1)) - 1
        } else {
            (1 << self.bits) - 1
        }
    }

    /// Value of one least significant bit.
    #[must_use]
    pub fn lsb(&self) -> f64 {
        1.0 / self.norm
    }

    /// Minimum representable value.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.decode(self.min_raw())
    }

    /// Maximum representable value.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.decode(self.max_raw())
    }

    /// Encodes `value` into a raw integer.
    ///
    /// The value is rounded half away from zero. A result that exceeds the range by one raw step
    /// is clamped to the nearest bound, so that e.g. `1.0` is stored as the largest signed value.
    /// Anything further out of range is an error.
    pub fn encode(&self, value: f64) -> Result<i64, FixedPointError> {
        if !value.is_finite() {
            return Err(FixedPointError::NotFinite(value));
        }
        let raw = (value * self.norm).round();
        let min = self.min_raw() as f64;
        let max = self.max_raw() as f64;
        if raw > max + 1.0 || raw < min - 1.0 {
            return Err(FixedPointError::Overflow(
                value,
                self.min_value(),
                self.max_value(),
            ));
        }
        if raw > max || raw < min {
            tracing::warn!(
                "Value ({}) is clamped to [{}, {}]",
                value,
                self.min_value(),
                self.max_value()
            );
        }
        Ok(raw.clamp(min, max) as i64)
    }

    /// Decodes a raw integer into a real value.
    #[must_use]
    pub fn decode(&self, raw: i64) -> f64 {
        raw as f64 / self.norm
    }

    /// Rounds `value` to the nearest representable value.
    pub fn quantize(&self, value: f64) -> Result<f64, FixedPointError> {
        Ok(self.decode(self.encode(value)?))
    }

    /// Converts a raw integer to the bit pattern of the field.
    #[must_use]
    pub const fn to_bits(&self, raw: i64) -> u32 {
        (raw as u32) & self.mask()
    }

    /// Converts the bit pattern of the field to a raw integer, sign-extending if signed.
    #[must_use]
    pub const fn from_bits(&self, bits: u32) -> i64 {
        let v = (bits & self.mask()) as i64;
        if self.signed && v > self.max_raw() {
            v - (1 << self.bits)
        } else {
            v
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::defined::*;

    const VOLTAGE: FixedPointFormat = FixedPointFormat::signed(VOLTAGE_BITS, VOLTAGE_NORM);
    const TIME: FixedPointFormat = FixedPointFormat::unsigned(TIME_STEP_BITS, FPGA_CLK_FREQ);

    #[test]
    fn constructors() {
        assert!(VOLTAGE.is_signed());
        assert_eq!(VOLTAGE_BITS, VOLTAGE.bits());
        assert!(!TIME.is_signed());
        assert!(!FixedPointFormat::integer(14).is_signed());
        assert_eq!(1.0, FixedPointFormat::integer(14).norm());
    }

    #[rstest::rstest]
    #[test]
    #[case(0, 0.0)]
    #[case(8191, 0.9999)]
    #[case(8191, 1.0)]
    #[case(-8192, -1.0)]
    #[case(-8192, -1.0001)]
    #[case(4096, 0.5)]
    #[case(1, 0.5 / VOLTAGE_NORM)]
    #[case(-1, -0.5 / VOLTAGE_NORM)]
    fn encode_voltage(#[case] expect: i64, #[case] value: f64) {
        assert_eq!(Ok(expect), VOLTAGE.encode(value));
    }

    #[rstest::rstest]
    #[test]
    #[case(1.001)]
    #[case(-1.001)]
    #[case(2.0)]
    fn encode_voltage_overflow(#[case] value: f64) {
        assert_eq!(
            Err(FixedPointError::Overflow(value, -1.0, 8191.0 / 8192.0)),
            VOLTAGE.encode(value)
        );
    }

    #[rstest::rstest]
    #[test]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn encode_not_finite(#[case] value: f64) {
        assert!(matches!(
            VOLTAGE.encode(value),
            Err(FixedPointError::NotFinite(_))
        ));
    }

    #[test]
    fn round_trip_within_lsb() {
        use rand::Rng;

        let v = VOLTAGE.quantize(0.9999).unwrap();
        assert!((v - 0.9999).abs() < VOLTAGE.lsb());

        let mut rng = rand::rng();
        (0..1000).for_each(|_| {
            let value = rng.random_range(-1.0..VOLTAGE.max_value());
            let v = VOLTAGE.quantize(value).unwrap();
            assert!((v - value).abs() <= VOLTAGE.lsb() / 2.0);
        });
    }

    #[rstest::rstest]
    #[test]
    #[case(12_500_000, 0.1)]
    #[case(3, 24e-9)]
    #[case(0xFF_FFFF, 0xFF_FFFF as f64 / FPGA_CLK_FREQ)]
    fn encode_time(#[case] expect: i64, #[case] value: f64) {
        assert_eq!(Ok(expect), TIME.encode(value));
    }

    #[rstest::rstest]
    #[test]
    #[case(0x3FFF, -1)]
    #[case(0x2000, -8192)]
    #[case(0x1FFF, 8191)]
    #[case(0x0000, 0)]
    fn bits_signed(#[case] bits: u32, #[case] raw: i64) {
        assert_eq!(bits, VOLTAGE.to_bits(raw));
        assert_eq!(raw, VOLTAGE.from_bits(bits));
    }

    #[test]
    fn from_bits_ignores_upper_bits() {
        assert_eq!(-1, VOLTAGE.from_bits(0xFFFF_FFFF));
        assert_eq!(0xFF_FFFF, TIME.from_bits(0xFFFF_FFFF));
    }

    #[rstest::rstest]
    #[test]
    #[case(-8192, 8191, VOLTAGE)]
    #[case(0, 0xFF_FFFF, TIME)]
    #[case(0, 0x3FFF, FixedPointFormat::integer(14))]
    #[case(i32::MIN as i64, i32::MAX as i64, FixedPointFormat::signed(32, 1.0))]
    fn raw_range(#[case] min: i64, #[case] max: i64, #[case] format: FixedPointFormat) {
        assert_eq!(min, format.min_raw());
        assert_eq!(max, format.max_raw());
    }
}
