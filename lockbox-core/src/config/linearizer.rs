use getset::CopyGetters;

use super::{validate_field, validate_format, validate_positive, ConfigError};
use crate::{defined::*, fixed_point::FixedPointFormat, register::Field};

/// Configuration of the linearizer module.
///
/// Each segment occupies two words: the edge point and the intercept share the first, the slope
/// fills the second.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct LinearizerConfig {
    /// Number of segment slots.
    num_segments: usize,
    /// Format of the edge point and intercept fields.
    value_format: FixedPointFormat,
    /// Format of the slope field.
    slope_format: FixedPointFormat,
    /// Upper end of the input range.
    input_max: f64,
}

impl Default for LinearizerConfig {
    fn default() -> Self {
        Self {
            num_segments: NUM_SEGMENTS,
            value_format: FixedPointFormat::signed(VOLTAGE_BITS, VOLTAGE_NORM),
            slope_format: FixedPointFormat::signed(SLOPE_BITS, SLOPE_NORM),
            input_max: 1.0,
        }
    }
}

impl LinearizerConfig {
    /// Sets the number of segment slots.
    #[must_use]
    pub const fn with_num_segments(self, num_segments: usize) -> Self {
        Self {
            num_segments,
            ..self
        }
    }

    /// Sets the width and normalization of the slope field.
    #[must_use]
    pub const fn with_slope_format(self, bits: u8, norm: f64) -> Self {
        Self {
            slope_format: FixedPointFormat::signed(bits, norm),
            ..self
        }
    }

    fn segment_address(i: usize) -> u32 {
        LINEARIZER_ADDR_SEGMENT + LINEARIZER_SEGMENT_STRIDE * i as u32
    }

    /// Edge point field of segment `i`.
    #[must_use]
    pub fn edge_point_field(&self, i: usize) -> Field {
        Field::new(Self::segment_address(i), 0, self.value_format)
    }

    /// Intercept field of segment `i`, sharing the word of the edge point.
    #[must_use]
    pub fn intercept_field(&self, i: usize) -> Field {
        Field::new(
            Self::segment_address(i),
            self.value_format.bits(),
            self.value_format,
        )
    }

    /// Slope field of segment `i`.
    #[must_use]
    pub fn slope_field(&self, i: usize) -> Field {
        Field::new(Self::segment_address(i) + 4, 0, self.slope_format)
    }

    /// Byte range of the registers relative to the module base.
    #[must_use]
    pub fn address_range(&self) -> std::ops::Range<u32> {
        LINEARIZER_ADDR_SEGMENT..Self::segment_address(self.num_segments)
    }

    /// Checks the consistency of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_segments == 0 {
            return Err(ConfigError::new("At least one segment is required"));
        }
        validate_format("value", self.value_format)?;
        validate_format("slope", self.slope_format)?;
        validate_field("edge point", self.edge_point_field(0))?;
        validate_field("intercept", self.intercept_field(0))?;
        validate_field("slope", self.slope_field(0))?;
        validate_positive("Input maximum", self.input_max)?;
        Ok(())
    }
}
