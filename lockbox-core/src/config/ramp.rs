use getset::CopyGetters;

use super::{validate_field, validate_format, validate_positive, ConfigError};
use crate::{defined::*, fixed_point::FixedPointFormat, register::Field};

/// Configuration of the ramp module.
///
/// [`RampConfig::default`] describes the hardware. The configuration also defines the register
/// layout: a control word followed by one block of three words per segment.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct RampConfig {
    /// Number of segment slots.
    num_segments: usize,
    /// Format of the start value, step increment and default value fields.
    value_format: FixedPointFormat,
    /// Format of the time step field.
    time_step_format: FixedPointFormat,
    /// Format of the step count field.
    step_count_format: FixedPointFormat,
    /// Granularity of the step increment.
    smallest_step_increase: f64,
    /// Granularity of the time step in seconds.
    smallest_time_step: f64,
    /// Longest step used for a flat segment in seconds.
    max_flat_step_time: f64,
    /// Minimum number of steps of a sloped segment.
    min_steps: u32,
}

impl Default for RampConfig {
    fn default() -> Self {
        Self {
            num_segments: NUM_SEGMENTS,
            value_format: FixedPointFormat::signed(VOLTAGE_BITS, VOLTAGE_NORM),
            time_step_format: FixedPointFormat::unsigned(TIME_STEP_BITS, FPGA_CLK_FREQ),
            step_count_format: FixedPointFormat::integer(STEP_COUNT_BITS),
            smallest_step_increase: SMALLEST_STEP_INCREASE,
            smallest_time_step: SMALLEST_TIME_STEP,
            max_flat_step_time: MAX_FLAT_STEP_TIME,
            min_steps: MIN_STEPS,
        }
    }
}

impl RampConfig {
    /// Sets the number of segment slots.
    #[must_use]
    pub const fn with_num_segments(self, num_segments: usize) -> Self {
        Self {
            num_segments,
            ..self
        }
    }

    /// Sets the width of the time step field.
    #[must_use]
    pub const fn with_time_step_bits(self, bits: u8) -> Self {
        Self {
            time_step_format: FixedPointFormat::unsigned(bits, FPGA_CLK_FREQ),
            ..self
        }
    }

    /// Sets the width of the step count field.
    #[must_use]
    pub const fn with_step_count_bits(self, bits: u8) -> Self {
        Self {
            step_count_format: FixedPointFormat::integer(bits),
            ..self
        }
    }

    /// Sets the granularity of the step increment.
    #[must_use]
    pub const fn with_smallest_step_increase(self, smallest_step_increase: f64) -> Self {
        Self {
            smallest_step_increase,
            ..self
        }
    }

    /// Sets the granularity of the time step.
    #[must_use]
    pub const fn with_smallest_time_step(self, smallest_time_step: f64) -> Self {
        Self {
            smallest_time_step,
            ..self
        }
    }

    /// Sets the longest step of a flat segment.
    #[must_use]
    pub const fn with_max_flat_step_time(self, max_flat_step_time: f64) -> Self {
        Self {
            max_flat_step_time,
            ..self
        }
    }

    /// Sets the minimum number of steps of a sloped segment.
    #[must_use]
    pub const fn with_min_steps(self, min_steps: u32) -> Self {
        Self { min_steps, ..self }
    }

    /// Largest step count.
    #[must_use]
    pub fn max_step_count(&self) -> u32 {
        self.step_count_format.max_raw().min(u32::MAX as i64) as u32
    }

    /// Largest step increment in units of [`RampConfig::smallest_step_increase`].
    #[must_use]
    pub fn max_increment_steps(&self) -> u32 {
        Self::whole_steps(self.value_format.max_value(), self.smallest_step_increase)
    }

    /// Span of the value range in units of [`RampConfig::smallest_step_increase`].
    #[must_use]
    pub fn max_reach_steps(&self) -> u32 {
        Self::whole_steps(
            self.value_format.max_value() - self.value_format.min_value(),
            self.smallest_step_increase,
        )
    }

    /// Headroom from `start` to the end of the value range in the direction of `delta`, in units
    /// of [`RampConfig::smallest_step_increase`].
    #[must_use]
    pub fn reach_steps_from(&self, start: f64, delta: f64) -> u32 {
        let headroom = if delta < 0. {
            start - self.value_format.min_value()
        } else {
            self.value_format.max_value() - start
        };
        Self::whole_steps(headroom, self.smallest_step_increase)
    }

    /// Largest time step in units of [`RampConfig::smallest_time_step`].
    #[must_use]
    pub fn max_time_steps(&self) -> u32 {
        Self::whole_steps(self.time_step_format.max_value(), self.smallest_time_step)
    }

    fn whole_steps(max: f64, step: f64) -> u32 {
        (max / step + 1e-6).floor().clamp(0., u32::MAX as f64) as u32
    }

    /// Control word field selecting the output while idle.
    #[must_use]
    pub const fn idle_configuration_field(&self) -> Field {
        Field::new(RAMP_ADDR_CTL, 0, FixedPointFormat::integer(2))
    }

    /// Control word flag requiring a trigger per segment.
    #[must_use]
    pub const fn multiple_triggers_field(&self) -> Field {
        Field::new(RAMP_ADDR_CTL, 2, FixedPointFormat::integer(1))
    }

    /// Control word field holding the default output value.
    #[must_use]
    pub const fn default_value_field(&self) -> Field {
        Field::new(RAMP_ADDR_CTL, 3, self.value_format)
    }

    /// Control word field holding the number of used segments.
    #[must_use]
    pub fn used_ramps_field(&self) -> Field {
        let bits = (usize::BITS - self.num_segments.leading_zeros()).max(1) as u8;
        Field::new(
            RAMP_ADDR_CTL,
            3 + self.value_format.bits(),
            FixedPointFormat::integer(bits),
        )
    }

    fn segment_address(i: usize) -> u32 {
        RAMP_ADDR_SEGMENT + RAMP_SEGMENT_STRIDE * i as u32
    }

    /// Start value field of segment `i`.
    #[must_use]
    pub fn start_value_field(&self, i: usize) -> Field {
        Field::new(Self::segment_address(i), 0, self.value_format)
    }

    /// Step increment field of segment `i`, sharing the word of the start value.
    #[must_use]
    pub fn step_increment_field(&self, i: usize) -> Field {
        Field::new(
            Self::segment_address(i),
            self.value_format.bits(),
            self.value_format,
        )
    }

    /// Time step field of segment `i`.
    #[must_use]
    pub fn time_step_field(&self, i: usize) -> Field {
        Field::new(Self::segment_address(i) + 4, 0, self.time_step_format)
    }

    /// Step count field of segment `i`.
    #[must_use]
    pub fn step_count_field(&self, i: usize) -> Field {
        Field::new(Self::segment_address(i) + 8, 0, self.step_count_format)
    }

    /// Byte range of the registers relative to the module base.
    #[must_use]
    pub fn address_range(&self) -> std::ops::Range<u32> {
        RAMP_ADDR_CTL..Self::segment_address(self.num_segments)
    }

    /// Checks the consistency of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_segments == 0 {
            return Err(ConfigError::new("At least one segment is required"));
        }
        validate_format("value", self.value_format)?;
        validate_format("time step", self.time_step_format)?;
        validate_format("step count", self.step_count_format)?;

        validate_field("idle configuration", self.idle_configuration_field())?;
        validate_field("multiple triggers", self.multiple_triggers_field())?;
        validate_field("default value", self.default_value_field())?;
        validate_field("used ramps", self.used_ramps_field())?;
        validate_field("start value", self.start_value_field(0))?;
        validate_field("step increment", self.step_increment_field(0))?;
        validate_field("time step", self.time_step_field(0))?;
        validate_field("step count", self.step_count_field(0))?;

        validate_positive("Smallest step increase", self.smallest_step_increase)?;
        validate_positive("Smallest time step", self.smallest_time_step)?;
        validate_positive("Maximum flat step time", self.max_flat_step_time)?;

        if self.max_increment_steps() == 0 {
            return Err(ConfigError::new(format!(
                "Smallest step increase ({}) exceeds the value range ({})",
                self.smallest_step_increase,
                self.value_format.max_value()
            )));
        }
        if self.max_flat_step_time < self.smallest_time_step
            || self.max_flat_step_time > self.time_step_format.max_value()
        {
            return Err(ConfigError::new(format!(
                "Maximum flat step time ({}) is out of range ([{}, {}])",
                self.max_flat_step_time,
                self.smallest_time_step,
                self.time_step_format.max_value()
            )));
        }
        if self.min_steps == 0 || self.min_steps > self.max_step_count() {
            return Err(ConfigError::new(format!(
                "Minimum steps ({}) is out of range ([1, {}])",
                self.min_steps,
                self.max_step_count()
            )));
        }
        Ok(())
    }
}
