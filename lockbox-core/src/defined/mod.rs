/// Number of segments of the ramp and linearizer modules.
pub const NUM_SEGMENTS: usize = 8;

/// Distance between the base addresses of two modules.
pub const MODULE_ADDRESS_STRIDE: u32 = 0x1_0000;
/// Default base address of the ramp module.
pub const DEFAULT_RAMP_BASE: u32 = 0x0000_0000;
/// Default base address of the linearizer module.
pub const DEFAULT_LINEARIZER_BASE: u32 = DEFAULT_RAMP_BASE + MODULE_ADDRESS_STRIDE;

/// Offset of the ramp control word.
pub const RAMP_ADDR_CTL: u32 = 0x100;
/// Offset of the first ramp segment.
pub const RAMP_ADDR_SEGMENT: u32 = 0x104;
/// Distance between two consecutive ramp segments.
pub const RAMP_SEGMENT_STRIDE: u32 = 0x0C;

/// Offset of the first linearizer segment.
pub const LINEARIZER_ADDR_SEGMENT: u32 = 0x100;
/// Distance between two consecutive linearizer segments.
pub const LINEARIZER_SEGMENT_STRIDE: u32 = 0x08;

/// Width of a voltage field in bits.
pub const VOLTAGE_BITS: u8 = 14;
/// Normalization of a voltage field.
pub const VOLTAGE_NORM: f64 = (1 << 13) as f64;
/// Width of the step time field in bits.
pub const TIME_STEP_BITS: u8 = 24;
/// FPGA clock frequency in Hz.
pub const FPGA_CLK_FREQ: f64 = 125e6;
/// Width of the step count field in bits.
pub const STEP_COUNT_BITS: u8 = 14;
/// Width of the linearizer slope field in bits.
pub const SLOPE_BITS: u8 = 20;
/// Normalization of the linearizer slope field.
pub const SLOPE_NORM: f64 = (1 << 14) as f64;

/// Smallest representable voltage increment of a ramp step.
pub const SMALLEST_STEP_INCREASE: f64 = 1.0 / VOLTAGE_NORM;
/// Smallest step duration of a ramp in seconds.
pub const SMALLEST_TIME_STEP: f64 = 24e-9;
/// Longest step duration used for a flat segment in seconds.
pub const MAX_FLAT_STEP_TIME: f64 = 0.10;
/// Minimum number of steps of a sloped segment.
pub const MIN_STEPS: u32 = 2;

/// Sentinel written to unused linearizer segments.
pub const LINEARIZER_SENTINEL: f64 = -1.0;
