use lockbox_core::{
    breakpoint::BreakpointError, config::ConfigError, fixed_point::FixedPointError,
    register::RegisterError,
};
use thiserror::Error;

/// A interface for error handling in lockbox-driver.
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum LockboxDriverError {
    /// More breakpoints or segments than the table slots allow.
    #[error("Number of entries ({0}) exceeds the maximum ({1})")]
    TooManySegments(usize, usize),
    /// No step count, increment and time step reproduce the segment.
    #[error("Segment {segment} (delta: {delta}, duration: {duration} s) cannot be represented")]
    RampNotRepresentable {
        /// Index of the segment.
        segment: usize,
        /// Requested change of the value.
        delta: f64,
        /// Requested duration in seconds.
        duration: f64,
    },
    /// A value does not fit in its register field.
    #[error("Field '{field}' of segment {segment}: {source}")]
    FixedPointOverflow {
        /// Name of the field.
        field: &'static str,
        /// Index of the segment.
        segment: usize,
        /// Codec error.
        source: FixedPointError,
    },
    /// A value does not fit in its field of the control word.
    #[error("Control field '{field}': {source}")]
    ControlOverflow {
        /// Name of the field.
        field: &'static str,
        /// Codec error.
        source: FixedPointError,
    },
    /// Number of used ramps is out of range.
    #[error("Number of used ramps ({0}) is out of range ([0, {1}])")]
    UsedRampsOutOfRange(usize, usize),
    /// Invalid breakpoint list.
    #[error("{0}")]
    Breakpoint(#[from] BreakpointError),
    /// Error in the register file.
    #[error("{0}")]
    Register(#[from] RegisterError),
    /// Invalid configuration.
    #[error("{0}")]
    InvalidConfig(#[from] ConfigError),
}

impl LockboxDriverError {
    pub(crate) fn overflow(
        field: &'static str,
        segment: usize,
    ) -> impl FnOnce(FixedPointError) -> Self {
        move |source| Self::FixedPointOverflow {
            field,
            segment,
            source,
        }
    }
}
