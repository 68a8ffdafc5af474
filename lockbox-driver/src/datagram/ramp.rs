use lockbox_core::breakpoint::Breakpoints;

use super::Datagram;
use crate::{
    device::Device,
    error::LockboxDriverError,
    operation::RampTableOp,
    ramp::{
        allocator::{DirectScan, SegmentAllocator},
        RampEncoder, RampTable,
    },
};

/// Piecewise-linear waveform played by the ramp module.
///
/// # Example
///
/// ```
/// # use lockbox_driver::datagram::RampFunction;
/// let ramp = RampFunction::new([(0., 0.5), (1e-3, -0.5), (2e-3, 0.), (2.5e-3, 0.5)]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RampFunction<A: SegmentAllocator = DirectScan> {
    breakpoints: Breakpoints,
    allocator: A,
}

impl RampFunction {
    /// Creates a new [`RampFunction`] from `(time, value)` breakpoints.
    #[must_use]
    pub fn new(breakpoints: impl Into<Breakpoints>) -> Self {
        Self {
            breakpoints: breakpoints.into(),
            allocator: DirectScan,
        }
    }
}

impl<A: SegmentAllocator> RampFunction<A> {
    /// Replaces the segment allocator.
    #[must_use]
    pub fn with_allocator<B: SegmentAllocator>(self, allocator: B) -> RampFunction<B> {
        RampFunction {
            breakpoints: self.breakpoints,
            allocator,
        }
    }

    /// Breakpoints of the waveform.
    #[must_use]
    pub const fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }
}

impl<A: SegmentAllocator> Datagram for RampFunction<A> {
    type O = RampTableOp;

    fn operation(self, device: &Device) -> Result<Self::O, LockboxDriverError> {
        let table = RampEncoder::with_allocator(device.ramp(), self.allocator)
            .encode(&self.breakpoints)?;
        Ok(RampTableOp::new(table))
    }
}

impl Datagram for RampTable {
    type O = RampTableOp;

    fn operation(self, _: &Device) -> Result<Self::O, LockboxDriverError> {
        Ok(RampTableOp::new(self))
    }
}
