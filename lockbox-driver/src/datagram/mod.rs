mod control;
mod linearizer;
mod ramp;
mod tuple;

pub use control::RampControl;
pub use linearizer::LinearizerFunction;
pub use ramp::RampFunction;

use crate::{device::Device, error::LockboxDriverError, operation::Operation};

/// [`Datagram`] represents the data written to the device.
///
/// Everything that can fail is done in [`Datagram::operation`], before any register is touched.
pub trait Datagram: std::fmt::Debug {
    #[doc(hidden)]
    type O: Operation;

    #[doc(hidden)]
    fn operation(self, device: &Device) -> Result<Self::O, LockboxDriverError>;
}
