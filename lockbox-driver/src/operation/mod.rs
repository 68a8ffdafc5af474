mod control;
mod linearizer;
mod ramp;
mod tuple;

pub use control::{read_ramp_control, RampControlOp};
pub use linearizer::{read_linearizer_table, LinearizerTableOp};
pub use ramp::{read_ramp_table, RampTableOp};
pub use tuple::CombinedOperation;

use lockbox_core::register::Transaction;

use crate::{device::Device, error::LockboxDriverError};

/// Stages the register writes of a datagram.
///
/// Packing never touches the device, so a failure leaves the registers untouched.
pub trait Operation: std::fmt::Debug {
    /// Stages the field writes into `tx` and returns the number of fields staged.
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError>;
}

impl<O: Operation + ?Sized> Operation for Box<O> {
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError> {
        self.as_ref().pack(device, tx)
    }
}

/// An operation that stages nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NullOp;

impl Operation for NullOp {
    fn pack(&self, _: &Device, _: &mut Transaction) -> Result<usize, LockboxDriverError> {
        Ok(0)
    }
}
