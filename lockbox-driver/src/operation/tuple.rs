use derive_new::new;
use lockbox_core::register::Transaction;

use super::Operation;
use crate::{device::Device, error::LockboxDriverError};

/// Two operations staged into the same transaction.
#[derive(Clone, Debug, PartialEq, new)]
pub struct CombinedOperation<O1, O2> {
    o1: O1,
    o2: O2,
}

impl<O1: Operation, O2: Operation> Operation for CombinedOperation<O1, O2> {
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError> {
        Ok(self.o1.pack(device, tx)? + self.o2.pack(device, tx)?)
    }
}
