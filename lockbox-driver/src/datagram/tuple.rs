use super::Datagram;
use crate::{device::Device, error::LockboxDriverError, operation::CombinedOperation};

impl<D1: Datagram, D2: Datagram> Datagram for (D1, D2) {
    type O = CombinedOperation<D1::O, D2::O>;

    fn operation(self, device: &Device) -> Result<Self::O, LockboxDriverError> {
        Ok(CombinedOperation::new(
            self.0.operation(device)?,
            self.1.operation(device)?,
        ))
    }
}
