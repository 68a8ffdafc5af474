use lockbox_core::breakpoint::Breakpoints;

use super::Datagram;
use crate::{
    device::Device,
    error::LockboxDriverError,
    linearizer::{LinearizerEncoder, LinearizerTable},
    operation::LinearizerTableOp,
};

/// Calibration curve applied by the linearizer module.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearizerFunction {
    points: Breakpoints,
}

impl LinearizerFunction {
    /// Creates a new [`LinearizerFunction`] from `(input, output)` points.
    #[must_use]
    pub fn new(points: impl Into<Breakpoints>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Points of the curve.
    #[must_use]
    pub const fn points(&self) -> &Breakpoints {
        &self.points
    }
}

impl Datagram for LinearizerFunction {
    type O = LinearizerTableOp;

    fn operation(self, device: &Device) -> Result<Self::O, LockboxDriverError> {
        let table = LinearizerEncoder::new(device.linearizer()).encode(&self.points)?;
        Ok(LinearizerTableOp::new(table))
    }
}

impl Datagram for LinearizerTable {
    type O = LinearizerTableOp;

    fn operation(self, _: &Device) -> Result<Self::O, LockboxDriverError> {
        Ok(LinearizerTableOp::new(self))
    }
}
