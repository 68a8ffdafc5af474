use lockbox_core::{
    config::{LinearizerConfig, RampConfig},
    register::RegisterFile,
};
use lockbox_driver::Device;

use super::Controller;
use crate::error::LockboxError;

/// Builder for [`Controller`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControllerBuilder {
    device: Device,
    verify: bool,
}

impl ControllerBuilder {
    pub(crate) const fn new(device: Device) -> Self {
        Self {
            device,
            verify: false,
        }
    }

    /// Sets the configuration of the ramp module.
    #[must_use]
    pub const fn with_ramp(self, config: RampConfig) -> Self {
        Self {
            device: self.device.with_ramp(config),
            ..self
        }
    }

    /// Sets the base address of the ramp module.
    #[must_use]
    pub const fn with_ramp_base(self, base: u32) -> Self {
        Self {
            device: self.device.with_ramp_base(base),
            ..self
        }
    }

    /// Sets the configuration of the linearizer module.
    #[must_use]
    pub const fn with_linearizer(self, config: LinearizerConfig) -> Self {
        Self {
            device: self.device.with_linearizer(config),
            ..self
        }
    }

    /// Sets the base address of the linearizer module.
    #[must_use]
    pub const fn with_linearizer_base(self, base: u32) -> Self {
        Self {
            device: self.device.with_linearizer_base(base),
            ..self
        }
    }

    /// Reads back every committed word and compares it with what was written.
    #[must_use]
    pub const fn with_verify(self, verify: bool) -> Self {
        Self { verify, ..self }
    }

    /// Opens a [`Controller`] on `registers`.
    #[tracing::instrument(level = "debug", skip(registers))]
    pub fn open<R: RegisterFile>(self, registers: R) -> Result<Controller<R>, LockboxError> {
        self.device.validate()?;
        tracing::debug!("Open controller: {:?}", self.device);
        Ok(Controller {
            registers,
            device: self.device,
            verify: self.verify,
        })
    }
}
