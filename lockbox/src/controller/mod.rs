mod builder;

use getset::{CopyGetters, Getters, MutGetters};
use itertools::Itertools;
use lockbox_core::{
    breakpoint::Breakpoints,
    register::{RegisterFile, Transaction},
};
use lockbox_driver::{
    datagram::{Datagram, RampControl},
    linearizer::{self, LinearizerTable},
    operation::{read_linearizer_table, read_ramp_control, read_ramp_table, Operation},
    ramp::{self, RampTable},
    Device,
};

use crate::error::LockboxError;

pub use builder::ControllerBuilder;

/// Controller of the ramp and linearizer modules of a device.
///
/// All encoding happens before the first register access, and a commit that fails halfway
/// restores the words it has written.
#[derive(Getters, MutGetters, CopyGetters)]
pub struct Controller<R: RegisterFile> {
    #[getset(get = "pub", get_mut = "pub")]
    /// Register file of the device.
    registers: R,
    #[getset(get_copy = "pub")]
    /// Configuration and addresses of the modules.
    device: Device,
    verify: bool,
}

impl Controller<Box<dyn RegisterFile>> {
    /// Creates a [`ControllerBuilder`] for the default device.
    #[must_use]
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::new(Device::default())
    }
}

impl<R: RegisterFile> Controller<R> {
    /// Encodes `datagram` and writes it to the device.
    ///
    /// Returns the number of words written.
    #[tracing::instrument(skip(self, datagram))]
    pub fn send(&mut self, datagram: impl Datagram) -> Result<usize, LockboxError> {
        tracing::debug!("Send {:?}", datagram);
        let operation = datagram.operation(&self.device)?;
        let mut tx = Transaction::new();
        operation.pack(&self.device, &mut tx)?;

        let written = tx.commit(&mut self.registers)?;
        if self.verify {
            self.verify(&tx)?;
        }
        Ok(written)
    }

    fn verify(&self, tx: &Transaction) -> Result<(), LockboxError> {
        let words = tx.words();
        tracing::trace!(
            "Verify: {}",
            words
                .iter()
                .format_with(", ", |w, f| f(&format_args!("{:#06X}", w.address())))
        );
        words.iter().try_for_each(|w| {
            let actual = self.registers.read(w.address())?;
            if actual & w.mask() != w.value() & w.mask() {
                return Err(LockboxError::VerifyFailed {
                    address: w.address(),
                    expected: w.value() & w.mask(),
                    actual: actual & w.mask(),
                    mask: w.mask(),
                });
            }
            Ok(())
        })
    }

    /// Segment table held by the ramp module.
    pub fn ramp_table(&self) -> Result<RampTable, LockboxError> {
        Ok(read_ramp_table(&self.registers, &self.device)?)
    }

    /// Breakpoints of the waveform held by the ramp module.
    pub fn ramp_function(&self) -> Result<Breakpoints, LockboxError> {
        Ok(ramp::decode(&self.ramp_table()?))
    }

    /// Control word of the ramp module.
    pub fn ramp_control(&self) -> Result<RampControl, LockboxError> {
        Ok(read_ramp_control(&self.registers, &self.device)?)
    }

    /// Segment table held by the linearizer module.
    pub fn linearizer_table(&self) -> Result<LinearizerTable, LockboxError> {
        Ok(read_linearizer_table(&self.registers, &self.device)?)
    }

    /// Calibration curve held by the linearizer module.
    pub fn linearizer_function(&self) -> Result<Breakpoints, LockboxError> {
        Ok(linearizer::decode(
            &self.linearizer_table()?,
            &self.device.linearizer(),
        ))
    }

    /// Consumes the controller and returns the register file.
    #[must_use]
    pub fn into_registers(self) -> R {
        self.registers
    }
}

#[cfg(test)]
mod tests {
    use lockbox_core::{
        config::RampConfig,
        register::{RegisterError, RegisterFile},
    };
    use lockbox_driver::{datagram::RampFunction, error::LockboxDriverError};
    use lockbox_emulator::RegisterMemory;

    use super::*;

    #[derive(Debug, Default)]
    struct StuckBit(RegisterMemory);

    impl RegisterFile for StuckBit {
        fn read(&self, address: u32) -> Result<u32, RegisterError> {
            self.0.read(address)
        }

        fn write(&mut self, address: u32, value: u32) -> Result<(), RegisterError> {
            self.0.write(address, value & !0x1)
        }
    }

    #[test]
    fn open_invalid() {
        assert!(matches!(
            Controller::builder()
                .with_ramp(RampConfig::default().with_num_segments(0))
                .open(RegisterMemory::new()),
            Err(LockboxError::Internal(LockboxDriverError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn send() -> anyhow::Result<()> {
        let mut controller = Controller::builder().open(RegisterMemory::new())?;
        assert_eq!(
            25,
            controller.send(RampFunction::new([(0., 0.5), (1e-3, -0.5)]))?
        );
        assert_eq!(25, controller.registers().write_count());
        assert_eq!(2, controller.ramp_function()?.len());
        Ok(())
    }

    #[test]
    fn verify() -> anyhow::Result<()> {
        let mut controller = Controller::builder()
            .with_verify(true)
            .open(StuckBit::default())?;
        assert_eq!(
            Err(LockboxError::VerifyFailed {
                address: 0x100,
                expected: 0x1,
                actual: 0x0,
                mask: 0x1_FFFF,
            }),
            controller.send(
                RampControl::new()
                    .with_idle_configuration(lockbox_driver::ramp::IdleConfiguration::Start)
            )
        );
        Ok(())
    }

    #[test]
    fn boxed() -> anyhow::Result<()> {
        let mut controller = Controller::builder()
            .open(Box::new(RegisterMemory::new()) as Box<dyn RegisterFile>)?;
        controller.send(RampControl::new().with_default_value(0.5))?;
        assert_eq!(0.5, controller.ramp_control()?.default_value());
        Ok(())
    }
}
