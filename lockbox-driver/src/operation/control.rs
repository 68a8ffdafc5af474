use derive_new::new;
use lockbox_core::register::{RegisterFile, Transaction};

use super::Operation;
use crate::{
    datagram::RampControl, device::Device, error::LockboxDriverError, ramp::IdleConfiguration,
};

/// Writes the control word of the ramp module.
#[derive(Clone, Copy, Debug, PartialEq, new)]
pub struct RampControlOp {
    control: RampControl,
}

impl Operation for RampControlOp {
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError> {
        let config = device.ramp();
        let base = device.ramp_base();

        let default_value = config
            .default_value_field()
            .offset(base)
            .pack(self.control.default_value())
            .map_err(|source| LockboxDriverError::ControlOverflow {
                field: "default value",
                source,
            })?;
        let used_ramps = match self.control.used_ramps() {
            Some(n) if n > config.num_segments() => {
                return Err(LockboxDriverError::UsedRampsOutOfRange(
                    n,
                    config.num_segments(),
                ))
            }
            Some(n) => Some(config.used_ramps_field().offset(base).pack_raw(n as i64)),
            None => None,
        };

        let before = tx.len();
        tx.push(
            config
                .idle_configuration_field()
                .offset(base)
                .pack_raw(self.control.idle_configuration().bits() as i64),
        );
        tx.push(
            config
                .multiple_triggers_field()
                .offset(base)
                .pack_raw(self.control.multiple_triggers() as i64),
        );
        tx.push(default_value);
        tx.extend(used_ramps);
        Ok(tx.len() - before)
    }
}

/// Reads the control word of the ramp module.
pub fn read_ramp_control<R: RegisterFile + ?Sized>(
    registers: &R,
    device: &Device,
) -> Result<RampControl, LockboxDriverError> {
    let config = device.ramp();
    let base = device.ramp_base();
    let word = registers.read(base + config.idle_configuration_field().address())?;
    Ok(RampControl::new()
        .with_idle_configuration(IdleConfiguration::from_bits(
            config.idle_configuration_field().unpack_raw(word) as u8,
        ))
        .with_multiple_triggers(config.multiple_triggers_field().unpack_raw(word) != 0)
        .with_default_value(config.default_value_field().unpack(word))
        .with_used_ramps(config.used_ramps_field().unpack_raw(word) as usize))
}

#[cfg(test)]
mod tests {
    use super::{super::tests::commit, *};

    #[test]
    fn word() -> anyhow::Result<()> {
        let control = RampControl::new()
            .with_idle_configuration(IdleConfiguration::InverseRamp)
            .with_multiple_triggers(true)
            .with_default_value(-0.5)
            .with_used_ramps(3);
        let memory = commit(&RampControlOp::new(control), &Device::default())?;
        assert_eq!(
            Some(&(0b11 | 0b100 | (0x3000 << 3) | (3 << 17))),
            memory.words.get(&0x100)
        );
        assert_eq!(control, read_ramp_control(&memory, &Device::default())?);
        Ok(())
    }

    #[test]
    fn keeps_used_ramps() -> anyhow::Result<()> {
        let device = Device::default();
        let mut memory = commit(
            &RampControlOp::new(RampControl::new().with_used_ramps(5)),
            &device,
        )?;
        let mut tx = Transaction::new();
        assert_eq!(
            3,
            RampControlOp::new(RampControl::new().with_default_value(0.25)).pack(&device, &mut tx)?
        );
        tx.commit(&mut memory)?;
        let control = read_ramp_control(&memory, &device)?;
        assert_eq!(Some(5), control.used_ramps());
        assert_eq!(0.25, control.default_value());
        Ok(())
    }

    #[test]
    fn used_ramps_out_of_range() {
        let mut tx = Transaction::new();
        assert_eq!(
            Err(LockboxDriverError::UsedRampsOutOfRange(9, 8)),
            RampControlOp::new(RampControl::new().with_used_ramps(9))
                .pack(&Device::default(), &mut tx)
        );
        assert!(tx.is_empty());
    }

    #[test]
    fn default_value_overflow() {
        let mut tx = Transaction::new();
        assert!(matches!(
            RampControlOp::new(RampControl::new().with_default_value(2.))
                .pack(&Device::default(), &mut tx),
            Err(LockboxDriverError::ControlOverflow {
                field: "default value",
                ..
            })
        ));
    }
}
