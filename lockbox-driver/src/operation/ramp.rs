use derive_new::new;
use lockbox_core::register::{RegisterError, RegisterFile, Transaction};

use super::Operation;
use crate::{
    device::Device,
    error::LockboxDriverError,
    ramp::{RampSegment, RampTable},
};

/// Writes every segment slot of the ramp module and the number of used ramps.
#[derive(Clone, Debug, PartialEq, new)]
pub struct RampTableOp {
    table: RampTable,
}

impl RampTableOp {
    /// Table to be written.
    #[must_use]
    pub const fn table(&self) -> &RampTable {
        &self.table
    }
}

impl Operation for RampTableOp {
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError> {
        let config = device.ramp();
        let base = device.ramp_base();
        let num_segments = config.num_segments();
        if self.table.len() > num_segments {
            return Err(LockboxDriverError::TooManySegments(
                self.table.len(),
                num_segments,
            ));
        }

        let before = tx.len();
        (0..num_segments).try_for_each(|i| -> Result<(), LockboxDriverError> {
            let segment = self.table.get(i).copied().unwrap_or_default();
            tx.push(
                config
                    .start_value_field(i)
                    .offset(base)
                    .pack(segment.start_value())
                    .map_err(LockboxDriverError::overflow("start value", i))?,
            );
            tx.push(
                config
                    .step_increment_field(i)
                    .offset(base)
                    .pack(segment.step_increment())
                    .map_err(LockboxDriverError::overflow("step increment", i))?,
            );
            tx.push(
                config
                    .time_step_field(i)
                    .offset(base)
                    .pack(segment.time_step())
                    .map_err(LockboxDriverError::overflow("time step", i))?,
            );
            tx.push(
                config
                    .step_count_field(i)
                    .offset(base)
                    .try_pack_raw(segment.step_count() as i64)
                    .map_err(LockboxDriverError::overflow("step count", i))?,
            );
            Ok(())
        })?;

        let used = self.table.used_len();
        tx.push(
            config
                .used_ramps_field()
                .offset(base)
                .pack_raw(used as i64),
        );

        tracing::debug!(
            "Staged {} ramp segments ({} used)",
            num_segments,
            used
        );
        Ok(tx.len() - before)
    }
}

/// Reads every segment slot of the ramp module.
pub fn read_ramp_table<R: RegisterFile + ?Sized>(
    registers: &R,
    device: &Device,
) -> Result<RampTable, LockboxDriverError> {
    let config = device.ramp();
    let base = device.ramp_base();
    let segments = (0..config.num_segments())
        .map(|i| {
            Ok(RampSegment::new(
                config.start_value_field(i).offset(base).read(registers)?,
                config.step_increment_field(i).offset(base).read(registers)?,
                config.time_step_field(i).offset(base).read(registers)?,
                config.step_count_field(i).offset(base).read_raw(registers)? as u32,
            ))
        })
        .collect::<Result<Vec<_>, RegisterError>>()?;
    Ok(RampTable::new(segments))
}
