use derive_new::new;
use lockbox_core::register::{RegisterError, RegisterFile, Transaction};

use super::Operation;
use crate::{
    device::Device,
    error::LockboxDriverError,
    linearizer::{LinearizerSegment, LinearizerTable},
};

/// Writes every segment slot of the linearizer module.
#[derive(Clone, Debug, PartialEq, new)]
pub struct LinearizerTableOp {
    table: LinearizerTable,
}

impl LinearizerTableOp {
    /// Table to be written.
    #[must_use]
    pub const fn table(&self) -> &LinearizerTable {
        &self.table
    }
}

impl Operation for LinearizerTableOp {
    fn pack(&self, device: &Device, tx: &mut Transaction) -> Result<usize, LockboxDriverError> {
        let config = device.linearizer();
        let base = device.linearizer_base();
        let num_segments = config.num_segments();
        if self.table.len() > num_segments {
            return Err(LockboxDriverError::TooManySegments(
                self.table.len(),
                num_segments,
            ));
        }

        let before = tx.len();
        (0..num_segments).try_for_each(|i| -> Result<(), LockboxDriverError> {
            let segment = self
                .table
                .get(i)
                .copied()
                .unwrap_or(LinearizerSegment::UNUSED);
            tx.push(
                config
                    .edge_point_field(i)
                    .offset(base)
                    .pack(segment.edge_point())
                    .map_err(LockboxDriverError::overflow("edge point", i))?,
            );
            tx.push(
                config
                    .intercept_field(i)
                    .offset(base)
                    .pack(segment.intercept())
                    .map_err(LockboxDriverError::overflow("intercept", i))?,
            );
            tx.push(
                config
                    .slope_field(i)
                    .offset(base)
                    .pack(segment.slope())
                    .map_err(LockboxDriverError::overflow("slope", i))?,
            );
            Ok(())
        })?;
        Ok(tx.len() - before)
    }
}

/// Reads every segment slot of the linearizer module.
pub fn read_linearizer_table<R: RegisterFile + ?Sized>(
    registers: &R,
    device: &Device,
) -> Result<LinearizerTable, LockboxDriverError> {
    let config = device.linearizer();
    let base = device.linearizer_base();
    let segments = (0..config.num_segments())
        .map(|i| {
            Ok(LinearizerSegment::new(
                config.edge_point_field(i).offset(base).read(registers)?,
                config.intercept_field(i).offset(base).read(registers)?,
                config.slope_field(i).offset(base).read(registers)?,
            ))
        })
        .collect::<Result<Vec<_>, RegisterError>>()?;
    Ok(LinearizerTable::new(segments))
}
