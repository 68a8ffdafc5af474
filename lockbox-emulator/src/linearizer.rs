use lockbox_core::{fixed_point::FixedPointFormat, register::RegisterFile};
use lockbox_driver::{
    error::LockboxDriverError, linearizer::LinearizerTable, operation::read_linearizer_table,
    Device,
};

/// Behavioural model of the linearizer module.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearizerEmulator {
    table: LinearizerTable,
    output_format: FixedPointFormat,
}

impl LinearizerEmulator {
    /// Loads the table of the linearizer module from `registers`.
    pub fn read<R: RegisterFile + ?Sized>(
        registers: &R,
        device: &Device,
    ) -> Result<Self, LockboxDriverError> {
        Ok(Self {
            table: read_linearizer_table(registers, device)?,
            output_format: device.linearizer().value_format(),
        })
    }

    /// Segment table held by the module.
    #[must_use]
    pub const fn table(&self) -> &LinearizerTable {
        &self.table
    }

    /// Output for the input `x`, saturated to the output range.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        self.table.evaluate(x).clamp(
            self.output_format.min_value(),
            self.output_format.max_value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use lockbox_core::register::Transaction;
    use lockbox_driver::{
        datagram::{Datagram, LinearizerFunction},
        operation::Operation,
    };

    use super::*;
    use crate::RegisterMemory;

    #[rstest::rstest]
    #[test]
    #[case(-1., -1.)]
    #[case(-0.25, -0.5)]
    #[case(0.5, 0.)]
    #[case(-0.25, 0.5)]
    #[case(-1., 1.)]
    fn apply(#[case] expect: f64, #[case] x: f64) -> anyhow::Result<()> {
        let device = Device::default();
        let mut tx = Transaction::new();
        LinearizerFunction::new([(-1., -1.), (0., 0.5), (1., -1.)])
            .operation(&device)?
            .pack(&device, &mut tx)?;
        let mut memory = RegisterMemory::new();
        tx.commit(&mut memory)?;

        let emulator = LinearizerEmulator::read(&memory, &device)?;
        assert_eq!(2, emulator.table().used_len());
        assert_abs_diff_eq!(expect, emulator.apply(x));
        Ok(())
    }

    #[test]
    fn saturates() -> anyhow::Result<()> {
        let device = Device::default();
        let mut tx = Transaction::new();
        LinearizerFunction::new([(-1., -1.), (0., 0.9)])
            .operation(&device)?
            .pack(&device, &mut tx)?;
        let mut memory = RegisterMemory::new();
        tx.commit(&mut memory)?;

        let emulator = LinearizerEmulator::read(&memory, &device)?;
        assert_abs_diff_eq!(8191. / 8192., emulator.apply(0.5));
        Ok(())
    }
}
