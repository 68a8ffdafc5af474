use getset::CopyGetters;
use lockbox_core::register::RegisterFile;
use lockbox_driver::{
    datagram::RampControl,
    error::LockboxDriverError,
    operation::{read_ramp_control, read_ramp_table},
    ramp::{IdleConfiguration, RampSegment, RampTable},
    Device,
};

/// Behavioural model of the ramp module.
///
/// Time is measured from the trigger. Every segment is assumed to be triggered as soon as the
/// previous one completes.
#[derive(Clone, Debug, PartialEq, CopyGetters)]
pub struct RampEmulator {
    table: RampTable,
    #[getset(get_copy = "pub")]
    /// Control word of the module.
    control: RampControl,
}

impl RampEmulator {
    /// Loads the state of the ramp module from `registers`.
    pub fn read<R: RegisterFile + ?Sized>(
        registers: &R,
        device: &Device,
    ) -> Result<Self, LockboxDriverError> {
        Ok(Self {
            table: read_ramp_table(registers, device)?,
            control: read_ramp_control(registers, device)?,
        })
    }

    /// Segment table held by the module.
    #[must_use]
    pub const fn table(&self) -> &RampTable {
        &self.table
    }

    /// Segments played after a trigger.
    ///
    /// Playback stops at the first segment without steps even if more ramps are enabled.
    #[must_use]
    pub fn played(&self) -> &[RampSegment] {
        let n = self
            .control
            .used_ramps()
            .unwrap_or(0)
            .min(self.table.used_len());
        &self.table[..n]
    }

    /// Duration of the function in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.played().iter().map(RampSegment::duration).sum()
    }

    /// Value at the start of the function.
    #[must_use]
    pub fn start_value(&self) -> f64 {
        self.played()
            .first()
            .map_or(self.control.default_value(), RampSegment::start_value)
    }

    /// Value at the end of the function.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.played()
            .last()
            .map_or(self.control.default_value(), RampSegment::final_value)
    }

    /// Output while waiting for a trigger.
    #[must_use]
    pub fn idle_output(&self) -> f64 {
        if self.played().is_empty() {
            return self.control.default_value();
        }
        match self.control.idle_configuration() {
            IdleConfiguration::DefaultValue => self.control.default_value(),
            IdleConfiguration::Start | IdleConfiguration::InverseRamp => self.start_value(),
            IdleConfiguration::End => self.final_value(),
        }
    }

    /// Output `t` seconds after the trigger.
    ///
    /// With [`IdleConfiguration::InverseRamp`] the function is played backwards once it has
    /// completed, ending at its start value.
    #[must_use]
    pub fn output_at(&self, t: f64) -> f64 {
        let duration = self.duration();
        if t < 0. || self.played().is_empty() {
            return self.idle_output();
        }
        if t < duration {
            return self.forward(t);
        }
        match self.control.idle_configuration() {
            IdleConfiguration::InverseRamp if t < 2. * duration => self.forward(2. * duration - t),
            _ => self.idle_output(),
        }
    }

    fn forward(&self, t: f64) -> f64 {
        let mut elapsed = 0.;
        for s in self.played() {
            let end = elapsed + s.duration();
            if t < end {
                return Self::step(s, t - elapsed);
            }
            elapsed = end;
        }
        self.final_value()
    }

    fn step(segment: &RampSegment, tau: f64) -> f64 {
        if segment.time_step() <= 0. {
            return segment.start_value();
        }
        let steps = ((tau / segment.time_step()) + 1e-9)
            .floor()
            .clamp(0., segment.step_count() as f64);
        segment.start_value() + segment.step_increment() * steps
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use lockbox_core::register::Transaction;
    use lockbox_driver::{
        datagram::{Datagram, RampFunction},
        operation::Operation,
    };

    use super::*;
    use crate::RegisterMemory;

    fn load(datagram: impl Datagram) -> anyhow::Result<RampEmulator> {
        let device = Device::default();
        let mut tx = Transaction::new();
        datagram.operation(&device)?.pack(&device, &mut tx)?;
        let mut memory = RegisterMemory::new();
        tx.commit(&mut memory)?;
        Ok(RampEmulator::read(&memory, &device)?)
    }

    fn table() -> RampTable {
        RampTable::new(vec![
            RampSegment::new(0., 0.125, 1e-6, 4),
            RampSegment::new(0.5, -0.25, 2e-6, 2),
        ])
    }

    #[rstest::rstest]
    #[test]
    #[case(0., 0.)]
    #[case(0., 0.9e-6)]
    #[case(0.125, 1.1e-6)]
    #[case(0.375, 3.5e-6)]
    #[case(0.5, 4.5e-6)]
    #[case(0.25, 6.5e-6)]
    fn output_at(#[case] expect: f64, #[case] t: f64) -> anyhow::Result<()> {
        let emulator = load((table(), RampControl::new().with_default_value(-0.5)))?;
        assert_abs_diff_eq!(8e-6, emulator.duration(), epsilon = 1e-12);
        assert_abs_diff_eq!(expect, emulator.output_at(t));
        Ok(())
    }

    #[rstest::rstest]
    #[test]
    #[case(-0.5, IdleConfiguration::DefaultValue)]
    #[case(0., IdleConfiguration::Start)]
    #[case(0., IdleConfiguration::End)]
    #[case(0., IdleConfiguration::InverseRamp)]
    fn idle(#[case] expect: f64, #[case] configuration: IdleConfiguration) -> anyhow::Result<()> {
        let emulator = load((
            table(),
            RampControl::new()
                .with_default_value(-0.5)
                .with_idle_configuration(configuration),
        ))?;
        assert_abs_diff_eq!(expect, emulator.output_at(1.));
        assert_abs_diff_eq!(expect, emulator.output_at(-1.));
        Ok(())
    }

    #[test]
    fn inverse_ramp() -> anyhow::Result<()> {
        let emulator = load((
            table(),
            RampControl::new().with_idle_configuration(IdleConfiguration::InverseRamp),
        ))?;
        assert_abs_diff_eq!(0.25, emulator.output_at(8.5e-6));
        assert_abs_diff_eq!(0.375, emulator.output_at(12.5e-6));
        assert_abs_diff_eq!(0., emulator.output_at(16.5e-6));
        Ok(())
    }

    #[test]
    fn disabled() -> anyhow::Result<()> {
        let emulator = load((
            table(),
            RampControl::new()
                .with_used_ramps(0)
                .with_default_value(0.75),
        ))?;
        assert_eq!(0., emulator.duration());
        assert_eq!(0.75, emulator.output_at(1e-6));
        Ok(())
    }

    #[test]
    fn used_ramps_beyond_table() -> anyhow::Result<()> {
        let emulator = load((
            RampTable::new(vec![RampSegment::new(0., 0.125, 1e-6, 4)]),
            RampControl::new()
                .with_used_ramps(8)
                .with_idle_configuration(IdleConfiguration::End),
        ))?;
        assert_eq!(1, emulator.played().len());
        assert_abs_diff_eq!(4e-6, emulator.duration(), epsilon = 1e-12);
        assert_abs_diff_eq!(0.5, emulator.final_value());
        assert_abs_diff_eq!(0.5, emulator.output_at(1.));
        Ok(())
    }

    #[test]
    fn playback_hits_breakpoints() -> anyhow::Result<()> {
        let breakpoints = [(0., 0.5), (1e-3, -0.5), (2e-3, 0.), (2.5e-3, 0.5)];
        let emulator = load(RampFunction::new(breakpoints))?;
        assert_eq!(3, emulator.played().len());
        assert_abs_diff_eq!(2.5e-3, emulator.duration(), epsilon = 1e-6);
        let mut t = 0.;
        emulator
            .played()
            .iter()
            .zip(breakpoints.iter())
            .for_each(|(s, &(_, y))| {
                assert_abs_diff_eq!(
                    y,
                    emulator.output_at(t),
                    epsilon = s.step_increment().abs() + 1e-3
                );
                t += s.duration();
            });
        assert_abs_diff_eq!(0.5, emulator.final_value(), epsilon = 1e-3);
        Ok(())
    }
}
