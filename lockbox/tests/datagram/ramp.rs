use approx::assert_abs_diff_eq;
use lockbox::prelude::*;
use lockbox_driver::ramp::RampEncoder;
use lockbox_emulator::{RampEmulator, RegisterMemory};

use crate::scenario;

#[test]
fn three_segments() -> anyhow::Result<()> {
    let mut controller = Controller::builder()
        .with_verify(true)
        .open(RegisterMemory::new())?;
    controller.send(RampFunction::new(scenario()))?;

    let table = controller.ramp_table()?;
    let expect = RampEncoder::new(RampConfig::default()).encode(&scenario())?;
    assert_eq!(3, table.used_len());
    table.iter().zip(expect.iter()).for_each(|(t, e)| {
        assert_eq!(e.start_value(), t.start_value());
        assert_eq!(e.step_increment(), t.step_increment());
        assert_eq!(e.step_count(), t.step_count());
        assert_abs_diff_eq!(e.time_step(), t.time_step(), epsilon = 1e-15);
    });
    assert_eq!(Some(3), controller.ramp_control()?.used_ramps());

    let decoded = controller.ramp_function()?;
    assert_eq!(4, decoded.len());
    decoded.iter().zip(scenario().iter()).for_each(|(d, e)| {
        assert_abs_diff_eq!(e.x, d.x, epsilon = 1e-6);
        assert_abs_diff_eq!(e.y, d.y, epsilon = 1e-3);
    });
    Ok(())
}

#[test]
fn from_xy() -> anyhow::Result<()> {
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send(RampFunction::new(Breakpoints::from_xy(
        &[0., 1e-3, 2e-3, 2.5e-3],
        &[0.5, -0.5, 0., 0.5],
    )?))?;
    assert_eq!(scenario().len(), controller.ramp_function()?.len());
    Ok(())
}

#[test]
fn ratio_search() -> anyhow::Result<()> {
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send(
        RampFunction::new([(0., 0.), (8192. * 24e-9, 1.)]).with_allocator(RatioSearch),
    )?;
    let table = controller.ramp_table()?;
    assert_eq!(1, table.used_len());
    let decoded = controller.ramp_function()?;
    assert_abs_diff_eq!(8191. / 8192., decoded[1].y, epsilon = 1. / 8192.);
    Ok(())
}

#[test]
fn all_slots() -> anyhow::Result<()> {
    let bp: Breakpoints = (0..9)
        .map(|i| (i as f64 * 1e-3, if i % 2 == 0 { 0.5 } else { -0.5 }))
        .collect();
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send(RampFunction::new(bp))?;
    assert_eq!(8, controller.ramp_table()?.used_len());
    assert_eq!(Some(8), controller.ramp_control()?.used_ramps());
    assert_eq!(9, controller.ramp_function()?.len());
    Ok(())
}

#[test]
fn control() -> anyhow::Result<()> {
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send(RampFunction::new(scenario()))?;
    controller.send(
        RampControl::new()
            .with_idle_configuration(IdleConfiguration::InverseRamp)
            .with_multiple_triggers(true)
            .with_default_value(-0.125),
    )?;
    let control = controller.ramp_control()?;
    assert_eq!(IdleConfiguration::InverseRamp, control.idle_configuration());
    assert!(control.multiple_triggers());
    assert_eq!(-0.125, control.default_value());
    assert_eq!(Some(3), control.used_ramps());

    assert_eq!(
        Err(LockboxError::Internal(
            LockboxDriverError::UsedRampsOutOfRange(9, 8)
        )),
        controller.send(RampControl::new().with_used_ramps(9))
    );
    Ok(())
}

#[test]
fn playback() -> anyhow::Result<()> {
    let device = Device::default();
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send((
        RampFunction::new(scenario()),
        RampControl::new().with_idle_configuration(IdleConfiguration::End),
    ))?;
    let emulator = RampEmulator::read(controller.registers(), &device)?;
    let decoded = controller.ramp_function()?;
    decoded
        .iter()
        .take(emulator.played().len())
        .zip(emulator.played())
        .zip(scenario().iter())
        .for_each(|((d, s), e)| {
            assert_abs_diff_eq!(
                e.y,
                emulator.output_at(d.x),
                epsilon = s.step_increment().abs() + 1e-3
            );
        });
    assert_abs_diff_eq!(0.5, emulator.output_at(1.), epsilon = 1e-3);
    Ok(())
}

#[test]
fn random_playback() -> anyhow::Result<()> {
    use rand::Rng;

    let device = Device::default();
    let mut rng = rand::rng();
    for _ in 0..10 {
        let len = rng.random_range(2..=9);
        let mut time = 0.;
        let bp: Breakpoints = (0..len)
            .map(|i| {
                if i > 0 {
                    time += rng.random_range(1e-4..4.9e-3);
                }
                (time, rng.random_range(-1.0..0.99))
            })
            .collect();

        let mut controller = Controller::builder().open(RegisterMemory::new())?;
        controller.send(RampFunction::new(bp.clone()))?;

        let emulator = RampEmulator::read(controller.registers(), &device)?;
        assert_eq!(bp.len() - 1, emulator.played().len());
        assert_abs_diff_eq!(
            bp.last().map_or(0., |p| p.y),
            emulator.final_value(),
            epsilon = 2. / 8192.
                + emulator
                    .played()
                    .last()
                    .map_or(0., |s| s.step_increment().abs())
        );
    }
    Ok(())
}
