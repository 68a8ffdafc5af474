use approx::assert_abs_diff_eq;
use lockbox::prelude::*;
use lockbox_emulator::{LinearizerEmulator, RegisterMemory};

#[test]
fn round_trip() -> anyhow::Result<()> {
    let points = Breakpoints::from([(-1., -1.), (-0.5, 0.), (0.25, 0.5), (1., 0.75)]);
    let mut controller = Controller::builder()
        .with_verify(true)
        .open(RegisterMemory::new())?;
    controller.send(LinearizerFunction::new(points.clone()))?;

    let table = controller.linearizer_table()?;
    assert_eq!(8, table.len());
    assert_eq!(3, table.used_len());
    assert!(table[3..].iter().all(|s| *s == LinearizerSegment::UNUSED));

    let decoded = controller.linearizer_function()?;
    assert_eq!(points.len(), decoded.len());
    decoded.iter().zip(points.iter()).for_each(|(d, e)| {
        assert_abs_diff_eq!(e.x, d.x, epsilon = 1. / 8192.);
        assert_abs_diff_eq!(e.y, d.y, epsilon = 1e-3);
    });
    Ok(())
}

#[rstest::rstest]
#[test]
#[case(-1., -1.)]
#[case(-0.5, -0.75)]
#[case(0., -0.5)]
#[case(0.5, 0.25)]
#[case(0.625, 0.625)]
fn emulator(#[case] expect: f64, #[case] x: f64) -> anyhow::Result<()> {
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    controller.send(LinearizerFunction::new([(-1., -1.), (-0.5, 0.), (0.25, 0.5), (1., 0.75)]))?;
    let emulator = LinearizerEmulator::read(controller.registers(), &controller.device())?;
    assert_abs_diff_eq!(expect, emulator.apply(x), epsilon = 1e-3);
    Ok(())
}

#[test]
fn too_few_points() -> anyhow::Result<()> {
    let mut controller = Controller::builder().open(RegisterMemory::new())?;
    assert!(controller
        .send(LinearizerFunction::new([(0., 0.)]))
        .is_err());
    assert!(controller.registers().words().is_empty());
    Ok(())
}
