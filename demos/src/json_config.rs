use anyhow::Result;

use lockbox::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let device = match std::env::args().nth(1) {
        Some(path) => serde_json::from_str::<Device>(&std::fs::read_to_string(path)?)?,
        None => {
            let device = Device::default();
            println!("{}", serde_json::to_string_pretty(&device)?);
            device
        }
    };
    device.validate()?;

    let mut controller = Controller::builder()
        .with_ramp(device.ramp())
        .with_ramp_base(device.ramp_base())
        .with_linearizer(device.linearizer())
        .with_linearizer_base(device.linearizer_base())
        .open(RegisterMemory::new())?;
    controller.send(RampFunction::new([(0., -0.5), (1e-3, 0.5)]))?;
    tracing::info!("Ramp table: {:?}", controller.ramp_table()?.used());
    Ok(())
}
