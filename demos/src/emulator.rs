mod tests;

use anyhow::Result;

use lockbox::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let controller = Controller::builder()
        .with_verify(true)
        .open(RegisterMemory::new())?;

    tests::run(controller)
}
