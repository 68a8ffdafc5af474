mod error;
mod linearizer;
mod ramp;

pub use error::ConfigError;
pub use linearizer::LinearizerConfig;
pub use ramp::RampConfig;

use crate::{fixed_point::FixedPointFormat, register::Field};

fn validate_format(name: &str, format: FixedPointFormat) -> Result<(), ConfigError> {
    if !(1..=32).contains(&format.bits()) {
        return Err(ConfigError::new(format!(
            "Width of {} ({}) is out of range ([1, 32])",
            name,
            format.bits()
        )));
    }
    if !(format.norm().is_finite() && format.norm() > 0.) {
        return Err(ConfigError::new(format!(
            "Normalization of {} ({}) must be positive",
            name,
            format.norm()
        )));
    }
    Ok(())
}

fn validate_field(name: &str, field: Field) -> Result<(), ConfigError> {
    if !field.is_valid() {
        return Err(ConfigError::new(format!(
            "Field {} (address {:#06X}, bits [{}, {})) does not fit in a word",
            name,
            field.address(),
            field.start_bit(),
            field.start_bit() as u32 + field.bit_width() as u32
        )));
    }
    Ok(())
}

fn validate_positive(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(value.is_finite() && value > 0.) {
        return Err(ConfigError::new(format!(
            "{} ({}) must be positive",
            name, value
        )));
    }
    Ok(())
}
