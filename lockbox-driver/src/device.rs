use getset::CopyGetters;
use lockbox_core::{
    config::{ConfigError, LinearizerConfig, RampConfig},
    defined::{DEFAULT_LINEARIZER_BASE, DEFAULT_RAMP_BASE},
};

/// Configurations and base addresses of the modules of a device.
#[derive(Clone, Copy, Debug, PartialEq, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct Device {
    /// Configuration of the ramp module.
    ramp: RampConfig,
    /// Base address of the ramp module.
    ramp_base: u32,
    /// Configuration of the linearizer module.
    linearizer: LinearizerConfig,
    /// Base address of the linearizer module.
    linearizer_base: u32,
}

impl Default for Device {
    fn default() -> Self {
        Self {
            ramp: RampConfig::default(),
            ramp_base: DEFAULT_RAMP_BASE,
            linearizer: LinearizerConfig::default(),
            linearizer_base: DEFAULT_LINEARIZER_BASE,
        }
    }
}

impl Device {
    /// Sets the configuration of the ramp module.
    #[must_use]
    pub const fn with_ramp(self, ramp: RampConfig) -> Self {
        Self { ramp, ..self }
    }

    /// Sets the base address of the ramp module.
    #[must_use]
    pub const fn with_ramp_base(self, ramp_base: u32) -> Self {
        Self { ramp_base, ..self }
    }

    /// Sets the configuration of the linearizer module.
    #[must_use]
    pub const fn with_linearizer(self, linearizer: LinearizerConfig) -> Self {
        Self { linearizer, ..self }
    }

    /// Sets the base address of the linearizer module.
    #[must_use]
    pub const fn with_linearizer_base(self, linearizer_base: u32) -> Self {
        Self {
            linearizer_base,
            ..self
        }
    }

    /// Checks both configurations and that the register ranges of the modules are aligned and
    /// disjoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ramp.validate()?;
        self.linearizer.validate()?;

        [("ramp", self.ramp_base), ("linearizer", self.linearizer_base)]
            .into_iter()
            .try_for_each(|(name, base)| {
                if base % 4 == 0 {
                    Ok(())
                } else {
                    Err(ConfigError::new(format!(
                        "Base address of {} ({:#010X}) must be aligned to 4 bytes",
                        name, base
                    )))
                }
            })?;

        let ramp = self.ramp.address_range();
        let linearizer = self.linearizer.address_range();
        let ramp = (self.ramp_base as u64 + ramp.start as u64)
            ..(self.ramp_base as u64 + ramp.end as u64);
        let linearizer = (self.linearizer_base as u64 + linearizer.start as u64)
            ..(self.linearizer_base as u64 + linearizer.end as u64);
        if ramp.end > 1 << 32 || linearizer.end > 1 << 32 {
            return Err(ConfigError::new("Register range exceeds the address space"));
        }
        if ramp.start < linearizer.end && linearizer.start < ramp.end {
            return Err(ConfigError::new(format!(
                "Registers of ramp ({:#X}..{:#X}) and linearizer ({:#X}..{:#X}) overlap",
                ramp.start, ramp.end, linearizer.start, linearizer.end
            )));
        }
        Ok(())
    }
}
