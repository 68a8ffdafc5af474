use getset::CopyGetters;

use super::Datagram;
use crate::{
    device::Device, error::LockboxDriverError, operation::RampControlOp, ramp::IdleConfiguration,
};

/// Control word of the ramp module.
///
/// `used_ramps` is left untouched on the device when it is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Default, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct RampControl {
    /// Output after the function has completed.
    idle_configuration: IdleConfiguration,
    /// Whether every segment waits for its own trigger.
    multiple_triggers: bool,
    /// Output in [`IdleConfiguration::DefaultValue`].
    default_value: f64,
    /// Number of segments played. `0` disables the ramp.
    used_ramps: Option<usize>,
}

impl RampControl {
    /// Creates a new [`RampControl`] with the reset values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            idle_configuration: IdleConfiguration::DefaultValue,
            multiple_triggers: false,
            default_value: 0.,
            used_ramps: None,
        }
    }

    /// Sets the idle configuration.
    #[must_use]
    pub const fn with_idle_configuration(self, idle_configuration: IdleConfiguration) -> Self {
        Self {
            idle_configuration,
            ..self
        }
    }

    /// Sets the multiple-trigger flag.
    #[must_use]
    pub const fn with_multiple_triggers(self, multiple_triggers: bool) -> Self {
        Self {
            multiple_triggers,
            ..self
        }
    }

    /// Sets the default value.
    #[must_use]
    pub const fn with_default_value(self, default_value: f64) -> Self {
        Self {
            default_value,
            ..self
        }
    }

    /// Sets the number of used ramps.
    #[must_use]
    pub const fn with_used_ramps(self, used_ramps: usize) -> Self {
        Self {
            used_ramps: Some(used_ramps),
            ..self
        }
    }
}

impl Datagram for RampControl {
    type O = RampControlOp;

    fn operation(self, _: &Device) -> Result<Self::O, LockboxDriverError> {
        Ok(RampControlOp::new(self))
    }
}
