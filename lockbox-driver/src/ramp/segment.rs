use derive_new::new;
use getset::CopyGetters;

/// One slot of the ramp table.
///
/// The segment starts at `start_value` and adds `step_increment` every `time_step` seconds,
/// `step_count` times. A slot with `step_count == 0` is unused.
#[derive(Clone, Copy, Debug, PartialEq, Default, new, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct RampSegment {
    /// Value at the beginning of the segment.
    start_value: f64,
    /// Change of the value per step.
    step_increment: f64,
    /// Duration of a step in seconds.
    time_step: f64,
    /// Number of steps.
    step_count: u32,
}

impl RampSegment {
    /// Creates an unused slot holding only a start value.
    #[must_use]
    pub const fn unused(start_value: f64) -> Self {
        Self {
            start_value,
            step_increment: 0.,
            time_step: 0.,
            step_count: 0,
        }
    }

    /// Whether the slot is used.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.step_count > 0
    }

    /// Duration of the segment in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.time_step * self.step_count as f64
    }

    /// Value reached after the last step.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        self.start_value + self.step_increment * self.step_count as f64
    }
}
