use derive_more::Deref;

use super::RampSegment;

/// Fixed-length table of [`RampSegment`]s as held by the ramp module.
///
/// The used segments come first. The first slot with a zero step count marks the end.
#[derive(Clone, Debug, PartialEq, Default, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RampTable(Vec<RampSegment>);

impl RampTable {
    /// Creates a new [`RampTable`].
    #[must_use]
    pub const fn new(segments: Vec<RampSegment>) -> Self {
        Self(segments)
    }

    /// Number of used segments.
    #[must_use]
    pub fn used_len(&self) -> usize {
        self.0
            .iter()
            .position(|s| !s.is_used())
            .unwrap_or(self.0.len())
    }

    /// Used segments.
    #[must_use]
    pub fn used(&self) -> &[RampSegment] {
        &self.0[..self.used_len()]
    }

    /// Total duration of the used segments in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.used().iter().map(RampSegment::duration).sum()
    }

    /// Value at the end of the last used segment, or the first start value if none is used.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        match self.used().last() {
            Some(s) => s.final_value(),
            None => self.0.first().map_or(0., |s| s.start_value()),
        }
    }

    /// Consumes and returns the inner segments.
    #[must_use]
    pub fn into_inner(self) -> Vec<RampSegment> {
        self.0
    }
}
