use derive_more::Deref;
use derive_new::new;
use getset::CopyGetters;
use lockbox_core::{
    breakpoint::{Breakpoint, Breakpoints},
    config::LinearizerConfig,
    defined::LINEARIZER_SENTINEL,
};

use crate::error::LockboxDriverError;

/// One slot of the linearizer table.
///
/// For inputs from `edge_point` up to the next edge point the output is
/// `intercept + slope * (x - edge_point)`.
#[derive(Clone, Copy, Debug, PartialEq, new, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct LinearizerSegment {
    /// Lowest input of the segment.
    edge_point: f64,
    /// Output at the edge point.
    intercept: f64,
    /// Slope of the segment.
    slope: f64,
}

impl LinearizerSegment {
    /// An unused slot.
    pub const UNUSED: Self = Self {
        edge_point: LINEARIZER_SENTINEL,
        intercept: 0.,
        slope: 0.,
    };

    /// Output of the segment at `x`.
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        self.intercept + self.slope * (x - self.edge_point)
    }
}

/// Fixed-length table of [`LinearizerSegment`]s as held by the linearizer module.
#[derive(Clone, Debug, PartialEq, Default, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearizerTable(Vec<LinearizerSegment>);

impl LinearizerTable {
    /// Creates a new [`LinearizerTable`].
    #[must_use]
    pub const fn new(segments: Vec<LinearizerSegment>) -> Self {
        Self(segments)
    }

    /// Number of used segments: up to the last slot whose edge point is not the sentinel, and at
    /// least one.
    #[must_use]
    pub fn used_len(&self) -> usize {
        self.0
            .iter()
            .rposition(|s| s.edge_point() != LINEARIZER_SENTINEL)
            .map_or(1, |i| i + 1)
            .min(self.0.len())
    }

    /// Used segments.
    #[must_use]
    pub fn used(&self) -> &[LinearizerSegment] {
        &self.0[..self.used_len()]
    }

    /// Output for the input `x`, using the segment with the greatest edge point not above `x`.
    ///
    /// Inputs below every edge point use the first segment. An empty table outputs `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let used = self.used();
        used.iter()
            .rev()
            .find(|s| s.edge_point() <= x)
            .or(used.first())
            .map_or(x, |s| s.apply(x))
    }

    /// Consumes and returns the inner segments.
    #[must_use]
    pub fn into_inner(self) -> Vec<LinearizerSegment> {
        self.0
    }
}

/// Encodes a calibration curve into a [`LinearizerTable`].
#[derive(Clone, Copy, Debug, PartialEq, new)]
pub struct LinearizerEncoder {
    config: LinearizerConfig,
}

impl LinearizerEncoder {
    /// Configuration of the linearizer module.
    #[must_use]
    pub const fn config(&self) -> &LinearizerConfig {
        &self.config
    }

    /// Encodes `points` into a table of [`LinearizerConfig::num_segments`] slots.
    ///
    /// Segment `i` starts at point `i` and runs towards point `i + 1`. Unused slots hold the
    /// sentinel edge point.
    #[tracing::instrument(level = "debug", skip_all, fields(len = points.len()))]
    pub fn encode(&self, points: &Breakpoints) -> Result<LinearizerTable, LockboxDriverError> {
        self.config.validate()?;
        points.validate_increasing(2)?;

        let num_segments = self.config.num_segments();
        if points.len() > num_segments + 1 {
            return Err(LockboxDriverError::TooManySegments(
                points.len(),
                num_segments + 1,
            ));
        }

        let value_format = self.config.value_format();
        let slope_format = self.config.slope_format();
        let mut segments = points
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let edge_point = value_format
                    .quantize(w[0].x)
                    .map_err(LockboxDriverError::overflow("edge point", i))?;
                let intercept = value_format
                    .quantize(w[0].y)
                    .map_err(LockboxDriverError::overflow("intercept", i))?;
                let slope = slope_format
                    .quantize((w[1].y - w[0].y) / (w[1].x - w[0].x))
                    .map_err(LockboxDriverError::overflow("slope", i))?;
                Ok(LinearizerSegment::new(edge_point, intercept, slope))
            })
            .collect::<Result<Vec<_>, LockboxDriverError>>()?;
        segments.resize(num_segments, LinearizerSegment::UNUSED);

        Ok(LinearizerTable::new(segments))
    }
}

/// Reconstructs the calibration curve of a [`LinearizerTable`].
///
/// The edge points of the used segments are followed by the top of the input range.
#[must_use]
pub fn decode(table: &LinearizerTable, config: &LinearizerConfig) -> Breakpoints {
    let used = table.used();
    let input_max = config.input_max();
    used.iter()
        .map(|s| Breakpoint::new(s.edge_point(), s.intercept()))
        .chain(
            used.last()
                .map(|s| Breakpoint::new(input_max, s.apply(input_max))),
        )
        .collect()
}
