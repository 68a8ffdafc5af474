use itertools::Itertools;
use lockbox_core::{breakpoint::Breakpoints, config::RampConfig};

use super::{
    allocator::{allocate_flat, AllocationLimits, DirectScan, SegmentAllocator},
    RampSegment, RampTable,
};
use crate::error::LockboxDriverError;

/// Encodes a piecewise-linear waveform into a [`RampTable`].
///
/// Breakpoint values are quantized first, so a segment between two equal quantized values is flat.
/// Each sloped segment is allocated by `A` with a total change that keeps its final value within
/// the value range. The time lost or gained by quantizing the duration of
/// a segment is given to the last segment, so the whole waveform keeps its length.
///
/// Times are relative to the first breakpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct RampEncoder<A: SegmentAllocator = DirectScan> {
    config: RampConfig,
    allocator: A,
}

impl RampEncoder {
    /// Creates a new [`RampEncoder`] with [`DirectScan`].
    #[must_use]
    pub const fn new(config: RampConfig) -> Self {
        Self {
            config,
            allocator: DirectScan,
        }
    }
}

impl<A: SegmentAllocator> RampEncoder<A> {
    /// Creates a new [`RampEncoder`] with the given allocator.
    #[must_use]
    pub const fn with_allocator(config: RampConfig, allocator: A) -> Self {
        Self { config, allocator }
    }

    /// Configuration of the ramp module.
    #[must_use]
    pub const fn config(&self) -> &RampConfig {
        &self.config
    }

    /// Allocator of the sloped segments.
    #[must_use]
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Encodes `breakpoints` into a table of [`RampConfig::num_segments`] slots.
    ///
    /// The first unused slot holds the final value of the waveform as its start value; the
    /// remaining slots are zero.
    #[tracing::instrument(level = "debug", skip_all, fields(len = breakpoints.len()))]
    pub fn encode(&self, breakpoints: &Breakpoints) -> Result<RampTable, LockboxDriverError> {
        self.config.validate()?;
        breakpoints.validate_timeline()?;

        let num_segments = self.config.num_segments();
        if breakpoints.len() > num_segments + 1 {
            return Err(LockboxDriverError::TooManySegments(
                breakpoints.len(),
                num_segments + 1,
            ));
        }

        let value_format = self.config.value_format();
        let time_step_format = self.config.time_step_format();
        let raw = breakpoints
            .iter()
            .enumerate()
            .map(|(i, p)| {
                value_format
                    .encode(p.y)
                    .map_err(LockboxDriverError::overflow("breakpoint value", i))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let dv = self.config.smallest_step_increase();
        let dt = self.config.smallest_time_step();
        let limits = AllocationLimits::from(&self.config);
        let used = breakpoints.len() - 1;

        let mut residual = 0.;
        let mut segments = Vec::with_capacity(num_segments);
        for (i, (p, r)) in breakpoints.windows(2).zip(raw.windows(2)).enumerate() {
            let last = i + 1 == used;
            let requested = p[1].x - p[0].x;
            let duration = if last { requested + residual } else { requested };
            let delta = value_format.decode(r[1] - r[0]);
            let not_representable = || LockboxDriverError::RampNotRepresentable {
                segment: i,
                delta,
                duration,
            };
            if duration <= 0. {
                return Err(not_representable());
            }

            let start = value_format.decode(r[0]);
            let allocation = if r[1] == r[0] {
                allocate_flat(duration, &self.config)
            } else {
                // the last step must not leave the value range
                let limits = limits.with_max_reach(self.config.reach_steps_from(start, delta));
                self.allocator.allocate(delta.abs() / dv, duration / dt, &limits)
            }
            .ok_or_else(not_representable)?;

            let step_increment = value_format
                .quantize(delta.signum() * allocation.increment_steps() as f64 * dv)
                .map_err(LockboxDriverError::overflow("step increment", i))?;
            let time_step = time_step_format
                .quantize(allocation.time_steps() as f64 * dt)
                .map_err(LockboxDriverError::overflow("time step", i))?;
            let segment = RampSegment::new(
                start,
                step_increment,
                time_step,
                allocation.step_count(),
            );
            tracing::debug!(
                "Segment {}: {:?} (requested: {} s, realized: {} s)",
                i,
                allocation,
                duration,
                segment.duration()
            );

            if !last {
                residual += requested - segment.duration();
            }
            segments.push(segment);
        }

        if used < num_segments {
            segments.push(RampSegment::unused(value_format.decode(raw[used])));
            segments.resize(num_segments, RampSegment::default());
        }

        tracing::trace!(
            "Ramp table: {}",
            segments.iter().format_with(", ", |s, f| f(&format_args!(
                "({}, {}, {}, {})",
                s.start_value(),
                s.step_increment(),
                s.time_step(),
                s.step_count()
            )))
        );

        Ok(RampTable::new(segments))
    }
}
