use lockbox_core::breakpoint::{Breakpoint, Breakpoints};

use super::{RampSegment, RampTable};

/// Reconstructs the breakpoints of a [`RampTable`].
///
/// Breakpoint `i` is the start of used segment `i` at the sum of the preceding durations. The
/// last breakpoint is the value reached by the last used segment. A table without used segments
/// yields the single breakpoint `(0, start value of the first slot)`.
#[must_use]
pub fn decode(table: &RampTable) -> Breakpoints {
    let mut time = 0.;
    let mut points = table
        .used()
        .iter()
        .map(|s| {
            let p = Breakpoint::new(time, s.start_value());
            time += s.duration();
            p
        })
        .collect::<Vec<_>>();
    points.push(Breakpoint::new(time, table.final_value()));
    Breakpoints::new(points)
}

/// Like [`decode`], for segments held in a slice.
#[must_use]
pub fn decode_segments(segments: &[RampSegment]) -> Breakpoints {
    decode(&RampTable::new(segments.to_vec()))
}
