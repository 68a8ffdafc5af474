use super::{Allocation, AllocationLimits, SegmentAllocator};

/// Approximates the slope `v/t` by walking the Stern–Brocot tree of increment/time-step ratios.
///
/// Every mediant `l/m` within the limits is a candidate with `n = round(v/l)` steps, capped so that
/// the total change stays within reach. The walk stops
/// at the exact ratio or when the mediant leaves the limits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatioSearch;

impl SegmentAllocator for RatioSearch {
    fn allocate(&self, v: f64, t: f64, limits: &AllocationLimits) -> Option<Allocation> {
        let max_l = limits.max_increment_steps() as u64;
        let max_m = limits.max_time_steps() as u64;

        let mut lower = (0u64, 1u64);
        let mut upper = (1u64, 0u64);
        let mut best: Option<(f64, Allocation)> = None;
        loop {
            let (l, m) = (lower.0 + upper.0, lower.1 + upper.1);
            if l > max_l || m > max_m {
                break;
            }

            let n = ((v / l as f64)
                .round()
                .min(limits.max_step_count() as f64)
                .max(limits.min_steps() as f64) as u32)
                .min(limits.max_reach() / l as u32);
            let a = Allocation::new(n, l as u32, m as u32);
            if limits.admits(&a) && a.is_acceptable(v, t) {
                let cost = a.cost(v, t);
                if best.is_none_or(|(c, _)| cost < c) {
                    best = Some((cost, a));
                }
            }

            let lt = l as f64 * t;
            let vm = v * m as f64;
            if lt < vm {
                lower = (l, m);
            } else if lt > vm {
                upper = (l, m);
            } else {
                break;
            }
        }

        tracing::trace!("RatioSearch (v: {}, t: {}) -> {:?}", v, t, best);
        best.map(|(_, a)| a)
    }
}
