mod direct_scan;
mod ratio_search;

pub use direct_scan::DirectScan;
pub use ratio_search::RatioSearch;

use derive_new::new;
use getset::CopyGetters;
use lockbox_core::config::RampConfig;

/// Step count, increment and time step of one ramp segment.
///
/// The increment is in units of [`RampConfig::smallest_step_increase`] and the time step in units
/// of [`RampConfig::smallest_time_step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Allocation {
    /// Number of steps.
    step_count: u32,
    /// Increment per step.
    increment_steps: u32,
    /// Duration of a step.
    time_steps: u32,
}

impl Allocation {
    /// Whether both the reached value and the reached time lie within one step of the request.
    #[must_use]
    pub fn is_acceptable(&self, v: f64, t: f64) -> bool {
        let n = self.step_count as f64;
        let l = self.increment_steps as f64;
        let m = self.time_steps as f64;
        (v - l * n).abs() <= l && (t - m * n).abs() <= m
    }

    /// Relative error of the reached value and time plus the relative size of one step.
    ///
    /// The last term is `1/n²`, which bounds the cost of every allocation with `n` steps from below.
    #[must_use]
    pub fn cost(&self, v: f64, t: f64) -> f64 {
        let n = self.step_count as f64;
        let ev = (v - self.increment_steps as f64 * n) / v;
        let et = (t - self.time_steps as f64 * n) / t;
        ev * ev + et * et + 1. / (n * n)
    }

    /// Total change `increment_steps * step_count`.
    #[must_use]
    pub const fn reach(&self) -> u64 {
        self.increment_steps as u64 * self.step_count as u64
    }
}

/// Bounds of an [`Allocation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, new, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct AllocationLimits {
    /// Minimum number of steps.
    min_steps: u32,
    /// Maximum number of steps.
    max_step_count: u32,
    /// Maximum increment per step.
    max_increment_steps: u32,
    /// Maximum duration of a step.
    max_time_steps: u32,
    /// Maximum total change `increment_steps * step_count`.
    max_reach: u32,
}

impl From<&RampConfig> for AllocationLimits {
    fn from(config: &RampConfig) -> Self {
        Self {
            min_steps: config.min_steps(),
            max_step_count: config.max_step_count(),
            max_increment_steps: config.max_increment_steps(),
            max_time_steps: config.max_time_steps(),
            max_reach: config.max_reach_steps(),
        }
    }
}

impl AllocationLimits {
    /// Sets the maximum total change, e.g. the distance from the start value to the end of the
    /// value range.
    #[must_use]
    pub const fn with_max_reach(self, max_reach: u32) -> Self {
        Self { max_reach, ..self }
    }

    /// Whether `a` lies within the limits.
    #[must_use]
    pub fn admits(&self, a: &Allocation) -> bool {
        (self.min_steps..=self.max_step_count).contains(&a.step_count)
            && (1..=self.max_increment_steps).contains(&a.increment_steps)
            && (1..=self.max_time_steps).contains(&a.time_steps)
            && a.reach() <= self.max_reach as u64
    }

    /// Builds the best acceptable candidate with `n` steps.
    ///
    /// The cost separates into the increment and the time step, so each is the acceptable
    /// integer closest to `v/n` and `t/n` within the limits. Returns `None` if there is none.
    #[must_use]
    pub fn candidate(&self, n: u32, v: f64, t: f64) -> Option<Allocation> {
        if n == 0 {
            return None;
        }
        let l = nearest_acceptable(v, n, self.max_increment_steps.min(self.max_reach / n))?;
        let m = nearest_acceptable(t, n, self.max_time_steps)?;
        let a = Allocation::new(n, l, m);
        self.admits(&a).then_some(a)
    }
}

/// Integer `k` in `[1, max]` with `|x - k·n| <= k` that is closest to `x/n`.
///
/// The acceptable `k` form the interval `[x/(n+1), x/(n-1)]`, which need not contain the rounded
/// quotient.
fn nearest_acceptable(x: f64, n: u32, max: u32) -> Option<u32> {
    let nf = n as f64;
    let max = max as f64;
    let lo = (x / (nf + 1.)).ceil().max(1.);
    let hi = if n > 1 {
        (x / (nf - 1.)).floor().min(max)
    } else {
        max
    };
    let k = (x / nf).round().min(hi).max(lo);
    [k - 1., k, k + 1.]
        .into_iter()
        .filter(|&k| k >= 1. && k <= max && (x - k * nf).abs() <= k)
        .min_by(|a, b| (x - a * nf).abs().total_cmp(&(x - b * nf).abs()))
        .map(|k| k as u32)
}

/// A strategy choosing the [`Allocation`] of a sloped segment.
pub trait SegmentAllocator: std::fmt::Debug {
    /// Chooses an acceptable allocation for a change of `v` increments over `t` time steps,
    /// minimizing [`Allocation::cost`]. `v` and `t` are positive.
    ///
    /// Returns `None` if no allocation within `limits` is acceptable.
    fn allocate(&self, v: f64, t: f64, limits: &AllocationLimits) -> Option<Allocation>;
}

impl<A: SegmentAllocator + ?Sized> SegmentAllocator for &A {
    fn allocate(&self, v: f64, t: f64, limits: &AllocationLimits) -> Option<Allocation> {
        (**self).allocate(v, t, limits)
    }
}

impl SegmentAllocator for Box<dyn SegmentAllocator> {
    fn allocate(&self, v: f64, t: f64, limits: &AllocationLimits) -> Option<Allocation> {
        self.as_ref().allocate(v, t, limits)
    }
}

/// Allocation of a segment whose value does not change.
///
/// The segment is split into the fewest steps no longer than
/// [`RampConfig::max_flat_step_time`].
#[must_use]
pub fn allocate_flat(duration: f64, config: &RampConfig) -> Option<Allocation> {
    let n = (duration / config.max_flat_step_time() - 1e-9).ceil().max(1.);
    if n > config.max_step_count() as f64 {
        return None;
    }
    let m = (duration / config.smallest_time_step() / n).round().max(1.);
    if m > config.max_time_steps() as f64 {
        return None;
    }
    Some(Allocation::new(n as u32, 0, m as u32))
}
