use super::{Allocation, AllocationLimits, SegmentAllocator};

/// Scans the step count from the largest useful value downwards.
///
/// For a given step count the best increment and time step are found by
/// [`AllocationLimits::candidate`], so the scan is exact. It stops as soon as `1/n²` reaches the
/// best cost found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectScan;

impl SegmentAllocator for DirectScan {
    fn allocate(&self, v: f64, t: f64, limits: &AllocationLimits) -> Option<Allocation> {
        // an acceptable allocation has n <= v/l + 1 and n <= t/m + 1
        let upper = (v.min(t).floor() + 1.).min(limits.max_step_count() as f64) as u32;

        let mut best: Option<(f64, Allocation)> = None;
        for n in (limits.min_steps()..=upper).rev() {
            let nf = n as f64;
            if best.is_some_and(|(cost, _)| 1. / (nf * nf) >= cost) {
                break;
            }
            if let Some(a) = limits.candidate(n, v, t) {
                let cost = a.cost(v, t);
                if best.is_none_or(|(c, _)| cost < c) {
                    best = Some((cost, a));
                }
            }
        }

        tracing::trace!("DirectScan (v: {}, t: {}) -> {:?}", v, t, best);
        best.map(|(_, a)| a)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        super::tests::{default_limits, exhaustive},
        *,
    };

    #[rstest::rstest]
    #[test]
    #[case(Some(Allocation::new(100, 1, 3)), 100., 300.)]
    #[case(Some(Allocation::new(8000, 1, 1)), 8000., 8000.)]
    #[case(Some(Allocation::new(2, 1, 1)), 2., 2.)]
    #[case(None, 0.4, 100.)]
    #[case(None, 1e6, 10.)]
    fn allocate(#[case] expect: Option<Allocation>, #[case] v: f64, #[case] t: f64) {
        assert_eq!(expect, DirectScan.allocate(v, t, &default_limits()));
    }

    #[test]
    fn result_is_acceptable() {
        use rand::Rng;

        let limits = default_limits();
        let mut rng = rand::rng();
        (0..200).for_each(|_| {
            let v = rng.random_range(2.0..16000.);
            let t = rng.random_range(2.0..1e7);
            if let Some(a) = DirectScan.allocate(v, t, &limits) {
                assert!(a.is_acceptable(v, t));
                assert!(a.step_count() >= limits.min_steps());
                assert!(a.step_count() <= limits.max_step_count());
                assert!(a.increment_steps() <= limits.max_increment_steps());
                assert!(a.time_steps() <= limits.max_time_steps());
                assert!(a.reach() <= limits.max_reach() as u64);
            }
        });
    }

    #[test]
    fn full_scale_within_reach() {
        let limits = default_limits().with_max_reach(8191);
        let v = 8191.;
        let t = 1e-3 / 24e-9;

        let a = DirectScan.allocate(v, t, &limits);
        assert_eq!(Some(Allocation::new(744, 11, 56)), a);
        assert!(a.is_some_and(|a| a.reach() <= 8191 && a.is_acceptable(v, t)));

        let unbounded = DirectScan.allocate(v, t, &default_limits());
        assert!(unbounded.is_some_and(|a| a.reach() > 8191));
    }

    #[test]
    fn matches_exhaustive() {
        use rand::Rng;

        let limits = default_limits();
        let mut rng = rand::rng();
        (0..50).for_each(|_| {
            let v = rng.random_range(2.0..16000.);
            let t = rng.random_range(2.0..1e5);
            let limits = limits.with_max_reach(rng.random_range(1..=16383));
            let cost = DirectScan
                .allocate(v, t, &limits)
                .map(|a| a.cost(v, t));
            assert_eq!(exhaustive(v, t, &limits), cost);
        });
    }
}
