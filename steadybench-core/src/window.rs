//! Best-Times Window
//!
//! Only the fastest samples drive termination and reporting, so instead of
//! keeping every sample the runner holds a tiny sorted window of the fastest
//! [`WINDOW_CAPACITY`] per-iteration times.

/// Samples taken per calibration round and the rank used for the spread check
pub const MIN_SAMPLES: usize = 3;

/// Window size: the `MIN_SAMPLES` fastest plus one slot for the incoming sample
pub const WINDOW_CAPACITY: usize = MIN_SAMPLES + 1;

/// Sorted (ascending) window of the fastest per-iteration times seen.
#[derive(Debug, Clone, Default)]
pub struct BestTimes {
    times: [f64; WINDOW_CAPACITY],
    len: usize,
}

impl BestTimes {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a sample; the window keeps the fastest values, sorted.
    pub fn push(&mut self, time: f64) {
        if self.len < WINDOW_CAPACITY {
            self.times[self.len] = time;
            self.len += 1;
        } else if time < self.times[WINDOW_CAPACITY - 1] {
            self.times[WINDOW_CAPACITY - 1] = time;
        } else {
            return;
        }
        self.times[..self.len].sort_by(f64::total_cmp);
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Number of samples held (at most `WINDOW_CAPACITY`)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window holds no samples
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Held samples, fastest first
    pub fn as_slice(&self) -> &[f64] {
        &self.times[..self.len]
    }

    /// Fastest sample
    pub fn best(&self) -> Option<f64> {
        self.as_slice().first().copied()
    }

    /// The `MIN_SAMPLES`-th fastest sample
    pub fn third_best(&self) -> Option<f64> {
        self.as_slice().get(MIN_SAMPLES - 1).copied()
    }

    /// Whether the third-best time lies within `accuracy` of the best.
    ///
    /// False until `MIN_SAMPLES` samples are held.
    pub fn converged(&self, accuracy: f64) -> bool {
        match (self.best(), self.third_best()) {
            (Some(best), Some(third)) => best * (1.0 + accuracy) >= third,
            _ => false,
        }
    }

    /// Relative gap `third / best - 1`.
    ///
    /// Zero when both are zero; infinite when only the best is zero (timer
    /// resolution too coarse to see the fastest sample).
    pub fn spread(&self) -> f64 {
        match (self.best(), self.third_best()) {
            (Some(best), Some(third)) if best > 0.0 => (third / best - 1.0).max(0.0),
            (Some(_), Some(third)) if third > 0.0 => f64::INFINITY,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_sorted() {
        let mut window = BestTimes::new();
        for t in [3.0, 1.0, 2.0] {
            window.push(t);
        }
        assert_eq!(window.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(window.best(), Some(1.0));
        assert_eq!(window.third_best(), Some(3.0));
    }

    #[test]
    fn test_bounded_to_fastest() {
        let mut window = BestTimes::new();
        for t in [9.0, 8.0, 7.0, 6.0, 5.0, 10.0, 1.0] {
            window.push(t);
        }
        assert_eq!(window.len(), WINDOW_CAPACITY);
        assert_eq!(window.as_slice(), &[1.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_slower_sample_ignored_when_full() {
        let mut window = BestTimes::new();
        for t in [1.0, 2.0, 3.0, 4.0, 100.0] {
            window.push(t);
        }
        assert_eq!(window.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_converged() {
        let mut window = BestTimes::new();
        window.push(1.00);
        window.push(1.01);
        assert!(!window.converged(0.03), "needs three samples");
        window.push(1.05);
        assert!(!window.converged(0.03));
        window.push(1.02);
        assert!(window.converged(0.03));
    }

    #[test]
    fn test_spread() {
        let mut window = BestTimes::new();
        for t in [2.0, 2.5, 3.0] {
            window.push(t);
        }
        assert!((window.spread() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_spread_zero_times() {
        let mut window = BestTimes::new();
        for _ in 0..3 {
            window.push(0.0);
        }
        assert_eq!(window.spread(), 0.0);

        window.clear();
        for t in [0.0, 0.0, 1e-9] {
            window.push(t);
        }
        assert_eq!(window.spread(), f64::INFINITY);
    }

    #[test]
    fn test_clear() {
        let mut window = BestTimes::new();
        window.push(1.0);
        window.clear();
        assert!(window.is_empty());
        assert_eq!(window.best(), None);
        assert_eq!(window.spread(), 0.0);
    }
}
