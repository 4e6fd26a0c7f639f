use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::metric::{Histogram, Metric};

/// Upper bounds of the cumulative buckets.
/// Sized for microsecond latencies: 100us, 500us, 1ms, 5ms, 10ms, 50ms, 100ms, 500ms, 1s.
pub const BUCKET_BOUNDS: [i64; 9] = [
    100, 500, 1_000, 5_000, 10_000, 50_000, 100_000, 500_000, 1_000_000,
];

/// Fixed-bucket histogram.
///
/// `min`/`max` start at the opposite extremes so the first observation always
/// replaces them; readers map the untouched state back to 0.
#[derive(Debug)]
pub struct StandardHistogram {
    count: AtomicU64,
    sum: AtomicI64,
    min: AtomicI64,
    max: AtomicI64,
    buckets: [AtomicU64; 9],
}

impl Default for StandardHistogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicI64::new(0),
            min: AtomicI64::new(i64::MAX),
            max: AtomicI64::new(i64::MIN),
            buckets: Default::default(),
        }
    }
}

impl StandardHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::histogram(self)
    }

    /// Cumulative count per entry of [`BUCKET_BOUNDS`]; the implicit `+Inf`
    /// bucket equals [`Histogram::count`].
    pub fn bucket_counts(&self) -> [u64; 9] {
        let mut out = [0u64; 9];
        for (slot, b) in out.iter_mut().zip(self.buckets.iter()) {
            *slot = b.load(Ordering::Relaxed);
        }
        out
    }
}

impl Histogram for StandardHistogram {
    fn update(&self, v: i64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(v, Ordering::Relaxed);
        self.min.fetch_min(v, Ordering::Relaxed);
        self.max.fetch_max(v, Ordering::Relaxed);

        // Cumulative: every bucket whose bound covers the value.
        for (i, &b) in BUCKET_BOUNDS.iter().enumerate() {
            if v <= b {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn sum(&self) -> i64 {
        self.sum.load(Ordering::Relaxed)
    }

    fn min(&self) -> i64 {
        if self.count() == 0 {
            return 0;
        }
        self.min.load(Ordering::Relaxed)
    }

    fn max(&self) -> i64 {
        if self.count() == 0 {
            return 0;
        }
        self.max.load(Ordering::Relaxed)
    }

    fn mean(&self) -> f64 {
        let n = self.count();
        if n == 0 {
            return 0.0;
        }
        self.sum() as f64 / n as f64
    }

    fn clear(&self) {
        self.count.store(0, Ordering::Relaxed);
        self.sum.store(0, Ordering::Relaxed);
        self.min.store(i64::MAX, Ordering::Relaxed);
        self.max.store(i64::MIN, Ordering::Relaxed);
        for b in &self.buckets {
            b.store(0, Ordering::Relaxed);
        }
    }
}
