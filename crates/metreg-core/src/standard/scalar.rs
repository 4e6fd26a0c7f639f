use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::metric::{Counter, Gauge, GaugeFloat64, Metric};

#[derive(Debug, Default)]
pub struct StandardCounter {
    count: AtomicI64,
}

impl StandardCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::counter(self)
    }
}

impl Counter for StandardCounter {
    fn inc(&self, n: i64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    fn dec(&self, n: i64) {
        self.count.fetch_sub(n, Ordering::Relaxed);
    }

    fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    fn clear(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Default)]
pub struct StandardGauge {
    value: AtomicI64,
}

impl StandardGauge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::gauge(self)
    }
}

impl Gauge for StandardGauge {
    fn update(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Float gauge stored as raw `f64` bits.
#[derive(Debug, Default)]
pub struct StandardGaugeFloat64 {
    bits: AtomicU64,
}

impl StandardGaugeFloat64 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::gauge_float64(self)
    }
}

impl GaugeFloat64 for StandardGaugeFloat64 {
    fn update(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    fn value(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}
