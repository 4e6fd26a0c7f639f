use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

use crate::metric::{Histogram, Meter, Metric, Timer};

use super::histogram::StandardHistogram;

/// Counts marks and reports the mean rate since creation.
#[derive(Debug)]
pub struct StandardMeter {
    count: AtomicI64,
    start: Instant,
}

impl Default for StandardMeter {
    fn default() -> Self {
        Self {
            count: AtomicI64::new(0),
            start: Instant::now(),
        }
    }
}

impl StandardMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::meter(self)
    }
}

impl Meter for StandardMeter {
    fn mark(&self, n: i64) {
        self.count.fetch_add(n, Ordering::Relaxed);
    }

    fn count(&self) -> i64 {
        self.count.load(Ordering::Relaxed)
    }

    fn rate_mean(&self) -> f64 {
        let secs = self.start.elapsed().as_secs_f64();
        if secs <= 0.0 {
            return 0.0;
        }
        self.count() as f64 / secs
    }
}

/// Histogram of durations (in microseconds) plus a meter of calls.
#[derive(Debug, Default)]
pub struct StandardTimer {
    histogram: StandardHistogram,
    meter: StandardMeter,
}

impl StandardTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_metric(self) -> Metric {
        Metric::timer(self)
    }

    /// Underlying microsecond histogram.
    pub fn histogram(&self) -> &StandardHistogram {
        &self.histogram
    }
}

impl Timer for StandardTimer {
    fn update(&self, d: Duration) {
        let micros = i64::try_from(d.as_micros()).unwrap_or(i64::MAX);
        self.histogram.update(micros);
        self.meter.mark(1);
    }

    fn count(&self) -> u64 {
        self.histogram.count()
    }

    fn total(&self) -> Duration {
        Duration::from_micros(self.histogram.sum().max(0) as u64)
    }

    fn mean(&self) -> Duration {
        Duration::from_micros(self.histogram.mean().max(0.0) as u64)
    }

    fn rate_mean(&self) -> f64 {
        self.meter.rate_mean()
    }
}
