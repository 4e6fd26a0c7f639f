//! Standard instrument behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use metreg_core::standard::BUCKET_BOUNDS;
use metreg_core::{
    Counter, Gauge, GaugeFloat64, Healthcheck, Histogram, Meter, StandardCounter, StandardGauge,
    StandardGaugeFloat64, StandardHealthcheck, StandardHistogram, StandardMeter, StandardTimer,
    Timer,
};

#[test]
fn counter_moves_both_ways_and_clears() {
    let c = StandardCounter::new();
    c.inc(5);
    c.dec(2);
    assert_eq!(c.count(), 3);
    c.clear();
    assert_eq!(c.count(), 0);
}

#[test]
fn gauges_keep_last_value() {
    let g = StandardGauge::new();
    g.update(7);
    g.update(-3);
    assert_eq!(g.value(), -3);

    let f = StandardGaugeFloat64::new();
    assert_eq!(f.value(), 0.0);
    f.update(1.25);
    assert_eq!(f.value(), 1.25);
}

#[test]
fn histogram_tracks_extremes_and_cumulative_buckets() {
    let h = StandardHistogram::new();
    assert_eq!(h.min(), 0);
    assert_eq!(h.max(), 0);
    assert_eq!(h.mean(), 0.0);

    for v in [50, 700, 2_000_000] {
        h.update(v);
    }
    assert_eq!(h.count(), 3);
    assert_eq!(h.sum(), 2_000_750);
    assert_eq!(h.min(), 50);
    assert_eq!(h.max(), 2_000_000);

    let buckets = h.bucket_counts();
    assert_eq!(BUCKET_BOUNDS[0], 100);
    assert_eq!(buckets[0], 1); // <= 100
    assert_eq!(buckets[1], 1); // <= 500
    assert_eq!(buckets[2], 2); // <= 1ms
    assert_eq!(buckets[8], 2); // 2s lands only in +Inf

    h.clear();
    assert_eq!(h.count(), 0);
    assert_eq!(h.bucket_counts(), [0; 9]);
    assert_eq!(h.max(), 0);
}

#[test]
fn meter_counts_marks() {
    let m = StandardMeter::new();
    m.mark(3);
    m.mark(2);
    assert_eq!(m.count(), 5);
    assert!(m.rate_mean() >= 0.0);
}

#[test]
fn timer_records_durations() {
    let t = StandardTimer::new();
    t.update(Duration::from_millis(2));
    t.update(Duration::from_millis(4));
    assert_eq!(t.count(), 2);
    assert_eq!(t.total(), Duration::from_millis(6));
    assert_eq!(t.mean(), Duration::from_millis(3));
    assert_eq!(t.histogram().max(), 4_000);

    let out = t.time(|| 42);
    assert_eq!(out, 42);
    assert_eq!(t.count(), 3);
}

#[test]
fn healthcheck_records_latest_outcome() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let failing = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&failing);
    let h = StandardHealthcheck::new(move || {
        if flag.load(Ordering::SeqCst) {
            Err("db unreachable".to_string())
        } else {
            Ok(())
        }
    });

    assert_eq!(h.error(), None);
    h.check();
    assert_eq!(h.error().as_deref(), Some("db unreachable"));

    failing.store(false, Ordering::SeqCst);
    h.check();
    assert_eq!(h.error(), None);

    h.unhealthy("manual".into());
    assert_eq!(h.error().as_deref(), Some("manual"));
    h.healthy();
    assert_eq!(h.error(), None);
}
