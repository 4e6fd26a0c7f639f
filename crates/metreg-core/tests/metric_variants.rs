//! `Metric` sum type and `MetricOrFactory`.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use metreg_core::{
    Counter, Metric, MetricKind, MetricOrFactory, MetricsError, StandardCounter, StandardGauge,
};

#[test]
fn clones_share_the_instrument() {
    let m = StandardCounter::new().into_metric();
    let other = m.clone();
    assert!(m.ptr_eq(&other));

    other.as_counter().unwrap().inc(4);
    assert_eq!(m.as_counter().unwrap().count(), 4);

    let fresh = StandardCounter::new().into_metric();
    assert!(!m.ptr_eq(&fresh));
}

#[test]
fn kind_and_recognition() {
    let g = StandardGauge::new().into_metric();
    assert_eq!(g.kind(), MetricKind::Gauge);
    assert!(g.is_recognized());
    assert!(g.as_counter().is_none());

    let o = Metric::opaque("just a string");
    assert_eq!(o.kind(), MetricKind::Opaque);
    assert!(!o.is_recognized());
    assert_eq!(MetricKind::GaugeFloat64.to_string(), "gauge_float64");
}

#[test]
fn factory_runs_only_when_materialized() {
    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    let src = MetricOrFactory::factory(move || {
        c.fetch_add(1, Ordering::SeqCst);
        StandardCounter::new().into_metric()
    });
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let m = src.materialize();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(m.kind(), MetricKind::Counter);

    let v: MetricOrFactory = m.clone().into();
    assert!(v.materialize().ptr_eq(&m));
}

#[test]
fn error_codes_are_stable() {
    let e = MetricsError::DuplicateMetric("requests".into());
    assert_eq!(e.code(), "DUPLICATE_METRIC");
    assert_eq!(e.to_string(), "duplicate metric: \"requests\"");
}
