use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use metreg_core::error::{MetricsError, Result};
use metreg_core::metric::{
    Counter, Gauge, GaugeFloat64, Healthcheck, Histogram, Meter, Metric, MetricKind,
    MetricOrFactory, Timer,
};
use metreg_core::standard::{
    StandardCounter, StandardGauge, StandardGaugeFloat64, StandardHistogram, StandardMeter,
    StandardTimer,
};

use crate::config::RegistryConfig;

/// Name -> metric map behind a read/write lock.
///
/// - Reads (`get`, snapshots) share the lock.
/// - Writes (`register`, `unregister*`, the insert step of `get_or_register`)
///   take it exclusively.
/// - No user code (factories, visitors, healthchecks) ever runs while the lock
///   is held, so all of them may call back into the registry.
///
/// The lock guards the map only. Instruments handed out are updated without it.
#[derive(Default)]
pub struct Registry {
    metrics: RwLock<HashMap<String, Metric>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry holding a standard instrument for every declared metric.
    pub fn from_config(cfg: &RegistryConfig) -> Result<Self> {
        let reg = Self::new();
        for decl in &cfg.metrics {
            reg.register(&decl.name, decl.kind.instantiate())?;
        }
        Ok(reg)
    }

    /// Metric registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<Metric> {
        self.metrics.read().get(name).cloned()
    }

    /// Register `metric` under `name`.
    ///
    /// Fails with `DuplicateMetric` when the name is taken. An unrecognized
    /// (`Opaque`) value is accepted but not stored: the call succeeds and a
    /// later `get` returns `None`.
    pub fn register(&self, name: &str, metric: Metric) -> Result<()> {
        let mut guard = self.metrics.write();
        if guard.contains_key(name) {
            tracing::warn!(metric = %name, "duplicate metric registration");
            return Err(MetricsError::DuplicateMetric(name.to_string()));
        }
        Self::insert_recognized(&mut guard, name, metric);
        Ok(())
    }

    /// Return the metric under `name`, registering one if absent.
    ///
    /// The factory (if any) runs with no lock held, so two callers racing on
    /// the same absent name may both materialize a value. First writer wins:
    /// the late value is dropped and the late caller gets the stored one, so
    /// every caller observes the same instance and none sees a duplicate error.
    /// An unrecognized value is returned to the caller but not stored.
    pub fn get_or_register(&self, name: &str, src: impl Into<MetricOrFactory>) -> Metric {
        if let Some(m) = self.get(name) {
            return m;
        }

        let metric = src.into().materialize();

        let mut guard = self.metrics.write();
        if let Some(existing) = guard.get(name) {
            tracing::debug!(metric = %name, "lost registration race; using stored metric");
            return existing.clone();
        }
        Self::insert_recognized(&mut guard, name, metric.clone());
        metric
    }

    /// Call `f` once per registered metric.
    ///
    /// Iterates a point-in-time snapshot taken under the read lock; `f` runs
    /// unlocked and may register or unregister freely. Order is unspecified.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Metric),
    {
        for (name, metric) in self.snapshot() {
            f(&name, &metric);
        }
    }

    /// Run `check()` on every registered healthcheck.
    ///
    /// Healthchecks are collected under the read lock and invoked after it is
    /// released.
    pub fn run_healthchecks(&self) {
        let checks: Vec<Arc<dyn Healthcheck>> = self
            .metrics
            .read()
            .values()
            .filter_map(|m| m.as_healthcheck().cloned())
            .collect();

        tracing::trace!(count = checks.len(), "running healthchecks");
        for h in checks {
            h.check();
        }
    }

    /// Remove `name`. Absent names are ignored.
    pub fn unregister(&self, name: &str) {
        if self.metrics.write().remove(name).is_some() {
            tracing::debug!(metric = %name, "metric unregistered");
        }
    }

    /// Remove every metric. Mostly for test isolation.
    pub fn unregister_all(&self) {
        self.metrics.write().clear();
    }

    pub fn len(&self) -> usize {
        self.metrics.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.read().is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.metrics.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy of every (name, metric) pair at this instant.
    pub fn snapshot(&self) -> Vec<(String, Metric)> {
        self.metrics
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn get_or_register_counter(&self, name: &str) -> Result<Arc<dyn Counter>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardCounter::new().into_metric()),
        );
        m.as_counter()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::Counter, &m))
    }

    pub fn get_or_register_gauge(&self, name: &str) -> Result<Arc<dyn Gauge>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardGauge::new().into_metric()),
        );
        m.as_gauge()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::Gauge, &m))
    }

    pub fn get_or_register_gauge_float64(&self, name: &str) -> Result<Arc<dyn GaugeFloat64>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardGaugeFloat64::new().into_metric()),
        );
        m.as_gauge_float64()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::GaugeFloat64, &m))
    }

    pub fn get_or_register_histogram(&self, name: &str) -> Result<Arc<dyn Histogram>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardHistogram::new().into_metric()),
        );
        m.as_histogram()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::Histogram, &m))
    }

    pub fn get_or_register_meter(&self, name: &str) -> Result<Arc<dyn Meter>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardMeter::new().into_metric()),
        );
        m.as_meter()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::Meter, &m))
    }

    pub fn get_or_register_timer(&self, name: &str) -> Result<Arc<dyn Timer>> {
        let m = self.get_or_register(
            name,
            MetricOrFactory::factory(|| StandardTimer::new().into_metric()),
        );
        m.as_timer()
            .cloned()
            .ok_or_else(|| mismatch(name, MetricKind::Timer, &m))
    }

    fn insert_recognized(map: &mut HashMap<String, Metric>, name: &str, metric: Metric) {
        if !metric.is_recognized() {
            tracing::debug!(metric = %name, "unrecognized metric kind; not stored");
            return;
        }
        tracing::debug!(metric = %name, kind = %metric.kind(), "metric registered");
        map.insert(name.to_string(), metric);
    }
}

fn mismatch(name: &str, expected: MetricKind, found: &Metric) -> MetricsError {
    MetricsError::KindMismatch {
        name: name.to_string(),
        expected: expected.as_str(),
        found: found.kind().as_str(),
    }
}
