//! Metric capability contracts.
//!
//! A value is storable in a registry when it is wrapped in one of the
//! recognized [`Metric`] variants. Anything else travels as
//! [`Metric::Opaque`], which registries accept but never retain.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic-ish integer count that can also move down.
pub trait Counter: Send + Sync {
    fn inc(&self, n: i64);
    fn dec(&self, n: i64);
    fn count(&self) -> i64;
    fn clear(&self);
}

/// Last-written integer value.
pub trait Gauge: Send + Sync {
    fn update(&self, v: i64);
    fn value(&self) -> i64;
}

/// Last-written floating point value.
pub trait GaugeFloat64: Send + Sync {
    fn update(&self, v: f64);
    fn value(&self) -> f64;
}

/// Distribution of integer observations.
pub trait Histogram: Send + Sync {
    fn update(&self, v: i64);
    fn count(&self) -> u64;
    fn sum(&self) -> i64;
    /// Smallest observation, 0 when empty.
    fn min(&self) -> i64;
    /// Largest observation, 0 when empty.
    fn max(&self) -> i64;
    fn mean(&self) -> f64;
    fn clear(&self);
}

/// Event throughput.
pub trait Meter: Send + Sync {
    fn mark(&self, n: i64);
    fn count(&self) -> i64;
    /// Events per second since the meter was created.
    fn rate_mean(&self) -> f64;
}

/// Duration distribution plus call throughput.
pub trait Timer: Send + Sync {
    fn update(&self, d: Duration);
    fn count(&self) -> u64;
    fn total(&self) -> Duration;
    fn mean(&self) -> Duration;
    fn rate_mean(&self) -> f64;

    fn update_since(&self, start: Instant) {
        self.update(start.elapsed());
    }

    /// Run `f` and record how long it took.
    fn time<R>(&self, f: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        let start = Instant::now();
        let out = f();
        self.update_since(start);
        out
    }
}

/// A diagnostic that records its own outcome.
///
/// The registry only ever calls [`Healthcheck::check`]; results are read back
/// from the instance itself.
pub trait Healthcheck: Send + Sync {
    fn check(&self);
    /// Last recorded failure, `None` while healthy.
    fn error(&self) -> Option<String>;
    fn healthy(&self);
    fn unhealthy(&self, err: String);
}

/// Tag naming each metric variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Counter,
    Gauge,
    GaugeFloat64,
    Histogram,
    Meter,
    Timer,
    Healthcheck,
    Opaque,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::GaugeFloat64 => "gauge_float64",
            MetricKind::Histogram => "histogram",
            MetricKind::Meter => "meter",
            MetricKind::Timer => "timer",
            MetricKind::Healthcheck => "healthcheck",
            MetricKind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shared handle to a live instrument.
///
/// Cloning clones the handle, not the instrument: every clone updates the
/// same underlying state.
#[derive(Clone)]
pub enum Metric {
    Counter(Arc<dyn Counter>),
    Gauge(Arc<dyn Gauge>),
    GaugeFloat64(Arc<dyn GaugeFloat64>),
    Histogram(Arc<dyn Histogram>),
    Meter(Arc<dyn Meter>),
    Timer(Arc<dyn Timer>),
    Healthcheck(Arc<dyn Healthcheck>),
    /// A value of a kind outside the recognized set.
    Opaque(Arc<dyn Any + Send + Sync>),
}

impl Metric {
    pub fn counter(c: impl Counter + 'static) -> Self {
        Metric::Counter(Arc::new(c))
    }

    pub fn gauge(g: impl Gauge + 'static) -> Self {
        Metric::Gauge(Arc::new(g))
    }

    pub fn gauge_float64(g: impl GaugeFloat64 + 'static) -> Self {
        Metric::GaugeFloat64(Arc::new(g))
    }

    pub fn histogram(h: impl Histogram + 'static) -> Self {
        Metric::Histogram(Arc::new(h))
    }

    pub fn meter(m: impl Meter + 'static) -> Self {
        Metric::Meter(Arc::new(m))
    }

    pub fn timer(t: impl Timer + 'static) -> Self {
        Metric::Timer(Arc::new(t))
    }

    pub fn healthcheck(h: impl Healthcheck + 'static) -> Self {
        Metric::Healthcheck(Arc::new(h))
    }

    pub fn opaque(v: impl Any + Send + Sync) -> Self {
        Metric::Opaque(Arc::new(v))
    }

    pub fn kind(&self) -> MetricKind {
        match self {
            Metric::Counter(_) => MetricKind::Counter,
            Metric::Gauge(_) => MetricKind::Gauge,
            Metric::GaugeFloat64(_) => MetricKind::GaugeFloat64,
            Metric::Histogram(_) => MetricKind::Histogram,
            Metric::Meter(_) => MetricKind::Meter,
            Metric::Timer(_) => MetricKind::Timer,
            Metric::Healthcheck(_) => MetricKind::Healthcheck,
            Metric::Opaque(_) => MetricKind::Opaque,
        }
    }

    /// Whether a registry will retain this value.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Metric::Opaque(_))
    }

    /// True when both handles point at the same instrument.
    pub fn ptr_eq(&self, other: &Metric) -> bool {
        self.data_ptr() == other.data_ptr()
    }

    fn data_ptr(&self) -> *const () {
        match self {
            Metric::Counter(m) => Arc::as_ptr(m) as *const (),
            Metric::Gauge(m) => Arc::as_ptr(m) as *const (),
            Metric::GaugeFloat64(m) => Arc::as_ptr(m) as *const (),
            Metric::Histogram(m) => Arc::as_ptr(m) as *const (),
            Metric::Meter(m) => Arc::as_ptr(m) as *const (),
            Metric::Timer(m) => Arc::as_ptr(m) as *const (),
            Metric::Healthcheck(m) => Arc::as_ptr(m) as *const (),
            Metric::Opaque(m) => Arc::as_ptr(m) as *const (),
        }
    }

    pub fn as_counter(&self) -> Option<&Arc<dyn Counter>> {
        match self {
            Metric::Counter(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_gauge(&self) -> Option<&Arc<dyn Gauge>> {
        match self {
            Metric::Gauge(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_gauge_float64(&self) -> Option<&Arc<dyn GaugeFloat64>> {
        match self {
            Metric::GaugeFloat64(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_histogram(&self) -> Option<&Arc<dyn Histogram>> {
        match self {
            Metric::Histogram(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_meter(&self) -> Option<&Arc<dyn Meter>> {
        match self {
            Metric::Meter(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_timer(&self) -> Option<&Arc<dyn Timer>> {
        match self {
            Metric::Timer(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_healthcheck(&self) -> Option<&Arc<dyn Healthcheck>> {
        match self {
            Metric::Healthcheck(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Metric")
            .field(&self.kind())
            .field(&self.data_ptr())
            .finish()
    }
}

/// Argument to `get_or_register`: either a ready value or a constructor to run
/// only when the name is absent.
pub enum MetricOrFactory {
    Value(Metric),
    Factory(Box<dyn FnOnce() -> Metric + Send>),
}

impl MetricOrFactory {
    pub fn factory(f: impl FnOnce() -> Metric + Send + 'static) -> Self {
        MetricOrFactory::Factory(Box::new(f))
    }

    /// Produce the value, invoking the factory if there is one.
    pub fn materialize(self) -> Metric {
        match self {
            MetricOrFactory::Value(m) => m,
            MetricOrFactory::Factory(f) => f(),
        }
    }
}

impl From<Metric> for MetricOrFactory {
    fn from(m: Metric) -> Self {
        MetricOrFactory::Value(m)
    }
}

impl fmt::Debug for MetricOrFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricOrFactory::Value(m) => f.debug_tuple("Value").field(m).finish(),
            MetricOrFactory::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}
