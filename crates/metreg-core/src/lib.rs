//! metreg core: metric capability contracts, the `Metric` sum type, and
//! standard in-process instruments.
//!
//! The registry crate stores `Metric` values and never looks inside them;
//! everything it needs to know about an instrument is expressed by the
//! capability traits in [`metric`]. This crate carries no runtime or
//! config dependencies so instruments can be shared by any consumer.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Instruments are
//! updated from hot paths and must never bring the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod standard;

/// Shared result type.
pub use error::{MetricsError, Result};
pub use metric::{
    Counter, Gauge, GaugeFloat64, Healthcheck, Histogram, Meter, Metric, MetricKind,
    MetricOrFactory, Timer,
};
pub use standard::{
    StandardCounter, StandardGauge, StandardGaugeFloat64, StandardHealthcheck, StandardHistogram,
    StandardMeter, StandardTimer,
};
