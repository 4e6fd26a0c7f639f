//! Standard in-process instruments.
//!
//! Numeric instruments keep their state in atomics so they can be updated from any thread
//! without touching the registry lock. Histograms use fixed cumulative buckets
//! and meters report only a mean rate; no sampling or decay is performed.

mod healthcheck;
mod histogram;
mod meter;
mod scalar;

pub use healthcheck::StandardHealthcheck;
pub use histogram::{StandardHistogram, BUCKET_BOUNDS};
pub use meter::{StandardMeter, StandardTimer};
pub use scalar::{StandardCounter, StandardGauge, StandardGaugeFloat64};
