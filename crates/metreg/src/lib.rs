//! Top-level facade crate for metreg.
//!
//! Re-exports core types and the registry library so users can depend on a single crate.

pub mod core {
    pub use metreg_core::*;
}

pub mod registry {
    pub use metreg_registry::*;
}

pub use metreg_core::{Metric, MetricOrFactory, MetricsError, Result};
pub use metreg_registry::Registry;
