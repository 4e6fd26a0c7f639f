//! metreg registry: a concurrent name -> metric registry.
//!
//! Holds live instruments (not samples) under a read/write lock, plus the
//! strict YAML config used to pre-declare metrics and a tokio task that runs
//! registered healthchecks on an interval.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod healthcheck;
pub mod registry;

pub use registry::Registry;
