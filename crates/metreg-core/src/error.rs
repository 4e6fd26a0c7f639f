//! Shared error type across metreg crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by core and registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// A metric is already registered under this name.
    #[error("duplicate metric: {0:?}")]
    DuplicateMetric(String),
    /// A typed lookup found a metric of another kind under this name.
    #[error("metric {name:?} is a {found}, not a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Stable code for logs and assertions.
    pub fn code(&self) -> &'static str {
        match self {
            MetricsError::DuplicateMetric(_) => "DUPLICATE_METRIC",
            MetricsError::KindMismatch { .. } => "KIND_MISMATCH",
            MetricsError::BadConfig(_) => "BAD_CONFIG",
            MetricsError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            MetricsError::Internal(_) => "INTERNAL",
        }
    }
}
