//! Registry config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use metreg_core::error::{MetricsError, Result};

pub use schema::{MetricDecl, MetricKindConfig, RegistryConfig, RegistrySection};

/// Read and validate a config file. Errors name the offending path.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<RegistryConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        MetricsError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    load_from_str(&s).map_err(|e| match e {
        MetricsError::BadConfig(msg) => {
            MetricsError::BadConfig(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

pub fn load_from_str(s: &str) -> Result<RegistryConfig> {
    let cfg: RegistryConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricsError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
