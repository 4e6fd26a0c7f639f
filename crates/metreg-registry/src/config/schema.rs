use std::time::Duration;

use serde::Deserialize;

use metreg_core::error::{MetricsError, Result};
use metreg_core::metric::Metric;
use metreg_core::standard::{
    StandardCounter, StandardGauge, StandardGaugeFloat64, StandardHistogram, StandardMeter,
    StandardTimer,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    pub version: u32,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub metrics: Vec<MetricDecl>,
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }
        self.registry.validate()?;
        for m in &self.metrics {
            if m.name.trim().is_empty() {
                return Err(MetricsError::BadConfig(
                    "metrics[].name must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    #[serde(default = "default_healthcheck_interval_ms")]
    pub healthcheck_interval_ms: u64,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            healthcheck_interval_ms: default_healthcheck_interval_ms(),
        }
    }
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.healthcheck_interval_ms) {
            return Err(MetricsError::BadConfig(
                "registry.healthcheck_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn healthcheck_interval(&self) -> Duration {
        Duration::from_millis(self.healthcheck_interval_ms)
    }
}

fn default_healthcheck_interval_ms() -> u64 {
    30000
}

/// A metric to pre-register at startup.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricDecl {
    pub name: String,
    pub kind: MetricKindConfig,
}

/// Kinds that can be declared in config. Healthchecks need code and are
/// registered programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKindConfig {
    Counter,
    Gauge,
    GaugeFloat64,
    Histogram,
    Meter,
    Timer,
}

impl MetricKindConfig {
    /// Fresh standard instrument of this kind.
    pub fn instantiate(self) -> Metric {
        match self {
            MetricKindConfig::Counter => StandardCounter::new().into_metric(),
            MetricKindConfig::Gauge => StandardGauge::new().into_metric(),
            MetricKindConfig::GaugeFloat64 => StandardGaugeFloat64::new().into_metric(),
            MetricKindConfig::Histogram => StandardHistogram::new().into_metric(),
            MetricKindConfig::Meter => StandardMeter::new().into_metric(),
            MetricKindConfig::Timer => StandardTimer::new().into_metric(),
        }
    }
}
