//! Periodic healthcheck runner.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use metreg_core::error::{MetricsError, Result};

use crate::registry::Registry;

/// Run `registry.run_healthchecks()` every `every` until the handle is aborted.
///
/// Must be called from within a tokio runtime. A zero `every` is rejected with
/// `BadConfig`. The first run happens immediately. Failing checks are logged
/// after each round.
pub fn spawn_runner(registry: Arc<Registry>, every: Duration) -> Result<JoinHandle<()>> {
    if every.is_zero() {
        return Err(MetricsError::BadConfig(
            "healthcheck interval must be non-zero".into(),
        ));
    }
    tracing::info!(interval_ms = every.as_millis() as u64, "healthcheck runner starting");
    Ok(tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            let reg = Arc::clone(&registry);
            // checks are synchronous and may block; keep them off the reactor
            let res = tokio::task::spawn_blocking(move || {
                reg.run_healthchecks();
                failing(&reg)
            })
            .await;

            match res {
                Ok(failures) => {
                    for (name, err) in failures {
                        tracing::warn!(healthcheck = %name, error = %err, "healthcheck failing");
                    }
                }
                Err(e) => tracing::warn!(error = %e, "healthcheck round aborted"),
            }
        }
    }))
}

fn failing(registry: &Registry) -> Vec<(String, String)> {
    let mut out = Vec::new();
    registry.each(|name, m| {
        if let Some(err) = m.as_healthcheck().and_then(|h| h.error()) {
            out.push((name.to_string(), err));
        }
    });
    out
}
