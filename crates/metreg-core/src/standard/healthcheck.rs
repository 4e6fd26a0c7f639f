use std::fmt;

use parking_lot::Mutex;

use crate::metric::{Healthcheck, Metric};

type CheckFn = Box<dyn Fn() -> std::result::Result<(), String> + Send + Sync>;

/// Healthcheck backed by a closure.
///
/// Each `check()` runs the closure and records the outcome: `Ok` marks the
/// check healthy, `Err(msg)` stores `msg` until the next successful run.
pub struct StandardHealthcheck {
    f: CheckFn,
    err: Mutex<Option<String>>,
}

impl StandardHealthcheck {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            f: Box::new(f),
            err: Mutex::new(None),
        }
    }

    pub fn into_metric(self) -> Metric {
        Metric::healthcheck(self)
    }
}

impl Healthcheck for StandardHealthcheck {
    fn check(&self) {
        match (self.f)() {
            Ok(()) => self.healthy(),
            Err(e) => {
                tracing::debug!(error = %e, "healthcheck failed");
                self.unhealthy(e);
            }
        }
    }

    fn error(&self) -> Option<String> {
        self.err.lock().clone()
    }

    fn healthy(&self) {
        *self.err.lock() = None;
    }

    fn unhealthy(&self, err: String) {
        *self.err.lock() = Some(err);
    }
}

impl fmt::Debug for StandardHealthcheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardHealthcheck")
            .field("err", &*self.err.lock())
            .finish_non_exhaustive()
    }
}
