//! Performance instrumentation for the interaction hot paths.
//!
//! Pointer-move handlers can run 60+ times per second during a drag, so the
//! engine carries lightweight scoped timing that is zero-cost unless the
//! `profiling` feature is enabled.

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
#[cfg(not(feature = "profiling"))]
use tracing::warn;

/// Budget for a single pointer-event handler in milliseconds.
pub const TARGET_EVENT_MS: f64 = 16.67;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name; // Suppress unused variable warning
    };
}

pub use profile_scope;

/// A scoped timer that logs its duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer for profiling (1ms threshold).
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        if elapsed_ms > self.threshold_ms {
            trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);
        }

        #[cfg(not(feature = "profiling"))]
        if elapsed_ms > self.threshold_ms.max(TARGET_EVENT_MS) {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                "Slow operation"
            );
        }
    }
}

/// Measure execution time of a closure; returns the result and elapsed ms.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
