//! Timer utilities
//!
//! Wall-clock measurement for request round-trips.

use std::time::{Duration, Instant};

/// Simple timer for measuring elapsed time
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    label: String,
}

impl Timer {
    /// Create and start a new timer
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            label: label.into(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Elapsed time in fractional milliseconds
    pub fn elapsed_ms(&self) -> f64 {
        duration_ms(self.elapsed())
    }

    /// Stop timer and return elapsed milliseconds
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_ms();
        tracing::debug!("{}: {:.2}ms", self.label, elapsed);
        elapsed
    }
}

/// Convert a duration into fractional milliseconds
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}
