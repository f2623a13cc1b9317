//! Latency statistics for the benchmark
//!
//! Summarizes the round-trip samples of a completed benchmark.

use serde::Serialize;

/// Summary of benchmark round-trip times, in milliseconds
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LatencyStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub p50: f64,
    pub p95: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl LatencyStats {
    pub fn from_samples(samples: &[f64]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Self::default();
        };

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let variance = sorted.iter().map(|ms| (ms - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            mean,
            min,
            max,
            p50: quantile(&sorted, 0.50),
            p95: quantile(&sorted, 0.95),
            std_dev: variance.sqrt(),
        }
    }

    /// One-line summary used as the benchmark result message
    pub fn format_summary(&self) -> String {
        format!(
            "mean: {:.2}ms, min: {:.2}ms, max: {:.2}ms, p50: {:.2}ms, p95: {:.2}ms, std: {:.2}ms",
            self.mean, self.min, self.max, self.p50, self.p95, self.std_dev
        )
    }
}

/// Quantile of a sorted, non-empty slice, interpolating between ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let rank = q * (sorted.len() - 1) as f64;
    let below = rank.floor() as usize;
    let above = rank.ceil() as usize;
    sorted[below] + (sorted[above] - sorted[below]) * (rank - below as f64)
}

/// Average time per item of a batch request
pub fn per_item_average(total_ms: f64, items: usize) -> f64 {
    if items == 0 {
        0.0
    } else {
        total_ms / items as f64
    }
}
