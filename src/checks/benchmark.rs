//! Latency benchmark
//!
//! Repeats the single-translate request and reports latency statistics.
//! Unlike the surface checks, the benchmark stops at the first iteration
//! that does not return 200 and reports the whole benchmark as failed.

use serde_json::json;
use tracing::{debug, warn};

use super::endpoints;
use super::harness::Harness;
use super::metrics::LatencyStats;
use crate::models::{CheckKind, CheckResult};

const BENCHMARK_TEXT: &str = "Hello, world!";
const BENCHMARK_FROM: &str = "en";
const BENCHMARK_TO: &str = "zh-Hans";

impl Harness {
    /// POST /translate `count` times, failing fast on the first non-200
    pub async fn benchmark(&self, count: usize) -> CheckResult {
        let kind = CheckKind::Benchmark;
        if count == 0 {
            return CheckResult::fail(kind, "benchmark needs at least one iteration");
        }

        let payload = json!({"from": BENCHMARK_FROM, "to": BENCHMARK_TO, "text": BENCHMARK_TEXT});
        let mut samples = Vec::with_capacity(count);

        for iteration in 1..=count {
            let request = endpoints::TRANSLATE
                .request(self.token())
                .json(payload.clone());

            match self.client.send(request).await {
                Ok(response) if response.is_ok() => {
                    debug!("Iteration {}/{}: {:.2}ms", iteration, count, response.elapsed_ms);
                    samples.push(response.elapsed_ms);
                }
                Ok(response) => {
                    warn!(
                        "Benchmark stopped at iteration {}/{} with status {}",
                        iteration, count, response.status_code
                    );
                    return CheckResult::fail(
                        kind,
                        format!(
                            "iteration {iteration}/{count} failed (status: {})",
                            response.status_code
                        ),
                    )
                    .with_status(response.status_code)
                    .with_sample(json!({"iterations_ms": samples}));
                }
                Err(e) => {
                    warn!("Benchmark stopped at iteration {}/{}: {}", iteration, count, e);
                    return CheckResult::fail(
                        kind,
                        format!("iteration {iteration}/{count} failed: {e}"),
                    )
                    .with_sample(json!({"iterations_ms": samples}));
                }
            }
        }

        let stats = LatencyStats::from_samples(&samples);
        CheckResult::pass(kind, stats.format_summary())
            .with_status(200)
            .with_sample(json!({
                "iterations_ms": samples,
                "stats": stats,
            }))
    }
}
