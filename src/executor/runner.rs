//! Check execution runner
//!
//! Drives one full run: every planned check in order, one at a time.

use chrono::Utc;
use tracing::{info, warn};

use crate::checks::Harness;
use crate::models::{Check, CheckKind, CheckResult, RunSummary, Section};
use crate::utils::Timer;

/// Sequential runner over a fixed plan
pub struct CheckRunner {
    harness: Harness,
    plan: Vec<Check>,
}

impl CheckRunner {
    /// Create a runner with the default ten-check plan
    pub fn new(harness: Harness, benchmark_count: usize) -> Self {
        Self::with_plan(harness, Check::default_plan(benchmark_count))
    }

    pub fn with_plan(harness: Harness, plan: Vec<Check>) -> Self {
        Self { harness, plan }
    }

    /// Create a runner for the given surfaces only, opt-in ones included,
    /// in driver order
    pub fn only(harness: Harness, benchmark_count: usize, kinds: &[CheckKind]) -> Self {
        let plan = Check::full_plan(benchmark_count)
            .into_iter()
            .filter(|check| kinds.contains(&check.kind()))
            .collect();
        Self::with_plan(harness, plan)
    }

    /// Run every planned check.
    ///
    /// `on_result` sees each result as soon as it is available, along with
    /// the section when a new one starts. A failed check never stops the run.
    pub async fn run_all<F>(&self, mut on_result: F) -> RunSummary
    where
        F: FnMut(Option<Section>, &CheckResult),
    {
        let started_at = Utc::now();
        let timer = Timer::start("run");
        let mut results = Vec::with_capacity(self.plan.len());
        let mut current_section = None;

        info!(
            "Running {} checks against {}",
            self.plan.len(),
            self.harness.base_url()
        );

        for check in &self.plan {
            let section = check.kind().section();
            let new_section = (current_section != Some(section)).then_some(section);
            current_section = Some(section);

            let result = self.harness.run(check).await;
            if !result.success {
                warn!("{}", result);
            }

            on_result(new_section, &result);
            results.push(result);
        }

        let summary = RunSummary::new(
            self.harness.base_url(),
            self.harness.is_authenticated(),
            started_at,
            timer.stop(),
            results,
        );

        info!("{}/{} checks passed", summary.passed, summary.total);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, RecordedRequest};
    use serde_json::json;
    use wiremock::MockServer;

    async fn healthy_server() -> MockServer {
        let server = MockServer::start().await;
        testing::mock_json(&server, "GET", "/health", 200, json!({"status": "ok"})).await;
        testing::mock_json(&server, "GET", "/version", 200, json!({"version": "4.0.0"})).await;
        testing::mock_text(&server, "GET", "/__heartbeat__", 200, "OK").await;
        testing::mock_text(&server, "GET", "/__lbheartbeat__", 200, "OK").await;
        testing::mock_json(
            &server,
            "GET",
            "/languages",
            200,
            json!({"languages": ["en", "zh-Hans"]}),
        )
        .await;
        testing::mock_json(&server, "POST", "/translate", 200, json!({"result": "你好，世界！"}))
            .await;
        testing::mock_json(
            &server,
            "POST",
            "/translate/batch",
            200,
            json!({"results": ["a", "b", "c"]}),
        )
        .await;
        testing::mock_json(
            &server,
            "POST",
            "/language/translate/v2",
            200,
            json!({"data": {"translations": [{"translatedText": "金字塔"}]}}),
        )
        .await;
        testing::mock_json(&server, "POST", "/imme", 200, json!({"trans": ["a", "b"]})).await;
        testing::mock_json(&server, "POST", "/deepl", 200, json!({"translations": []})).await;
        testing::mock_json(&server, "POST", "/hcfy", 200, json!({"result": ["你好"]})).await;
        server
    }

    async fn mock_kiss(server: &MockServer, status: u16) {
        testing::mock_json(server, "POST", "/kiss", status, json!({"text": "你好"})).await;
    }

    fn runner(server: &MockServer, token: Option<&str>, count: usize) -> CheckRunner {
        CheckRunner::new(Harness::new(&server.uri(), token, 30).unwrap(), count)
    }

    #[tokio::test]
    async fn test_all_checks_pass_against_healthy_service() {
        let server = healthy_server().await;
        mock_kiss(&server, 200).await;
        let summary = runner(&server, None, 3).run_all(|_, _| {}).await;

        assert_eq!(summary.total, 10);
        assert_eq!(summary.passed, 10);
        assert_eq!(summary.exit_code(), 0);
        assert!(!summary.authenticated);
        assert_eq!(testing::hits(&server, "/__heartbeat__").await, 0);
        assert_eq!(testing::hits(&server, "/deepl").await, 0);
    }

    #[tokio::test]
    async fn test_one_failing_endpoint_fails_one_check() {
        let server = healthy_server().await;
        mock_kiss(&server, 500).await;
        let summary = runner(&server, None, 3).run_all(|_, _| {}).await;

        assert_eq!(summary.total, 10);
        assert_eq!(summary.failed, 1);
        let failed: Vec<_> = summary.results.iter().filter(|r| !r.success).collect();
        assert_eq!(failed[0].kind, CheckKind::KissPlugin);
        assert_eq!(failed[0].status_code, Some(500));
        assert_eq!(summary.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_service_still_yields_ten_results() {
        let runner = CheckRunner::new(Harness::new(&testing::unused_url(), None, 5).unwrap(), 10);
        let summary = runner.run_all(|_, _| {}).await;

        assert_eq!(summary.total, 10);
        assert_eq!(summary.passed, 0);
    }

    #[tokio::test]
    async fn test_sections_reported_once_in_order() {
        let server = healthy_server().await;
        mock_kiss(&server, 200).await;
        let mut sections = Vec::new();
        let mut seen = 0;
        runner(&server, None, 1)
            .run_all(|section, _| {
                seen += 1;
                if let Some(section) = section {
                    sections.push(section);
                }
            })
            .await;

        assert_eq!(seen, 10);
        assert_eq!(
            sections,
            vec![
                Section::Basic,
                Section::Translate,
                Section::Plugin,
                Section::Performance
            ]
        );
    }

    #[tokio::test]
    async fn test_auth_placement_per_surface() {
        let server = healthy_server().await;
        mock_kiss(&server, 200).await;
        let harness = Harness::new(&server.uri(), Some("s3cret"), 30).unwrap();
        let summary = CheckRunner::only(harness, 1, &CheckKind::all())
            .run_all(|_, _| {})
            .await;
        assert!(summary.authenticated);
        assert_eq!(summary.total, 14);
        assert!(summary.is_all_passed());

        for request in testing::requests(&server).await {
            let authorization = request.header_value("authorization");
            let key = request.header_value("key");
            let query_token = request.query_value("token");

            match request.url.path() {
                "/health" | "/version" | "/__heartbeat__" | "/__lbheartbeat__" => {
                    assert!(!request.has_credentials())
                }
                "/languages" | "/translate" | "/translate/batch" | "/language/translate/v2" => {
                    assert_eq!(authorization, Some("Bearer s3cret"));
                    assert_eq!(key, None);
                    assert_eq!(query_token, None);
                }
                "/imme" | "/hcfy" => {
                    assert_eq!(query_token.as_deref(), Some("s3cret"));
                    assert_eq!(authorization, None);
                    assert_eq!(key, None);
                }
                "/kiss" => {
                    assert_eq!(key, Some("s3cret"));
                    assert_eq!(authorization, None);
                    assert_eq!(query_token, None);
                }
                "/deepl" => {
                    assert_eq!(authorization, Some("DeepL-Auth-Key s3cret"));
                    assert_eq!(key, None);
                    assert_eq!(query_token, None);
                }
                other => panic!("unexpected path {other}"),
            }
        }
    }

    #[tokio::test]
    async fn test_no_token_sends_no_credentials() {
        let server = healthy_server().await;
        mock_kiss(&server, 200).await;
        runner(&server, None, 2).run_all(|_, _| {}).await;

        let requests = testing::requests(&server).await;
        assert_eq!(requests.len(), 11);
        assert!(requests.iter().all(|r| !r.has_credentials()));
    }

    #[tokio::test]
    async fn test_only_filters_plan() {
        let server = healthy_server().await;
        let harness = Harness::new(&server.uri(), None, 30).unwrap();
        let runner = CheckRunner::only(harness, 1, &[CheckKind::Translate, CheckKind::Health]);

        let summary = runner.run_all(|_, _| {}).await;
        assert_eq!(summary.total, 3);
        assert_eq!(summary.results[0].kind, CheckKind::Health);
        assert_eq!(testing::hits(&server, "/translate").await, 2);
    }

    #[tokio::test]
    async fn test_only_runs_opt_in_surfaces() {
        let server = healthy_server().await;
        let harness = Harness::new(&server.uri(), None, 30).unwrap();
        let runner = CheckRunner::only(
            harness,
            1,
            &[CheckKind::HcfyPlugin, CheckKind::Heartbeat, CheckKind::DeeplPlugin],
        );

        let summary = runner.run_all(|_, _| {}).await;
        let kinds: Vec<CheckKind> = summary.results.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![CheckKind::Heartbeat, CheckKind::DeeplPlugin, CheckKind::HcfyPlugin]
        );
        assert!(summary.is_all_passed());
    }
}
