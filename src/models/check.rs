//! Check models for the translation harness
//!
//! Defines the endpoint surfaces, the planned checks with their inputs,
//! check results, and the run summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report section a check belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Basic,
    Translate,
    Plugin,
    Performance,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Basic => "Basic endpoints",
            Section::Translate => "Translate endpoints",
            Section::Plugin => "Plugin endpoints",
            Section::Performance => "Performance",
        }
    }
}

/// Endpoint surface exercised by a check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Health,
    Version,
    Heartbeat,
    LbHeartbeat,
    Languages,
    Translate,
    TranslateBatch,
    GoogleCompat,
    ImmePlugin,
    KissPlugin,
    DeeplPlugin,
    HcfyPlugin,
    Benchmark,
}

impl CheckKind {
    /// Human-readable name used in the report
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::Health => "Health check",
            CheckKind::Version => "Version",
            CheckKind::Heartbeat => "Heartbeat",
            CheckKind::LbHeartbeat => "Load balancer heartbeat",
            CheckKind::Languages => "Language list",
            CheckKind::Translate => "Translate",
            CheckKind::TranslateBatch => "Batch translate",
            CheckKind::GoogleCompat => "Google-compatible translate",
            CheckKind::ImmePlugin => "Immersive Translate plugin",
            CheckKind::KissPlugin => "KISS Translator plugin",
            CheckKind::DeeplPlugin => "DeepL-compatible plugin",
            CheckKind::HcfyPlugin => "Selection Translator plugin",
            CheckKind::Benchmark => "Latency benchmark",
        }
    }

    /// Short identifier accepted on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            CheckKind::Health => "health",
            CheckKind::Version => "version",
            CheckKind::Heartbeat => "heartbeat",
            CheckKind::LbHeartbeat => "lbheartbeat",
            CheckKind::Languages => "languages",
            CheckKind::Translate => "translate",
            CheckKind::TranslateBatch => "batch",
            CheckKind::GoogleCompat => "google",
            CheckKind::ImmePlugin => "imme",
            CheckKind::KissPlugin => "kiss",
            CheckKind::DeeplPlugin => "deepl",
            CheckKind::HcfyPlugin => "hcfy",
            CheckKind::Benchmark => "benchmark",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            CheckKind::Health
            | CheckKind::Version
            | CheckKind::Heartbeat
            | CheckKind::LbHeartbeat
            | CheckKind::Languages => Section::Basic,
            CheckKind::Translate | CheckKind::TranslateBatch | CheckKind::GoogleCompat => {
                Section::Translate
            }
            CheckKind::ImmePlugin
            | CheckKind::KissPlugin
            | CheckKind::DeeplPlugin
            | CheckKind::HcfyPlugin => Section::Plugin,
            CheckKind::Benchmark => Section::Performance,
        }
    }

    /// Surfaces that only run when selected with `--only`
    pub fn is_opt_in(&self) -> bool {
        matches!(
            self,
            CheckKind::Heartbeat
                | CheckKind::LbHeartbeat
                | CheckKind::DeeplPlugin
                | CheckKind::HcfyPlugin
        )
    }

    /// Get all surfaces, in run order
    pub fn all() -> Vec<CheckKind> {
        vec![
            CheckKind::Health,
            CheckKind::Version,
            CheckKind::Heartbeat,
            CheckKind::LbHeartbeat,
            CheckKind::Languages,
            CheckKind::Translate,
            CheckKind::TranslateBatch,
            CheckKind::GoogleCompat,
            CheckKind::ImmePlugin,
            CheckKind::KissPlugin,
            CheckKind::DeeplPlugin,
            CheckKind::HcfyPlugin,
            CheckKind::Benchmark,
        ]
    }

    /// Parse from slug
    pub fn from_slug(s: &str) -> Option<CheckKind> {
        let s = s.trim().to_lowercase();
        CheckKind::all().into_iter().find(|kind| kind.slug() == s)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Language pair of a translate-family check
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangPair {
    pub from: String,
    pub to: String,
}

impl LangPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for LangPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// One planned check invocation with its inputs
#[derive(Clone, Debug, PartialEq)]
pub enum Check {
    Health,
    Version,
    Heartbeat,
    LbHeartbeat,
    Languages,
    Translate { text: String, langs: LangPair },
    TranslateBatch { texts: Vec<String>, langs: LangPair },
    GoogleCompat { text: String, langs: LangPair },
    ImmePlugin { texts: Vec<String>, langs: LangPair },
    KissPlugin { text: String, langs: LangPair },
    DeeplPlugin { texts: Vec<String>, langs: LangPair },
    HcfyPlugin { text: String, langs: LangPair },
    Benchmark { count: usize },
}

impl Check {
    pub fn kind(&self) -> CheckKind {
        match self {
            Check::Health => CheckKind::Health,
            Check::Version => CheckKind::Version,
            Check::Heartbeat => CheckKind::Heartbeat,
            Check::LbHeartbeat => CheckKind::LbHeartbeat,
            Check::Languages => CheckKind::Languages,
            Check::Translate { .. } => CheckKind::Translate,
            Check::TranslateBatch { .. } => CheckKind::TranslateBatch,
            Check::GoogleCompat { .. } => CheckKind::GoogleCompat,
            Check::ImmePlugin { .. } => CheckKind::ImmePlugin,
            Check::KissPlugin { .. } => CheckKind::KissPlugin,
            Check::DeeplPlugin { .. } => CheckKind::DeeplPlugin,
            Check::HcfyPlugin { .. } => CheckKind::HcfyPlugin,
            Check::Benchmark { .. } => CheckKind::Benchmark,
        }
    }

    /// Report name, including the language pair where there is one
    pub fn name(&self) -> String {
        match self {
            Check::Translate { langs, .. }
            | Check::TranslateBatch { langs, .. }
            | Check::GoogleCompat { langs, .. }
            | Check::ImmePlugin { langs, .. }
            | Check::KissPlugin { langs, .. }
            | Check::DeeplPlugin { langs, .. }
            | Check::HcfyPlugin { langs, .. } => format!("{} ({langs})", self.kind().name()),
            _ => self.kind().name().to_string(),
        }
    }

    /// The ten checks of a full run, in driver order
    pub fn default_plan(benchmark_count: usize) -> Vec<Check> {
        Self::full_plan(benchmark_count)
            .into_iter()
            .filter(|check| !check.kind().is_opt_in())
            .collect()
    }

    /// Every check including the opt-in surfaces, in driver order
    pub fn full_plan(benchmark_count: usize) -> Vec<Check> {
        let en_zh = LangPair::new("en", "zh-Hans");
        vec![
            Check::Health,
            Check::Version,
            Check::Heartbeat,
            Check::LbHeartbeat,
            Check::Languages,
            Check::Translate {
                text: "Hello, world!".to_string(),
                langs: en_zh.clone(),
            },
            Check::Translate {
                text: "你好，世界！".to_string(),
                langs: LangPair::new("zh-Hans", "en"),
            },
            Check::TranslateBatch {
                texts: vec![
                    "Hello, world!".to_string(),
                    "Good morning!".to_string(),
                    "How are you?".to_string(),
                ],
                langs: en_zh.clone(),
            },
            Check::GoogleCompat {
                text: "The Great Pyramid of Giza".to_string(),
                langs: en_zh.clone(),
            },
            Check::ImmePlugin {
                texts: vec!["Hello, world!".to_string(), "Good morning!".to_string()],
                langs: en_zh.clone(),
            },
            Check::KissPlugin {
                text: "Hello, world!".to_string(),
                langs: en_zh.clone(),
            },
            Check::DeeplPlugin {
                texts: vec!["Hello, world!".to_string(), "Good morning!".to_string()],
                langs: en_zh.clone(),
            },
            Check::HcfyPlugin {
                text: "Hello, world!".to_string(),
                langs: en_zh,
            },
            Check::Benchmark {
                count: benchmark_count,
            },
        ]
    }
}

/// Result of a single check invocation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub name: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub elapsed_ms: Option<f64>,
    pub message: String,
    pub sample: Option<serde_json::Value>,
}

impl CheckResult {
    pub fn pass(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: kind.name().to_string(),
            success: true,
            status_code: None,
            elapsed_ms: None,
            message: message.into(),
            sample: None,
        }
    }

    pub fn fail(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::pass(kind, message)
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_elapsed(mut self, elapsed_ms: f64) -> Self {
        self.elapsed_ms = Some(elapsed_ms);
        self
    }

    pub fn with_sample(mut self, sample: serde_json::Value) -> Self {
        self.sample = Some(sample);
        self
    }

    pub fn symbol(&self) -> &'static str {
        if self.success {
            "✓"
        } else {
            "✗"
        }
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.symbol(), self.name)?;
        if !self.message.is_empty() {
            write!(f, " - {}", self.message)?;
        }
        Ok(())
    }
}

/// Summary of one run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    pub base_url: String,
    pub authenticated: bool,
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub total_duration_ms: f64,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    pub fn new(
        base_url: impl Into<String>,
        authenticated: bool,
        started_at: DateTime<Utc>,
        total_duration_ms: f64,
        results: Vec<CheckResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.success).count();

        Self {
            base_url: base_url.into(),
            authenticated,
            started_at,
            total,
            passed,
            failed: total - passed,
            total_duration_ms,
            results,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn is_all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Process exit code for this run
    pub fn exit_code(&self) -> i32 {
        if self.is_all_passed() {
            0
        } else {
            1
        }
    }
}
