//! Output formatters for check results
//!
//! Provides the human-readable table report plus JSON and CSV renderings.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use serde_json::Value;

use crate::config::HarnessConfig;
use crate::models::{CheckKind, CheckResult, RunSummary, Section};

const RULE: &str = "============================================================";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }

    /// Whether results are printed as they arrive
    pub fn is_streaming(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

/// Report document for JSON output
#[derive(Serialize)]
struct JsonReport<'a> {
    config: HarnessConfig,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

/// One CSV line per check
#[derive(Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    name: &'a str,
    success: bool,
    status_code: Option<u16>,
    elapsed_ms: Option<String>,
    message: &'a str,
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn paint(&self, text: &str, success: bool) -> String {
        if !self.colorize {
            return text.to_string();
        }
        if success {
            format!("\x1b[32m{text}\x1b[0m")
        } else {
            format!("\x1b[31m{text}\x1b[0m")
        }
    }

    /// Run header with target and token state
    pub fn format_banner(&self, config: &HarnessConfig) -> String {
        let token = if config.token().is_some() {
            "set"
        } else {
            "not set"
        };
        format!(
            "{RULE}\nMTranServer check run\n{RULE}\nServer:    {}\nAPI token: {}",
            config.base_url, token
        )
    }

    pub fn format_section(&self, section: Section) -> String {
        format!("\n{RULE}\n{}\n{RULE}", section.title())
    }

    /// Format a single check result
    pub fn format_result(&self, result: &CheckResult) -> String {
        let mut output = format!(
            "\n[{}] {}",
            self.paint(result.symbol(), result.success),
            result.name
        );

        if !result.message.is_empty() {
            output.push_str(&format!("\n    {}", result.message));
        }

        if let Some(sample) = &result.sample {
            if result.kind == CheckKind::Benchmark {
                output.push_str(&format_iterations(sample));
            } else if !sample.is_null() {
                output.push_str(&format!("\n    data: {}", truncate(&sample.to_string(), 200)));
            }
        }

        output
    }

    /// Format the run summary
    pub fn format_summary(&self, summary: &RunSummary, config: &HarnessConfig) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_summary_table(summary)),
            OutputFormat::Json => {
                serde_json::to_string(&Self::json_report(summary, config))
                    .context("Failed to serialize report")
            }
            OutputFormat::JsonPretty => {
                serde_json::to_string_pretty(&Self::json_report(summary, config))
                    .context("Failed to serialize report")
            }
            OutputFormat::Csv => Self::format_summary_csv(summary),
        }
    }

    fn json_report<'a>(summary: &'a RunSummary, config: &HarnessConfig) -> JsonReport<'a> {
        JsonReport {
            config: config.redacted(),
            summary,
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{RULE}\nSummary\n{RULE}\n"));
        output.push_str(&format!("\nPassed: {}/{}\n", summary.passed, summary.total));

        for result in &summary.results {
            output.push_str(&format!(
                "  [{}] {}\n",
                self.paint(result.symbol(), result.success),
                result.name
            ));
        }

        output.push_str(&format!(
            "\nPass rate: {:.1}% | Duration: {:.2}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));

        output.push_str(&format!("\n{RULE}\n"));
        if summary.is_all_passed() {
            output.push_str(&self.paint("All checks passed!", true));
        } else {
            output.push_str(&self.paint(&format!("{} check(s) failed", summary.failed), false));
        }
        output.push_str(&format!("\n{RULE}"));

        output
    }

    fn format_summary_csv(summary: &RunSummary) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for result in &summary.results {
            writer
                .serialize(CsvRow {
                    kind: result.kind.slug(),
                    name: &result.name,
                    success: result.success,
                    status_code: result.status_code,
                    elapsed_ms: result.elapsed_ms.map(|ms| format!("{ms:.2}")),
                    message: &result.message,
                })
                .context("Failed to write CSV row")?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not UTF-8")
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

/// Per-iteration lines of a benchmark sample
fn format_iterations(sample: &Value) -> String {
    sample["iterations_ms"]
        .as_array()
        .map(|iterations| {
            iterations
                .iter()
                .enumerate()
                .filter_map(|(i, ms)| ms.as_f64().map(|ms| format!("\n    #{}: {ms:.2}ms", i + 1)))
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
