//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::models::CheckKind;
use crate::utils::LogLevel;

/// Conformance and latency checks for an MTranServer-compatible service
#[derive(Parser, Debug)]
#[command(name = "mtran-harness")]
#[command(version)]
#[command(about = "Check every API surface of a running translation server")]
#[command(long_about = None)]
pub struct Args {
    /// Base URL of the service under test [default: http://localhost:8989]
    pub base_url: Option<String>,

    /// API token; omit or pass "" to run unauthenticated
    pub token: Option<String>,

    /// Benchmark iterations
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Output format (table, json, json-pretty, csv)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run only these surfaces (comma-separated, e.g. health,kiss); also
    /// enables the opt-in heartbeat, lbheartbeat, deepl and hcfy checks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// List the checks and exit
    #[arg(short, long)]
    pub list: bool,

    /// Describe environment variables and exit
    #[arg(long)]
    pub env_help: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Effective log level; `--log-level` wins over `--verbose`
    pub fn log_level(&self) -> Result<LogLevel> {
        match &self.log_level {
            Some(level) => level.parse().map_err(|e: String| anyhow!(e)),
            None if self.verbose => Ok(LogLevel::Debug),
            None => Ok(LogLevel::Warn),
        }
    }

    /// Surfaces selected with `--only`
    pub fn selected_kinds(&self) -> Result<Vec<CheckKind>> {
        self.only
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                CheckKind::from_slug(s).ok_or_else(|| {
                    let known: Vec<&str> = CheckKind::all().iter().map(|k| k.slug()).collect();
                    anyhow!("Unknown check: {s} (expected one of {})", known.join(", "))
                })
            })
            .collect()
    }

    /// Overlay command-line values onto `config`
    pub fn apply(&self, config: &mut HarnessConfig) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            config.api_token = Some(token.clone());
        }
        if let Some(count) = self.count {
            config.benchmark_count = count;
        }
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.no_color {
            config.color = false;
        }
    }
}
