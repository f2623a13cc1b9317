//! MTranServer harness - conformance and latency checks for a translation server
//!
//! Exercises every API surface of a running MTranServer-compatible service
//! and reports pass/fail per check.
//!
//! ## Surfaces
//!
//! - Native API: health, version, language list, single and batch translate
//! - Google Translate v2 compatible endpoint
//! - Immersive Translate and KISS Translator plugin endpoints
//! - Latency benchmark over single translate
//!
//! ## Usage
//!
//! ```bash
//! # Check a local server without authentication
//! mtran-harness
//!
//! # Check a remote server with an API token
//! mtran-harness http://10.0.0.5:8989 my-token
//!
//! # Machine-readable report, longer benchmark
//! mtran-harness --format json --count 50
//!
//! # List the checks
//! mtran-harness --list
//! ```
//!
//! Exits 0 when every check passed and 1 otherwise.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

mod checks;
mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
#[cfg(test)]
mod testing;
mod utils;

use checks::{endpoints, Harness};
use cli::Args;
use config::{EnvConfig, HarnessConfig, DEFAULT_BENCHMARK_COUNT};
use executor::CheckRunner;
use models::Check;
use output::ResultFormatter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    utils::init_logger(args.log_level()?);

    if args.list {
        list_checks();
        return Ok(());
    }
    if args.env_help {
        config::print_env_help();
        return Ok(());
    }

    let code = run(&args).await?;
    std::process::exit(code)
}

/// Resolve configuration: defaults, file, environment, then arguments
fn build_config(args: &Args) -> Result<HarnessConfig> {
    let env = EnvConfig::load();
    let config_path = args
        .config
        .clone()
        .or_else(|| env.config_file.as_ref().map(PathBuf::from));

    let mut config = match config_path {
        Some(path) => HarnessConfig::load(path)?,
        None => HarnessConfig::default(),
    };
    config.apply_env(&env);
    args.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Execute one run; the harness and its client are dropped before returning
async fn run(args: &Args) -> Result<i32> {
    let config = build_config(args)?;
    let kinds = args.selected_kinds()?;

    let mut formatter = ResultFormatter::new(config.output_format()?);
    if !config.color {
        formatter = formatter.no_color();
    }
    let streaming = formatter.format().is_streaming();

    let harness = Harness::from_config(&config).context("Failed to set up harness")?;
    let runner = if kinds.is_empty() {
        CheckRunner::new(harness, config.benchmark_count)
    } else {
        CheckRunner::only(harness, config.benchmark_count, &kinds)
    };

    if streaming {
        println!("{}", formatter.format_banner(&config));
    }

    let summary = runner
        .run_all(|section, result| {
            if !streaming {
                return;
            }
            if let Some(section) = section {
                println!("{}", formatter.format_section(section));
            }
            println!("{}", formatter.format_result(result));
        })
        .await;

    println!("{}", formatter.format_summary(&summary, &config)?);

    Ok(summary.exit_code())
}

fn list_checks() {
    let plan = Check::full_plan(DEFAULT_BENCHMARK_COUNT);
    let opt_in = plan.iter().filter(|check| check.kind().is_opt_in()).count();
    println!(
        "\nChecks ({} by default, {} more with --only)\n",
        plan.len() - opt_in,
        opt_in
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut current_section = None;
    for (idx, check) in plan.iter().enumerate() {
        let kind = check.kind();
        if current_section != Some(kind.section()) {
            current_section = Some(kind.section());
            println!("\n{}:", kind.section().title());
        }

        let endpoint = endpoints::for_kind(kind);
        println!(
            "  {:2}. {:40} {:4} {:24} auth: {:22} [--only {}]{}",
            idx + 1,
            check.name(),
            endpoint.method.as_str(),
            endpoint.path,
            endpoint.auth.to_string(),
            kind.slug(),
            if kind.is_opt_in() { " (opt-in)" } else { "" }
        );
    }

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
