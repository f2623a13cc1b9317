//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "MTRAN_HARNESS";

/// Configuration read from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from MTRAN_HARNESS_URL
    pub base_url: Option<String>,
    /// API token from MTRAN_HARNESS_TOKEN
    pub api_token: Option<String>,
    /// Timeout from MTRAN_HARNESS_TIMEOUT
    pub timeout: Option<u64>,
    /// Benchmark iterations from MTRAN_HARNESS_COUNT
    pub benchmark_count: Option<usize>,
    /// Output format from MTRAN_HARNESS_FORMAT
    pub format: Option<String>,
    /// Colour from MTRAN_HARNESS_COLOR
    pub color: Option<bool>,
    /// Config file from MTRAN_HARNESS_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));
        Self {
            base_url: get("URL"),
            api_token: get("TOKEN"),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            benchmark_count: get("COUNT").and_then(|v| v.parse().ok()),
            format: get("FORMAT"),
            color: get("COLOR").map(|v| parse_bool(&v)),
            config_file: get("CONFIG"),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Print all MTRAN_HARNESS environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_URL       Base URL of the service under test");
    println!("  {ENV_PREFIX}_TOKEN     API token");
    println!("  {ENV_PREFIX}_TIMEOUT   Request timeout in seconds");
    println!("  {ENV_PREFIX}_COUNT     Benchmark iterations");
    println!("  {ENV_PREFIX}_FORMAT    Output format (table, json, json-pretty, csv)");
    println!("  {ENV_PREFIX}_COLOR     Colorize table output (true/false)");
    println!("  {ENV_PREFIX}_CONFIG    Path to configuration file");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_URL=http://10.0.0.5:8989");
    println!("  export {ENV_PREFIX}_TOKEN=secret");
    println!("  mtran-harness");
}
