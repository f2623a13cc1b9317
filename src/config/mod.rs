//! Configuration module
//!
//! Layered harness configuration: defaults, optional config file,
//! `MTRAN_HARNESS_*` environment variables, then command-line arguments.

mod env;

pub use env::{print_env_help, EnvConfig};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::output::OutputFormat;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8989";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BENCHMARK_COUNT: usize = 10;

/// Harness configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Base URL of the service under test
    pub base_url: String,

    /// API token; `None` or empty runs unauthenticated
    pub api_token: Option<String>,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Benchmark iterations
    pub benchmark_count: usize,

    /// Report format (table, json, json-pretty, csv)
    pub format: String,

    /// Colorize table output
    pub color: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            benchmark_count: DEFAULT_BENCHMARK_COUNT,
            format: "table".to_string(),
            color: true,
        }
    }
}

impl HarnessConfig {
    /// Load configuration from file (YAML by extension, JSON otherwise)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        Ok(config)
    }

    /// Overlay values set in the environment
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(url) = &env.base_url {
            self.base_url = url.clone();
        }
        if let Some(token) = &env.api_token {
            self.api_token = Some(token.clone());
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(count) = env.benchmark_count {
            self.benchmark_count = count;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
        if let Some(color) = env.color {
            self.color = color;
        }
    }

    /// Token, with empty treated as absent
    pub fn token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.format)
            .with_context(|| format!("Unknown output format: {}", self.format))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            bail!("Base URL must start with http:// or https://: {}", self.base_url);
        }
        if self.timeout_secs == 0 {
            bail!("Timeout must be greater than zero");
        }
        if self.benchmark_count == 0 {
            bail!("Benchmark count must be greater than zero");
        }
        self.output_format()?;
        Ok(())
    }

    /// Copy safe to print or serialize
    pub fn redacted(&self) -> Self {
        Self {
            api_token: self.token().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://localhost:8989");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.benchmark_count, 10);
        assert_eq!(config.token(), None);
        assert_ok!(config.validate());
    }

    #[test]
    fn test_load_yaml_with_partial_fields() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "base_url: http://10.0.0.5:8989\napi_token: secret").unwrap();

        let config = assert_ok!(HarnessConfig::load(file.path()));
        assert_eq!(config.base_url, "http://10.0.0.5:8989");
        assert_eq!(config.token(), Some("secret"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_load_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"benchmark_count": 3, "format": "json"}}"#).unwrap();

        let config = assert_ok!(HarnessConfig::load(file.path()));
        assert_eq!(config.benchmark_count, 3);
        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_load_missing_file() {
        assert_err!(HarnessConfig::load("/nonexistent/harness.yaml"));
    }

    #[test]
    fn test_apply_env() {
        let mut config = HarnessConfig::default();
        let env = EnvConfig {
            base_url: Some("https://mt.example.com".to_string()),
            timeout: Some(5),
            ..Default::default()
        };
        config.apply_env(&env);
        assert_eq!(config.base_url, "https://mt.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.benchmark_count, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_url = HarnessConfig {
            base_url: "localhost:8989".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        let zero_count = HarnessConfig {
            benchmark_count: 0,
            ..Default::default()
        };
        assert!(zero_count.validate().is_err());

        let bad_format = HarnessConfig {
            format: "xml".to_string(),
            ..Default::default()
        };
        assert!(bad_format.validate().is_err());
    }

    #[test]
    fn test_empty_token_is_absent() {
        let config = HarnessConfig {
            api_token: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.token(), None);
        assert_eq!(config.redacted().api_token, None);
    }

    #[test]
    fn test_redacted_hides_token() {
        let config = HarnessConfig {
            api_token: Some("secret".to_string()),
            ..Default::default()
        };
        assert_eq!(config.redacted().api_token.as_deref(), Some("***"));
    }
}
