//! Configuration Loader - File Loading and Validation
//!
//! Handles loading the optional bridge TOML file, validating all
//! parameters, and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::BridgeConfig;

/// Load and validate configuration.
///
/// `None` yields the built-in defaults without touching the filesystem.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
  let Some(path) = path else {
    return Ok(BridgeConfig::default());
  };

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  debug!(
    path = %path.display(),
    timeout_s = config.api.timeout_seconds,
    "Configuration loaded"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<BridgeConfig> {
  let config: BridgeConfig =
    toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &BridgeConfig) -> Result<()> {
  for (name, url) in [
    ("mainnet_url", &config.api.mainnet_url),
    ("testnet_url", &config.api.testnet_url),
  ] {
    anyhow::ensure!(!url.is_empty(), "api.{name} must not be empty");
    anyhow::ensure!(
      url.starts_with("http://") || url.starts_with("https://"),
      "api.{name} must be an http(s) URL, got {url}"
    );
  }

  anyhow::ensure!(
    config.api.timeout_seconds > 0,
    "api.timeout_seconds must be positive"
  );

  anyhow::ensure!(
    matches!(
      config.log.level.as_str(),
      "trace" | "debug" | "info" | "warn" | "error" | "off"
    ),
    "log.level must be one of trace, debug, info, warn, error, off; got {}",
    config.log.level
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::{MAINNET_API_URL, TESTNET_API_URL};

  #[test]
  fn test_load_without_path_uses_defaults() {
    let config = load_config(None).unwrap();
    assert_eq!(config.api.mainnet_url, MAINNET_API_URL);
    assert_eq!(config.api.testnet_url, TESTNET_API_URL);
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.log.level, "warn");
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config(Some(Path::new("nonexistent.toml")));
    assert!(result.is_err());
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let config = parse_config("[api]\ntimeout_seconds = 5\n").unwrap();
    assert_eq!(config.api.timeout_seconds, 5);
    assert_eq!(config.api.mainnet_url, MAINNET_API_URL);
    assert_eq!(config.log.level, "warn");
  }

  #[test]
  fn test_rejects_zero_timeout() {
    let err = parse_config("[api]\ntimeout_seconds = 0\n").unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
  }

  #[test]
  fn test_rejects_non_http_url() {
    let result = parse_config("[api]\ntestnet_url = \"ftp://example\"\n");
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_unknown_log_level() {
    assert!(parse_config("[log]\nlevel = \"loud\"\n").is_err());
  }
}
