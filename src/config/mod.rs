//! Configuration Module - TOML-based Bridge Configuration
//!
//! Loads and validates the optional configuration file that pins venue
//! endpoints, the HTTP timeout and the default log level. Every field
//! has a serde default so the bridge runs with no file at all.

pub mod loader;

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;

/// Hyperliquid mainnet API root.
pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";

/// Hyperliquid testnet API root.
pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

/// Venue network selector.
///
/// Parsed only through clap's `ValueEnum`, so an unknown value is a
/// malformed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Network {
  /// Production venue.
  #[default]
  Mainnet,
  /// Test venue.
  Testnet,
}

impl Network {
  /// Whether signatures should carry the mainnet agent source.
  pub fn is_mainnet(self) -> bool {
    matches!(self, Self::Mainnet)
  }

  /// The CLI spelling of this network.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Mainnet => "mainnet",
      Self::Testnet => "testnet",
    }
  }
}

impl fmt::Display for Network {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
  /// Venue endpoints and HTTP behaviour.
  #[serde(default)]
  pub api: ApiConfig,
  /// Logging defaults.
  #[serde(default)]
  pub log: LogConfig,
}

/// API endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Mainnet REST root.
  #[serde(default = "default_mainnet_url")]
  pub mainnet_url: String,
  /// Testnet REST root.
  #[serde(default = "default_testnet_url")]
  pub testnet_url: String,
  /// Request timeout in seconds.
  #[serde(default = "default_timeout")]
  pub timeout_seconds: u64,
}

impl ApiConfig {
  /// Base URL for the selected network, without a trailing slash.
  pub fn base_url(&self, network: Network) -> &str {
    let url = match network {
      Network::Mainnet => &self.mainnet_url,
      Network::Testnet => &self.testnet_url,
    };
    url.trim_end_matches('/')
  }

  /// Request timeout as a `Duration`.
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_seconds)
  }
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      mainnet_url: default_mainnet_url(),
      testnet_url: default_testnet_url(),
      timeout_seconds: default_timeout(),
    }
  }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub level: String,
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

// Default value functions for serde

fn default_mainnet_url() -> String {
  MAINNET_API_URL.to_string()
}

fn default_testnet_url() -> String {
  TESTNET_API_URL.to_string()
}

fn default_timeout() -> u64 {
  30
}

fn default_log_level() -> String {
  "warn".to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_network_spelling() {
    assert_eq!(Network::default(), Network::Mainnet);
    assert_eq!(Network::Testnet.to_string(), "testnet");
    assert!(Network::Mainnet.is_mainnet());
    assert!(!Network::Testnet.is_mainnet());
  }

  #[test]
  fn test_base_url_selects_network() {
    let api = ApiConfig::default();
    assert_eq!(api.base_url(Network::Mainnet), MAINNET_API_URL);
    assert_eq!(api.base_url(Network::Testnet), TESTNET_API_URL);
  }

  #[test]
  fn test_base_url_strips_trailing_slash() {
    let api = ApiConfig {
      mainnet_url: "http://localhost:3001/".to_string(),
      ..ApiConfig::default()
    };
    assert_eq!(api.base_url(Network::Mainnet), "http://localhost:3001");
  }
}
