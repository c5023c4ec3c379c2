//! Venue HTTP Client - JSON-over-POST transport
//!
//! Wraps reqwest for the two venue endpoints (`/info`, `/exchange`).
//! Both take a JSON body and answer with JSON. No retries: a failed
//! call is reported as-is.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Configuration for the venue HTTP client.
#[derive(Debug, Clone)]
pub struct VenueClientConfig {
  /// Base URL for the venue API, no trailing slash.
  pub base_url: String,
  /// Request timeout.
  pub timeout: Duration,
}

impl Default for VenueClientConfig {
  fn default() -> Self {
    Self {
      base_url: crate::config::MAINNET_API_URL.to_string(),
      timeout: Duration::from_secs(30),
    }
  }
}

/// HTTP client for the venue REST API.
pub struct VenueClient {
  /// Underlying HTTP client.
  http: Client,
  /// Client configuration.
  config: VenueClientConfig,
}

impl VenueClient {
  /// Create a new venue client. No connection is opened here.
  pub fn new(config: VenueClientConfig) -> Result<Self> {
    let http = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self { http, config })
  }

  /// Base URL this client talks to.
  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  /// POST `body` as JSON to `path` and decode the JSON response.
  #[instrument(skip(self, body), fields(base = %self.config.base_url))]
  pub async fn post<B: Serialize + ?Sized + Sync>(&self, path: &str, body: &B) -> Result<Value> {
    let url = format!("{}{}", self.config.base_url, path);

    let response = self
      .http
      .post(&url)
      .json(body)
      .send()
      .await
      .with_context(|| format!("POST {path} failed"))?;

    let status = response.status();
    let text = response
      .text()
      .await
      .with_context(|| format!("Failed to read {path} response body"))?;

    match status {
      StatusCode::OK => {
        debug!(path, bytes = text.len(), "Venue responded");
        serde_json::from_str(&text)
          .with_context(|| format!("Venue returned non-JSON body for {path}: {text}"))
      }
      status if status.is_server_error() => {
        warn!(status = %status, path, "Venue server error");
        Err(anyhow::anyhow!("Server error {status}: {text}"))
      }
      status => Err(anyhow::anyhow!("API error {status}: {text}")),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config_targets_mainnet() {
    let config = VenueClientConfig::default();
    assert_eq!(config.base_url, crate::config::MAINNET_API_URL);
    assert_eq!(config.timeout, Duration::from_secs(30));
  }

  #[tokio::test]
  async fn test_unreachable_host_reports_path() {
    let client = VenueClient::new(VenueClientConfig {
      base_url: "http://127.0.0.1:9".to_string(),
      timeout: Duration::from_millis(500),
    })
    .unwrap();

    let err = client
      .post("/info", &serde_json::json!({"type": "meta"}))
      .await
      .unwrap_err();
    assert!(err.to_string().contains("POST /info failed"));
  }
}
