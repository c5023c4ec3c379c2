//! Bridge Error Taxonomy
//!
//! Every failure an invocation can hit is one of these variants. The
//! dispatcher renders any of them into the `{"error": ...}` envelope via
//! `Display`, so the message text is the caller-facing contract.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum BridgeError {
  /// Invalid network selector, configuration file, or malformed invocation.
  #[error("{0}")]
  Config(String),

  /// Private key could not be decoded into a signer.
  #[error("invalid private key: {0}")]
  Credential(String),

  /// A structured or numeric argument could not be parsed.
  #[error("failed to parse --{field}: {reason}")]
  Parse {
    /// CLI flag name without the leading dashes.
    field: &'static str,
    /// What went wrong.
    reason: String,
  },

  /// Recognized command, unrecognized data type.
  #[error("Unknown data type: {0}")]
  UnknownSelector(String),

  /// No command, or one outside the catalog.
  #[error("Unknown command")]
  UnknownCommand,

  /// Anything raised by the venue clients (HTTP, signing, rejection).
  #[error("{0:#}")]
  Venue(anyhow::Error),
}

impl BridgeError {
  /// Shorthand for a parse failure on `field`.
  pub fn parse(field: &'static str, reason: impl std::fmt::Display) -> Self {
    Self::Parse {
      field,
      reason: reason.to_string(),
    }
  }

  /// Short machine-friendly kind, used as a log field.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Config(_) => "config",
      Self::Credential(_) => "credential",
      Self::Parse { .. } => "parse",
      Self::UnknownSelector(_) => "unknown_selector",
      Self::UnknownCommand => "unknown_command",
      Self::Venue(_) => "venue",
    }
  }
}

#[cfg(test)]
mod tests {
  use anyhow::Context;

  use super::*;

  #[test]
  fn test_unknown_selector_echoes_value() {
    let err = BridgeError::UnknownSelector("bogus".to_string());
    assert_eq!(err.to_string(), "Unknown data type: bogus");
  }

  #[test]
  fn test_parse_error_names_field() {
    let err = BridgeError::parse("order-type", "expected value at line 1 column 1");
    assert!(err.to_string().contains("--order-type"));
    assert_eq!(err.kind(), "parse");
  }

  #[test]
  fn test_venue_error_shows_context_chain() {
    let inner: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"));
    let err = BridgeError::Venue(inner.context("POST /exchange failed").unwrap_err());
    assert_eq!(err.to_string(), "POST /exchange failed: connection refused");
  }
}
