//! Client Factory Port - Credential to Client Handle
//!
//! Turns per-invocation credentials into the pair of venue clients plus
//! the address they act for. Implementations must reject a bad key with
//! `BridgeError::Credential` before constructing any network client.

use crate::domain::credentials::Credentials;
use crate::error::BridgeError;

use super::exchange::ExchangeClient;
use super::info::InfoClient;

/// The clients one invocation works with.
pub struct ClientHandle {
  /// Subject account, lowercase `0x…` hex.
  pub address: String,
  /// Read-only client.
  pub info: Box<dyn InfoClient>,
  /// Signing client.
  pub exchange: Box<dyn ExchangeClient>,
}

/// Builds a `ClientHandle` from credentials.
pub trait ClientFactory {
  /// # Errors
  /// `Credential` for an undecodable key, `Config` for a malformed
  /// override address.
  fn build(&self, credentials: &Credentials) -> Result<ClientHandle, BridgeError>;
}
