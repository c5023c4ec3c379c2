//! HTTP Client Factory
//!
//! Builds the info and exchange clients for one invocation. The key is
//! decoded first so a bad key fails before any HTTP client exists.
//!
//! The handle's address is the override when one is given, else the key's
//! own address. It is only the subject of user-data queries; trading
//! actions are signed by the key either way.

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::Address;
use tracing::debug;

use super::auth::signer_from_key;
use super::client::{VenueClient, VenueClientConfig};
use super::exchange::HttpExchangeClient;
use super::info::HttpInfoClient;
use crate::config::ApiConfig;
use crate::domain::credentials::Credentials;
use crate::error::BridgeError;
use crate::ports::factory::{ClientFactory, ClientHandle};

/// Factory for the real venue clients.
#[derive(Debug, Clone, Default)]
pub struct HttpClientFactory {
  api: ApiConfig,
}

impl HttpClientFactory {
  pub fn new(api: ApiConfig) -> Self {
    Self { api }
  }
}

impl ClientFactory for HttpClientFactory {
  fn build(&self, credentials: &Credentials) -> Result<ClientHandle, BridgeError> {
    let signer = signer_from_key(credentials.secret_key.expose())?;

    let address = match credentials.account_address.as_deref() {
      Some(raw) => Address::from_str(raw.trim())
        .map_err(|e| BridgeError::Config(format!("invalid --account-address {raw}: {e}")))?,
      None => signer.address(),
    };
    let address = format!("{address:#x}");

    let client = VenueClient::new(VenueClientConfig {
      base_url: self.api.base_url(credentials.network).to_string(),
      timeout: self.api.timeout(),
    })
    .map_err(|e| BridgeError::Config(format!("{e:#}")))?;
    let client = Arc::new(client);

    debug!(
      network = %credentials.network,
      base = client.base_url(),
      address = %address,
      "Venue clients ready"
    );

    Ok(ClientHandle {
      info: Box::new(HttpInfoClient::new(Arc::clone(&client))),
      exchange: Box::new(HttpExchangeClient::new(
        client,
        signer,
        credentials.network.is_mainnet(),
      )),
      address,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Network;
  use crate::domain::credentials::SecretKey;

  const KEY: &str = "0x0123456789012345678901234567890123456789012345678901234567890123";

  fn credentials(key: &str, account: Option<&str>) -> Credentials {
    Credentials {
      secret_key: SecretKey::new(key),
      network: Network::Testnet,
      account_address: account.map(str::to_string),
    }
  }

  #[test]
  fn test_address_defaults_to_key_address() {
    let handle = HttpClientFactory::default().build(&credentials(KEY, None)).unwrap();
    let expected = format!("{:#x}", signer_from_key(KEY).unwrap().address());
    assert_eq!(handle.address, expected);
  }

  #[test]
  fn test_override_address_is_lowercased() {
    let handle = HttpClientFactory::default()
      .build(&credentials(KEY, Some("0xABCDEFabcdef0123456789012345678901234567")))
      .unwrap();
    assert_eq!(handle.address, "0xabcdefabcdef0123456789012345678901234567");
  }

  #[test]
  fn test_bad_key_is_credential_error() {
    let result = HttpClientFactory::default().build(&credentials("0x1234", None));
    assert!(matches!(result, Err(BridgeError::Credential(_))));
  }

  #[test]
  fn test_bad_override_address_is_config_error() {
    let result = HttpClientFactory::default().build(&credentials(KEY, Some("nope")));
    assert!(matches!(result, Err(BridgeError::Config(_))));
  }
}
