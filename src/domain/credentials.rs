//! Per-invocation credentials.

use std::fmt;

use crate::config::Network;

/// Private key material as supplied on the command line.
///
/// `Debug` is redacted so the key never reaches a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw key text. Only the client factory should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Everything needed to build the venue clients for one invocation.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Signing key.
    pub secret_key: SecretKey,
    /// Venue network.
    pub network: Network,
    /// Account to act for, when it differs from the key's own address.
    pub account_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials {
            secret_key: SecretKey::new("0xdeadbeef"),
            network: Network::Testnet,
            account_address: None,
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("redacted"));
    }
}
