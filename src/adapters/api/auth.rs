//! Venue Authentication - L1 Action Signing
//!
//! Every trading action is signed with the caller's private key:
//!
//! 1. `connectionId = keccak256(msgpack(action) ‖ nonce_be ‖ vault_tag)`
//! 2. An EIP-712 `Agent{source, connectionId}` is signed under the
//!    `Exchange` domain (chain 1337, zero verifying contract).
//!
//! `source` is `"a"` on mainnet and `"b"` on testnet, so a testnet
//! signature never validates on mainnet.

use std::str::FromStr;

use alloy::primitives::{Address, B256, keccak256};
use alloy::signers::SignerSync;
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use alloy::sol_types::{SolStruct, eip712_domain};
use anyhow::{Context, Result};
use serde::Serialize;

use super::types::WireSignature;
use crate::error::BridgeError;

sol! {
    #[derive(Debug)]
    struct Agent {
        string source;
        bytes32 connectionId;
    }
}

/// Decode a hex private key (optional `0x`) into a signer.
///
/// The error never contains key material.
pub fn signer_from_key(key: &str) -> Result<PrivateKeySigner, BridgeError> {
  let bytes = B256::from_str(key.trim())
    .map_err(|_| BridgeError::Credential("expected 32 bytes of hex".to_string()))?;
  PrivateKeySigner::from_bytes(&bytes)
    .map_err(|_| BridgeError::Credential("not a valid secp256k1 scalar".to_string()))
}

/// Hash an action the way the venue does before signing.
pub fn action_hash<A: Serialize>(action: &A, vault: Option<Address>, nonce: u64) -> Result<B256> {
  let mut data = rmp_serde::to_vec_named(action).context("Failed to msgpack action")?;
  data.extend_from_slice(&nonce.to_be_bytes());
  match vault {
    None => data.push(0x00),
    Some(vault) => {
      data.push(0x01);
      data.extend_from_slice(vault.as_slice());
    }
  }
  Ok(keccak256(&data))
}

/// Sign `action` with the phantom-agent scheme.
pub fn sign_l1_action<A: Serialize>(
  signer: &PrivateKeySigner,
  action: &A,
  vault: Option<Address>,
  nonce: u64,
  is_mainnet: bool,
) -> Result<WireSignature> {
  let agent = Agent {
    source: if is_mainnet { "a" } else { "b" }.to_string(),
    connectionId: action_hash(action, vault, nonce)?,
  };

  let domain = eip712_domain! {
    name: "Exchange",
    version: "1",
    chain_id: 1337,
    verifying_contract: Address::ZERO,
  };

  let digest = agent.eip712_signing_hash(&domain);
  let signature = signer
    .sign_hash_sync(&digest)
    .context("Failed to sign action")?;

  // Byte 64 is already 27 + y-parity.
  let v = signature.as_bytes()[64];

  Ok(WireSignature {
    r: format!("{:#x}", signature.r()),
    s: format!("{:#x}", signature.s()),
    v,
  })
}

/// Action nonce: current Unix time in milliseconds.
pub fn next_nonce() -> u64 {
  u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default()
}
