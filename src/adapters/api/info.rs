//! Info Adapter - Read-only venue queries
//!
//! Implements the `InfoClient` port by posting the serialized
//! `InfoRequest` to `/info` and returning the body untouched.
//!
//! Spot coins given as `BASE/QUOTE` (e.g. `HYPE/USDC`) are rewritten to
//! the venue's pair name (`@107`) before the query is sent. The asset
//! directory behind that lookup is fetched at most once per client and
//! shared with the trading client.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use super::assets::AssetDirectory;
use super::client::VenueClient;
use crate::domain::request::InfoRequest;
use crate::ports::info::InfoClient;

/// `/info` endpoint client.
pub struct HttpInfoClient {
  client: Arc<VenueClient>,
  /// Loaded on first use.
  assets: OnceCell<AssetDirectory>,
}

impl HttpInfoClient {
  pub fn new(client: Arc<VenueClient>) -> Self {
    Self {
      client,
      assets: OnceCell::new(),
    }
  }

  /// Venue metadata as a name → asset lookup.
  pub async fn assets(&self) -> Result<&AssetDirectory> {
    self
      .assets
      .get_or_try_init(|| AssetDirectory::fetch(self))
      .await
  }
}

/// `request` rewritten to the venue's coin name, or `None` when it goes
/// out as is.
///
/// Only `BASE/QUOTE` spellings are looked up. A spelling the directory
/// does not know is left for the venue to answer.
pub fn resolve_coin(request: &InfoRequest, assets: &AssetDirectory) -> Option<InfoRequest> {
  let coin = request.coin().filter(|coin| coin.contains('/'))?;
  let name = assets.canonical_name(coin).ok()?;
  (name != coin).then(|| request.with_coin(name))
}

#[async_trait]
impl InfoClient for HttpInfoClient {
  #[instrument(skip(self))]
  async fn query(&self, request: &InfoRequest) -> Result<Value> {
    let resolved = match request.coin() {
      Some(coin) if coin.contains('/') => resolve_coin(request, self.assets().await?),
      _ => None,
    };
    match resolved {
      Some(resolved) => {
        debug!(coin = ?resolved.coin(), "Resolved spot alias");
        self.client.post("/info", &resolved).await
      }
      None => self.client.post("/info", request).await,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::adapters::api::types::{PerpMeta, SpotMeta};
  use crate::domain::request::CandleRequest;

  fn directory() -> AssetDirectory {
    let perp: PerpMeta = serde_json::from_value(json!({
      "universe": [{"name": "ETH", "szDecimals": 4, "maxLeverage": 50}]
    }))
    .unwrap();
    let spot: SpotMeta = serde_json::from_value(json!({
      "universe": [
        {"name": "PURR/USDC", "tokens": [1, 0], "index": 0},
        {"name": "@107", "tokens": [2, 0], "index": 107}
      ],
      "tokens": [
        {"name": "USDC", "szDecimals": 8},
        {"name": "PURR", "szDecimals": 0},
        {"name": "HYPE", "szDecimals": 2}
      ]
    }))
    .unwrap();
    AssetDirectory::from_meta(&perp, &spot).unwrap()
  }

  #[test]
  fn test_spot_alias_resolves_for_book_and_candles() {
    let dir = directory();

    let book = resolve_coin(&InfoRequest::L2Book { coin: "HYPE/USDC".into() }, &dir).unwrap();
    assert_eq!(book, InfoRequest::L2Book { coin: "@107".into() });

    let candles = InfoRequest::CandleSnapshot {
      req: CandleRequest {
        coin: "HYPE/USDC".into(),
        interval: "1h".into(),
        start_time: 1,
        end_time: 2,
      },
    };
    let resolved = resolve_coin(&candles, &dir).unwrap();
    assert_eq!(resolved.coin(), Some("@107"));
  }

  #[test]
  fn test_perp_and_canonical_names_are_untouched() {
    let dir = directory();
    assert_eq!(resolve_coin(&InfoRequest::L2Book { coin: "ETH".into() }, &dir), None);
    assert_eq!(
      resolve_coin(&InfoRequest::L2Book { coin: "PURR/USDC".into() }, &dir),
      None
    );
    assert_eq!(
      resolve_coin(&InfoRequest::L2Book { coin: "NOPE/USDC".into() }, &dir),
      None
    );
    assert_eq!(resolve_coin(&InfoRequest::AllMids, &dir), None);
  }
}
