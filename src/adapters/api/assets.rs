//! Asset Directory - Coin name to venue asset id
//!
//! Trading actions address assets by integer id. Perps use their index in
//! `meta.universe`; spot pairs use `10000 + index` and answer to both the
//! pair name (`PURR/USDC`, `@107`) and `BASE/QUOTE`.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use super::types::{PerpMeta, SpotMeta};
use crate::domain::request::InfoRequest;
use crate::ports::info::InfoClient;

/// Offset added to spot pair indices.
pub const SPOT_ASSET_OFFSET: u32 = 10_000;

/// What the trading client needs to know about one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetInfo {
  pub asset: u32,
  pub sz_decimals: u32,
}

impl AssetInfo {
  pub fn is_spot(self) -> bool {
    self.asset >= SPOT_ASSET_OFFSET
  }
}

#[derive(Debug, Clone)]
struct Entry {
  /// Name the venue uses for this asset in `allMids`.
  coin: String,
  info: AssetInfo,
}

/// Name → asset lookup built from venue metadata.
#[derive(Debug, Clone, Default)]
pub struct AssetDirectory {
  assets: HashMap<String, Entry>,
}

impl AssetDirectory {
  /// Build from already-fetched metadata.
  pub fn from_meta(perp: &PerpMeta, spot: &SpotMeta) -> Result<Self> {
    let mut assets = HashMap::new();

    for (index, meta) in perp.universe.iter().enumerate() {
      let asset = u32::try_from(index).context("perp universe too large")?;
      assets.insert(
        meta.name.clone(),
        Entry {
          coin: meta.name.clone(),
          info: AssetInfo {
            asset,
            sz_decimals: meta.sz_decimals,
          },
        },
      );
    }

    for pair in &spot.universe {
      let [base, quote] = pair.tokens;
      let base = spot
        .tokens
        .get(base)
        .ok_or_else(|| anyhow!("spot pair {} references unknown token {base}", pair.name))?;
      let quote = spot
        .tokens
        .get(quote)
        .ok_or_else(|| anyhow!("spot pair {} references unknown token {quote}", pair.name))?;

      let entry = Entry {
        coin: pair.name.clone(),
        info: AssetInfo {
          asset: SPOT_ASSET_OFFSET + pair.index,
          sz_decimals: base.sz_decimals,
        },
      };
      assets
        .entry(format!("{}/{}", base.name, quote.name))
        .or_insert_with(|| entry.clone());
      assets.insert(pair.name.clone(), entry);
    }

    Ok(Self { assets })
  }

  /// Fetch `meta` and `spotMeta` and build the directory.
  pub async fn fetch(info: &dyn InfoClient) -> Result<Self> {
    let perp: PerpMeta = serde_json::from_value(
      info
        .query(&InfoRequest::Meta)
        .await
        .context("Failed to fetch perp metadata")?,
    )
    .context("Unexpected perp metadata shape")?;

    let spot: SpotMeta = serde_json::from_value(
      info
        .query(&InfoRequest::SpotMeta)
        .await
        .context("Failed to fetch spot metadata")?,
    )
    .context("Unexpected spot metadata shape")?;

    let directory = Self::from_meta(&perp, &spot)?;
    debug!(
      perps = perp.universe.len(),
      spots = spot.universe.len(),
      "Asset directory loaded"
    );
    Ok(directory)
  }

  fn entry(&self, coin: &str) -> Result<&Entry> {
    self
      .assets
      .get(coin)
      .ok_or_else(|| anyhow!("Unknown coin: {coin}"))
  }

  /// Look up `coin`.
  pub fn get(&self, coin: &str) -> Result<AssetInfo> {
    self.entry(coin).map(|e| e.info)
  }

  /// The venue's own name for `coin`, e.g. `@107` for `HYPE/USDC`.
  pub fn canonical_name(&self, coin: &str) -> Result<&str> {
    self.entry(coin).map(|e| e.coin.as_str())
  }
}
