//! Venue Action Wire Types
//!
//! Serialization types for the `/exchange` endpoint. Field order here is
//! significant: actions are msgpack-hashed for signing, and the venue
//! recomputes the hash from its own canonical ordering.

use serde::{Deserialize, Serialize};

/// `{"limit": {"tif": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LimitWire {
  pub tif: String,
}

/// `{"trigger": {"isMarket": ..., "triggerPx": ..., "tpsl": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerWire {
  pub is_market: bool,
  pub trigger_px: String,
  pub tpsl: String,
}

/// Exactly one of the two members is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTypeWire {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub limit: Option<LimitWire>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub trigger: Option<TriggerWire>,
}

/// A single order inside an `order` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderWire {
  /// Asset id.
  pub a: u32,
  /// Is buy.
  pub b: bool,
  /// Limit price.
  pub p: String,
  /// Size.
  pub s: String,
  /// Reduce only.
  pub r: bool,
  /// Order type.
  pub t: OrderTypeWire,
  /// Client order id.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub c: Option<String>,
}

/// Builder fee as attached to an `order` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuilderWire {
  /// Lowercase builder address.
  pub b: String,
  /// Fee in tenths of a basis point.
  pub f: u64,
}

/// `{"type": "order", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderAction {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub orders: Vec<OrderWire>,
  pub grouping: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub builder: Option<BuilderWire>,
}

/// `{"a": asset, "o": oid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelWire {
  pub a: u32,
  pub o: u64,
}

/// `{"type": "cancel", "cancels": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelAction {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub cancels: Vec<CancelWire>,
}

/// `{"asset": asset, "cloid": "0x…"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelByCloidWire {
  pub asset: u32,
  pub cloid: String,
}

/// `{"type": "cancelByCloid", "cancels": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CancelByCloidAction {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub cancels: Vec<CancelByCloidWire>,
}

/// `{"type": "updateLeverage", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeverageAction {
  #[serde(rename = "type")]
  pub kind: &'static str,
  pub asset: u32,
  pub is_cross: bool,
  pub leverage: u32,
}

/// ECDSA signature in the venue's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireSignature {
  pub r: String,
  pub s: String,
  pub v: u8,
}

/// Body posted to `/exchange`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangePayload<'a, A: Serialize> {
  pub action: &'a A,
  pub nonce: u64,
  pub signature: WireSignature,
  pub vault_address: Option<String>,
  pub expires_after: Option<u64>,
}

// ────────────────────────────────────────────
// Metadata responses
// ────────────────────────────────────────────

/// One perp in `meta.universe`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpAssetMeta {
  pub name: String,
  pub sz_decimals: u32,
}

/// `{"type": "meta"}` response (fields we use).
#[derive(Debug, Clone, Deserialize)]
pub struct PerpMeta {
  pub universe: Vec<PerpAssetMeta>,
}

/// One spot pair in `spotMeta.universe`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotPairMeta {
  pub name: String,
  /// Indices into `spotMeta.tokens`: `[base, quote]`.
  pub tokens: [usize; 2],
  pub index: u32,
}

/// One token in `spotMeta.tokens`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotTokenMeta {
  pub name: String,
  pub sz_decimals: u32,
}

/// `{"type": "spotMeta"}` response (fields we use).
#[derive(Debug, Clone, Deserialize)]
pub struct SpotMeta {
  pub universe: Vec<SpotPairMeta>,
  pub tokens: Vec<SpotTokenMeta>,
}
