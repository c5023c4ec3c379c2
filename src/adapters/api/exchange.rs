//! Exchange Adapter - Signed trading actions
//!
//! Implements the `ExchangeClient` port. Each call resolves the coin to an
//! asset id, builds the wire action, signs it with the phantom-agent
//! scheme and posts it to `/exchange`. The venue's JSON answer is returned
//! unchanged, including `{"status":"err",...}` rejections.
//!
//! Asset metadata is fetched lazily through the info client, at most once
//! per client. Action construction is pure and kept apart from signing.

use std::sync::Arc;

use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::assets::AssetInfo;
use super::auth::{next_nonce, sign_l1_action};
use super::client::VenueClient;
use super::info::HttpInfoClient;
use super::number::{float_to_wire, slippage_price};
use super::types::{
  BuilderWire, CancelAction, CancelByCloidAction, CancelByCloidWire, CancelWire, ExchangePayload,
  LimitWire, OrderAction, OrderTypeWire, OrderWire, TriggerWire, UpdateLeverageAction,
};
use crate::domain::order::{BuilderInfo, Cloid, OrderType, Tif};
use crate::domain::request::{InfoRequest, MarketOrder, PlaceOrder};
use crate::ports::exchange::ExchangeClient;
use crate::ports::info::InfoClient;

/// Signing trading client for one key.
///
/// Actions are always signed by the key itself. An `--account-address`
/// override only changes the subject of user-data queries and never
/// reaches this client.
pub struct HttpExchangeClient {
  /// Shared transport.
  client: Arc<VenueClient>,
  /// Metadata and mid-price lookups.
  info: HttpInfoClient,
  /// Signs every action.
  signer: PrivateKeySigner,
  /// Selects the phantom-agent source.
  is_mainnet: bool,
}

impl HttpExchangeClient {
  pub fn new(client: Arc<VenueClient>, signer: PrivateKeySigner, is_mainnet: bool) -> Self {
    Self {
      info: HttpInfoClient::new(Arc::clone(&client)),
      client,
      signer,
      is_mainnet,
    }
  }

  async fn asset(&self, coin: &str) -> Result<AssetInfo> {
    self.info.assets().await?.get(coin)
  }

  /// Sign `action` and post it.
  async fn post_action<A: Serialize + Sync>(&self, action: &A) -> Result<Value> {
    let nonce = next_nonce();
    let signature = sign_l1_action(&self.signer, action, None, nonce, self.is_mainnet)?;

    let payload = ExchangePayload {
      action,
      nonce,
      signature,
      vault_address: None,
      expires_after: None,
    };

    let response = self.client.post("/exchange", &payload).await?;
    debug!(nonce, status = ?response.get("status"), "Action submitted");
    Ok(response)
  }

  /// Mid price for `coin` from `allMids`.
  async fn mid_price(&self, coin: &str) -> Result<f64> {
    let name = self.info.assets().await?.canonical_name(coin)?;
    let mids = self
      .info
      .query(&InfoRequest::AllMids)
      .await
      .context("Failed to fetch mid prices")?;

    let mid = mids
      .get(name)
      .and_then(Value::as_str)
      .ok_or_else(|| anyhow!("No mid price for {coin}"))?;
    mid
      .parse()
      .with_context(|| format!("Unparseable mid price for {coin}: {mid}"))
  }
}

// ────────────────────────────────────────────
// Action construction
// ────────────────────────────────────────────

/// Domain order type to wire, with `triggerPx` as a wire number.
fn order_type_to_wire(order_type: &OrderType) -> Result<OrderTypeWire> {
  Ok(match order_type {
    OrderType::Limit(limit) => OrderTypeWire {
      limit: Some(LimitWire {
        tif: limit.tif.as_str().to_string(),
      }),
      trigger: None,
    },
    OrderType::Trigger(trigger) => OrderTypeWire {
      limit: None,
      trigger: Some(TriggerWire {
        is_market: trigger.is_market,
        trigger_px: float_to_wire(trigger.trigger_px).context("invalid triggerPx")?,
        tpsl: trigger.tpsl.as_str().to_string(),
      }),
    },
  })
}

fn order_wire(
  asset: u32,
  is_buy: bool,
  size: f64,
  price: f64,
  order_type: &OrderType,
  reduce_only: bool,
  cloid: Option<&Cloid>,
) -> Result<OrderWire> {
  Ok(OrderWire {
    a: asset,
    b: is_buy,
    p: float_to_wire(price).context("invalid price")?,
    s: float_to_wire(size).context("invalid size")?,
    r: reduce_only,
    t: order_type_to_wire(order_type)?,
    c: cloid.map(|c| c.as_str().to_string()),
  })
}

/// Single-order `order` action; the builder address goes out lowercase.
fn order_action(order: OrderWire, builder: Option<&BuilderInfo>) -> OrderAction {
  OrderAction {
    kind: "order",
    orders: vec![order],
    grouping: "na",
    builder: builder.map(|b| BuilderWire {
      b: b.b.to_lowercase(),
      f: b.f,
    }),
  }
}

fn place_order_action(asset: u32, order: &PlaceOrder) -> Result<OrderAction> {
  let wire = order_wire(
    asset,
    order.is_buy,
    order.size,
    order.price,
    &order.order_type,
    order.reduce_only,
    order.cloid.as_ref(),
  )?;
  Ok(order_action(wire, order.builder.as_ref()))
}

/// Market orders are IOC limits at `price` and never reduce-only.
fn market_order_action(asset: u32, order: &MarketOrder, price: f64) -> Result<OrderAction> {
  let wire = order_wire(
    asset,
    order.is_buy,
    order.size,
    price,
    &OrderType::limit(Tif::Ioc),
    false,
    order.cloid.as_ref(),
  )?;
  Ok(order_action(wire, order.builder.as_ref()))
}

fn cancel_action(asset: u32, oid: u64) -> CancelAction {
  CancelAction {
    kind: "cancel",
    cancels: vec![CancelWire { a: asset, o: oid }],
  }
}

fn cancel_by_cloid_action(asset: u32, cloid: &Cloid) -> CancelByCloidAction {
  CancelByCloidAction {
    kind: "cancelByCloid",
    cancels: vec![CancelByCloidWire {
      asset,
      cloid: cloid.as_str().to_string(),
    }],
  }
}

fn update_leverage_action(asset: u32, leverage: u32, is_cross: bool) -> UpdateLeverageAction {
  UpdateLeverageAction {
    kind: "updateLeverage",
    asset,
    is_cross,
    leverage,
  }
}

#[async_trait]
impl ExchangeClient for HttpExchangeClient {
  #[instrument(skip(self, order), fields(coin = %order.coin, is_buy = order.is_buy))]
  async fn order(&self, order: &PlaceOrder) -> Result<Value> {
    let asset = self.asset(&order.coin).await?;
    self.post_action(&place_order_action(asset.asset, order)?).await
  }

  #[instrument(skip(self, order), fields(coin = %order.coin, is_buy = order.is_buy))]
  async fn market_open(&self, order: &MarketOrder) -> Result<Value> {
    let asset = self.asset(&order.coin).await?;

    let price = match order.price {
      Some(price) => price,
      None => {
        let mid = self.mid_price(&order.coin).await?;
        let px = slippage_price(
          mid,
          order.is_buy,
          order.slippage,
          asset.sz_decimals,
          asset.is_spot(),
        )?;
        info!(mid, px, slippage = order.slippage, "Derived market order price");
        px
      }
    };

    self
      .post_action(&market_order_action(asset.asset, order, price)?)
      .await
  }

  #[instrument(skip(self))]
  async fn cancel(&self, coin: &str, oid: Option<u64>) -> Result<Value> {
    let Some(oid) = oid else {
      bail!("cancel-order needs --oid or --cloid");
    };
    let asset = self.asset(coin).await?;
    self.post_action(&cancel_action(asset.asset, oid)).await
  }

  #[instrument(skip(self))]
  async fn cancel_by_cloid(&self, coin: &str, cloid: &Cloid) -> Result<Value> {
    let asset = self.asset(coin).await?;
    self
      .post_action(&cancel_by_cloid_action(asset.asset, cloid))
      .await
  }

  #[instrument(skip(self))]
  async fn update_leverage(&self, leverage: u32, coin: &str, is_cross: bool) -> Result<Value> {
    let asset = self.asset(coin).await?;
    self
      .post_action(&update_leverage_action(asset.asset, leverage, is_cross))
      .await
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::adapters::api::auth::signer_from_key;
  use crate::adapters::api::client::VenueClientConfig;
  use crate::domain::order::{Tpsl, TriggerOrderType};

  #[test]
  fn test_limit_order_type_to_wire() {
    let wire = order_type_to_wire(&OrderType::limit(Tif::Alo)).unwrap();
    assert_eq!(serde_json::to_value(&wire).unwrap(), json!({"limit": {"tif": "Alo"}}));
  }

  #[test]
  fn test_trigger_order_type_to_wire() {
    let wire = order_type_to_wire(&OrderType::Trigger(TriggerOrderType {
      trigger_px: 49_500.0,
      is_market: true,
      tpsl: Tpsl::Sl,
    }))
    .unwrap();
    assert_eq!(
      serde_json::to_string(&wire).unwrap(),
      r#"{"trigger":{"isMarket":true,"triggerPx":"49500","tpsl":"sl"}}"#
    );
  }

  #[test]
  fn test_trigger_px_with_excess_precision_rejected() {
    let result = order_type_to_wire(&OrderType::Trigger(TriggerOrderType {
      trigger_px: 0.123_456_789,
      is_market: false,
      tpsl: Tpsl::Tp,
    }));
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn test_cancel_without_oid_fails_before_network() {
    let client = Arc::new(
      VenueClient::new(VenueClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: std::time::Duration::from_millis(200),
      })
      .unwrap(),
    );
    let signer = signer_from_key(
      "0x0123456789012345678901234567890123456789012345678901234567890123",
    )
    .unwrap();
    let exchange = HttpExchangeClient::new(client, signer, false);

    let err = exchange.cancel("BTC", None).await.unwrap_err();
    assert_eq!(err.to_string(), "cancel-order needs --oid or --cloid");
  }

  // ── Action JSON ─────────────────────────────────────────

  const CLOID: &str = "0x00000000000000000000000000000001";

  fn place_order() -> PlaceOrder {
    PlaceOrder {
      coin: "ETH".into(),
      is_buy: true,
      size: 0.2,
      price: 1800.0,
      order_type: OrderType::limit(Tif::Gtc),
      reduce_only: false,
      cloid: Some(CLOID.parse().unwrap()),
      builder: Some(BuilderInfo {
        b: "0xABCDEF0000000000000000000000000000000001".into(),
        f: 10,
      }),
    }
  }

  #[test]
  fn test_place_order_action_json() {
    let action = place_order_action(4, &place_order()).unwrap();
    assert_eq!(
      serde_json::to_value(&action).unwrap(),
      json!({
        "type": "order",
        "orders": [{
          "a": 4,
          "b": true,
          "p": "1800",
          "s": "0.2",
          "r": false,
          "t": {"limit": {"tif": "Gtc"}},
          "c": CLOID
        }],
        "grouping": "na",
        "builder": {"b": "0xabcdef0000000000000000000000000000000001", "f": 10}
      })
    );
  }

  #[test]
  fn test_order_without_cloid_or_builder_omits_keys() {
    let order = PlaceOrder {
      cloid: None,
      builder: None,
      ..place_order()
    };
    let value = serde_json::to_value(place_order_action(0, &order).unwrap()).unwrap();
    assert!(value.get("builder").is_none());
    assert!(value["orders"][0].get("c").is_none());
  }

  #[test]
  fn test_market_order_action_is_ioc_and_not_reduce_only() {
    let order = MarketOrder {
      coin: "HYPE/USDC".into(),
      is_buy: false,
      size: 3.0,
      price: None,
      slippage: 0.05,
      cloid: Some(CLOID.parse().unwrap()),
      builder: None,
    };
    let value = serde_json::to_value(market_order_action(10_107, &order, 21.5).unwrap()).unwrap();
    let wire = &value["orders"][0];
    assert_eq!(wire["a"], 10_107);
    assert_eq!(wire["b"], false);
    assert_eq!(wire["p"], "21.5");
    assert_eq!(wire["r"], false);
    assert_eq!(wire["t"], json!({"limit": {"tif": "Ioc"}}));
    assert_eq!(wire["c"], CLOID);
  }

  #[test]
  fn test_cancel_actions_json() {
    assert_eq!(
      serde_json::to_value(cancel_action(1, 77)).unwrap(),
      json!({"type": "cancel", "cancels": [{"a": 1, "o": 77}]})
    );
    assert_eq!(
      serde_json::to_value(cancel_by_cloid_action(1, &CLOID.parse().unwrap())).unwrap(),
      json!({"type": "cancelByCloid", "cancels": [{"asset": 1, "cloid": CLOID}]})
    );
  }

  #[test]
  fn test_update_leverage_action_json() {
    assert_eq!(
      serde_json::to_value(update_leverage_action(0, 10, true)).unwrap(),
      json!({"type": "updateLeverage", "asset": 0, "isCross": true, "leverage": 10})
    );
  }
}
