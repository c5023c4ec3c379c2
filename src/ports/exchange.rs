//! Exchange Port - Signed Trading Operations
//!
//! Defines the trait for the venue's signing trading client. Every
//! method performs one signed action and returns the venue's raw JSON
//! response, whether the venue accepted the action or not.
//!
//! Key design decisions:
//! - No local validation of trading semantics (size, tick, margin)
//! - No retries; the first failure is the answer

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::order::Cloid;
use crate::domain::request::{MarketOrder, PlaceOrder};

/// Trait for signing trading clients.
#[async_trait]
pub trait ExchangeClient: Send + Sync + 'static {
  /// Place a limit or trigger order.
  async fn order(&self, order: &PlaceOrder) -> anyhow::Result<Value>;

  /// Place an IOC order, deriving a protective price when none is given.
  async fn market_open(&self, order: &MarketOrder) -> anyhow::Result<Value>;

  /// Cancel by venue order id.
  ///
  /// `oid` is optional so that a missing id is reported by the client
  /// itself rather than by the caller.
  async fn cancel(&self, coin: &str, oid: Option<u64>) -> anyhow::Result<Value>;

  /// Cancel by client order id.
  async fn cancel_by_cloid(&self, coin: &str, cloid: &Cloid) -> anyhow::Result<Value>;

  /// Change leverage and margin mode for a coin.
  async fn update_leverage(
    &self,
    leverage: u32,
    coin: &str,
    is_cross: bool,
  ) -> anyhow::Result<Value>;
}
