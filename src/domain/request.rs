//! Translated Requests - Venue-ready call arguments
//!
//! The translator turns raw CLI strings into exactly one `VenueRequest`.
//! These values are fully typed, built once per invocation and never
//! mutated afterwards; the port traits consume them by reference.
//!
//! `InfoRequest` doubles as the JSON body of the venue's `/info`
//! endpoint: its serde representation is the wire format.

use serde::Serialize;

use super::order::{BuilderInfo, Cloid, OrderType};

// ────────────────────────────────────────────
// Read side
// ────────────────────────────────────────────

/// Candle query window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleRequest {
    pub coin: String,
    pub interval: String,
    pub start_time: u64,
    pub end_time: u64,
}

/// One read-only query against the venue's info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InfoRequest {
    AllMids,
    L2Book {
        coin: String,
    },
    Meta,
    MetaAndAssetCtxs,
    SpotMeta,
    SpotMetaAndAssetCtxs,
    CandleSnapshot {
        req: CandleRequest,
    },
    FundingHistory {
        coin: String,
        start_time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<u64>,
    },
    ClearinghouseState {
        user: String,
    },
    SpotClearinghouseState {
        user: String,
    },
    OpenOrders {
        user: String,
    },
    FrontendOpenOrders {
        user: String,
    },
    UserFills {
        user: String,
    },
    UserFillsByTime {
        user: String,
        start_time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<u64>,
        aggregate_by_time: bool,
    },
    UserFunding {
        user: String,
        start_time: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_time: Option<u64>,
    },
    UserFees {
        user: String,
    },
    DelegatorSummary {
        user: String,
    },
    Delegations {
        user: String,
    },
    DelegatorRewards {
        user: String,
    },
    SubAccounts {
        user: String,
    },
}

impl InfoRequest {
    /// Coin named by a market query, if any.
    pub fn coin(&self) -> Option<&str> {
        match self {
            Self::L2Book { coin } | Self::FundingHistory { coin, .. } => Some(coin.as_str()),
            Self::CandleSnapshot { req } => Some(req.coin.as_str()),
            _ => None,
        }
    }

    /// Same request addressed to `coin` instead.
    pub fn with_coin(&self, coin: &str) -> Self {
        let mut request = self.clone();
        match &mut request {
            Self::L2Book { coin: c } | Self::FundingHistory { coin: c, .. } => *c = coin.to_string(),
            Self::CandleSnapshot { req } => req.coin = coin.to_string(),
            _ => {}
        }
        request
    }
}

// ────────────────────────────────────────────
// Trading side
// ────────────────────────────────────────────

/// Limit or trigger order with explicit price.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrder {
    pub coin: String,
    pub is_buy: bool,
    pub size: f64,
    pub price: f64,
    pub order_type: OrderType,
    pub reduce_only: bool,
    pub cloid: Option<Cloid>,
    pub builder: Option<BuilderInfo>,
}

/// Aggressive IOC order.
///
/// `price` is the protection bound; when absent the trading client derives
/// one from the mid price and `slippage`.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOrder {
    pub coin: String,
    pub is_buy: bool,
    pub size: f64,
    pub price: Option<f64>,
    pub slippage: f64,
    pub cloid: Option<Cloid>,
    pub builder: Option<BuilderInfo>,
}

/// Cancellation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOrder {
    /// By caller-assigned id; takes precedence whenever a cloid is given.
    ByCloid { coin: String, cloid: Cloid },
    /// By venue order id. `None` is passed through for the venue client to reject.
    ByOid { coin: String, oid: Option<u64> },
}

/// Leverage change for one coin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLeverage {
    pub coin: String,
    pub leverage: u32,
    pub is_cross: bool,
}

/// The single venue call an invocation makes.
#[derive(Debug, Clone, PartialEq)]
pub enum VenueRequest {
    Info(InfoRequest),
    PlaceOrder(PlaceOrder),
    MarketOrder(MarketOrder),
    Cancel(CancelOrder),
    UpdateLeverage(UpdateLeverage),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unit_request_serialization() {
        assert_eq!(
            serde_json::to_value(InfoRequest::AllMids).unwrap(),
            json!({"type": "allMids"})
        );
        assert_eq!(
            serde_json::to_value(InfoRequest::L2Book { coin: "ETH".into() }).unwrap(),
            json!({"type": "l2Book", "coin": "ETH"})
        );
    }

    #[test]
    fn test_candle_request_serialization() {
        let req = InfoRequest::CandleSnapshot {
            req: CandleRequest {
                coin: "BTC".into(),
                interval: "1h".into(),
                start_time: 1,
                end_time: 2,
            },
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({
                "type": "candleSnapshot",
                "req": {"coin": "BTC", "interval": "1h", "startTime": 1, "endTime": 2}
            })
        );
    }

    #[test]
    fn test_optional_end_time_is_omitted() {
        let req = InfoRequest::UserFunding {
            user: "0xabc".into(),
            start_time: 10,
            end_time: None,
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"type": "userFunding", "user": "0xabc", "startTime": 10})
        );
    }

    #[test]
    fn test_fills_by_time_carries_aggregation_flag() {
        let req = InfoRequest::UserFillsByTime {
            user: "0xabc".into(),
            start_time: 10,
            end_time: Some(20),
            aggregate_by_time: false,
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({
                "type": "userFillsByTime",
                "user": "0xabc",
                "startTime": 10,
                "endTime": 20,
                "aggregateByTime": false
            })
        );
    }

    #[test]
    fn test_with_coin_replaces_market_coin_only() {
        let funding = InfoRequest::FundingHistory {
            coin: "HYPE/USDC".into(),
            start_time: 5,
            end_time: None,
        };
        assert_eq!(funding.coin(), Some("HYPE/USDC"));
        assert_eq!(
            serde_json::to_value(funding.with_coin("@107")).unwrap(),
            json!({"type": "fundingHistory", "coin": "@107", "startTime": 5})
        );

        let user = InfoRequest::OpenOrders { user: "0xabc".into() };
        assert_eq!(user.coin(), None);
        assert_eq!(user.with_coin("@107"), user);
    }
}
