//! Order sub-documents accepted on the command line.
//!
//! `--order-type` and `--builder` arrive as JSON strings and are decoded
//! into these types; `--cloid` is validated into a `Cloid`. They mirror the
//! venue's JSON shapes so a decoded value re-serializes to the same document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────
// Order type
// ────────────────────────────────────────────

/// Time-in-force for resting limit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tif {
    /// Add-liquidity-only (post only).
    Alo,
    /// Immediate-or-cancel.
    Ioc,
    /// Good-til-cancelled.
    Gtc,
}

impl Tif {
    /// Venue spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alo => "Alo",
            Self::Ioc => "Ioc",
            Self::Gtc => "Gtc",
        }
    }
}

/// Take-profit or stop-loss flavour of a trigger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tpsl {
    Tp,
    Sl,
}

impl Tpsl {
    /// Venue spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tp => "tp",
            Self::Sl => "sl",
        }
    }
}

/// `{"tif": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitOrderType {
    pub tif: Tif,
}

/// `{"triggerPx": ..., "isMarket": ..., "tpsl": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TriggerOrderType {
    pub trigger_px: f64,
    pub is_market: bool,
    pub tpsl: Tpsl,
}

/// Limit or trigger semantics of an order, e.g. `{"limit":{"tif":"Gtc"}}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit(LimitOrderType),
    Trigger(TriggerOrderType),
}

impl OrderType {
    /// Limit order with the given time-in-force.
    pub const fn limit(tif: Tif) -> Self {
        Self::Limit(LimitOrderType { tif })
    }
}

// ────────────────────────────────────────────
// Builder fee
// ────────────────────────────────────────────

/// Third-party builder fee attached to an order.
///
/// `f` is in tenths of a basis point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderInfo {
    /// Builder address.
    pub b: String,
    /// Fee.
    pub f: u64,
}

// ────────────────────────────────────────────
// Client order id
// ────────────────────────────────────────────

/// Caller-assigned 16-byte order id, written as `0x` + 32 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cloid(String);

impl Cloid {
    /// Raw `0x…` form sent to the venue.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Cloid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(digits) = s.strip_prefix("0x") else {
            return Err(format!("cloid must start with 0x, got {s}"));
        };
        if digits.len() != 32 {
            return Err(format!(
                "cloid must have 32 hex digits after 0x, got {}",
                digits.len()
            ));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("cloid is not hex: {s}"));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Cloid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_order_type_roundtrips_document() {
        let doc = r#"{"limit":{"tif":"Gtc"}}"#;
        let order_type: OrderType = serde_json::from_str(doc).unwrap();
        assert_eq!(order_type, OrderType::limit(Tif::Gtc));
        assert_eq!(serde_json::to_string(&order_type).unwrap(), doc);
    }

    #[test]
    fn test_trigger_order_type() {
        let doc = r#"{"trigger":{"triggerPx":48000.5,"isMarket":true,"tpsl":"sl"}}"#;
        let order_type: OrderType = serde_json::from_str(doc).unwrap();
        match order_type {
            OrderType::Trigger(t) => {
                assert!((t.trigger_px - 48000.5).abs() < f64::EPSILON);
                assert!(t.is_market);
                assert_eq!(t.tpsl, Tpsl::Sl);
            }
            OrderType::Limit(_) => panic!("expected trigger"),
        }
    }

    #[test]
    fn test_unknown_tif_rejected() {
        assert!(serde_json::from_str::<OrderType>(r#"{"limit":{"tif":"Fok"}}"#).is_err());
    }

    #[test]
    fn test_builder_info() {
        let builder: BuilderInfo =
            serde_json::from_str(r#"{"b":"0xABCDEF0000000000000000000000000000000001","f":10}"#)
                .unwrap();
        assert_eq!(builder.f, 10);
    }

    #[test]
    fn test_cloid_validation() {
        assert!("0x00000000000000000000000000000001".parse::<Cloid>().is_ok());
        assert!("00000000000000000000000000000001".parse::<Cloid>().is_err());
        assert!("0x1234".parse::<Cloid>().is_err());
        assert!("0xzz000000000000000000000000000001".parse::<Cloid>().is_err());
    }
}
