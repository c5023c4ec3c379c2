//! Wire number formatting and market-order price derivation.
//!
//! Prices and sizes travel as normalized decimal strings with at most
//! eight fractional digits. Values that would lose precision are
//! rejected instead of silently rounded.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// Significant figures kept when deriving a slippage price.
const PRICE_SIG_FIGS: u32 = 5;

/// Decimal budget for perp prices (before subtracting size decimals).
const PERP_PRICE_DECIMALS: u32 = 6;

/// Decimal budget for spot prices (before subtracting size decimals).
const SPOT_PRICE_DECIMALS: u32 = 8;

/// Format `x` for the wire, e.g. `50000.0` → `"50000"`, `0.010` → `"0.01"`.
///
/// # Errors
/// If `x` is not finite or has more than eight significant fractional digits.
pub fn float_to_wire(x: f64) -> Result<String> {
  if !x.is_finite() {
    bail!("cannot send non-finite number {x}");
  }

  let rounded = format!("{x:.8}");
  let back: f64 = rounded.parse().context("wire number did not parse back")?;
  if (back - x).abs() >= 1e-12 {
    bail!("float_to_wire causes rounding: {x}");
  }

  let decimal: Decimal = rounded
    .parse()
    .with_context(|| format!("wire number out of range: {rounded}"))?;
  Ok(decimal.normalize().to_string())
}

/// Limit price for a market order that carries no explicit price.
///
/// `mid` moved by `slippage` against the taker, then rounded to five
/// significant figures and to the venue's decimal budget for the asset.
pub fn slippage_price(
  mid: f64,
  is_buy: bool,
  slippage: f64,
  sz_decimals: u32,
  is_spot: bool,
) -> Result<f64> {
  let factor = if is_buy { 1.0 + slippage } else { 1.0 - slippage };
  let px = mid * factor;

  let decimal = Decimal::from_f64(px)
    .with_context(|| format!("slippage price out of range: {px}"))?
    .round_sf(PRICE_SIG_FIGS)
    .with_context(|| format!("cannot round slippage price {px}"))?;

  let budget = if is_spot {
    SPOT_PRICE_DECIMALS
  } else {
    PERP_PRICE_DECIMALS
  };

  decimal
    .round_dp(budget.saturating_sub(sz_decimals))
    .to_f64()
    .with_context(|| format!("slippage price not representable: {decimal}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_float_to_wire_normalizes() {
    assert_eq!(float_to_wire(50000.0).unwrap(), "50000");
    assert_eq!(float_to_wire(0.01).unwrap(), "0.01");
    assert_eq!(float_to_wire(1234.5).unwrap(), "1234.5");
    assert_eq!(float_to_wire(0.00000001).unwrap(), "0.00000001");
  }

  #[test]
  fn test_float_to_wire_negative_zero() {
    assert_eq!(float_to_wire(-0.0).unwrap(), "0");
  }

  #[test]
  fn test_float_to_wire_rejects_excess_precision() {
    assert!(float_to_wire(0.123456789).is_err());
    assert!(float_to_wire(f64::NAN).is_err());
  }

  #[test]
  fn test_slippage_price_buy_and_sell() {
    let buy = slippage_price(2000.0, true, 0.05, 4, false).unwrap();
    assert!((buy - 2100.0).abs() < 1e-9);

    let sell = slippage_price(2000.0, false, 0.05, 4, false).unwrap();
    assert!((sell - 1900.0).abs() < 1e-9);
  }

  #[test]
  fn test_slippage_price_rounds_to_five_sig_figs() {
    // 43210.7 * 1.01 = 43642.807 -> 43643
    let px = slippage_price(43210.7, true, 0.01, 5, false).unwrap();
    assert!((px - 43643.0).abs() < 1e-9);
  }

  #[test]
  fn test_slippage_price_respects_size_decimals() {
    // 0.123456 -> 5 sig figs 0.12346 -> perp budget 6 - 4 = 2 decimals -> 0.12
    let px = slippage_price(0.123456, true, 0.0, 4, false).unwrap();
    assert!((px - 0.12).abs() < 1e-12);

    // spot budget 8 - 2 = 6 decimals keeps all five figures
    let spot = slippage_price(0.123456, true, 0.0, 2, true).unwrap();
    assert!((spot - 0.12346).abs() < 1e-12);
  }
}
