//! # CLI Argument Definitions
//!
//! Six subcommands, one per catalog entry. Every subcommand carries the
//! credential flags; the remaining flags are taken as raw strings and
//! handed to the translator, which owns coercion and validation.
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase log verbosity on stderr
//! - `-c, --config <PATH>` - Optional TOML configuration file

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};

use crate::config::Network;
use crate::domain::credentials::{Credentials, SecretKey};
use crate::error::BridgeError;
use crate::usecases::catalog::{
  CommandKind, DEFAULT_IS_CROSS, DEFAULT_REDUCE_ONLY, DEFAULT_SLIPPAGE, field,
};
use crate::usecases::{Envelope, Invocation, RawArgs};

/// Single-shot command-line bridge to the Hyperliquid API.
///
/// Prints exactly one JSON object per invocation: the venue's answer or
/// `{"error": "..."}`.
#[derive(Debug, Parser)]
#[command(name = "hyperliquid-bridge")]
#[command(author, version, about)]
pub struct Cli {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,

  /// Path to config file
  #[arg(short, long, global = true, value_name = "PATH", env = "HL_BRIDGE_CONFIG")]
  pub config: Option<PathBuf>,

  /// The command to execute
  #[command(subcommand)]
  pub command: Option<Command>,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
  /// Hex private key used to sign (never echoed)
  #[arg(long, value_name = "HEX")]
  pub secret_key: String,

  /// Venue network
  #[arg(long, value_enum, default_value_t = Network::Mainnet)]
  pub network: Network,

  /// Account to act for when it differs from the key's address
  #[arg(long, value_name = "ADDRESS")]
  pub account_address: Option<String>,
}

impl CommonArgs {
  fn credentials(&self) -> Credentials {
    Credentials {
      secret_key: SecretKey::new(self.secret_key.clone()),
      network: self.network,
      account_address: self.account_address.clone(),
    }
  }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Query public market data
  MarketData(MarketDataArgs),
  /// Query account data for the signing or override address
  UserData(UserDataArgs),
  /// Place a limit or trigger order
  PlaceOrder(PlaceOrderArgs),
  /// Place an aggressive IOC order
  MarketOrder(MarketOrderArgs),
  /// Cancel by order id or client order id
  CancelOrder(CancelOrderArgs),
  /// Change leverage and margin mode
  UpdateLeverage(UpdateLeverageArgs),
}

#[derive(Debug, Args)]
pub struct MarketDataArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  /// all_mids, l2_book, candles, meta, ...
  #[arg(long)]
  pub data_type: String,
  #[arg(long)]
  pub coin: Option<String>,
  /// Candle interval, e.g. 1m, 1h, 1d
  #[arg(long)]
  pub interval: Option<String>,
  /// Milliseconds since the epoch
  #[arg(long)]
  pub start_time: Option<String>,
  /// Milliseconds since the epoch
  #[arg(long)]
  pub end_time: Option<String>,
}

#[derive(Debug, Args)]
pub struct UserDataArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  /// user_state, open_orders, user_fills, ...
  #[arg(long)]
  pub data_type: String,
  #[arg(long)]
  pub start_time: Option<String>,
  #[arg(long)]
  pub end_time: Option<String>,
}

#[derive(Debug, Args)]
pub struct PlaceOrderArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  #[arg(long)]
  pub coin: String,
  /// true or false
  #[arg(long)]
  pub is_buy: String,
  #[arg(long)]
  pub size: String,
  #[arg(long)]
  pub price: String,
  /// JSON, e.g. '{"limit":{"tif":"Gtc"}}'
  #[arg(long)]
  pub order_type: String,
  #[arg(long, default_value = DEFAULT_REDUCE_ONLY)]
  pub reduce_only: String,
  /// 0x followed by 32 hex digits
  #[arg(long)]
  pub cloid: Option<String>,
  /// JSON, e.g. '{"b":"0x...","f":10}'
  #[arg(long)]
  pub builder: Option<String>,
}

#[derive(Debug, Args)]
pub struct MarketOrderArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  #[arg(long)]
  pub coin: String,
  #[arg(long)]
  pub is_buy: String,
  #[arg(long)]
  pub size: String,
  /// Protection price; derived from the mid when omitted
  #[arg(long)]
  pub price: Option<String>,
  /// Fractional tolerance applied to the mid price
  #[arg(long, default_value = DEFAULT_SLIPPAGE)]
  pub slippage: String,
  #[arg(long)]
  pub cloid: Option<String>,
  #[arg(long)]
  pub builder: Option<String>,
}

#[derive(Debug, Args)]
pub struct CancelOrderArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  #[arg(long)]
  pub coin: String,
  #[arg(long)]
  pub oid: Option<String>,
  /// Takes precedence over --oid
  #[arg(long)]
  pub cloid: Option<String>,
}

#[derive(Debug, Args)]
pub struct UpdateLeverageArgs {
  #[command(flatten)]
  pub common: CommonArgs,
  #[arg(long)]
  pub coin: String,
  #[arg(long)]
  pub leverage: String,
  #[arg(long, default_value = DEFAULT_IS_CROSS)]
  pub is_cross: String,
}

impl Command {
  /// Split into the catalog command, credentials and raw arguments.
  pub fn into_invocation(self) -> Invocation {
    let (command, common, args) = match self {
      Self::MarketData(a) => (
        CommandKind::MarketData,
        a.common,
        RawArgs::new()
          .with(field::DATA_TYPE, Some(a.data_type))
          .with(field::COIN, a.coin)
          .with(field::INTERVAL, a.interval)
          .with(field::START_TIME, a.start_time)
          .with(field::END_TIME, a.end_time),
      ),
      Self::UserData(a) => (
        CommandKind::UserData,
        a.common,
        RawArgs::new()
          .with(field::DATA_TYPE, Some(a.data_type))
          .with(field::START_TIME, a.start_time)
          .with(field::END_TIME, a.end_time),
      ),
      Self::PlaceOrder(a) => (
        CommandKind::PlaceOrder,
        a.common,
        RawArgs::new()
          .with(field::COIN, Some(a.coin))
          .with(field::IS_BUY, Some(a.is_buy))
          .with(field::SIZE, Some(a.size))
          .with(field::PRICE, Some(a.price))
          .with(field::ORDER_TYPE, Some(a.order_type))
          .with(field::REDUCE_ONLY, Some(a.reduce_only))
          .with(field::CLOID, a.cloid)
          .with(field::BUILDER, a.builder),
      ),
      Self::MarketOrder(a) => (
        CommandKind::MarketOrder,
        a.common,
        RawArgs::new()
          .with(field::COIN, Some(a.coin))
          .with(field::IS_BUY, Some(a.is_buy))
          .with(field::SIZE, Some(a.size))
          .with(field::PRICE, a.price)
          .with(field::SLIPPAGE, Some(a.slippage))
          .with(field::CLOID, a.cloid)
          .with(field::BUILDER, a.builder),
      ),
      Self::CancelOrder(a) => (
        CommandKind::CancelOrder,
        a.common,
        RawArgs::new()
          .with(field::COIN, Some(a.coin))
          .with(field::OID, a.oid)
          .with(field::CLOID, a.cloid),
      ),
      Self::UpdateLeverage(a) => (
        CommandKind::UpdateLeverage,
        a.common,
        RawArgs::new()
          .with(field::COIN, Some(a.coin))
          .with(field::LEVERAGE, Some(a.leverage))
          .with(field::IS_CROSS, Some(a.is_cross)),
      ),
    };

    Invocation {
      command,
      credentials: common.credentials(),
      args,
    }
  }
}

/// Envelope for a command line clap rejected.
///
/// An unknown subcommand is `Unknown command`; everything else is a
/// config error carrying clap's own text. Help and version requests are
/// not errors and must be handled by the caller.
pub fn parse_error_envelope(e: &clap::Error) -> Envelope {
  match e.kind() {
    ErrorKind::InvalidSubcommand => Envelope::unknown_command(),
    _ => Envelope::from_error(&BridgeError::Config(clap_message(e))),
  }
}

/// clap's message on one line: everything before the usage block, each
/// line trimmed, without the `error: ` prefix.
fn clap_message(e: &clap::Error) -> String {
  let rendered = e.to_string();
  rendered
    .lines()
    .take_while(|line| !line.starts_with("Usage:") && !line.starts_with("For more information"))
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
    .trim_start_matches("error: ")
    .to_string()
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  const KEY: &str = "0x0123456789012345678901234567890123456789012345678901234567890123";

  fn invocation(args: &[&str]) -> Invocation {
    let mut argv = vec!["hyperliquid-bridge"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
      .unwrap()
      .command
      .unwrap()
      .into_invocation()
  }

  #[test]
  fn test_place_order_example() {
    let inv = invocation(&[
      "place-order",
      "--secret-key",
      KEY,
      "--coin",
      "BTC",
      "--is-buy",
      "true",
      "--size",
      "0.01",
      "--price",
      "50000",
      "--order-type",
      r#"{"limit":{"tif":"Gtc"}}"#,
    ]);
    assert_eq!(inv.command, CommandKind::PlaceOrder);
    assert_eq!(inv.credentials.network, Network::Mainnet);
    assert_eq!(inv.args.get(field::REDUCE_ONLY), Some("false"));
    assert_eq!(inv.args.get(field::CLOID), None);
    assert_eq!(inv.args.get(field::ORDER_TYPE), Some(r#"{"limit":{"tif":"Gtc"}}"#));
  }

  #[test]
  fn test_defaults_are_filled() {
    let inv = invocation(&[
      "market-order",
      "--secret-key",
      KEY,
      "--coin",
      "ETH",
      "--is-buy",
      "false",
      "--size",
      "1",
    ]);
    assert_eq!(inv.args.get(field::SLIPPAGE), Some("0.05"));
    assert_eq!(inv.args.get(field::PRICE), None);

    let inv = invocation(&[
      "update-leverage",
      "--secret-key",
      KEY,
      "--coin",
      "ETH",
      "--leverage",
      "5",
    ]);
    assert_eq!(inv.args.get(field::IS_CROSS), Some("true"));
  }

  #[test]
  fn test_testnet_and_account_address() {
    let inv = invocation(&[
      "user-data",
      "--secret-key",
      KEY,
      "--network",
      "testnet",
      "--account-address",
      "0xabc",
      "--data-type",
      "open_orders",
    ]);
    assert_eq!(inv.credentials.network, Network::Testnet);
    assert_eq!(inv.credentials.account_address.as_deref(), Some("0xabc"));
  }

  #[test]
  fn test_invalid_network_is_rejected() {
    let err = Cli::try_parse_from([
      "hyperliquid-bridge",
      "market-data",
      "--secret-key",
      KEY,
      "--network",
      "devnet",
      "--data-type",
      "all_mids",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
  }

  #[test]
  fn test_unknown_subcommand() {
    let err = Cli::try_parse_from(["hyperliquid-bridge", "withdraw"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
  }

  #[test]
  fn test_no_subcommand_parses() {
    let cli = Cli::try_parse_from(["hyperliquid-bridge"]).unwrap();
    assert!(cli.command.is_none());
  }

  #[test]
  fn test_missing_secret_key() {
    let err = Cli::try_parse_from(["hyperliquid-bridge", "cancel-order", "--coin", "BTC"])
      .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
  }

  #[test]
  fn test_verbose_is_global() {
    let cli = Cli::try_parse_from([
      "hyperliquid-bridge",
      "cancel-order",
      "-vv",
      "--secret-key",
      KEY,
      "--coin",
      "BTC",
      "--oid",
      "7",
    ])
    .unwrap();
    assert_eq!(cli.verbose, 2);
  }

  fn parse_error(args: &[&str]) -> clap::Error {
    let mut argv = vec!["hyperliquid-bridge"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap_err()
  }

  #[test]
  fn test_unknown_subcommand_envelope() {
    let envelope = parse_error_envelope(&parse_error(&["withdraw"]));
    assert_eq!(envelope.to_value(), json!({"error": "Unknown command"}));
  }

  #[test]
  fn test_missing_flag_is_named() {
    let err = parse_error(&[
      "place-order",
      "--secret-key",
      KEY,
      "--is-buy",
      "true",
      "--size",
      "1",
      "--price",
      "1",
      "--order-type",
      "{}",
    ]);
    let line = parse_error_envelope(&err).to_line();
    assert!(line.contains("required arguments were not provided"), "{line}");
    assert!(line.contains("--coin"), "{line}");
    assert!(!line.contains("Usage"), "{line}");
    assert!(!line.contains('\n'));
  }

  #[test]
  fn test_bad_network_is_config_error() {
    let err = parse_error(&[
      "market-data",
      "--secret-key",
      KEY,
      "--network",
      "devnet",
      "--data-type",
      "all_mids",
    ]);
    let envelope = parse_error_envelope(&err);
    let Envelope::Failure(message) = envelope else {
      panic!("bad network must be an error envelope");
    };
    assert!(message.contains("devnet"), "{message}");
    assert!(!message.starts_with("error:"), "{message}");
  }
}
