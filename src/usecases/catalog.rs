//! Command Catalog - Static table of supported operations
//!
//! Six commands, each with a declared argument schema and a translator.
//! The two read-only commands select one of their data types from a
//! second static table; each data type names the fields it needs on top
//! of the command schema.
//!
//! Both tables are immutable and looked up by enum or by name; nothing
//! here is mutated at runtime.

use std::fmt;
use std::str::FromStr;

use crate::domain::request::VenueRequest;
use crate::error::BridgeError;

use super::schema::{Coercion, FieldSpec};
use super::translator;

/// Field names shared by the schemas and the CLI layer.
pub mod field {
  pub const DATA_TYPE: &str = "data-type";
  pub const COIN: &str = "coin";
  pub const INTERVAL: &str = "interval";
  pub const START_TIME: &str = "start-time";
  pub const END_TIME: &str = "end-time";
  pub const IS_BUY: &str = "is-buy";
  pub const SIZE: &str = "size";
  pub const PRICE: &str = "price";
  pub const ORDER_TYPE: &str = "order-type";
  pub const REDUCE_ONLY: &str = "reduce-only";
  pub const CLOID: &str = "cloid";
  pub const BUILDER: &str = "builder";
  pub const SLIPPAGE: &str = "slippage";
  pub const OID: &str = "oid";
  pub const LEVERAGE: &str = "leverage";
  pub const IS_CROSS: &str = "is-cross";
}

/// Default reduce-only flag for `place-order`.
pub const DEFAULT_REDUCE_ONLY: &str = "false";

/// Default slippage tolerance for `market-order`.
pub const DEFAULT_SLIPPAGE: &str = "0.05";

/// Default margin mode for `update-leverage`.
pub const DEFAULT_IS_CROSS: &str = "true";

// ────────────────────────────────────────────
// Commands
// ────────────────────────────────────────────

/// Top-level commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
  MarketData,
  UserData,
  PlaceOrder,
  MarketOrder,
  CancelOrder,
  UpdateLeverage,
}

impl CommandKind {
  pub const ALL: [Self; 6] = [
    Self::MarketData,
    Self::UserData,
    Self::PlaceOrder,
    Self::MarketOrder,
    Self::CancelOrder,
    Self::UpdateLeverage,
  ];

  /// CLI spelling.
  pub fn name(self) -> &'static str {
    descriptor(self).name
  }

  /// Whether the command signs an action.
  pub fn is_trading(self) -> bool {
    !matches!(self, Self::MarketData | Self::UserData)
  }

  /// Whether `--account-address` means anything here. Market data has no
  /// subject, so the flag is ignored there, unvalidated.
  pub fn uses_account_address(self) -> bool {
    !matches!(self, Self::MarketData)
  }
}

impl fmt::Display for CommandKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for CommandKind {
  type Err = BridgeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    COMMANDS
      .iter()
      .find(|d| d.name == s)
      .map(|d| d.kind)
      .ok_or(BridgeError::UnknownCommand)
  }
}

/// Translator signature: resolved arguments plus the subject address.
pub type Translate =
  fn(&super::schema::ResolvedArgs, &str) -> Result<VenueRequest, BridgeError>;

/// One catalog entry.
pub struct CommandDescriptor {
  pub kind: CommandKind,
  pub name: &'static str,
  pub fields: &'static [FieldSpec],
  pub translate: Translate,
}

impl fmt::Debug for CommandDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CommandDescriptor")
      .field("kind", &self.kind)
      .field("name", &self.name)
      .field("fields", &self.fields)
      .finish_non_exhaustive()
  }
}

const MARKET_DATA_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::DATA_TYPE, Coercion::Text),
  FieldSpec::optional(field::COIN, Coercion::Text),
  FieldSpec::optional(field::INTERVAL, Coercion::Text),
  FieldSpec::optional(field::START_TIME, Coercion::Integer),
  FieldSpec::optional(field::END_TIME, Coercion::Integer),
];

const USER_DATA_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::DATA_TYPE, Coercion::Text),
  FieldSpec::optional(field::START_TIME, Coercion::Integer),
  FieldSpec::optional(field::END_TIME, Coercion::Integer),
];

const PLACE_ORDER_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::COIN, Coercion::Text),
  FieldSpec::required(field::IS_BUY, Coercion::Flag),
  FieldSpec::required(field::SIZE, Coercion::Decimal),
  FieldSpec::required(field::PRICE, Coercion::Decimal),
  FieldSpec::required(field::ORDER_TYPE, Coercion::Json),
  FieldSpec::defaulted(field::REDUCE_ONLY, DEFAULT_REDUCE_ONLY, Coercion::Flag),
  FieldSpec::optional(field::CLOID, Coercion::ClientOrderId),
  FieldSpec::optional(field::BUILDER, Coercion::Json),
];

const MARKET_ORDER_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::COIN, Coercion::Text),
  FieldSpec::required(field::IS_BUY, Coercion::Flag),
  FieldSpec::required(field::SIZE, Coercion::Decimal),
  FieldSpec::optional(field::PRICE, Coercion::Decimal),
  FieldSpec::defaulted(field::SLIPPAGE, DEFAULT_SLIPPAGE, Coercion::Decimal),
  FieldSpec::optional(field::CLOID, Coercion::ClientOrderId),
  FieldSpec::optional(field::BUILDER, Coercion::Json),
];

// `oid` stays text: it is only parsed when the cloid path is not taken.
const CANCEL_ORDER_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::COIN, Coercion::Text),
  FieldSpec::optional(field::OID, Coercion::Text),
  FieldSpec::optional(field::CLOID, Coercion::ClientOrderId),
];

const UPDATE_LEVERAGE_FIELDS: &[FieldSpec] = &[
  FieldSpec::required(field::COIN, Coercion::Text),
  FieldSpec::required(field::LEVERAGE, Coercion::Integer),
  FieldSpec::defaulted(field::IS_CROSS, DEFAULT_IS_CROSS, Coercion::Flag),
];

/// Indexed by `CommandKind as usize`.
static COMMANDS: [CommandDescriptor; 6] = [
  CommandDescriptor {
    kind: CommandKind::MarketData,
    name: "market-data",
    fields: MARKET_DATA_FIELDS,
    translate: translator::market_data,
  },
  CommandDescriptor {
    kind: CommandKind::UserData,
    name: "user-data",
    fields: USER_DATA_FIELDS,
    translate: translator::user_data,
  },
  CommandDescriptor {
    kind: CommandKind::PlaceOrder,
    name: "place-order",
    fields: PLACE_ORDER_FIELDS,
    translate: translator::place_order,
  },
  CommandDescriptor {
    kind: CommandKind::MarketOrder,
    name: "market-order",
    fields: MARKET_ORDER_FIELDS,
    translate: translator::market_order,
  },
  CommandDescriptor {
    kind: CommandKind::CancelOrder,
    name: "cancel-order",
    fields: CANCEL_ORDER_FIELDS,
    translate: translator::cancel_order,
  },
  CommandDescriptor {
    kind: CommandKind::UpdateLeverage,
    name: "update-leverage",
    fields: UPDATE_LEVERAGE_FIELDS,
    translate: translator::update_leverage,
  },
];

/// Catalog entry for `kind`.
pub fn descriptor(kind: CommandKind) -> &'static CommandDescriptor {
  &COMMANDS[kind as usize]
}

/// Every catalog entry, in declaration order.
pub fn commands() -> &'static [CommandDescriptor] {
  &COMMANDS
}

// ────────────────────────────────────────────
// Data types
// ────────────────────────────────────────────

/// Read operations selectable with `--data-type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
  AllMids,
  L2Snapshot,
  Meta,
  MetaAndAssetCtxs,
  SpotMeta,
  SpotMetaAndAssetCtxs,
  Candles,
  FundingHistory,
  UserState,
  SpotUserState,
  OpenOrders,
  FrontendOpenOrders,
  UserFills,
  UserFillsByTime,
  UserFundingHistory,
  UserFees,
  UserStakingSummary,
  UserStakingDelegations,
  UserStakingRewards,
  QuerySubAccounts,
}

/// One data-type entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataTypeDescriptor {
  pub data_type: DataType,
  pub name: &'static str,
  /// Fields that must be present for this data type.
  pub requires: &'static [&'static str],
}

const fn entry(
  data_type: DataType,
  name: &'static str,
  requires: &'static [&'static str],
) -> DataTypeDescriptor {
  DataTypeDescriptor {
    data_type,
    name,
    requires,
  }
}

/// Data types served by `market-data`.
pub static MARKET_DATA_TYPES: [DataTypeDescriptor; 8] = [
  entry(DataType::AllMids, "all_mids", &[]),
  entry(DataType::L2Snapshot, "l2_snapshot", &[field::COIN]),
  entry(DataType::Meta, "meta", &[]),
  entry(DataType::MetaAndAssetCtxs, "meta_and_asset_ctxs", &[]),
  entry(DataType::SpotMeta, "spot_meta", &[]),
  entry(DataType::SpotMetaAndAssetCtxs, "spot_meta_and_asset_ctxs", &[]),
  entry(
    DataType::Candles,
    "candles",
    &[field::COIN, field::INTERVAL, field::START_TIME, field::END_TIME],
  ),
  entry(
    DataType::FundingHistory,
    "funding_history",
    &[field::COIN, field::START_TIME],
  ),
];

/// Data types served by `user-data`.
pub static USER_DATA_TYPES: [DataTypeDescriptor; 12] = [
  entry(DataType::UserState, "user_state", &[]),
  entry(DataType::SpotUserState, "spot_user_state", &[]),
  entry(DataType::OpenOrders, "open_orders", &[]),
  entry(DataType::FrontendOpenOrders, "frontend_open_orders", &[]),
  entry(DataType::UserFills, "user_fills", &[]),
  entry(DataType::UserFillsByTime, "user_fills_by_time", &[field::START_TIME]),
  entry(
    DataType::UserFundingHistory,
    "user_funding_history",
    &[field::START_TIME],
  ),
  entry(DataType::UserFees, "user_fees", &[]),
  entry(DataType::UserStakingSummary, "user_staking_summary", &[]),
  entry(DataType::UserStakingDelegations, "user_staking_delegations", &[]),
  entry(DataType::UserStakingRewards, "user_staking_rewards", &[]),
  entry(DataType::QuerySubAccounts, "query_sub_accounts", &[]),
];

/// Find `name` in `table`.
///
/// # Errors
/// `UnknownSelector` echoing `name` when it is not in the table.
pub fn lookup_data_type<'a>(
  table: &'a [DataTypeDescriptor],
  name: &str,
) -> Result<&'a DataTypeDescriptor, BridgeError> {
  table
    .iter()
    .find(|d| d.name == name)
    .ok_or_else(|| BridgeError::UnknownSelector(name.to_string()))
}
