//! Request Translator - CLI arguments to venue calls
//!
//! One pure function per command, from `ResolvedArgs` (already defaulted
//! and coerced by the command's schema) plus the subject address to a
//! `VenueRequest`. Nothing here reads the clock or the network, so the
//! same arguments always translate to the same request.

use tracing::debug;

use crate::domain::order::{BuilderInfo, OrderType};
use crate::domain::request::{
  CancelOrder, CandleRequest, InfoRequest, MarketOrder, PlaceOrder, UpdateLeverage,
  VenueRequest,
};
use crate::error::BridgeError;

use super::catalog::{
  self, DataType, DataTypeDescriptor, MARKET_DATA_TYPES, USER_DATA_TYPES, field,
};
use super::schema::{self, RawArgs, ResolvedArgs};

/// Resolve `raw` against the schema of `kind` and translate it.
///
/// # Errors
/// `Config`/`Parse` from schema resolution, `UnknownSelector` for an
/// unknown data type.
pub fn translate(
  kind: catalog::CommandKind,
  raw: &RawArgs,
  address: &str,
) -> Result<VenueRequest, BridgeError> {
  let descriptor = catalog::descriptor(kind);
  let resolved = schema::resolve(descriptor.fields, raw)?;
  let request = (descriptor.translate)(&resolved, address)?;
  debug!(command = descriptor.name, request = ?request, "Translated request");
  Ok(request)
}

// ────────────────────────────────────────────
// Read commands
// ────────────────────────────────────────────

pub fn market_data(args: &ResolvedArgs, address: &str) -> Result<VenueRequest, BridgeError> {
  let entry = catalog::lookup_data_type(&MARKET_DATA_TYPES, args.text(field::DATA_TYPE)?)?;
  info_request(entry, args, address).map(VenueRequest::Info)
}

pub fn user_data(args: &ResolvedArgs, address: &str) -> Result<VenueRequest, BridgeError> {
  let entry = catalog::lookup_data_type(&USER_DATA_TYPES, args.text(field::DATA_TYPE)?)?;
  info_request(entry, args, address).map(VenueRequest::Info)
}

fn info_request(
  entry: &DataTypeDescriptor,
  args: &ResolvedArgs,
  address: &str,
) -> Result<InfoRequest, BridgeError> {
  if let Some(name) = entry.requires.iter().find(|name| !args.contains(name)) {
    return Err(BridgeError::Config(format!(
      "--{name} is required for data type {}",
      entry.name
    )));
  }

  let user = || address.to_string();

  let request = match entry.data_type {
    DataType::AllMids => InfoRequest::AllMids,
    DataType::L2Snapshot => InfoRequest::L2Book {
      coin: args.text(field::COIN)?.to_string(),
    },
    DataType::Meta => InfoRequest::Meta,
    DataType::MetaAndAssetCtxs => InfoRequest::MetaAndAssetCtxs,
    DataType::SpotMeta => InfoRequest::SpotMeta,
    DataType::SpotMetaAndAssetCtxs => InfoRequest::SpotMetaAndAssetCtxs,
    DataType::Candles => InfoRequest::CandleSnapshot {
      req: CandleRequest {
        coin: args.text(field::COIN)?.to_string(),
        interval: args.text(field::INTERVAL)?.to_string(),
        start_time: args.integer(field::START_TIME)?,
        end_time: args.integer(field::END_TIME)?,
      },
    },
    DataType::FundingHistory => InfoRequest::FundingHistory {
      coin: args.text(field::COIN)?.to_string(),
      start_time: args.integer(field::START_TIME)?,
      end_time: args.opt_integer(field::END_TIME)?,
    },
    DataType::UserState => InfoRequest::ClearinghouseState { user: user() },
    DataType::SpotUserState => InfoRequest::SpotClearinghouseState { user: user() },
    DataType::OpenOrders => InfoRequest::OpenOrders { user: user() },
    DataType::FrontendOpenOrders => InfoRequest::FrontendOpenOrders { user: user() },
    DataType::UserFills => InfoRequest::UserFills { user: user() },
    DataType::UserFillsByTime => InfoRequest::UserFillsByTime {
      user: user(),
      start_time: args.integer(field::START_TIME)?,
      end_time: args.opt_integer(field::END_TIME)?,
      aggregate_by_time: false,
    },
    DataType::UserFundingHistory => InfoRequest::UserFunding {
      user: user(),
      start_time: args.integer(field::START_TIME)?,
      end_time: args.opt_integer(field::END_TIME)?,
    },
    DataType::UserFees => InfoRequest::UserFees { user: user() },
    DataType::UserStakingSummary => InfoRequest::DelegatorSummary { user: user() },
    DataType::UserStakingDelegations => InfoRequest::Delegations { user: user() },
    DataType::UserStakingRewards => InfoRequest::DelegatorRewards { user: user() },
    DataType::QuerySubAccounts => InfoRequest::SubAccounts { user: user() },
  };

  Ok(request)
}

// ────────────────────────────────────────────
// Trading commands
// ────────────────────────────────────────────

pub fn place_order(args: &ResolvedArgs, _address: &str) -> Result<VenueRequest, BridgeError> {
  Ok(VenueRequest::PlaceOrder(PlaceOrder {
    coin: args.text(field::COIN)?.to_string(),
    is_buy: args.flag(field::IS_BUY)?,
    size: args.decimal(field::SIZE)?,
    price: args.decimal(field::PRICE)?,
    order_type: args.json::<OrderType>(field::ORDER_TYPE)?,
    reduce_only: args.flag(field::REDUCE_ONLY)?,
    cloid: args.opt_cloid(field::CLOID)?,
    builder: args.opt_json::<BuilderInfo>(field::BUILDER)?,
  }))
}

pub fn market_order(args: &ResolvedArgs, _address: &str) -> Result<VenueRequest, BridgeError> {
  Ok(VenueRequest::MarketOrder(MarketOrder {
    coin: args.text(field::COIN)?.to_string(),
    is_buy: args.flag(field::IS_BUY)?,
    size: args.decimal(field::SIZE)?,
    price: args.opt_decimal(field::PRICE)?,
    slippage: args.decimal(field::SLIPPAGE)?,
    cloid: args.opt_cloid(field::CLOID)?,
    builder: args.opt_json::<BuilderInfo>(field::BUILDER)?,
  }))
}

/// A cloid wins over an oid; the oid is not even parsed then.
pub fn cancel_order(args: &ResolvedArgs, _address: &str) -> Result<VenueRequest, BridgeError> {
  let coin = args.text(field::COIN)?.to_string();

  let cancel = match args.opt_cloid(field::CLOID)? {
    Some(cloid) => CancelOrder::ByCloid { coin, cloid },
    None => {
      let oid = args
        .opt_text(field::OID)?
        .map(|text| schema::parse_integer(field::OID, text))
        .transpose()?;
      CancelOrder::ByOid { coin, oid }
    }
  };

  Ok(VenueRequest::Cancel(cancel))
}

pub fn update_leverage(
  args: &ResolvedArgs,
  _address: &str,
) -> Result<VenueRequest, BridgeError> {
  let leverage = args.integer(field::LEVERAGE)?;
  let leverage = u32::try_from(leverage)
    .map_err(|_| BridgeError::parse(field::LEVERAGE, format!("out of range: {leverage}")))?;

  Ok(VenueRequest::UpdateLeverage(UpdateLeverage {
    coin: args.text(field::COIN)?.to_string(),
    leverage,
    is_cross: args.flag(field::IS_CROSS)?,
  }))
}
