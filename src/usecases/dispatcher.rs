//! Dispatcher - One invocation, one envelope
//!
//! Runs `Idle → Dispatching → Done` for a single invocation: build the
//! clients, translate the arguments, make the one venue call. Any failure
//! along the way short-circuits to `Done` with an error envelope; there
//! is no partial result.

use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::domain::credentials::Credentials;
use crate::domain::request::{CancelOrder, VenueRequest};
use crate::error::BridgeError;
use crate::ports::{ClientFactory, ClientHandle};

use super::catalog::CommandKind;
use super::schema::RawArgs;
use super::translator;

/// A parsed command line.
#[derive(Debug, Clone)]
pub struct Invocation {
  pub command: CommandKind,
  pub credentials: Credentials,
  pub args: RawArgs,
}

/// What gets printed: the venue's raw result or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
  Success(Value),
  Failure(String),
}

impl Envelope {
  /// `{"error": "Unknown command"}`
  pub fn unknown_command() -> Self {
    Self::from_error(&BridgeError::UnknownCommand)
  }

  pub fn from_error(error: &BridgeError) -> Self {
    Self::Failure(error.to_string())
  }

  pub fn is_error(&self) -> bool {
    matches!(self, Self::Failure(_))
  }

  pub fn to_value(&self) -> Value {
    match self {
      Self::Success(value) => value.clone(),
      Self::Failure(message) => json!({ "error": message }),
    }
  }

  /// Compact single-line JSON.
  pub fn to_line(&self) -> String {
    self.to_value().to_string()
  }
}

impl From<Result<Value, BridgeError>> for Envelope {
  fn from(result: Result<Value, BridgeError>) -> Self {
    match result {
      Ok(value) => Self::Success(value),
      Err(e) => Self::from_error(&e),
    }
  }
}

/// Drives invocations through a `ClientFactory`.
pub struct Dispatcher<F> {
  factory: F,
}

impl<F: ClientFactory> Dispatcher<F> {
  pub fn new(factory: F) -> Self {
    Self { factory }
  }

  /// Run one invocation to its envelope. Never fails.
  #[instrument(
    skip_all,
    fields(command = %invocation.command, network = %invocation.credentials.network)
  )]
  pub async fn dispatch(&self, invocation: &Invocation) -> Envelope {
    let result = self.run(invocation).await;
    if let Err(e) = &result {
      warn!(kind = e.kind(), error = %e, "Invocation failed");
    }
    Envelope::from(result)
  }

  async fn run(&self, invocation: &Invocation) -> Result<Value, BridgeError> {
    let mut credentials = invocation.credentials.clone();
    if !invocation.command.uses_account_address() {
      credentials.account_address = None;
    }
    let handle = self.factory.build(&credentials)?;
    debug!(address = %handle.address, "Clients ready");

    let request = translator::translate(invocation.command, &invocation.args, &handle.address)?;
    execute(&handle, &request).await
  }
}

/// Make the single venue call for `request`.
///
/// # Errors
/// `Venue` wrapping whatever the client returned.
pub async fn execute(handle: &ClientHandle, request: &VenueRequest) -> Result<Value, BridgeError> {
  let result = match request {
    VenueRequest::Info(query) => handle.info.query(query).await,
    VenueRequest::PlaceOrder(order) => handle.exchange.order(order).await,
    VenueRequest::MarketOrder(order) => handle.exchange.market_open(order).await,
    VenueRequest::Cancel(CancelOrder::ByCloid { coin, cloid }) => {
      handle.exchange.cancel_by_cloid(coin, cloid).await
    }
    VenueRequest::Cancel(CancelOrder::ByOid { coin, oid }) => {
      handle.exchange.cancel(coin, *oid).await
    }
    VenueRequest::UpdateLeverage(update) => {
      handle
        .exchange
        .update_leverage(update.leverage, &update.coin, update.is_cross)
        .await
    }
  };

  result.map_err(BridgeError::Venue)
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use super::*;
  use crate::config::Network;
  use crate::domain::credentials::SecretKey;
  use crate::usecases::catalog::field;

  /// Records the override it was asked to build for, then refuses.
  #[derive(Default)]
  struct RecordingFactory {
    seen: Mutex<Vec<Option<String>>>,
  }

  impl ClientFactory for RecordingFactory {
    fn build(&self, credentials: &Credentials) -> Result<ClientHandle, BridgeError> {
      self
        .seen
        .lock()
        .unwrap()
        .push(credentials.account_address.clone());
      Err(BridgeError::Credential("stop".into()))
    }
  }

  fn invocation(command: CommandKind, data_type: &str) -> Invocation {
    Invocation {
      command,
      credentials: Credentials {
        secret_key: SecretKey::new("0x01"),
        network: Network::Testnet,
        account_address: Some("not-an-address".into()),
      },
      args: RawArgs::new().with(field::DATA_TYPE, Some(data_type)),
    }
  }

  #[tokio::test]
  async fn test_market_data_drops_account_override() {
    let dispatcher = Dispatcher::new(RecordingFactory::default());
    dispatcher
      .dispatch(&invocation(CommandKind::MarketData, "all_mids"))
      .await;
    dispatcher
      .dispatch(&invocation(CommandKind::UserData, "user_state"))
      .await;

    let seen = dispatcher.factory.seen.lock().unwrap();
    assert_eq!(*seen, vec![None, Some("not-an-address".to_string())]);
  }

  #[test]
  fn test_failure_envelope_shape() {
    let envelope = Envelope::from_error(&BridgeError::UnknownSelector("x".into()));
    assert_eq!(envelope.to_line(), r#"{"error":"Unknown data type: x"}"#);
    assert!(envelope.is_error());
  }

  #[test]
  fn test_unknown_command_envelope() {
    assert_eq!(
      Envelope::unknown_command().to_value(),
      json!({"error": "Unknown command"})
    );
  }

  #[test]
  fn test_success_envelope_is_raw_result() {
    let raw = json!({"status": "ok", "response": {"type": "default"}});
    let envelope = Envelope::from(Ok::<_, BridgeError>(raw.clone()));
    assert_eq!(envelope.to_value(), raw);
    assert!(!envelope.is_error());
  }

  #[test]
  fn test_line_has_no_newlines() {
    let envelope = Envelope::Failure("line one\nline two".into());
    assert!(!envelope.to_line().contains('\n'));
  }
}
