//! Argument Schemas - Declarative field rules per command
//!
//! Each command declares its fields once: presence (required, optional,
//! or defaulted) and the coercion applied to the raw string. `resolve`
//! applies those rules to the raw CLI values and yields typed
//! `ResolvedArgs`, so per-command translators never re-implement
//! defaulting or parsing.
//!
//! Boolean-like fields keep the CLI convention of the literal strings
//! `"true"`/`"false"` (exact match) and become native `bool` here.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::order::Cloid;
use crate::error::BridgeError;

/// Whether and how a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
  /// Must be supplied.
  Required,
  /// May be absent; an empty string counts as absent.
  Optional,
  /// Absent or empty takes this raw value.
  Default(&'static str),
}

/// How a raw string is turned into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
  /// Kept as-is.
  Text,
  /// `"true"` or `"false"`.
  Flag,
  /// Finite decimal number.
  Decimal,
  /// Unsigned integer.
  Integer,
  /// JSON document.
  Json,
  /// `0x` + 32 hex digits.
  ClientOrderId,
}

/// One declared field of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  /// Flag name without leading dashes.
  pub name: &'static str,
  pub presence: Presence,
  pub coercion: Coercion,
}

impl FieldSpec {
  pub const fn required(name: &'static str, coercion: Coercion) -> Self {
    Self {
      name,
      presence: Presence::Required,
      coercion,
    }
  }

  pub const fn optional(name: &'static str, coercion: Coercion) -> Self {
    Self {
      name,
      presence: Presence::Optional,
      coercion,
    }
  }

  pub const fn defaulted(
    name: &'static str,
    default: &'static str,
    coercion: Coercion,
  ) -> Self {
    Self {
      name,
      presence: Presence::Default(default),
      coercion,
    }
  }

  /// The default raw value, if any.
  pub const fn default_value(&self) -> Option<&'static str> {
    match self.presence {
      Presence::Default(value) => Some(value),
      Presence::Required | Presence::Optional => None,
    }
  }
}

// ────────────────────────────────────────────
// Raw input
// ────────────────────────────────────────────

/// Raw command arguments keyed by flag name, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawArgs {
  values: BTreeMap<&'static str, String>,
}

impl RawArgs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a value; `None` leaves the field absent.
  #[must_use]
  pub fn with(mut self, name: &'static str, value: Option<impl Into<String>>) -> Self {
    if let Some(value) = value {
      self.values.insert(name, value.into());
    }
    self
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.values.get(name).map(String::as_str)
  }
}

// ────────────────────────────────────────────
// Resolved output
// ────────────────────────────────────────────

/// A coerced field value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
  Text(String),
  Flag(bool),
  Decimal(f64),
  Integer(u64),
  Json(Value),
  Cloid(Cloid),
}

/// Typed arguments after presence and coercion rules were applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedArgs {
  values: BTreeMap<&'static str, ArgValue>,
}

impl ResolvedArgs {
  pub fn contains(&self, name: &str) -> bool {
    self.values.contains_key(name)
  }

  pub fn opt_text(&self, name: &'static str) -> Result<Option<&str>, BridgeError> {
    match self.values.get(name) {
      None => Ok(None),
      Some(ArgValue::Text(s)) => Ok(Some(s)),
      Some(other) => Err(mistyped(name, "text", other)),
    }
  }

  pub fn text(&self, name: &'static str) -> Result<&str, BridgeError> {
    self.opt_text(name)?.ok_or_else(|| missing(name))
  }

  pub fn flag(&self, name: &'static str) -> Result<bool, BridgeError> {
    match self.values.get(name) {
      None => Err(missing(name)),
      Some(ArgValue::Flag(b)) => Ok(*b),
      Some(other) => Err(mistyped(name, "flag", other)),
    }
  }

  pub fn opt_decimal(&self, name: &'static str) -> Result<Option<f64>, BridgeError> {
    match self.values.get(name) {
      None => Ok(None),
      Some(ArgValue::Decimal(v)) => Ok(Some(*v)),
      Some(other) => Err(mistyped(name, "decimal", other)),
    }
  }

  pub fn decimal(&self, name: &'static str) -> Result<f64, BridgeError> {
    self.opt_decimal(name)?.ok_or_else(|| missing(name))
  }

  pub fn opt_integer(&self, name: &'static str) -> Result<Option<u64>, BridgeError> {
    match self.values.get(name) {
      None => Ok(None),
      Some(ArgValue::Integer(v)) => Ok(Some(*v)),
      Some(other) => Err(mistyped(name, "integer", other)),
    }
  }

  pub fn integer(&self, name: &'static str) -> Result<u64, BridgeError> {
    self.opt_integer(name)?.ok_or_else(|| missing(name))
  }

  /// Decode an optional JSON field into `T`, reporting shape errors
  /// against the field name.
  pub fn opt_json<T: DeserializeOwned>(
    &self,
    name: &'static str,
  ) -> Result<Option<T>, BridgeError> {
    match self.values.get(name) {
      None => Ok(None),
      Some(ArgValue::Json(v)) => serde_json::from_value(v.clone())
        .map(Some)
        .map_err(|e| BridgeError::parse(name, e)),
      Some(other) => Err(mistyped(name, "json", other)),
    }
  }

  pub fn json<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, BridgeError> {
    self.opt_json(name)?.ok_or_else(|| missing(name))
  }

  pub fn opt_cloid(&self, name: &'static str) -> Result<Option<Cloid>, BridgeError> {
    match self.values.get(name) {
      None => Ok(None),
      Some(ArgValue::Cloid(c)) => Ok(Some(c.clone())),
      Some(other) => Err(mistyped(name, "cloid", other)),
    }
  }
}

fn missing(name: &str) -> BridgeError {
  BridgeError::Config(format!("missing required argument --{name}"))
}

fn mistyped(name: &str, wanted: &str, got: &ArgValue) -> BridgeError {
  // Only reachable when a translator disagrees with its own schema.
  BridgeError::Config(format!("--{name} is declared as {got:?}, read as {wanted}"))
}

// ────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────

/// Apply `fields` to `raw`.
///
/// # Errors
/// `Config` for a missing required field, `Parse` for a value that does
/// not coerce.
pub fn resolve(fields: &[FieldSpec], raw: &RawArgs) -> Result<ResolvedArgs, BridgeError> {
  let mut values = BTreeMap::new();

  for spec in fields {
    let supplied = raw.get(spec.name);
    let text = match spec.presence {
      Presence::Required => Some(supplied.ok_or_else(|| missing(spec.name))?),
      Presence::Optional => supplied.filter(|s| !s.is_empty()),
      Presence::Default(default) => {
        Some(supplied.filter(|s| !s.is_empty()).unwrap_or(default))
      }
    };

    if let Some(text) = text {
      values.insert(spec.name, coerce(spec.name, spec.coercion, text)?);
    }
  }

  Ok(ResolvedArgs { values })
}

fn coerce(name: &'static str, coercion: Coercion, text: &str) -> Result<ArgValue, BridgeError> {
  match coercion {
    Coercion::Text => Ok(ArgValue::Text(text.to_string())),
    Coercion::Flag => parse_flag(name, text).map(ArgValue::Flag),
    Coercion::Decimal => parse_decimal(name, text).map(ArgValue::Decimal),
    Coercion::Integer => parse_integer(name, text).map(ArgValue::Integer),
    Coercion::Json => serde_json::from_str(text)
      .map(ArgValue::Json)
      .map_err(|e| BridgeError::parse(name, format!("invalid JSON: {e}"))),
    Coercion::ClientOrderId => text
      .parse::<Cloid>()
      .map(ArgValue::Cloid)
      .map_err(|e| BridgeError::parse(name, e)),
  }
}

/// Exact-match `"true"`/`"false"`.
pub fn parse_flag(name: &'static str, text: &str) -> Result<bool, BridgeError> {
  match text {
    "true" => Ok(true),
    "false" => Ok(false),
    other => Err(BridgeError::parse(
      name,
      format!("expected \"true\" or \"false\", got {other:?}"),
    )),
  }
}

pub fn parse_decimal(name: &'static str, text: &str) -> Result<f64, BridgeError> {
  let value: f64 = text
    .trim()
    .parse()
    .map_err(|_| BridgeError::parse(name, format!("not a number: {text:?}")))?;
  if !value.is_finite() {
    return Err(BridgeError::parse(name, format!("not a finite number: {text:?}")));
  }
  Ok(value)
}

pub fn parse_integer(name: &'static str, text: &str) -> Result<u64, BridgeError> {
  text
    .trim()
    .parse()
    .map_err(|_| BridgeError::parse(name, format!("not an unsigned integer: {text:?}")))
}
