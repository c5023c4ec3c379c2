//! Hyperliquid REST API Adapter
//!
//! Implements the venue ports over HTTP: read-only queries against
//! `/info` and signed actions against `/exchange`.
//!
//! Sub-modules:
//! - `assets`: coin name to asset id resolution
//! - `auth`: private key decoding and L1 action signing
//! - `client`: shared JSON-over-POST transport
//! - `exchange`: signed trading client
//! - `factory`: credentials to client handle
//! - `info`: read-only query client
//! - `number`: wire number formatting and slippage pricing
//! - `types`: action and metadata wire types

pub mod assets;
pub mod auth;
pub mod client;
pub mod exchange;
pub mod factory;
pub mod info;
pub mod number;
pub mod types;

pub use factory::HttpClientFactory;
