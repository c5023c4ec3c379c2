//! Info Port - Read-only Market and Account Queries
//!
//! Defines the trait for the venue's read-only query surface. Each
//! `InfoRequest` variant is one fetch operation; the response is returned
//! as raw JSON so the bridge can hand it to the caller untouched.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::request::InfoRequest;

/// Trait for read-only venue clients.
#[async_trait]
pub trait InfoClient: Send + Sync + 'static {
  /// Run one info query and return the venue's JSON response.
  ///
  /// # Errors
  /// Returns error on transport failure or a non-success HTTP status.
  async fn query(&self, request: &InfoRequest) -> anyhow::Result<Value>;
}
