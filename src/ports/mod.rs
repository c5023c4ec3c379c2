//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use-case layer requires from
//! the venue. Adapters implement these traits; tests mock them.
//!
//! Port categories:
//! - `InfoClient`: Read-only market and account queries
//! - `ExchangeClient`: Signed trading actions
//! - `ClientFactory`: Credentials to client handle

pub mod exchange;
pub mod factory;
pub mod info;

pub use exchange::ExchangeClient;
pub use factory::{ClientFactory, ClientHandle};
pub use info::InfoClient;
