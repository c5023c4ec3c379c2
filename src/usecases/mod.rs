//! Use Cases Layer - Command dispatch and translation
//!
//! Turns one parsed command line into one venue call and one output
//! envelope.
//!
//! Use cases:
//! - `catalog`: Static command and data-type tables
//! - `schema`: Declarative field rules and coercion
//! - `translator`: Per-command argument → request functions
//! - `dispatcher`: Client construction, execution, envelope

pub mod catalog;
pub mod dispatcher;
pub mod schema;
pub mod translator;

pub use catalog::CommandKind;
pub use dispatcher::{Dispatcher, Envelope, Invocation};
pub use schema::RawArgs;
