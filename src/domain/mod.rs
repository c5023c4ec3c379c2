//! Domain layer - Request-scoped types.
//!
//! Pure data: credentials, order sub-documents and the typed requests the
//! translator produces. No I/O happens here.

pub mod credentials;
pub mod order;
pub mod request;

// Re-export core types for convenience
pub use credentials::{Credentials, SecretKey};
pub use order::{BuilderInfo, Cloid, OrderType, Tif, Tpsl};
pub use request::{
    CancelOrder, CandleRequest, InfoRequest, MarketOrder, PlaceOrder, UpdateLeverage,
    VenueRequest,
};
