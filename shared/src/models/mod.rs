//! Data models
//!
//! Wire types for the catalog/order API and the payment gateway, plus the
//! cart line types the client persists locally. Field renames follow the
//! remote APIs exactly: the catalog speaks camelCase, the gateway mixes
//! camelCase requests with snake_case responses.
//!
//! All monetary values are `i64` whole currency units.

pub mod cart;
pub mod category;
pub mod food;
pub mod order;
pub mod payment;

// Re-exports
pub use cart::*;
pub use category::*;
pub use food::*;
pub use order::*;
pub use payment::*;
