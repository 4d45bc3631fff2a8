//! Savora Client - storefront SDK
//!
//! Typed access to the Savora catalog/order API, a redb-persisted shopping
//! cart, and the QR payment confirmation flow against the payment gateway.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod payment;

pub use auth::AuthApi;
pub use cart::{CartStorage, CartStore, StorageError, StorageResult};
pub use catalog::CatalogApi;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use orders::OrderApi;
pub use payment::{
    PaymentError, PaymentFlow, PaymentGateway, PaymentResult, PaymentState, QpayClient,
};

// Re-export shared types for convenience
pub use shared::models::{CartLine, Category, CategoryFoods, Food, FoodSnapshot, Order, OrderStatus};
