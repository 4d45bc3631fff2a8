//! Shared types for the Savora storefront
//!
//! Domain models exchanged with the catalog/order API and the payment
//! gateway, plus the cart line types persisted by the client. No I/O here;
//! everything is plain serde data.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use models::{
    CartLine, Category, CategoryFoods, CheckInvoiceRequest, CheckInvoiceResponse,
    CreateInvoiceRequest, CreateInvoiceResponse, Food, FoodSnapshot, Order, OrderItem, OrderStatus,
};
