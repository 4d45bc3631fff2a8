//! Order Model

use serde::{Deserialize, Serialize};

/// Order status as reported by the order API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Delivered,
    Cancelled,
}

/// Order line item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub food_id: String,
    #[serde(default)]
    pub food_name: Option<String>,
    #[serde(default)]
    pub selected_size: Option<String>,
    /// Price in currency units
    pub price: i64,
    pub quantity: i64,
}

/// Order entity as returned by `GET /order/user/:userId`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Total price in currency units
    pub total_price: i64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}
