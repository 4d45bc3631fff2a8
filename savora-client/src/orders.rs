//! Order API - order history reads
//!
//! Requires a bearer token; the server answers 401 for missing or rejected
//! tokens, surfaced here as `ClientError::Unauthorized`.

use shared::models::Order;

use crate::{ClientResult, HttpClient};

/// Typed wrapper over the order endpoints
#[derive(Debug, Clone)]
pub struct OrderApi {
    http: HttpClient,
}

impl OrderApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /order/user/:userId` - the user's order history
    pub async fn user_orders(&self, user_id: &str) -> ClientResult<Vec<Order>> {
        self.http.get(&format!("order/user/{}", user_id)).await
    }
}
