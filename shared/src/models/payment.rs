//! Payment gateway DTOs
//!
//! Wire formats are dictated by the gateway: requests use camelCase keys,
//! responses come back snake_case.

use serde::{Deserialize, Serialize};

/// Body of `POST /qpay/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub order_id: String,
    /// Amount in currency units, fixed at creation time
    pub amount: i64,
}

/// Successful response of `POST /qpay/create`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceResponse {
    /// Opaque scannable payload encoding the payment request
    pub qr_text: String,
    pub invoice_id: String,
}

/// Body of `POST /qpay/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInvoiceRequest {
    pub invoice_id: String,
}

/// Response of `POST /qpay/check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInvoiceResponse {
    pub paid: bool,
}
