//! Payment gateway client
//!
//! The gateway is an opaque external service with exactly two operations:
//! create an invoice, check an invoice. The trait is the seam that lets
//! tests drive the flow without a network.

use async_trait::async_trait;
use shared::models::{
    CheckInvoiceRequest, CheckInvoiceResponse, CreateInvoiceRequest, CreateInvoiceResponse,
};
use thiserror::Error;

use crate::ClientConfig;

/// Payment error type
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Amount must be positive before any network call is made
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),

    /// Gateway rejected the request
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for gateway operations
pub type PaymentResult<T> = Result<T, PaymentError>;

/// Payment gateway operations
#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Create an invoice for the given order reference and amount
    async fn create_invoice(
        &self,
        order_id: &str,
        amount: i64,
    ) -> PaymentResult<CreateInvoiceResponse>;

    /// Ask whether the invoice has been paid
    async fn check_invoice(&self, invoice_id: &str) -> PaymentResult<bool>;
}

/// QPay gateway client over HTTP
#[derive(Debug, Clone)]
pub struct QpayClient {
    client: reqwest::Client,
    base_url: String,
}

impl QpayClient {
    /// Create a gateway client from configuration
    pub fn new(config: &ClientConfig) -> PaymentResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.qpay_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> PaymentResult<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway(format!("{}: {}", status, text)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl PaymentGateway for QpayClient {
    async fn create_invoice(
        &self,
        order_id: &str,
        amount: i64,
    ) -> PaymentResult<CreateInvoiceResponse> {
        let request = CreateInvoiceRequest {
            order_id: order_id.to_string(),
            amount,
        };
        let response: CreateInvoiceResponse = self.post("qpay/create", &request).await?;
        tracing::info!(
            order_id = %order_id,
            invoice_id = %response.invoice_id,
            amount,
            "Invoice created"
        );
        Ok(response)
    }

    async fn check_invoice(&self, invoice_id: &str) -> PaymentResult<bool> {
        let request = CheckInvoiceRequest {
            invoice_id: invoice_id.to_string(),
        };
        let response: CheckInvoiceResponse = self.post("qpay/check", &request).await?;
        Ok(response.paid)
    }
}
