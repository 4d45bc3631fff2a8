//! Client configuration
//!
//! All values can be overridden through environment variables:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | SAVORA_API_URL | http://localhost:8000 | Catalog/order API base URL |
//! | SAVORA_QPAY_URL | = SAVORA_API_URL | Payment gateway base URL |
//! | SAVORA_TIMEOUT_SECS | 30 | Request timeout |
//! | SAVORA_POLL_INTERVAL_MS | 5000 | Invoice status poll interval |
//! | SAVORA_DISMISS_DELAY_MS | 2000 | Delay between paid and dismissal |
//! | SAVORA_CART_DB | savora-cart.redb | Cart database path |

use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
const DEFAULT_DISMISS_DELAY_MS: u64 = 2000;
const DEFAULT_CART_DB: &str = "savora-cart.redb";

/// Client configuration for the storefront API and payment gateway
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog/order API base URL (e.g., "http://localhost:8000")
    pub api_base_url: String,

    /// Payment gateway base URL; defaults to the API base URL
    pub qpay_base_url: String,

    /// Bearer token for authenticated endpoints
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Invoice status poll interval in milliseconds
    pub poll_interval_ms: u64,

    /// Delay between a paid invoice and UI dismissal, in milliseconds
    pub dismiss_delay_ms: u64,

    /// Path of the redb database holding the persisted cart
    pub cart_db_path: String,
}

impl ClientConfig {
    /// Create a configuration with defaults for the given API base URL
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into();
        Self {
            qpay_base_url: api_base_url.clone(),
            api_base_url,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            dismiss_delay_ms: DEFAULT_DISMISS_DELAY_MS,
            cart_db_path: DEFAULT_CART_DB.to_string(),
        }
    }

    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("SAVORA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self {
            qpay_base_url: std::env::var("SAVORA_QPAY_URL")
                .unwrap_or_else(|_| api_base_url.clone()),
            api_base_url,
            token: None,
            timeout_secs: std::env::var("SAVORA_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            poll_interval_ms: std::env::var("SAVORA_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            dismiss_delay_ms: std::env::var("SAVORA_DISMISS_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DISMISS_DELAY_MS),
            cart_db_path: std::env::var("SAVORA_CART_DB")
                .unwrap_or_else(|_| DEFAULT_CART_DB.into()),
        }
    }

    /// Set the payment gateway base URL
    pub fn with_qpay_url(mut self, url: impl Into<String>) -> Self {
        self.qpay_base_url = url.into();
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set the invoice poll interval
    pub fn with_poll_interval(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    /// Set the paid-to-dismissal delay
    pub fn with_dismiss_delay(mut self, millis: u64) -> Self {
        self.dismiss_delay_ms = millis;
        self
    }

    /// Set the cart database path
    pub fn with_cart_db(mut self, path: impl Into<String>) -> Self {
        self.cart_db_path = path.into();
        self
    }

    /// Poll interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Dismiss delay as a `Duration`
    pub fn dismiss_delay(&self) -> Duration {
        Duration::from_millis(self.dismiss_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
