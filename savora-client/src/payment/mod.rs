//! Payment confirmation flow
//!
//! Drives one checkout attempt: validate the amount, create a gateway
//! invoice, render the returned QR payload, then poll the gateway until it
//! reports the invoice paid.
//!
//! Creation and confirmation fail differently by design. Creation is a
//! one-shot user action - the gateway does not guarantee idempotency, so a
//! failed creation is terminal for the attempt and only an explicit new
//! attempt retries it. Confirmation polling is repeated-by-design: a
//! transient check failure keeps the loop running and only flips a
//! `retrying` flag, because the user is mid-payment on an external device.
//!
//! State is published on a `watch` channel; the poll loop is owned by a
//! single `CancellationToken`, cancelled on teardown, on payment, and when
//! a new attempt supersedes the old one.

mod gateway;

pub use gateway::{PaymentError, PaymentGateway, PaymentResult, QpayClient};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::ClientConfig;

/// Invoice lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentState {
    /// Nothing created yet; waiting for the user to start payment
    Uncreated,
    /// Invoice creation request in flight
    Creating,
    /// Invoice exists; polling the gateway for confirmation
    AwaitingPayment {
        invoice_id: String,
        /// Scannable payload for the user's banking app
        qr_text: String,
        /// Last status check failed transiently; the loop keeps running
        retrying: bool,
    },
    /// Gateway confirmed payment (terminal)
    Paid,
    /// Dismiss delay elapsed after payment; the hosting UI should close
    Dismissed,
    /// Validation or creation failure, terminal for this attempt
    Failed { message: String },
}

/// Payment confirmation state machine
///
/// Owns at most one active poll loop; starting a new attempt cancels the
/// previous one before anything else happens.
pub struct PaymentFlow<G: PaymentGateway> {
    gateway: Arc<G>,
    poll_interval: Duration,
    dismiss_delay: Duration,
    state_tx: watch::Sender<PaymentState>,
    poll_cancel: Option<CancellationToken>,
}

impl<G: PaymentGateway> PaymentFlow<G> {
    pub fn new(gateway: G, poll_interval: Duration, dismiss_delay: Duration) -> Self {
        Self {
            gateway: Arc::new(gateway),
            poll_interval,
            dismiss_delay,
            state_tx: watch::Sender::new(PaymentState::Uncreated),
            poll_cancel: None,
        }
    }

    /// Build a flow with intervals taken from configuration
    pub fn from_config(gateway: G, config: &ClientConfig) -> Self {
        Self::new(gateway, config.poll_interval(), config.dismiss_delay())
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<PaymentState> {
        self.state_tx.subscribe()
    }

    /// Current state
    pub fn state(&self) -> PaymentState {
        self.state_tx.borrow().clone()
    }

    /// Start a checkout attempt
    ///
    /// `amount <= 0` fails immediately without touching the network. A
    /// successful creation stores the invoice id and QR payload and spawns
    /// the poll loop; `on_paid` fires exactly once when the gateway
    /// confirms payment.
    pub async fn start<F>(&mut self, order_id: &str, amount: i64, on_paid: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // A new attempt discards the prior invoice entirely
        self.cancel();

        if amount <= 0 {
            tracing::warn!(order_id = %order_id, amount, "Rejected payment with invalid amount");
            self.state_tx.send_replace(PaymentState::Failed {
                message: PaymentError::InvalidAmount(amount).to_string(),
            });
            return;
        }

        self.state_tx.send_replace(PaymentState::Creating);

        let invoice = match self.gateway.create_invoice(order_id, amount).await {
            Ok(invoice) => invoice,
            Err(e) => {
                // Creation is not auto-retried; the user starts a fresh attempt
                tracing::error!(order_id = %order_id, error = %e, "Invoice creation failed");
                self.state_tx.send_replace(PaymentState::Failed {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.state_tx.send_replace(PaymentState::AwaitingPayment {
            invoice_id: invoice.invoice_id.clone(),
            qr_text: invoice.qr_text.clone(),
            retrying: false,
        });

        let cancel = CancellationToken::new();
        self.poll_cancel = Some(cancel.clone());

        tokio::spawn(poll_loop(
            self.gateway.clone(),
            invoice.invoice_id,
            self.poll_interval,
            self.dismiss_delay,
            self.state_tx.clone(),
            cancel,
            on_paid,
        ));
    }

    /// Stop the active poll loop, if any
    ///
    /// Called when the hosting UI is dismissed, and implicitly when a new
    /// attempt supersedes this one or the flow is dropped.
    pub fn cancel(&mut self) {
        if let Some(token) = self.poll_cancel.take() {
            token.cancel();
            tracing::debug!("Payment poll loop cancelled");
        }
    }
}

impl<G: PaymentGateway> Drop for PaymentFlow<G> {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Poll the gateway until the invoice is paid or the loop is cancelled
async fn poll_loop<G, F>(
    gateway: Arc<G>,
    invoice_id: String,
    poll_interval: Duration,
    dismiss_delay: Duration,
    state_tx: watch::Sender<PaymentState>,
    cancel: CancellationToken,
    on_paid: F,
) where
    G: PaymentGateway,
    F: FnOnce() + Send + 'static,
{
    let mut ticker = tokio::time::interval(poll_interval);
    // The first tick completes immediately; consume it so the first status
    // check happens one full interval after the invoice was created.
    ticker.tick().await;

    let mut on_paid = Some(on_paid);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(invoice_id = %invoice_id, "Poll loop shut down");
                break;
            }
            _ = ticker.tick() => {
                match gateway.check_invoice(&invoice_id).await {
                    Ok(true) => {
                        tracing::info!(invoice_id = %invoice_id, "Invoice paid");
                        state_tx.send_replace(PaymentState::Paid);
                        if let Some(callback) = on_paid.take() {
                            callback();
                        }

                        // Leave the confirmation on screen briefly, then
                        // tell the hosting UI to close.
                        tokio::select! {
                            _ = cancel.cancelled() => {}
                            _ = tokio::time::sleep(dismiss_delay) => {
                                state_tx.send_replace(PaymentState::Dismissed);
                            }
                        }
                        break;
                    }
                    Ok(false) => {
                        set_retrying(&state_tx, false);
                    }
                    Err(e) => {
                        // Transient by definition; the loop never aborts here
                        tracing::warn!(invoice_id = %invoice_id, error = %e, "Status check failed, will retry");
                        set_retrying(&state_tx, true);
                    }
                }
            }
        }
    }
}

fn set_retrying(state_tx: &watch::Sender<PaymentState>, value: bool) {
    state_tx.send_if_modified(|state| {
        if let PaymentState::AwaitingPayment { retrying, .. } = state {
            if *retrying != value {
                *retrying = value;
                return true;
            }
        }
        false
    });
}
