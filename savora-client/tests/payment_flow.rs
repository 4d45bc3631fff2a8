// savora-client/tests/payment_flow.rs
// Payment confirmation flow tests against a scripted in-process gateway

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use savora_client::payment::{
    PaymentError, PaymentFlow, PaymentGateway, PaymentResult, PaymentState,
};
use shared::models::CreateInvoiceResponse;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// One scripted poll response
enum Check {
    Paid,
    NotPaid,
    NetworkError,
}

/// Gateway fake: counts calls, replays a scripted sequence of poll results
struct FakeGateway {
    fail_create: bool,
    create_calls: AtomicUsize,
    check_calls: AtomicUsize,
    checks: Mutex<VecDeque<Check>>,
}

impl FakeGateway {
    fn new(checks: Vec<Check>) -> Self {
        Self {
            fail_create: false,
            create_calls: AtomicUsize::new(0),
            check_calls: AtomicUsize::new(0),
            checks: Mutex::new(checks.into()),
        }
    }

    fn failing_create() -> Self {
        let mut gateway = Self::new(vec![]);
        gateway.fail_create = true;
        gateway
    }
}

/// Newtype over `Arc<FakeGateway>`: the orphan rule forbids implementing
/// `PaymentGateway` for `Arc<FakeGateway>` directly in this test crate.
struct GatewayHandle(Arc<FakeGateway>);

#[async_trait]
impl PaymentGateway for GatewayHandle {
    async fn create_invoice(
        &self,
        _order_id: &str,
        _amount: i64,
    ) -> PaymentResult<CreateInvoiceResponse> {
        let call = self.0.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.0.fail_create {
            return Err(PaymentError::Gateway("invoice rejected".into()));
        }
        Ok(CreateInvoiceResponse {
            qr_text: format!("QR{}", call),
            invoice_id: format!("INV{}", call),
        })
    }

    async fn check_invoice(&self, _invoice_id: &str) -> PaymentResult<bool> {
        self.0.check_calls.fetch_add(1, Ordering::SeqCst);
        match self.0.checks.lock().await.pop_front() {
            Some(Check::Paid) => Ok(true),
            Some(Check::NotPaid) | None => Ok(false),
            Some(Check::NetworkError) => Err(PaymentError::Gateway("connection reset".into())),
        }
    }
}

const POLL: Duration = Duration::from_millis(40);
const DISMISS: Duration = Duration::from_millis(40);
const WAIT: Duration = Duration::from_secs(5);

fn flow_over(gateway: &Arc<FakeGateway>) -> PaymentFlow<GatewayHandle> {
    PaymentFlow::new(GatewayHandle(gateway.clone()), POLL, DISMISS)
}

#[tokio::test]
async fn test_successful_payment_scenario() {
    let gateway = Arc::new(FakeGateway::new(vec![Check::NotPaid, Check::Paid]));
    let mut flow = flow_over(&gateway);
    let mut states = flow.subscribe();

    assert_eq!(flow.state(), PaymentState::Uncreated);

    let paid_count = Arc::new(AtomicUsize::new(0));
    let counter = paid_count.clone();
    flow.start("order-1", 15000, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    // Invoice created: awaiting payment with the gateway's QR payload
    match flow.state() {
        PaymentState::AwaitingPayment {
            invoice_id,
            qr_text,
            retrying,
        } => {
            assert_eq!(invoice_id, "INV1");
            assert_eq!(qr_text, "QR1");
            assert!(!retrying);
        }
        other => panic!("expected AwaitingPayment, got {:?}", other),
    }

    // First poll answers not-paid and leaves the state alone; the second
    // answers paid and terminates the loop.
    timeout(WAIT, states.wait_for(|s| *s == PaymentState::Paid))
        .await
        .expect("timed out waiting for Paid")
        .unwrap();
    assert_eq!(paid_count.load(Ordering::SeqCst), 1);

    // Dismissal is signalled after the configured delay
    timeout(WAIT, states.wait_for(|s| *s == PaymentState::Dismissed))
        .await
        .expect("timed out waiting for Dismissed")
        .unwrap();

    // Terminal: the callback never fires again and polling has stopped
    let checks_at_paid = gateway.check_calls.load(Ordering::SeqCst);
    tokio::time::sleep(POLL * 5).await;
    assert_eq!(paid_count.load(Ordering::SeqCst), 1);
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), checks_at_paid);
}

#[tokio::test]
async fn test_invalid_amount_makes_no_network_call() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let mut flow = flow_over(&gateway);

    flow.start("order-1", 0, || {}).await;

    match flow.state() {
        PaymentState::Failed { message } => assert!(message.contains("invalid amount")),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_creation_failure_is_terminal() {
    let gateway = Arc::new(FakeGateway::failing_create());
    let mut flow = flow_over(&gateway);

    flow.start("order-1", 15000, || {}).await;

    assert!(matches!(flow.state(), PaymentState::Failed { .. }));
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);

    // No automatic retry of creation and no polling of a dead attempt
    tokio::time::sleep(POLL * 5).await;
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_transient_poll_failure_keeps_polling() {
    let gateway = Arc::new(FakeGateway::new(vec![
        Check::NetworkError,
        Check::NotPaid,
        Check::Paid,
    ]));
    let mut flow = flow_over(&gateway);
    let mut states = flow.subscribe();

    let paid_count = Arc::new(AtomicUsize::new(0));
    let counter = paid_count.clone();
    flow.start("order-1", 15000, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .await;

    // The failed check surfaces as a soft retrying flag, not a failure
    timeout(
        WAIT,
        states.wait_for(|s| matches!(s, PaymentState::AwaitingPayment { retrying: true, .. })),
    )
    .await
    .expect("timed out waiting for retrying flag")
    .unwrap();

    // The loop survives the blip and still reaches Paid
    timeout(WAIT, states.wait_for(|s| *s == PaymentState::Paid))
        .await
        .expect("timed out waiting for Paid")
        .unwrap();
    assert_eq!(paid_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cancel_stops_polling() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let mut flow = flow_over(&gateway);

    flow.start("order-1", 15000, || {}).await;

    // Let at least one poll happen, then dismiss the UI
    tokio::time::sleep(POLL * 3).await;
    flow.cancel();

    let checks_at_cancel = gateway.check_calls.load(Ordering::SeqCst);
    tokio::time::sleep(POLL * 5).await;
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), checks_at_cancel);
}

#[tokio::test]
async fn test_new_attempt_supersedes_old_poll_loop() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let mut flow = flow_over(&gateway);

    flow.start("order-1", 15000, || {}).await;
    flow.start("order-1", 15000, || {}).await;

    // Two invoices were created, but only the second attempt is live
    assert_eq!(gateway.create_calls.load(Ordering::SeqCst), 2);
    match flow.state() {
        PaymentState::AwaitingPayment { invoice_id, .. } => assert_eq!(invoice_id, "INV2"),
        other => panic!("expected AwaitingPayment, got {:?}", other),
    }

    // Cancelling the live attempt stops all polling: the superseded loop
    // must already be gone.
    tokio::time::sleep(POLL * 3).await;
    flow.cancel();
    let checks_at_cancel = gateway.check_calls.load(Ordering::SeqCst);
    tokio::time::sleep(POLL * 5).await;
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), checks_at_cancel);
}

#[tokio::test]
async fn test_drop_cancels_poll_loop() {
    let gateway = Arc::new(FakeGateway::new(vec![]));
    let mut flow = flow_over(&gateway);

    flow.start("order-1", 15000, || {}).await;
    tokio::time::sleep(POLL * 2).await;
    drop(flow);

    let checks_at_drop = gateway.check_calls.load(Ordering::SeqCst);
    tokio::time::sleep(POLL * 5).await;
    assert_eq!(gateway.check_calls.load(Ordering::SeqCst), checks_at_drop);
}
