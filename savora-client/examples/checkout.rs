// savora-client/examples/checkout.rs
// End-to-end checkout demo: browse the catalog, fill the cart, pay by QR.

use savora_client::payment::PaymentState;
use savora_client::{
    CartLine, CartStore, CatalogApi, ClientConfig, FoodSnapshot, HttpClient, PaymentFlow,
    QpayClient,
};

const DELIVERY_FEE: i64 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api_base_url, qpay = %config.qpay_base_url, "Starting checkout demo");

    // Browse the catalog and put the first food in the cart
    let catalog = CatalogApi::new(HttpClient::new(&config)?);
    let foods = catalog.list_foods().await?;
    let Some(food) = foods.first() else {
        tracing::warn!("Catalog is empty, nothing to order");
        return Ok(());
    };
    tracing::info!(food = %food.food_name, price = food.price, "Adding to cart");

    let mut cart = CartStore::open(&config.cart_db_path)?;
    cart.add(CartLine::new(
        food.id.clone(),
        None,
        2,
        FoodSnapshot::from(food),
    ))?;

    let amount = cart.grand_total(DELIVERY_FEE);
    tracing::info!(
        subtotal = cart.subtotal(),
        delivery_fee = DELIVERY_FEE,
        amount,
        "Cart ready"
    );

    // Create the invoice and poll until the bank app confirms payment
    let gateway = QpayClient::new(&config)?;
    let mut flow = PaymentFlow::from_config(gateway, &config);
    let mut states = flow.subscribe();

    flow.start("demo-order", amount, || {
        tracing::info!("Payment confirmed");
    })
    .await;

    loop {
        match states.borrow_and_update().clone() {
            PaymentState::AwaitingPayment { qr_text, retrying, .. } => {
                if retrying {
                    tracing::warn!("Gateway unreachable, retrying");
                } else {
                    println!("Scan to pay: {}", qr_text);
                }
            }
            PaymentState::Failed { message } => {
                tracing::error!(%message, "Payment failed");
                return Ok(());
            }
            PaymentState::Dismissed => break,
            _ => {}
        }
        if states.changed().await.is_err() {
            break;
        }
    }

    // Checkout complete: the persisted cart slot is erased
    cart.clear()?;
    tracing::info!("Order placed, cart cleared");
    Ok(())
}
