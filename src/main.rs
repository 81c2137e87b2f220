//! Demo: register a customer, stock a product, place an order and cancel it.
//!
//! ```bash
//! JWT_SECRET=dev RUST_LOG=info cargo run
//! ```

use actor_framework::tracing::setup_tracing;
use storefront::config::Config;
use storefront::lifecycle::OrderSystem;
use storefront::model::{
    OrderLineRequest, PlaceOrderRequest, ProductCreate, RegisterRequest, ShippingAddress,
};
use storefront::store::ProductStore;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    setup_tracing(&config.log_level);

    info!(?config, "Starting storefront demo");
    let system = OrderSystem::new(&config)?;

    let customer = system
        .user_service
        .register(RegisterRequest {
            email: "Alice@Example.com".to_string(),
            password: "correct horse battery".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
        })
        .instrument(tracing::info_span!("registration"))
        .await?;

    let (token, _) = system
        .user_service
        .login("alice@example.com", "correct horse battery")
        .await?;
    let principal = system.user_service.authenticate(&token)?;
    info!(user_id = %principal.user_id, "Customer authenticated");

    // Seeded directly through the store; catalog writes via ProductService need an admin.
    let lamp = ProductStore::create(
        &system.product_client,
        ProductCreate {
            name: "Desk Lamp".to_string(),
            description: "Adjustable LED lamp".to_string(),
            price: "10.00".parse()?,
            sku: "LAMP-001".to_string(),
            stock: 5,
            category: "lighting".to_string(),
            image_url: None,
        },
    )
    .await?;

    let request = PlaceOrderRequest {
        items: vec![OrderLineRequest {
            product_id: lamp.id,
            quantity: 2,
        }],
        shipping_address: ShippingAddress {
            street: "1 Rabbit Hole".to_string(),
            city: "Oxford".to_string(),
            state: "Oxfordshire".to_string(),
            country: "UK".to_string(),
            postal_code: "OX1 1AA".to_string(),
            is_default: true,
        },
        payment_method: "card".to_string(),
    };

    let placed = system
        .order_service
        .place_order(customer.id, request)
        .instrument(tracing::info_span!("order_processing"))
        .await;

    match placed {
        Ok(order) => {
            let stock = system.product_service.get(lamp.id).await?.stock;
            info!(order_id = %order.id, total = %order.total, stock, "Order placed");

            let cancelled = system.order_service.cancel_order(order.id).await?;
            let stock = system.product_service.get(lamp.id).await?.stock;
            info!(order_id = %cancelled.id, status = %cancelled.status, stock, "Order cancelled");
        }
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    system.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
