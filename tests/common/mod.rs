#![allow(dead_code)]

use rust_decimal::Decimal;
use storefront::address_actor;
use storefront::auth::Principal;
use storefront::clients::{AddressClient, OrderClient, ProductClient, UserClient};
use storefront::config::{ActorSettings, Config};
use storefront::model::{
    OrderLineRequest, PlaceOrderRequest, Product, ProductCreate, ProductId, Role, ShippingAddress,
    UserCreate, UserId,
};
use storefront::order_actor;
use storefront::product_actor;
use storefront::store::ProductStore;
use storefront::user_actor;

/// Config with a cheap password hash so tests stay fast.
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some("test-secret".to_string()),
        "PASSWORD_HASH_MEMORY_KIB" => Some("64".to_string()),
        "LOG_LEVEL" => Some("warn".to_string()),
        _ => None,
    })
    .expect("test config")
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn address() -> ShippingAddress {
    ShippingAddress {
        street: "221B Baker Street".into(),
        city: "London".into(),
        state: "Greater London".into(),
        country: "UK".into(),
        postal_code: "NW1 6XE".into(),
        is_default: false,
    }
}

pub fn order_request(lines: &[(ProductId, u32)]) -> PlaceOrderRequest {
    PlaceOrderRequest {
        items: lines
            .iter()
            .map(|&(product_id, quantity)| OrderLineRequest {
                product_id,
                quantity,
            })
            .collect(),
        shipping_address: address(),
        payment_method: "card".into(),
    }
}

pub fn admin() -> Principal {
    Principal {
        user_id: UserId(999),
        email: "ops@example.com".into(),
        is_admin: true,
    }
}

pub fn customer(user_id: UserId) -> Principal {
    Principal {
        user_id,
        email: "customer@example.com".into(),
        is_admin: false,
    }
}

pub fn product_params(sku: &str, price: &str, stock: u32) -> ProductCreate {
    ProductCreate {
        name: format!("Product {sku}"),
        description: String::new(),
        price: dec(price),
        sku: sku.to_string(),
        stock,
        category: "general".into(),
        image_url: None,
    }
}

/// All four actors running, with one customer already registered.
pub struct Stores {
    pub users: UserClient,
    pub products: ProductClient,
    pub addresses: AddressClient,
    pub orders: OrderClient,
    pub customer: UserId,
}

impl Stores {
    pub async fn start() -> Self {
        let settings = ActorSettings::default();
        let (user_actor, users) = user_actor::new(settings);
        tokio::spawn(user_actor.run(()));
        let (product_actor, products) = product_actor::new(settings);
        tokio::spawn(product_actor.run(()));
        let (address_actor, addresses) = address_actor::new(settings);
        tokio::spawn(address_actor.run(()));
        let (order_actor, orders) = order_actor::new(settings);
        tokio::spawn(order_actor.run(users.clone()));

        let customer = users
            .create_user(UserCreate {
                email: "customer@example.com".into(),
                password_hash: "not-a-real-hash".into(),
                first_name: "Casey".into(),
                last_name: "Customer".into(),
                role: Role::User,
            })
            .await
            .expect("seed customer")
            .id;

        Self {
            users,
            products,
            addresses,
            orders,
            customer,
        }
    }

    pub async fn product(&self, sku: &str, price: &str, stock: u32) -> Product {
        ProductStore::create(&self.products, product_params(sku, price, stock))
            .await
            .expect("seed product")
    }

    pub async fn stock(&self, id: ProductId) -> u32 {
        ProductStore::get_by_id(&self.products, id)
            .await
            .expect("product exists")
            .stock
    }
}
