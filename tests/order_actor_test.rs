//! Real Order actor with a mocked User dependency.
//!
//! Pattern 2: Actor + Mocks. The Order actor's `on_create` owner check runs for real
//! while the `UserClient` it calls is backed by a `MockClient`.

use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use chrono::Utc;
use rust_decimal::Decimal;
use std::time::Duration;
use storefront::clients::UserClient;
use storefront::config::ActorSettings;
use storefront::model::{
    AddressId, OrderCreate, OrderItem, OrderStatus, ProductId, Role, User, UserId,
};
use storefront::order_actor::{self, OrderError};

fn user(id: u32) -> User {
    User {
        id: UserId(id),
        email: format!("user{id}@example.com"),
        password_hash: "hash".into(),
        first_name: "Test".into(),
        last_name: "User".into(),
        role: Role::User,
        created_at: Utc::now(),
    }
}

fn params(user_id: u32) -> OrderCreate {
    let items = vec![OrderItem::priced(ProductId(1), 3, Decimal::new(2500, 2)).unwrap()];
    OrderCreate {
        user_id: UserId(user_id),
        total: storefront::model::order_total(&items).unwrap(),
        items,
        shipping_address_id: AddressId(1),
        payment_method: "card".into(),
    }
}

#[tokio::test]
async fn test_order_actor_with_mocked_user() {
    let mut user_mock = MockClient::<User>::new();
    user_mock.expect_get(UserId(1)).return_ok(Some(user(1)));

    let user_client = UserClient::new(user_mock.client());
    let (order_actor, order_client) = order_actor::new(ActorSettings::default());
    let actor_handle = tokio::spawn(order_actor.run(user_client));

    let created = order_client.create_order(params(1)).await.expect("Order creation failed");

    let order = order_client.fetch(created.id).await.unwrap().expect("Order not found");
    assert_eq!(order, created);
    assert_eq!(order.user_id, UserId(1));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, Decimal::new(7500, 2));
    assert_eq!(order.items[0].quantity, 3);

    user_mock.verify();

    drop(order_client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_unknown_user_is_rejected() {
    let mut user_mock = MockClient::<User>::new();
    user_mock.expect_get(UserId(9)).return_ok(None);

    let (order_actor, order_client) = order_actor::new(ActorSettings::default());
    tokio::spawn(order_actor.run(UserClient::new(user_mock.client())));

    let result = order_client.create_order(params(9)).await;
    assert!(matches!(result, Err(OrderError::InvalidUser(_))));
    assert!(order_client.list_for_user(UserId(9)).await.unwrap().is_empty());
    user_mock.verify();
}

#[tokio::test]
async fn test_user_lookup_timeout_is_surfaced() {
    let mut user_mock = MockClient::<User>::new();
    user_mock
        .expect_get(UserId(1))
        .return_err(FrameworkError::Timeout(Duration::from_millis(10)));

    let (order_actor, order_client) = order_actor::new(ActorSettings::default());
    tokio::spawn(order_actor.run(UserClient::new(user_mock.client())));

    let result = order_client.create_order(params(1)).await;
    assert_eq!(result, Err(OrderError::Timeout(Duration::from_millis(10))));
}

#[tokio::test]
async fn test_cancel_is_compare_and_set() {
    let mut user_mock = MockClient::<User>::new();
    user_mock.expect_get(UserId(1)).return_ok(Some(user(1)));

    let (order_actor, order_client) = order_actor::new(ActorSettings::default());
    tokio::spawn(order_actor.run(UserClient::new(user_mock.client())));
    let id = order_client.create_order(params(1)).await.unwrap().id;

    let first = order_client.cancel(id).await.unwrap();
    assert_eq!(first.status, OrderStatus::Cancelled);
    assert_eq!(
        order_client.cancel(id).await,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Cancelled,
        })
    );
    assert!(order_client.advance(id, OrderStatus::Confirmed).await.is_err());

    let reopened = order_client.reopen(id).await.unwrap();
    assert_eq!(reopened.status, OrderStatus::Pending);
    assert!(order_client.reopen(id).await.is_err());
}
