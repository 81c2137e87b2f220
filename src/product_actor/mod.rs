//! # Product Actor
//!
//! This module implements the Product resource actor: the catalog and its stock counts.
//!
//! ## Overview
//!
//! Stock is the one piece of state shared by concurrent checkouts, so every change to it
//! is a custom action handled inside the actor rather than a read-modify-write done by
//! the caller.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`] for stock management
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use storefront::config::ActorSettings;
//! use storefront::model::ProductCreate;
//! use storefront::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(ActorSettings::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         sku: "WID-1".to_string(),
//!         price: "29.99".parse()?,
//!         stock: 100,
//!         ..Default::default()
//!     };
//!     let product = client.create_product(params).await?;
//!
//!     assert_eq!(client.reserve_stock(product.id, 5).await?, 95);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::config::ActorSettings;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(settings: ActorSettings) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(settings.buffer_size);
    let client = ProductClient::new(settings.apply(generic_client));
    (actor, client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductCreate, ProductFilter, ProductId, ProductUpdate};
    use actor_framework::ActorClient;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    async fn stock(client: &ProductClient, id: ProductId) -> u32 {
        client.fetch(id).await.unwrap().unwrap().stock
    }

    fn lamp(sku: &str, stock: u32) -> ProductCreate {
        ProductCreate {
            name: "Desk Lamp".to_string(),
            sku: sku.to_string(),
            price: "19.99".parse().unwrap(),
            stock,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reserve_and_release() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let id = client.create_product(lamp("L-1", 5)).await.unwrap().id;
        assert_eq!(client.reserve_stock(id, 2).await.unwrap(), 3);
        assert_eq!(client.release_stock(id, 2).await.unwrap(), 5);
        assert_eq!(stock(&client, id).await, 5);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_stock_untouched() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let id = client.create_product(lamp("L-1", 2)).await.unwrap().id;
        let err = client.reserve_stock(id, 3).await.unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                product_id: id,
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(stock(&client, id).await, 2);
    }

    #[tokio::test]
    async fn test_update_only_writes_the_fields_it_sets() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let id = client.create_product(lamp("L-1", 5)).await.unwrap().id;
        let edit = ProductUpdate {
            price: Some(dec("24.99")),
            ..Default::default()
        };
        // A reservation lands between the caller's read and its edit.
        let seen = client.fetch(id).await.unwrap().unwrap();
        client.reserve_stock(id, 2).await.unwrap();
        let updated = client.update_product(id, edit).await.unwrap();

        assert_eq!(seen.stock, 5);
        assert_eq!(updated.stock, 3);
        assert_eq!(updated.price, dec("24.99"));
        assert_eq!(updated.name, "Desk Lamp");

        let restock = ProductUpdate {
            stock: Some(40),
            ..Default::default()
        };
        assert_eq!(client.update_product(id, restock).await.unwrap().stock, 40);
    }

    #[tokio::test]
    async fn test_invalid_update_is_rejected_untouched() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let id = client.create_product(lamp("L-1", 5)).await.unwrap().id;
        let blank = ProductUpdate {
            name: Some(" ".into()),
            price: Some(dec("1.00")),
            ..Default::default()
        };
        assert!(matches!(
            client.update_product(id, blank).await,
            Err(ProductError::ValidationError(_))
        ));
        let stored = client.fetch(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Desk Lamp");
        assert_eq!(stored.price, dec("19.99"));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_invalid() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let id = client.create_product(lamp("L-1", 2)).await.unwrap().id;
        assert!(matches!(
            client.reserve_stock(id, 0).await,
            Err(ProductError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_sku_must_be_unique() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        client.create_product(lamp("L-1", 1)).await.unwrap();
        let err = client.create_product(lamp("L-1", 1)).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateSku(_)));
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let mut params = lamp("L-1", 1);
        params.price = "-0.01".parse().unwrap();
        let err = client.create_product(params).await.unwrap_err();
        assert!(matches!(err, ProductError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_missing_product() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let err = client.reserve_stock(ProductId(9), 1).await.unwrap_err();
        assert_eq!(err, ProductError::NotFound("product_9".into()));
        assert!(client.find(ProductFilter::default()).await.unwrap().is_empty());
    }
}
