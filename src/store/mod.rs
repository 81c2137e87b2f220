//! # Store Contracts
//!
//! Capability traits the services are written against, each with one production
//! implementation: the typed actor client for that resource. Tests substitute wrappers
//! that inject failures.
//!
//! Stores are cheap to clone (a client is a channel sender) and `'static`, so the undo
//! steps journaled in a [`Transaction`] can own a handle to the store they compensate.

pub mod transaction;

pub use transaction::{RollbackError, Transaction, TransactionState};

use crate::address_actor::AddressError;
use crate::clients::{AddressClient, OrderClient, ProductClient};
use crate::model::{
    Address, AddressCreate, AddressId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate,
    Product, ProductCreate, ProductFilter, ProductId, ProductUpdate, ShippingAddress, UserId,
};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use actor_framework::ActorClient;
use async_trait::async_trait;

/// Product records and their stock counts.
#[async_trait]
pub trait ProductStore: Clone + Send + Sync + 'static {
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError>;

    /// Fails with `NotFound` when the product does not exist.
    async fn get_by_id(&self, id: ProductId) -> Result<Product, ProductError>;

    /// Batch fetch in id order; unknown ids are silently omitted.
    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError>;

    /// Writes the fields set in `update`, merged against the stored row in one step.
    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError>;

    async fn delete(&self, id: ProductId) -> Result<(), ProductError>;

    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError>;

    /// Indivisible decrement-if-sufficient. Returns the remaining stock.
    async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError>;

    /// Adds units back. Returns the new stock level.
    async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError>;
}

/// Order records.
#[async_trait]
pub trait OrderStore: Clone + Send + Sync + 'static {
    /// Opens the journal that scopes one multi-store operation.
    fn begin_transaction(&self) -> Transaction {
        Transaction::new()
    }

    /// Stores a new `pending` order with its items and returns it.
    async fn create(&self, params: OrderCreate) -> Result<Order, OrderError>;

    /// Fails with `NotFound` when the order does not exist.
    async fn get_by_id(&self, id: OrderId) -> Result<Order, OrderError>;

    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError>;

    /// Every order owned by `user_id`, in creation order.
    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, OrderError>;

    /// One forward status step, checked against the stored status.
    async fn advance(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderError>;

    /// Compare-and-set `pending -> cancelled`.
    async fn cancel(&self, id: OrderId) -> Result<Order, OrderError>;

    /// Compare-and-set `cancelled -> pending`, for compensating a cancel.
    async fn reopen(&self, id: OrderId) -> Result<Order, OrderError>;
}

/// Shipping addresses.
#[async_trait]
pub trait AddressStore: Clone + Send + Sync + 'static {
    async fn create(&self, user_id: UserId, fields: ShippingAddress) -> Result<AddressId, AddressError>;

    async fn get_by_id(&self, id: AddressId) -> Result<Address, AddressError>;

    async fn delete(&self, id: AddressId) -> Result<(), AddressError>;

    async fn list(&self, user_id: UserId) -> Result<Vec<Address>, AddressError>;
}

#[async_trait]
impl ProductStore for ProductClient {
    async fn create(&self, params: ProductCreate) -> Result<Product, ProductError> {
        self.create_product(params).await
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, ProductError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, ProductError> {
        self.fetch_many(ids.to_vec()).await
    }

    async fn update(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        self.update_product(id, update).await
    }

    async fn delete(&self, id: ProductId) -> Result<(), ProductError> {
        self.remove(id).await
    }

    async fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        self.find(filter).await
    }

    async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        ProductClient::reserve_stock(self, id, quantity).await
    }

    async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        ProductClient::release_stock(self, id, quantity).await
    }
}

#[async_trait]
impl OrderStore for OrderClient {
    async fn create(&self, params: OrderCreate) -> Result<Order, OrderError> {
        self.create_order(params).await
    }

    async fn get_by_id(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn update(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        self.update_order(id, update).await
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.list_for_user(user_id).await
    }

    async fn advance(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderError> {
        OrderClient::advance(self, id, to).await
    }

    async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        OrderClient::cancel(self, id).await
    }

    async fn reopen(&self, id: OrderId) -> Result<Order, OrderError> {
        OrderClient::reopen(self, id).await
    }
}

#[async_trait]
impl AddressStore for AddressClient {
    async fn create(&self, user_id: UserId, fields: ShippingAddress) -> Result<AddressId, AddressError> {
        let address = self.create_address(AddressCreate { user_id, fields }).await?;
        Ok(address.id)
    }

    async fn get_by_id(&self, id: AddressId) -> Result<Address, AddressError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| AddressError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: AddressId) -> Result<(), AddressError> {
        self.remove(id).await
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<Address>, AddressError> {
        self.list_for_user(user_id).await
    }
}
