//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes domain‑specific methods.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::Conflict(what)) => ProductError::DuplicateSku(what),
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => ProductError::Timeout(limit),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Applies the set fields of `update` inside the actor; returns the stored product.
    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Atomically take `quantity` units if available.
    ///
    /// Returns the remaining stock, or `InsufficientStock` with nothing changed.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReserveStock(remaining) => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Return `quantity` units to stock. Returns the new level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units for product {}", quantity, id);
        match self
            .inner
            .perform_action(id, ProductAction::ReleaseStock(quantity))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::ReleaseStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_action, MockClient};
    use std::time::Duration;

    #[tokio::test]
    async fn test_reserve_stock_success() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 5).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::ReserveStock(5));

        responder
            .send(Ok(ProductActionResult::ReserveStock(7)))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_reserve_stock_insufficient_stock_is_typed() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let reserve_task =
            tokio::spawn(async move { product_client.reserve_stock(ProductId(1), 100).await });

        let (_, _, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    product_id: ProductId(1),
                    requested: 100,
                    available: 3,
                },
            ))))
            .unwrap();

        let result = reserve_task.await.unwrap();
        assert_eq!(
            result,
            Err(ProductError::InsufficientStock {
                product_id: ProductId(1),
                requested: 100,
                available: 3,
            })
        );
    }

    #[tokio::test]
    async fn test_framework_errors_are_mapped() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_create()
            .return_err(FrameworkError::Conflict("sku LAMP-1".into()));
        mock.expect_action(ProductId(4))
            .return_err(FrameworkError::NotFound("product_4".into()));
        mock.expect_action(ProductId(5))
            .return_err(FrameworkError::Timeout(Duration::from_millis(50)));
        mock.expect_action(ProductId(6))
            .return_err(FrameworkError::ActorClosed);

        let client = ProductClient::new(mock.client());

        let created = client.create_product(ProductCreate::default()).await;
        assert_eq!(created, Err(ProductError::DuplicateSku("sku LAMP-1".into())));

        let missing = client.release_stock(ProductId(4), 1).await;
        assert_eq!(missing, Err(ProductError::NotFound("product_4".into())));

        let slow = client.reserve_stock(ProductId(5), 1).await;
        assert_eq!(slow, Err(ProductError::Timeout(Duration::from_millis(50))));

        let closed = client.reserve_stock(ProductId(6), 1).await;
        assert!(matches!(closed, Err(ProductError::ActorCommunicationError(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_action_result_is_an_error() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReleaseStock(3));

        let client = ProductClient::new(mock.client());
        let result = client.reserve_stock(ProductId(1), 1).await;
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
