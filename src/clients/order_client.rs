//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`; every status change is a single actor action.
use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate, UserId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Owner validation happens in the Order actor's `on_create` hook.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id, lines = params.items.len()))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "create_order called");
        let order = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %order.id, "Order stored");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.find(OrderFilter::for_user(user_id)).await
    }

    /// Forward status step; fails with `InvalidTransition` for anything else.
    #[instrument(skip(self))]
    pub async fn advance(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Advance(to)).await
    }

    /// Compare-and-set `pending -> cancelled`.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Cancel).await
    }

    /// Compare-and-set `cancelled -> pending`.
    #[instrument(skip(self))]
    pub async fn reopen(&self, id: OrderId) -> Result<Order, OrderError> {
        self.act(id, OrderAction::Reopen).await
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => OrderError::Timeout(limit),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
