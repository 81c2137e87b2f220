//! Entity trait implementation for the Order domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Order`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! The Order actor depends on the User actor: its context is a [`UserClient`], used by
//! `on_create` to check that the owning user exists.

use super::actions::OrderAction;
use super::OrderError;
use crate::clients::UserClient;
use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, OrderUpdate, PaymentStatus};
use crate::user_actor::UserError;
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

impl Order {
    fn transition(&mut self, to: OrderStatus, allowed: bool) -> Result<Order, OrderError> {
        if !allowed {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = Utc::now();
        Ok(self.clone())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Filter = OrderFilter;
    type Context = UserClient;
    type Error = OrderError;

    /// Creates a new `pending` Order from creation parameters.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".into()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be at least 1",
                item.product_id
            )));
        }
        if params.payment_method.trim().is_empty() {
            return Err(OrderError::ValidationError("payment method is required".into()));
        }
        let now = Utc::now();
        Ok(Self {
            id,
            user_id: params.user_id,
            status: OrderStatus::Pending,
            total: params.total,
            items: params.items,
            shipping_address_id: params.shipping_address_id,
            payment_status: PaymentStatus::Pending,
            payment_method: params.payment_method,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rejects orders whose user does not exist.
    async fn on_create(&mut self, users: &UserClient) -> Result<(), Self::Error> {
        debug!(user_id = %self.user_id, "Validating order owner");
        match users.fetch(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::InvalidUser(self.user_id.to_string())),
            Err(UserError::Timeout(limit)) => Err(OrderError::Timeout(limit)),
            Err(e) => Err(OrderError::ActorCommunicationError(e.to_string())),
        }
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        filter.user_id.map_or(true, |user_id| self.user_id == user_id)
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if let Some(payment_status) = update.payment_status {
            self.payment_status = payment_status;
        }
        if let Some(address_id) = update.shipping_address_id {
            self.shipping_address_id = address_id;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies a status change and returns the order as stored afterwards.
    async fn handle_action(&mut self, action: OrderAction, _ctx: &Self::Context) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Advance(to) => {
                let allowed = self.status.can_advance_to(to);
                self.transition(to, allowed)
            }
            OrderAction::Cancel => {
                let allowed = self.status == OrderStatus::Pending;
                self.transition(OrderStatus::Cancelled, allowed)
            }
            OrderAction::Reopen => {
                let allowed = self.status == OrderStatus::Cancelled;
                self.transition(OrderStatus::Pending, allowed)
            }
        }
    }
}
