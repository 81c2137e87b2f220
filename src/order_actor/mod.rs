//! # Order Actor
//!
//! Order records and their status machine.
//!
//! ## Overview
//!
//! Orders are created already priced: the workflow in
//! [`OrderService`](crate::services::OrderService) freezes item prices and reserves stock
//! before asking this actor to store the order. What the actor owns is the status:
//!
//! ```text
//! pending -> confirmed -> shipped -> delivered
//! pending -> cancelled
//! ```
//!
//! Each transition is an [`OrderAction`] that checks and writes the status in one
//! message, so two concurrent cancels of the same order cannot both succeed.
//!
//! ## Dependencies
//!
//! `Context = UserClient`: `on_create` verifies the owning user exists.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::config::ActorSettings;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
///
/// The actor must be started with a [`UserClient`](crate::clients::UserClient) as its
/// context.
pub fn new(settings: ActorSettings) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(settings.buffer_size);
    let client = OrderClient::new(settings.apply(generic_client));
    (actor, client)
}
