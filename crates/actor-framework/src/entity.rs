//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (users, products,
//! addresses, orders) implements to be managed by the generic `ResourceActor`. It names
//! the associated types for ids, DTOs, actions, query filters, context and errors, and
//! provides the lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! # Provided Methods (Hooks)
//! Several hooks have default implementations:
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::matches`] (every entity matches every filter)
//! - [`ActorEntity::conflicts_with`] (no uniqueness constraints)
//!
//! Override them only when the resource needs the behaviour.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await other actors. The `Context` type is
/// injected into every hook, which lets dependencies be bound when the actor starts
/// (`run(context)`) rather than when it is constructed.
///
/// # Atomicity
/// The actor applies `on_update` and `handle_action` to a copy of the stored entity and
/// only swaps the copy in when the hook succeeds. A hook that returns an error therefore
/// never leaves a half-applied change behind, and because the actor handles one message
/// at a time, a check-then-mutate inside a single hook is indivisible.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for sequential id generation, and ordered so that
    /// listings come back in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Query parameters accepted by `List`.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than one per message: clients match on a single
    /// type, at the cost of every operation nominally being able to return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the id and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity should be included in a `List` with the given filter.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Uniqueness check against another stored entity.
    ///
    /// Returns a description of the clashing key (e.g. `"email alice@example.com"`) when
    /// `self` may not coexist with `other`.
    fn conflicts_with(&self, _other: &Self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called immediately after the entity is created and initialized.
    /// Use this hook to perform validation or side effects (e.g., checking other actors).
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
