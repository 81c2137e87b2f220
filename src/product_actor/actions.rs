//! Custom actions for the Product actor.
//!
//! This module defines the domain-specific operations (Actions) that can be performed
//! on a [`Product`](crate::model::Product) entity: reserving and releasing stock. They
//! are handled by [`ActorEntity::handle_action`](actor_framework::ActorEntity::handle_action).

/// Custom actions for Product entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Removes `u32` units from stock if at least that many are available.
    ///
    /// # Errors
    /// Fails with `InsufficientStock`, leaving stock untouched, when the requested amount
    /// exceeds available stock.
    ReserveStock(u32),
    /// Returns `u32` previously reserved units to stock.
    ReleaseStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction.
/// Each carries the stock level after the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductActionResult {
    ReserveStock(u32),
    ReleaseStock(u32),
}
