//! # System Lifecycle
//!
//! Startup and shutdown of the actor system. See [`OrderSystem`].

pub mod order_system;

pub use order_system::{LifecycleError, OrderSystem, StoreOrderService};
