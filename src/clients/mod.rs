//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client implements [`ActorClient`](actor_framework::ActorClient) for the generic
//! reads and deletes, adds the resource-specific calls, and turns
//! [`FrameworkError`](actor_framework::FrameworkError)s back into the resource's own
//! error type.

pub mod address_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use address_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
