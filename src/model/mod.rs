//! Pure data structures (DTOs) implementing the [`ActorEntity`](actor_framework::ActorEntity) trait.

pub mod address;
pub mod order;
pub mod page;
pub mod product;
pub mod user;

pub use address::*;
pub use order::*;
pub use page::*;
pub use product::*;
pub use user::*;
