//! # Actor Framework
//!
//! Building blocks for type-safe, concurrent resource stores. Every kind of resource
//! (users, products, addresses, orders) lives in its own actor, a Tokio task that owns
//! the entities outright and serves a small, uniform set of requests over a channel.
//!
//! ## Resource-Oriented Actors
//!
//! - Uniform lifecycle requests: Create, Get, GetMany, List, Update, Delete
//! - Resource-specific `Action`s for guarded mutations (e.g. "reserve 3 units if in stock")
//! - Isolated state: no shared memory and no locks
//! - Sequential processing per actor, so a check-then-mutate inside one request is atomic
//!
//! Actors never call each other's internals; when one resource needs another (an order
//! checking that its user exists) it goes through that resource's client, injected as the
//! actor's context.
//!
//! **Further Reading**:
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) - domain model, validation and hooks
//! 2. **Runtime** ([`ResourceActor`]) - message loop and storage
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) - typed requests and error mapping
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Tag {
//!     id: u32,
//!     label: String,
//! }
//!
//! #[derive(Debug)] struct TagCreate { label: String }
//! #[derive(Debug)] struct TagUpdate { label: Option<String> }
//! #[derive(Debug)] struct TagFilter { prefix: String }
//! #[derive(Debug, thiserror::Error)]
//! enum TagError {
//!     #[error("label must not be empty")]
//!     EmptyLabel,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Tag {
//!     type Id = u32;
//!     type Create = TagCreate;
//!     type Update = TagUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Filter = TagFilter;
//!     type Context = ();
//!     type Error = TagError;
//!
//!     fn from_create_params(id: u32, params: TagCreate) -> Result<Self, Self::Error> {
//!         if params.label.is_empty() {
//!             return Err(TagError::EmptyLabel);
//!         }
//!         Ok(Self { id, label: params.label })
//!     }
//!
//!     fn matches(&self, filter: &TagFilter) -> bool {
//!         self.label.starts_with(&filter.prefix)
//!     }
//!
//!     fn conflicts_with(&self, other: &Self) -> Option<String> {
//!         (self.label == other.label).then(|| format!("label {}", self.label))
//!     }
//!
//!     async fn on_update(&mut self, update: TagUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(label) = update.label { self.label = label; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Tag>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     client.create(TagCreate { label: "rust".into() }).await.unwrap();
//!     client.create(TagCreate { label: "tokio".into() }).await.unwrap();
//!     assert!(client.create(TagCreate { label: "rust".into() }).await.is_err());
//!
//!     let hits = client.list(TagFilter { prefix: "ru".into() }).await.unwrap();
//!     assert_eq!(hits.len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run()`, not to `new()`. All actors (and therefore all
//! clients) can be created first and wired afterwards, which avoids ordering problems
//! between resources that refer to each other.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Different actors run in **parallel**
//! - A client may carry a deadline ([`ResourceClient::with_timeout`]); the actor refuses
//!   requests it reaches too late, so a timed-out request was never applied
//!
//! ## Testing
//!
//! [`mock::MockClient`] hands out a real `ResourceClient<T>` answered from scripted
//! expectations, for unit tests of client logic and failure paths without a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Deadline, Envelope, ResourceRequest, Response};
