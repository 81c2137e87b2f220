//! # Storefront
//!
//! > **An e-commerce backend on resource-oriented actors.**
//!
//! Users, products, shipping addresses and orders each live in their own
//! [`ResourceActor`](actor_framework::ResourceActor). The services on top implement
//! registration and login, catalog management, and the one workflow that spans several
//! resources: placing and cancelling orders.
//!
//! ## Architecture Notes
//!
//! ### 1. Stock is never read-then-written
//! A product's stock only changes through the Product actor's `ReserveStock` and
//! `ReleaseStock` actions. The actor handles one message at a time, so
//! decrement-if-sufficient is a single indivisible step and concurrent checkouts
//! cannot oversell.
//!
//! ### 2. Multi-store operations are compensated, not locked
//! Actors share no transaction log. [`store::Transaction`] journals an undo for every
//! step of a placement or cancellation and replays them on failure, including when the
//! caller's future is dropped mid-way.
//!
//! ### 3. Type-Safe Error Handling
//! Each actor defines its own error enum (`UserError`, `ProductError`, ...). Services
//! fold them into [`error::AppError`], which is what callers match on.
//!
//! ### 4. Observability
//! `tracing` everywhere: actors log every operation with an `entity_type` field, and
//! clients and services open `#[instrument]` spans.
//!
//! ## Module Tour
//!
//! - **[`model`]**: plain data: entities, their create/update payloads, filters, money helpers.
//! - **[`user_actor`], [`product_actor`], [`address_actor`], [`order_actor`]**: the
//!   [`ActorEntity`](actor_framework::ActorEntity) implementations.
//! - **[`clients`]**: typed wrappers around `ResourceClient`.
//! - **[`store`]**: the store traits the order workflow is written against, and
//!   [`Transaction`](store::Transaction).
//! - **[`services`]**: [`OrderService`](services::OrderService),
//!   [`UserService`](services::UserService), [`ProductService`](services::ProductService).
//! - **[`auth`]**: Argon2id password hashing and HS256 tokens.
//! - **[`config`]**, **[`lifecycle`]**: environment settings and the
//!   [`OrderSystem`](lifecycle::OrderSystem) that wires everything together.
//!
//! ### Running the Demo
//!
//! ```bash
//! JWT_SECRET=dev RUST_LOG=info cargo run
//! ```

pub mod address_actor;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
pub mod store;
pub mod user_actor;
