//! # Services
//!
//! The operations callers actually invoke. Each service is written against the store
//! traits in [`crate::store`] (or a typed client where only one implementation makes
//! sense) and returns [`AppError`](crate::error::AppError).

pub mod order_service;
pub mod product_service;
pub mod user_service;

pub use order_service::OrderService;
pub use product_service::ProductService;
pub use user_service::UserService;
