//! # Service Errors
//!
//! [`AppError`] is what the services return. Actor errors are folded into it by the
//! `From` impls below; anything that is a failure of the storage machinery itself
//! (closed actor, dropped reply, failed compensation) becomes [`AppError::Storage`],
//! which displays a generic message and keeps the cause as its `source`.

use crate::address_actor::AddressError;
use crate::model::{OrderStatus, ProductId};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("cannot move order from {from} to {to}")]
    InvalidState { from: OrderStatus, to: OrderStatus },

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("email already registered: {0}")]
    EmailExists(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("conflict: {0}")]
    Conflict(String),

    /// A store call ran past its deadline before the store started on it; nothing was applied.
    #[error("request canceled after {0:?}")]
    Canceled(Duration),

    #[error("storage error")]
    Storage(#[source] BoxError),
}

impl AppError {
    /// Wraps a storage failure, logging the cause since callers only see a generic message.
    pub fn storage(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        error!(error = %source, "storage failure");
        AppError::Storage(source)
    }

    /// Conventional HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::InvalidInput(_)
            | AppError::ProductNotFound(_)
            | AppError::InsufficientStock { .. }
            | AppError::InvalidState { .. } => 400,
            AppError::Unauthorized | AppError::InvalidCredentials => 401,
            AppError::Forbidden => 403,
            AppError::NotFound(_) => 404,
            AppError::EmailExists(_) | AppError::Conflict(_) => 409,
            AppError::Canceled(_) => 504,
            AppError::Storage(_) => 500,
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(id),
            ProductError::InsufficientStock {
                product_id,
                requested,
                available,
            } => AppError::InsufficientStock {
                product_id,
                requested,
                available,
            },
            ProductError::ValidationError(msg) => AppError::InvalidInput(msg),
            ProductError::DuplicateSku(what) => AppError::Conflict(what),
            ProductError::Timeout(limit) => AppError::Canceled(limit),
            other @ ProductError::ActorCommunicationError(_) => AppError::storage(other),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(id),
            OrderError::InvalidTransition { from, to } => AppError::InvalidState { from, to },
            OrderError::InvalidUser(id) => AppError::InvalidInput(format!("unknown user {id}")),
            OrderError::ValidationError(msg) => AppError::InvalidInput(msg),
            OrderError::Timeout(limit) => AppError::Canceled(limit),
            other @ OrderError::ActorCommunicationError(_) => AppError::storage(other),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(id),
            UserError::AlreadyExists(what) => AppError::EmailExists(what),
            UserError::ValidationError(msg) => AppError::InvalidInput(msg),
            UserError::Timeout(limit) => AppError::Canceled(limit),
            other @ UserError::ActorCommunicationError(_) => AppError::storage(other),
        }
    }
}

impl From<AddressError> for AppError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::NotFound(id) => AppError::NotFound(id),
            AddressError::ValidationError(msg) => AppError::InvalidInput(msg),
            AddressError::Timeout(limit) => AppError::Canceled(limit),
            other @ AddressError::ActorCommunicationError(_) => AppError::storage(other),
        }
    }
}
