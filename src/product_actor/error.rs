//! Error types for the Product actor.

use crate::model::ProductId;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The requested quantity exceeds the available stock.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product data or quantity provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// Another product already uses this SKU.
    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    /// The actor did not answer within the client's deadline.
    #[error("Product request timed out after {0:?}")]
    Timeout(Duration),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
