//! Error types for the Address actor.

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("Address validation error: {0}")]
    ValidationError(String),

    #[error("Address request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
