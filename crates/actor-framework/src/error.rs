//! # Framework Errors
//!
//! Common error type shared by every actor and client. Entity-specific failures travel
//! boxed inside [`FrameworkError::EntityError`] and are recovered by typed clients with
//! [`FrameworkError::downcast_entity`].

use std::time::Duration;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicting {0}")]
    Conflict(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error carried by [`FrameworkError::EntityError`].
    ///
    /// Returns `Err(self)` unchanged when this is not an entity error or the boxed error
    /// is of another type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(inner) => match inner.downcast::<E>() {
                Ok(typed) => Ok(*typed),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of widgets")]
    struct WidgetError;

    #[test]
    fn test_downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(WidgetError));
        assert_eq!(err.downcast_entity::<WidgetError>().unwrap(), WidgetError);
    }

    #[test]
    fn test_downcast_leaves_other_errors_alone() {
        let err = FrameworkError::NotFound("product_7".into());
        match err.downcast_entity::<WidgetError>() {
            Err(FrameworkError::NotFound(id)) => assert_eq!(id, "product_7"),
            other => panic!("unexpected: {:?}", other),
        }

        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            err.downcast_entity::<WidgetError>(),
            Err(FrameworkError::EntityError(_))
        ));
    }
}
