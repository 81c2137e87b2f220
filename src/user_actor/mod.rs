//! # User Actor
//!
//! This module implements the User resource actor, managing registered accounts.
//!
//! ## Overview
//!
//! The User actor has no dependencies and no custom actions. Its one piece of business
//! logic is email uniqueness, which the actor checks inside its message loop so two
//! concurrent registrations with the same address cannot both succeed.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`User`]
//! - [`error`] - [`UserError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use storefront::config::ActorSettings;
//! use storefront::model::{Role, UserCreate};
//! use storefront::user_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(ActorSettings::default());
//!     tokio::spawn(actor.run(()));
//!
//!     let params = UserCreate {
//!         email: "alice@example.com".to_string(),
//!         password_hash: "$argon2id$placeholder".to_string(),
//!         first_name: "Alice".to_string(),
//!         last_name: "Liddell".to_string(),
//!         role: Role::User,
//!     };
//!     let user = client.create_user(params).await?;
//!     assert_eq!(user.id.to_string(), "user_1");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::config::ActorSettings;
use crate::model::User;
use actor_framework::ResourceActor;

/// Creates a new User actor and its client.
pub fn new(settings: ActorSettings) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(settings.buffer_size);
    let client = UserClient::new(settings.apply(generic_client));
    (actor, client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, UserCreate, UserUpdate};
    use actor_framework::ActorClient;

    fn signup(email: &str) -> UserCreate {
        UserCreate {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        client.create_user(signup("dup@example.com")).await.unwrap();
        let err = client.create_user(signup("dup@example.com")).await.unwrap_err();
        assert!(matches!(err, UserError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        client.create_user(signup("a@example.com")).await.unwrap();
        let id = client.create_user(signup("b@example.com")).await.unwrap().id;

        let found = client.find_by_email("b@example.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(id));
        assert!(client.find_by_email("c@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_invalid_email() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let err = client.create_user(signup("not-an-email")).await.unwrap_err();
        assert!(matches!(err, UserError::ValidationError(_)));

        let id = client.create_user(signup("admin@example.com")).await.unwrap().id;
        let updated = client
            .update_user(
                id,
                UserUpdate {
                    role: Some(Role::Admin),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.is_admin());
        assert!(client.fetch(id).await.unwrap().unwrap().is_admin());
    }
}
