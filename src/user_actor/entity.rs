//! Entity trait implementation for the User domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`User`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! Email uniqueness is enforced by the actor through [`ActorEntity::conflicts_with`].

use super::UserError;
use crate::model::{User, UserCreate, UserFilter, UserId, UserUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Filter = UserFilter;
    type Context = ();
    type Error = UserError;

    /// Creates a new User from creation parameters.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        if params.email.is_empty() || !params.email.contains('@') {
            return Err(UserError::ValidationError(format!(
                "invalid email '{}'",
                params.email
            )));
        }
        if params.password_hash.is_empty() {
            return Err(UserError::ValidationError("missing password hash".into()));
        }
        Ok(Self {
            id,
            email: params.email,
            password_hash: params.password_hash,
            first_name: params.first_name,
            last_name: params.last_name,
            role: params.role,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &UserFilter) -> bool {
        filter.email.as_deref().map_or(true, |email| self.email == email)
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.email == other.email).then(|| format!("email {}", self.email))
    }

    /// Handles updates to the User entity.
    ///
    /// # Fields Updated
    /// - `first_name`, `last_name`
    /// - `role`
    async fn on_update(&mut self, update: UserUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
