//! Entity trait implementation for the Address domain type.

use super::AddressError;
use crate::model::{Address, AddressCreate, AddressFilter, AddressId};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;

#[async_trait]
impl ActorEntity for Address {
    type Id = AddressId;
    type Create = AddressCreate;
    type Update = (); // Addresses are replaced, not edited
    type Action = ();
    type ActionResult = ();
    type Filter = AddressFilter;
    type Context = ();
    type Error = AddressError;

    fn from_create_params(id: AddressId, params: AddressCreate) -> Result<Self, Self::Error> {
        if let Some(field) = params.fields.first_blank_field() {
            return Err(AddressError::ValidationError(format!("{field} is required")));
        }
        Ok(Self {
            id,
            user_id: params.user_id,
            fields: params.fields,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &AddressFilter) -> bool {
        filter.user_id.map_or(true, |user_id| self.user_id == user_id)
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
