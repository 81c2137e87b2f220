//! # Address Actor
//!
//! Stores the shipping addresses users supply at checkout. Each placement writes a new
//! address; a failed placement deletes it again as part of its rollback.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::AddressClient;
use crate::config::ActorSettings;
use crate::model::Address;
use actor_framework::ResourceActor;

/// Creates a new Address actor and its client.
pub fn new(settings: ActorSettings) -> (ResourceActor<Address>, AddressClient) {
    let (actor, generic_client) = ResourceActor::new(settings.buffer_size);
    let client = AddressClient::new(settings.apply(generic_client));
    (actor, client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AddressCreate, ShippingAddress, UserId};

    fn home() -> ShippingAddress {
        ShippingAddress {
            street: "1 Main St".into(),
            city: "Springfield".into(),
            state: "IL".into(),
            country: "US".into(),
            postal_code: "62701".into(),
            is_default: true,
        }
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        let mut fields = home();
        fields.city = "  ".into();
        let err = client
            .create_address(AddressCreate {
                user_id: UserId(1),
                fields,
            })
            .await
            .unwrap_err();
        assert_eq!(err, AddressError::ValidationError("city is required".into()));
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let (actor, client) = new(ActorSettings::default());
        tokio::spawn(actor.run(()));

        for user in [1, 2, 1] {
            client
                .create_address(AddressCreate {
                    user_id: UserId(user),
                    fields: home(),
                })
                .await
                .unwrap();
        }

        let mine = client.list_for_user(UserId(1)).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|a| a.user_id == UserId(1)));
    }
}
