//! # Address Client
//!
//! Wraps a `ResourceClient<Address>`.
use crate::address_actor::AddressError;
use crate::model::{Address, AddressCreate, AddressFilter, UserId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct AddressClient {
    inner: ResourceClient<Address>,
}

impl AddressClient {
    pub fn new(inner: ResourceClient<Address>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_address(&self, params: AddressCreate) -> Result<Address, AddressError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Address>, AddressError> {
        self.find(AddressFilter {
            user_id: Some(user_id),
        })
        .await
    }
}

#[async_trait]
impl ActorClient<Address> for AddressClient {
    type Error = AddressError;

    fn inner(&self) -> &ResourceClient<Address> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<AddressError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AddressError::NotFound(id),
            Err(FrameworkError::Timeout(limit)) => AddressError::Timeout(limit),
            Err(other) => AddressError::ActorCommunicationError(other.to_string()),
        }
    }
}
