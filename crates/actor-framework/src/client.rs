//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Deadline, Envelope, ResourceRequest, Response};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// The client forwards requests over a Tokio mpsc channel and receives results via
/// oneshot channels. It holds only a sender (plus an optional deadline), so cloning is
/// cheap and clones can be shared across tasks.
///
/// # Deadlines
/// A client built with [`ResourceClient::with_timeout`] stamps every request with a
/// [`Deadline`]. The request fails with [`FrameworkError::Timeout`] if it cannot be queued
/// in time, or if the actor only reaches it after the deadline; in both cases it was not
/// applied. A request the actor picks up before its deadline runs to completion and its
/// real outcome is returned, so `Timeout` never hides a write that happened.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<Envelope<T>>,
    timeout: Option<Duration>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: self.timeout,
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<Envelope<T>>) -> Self {
        Self {
            sender,
            timeout: None,
        }
    }

    /// Returns a client whose requests must be picked up by the actor within `limit`.
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        let deadline = self.timeout.map(Deadline::after);
        let envelope = Envelope::new(build(respond_to), deadline);
        let sent = match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline.at(), self.sender.send(envelope))
                .await
                .map_err(|_| FrameworkError::Timeout(deadline.limit()))?,
            None => self.sender.send(envelope).await,
        };
        sent.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Creates an entity and returns it as stored.
    pub async fn create(&self, params: T::Create) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn get_many(&self, ids: Vec<T::Id>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::GetMany { ids, respond_to })
            .await
    }

    pub async fn list(&self, filter: T::Filter) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
