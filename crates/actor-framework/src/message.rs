//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Each actor manages one type of resource (the [`ActorEntity`]). Instead of ad-hoc
/// messages per operation, requests are standardized around the lifecycle operations that
/// apply to almost any persistent resource, plus a custom `Action` escape hatch.
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource and answers
///   with the stored entity.
/// - **Get**: Fetches the current state of one resource by id.
/// - **GetMany**: Batch fetch; unknown ids are omitted from the result.
/// - **List**: All resources matching an [`ActorEntity::Filter`], in id order.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: Removes the resource.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
///
/// Because the enum is generic over `T: ActorEntity`, a product payload can never be
/// sent to the user actor.
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    GetMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// The operation name, for logs and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "Create",
            ResourceRequest::Get { .. } => "Get",
            ResourceRequest::GetMany { .. } => "GetMany",
            ResourceRequest::List { .. } => "List",
            ResourceRequest::Update { .. } => "Update",
            ResourceRequest::Delete { .. } => "Delete",
            ResourceRequest::Action { .. } => "Action",
        }
    }

    /// Answers the request with `error` without touching any entity.
    pub fn reject(self, error: FrameworkError) {
        match self {
            ResourceRequest::Create { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::Get { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::GetMany { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::List { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::Update { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::Delete { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
            ResourceRequest::Action { respond_to, .. } => {
                let _ = respond_to.send(Err(error));
            }
        }
    }
}

// Written by hand: the entity itself need not be `Debug`, only the payloads.
impl<T: ActorEntity> fmt::Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.kind());
        match self {
            ResourceRequest::Create { params, .. } => out.field("params", params),
            ResourceRequest::Get { id, .. } | ResourceRequest::Delete { id, .. } => {
                out.field("id", id)
            }
            ResourceRequest::GetMany { ids, .. } => out.field("ids", ids),
            ResourceRequest::List { filter, .. } => out.field("filter", filter),
            ResourceRequest::Update { id, update, .. } => out.field("id", id).field("update", update),
            ResourceRequest::Action { id, action, .. } => out.field("id", id).field("action", action),
        };
        out.finish_non_exhaustive()
    }
}

/// The point in time after which an actor must not start work on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
    limit: Duration,
}

impl Deadline {
    /// A deadline `limit` from now.
    pub fn after(limit: Duration) -> Self {
        Self {
            at: Instant::now() + limit,
            limit,
        }
    }

    pub fn at(&self) -> Instant {
        self.at
    }

    /// The budget the deadline was created with, reported in `FrameworkError::Timeout`.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.at
    }
}

/// What actually travels over the actor's channel: a request and its optional deadline.
pub struct Envelope<T: ActorEntity> {
    pub request: ResourceRequest<T>,
    pub deadline: Option<Deadline>,
}

impl<T: ActorEntity> Envelope<T> {
    pub fn new(request: ResourceRequest<T>, deadline: Option<Deadline>) -> Self {
        Self { request, deadline }
    }
}
