//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns the state of one kind
//! of entity. It implements the "Server" side of the Actor Model, processing messages
//! sequentially and ensuring exclusive access to the entity store.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Deadline, Envelope, ResourceRequest};
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel.
///
/// **Concurrency Model**:
/// Each `ResourceActor` processes its own messages *sequentially* in a loop, so the store
/// needs no `Mutex` or `RwLock`. Many clients may send concurrently; the channel
/// serializes them. This is what makes a guarded mutation such as "decrement stock if
/// sufficient" indivisible: the check and the write happen inside one message.
///
/// A request whose [`Deadline`] has passed by the time it is dequeued is answered with
/// `FrameworkError::Timeout` and never applied.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the actor's run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u64 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] struct CounterUpdate(u64);
/// #[derive(Debug)] enum CounterAction { Increment }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = u64;
///     type Filter = ();
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: 0 })
///     }
///     async fn on_update(&mut self, update: CounterUpdate, _: &()) -> Result<(), Self::Error> {
///         self.value = update.0;
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u64, Self::Error> {
///         self.value += 1;
///         Ok(self.value)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let counter = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(counter.id, CounterAction::Increment).await.unwrap(), 1);
/// }
/// ```
///
/// # Implementation Details
///
/// The store is a `BTreeMap` keyed by id. Ids come from a `u32` counter starting at 1,
/// so iteration order is creation order.
///
/// * **Expired**: reject with `Timeout` before any hook runs.
/// * **Create**: allocate id, `from_create_params`, `on_create`, uniqueness check, insert,
///   answer with a copy of the stored entity.
/// * **Get / GetMany / List**: clone matching entities out of the store.
/// * **Update / Action**: run the hook on a copy, check uniqueness, swap the copy in.
/// * **Delete**: `on_delete`, then remove.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<Envelope<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Describes the first stored entity (other than `skip`) that `candidate` clashes with.
    fn find_conflict(&self, skip: Option<&T::Id>, candidate: &T) -> Option<String> {
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != skip)
            .find_map(|(_, existing)| candidate.conflicts_with(existing))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Product" instead of "storefront::model::product::Product")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(Envelope { request, deadline }) = self.receiver.recv().await {
            if let Some(deadline) = deadline.filter(Deadline::has_passed) {
                warn!(entity_type, request = request.kind(), limit = ?deadline.limit(), "Deadline passed before processing");
                request.reject(FrameworkError::Timeout(deadline.limit()));
                continue;
            }
            match request {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(conflict) = self.find_conflict(None, &item) {
                        warn!(entity_type, %conflict, "Create rejected");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(conflict)));
                        continue;
                    }
                    self.store.insert(id.clone(), item.clone());
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::GetMany { ids, respond_to } => {
                    let wanted: BTreeSet<T::Id> = ids.into_iter().collect();
                    let items: Vec<T> = wanted
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, requested = wanted.len(), found = items.len(), "GetMany");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, found = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let mut candidate = match self.store.get(&id) {
                        Some(current) => current.clone(),
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                            continue;
                        }
                    };
                    if let Err(e) = candidate.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(conflict) = self.find_conflict(Some(&id), &candidate) {
                        warn!(entity_type, %id, %conflict, "Update rejected");
                        let _ = respond_to.send(Err(FrameworkError::Conflict(conflict)));
                        continue;
                    }
                    self.store.insert(id.clone(), candidate.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(candidate));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let mut candidate = match self.store.get(&id) {
                        Some(current) => current.clone(),
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                            continue;
                        }
                    };
                    match candidate.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), candidate);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
