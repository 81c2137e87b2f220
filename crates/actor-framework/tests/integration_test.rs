use actor_framework::{ActorEntity, FrameworkError, ResourceActor};
use async_trait::async_trait;
use std::time::Duration;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    units: u32,
}

#[derive(Debug)]
struct BinCreate {
    label: String,
    units: u32,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Take(u32),
    Put(u32),
    Stall(Duration),
}

#[derive(Debug)]
struct BinFilter {
    min_units: u32,
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum BinError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("only {available} units left")]
    Short { available: u32 },
}

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Filter = BinFilter;
    type Context = ();
    type Error = BinError;

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(BinError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            units: params.units,
        })
    }

    fn matches(&self, filter: &BinFilter) -> bool {
        self.units >= filter.min_units
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.label == other.label).then(|| format!("label {}", self.label))
    }

    async fn on_update(&mut self, update: BinUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(BinError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BinAction, _ctx: &Self::Context) -> Result<u32, Self::Error> {
        match action {
            BinAction::Take(n) => {
                // Mutate first so a failed action proves the actor discards partial writes.
                let available = self.units;
                self.units = self.units.wrapping_sub(n);
                if n > available {
                    return Err(BinError::Short { available });
                }
                Ok(self.units)
            }
            BinAction::Put(n) => {
                self.units += n;
                Ok(self.units)
            }
            BinAction::Stall(pause) => {
                tokio::time::sleep(pause).await;
                Ok(self.units)
            }
        }
    }
}

fn bin(label: &str, units: u32) -> BinCreate {
    BinCreate {
        label: label.into(),
        units,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let created = client.create(bin("screws", 10)).await.unwrap();
    let id = created.id;
    assert_eq!(id, 1); // First ID should be 1
    assert_eq!(created.units, 10);

    // 2. Action
    let left = client.perform_action(id, BinAction::Take(4)).await.unwrap();
    assert_eq!(left, 6);

    let stored: Bin = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.units, 6);

    // 3. Update
    let updated = client
        .update(id, BinUpdate { label: Some("bolts".into()) })
        .await
        .unwrap();
    assert_eq!(updated.label, "bolts");
    assert_eq!(updated.units, 6);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(client.delete(id).await, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_failed_action_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("washers", 3)).await.unwrap().id;

    let err = client.perform_action(id, BinAction::Take(5)).await.unwrap_err();
    let err = err.downcast_entity::<BinError>().unwrap();
    assert_eq!(err, BinError::Short { available: 3 });

    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.units, 3);
}

#[tokio::test]
async fn test_failed_update_leaves_entity_untouched() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("nails", 1)).await.unwrap().id;
    let result = client.update(id, BinUpdate { label: Some(String::new()) }).await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    assert_eq!(client.get(id).await.unwrap().unwrap().label, "nails");
}

#[tokio::test]
async fn test_create_validation_error_is_reported() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(bin("", 1)).await.unwrap_err();
    assert_eq!(err.downcast_entity::<BinError>().unwrap(), BinError::EmptyLabel);
}

#[tokio::test]
async fn test_uniqueness_conflicts() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.create(bin("rivets", 1)).await.unwrap().id;
    let second = client.create(bin("pins", 1)).await.unwrap().id;

    let dup = client.create(bin("rivets", 7)).await;
    assert!(matches!(dup, Err(FrameworkError::Conflict(ref what)) if what == "label rivets"));

    // Renaming onto an existing label is rejected, renaming to itself is not.
    let clash = client.update(second, BinUpdate { label: Some("rivets".into()) }).await;
    assert!(matches!(clash, Err(FrameworkError::Conflict(_))));
    client
        .update(first, BinUpdate { label: Some("rivets".into()) })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_and_get_many_follow_id_order() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    for (label, units) in [("a", 5), ("b", 0), ("c", 9)] {
        client.create(bin(label, units)).await.unwrap();
    }

    let stocked = client.list(BinFilter { min_units: 1 }).await.unwrap();
    let labels: Vec<&str> = stocked.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["a", "c"]);

    let picked = client.get_many(vec![3, 42, 1, 3]).await.unwrap();
    let ids: Vec<u32> = picked.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 3]);
}

#[tokio::test]
async fn test_concurrent_takes_never_oversell() {
    let (actor, client) = ResourceActor::<Bin>::new(64);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("last-one", 1)).await.unwrap().id;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, BinAction::Take(1)).await
        }));
    }

    let mut won = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            won += 1;
        }
    }
    assert_eq!(won, 1);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}

#[tokio::test]
async fn test_request_picked_up_in_time_runs_to_completion() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("slow", 2)).await.unwrap().id;
    let impatient = client.clone().with_timeout(Duration::from_millis(20));

    // Dequeued immediately, so the stall outlasting the limit does not matter.
    let units = impatient
        .perform_action(id, BinAction::Stall(Duration::from_millis(100)))
        .await
        .unwrap();
    assert_eq!(units, 2);
}

#[tokio::test]
async fn test_request_reached_after_deadline_is_not_applied() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(bin("queued", 2)).await.unwrap().id;
    let impatient = client.clone().with_timeout(Duration::from_millis(20));

    // Keep the actor busy so the impatient request waits in the queue past its deadline.
    let busy = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .perform_action(id, BinAction::Stall(Duration::from_millis(200)))
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let result = impatient.perform_action(id, BinAction::Take(1)).await;
    assert!(matches!(result, Err(FrameworkError::Timeout(limit)) if limit == Duration::from_millis(20)));

    busy.await.unwrap().unwrap();
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 2);

    // The actor is still healthy afterwards.
    assert_eq!(client.perform_action(id, BinAction::Put(1)).await.unwrap(), 3);
}

#[tokio::test]
async fn test_closed_actor_reports_closed() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    drop(actor);

    assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
}
