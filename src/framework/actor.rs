//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the server half of the actor pattern. It owns an
//! append-only store of records and processes requests one at a time, so the store needs no
//! lock of its own.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of append-only records.
///
/// # Concurrency Model
/// Every `ResourceActor` runs in its own Tokio task and drains its mailbox sequentially.
/// Many callers may hold clones of the [`ResourceClient`]; their requests are serialized by
/// the channel, which is all the synchronization an insert-and-read store needs.
///
/// # Storage
/// Records live in a `Vec` in insertion order with a `HashMap` index from ID to position.
/// `List` therefore returns records in the order they were created, and `Get` stays O(1).
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(capacity, id_generator)` returns the actor and its client.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Use**: clone the client wherever it is needed. Dropping every clone stops the actor.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    records: Vec<T>,
    index: HashMap<T::Id, usize>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - capacity of the mailbox. When it is full, callers wait for space.
    /// * `next_id_fn` - generator for record identifiers. It must never repeat a value.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: Vec::new(),
            index: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self) {
        // Short type name, e.g. "Booking" instead of "ticket_reservation::model::booking::Booking"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    if self.index.contains_key(&id) {
                        warn!(entity_type, %id, "Generated duplicate id");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(
                            format!("duplicate id {id}").into(),
                        )));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.index.insert(id.clone(), self.records.len());
                            self.records.push(item);
                            info!(entity_type, %id, size = self.records.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.index.get(&id).map(|&pos| self.records[pos].clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self.records.iter().filter(|r| filter(*r)).cloned().collect();
                    debug!(entity_type, matched = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        author: String,
        body: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        author: String,
        body: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("empty note")]
    struct EmptyNote;

    impl ActorEntity for Note {
        type Id = String;
        type Create = NoteCreate;
        type Error = EmptyNote;

        fn from_create_params(id: String, params: NoteCreate) -> Result<Self, EmptyNote> {
            if params.body.is_empty() {
                return Err(EmptyNote);
            }
            Ok(Self {
                id,
                author: params.author,
                body: params.body,
            })
        }
    }

    fn note(author: &str, body: &str) -> NoteCreate {
        NoteCreate {
            author: author.into(),
            body: body.into(),
        }
    }

    #[tokio::test]
    async fn test_create_get_and_list_in_insertion_order() {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("note_{}", counter.fetch_add(1, Ordering::SeqCst));

        let (actor, client) = ResourceActor::<Note>::new(10, next_id);
        let handle = tokio::spawn(actor.run());

        let first = client.create(note("alice", "one")).await.unwrap();
        let _ = client.create(note("bob", "two")).await.unwrap();
        let third = client.create(note("alice", "three")).await.unwrap();
        assert_eq!(first, "note_1");

        let fetched = client.get(third.clone()).await.unwrap().unwrap();
        assert_eq!(fetched.body, "three");
        assert!(client.get("note_99".into()).await.unwrap().is_none());

        let alice = client
            .list(Box::new(|n: &Note| n.author == "alice"))
            .await
            .unwrap();
        let bodies: Vec<_> = alice.iter().map(|n| n.body.as_str()).collect();
        assert_eq!(bodies, ["one", "three"]);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_create_is_not_stored() {
        let (actor, client) = ResourceActor::<Note>::new(10, || "fixed".to_string());
        tokio::spawn(actor.run());

        let err = client.create(note("alice", "")).await.unwrap_err();
        assert!(matches!(err, FrameworkError::EntityError(_)));
        assert!(client.list(Box::new(|_: &Note| true)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_generated_id_is_refused() {
        let (actor, client) = ResourceActor::<Note>::new(10, || "fixed".to_string());
        tokio::spawn(actor.run());

        client.create(note("alice", "one")).await.unwrap();
        let err = client.create(note("bob", "two")).await.unwrap_err();
        assert!(err.to_string().contains("duplicate id fixed"));

        let all = client.list(Box::new(|_: &Note| true)).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].author, "alice");
    }
}
