//! # Resource Actor
//!
//! The in-process service that owns the records of one resource kind.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::client::ResourceClient;
use super::message::ResourceRequest;
use crate::entity::Entity;
use crate::mutation::{MutationError, MutationResult};

/// Owns every record of kind `T` and answers requests one at a time.
///
/// **Concurrency Model**:
/// The actor runs in its own task and drains its channel sequentially, so the
/// `store` needs no lock. Many clients may hold a sender; the actor stops once
/// the last one is dropped.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<String, T>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Pre-load records, keyed by their own identifier.
    pub fn with_records(mut self, records: impl IntoIterator<Item = T>) -> Self {
        for record in records {
            self.store.insert(record.entity_id().to_string(), record);
        }
        self
    }

    /// Runs the message loop until every client is gone.
    pub async fn run(mut self) {
        let entity_kind = T::KIND;
        info!(entity_kind, size = self.store.len(), "Service started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { input, respond_to } => {
                    debug!(entity_kind, ?input, "Create");
                    let id = (self.next_id_fn)();
                    match T::from_input(id.clone(), input) {
                        Ok(record) => {
                            self.store.insert(id.clone(), record.clone());
                            info!(entity_kind, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(record));
                        }
                        Err(e) => {
                            warn!(entity_kind, error = %e, "Create failed");
                            let _ = respond_to.send(Err(MutationError::Validation(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let record = self.store.get(&id).cloned();
                    debug!(entity_kind, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                ResourceRequest::List { respond_to } => {
                    let mut records: Vec<T> = self.store.values().cloned().collect();
                    records.sort_by(|a, b| a.entity_id().cmp(b.entity_id()));
                    debug!(entity_kind, size = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                ResourceRequest::Update { id, input, respond_to } => {
                    debug!(entity_kind, %id, ?input, "Update");
                    let Some(record) = self.store.get_mut(&id) else {
                        warn!(entity_kind, %id, "Not found");
                        let _ = respond_to.send(Err(MutationError::NotFound(id)));
                        continue;
                    };
                    // Work on a copy so a rejected payload leaves the stored record intact.
                    let mut updated = record.clone();
                    match updated.apply(input) {
                        Ok(()) => {
                            *record = updated.clone();
                            info!(entity_kind, %id, "Updated");
                            let _ = respond_to.send(Ok(MutationResult::with_data(updated)));
                        }
                        Err(e) => {
                            warn!(entity_kind, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(MutationError::Validation(e)));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_kind, %id, "Delete");
                    if self.store.remove(&id).is_some() {
                        info!(entity_kind, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_kind, %id, "Not found");
                        let _ = respond_to.send(Err(MutationError::NotFound(id)));
                    }
                }
            }
        }

        info!(entity_kind, size = self.store.len(), "Shutdown");
    }
}
