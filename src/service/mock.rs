//! # Mock Service & Testing Guide
//!
//! `MockService<T>` stands in for a [`ResourceActor`](super::ResourceActor):
//! it hands out a real [`ResourceClient<T>`] but answers every request from a
//! queue of expectations instead of a record store. Use it to test code
//! *around* the client (most notably the
//! [`ResourceActionControl`](crate::control::ResourceActionControl)) without
//! any service state.
//!
//! | Feature | MockService | ResourceActor |
//! |---------|-------------|---------------|
//! | **State** | None (expectations) | Real record store |
//! | **Error Injection** | Easy (`return_err`) | Needs a crafted payload |
//! | **Use Case** | Control logic, failure paths | End-to-end flows |
//!
//! ```rust
//! use admin_console::control::ResourceActionControl;
//! use admin_console::model::CustomDashboard;
//! use admin_console::service::mock::MockService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockService::<CustomDashboard>::new();
//!     mock.expect_delete("42").return_ok();
//!
//!     let control = ResourceActionControl::new(CustomDashboard::new("42", "Foo"), mock.client());
//!     control.open_delete().unwrap();
//!     control.submit_delete().unwrap().outcome().await;
//!
//!     mock.verify();
//! }
//! ```
//!
//! When a test needs to hold a response back (to look at the control while a
//! mutation is in flight), use [`create_mock_client`] and answer by hand with
//! [`expect_update`] / [`expect_delete`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};

use super::client::ResourceClient;
use super::message::ResourceRequest;
use crate::entity::Entity;
use crate::mutation::{MutationError, MutationResult};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give.
enum Expectation<T: Entity> {
    Get {
        id: String,
        response: Result<Option<T>, MutationError>,
    },
    Update {
        id: String,
        response: Result<MutationResult<T>, MutationError>,
    },
    Delete {
        id: String,
        response: Result<(), MutationError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: Entity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock service with expectation tracking.
///
/// Expectations are consumed in order. A request that does not match the next
/// expectation (wrong operation or wrong id) is recorded as a mismatch and its
/// response channel is dropped, so the caller sees
/// [`MutationError::ServiceDropped`]. [`verify`](Self::verify) fails on any
/// mismatch or leftover expectation.
pub struct MockService<T: Entity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    received: Arc<AtomicUsize>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Entity> MockService<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(AtomicUsize::new(0));
        let mismatches = Arc::new(Mutex::new(Vec::new()));

        let queue = expectations.clone();
        let counter = received.clone();
        let errors = mismatches.clone();
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response }))
                        if id == expected =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: expected, response }))
                        if id == expected =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: expected, response }))
                        if id == expected =>
                    {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let message = format!(
                            "unexpected {} (expected {})",
                            describe_request(&request),
                            expectation.as_ref().map_or("nothing".to_string(), describe_expectation),
                        );
                        tracing::warn!(%message, "Mock mismatch");
                        errors.lock().unwrap_or_else(PoisonError::into_inner).push(message);
                        // Dropping the request closes its response channel.
                        drop(request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            received,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Number of requests the mock has received so far.
    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    pub fn expect_get(&mut self, id: impl Into<String>) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_update(&mut self, id: impl Into<String>) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: impl Into<String>) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if an expectation is left over or a request did not match.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap_or_else(PoisonError::into_inner);
        if !mismatches.is_empty() {
            panic!("Mock received unexpected requests: {:?}", *mismatches);
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: Entity> Default for MockService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_request<T: Entity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { .. } => "create".to_string(),
        ResourceRequest::Get { id, .. } => format!("get({id})"),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, .. } => format!("update({id})"),
        ResourceRequest::Delete { id, .. } => format!("delete({id})"),
    }
}

fn describe_expectation<T: Entity>(expectation: &Expectation<T>) -> String {
    match expectation {
        Expectation::Get { id, .. } => format!("get({id})"),
        Expectation::Update { id, .. } => format!("update({id})"),
        Expectation::Delete { id, .. } => format!("delete({id})"),
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: Entity> {
    id: String,
    expectations: Queue<T>,
}

impl<T: Entity> GetExpectationBuilder<T> {
    pub fn return_ok(self, record: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(record),
        });
    }

    pub fn return_err(self, error: MutationError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: Entity> {
    id: String,
    expectations: Queue<T>,
}

impl<T: Entity> UpdateExpectationBuilder<T> {
    /// Answer with the canonical record.
    pub fn return_ok(self, record: T) {
        self.return_result(MutationResult::with_data(record));
    }

    /// Answer with an arbitrary result, e.g. one without `data`.
    pub fn return_result(self, result: MutationResult<T>) {
        lock(&self.expectations).push_back(Expectation::Update {
            id: self.id,
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: MutationError) {
        lock(&self.expectations).push_back(Expectation::Update {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: Entity> {
    id: String,
    expectations: Queue<T>,
}

impl<T: Entity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        lock(&self.expectations).push_back(Expectation::Delete {
            id: self.id,
            response: Ok(()),
        });
    }

    pub fn return_err(self, error: MutationError) {
        lock(&self.expectations).push_back(Expectation::Delete {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the service: it pulls requests with [`expect_update`] or
/// [`expect_delete`] and decides when (and whether) to answer.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an update.
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, T::Input, oneshot::Sender<Result<MutationResult<T>, MutationError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, input, respond_to }) => Some((id, input, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a delete.
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(String, oneshot::Sender<Result<(), MutationError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Tag, TagInput};

    fn input(name: &str) -> TagInput {
        TagInput {
            tag_name: name.to_string(),
            tag_color: "#ff0000".to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tag>(10);

        let update_task = tokio::spawn(async move { client.update("t1", input("red")).await });

        let (id, payload, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, "t1");
        assert_eq!(payload.tag_name, "red");
        responder
            .send(Ok(MutationResult::with_data(Tag::new("t1", "red", "#ff0000"))))
            .unwrap();

        let result = update_task.await.unwrap().unwrap();
        assert_eq!(result.data.unwrap().tag_name, "red");
    }

    #[tokio::test]
    async fn test_mock_service_with_expectations() {
        let mut mock = MockService::<Tag>::new();
        mock.expect_get("t1").return_ok(Some(Tag::new("t1", "red", "#ff0000")));
        mock.expect_delete("t1").return_ok();

        let client = mock.client();
        let fetched = client.get("t1").await.unwrap();
        assert_eq!(fetched.unwrap().tag_name, "red");
        client.delete("t1").await.unwrap();

        assert_eq!(mock.received(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_service_reports_mismatch() {
        let mut mock = MockService::<Tag>::new();
        mock.expect_delete("t1").return_ok();

        let result = mock.client().delete("other").await;
        assert_eq!(result, Err(MutationError::ServiceDropped));

        let verified = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| mock.verify()));
        assert!(verified.is_err());
    }
}
