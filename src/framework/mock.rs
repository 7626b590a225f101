//! # Mock Framework
//!
//! Utilities for testing clients and services in isolation, without spawning a real
//! [`ResourceActor`](crate::framework::ResourceActor).
//!
//! | | `MockClient` | Real actor |
//! |---|---|---|
//! | **State** | Scripted responses | Real store |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error injection** | `return_err` | Needs a real failure |
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations up front with a fluent builder, hand out
//!   [`MockClient::client`], then call [`MockClient::verify`].
//! - [`create_mock_client`] plus [`expect_create`] / [`expect_get`]: receive the raw request
//!   and answer it by hand, which lets a test inspect the payload.
//!
//! ```rust,ignore
//! let mut users = MockClient::<User>::new();
//! users.expect_get(alice_id).return_ok(Some(alice));
//! let directory = UserClient::new(users.client());
//! assert!(directory.exists(alice_id).await?);
//! users.verify();
//! ```

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

/// An expected request and the scripted reply.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests must arrive in the order the expectations were queued; anything else panics
/// inside the mock task, which surfaces in the test as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queued = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queued.lock().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "Get requested an unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {request:?}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation. The filter is not evaluated; the scripted records are
    /// returned as-is.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Expectations<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        self.expectations.lock().push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> CreateExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, id: T::Id) {
        self.expectations
            .lock()
            .push_back(Expectation::Create { response: Ok(id) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().push_back(Expectation::Create {
            response: Err(error),
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    /// Sets the expectation to return these records.
    pub fn return_ok(self, records: Vec<T>) {
        self.expectations.lock().push_back(Expectation::List {
            response: Ok(records),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations.lock().push_back(Expectation::List {
            response: Err(error),
        });
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls.
///
/// Use this when the test needs to look at the payload a client sends, e.g. to check that
/// a booking carries the right total before answering it.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Receives the next request if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Receives the next request if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
