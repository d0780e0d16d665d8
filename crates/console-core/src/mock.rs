//! # Mock Gateways & Testing Guide
//!
//! Two in-memory [`ResourceGateway`] implementations for tests:
//!
//! * [`MockGateway`] - fluent expectation queue. Each expected call is given
//!   its response up front; calls resolve immediately and `verify()` asserts
//!   every expectation was consumed. Best for scenario tests where the order
//!   of gateway traffic is known.
//! * [`channel_gateway`] - hands the test the receiving end of a call
//!   channel; every gateway call blocks until the test answers its oneshot.
//!   Best for timing-sensitive tests: pending submissions, cancellation while
//!   a request is in flight, out-of-order fetch resolution.
//!
//! ## When to use which
//!
//! | Feature | MockGateway | channel_gateway |
//! |---------|-------------|-----------------|
//! | **Resolution** | Immediate | When the test decides |
//! | **Error injection** | `return_err` | Send `Err` on the call's oneshot |
//! | **Ordering races** | Not expressible | Fully controllable |
//! | **Use case** | Happy-path scenarios | Pending/stale/out-of-order |
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut gateway = MockGateway::<User>::new();
//! gateway.expect_list().return_ok(vec![user.clone()]);
//! gateway.expect_delete(user.id.clone()).return_err(GatewayError::Rejected {
//!     status: 500,
//!     body: "boom".into(),
//! });
//!
//! let (session, client, notifications) = ConsoleSession::new(8);
//! tokio::spawn(session.run(gateway.clone()));
//! // ... drive the client ...
//! gateway.verify();
//! ```

use crate::entity::ConsoleEntity;
use crate::gateway::{GatewayError, ResourceGateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION QUEUE GATEWAY
// =============================================================================

/// An expected gateway call and its canned response.
enum Expectation<T: ConsoleEntity> {
    List {
        response: Result<Vec<T>, GatewayError>,
    },
    Create {
        response: Result<T, GatewayError>,
    },
    Update {
        response: Result<T, GatewayError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), GatewayError>,
    },
}

impl<T: ConsoleEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::List { .. } => "list",
            Expectation::Create { .. } => "create",
            Expectation::Update { .. } => "update",
            Expectation::Delete { .. } => "delete",
        }
    }
}

/// A gateway with expectation tracking for fluent testing.
///
/// Clones share the same queue, so the copy handed to the session and the
/// copy kept by the test see the same expectations.
pub struct MockGateway<T: ConsoleEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ConsoleEntity> Clone for MockGateway<T> {
    fn clone(&self) -> Self {
        Self {
            expectations: Arc::clone(&self.expectations),
        }
    }
}

impl<T: ConsoleEntity> Default for MockGateway<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ConsoleEntity> MockGateway<T> {
    /// Creates a gateway with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Expects a `list` call.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `create` call.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects an `update` call.
    pub fn expect_update(&mut self) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Expects a `delete` call for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            expectations: Arc::clone(&self.expectations),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let expectations = self.expectations.lock().unwrap();
        if !expectations.is_empty() {
            panic!(
                "Not all gateway expectations were met. {} remaining",
                expectations.len()
            );
        }
    }

    fn next(&self, called: &'static str) -> Expectation<T> {
        let mut expectations = self.expectations.lock().unwrap();
        match expectations.pop_front() {
            Some(expectation) => expectation,
            None => panic!("unexpected gateway call: {called} (no expectations left)"),
        }
    }
}

#[async_trait]
impl<T: ConsoleEntity> ResourceGateway<T> for MockGateway<T> {
    async fn list(&self) -> Result<Vec<T>, GatewayError> {
        match self.next("list") {
            Expectation::List { response } => response,
            other => panic!("expected {} call, got list", other.kind()),
        }
    }

    async fn create(&self, _draft: T::Draft) -> Result<T, GatewayError> {
        match self.next("create") {
            Expectation::Create { response } => response,
            other => panic!("expected {} call, got create", other.kind()),
        }
    }

    async fn update(&self, _record: T) -> Result<T, GatewayError> {
        match self.next("update") {
            Expectation::Update { response } => response,
            other => panic!("expected {} call, got update", other.kind()),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), GatewayError> {
        match self.next("delete") {
            Expectation::Delete {
                id: expected,
                response,
            } => {
                if id != expected {
                    panic!("delete called with id {id}, expected {expected}");
                }
                response
            }
            other => panic!("expected {} call, got delete", other.kind()),
        }
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ConsoleEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ConsoleEntity> ListExpectationBuilder<T> {
    pub fn return_ok(self, records: Vec<T>) {
        self.push(Ok(records));
    }

    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, GatewayError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::List { response });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: ConsoleEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ConsoleEntity> CreateExpectationBuilder<T> {
    pub fn return_ok(self, created: T) {
        self.push(Ok(created));
    }

    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, GatewayError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Create { response });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: ConsoleEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ConsoleEntity> UpdateExpectationBuilder<T> {
    pub fn return_ok(self, updated: T) {
        self.push(Ok(updated));
    }

    pub fn return_err(self, error: GatewayError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, GatewayError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Update { response });
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: ConsoleEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ConsoleEntity> DeleteExpectationBuilder<T> {
    pub fn return_ok(self) {
        let id = self.id.clone();
        self.push(id, Ok(()));
    }

    pub fn return_err(self, error: GatewayError) {
        let id = self.id.clone();
        self.push(id, Err(error));
    }

    fn push(self, id: T::Id, response: Result<(), GatewayError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Delete { id, response });
    }
}

// =============================================================================
// CHANNEL GATEWAY (test-controlled resolution)
// =============================================================================

/// A gateway call surfaced to the test, carrying its reply channel. The call
/// stays in flight until the test sends on `respond_to`.
#[derive(Debug)]
pub enum GatewayCall<T: ConsoleEntity> {
    List {
        respond_to: oneshot::Sender<Result<Vec<T>, GatewayError>>,
    },
    Create {
        draft: T::Draft,
        respond_to: oneshot::Sender<Result<T, GatewayError>>,
    },
    Update {
        record: T,
        respond_to: oneshot::Sender<Result<T, GatewayError>>,
    },
    Delete {
        id: T::Id,
        respond_to: oneshot::Sender<Result<(), GatewayError>>,
    },
}

/// Gateway half of [`channel_gateway`].
pub struct ChannelGateway<T: ConsoleEntity> {
    sender: mpsc::Sender<GatewayCall<T>>,
}

impl<T: ConsoleEntity> Clone for ChannelGateway<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

/// Creates a gateway whose calls the test resolves explicitly.
///
/// The test receives each [`GatewayCall`] in dispatch order and answers (or
/// drops) its oneshot whenever it chooses, which makes in-flight windows and
/// out-of-order resolutions deterministic to script.
pub fn channel_gateway<T: ConsoleEntity>(
    buffer_size: usize,
) -> (ChannelGateway<T>, mpsc::Receiver<GatewayCall<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ChannelGateway { sender }, receiver)
}

#[async_trait]
impl<T: ConsoleEntity> ResourceGateway<T> for ChannelGateway<T> {
    async fn list(&self) -> Result<Vec<T>, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(GatewayCall::List { respond_to })
            .await
            .map_err(|_| dropped())?;
        response.await.map_err(|_| dropped())?
    }

    async fn create(&self, draft: T::Draft) -> Result<T, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(GatewayCall::Create { draft, respond_to })
            .await
            .map_err(|_| dropped())?;
        response.await.map_err(|_| dropped())?
    }

    async fn update(&self, record: T) -> Result<T, GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(GatewayCall::Update { record, respond_to })
            .await
            .map_err(|_| dropped())?;
        response.await.map_err(|_| dropped())?
    }

    async fn delete(&self, id: T::Id) -> Result<(), GatewayError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(GatewayCall::Delete { id, respond_to })
            .await
            .map_err(|_| dropped())?;
        response.await.map_err(|_| dropped())?
    }
}

fn dropped() -> GatewayError {
    GatewayError::Transport("test gateway dropped the call".to_string())
}

/// Helper to receive the next call and assert it is a `List`.
pub async fn expect_list_call<T: ConsoleEntity>(
    receiver: &mut mpsc::Receiver<GatewayCall<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, GatewayError>>> {
    match receiver.recv().await {
        Some(GatewayCall::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to receive the next call and assert it is a `Create`.
pub async fn expect_create_call<T: ConsoleEntity>(
    receiver: &mut mpsc::Receiver<GatewayCall<T>>,
) -> Option<(T::Draft, oneshot::Sender<Result<T, GatewayError>>)> {
    match receiver.recv().await {
        Some(GatewayCall::Create { draft, respond_to }) => Some((draft, respond_to)),
        _ => None,
    }
}

/// Helper to receive the next call and assert it is an `Update`.
pub async fn expect_update_call<T: ConsoleEntity>(
    receiver: &mut mpsc::Receiver<GatewayCall<T>>,
) -> Option<(T, oneshot::Sender<Result<T, GatewayError>>)> {
    match receiver.recv().await {
        Some(GatewayCall::Update { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to receive the next call and assert it is a `Delete`.
pub async fn expect_delete_call<T: ConsoleEntity>(
    receiver: &mut mpsc::Receiver<GatewayCall<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<(), GatewayError>>)> {
    match receiver.recv().await {
        Some(GatewayCall::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
