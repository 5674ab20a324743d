//! # Mock Framework
//!
//! Utilities for testing code that talks to a store without spawning the real
//! [`StoreActor`](crate::framework::StoreActor).
//!
//! A [`MockClient`] serves scripted replies in order and records every command
//! it receives, so a test can assert both what the caller saw and what it sent.
//!
//! ```rust,ignore
//! let mut mock = MockClient::<OrderBook>::new();
//! mock.expect_apply().return_ok(OrderReply::UnknownOrder(order_id.clone()));
//!
//! let client = OrderClient::new(mock.client());
//! assert_eq!(client.advance(order_id, OrderStatus::Brewing).await?, None);
//!
//! mock.verify();
//! assert_eq!(mock.commands().len(), 1);
//! ```

use crate::framework::{FrameworkError, StoreClient, StoreRequest, StoreState};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<S: StoreState> {
    Apply {
        response: Result<S::Reply, FrameworkError>,
    },
    Snapshot {
        response: Result<S, FrameworkError>,
    },
}

/// A mock store with expectation tracking for fluent testing.
pub struct MockClient<S: StoreState> {
    client: StoreClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    received: Arc<Mutex<Vec<S::Command>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: StoreState> MockClient<S> {
    /// Creates a new mock with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<S>>(100);
        let expectations: Arc<Mutex<VecDeque<Expectation<S>>>> = Arc::new(Mutex::new(VecDeque::new()));
        let received = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let received_clone = received.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (StoreRequest::Apply { command, respond_to }, Some(Expectation::Apply { response })) => {
                        received_clone.lock().unwrap().push(command);
                        let _ = respond_to.send(response);
                    }
                    (StoreRequest::Snapshot { respond_to }, Some(Expectation::Snapshot { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", request);
                    }
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            received,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<S> {
        self.client.clone()
    }

    /// Expects an `apply` request.
    pub fn expect_apply(&mut self) -> ApplyExpectationBuilder<S> {
        ApplyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Drains the commands received so far, in arrival order.
    pub fn commands(&self) -> Vec<S::Command> {
        std::mem::take(&mut *self.received.lock().unwrap())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<S: StoreState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `apply` expectations.
pub struct ApplyExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> ApplyExpectationBuilder<S> {
    /// Answers the next `apply` with `reply`.
    pub fn return_ok(self, reply: S::Reply) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply { response: Ok(reply) });
    }

    /// Answers the next `apply` with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply { response: Err(error) });
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: StoreState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: StoreState> SnapshotExpectationBuilder<S> {
    /// Answers the next `snapshot` with `state`.
    pub fn return_ok(self, state: S) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Ok(state) });
    }

    /// Answers the next `snapshot` with `error`.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Err(error) });
    }
}
