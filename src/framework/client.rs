//! # Generic Store Client
//!
//! The *client* half of a store actor: a cheap, cloneable handle that turns
//! method calls into [`StoreRequest`] messages and awaits the reply.

use crate::framework::error::FrameworkError;
use crate::framework::message::StoreRequest;
use crate::framework::state::StoreState;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `StoreActor`.
pub struct StoreClient<S: StoreState> {
    sender: mpsc::Sender<StoreRequest<S>>,
}

// Manual impl: deriving would require `S: Clone` bounds on the sender.
impl<S: StoreState> Clone for StoreClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: StoreState> StoreClient<S> {
    pub fn new(sender: mpsc::Sender<StoreRequest<S>>) -> Self {
        Self { sender }
    }

    /// Sends a command and waits for the store's reply.
    pub async fn apply(&self, command: S::Command) -> Result<S::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Apply { command, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Fetches a clone of the whole state.
    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
