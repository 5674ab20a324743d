//! # Generic Store Actor
//!
//! `StoreActor<S>` is the *server* side of a store. It owns the state, the
//! receiving end of the channel and a handle to the storage backend, and it
//! processes every request sequentially in its own Tokio task. No `Mutex` is
//! needed around the state: the task has exclusive ownership of it.
//!
//! # Usage Pattern
//!
//! 1. **Create**: `StoreActor::new()` returns the actor and its client.
//! 2. **Wire**: pass the store's context into `actor.run(context)`.
//! 3. **Run**: spawn the run loop in a background task.
//!
//! ```rust,ignore
//! let (actor, client) = StoreActor::new(32, FlagSet::default(), storage);
//! tokio::spawn(actor.run(()));
//! let flags = client.snapshot().await?;
//! ```

use crate::framework::client::StoreClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::StoreRequest;
use crate::framework::state::StoreState;
use crate::persistence::Storage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The generic actor that owns one persisted store.
pub struct StoreActor<S: StoreState> {
    receiver: mpsc::Receiver<StoreRequest<S>>,
    state: S,
    storage: Arc<dyn Storage>,
    shutdown: CancellationToken,
}

impl<S: StoreState> StoreActor<S> {
    /// Creates the actor with `initial` state and returns it with its client.
    ///
    /// `initial` is replaced by the persisted snapshot, if one exists, when
    /// the actor starts running.
    pub fn new(buffer_size: usize, initial: S, storage: Arc<dyn Storage>) -> (Self, StoreClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: initial,
            storage,
            shutdown: CancellationToken::new(),
        };
        (actor, StoreClient::new(sender))
    }

    /// Stops the actor when `token` is cancelled, even while clients are alive.
    ///
    /// On cancellation the channel is closed: requests already queued are
    /// still answered, later ones fail with [`FrameworkError::ActorClosed`].
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Runs the actor's event loop until every client has been dropped or
    /// the shutdown token fires.
    pub async fn run(mut self, context: S::Context) {
        let store = S::STORAGE_KEY;
        self.restore().await;
        info!(store, "Actor started");

        let mut closing = false;
        loop {
            tokio::select! {
                biased;
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg, &context).await,
                    None => break,
                },
                _ = self.shutdown.cancelled(), if !closing => {
                    debug!(store, "Closing channel");
                    self.receiver.close();
                    closing = true;
                }
            }
        }

        info!(store, "Shutdown");
    }

    async fn handle(&mut self, msg: StoreRequest<S>, context: &S::Context) {
        let store = S::STORAGE_KEY;
        match msg {
            StoreRequest::Apply { command, respond_to } => {
                debug!(store, ?command, "Apply");
                let mut next = self.state.clone();
                match next.apply(command, context) {
                    Ok(applied) => {
                        if applied.changed {
                            self.state = next;
                            self.persist().await;
                            info!(store, "Applied");
                        }
                        let _ = respond_to.send(Ok(applied.reply));
                    }
                    Err(e) => {
                        warn!(store, error = %e, "Apply failed");
                        let _ = respond_to.send(Err(FrameworkError::State(Box::new(e))));
                    }
                }
            }
            StoreRequest::Snapshot { respond_to } => {
                debug!(store, "Snapshot");
                let _ = respond_to.send(Ok(self.state.clone()));
            }
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    async fn restore(&mut self) {
        let store = S::STORAGE_KEY;
        match self.storage.load(store).await {
            Ok(Some(blob)) => match serde_json::from_str::<S>(&blob) {
                Ok(state) => {
                    self.state = state;
                    info!(store, "Restored snapshot");
                }
                Err(e) => warn!(store, error = %e, "Corrupt snapshot, using initial state"),
            },
            Ok(None) => debug!(store, "No snapshot"),
            Err(e) => warn!(store, error = %e, "Snapshot unreadable, using initial state"),
        }
    }

    async fn persist(&self) {
        let store = S::STORAGE_KEY;
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(store, error = %e, "Snapshot serialization failed");
                return;
            }
        };
        if let Err(e) = self.storage.save(store, &blob).await {
            warn!(store, error = %e, "Snapshot write failed");
        }
    }
}
