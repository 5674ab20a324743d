//! # Store Messages
//!
//! Message types exchanged between a [`StoreClient`](crate::framework::StoreClient)
//! and its [`StoreActor`](crate::framework::StoreActor).

use crate::framework::error::FrameworkError;
use crate::framework::state::StoreState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to a store actor.
///
/// - **Apply**: run a store-specific [`StoreState::Command`].
/// - **Snapshot**: return a clone of the full state.
#[derive(Debug)]
pub enum StoreRequest<S: StoreState> {
    Apply {
        command: S::Command,
        respond_to: Response<S::Reply>,
    },
    Snapshot {
        respond_to: Response<S>,
    },
}
