//! # Framework Errors
//!
//! Common error types shared by every store actor and client. Domain clients
//! map these into their own error enums (see [`crate::cart_actor::CartError`]).

/// Errors that can occur within the store framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("State error: {0}")]
    State(Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by a [`Storage`](crate::persistence::Storage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
