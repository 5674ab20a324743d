//! Error types for the Flag store.

use crate::model::{FlagKey, FlagKind};
use thiserror::Error;

/// Errors that can occur during flag operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FlagError {
    /// The name does not belong to the closed flag set.
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error("Flag {flag} expects a {expected} value, got {found}")]
    TypeMismatch {
        flag: FlagKey,
        expected: FlagKind,
        found: FlagKind,
    },

    #[error("Invalid value {value:?} for flag {flag}")]
    InvalidValue { flag: FlagKey, value: String },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for FlagError {
    fn from(msg: String) -> Self {
        FlagError::ActorCommunicationError(msg)
    }
}
