//! Generic store framework.
//!
//! Building blocks for persisted, single-owner state containers:
//!
//! - [`StoreState`] - Trait that a store's state implements
//! - [`StoreActor`] - Task that owns the state and persists snapshots
//! - [`StoreClient`] - Cloneable handle used to talk to the actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] for a scripted client that needs no running actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::{FrameworkError, StorageError};
pub use message::{Response, StoreRequest};
pub use state::{Applied, StoreState};
