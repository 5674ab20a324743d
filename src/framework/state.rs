//! # StoreState Trait
//!
//! The `StoreState` trait defines the contract every persisted store (cart,
//! orders, flags) implements to be owned by the generic [`StoreActor`].
//!
//! # Architecture Note
//! By defining a contract that all our stores must satisfy, we write the
//! message loop, the persistence step and the client plumbing *once*.
//!
//! Associated types keep each store honest: a `CartCommand` can only be sent
//! to a cart actor, and it can only ever answer with a `CartReply`. The
//! compiler rules out mixing them up.
//!
//! [`StoreActor`]: crate::framework::StoreActor

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Result of applying a command: the reply plus whether the state changed.
///
/// The actor only writes a snapshot to storage when `changed` is set.
#[derive(Debug)]
pub struct Applied<R> {
    pub reply: R,
    pub changed: bool,
}

impl<R> Applied<R> {
    pub fn new(reply: R, changed: bool) -> Self {
        Self { reply, changed }
    }

    /// The command mutated the state.
    pub fn changed(reply: R) -> Self {
        Self { reply, changed: true }
    }

    /// The command was a query or a no-op.
    pub fn unchanged(reply: R) -> Self {
        Self { reply, changed: false }
    }
}

/// Trait that any store state must implement to be managed by a `StoreActor`.
///
/// # Context
/// `Context` is injected into every `apply` call by `StoreActor::run`. This is
/// "late binding": the order store receives its clock when it is started, not
/// when it is constructed, so tests can swap in a fixed clock.
pub trait StoreState: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Fixed name of the persisted blob for this store.
    const STORAGE_KEY: &'static str;

    /// Enum of operations this store understands.
    type Command: Send + Sync + Debug;

    /// Value returned for a successfully applied command.
    type Reply: Send + Sync + Debug;

    /// Runtime dependencies. Use `()` if none are needed.
    type Context: Send + Sync;

    /// The error type for this store.
    ///
    /// `From<String>` lets clients report transport failures in the same type.
    type Error: std::error::Error + From<String> + Send + Sync + 'static;

    /// Applies a command to the state.
    ///
    /// A returned error must leave the state untouched; every mutation is a
    /// single replacement performed after validation succeeds.
    fn apply(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Applied<Self::Reply>, Self::Error>;
}
