//! Flag store: the closed set of feature flags.

mod commands;
pub mod error;
pub mod state;

pub use commands::*;
pub use error::*;

use crate::clients::FlagClient;
use crate::framework::StoreActor;
use crate::model::FlagSet;
use crate::persistence::Storage;
use std::sync::Arc;

/// Creates a new Flag actor and its client.
pub fn new(buffer_size: usize, storage: Arc<dyn Storage>) -> (StoreActor<FlagSet>, FlagClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, FlagSet::default(), storage);
    (actor, FlagClient::new(generic_client))
}
