//! Cart store: the customer's selected items.

mod commands;
pub mod error;
pub mod state;

pub use commands::*;
pub use error::*;

use crate::clients::CartClient;
use crate::framework::StoreActor;
use crate::model::Cart;
use crate::persistence::Storage;
use std::sync::Arc;

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize, storage: Arc<dyn Storage>) -> (StoreActor<Cart>, CartClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, Cart::default(), storage);
    (actor, CartClient::new(generic_client))
}
