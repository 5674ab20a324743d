//! Order store: current order, history and loyalty balance.

mod commands;
pub mod error;
pub mod state;

pub use commands::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::StoreActor;
use crate::model::OrderBook;
use crate::persistence::Storage;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of order timestamps, injected when the actor starts running.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Wall-clock time.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Creates a new Order actor and its client.
///
/// `loyalty_points` seeds the balance when no snapshot exists yet.
pub fn new(buffer_size: usize, loyalty_points: u32, storage: Arc<dyn Storage>) -> (StoreActor<OrderBook>, OrderClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, OrderBook::new(loyalty_points), storage);
    (actor, OrderClient::new(generic_client))
}
