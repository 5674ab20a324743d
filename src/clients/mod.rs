//! Type-safe wrappers around [`StoreClient`](crate::framework::StoreClient).

pub mod actor_client;
pub mod cart_client;
pub mod flag_client;
pub mod order_client;

pub use actor_client::ActorClient;
pub use cart_client::*;
pub use flag_client::*;
pub use order_client::*;
