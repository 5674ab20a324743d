//! Startup, wiring and shutdown of the storefront, plus logging setup.

pub mod storefront;
pub mod tracing;

pub use storefront::*;
pub use tracing::*;
