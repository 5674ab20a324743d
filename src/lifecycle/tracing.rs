//! # Logging
//!
//! [`setup_tracing`] installs a compact `fmt` subscriber filtered by
//! `RUST_LOG`. Module paths are hidden; store actors add a `store` field
//! instead.
//!
//! ```bash
//! RUST_LOG=info cargo run     # order placed, status changes
//! RUST_LOG=debug cargo run    # every command with its payload
//! ```
//!
//! With `RUST_LOG=info` a visit reads like:
//!
//! ```text
//! INFO store="coffee-shop-feature-flags" Applied
//! INFO store="cart-storage" Applied
//! INFO apply_loyalty_points: Loyalty points applied points=150 discount=1.5
//! INFO place_order: Order placed id=ORD1760870400000 total=5.7 status=Preparing
//! INFO Order advanced order_id=ORD1760870400000 status=Brewing
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
