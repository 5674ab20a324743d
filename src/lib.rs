//! # Brew Storefront
//!
//! > **A coffee-shop ordering core whose behaviour is steered by feature flags.**
//!
//! Customers browse a small menu, fill a cart, apply loyalty points and
//! promotions at checkout, and watch their order move from `Preparing` to
//! `Ready for Pickup`. Which of those features are live is decided by a
//! closed set of typed flags.
//!
//! ## Core Concepts
//!
//! ### One actor per store
//! Cart, orders and flags each live in a `StoreActor<S>`: a Tokio task that
//! owns the state outright and applies commands one at a time. Every command
//! runs against a copy of the state which replaces the original only if the
//! command succeeds, so a store is never left half-updated. After a change the
//! actor writes a full JSON snapshot under the store's fixed key.
//!
//! ### Late binding
//! The order store's clock is injected when the actor starts (`run(context)`),
//! not when it is built. Tests pass a fixed clock.
//!
//! ### Typed errors
//! Each store has its own error enum. Errors cross the actor boundary boxed
//! and are downcast back by the domain clients, so callers match on
//! `CartError`, `OrderError` or `FlagError` directly.
//!
//! ## Module Tour
//!
//! - [`framework`]: the generic `StoreActor`, `StoreClient` and `StoreState`, plus
//!   [`MockClient`](framework::mock::MockClient) for tests.
//! - [`cart_actor`], [`order_actor`], [`flag_actor`]: the three stores.
//! - [`clients`]: typed wrappers over `StoreClient`.
//! - [`model`]: menu, cart lines, orders, flags and promotions.
//! - [`pricing`]: the pure checkout calculator.
//! - [`checkout`]: one customer visit from quote to placed order.
//! - [`tracking`]: the cancellable order-status simulator.
//! - [`persistence`]: where snapshots go.
//! - [`lifecycle`]: [`Storefront`](lifecycle::Storefront), the composition root, and logging setup.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! BREW_DATA_DIR=./data BREW_TRACKING_STEP_MS=500 RUST_LOG=debug cargo run
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod flag_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod persistence;
pub mod pricing;
pub mod tracking;
