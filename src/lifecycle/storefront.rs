use crate::checkout::Checkout;
use crate::clients::{CartClient, FlagClient, OrderClient};
use crate::config::Config;
use crate::model::Menu;
use crate::order_actor::{system_clock, Clock};
use crate::persistence::{JsonFileStorage, MemoryStorage, Storage};
use crate::tracking::{OrderTracker, TrackingSchedule};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Store task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The composition root of the storefront.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: starting the cart, order and flag stores and stopping them
/// - **Dependency Wiring**: handing the order store its clock and the tracker its client
/// - **Session Creation**: building a [`Checkout`] per customer visit
///
/// # Example
///
/// ```ignore
/// let shop = Storefront::start(&Config::load()?);
///
/// let line = shop.menu().cart_item(MenuItemId(1), 1, &[], &shop.flags.flags().await?)?;
/// shop.cart.add_item(line).await?;
/// let placed = shop.checkout().place_order(PaymentMethod::Card).await?;
///
/// shop.shutdown().await?;
/// ```
pub struct Storefront {
    pub cart: CartClient,
    pub orders: OrderClient,
    pub flags: FlagClient,
    menu: Menu,
    tracker: Arc<OrderTracker>,
    pickup_estimate: String,
    shutdown: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Starts every store, persisting to `config.data_dir` when set.
    pub fn start(config: &Config) -> Self {
        let storage: Arc<dyn Storage> = match &config.data_dir {
            Some(dir) => {
                info!(dir = %dir.display(), "Using file storage");
                Arc::new(JsonFileStorage::new(dir))
            }
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    pub fn with_storage(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::with_clock(config, storage, system_clock())
    }

    /// Like [`with_storage`](Self::with_storage), stamping orders with `clock`.
    pub fn with_clock(config: &Config, storage: Arc<dyn Storage>, clock: Clock) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors
        let (cart_actor, cart) = crate::cart_actor::new(buffer, Arc::clone(&storage));
        let (order_actor, orders) = crate::order_actor::new(buffer, config.loyalty_points, Arc::clone(&storage));
        let (flag_actor, flags) = crate::flag_actor::new(buffer, storage);

        // 2. Start actors with injected context
        let shutdown = CancellationToken::new();
        let handles = vec![
            tokio::spawn(cart_actor.with_shutdown(shutdown.child_token()).run(())),
            tokio::spawn(order_actor.with_shutdown(shutdown.child_token()).run(clock)),
            tokio::spawn(flag_actor.with_shutdown(shutdown.child_token()).run(())),
        ];

        let tracker = OrderTracker::new(orders.clone(), TrackingSchedule::every(config.tracking_step));

        Self {
            cart,
            orders,
            flags,
            menu: Menu::coffee_shop(),
            tracker: Arc::new(tracker),
            pickup_estimate: config.pickup_estimate.clone(),
            shutdown,
            handles,
        }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Starts a checkout session for one visit.
    pub fn checkout(&self) -> Checkout {
        Checkout::new(
            self.cart.clone(),
            self.orders.clone(),
            self.flags.clone(),
            Arc::clone(&self.tracker),
            self.pickup_estimate.clone(),
        )
    }

    /// Gracefully shuts down the storefront.
    ///
    /// Pending tracking steps are cancelled first. Each store then closes its
    /// channel, answers the requests already queued and exits. Clients still
    /// held elsewhere, e.g. by a [`Checkout`] session, get
    /// `ActorCommunicationError` from then on.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down storefront...");
        self.tracker.shutdown().await;
        self.shutdown.cancel();

        drop(self.tracker);
        drop(self.cart);
        drop(self.orders);
        drop(self.flags);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(e.into());
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
