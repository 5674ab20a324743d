//! # Checkout Session
//!
//! A [`Checkout`] is the state of one customer visit to the checkout page:
//! it reads the cart and flags, prices the cart, holds redeemed loyalty points
//! until the order is placed, and hands the priced snapshot to the order store.
//!
//! Redeemed points leave the order store's balance immediately. If the visit
//! ends without an order they are gone.

use crate::cart_actor::CartError;
use crate::clients::{CartClient, FlagClient, OrderClient};
use crate::flag_actor::FlagError;
use crate::model::{CartItem, FlagKey, Order, OrderCreate, OrderStatus, PaymentMethod, PromotionRule};
use crate::order_actor::OrderError;
use crate::pricing::{self, PriceBreakdown};
use crate::tracking::{OrderTracker, TrackingHandle};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Loyalty points are not available")]
    LoyaltyDisabled,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Flag(#[from] FlagError),
}

/// The priced cart as shown on the checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub items: Vec<CartItem>,
    pub promotion: PromotionRule,
    pub breakdown: PriceBreakdown,
    /// Balance still available to redeem.
    pub loyalty_points_available: u32,
    pub points_applied: bool,
}

/// A placed order plus its tracking task, if live tracking is on.
#[derive(Debug)]
pub struct PlacedOrder {
    pub order: Order,
    pub tracking: Option<TrackingHandle>,
}

pub struct Checkout {
    cart: CartClient,
    orders: OrderClient,
    flags: FlagClient,
    tracker: Arc<OrderTracker>,
    pickup_estimate: String,
    redeemed_points: u32,
}

impl Checkout {
    pub fn new(
        cart: CartClient,
        orders: OrderClient,
        flags: FlagClient,
        tracker: Arc<OrderTracker>,
        pickup_estimate: impl Into<String>,
    ) -> Self {
        Self {
            cart,
            orders,
            flags,
            tracker,
            pickup_estimate: pickup_estimate.into(),
            redeemed_points: 0,
        }
    }

    pub fn points_applied(&self) -> bool {
        self.redeemed_points > 0
    }

    pub async fn quote(&self) -> Result<Quote, CheckoutError> {
        let flags = self.flags.flags().await?;
        let items = self.cart.items().await?;
        let loyalty_points_available = self.orders.loyalty_points().await?;
        let promotion = flags.promotion();
        let breakdown = pricing::price(&items, &promotion, self.redeemed_points);

        Ok(Quote {
            items,
            promotion,
            breakdown,
            loyalty_points_available,
            points_applied: self.points_applied(),
        })
    }

    /// Redeems the whole loyalty balance against this visit's order.
    ///
    /// Applies at most once per visit. A second call, or a call with a zero
    /// balance, changes nothing. Returns the loyalty discount now in effect.
    #[instrument(skip(self))]
    pub async fn apply_loyalty_points(&mut self) -> Result<f64, CheckoutError> {
        if !self.flags.flags().await?.enabled(FlagKey::LoyaltyPoints) {
            return Err(CheckoutError::LoyaltyDisabled);
        }
        if self.points_applied() {
            debug!("Points already applied");
            return Ok(pricing::loyalty_discount(self.redeemed_points));
        }

        self.redeemed_points = self.orders.redeem_loyalty_points().await?;
        let discount = pricing::loyalty_discount(self.redeemed_points);
        info!(points = self.redeemed_points, discount, "Loyalty points applied");
        Ok(discount)
    }

    /// Places the order for the current cart.
    ///
    /// Pay-in-store is forced when online payment is off. The pickup estimate
    /// is recorded only when that flag is on. Once the order store accepts the
    /// order the cart is emptied (a failure there is logged, not returned)
    /// and, with live tracking on, the order starts `Preparing` and a tracking
    /// task is started; otherwise it starts `Ready for Pickup`.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self, payment: PaymentMethod) -> Result<PlacedOrder, CheckoutError> {
        let flags = self.flags.flags().await?;
        let items = self.cart.items().await?;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let promotion = flags.promotion();
        let breakdown = pricing::price(&items, &promotion, self.redeemed_points);
        let live_tracking = flags.enabled(FlagKey::LiveOrderTracking);

        let payment_method = if flags.enabled(FlagKey::OnlinePayment) {
            payment
        } else {
            PaymentMethod::InStore
        };
        let status = if live_tracking {
            OrderStatus::Preparing
        } else {
            OrderStatus::ReadyForPickup
        };
        let estimated_pickup_time = flags
            .enabled(FlagKey::EstimatedPickupTime)
            .then(|| self.pickup_estimate.clone());

        let order = self
            .orders
            .create_order(OrderCreate {
                items,
                subtotal: breakdown.subtotal,
                loyalty_discount: breakdown.loyalty_applied(),
                promotion_applied: breakdown.promotion_applied(&promotion),
                total: breakdown.total,
                status,
                payment_method,
                estimated_pickup_time,
            })
            .await?;
        self.redeemed_points = 0;
        // The order already exists; a failed clear is only logged.
        if let Err(e) = self.cart.clear().await {
            warn!(id = %order.id, error = %e, "Cart not cleared after order");
        }
        info!(id = %order.id, total = order.total, %status, "Order placed");

        let tracking = live_tracking.then(|| self.tracker.track(order.id.clone()));
        Ok(PlacedOrder { order, tracking })
    }
}
