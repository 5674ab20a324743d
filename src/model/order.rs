//! Placed orders and the order store's state.
//!
//! # Store Framework
//! [`OrderBook`] implements [`StoreState`](crate::framework::StoreState) in
//! [`crate::order_actor`]. See [`OrderStatus`] for the lifecycle.

use crate::model::{CartItem, PromotionApplied};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders, e.g. `ORD1718000000000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub const PREFIX: &'static str = "ORD";

    /// Builds an id from a millisecond timestamp.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("{}{}", Self::PREFIX, millis))
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// Variants are declared in lifecycle order, so `Ord` compares progress:
///
/// ```text
/// Preparing → Brewing → Quality Check → Ready for Pickup → Completed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Preparing,
    Brewing,
    #[serde(rename = "Quality Check")]
    QualityCheck,
    #[serde(rename = "Ready for Pickup")]
    ReadyForPickup,
    Completed,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Brewing => "Brewing",
            OrderStatus::QualityCheck => "Quality Check",
            OrderStatus::ReadyForPickup => "Ready for Pickup",
            OrderStatus::Completed => "Completed",
        }
    }

    /// The following status, or `None` for `Completed`.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Preparing => Some(OrderStatus::Brewing),
            OrderStatus::Brewing => Some(OrderStatus::QualityCheck),
            OrderStatus::QualityCheck => Some(OrderStatus::ReadyForPickup),
            OrderStatus::ReadyForPickup => Some(OrderStatus::Completed),
            OrderStatus::Completed => None,
        }
    }

    /// Progress bar value shown while tracking.
    pub fn progress_percent(&self) -> u8 {
        match self {
            OrderStatus::Preparing => 25,
            OrderStatus::Brewing => 50,
            OrderStatus::QualityCheck => 75,
            OrderStatus::ReadyForPickup | OrderStatus::Completed => 100,
        }
    }

    /// Whether the customer can collect the order.
    pub fn is_ready(&self) -> bool {
        matches!(self, OrderStatus::ReadyForPickup | OrderStatus::Completed)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    ApplePay,
    /// Paid at the counter; the only option when online payment is off.
    #[serde(rename = "in-store")]
    InStore,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PaymentMethod::Card => "card",
            PaymentMethod::ApplePay => "applepay",
            PaymentMethod::InStore => "in-store",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Snapshot of the cart at placement time.
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_discount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_applied: Option<PromotionApplied>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub order_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_pickup_time: Option<String>,
}

/// Payload for creating a new order. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub items: Vec<CartItem>,
    pub subtotal: f64,
    pub loyalty_discount: Option<f64>,
    pub promotion_applied: Option<PromotionApplied>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub estimated_pickup_time: Option<String>,
}

impl Order {
    /// Creates an Order from its payload.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (assigned by the order store)
    /// * `order_date` - Placement time
    /// * `params` - Priced cart snapshot
    pub fn new(id: OrderId, order_date: DateTime<Utc>, params: OrderCreate) -> Self {
        Self {
            id,
            items: params.items,
            subtotal: params.subtotal,
            loyalty_discount: params.loyalty_discount,
            promotion_applied: params.promotion_applied,
            total: params.total,
            status: params.status,
            payment_method: params.payment_method,
            order_date,
            estimated_pickup_time: params.estimated_pickup_time,
        }
    }

    pub fn loyalty_points_applied(&self) -> bool {
        self.loyalty_discount.is_some_and(|d| d > 0.0)
    }
}

/// The order store's state: the current order, the history and the
/// customer's loyalty balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub current_order: Option<Order>,
    /// Most recent first.
    pub order_history: Vec<Order>,
    pub available_loyalty_points: u32,
    /// Millisecond stamp of the last issued id; keeps ids strictly increasing.
    #[serde(default)]
    pub last_issued: i64,
}

impl OrderBook {
    pub fn new(loyalty_points: u32) -> Self {
        Self {
            current_order: None,
            order_history: Vec::new(),
            available_loyalty_points: loyalty_points,
            last_issued: 0,
        }
    }

    /// Looks an order up in the history (which includes the current order).
    pub fn find(&self, id: &OrderId) -> Option<&Order> {
        self.order_history
            .iter()
            .find(|order| &order.id == id)
            .or_else(|| self.current_order.as_ref().filter(|order| &order.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_order_is_lifecycle_order() {
        let mut status = OrderStatus::Preparing;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            assert!(next > status);
            status = next;
            seen.push(status);
        }
        assert_eq!(seen.len(), 5);
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn test_status_labels_serialize_as_display_strings() {
        let json = serde_json::to_string(&OrderStatus::ReadyForPickup).unwrap();
        assert_eq!(json, "\"Ready for Pickup\"");
        let back: OrderStatus = serde_json::from_str("\"Quality Check\"").unwrap();
        assert_eq!(back, OrderStatus::QualityCheck);
        assert_eq!(OrderStatus::QualityCheck.progress_percent(), 75);
        assert!(!OrderStatus::QualityCheck.is_ready());
    }

    #[test]
    fn test_payment_method_names() {
        assert_eq!(serde_json::to_string(&PaymentMethod::ApplePay).unwrap(), "\"applepay\"");
        assert_eq!(PaymentMethod::InStore.to_string(), "in-store");
    }
}
