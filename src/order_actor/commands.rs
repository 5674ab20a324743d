//! Commands for the Order store.

use crate::model::{Order, OrderCreate, OrderId, OrderStatus};

#[derive(Debug, Clone)]
pub enum OrderCommand {
    /// Records a new order as the current order and at the head of history.
    Create(OrderCreate),
    /// Moves an order forward to `status`.
    Advance { id: OrderId, status: OrderStatus },
    ClearCurrent,
    SetLoyaltyPoints(u32),
    /// Takes the entire loyalty balance, leaving zero.
    RedeemLoyaltyPoints,
}

/// Results from OrderCommands.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderReply {
    Created(Order),
    Advanced(Order),
    /// No order with this id; nothing changed.
    UnknownOrder(OrderId),
    /// The order is already at or past the requested status; nothing changed.
    NotForward { id: OrderId, current: OrderStatus },
    CurrentCleared,
    LoyaltyPoints(u32),
    /// Points taken from the balance; zero when there were none.
    Redeemed(u32),
}
