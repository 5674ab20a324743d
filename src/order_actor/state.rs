//! StoreState trait implementation for the [`OrderBook`] type.

use super::commands::{OrderCommand, OrderReply};
use super::error::OrderError;
use super::Clock;
use crate::framework::{Applied, StoreState};
use crate::model::{Order, OrderBook, OrderId, OrderStatus};
use tracing::debug;

impl StoreState for OrderBook {
    const STORAGE_KEY: &'static str = "order-storage";

    type Command = OrderCommand;
    type Reply = OrderReply;
    type Context = Clock;
    type Error = OrderError;

    fn apply(&mut self, command: OrderCommand, clock: &Clock) -> Result<Applied<OrderReply>, OrderError> {
        match command {
            OrderCommand::Create(params) => {
                if params.items.is_empty() {
                    return Err(OrderError::EmptyOrder);
                }
                let now = clock();
                let stamp = now.timestamp_millis().max(self.last_issued + 1);
                self.last_issued = stamp;

                let order = Order::new(OrderId::from_millis(stamp), now, params);
                self.current_order = Some(order.clone());
                self.order_history.insert(0, order.clone());
                Ok(Applied::changed(OrderReply::Created(order)))
            }
            OrderCommand::Advance { id, status } => Ok(self.advance(id, status)),
            OrderCommand::ClearCurrent => {
                let changed = self.current_order.take().is_some();
                Ok(Applied::new(OrderReply::CurrentCleared, changed))
            }
            OrderCommand::SetLoyaltyPoints(points) => {
                let changed = self.available_loyalty_points != points;
                self.available_loyalty_points = points;
                Ok(Applied::new(OrderReply::LoyaltyPoints(points), changed))
            }
            OrderCommand::RedeemLoyaltyPoints => {
                let points = std::mem::take(&mut self.available_loyalty_points);
                Ok(Applied::new(OrderReply::Redeemed(points), points > 0))
            }
        }
    }
}

impl OrderBook {
    fn advance(&mut self, id: OrderId, status: OrderStatus) -> Applied<OrderReply> {
        let Some(current) = self.find(&id).map(|order| order.status) else {
            return Applied::unchanged(OrderReply::UnknownOrder(id));
        };
        if status <= current {
            debug!(%id, %current, requested = %status, "Ignoring non-forward transition");
            return Applied::unchanged(OrderReply::NotForward { id, current });
        }

        let matching = self
            .order_history
            .iter_mut()
            .chain(self.current_order.as_mut())
            .filter(|order| order.id == id);
        let mut updated = None;
        for order in matching {
            order.status = status;
            updated = Some(order.clone());
        }

        match updated {
            Some(order) => Applied::changed(OrderReply::Advanced(order)),
            None => Applied::unchanged(OrderReply::UnknownOrder(id)),
        }
    }
}
