use crate::clients::actor_client::ActorClient;
use crate::framework::StoreClient;
use crate::model::{Order, OrderBook, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderCommand, OrderError, OrderReply};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: StoreClient<OrderBook>,
}

impl OrderClient {
    pub fn new(inner: StoreClient<OrderBook>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, order), fields(total = order.total, status = %order.status))]
    pub async fn create_order(&self, order: OrderCreate) -> Result<Order, OrderError> {
        debug!(?order, "create_order called");
        info!("Sending create_order to actor");
        match self.send(OrderCommand::Create(order)).await? {
            OrderReply::Created(order) => Ok(order),
            other => Err(unexpected(other)),
        }
    }

    /// Moves an order forward.
    ///
    /// Returns the updated order, or `None` when the id is unknown or the
    /// order is already at or past `status`. Neither case is an error.
    #[instrument(skip(self), fields(%id, %status))]
    pub async fn advance(&self, id: OrderId, status: OrderStatus) -> Result<Option<Order>, OrderError> {
        match self.send(OrderCommand::Advance { id, status }).await? {
            OrderReply::Advanced(order) => Ok(Some(order)),
            OrderReply::UnknownOrder(id) => {
                debug!(%id, "Advance ignored: unknown order");
                Ok(None)
            }
            OrderReply::NotForward { id, current } => {
                debug!(%id, %current, "Advance ignored: not forward");
                Ok(None)
            }
            other => Err(unexpected(other)),
        }
    }

    pub async fn current(&self) -> Result<Option<Order>, OrderError> {
        Ok(self.snapshot().await?.current_order)
    }

    /// Every order placed, most recent first.
    pub async fn history(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.snapshot().await?.order_history)
    }

    pub async fn find(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self.snapshot().await?.find(id).cloned())
    }

    #[instrument(skip(self))]
    pub async fn clear_current(&self) -> Result<(), OrderError> {
        match self.send(OrderCommand::ClearCurrent).await? {
            OrderReply::CurrentCleared => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn loyalty_points(&self) -> Result<u32, OrderError> {
        Ok(self.snapshot().await?.available_loyalty_points)
    }

    #[instrument(skip(self))]
    pub async fn set_loyalty_points(&self, points: u32) -> Result<(), OrderError> {
        match self.send(OrderCommand::SetLoyaltyPoints(points)).await? {
            OrderReply::LoyaltyPoints(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Takes the whole loyalty balance. Returns the points taken (0 if none).
    #[instrument(skip(self))]
    pub async fn redeem_loyalty_points(&self) -> Result<u32, OrderError> {
        match self.send(OrderCommand::RedeemLoyaltyPoints).await? {
            OrderReply::Redeemed(points) => Ok(points),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: OrderReply) -> OrderError {
    OrderError::ActorCommunicationError(format!("unexpected reply: {reply:?}"))
}

#[async_trait]
impl ActorClient<OrderBook> for OrderClient {
    fn inner(&self) -> &StoreClient<OrderBook> {
        &self.inner
    }
}
