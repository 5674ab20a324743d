use crate::cart_actor::{CartCommand, CartError, CartReply};
use crate::clients::actor_client::ActorClient;
use crate::framework::StoreClient;
use crate::model::{Cart, CartItem, CartLineKey};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart store.
#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StoreClient<Cart>) -> Self {
        Self { inner }
    }

    /// Adds a line, returning the merged line's quantity.
    #[instrument(skip(self, line), fields(key = %line.key(), quantity = line.quantity))]
    pub async fn add_item(&self, line: CartItem) -> Result<u32, CartError> {
        debug!(?line, "add_item called");
        match self.send(CartCommand::Add(line)).await? {
            CartReply::Line { quantity, .. } => Ok(quantity),
            other => Err(unexpected(other)),
        }
    }

    /// Removes a line. Returns `false` if it was not in the cart.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn remove_item(&self, key: CartLineKey) -> Result<bool, CartError> {
        match self.send(CartCommand::Remove(key)).await? {
            CartReply::Removed(_) => Ok(true),
            CartReply::NotInCart(_) => Ok(false),
            other => Err(unexpected(other)),
        }
    }

    /// Adds one unit. Returns the new quantity, or `None` if the line is absent.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn increment(&self, key: CartLineKey) -> Result<Option<u32>, CartError> {
        self.adjust(CartCommand::Increment(key)).await
    }

    /// Takes one unit away. Returns the new quantity, or `None` if the line
    /// was removed or was never there.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn decrement(&self, key: CartLineKey) -> Result<Option<u32>, CartError> {
        self.adjust(CartCommand::Decrement(key)).await
    }

    /// Empties the cart, returning how many lines it held.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize, CartError> {
        match self.send(CartCommand::Clear).await? {
            CartReply::Cleared { lines } => Ok(lines),
            other => Err(unexpected(other)),
        }
    }

    pub async fn items(&self) -> Result<Vec<CartItem>, CartError> {
        Ok(self.snapshot().await?.items)
    }

    async fn adjust(&self, command: CartCommand) -> Result<Option<u32>, CartError> {
        match self.send(command).await? {
            CartReply::Line { quantity, .. } => Ok(Some(quantity)),
            CartReply::Removed(_) | CartReply::NotInCart(_) => Ok(None),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: CartReply) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected reply: {reply:?}"))
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }
}
