use crate::framework::{FrameworkError, StoreClient, StoreState};
use async_trait::async_trait;

/// Trait for store-specific clients to inherit the common operations.
///
/// Implementors only provide [`inner`](ActorClient::inner); `snapshot`,
/// `send` and the error mapping come for free. A store's own error travels
/// through the framework boxed and is recovered here by downcasting, so
/// callers can match on e.g. `CartError::InvalidQuantity` directly.
#[async_trait]
pub trait ActorClient<S: StoreState>: Send + Sync {
    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<S>;

    /// Map framework errors to the store's error type.
    fn map_error(e: FrameworkError) -> S::Error {
        match e {
            FrameworkError::State(inner) => match inner.downcast::<S::Error>() {
                Ok(err) => *err,
                Err(other) => S::Error::from(other.to_string()),
            },
            other => S::Error::from(other.to_string()),
        }
    }

    /// Fetch a copy of the whole state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, S::Error> {
        tracing::debug!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Send a raw command.
    #[tracing::instrument(skip(self))]
    async fn send(&self, command: S::Command) -> Result<S::Reply, S::Error> {
        tracing::debug!("Sending request");
        self.inner().apply(command).await.map_err(Self::map_error)
    }
}
