use crate::clients::actor_client::ActorClient;
use crate::flag_actor::{FlagCommand, FlagError, FlagReply};
use crate::framework::StoreClient;
use crate::model::{FlagKey, FlagSet, FlagValue, RemoteMerge};
use async_trait::async_trait;
use tracing::{info, instrument, warn};

/// Client for interacting with the Flag store.
#[derive(Clone)]
pub struct FlagClient {
    inner: StoreClient<FlagSet>,
}

impl FlagClient {
    pub fn new(inner: StoreClient<FlagSet>) -> Self {
        Self { inner }
    }

    /// Current value of one flag (its default if never set).
    pub async fn get(&self, flag: FlagKey) -> Result<FlagValue, FlagError> {
        Ok(self.snapshot().await?.get(flag))
    }

    /// All flags at once, for views that read several.
    pub async fn flags(&self) -> Result<FlagSet, FlagError> {
        self.snapshot().await
    }

    /// Overwrites a flag, returning its previous value.
    #[instrument(skip(self), fields(%flag, %value))]
    pub async fn set(&self, flag: FlagKey, value: FlagValue) -> Result<FlagValue, FlagError> {
        match self.send(FlagCommand::Set { flag, value }).await? {
            FlagReply::Set { previous, .. } => Ok(previous),
            other => Err(unexpected(other)),
        }
    }

    /// Like [`set`](Self::set), addressing the flag by its kebab-case name.
    pub async fn set_by_name(&self, name: &str, value: FlagValue) -> Result<FlagValue, FlagError> {
        let flag = name.parse::<FlagKey>()?;
        self.set(flag, value).await
    }

    #[instrument(skip(self))]
    pub async fn reset_all(&self) -> Result<(), FlagError> {
        match self.send(FlagCommand::ResetAll).await? {
            FlagReply::Reset => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Merges variables fetched from the remote flag service.
    ///
    /// `variables` must be a JSON object keyed by flag name. Unknown names and
    /// values of the wrong type are skipped and reported in the result.
    #[instrument(skip(self, variables))]
    pub async fn apply_remote(&self, variables: serde_json::Value) -> Result<RemoteMerge, FlagError> {
        let serde_json::Value::Object(map) = variables else {
            return Err(FlagError::InvalidValue {
                flag: FlagKey::PromotionalBanner,
                value: "remote variables must be a JSON object".to_string(),
            });
        };
        match self.send(FlagCommand::ApplyRemote(map)).await? {
            FlagReply::RemoteApplied(merge) => {
                if !merge.skipped.is_empty() {
                    warn!(skipped = ?merge.skipped, "Remote variables skipped");
                }
                info!(applied = merge.applied.len(), "Remote variables applied");
                Ok(merge)
            }
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(reply: FlagReply) -> FlagError {
    FlagError::ActorCommunicationError(format!("unexpected reply: {reply:?}"))
}

#[async_trait]
impl ActorClient<FlagSet> for FlagClient {
    fn inner(&self) -> &StoreClient<FlagSet> {
        &self.inner
    }
}
