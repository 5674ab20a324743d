//! StoreState trait implementation for the [`FlagSet`] type.

use super::commands::{FlagCommand, FlagReply};
use super::error::FlagError;
use crate::framework::{Applied, StoreState};
use crate::model::FlagSet;

impl StoreState for FlagSet {
    const STORAGE_KEY: &'static str = "coffee-shop-feature-flags";

    type Command = FlagCommand;
    type Reply = FlagReply;
    type Context = ();
    type Error = FlagError;

    fn apply(&mut self, command: FlagCommand, _ctx: &()) -> Result<Applied<FlagReply>, FlagError> {
        match command {
            FlagCommand::Set { flag, value } => {
                let previous = self.insert(flag, value.clone())?;
                let changed = previous != value;
                Ok(Applied::new(FlagReply::Set { flag, previous }, changed))
            }
            FlagCommand::ResetAll => {
                let defaults = FlagSet::default();
                let changed = *self != defaults;
                *self = defaults;
                Ok(Applied::new(FlagReply::Reset, changed))
            }
            FlagCommand::ApplyRemote(variables) => {
                let merge = self.merge_remote(&variables);
                let changed = !merge.applied.is_empty();
                Ok(Applied::new(FlagReply::RemoteApplied(merge), changed))
            }
        }
    }
}
