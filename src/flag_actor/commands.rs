//! Commands for the Flag store.

use crate::model::{FlagKey, FlagValue, RemoteMerge};

#[derive(Debug, Clone)]
pub enum FlagCommand {
    Set { flag: FlagKey, value: FlagValue },
    /// Restores every flag to its default in one replacement.
    ResetAll,
    /// Merges variables served by the remote flag service.
    ApplyRemote(serde_json::Map<String, serde_json::Value>),
}

/// Results from FlagCommands.
#[derive(Debug, Clone, PartialEq)]
pub enum FlagReply {
    Set { flag: FlagKey, previous: FlagValue },
    Reset,
    RemoteApplied(RemoteMerge),
}
