//! Error types for the Cart store.

use crate::model::MenuItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The item is not on the menu, or is hidden by the current flags.
    #[error("Unknown menu item: {0}")]
    UnknownItem(MenuItemId),

    /// Cart lines must hold at least one unit.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The selected option is not offered for this item.
    #[error("Unknown customization '{option}' for {item}")]
    UnknownCustomization { item: MenuItemId, option: String },

    /// The same option was selected more than once.
    #[error("Customization '{option}' selected twice for {item}")]
    DuplicateCustomization { item: MenuItemId, option: String },

    /// Options were selected while customization is switched off.
    #[error("Customization is disabled")]
    CustomizationDisabled,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
