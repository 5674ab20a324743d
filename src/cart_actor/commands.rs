//! Commands for the Cart store.
//!
//! Lines are addressed by [`CartLineKey`], i.e. item id plus selected options.
//! Commands naming a line that is not in the cart are no-ops answered with
//! [`CartReply::NotInCart`].

use crate::model::{CartItem, CartLineKey};

#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Adds a line, merging into an existing line with the same key.
    Add(CartItem),
    /// Drops a line regardless of its quantity.
    Remove(CartLineKey),
    Increment(CartLineKey),
    /// Removes the line when its quantity would reach zero.
    Decrement(CartLineKey),
    Clear,
}

/// Results from CartCommands.
#[derive(Debug, Clone, PartialEq)]
pub enum CartReply {
    /// The line now holds `quantity` units.
    Line { key: CartLineKey, quantity: u32 },
    /// The line was removed from the cart.
    Removed(CartLineKey),
    NotInCart(CartLineKey),
    /// The cart was emptied; `lines` is how many lines it held.
    Cleared { lines: usize },
}
