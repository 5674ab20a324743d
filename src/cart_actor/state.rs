//! StoreState trait implementation for the [`Cart`] type.
//!
//! Every command rebuilds `items` in one step; the actor swaps the result in
//! only after `apply` succeeds.

use super::commands::{CartCommand, CartReply};
use super::error::CartError;
use crate::framework::{Applied, StoreState};
use crate::model::Cart;

impl StoreState for Cart {
    const STORAGE_KEY: &'static str = "cart-storage";

    type Command = CartCommand;
    type Reply = CartReply;
    type Context = ();
    type Error = CartError;

    fn apply(&mut self, command: CartCommand, _ctx: &()) -> Result<Applied<CartReply>, CartError> {
        match command {
            CartCommand::Add(line) => {
                if line.quantity == 0 {
                    return Err(CartError::InvalidQuantity(0));
                }
                let key = line.key();
                let quantity = match self.items.iter_mut().find(|existing| existing.key() == key) {
                    Some(existing) => {
                        existing.quantity = existing
                            .quantity
                            .checked_add(line.quantity)
                            .ok_or(CartError::InvalidQuantity(line.quantity))?;
                        existing.quantity
                    }
                    None => {
                        let quantity = line.quantity;
                        self.items.push(line);
                        quantity
                    }
                };
                Ok(Applied::changed(CartReply::Line { key, quantity }))
            }
            CartCommand::Remove(key) => {
                let before = self.items.len();
                self.items.retain(|line| line.key() != key);
                if self.items.len() == before {
                    Ok(Applied::unchanged(CartReply::NotInCart(key)))
                } else {
                    Ok(Applied::changed(CartReply::Removed(key)))
                }
            }
            CartCommand::Increment(key) => match self.items.iter_mut().find(|line| line.key() == key) {
                Some(line) => {
                    line.quantity = line.quantity.checked_add(1).ok_or(CartError::InvalidQuantity(line.quantity))?;
                    let quantity = line.quantity;
                    Ok(Applied::changed(CartReply::Line { key, quantity }))
                }
                None => Ok(Applied::unchanged(CartReply::NotInCart(key))),
            },
            CartCommand::Decrement(key) => {
                let Some(index) = self.items.iter().position(|line| line.key() == key) else {
                    return Ok(Applied::unchanged(CartReply::NotInCart(key)));
                };
                if self.items[index].quantity <= 1 {
                    self.items.remove(index);
                    Ok(Applied::changed(CartReply::Removed(key)))
                } else {
                    self.items[index].quantity -= 1;
                    let quantity = self.items[index].quantity;
                    Ok(Applied::changed(CartReply::Line { key, quantity }))
                }
            }
            CartCommand::Clear => {
                let lines = self.items.len();
                self.items.clear();
                Ok(Applied::new(CartReply::Cleared { lines }, lines > 0))
            }
        }
    }
}
