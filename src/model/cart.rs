//! Cart lines and the cart store's state.
//!
//! # Store Framework
//! [`Cart`] implements [`StoreState`](crate::framework::StoreState) in
//! [`crate::cart_actor`], which owns it inside a
//! [`StoreActor`](crate::framework::StoreActor).

use crate::cart_actor::CartError;
use crate::model::{CustomizationOption, MenuItem, MenuItemId};
use crate::pricing::round2;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
    #[serde(default)]
    pub selected_customizations: Vec<CustomizationOption>,
    /// Base price plus the selected deltas, for one unit.
    pub unit_price: f64,
}

impl CartItem {
    /// Creates a cart line.
    ///
    /// # Arguments
    /// * `item` - Catalog entry being ordered
    /// * `quantity` - Number of units, at least 1
    /// * `selected` - Options chosen from `item.customization_options`
    ///
    /// # Errors
    /// [`CartError::InvalidQuantity`] for a zero quantity,
    /// [`CartError::UnknownCustomization`] for an option the item does not offer
    /// and [`CartError::DuplicateCustomization`] for an option selected twice.
    pub fn new(item: MenuItem, quantity: u32, selected: Vec<CustomizationOption>) -> Result<Self, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if let Some(unknown) = selected.iter().find(|o| !item.customization_options.contains(o)) {
            return Err(CartError::UnknownCustomization {
                item: item.id,
                option: unknown.name.clone(),
            });
        }
        for (i, option) in selected.iter().enumerate() {
            if selected[..i].iter().any(|earlier| earlier.name == option.name) {
                return Err(CartError::DuplicateCustomization {
                    item: item.id,
                    option: option.name.clone(),
                });
            }
        }

        let extras: f64 = selected.iter().map(|o| o.price).sum();
        let unit_price = round2(item.price + extras);
        Ok(Self {
            item,
            quantity,
            selected_customizations: selected,
            unit_price,
        })
    }

    /// Merge identity of this line.
    pub fn key(&self) -> CartLineKey {
        CartLineKey::new(self.item.id, self.selected_customizations.iter().map(|o| o.name.as_str()))
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Identifies a cart line: the menu item plus the *set* of selected options.
///
/// Option names are kept sorted and deduplicated, so selection order does not
/// produce distinct lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartLineKey {
    pub item_id: MenuItemId,
    pub customizations: Vec<String>,
}

impl CartLineKey {
    pub fn new<'a>(item_id: MenuItemId, customizations: impl IntoIterator<Item = &'a str>) -> Self {
        let mut customizations: Vec<String> = customizations.into_iter().map(str::to_string).collect();
        customizations.sort();
        customizations.dedup();
        Self {
            item_id,
            customizations,
        }
    }

    /// Key for an item with no options selected.
    pub fn plain(item_id: MenuItemId) -> Self {
        Self::new(item_id, std::iter::empty())
    }
}

impl Display for CartLineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.customizations.is_empty() {
            write!(f, "{}", self.item_id)
        } else {
            write!(f, "{}[{}]", self.item_id, self.customizations.join("+"))
        }
    }
}

/// The cart store's state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn line(&self, key: &CartLineKey) -> Option<&CartItem> {
        self.items.iter().find(|line| &line.key() == key)
    }
}
