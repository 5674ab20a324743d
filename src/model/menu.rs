//! Catalog data: menu items, nutrition facts and customization options.
//!
//! The catalog is immutable. Which parts of it a customer sees depends on the
//! `seasonal-menu`, `nutrition-info` and `enable-customization` flags, see
//! [`Menu::visible_items`].

use crate::cart_actor::CartError;
use crate::model::{CartItem, FlagKey, FlagSet};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuItemId(pub u32);

impl From<u32> for MenuItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for MenuItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionInfo {
    pub calories: u32,
    /// Grams.
    pub protein: u32,
    /// Grams.
    pub carbs: u32,
}

/// A named price delta a customer may select for an item. Deltas can be negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationOption {
    pub name: String,
    pub price: f64,
}

impl CustomizationOption {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Base price before customizations.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_info: Option<NutritionInfo>,
    #[serde(default)]
    pub seasonal: bool,
    #[serde(default)]
    pub customization_options: Vec<CustomizationOption>,
}

impl MenuItem {
    /// Creates a non-seasonal item with no nutrition facts or options.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category: category.into(),
            price,
            nutrition_info: None,
            seasonal: false,
            customization_options: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_nutrition(mut self, calories: u32, protein: u32, carbs: u32) -> Self {
        self.nutrition_info = Some(NutritionInfo {
            calories,
            protein,
            carbs,
        });
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, price: f64) -> Self {
        self.customization_options.push(CustomizationOption::new(name, price));
        self
    }

    pub fn seasonal(mut self) -> Self {
        self.seasonal = true;
        self
    }

    pub fn option(&self, name: &str) -> Option<&CustomizationOption> {
        self.customization_options.iter().find(|o| o.name == name)
    }
}

/// What a customer is shown for one item under the current flags.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<'a> {
    pub item: &'a MenuItem,
    /// `None` when nutrition info is switched off or the item has none.
    pub nutrition: Option<&'a NutritionInfo>,
    /// Empty when customization is switched off.
    pub options: &'a [CustomizationOption],
}

/// The shop's catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The coffee shop's standard catalog.
    pub fn coffee_shop() -> Self {
        Self::new(vec![
            MenuItem::new(1, "Classic Espresso", "Coffee", 3.50)
                .with_description("Rich and bold single shot of espresso")
                .with_nutrition(1, 0, 0)
                .with_option("Extra Shot", 0.75)
                .with_option("Decaf", 0.0),
            MenuItem::new(2, "Caramel Macchiato", "Coffee", 4.75)
                .with_description("Espresso with steamed milk and vanilla, topped with caramel")
                .with_nutrition(250, 10, 35)
                .with_option("Extra Shot", 0.75)
                .with_option("Sugar-Free Syrup", 0.25)
                .with_option("Soy Milk", 0.50)
                .with_option("Oat Milk", 0.50),
            MenuItem::new(3, "Pumpkin Spice Latte", "Coffee", 5.50)
                .with_description("Espresso with pumpkin spice, steamed milk, and whipped cream")
                .seasonal()
                .with_nutrition(380, 14, 52)
                .with_option("Extra Shot", 0.75)
                .with_option("No Whip", -0.25)
                .with_option("Sugar-Free Syrup", 0.25),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items visible under `flags`, in catalog order.
    pub fn visible_items(&self, flags: &FlagSet) -> Vec<MenuEntry<'_>> {
        let show_seasonal = flags.enabled(FlagKey::SeasonalMenu);
        let show_nutrition = flags.enabled(FlagKey::NutritionInfo);
        let customizable = flags.enabled(FlagKey::EnableCustomization);

        self.items
            .iter()
            .filter(|item| !item.seasonal || show_seasonal)
            .map(|item| MenuEntry {
                item,
                nutrition: item.nutrition_info.as_ref().filter(|_| show_nutrition),
                options: if customizable {
                    item.customization_options.as_slice()
                } else {
                    &[]
                },
            })
            .collect()
    }

    /// Builds a cart line for `id` with the named options selected.
    ///
    /// # Errors
    /// - [`CartError::UnknownItem`] if the item does not exist or is hidden.
    /// - [`CartError::CustomizationDisabled`] if options were selected while
    ///   customization is switched off.
    /// - Any error from [`CartItem::new`].
    pub fn cart_item(
        &self,
        id: MenuItemId,
        quantity: u32,
        selected: &[&str],
        flags: &FlagSet,
    ) -> Result<CartItem, CartError> {
        let item = self
            .find(id)
            .filter(|item| !item.seasonal || flags.enabled(FlagKey::SeasonalMenu))
            .ok_or(CartError::UnknownItem(id))?;

        if !selected.is_empty() && !flags.enabled(FlagKey::EnableCustomization) {
            return Err(CartError::CustomizationDisabled);
        }

        let options = selected
            .iter()
            .map(|name| {
                item.option(name)
                    .cloned()
                    .ok_or_else(|| CartError::UnknownCustomization {
                        item: id,
                        option: name.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        CartItem::new(item.clone(), quantity, options)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::coffee_shop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagValue;

    fn flags(seasonal: bool, nutrition: bool, customization: bool) -> FlagSet {
        let mut flags = FlagSet::default();
        flags.insert(FlagKey::SeasonalMenu, FlagValue::Bool(seasonal)).unwrap();
        flags.insert(FlagKey::NutritionInfo, FlagValue::Bool(nutrition)).unwrap();
        flags.insert(FlagKey::EnableCustomization, FlagValue::Bool(customization)).unwrap();
        flags
    }

    #[test]
    fn test_seasonal_items_hidden_by_default() {
        let menu = Menu::coffee_shop();
        let names: Vec<_> = menu
            .visible_items(&FlagSet::default())
            .iter()
            .map(|e| e.item.name.as_str())
            .collect();
        assert_eq!(names, ["Classic Espresso", "Caramel Macchiato"]);

        let with_seasonal = menu.visible_items(&flags(true, true, true));
        assert_eq!(with_seasonal.len(), 3);
    }

    #[test]
    fn test_nutrition_and_options_follow_flags() {
        let menu = Menu::coffee_shop();
        let entries = menu.visible_items(&flags(false, false, false));
        assert!(entries.iter().all(|e| e.nutrition.is_none()));
        assert!(entries.iter().all(|e| e.options.is_empty()));

        let entries = menu.visible_items(&flags(false, true, true));
        assert_eq!(entries[0].nutrition.map(|n| n.calories), Some(1));
        assert_eq!(entries[1].options.len(), 4);
    }

    #[test]
    fn test_cart_item_prices_selected_options() {
        let menu = Menu::coffee_shop();
        let line = menu
            .cart_item(MenuItemId(3), 1, &["No Whip", "Extra Shot"], &flags(true, true, true))
            .unwrap();
        assert_eq!(line.unit_price, 6.0);
    }

    #[test]
    fn test_cart_item_rejections() {
        let menu = Menu::coffee_shop();

        let hidden = menu.cart_item(MenuItemId(3), 1, &[], &FlagSet::default());
        assert_eq!(hidden, Err(CartError::UnknownItem(MenuItemId(3))));

        let disabled = menu.cart_item(MenuItemId(1), 1, &["Decaf"], &flags(false, true, false));
        assert_eq!(disabled, Err(CartError::CustomizationDisabled));

        let unknown = menu.cart_item(MenuItemId(1), 1, &["Whipped Cream"], &flags(false, true, true));
        assert!(matches!(unknown, Err(CartError::UnknownCustomization { .. })));

        let twice = menu.cart_item(MenuItemId(1), 1, &["Extra Shot", "Extra Shot"], &flags(false, true, true));
        assert!(matches!(twice, Err(CartError::DuplicateCustomization { .. })));
    }
}
