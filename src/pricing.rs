//! Checkout pricing: subtotal, promotion and loyalty discounts, total.
//!
//! Everything here is pure. The loyalty *balance* lives in the order store;
//! callers pass in the points they actually redeemed for this order.
//!
//! Amounts are `f64` currency units. Every figure in a [`PriceBreakdown`] is
//! rounded to cents, and `total` is computed from the rounded figures, so
//! `total == round2(subtotal - promotion_discount - loyalty_discount)` holds
//! exactly whenever the result is non-negative.

use crate::model::{CartItem, PromotionApplied, PromotionRule, PromotionType};
use serde::{Deserialize, Serialize};

/// Loyalty points per currency unit.
pub const POINTS_PER_UNIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub promotion_discount: f64,
    pub loyalty_discount: f64,
    pub total: f64,
}

impl PriceBreakdown {
    /// The promotion record to store on an order, if the promotion applied.
    pub fn promotion_applied(&self, rule: &PromotionRule) -> Option<PromotionApplied> {
        (self.promotion_discount > 0.0).then_some(PromotionApplied {
            rule: *rule,
            discount: self.promotion_discount,
        })
    }

    /// The loyalty discount to store on an order, if any points were redeemed.
    pub fn loyalty_applied(&self) -> Option<f64> {
        (self.loyalty_discount > 0.0).then_some(self.loyalty_discount)
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Sum of unit price times quantity over all lines, rounded to cents.
pub fn subtotal(items: &[CartItem]) -> f64 {
    round2(items.iter().map(CartItem::line_total).sum())
}

/// Discount granted by `rule` on `subtotal`.
///
/// Zero when the rule is `none` or the subtotal is below the minimum. The
/// result is clamped to `[0, subtotal]`.
pub fn promotion_discount(subtotal: f64, rule: &PromotionRule) -> f64 {
    if subtotal < rule.min_cart_value {
        return 0.0;
    }
    let raw = match rule.kind {
        PromotionType::None => 0.0,
        PromotionType::Percentage => subtotal * rule.value / 100.0,
        PromotionType::Amount => rule.value,
    };
    round2(raw.clamp(0.0, subtotal))
}

/// Currency value of `points` redeemed loyalty points.
pub fn loyalty_discount(points: u32) -> f64 {
    round2(f64::from(points) / f64::from(POINTS_PER_UNIT))
}

/// Prices a cart.
///
/// The total never goes below zero; a loyalty discount larger than what is
/// left after the promotion is not carried over.
pub fn price(items: &[CartItem], rule: &PromotionRule, redeemed_points: u32) -> PriceBreakdown {
    let subtotal = subtotal(items);
    let promotion_discount = promotion_discount(subtotal, rule);
    let loyalty_discount = loyalty_discount(redeemed_points);
    let total = round2(subtotal - promotion_discount - loyalty_discount).max(0.0);

    PriceBreakdown {
        subtotal,
        promotion_discount,
        loyalty_discount,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, MenuItem};

    fn line(id: u32, price: f64, quantity: u32) -> CartItem {
        CartItem::new(MenuItem::new(id, format!("item {id}"), "Coffee", price), quantity, vec![]).unwrap()
    }

    fn two_item_cart() -> Vec<CartItem> {
        vec![line(1, 4.25, 1), line(2, 3.75, 1)]
    }

    #[test]
    fn test_percentage_promotion() {
        let breakdown = price(&two_item_cart(), &PromotionRule::percentage(10.0, 5.0), 0);
        assert_eq!(breakdown.subtotal, 8.00);
        assert_eq!(breakdown.promotion_discount, 0.80);
        assert_eq!(breakdown.loyalty_discount, 0.0);
        assert_eq!(breakdown.total, 7.20);
    }

    #[test]
    fn test_percentage_promotion_with_loyalty() {
        let breakdown = price(&two_item_cart(), &PromotionRule::percentage(10.0, 5.0), 150);
        assert_eq!(breakdown.loyalty_discount, 1.50);
        assert_eq!(breakdown.total, 5.70);
    }

    #[test]
    fn test_promotion_requires_minimum() {
        let cart = two_item_cart();
        for rule in [
            PromotionRule::percentage(50.0, 8.01),
            PromotionRule::amount(3.0, 100.0),
        ] {
            assert_eq!(price(&cart, &rule, 0).promotion_discount, 0.0);
        }
        // Exactly at the minimum applies.
        assert_eq!(price(&cart, &PromotionRule::amount(3.0, 8.0), 0).promotion_discount, 3.0);
    }

    #[test]
    fn test_none_promotion_ignores_value() {
        let rule = PromotionRule::new(PromotionType::None, 25.0, 0.0);
        let breakdown = price(&two_item_cart(), &rule, 0);
        assert_eq!(breakdown.promotion_discount, 0.0);
        assert_eq!(breakdown.promotion_applied(&rule), None);
    }

    #[test]
    fn test_amount_promotion_is_clamped_and_total_floored() {
        let breakdown = price(&two_item_cart(), &PromotionRule::amount(20.0, 0.0), 300);
        assert_eq!(breakdown.promotion_discount, 8.0);
        assert_eq!(breakdown.total, 0.0);
    }

    #[test]
    fn test_quantities_and_rounding() {
        let cart = vec![line(1, 3.35, 3), line(2, 0.10, 7)];
        let breakdown = price(&cart, &PromotionRule::percentage(15.0, 0.0), 37);
        assert_eq!(breakdown.subtotal, 10.75);
        assert_eq!(breakdown.promotion_discount, 1.61);
        assert_eq!(breakdown.loyalty_discount, 0.37);
        assert_eq!(breakdown.total, 8.77);
    }

    #[test]
    fn test_total_matches_rounded_difference_for_many_carts() {
        let rules = [
            PromotionRule::none(),
            PromotionRule::percentage(10.0, 5.0),
            PromotionRule::percentage(33.0, 0.0),
            PromotionRule::amount(1.25, 6.0),
        ];
        let prices = [0.5, 1.99, 3.5, 4.25, 4.75, 5.5];
        for (i, unit) in prices.iter().enumerate() {
            for quantity in 1..=4 {
                let cart = vec![line(1, *unit, quantity), line(2, prices[(i + 1) % prices.len()], 1)];
                for rule in &rules {
                    for points in [0, 50, 150] {
                        let b = price(&cart, rule, points);
                        assert_eq!(b.total, round2(b.subtotal - b.promotion_discount - b.loyalty_discount));
                        if b.subtotal < rule.min_cart_value {
                            assert_eq!(b.promotion_discount, 0.0);
                        }
                    }
                }
            }
        }
    }
}
