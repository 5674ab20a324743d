//! Cart-wide promotion rules.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// How a promotion's `value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionType {
    #[default]
    None,
    /// `value` is a percentage of the subtotal.
    Percentage,
    /// `value` is a flat currency amount.
    Amount,
}

impl PromotionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionType::None => "none",
            PromotionType::Percentage => "percentage",
            PromotionType::Amount => "amount",
        }
    }
}

impl Display for PromotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromotionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "" => Ok(PromotionType::None),
            "percentage" => Ok(PromotionType::Percentage),
            "amount" => Ok(PromotionType::Amount),
            other => Err(format!("unknown promotion type '{other}'")),
        }
    }
}

/// A promotion as configured through flags.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRule {
    #[serde(rename = "type")]
    pub kind: PromotionType,
    pub value: f64,
    /// Subtotal required before the promotion applies.
    pub min_cart_value: f64,
}

impl PromotionRule {
    pub fn new(kind: PromotionType, value: f64, min_cart_value: f64) -> Self {
        Self {
            kind,
            value,
            min_cart_value,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn percentage(value: f64, min_cart_value: f64) -> Self {
        Self::new(PromotionType::Percentage, value, min_cart_value)
    }

    pub fn amount(value: f64, min_cart_value: f64) -> Self {
        Self::new(PromotionType::Amount, value, min_cart_value)
    }
}

/// The promotion recorded on a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionApplied {
    #[serde(flatten)]
    pub rule: PromotionRule,
    pub discount: f64,
}
