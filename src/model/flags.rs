//! The closed set of feature flags and their defaults.
//!
//! Flags are an enum, not a string registry: adding a flag means adding a
//! variant, and the compiler then insists on a default in
//! [`FlagKey::default_value`]. Keys use the kebab-case names shared with the
//! remote flag service (`seasonal-menu`, `promotion-discount`, ...).

use crate::flag_actor::FlagError;
use crate::model::{PromotionRule, PromotionType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKey {
    // Menu
    SeasonalMenu,
    NutritionInfo,
    EnableCustomization,
    // Checkout
    OnlinePayment,
    LoyaltyPoints,
    EstimatedPickupTime,
    LiveOrderTracking,
    // UI
    DarkMode,
    /// Banner text; empty hides the banner.
    PromotionalBanner,
    // Promotions
    PromotionDiscount,
    PromotionDiscountType,
    PromotionDiscountMinCart,
}

impl FlagKey {
    pub const ALL: [FlagKey; 12] = [
        FlagKey::SeasonalMenu,
        FlagKey::NutritionInfo,
        FlagKey::EnableCustomization,
        FlagKey::OnlinePayment,
        FlagKey::LoyaltyPoints,
        FlagKey::EstimatedPickupTime,
        FlagKey::LiveOrderTracking,
        FlagKey::DarkMode,
        FlagKey::PromotionalBanner,
        FlagKey::PromotionDiscount,
        FlagKey::PromotionDiscountType,
        FlagKey::PromotionDiscountMinCart,
    ];

    /// Stable kebab-case name, used in snapshots and by the remote service.
    pub fn key(self) -> &'static str {
        match self {
            FlagKey::SeasonalMenu => "seasonal-menu",
            FlagKey::NutritionInfo => "nutrition-info",
            FlagKey::EnableCustomization => "enable-customization",
            FlagKey::OnlinePayment => "online-payment",
            FlagKey::LoyaltyPoints => "loyalty-points",
            FlagKey::EstimatedPickupTime => "estimated-pickup-time",
            FlagKey::LiveOrderTracking => "live-order-tracking",
            FlagKey::DarkMode => "dark-mode",
            FlagKey::PromotionalBanner => "promotional-banner",
            FlagKey::PromotionDiscount => "promotion-discount",
            FlagKey::PromotionDiscountType => "promotion-discount-type",
            FlagKey::PromotionDiscountMinCart => "promotion-discount-min-cart",
        }
    }

    /// Compile-time default for this flag.
    pub fn default_value(self) -> FlagValue {
        match self {
            FlagKey::SeasonalMenu => FlagValue::Bool(false),
            FlagKey::NutritionInfo => FlagValue::Bool(true),
            FlagKey::EnableCustomization => FlagValue::Bool(true),
            FlagKey::OnlinePayment => FlagValue::Bool(true),
            FlagKey::LoyaltyPoints => FlagValue::Bool(false),
            FlagKey::EstimatedPickupTime => FlagValue::Bool(true),
            FlagKey::LiveOrderTracking => FlagValue::Bool(false),
            FlagKey::DarkMode => FlagValue::Bool(false),
            FlagKey::PromotionalBanner => FlagValue::Text(String::new()),
            FlagKey::PromotionDiscount => FlagValue::Number(0.0),
            FlagKey::PromotionDiscountType => FlagValue::Text(PromotionType::None.as_str().to_string()),
            FlagKey::PromotionDiscountMinCart => FlagValue::Number(0.0),
        }
    }

    pub fn kind(self) -> FlagKind {
        self.default_value().kind()
    }
}

impl Display for FlagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FlagKey {
    type Err = FlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FlagKey::ALL
            .into_iter()
            .find(|flag| flag.key() == s)
            .ok_or_else(|| FlagError::UnknownFlag(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Boolean,
    Text,
    Number,
}

impl Display for FlagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FlagKind::Boolean => "boolean",
            FlagKind::Text => "string",
            FlagKind::Number => "number",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FlagValue {
    pub fn kind(&self) -> FlagKind {
        match self {
            FlagValue::Bool(_) => FlagKind::Boolean,
            FlagValue::Number(_) => FlagKind::Number,
            FlagValue::Text(_) => FlagKind::Text,
        }
    }

    /// Converts a JSON scalar; arrays, objects and null have no flag equivalent.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(FlagValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(FlagValue::Number),
            serde_json::Value::String(s) => Some(FlagValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        FlagValue::Bool(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        FlagValue::Number(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        FlagValue::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        FlagValue::Text(value)
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::Number(n) => write!(f, "{n}"),
            FlagValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// Outcome of merging remote variables into a [`FlagSet`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteMerge {
    pub applied: Vec<FlagKey>,
    /// Remote names that were unknown or carried a value of the wrong type.
    pub skipped: Vec<String>,
}

/// Current value of every flag. This is the flag store's state.
///
/// Snapshots are a plain `name -> value` object. Loading one runs the same
/// checks as [`FlagSet::insert`], so a blob with an unknown name or a
/// mistyped value is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<FlagKey, FlagValue>", into = "BTreeMap<FlagKey, FlagValue>")]
pub struct FlagSet {
    values: BTreeMap<FlagKey, FlagValue>,
}

impl TryFrom<BTreeMap<FlagKey, FlagValue>> for FlagSet {
    type Error = FlagError;

    fn try_from(values: BTreeMap<FlagKey, FlagValue>) -> Result<Self, Self::Error> {
        for (flag, value) in &values {
            validate(*flag, value)?;
        }
        Ok(Self { values })
    }
}

impl From<FlagSet> for BTreeMap<FlagKey, FlagValue> {
    fn from(flags: FlagSet) -> Self {
        flags.values
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self {
            values: FlagKey::ALL.into_iter().map(|flag| (flag, flag.default_value())).collect(),
        }
    }
}

impl FlagSet {
    /// Current value, or the default if the snapshot predates the flag.
    pub fn get(&self, flag: FlagKey) -> FlagValue {
        self.values.get(&flag).cloned().unwrap_or_else(|| flag.default_value())
    }

    /// Truthiness of a flag: booleans as-is, text when non-empty, numbers when non-zero.
    pub fn enabled(&self, flag: FlagKey) -> bool {
        match self.get(flag) {
            FlagValue::Bool(b) => b,
            FlagValue::Text(s) => !s.is_empty(),
            FlagValue::Number(n) => n != 0.0,
        }
    }

    pub fn number(&self, flag: FlagKey) -> f64 {
        match self.get(flag) {
            FlagValue::Number(n) => n,
            _ => 0.0,
        }
    }

    pub fn text(&self, flag: FlagKey) -> String {
        match self.get(flag) {
            FlagValue::Text(s) => s,
            other => other.to_string(),
        }
    }

    /// Overwrites one flag, returning the previous value.
    ///
    /// # Errors
    /// [`FlagError::TypeMismatch`] if `value` has the wrong type for `flag`,
    /// [`FlagError::InvalidValue`] for an unrecognised promotion type.
    pub fn insert(&mut self, flag: FlagKey, value: FlagValue) -> Result<FlagValue, FlagError> {
        validate(flag, &value)?;
        let previous = self.get(flag);
        self.values.insert(flag, value);
        Ok(previous)
    }

    /// Merges remote variables keyed by flag name. Invalid entries are skipped.
    pub fn merge_remote(&mut self, variables: &serde_json::Map<String, serde_json::Value>) -> RemoteMerge {
        let mut merge = RemoteMerge::default();
        for (name, raw) in variables {
            let parsed = name
                .parse::<FlagKey>()
                .ok()
                .zip(FlagValue::from_json(raw))
                .filter(|(flag, value)| validate(*flag, value).is_ok());
            match parsed {
                Some((flag, value)) => {
                    self.values.insert(flag, value);
                    merge.applied.push(flag);
                }
                None => merge.skipped.push(name.clone()),
            }
        }
        merge
    }

    /// The promotion described by the three promotion flags.
    pub fn promotion(&self) -> PromotionRule {
        let kind = self
            .text(FlagKey::PromotionDiscountType)
            .parse()
            .unwrap_or(PromotionType::None);
        PromotionRule::new(
            kind,
            self.number(FlagKey::PromotionDiscount),
            self.number(FlagKey::PromotionDiscountMinCart),
        )
    }

    /// Banner text, if the banner is shown.
    pub fn banner(&self) -> Option<String> {
        Some(self.text(FlagKey::PromotionalBanner)).filter(|text| !text.is_empty())
    }

    /// All flags with their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FlagKey, FlagValue)> + '_ {
        FlagKey::ALL.into_iter().map(|flag| (flag, self.get(flag)))
    }
}

fn validate(flag: FlagKey, value: &FlagValue) -> Result<(), FlagError> {
    let expected = flag.kind();
    if value.kind() != expected {
        return Err(FlagError::TypeMismatch {
            flag,
            expected,
            found: value.kind(),
        });
    }
    if let (FlagKey::PromotionDiscountType, FlagValue::Text(text)) = (flag, value) {
        text.parse::<PromotionType>()
            .map_err(|_| FlagError::InvalidValue {
                flag,
                value: text.clone(),
            })?;
    }
    Ok(())
}
