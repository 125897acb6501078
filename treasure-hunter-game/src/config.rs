//! Game and shop configuration.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::constants::{DEFAULT_SELL_RATIO, DEFAULT_STARTING_GOLD, DEFAULT_TOUGHNESS};
use crate::item::Item;

/// Difficulty toggle consulted by towns; towns never change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Normal,
    Easy,
}

impl Difficulty {
    #[must_use]
    pub const fn is_easy(self) -> bool {
        matches!(self, Self::Easy)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be between 0.00 and 1.00 (got {value:.2})")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("price for {item} must not be negative (got {price})")]
    NegativePrice { item: Item, price: i32 },
    #[error("starting gold must not be negative (got {0})")]
    NegativeStartingGold(i32),
    #[error("invalid configuration JSON: {0}")]
    Parse(String),
}

/// Price list and buy-back terms for an outfitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub prices: BTreeMap<Item, i32>,
    /// Fraction of the price paid back when a hunter sells an item.
    pub sell_ratio: f64,
}

impl Default for ShopConfig {
    fn default() -> Self {
        const PRICES: &[(Item, i32)] = &[
            (Item::Water, 2),
            (Item::Rope, 4),
            (Item::Machete, 6),
            (Item::Boots, 8),
            (Item::Shovel, 8),
            (Item::Sword, 10),
            (Item::Horse, 12),
            (Item::Boat, 20),
        ];
        Self {
            prices: PRICES.iter().copied().collect(),
            sell_ratio: DEFAULT_SELL_RATIO,
        }
    }
}

impl ShopConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Price of an item, or `None` when the outfitter does not stock it.
    #[must_use]
    pub fn price(&self, item: Item) -> Option<i32> {
        self.prices.get(&item).copied()
    }

    /// Validate the price list and buy-back ratio.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is negative or the sell ratio leaves `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("shop.sell_ratio", self.sell_ratio)?;
        if let Some((&item, &price)) = self.prices.iter().find(|(_, price)| **price < 0) {
            return Err(ConfigError::NegativePrice { item, price });
        }
        Ok(())
    }
}

/// Top-level settings for an expedition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Probability that a freshly built town is tough.
    pub toughness: f64,
    pub difficulty: Difficulty,
    pub starting_gold: i32,
    pub shop: ShopConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            toughness: DEFAULT_TOUGHNESS,
            difficulty: Difficulty::Normal,
            starting_gold: DEFAULT_STARTING_GOLD,
            shop: ShopConfig::default(),
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every field.
    ///
    /// # Errors
    ///
    /// Returns an error if toughness, starting gold or the shop terms are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("toughness", self.toughness)?;
        if self.starting_gold < 0 {
            return Err(ConfigError::NegativeStartingGold(self.starting_gold));
        }
        self.shop.validate()
    }

    /// Purse a new hunter starts with; easy mode doubles it.
    #[must_use]
    pub const fn opening_purse(&self) -> i32 {
        if self.difficulty.is_easy() {
            self.starting_gold.saturating_mul(2)
        } else {
            self.starting_gold
        }
    }
}

fn check_unit_range(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = GameConfig::default_config();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.shop.price(Item::Boat), Some(20));
        assert_eq!(cfg.opening_purse(), DEFAULT_STARTING_GOLD);
    }

    #[test]
    fn rejects_toughness_outside_unit_range() {
        let cfg = GameConfig {
            toughness: 1.5,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfUnitRange {
                field: "toughness",
                ..
            })
        ));
        let nan = GameConfig {
            toughness: f64::NAN,
            ..GameConfig::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn rejects_negative_prices() {
        let mut cfg = GameConfig::default();
        cfg.shop.prices.insert(Item::Rope, -1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NegativePrice {
                item: Item::Rope,
                price: -1
            })
        );
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let cfg = GameConfig::from_json(r#"{"toughness": 0.9, "difficulty": "easy"}"#).unwrap();
        assert!((cfg.toughness - 0.9).abs() < f64::EPSILON);
        assert_eq!(cfg.difficulty, Difficulty::Easy);
        assert_eq!(cfg.opening_purse(), DEFAULT_STARTING_GOLD * 2);
        assert_eq!(cfg.shop, ShopConfig::default());
    }

    #[test]
    fn json_reports_parse_and_range_errors() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(GameConfig::from_json(r#"{"shop": {"sell_ratio": 2.0}}"#).is_err());
    }
}
