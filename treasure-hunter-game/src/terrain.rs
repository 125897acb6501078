//! Terrain surrounding a town and the item needed to cross it.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dice;
use crate::hunter::Hunter;
use crate::item::Item;

/// The obstacle a hunter must cross to leave a town.
///
/// Each variant is paired with exactly one required item and never changes
/// once a town has rolled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Mountains,
    Ocean,
    Plains,
    Desert,
    Jungle,
    Marsh,
}

impl Terrain {
    pub const ALL: [Self; 6] = [
        Self::Mountains,
        Self::Ocean,
        Self::Plains,
        Self::Desert,
        Self::Jungle,
        Self::Marsh,
    ];

    /// Uniform draw over the six terrain pairs, consuming one roll.
    pub fn roll<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let face = dice::die(rng, 6);
        Self::ALL[usize::try_from(face - 1).unwrap_or(0)]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
            Self::Plains => "Plains",
            Self::Desert => "Desert",
            Self::Jungle => "Jungle",
            Self::Marsh => "Marsh",
        }
    }

    #[must_use]
    pub const fn required_item(self) -> Item {
        match self {
            Self::Mountains => Item::Rope,
            Self::Ocean => Item::Boat,
            Self::Plains => Item::Horse,
            Self::Desert => Item::Water,
            Self::Jungle => Item::Machete,
            Self::Marsh => Item::Boots,
        }
    }

    /// Whether the hunter carries what this terrain demands.
    pub fn can_cross<H: Hunter + ?Sized>(self, hunter: &H) -> bool {
        hunter.has_item(self.required_item())
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
