//! Kit items and treasures a hunter can carry.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::dice;

/// Equipment that lives in a hunter's kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    Water,
    Rope,
    Machete,
    Boots,
    Shovel,
    Sword,
    Horse,
    Boat,
}

impl Item {
    pub const ALL: [Self; 8] = [
        Self::Water,
        Self::Rope,
        Self::Machete,
        Self::Boots,
        Self::Shovel,
        Self::Sword,
        Self::Horse,
        Self::Boat,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Rope => "rope",
            Self::Machete => "machete",
            Self::Boots => "boots",
            Self::Shovel => "shovel",
            Self::Sword => "sword",
            Self::Horse => "horse",
            Self::Boat => "boat",
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item '{0}'")]
pub struct ParseItemError(pub String);

impl FromStr for Item {
    type Err = ParseItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|item| item.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseItemError(wanted.to_string()))
    }
}

/// What a town's search turns up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Treasure {
    Dust,
    Crown,
    Trophy,
    Gem,
}

impl Treasure {
    pub const ALL: [Self; 4] = [Self::Dust, Self::Crown, Self::Trophy, Self::Gem];

    /// Treasures worth keeping; collecting all of them wins the game.
    pub const COLLECTIBLE: [Self; 3] = [Self::Crown, Self::Trophy, Self::Gem];

    /// Uniform draw over the four outcomes, consuming one roll.
    pub fn roll<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let face = dice::die(rng, 4);
        Self::ALL[usize::try_from(face - 1).unwrap_or(0)]
    }

    #[must_use]
    pub const fn is_dust(self) -> bool {
        matches!(self, Self::Dust)
    }
}

impl fmt::Display for Treasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dust => "dust",
            Self::Crown => "a crown",
            Self::Trophy => "a trophy",
            Self::Gem => "a gem",
        })
    }
}
