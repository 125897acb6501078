//! The player contract the town calls into, plus the stock implementation.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::item::{Item, Treasure};

/// Kit items stored inline; a full kit is eight items.
pub type Kit = SmallVec<[Item; 8]>;

/// Treasure bag stored inline; only three treasures are collectible.
pub type TreasureBag = SmallVec<[Treasure; 3]>;

/// Capabilities a town needs from whoever is visiting it.
pub trait Hunter {
    fn name(&self) -> &str;

    fn has_item(&self, item: Item) -> bool;

    /// Add an item to the kit. Returns `false` when it was already there.
    fn add_item(&mut self, item: Item) -> bool;

    /// Remove an item from the kit. Returns `false` when it was missing.
    fn remove_item(&mut self, item: Item) -> bool;

    fn gold(&self) -> i32;

    fn change_gold(&mut self, delta: i32);

    fn owns_treasure(&self, treasure: Treasure) -> bool;

    /// Add a treasure to the bag. Returns `false` for dust or duplicates.
    fn add_treasure(&mut self, treasure: Treasure) -> bool;
}

/// Stock hunter used by the expedition and the terminal driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adventurer {
    name: String,
    gold: i32,
    #[serde(default)]
    kit: Kit,
    #[serde(default)]
    treasures: TreasureBag,
}

impl Adventurer {
    #[must_use]
    pub fn new(name: impl Into<String>, gold: i32) -> Self {
        Self {
            name: name.into(),
            gold,
            kit: Kit::new(),
            treasures: TreasureBag::new(),
        }
    }

    /// Builder-style helper for seeding a kit.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        for item in items {
            self.add_item(item);
        }
        self
    }

    #[must_use]
    pub fn kit(&self) -> &[Item] {
        &self.kit
    }

    #[must_use]
    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    /// A lost brawl can overdraw the purse; a negative balance ends the game.
    #[must_use]
    pub const fn is_broke(&self) -> bool {
        self.gold < 0
    }

    #[must_use]
    pub fn has_all_treasures(&self) -> bool {
        Treasure::COLLECTIBLE
            .iter()
            .all(|treasure| self.treasures.contains(treasure))
    }
}

impl Hunter for Adventurer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_item(&self, item: Item) -> bool {
        self.kit.contains(&item)
    }

    fn add_item(&mut self, item: Item) -> bool {
        if self.has_item(item) {
            return false;
        }
        self.kit.push(item);
        true
    }

    fn remove_item(&mut self, item: Item) -> bool {
        let before = self.kit.len();
        self.kit.retain(|held| *held != item);
        self.kit.len() != before
    }

    fn gold(&self) -> i32 {
        self.gold
    }

    fn change_gold(&mut self, delta: i32) {
        self.gold = self.gold.saturating_add(delta);
    }

    fn owns_treasure(&self, treasure: Treasure) -> bool {
        self.treasures.contains(&treasure)
    }

    fn add_treasure(&mut self, treasure: Treasure) -> bool {
        if treasure.is_dust() || self.owns_treasure(treasure) {
            return false;
        }
        self.treasures.push(treasure);
        true
    }
}
