use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GameConfig};
use crate::dice::TownRng;
use crate::hunter::{Adventurer, Hunter};
use crate::narration::Mailbox;
use crate::shop::Outfitter;
use crate::town::{Departure, Town, TownError};

/// Town type the expedition drives.
pub type ExpeditionTown = Town<Outfitter, Adventurer, TownRng>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpeditionStatus {
    Ongoing,
    /// Crown, trophy and gem are all in the bag.
    Won,
    /// The hunter's purse went negative.
    Lost,
}

/// High-level session carrying one hunter from town to town.
#[derive(Debug, Clone)]
pub struct Expedition {
    config: GameConfig,
    seed: u64,
    towns_visited: u32,
    town: ExpeditionTown,
    carried: Mailbox,
}

impl Expedition {
    /// Start an expedition with the hunter arriving in the first town.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: GameConfig, hunter: Adventurer, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut town = build_town(&config, seed, 0);
        town.arrive(hunter);
        log::info!("expedition started with seed {seed}: {town}");
        Ok(Self {
            config,
            seed,
            towns_visited: 1,
            town,
            carried: Mailbox::new(),
        })
    }

    /// Try to cross out of the current town.
    ///
    /// On a successful crossing the hunter moves into a freshly built town
    /// and the crossing narration is kept for the next drain.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if the hunter has left the session.
    pub fn travel(&mut self) -> Result<Departure, TownError> {
        let departure = self.town.leave()?;
        if !departure.is_success() {
            return Ok(departure);
        }

        self.carried.post(self.town.latest_news());
        let hunter = self
            .town
            .release()
            .ok_or(TownError::NoOccupant { action: "travel" })?;
        let mut next = build_town(&self.config, self.seed, self.towns_visited);
        next.arrive(hunter);
        self.towns_visited = self.towns_visited.saturating_add(1);
        log::info!("arrived in town #{}: {next}", self.towns_visited);
        self.town = next;
        Ok(departure)
    }

    #[must_use]
    pub fn status(&self) -> ExpeditionStatus {
        match self.hunter() {
            Some(hunter) if hunter.has_all_treasures() => ExpeditionStatus::Won,
            Some(hunter) if hunter.is_broke() => ExpeditionStatus::Lost,
            Some(_) => ExpeditionStatus::Ongoing,
            None => ExpeditionStatus::Lost,
        }
    }

    /// Drain narration from crossings and the current town.
    pub fn latest_news(&mut self) -> String {
        self.carried.post(self.town.latest_news());
        self.carried.drain()
    }

    #[must_use]
    pub const fn town(&self) -> &ExpeditionTown {
        &self.town
    }

    pub const fn town_mut(&mut self) -> &mut ExpeditionTown {
        &mut self.town
    }

    #[must_use]
    pub const fn hunter(&self) -> Option<&Adventurer> {
        self.town.occupant()
    }

    #[must_use]
    pub const fn towns_visited(&self) -> u32 {
        self.towns_visited
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Gold held by the hunter, or zero once nobody is left.
    #[must_use]
    pub fn gold(&self) -> i32 {
        self.hunter().map_or(0, Hunter::gold)
    }
}

fn build_town(config: &GameConfig, seed: u64, index: u32) -> ExpeditionTown {
    Town::new(
        Outfitter::new(config.shop.clone()),
        config.toughness,
        config.difficulty,
        TownRng::for_town(seed, index),
    )
}
