//! Town interaction state machine.
//!
//! A town hosts one hunter at a time. Arrival binds the hunter and rolls the
//! treasure hidden here; every other action works against that occupant and
//! posts narration to the town's mailbox for the driver to drain.
//!
//! Randomness comes from the source handed to [`Town::new`]. Each roll takes
//! exactly one draw, in a fixed order per action, so a seeded or scripted
//! source reproduces outcomes draw for draw.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::Difficulty;
use crate::constants::{
    ALREADY_DUG, ALREADY_SEARCHED, BRAWL_GOLD_SIDES, BRAWL_LOST, BRAWL_START, BRAWL_WON,
    BRAWLER_SURRENDERS, DIG_GOLD_SIDES, DIG_STRIKE_CHANCE, DUPLICATE_TREASURE, DUST_NOT_KEPT,
    EASY_BRAWL_LOSS_CHANCE, ITEM_BREAK_CHANCE, MILD_TOWN_AMBIENCE, MILD_TROUBLE_CHANCE,
    NO_SHOVEL, NO_TROUBLE, ONLY_DIRT, TOUGH_TOWN_AMBIENCE, TOUGH_TROUBLE_CHANCE, TREASURE_KEPT,
};
use crate::dice::{self, TownRng};
use crate::hunter::Hunter;
use crate::item::{Item, Treasure};
use crate::narration::Mailbox;
use crate::numbers::gold_delta;
use crate::shop::{Shop, ShopIntent};
use crate::terrain::Terrain;

/// Caller contract violations. Soft failures are narrated instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TownError {
    #[error("no hunter is in town to {action}")]
    NoOccupant { action: &'static str },
}

/// Result of trying to leave town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Departure {
    Crossed {
        terrain: Terrain,
        item: Item,
        item_lost: bool,
    },
    Blocked {
        missing: Item,
    },
}

impl Departure {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Crossed { .. })
    }
}

/// Result of looking for trouble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TroubleOutcome {
    Quiet,
    /// The brawler saw the sword and paid up without a fight.
    Surrender {
        gold: u32,
    },
    Won {
        gold: u32,
    },
    Lost {
        gold: u32,
    },
}

impl TroubleOutcome {
    /// Signed change applied to the hunter's purse.
    #[must_use]
    pub fn gold_delta(self) -> i32 {
        match self {
            Self::Quiet => 0,
            Self::Surrender { gold } | Self::Won { gold } => gold_delta(gold),
            Self::Lost { gold } => -gold_delta(gold),
        }
    }
}

/// Result of searching the town for treasure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    AlreadySearched,
    Dust,
    Duplicate(Treasure),
    Collected(Treasure),
}

/// Result of digging for gold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigOutcome {
    AlreadyDug,
    NoShovel,
    Struck { gold: u32 },
    Dirt,
}

#[derive(Debug, Clone)]
pub struct Town<S, H, R = TownRng> {
    shop: S,
    terrain: Terrain,
    tough: bool,
    difficulty: Difficulty,
    occupant: Option<H>,
    treasure: Treasure,
    searched: bool,
    dug: bool,
    news: Mailbox,
    rng: R,
}

impl<S, H, R> Town<S, H, R>
where
    S: Shop,
    H: Hunter,
    R: RngCore,
{
    /// Build a town, rolling its terrain and then its toughness.
    ///
    /// `toughness` is the probability that the town turns out tough.
    pub fn new(shop: S, toughness: f64, difficulty: Difficulty, mut rng: R) -> Self {
        let terrain = Terrain::roll(&mut rng);
        let tough = dice::ratio(&mut rng) < toughness;
        log::debug!("built town: terrain={terrain} tough={tough} difficulty={difficulty:?}");
        Self::from_parts(shop, terrain, tough, difficulty, rng)
    }

    /// Build a town with a known terrain and toughness, consuming no draws.
    pub const fn from_parts(
        shop: S,
        terrain: Terrain,
        tough: bool,
        difficulty: Difficulty,
        rng: R,
    ) -> Self {
        Self {
            shop,
            terrain,
            tough,
            difficulty,
            occupant: None,
            treasure: Treasure::Dust,
            searched: false,
            dug: false,
            news: Mailbox::new(),
            rng,
        }
    }

    /// Bind a hunter to the town and roll the treasure hidden here.
    ///
    /// The treasure is rolled again on every arrival. A hunter already in
    /// town is displaced and handed back.
    pub fn arrive(&mut self, hunter: H) -> Option<H> {
        self.news
            .post(format!("Welcome to town, {}.", hunter.name()));
        self.treasure = Treasure::roll(&mut self.rng);
        log::debug!("{} arrived; treasure here is {:?}", hunter.name(), self.treasure);
        self.news.post(if self.tough {
            TOUGH_TOWN_AMBIENCE
        } else {
            MILD_TOWN_AMBIENCE
        });
        self.occupant.replace(hunter)
    }

    /// Try to cross the surrounding terrain.
    ///
    /// Crossing always rolls for the item breaking. Outside easy mode a
    /// broken item is removed from the kit. A successful crossing starts a
    /// new visit, so the search and dig flags reset.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if nobody has arrived.
    pub fn leave(&mut self) -> Result<Departure, TownError> {
        let hunter = bound(&mut self.occupant, "leave")?;
        let item = self.terrain.required_item();
        if !self.terrain.can_cross(hunter) {
            self.news.post(format!(
                "You can't leave town, {}. You don't have a {item}.",
                hunter.name()
            ));
            return Ok(Departure::Blocked { missing: item });
        }

        self.news
            .post(format!("You used your {item} to cross the {}.", self.terrain));
        let broke = dice::ratio(&mut self.rng) < ITEM_BREAK_CHANCE;
        let item_lost = broke && !self.difficulty.is_easy();
        if item_lost {
            hunter.remove_item(item);
            self.news
                .post(format!("Unfortunately, you lost your {item}."));
        }
        log::debug!("crossed {} (broke={broke}, lost={item_lost})", self.terrain);

        self.searched = false;
        self.dug = false;
        Ok(Departure::Crossed {
            terrain: self.terrain,
            item,
            item_lost,
        })
    }

    /// Hand the occupant to the shop.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if nobody has arrived.
    pub fn enter_shop(&mut self, intent: ShopIntent) -> Result<(), TownError> {
        let hunter = bound(&mut self.occupant, "shop")?;
        self.shop.enter(hunter, intent);
        Ok(())
    }

    /// Pick a fight for gold.
    ///
    /// Tough towns turn up fights more often and are harder to win in. A
    /// sword wins outright; otherwise the brawl is rolled, with easy mode
    /// lowering the loss threshold.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if nobody has arrived.
    pub fn look_for_trouble(&mut self) -> Result<TroubleOutcome, TownError> {
        let hunter = bound(&mut self.occupant, "look for trouble")?;
        let trouble_chance = if self.tough {
            TOUGH_TROUBLE_CHANCE
        } else {
            MILD_TROUBLE_CHANCE
        };

        if dice::ratio(&mut self.rng) > trouble_chance {
            self.news.replace(NO_TROUBLE);
            return Ok(TroubleOutcome::Quiet);
        }

        if hunter.has_item(Item::Sword) {
            let gold = dice::die(&mut self.rng, BRAWL_GOLD_SIDES);
            self.news.post(BRAWLER_SURRENDERS);
            self.news
                .post(format!("You won the brawl and receive {gold} gold."));
            hunter.change_gold(gold_delta(gold));
            return Ok(TroubleOutcome::Surrender { gold });
        }

        self.news.post(BRAWL_START);
        let gold = dice::die(&mut self.rng, BRAWL_GOLD_SIDES);
        let loss_threshold = if self.difficulty.is_easy() {
            EASY_BRAWL_LOSS_CHANCE
        } else {
            trouble_chance
        };
        let outcome = if dice::ratio(&mut self.rng) > loss_threshold {
            self.news.post(BRAWL_WON);
            self.news
                .post(format!("You won the brawl and receive {gold} gold."));
            TroubleOutcome::Won { gold }
        } else {
            self.news.post(BRAWL_LOST);
            self.news
                .post(format!("You lost the brawl and pay {gold} gold."));
            TroubleOutcome::Lost { gold }
        };
        hunter.change_gold(outcome.gold_delta());
        log::debug!("brawl in {} town: {outcome:?}", self.tough_label());
        Ok(outcome)
    }

    /// Search the town once per visit for its treasure.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if nobody has arrived.
    pub fn find_treasure(&mut self) -> Result<SearchOutcome, TownError> {
        let hunter = bound(&mut self.occupant, "search")?;
        if self.searched {
            self.news.post(ALREADY_SEARCHED);
            return Ok(SearchOutcome::AlreadySearched);
        }
        self.searched = true;

        let treasure = self.treasure;
        self.news.post(format!("You found {treasure}"));
        let outcome = if treasure.is_dust() {
            self.news.post(DUST_NOT_KEPT);
            SearchOutcome::Dust
        } else if hunter.owns_treasure(treasure) {
            self.news.post(DUPLICATE_TREASURE);
            SearchOutcome::Duplicate(treasure)
        } else {
            hunter.add_treasure(treasure);
            self.news.post(TREASURE_KEPT);
            SearchOutcome::Collected(treasure)
        };
        Ok(outcome)
    }

    /// Dig once per visit for buried gold. Needs a shovel.
    ///
    /// # Errors
    ///
    /// Returns [`TownError::NoOccupant`] if nobody has arrived.
    pub fn dig(&mut self) -> Result<DigOutcome, TownError> {
        let hunter = bound(&mut self.occupant, "dig")?;
        if self.dug {
            self.news.post(ALREADY_DUG);
            return Ok(DigOutcome::AlreadyDug);
        }
        if !hunter.has_item(Item::Shovel) {
            self.news.post(NO_SHOVEL);
            return Ok(DigOutcome::NoShovel);
        }

        self.dug = true;
        if dice::ratio(&mut self.rng) < DIG_STRIKE_CHANCE {
            let gold = dice::die(&mut self.rng, DIG_GOLD_SIDES);
            hunter.change_gold(gold_delta(gold));
            self.news.post(format!("You dug up {gold} gold!"));
            Ok(DigOutcome::Struck { gold })
        } else {
            self.news.post(ONLY_DIRT);
            Ok(DigOutcome::Dirt)
        }
    }

    /// Drain the narration posted since the last call.
    pub fn latest_news(&mut self) -> String {
        self.news.drain()
    }

    /// Move the occupant out of town, leaving it empty.
    pub fn release(&mut self) -> Option<H> {
        self.occupant.take()
    }

    fn tough_label(&self) -> &'static str {
        if self.tough { "tough" } else { "mild" }
    }
}

impl<S, H, R> Town<S, H, R> {
    #[must_use]
    pub const fn terrain(&self) -> Terrain {
        self.terrain
    }

    #[must_use]
    pub const fn is_tough(&self) -> bool {
        self.tough
    }

    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Treasure rolled at the latest arrival; dust before anyone arrives.
    #[must_use]
    pub const fn treasure(&self) -> Treasure {
        self.treasure
    }

    #[must_use]
    pub const fn searched(&self) -> bool {
        self.searched
    }

    #[must_use]
    pub const fn dug(&self) -> bool {
        self.dug
    }

    #[must_use]
    pub const fn occupant(&self) -> Option<&H> {
        self.occupant.as_ref()
    }

    pub const fn occupant_mut(&mut self) -> Option<&mut H> {
        self.occupant.as_mut()
    }

    #[must_use]
    pub const fn shop(&self) -> &S {
        &self.shop
    }

    pub const fn shop_mut(&mut self) -> &mut S {
        &mut self.shop
    }

    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }
}

impl<S, H, R> fmt::Display for Town<S, H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "This nice little town is surrounded by {}.",
            self.terrain
        )
    }
}

fn bound<'a, H>(occupant: &'a mut Option<H>, action: &'static str) -> Result<&'a mut H, TownError> {
    occupant.as_mut().ok_or(TownError::NoOccupant { action })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunter::Adventurer;
    use crate::shop::Outfitter;
    use std::collections::VecDeque;

    const LOW: u32 = 0;
    const HIGH: u32 = u32::MAX;

    /// Replays queued samples and counts every draw.
    struct ScriptedRng {
        samples: VecDeque<u32>,
        calls: u32,
    }

    impl ScriptedRng {
        fn new(samples: &[u32]) -> Self {
            Self {
                samples: samples.iter().copied().collect(),
                calls: 0,
            }
        }

        fn push(&mut self, samples: &[u32]) {
            self.samples.extend(samples.iter().copied());
        }
    }

    impl RngCore for ScriptedRng {
        fn next_u32(&mut self) -> u32 {
            self.calls += 1;
            self.samples.pop_front().expect("scripted rng exhausted")
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let value = self.next_u32().to_le_bytes();
            for (idx, byte) in dest.iter_mut().enumerate() {
                *byte = value[idx % value.len()];
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Sample that lands a die with `sides` faces on `face`.
    fn face(face: u32, sides: u32) -> u32 {
        let offset = (u64::from(face - 1) << 32) / u64::from(sides) + 1;
        u32::try_from(offset).unwrap()
    }

    type TestTown = Town<Outfitter, Adventurer, ScriptedRng>;

    fn town(terrain: Terrain, tough: bool, difficulty: Difficulty, samples: &[u32]) -> TestTown {
        Town::from_parts(
            Outfitter::default(),
            terrain,
            tough,
            difficulty,
            ScriptedRng::new(samples),
        )
    }

    fn arrived(
        terrain: Terrain,
        tough: bool,
        difficulty: Difficulty,
        treasure: Treasure,
        hunter: Adventurer,
    ) -> TestTown {
        let idx = Treasure::ALL.iter().position(|t| *t == treasure).unwrap();
        let mut town = town(
            terrain,
            tough,
            difficulty,
            &[face(u32::try_from(idx).unwrap() + 1, 4)],
        );
        assert!(town.arrive(hunter).is_none());
        town.latest_news();
        town
    }

    fn gold(town: &TestTown) -> i32 {
        town.occupant().unwrap().gold()
    }

    #[test]
    fn new_rolls_terrain_then_toughness() {
        let rng = ScriptedRng::new(&[face(5, 6), LOW]);
        let town: TestTown = Town::new(Outfitter::default(), 0.5, Difficulty::Normal, rng);
        assert_eq!(town.terrain(), Terrain::Jungle);
        assert!(town.is_tough());
        assert_eq!(town.rng().calls, 2);

        let never: TestTown = Town::new(
            Outfitter::default(),
            0.0,
            Difficulty::Normal,
            ScriptedRng::new(&[face(1, 6), LOW]),
        );
        assert!(!never.is_tough());

        let always: TestTown = Town::new(
            Outfitter::default(),
            1.0,
            Difficulty::Normal,
            ScriptedRng::new(&[face(1, 6), HIGH]),
        );
        assert!(always.is_tough());
    }

    #[test]
    fn arrival_greets_and_describes_town() {
        let mut town = town(Terrain::Ocean, true, Difficulty::Normal, &[face(3, 4)]);
        let displaced = town.arrive(Adventurer::new("Rook", 10));
        assert!(displaced.is_none());
        assert_eq!(town.treasure(), Treasure::Trophy);
        assert_eq!(
            town.latest_news(),
            format!("Welcome to town, Rook.\n{TOUGH_TOWN_AMBIENCE}")
        );
        assert_eq!(town.latest_news(), "");
        assert_eq!(
            town.to_string(),
            "This nice little town is surrounded by Ocean."
        );
    }

    #[test]
    fn rearrival_rerolls_treasure_and_displaces_occupant() {
        let mut town = town(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            &[face(2, 4), face(4, 4)],
        );
        town.arrive(Adventurer::new("First", 1));
        assert_eq!(town.treasure(), Treasure::Crown);
        let displaced = town.arrive(Adventurer::new("Second", 2));
        assert_eq!(displaced.map(|h| h.gold()), Some(1));
        assert_eq!(town.treasure(), Treasure::Gem);
        assert_eq!(town.rng().calls, 2, "each arrival rolls treasure");
        assert!(town.latest_news().contains(MILD_TOWN_AMBIENCE));
    }

    #[test]
    fn actions_before_arrival_are_contract_violations() {
        let mut town = town(Terrain::Plains, false, Difficulty::Normal, &[]);
        assert_eq!(
            town.leave(),
            Err(TownError::NoOccupant { action: "leave" })
        );
        assert!(town.dig().is_err());
        assert!(town.find_treasure().is_err());
        assert!(town.look_for_trouble().is_err());
        assert!(town.enter_shop(ShopIntent::Buy(Item::Rope)).is_err());
        assert_eq!(town.rng().calls, 0);
        assert_eq!(
            TownError::NoOccupant { action: "dig" }.to_string(),
            "no hunter is in town to dig"
        );
    }

    #[test]
    fn leave_without_item_is_blocked_and_changes_nothing() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Rope, Item::Shovel]);
        let mut town = arrived(
            Terrain::Desert,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            hunter.clone(),
        );
        town.rng.push(&[HIGH]);
        town.dig().unwrap();
        town.find_treasure().unwrap();
        town.latest_news();
        let calls = town.rng().calls;

        let outcome = town.leave().unwrap();
        assert_eq!(outcome, Departure::Blocked { missing: Item::Water });
        assert!(!outcome.is_success());
        assert_eq!(
            town.latest_news(),
            "You can't leave town, Rook. You don't have a water."
        );
        assert_eq!(town.occupant().unwrap().kit(), hunter.kit());
        assert!(town.dug());
        assert!(town.searched());
        assert_eq!(town.rng().calls, calls, "blocked exits draw nothing");
    }

    #[test]
    fn broken_item_is_lost_in_normal_mode() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Rope]);
        let mut town = arrived(
            Terrain::Mountains,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            hunter,
        );
        town.rng.push(&[LOW]);
        let outcome = town.leave().unwrap();
        assert_eq!(
            outcome,
            Departure::Crossed {
                terrain: Terrain::Mountains,
                item: Item::Rope,
                item_lost: true
            }
        );
        assert!(!town.occupant().unwrap().has_item(Item::Rope));
        assert_eq!(
            town.latest_news(),
            "You used your rope to cross the Mountains.\nUnfortunately, you lost your rope."
        );
    }

    #[test]
    fn intact_item_is_kept() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Boat]);
        let mut town = arrived(Terrain::Ocean, true, Difficulty::Normal, Treasure::Gem, hunter);
        town.rng.push(&[HIGH]);
        let outcome = town.leave().unwrap();
        assert!(outcome.is_success());
        assert!(town.occupant().unwrap().has_item(Item::Boat));
        assert_eq!(
            town.latest_news(),
            "You used your boat to cross the Ocean."
        );
    }

    #[test]
    fn easy_mode_never_loses_item_but_still_rolls() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Horse]);
        let mut town = arrived(Terrain::Plains, false, Difficulty::Easy, Treasure::Dust, hunter);
        town.rng.push(&[LOW]);
        let before = town.rng().calls;
        let outcome = town.leave().unwrap();
        assert_eq!(
            outcome,
            Departure::Crossed {
                terrain: Terrain::Plains,
                item: Item::Horse,
                item_lost: false
            }
        );
        assert_eq!(town.rng().calls, before + 1, "break roll is always drawn");
        assert!(town.occupant().unwrap().has_item(Item::Horse));
    }

    #[test]
    fn crossing_resets_visit_flags() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Machete, Item::Shovel]);
        let mut town = arrived(Terrain::Jungle, false, Difficulty::Normal, Treasure::Crown, hunter);
        town.rng.push(&[HIGH, HIGH]);
        town.dig().unwrap();
        town.find_treasure().unwrap();
        assert!(town.dug() && town.searched());
        town.leave().unwrap();
        assert!(!town.dug());
        assert!(!town.searched());
    }

    #[test]
    fn quiet_town_replaces_pending_news() {
        let mut town = town(Terrain::Marsh, true, Difficulty::Normal, &[face(1, 4), HIGH]);
        town.arrive(Adventurer::new("Rook", 5));
        let outcome = town.look_for_trouble().unwrap();
        assert_eq!(outcome, TroubleOutcome::Quiet);
        assert_eq!(outcome.gold_delta(), 0);
        assert_eq!(town.latest_news(), NO_TROUBLE);
        assert_eq!(gold(&town), 5);
    }

    #[test]
    fn sword_wins_without_outcome_roll() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Sword]);
        let mut town = arrived(Terrain::Marsh, true, Difficulty::Normal, Treasure::Dust, hunter);
        town.rng.push(&[LOW, face(7, 10)]);
        let before = town.rng().calls;
        let outcome = town.look_for_trouble().unwrap();
        assert_eq!(outcome, TroubleOutcome::Surrender { gold: 7 });
        assert_eq!(gold(&town), 12);
        assert_eq!(town.rng().calls, before + 2);
        let news = town.latest_news();
        assert!(news.starts_with(BRAWLER_SURRENDERS));
        assert!(news.ends_with("You won the brawl and receive 7 gold."));
    }

    #[test]
    fn brawl_win_and_loss_move_gold() {
        let mut town = arrived(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            Adventurer::new("Rook", 5),
        );
        town.rng.push(&[LOW, face(3, 10), HIGH]);
        assert_eq!(
            town.look_for_trouble().unwrap(),
            TroubleOutcome::Won { gold: 3 }
        );
        assert_eq!(gold(&town), 8);
        let news = town.latest_news();
        assert!(news.starts_with(BRAWL_START));
        assert!(news.contains(BRAWL_WON));

        town.rng.push(&[LOW, face(10, 10), LOW]);
        let outcome = town.look_for_trouble().unwrap();
        assert_eq!(outcome, TroubleOutcome::Lost { gold: 10 });
        assert_eq!(outcome.gold_delta(), -10);
        assert_eq!(gold(&town), -2);
        assert!(town.latest_news().ends_with("You lost the brawl and pay 10 gold."));
    }

    #[test]
    fn easy_mode_lowers_brawl_loss_threshold() {
        // 0.5 loses against the tough threshold but wins against easy mode's.
        let midpoint = u32::MAX / 2;
        let mut normal = arrived(
            Terrain::Marsh,
            true,
            Difficulty::Normal,
            Treasure::Dust,
            Adventurer::new("Rook", 5),
        );
        normal.rng.push(&[LOW, face(4, 10), midpoint]);
        assert_eq!(
            normal.look_for_trouble().unwrap(),
            TroubleOutcome::Lost { gold: 4 }
        );

        let mut easy = arrived(
            Terrain::Marsh,
            true,
            Difficulty::Easy,
            Treasure::Dust,
            Adventurer::new("Rook", 5),
        );
        easy.rng.push(&[LOW, face(4, 10), midpoint]);
        assert_eq!(
            easy.look_for_trouble().unwrap(),
            TroubleOutcome::Won { gold: 4 }
        );
    }

    #[test]
    fn trouble_odds_depend_on_toughness() {
        // 0.5 finds a fight in a tough town but not in a mild one.
        let midpoint = u32::MAX / 2;
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Sword]);
        let mut tough = arrived(Terrain::Marsh, true, Difficulty::Normal, Treasure::Dust, hunter.clone());
        tough.rng.push(&[midpoint, face(1, 10)]);
        assert_eq!(
            tough.look_for_trouble().unwrap(),
            TroubleOutcome::Surrender { gold: 1 }
        );

        let mut mild = arrived(Terrain::Marsh, false, Difficulty::Normal, Treasure::Dust, hunter);
        mild.rng.push(&[midpoint]);
        assert_eq!(mild.look_for_trouble().unwrap(), TroubleOutcome::Quiet);
    }

    #[test]
    fn search_collects_once_per_visit() {
        let mut town = arrived(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            Treasure::Gem,
            Adventurer::new("Rook", 5),
        );
        assert_eq!(
            town.find_treasure().unwrap(),
            SearchOutcome::Collected(Treasure::Gem)
        );
        assert_eq!(
            town.latest_news(),
            format!("You found a gem\n{TREASURE_KEPT}")
        );
        let snapshot = town.occupant().unwrap().clone();
        assert_eq!(
            town.find_treasure().unwrap(),
            SearchOutcome::AlreadySearched
        );
        assert_eq!(town.occupant().unwrap(), &snapshot);
        assert_eq!(town.latest_news(), ALREADY_SEARCHED);
        assert_eq!(town.rng().calls, 1, "searching never draws");
    }

    #[test]
    fn search_skips_dust_and_duplicates() {
        let mut dusty = arrived(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            Adventurer::new("Rook", 5),
        );
        assert_eq!(dusty.find_treasure().unwrap(), SearchOutcome::Dust);
        assert!(dusty.occupant().unwrap().treasures().is_empty());

        let mut owner = Adventurer::new("Rook", 5);
        owner.add_treasure(Treasure::Crown);
        let mut repeat = arrived(Terrain::Marsh, false, Difficulty::Normal, Treasure::Crown, owner);
        assert_eq!(
            repeat.find_treasure().unwrap(),
            SearchOutcome::Duplicate(Treasure::Crown)
        );
        assert_eq!(repeat.occupant().unwrap().treasures(), &[Treasure::Crown]);
        assert!(repeat.latest_news().ends_with(DUPLICATE_TREASURE));
    }

    #[test]
    fn search_flag_survives_rearrival_without_crossing() {
        let mut town = town(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            &[face(2, 4), face(3, 4)],
        );
        town.arrive(Adventurer::new("Rook", 5));
        town.find_treasure().unwrap();
        let hunter = town.release().unwrap();
        town.arrive(hunter);
        assert_eq!(town.treasure(), Treasure::Trophy, "treasure re-rolled");
        assert_eq!(
            town.find_treasure().unwrap(),
            SearchOutcome::AlreadySearched,
            "visit flag only resets on a successful crossing"
        );
    }

    #[test]
    fn dig_without_shovel_never_sets_flag() {
        let mut town = arrived(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            Adventurer::new("Rook", 5),
        );
        for _ in 0..3 {
            assert_eq!(town.dig().unwrap(), DigOutcome::NoShovel);
            assert!(!town.dug());
        }
        assert_eq!(town.rng().calls, 1);
        assert_eq!(town.latest_news(), [NO_SHOVEL; 3].join("\n"));
    }

    #[test]
    fn dig_with_shovel_strikes_once() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Shovel]);
        let mut town = arrived(Terrain::Marsh, false, Difficulty::Normal, Treasure::Dust, hunter);
        town.rng.push(&[LOW, face(19, 19)]);
        assert_eq!(town.dig().unwrap(), DigOutcome::Struck { gold: 19 });
        assert!(town.dug());
        assert_eq!(gold(&town), 24);
        assert_eq!(town.latest_news(), "You dug up 19 gold!");

        let calls = town.rng().calls;
        assert_eq!(town.dig().unwrap(), DigOutcome::AlreadyDug);
        assert_eq!(gold(&town), 24);
        assert_eq!(town.rng().calls, calls);
        assert_eq!(town.latest_news(), ALREADY_DUG);
    }

    #[test]
    fn dig_can_find_only_dirt() {
        let hunter = Adventurer::new("Rook", 5).with_items([Item::Shovel]);
        let mut town = arrived(Terrain::Marsh, false, Difficulty::Normal, Treasure::Dust, hunter);
        town.rng.push(&[HIGH]);
        assert_eq!(town.dig().unwrap(), DigOutcome::Dirt);
        assert!(town.dug());
        assert_eq!(gold(&town), 5);
        assert_eq!(town.latest_news(), ONLY_DIRT);
    }

    #[test]
    fn shop_is_a_pass_through() {
        let mut town = arrived(
            Terrain::Marsh,
            false,
            Difficulty::Normal,
            Treasure::Dust,
            Adventurer::new("Rook", 10),
        );
        town.enter_shop(ShopIntent::Buy(Item::Boots)).unwrap();
        assert!(town.occupant().unwrap().has_item(Item::Boots));
        assert_eq!(gold(&town), 2);
        assert!(town.latest_news().is_empty());
        assert!(town.shop_mut().take_receipt().contains("boots"));
    }
}
