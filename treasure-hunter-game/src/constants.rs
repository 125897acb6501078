//! Centralized balance and tuning constants for the town engine.
//!
//! These values define the odds behind every randomized outcome in a town.
//! Keeping them together means a balance change is a single reviewed edit
//! rather than a hunt through the action code.

// Trouble ------------------------------------------------------------------
/// Chance that looking for trouble in a tough town turns up a fight.
pub const TOUGH_TROUBLE_CHANCE: f64 = 0.66;
/// Chance that looking for trouble in a mild town turns up a fight.
pub const MILD_TROUBLE_CHANCE: f64 = 0.33;
/// Brawl loss threshold applied instead of the trouble chance in easy mode.
pub const EASY_BRAWL_LOSS_CHANCE: f64 = 0.1;
/// Largest purse a brawler carries.
pub const BRAWL_GOLD_SIDES: u32 = 10;

// Crossing -----------------------------------------------------------------
/// Chance that the crossing item breaks after use.
pub const ITEM_BREAK_CHANCE: f64 = 0.5;

// Digging ------------------------------------------------------------------
/// Chance that a dig turns up gold instead of dirt.
pub const DIG_STRIKE_CHANCE: f64 = 0.5;
/// Largest gold find from a single dig.
pub const DIG_GOLD_SIDES: u32 = 19;

// Defaults -----------------------------------------------------------------
pub const DEFAULT_TOUGHNESS: f64 = 0.4;
pub const DEFAULT_STARTING_GOLD: i32 = 10;
pub const DEFAULT_SELL_RATIO: f64 = 0.5;

// Narration ----------------------------------------------------------------
pub(crate) const TOUGH_TOWN_AMBIENCE: &str = "It's pretty rough around here, so watch yourself.";
pub(crate) const MILD_TOWN_AMBIENCE: &str =
    "We're just a sleepy little town with mild mannered folk.";
pub(crate) const NO_TROUBLE: &str = "You couldn't find any trouble";
pub(crate) const BRAWLER_SURRENDERS: &str = "The brawler, seeing your sword, realizes he picked a losing fight and gives you his gold";
pub(crate) const BRAWL_START: &str = "You want trouble, stranger!  You got it!\nOof! Umph! Ow!";
pub(crate) const BRAWL_WON: &str = "Okay, stranger! You proved yer mettle. Here, take my gold.";
pub(crate) const BRAWL_LOST: &str =
    "That'll teach you to go lookin' fer trouble in MY town! Now pay up!";
pub(crate) const ALREADY_SEARCHED: &str = "You already searched this town";
pub(crate) const DUST_NOT_KEPT: &str = "Dust is not being added to your treasure bag.";
pub(crate) const DUPLICATE_TREASURE: &str =
    "You already have this item. This is not being added to your bag.";
pub(crate) const TREASURE_KEPT: &str = "This is being added to your treasure bag.";
pub(crate) const ALREADY_DUG: &str = "You already dug for gold in this town.";
pub(crate) const NO_SHOVEL: &str = "You can't dig for gold without a shovel.";
pub(crate) const ONLY_DIRT: &str = "You dug but only found dirt.";
