//! Treasure Hunter Game Engine
//!
//! Platform-agnostic town logic for the Treasure Hunter text adventure.
//! A [`Town`] governs everything a hunter can do while present: arriving,
//! shopping, searching, digging, brawling and crossing the terrain to leave.
//! This crate provides the mechanics without any console or platform
//! dependencies; drivers drain narration and render it however they like.

pub mod config;
pub mod constants;
pub mod dice;
pub mod expedition;
pub mod hunter;
pub mod item;
pub mod narration;
pub mod numbers;
pub mod shop;
pub mod terrain;
pub mod town;

// Re-export commonly used types
pub use config::{ConfigError, Difficulty, GameConfig, ShopConfig};
pub use dice::{CountingRng, TownRng};
pub use expedition::{Expedition, ExpeditionStatus, ExpeditionTown};
pub use hunter::{Adventurer, Hunter};
pub use item::{Item, ParseItemError, Treasure};
pub use narration::Mailbox;
pub use shop::{Outfitter, Shop, ShopIntent, Trade};
pub use terrain::Terrain;
pub use town::{DigOutcome, Departure, SearchOutcome, Town, TownError, TroubleOutcome};
