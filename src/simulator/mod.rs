//! Balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded dungeon runs with fresh parties to measure:
//! - How often a party clears each dungeon
//! - Where parties get wiped out
//! - Casualties, levels and XP gained along the way
//!
//! The simulator steps the same `DungeonRun` engine the game uses, so its
//! numbers match real battles.

mod config;
mod report;
mod runner;

pub use config::{default_party, parse_party, PartySlot, SimConfig};
pub use report::{RunStats, SimReport};
pub use runner::run_simulation;
