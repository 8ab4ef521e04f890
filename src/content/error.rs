//! Errors raised by malformed content tables.

use crate::heroes::{FormationError, HeroId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("dungeon '{dungeon}' references unknown enemy template '{name}'")]
    UnknownTemplate { dungeon: String, name: String },

    #[error("dungeon '{dungeon}' has an empty {pool} pool")]
    EmptyPool { dungeon: String, pool: &'static str },

    #[error("dungeon '{dungeon}' has an invalid {range} range {min}..={max}")]
    InvalidCountRange {
        dungeon: String,
        range: &'static str,
        min: u32,
        max: u32,
    },

    #[error("dungeon '{0}' has no rooms")]
    NoRooms(String),

    #[error("{field} must be within 0.0..=1.0, got {value}")]
    InvalidProbability { field: String, value: f64 },

    #[error("enemy template '{0}' has zero speed")]
    ZeroSpeed(String),

    #[error("xp threshold table needs at least two levels")]
    MissingXpTable,

    #[error("unknown dungeon '{0}'")]
    UnknownDungeon(String),

    #[error("unknown hero class '{0}'")]
    UnknownClass(String),

    #[error("invalid party entry '{0}', expected <class>:<slot>")]
    InvalidParty(String),

    #[error("formation references hero {0} which is not in the roster")]
    UnknownHero(HeroId),

    #[error("hero id {0} appears more than once in the roster")]
    DuplicateHeroId(HeroId),

    #[error(transparent)]
    Formation(#[from] FormationError),

    #[error("failed to parse content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
}
