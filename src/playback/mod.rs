//! Presentation pacing, kept apart from battle resolution.

pub mod player;
pub mod types;

pub use player::Playback;
pub use types::BattleSpeed;
