//! Dungeon configuration, room generation and the run state machine.

pub mod generation;
pub mod runner;
pub mod types;

pub use generation::*;
pub use runner::*;
pub use types::*;
