//! Warband - party-based dungeon battle engine.
//!
//! Heroes in a 3x3 formation fight through generated dungeon rooms under a
//! speed-driven active time battle scheduler. The engine is pure: every
//! random decision comes from a caller-supplied `rand::Rng`, and pacing is
//! left to the caller.

pub mod abilities;
pub mod combat;
pub mod content;
pub mod core;
pub mod dungeon;
pub mod heroes;
pub mod playback;
pub mod simulator;
