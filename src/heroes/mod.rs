//! Heroes, formation and leveling.

pub mod generation;
pub mod progression;
pub mod types;

pub use generation::*;
pub use progression::*;
pub use types::*;
