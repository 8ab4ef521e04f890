//! Passive and special abilities.

pub mod catalog;
pub mod data;
pub mod types;

pub use catalog::AbilityCatalog;
pub use data::default_abilities;
pub use types::*;
