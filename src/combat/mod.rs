//! Room combat: turn order, action resolution and the battle log.

pub mod resolver;
pub mod scheduler;
pub mod types;

pub use resolver::*;
pub use scheduler::*;
pub use types::*;
