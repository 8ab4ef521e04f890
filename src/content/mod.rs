//! Game content: classes, abilities, dungeons and leveling tables.

pub mod data;
pub mod error;
pub mod tables;

pub use data::{default_classes, default_dungeons};
pub use error::ContentError;
pub use tables::ContentTables;
