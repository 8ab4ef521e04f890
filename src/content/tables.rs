//! Content tables consumed by the engine.

use super::data::{default_classes, default_dungeons};
use super::error::ContentError;
use crate::abilities::AbilityCatalog;
use crate::dungeon::{check_probability, DungeonConfig};
use crate::heroes::{ClassDefinition, HeroClass, LevelingRules};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes, abilities, dungeons and leveling rules.
///
/// Every section is optional in JSON; a missing section falls back to the
/// built-in game content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentTables {
    pub classes: Vec<ClassDefinition>,
    pub abilities: AbilityCatalog,
    pub dungeons: Vec<DungeonConfig>,
    pub leveling: LevelingRules,
}

impl Default for ContentTables {
    fn default() -> Self {
        Self {
            classes: default_classes(),
            abilities: AbilityCatalog::default(),
            dungeons: default_dungeons(),
            leveling: LevelingRules::default(),
        }
    }
}

impl ContentTables {
    /// Parses and validates tables from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Reads, parses and validates tables from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tables = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            classes = tables.classes.len(),
            dungeons = tables.dungeons.len(),
            "loaded content tables"
        );
        Ok(tables)
    }

    pub fn to_json(&self) -> Result<String, ContentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn class(&self, class: HeroClass) -> Option<&ClassDefinition> {
        self.classes.iter().find(|c| c.class == class)
    }

    /// Looks up a class by its name, e.g. "mage".
    pub fn class_named(&self, name: &str) -> Result<&ClassDefinition, ContentError> {
        HeroClass::parse(name)
            .and_then(|class| self.class(class))
            .ok_or_else(|| ContentError::UnknownClass(name.to_string()))
    }

    /// Looks up a dungeon by name, ignoring ASCII case.
    pub fn dungeon(&self, name: &str) -> Result<&DungeonConfig, ContentError> {
        self.dungeons
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ContentError::UnknownDungeon(name.to_string()))
    }

    /// Checks every table so the engine's lookups cannot fail mid-run.
    ///
    /// Ability names referenced by classes are not checked: a missing ability
    /// acts as a no-op in battle.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.leveling.xp_thresholds.len() < 2 {
            return Err(ContentError::MissingXpTable);
        }
        for class in &self.classes {
            check_probability(format!("{} hit chance", class.class.name()), class.hit_chance)?;
        }
        for dungeon in &self.dungeons {
            dungeon.validate()?;
        }
        Ok(())
    }
}
