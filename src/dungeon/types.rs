//! Dungeon configuration and room-scoped enemy data.

use crate::content::ContentError;
use serde::{Deserialize, Serialize};

/// Inclusive range of enemies spawned in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

/// Base stats for a named enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub hp: u32,
    pub damage: u32,
    pub hit_chance: f64,
    pub speed: u32,
    pub base_xp: u32,
    /// Relative spread applied to hp and damage before the dungeon's own variance
    #[serde(default)]
    pub variance: f64,
}

/// Read-only description of a dungeon.
///
/// The last room is the boss room. Its enemies are drawn from `bosses` using
/// `boss_count`; every other room draws from `enemies` using `enemy_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rooms: u32,
    pub enemy_count: CountRange,
    pub boss_count: CountRange,
    pub enemies: Vec<String>,
    pub bosses: Vec<String>,
    pub templates: Vec<EnemyTemplate>,
    /// Dungeon-wide relative spread applied on top of the template variance
    #[serde(default)]
    pub variance: f64,
    #[serde(default)]
    pub elite_chance: f64,
    /// Gold paid out on a full clear
    pub reward: u32,
}

impl DungeonConfig {
    pub fn template(&self, name: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Rooms are numbered from 1; the final room holds the boss.
    pub fn is_boss_room(&self, room: u32) -> bool {
        room == self.rooms
    }

    pub fn pool(&self, is_boss: bool) -> &[String] {
        if is_boss {
            &self.bosses
        } else {
            &self.enemies
        }
    }

    pub fn count_range(&self, is_boss: bool) -> CountRange {
        if is_boss {
            self.boss_count
        } else {
            self.enemy_count
        }
    }

    /// Checks that every lookup made during a run can succeed.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.rooms == 0 {
            return Err(ContentError::NoRooms(self.name.clone()));
        }
        for (range, name) in [(self.enemy_count, "enemy count"), (self.boss_count, "boss count")] {
            if !range.is_valid() {
                return Err(ContentError::InvalidCountRange {
                    dungeon: self.name.clone(),
                    range: name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        if self.rooms > 1 && self.enemies.is_empty() {
            return Err(ContentError::EmptyPool {
                dungeon: self.name.clone(),
                pool: "enemy",
            });
        }
        if self.bosses.is_empty() {
            return Err(ContentError::EmptyPool {
                dungeon: self.name.clone(),
                pool: "boss",
            });
        }
        for name in self.enemies.iter().chain(&self.bosses) {
            if self.template(name).is_none() {
                return Err(ContentError::UnknownTemplate {
                    dungeon: self.name.clone(),
                    name: name.clone(),
                });
            }
        }

        check_probability(format!("{} variance", self.name), self.variance)?;
        check_probability(format!("{} elite chance", self.name), self.elite_chance)?;
        for template in &self.templates {
            check_probability(format!("{} hit chance", template.name), template.hit_chance)?;
            check_probability(format!("{} variance", template.name), template.variance)?;
            if template.speed == 0 {
                return Err(ContentError::ZeroSpeed(template.name.clone()));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_probability(field: String, value: f64) -> Result<(), ContentError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ContentError::InvalidProbability { field, value })
    }
}

/// An enemy in the current room. Discarded when the room ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    /// Rolled damage, rounded each time it is dealt
    pub damage: f64,
    pub hit_chance: f64,
    pub speed: u32,
    pub xp_reward: u32,
    pub is_elite: bool,
}

impl Enemy {
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            name: template.name.clone(),
            hp: template.hp,
            max_hp: template.hp,
            damage: template.damage as f64,
            hit_chance: template.hit_chance,
            speed: template.speed,
            xp_reward: template.base_xp,
            is_elite: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Applies damage, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }
}
