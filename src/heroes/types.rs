//! Hero, class and formation data structures.

use crate::core::constants::{FORMATION_SLOTS, ROW_WIDTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a hero in the caller's roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub u64);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeroClass {
    Warrior,
    Archer,
    Mage,
    Cleric,
}

impl HeroClass {
    pub const ALL: [HeroClass; 4] = [
        HeroClass::Warrior,
        HeroClass::Archer,
        HeroClass::Mage,
        HeroClass::Cleric,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Archer => "Archer",
            HeroClass::Mage => "Mage",
            HeroClass::Cleric => "Cleric",
        }
    }

    /// Parses a lowercase or capitalized class name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(name))
    }
}

/// A persistent party member.
///
/// Heroes live in the caller's roster. A dungeon run borrows the roster
/// mutably and updates hp, xp, level and special usage in place, so level-ups
/// and wounds survive the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub class: HeroClass,
    pub level: u32,
    pub xp: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub hit_chance: f64,
    pub speed: u32,
    /// Own turns left before a cooldown-gated special is ready again
    #[serde(default)]
    pub cooldown: u32,
    /// Uses of a charge-gated special spent during the current run
    #[serde(default)]
    pub charges_used: u32,
    pub passive: Option<String>,
    pub special: Option<String>,
}

impl Hero {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_injured(&self) -> bool {
        self.is_alive() && self.hp < self.max_hp
    }

    /// Applies damage, clamping at zero. Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores hp up to max_hp. Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }
}

/// Formation row. Front is targeted first by enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Row {
    Front,
    Middle,
    Back,
}

impl Row {
    /// Rows in enemy targeting priority order.
    pub const PRIORITY: [Row; 3] = [Row::Front, Row::Middle, Row::Back];

    pub fn from_slot(slot: usize) -> Option<Row> {
        match slot / ROW_WIDTH {
            0 => Some(Row::Front),
            1 => Some(Row::Middle),
            2 => Some(Row::Back),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormationError {
    #[error("formation slot {0} is out of range (0-8)")]
    SlotOutOfRange(usize),
    #[error("hero {0} occupies more than one formation slot")]
    DuplicateHero(HeroId),
}

/// Fixed 3x3 grid of optional hero references.
///
/// Slots 0-2 are the front row, 3-5 the middle row and 6-8 the back row.
/// A hero id occupies at most one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    slots: [Option<HeroId>; FORMATION_SLOTS],
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a formation from raw slots, rejecting duplicated heroes.
    pub fn from_slots(slots: [Option<HeroId>; FORMATION_SLOTS]) -> Result<Self, FormationError> {
        for (i, id) in slots.iter().enumerate() {
            if let Some(id) = id {
                if slots[i + 1..].contains(&Some(*id)) {
                    return Err(FormationError::DuplicateHero(*id));
                }
            }
        }
        Ok(Self { slots })
    }

    /// Puts a hero into a slot. A hero already placed elsewhere is moved, and
    /// any hero previously in the target slot is displaced and returned.
    pub fn place(&mut self, slot: usize, id: HeroId) -> Result<Option<HeroId>, FormationError> {
        if slot >= FORMATION_SLOTS {
            return Err(FormationError::SlotOutOfRange(slot));
        }
        self.remove(id);
        Ok(self.slots[slot].replace(id))
    }

    /// Removes a hero from the grid. Returns the slot it occupied.
    pub fn remove(&mut self, id: HeroId) -> Option<usize> {
        let slot = self.slot_of(id)?;
        self.slots[slot] = None;
        Some(slot)
    }

    pub fn get(&self, slot: usize) -> Option<HeroId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn slots(&self) -> &[Option<HeroId>; FORMATION_SLOTS] {
        &self.slots
    }

    pub fn slot_of(&self, id: HeroId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(id))
    }

    pub fn row_of(&self, id: HeroId) -> Option<Row> {
        self.slot_of(id).and_then(Row::from_slot)
    }

    /// Placed hero ids in slot order.
    pub fn hero_ids(&self) -> impl Iterator<Item = HeroId> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
