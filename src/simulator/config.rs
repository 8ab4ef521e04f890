//! Simulation configuration.

use crate::combat::BattleRules;
use crate::content::ContentError;
use crate::core::constants::FORMATION_SLOTS;
use crate::heroes::{FormationError, HeroClass};
use serde::{Deserialize, Serialize};

/// One hero of the simulated party: its class and formation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartySlot {
    pub class: HeroClass,
    pub slot: usize,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of dungeon runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Dungeon name, matched ignoring case
    pub dungeon: String,

    /// Fresh level 1 party recruited for every run
    pub party: Vec<PartySlot>,

    pub rules: BattleRules,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            dungeon: "Forest Ruins".to_string(),
            party: default_party(),
            rules: BattleRules::default(),
            verbosity: 1,
        }
    }
}

/// Warrior in front, archer in the middle, mage and cleric in the back.
pub fn default_party() -> Vec<PartySlot> {
    vec![
        PartySlot { class: HeroClass::Warrior, slot: 1 },
        PartySlot { class: HeroClass::Archer, slot: 4 },
        PartySlot { class: HeroClass::Mage, slot: 6 },
        PartySlot { class: HeroClass::Cleric, slot: 8 },
    ]
}

impl SimConfig {
    /// Quick config for checking one dungeon's balance
    pub fn dungeon_balance_test(dungeon: &str) -> Self {
        Self {
            num_runs: 100,
            dungeon: dungeon.to_string(),
            ..Default::default()
        }
    }

    /// Same party and seed, crits and specials switched off
    pub fn baseline_test(dungeon: &str) -> Self {
        Self {
            num_runs: 100,
            seed: Some(42),
            dungeon: dungeon.to_string(),
            rules: BattleRules {
                special_chance: 0.0,
                ..BattleRules::without_crits()
            },
            ..Default::default()
        }
    }
}

/// Parses a party description like `warrior:1,archer:4,cleric:8`.
pub fn parse_party(list: &str) -> Result<Vec<PartySlot>, ContentError> {
    let mut party = Vec::new();
    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (class, slot) = entry
            .split_once(':')
            .ok_or_else(|| ContentError::InvalidParty(entry.to_string()))?;
        let class =
            HeroClass::parse(class.trim()).ok_or_else(|| ContentError::UnknownClass(class.to_string()))?;
        let slot: usize = slot
            .trim()
            .parse()
            .map_err(|_| ContentError::InvalidParty(entry.to_string()))?;
        if slot >= FORMATION_SLOTS {
            return Err(FormationError::SlotOutOfRange(slot).into());
        }
        if party.iter().any(|p: &PartySlot| p.slot == slot) {
            return Err(ContentError::InvalidParty(entry.to_string()));
        }
        party.push(PartySlot { class, slot });
    }
    if party.is_empty() {
        return Err(ContentError::InvalidParty(list.to_string()));
    }
    Ok(party)
}
