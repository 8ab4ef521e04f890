//! Battle state shared by the resolver and the scheduler.

use crate::abilities::AbilityCatalog;
use crate::core::constants::*;
use crate::heroes::Row;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which side a combatant belongs to, and where to find it.
///
/// `Hero` indexes the battle party, `Enemy` indexes the room's enemy list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Hero(usize),
    Enemy(usize),
}

/// Scheduler entry wrapping a hero or an enemy with its tick accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combatant {
    pub kind: CombatantKind,
    pub ticks: u32,
}

impl Combatant {
    pub fn new(kind: CombatantKind) -> Self {
        Self { kind, ticks: 0 }
    }
}

/// A hero taking part in the current room: its roster index and formation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartyMember {
    pub roster_index: usize,
    pub slot: usize,
    pub row: Row,
}

/// Multipliers applied when a regular enemy is promoted to elite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EliteMultipliers {
    pub hp: f64,
    pub damage: f64,
    pub xp: f64,
}

impl Default for EliteMultipliers {
    fn default() -> Self {
        let (hp, damage, xp) = ELITE_MULTIPLIERS;
        Self { hp, damage, xp }
    }
}

/// Tunable combat constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    pub action_threshold: u32,
    pub hero_crit_chance: f64,
    pub hero_crit_multiplier: f64,
    pub enemy_crit_chance: f64,
    pub enemy_crit_multiplier: f64,
    pub boss_crit_chance: f64,
    pub boss_crit_multiplier: f64,
    /// Chance per eligible turn that a hero also uses its special
    pub special_chance: f64,
    pub elite: EliteMultipliers,
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            action_threshold: ACTION_THRESHOLD,
            hero_crit_chance: HERO_CRIT_CHANCE,
            hero_crit_multiplier: HERO_CRIT_MULTIPLIER,
            enemy_crit_chance: ENEMY_CRIT_CHANCE,
            enemy_crit_multiplier: ENEMY_CRIT_MULTIPLIER,
            boss_crit_chance: BOSS_CRIT_CHANCE,
            boss_crit_multiplier: BOSS_CRIT_MULTIPLIER,
            special_chance: SPECIAL_CHANCE,
            elite: EliteMultipliers::default(),
        }
    }
}

impl BattleRules {
    /// Default rules with every crit chance set to zero.
    pub fn without_crits() -> Self {
        Self {
            hero_crit_chance: 0.0,
            enemy_crit_chance: 0.0,
            boss_crit_chance: 0.0,
            ..Self::default()
        }
    }

    /// Crit chance and multiplier for enemy attacks.
    pub fn enemy_crit(&self, is_boss: bool) -> (f64, f64) {
        if is_boss {
            (self.boss_crit_chance, self.boss_crit_multiplier)
        } else {
            (self.enemy_crit_chance, self.enemy_crit_multiplier)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogKind {
    Attack,
    Special,
    Heal,
    EnemyAttack,
    Milestone,
    XpLevel,
    System,
}

impl LogKind {
    /// Milestone and xp-level entries are also kept for the end-of-run summary.
    pub fn is_milestone(&self) -> bool {
        matches!(self, LogKind::Milestone | LogKind::XpLevel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: LogKind,
    pub text: String,
    pub room: u32,
}

/// Ordered game log for a dungeon run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
    milestones: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LogKind, room: u32, text: impl Into<String>) {
        let entry = LogEntry {
            kind,
            text: text.into(),
            room,
        };
        tracing::trace!(kind = ?entry.kind, room, "{}", entry.text);
        if kind.is_milestone() {
            self.milestones.push(entry.clone());
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn milestones(&self) -> &[LogEntry] {
        &self.milestones
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_parts(self) -> (Vec<LogEntry>, Vec<LogEntry>) {
        (self.entries, self.milestones)
    }
}

/// Everything a turn needs besides the combatants themselves.
pub struct BattleContext<'a, R: Rng> {
    /// 1-based room number used in log entries
    pub room: u32,
    pub is_boss: bool,
    pub party: &'a [PartyMember],
    pub catalog: &'a AbilityCatalog,
    pub rules: &'a BattleRules,
    pub rng: &'a mut R,
    pub log: &'a mut BattleLog,
}

impl<R: Rng> BattleContext<'_, R> {
    /// Rolls `random() < chance`.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }

    pub fn record(&mut self, kind: LogKind, text: impl Into<String>) {
        self.log.push(kind, self.room, text);
    }
}
