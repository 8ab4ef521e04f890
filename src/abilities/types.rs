//! Passive and skill definitions.

use crate::heroes::{HeroClass, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether an ability is always on or a gated special.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilitySlot {
    Passive,
    Skill,
}

/// What an ability does when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AbilityEffect {
    /// Scales damage the bearer receives
    DamageReduction,
    /// Adds to the bearer's hit chance, capped at 1.0
    HitChanceBoost,
    /// Scales damage the bearer deals
    DamageBoost,
    /// Restores hp proportional to the bearer's attack
    Heal,
    /// Deals scaled damage to up to `max_targets` enemies
    #[serde(rename_all = "camelCase")]
    Damage { max_targets: usize },
}

/// How often a skill can be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLimit {
    /// Own turns to wait after each use
    Cooldown(u32),
    /// Uses per dungeon run
    Charges(u32),
}

/// Value an effect is applied to, and where the bearer stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectContext {
    pub row: Row,
    /// Damage, hit chance or attack depending on the effect
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectResult {
    Damage(u32),
    HitChance(f64),
    Heal(u32),
}

/// Immutable ability description shared by every hero that references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub slot: AbilitySlot,
    pub effect: AbilityEffect,
    pub magnitude: f64,
    /// Per-row overrides of `magnitude`
    #[serde(default)]
    pub row_magnitude: BTreeMap<Row, f64>,
    pub applies_to: Vec<HeroClass>,
    /// Rows the effect works in; empty means every row
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub limit: Option<SkillLimit>,
}

impl AbilityDefinition {
    pub fn applies_to_class(&self, class: HeroClass) -> bool {
        self.applies_to.contains(&class)
    }

    pub fn is_active_in(&self, row: Row) -> bool {
        self.rows.is_empty() || self.rows.contains(&row)
    }

    pub fn magnitude_in(&self, row: Row) -> f64 {
        self.row_magnitude
            .get(&row)
            .copied()
            .unwrap_or(self.magnitude)
    }

    /// Applies the effect to `ctx.value`.
    ///
    /// Outside its active rows an effect is the identity (a heal restores 0).
    /// Damage and heal results are rounded to whole points.
    pub fn apply(&self, ctx: EffectContext) -> EffectResult {
        let active = self.is_active_in(ctx.row);
        let magnitude = self.magnitude_in(ctx.row);
        match self.effect {
            AbilityEffect::DamageReduction
            | AbilityEffect::DamageBoost
            | AbilityEffect::Damage { .. } => {
                let scaled = if active { ctx.value * magnitude } else { ctx.value };
                EffectResult::Damage(round_points(scaled))
            }
            AbilityEffect::HitChanceBoost => {
                let chance = if active {
                    (ctx.value + magnitude).min(1.0)
                } else {
                    ctx.value
                };
                EffectResult::HitChance(chance)
            }
            AbilityEffect::Heal => {
                let amount = if active { round_points(ctx.value * magnitude) } else { 0 };
                EffectResult::Heal(amount)
            }
        }
    }

    pub fn max_targets(&self) -> usize {
        match self.effect {
            AbilityEffect::Damage { max_targets } => max_targets.max(1),
            _ => 1,
        }
    }
}

/// Rounds a non-negative quantity to whole points.
pub fn round_points(value: f64) -> u32 {
    value.max(0.0).round() as u32
}
