//! Name-keyed lookup of ability definitions.
//!
//! Heroes reference their passive and special by name. A name that is not in
//! the catalog, or that belongs to an ability the hero's class cannot use,
//! resolves to nothing and every modifier below falls back to the identity.

use super::data::default_abilities;
use super::types::{AbilityDefinition, AbilityEffect, AbilitySlot, EffectContext, EffectResult};
use crate::heroes::{Hero, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<AbilityDefinition>", into = "Vec<AbilityDefinition>")]
pub struct AbilityCatalog {
    abilities: BTreeMap<String, AbilityDefinition>,
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        Self::from(default_abilities())
    }
}

impl From<Vec<AbilityDefinition>> for AbilityCatalog {
    fn from(definitions: Vec<AbilityDefinition>) -> Self {
        Self {
            abilities: definitions
                .into_iter()
                .map(|def| (def.name.clone(), def))
                .collect(),
        }
    }
}

impl From<AbilityCatalog> for Vec<AbilityDefinition> {
    fn from(catalog: AbilityCatalog) -> Self {
        catalog.abilities.into_values().collect()
    }
}

impl AbilityCatalog {
    pub fn empty() -> Self {
        Self {
            abilities: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AbilityDefinition> {
        self.abilities.get(name)
    }

    /// Adds or replaces a definition.
    pub fn insert(&mut self, definition: AbilityDefinition) {
        self.abilities.insert(definition.name.clone(), definition);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.values()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    fn lookup(&self, name: Option<&str>, slot: AbilitySlot, hero: &Hero) -> Option<&AbilityDefinition> {
        self.get(name?)
            .filter(|def| def.slot == slot && def.applies_to_class(hero.class))
    }

    /// The hero's passive, if it exists and suits the hero's class.
    pub fn passive_for(&self, hero: &Hero) -> Option<&AbilityDefinition> {
        self.lookup(hero.passive.as_deref(), AbilitySlot::Passive, hero)
    }

    /// The hero's special, if it exists and suits the hero's class.
    pub fn special_for(&self, hero: &Hero) -> Option<&AbilityDefinition> {
        self.lookup(hero.special.as_deref(), AbilitySlot::Skill, hero)
    }

    /// Damage the hero takes after its damage-reduction passive.
    pub fn incoming_damage(&self, hero: &Hero, row: Row, damage: u32) -> u32 {
        match self.passive_for(hero) {
            Some(def) if def.effect == AbilityEffect::DamageReduction => {
                match def.apply(EffectContext {
                    row,
                    value: damage as f64,
                }) {
                    EffectResult::Damage(reduced) => reduced,
                    _ => damage,
                }
            }
            _ => damage,
        }
    }

    /// Hit chance after the hero's hit-chance passive.
    pub fn hit_chance(&self, hero: &Hero, row: Row) -> f64 {
        match self.passive_for(hero) {
            Some(def) if def.effect == AbilityEffect::HitChanceBoost => {
                match def.apply(EffectContext {
                    row,
                    value: hero.hit_chance,
                }) {
                    EffectResult::HitChance(chance) => chance,
                    _ => hero.hit_chance,
                }
            }
            _ => hero.hit_chance,
        }
    }

    /// Damage the hero deals after its damage-boost passive.
    pub fn outgoing_damage(&self, hero: &Hero, row: Row, damage: u32) -> u32 {
        match self.passive_for(hero) {
            Some(def) if def.effect == AbilityEffect::DamageBoost => {
                match def.apply(EffectContext {
                    row,
                    value: damage as f64,
                }) {
                    EffectResult::Damage(boosted) => boosted,
                    _ => damage,
                }
            }
            _ => damage,
        }
    }

    /// Per-ally heal granted by the hero's healing passive, if it has one.
    pub fn passive_heal(&self, hero: &Hero, row: Row) -> Option<u32> {
        let def = self
            .passive_for(hero)
            .filter(|def| def.effect == AbilityEffect::Heal)?;
        match def.apply(EffectContext {
            row,
            value: hero.attack as f64,
        }) {
            EffectResult::Heal(amount) if amount > 0 => Some(amount),
            _ => None,
        }
    }
}
