//! Built-in passives and skills.

use super::types::{AbilityDefinition, AbilityEffect, AbilitySlot, SkillLimit};
use crate::heroes::{HeroClass, Row};
use std::collections::BTreeMap;

/// Returns every built-in passive and skill.
pub fn default_abilities() -> Vec<AbilityDefinition> {
    vec![
        // Passives
        AbilityDefinition {
            name: "Ironclad Resilience".to_string(),
            description: "Reduces damage taken by 20% in the front row".to_string(),
            slot: AbilitySlot::Passive,
            effect: AbilityEffect::DamageReduction,
            magnitude: 0.8,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Warrior],
            rows: vec![Row::Front],
            limit: None,
        },
        AbilityDefinition {
            name: "Deadly Precision".to_string(),
            description: "Boosts hit chance by 15% in the middle or back row".to_string(),
            slot: AbilitySlot::Passive,
            effect: AbilityEffect::HitChanceBoost,
            magnitude: 0.15,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Archer],
            rows: vec![Row::Middle, Row::Back],
            limit: None,
        },
        AbilityDefinition {
            name: "Arcane Potency".to_string(),
            description: "Boosts damage by 20% in the back row".to_string(),
            slot: AbilitySlot::Passive,
            effect: AbilityEffect::DamageBoost,
            magnitude: 1.2,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Mage],
            rows: vec![Row::Back],
            limit: None,
        },
        AbilityDefinition {
            name: "Divine Restoration".to_string(),
            description: "Heals injured allies for 80% of attack from the back row, 30% elsewhere"
                .to_string(),
            slot: AbilitySlot::Passive,
            effect: AbilityEffect::Heal,
            magnitude: 0.3,
            row_magnitude: BTreeMap::from([(Row::Back, 0.8)]),
            applies_to: vec![HeroClass::Cleric],
            rows: vec![],
            limit: None,
        },
        // Skills
        AbilityDefinition {
            name: "Shield Bash".to_string(),
            description: "Deals 30% more damage".to_string(),
            slot: AbilitySlot::Skill,
            effect: AbilityEffect::Damage { max_targets: 1 },
            magnitude: 1.3,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Warrior],
            rows: vec![],
            limit: Some(SkillLimit::Charges(3)),
        },
        AbilityDefinition {
            name: "Multi Shot".to_string(),
            description: "Deals 20% more damage to up to 3 targets".to_string(),
            slot: AbilitySlot::Skill,
            effect: AbilityEffect::Damage { max_targets: 3 },
            magnitude: 1.2,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Archer],
            rows: vec![],
            limit: Some(SkillLimit::Charges(4)),
        },
        AbilityDefinition {
            name: "Fireball".to_string(),
            description: "Deals 40% more damage".to_string(),
            slot: AbilitySlot::Skill,
            effect: AbilityEffect::Damage { max_targets: 1 },
            magnitude: 1.4,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Mage],
            rows: vec![],
            limit: Some(SkillLimit::Charges(3)),
        },
        AbilityDefinition {
            name: "Heal".to_string(),
            description: "Heals a random injured ally for 200% of attack".to_string(),
            slot: AbilitySlot::Skill,
            effect: AbilityEffect::Heal,
            magnitude: 2.0,
            row_magnitude: BTreeMap::new(),
            applies_to: vec![HeroClass::Cleric],
            rows: vec![],
            limit: Some(SkillLimit::Charges(5)),
        },
    ]
}
