//! XP thresholds and per-class level-up growth.

use super::types::{Hero, HeroClass};
use crate::core::constants::{DEFAULT_LEVEL_GROWTH, DEFAULT_XP_THRESHOLDS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stat deltas applied on each level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatGrowth {
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
}

impl Default for StatGrowth {
    fn default() -> Self {
        let (max_hp, hp, attack) = DEFAULT_LEVEL_GROWTH;
        Self { max_hp, hp, attack }
    }
}

/// XP table plus per-class growth.
///
/// `xp_thresholds[level]` is the XP a hero at `level` needs to advance.
/// The max level is `xp_thresholds.len() - 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelingRules {
    pub xp_thresholds: Vec<u32>,
    #[serde(default)]
    pub growth: BTreeMap<HeroClass, StatGrowth>,
}

impl Default for LevelingRules {
    fn default() -> Self {
        Self {
            xp_thresholds: DEFAULT_XP_THRESHOLDS.to_vec(),
            growth: HeroClass::ALL
                .into_iter()
                .map(|class| (class, StatGrowth::default()))
                .collect(),
        }
    }
}

impl LevelingRules {
    pub fn max_level(&self) -> u32 {
        self.xp_thresholds.len().saturating_sub(1).max(1) as u32
    }

    /// XP needed to leave `level`, or None at max level.
    pub fn threshold(&self, level: u32) -> Option<u32> {
        if level >= self.max_level() {
            return None;
        }
        self.xp_thresholds.get(level as usize).copied()
    }

    /// Growth for a class; classes missing from the table use the default deltas.
    pub fn growth_for(&self, class: HeroClass) -> StatGrowth {
        self.growth.get(&class).copied().unwrap_or_default()
    }
}

/// Applies one level-up: raises max hp and attack, heals by the hp delta.
pub fn level_up(hero: &mut Hero, growth: StatGrowth) {
    hero.level += 1;
    hero.max_hp += growth.max_hp;
    hero.hp = (hero.hp + growth.hp).min(hero.max_hp);
    hero.attack += growth.attack;
}

/// Adds XP and applies every level-up it pays for.
///
/// The threshold is subtracted on each level so any remainder carries into
/// the next level. Returns the levels reached, in order.
pub fn grant_xp(hero: &mut Hero, amount: u32, rules: &LevelingRules) -> Vec<u32> {
    hero.xp = hero.xp.saturating_add(amount);

    let growth = rules.growth_for(hero.class);
    let mut reached = Vec::new();
    while let Some(needed) = rules.threshold(hero.level) {
        if hero.xp < needed {
            break;
        }
        hero.xp -= needed;
        level_up(hero, growth);
        reached.push(hero.level);
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heroes::types::HeroId;

    fn create_test_hero(level: u32, xp: u32) -> Hero {
        Hero {
            id: HeroId(1),
            name: "Bron the Bold".to_string(),
            class: HeroClass::Warrior,
            level,
            xp,
            hp: 50,
            max_hp: 60,
            attack: 10,
            hit_chance: 0.8,
            speed: 45,
            cooldown: 0,
            charges_used: 0,
            passive: None,
            special: None,
        }
    }

    #[test]
    fn test_single_level_up() {
        let rules = LevelingRules::default();
        let mut hero = create_test_hero(1, 0);
        let reached = grant_xp(&mut hero, 12, &rules);

        assert_eq!(reached, vec![2]);
        assert_eq!(hero.level, 2);
        assert_eq!(hero.xp, 2);
        assert_eq!(hero.max_hp, 70);
        assert_eq!(hero.hp, 60);
        assert_eq!(hero.attack, 12);
    }

    #[test]
    fn test_multiple_level_ups_in_one_grant() {
        let rules = LevelingRules::default();
        let mut hero = create_test_hero(1, 0);
        // 10 for level 2, 25 for level 3, 5 left over
        let reached = grant_xp(&mut hero, 40, &rules);

        assert_eq!(reached, vec![2, 3]);
        assert_eq!(hero.level, 3);
        assert_eq!(hero.xp, 5);
        assert_eq!(hero.max_hp, 80);
        assert_eq!(hero.attack, 14);
    }

    #[test]
    fn test_below_threshold_no_level() {
        let rules = LevelingRules::default();
        let mut hero = create_test_hero(2, 0);
        assert!(grant_xp(&mut hero, 24, &rules).is_empty());
        assert_eq!(hero.level, 2);
        assert_eq!(hero.xp, 24);
    }

    #[test]
    fn test_never_exceeds_max_level() {
        let rules = LevelingRules {
            xp_thresholds: vec![0, 10, 20],
            growth: BTreeMap::new(),
        };
        let mut hero = create_test_hero(1, 0);
        let reached = grant_xp(&mut hero, 1000, &rules);

        assert_eq!(reached, vec![2]);
        assert_eq!(hero.level, rules.max_level());
        assert_eq!(hero.xp, 990);
    }

    #[test]
    fn test_level_up_hp_capped_at_new_max() {
        let mut hero = create_test_hero(1, 0);
        hero.hp = 60;
        level_up(
            &mut hero,
            StatGrowth {
                max_hp: 5,
                hp: 20,
                attack: 1,
            },
        );
        assert_eq!(hero.max_hp, 65);
        assert_eq!(hero.hp, 65);
    }

    #[test]
    fn test_per_class_growth() {
        let mut rules = LevelingRules::default();
        rules.growth.insert(
            HeroClass::Warrior,
            StatGrowth {
                max_hp: 15,
                hp: 15,
                attack: 1,
            },
        );
        let mut hero = create_test_hero(1, 0);
        grant_xp(&mut hero, 10, &rules);
        assert_eq!(hero.max_hp, 75);
        assert_eq!(hero.attack, 11);
    }
}
