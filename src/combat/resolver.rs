//! Single-turn resolution for heroes and enemies.
//!
//! Each resolved action writes one entry to the battle log. Damage and heal
//! amounts are rounded to whole points where they are applied, so hp never
//! carries a fraction between turns.

use super::types::{BattleContext, LogKind};
use crate::abilities::{
    round_points, AbilityDefinition, AbilityEffect, EffectContext, EffectResult, SkillLimit,
};
use crate::dungeon::Enemy;
use crate::heroes::{Hero, Row};
use rand::Rng;

fn crit_suffix(is_crit: bool) -> &'static str {
    if is_crit {
        " (Critical!)"
    } else {
        ""
    }
}

/// Whether the hero can use `skill` this turn.
pub fn special_ready(hero: &Hero, skill: &AbilityDefinition) -> bool {
    match skill.limit {
        Some(SkillLimit::Cooldown(_)) => hero.cooldown == 0,
        Some(SkillLimit::Charges(max)) => hero.charges_used < max,
        None => true,
    }
}

fn spend_special(hero: &mut Hero, skill: &AbilityDefinition) {
    match skill.limit {
        Some(SkillLimit::Cooldown(turns)) => hero.cooldown = turns,
        Some(SkillLimit::Charges(_)) => hero.charges_used += 1,
        None => {}
    }
}

/// Resolves the turn of the party member at `member`.
///
/// Order: healing passive, basic attack on the first living enemy, then a
/// chance to also use the hero's special.
pub fn resolve_hero_turn<R: Rng>(
    member: usize,
    heroes: &mut [Hero],
    enemies: &mut [Enemy],
    ctx: &mut BattleContext<'_, R>,
) {
    let Some(&actor) = ctx.party.get(member) else {
        return;
    };
    let idx = actor.roster_index;
    if !heroes[idx].is_alive() {
        return;
    }

    apply_healing_passive(idx, actor.row, heroes, ctx);

    let hero = &heroes[idx];
    let hit_chance = ctx.catalog.hit_chance(hero, actor.row);
    let damage = ctx
        .catalog
        .outgoing_damage(hero, actor.row, round_points(hero.attack as f64));
    let name = hero.name.clone();

    match enemies.iter_mut().find(|e| e.is_alive()) {
        Some(target) => {
            if ctx.roll(hit_chance) {
                let is_crit = ctx.roll(ctx.rules.hero_crit_chance);
                let dealt = if is_crit {
                    round_points(damage as f64 * ctx.rules.hero_crit_multiplier)
                } else {
                    damage
                };
                target.take_damage(dealt);
                ctx.record(
                    LogKind::Attack,
                    format!(
                        "[Room {}] {} hits {} for {} damage{}! ({} HP: {}/{})",
                        ctx.room,
                        name,
                        target.name,
                        dealt,
                        crit_suffix(is_crit),
                        target.name,
                        target.hp,
                        target.max_hp
                    ),
                );
                if !target.is_alive() {
                    ctx.record(
                        LogKind::Milestone,
                        format!("[Room {}] {} defeats {}!", ctx.room, name, target.name),
                    );
                }
            } else {
                ctx.record(
                    LogKind::Attack,
                    format!("[Room {}] {} misses {}!", ctx.room, name, target.name),
                );
            }
        }
        None => ctx.record(
            LogKind::Attack,
            format!("[Room {}] {} finds no enemies!", ctx.room, name),
        ),
    }

    let catalog = ctx.catalog;
    let Some(skill) = catalog.special_for(&heroes[idx]) else {
        return;
    };
    let used = special_ready(&heroes[idx], skill) && ctx.roll(ctx.rules.special_chance);
    if !used {
        let hero = &mut heroes[idx];
        hero.cooldown = hero.cooldown.saturating_sub(1);
        return;
    }

    match skill.effect {
        AbilityEffect::Heal => use_healing_special(idx, actor.row, skill, heroes, ctx),
        _ => use_damage_special(idx, actor.row, hit_chance, skill, heroes, enemies, ctx),
    }
    spend_special(&mut heroes[idx], skill);
}

/// Heals every injured living party member when the hero carries a healing passive.
fn apply_healing_passive<R: Rng>(
    idx: usize,
    row: Row,
    heroes: &mut [Hero],
    ctx: &mut BattleContext<'_, R>,
) {
    let healer = &heroes[idx];
    let Some(amount) = ctx.catalog.passive_heal(healer, row) else {
        return;
    };
    let healer_name = healer.name.clone();
    let passive_name = healer.passive.clone().unwrap_or_default();

    for member in ctx.party {
        let ally = &mut heroes[member.roster_index];
        if !ally.is_injured() {
            continue;
        }
        let restored = ally.heal(amount);
        ctx.log.push(
            LogKind::Heal,
            ctx.room,
            format!(
                "[Room {}] {} heals {} for {} HP via {}! ({} HP: {}/{})",
                ctx.room, healer_name, ally.name, restored, passive_name, ally.name, ally.hp, ally.max_hp
            ),
        );
    }
}

fn use_healing_special<R: Rng>(
    idx: usize,
    row: Row,
    skill: &AbilityDefinition,
    heroes: &mut [Hero],
    ctx: &mut BattleContext<'_, R>,
) {
    let healer_name = heroes[idx].name.clone();
    let injured: Vec<usize> = ctx
        .party
        .iter()
        .map(|m| m.roster_index)
        .filter(|&i| heroes[i].is_injured())
        .collect();

    if injured.is_empty() {
        ctx.record(
            LogKind::Heal,
            format!(
                "[Room {}] {} casts {} but no one is injured.",
                ctx.room, healer_name, skill.name
            ),
        );
        return;
    }

    let target = injured[ctx.rng.gen_range(0..injured.len())];
    let amount = match skill.apply(EffectContext {
        row,
        value: heroes[idx].attack as f64,
    }) {
        EffectResult::Heal(amount) => amount,
        _ => 0,
    };
    let ally = &mut heroes[target];
    let restored = ally.heal(amount);
    ctx.log.push(
        LogKind::Heal,
        ctx.room,
        format!(
            "[Room {}] {} heals {} for {} HP with {}! ({} HP: {}/{})",
            ctx.room, healer_name, ally.name, restored, skill.name, ally.name, ally.hp, ally.max_hp
        ),
    );
}

fn use_damage_special<R: Rng>(
    idx: usize,
    row: Row,
    hit_chance: f64,
    skill: &AbilityDefinition,
    heroes: &[Hero],
    enemies: &mut [Enemy],
    ctx: &mut BattleContext<'_, R>,
) {
    let hero = &heroes[idx];
    let targets: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .map(|(i, _)| i)
        .take(skill.max_targets())
        .collect();

    if targets.is_empty() {
        ctx.record(
            LogKind::Special,
            format!(
                "[Room {}] {} finds no targets for {}!",
                ctx.room, hero.name, skill.name
            ),
        );
        return;
    }
    if !ctx.roll(hit_chance) {
        ctx.record(
            LogKind::Special,
            format!("[Room {}] {} misses with {}!", ctx.room, hero.name, skill.name),
        );
        return;
    }

    let base = round_points(hero.attack as f64);
    let special = match skill.apply(EffectContext {
        row,
        value: base as f64,
    }) {
        EffectResult::Damage(amount) => amount,
        _ => base,
    };
    let damage = ctx.catalog.outgoing_damage(hero, row, special);

    for target_idx in targets {
        let is_crit = ctx.roll(ctx.rules.hero_crit_chance);
        let dealt = if is_crit {
            round_points(damage as f64 * ctx.rules.hero_crit_multiplier)
        } else {
            damage
        };
        let target = &mut enemies[target_idx];
        target.take_damage(dealt);
        ctx.log.push(
            LogKind::Special,
            ctx.room,
            format!(
                "[Room {}] {} uses {} for {} damage{}! ({} HP: {}/{})",
                ctx.room,
                hero.name,
                skill.name,
                dealt,
                crit_suffix(is_crit),
                target.name,
                target.hp,
                target.max_hp
            ),
        );
        if !target.is_alive() {
            ctx.log.push(
                LogKind::Milestone,
                ctx.room,
                format!(
                    "[Room {}] {} defeats {} with {}!",
                    ctx.room, hero.name, target.name, skill.name
                ),
            );
        }
    }
}

/// Resolves an enemy's turn against the party.
///
/// Targets a random living hero in the front row, falling back to the middle
/// and then the back row.
pub fn resolve_enemy_turn<R: Rng>(
    enemy_idx: usize,
    heroes: &mut [Hero],
    enemies: &[Enemy],
    ctx: &mut BattleContext<'_, R>,
) {
    let Some(enemy) = enemies.get(enemy_idx).filter(|e| e.is_alive()) else {
        return;
    };

    let Some((row, candidates)) = Row::PRIORITY.into_iter().find_map(|row| {
        let living: Vec<usize> = ctx
            .party
            .iter()
            .filter(|m| m.row == row && heroes[m.roster_index].is_alive())
            .map(|m| m.roster_index)
            .collect();
        (!living.is_empty()).then_some((row, living))
    }) else {
        return;
    };

    let target_idx = candidates[ctx.rng.gen_range(0..candidates.len())];

    if !ctx.roll(enemy.hit_chance) {
        let target = &heroes[target_idx];
        ctx.record(
            LogKind::EnemyAttack,
            format!("[Room {}] The {} misses {}!", ctx.room, enemy.name, target.name),
        );
        return;
    }

    let (crit_chance, crit_multiplier) = ctx.rules.enemy_crit(ctx.is_boss);
    let is_crit = ctx.roll(crit_chance);
    let damage = ctx
        .catalog
        .incoming_damage(&heroes[target_idx], row, round_points(enemy.damage));
    let dealt = if is_crit {
        round_points(damage as f64 * crit_multiplier)
    } else {
        damage
    };

    let target = &mut heroes[target_idx];
    target.take_damage(dealt);
    ctx.log.push(
        LogKind::EnemyAttack,
        ctx.room,
        format!(
            "[Room {}] The {} hits {} for {} damage{}! ({} HP: {}/{})",
            ctx.room,
            enemy.name,
            target.name,
            dealt,
            crit_suffix(is_crit),
            target.name,
            target.hp,
            target.max_hp
        ),
    );
    if !target.is_alive() {
        ctx.log.push(
            LogKind::Milestone,
            ctx.room,
            format!("[Room {}] {} falls to {}!", ctx.room, target.name, enemy.name),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityCatalog;
    use crate::combat::types::{BattleLog, BattleRules, PartyMember};
    use crate::dungeon::EnemyTemplate;
    use crate::heroes::{HeroClass, HeroId};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_hero(id: u64, class: HeroClass, attack: u32) -> Hero {
        let (passive, special) = match class {
            HeroClass::Warrior => ("Ironclad Resilience", "Shield Bash"),
            HeroClass::Archer => ("Deadly Precision", "Multi Shot"),
            HeroClass::Mage => ("Arcane Potency", "Fireball"),
            HeroClass::Cleric => ("Divine Restoration", "Heal"),
        };
        Hero {
            id: HeroId(id),
            name: format!("Hero{}", id),
            class,
            level: 1,
            xp: 0,
            hp: 50,
            max_hp: 50,
            attack,
            hit_chance: 1.0,
            speed: 50,
            cooldown: 0,
            charges_used: 0,
            passive: Some(passive.to_string()),
            special: Some(special.to_string()),
        }
    }

    fn create_enemy(hp: u32, damage: f64) -> Enemy {
        Enemy::from_template(&EnemyTemplate {
            name: "Goblin".to_string(),
            hp,
            damage: damage as u32,
            hit_chance: 1.0,
            speed: 50,
            base_xp: 1,
            variance: 0.0,
        })
    }

    fn member(roster_index: usize, slot: usize) -> PartyMember {
        PartyMember {
            roster_index,
            slot,
            row: Row::from_slot(slot).unwrap(),
        }
    }

    /// Every roll hits, never crits, never triggers a special.
    fn scripted_rules() -> BattleRules {
        BattleRules {
            special_chance: 0.0,
            ..BattleRules::without_crits()
        }
    }

    #[test]
    fn test_hero_hits_first_living_enemy() {
        let mut heroes = vec![create_hero(1, HeroClass::Warrior, 20)];
        let mut enemies = vec![create_enemy(0, 5.0), create_enemy(45, 5.0)];
        enemies[0].hp = 0;
        let party = [member(0, 0)];
        let catalog = AbilityCatalog::default();
        let rules = scripted_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(enemies[1].hp, 25);
        assert_eq!(log.entries()[0].kind, LogKind::Attack);
        assert!(log.entries()[0].text.contains("hits Goblin for 20 damage"));
    }

    #[test]
    fn test_mage_back_row_boost_rounds() {
        let mut heroes = vec![create_hero(1, HeroClass::Mage, 17)];
        let mut enemies = vec![create_enemy(100, 5.0)];
        let party = [member(0, 7)];
        let catalog = AbilityCatalog::default();
        let rules = scripted_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        // round(17 * 1.2) = 20
        assert_eq!(enemies[0].hp, 80);
    }

    /// Every roll hits and crits; specials stay off.
    fn crit_rules() -> BattleRules {
        BattleRules {
            hero_crit_chance: 1.0,
            enemy_crit_chance: 1.0,
            boss_crit_chance: 1.0,
            special_chance: 0.0,
            ..BattleRules::default()
        }
    }

    #[test]
    fn test_fireball_applies_skill_before_passive() {
        let mut heroes = vec![create_hero(1, HeroClass::Mage, 17)];
        let mut enemies = vec![create_enemy(100, 5.0)];
        let party = [member(0, 7)];
        let catalog = AbilityCatalog::default();
        let rules = BattleRules {
            special_chance: 1.0,
            ..BattleRules::without_crits()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        // Basic round(17 * 1.2) = 20, Fireball round(round(17 * 1.4) * 1.2) = 29
        assert_eq!(enemies[0].hp, 51);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.text.contains("Hero1 uses Fireball for 29 damage!")));
    }

    #[test]
    fn test_hero_crit_on_basic_attack() {
        let mut heroes = vec![create_hero(1, HeroClass::Warrior, 20)];
        let mut enemies = vec![create_enemy(100, 5.0)];
        let party = [member(0, 0)];
        let catalog = AbilityCatalog::default();
        let rules = crit_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        // round(20 * 1.5) = 30
        assert_eq!(enemies[0].hp, 70);
        assert!(log.entries()[0]
            .text
            .contains("hits Goblin for 30 damage (Critical!)!"));
    }

    #[test]
    fn test_enemy_crit_stronger_in_boss_room() {
        let catalog = AbilityCatalog::default();
        let rules = crit_rules();
        let enemies = vec![create_enemy(40, 20.0)];
        let party = [member(0, 8)];

        // round(20 * 1.3) = 26 normally, round(20 * 1.7) = 34 from a boss
        for (is_boss, expected_hp) in [(false, 24), (true, 16)] {
            let mut heroes = vec![create_hero(1, HeroClass::Mage, 10)];
            let mut rng = StepRng::new(0, 0);
            let mut log = BattleLog::new();
            let mut ctx = BattleContext {
                room: 3,
                is_boss,
                party: &party,
                catalog: &catalog,
                rules: &rules,
                rng: &mut rng,
                log: &mut log,
            };

            resolve_enemy_turn(0, &mut heroes, &enemies, &mut ctx);
            assert_eq!(heroes[0].hp, expected_hp);
            assert!(log.entries()[0].text.contains("(Critical!)"));
        }
    }

    #[test]
    fn test_multi_shot_rolls_crit_per_target() {
        let mut heroes = vec![create_hero(1, HeroClass::Archer, 10)];
        let mut enemies = vec![
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
        ];
        let party = [member(0, 4)];
        let catalog = AbilityCatalog::default();
        let rules = BattleRules {
            special_chance: 1.0,
            ..crit_rules()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        // Basic round(10 * 1.5) = 15, Multi Shot round(12 * 1.5) = 18 on each
        assert_eq!(enemies[0].hp, 67);
        assert_eq!(enemies[1].hp, 82);
        assert_eq!(enemies[2].hp, 82);
        assert_eq!(enemies[3].hp, 100);
        let crits = log
            .entries()
            .iter()
            .filter(|e| e.kind == LogKind::Special && e.text.contains("(Critical!)"))
            .count();
        assert_eq!(crits, 3);
    }

    #[test]
    fn test_multi_shot_hits_three_targets() {
        let mut heroes = vec![create_hero(1, HeroClass::Archer, 10)];
        let mut enemies = vec![
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
            create_enemy(100, 5.0),
        ];
        let party = [member(0, 4)];
        let catalog = AbilityCatalog::default();
        let rules = BattleRules {
            special_chance: 1.0,
            ..BattleRules::without_crits()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        // Basic attack 10, then Multi Shot round(10 * 1.2) = 12 on the first three
        assert_eq!(enemies[0].hp, 78);
        assert_eq!(enemies[1].hp, 88);
        assert_eq!(enemies[2].hp, 88);
        assert_eq!(enemies[3].hp, 100);
        assert_eq!(heroes[0].charges_used, 1);
        let specials = log
            .entries()
            .iter()
            .filter(|e| e.kind == LogKind::Special)
            .count();
        assert_eq!(specials, 3);
    }

    #[test]
    fn test_charges_run_out() {
        let mut heroes = vec![create_hero(1, HeroClass::Mage, 10)];
        heroes[0].charges_used = 3;
        let mut enemies = vec![create_enemy(500, 5.0)];
        let party = [member(0, 0)];
        let catalog = AbilityCatalog::default();
        let rules = BattleRules {
            special_chance: 1.0,
            ..BattleRules::without_crits()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(enemies[0].hp, 490);
        assert_eq!(heroes[0].charges_used, 3);
    }

    #[test]
    fn test_cooldown_ticks_down_when_unused() {
        let mut catalog = AbilityCatalog::default();
        let mut fireball = catalog.get("Fireball").unwrap().clone();
        fireball.limit = Some(SkillLimit::Cooldown(2));
        catalog.insert(fireball);

        let mut heroes = vec![create_hero(1, HeroClass::Mage, 10)];
        let mut enemies = vec![create_enemy(500, 5.0)];
        let party = [member(0, 0)];
        let rules = BattleRules {
            special_chance: 1.0,
            ..BattleRules::without_crits()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(heroes[0].cooldown, 2);
        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(heroes[0].cooldown, 1);
        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(heroes[0].cooldown, 0);
        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(heroes[0].cooldown, 2);
    }

    #[test]
    fn test_cleric_passive_heals_injured_allies() {
        let mut heroes = vec![
            create_hero(1, HeroClass::Warrior, 10),
            create_hero(2, HeroClass::Cleric, 10),
        ];
        heroes[0].hp = 20;
        let mut enemies = vec![create_enemy(100, 5.0)];
        let party = [member(0, 0), member(1, 6)];
        let catalog = AbilityCatalog::default();
        let rules = scripted_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(1, &mut heroes, &mut enemies, &mut ctx);
        // Back row: round(10 * 0.8) = 8
        assert_eq!(heroes[0].hp, 28);
        assert_eq!(log.entries()[0].kind, LogKind::Heal);
    }

    #[test]
    fn test_heal_special_without_injured_consumes_charge() {
        let mut heroes = vec![create_hero(1, HeroClass::Cleric, 10)];
        let mut enemies = vec![create_enemy(100, 5.0)];
        let party = [member(0, 6)];
        let catalog = AbilityCatalog::default();
        let rules = BattleRules {
            special_chance: 1.0,
            ..BattleRules::without_crits()
        };
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_hero_turn(0, &mut heroes, &mut enemies, &mut ctx);
        assert_eq!(heroes[0].charges_used, 1);
        assert!(log
            .entries()
            .iter()
            .any(|e| e.text.contains("no one is injured")));
    }

    #[test]
    fn test_enemy_prefers_front_row_and_warrior_reduces() {
        let mut heroes = vec![
            create_hero(1, HeroClass::Warrior, 10),
            create_hero(2, HeroClass::Mage, 10),
        ];
        let enemies = vec![create_enemy(40, 25.0)];
        let party = [member(1, 6), member(0, 2)];
        let catalog = AbilityCatalog::default();
        let rules = scripted_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_enemy_turn(0, &mut heroes, &enemies, &mut ctx);
        // Ironclad Resilience: round(25 * 0.8) = 20
        assert_eq!(heroes[0].hp, 30);
        assert_eq!(heroes[1].hp, 50);
        assert_eq!(log.entries()[0].kind, LogKind::EnemyAttack);
    }

    #[test]
    fn test_enemy_falls_back_to_back_row() {
        let mut heroes = vec![create_hero(1, HeroClass::Mage, 10)];
        let enemies = vec![create_enemy(40, 60.0)];
        let party = [member(0, 8)];
        let catalog = AbilityCatalog::default();
        let rules = scripted_rules();
        let mut rng = StepRng::new(0, 0);
        let mut log = BattleLog::new();
        let mut ctx = BattleContext {
            room: 1,
            is_boss: false,
            party: &party,
            catalog: &catalog,
            rules: &rules,
            rng: &mut rng,
            log: &mut log,
        };

        resolve_enemy_turn(0, &mut heroes, &enemies, &mut ctx);
        assert_eq!(heroes[0].hp, 0);
        assert_eq!(log.milestones().len(), 1);
        assert!(log.milestones()[0].text.contains("falls to Goblin"));
    }

    #[test]
    fn test_row_priority_over_many_turns() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let catalog = AbilityCatalog::default();
        let rules = BattleRules::default();
        let party = [member(0, 1), member(1, 4), member(2, 7)];
        let enemies = vec![create_enemy(40, 1.0)];

        for _ in 0..50 {
            let mut heroes = vec![
                create_hero(1, HeroClass::Warrior, 10),
                create_hero(2, HeroClass::Archer, 10),
                create_hero(3, HeroClass::Mage, 10),
            ];
            heroes[0].max_hp = 1000;
            heroes[0].hp = 1000;
            let mut log = BattleLog::new();
            let mut ctx = BattleContext {
                room: 1,
                is_boss: false,
                party: &party,
                catalog: &catalog,
                rules: &rules,
                rng: &mut rng,
                log: &mut log,
            };
            for _ in 0..20 {
                resolve_enemy_turn(0, &mut heroes, &enemies, &mut ctx);
            }
            assert_eq!(heroes[1].hp, 50);
            assert_eq!(heroes[2].hp, 50);
        }
    }
}
