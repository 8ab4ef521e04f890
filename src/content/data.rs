//! Built-in classes and dungeons.

use crate::dungeon::{CountRange, DungeonConfig, EnemyTemplate};
use crate::heroes::{ClassDefinition, HeroClass};

/// Enemy stat variance used by every built-in template
const TEMPLATE_VARIANCE: f64 = 0.1;
/// Dungeon-wide variance used by every built-in dungeon
const DUNGEON_VARIANCE: f64 = 0.1;
const ELITE_CHANCE: f64 = 0.1;
const ENEMY_HIT_CHANCE: f64 = 0.8;
const ENEMY_SPEED: u32 = 50;
const BOSS_SPEED: u32 = 40;

pub fn default_classes() -> Vec<ClassDefinition> {
    let class = |class, hp, attack, hit_chance, speed, cost, passive: &str, special: &str| {
        ClassDefinition {
            class,
            hp,
            attack,
            hit_chance,
            speed,
            cost,
            passive: Some(passive.to_string()),
            special: Some(special.to_string()),
        }
    };
    vec![
        class(HeroClass::Warrior, 60, 10, 0.8, 45, 100, "Ironclad Resilience", "Shield Bash"),
        class(HeroClass::Archer, 50, 12, 0.8, 70, 120, "Deadly Precision", "Multi Shot"),
        class(HeroClass::Mage, 30, 15, 0.7, 60, 150, "Arcane Potency", "Fireball"),
        class(HeroClass::Cleric, 40, 5, 0.8, 50, 130, "Divine Restoration", "Heal"),
    ]
}

fn templates(names: &[&str], hp: u32, damage: u32, speed: u32, base_xp: u32) -> Vec<EnemyTemplate> {
    names
        .iter()
        .map(|name| EnemyTemplate {
            name: name.to_string(),
            hp,
            damage,
            hit_chance: ENEMY_HIT_CHANCE,
            speed,
            base_xp,
            variance: TEMPLATE_VARIANCE,
        })
        .collect()
}

struct Tier<'a> {
    names: &'a [&'a str],
    hp: u32,
    damage: u32,
    xp: u32,
    count: CountRange,
}

fn dungeon(name: &str, description: &str, rooms: u32, reward: u32, enemies: Tier, bosses: Tier) -> DungeonConfig {
    let mut all = templates(enemies.names, enemies.hp, enemies.damage, ENEMY_SPEED, enemies.xp);
    all.extend(templates(bosses.names, bosses.hp, bosses.damage, BOSS_SPEED, bosses.xp));
    DungeonConfig {
        name: name.to_string(),
        description: description.to_string(),
        rooms,
        enemy_count: enemies.count,
        boss_count: bosses.count,
        enemies: enemies.names.iter().map(|n| n.to_string()).collect(),
        bosses: bosses.names.iter().map(|n| n.to_string()).collect(),
        templates: all,
        variance: DUNGEON_VARIANCE,
        elite_chance: ELITE_CHANCE,
        reward,
    }
}

pub fn default_dungeons() -> Vec<DungeonConfig> {
    vec![
        dungeon(
            "Forest Ruins",
            "An abandoned forest ruin",
            3,
            200,
            Tier {
                names: &["Goblin", "Kobold", "Wolf"],
                hp: 40,
                damage: 10,
                xp: 1,
                count: CountRange::new(3, 5),
            },
            Tier {
                names: &["Goblin Warlord", "Ancient Treant"],
                hp: 200,
                damage: 25,
                xp: 3,
                count: CountRange::new(1, 1),
            },
        ),
        dungeon(
            "Dark Caverns",
            "Caves with eerie undead",
            5,
            400,
            Tier {
                names: &["Skeleton", "Ghoul", "Shadow"],
                hp: 60,
                damage: 18,
                xp: 2,
                count: CountRange::new(4, 6),
            },
            Tier {
                names: &["Skeleton King", "Ghoul Overlord"],
                hp: 300,
                damage: 45,
                xp: 4,
                count: CountRange::new(1, 1),
            },
        ),
        dungeon(
            "Dragon's Lair",
            "Lair guarded by a dragon",
            7,
            800,
            Tier {
                names: &["Dragon", "Wyvern", "Demon"],
                hp: 100,
                damage: 28,
                xp: 3,
                count: CountRange::new(5, 7),
            },
            Tier {
                names: &["Elder Dragon", "Infernal Wyrm"],
                hp: 500,
                damage: 70,
                xp: 5,
                count: CountRange::new(1, 2),
            },
        ),
    ]
}
