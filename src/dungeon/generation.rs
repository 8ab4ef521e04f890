//! Enemy group generation for a single room.

use super::types::{DungeonConfig, Enemy};
use crate::abilities::round_points;
use crate::combat::EliteMultipliers;
use crate::content::ContentError;
use rand::Rng;

/// Scales `value` by a factor drawn uniformly from `1 ± variance`.
fn vary(value: f64, variance: f64, rng: &mut impl Rng) -> f64 {
    value * rng.gen_range((1.0 - variance)..=(1.0 + variance))
}

/// Promotes an enemy to elite in place.
pub fn promote_to_elite(enemy: &mut Enemy, multipliers: &EliteMultipliers) {
    enemy.hp = round_points(enemy.hp as f64 * multipliers.hp).max(1);
    enemy.max_hp = enemy.hp;
    enemy.damage *= multipliers.damage;
    enemy.xp_reward = round_points(enemy.xp_reward as f64 * multipliers.xp);
    enemy.is_elite = true;
}

/// Builds the enemy group for room `room` (1-based).
///
/// Draws, in order: the group size, then for each enemy its pool index, two
/// hp variance factors, two damage variance factors and, outside boss rooms,
/// the elite roll. Hp and damage are varied first by the template's own
/// variance and then by the dungeon's. Hit chance, speed and xp are not
/// varied.
pub fn generate_room(
    config: &DungeonConfig,
    room: u32,
    is_boss: bool,
    elite: &EliteMultipliers,
    rng: &mut impl Rng,
) -> Result<Vec<Enemy>, ContentError> {
    let range = config.count_range(is_boss);
    if !range.is_valid() {
        return Err(ContentError::InvalidCountRange {
            dungeon: config.name.clone(),
            range: if is_boss { "boss count" } else { "enemy count" },
            min: range.min,
            max: range.max,
        });
    }
    let pool = config.pool(is_boss);

    let count = rng.gen_range(range.min..=range.max);
    if count > 0 && pool.is_empty() {
        return Err(ContentError::EmptyPool {
            dungeon: config.name.clone(),
            pool: if is_boss { "boss" } else { "enemy" },
        });
    }

    let mut enemies = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = &pool[rng.gen_range(0..pool.len())];
        let template = config
            .template(name)
            .ok_or_else(|| ContentError::UnknownTemplate {
                dungeon: config.name.clone(),
                name: name.clone(),
            })?;

        let mut enemy = Enemy::from_template(template);

        let hp = vary(template.hp as f64, template.variance, rng);
        let hp = vary(hp, config.variance, rng);
        enemy.hp = round_points(hp).max(1);
        enemy.max_hp = enemy.hp;

        let damage = vary(template.damage as f64, template.variance, rng);
        enemy.damage = vary(damage, config.variance, rng);

        if !is_boss && rng.gen::<f64>() < config.elite_chance {
            promote_to_elite(&mut enemy, elite);
        }
        enemies.push(enemy);
    }

    tracing::debug!(
        dungeon = %config.name,
        room,
        is_boss,
        count = enemies.len(),
        elites = enemies.iter().filter(|e| e.is_elite).count(),
        "generated room"
    );
    Ok(enemies)
}
