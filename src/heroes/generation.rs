//! Hero creation from class templates.

use super::types::{Hero, HeroClass, HeroId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Base stats and abilities for a hero class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub class: HeroClass,
    pub hp: u32,
    pub attack: u32,
    pub hit_chance: f64,
    pub speed: u32,
    /// Recruitment price in gold
    pub cost: u32,
    pub passive: Option<String>,
    pub special: Option<String>,
}

impl ClassDefinition {
    /// Creates a level 1 hero at full health.
    pub fn recruit(&self, id: HeroId, name: String) -> Hero {
        Hero {
            id,
            name,
            class: self.class,
            level: 1,
            xp: 0,
            hp: self.hp,
            max_hp: self.hp,
            attack: self.attack,
            hit_chance: self.hit_chance,
            speed: self.speed,
            cooldown: 0,
            charges_used: 0,
            passive: self.passive.clone(),
            special: self.special.clone(),
        }
    }
}

const FIRST_NAMES: [&str; 30] = [
    "Aric", "Bron", "Cael", "Dorn", "Elric", "Finn", "Gorm", "Harn", "Irwin", "Jace", "Kael",
    "Lorn", "Merek", "Nero", "Oryn", "Pax", "Quin", "Ryn", "Thane", "Veyn", "Aelith", "Brynn",
    "Cindra", "Dalia", "Elara", "Fiora", "Gwyn", "Liora", "Myra", "Sylvi",
];

const EPITHETS: [&str; 30] = [
    "the Brave",
    "the Swift",
    "the Wise",
    "the Strong",
    "the Bold",
    "Darkblade",
    "Lightbringer",
    "Stormcaller",
    "Shadowcloak",
    "Frostwind",
    "Ironfist",
    "Moonwhisper",
    "Sunforge",
    "Nightshade",
    "Thunderstrike",
    "Starfall",
    "Bloodfang",
    "Skywatcher",
    "Emberheart",
    "Stoneguard",
    "Riversong",
    "Frostbite",
    "Dawnbringer",
    "Shadowdancer",
    "Ironwill",
    "Mistwalker",
    "Flamebearer",
    "Stormrider",
    "Goldenhawk",
    "Windspear",
];

/// Generates a fantasy hero name like "Kael Stormcaller".
pub fn generate_hero_name(rng: &mut impl Rng) -> String {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = EPITHETS[rng.gen_range(0..EPITHETS.len())];
    format!("{} {}", first, last)
}
