// Turn scheduling
pub const ACTION_THRESHOLD: u32 = 100;

// Critical hits: (chance, multiplier)
pub const HERO_CRIT_CHANCE: f64 = 0.10;
pub const HERO_CRIT_MULTIPLIER: f64 = 1.5;
pub const ENEMY_CRIT_CHANCE: f64 = 0.08;
pub const ENEMY_CRIT_MULTIPLIER: f64 = 1.3;
pub const BOSS_CRIT_CHANCE: f64 = 0.12;
pub const BOSS_CRIT_MULTIPLIER: f64 = 1.7;

// Chance for a hero with an available special to use it on a turn
pub const SPECIAL_CHANCE: f64 = 0.25;

// Elite multipliers: (hp_mult, dmg_mult, xp_mult)
pub const ELITE_MULTIPLIERS: (f64, f64, f64) = (2.0, 1.5, 2.0);

// Formation grid: 3 rows of 3 slots
pub const FORMATION_SLOTS: usize = 9;
pub const ROW_WIDTH: usize = 3;

// Presentation pacing
pub const BASE_STEP_DELAY_MS: u64 = 500;
pub const BATTLE_SPEEDS: [f64; 4] = [0.5, 1.0, 2.0, 4.0];

// XP needed to leave each level (index = current level)
pub const DEFAULT_XP_THRESHOLDS: [u32; 11] = [0, 10, 25, 60, 120, 250, 520, 1050, 2200, 4500, 9100];

// Per-level stat growth: (max_hp, hp, attack)
pub const DEFAULT_LEVEL_GROWTH: (u32, u32, u32) = (10, 10, 2);
