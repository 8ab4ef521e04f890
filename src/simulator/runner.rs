//! Main simulation runner driving the real dungeon engine.
//!
//! Every run recruits a fresh level 1 party and steps a [`DungeonRun`] to its
//! end. Statistics are collected from the emitted [`RunStep`]s, so the
//! simulator never duplicates battle logic.

use super::config::SimConfig;
use super::report::{RunStats, SimReport};
use crate::content::{ContentError, ContentTables};
use crate::dungeon::{DungeonConfig, DungeonRun, RunStep};
use crate::heroes::{generate_hero_name, Formation, Hero, HeroId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, content: &ContentTables) -> Result<SimReport, ContentError> {
    let dungeon = content.dungeon(&config.dungeon)?;
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, dungeon, content, &mut rng)?;
        if config.verbosity >= 2 {
            info!(
                run = run_idx + 1,
                of = config.num_runs,
                victory = stats.victory,
                rooms_cleared = stats.rooms_cleared,
                casualties = stats.casualties,
                level = stats.avg_final_level,
                "run finished"
            );
        }
        all_runs.push(stats);
    }

    let report = SimReport::from_runs(&dungeon.name, dungeon.rooms, all_runs);
    if config.verbosity >= 1 {
        info!(
            dungeon = %report.dungeon,
            runs = report.num_runs,
            victory_rate = report.victory_rate,
            "simulation complete"
        );
    }
    Ok(report)
}

/// Recruits the configured party. Hero ids follow the party order.
fn recruit_party(
    config: &SimConfig,
    content: &ContentTables,
    rng: &mut ChaCha8Rng,
) -> Result<(Vec<Hero>, Formation), ContentError> {
    let mut heroes = Vec::with_capacity(config.party.len());
    let mut formation = Formation::new();

    for (i, member) in config.party.iter().enumerate() {
        let class = content
            .class(member.class)
            .ok_or_else(|| ContentError::UnknownClass(member.class.name().to_string()))?;
        let id = HeroId(i as u64 + 1);
        if formation.place(member.slot, id)?.is_some() {
            return Err(ContentError::InvalidParty(format!(
                "{}:{}",
                member.class.name().to_lowercase(),
                member.slot
            )));
        }
        heroes.push(class.recruit(id, generate_hero_name(rng)));
    }

    Ok((heroes, formation))
}

fn simulate_single_run(
    config: &SimConfig,
    dungeon: &DungeonConfig,
    content: &ContentTables,
    rng: &mut ChaCha8Rng,
) -> Result<RunStats, ContentError> {
    let (mut heroes, formation) = recruit_party(config, content, rng)?;
    let party_size = heroes.len().max(1) as f64;

    let mut xp_earned = 0u64;
    let mut actions = 0u32;
    let mut defeated_in_room = None;

    let mut run = DungeonRun::new(&mut heroes, &formation, dungeon, content, &config.rules, &mut *rng)?;
    while let Some(step) = run.step()? {
        match step {
            RunStep::Action { .. } => actions += 1,
            RunStep::RoomCleared { xp, .. } => {
                let survivors = run.heroes().iter().filter(|h| h.is_alive()).count() as u64;
                xp_earned += u64::from(xp) * survivors;
            }
            RunStep::Defeated { room } => defeated_in_room = Some(room),
            RunStep::RoomEntered { .. } | RunStep::DungeonCleared => {}
        }
    }
    let outcome = run.into_outcome();

    let total_levels: u32 = heroes.iter().map(|h| h.level).sum();
    Ok(RunStats {
        victory: outcome.victory,
        rooms_cleared: outcome.rooms_cleared,
        casualties: outcome.casualties.len() as u32,
        defeated_in_room,
        avg_final_level: f64::from(total_levels) / party_size,
        xp_per_hero: xp_earned as f64 / party_size,
        actions,
        reward: outcome.reward,
    })
}
