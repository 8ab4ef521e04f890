//! Paced iteration over a dungeon run.

use super::types::BattleSpeed;
use crate::content::ContentError;
use crate::dungeon::{BattleOutcome, DungeonRun, RunStep};
use rand::Rng;
use std::time::Duration;

/// Drives a [`DungeonRun`] one step at a time, pairing each step with the
/// delay a viewer should wait before the next one.
///
/// The caller owns the clock. Changing speed mid-run changes the delays
/// only; the steps themselves are the same as `run_to_completion` would
/// produce with the same rng.
pub struct Playback<'a, R: Rng> {
    run: DungeonRun<'a, R>,
    speed: BattleSpeed,
    done: bool,
}

impl<'a, R: Rng> Playback<'a, R> {
    pub fn new(run: DungeonRun<'a, R>, speed: BattleSpeed) -> Self {
        Self {
            run,
            speed,
            done: false,
        }
    }

    pub fn speed(&self) -> BattleSpeed {
        self.speed
    }

    pub fn set_speed(&mut self, speed: BattleSpeed) {
        self.speed = speed;
    }

    /// Moves to the next speed and returns it.
    pub fn cycle_speed(&mut self) -> BattleSpeed {
        self.speed = self.speed.next();
        self.speed
    }

    pub fn run(&self) -> &DungeonRun<'a, R> {
        &self.run
    }

    pub fn into_outcome(self) -> BattleOutcome {
        self.run.into_outcome()
    }
}

impl<R: Rng> Iterator for Playback<'_, R> {
    type Item = Result<(RunStep, Duration), ContentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.run.step() {
            Ok(Some(step)) => Some(Ok((step, self.speed.step_delay()))),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::BattleRules;
    use crate::content::ContentTables;
    use crate::heroes::{Formation, Hero, HeroClass, HeroId};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_party(content: &ContentTables) -> (Vec<Hero>, Formation) {
        let mut formation = Formation::new();
        let classes = [HeroClass::Warrior, HeroClass::Archer, HeroClass::Mage, HeroClass::Cleric];
        let slots = [0, 4, 7, 8];
        let heroes = classes
            .iter()
            .zip(slots)
            .enumerate()
            .map(|(i, (class, slot))| {
                let id = HeroId(i as u64 + 1);
                formation.place(slot, id).unwrap();
                content.class(*class).unwrap().recruit(id, format!("Hero {}", i + 1))
            })
            .collect();
        (heroes, formation)
    }

    #[test]
    fn test_delays_follow_speed() {
        let content = ContentTables::default();
        let rules = BattleRules::default();
        let (mut heroes, formation) = create_party(&content);
        let config = content.dungeon("Forest Ruins").unwrap();
        let run = DungeonRun::new(
            &mut heroes,
            &formation,
            config,
            &content,
            &rules,
            ChaCha8Rng::seed_from_u64(12345),
        )
        .unwrap();
        let mut playback = Playback::new(run, BattleSpeed::Normal);

        let (_, delay) = playback.next().unwrap().unwrap();
        assert_eq!(delay, Duration::from_millis(500));

        assert_eq!(playback.cycle_speed(), BattleSpeed::Double);
        let (_, delay) = playback.next().unwrap().unwrap();
        assert_eq!(delay, Duration::from_millis(250));
    }

    #[test]
    fn test_playback_matches_run_to_completion() {
        let content = ContentTables::default();
        let rules = BattleRules::default();
        let config = content.dungeon("Dark Caverns").unwrap();

        let (mut heroes_a, formation) = create_party(&content);
        let direct = DungeonRun::new(
            &mut heroes_a,
            &formation,
            config,
            &content,
            &rules,
            ChaCha8Rng::seed_from_u64(7),
        )
        .unwrap()
        .run_to_completion()
        .unwrap();

        let (mut heroes_b, formation) = create_party(&content);
        let run = DungeonRun::new(
            &mut heroes_b,
            &formation,
            config,
            &content,
            &rules,
            ChaCha8Rng::seed_from_u64(7),
        )
        .unwrap();
        let mut playback = Playback::new(run, BattleSpeed::Half);
        let mut steps = 0;
        while let Some(item) = playback.next() {
            item.unwrap();
            steps += 1;
            if steps % 3 == 0 {
                playback.cycle_speed();
            }
        }
        assert!(playback.next().is_none());
        let paced = playback.into_outcome();

        assert_eq!(paced, direct);
        assert_eq!(heroes_a, heroes_b);
    }
}
