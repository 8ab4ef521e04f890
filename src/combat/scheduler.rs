//! Active Time Battle scheduling for one room.
//!
//! Every living combatant gains `speed` ticks per time slice. The combatant
//! with the most ticks acts once it reaches the action threshold, paying the
//! threshold and keeping any remainder. A combatant still holding a full
//! threshold after acting goes again before time advances. Ties go to heroes
//! in formation order, then enemies in room order.

use super::resolver::{resolve_enemy_turn, resolve_hero_turn};
use super::types::{BattleContext, Combatant, CombatantKind, LogKind, PartyMember};
use crate::dungeon::Enemy;
use crate::heroes::{Hero, HeroId};
use rand::Rng;

/// Result of a single scheduler step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The combatant took a turn and the room goes on
    Acted(CombatantKind),
    /// Every enemy is down
    RoomCleared,
    /// Every hero is down, or nobody can ever act again
    RoomFailed,
}

#[derive(Debug, Clone)]
pub struct TurnScheduler {
    /// Living combatants: heroes first, then enemies
    living: Vec<Combatant>,
    casualties: Vec<HeroId>,
}

impl TurnScheduler {
    /// Starts a room with every living party member and enemy at zero ticks.
    pub fn new(heroes: &[Hero], enemies: &[Enemy], party: &[PartyMember]) -> Self {
        let hero_entries = party
            .iter()
            .enumerate()
            .filter(|(_, m)| heroes[m.roster_index].is_alive())
            .map(|(i, _)| Combatant::new(CombatantKind::Hero(i)));
        let enemy_entries = enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| Combatant::new(CombatantKind::Enemy(i)));
        Self {
            living: hero_entries.chain(enemy_entries).collect(),
            casualties: Vec::new(),
        }
    }

    pub fn living(&self) -> &[Combatant] {
        &self.living
    }

    /// Heroes who fell in this room, in the order they fell.
    pub fn casualties(&self) -> &[HeroId] {
        &self.casualties
    }

    pub fn take_casualties(&mut self) -> Vec<HeroId> {
        std::mem::take(&mut self.casualties)
    }

    fn has_living(&self, hero_side: bool) -> bool {
        self.living
            .iter()
            .any(|c| matches!(c.kind, CombatantKind::Hero(_)) == hero_side)
    }

    /// Checks for a finished room, then advances time until someone acts.
    pub fn step<R: Rng>(
        &mut self,
        heroes: &mut [Hero],
        enemies: &mut [Enemy],
        ctx: &mut BattleContext<'_, R>,
    ) -> StepOutcome {
        if !self.has_living(false) {
            return StepOutcome::RoomCleared;
        }
        if !self.has_living(true) {
            return StepOutcome::RoomFailed;
        }

        let party = ctx.party;
        let speed_of = |kind: CombatantKind| match kind {
            CombatantKind::Hero(i) => heroes[party[i].roster_index].speed,
            CombatantKind::Enemy(i) => enemies[i].speed,
        };

        let threshold = ctx.rules.action_threshold;
        let actor = loop {
            let mut best = 0;
            for (i, c) in self.living.iter().enumerate() {
                if c.ticks > self.living[best].ticks {
                    best = i;
                }
            }
            if self.living[best].ticks >= threshold {
                self.living[best].ticks -= threshold;
                break self.living[best].kind;
            }
            if self.living.iter().all(|c| speed_of(c.kind) == 0) {
                ctx.record(
                    LogKind::System,
                    format!("[Room {}] Nobody can move. The battle is lost.", ctx.room),
                );
                return StepOutcome::RoomFailed;
            }
            for c in &mut self.living {
                c.ticks = c.ticks.saturating_add(speed_of(c.kind));
            }
        };

        match actor {
            CombatantKind::Hero(i) => resolve_hero_turn(i, heroes, enemies, ctx),
            CombatantKind::Enemy(i) => resolve_enemy_turn(i, heroes, enemies, ctx),
        }
        self.reap(heroes, enemies, ctx);
        StepOutcome::Acted(actor)
    }

    /// Drops fallen combatants and records fallen heroes as casualties.
    fn reap<R: Rng>(&mut self, heroes: &[Hero], enemies: &[Enemy], ctx: &BattleContext<'_, R>) {
        let casualties = &mut self.casualties;
        self.living.retain(|c| match c.kind {
            CombatantKind::Hero(i) => {
                let hero = &heroes[ctx.party[i].roster_index];
                if !hero.is_alive() {
                    casualties.push(hero.id);
                }
                hero.is_alive()
            }
            CombatantKind::Enemy(i) => enemies[i].is_alive(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilityCatalog;
    use crate::combat::types::{BattleLog, BattleRules};
    use crate::dungeon::EnemyTemplate;
    use crate::heroes::{HeroClass, Row};
    use rand::rngs::mock::StepRng;

    fn create_hero(id: u64, speed: u32, attack: u32) -> Hero {
        Hero {
            id: HeroId(id),
            name: format!("Hero{}", id),
            class: HeroClass::Warrior,
            level: 1,
            xp: 0,
            hp: 100,
            max_hp: 100,
            attack,
            hit_chance: 1.0,
            speed,
            cooldown: 0,
            charges_used: 0,
            passive: None,
            special: None,
        }
    }

    fn create_enemy(hp: u32, damage: u32, speed: u32) -> Enemy {
        Enemy::from_template(&EnemyTemplate {
            name: "Goblin".to_string(),
            hp,
            damage,
            hit_chance: 1.0,
            speed,
            base_xp: 1,
            variance: 0.0,
        })
    }

    fn front(roster_index: usize) -> PartyMember {
        PartyMember {
            roster_index,
            slot: roster_index,
            row: Row::Front,
        }
    }

    fn rules() -> BattleRules {
        BattleRules {
            special_chance: 0.0,
            ..BattleRules::without_crits()
        }
    }

    #[test]
    fn test_faster_combatant_acts_more_often() {
        let mut heroes = vec![create_hero(1, 100, 1)];
        let mut enemies = vec![create_enemy(1000, 0, 25)];
        let party = [front(0)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        let mut hero_turns = 0;
        let mut enemy_turns = 0;
        for _ in 0..50 {
            match scheduler.step(&mut heroes, &mut enemies, &mut ctx) {
                StepOutcome::Acted(CombatantKind::Hero(_)) => hero_turns += 1,
                StepOutcome::Acted(CombatantKind::Enemy(_)) => enemy_turns += 1,
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(hero_turns, 40);
        assert_eq!(enemy_turns, 10);
    }

    #[test]
    fn test_ties_go_to_heroes_then_insertion_order() {
        let mut heroes = vec![create_hero(1, 50, 1), create_hero(2, 50, 1)];
        let mut enemies = vec![create_enemy(1000, 0, 50)];
        let party = [front(0), front(1)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        let order: Vec<StepOutcome> = (0..3)
            .map(|_| scheduler.step(&mut heroes, &mut enemies, &mut ctx))
            .collect();
        assert_eq!(
            order,
            vec![
                StepOutcome::Acted(CombatantKind::Hero(0)),
                StepOutcome::Acted(CombatantKind::Hero(1)),
                StepOutcome::Acted(CombatantKind::Enemy(0)),
            ]
        );
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut heroes = vec![create_hero(1, 150, 1)];
        let mut enemies = vec![create_enemy(1000, 0, 1)];
        let party = [front(0)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        scheduler.step(&mut heroes, &mut enemies, &mut ctx);
        assert_eq!(scheduler.living()[0].ticks, 50);
        scheduler.step(&mut heroes, &mut enemies, &mut ctx);
        assert_eq!(scheduler.living()[0].ticks, 100);
        // Still holding a full threshold, so the hero acts again at once
        assert_eq!(
            scheduler.step(&mut heroes, &mut enemies, &mut ctx),
            StepOutcome::Acted(CombatantKind::Hero(0))
        );
        assert_eq!(scheduler.living()[0].ticks, 0);
        assert_eq!(scheduler.living()[1].ticks, 2);
    }

    #[test]
    fn test_room_cleared_and_dead_enemy_inert() {
        let mut heroes = vec![create_hero(1, 50, 20)];
        let mut enemies = vec![create_enemy(20, 0, 40), create_enemy(20, 0, 40)];
        let party = [front(0)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        let mut outcome = StepOutcome::RoomFailed;
        for _ in 0..20 {
            outcome = scheduler.step(&mut heroes, &mut enemies, &mut ctx);
            if let StepOutcome::Acted(CombatantKind::Enemy(i)) = outcome {
                assert!(enemies[i].is_alive());
            }
            if outcome == StepOutcome::RoomCleared {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::RoomCleared);
        assert!(scheduler.casualties().is_empty());
    }

    #[test]
    fn test_fallen_hero_recorded_once() {
        let mut heroes = vec![create_hero(1, 10, 1)];
        heroes[0].hp = 5;
        let mut enemies = vec![create_enemy(100, 10, 100)];
        let party = [front(0)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        assert_eq!(
            scheduler.step(&mut heroes, &mut enemies, &mut ctx),
            StepOutcome::Acted(CombatantKind::Enemy(0))
        );
        assert_eq!(
            scheduler.step(&mut heroes, &mut enemies, &mut ctx),
            StepOutcome::RoomFailed
        );
        assert_eq!(scheduler.casualties(), &[HeroId(1)]);
    }

    #[test]
    fn test_frozen_room_fails() {
        let mut heroes = vec![create_hero(1, 0, 1)];
        let mut enemies = vec![create_enemy(100, 10, 0)];
        let party = [front(0)];
        let catalog = AbilityCatalog::default();
        let rules = rules();
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

        let mut scheduler = TurnScheduler::new(&heroes, &enemies, &party);
        assert_eq!(
            scheduler.step(&mut heroes, &mut enemies, &mut ctx),
            StepOutcome::RoomFailed
        );
        assert_eq!(log.entries()[0].kind, LogKind::System);
    }
}
