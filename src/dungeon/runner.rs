//! Dungeon run state machine.
//!
//! A run walks `Entering -> RoomCombat -> RoomCleared -> Entering ...` until
//! the last room is cleared (`DungeonCleared`) or the party is wiped out
//! (`DefeatedMidRoom`). Each call to [`DungeonRun::step`] performs one
//! transition or one combat action, so a caller can pace playback freely
//! without affecting the result.

use super::generation::generate_room;
use super::types::{DungeonConfig, Enemy};
use crate::combat::{
    BattleContext, BattleLog, BattleRules, CombatantKind, LogEntry, LogKind, PartyMember,
    StepOutcome, TurnScheduler,
};
use crate::content::{ContentError, ContentTables};
use crate::heroes::{grant_xp, Formation, FormationError, Hero, HeroId, Row};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Entering { room: u32 },
    RoomCombat { room: u32 },
    RoomCleared { room: u32 },
    DefeatedMidRoom { room: u32 },
    DungeonCleared,
}

impl RunPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::DefeatedMidRoom { .. } | RunPhase::DungeonCleared)
    }
}

/// What a single call to [`DungeonRun::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStep {
    RoomEntered { room: u32, is_boss: bool, enemies: usize },
    Action { room: u32, actor: CombatantKind },
    RoomCleared { room: u32, xp: u32 },
    Defeated { room: u32 },
    DungeonCleared,
}

/// Final result of a dungeon run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub victory: bool,
    /// Heroes who fell, in the order they fell
    pub casualties: Vec<HeroId>,
    pub log: Vec<LogEntry>,
    /// Milestone and xp-level entries for the end-of-run summary
    pub milestones: Vec<LogEntry>,
    pub rooms_cleared: u32,
    /// Dungeon reward on victory, otherwise 0
    pub reward: u32,
}

struct ActiveRoom {
    is_boss: bool,
    party: Vec<PartyMember>,
    enemies: Vec<Enemy>,
    scheduler: TurnScheduler,
}

/// One pass through a dungeon.
///
/// The run borrows the caller's roster mutably. Hp, xp, level and special
/// usage are updated in place and persist after the run. Enemies live only
/// as long as their room.
pub struct DungeonRun<'a, R: Rng> {
    heroes: &'a mut [Hero],
    config: &'a DungeonConfig,
    content: &'a ContentTables,
    rules: &'a BattleRules,
    rng: R,
    /// Formation members in slot order
    members: Vec<PartyMember>,
    phase: RunPhase,
    room: Option<ActiveRoom>,
    log: BattleLog,
    casualties: Vec<HeroId>,
    rooms_cleared: u32,
}

impl<'a, R: Rng> DungeonRun<'a, R> {
    /// Prepares a run and refreshes every placed hero's special.
    ///
    /// Fails when the dungeon config is malformed, when the roster repeats
    /// a hero id, or when the formation names a hero missing from the roster.
    pub fn new(
        heroes: &'a mut [Hero],
        formation: &Formation,
        config: &'a DungeonConfig,
        content: &'a ContentTables,
        rules: &'a BattleRules,
        rng: R,
    ) -> Result<Self, ContentError> {
        config.validate()?;
        for (i, hero) in heroes.iter().enumerate() {
            if heroes[i + 1..].iter().any(|other| other.id == hero.id) {
                return Err(ContentError::DuplicateHeroId(hero.id));
            }
        }

        let mut members = Vec::new();
        for (slot, id) in formation.slots().iter().enumerate() {
            let Some(id) = id else { continue };
            let roster_index = heroes
                .iter()
                .position(|h| h.id == *id)
                .ok_or(ContentError::UnknownHero(*id))?;
            if members.iter().any(|m: &PartyMember| m.roster_index == roster_index) {
                return Err(FormationError::DuplicateHero(*id).into());
            }
            let row = Row::from_slot(slot).ok_or(FormationError::SlotOutOfRange(slot))?;
            members.push(PartyMember {
                roster_index,
                slot,
                row,
            });
        }

        for member in &members {
            let hero = &mut heroes[member.roster_index];
            hero.charges_used = 0;
            hero.cooldown = 0;
        }

        info!(dungeon = %config.name, party = members.len(), "starting dungeon run");
        Ok(Self {
            heroes,
            config,
            content,
            rules,
            rng,
            members,
            phase: RunPhase::Entering { room: 1 },
            room: None,
            log: BattleLog::new(),
            casualties: Vec::new(),
            rooms_cleared: 0,
        })
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn heroes(&self) -> &[Hero] {
        &*self.heroes
    }

    /// Enemies of the room being fought, empty between rooms.
    pub fn enemies(&self) -> &[Enemy] {
        self.room
            .as_ref()
            .map(|r| r.enemies.as_slice())
            .unwrap_or_default()
    }

    pub fn casualties(&self) -> &[HeroId] {
        &self.casualties
    }

    pub fn rooms_cleared(&self) -> u32 {
        self.rooms_cleared
    }

    pub fn config(&self) -> &DungeonConfig {
        self.config
    }

    /// Performs one transition or combat action. Returns `None` once the run
    /// has ended.
    pub fn step(&mut self) -> Result<Option<RunStep>, ContentError> {
        let step = match self.phase {
            RunPhase::Entering { room } => self.enter_room(room)?,
            RunPhase::RoomCombat { room } => self.advance_combat(room)?,
            RunPhase::RoomCleared { room } if room >= self.config.rooms => self.finish_dungeon(),
            RunPhase::RoomCleared { room } => self.enter_room(room + 1)?,
            RunPhase::DefeatedMidRoom { .. } | RunPhase::DungeonCleared => return Ok(None),
        };
        Ok(Some(step))
    }

    /// Steps until the run ends and returns the outcome.
    pub fn run_to_completion(mut self) -> Result<BattleOutcome, ContentError> {
        while self.step()?.is_some() {}
        Ok(self.into_outcome())
    }

    pub fn into_outcome(self) -> BattleOutcome {
        let victory = self.phase == RunPhase::DungeonCleared;
        let (log, milestones) = self.log.into_parts();
        BattleOutcome {
            victory,
            casualties: self.casualties,
            log,
            milestones,
            rooms_cleared: self.rooms_cleared,
            reward: if victory { self.config.reward } else { 0 },
        }
    }

    fn defeat(&mut self, room: u32, text: String) -> RunStep {
        self.log.push(LogKind::System, room, text);
        self.phase = RunPhase::DefeatedMidRoom { room };
        info!(dungeon = %self.config.name, room, casualties = self.casualties.len(), "party defeated");
        RunStep::Defeated { room }
    }

    fn enter_room(&mut self, room: u32) -> Result<RunStep, ContentError> {
        let party: Vec<PartyMember> = self
            .members
            .iter()
            .filter(|m| self.heroes[m.roster_index].is_alive())
            .copied()
            .collect();
        if party.is_empty() {
            let text = format!("No heroes are able to enter {}.", self.config.name);
            return Ok(self.defeat(room, text));
        }
        if room == 1 {
            self.log.push(
                LogKind::System,
                room,
                format!("Your party enters {}...", self.config.name),
            );
        }

        let is_boss = self.config.is_boss_room(room);
        let enemies = generate_room(self.config, room, is_boss, &self.rules.elite, &mut self.rng)?;
        if enemies.is_empty() {
            let text = format!("[Room {}] The room is empty. There is nothing to fight.", room);
            return Ok(self.defeat(room, text));
        }

        let names: Vec<String> = enemies
            .iter()
            .map(|e| {
                if e.is_elite {
                    format!("Elite {}", e.name)
                } else {
                    e.name.clone()
                }
            })
            .collect();
        let hp: Vec<String> = enemies
            .iter()
            .map(|e| format!("{}/{}", e.hp, e.max_hp))
            .collect();
        self.log.push(
            LogKind::System,
            room,
            format!(
                "Room {}{}: {} ({} HP)",
                room,
                if is_boss { " (Boss)" } else { "" },
                names.join(", "),
                hp.join(", ")
            ),
        );

        let scheduler = TurnScheduler::new(&*self.heroes, &enemies, &party);
        let count = enemies.len();
        self.room = Some(ActiveRoom {
            is_boss,
            party,
            enemies,
            scheduler,
        });
        self.phase = RunPhase::RoomCombat { room };
        Ok(RunStep::RoomEntered {
            room,
            is_boss,
            enemies: count,
        })
    }

    fn advance_combat(&mut self, room: u32) -> Result<RunStep, ContentError> {
        let Some(active) = self.room.as_mut() else {
            return self.enter_room(room);
        };

        let mut ctx = BattleContext {
            room,
            is_boss: active.is_boss,
            party: &active.party,
            catalog: &self.content.abilities,
            rules: self.rules,
            rng: &mut self.rng,
            log: &mut self.log,
        };
        let outcome = active
            .scheduler
            .step(&mut *self.heroes, &mut active.enemies, &mut ctx);
        self.casualties.extend(active.scheduler.take_casualties());

        let step = match outcome {
            StepOutcome::Acted(actor) => RunStep::Action { room, actor },
            StepOutcome::RoomCleared => {
                let xp: u32 = active.enemies.iter().map(|e| e.xp_reward).sum();
                let party = std::mem::take(&mut active.party);
                self.room = None;
                self.award_xp(room, xp, &party);
                self.rooms_cleared += 1;
                self.phase = RunPhase::RoomCleared { room };
                debug!(dungeon = %self.config.name, room, xp, "room cleared");
                RunStep::RoomCleared { room, xp }
            }
            StepOutcome::RoomFailed => {
                self.room = None;
                self.defeat(room, format!("[Room {}] All heroes defeated!", room))
            }
        };
        Ok(step)
    }

    /// Grants the room's xp to every surviving party member.
    fn award_xp(&mut self, room: u32, xp: u32, party: &[PartyMember]) {
        self.log.push(
            LogKind::XpLevel,
            room,
            format!("[Room {}] Heroes gained {} XP.", room, xp),
        );
        for member in party {
            let hero = &mut self.heroes[member.roster_index];
            if !hero.is_alive() {
                continue;
            }
            for level in grant_xp(hero, xp, &self.content.leveling) {
                self.log.push(
                    LogKind::XpLevel,
                    room,
                    format!("[Room {}] {} reached level {}!", room, hero.name, level),
                );
            }
        }
    }

    fn finish_dungeon(&mut self) -> RunStep {
        let room = self.config.rooms;
        self.log.push(
            LogKind::Milestone,
            room,
            format!(
                "{} cleared! The party earns {} gold.",
                self.config.name, self.config.reward
            ),
        );
        self.phase = RunPhase::DungeonCleared;
        info!(dungeon = %self.config.name, casualties = self.casualties.len(), "dungeon cleared");
        RunStep::DungeonCleared
    }
}

/// Applies a finished run to the persistent party.
///
/// Casualties leave the roster and their formation slots. Returns the gold
/// earned.
pub fn settle_outcome(roster: &mut Vec<Hero>, formation: &mut Formation, outcome: &BattleOutcome) -> u32 {
    for id in &outcome.casualties {
        formation.remove(*id);
    }
    roster.retain(|hero| !outcome.casualties.contains(&hero.id));
    outcome.reward
}
