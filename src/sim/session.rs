//! Multi-level run
//!
//! [`Session`] keeps the score, lives and level across levels. [`Game`]
//! owns a session together with the current world and steps it one tick
//! at a time, restarting or advancing levels as ticks report back.

use serde::{Deserialize, Serialize};

use super::host::{Effect, InputSource, Scoreboard, SeededRng, Status, TickContext};
use super::tick::{TickOutcome, tick};
use super::world::World;
use crate::tuning::Tuning;

pub const START_LIVES: i32 = 3;
pub const FIRST_LEVEL: u32 = 1;

/// Score, lives and level, plus the last published HUD line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub score: i64,
    pub lives: i32,
    pub level: u32,
    pub status: Option<Status>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            level: FIRST_LEVEL,
            status: None,
        }
    }
}

impl Session {
    pub fn status_line(&self) -> Option<String> {
        self.status.map(|s| s.to_string())
    }
}

impl Scoreboard for Session {
    fn report_score_delta(&mut self, delta: i64) {
        self.score += delta;
    }

    fn report_lives_delta(&mut self, delta: i32) {
        self.lives += delta;
    }

    fn current_level(&self) -> u32 {
        self.level
    }

    fn current_score(&self) -> i64 {
        self.score
    }

    fn current_lives(&self) -> i32 {
        self.lives
    }

    fn publish_status(&mut self, status: &Status) {
        self.status = Some(*status);
    }
}

/// A seeded game: one world at a time, driven tick by tick
pub struct Game {
    pub tuning: Tuning,
    pub session: Session,
    pub world: World,
    rng: SeededRng,
    effects: Vec<Effect>,
    ticks: u64,
    over: bool,
}

impl Game {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut rng = SeededRng::new(seed);
        let session = Session::default();
        let world = World::new_level(tuning.clone(), session.level, &mut rng);
        log::info!("New game, seed {}", seed);
        Self {
            tuning,
            session,
            world,
            rng,
            effects: Vec::new(),
            ticks: 0,
            over: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Take the audio cues queued since the last drain
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Run one tick and handle its outcome. A finished game stays put.
    pub fn step(&mut self, input: &mut dyn InputSource) -> TickOutcome {
        if self.over {
            return TickOutcome::Continue;
        }
        let outcome = {
            let mut ctx = TickContext {
                rng: &mut self.rng,
                effects: &mut self.effects,
                input,
                board: &mut self.session,
            };
            tick(&mut self.world, &mut ctx)
        };
        self.ticks += 1;

        match outcome {
            TickOutcome::Continue => {}
            TickOutcome::PlayerDied => {
                if self.session.lives > 0 {
                    log::info!(
                        "{} lives left, restarting level {}",
                        self.session.lives,
                        self.session.level
                    );
                    self.restart_level();
                } else {
                    log::info!("Game over with score {}", self.session.score);
                    self.over = true;
                }
            }
            TickOutcome::LevelFinished => {
                self.session.level += 1;
                self.restart_level();
            }
        }
        outcome
    }

    fn restart_level(&mut self) {
        self.world = World::new_level(self.tuning.clone(), self.session.level, &mut self.rng);
    }
}
