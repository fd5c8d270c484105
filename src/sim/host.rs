//! Collaborator seams
//!
//! The simulation never touches a window, a speaker or a clock. Everything it
//! consumes from the outside world comes through the traits here and is
//! handed to each tick in a [`TickContext`].

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// One discrete player command per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Counter-clockwise along the rim
    Left,
    /// Clockwise along the rim
    Right,
    /// Single forward spray
    Spray,
    /// Radial flame burst
    Flame,
}

/// Fire-and-forget audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    PlayerHurt,
    PlayerDie,
    PlayerSpray,
    PlayerFire,
    SalmonellaHurt,
    SalmonellaDie,
    EcoliHurt,
    EcoliDie,
    BacteriumBorn,
    GotGoodie,
    FinishedLevel,
}

/// Inclusive uniform integer source
pub trait RandomSource {
    /// Uniform in `low..=high`; the bounds may arrive swapped
    fn rand_int(&mut self, low: i32, high: i32) -> i32;
}

/// Seeded PCG generator so a run can be replayed from its seed
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn rand_int(&mut self, low: i32, high: i32) -> i32 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        self.rng.random_range(low..=high)
    }
}

/// Receives audio cues
pub trait EffectSink {
    fn play(&mut self, effect: Effect);
}

impl EffectSink for Vec<Effect> {
    fn play(&mut self, effect: Effect) {
        self.push(effect);
    }
}

/// Non-blocking keyboard (or script) poll
pub trait InputSource {
    fn sample(&mut self) -> Option<Command>;
}

/// Replays a fixed queue of commands, then reports no input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<Option<Command>>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Option<Command>>) -> Self {
        Self {
            queue: commands.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self) -> Option<Command> {
        self.queue.pop_front().flatten()
    }
}

/// Demo input: mashes keys at random, idles about half the time
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: SeededRng,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SeededRng::new(seed),
        }
    }
}

impl InputSource for RandomInput {
    fn sample(&mut self) -> Option<Command> {
        match self.rng.rand_int(0, 9) {
            0 | 1 => Some(Command::Left),
            2 | 3 => Some(Command::Right),
            4 => Some(Command::Spray),
            // Flames are precious
            5 if self.rng.rand_int(0, 19) == 0 => Some(Command::Flame),
            _ => None,
        }
    }
}

/// The six values the HUD shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    pub score: i64,
    pub level: u32,
    pub lives: i32,
    pub health: i32,
    pub sprays: u32,
    pub flames: u32,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.score < 0 {
            write!(f, "Score: -{:05}", self.score.unsigned_abs())?;
        } else {
            write!(f, "Score: {:06}", self.score)?;
        }
        write!(
            f,
            "  Level: {:2}  Lives: {:1}  Health: {:3}  Sprays: {:2}  Flames: {:2}",
            self.level, self.lives, self.health, self.sprays, self.flames
        )
    }
}

/// Game-level bookkeeping owned by whoever runs the levels
pub trait Scoreboard {
    fn report_score_delta(&mut self, delta: i64);
    fn report_lives_delta(&mut self, delta: i32);
    fn current_level(&self) -> u32;
    fn current_score(&self) -> i64;
    fn current_lives(&self) -> i32;
    fn publish_status(&mut self, status: &Status);
}

/// Everything a tick may call out to
pub struct TickContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub effects: &'a mut dyn EffectSink,
    pub input: &'a mut dyn InputSource,
    pub board: &'a mut dyn Scoreboard,
}
