//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no clock
//! - Randomness only through the injected `RandomSource`
//! - Stable iteration order (registry insertion order)
//! - No rendering, audio or platform dependencies

pub mod actor;
mod bacteria;
pub mod geometry;
pub mod host;
mod items;
pub mod player;
pub mod session;
pub mod tick;
pub mod world;

pub use actor::{
    Actor, ActorKind, Bacterium, Capabilities, Goodie, GoodieKind, Health, Pit, Projectile,
    ProjectileKind, Species,
};
pub use geometry::{Body, distance, inside_dish, overlap};
pub use host::{
    Command, Effect, EffectSink, InputSource, RandomInput, RandomSource, Scoreboard,
    ScriptedInput, SeededRng, Status, TickContext,
};
pub use player::Player;
pub use session::{Game, Session};
pub use tick::{TickOutcome, tick};
pub use world::World;
