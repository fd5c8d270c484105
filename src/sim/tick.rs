//! Fixed-order simulation tick
//!
//! One call advances the dish by one step: player, then every actor in
//! registry order, then the sweep of the dead, environmental spawns, and
//! finally the flush of everything queued during the tick.

use super::actor::ActorKind;
use super::host::{Effect, Status, TickContext};
use super::world::World;
use super::{bacteria, items, player};

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    /// The player died; the level stops immediately
    PlayerDied,
    /// No pits and no bacteria remain
    LevelFinished,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, ctx: &mut TickContext) -> TickOutcome {
    let command = ctx.input.sample();
    player::update(world, command, ctx);

    // Spawns land in the pending buffer, so the live list keeps its length
    for idx in 0..world.actors.len() {
        update_actor(world, idx, ctx);

        if !world.player.alive() {
            ctx.board.report_lives_delta(-1);
            log::info!("Player died on level {}", ctx.board.current_level());
            return TickOutcome::PlayerDied;
        }
        if level_cleared(world, ctx) {
            return TickOutcome::LevelFinished;
        }
    }

    let swept = world.sweep_dead();
    // Kills only leave the counters at the sweep; an emptied dish has no
    // actor left to trigger the check above on later ticks
    if world.actors().is_empty() && level_cleared(world, ctx) {
        return TickOutcome::LevelFinished;
    }
    items::spawn_environment(world, ctx);
    let flushed = world.flush_pending();
    if swept > 0 || flushed > 0 {
        log::trace!("Swept {} actors, flushed {}", swept, flushed);
    }

    let status = status_of(world, ctx);
    ctx.board.publish_status(&status);
    TickOutcome::Continue
}

fn level_cleared(world: &World, ctx: &mut TickContext) -> bool {
    if world.num_pits() > 0 || world.num_bacteria() > 0 {
        return false;
    }
    ctx.effects.play(Effect::FinishedLevel);
    log::info!("Level {} cleared", ctx.board.current_level());
    true
}

fn update_actor(world: &mut World, idx: usize, ctx: &mut TickContext) {
    match world.actor(idx).kind {
        ActorKind::Dirt | ActorKind::Food => {}
        ActorKind::Pit(_) => items::update_pit(world, idx, ctx),
        ActorKind::Bacterium(_) => bacteria::update(world, idx, ctx),
        ActorKind::Projectile(_) => items::update_projectile(world, idx, ctx),
        ActorKind::Goodie(_) => items::update_goodie(world, idx, ctx),
    }
}

/// Snapshot of the HUD values
pub fn status_of(world: &World, ctx: &TickContext) -> Status {
    Status {
        score: ctx.board.current_score(),
        level: ctx.board.current_level(),
        lives: ctx.board.current_lives(),
        health: world.player.health(),
        sprays: world.player.sprays(),
        flames: world.player.flames(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{Bacterium, Goodie, GoodieKind, Pit, Species};
    use crate::sim::host::testing::{Harness, TestBoard};
    use crate::sim::host::{Command, RandomInput, ScriptedInput, SeededRng};
    use crate::tuning::Tuning;
    use glam::DVec2;

    fn world() -> World {
        World::new(Tuning::default())
    }

    /// A far-away pit keeps the level from finishing
    fn with_pit(w: &mut World) {
        w.insert(DVec2::new(100.0, 0.0), ActorKind::Pit(Pit::new(&w.tuning)));
    }

    /// Rng that never triggers a pit emission or an environmental spawn
    fn quiet() -> Harness {
        Harness::with_rng(std::iter::repeat_n(1, 10_000))
    }

    #[test]
    fn test_empty_dish_finishes_level() {
        let mut w = world();
        let mut h = quiet();
        assert_eq!(tick(&mut w, &mut h.ctx()), TickOutcome::LevelFinished);
        assert_eq!(h.effects, vec![Effect::FinishedLevel]);
        assert!(h.board.statuses.is_empty());
    }

    #[test]
    fn test_quiet_tick_publishes_status() {
        let mut w = world();
        with_pit(&mut w);
        let mut h = quiet();
        assert_eq!(tick(&mut w, &mut h.ctx()), TickOutcome::Continue);
        let status = h.board.statuses.last().copied().unwrap();
        assert_eq!(status.health, 100);
        assert_eq!(status.lives, 3);
        assert_eq!(status.level, 1);
    }

    #[test]
    fn test_player_death_stops_the_tick() {
        let mut w = world();
        with_pit(&mut w);
        w.player.damage(99, &mut Vec::<Effect>::new());
        let touching = w.player.pos + DVec2::new(4.0, 0.0);
        let killer = Bacterium::new(Species::Ecoli, &w.tuning);
        w.insert(touching, ActorKind::Bacterium(killer));
        // Never reached: the player dies on the previous update
        let late = Goodie::new(GoodieKind::ExtraLife, 1);
        w.insert(DVec2::ZERO, ActorKind::Goodie(late));

        let mut h = quiet();
        assert_eq!(tick(&mut w, &mut h.ctx()), TickOutcome::PlayerDied);
        assert_eq!(h.board.lives, 2);
        assert_eq!(h.effects.last(), Some(&Effect::PlayerDie));
        assert!(w.actor(2).alive(), "later actors were not updated");
    }

    #[test]
    fn test_flame_burst_appears_after_flush() {
        let mut w = world();
        with_pit(&mut w);
        let mut h = quiet();
        h.input = ScriptedInput::new([Some(Command::Flame)]);
        tick(&mut w, &mut h.ctx());
        let flames = w
            .actors()
            .iter()
            .filter(|a| matches!(a.kind, ActorKind::Projectile(_)))
            .count();
        assert_eq!(flames, 16);
        assert!(w.pending().is_empty());
        assert_eq!(w.player.flames(), 4);
    }

    #[test]
    fn test_goodie_pickup_happens_once() {
        let mut w = world();
        with_pit(&mut w);
        let pos = w.player.pos + DVec2::new(0.0, 3.0);
        w.insert(pos, ActorKind::Goodie(Goodie::new(GoodieKind::RestoreHealth, 100)));
        let mut h = quiet();
        tick(&mut w, &mut h.ctx());
        tick(&mut w, &mut h.ctx());
        assert_eq!(h.board.score, 250);
        assert_eq!(w.actors().len(), 1, "picked goodie was swept");
    }

    #[test]
    fn test_shot_bacterium_is_swept_and_finishes_level() {
        let mut w = world();
        let mut b = Bacterium::new(Species::Salmonella, &w.tuning);
        b.health = crate::sim::actor::Health::new(1);
        // Straight ahead of the player, within reach of the first spray
        let target = w.player.pos + DVec2::new(40.0, 0.0);
        w.insert(target, ActorKind::Bacterium(b));

        let mut h = quiet();
        h.input = ScriptedInput::new([Some(Command::Spray)]);
        let mut outcome = TickOutcome::Continue;
        for _ in 0..5 {
            outcome = tick(&mut w, &mut h.ctx());
            if outcome != TickOutcome::Continue {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::LevelFinished);
        assert_eq!(h.board.score, 100);
    }

    #[test]
    fn test_last_kill_reported_on_next_tick_while_dirt_remains() {
        let mut w = world();
        w.insert(DVec2::new(60.0, 60.0), ActorKind::Dirt);
        let b = Bacterium::new(Species::Salmonella, &w.tuning);
        w.insert(DVec2::ZERO, ActorKind::Bacterium(b));
        w.actor_mut(1).set_dead();

        let mut h = quiet();
        assert_eq!(tick(&mut w, &mut h.ctx()), TickOutcome::Continue);
        assert_eq!(w.num_bacteria(), 0);
        assert_eq!(h.board.statuses.len(), 1, "the sweep tick still publishes");
        assert!(h.effects.is_empty());

        assert_eq!(tick(&mut w, &mut h.ctx()), TickOutcome::LevelFinished);
        assert_eq!(h.effects, vec![Effect::FinishedLevel]);
    }

    #[test]
    fn test_determinism() {
        let run = |seed| {
            let mut rng = SeededRng::new(seed);
            let mut w = World::new_level(Tuning::default(), 1, &mut rng);
            let mut effects = Vec::<Effect>::new();
            let mut input = RandomInput::new(seed);
            let mut board = TestBoard::default();
            for _ in 0..300 {
                let mut ctx = TickContext {
                    rng: &mut rng,
                    effects: &mut effects,
                    input: &mut input,
                    board: &mut board,
                };
                if tick(&mut w, &mut ctx) != TickOutcome::Continue {
                    break;
                }
            }
            let positions: Vec<_> = w.actors().iter().map(|a| (a.id, a.pos)).collect();
            (positions, board.score, effects)
        };
        assert_eq!(run(2024), run(2024));
    }
}
