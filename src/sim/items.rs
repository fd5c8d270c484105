//! Short-lived actors: projectiles, goodies and pits

use super::actor::{ActorKind, GoodieKind, Species};
use super::host::{Effect, TickContext};
use super::world::World;

/// Hit the first damageable actor in reach, else fly one step
pub(crate) fn update_projectile(world: &mut World, idx: usize, ctx: &mut TickContext) {
    let actor = world.actor(idx);
    if !actor.alive() {
        return;
    }
    let ActorKind::Projectile(p) = &actor.kind else {
        return;
    };
    let damage = p.damage;

    if let Some(target) = world.first_damageable_overlap(idx) {
        world.damage_actor(target, damage, ctx);
        world.actor_mut(idx).set_dead();
        return;
    }

    let step = world.tuning.projectiles.step;
    let actor = world.actor_mut(idx);
    actor.move_forward(step);
    if let ActorKind::Projectile(p) = &mut actor.kind {
        p.traveled += step;
        if p.range_reached() {
            actor.set_dead();
        }
    }
}

/// Apply on contact with the player, else age toward expiry
pub(crate) fn update_goodie(world: &mut World, idx: usize, ctx: &mut TickContext) {
    let actor = world.actor(idx);
    if !actor.alive() {
        return;
    }
    let ActorKind::Goodie(g) = &actor.kind else {
        return;
    };
    let kind = g.kind;

    if world.overlaps_player(idx) {
        apply_goodie(world, kind, ctx);
        world.actor_mut(idx).set_dead();
        return;
    }

    let actor = world.actor_mut(idx);
    if let ActorKind::Goodie(g) = &mut actor.kind {
        g.age += 1;
        if g.expired() {
            actor.set_dead();
        }
    }
}

fn apply_goodie(world: &mut World, kind: GoodieKind, ctx: &mut TickContext) {
    let g = &world.tuning.goodies;
    log::debug!("Player picked up {:?}", kind);
    match kind {
        GoodieKind::RestoreHealth => {
            ctx.board.report_score_delta(g.heal_score);
            ctx.effects.play(Effect::GotGoodie);
            world.player.complete_heal();
        }
        GoodieKind::FlameThrower => {
            let charges = g.flame_charges;
            ctx.board.report_score_delta(g.flame_score);
            ctx.effects.play(Effect::GotGoodie);
            world.player.add_flames(charges);
        }
        GoodieKind::ExtraLife => {
            ctx.board.report_score_delta(g.extra_life_score);
            ctx.effects.play(Effect::GotGoodie);
            ctx.board.report_lives_delta(1);
        }
        GoodieKind::Fungus => {
            let damage = g.fungus_damage;
            ctx.board.report_score_delta(g.fungus_score);
            world.damage_player(damage, ctx.effects);
        }
    }
}

/// Occasionally release a bacterium from a species with quota left
pub(crate) fn update_pit(world: &mut World, idx: usize, ctx: &mut TickContext) {
    let actor = world.actor(idx);
    if !actor.alive() {
        return;
    }
    let ActorKind::Pit(pit) = &actor.kind else {
        return;
    };
    if pit.is_empty() {
        log::debug!("Pit #{} exhausted", actor.id);
        world.actor_mut(idx).set_dead();
        return;
    }

    let odds = world.tuning.pit.emit_odds;
    if ctx.rng.rand_int(0, odds - 1) != 0 {
        return;
    }

    // At least one quota is positive, so this terminates
    let species = loop {
        let pick = Species::ALL[ctx.rng.rand_int(0, 2) as usize];
        if pit.remaining(pick) > 0 {
            break pick;
        }
    };
    let pos = actor.pos;
    if let ActorKind::Pit(pit) = &mut world.actor_mut(idx).kind {
        pit.quotas[species.index()] -= 1;
    }
    world.spawn_bacterium(pos, species, ctx.effects);
}

/// Roll for a hazard and a beneficial goodie on the rim. Odds tighten
/// as the level rises.
pub(crate) fn spawn_environment(world: &mut World, ctx: &mut TickContext) {
    let level = ctx.board.current_level();

    let odds = world.tuning.fungus_odds(level);
    if ctx.rng.rand_int(0, odds - 1) == 0 {
        world.spawn_goodie(GoodieKind::Fungus, level, ctx.rng);
    }

    let odds = world.tuning.goodie_odds(level);
    if ctx.rng.rand_int(0, odds - 1) == 0 {
        let g = &world.tuning.goodies;
        let (life, flame) = (g.extra_life_weight, g.flame_weight);
        let choice = ctx.rng.rand_int(0, 9);
        let kind = if choice < life {
            GoodieKind::ExtraLife
        } else if choice < life + flame {
            GoodieKind::FlameThrower
        } else {
            GoodieKind::RestoreHealth
        };
        world.spawn_goodie(kind, level, ctx.rng);
    }
}
