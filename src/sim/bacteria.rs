//! Bacterium behavior
//!
//! One pass per live bacterium per tick:
//! 1. Aggressive salmonella near the player charge it (and skip locomotion).
//! 2. Touching the player hurts it; otherwise a well-fed bacterium divides;
//!    otherwise it tries to eat whatever food it is sitting on.
//! 3. Locomotion: salmonella wander and lunge at food, e. coli chase the
//!    player.

use glam::DVec2;

use super::actor::Species;
use super::geometry::bearing;
use super::host::{EffectSink, RandomSource, TickContext};
use super::world::World;
use crate::consts::*;

pub(crate) fn update(world: &mut World, idx: usize, ctx: &mut TickContext) {
    let actor = world.actor(idx);
    if !actor.alive() {
        return;
    }
    let Some(b) = actor.bacterium() else {
        return;
    };
    let (species, toxicity, food_eaten) = (b.species, b.toxicity, b.food_eaten);

    let charged = species == Species::AggressiveSalmonella && charge_player(world, idx);

    if world.overlaps_player(idx) {
        world.damage_player(toxicity, ctx.effects);
    } else if food_eaten >= world.tuning.bacteria.food_to_divide {
        divide(world, idx, species, ctx.effects);
    } else if eat_food(world, idx) {
        return;
    }

    if charged {
        return;
    }

    match species {
        Species::Salmonella | Species::AggressiveSalmonella => wander(world, idx, ctx.rng),
        Species::Ecoli => {
            chase_player(world, idx);
        }
    }
}

/// Turn toward a nearby player and lunge. True when the player was in range.
fn charge_player(world: &mut World, idx: usize) -> bool {
    let t = &world.tuning.bacteria;
    let (radius, step) = (t.aggro_radius, t.wander_step);
    if world.dist_to_player(idx) > radius {
        return false;
    }
    let direction = world.bearing_to_player(idx);
    world.actor_mut(idx).set_direction(direction);
    try_step(world, idx, step);
    true
}

/// Spawn a same-species daughter half a sprite toward the dish center
fn divide(world: &mut World, idx: usize, species: Species, effects: &mut dyn EffectSink) {
    if let Some(b) = world.actor_mut(idx).bacterium_mut() {
        b.food_eaten = 0;
    }
    let pos = world.actor(idx).pos;
    let half = SPRITE_WIDTH / 2.0;
    let dx = if pos.x < DISH_CENTER.x { half } else { -half };
    let dy = if pos.y < DISH_CENTER.y { half } else { -half };
    let id = world.spawn_bacterium(pos + DVec2::new(dx, dy), species, effects);
    log::debug!("Bacterium #{} divided into #{}", world.actor(idx).id, id);
}

/// Eat the first food underfoot
fn eat_food(world: &mut World, idx: usize) -> bool {
    let Some(food) = world.first_edible_overlap(idx) else {
        return false;
    };
    world.actor_mut(food).set_dead();
    if let Some(b) = world.actor_mut(idx).bacterium_mut() {
        b.food_eaten += 1;
    }
    true
}

/// Salmonella locomotion: follow the current plan, else lunge at food,
/// else pick a new heading
fn wander(world: &mut World, idx: usize, rng: &mut dyn RandomSource) {
    let plan = world.actor(idx).bacterium().map_or(0, |b| b.move_plan);
    if plan > 0 {
        follow_plan(world, idx, rng);
        return;
    }

    let radius = world.tuning.bacteria.food_detection_radius;
    match world.closest_food(idx, radius) {
        Some(food) => {
            let target = world.actor(food).pos;
            let actor = world.actor_mut(idx);
            actor.set_direction(bearing(actor.pos, target));
            if let Some(b) = actor.bacterium_mut() {
                b.move_plan = 1;
            }
            follow_plan(world, idx, rng);
        }
        None => random_heading(world, idx, rng),
    }
}

/// Spend one planned step; a blocked step re-rolls the heading instead
fn follow_plan(world: &mut World, idx: usize, rng: &mut dyn RandomSource) {
    if let Some(b) = world.actor_mut(idx).bacterium_mut() {
        b.move_plan -= 1;
    }
    let step = world.tuning.bacteria.wander_step;
    if !try_step(world, idx, step) {
        random_heading(world, idx, rng);
    }
}

fn random_heading(world: &mut World, idx: usize, rng: &mut dyn RandomSource) {
    let plan = world.tuning.bacteria.move_plan_length;
    let actor = world.actor_mut(idx);
    actor.set_direction(rng.rand_int(0, 359) as f64);
    if let Some(b) = actor.bacterium_mut() {
        b.move_plan = plan;
    }
}

/// E. coli locomotion: fan out from the direct bearing until a heading is
/// free. Returns whether it moved.
fn chase_player(world: &mut World, idx: usize) -> bool {
    let t = &world.tuning.bacteria;
    let (radius, attempts, fan, step) = (t.chase_radius, t.chase_attempts, t.chase_fan_degrees, t.chase_step);
    if world.dist_to_player(idx) > radius {
        return false;
    }
    let direct = world.bearing_to_player(idx);
    for i in 0..attempts {
        world.actor_mut(idx).set_direction(direct + fan * i as f64);
        if try_step(world, idx, step) {
            return true;
        }
    }
    false
}

/// Step forward along the current facing unless blocked
fn try_step(world: &mut World, idx: usize, step: f64) -> bool {
    let actor = world.actor(idx);
    if world.move_blocked(actor.pos, actor.direction, step) {
        return false;
    }
    world.actor_mut(idx).move_forward(step);
    true
}
