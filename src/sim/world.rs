//! Entity registry
//!
//! Owns every actor and the player. Actors are stored in insertion order,
//! which decides who wins "first match" queries. Spawns requested during a
//! tick wait in a separate buffer and removal of the dead waits for the
//! sweep, so the live list never shrinks or grows while it is being walked.

use glam::DVec2;

use super::actor::{Actor, ActorKind, Bacterium, Goodie, GoodieKind, Pit, Species};
use super::geometry::{bearing, distance, inside_dish, overlap, step_from};
use super::host::{Effect, EffectSink, RandomSource, TickContext};
use super::player::Player;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::Tuning;

pub struct World {
    pub tuning: Tuning,
    pub player: Player,
    pub(crate) actors: Vec<Actor>,
    pending: Vec<Actor>,
    num_pits: u32,
    num_bacteria: u32,
    next_id: u32,
}

impl World {
    /// An empty dish with a fresh player
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::new(&tuning);
        Self {
            tuning,
            player,
            actors: Vec::new(),
            pending: Vec::new(),
            num_pits: 0,
            num_bacteria: 0,
            next_id: PLAYER_ID + 1,
        }
    }

    /// Lay out a level: pits, then food, then dirt, each at a free spot
    pub fn new_level(tuning: Tuning, level: u32, rng: &mut dyn RandomSource) -> Self {
        let mut world = Self::new(tuning);

        for _ in 0..world.tuning.pit_count(level) {
            let pos = world.free_spot(rng, |_| true);
            let pit = Pit::new(&world.tuning);
            world.insert(pos, ActorKind::Pit(pit));
        }
        for _ in 0..world.tuning.food_count(level) {
            let pos = world.free_spot(rng, |_| true);
            world.insert(pos, ActorKind::Food);
        }
        // Dirt may pile on dirt, but never on a pit or food
        for _ in 0..world.tuning.dirt_count(level) {
            let pos = world.free_spot(rng, |other| !other.capabilities().can_overlap);
            world.insert(pos, ActorKind::Dirt);
        }

        log::info!(
            "Level {} laid out: {} pits, {} food, {} dirt",
            level,
            world.num_pits,
            world.tuning.food_count(level),
            world.tuning.dirt_count(level)
        );
        world
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Spawns waiting for the end of the tick
    pub fn pending(&self) -> &[Actor] {
        &self.pending
    }

    pub fn actor(&self, idx: usize) -> &Actor {
        &self.actors[idx]
    }

    pub fn actor_mut(&mut self, idx: usize) -> &mut Actor {
        &mut self.actors[idx]
    }

    pub fn num_pits(&self) -> u32 {
        self.num_pits
    }

    /// Bacteria alive or waiting to be flushed
    pub fn num_bacteria(&self) -> u32 {
        self.num_bacteria
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn make_actor(&mut self, pos: DVec2, direction: Option<f64>, kind: ActorKind) -> Actor {
        match &kind {
            ActorKind::Pit(_) => self.num_pits += 1,
            ActorKind::Bacterium(_) => self.num_bacteria += 1,
            _ => {}
        }
        let id = self.next_entity_id();
        let direction = direction.unwrap_or_else(|| kind.initial_direction());
        Actor::new(id, pos, direction, kind)
    }

    /// Add an actor straight to the live list (level setup, environment)
    pub fn insert(&mut self, pos: DVec2, kind: ActorKind) -> u32 {
        let actor = self.make_actor(pos, None, kind);
        let id = actor.id;
        self.actors.push(actor);
        id
    }

    /// Queue an actor for the end of this tick. Only projectiles take
    /// `direction`; everything else spawns with its kind's default facing.
    pub fn request_spawn(
        &mut self,
        pos: DVec2,
        direction: f64,
        kind: ActorKind,
        effects: &mut dyn EffectSink,
    ) -> u32 {
        let direction = match &kind {
            ActorKind::Projectile(_) => Some(direction),
            _ => None,
        };
        let actor = self.make_actor(pos, direction, kind);
        if actor.is_bacterium() {
            effects.play(Effect::BacteriumBorn);
        }
        log::trace!("Spawn queued: #{} {:?}", actor.id, actor.kind);
        let id = actor.id;
        self.pending.push(actor);
        id
    }

    /// Queue a newborn bacterium
    pub fn spawn_bacterium(&mut self, pos: DVec2, species: Species, effects: &mut dyn EffectSink) -> u32 {
        let b = Bacterium::new(species, &self.tuning);
        self.request_spawn(pos, 0.0, ActorKind::Bacterium(b), effects)
    }

    /// Drop every dead actor, keeping the survivors in order
    pub fn sweep_dead(&mut self) -> usize {
        let before = self.actors.len();
        let (mut pits, mut bacteria) = (0, 0);
        self.actors.retain(|a| {
            if a.alive() {
                return true;
            }
            match a.kind {
                ActorKind::Pit(_) => pits += 1,
                ActorKind::Bacterium(_) => bacteria += 1,
                _ => {}
            }
            false
        });
        self.num_pits = self.num_pits.saturating_sub(pits);
        self.num_bacteria = self.num_bacteria.saturating_sub(bacteria);
        before - self.actors.len()
    }

    /// Move queued spawns into the live list, most recent first
    pub fn flush_pending(&mut self) -> usize {
        let n = self.pending.len();
        while let Some(actor) = self.pending.pop() {
            self.actors.push(actor);
        }
        n
    }

    // --- Spatial queries ---

    pub fn overlaps_player(&self, idx: usize) -> bool {
        overlap(&self.actors[idx], &self.player)
    }

    pub fn dist_to_player(&self, idx: usize) -> f64 {
        distance(self.actors[idx].pos, self.player.pos)
    }

    pub fn bearing_to_player(&self, idx: usize) -> f64 {
        bearing(self.actors[idx].pos, self.player.pos)
    }

    /// Whether one step of `step` along `direction` from `pos` would leave
    /// the dish or land on a blocking actor
    pub fn move_blocked(&self, pos: DVec2, direction: f64, step: f64) -> bool {
        let target = step_from(pos, direction, step);
        if !inside_dish(target) {
            return true;
        }
        self.actors
            .iter()
            .any(|a| a.alive() && a.capabilities().can_block && distance(target, a.pos) <= BLOCK_DISTANCE)
    }

    /// First live actor (in registry order) overlapping `idx` that matches
    fn first_overlap(&self, idx: usize, want: impl Fn(&Actor) -> bool) -> Option<usize> {
        let me = &self.actors[idx];
        self.actors
            .iter()
            .position(|a| a.alive() && want(a) && overlap(me, a))
    }

    /// Projectile target: the first damageable actor touching it
    pub fn first_damageable_overlap(&self, idx: usize) -> Option<usize> {
        self.first_overlap(idx, |a| a.capabilities().damageable)
    }

    /// Meal: the first edible actor touching it
    pub fn first_edible_overlap(&self, idx: usize) -> Option<usize> {
        self.first_overlap(idx, |a| a.capabilities().edible)
    }

    /// Food a wanderer will lunge at.
    ///
    /// Every edible actor inside `radius` replaces the previous pick, so the
    /// answer is the *last* one in registry order, not the nearest.
    pub fn closest_food(&self, idx: usize, radius: f64) -> Option<usize> {
        let me = self.actors[idx].pos;
        let mut found = None;
        for (i, a) in self.actors.iter().enumerate() {
            if a.alive() && a.capabilities().edible && distance(me, a.pos) <= radius {
                found = Some(i);
            }
        }
        found
    }

    // --- Damage ---

    /// Hit an actor through the damage contract, paying out kill rewards
    pub fn damage_actor(&mut self, idx: usize, hp: i32, ctx: &mut TickContext) -> bool {
        if !self.actors[idx].damage(hp, ctx.effects) {
            return false;
        }
        let actor = &self.actors[idx];
        if !actor.alive() && actor.is_bacterium() {
            let pos = actor.pos;
            let b = &self.tuning.bacteria;
            ctx.board.report_score_delta(b.kill_score);
            if ctx.rng.rand_int(0, b.food_drop_odds - 1) == 0 {
                self.request_spawn(pos, 0.0, ActorKind::Food, ctx.effects);
            }
            log::debug!("Bacterium #{} killed", self.actors[idx].id);
        }
        true
    }

    pub fn damage_player(&mut self, hp: i32, effects: &mut dyn EffectSink) -> bool {
        self.player.damage(hp, effects)
    }

    // --- Placement ---

    /// A uniformly drawn integer point within `LAYOUT_RADIUS` of the center
    fn random_layout_point(rng: &mut dyn RandomSource) -> DVec2 {
        let r = LAYOUT_RADIUS as i32;
        loop {
            let p = DISH_CENTER + DVec2::new(rng.rand_int(-r, r) as f64, rng.rand_int(-r, r) as f64);
            if distance(p, DISH_CENTER) <= LAYOUT_RADIUS {
                return p;
            }
        }
    }

    /// Rejection-sample a point clear of every live actor `blocks` accepts
    fn free_spot(&self, rng: &mut dyn RandomSource, blocks: impl Fn(&Actor) -> bool) -> DVec2 {
        loop {
            let p = Self::random_layout_point(rng);
            let clear = self
                .actors
                .iter()
                .all(|a| !blocks(a) || distance(a.pos, p) > OVERLAP_DISTANCE);
            if clear {
                return p;
            }
        }
    }

    /// Place a goodie on the rim at a random angle with a random lifetime
    pub fn spawn_goodie(&mut self, kind: GoodieKind, level: u32, rng: &mut dyn RandomSource) -> u32 {
        let angle = rng.rand_int(0, 359) as f64;
        let pos = polar_to_cartesian(DISH_RADIUS, angle);
        let rolled = rng.rand_int(0, self.tuning.lifetime_roll_max(level));
        let lifetime = (rolled.max(0) as u32).max(self.tuning.goodies.lifetime_min);
        log::debug!("{:?} appears at {:.0} degrees for {} ticks", kind, angle, lifetime);
        self.insert(pos, ActorKind::Goodie(Goodie::new(kind, lifetime)))
    }
}
