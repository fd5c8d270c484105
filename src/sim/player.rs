//! The player organism
//!
//! The player lives on the dish rim, always facing the center. It is kept
//! outside the actor list and is only reachable through the world.

use glam::DVec2;

use super::actor::{ActorKind, Health, Projectile, ProjectileKind, Wound};
use super::geometry::{Body, rim_angle};
use super::host::{Command, Effect, EffectSink, TickContext};
use super::world::World;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{normalize_degrees, polar_to_cartesian};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: DVec2,
    /// Facing, in degrees
    pub direction: f64,
    alive: bool,
    health: Health,
    max_health: i32,
    sprays: u32,
    max_sprays: u32,
    flames: u32,
}

impl Body for Player {
    fn id(&self) -> u32 {
        PLAYER_ID
    }

    fn pos(&self) -> DVec2 {
        self.pos
    }
}

impl Player {
    /// Spawn on the left edge of the rim, facing right across the dish
    pub fn new(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        Self {
            pos: polar_to_cartesian(DISH_RADIUS, 180.0),
            direction: 0.0,
            alive: true,
            health: Health::new(p.max_health),
            max_health: p.max_health,
            sprays: p.max_sprays,
            max_sprays: p.max_sprays,
            flames: p.start_flames,
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn health(&self) -> i32 {
        self.health.get()
    }

    pub fn sprays(&self) -> u32 {
        self.sprays
    }

    pub fn flames(&self) -> u32 {
        self.flames
    }

    pub fn set_flames(&mut self, flames: u32) {
        self.flames = flames;
    }

    pub fn set_sprays(&mut self, sprays: u32) {
        self.sprays = sprays.min(self.max_sprays);
    }

    /// Restore health to the cap
    pub fn complete_heal(&mut self) {
        self.health.restore(self.max_health);
    }

    /// Add flame charges; there is no cap
    pub fn add_flames(&mut self, n: u32) -> bool {
        if n == 0 {
            return false;
        }
        self.flames += n;
        true
    }

    /// Direct damage (contact toxicity, fungus). Projectiles never get here.
    pub fn damage(&mut self, hp: i32, effects: &mut dyn EffectSink) -> bool {
        if !self.alive || hp <= 0 {
            return false;
        }
        match self.health.take(hp) {
            Wound::Died => {
                self.alive = false;
                effects.play(Effect::PlayerDie);
            }
            Wound::Hurt => effects.play(Effect::PlayerHurt),
        }
        true
    }

    /// Slide along the rim by `degrees` (positive is counter-clockwise)
    /// and turn to face the dish center
    pub fn move_along_rim(&mut self, degrees: f64) {
        let theta = rim_angle(self.pos) + degrees;
        self.pos = polar_to_cartesian(DISH_RADIUS, theta);
        self.direction = normalize_degrees(rim_angle(self.pos) + 180.0);
    }

    /// Where a projectile fired at `offset` degrees from the facing appears
    fn muzzle(&self, offset: f64) -> (DVec2, f64) {
        let direction = normalize_degrees(self.direction + offset);
        (super::geometry::step_from(self.pos, direction, SPRITE_WIDTH), direction)
    }
}

/// Run the player's turn for this tick
pub(crate) fn update(world: &mut World, command: Option<Command>, ctx: &mut TickContext) {
    if !world.player.alive() {
        return;
    }
    let rim_step = world.tuning.player.rim_step_degrees;

    match command {
        Some(Command::Left) => world.player.move_along_rim(rim_step),
        Some(Command::Right) => world.player.move_along_rim(-rim_step),
        Some(Command::Spray) => {
            if world.player.sprays > 0 {
                let (pos, direction) = world.player.muzzle(0.0);
                let spray = Projectile::new(ProjectileKind::Spray, &world.tuning);
                world.request_spawn(pos, direction, ActorKind::Projectile(spray), ctx.effects);
                ctx.effects.play(Effect::PlayerSpray);
                world.player.sprays -= 1;
            }
        }
        Some(Command::Flame) => {
            if world.player.flames > 0 {
                let count = world.tuning.player.flame_burst_count;
                let spacing = world.tuning.player.flame_burst_spacing;
                for i in 0..count {
                    let (pos, direction) = world.player.muzzle(spacing * i as f64);
                    let flame = Projectile::new(ProjectileKind::Flame, &world.tuning);
                    world.request_spawn(pos, direction, ActorKind::Projectile(flame), ctx.effects);
                }
                ctx.effects.play(Effect::PlayerFire);
                world.player.flames -= 1;
            }
        }
        None => {
            if world.player.sprays < world.player.max_sprays {
                world.player.sprays += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::host::testing::Harness;

    fn world() -> World {
        World::new(Tuning::default())
    }

    #[test]
    fn test_player_spawn() {
        let p = Player::new(&Tuning::default());
        assert!((p.pos.x + DISH_RADIUS).abs() < 1e-9);
        assert_eq!(p.health(), 100);
        assert_eq!(p.sprays(), 20);
        assert_eq!(p.flames(), 5);
        assert_eq!(p.id(), PLAYER_ID);
    }

    #[test]
    fn test_rim_move_faces_center() {
        let mut w = world();
        let mut h = Harness::default();
        update(&mut w, Some(Command::Left), &mut h.ctx());

        let (r, theta) = crate::cartesian_to_polar(w.player.pos);
        assert!((r - DISH_RADIUS).abs() < 1e-9);
        assert!((normalize_degrees(theta) - 185.0).abs() < 1e-9);
        assert!((w.player.direction - 5.0).abs() < 1e-9);

        update(&mut w, Some(Command::Right), &mut h.ctx());
        update(&mut w, Some(Command::Right), &mut h.ctx());
        let theta = normalize_degrees(rim_angle(w.player.pos));
        assert!((theta - 175.0).abs() < 1e-9);
        assert!((w.player.direction - 355.0).abs() < 1e-9);
    }

    #[test]
    fn test_spray_consumes_ammo_and_queues_one_projectile() {
        let mut w = world();
        let mut h = Harness::default();
        update(&mut w, Some(Command::Spray), &mut h.ctx());

        assert_eq!(w.player.sprays(), 19);
        assert_eq!(w.pending().len(), 1);
        assert!(w.actors().is_empty());
        let spray = &w.pending()[0];
        assert!(matches!(
            spray.kind,
            ActorKind::Projectile(Projectile { kind: ProjectileKind::Spray, .. })
        ));
        // One sprite width in front of the player
        assert!((spray.pos.distance(w.player.pos) - SPRITE_WIDTH).abs() < 1e-9);
        assert_eq!(h.effects, vec![Effect::PlayerSpray]);
    }

    #[test]
    fn test_spray_without_ammo_does_nothing() {
        let mut w = world();
        w.player.set_sprays(0);
        let mut h = Harness::default();
        update(&mut w, Some(Command::Spray), &mut h.ctx());
        assert!(w.pending().is_empty());
        assert!(h.effects.is_empty());
    }

    #[test]
    fn test_idle_tick_regenerates_spray_up_to_cap() {
        let mut w = world();
        w.player.set_sprays(18);
        let mut h = Harness::default();
        for _ in 0..5 {
            update(&mut w, None, &mut h.ctx());
        }
        assert_eq!(w.player.sprays(), 20);
    }

    #[test]
    fn test_flame_burst() {
        let mut w = world();
        w.player.set_flames(1);
        let mut h = Harness::default();
        update(&mut w, Some(Command::Flame), &mut h.ctx());

        assert_eq!(w.player.flames(), 0);
        assert_eq!(w.pending().len(), 16);
        assert_eq!(h.effects, vec![Effect::PlayerFire]);

        // Out of flames: nothing more
        update(&mut w, Some(Command::Flame), &mut h.ctx());
        assert_eq!(w.pending().len(), 16);
    }

    #[test]
    fn test_player_damage_contract() {
        let mut p = Player::new(&Tuning::default());
        let mut effects = Vec::<Effect>::new();
        assert!(!p.damage(0, &mut effects));
        assert!(p.damage(30, &mut effects));
        assert_eq!(p.health(), 70);
        assert_eq!(effects, vec![Effect::PlayerHurt]);

        p.complete_heal();
        assert_eq!(p.health(), 100);

        assert!(p.damage(100, &mut effects));
        assert!(!p.alive());
        assert_eq!(effects.last(), Some(&Effect::PlayerDie));
        assert!(!p.damage(5, &mut effects));
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut w = world();
        let mut h = Harness::default();
        w.player.damage(1000, &mut h.effects);
        let pos = w.player.pos;
        update(&mut w, Some(Command::Left), &mut h.ctx());
        assert_eq!(w.player.pos, pos);
    }
}
