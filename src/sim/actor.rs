//! Actor model
//!
//! Every non-player entity is one [`Actor`]: shared placement and liveness
//! plus an [`ActorKind`] tag carrying the per-variant state. Capabilities
//! are derived from the tag, never stored.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Body, step_from};
use super::host::{Effect, EffectSink};
use crate::normalize_degrees;
use crate::tuning::Tuning;

/// Which interactions apply to an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Projectiles can hit it
    pub damageable: bool,
    /// Bacteria cannot step onto it
    pub can_block: bool,
    /// Level layout may place dirt on top of it
    pub can_overlap: bool,
    /// Bacteria can eat it
    pub edible: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            damageable: true,
            can_block: false,
            can_overlap: false,
            edible: false,
        }
    }
}

/// Integer health with a one-way transition to dead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health(i32);

/// What a successful hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wound {
    Hurt,
    Died,
}

impl Health {
    pub fn new(hp: i32) -> Self {
        Self(hp)
    }

    pub fn get(&self) -> i32 {
        self.0
    }

    /// Subtract `hp` and report whether that was fatal
    pub fn take(&mut self, hp: i32) -> Wound {
        self.0 -= hp;
        if self.0 <= 0 { Wound::Died } else { Wound::Hurt }
    }

    /// Reset to `hp`; refuses non-positive values
    pub fn restore(&mut self, hp: i32) -> bool {
        if hp <= 0 {
            return false;
        }
        self.0 = hp;
        true
    }
}

/// Bacterium species (also the pit quota slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Plain wanderer
    Salmonella,
    /// Wanderer that charges a nearby player
    AggressiveSalmonella,
    /// Direct chaser
    Ecoli,
}

impl Species {
    pub const ALL: [Species; 3] = [
        Species::Salmonella,
        Species::AggressiveSalmonella,
        Species::Ecoli,
    ];

    pub fn index(self) -> usize {
        match self {
            Species::Salmonella => 0,
            Species::AggressiveSalmonella => 1,
            Species::Ecoli => 2,
        }
    }

    pub fn hurt_effect(self) -> Effect {
        match self {
            Species::Salmonella | Species::AggressiveSalmonella => Effect::SalmonellaHurt,
            Species::Ecoli => Effect::EcoliHurt,
        }
    }

    pub fn die_effect(self) -> Effect {
        match self {
            Species::Salmonella | Species::AggressiveSalmonella => Effect::SalmonellaDie,
            Species::Ecoli => Effect::EcoliDie,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bacterium {
    pub species: Species,
    pub health: Health,
    pub toxicity: i32,
    /// Food eaten since the last division
    pub food_eaten: u32,
    /// Steps left before the heading is re-rolled
    pub move_plan: i32,
}

impl Bacterium {
    pub fn new(species: Species, tuning: &Tuning) -> Self {
        let stats = tuning.species(species);
        Self {
            species,
            health: Health::new(stats.health),
            toxicity: stats.toxicity,
            food_eaten: 0,
            move_plan: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Long range, low damage
    Spray,
    /// Short range, high damage
    Flame,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub traveled: f64,
    pub range: f64,
    pub damage: i32,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, tuning: &Tuning) -> Self {
        let stats = tuning.projectile(kind);
        Self {
            kind,
            traveled: 0.0,
            range: stats.range,
            damage: stats.damage,
        }
    }

    pub fn range_reached(&self) -> bool {
        self.traveled >= self.range
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoodieKind {
    RestoreHealth,
    FlameThrower,
    ExtraLife,
    /// Hazard: costs score and health
    Fungus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Goodie {
    pub kind: GoodieKind,
    pub age: u32,
    pub lifetime: u32,
}

impl Goodie {
    pub fn new(kind: GoodieKind, lifetime: u32) -> Self {
        Self {
            kind,
            age: 0,
            lifetime,
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Bacteria spawner with a per-species quota
#[derive(Debug, Clone, PartialEq)]
pub struct Pit {
    pub quotas: [u32; 3],
}

impl Pit {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            quotas: tuning.pit.quotas,
        }
    }

    pub fn remaining(&self, species: Species) -> u32 {
        self.quotas[species.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.quotas.iter().all(|&q| q == 0)
    }
}

/// Per-variant state
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    Dirt,
    Food,
    Pit(Pit),
    Bacterium(Bacterium),
    Projectile(Projectile),
    Goodie(Goodie),
}

impl ActorKind {
    pub fn capabilities(&self) -> Capabilities {
        let base = Capabilities::default();
        match self {
            ActorKind::Dirt => Capabilities {
                damageable: false,
                can_block: true,
                can_overlap: true,
                ..base
            },
            ActorKind::Food => Capabilities {
                damageable: false,
                edible: true,
                ..base
            },
            ActorKind::Pit(_) | ActorKind::Projectile(_) => Capabilities {
                damageable: false,
                ..base
            },
            ActorKind::Bacterium(_) | ActorKind::Goodie(_) => base,
        }
    }

    /// Render depth: bacteria draw above everything else
    pub fn depth(&self) -> u8 {
        match self {
            ActorKind::Bacterium(_) => 0,
            _ => 1,
        }
    }

    /// Heading a freshly spawned actor faces
    pub fn initial_direction(&self) -> f64 {
        match self {
            ActorKind::Bacterium(_) | ActorKind::Food => 90.0,
            _ => 0.0,
        }
    }
}

/// A live (or about to be swept) entity in the dish
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub id: u32,
    pub pos: DVec2,
    /// Facing, in degrees
    pub direction: f64,
    pub depth: u8,
    alive: bool,
    pub kind: ActorKind,
}

impl Body for Actor {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos(&self) -> DVec2 {
        self.pos
    }
}

impl Actor {
    pub fn new(id: u32, pos: DVec2, direction: f64, kind: ActorKind) -> Self {
        Self {
            id,
            pos,
            direction: normalize_degrees(direction),
            depth: kind.depth(),
            alive: true,
            kind,
        }
    }

    pub fn alive(&self) -> bool {
        self.alive
    }

    pub fn set_dead(&mut self) {
        self.alive = false;
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn set_direction(&mut self, degrees: f64) {
        self.direction = normalize_degrees(degrees);
    }

    pub fn move_forward(&mut self, step: f64) {
        self.pos = step_from(self.pos, self.direction, step);
    }

    pub fn is_bacterium(&self) -> bool {
        matches!(self.kind, ActorKind::Bacterium(_))
    }

    pub fn bacterium(&self) -> Option<&Bacterium> {
        match &self.kind {
            ActorKind::Bacterium(b) => Some(b),
            _ => None,
        }
    }

    pub fn bacterium_mut(&mut self) -> Option<&mut Bacterium> {
        match &mut self.kind {
            ActorKind::Bacterium(b) => Some(b),
            _ => None,
        }
    }

    /// Health, for actors that carry it
    pub fn health(&self) -> Option<i32> {
        self.bacterium().map(|b| b.health.get())
    }

    /// Apply `hp` damage.
    ///
    /// Health-bearing actors lose `hp` and cue a hurt or die sound; everything
    /// else dies outright. Returns false, changing nothing, when the actor is
    /// already dead or `hp` is not positive.
    pub fn damage(&mut self, hp: i32, effects: &mut dyn EffectSink) -> bool {
        if !self.alive || hp <= 0 {
            return false;
        }
        match &mut self.kind {
            ActorKind::Bacterium(b) => match b.health.take(hp) {
                Wound::Died => {
                    self.alive = false;
                    effects.play(b.species.die_effect());
                }
                Wound::Hurt => effects.play(b.species.hurt_effect()),
            },
            _ => self.alive = false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bacterium(species: Species) -> Actor {
        let kind = ActorKind::Bacterium(Bacterium::new(species, &Tuning::default()));
        Actor::new(1, DVec2::ZERO, 90.0, kind)
    }

    #[test]
    fn test_default_capabilities_are_least_permissive() {
        let caps = Capabilities::default();
        assert!(caps.damageable);
        assert!(!caps.can_block && !caps.can_overlap && !caps.edible);
    }

    #[test]
    fn test_variant_capabilities() {
        let dirt = ActorKind::Dirt.capabilities();
        assert!(dirt.can_block && dirt.can_overlap && !dirt.damageable);

        let food = ActorKind::Food.capabilities();
        assert!(food.edible && !food.damageable);

        let goodie = ActorKind::Goodie(Goodie::new(GoodieKind::Fungus, 10)).capabilities();
        assert!(goodie.damageable);

        let pit = ActorKind::Pit(Pit::new(&Tuning::default())).capabilities();
        assert!(!pit.damageable);
    }

    #[test]
    fn test_plain_actor_dies_on_any_hit() {
        let mut effects = Vec::<Effect>::new();
        let mut goodie = Actor::new(
            3,
            DVec2::ZERO,
            0.0,
            ActorKind::Goodie(Goodie::new(GoodieKind::RestoreHealth, 100)),
        );
        assert!(goodie.damage(1, &mut effects));
        assert!(!goodie.alive());
        assert!(effects.is_empty());
        // Second hit is a no-op
        assert!(!goodie.damage(1, &mut effects));
    }

    #[test]
    fn test_plain_actor_ignores_non_positive_hit() {
        let mut effects = Vec::<Effect>::new();
        let mut dirt = Actor::new(3, DVec2::ZERO, 0.0, ActorKind::Dirt);
        assert!(!dirt.damage(0, &mut effects));
        assert!(!dirt.damage(-4, &mut effects));
        assert!(dirt.alive());
    }

    #[test]
    fn test_bacterium_hurt_then_die() {
        let mut effects = Vec::<Effect>::new();
        let mut ecoli = bacterium(Species::Ecoli);
        assert_eq!(ecoli.health(), Some(5));

        assert!(ecoli.damage(2, &mut effects));
        assert_eq!(ecoli.health(), Some(3));
        assert!(ecoli.alive());
        assert_eq!(effects, vec![Effect::EcoliHurt]);

        assert!(ecoli.damage(5, &mut effects));
        assert!(!ecoli.alive());
        assert_eq!(effects.last(), Some(&Effect::EcoliDie));

        // Dead stays dead; nothing else is cued
        assert!(!ecoli.damage(5, &mut effects));
        assert_eq!(effects.len(), 2);
        assert_eq!(ecoli.health(), Some(-2));
    }

    #[test]
    fn test_salmonella_sounds() {
        let mut effects = Vec::<Effect>::new();
        let mut s = bacterium(Species::AggressiveSalmonella);
        s.damage(1, &mut effects);
        assert_eq!(effects, vec![Effect::SalmonellaHurt]);
    }

    #[test]
    fn test_health_restore_rejects_non_positive() {
        let mut h = Health::new(10);
        assert!(!h.restore(0));
        assert_eq!(h.get(), 10);
        assert!(h.restore(100));
        assert_eq!(h.get(), 100);
    }

    #[test]
    fn test_projectile_range() {
        let mut p = Projectile::new(ProjectileKind::Spray, &Tuning::default());
        assert_eq!(p.range, 112.0);
        assert_eq!(p.damage, 2);
        p.traveled = 111.0;
        assert!(!p.range_reached());
        p.traveled = 112.0;
        assert!(p.range_reached());
    }

    proptest! {
        #[test]
        fn proptest_damage_contract(hits in proptest::collection::vec(-3i32..8, 1..20)) {
            let mut effects = Vec::<Effect>::new();
            let mut s = bacterium(Species::AggressiveSalmonella);
            let mut was_dead = false;
            for hp in hits {
                let before = s.health().unwrap();
                let ok = s.damage(hp, &mut effects);
                if was_dead || hp <= 0 {
                    prop_assert!(!ok);
                    prop_assert_eq!(s.health().unwrap(), before);
                } else {
                    prop_assert!(ok);
                    prop_assert_eq!(s.health().unwrap(), before - hp);
                    prop_assert_eq!(s.alive(), s.health().unwrap() > 0);
                }
                if was_dead {
                    prop_assert!(!s.alive());
                }
                was_dead = !s.alive();
            }
        }
    }
}
