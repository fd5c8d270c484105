//! Data-driven game balance
//!
//! Every gameplay number lives here so a run can be re-balanced from a JSON
//! file without recompiling. Defaults reproduce the classic game.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value {field} = {value}: {reason}")]
    Invalid {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },
}

/// Health and contact damage for one bacterium species
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeciesStats {
    pub health: i32,
    pub toxicity: i32,
}

/// Range and damage for one projectile kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileStats {
    pub range: f64,
    pub damage: i32,
}

/// Player controller tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Health on spawn and after a full heal
    pub max_health: i32,
    /// Spray charges on spawn; idle ticks refill up to this cap
    pub max_sprays: u32,
    /// Flame charges on spawn (pickups may raise it without limit)
    pub start_flames: u32,
    /// Degrees travelled along the rim per left/right command
    pub rim_step_degrees: f64,
    /// Projectiles per flame burst
    pub flame_burst_count: u32,
    /// Angular spacing between flame projectiles (degrees)
    pub flame_burst_spacing: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_sprays: 20,
            start_flames: 5,
            rim_step_degrees: 5.0,
            flame_burst_count: 16,
            flame_burst_spacing: 22.0,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Distance covered per tick
    pub step: f64,
    pub spray: ProjectileStats,
    pub flame: ProjectileStats,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            step: 16.0,
            spray: ProjectileStats {
                range: 112.0,
                damage: 2,
            },
            flame: ProjectileStats {
                range: 32.0,
                damage: 5,
            },
        }
    }
}

/// Bacterium AI tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacteriaTuning {
    pub salmonella: SpeciesStats,
    pub aggressive_salmonella: SpeciesStats,
    pub ecoli: SpeciesStats,
    /// Aggressive salmonella charges the player inside this radius
    pub aggro_radius: f64,
    /// E. coli only chase the player inside this radius
    pub chase_radius: f64,
    /// Wanderers only notice food inside this radius
    pub food_detection_radius: f64,
    /// Salmonella step length
    pub wander_step: f64,
    /// E. coli step length
    pub chase_step: f64,
    /// Headings tried by a chaser, fanning out from the direct bearing
    pub chase_attempts: u32,
    /// Degrees between successive chaser headings
    pub chase_fan_degrees: f64,
    /// Steps committed to after picking a random heading
    pub move_plan_length: i32,
    /// Food a bacterium must eat before dividing
    pub food_to_divide: u32,
    /// Score for killing any bacterium
    pub kill_score: i64,
    /// A dying bacterium leaves food with probability 1 in this
    pub food_drop_odds: i32,
}

impl Default for BacteriaTuning {
    fn default() -> Self {
        Self {
            salmonella: SpeciesStats {
                health: 4,
                toxicity: 1,
            },
            aggressive_salmonella: SpeciesStats {
                health: 10,
                toxicity: 2,
            },
            ecoli: SpeciesStats {
                health: 5,
                toxicity: 4,
            },
            aggro_radius: 72.0,
            chase_radius: 256.0,
            food_detection_radius: 128.0,
            wander_step: 3.0,
            chase_step: 2.0,
            chase_attempts: 10,
            chase_fan_degrees: 10.0,
            move_plan_length: 10,
            food_to_divide: 3,
            kill_score: 100,
            food_drop_odds: 2,
        }
    }
}

/// Pit spawner tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitTuning {
    /// Starting quota per species: salmonella, aggressive salmonella, e. coli
    pub quotas: [u32; 3],
    /// Each tick a pit releases a bacterium with probability 1 in this
    pub emit_odds: i32,
}

impl Default for PitTuning {
    fn default() -> Self {
        Self {
            quotas: [5, 3, 2],
            emit_odds: 50,
        }
    }
}

/// Goodie effects and environmental spawn rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoodieTuning {
    /// Spawn odds start here and shrink by `odds_per_level` each level
    pub base_odds: i32,
    pub odds_per_level: i32,
    /// Floor on fungus odds
    pub fungus_min_odds: i32,
    /// Floor on beneficial goodie odds
    pub goodie_min_odds: i32,
    /// Lifetime roll is `0..=(lifetime_base - lifetime_per_level * level - 1)`
    pub lifetime_base: i32,
    pub lifetime_per_level: i32,
    pub lifetime_min: u32,
    /// Out of ten draws: extra life, then flame refill, the rest heal
    pub extra_life_weight: i32,
    pub flame_weight: i32,
    pub heal_score: i64,
    pub flame_score: i64,
    pub flame_charges: u32,
    pub extra_life_score: i64,
    pub fungus_score: i64,
    pub fungus_damage: i32,
}

impl Default for GoodieTuning {
    fn default() -> Self {
        Self {
            base_odds: 510,
            odds_per_level: 10,
            fungus_min_odds: 200,
            goodie_min_odds: 250,
            lifetime_base: 300,
            lifetime_per_level: 10,
            lifetime_min: 50,
            extra_life_weight: 1,
            flame_weight: 3,
            heal_score: 250,
            flame_score: 300,
            flame_charges: 5,
            extra_life_score: 500,
            fungus_score: -50,
            fungus_damage: 20,
        }
    }
}

/// Level layout tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    pub food_per_level: u32,
    pub max_food: u32,
    pub dirt_base: i32,
    pub dirt_per_level: i32,
    pub min_dirt: i32,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            food_per_level: 5,
            max_food: 25,
            dirt_base: 180,
            dirt_per_level: 20,
            min_dirt: 20,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub projectiles: ProjectileTuning,
    pub bacteria: BacteriaTuning,
    pub pit: PitTuning,
    pub goodies: GoodieTuning,
    pub layout: LayoutTuning,
}

impl Tuning {
    /// Parse and validate a tuning table; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with. "1 in N" odds must be
    /// at least 1 and layout counts must not go negative.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn at_least(field: &'static str, value: i64, min: i64) -> Result<(), TuningError> {
            if value < min {
                return Err(TuningError::Invalid {
                    field,
                    value,
                    reason: if min == 1 { "must be at least 1" } else { "must not be negative" },
                });
            }
            Ok(())
        }

        let g = &self.goodies;
        at_least("pit.emit_odds", self.pit.emit_odds.into(), 1)?;
        at_least("bacteria.food_drop_odds", self.bacteria.food_drop_odds.into(), 1)?;
        at_least("goodies.fungus_min_odds", g.fungus_min_odds.into(), 1)?;
        at_least("goodies.goodie_min_odds", g.goodie_min_odds.into(), 1)?;
        at_least("goodies.extra_life_weight", g.extra_life_weight.into(), 0)?;
        at_least("goodies.flame_weight", g.flame_weight.into(), 0)?;
        at_least("layout.min_dirt", self.layout.min_dirt.into(), 0)?;
        Ok(())
    }

    /// Load a tuning table from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Pretty JSON for `dump-tuning`
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Stats for a bacterium species
    pub fn species(&self, species: crate::sim::Species) -> SpeciesStats {
        use crate::sim::Species;
        match species {
            Species::Salmonella => self.bacteria.salmonella,
            Species::AggressiveSalmonella => self.bacteria.aggressive_salmonella,
            Species::Ecoli => self.bacteria.ecoli,
        }
    }

    /// Stats for a projectile kind
    pub fn projectile(&self, kind: crate::sim::ProjectileKind) -> ProjectileStats {
        use crate::sim::ProjectileKind;
        match kind {
            ProjectileKind::Spray => self.projectiles.spray,
            ProjectileKind::Flame => self.projectiles.flame,
        }
    }

    /// Fungus appears with probability 1 in this each tick
    pub fn fungus_odds(&self, level: u32) -> i32 {
        let g = &self.goodies;
        (g.base_odds - level as i32 * g.odds_per_level).max(g.fungus_min_odds)
    }

    /// A beneficial goodie appears with probability 1 in this each tick
    pub fn goodie_odds(&self, level: u32) -> i32 {
        let g = &self.goodies;
        (g.base_odds - level as i32 * g.odds_per_level).max(g.goodie_min_odds)
    }

    /// Upper bound of the goodie lifetime roll (may be negative on late levels)
    pub fn lifetime_roll_max(&self, level: u32) -> i32 {
        let g = &self.goodies;
        g.lifetime_base - g.lifetime_per_level * level as i32 - 1
    }

    pub fn pit_count(&self, level: u32) -> u32 {
        level
    }

    pub fn food_count(&self, level: u32) -> u32 {
        (self.layout.food_per_level * level).min(self.layout.max_food)
    }

    pub fn dirt_count(&self, level: u32) -> u32 {
        let l = &self.layout;
        let n = (l.dirt_base - l.dirt_per_level * level as i32).max(l.min_dirt);
        u32::try_from(n).unwrap_or(0)
    }
}
