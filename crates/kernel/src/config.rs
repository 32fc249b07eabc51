//! Session configuration: every tunable constant of the arena in one
//! serde-loadable tree.

use std::path::Path;

use arena_common::Aabb;
use arena_input::InputConfig;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be >= 0 and finite, got {value}")))
    }
}

/// Loop timing and determinism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Upper bound on the integration step, seconds.
    pub max_dt: f32,
    /// Seed for layout generation and respawn rolls.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_dt: 0.05,
            seed: 0,
        }
    }
}

/// Static arena geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub gravity: f32,
    pub floor_y: f32,
    /// Player x and z are clamped to `[-bounds, bounds]`.
    pub bounds: f32,
    pub obstacles: Vec<Aabb>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 20.0,
            floor_y: 0.0,
            bounds: 60.0,
            obstacles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal spawn position; y is always placed at standing height.
    pub spawn: Vec3,
    pub spawn_yaw: f32,
    /// Eye height above the floor.
    pub standing_height: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    pub max_health: u32,
    pub max_ammo: u32,
    /// Size used when enemy projectiles test against the player.
    pub hit_size: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, 0.0, 5.0),
            spawn_yaw: 0.0,
            standing_height: 1.7,
            move_speed: 10.0,
            jump_speed: 8.0,
            max_health: 100,
            max_ammo: 30,
            hit_size: 1.0,
        }
    }
}

/// The player's weapon and the hit-test shrink shared by every projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    /// Minimum seconds between two player shots.
    pub fire_interval: f32,
    /// Damage dealt to enemies per hit.
    pub damage: u32,
    /// Effective hit radius is `size * hit_shrink`.
    pub hit_shrink: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            bullet_speed: 60.0,
            bullet_lifetime: 1.2,
            fire_interval: 0.0,
            damage: 25,
            hit_shrink: 0.6,
        }
    }
}

/// A hand-placed static target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub position: Vec3,
    pub size: f32,
}

/// Static targets: a hand-placed list plus `count` scattered on a ring
/// around the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub count: usize,
    pub min_distance: f32,
    pub distance_spread: f32,
    pub min_height: f32,
    pub height_spread: f32,
    pub min_size: f32,
    pub size_spread: f32,
    pub fixed: Vec<TargetSpec>,
    pub kill_score: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            count: 12,
            min_distance: 12.0,
            distance_spread: 30.0,
            min_height: 1.0,
            height_spread: 2.0,
            min_size: 0.8,
            size_spread: 0.6,
            fixed: Vec::new(),
            kill_score: 10,
        }
    }
}

/// Hostile enemies that chase and shoot back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawn_points: Vec<Vec3>,
    pub health: u32,
    pub size: f32,
    pub speed: f32,
    /// Enemies stop closing in once this near (horizontal distance).
    pub standoff: f32,
    pub engagement_range: f32,
    pub fire_interval: f32,
    pub bullet_speed: f32,
    pub bullet_lifetime: f32,
    pub bullet_damage: u32,
    pub kill_score: u32,
    /// Per-tick probability of spawning one enemy while none are alive.
    pub respawn_chance: f32,
    /// Height of randomly respawned enemies.
    pub respawn_height: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_points: vec![Vec3::new(30.0, 1.5, 30.0), Vec3::new(-30.0, 1.5, -30.0)],
            health: 50,
            size: 1.2,
            speed: 3.0,
            standoff: 4.0,
            engagement_range: 25.0,
            fire_interval: 1.5,
            bullet_speed: 30.0,
            bullet_lifetime: 2.0,
            bullet_damage: 10,
            kill_score: 25,
            respawn_chance: 0.01,
            respawn_height: 1.5,
        }
    }
}

/// Root configuration of a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub targets: TargetConfig,
    pub enemies: EnemyConfig,
    pub input: InputConfig,
}

impl GameConfig {
    /// Parse and validate a YAML document. Missing fields take defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// An arena with no targets, no enemies and no respawning, for tests
    /// and scripted scenarios that place entities themselves.
    pub fn empty_arena() -> Self {
        let mut config = Self::default();
        config.targets.count = 0;
        config.enemies.spawn_points.clear();
        config.enemies.respawn_chance = 0.0;
        config
    }

    /// Player spawn with y placed at standing height.
    pub fn player_spawn(&self) -> Vec3 {
        Vec3::new(
            self.player.spawn.x,
            self.world.floor_y + self.player.standing_height,
            self.player.spawn.z,
        )
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("sim.max_dt", self.sim.max_dt)?;

        non_negative("world.gravity", self.world.gravity)?;
        if !self.world.floor_y.is_finite() {
            return Err(invalid("world.floor_y", "must be finite"));
        }
        positive("world.bounds", self.world.bounds)?;
        for (i, obstacle) in self.world.obstacles.iter().enumerate() {
            if !obstacle.is_well_formed() {
                return Err(invalid(
                    "world.obstacles",
                    format!("obstacle {i} has min > max or non-finite corners"),
                ));
            }
        }

        positive("player.standing_height", self.player.standing_height)?;
        non_negative("player.move_speed", self.player.move_speed)?;
        non_negative("player.jump_speed", self.player.jump_speed)?;
        positive("player.hit_size", self.player.hit_size)?;
        if self.player.max_health == 0 {
            return Err(invalid("player.max_health", "must be at least 1"));
        }
        let spawn = self.player_spawn();
        if !spawn.is_finite()
            || spawn.x.abs() > self.world.bounds
            || spawn.z.abs() > self.world.bounds
        {
            return Err(invalid("player.spawn", "must lie inside the arena bounds"));
        }
        if crate::movement::blocked(self, spawn) {
            return Err(invalid("player.spawn", "must not start inside an obstacle"));
        }
        if !self.player.spawn_yaw.is_finite() {
            return Err(invalid("player.spawn_yaw", "must be finite"));
        }

        positive("weapon.bullet_speed", self.weapon.bullet_speed)?;
        positive("weapon.bullet_lifetime", self.weapon.bullet_lifetime)?;
        non_negative("weapon.fire_interval", self.weapon.fire_interval)?;
        if !(self.weapon.hit_shrink > 0.0 && self.weapon.hit_shrink <= 1.0) {
            return Err(invalid("weapon.hit_shrink", "must be in (0, 1]"));
        }

        non_negative("targets.min_distance", self.targets.min_distance)?;
        non_negative("targets.distance_spread", self.targets.distance_spread)?;
        non_negative("targets.height_spread", self.targets.height_spread)?;
        positive("targets.min_size", self.targets.min_size)?;
        non_negative("targets.size_spread", self.targets.size_spread)?;
        if !self.targets.min_height.is_finite() {
            return Err(invalid("targets.min_height", "must be finite"));
        }
        for spec in &self.targets.fixed {
            positive("targets.fixed.size", spec.size)?;
            if !spec.position.is_finite() {
                return Err(invalid("targets.fixed.position", "must be finite"));
            }
        }

        if self.enemies.health == 0 {
            return Err(invalid("enemies.health", "must be at least 1"));
        }
        positive("enemies.size", self.enemies.size)?;
        non_negative("enemies.speed", self.enemies.speed)?;
        non_negative("enemies.standoff", self.enemies.standoff)?;
        non_negative("enemies.engagement_range", self.enemies.engagement_range)?;
        positive("enemies.fire_interval", self.enemies.fire_interval)?;
        positive("enemies.bullet_speed", self.enemies.bullet_speed)?;
        positive("enemies.bullet_lifetime", self.enemies.bullet_lifetime)?;
        if !(0.0..=1.0).contains(&self.enemies.respawn_chance) {
            return Err(invalid("enemies.respawn_chance", "must be in [0, 1]"));
        }
        if !self.enemies.respawn_height.is_finite() {
            return Err(invalid("enemies.respawn_height", "must be finite"));
        }
        if self.enemies.spawn_points.iter().any(|p| !p.is_finite()) {
            return Err(invalid("enemies.spawn_points", "must be finite"));
        }

        positive("input.sensitivity", self.input.sensitivity)?;
        if !(self.input.pitch_limit > 0.0 && self.input.pitch_limit < std::f32::consts::FRAC_PI_2) {
            return Err(invalid("input.pitch_limit", "must be in (0, pi/2)"));
        }
        Ok(())
    }
}
