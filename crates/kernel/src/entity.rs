//! Entity model: the player, projectiles in flight, and targets (static or
//! hostile).

use arena_common::{EntityId, LookAngles};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// The player avatar. Created once per session and never removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Eye position.
    pub position: Vec3,
    pub velocity: Vec3,
    pub look: LookAngles,
    pub health: u32,
    pub ammo: u32,
    pub grounded: bool,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
}

impl Player {
    /// Fresh player at the configured spawn, standing on the floor.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            position: config.player_spawn(),
            velocity: Vec3::ZERO,
            look: LookAngles::new(config.player.spawn_yaw, 0.0),
            health: config.player.max_health,
            ammo: config.player.max_ammo,
            grounded: true,
            fire_cooldown: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Subtract damage, saturating at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy(EntityId),
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds left before the projectile is culled. Zero or less means
    /// consumed or expired.
    pub lifetime: f32,
    pub owner: Owner,
    /// Speed at spawn.
    pub speed: f32,
    pub damage: u32,
}

impl Projectile {
    /// Spawn at `origin` travelling along `direction`. The direction is
    /// normalized here; a zero direction yields a motionless projectile.
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        speed: f32,
        lifetime: f32,
        owner: Owner,
        damage: u32,
    ) -> Self {
        Self {
            position: origin,
            velocity: direction.normalize_or_zero() * speed,
            lifetime,
            owner,
            speed,
            damage,
        }
    }

    pub fn is_live(&self) -> bool {
        self.lifetime > 0.0
    }

    /// Mark consumed; it is compacted away at the end of the tick.
    pub fn consume(&mut self) {
        self.lifetime = 0.0;
    }
}

/// Behavior-specific state of an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    pub health: u32,
    /// Seconds until the next shot.
    pub cooldown: f32,
    pub speed: f32,
    /// Yaw toward the player, updated every tick.
    pub facing: f32,
}

/// Static targets die on the first hit; hostiles carry health and fight back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetKind {
    Static { alive: bool },
    Hostile(Hostile),
}

/// A shootable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    pub position: Vec3,
    pub size: f32,
    pub kind: TargetKind,
}

/// What a hit did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead; nothing changed.
    Ignored,
    Wounded { remaining: u32 },
    /// This hit performed the alive to dead transition.
    Destroyed,
}

impl Target {
    pub fn new_static(position: Vec3, size: f32) -> Self {
        Self {
            id: EntityId::new(),
            position,
            size,
            kind: TargetKind::Static { alive: true },
        }
    }

    pub fn new_hostile(position: Vec3, config: &GameConfig) -> Self {
        Self {
            id: EntityId::new(),
            position,
            size: config.enemies.size,
            kind: TargetKind::Hostile(Hostile {
                health: config.enemies.health,
                cooldown: config.enemies.fire_interval,
                speed: config.enemies.speed,
                facing: 0.0,
            }),
        }
    }

    pub fn is_alive(&self) -> bool {
        match &self.kind {
            TargetKind::Static { alive } => *alive,
            TargetKind::Hostile(h) => h.health > 0,
        }
    }

    pub fn is_hostile(&self) -> bool {
        matches!(self.kind, TargetKind::Hostile(_))
    }

    pub fn health(&self) -> Option<u32> {
        match &self.kind {
            TargetKind::Static { .. } => None,
            TargetKind::Hostile(h) => Some(h.health),
        }
    }

    /// Effective radius for hit tests.
    pub fn hit_radius(&self, shrink: f32) -> f32 {
        self.size * shrink
    }

    /// Apply one hit. Dead targets are never damaged again, so the
    /// alive to dead transition is reported exactly once.
    pub fn apply_hit(&mut self, damage: u32) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }
        match &mut self.kind {
            TargetKind::Static { alive } => {
                *alive = false;
                DamageOutcome::Destroyed
            }
            TargetKind::Hostile(h) => {
                h.health = h.health.saturating_sub(damage);
                if h.health == 0 {
                    DamageOutcome::Destroyed
                } else {
                    DamageOutcome::Wounded {
                        remaining: h.health,
                    }
                }
            }
        }
    }
}
