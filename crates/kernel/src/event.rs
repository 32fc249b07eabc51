use arena_common::EntityId;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A record of every observable state transition in a session.
///
/// The simulation appends; hosts drain them for HUD messages, logging or
/// replay checks. Each event carries the tick it happened on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player fired; ammo left after the shot.
    Fired { tick: u64, origin: Vec3, ammo: u32 },
    Reloaded { tick: u64, ammo: u32 },
    EnemyFired { tick: u64, enemy: EntityId },
    /// A hostile took damage and survived.
    TargetHit {
        tick: u64,
        target: EntityId,
        remaining: u32,
    },
    /// The alive to dead transition, with the score it awarded.
    TargetDestroyed {
        tick: u64,
        target: EntityId,
        hostile: bool,
        score: u32,
    },
    /// The last static target went down.
    TargetsCleared { tick: u64 },
    PlayerDamaged {
        tick: u64,
        damage: u32,
        remaining: u32,
    },
    /// Player health reached zero; the session is over until restart.
    PlayerDefeated { tick: u64 },
    EnemySpawned {
        tick: u64,
        enemy: EntityId,
        position: Vec3,
    },
    /// Session reset to its initial configuration.
    Restarted,
}

impl SimEvent {
    /// Tick the event happened on. `Restarted` starts a fresh count at 0.
    pub fn tick(&self) -> u64 {
        match self {
            SimEvent::Fired { tick, .. }
            | SimEvent::Reloaded { tick, .. }
            | SimEvent::EnemyFired { tick, .. }
            | SimEvent::TargetHit { tick, .. }
            | SimEvent::TargetDestroyed { tick, .. }
            | SimEvent::TargetsCleared { tick }
            | SimEvent::PlayerDamaged { tick, .. }
            | SimEvent::PlayerDefeated { tick }
            | SimEvent::EnemySpawned { tick, .. } => *tick,
            SimEvent::Restarted => 0,
        }
    }
}
