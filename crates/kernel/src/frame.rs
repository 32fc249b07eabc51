use arena_common::{EntityId, LookAngles};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::{Owner, TargetKind};
use crate::simulation::{SessionStatus, SimulationState};

/// Read-only picture of one tick, handed to renderers.
///
/// Owns its data, so a renderer holding a frame cannot reach back into the
/// simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub tick: u64,
    /// Simulated seconds since the session (re)started.
    pub time: f32,
    pub player: PlayerView,
    pub targets: Vec<TargetView>,
    pub projectiles: Vec<ProjectileView>,
    pub hud: Hud,
    pub status: SessionStatus,
    pub targets_cleared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    pub look: LookAngles,
    pub forward: Vec3,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: EntityId,
    pub position: Vec3,
    pub size: f32,
    pub alive: bool,
    pub hostile: bool,
    pub health: Option<u32>,
    pub facing: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec3,
    pub owner: Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub health: u32,
    pub ammo: u32,
}

impl FrameView {
    /// Capture live entities and HUD values from the current state.
    pub fn capture(state: &SimulationState) -> Self {
        let player = &state.player;
        Self {
            tick: state.tick,
            time: state.time,
            player: PlayerView {
                position: player.position,
                look: player.look,
                forward: player.look.forward(),
                grounded: player.grounded,
            },
            targets: state
                .targets
                .iter()
                .filter(|t| t.is_alive())
                .map(|t| TargetView {
                    id: t.id,
                    position: t.position,
                    size: t.size,
                    alive: true,
                    hostile: t.is_hostile(),
                    health: t.health(),
                    facing: match &t.kind {
                        TargetKind::Hostile(h) => Some(h.facing),
                        TargetKind::Static { .. } => None,
                    },
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .filter(|p| p.is_live())
                .map(|p| ProjectileView {
                    position: p.position,
                    owner: p.owner,
                })
                .collect(),
            hud: Hud {
                score: state.score,
                health: player.health,
                ammo: player.ammo,
            },
            status: state.status,
            targets_cleared: state.targets_cleared(),
        }
    }

    pub fn hostile_count(&self) -> usize {
        self.targets.iter().filter(|t| t.hostile).count()
    }
}
