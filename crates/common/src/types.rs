use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a target or enemy in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal (yaw) and vertical (pitch) look angles in radians.
///
/// Yaw 0 looks down +X, increasing yaw turns toward +Z. Pitch is positive
/// when looking up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Default pitch limit: a hair short of straight up or down.
    pub const DEFAULT_PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { yaw, pitch }
    }

    /// Apply a pointer-motion delta. Moving the pointer right turns right,
    /// moving it down looks down.
    pub fn rotate(&mut self, dx: f32, dy: f32, sensitivity: f32, pitch_limit: f32) {
        self.yaw += dx * sensitivity;
        self.pitch -= dy * sensitivity;
        *self = self.clamped(pitch_limit);
    }

    /// Copy with pitch clamped to `[-limit, limit]`. The limit itself is
    /// capped below π/2 so the forward vector never degenerates.
    pub fn clamped(self, pitch_limit: f32) -> Self {
        let limit = pitch_limit.clamp(0.0, FRAC_PI_2 - 1e-3);
        let pitch = if self.pitch.is_finite() {
            self.pitch.clamp(-limit, limit)
        } else {
            0.0
        };
        let yaw = if self.yaw.is_finite() { self.yaw } else { 0.0 };
        Self { yaw, pitch }
    }

    /// Camera forward (unit length), pitch included.
    pub fn forward(&self) -> Vec3 {
        crate::math::forward(self.yaw, self.pitch)
    }

    /// Horizontal right vector.
    pub fn right(&self) -> Vec3 {
        crate::math::right(self.yaw)
    }
}
