//! Movement and camera controller: turns held controls and look angles into
//! player velocity, integrates it, and resolves floor, bounds and obstacles.

use arena_common::{flat_forward, right};
use arena_input::InputSnapshot;
use glam::Vec3;

use crate::config::GameConfig;
use crate::entity::Player;

/// Point sampled against obstacles: the player's body centre, half the
/// standing height below the eye.
pub fn collision_probe(config: &GameConfig, eye: Vec3) -> Vec3 {
    eye - Vec3::Y * (config.player.standing_height * 0.5)
}

/// Whether an eye position would put the body inside any obstacle.
pub fn blocked(config: &GameConfig, eye: Vec3) -> bool {
    let probe = collision_probe(config, eye);
    config.world.obstacles.iter().any(|o| o.contains(probe))
}

/// Horizontal unit direction the held controls ask for, in world space.
/// Zero when nothing (or only opposing keys) is held.
pub fn wish_direction(input: &InputSnapshot, yaw: f32) -> Vec3 {
    let local = input.held.local_direction();
    let raw = flat_forward(yaw) * local.z + right(yaw) * local.x;
    raw.normalize_or_zero()
}

/// Advance the player by `dt` seconds.
///
/// Look angles are copied from the snapshot (pitch clamped). Jump is only
/// honoured while grounded. Gravity applies every tick.
///
/// The vertical move is resolved first, then the horizontal one. A move
/// that would put the body inside an obstacle is rejected and that part of
/// the position reverts to its pre-update value, so the player never ends a
/// tick inside an obstacle. Coming down onto an obstacle top lands on it
/// like the floor; walking into a side stops without sliding.
pub fn update_player(player: &mut Player, input: &InputSnapshot, config: &GameConfig, dt: f32) {
    player.look = input.look.clamped(config.input.pitch_limit);

    let wish = wish_direction(input, player.look.yaw);
    player.velocity.x = wish.x * config.player.move_speed;
    player.velocity.z = wish.z * config.player.move_speed;

    if input.held.jump && player.grounded {
        player.velocity.y = config.player.jump_speed;
        player.grounded = false;
    }

    player.velocity.y -= config.world.gravity * dt;

    let before = player.position;
    let mut supported = false;

    let standing = config.world.floor_y + config.player.standing_height;
    let mut y = before.y + player.velocity.y * dt;
    if y <= standing {
        y = standing;
        player.velocity.y = 0.0;
        supported = true;
    }
    if blocked(config, Vec3::new(before.x, y, before.z)) {
        y = before.y;
        if player.velocity.y < 0.0 {
            supported = true;
        }
        player.velocity.y = 0.0;
        tracing::trace!(?before, "vertical move blocked by obstacle");
    }
    player.position.y = y;

    let bounds = config.world.bounds;
    let x = (before.x + player.velocity.x * dt).clamp(-bounds, bounds);
    let z = (before.z + player.velocity.z * dt).clamp(-bounds, bounds);
    if blocked(config, Vec3::new(x, y, z)) {
        player.velocity.x = 0.0;
        player.velocity.z = 0.0;
        tracing::trace!(?before, "horizontal move blocked by obstacle");
    } else {
        player.position.x = x;
        player.position.z = z;
    }

    // a zero step moves nothing, so contact carries over
    player.grounded = supported || (player.grounded && dt == 0.0);
}
