//! Projectile subsystem: spawning, integration, hit testing and culling.

use arena_common::{EntityId, within_radius};
use glam::Vec3;

use crate::config::GameConfig;
use crate::entity::{DamageOutcome, Owner, Player, Projectile, Target};

/// A projectile struck something this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Target {
        target: EntityId,
        hostile: bool,
        outcome: DamageOutcome,
    },
    Player {
        damage: u32,
        remaining: u32,
    },
}

/// Fire the player's weapon if ammo and cooldown allow. An empty magazine
/// or a pending cooldown is a silent no-op.
pub fn try_fire_player(player: &mut Player, config: &GameConfig) -> Option<Projectile> {
    if player.ammo == 0 || player.fire_cooldown > 0.0 {
        return None;
    }
    player.ammo -= 1;
    player.fire_cooldown = config.weapon.fire_interval;
    Some(Projectile::new(
        player.position,
        player.look.forward(),
        config.weapon.bullet_speed,
        config.weapon.bullet_lifetime,
        Owner::Player,
        config.weapon.damage,
    ))
}

pub fn cool_down(player: &mut Player, dt: f32) {
    player.fire_cooldown = (player.fire_cooldown - dt).max(0.0);
}

/// Projectile from an enemy aimed straight at `aim`. `None` when the enemy
/// sits exactly on the aim point.
pub fn enemy_shot(
    origin: Vec3,
    shooter: EntityId,
    aim: Vec3,
    config: &GameConfig,
) -> Option<Projectile> {
    let direction = (aim - origin).normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }
    Some(Projectile::new(
        origin,
        direction,
        config.enemies.bullet_speed,
        config.enemies.bullet_lifetime,
        Owner::Enemy(shooter),
        config.enemies.bullet_damage,
    ))
}

/// Move every live projectile and age it by `dt`.
pub fn integrate(projectiles: &mut [Projectile], dt: f32) {
    for p in projectiles.iter_mut().filter(|p| p.is_live()) {
        p.position += p.velocity * dt;
        p.lifetime -= dt;
    }
}

/// Hit-test live projectiles. Player projectiles test live targets in
/// collection order and stop at the first match; enemy projectiles test the
/// player. A projectile that hits is consumed and never tested again.
pub fn resolve_hits(
    projectiles: &mut [Projectile],
    player: &mut Player,
    targets: &mut [Target],
    config: &GameConfig,
) -> Vec<Hit> {
    let shrink = config.weapon.hit_shrink;
    let player_radius = config.player.hit_size * shrink;
    let mut hits = Vec::new();

    for p in projectiles.iter_mut().filter(|p| p.is_live()) {
        match p.owner {
            Owner::Player => {
                let struck = targets.iter_mut().find(|t| {
                    t.is_alive() && within_radius(p.position, t.position, t.hit_radius(shrink))
                });
                if let Some(target) = struck {
                    p.consume();
                    let outcome = target.apply_hit(p.damage);
                    hits.push(Hit::Target {
                        target: target.id,
                        hostile: target.is_hostile(),
                        outcome,
                    });
                }
            }
            Owner::Enemy(_) => {
                if player.is_alive() && within_radius(p.position, player.position, player_radius) {
                    p.consume();
                    let remaining = player.take_damage(p.damage);
                    hits.push(Hit::Player {
                        damage: p.damage,
                        remaining,
                    });
                }
            }
        }
    }
    hits
}

/// Drop expired and consumed projectiles. Returns how many were removed.
pub fn compact(projectiles: &mut Vec<Projectile>) -> usize {
    let before = projectiles.len();
    projectiles.retain(Projectile::is_live);
    before - projectiles.len()
}
