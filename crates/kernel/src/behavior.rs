//! Per-tick target behavior. Static targets just stand there; hostiles chase
//! the player on the ground plane, face it, and shoot on a cooldown.

use arena_common::{EntityId, horizontal};
use glam::Vec3;

use crate::config::GameConfig;
use crate::entity::{Projectile, Target, TargetKind};
use crate::projectile::enemy_shot;
use crate::rng::SessionRng;

/// Advance every live hostile by `dt` and return the shots they fired.
///
/// Dead targets are skipped, so an enemy killed earlier in the tick neither
/// moves nor fires.
pub fn update_hostiles(
    targets: &mut [Target],
    player_eye: Vec3,
    config: &GameConfig,
    dt: f32,
) -> Vec<Projectile> {
    let mut shots = Vec::new();
    for target in targets.iter_mut() {
        if !target.is_alive() {
            continue;
        }
        let TargetKind::Hostile(hostile) = &mut target.kind else {
            continue;
        };

        let to_player = horizontal(player_eye - target.position);
        let flat_distance = to_player.length();
        if flat_distance > 0.0 {
            hostile.facing = to_player.z.atan2(to_player.x);
        }
        if flat_distance > config.enemies.standoff {
            let step = (hostile.speed * dt).min(flat_distance - config.enemies.standoff);
            target.position += to_player / flat_distance * step;
        }

        hostile.cooldown -= dt;
        let distance = target.position.distance(player_eye);
        if hostile.cooldown <= 0.0 && distance < config.enemies.engagement_range {
            if let Some(shot) = enemy_shot(target.position, target.id, player_eye, config) {
                tracing::trace!(enemy = %target.id.short(), "enemy fired");
                shots.push(shot);
            }
            hostile.cooldown = config.enemies.fire_interval;
        }
    }
    shots
}

/// Remove dead targets. Returns the ids removed, in collection order.
pub fn compact(targets: &mut Vec<Target>) -> Vec<EntityId> {
    let removed = targets
        .iter()
        .filter(|t| !t.is_alive())
        .map(|t| t.id)
        .collect();
    targets.retain(Target::is_alive);
    removed
}

pub fn live_hostiles(targets: &[Target]) -> usize {
    targets.iter().filter(|t| t.is_hostile() && t.is_alive()).count()
}

/// Trickle-spawn: while no hostile is alive, roll `respawn_chance` once per
/// call and on success place one enemy at a random spot inside the bounds.
pub fn trickle_spawn(
    targets: &mut Vec<Target>,
    rng: &mut SessionRng,
    config: &GameConfig,
) -> Option<EntityId> {
    let chance = config.enemies.respawn_chance;
    if chance <= 0.0 || live_hostiles(targets) > 0 || !rng.chance(chance) {
        return None;
    }
    let bounds = config.world.bounds;
    let position = Vec3::new(
        rng.range(-bounds, bounds),
        config.enemies.respawn_height,
        rng.range(-bounds, bounds),
    );
    let enemy = Target::new_hostile(position, config);
    let id = enemy.id;
    targets.push(enemy);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn config() -> GameConfig {
        GameConfig::empty_arena()
    }

    #[test]
    fn hostile_closes_in_horizontally() {
        let config = config();
        let mut targets = vec![Target::new_hostile(Vec3::new(20.0, 1.5, 0.0), &config)];
        let eye = Vec3::new(0.0, 1.7, 0.0);
        update_hostiles(&mut targets, eye, &config, DT);
        let p = targets[0].position;
        assert!(p.x < 20.0);
        assert_eq!(p.y, 1.5);
        assert!((20.0 - p.x - config.enemies.speed * DT).abs() < 1e-4);
    }

    #[test]
    fn hostile_holds_standoff_but_keeps_facing() {
        let config = config();
        let start = Vec3::new(0.0, 1.5, 2.0);
        let mut targets = vec![Target::new_hostile(start, &config)];
        update_hostiles(&mut targets, Vec3::new(0.0, 1.7, 0.0), &config, DT);
        assert_eq!(targets[0].position, start);
        let TargetKind::Hostile(h) = &targets[0].kind else {
            panic!("expected hostile");
        };
        // player lies toward -z
        assert!((h.facing + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn hostile_never_overshoots_standoff() {
        let config = config();
        let mut targets = vec![Target::new_hostile(Vec3::new(4.01, 1.5, 0.0), &config)];
        update_hostiles(&mut targets, Vec3::new(0.0, 1.7, 0.0), &config, 1.0);
        assert!((targets[0].position.x - config.enemies.standoff).abs() < 1e-4);
    }

    #[test]
    fn hostile_fires_on_cooldown_in_range() {
        let config = config();
        let mut targets = vec![Target::new_hostile(Vec3::new(10.0, 1.5, 0.0), &config)];
        let eye = Vec3::new(0.0, 1.7, 0.0);
        let mut fired = 0;
        let ticks = (config.enemies.fire_interval / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            fired += update_hostiles(&mut targets, eye, &config, DT).len();
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn hostile_out_of_range_holds_fire() {
        let mut config = config();
        config.enemies.speed = 0.0;
        let mut targets = vec![Target::new_hostile(Vec3::new(50.0, 1.5, 0.0), &config)];
        for _ in 0..300 {
            assert!(update_hostiles(&mut targets, Vec3::new(0.0, 1.7, 0.0), &config, DT).is_empty());
        }
    }

    #[test]
    fn dead_hostile_neither_moves_nor_fires() {
        let config = config();
        let start = Vec3::new(10.0, 1.5, 0.0);
        let mut targets = vec![Target::new_hostile(start, &config)];
        if let TargetKind::Hostile(h) = &mut targets[0].kind {
            h.health = 0;
            h.cooldown = 0.0;
        }
        assert!(update_hostiles(&mut targets, Vec3::ZERO, &config, DT).is_empty());
        assert_eq!(targets[0].position, start);
    }

    #[test]
    fn static_targets_do_nothing() {
        let config = config();
        let mut targets = vec![Target::new_static(Vec3::new(3.0, 1.0, 0.0), 1.0)];
        let before = targets.clone();
        assert!(update_hostiles(&mut targets, Vec3::ZERO, &config, DT).is_empty());
        assert_eq!(targets, before);
    }

    #[test]
    fn compact_removes_only_dead() {
        let config = config();
        let mut targets = vec![
            Target::new_static(Vec3::ZERO, 1.0),
            Target::new_hostile(Vec3::ONE, &config),
            Target::new_static(Vec3::X, 1.0),
        ];
        targets[0].apply_hit(1);
        targets[2].apply_hit(1);
        let dead = vec![targets[0].id, targets[2].id];
        assert_eq!(compact(&mut targets), dead);
        assert_eq!(targets.len(), 1);
        assert!(targets[0].is_hostile());
    }

    #[test]
    fn trickle_spawn_only_when_pool_empty() {
        let mut config = config();
        config.enemies.respawn_chance = 1.0;
        let mut rng = SessionRng::new(1);
        let mut targets = Vec::new();

        let id = trickle_spawn(&mut targets, &mut rng, &config).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].id, id);
        let p = targets[0].position;
        assert!(p.x.abs() <= config.world.bounds && p.z.abs() <= config.world.bounds);

        assert!(trickle_spawn(&mut targets, &mut rng, &config).is_none());
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn trickle_spawn_eventually_refills() {
        let mut config = config();
        config.enemies.respawn_chance = 0.05;
        let mut rng = SessionRng::new(5);
        let mut targets = vec![Target::new_static(Vec3::ZERO, 1.0)];
        let spawned = (0..10_000).any(|_| trickle_spawn(&mut targets, &mut rng, &config).is_some());
        assert!(spawned);
        assert_eq!(live_hostiles(&targets), 1);
    }

    #[test]
    fn zero_chance_never_spawns() {
        let config = config();
        let mut rng = SessionRng::new(5);
        let mut targets = Vec::new();
        for _ in 0..1000 {
            assert!(trickle_spawn(&mut targets, &mut rng, &config).is_none());
        }
    }
}
