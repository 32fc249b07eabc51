use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::GameConfig;
use crate::entity::Target;
use crate::rng::SessionRng;

/// Build the initial target set: hand-placed targets first, then the ring
/// of random static targets, then one hostile per spawn point.
///
/// Draws from `rng` in a fixed order, so the same seed gives the same layout.
pub fn initial_targets(config: &GameConfig, rng: &mut SessionRng) -> Vec<Target> {
    let t = &config.targets;
    let mut targets = Vec::with_capacity(t.fixed.len() + t.count + config.enemies.spawn_points.len());

    for spec in &t.fixed {
        targets.push(Target::new_static(spec.position, spec.size));
    }

    for _ in 0..t.count {
        let distance = t.min_distance + rng.next_f32() * t.distance_spread;
        let angle = rng.next_f32() * TAU;
        let y = t.min_height + rng.next_f32() * t.height_spread;
        let size = t.min_size + rng.next_f32() * t.size_spread;
        let position = Vec3::new(angle.cos() * distance, y, angle.sin() * distance);
        targets.push(Target::new_static(position, size));
    }

    for point in &config.enemies.spawn_points {
        targets.push(Target::new_hostile(*point, config));
    }

    tracing::debug!(count = targets.len(), "initial targets placed");
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetSpec;

    #[test]
    fn default_layout_counts() {
        let config = GameConfig::default();
        let targets = initial_targets(&config, &mut SessionRng::new(0));
        let hostiles = targets.iter().filter(|t| t.is_hostile()).count();
        assert_eq!(targets.len(), 12 + 2);
        assert_eq!(hostiles, 2);
        assert!(targets.iter().all(|t| t.is_alive()));
    }

    #[test]
    fn ring_targets_respect_ranges() {
        let config = GameConfig::default();
        let t = &config.targets;
        for target in initial_targets(&config, &mut SessionRng::new(11))
            .iter()
            .filter(|t| !t.is_hostile())
        {
            let flat = Vec3::new(target.position.x, 0.0, target.position.z).length();
            assert!(flat >= t.min_distance - 1e-3 && flat <= t.min_distance + t.distance_spread + 1e-3);
            assert!(target.position.y >= t.min_height && target.position.y <= t.min_height + t.height_spread);
            assert!(target.size >= t.min_size && target.size <= t.min_size + t.size_spread);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::default();
        let a = initial_targets(&config, &mut SessionRng::new(3));
        let b = initial_targets(&config, &mut SessionRng::new(3));
        let positions = |v: &[Target]| v.iter().map(|t| (t.position, t.size)).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn fixed_targets_come_first() {
        let mut config = GameConfig::empty_arena();
        config.targets.fixed.push(TargetSpec {
            position: Vec3::new(20.0, 1.5, 0.0),
            size: 1.0,
        });
        let targets = initial_targets(&config, &mut SessionRng::new(0));
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].position, Vec3::new(20.0, 1.5, 0.0));
    }
}
