use std::f32::consts::{PI, TAU};

use arena_input::{Control, InputCollector, KeyBindings};
use arena_kernel::FrameView;
use glam::Vec3;

/// Scripted player for headless runs: turns toward the nearest live target
/// through pointer motion, fires on a fixed cadence and reloads when empty.
///
/// Everything goes through [`InputCollector`], the same path a windowed host
/// would feed with real device events.
#[derive(Debug)]
pub struct Autopilot {
    pub fire_every: u64,
    pub walk: bool,
    forward_key: Option<String>,
    reload_key: Option<String>,
    frames: u64,
}

impl Autopilot {
    pub fn new(bindings: &KeyBindings, fire_every: u64, walk: bool) -> Self {
        let first = |control| bindings.keys_for(control).first().map(|k| k.to_string());
        Self {
            fire_every: fire_every.max(1),
            walk,
            forward_key: first(Control::Forward),
            reload_key: first(Control::Reload),
            frames: 0,
        }
    }

    /// Queue this frame's device events.
    pub fn drive(&mut self, collector: &mut InputCollector, frame: &FrameView) {
        self.frames += 1;

        if let Some(key) = &self.reload_key {
            collector.key_up(key);
            if frame.hud.ammo == 0 {
                collector.key_down(key);
            }
        }
        if let Some(key) = &self.forward_key {
            if self.walk {
                collector.key_down(key);
            } else {
                collector.key_up(key);
            }
        }

        let eye = frame.player.position;
        let nearest = frame
            .targets
            .iter()
            .min_by(|a, b| {
                eye.distance_squared(a.position)
                    .total_cmp(&eye.distance_squared(b.position))
            })
            .map(|t| t.position);
        let Some(aim) = nearest else {
            return;
        };

        let (dx, dy) = pointer_delta(collector, aim - eye);
        collector.pointer_motion(dx, dy);
        if self.frames % self.fire_every == 0 {
            collector.primary_down();
        }
    }
}

/// Pointer motion that turns the current look onto `direction`.
fn pointer_delta(collector: &InputCollector, direction: Vec3) -> (f32, f32) {
    let sensitivity = collector.config().sensitivity;
    let look = collector.look();
    let yaw = direction.z.atan2(direction.x);
    let flat = Vec3::new(direction.x, 0.0, direction.z).length();
    let pitch = direction.y.atan2(flat);
    let dyaw = wrap_angle(yaw - look.yaw);
    (dyaw / sensitivity, (look.pitch - pitch) / sensitivity)
}

/// Wrap to `[-π, π)`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
