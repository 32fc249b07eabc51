use arena_kernel::{FrameView, Hud, Owner, SessionStatus};
use glam::Vec3;

/// Camera configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 10.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
        }
    }
}

impl RenderView {
    pub const FIRST_PERSON_FOV: f32 = 90.0;

    /// Camera at the player's eye, looking along the player's forward vector.
    pub fn first_person(frame: &FrameView) -> Self {
        let eye = frame.player.position;
        Self {
            eye,
            target: eye + frame.player.forward,
            fov_degrees: Self::FIRST_PERSON_FOV,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a frame and a view configuration, then produces
/// output. It never sees the simulation itself.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame with the given view.
    fn render(&self, frame: &FrameView, view: &RenderView) -> Self::Output;
}

/// The HUD overlay text.
pub fn hud_line(hud: &Hud) -> String {
    format!(
        "Score: {} | Health: {} | Ammo: {}",
        hud.score, hud.health, hud.ammo
    )
}

/// Human-readable dump of a frame, one line per entity.
#[derive(Debug)]
pub struct DebugTextRenderer {
    /// Also list projectiles, which are numerous mid-fight.
    pub show_projectiles: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self {
            show_projectiles: true,
        }
    }

    pub fn compact() -> Self {
        Self {
            show_projectiles: false,
        }
    }
}

impl Default for DebugTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameView, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Arena (tick={}, t={:.2}s) ===\n",
            frame.tick, frame.time
        ));
        out.push_str(&hud_line(&frame.hud));
        out.push('\n');
        match frame.status {
            SessionStatus::Defeated => out.push_str("GAME OVER - press restart\n"),
            SessionStatus::Running if frame.targets_cleared => {
                out.push_str("All targets cleared!\n");
            }
            SessionStatus::Running => {}
        }
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        out.push_str(&format!(
            "Targets: {} ({} hostile)\n",
            frame.targets.len(),
            frame.hostile_count()
        ));

        for target in &frame.targets {
            let p = target.position;
            out.push_str(&format!(
                "  [{}] pos=({:.2}, {:.2}, {:.2}) size={:.2}",
                target.id.short(),
                p.x,
                p.y,
                p.z,
                target.size
            ));
            if let Some(health) = target.health {
                out.push_str(&format!(" hp={health}"));
            }
            out.push('\n');
        }

        out.push_str(&format!("Projectiles: {}\n", frame.projectiles.len()));
        if self.show_projectiles {
            for projectile in &frame.projectiles {
                let p = projectile.position;
                let owner = match projectile.owner {
                    Owner::Player => "player".to_string(),
                    Owner::Enemy(id) => format!("enemy {}", id.short()),
                };
                out.push_str(&format!(
                    "  ({:.2}, {:.2}, {:.2}) from {owner}\n",
                    p.x, p.y, p.z
                ));
            }
        }

        tracing::trace!(tick = frame.tick, bytes = out.len(), "debug frame rendered");
        out
    }
}
