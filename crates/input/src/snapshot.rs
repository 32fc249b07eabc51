use arena_common::LookAngles;
use glam::Vec3;

use crate::{Action, Control};

/// Movement controls currently held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldControls {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub jump: bool,
}

impl HeldControls {
    /// Record a held control. Controls without a held state are ignored.
    pub fn set(&mut self, control: Control, pressed: bool) {
        match control {
            Control::Forward => self.forward = pressed,
            Control::Back => self.back = pressed,
            Control::StrafeLeft => self.strafe_left = pressed,
            Control::StrafeRight => self.strafe_right = pressed,
            Control::Jump => self.jump = pressed,
            Control::Reload | Control::Restart => {}
        }
    }

    /// Un-normalized movement intent in the player's local frame:
    /// x is right, z is forward. Opposing keys cancel.
    pub fn local_direction(&self) -> Vec3 {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Vec3::new(
            axis(self.strafe_right, self.strafe_left),
            0.0,
            axis(self.forward, self.back),
        )
    }
}

/// Everything the simulation reads from input during one tick.
///
/// Taken once per tick so that movement and aiming within the tick use the
/// same look angles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputSnapshot {
    pub held: HeldControls,
    pub look: LookAngles,
    /// Pointer lock held; fire requests are honoured only while active.
    pub active: bool,
    /// One-shot actions raised since the previous snapshot, in order.
    pub actions: Vec<Action>,
}

impl InputSnapshot {
    /// An active snapshot with nothing held and no actions.
    pub fn new(look: LookAngles) -> Self {
        Self {
            look,
            active: true,
            ..Self::default()
        }
    }

    pub fn with_held(mut self, held: HeldControls) -> Self {
        self.held = held;
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}
