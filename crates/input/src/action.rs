use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InputError;

/// A discrete, one-shot request raised by the input collaborator.
///
/// The kernel consumes actions from a snapshot, never raw input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Fire once (primary button went down).
    Fire,
    /// Refill the magazine.
    Reload,
    /// Reset the session to its initial configuration.
    Restart,
}

/// Anything a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    Jump,
    Reload,
    Restart,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Forward,
        Control::Back,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::Jump,
        Control::Reload,
        Control::Restart,
    ];

    /// The one-shot action a press of this control raises, if any.
    /// Movement and jump are held states instead.
    pub fn action(self) -> Option<Action> {
        match self {
            Control::Reload => Some(Action::Reload),
            Control::Restart => Some(Action::Restart),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Back => "back",
            Control::StrafeLeft => "strafe_left",
            Control::StrafeRight => "strafe_right",
            Control::Jump => "jump",
            Control::Reload => "reload",
            Control::Restart => "restart",
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Control::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| InputError::UnknownControl(s.to_string()))
    }
}
