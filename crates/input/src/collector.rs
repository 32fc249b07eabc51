use std::collections::BTreeSet;

use arena_common::LookAngles;
use serde::{Deserialize, Serialize};

use crate::bindings::normalize_key;
use crate::{Action, HeldControls, InputSnapshot, KeyBindings};

/// Pointer and key mapping settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians per pointer-motion unit.
    pub sensitivity: f32,
    /// Maximum absolute pitch in radians.
    pub pitch_limit: f32,
    pub bindings: KeyBindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0025,
            pitch_limit: LookAngles::DEFAULT_PITCH_LIMIT,
            bindings: KeyBindings::default(),
        }
    }
}

/// A raw event from the host's windowing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    PointerMotion { dx: f32, dy: f32 },
    /// Primary pointer button went down.
    PrimaryDown,
    /// Pointer lock acquired or lost.
    LockChanged(bool),
}

/// Accumulates host input between ticks and hands the simulation one
/// consistent [`InputSnapshot`] per tick.
#[derive(Debug, Clone)]
pub struct InputCollector {
    config: InputConfig,
    held_keys: BTreeSet<String>,
    look: LookAngles,
    active: bool,
    pending: Vec<Action>,
}

impl InputCollector {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            held_keys: BTreeSet::new(),
            look: LookAngles::default(),
            active: false,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn look(&self) -> LookAngles {
        self.look
    }

    /// Overwrite the look angles, e.g. when the session restarts.
    pub fn set_look(&mut self, look: LookAngles) {
        self.look = look.clamped(self.config.pitch_limit);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(&key),
            InputEvent::KeyUp(key) => self.key_up(&key),
            InputEvent::PointerMotion { dx, dy } => self.pointer_motion(dx, dy),
            InputEvent::PrimaryDown => self.primary_down(),
            InputEvent::LockChanged(locked) => self.set_active(locked),
        }
    }

    /// Key press. Auto-repeat of an already held key raises nothing new.
    pub fn key_down(&mut self, key: &str) {
        let key = normalize_key(key);
        let Some(control) = self.config.bindings.control_for(&key) else {
            return;
        };
        if !self.held_keys.insert(key) {
            return;
        }
        if let Some(action) = control.action() {
            tracing::trace!(?action, "input action queued");
            self.pending.push(action);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        self.held_keys.remove(&normalize_key(key));
    }

    /// Pointer motion turns the view only while the pointer is locked.
    pub fn pointer_motion(&mut self, dx: f32, dy: f32) {
        if !self.active {
            return;
        }
        self.look
            .rotate(dx, dy, self.config.sensitivity, self.config.pitch_limit);
    }

    pub fn primary_down(&mut self) {
        if self.active {
            self.pending.push(Action::Fire);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active != active {
            tracing::debug!(active, "pointer lock changed");
        }
        self.active = active;
    }

    /// Forget every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held_keys.clear();
    }

    /// Take this tick's snapshot: held controls and look angles are copied,
    /// queued one-shot actions are drained.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let mut held = HeldControls::default();
        for key in &self.held_keys {
            if let Some(control) = self.config.bindings.control_for(key) {
                held.set(control, true);
            }
        }
        InputSnapshot {
            held,
            look: self.look,
            active: self.active,
            actions: std::mem::take(&mut self.pending),
        }
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
