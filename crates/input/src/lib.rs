//! Input collaborator boundary: key bindings, pointer look, and the per-tick
//! snapshot the simulation consumes.
//!
//! # Invariants
//! - The simulation reads one [`InputSnapshot`] per tick, never live input.
//! - One-shot actions are delivered exactly once.
//! - Pointer motion and fire are ignored while the pointer is not locked.

pub mod action;
pub mod bindings;
pub mod collector;
pub mod snapshot;

pub use action::{Action, Control};
pub use bindings::KeyBindings;
pub use collector::{InputCollector, InputConfig, InputEvent};
pub use snapshot::{HeldControls, InputSnapshot};

/// Errors from parsing bindings and control names.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("unknown control: {0:?}")]
    UnknownControl(String),
    #[error("key name must not be empty")]
    EmptyKey,
    #[error("binding must look like control=key, got {0:?}")]
    MalformedBinding(String),
}

pub fn crate_info() -> &'static str {
    "arena-input v0.1.0"
}
