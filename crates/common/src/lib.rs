//! Shared types for the arena crates: identifiers, look angles, collision proxies
//! and the handful of vector helpers every kinematic system needs.
//!
//! # Invariants
//! - Pitch stored in a clamped [`LookAngles`] never reaches ±π/2.
//! - Degenerate vectors normalize to zero, never to NaN.

pub mod math;
pub mod types;

pub use math::{Aabb, flat_forward, forward, horizontal, right, within_radius};
pub use types::{EntityId, LookAngles};

pub fn crate_info() -> &'static str {
    "arena-common v0.1.0"
}
