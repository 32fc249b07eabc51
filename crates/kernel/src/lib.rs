//! Arena kernel: authoritative session state and the simulation tick.
//!
//! The host feeds one [`arena_input::InputSnapshot`] and the elapsed wall
//! time per frame into [`Simulation::tick`], then reads a [`FrameView`].
//!
//! # Invariants
//! - The integration step never exceeds `sim.max_dt`.
//! - Every projectile and target in the state after a tick is live.
//! - A target awards score exactly once, on its alive to dead transition.
//! - The player eye never drops below `floor_y + standing_height`.
//! - The player never ends a tick inside an obstacle.
//! - Restart swaps in a completely rebuilt state; the same seed yields the
//!   same layout.

pub mod behavior;
pub mod clock;
pub mod config;
pub mod entity;
pub mod event;
pub mod frame;
pub mod movement;
pub mod projectile;
pub mod rng;
pub mod simulation;
pub mod spawn;

pub use clock::FrameClock;
pub use config::{ConfigError, GameConfig};
pub use entity::{DamageOutcome, Hostile, Owner, Player, Projectile, Target, TargetKind};
pub use event::SimEvent;
pub use frame::{FrameView, Hud, PlayerView, ProjectileView, TargetView};
pub use rng::SessionRng;
pub use simulation::{SessionStatus, Simulation, SimulationState, TickReport};

pub fn crate_info() -> &'static str {
    "arena-kernel v0.1.0"
}
