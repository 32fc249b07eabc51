//! Render adapter: turns a [`arena_kernel::FrameView`] into output.
//!
//! # Invariants
//! - Renderers only ever see an owned frame; they cannot reach the session.
//! - Camera placement derives from the player view in the frame.
//!
//! Ships a debug text renderer used by the CLI. A GPU backend implements the
//! same [`Renderer`] trait without touching consumers.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer, hud_line};

pub fn crate_info() -> &'static str {
    "arena-render v0.1.0"
}
