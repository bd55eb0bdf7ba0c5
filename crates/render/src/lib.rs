//! Rendering adapter: renderer-agnostic interface over the tile scene.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - Render output derives only from scene state and the view.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "tileflip-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
