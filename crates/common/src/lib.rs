//! Shared types for the tileflip workspace.
//!
//! # Invariants
//! - Types here carry no behavior tied to a renderer or an event loop.
//! - Colors are stored in sRGB space; conversion to linear happens at the GPU edge.

mod color;
mod types;

pub use color::{Color, ColorError};
pub use types::{Axis, TileCoord, Transform};

pub fn crate_info() -> &'static str {
    "tileflip-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
