//! Scene: the explicit context holding every tile node, the flip choreography
//! that animates them, and the configuration the application starts from.
//!
//! # Invariants
//! - Every tile owns exactly one body node and one outline node.
//! - Node transforms change only through explicit scene operations.
//! - Row `i` of the scene is row `i` of the layout it was built from.

mod animation;
mod config;
mod scene;

pub use animation::{Choreography, FlipParams};
pub use config::{CameraConfig, SceneConfig, WindowConfig};
pub use scene::{Node, NodeId, NodeKind, Scene, SceneStyle, TileVisual};

use tileflip_layout::LayoutError;
use tileflip_timeline::{ScaleError, TweenError};

/// The flip animation could not be set up.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnimationError {
    #[error("flip angle must be finite, got {0}")]
    InvalidAngle(f32),
    #[error("invalid row delay curve: {0}")]
    Delay(#[from] ScaleError),
    #[error("invalid flip tween: {0}")]
    Tween(#[from] TweenError),
}

/// Startup configuration was rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid grid: {0}")]
    Layout(#[from] LayoutError),
    #[error("invalid animation: {0}")]
    Animation(#[from] AnimationError),
    #[error("invalid camera: {0}")]
    Camera(&'static str),
    #[error("invalid window size {width}x{height}")]
    Window { width: u32, height: u32 },
}

pub fn crate_info() -> &'static str {
    "tileflip-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }

    #[test]
    fn config_error_wraps_sources() {
        let err: ConfigError = LayoutError::NoRows.into();
        assert_eq!(err.to_string(), "invalid grid: grid must have at least one row");
        let err: ConfigError = AnimationError::InvalidAngle(f32::NAN).into();
        assert!(err.to_string().starts_with("invalid animation"));
    }
}
