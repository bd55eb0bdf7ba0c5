//! Timing: the stagger delay curve and the tween timeline that drives tile flips.
//!
//! # Invariants
//! - Delay curves are pure functions of the row index.
//! - Tween sampling is a pure function of elapsed time.
//! - Advancing never moves the clock backwards; only `seek` can.

mod ease;
mod frame;
mod scale;
mod timeline;
mod tween;

pub use ease::Ease;
pub use frame::FrameTimer;
pub use scale::{LinearScale, StaggerDelay};
pub use timeline::Timeline;
pub use tween::{Repeat, Tween, TweenParams};

/// Invalid linear scale or delay curve parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScaleError {
    #[error("scale needs at least two control points, got {0}")]
    TooFewPoints(usize),
    #[error("domain has {domain} points but range has {range}")]
    LengthMismatch { domain: usize, range: usize },
    #[error("domain must be strictly increasing and finite")]
    UnorderedDomain,
    #[error("delay curve needs at least one row")]
    NoRows,
    #[error("peak delay must be non-negative and finite, got {0}")]
    InvalidPeak(f32),
}

/// Invalid tween parameters.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TweenError {
    #[error("tween duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
    #[error("tween delay must be non-negative and finite, got {0}")]
    InvalidDelay(f32),
    #[error("tween stagger must be non-negative and finite, got {0}")]
    InvalidStagger(f32),
    #[error("tween endpoints must be finite")]
    NonFiniteEndpoint,
}

pub fn crate_info() -> &'static str {
    "tileflip-timeline v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("timeline"));
    }
}
