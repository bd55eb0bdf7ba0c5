//! Pointer input mapped to camera actions.
//!
//! # Invariants
//! - The camera consumes actions, never raw window events.
//! - A drag only produces motion while a button is held.

pub mod action;
pub mod tracker;

pub use action::{Action, PointerButton};
pub use tracker::PointerTracker;

pub fn crate_info() -> &'static str {
    "tileflip-input v0.1.0"
}
