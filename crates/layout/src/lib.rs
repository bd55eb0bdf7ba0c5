//! Grid layout: where every tile sits and which color its outline takes.
//!
//! # Invariants
//! - Every generated tile has a unique `(row, column)` coordinate.
//! - Generation is pure: identical inputs always yield identical layouts.
//! - Color is a stateless function of `(row + column) mod palette length`.

mod geometry;
mod grid;
mod palette;

pub use geometry::{GridSpec, TileSize};
pub use grid::{GridLayout, TileDescriptor};
pub use palette::Palette;

/// Reasons a grid cannot be laid out.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LayoutError {
    #[error("grid must have at least one row")]
    NoRows,
    #[error("grid must have at least one column")]
    NoColumns,
    #[error("grid of {rows}x{columns} tiles is too large")]
    TooManyTiles { rows: usize, columns: usize },
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("tile {dimension} must be positive and finite, got {value}")]
    InvalidTileSize { dimension: &'static str, value: f32 },
    #[error("tile margin must be non-negative and finite, got {0}")]
    InvalidMargin(f32),
}

pub fn crate_info() -> &'static str {
    "tileflip-layout v0.1.0"
}
