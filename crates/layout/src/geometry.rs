use glam::Vec3;
use serde::{Deserialize, Serialize};
use tileflip_common::TileCoord;

use crate::LayoutError;

/// Box dimensions of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 0.25,
            depth: 5.0,
        }
    }
}

impl TileSize {
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }
}

/// Dimensions of the tile lattice.
///
/// Rows advance along X and columns along Z. Adjacent tiles are separated by
/// `margin` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub columns: usize,
    pub tile: TileSize,
    pub margin: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: 15,
            columns: 15,
            tile: TileSize::default(),
            margin: 0.05,
        }
    }
}

impl GridSpec {
    /// Check that the lattice is non-degenerate.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows == 0 {
            return Err(LayoutError::NoRows);
        }
        if self.columns == 0 {
            return Err(LayoutError::NoColumns);
        }
        if self.rows.checked_mul(self.columns).is_none() {
            return Err(LayoutError::TooManyTiles {
                rows: self.rows,
                columns: self.columns,
            });
        }
        for (dimension, value) in [
            ("width", self.tile.width),
            ("height", self.tile.height),
            ("depth", self.tile.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidTileSize { dimension, value });
            }
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(LayoutError::InvalidMargin(self.margin));
        }
        Ok(())
    }

    /// Distance between neighboring tile centers along X and Z.
    pub fn pitch(&self) -> (f32, f32) {
        (
            self.tile.width + self.margin,
            self.tile.depth + self.margin,
        )
    }

    /// Center of the tile at `coord`, relative to the grid origin.
    pub fn position(&self, coord: TileCoord) -> Vec3 {
        let (pitch_x, pitch_z) = self.pitch();
        Vec3::new(
            coord.row as f32 * pitch_x,
            0.0,
            coord.column as f32 * pitch_z,
        )
    }

    /// Outer footprint of the whole grid, margins between tiles included.
    pub fn extent(&self) -> Vec3 {
        let (pitch_x, pitch_z) = self.pitch();
        Vec3::new(
            (self.rows.saturating_sub(1)) as f32 * pitch_x + self.tile.width,
            self.tile.height,
            (self.columns.saturating_sub(1)) as f32 * pitch_z + self.tile.depth,
        )
    }

    /// Number of tiles, saturating for lattices `validate` rejects.
    pub fn tile_count(&self) -> usize {
        self.rows.checked_mul(self.columns).unwrap_or(usize::MAX)
    }
}
