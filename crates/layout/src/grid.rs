use glam::Vec3;
use serde::{Deserialize, Serialize};
use tileflip_common::{Color, TileCoord};

use crate::{GridSpec, LayoutError, Palette};

/// Position and outline color of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub coord: TileCoord,
    pub position: Vec3,
    pub color: Color,
}

/// A fully laid-out grid.
///
/// Tiles are stored row-major, so row `i` occupies the contiguous slice
/// `i * columns .. (i + 1) * columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    spec: GridSpec,
    tiles: Vec<TileDescriptor>,
}

impl GridLayout {
    /// Lay out every tile of `spec`, coloring outlines from `palette`.
    pub fn generate(spec: GridSpec, palette: &Palette) -> Result<Self, LayoutError> {
        spec.validate()?;
        if palette.is_empty() {
            return Err(LayoutError::EmptyPalette);
        }

        let mut tiles = Vec::with_capacity(spec.tile_count());
        for row in 0..spec.rows {
            for column in 0..spec.columns {
                let coord = TileCoord::new(row, column);
                tiles.push(TileDescriptor {
                    coord,
                    position: spec.position(coord),
                    color: palette.color_for(coord),
                });
            }
        }

        tracing::debug!(
            rows = spec.rows,
            columns = spec.columns,
            tiles = tiles.len(),
            "grid laid out"
        );

        Ok(Self { spec, tiles })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TileDescriptor> {
        self.tiles.iter()
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&TileDescriptor> {
        if coord.row >= self.spec.rows || coord.column >= self.spec.columns {
            return None;
        }
        self.tiles.get(coord.row * self.spec.columns + coord.column)
    }

    /// Tiles of row `row`, ordered by column. Empty when out of range.
    pub fn row(&self, row: usize) -> &[TileDescriptor] {
        if row >= self.spec.rows {
            return &[];
        }
        let start = row * self.spec.columns;
        &self.tiles[start..start + self.spec.columns]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileDescriptor]> {
        self.tiles.chunks(self.spec.columns.max(1))
    }

    /// Midpoint between the first and last tile centers.
    pub fn center(&self) -> Vec3 {
        let last = TileCoord::new(
            self.spec.rows.saturating_sub(1),
            self.spec.columns.saturating_sub(1),
        );
        self.spec.position(last) * 0.5
    }
}
