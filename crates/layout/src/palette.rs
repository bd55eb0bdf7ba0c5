use serde::{Deserialize, Serialize};
use tileflip_common::{Color, TileCoord};

use crate::LayoutError;

/// Ordered, non-empty list of outline colors.
///
/// Serialized as a bare list of colors; deserialization rejects an empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub const BLUE: Color = Color::from_hex(0x284546);
    pub const RED: Color = Color::from_hex(0x8E352F);
    pub const YELLOW: Color = Color::from_hex(0xF7AD30);

    pub fn new(colors: Vec<Color>) -> Result<Self, LayoutError> {
        if colors.is_empty() {
            return Err(LayoutError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of the tile at `coord`: `colors[(row + column) % len]`.
    ///
    /// Equal `row + column` sums share a color, so the pattern runs in stripes
    /// along the anti-diagonals.
    pub fn color_for(&self, coord: TileCoord) -> Color {
        self.colors[(coord.row + coord.column) % self.colors.len()]
    }
}

impl TryFrom<Vec<Color>> for Palette {
    type Error = LayoutError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<Color> {
    fn from(palette: Palette) -> Self {
        palette.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![Self::BLUE, Self::RED, Self::YELLOW],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(LayoutError::EmptyPalette));
    }

    #[test]
    fn default_palette_cycles_blue_red_yellow() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color_for(TileCoord::new(0, 0)), Palette::BLUE);
        assert_eq!(palette.color_for(TileCoord::new(0, 1)), Palette::RED);
        assert_eq!(palette.color_for(TileCoord::new(1, 1)), Palette::YELLOW);
        assert_eq!(palette.color_for(TileCoord::new(2, 1)), Palette::BLUE);
    }

    #[test]
    fn period_three_along_both_axes() {
        let palette = Palette::default();
        for row in 0..12 {
            for column in 0..12 {
                let here = palette.color_for(TileCoord::new(row, column));
                assert_eq!(here, palette.color_for(TileCoord::new(row + 3, column)));
                assert_eq!(here, palette.color_for(TileCoord::new(row, column + 3)));
            }
        }
    }

    #[test]
    fn single_color_palette_paints_everything() {
        let palette = Palette::new(vec![Color::WHITE]).unwrap();
        assert_eq!(palette.color_for(TileCoord::new(7, 11)), Color::WHITE);
    }

    #[test]
    fn deserializing_goes_through_validation() {
        let json = serde_json::to_string(&Palette::default()).unwrap();
        assert!(json.starts_with('['));
        let palette: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(palette, Palette::default());

        let err = serde_json::from_str::<Palette>("[]").unwrap_err();
        assert!(err.to_string().contains("at least one color"));
    }
}
