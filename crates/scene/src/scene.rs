use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tileflip_common::{Color, TileCoord, Transform};
use tileflip_layout::GridLayout;

/// Handle to a node in one [`Scene`]. Only the scene that issued it can
/// resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Solid box filled with the body color.
    Body,
    /// Box edges drawn in the tile's palette color.
    Outline,
}

/// One drawable piece of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    pub coord: TileCoord,
    pub transform: Transform,
    pub color: Color,
}

/// The body and outline nodes of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileVisual {
    pub body: NodeId,
    pub outline: NodeId,
}

/// Colors and placement applied when a layout becomes a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneStyle {
    pub body_color: Color,
    pub background: Color,
    /// Transform of the group every tile hangs from.
    pub group: Transform,
}

impl SceneStyle {
    pub const CHARCOAL: Color = Color::from_hex(0x1F2930);
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            body_color: Self::CHARCOAL,
            background: Self::CHARCOAL,
            group: Transform {
                position: Vec3::new(-40.0, 0.0, -40.0),
                rotation: Quat::from_rotation_y(-0.5),
                scale: Vec3::ONE,
            },
        }
    }
}

/// All tile nodes plus the group transform above them.
///
/// Node ids are dense indices. Tiles are stored row-major like the layout,
/// so row `i` is the slice `i * columns .. (i + 1) * columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    nodes: Vec<Node>,
    tiles: Vec<TileVisual>,
    rows: usize,
    columns: usize,
    group: Transform,
    background: Color,
}

impl Scene {
    /// Build one body node and one outline node per tile of `layout`.
    pub fn from_layout(layout: &GridLayout, style: &SceneStyle) -> Self {
        let spec = layout.spec();
        let size = spec.tile.as_vec3();
        let mut nodes = Vec::with_capacity(layout.len() * 2);
        let mut tiles = Vec::with_capacity(layout.len());

        for tile in layout.iter() {
            let transform = Transform {
                position: tile.position,
                rotation: Quat::IDENTITY,
                scale: size,
            };
            let body = NodeId(nodes.len());
            nodes.push(Node {
                kind: NodeKind::Body,
                coord: tile.coord,
                transform,
                color: style.body_color,
            });
            let outline = NodeId(nodes.len());
            nodes.push(Node {
                kind: NodeKind::Outline,
                coord: tile.coord,
                transform,
                color: tile.color,
            });
            tiles.push(TileVisual { body, outline });
        }

        tracing::debug!(
            tiles = tiles.len(),
            nodes = nodes.len(),
            "scene built from layout"
        );
        Self {
            nodes,
            tiles,
            rows: spec.rows,
            columns: spec.columns,
            group: style.group,
            background: style.background,
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn group(&self) -> &Transform {
        &self.group
    }

    pub fn tile(&self, coord: TileCoord) -> Option<TileVisual> {
        if coord.row >= self.rows || coord.column >= self.columns {
            return None;
        }
        self.tiles.get(coord.row * self.columns + coord.column).copied()
    }

    /// Tiles of row `row` in column order; empty when out of range.
    pub fn row(&self, row: usize) -> &[TileVisual] {
        if row >= self.rows {
            return &[];
        }
        &self.tiles[row * self.columns..(row + 1) * self.columns]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileVisual]> {
        self.tiles.chunks(self.columns.max(1))
    }

    pub fn tiles(&self) -> &[TileVisual] {
        &self.tiles
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Replace a node's rotation. Returns false for an unknown id.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Quat) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.transform.rotation = rotation;
                true
            }
            None => false,
        }
    }

    /// Node-to-world matrix: the group transform applied over the node's own.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.node(id)
            .map(|node| self.group.matrix() * node.transform.matrix())
    }
}
