use std::fmt::Write;

use glam::Vec3;
use tileflip_scene::{CameraConfig, Scene};

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self::from(&CameraConfig::default())
    }
}

impl From<&CameraConfig> for RenderView {
    fn from(camera: &CameraConfig) -> Self {
        Self {
            eye: camera.eye,
            target: camera.target,
            fov_degrees: camera.fov_y_degrees,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a view, then produces output. Node
/// transforms belong to the scene and its choreography.
pub trait Renderer {
    type Output;

    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Textual frame: one line per tile with its coordinate, layout position,
/// outline color and current flip angle.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "=== Tileflip frame (tiles={}, rows={}, columns={}) ===",
            scene.tile_count(),
            scene.row_count(),
            scene.column_count()
        );
        let _ = writeln!(out, "Background: {}", scene.background());
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        );

        for visual in scene.tiles() {
            let (Some(body), Some(outline)) = (scene.node(visual.body), scene.node(visual.outline))
            else {
                tracing::warn!(?visual, "tile refers to missing nodes");
                continue;
            };
            let p = body.transform.position;
            let (_, angle) = body.transform.rotation.to_axis_angle();
            let _ = writeln!(
                out,
                "  {} pos=({:.2}, {:.2}, {:.2}) color={} flip={:.3}",
                body.coord, p.x, p.y, p.z, outline.color, angle
            );
        }

        out
    }
}
