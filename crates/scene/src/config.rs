use glam::Vec3;
use serde::{Deserialize, Serialize};
use tileflip_layout::{GridLayout, GridSpec, LayoutError, Palette};

use crate::{Choreography, ConfigError, FlipParams, Scene, SceneStyle};

/// Perspective and orbit-control settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    /// Point the camera orbits around.
    pub target: Vec3,
    pub enable_damping: bool,
    /// Share of the pending orbit applied each frame when damping is on.
    pub damping_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 1.0,
            far: 500.0,
            eye: Vec3::new(34.0, 30.0, -28.0),
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: 0.05,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(ConfigError::Camera("field of view must be within (0, 180) degrees"));
        }
        if !(self.near > 0.0 && self.far.is_finite() && self.far > self.near) {
            return Err(ConfigError::Camera("clip planes need 0 < near < far"));
        }
        if !self.eye.is_finite() || !self.target.is_finite() {
            return Err(ConfigError::Camera("eye and target must be finite"));
        }
        if self.eye.distance(self.target) <= f32::EPSILON {
            return Err(ConfigError::Camera("eye must not sit on the target"));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(ConfigError::Camera("damping factor must be within (0, 1]"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tileflip".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything the application needs to start. Defaults reproduce the
/// reference scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub grid: GridSpec,
    pub palette: Palette,
    pub style: SceneStyle,
    pub camera: CameraConfig,
    pub flip: FlipParams,
    pub window: WindowConfig,
}

impl SceneConfig {
    /// Check every section, failing on the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        if self.palette.is_empty() {
            return Err(LayoutError::EmptyPalette.into());
        }
        self.camera.validate()?;
        self.flip.validate(self.grid.rows)?;
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Window {
                width: self.window.width,
                height: self.window.height,
            });
        }
        Ok(())
    }

    /// Validate, lay out the grid, and build the scene with its choreography.
    pub fn build(&self) -> Result<(GridLayout, Scene, Choreography), ConfigError> {
        self.validate()?;
        let layout = GridLayout::generate(self.grid, &self.palette)?;
        let scene = Scene::from_layout(&layout, &self.style);
        let choreography = Choreography::build(&scene, &self.flip)?;
        Ok((layout, scene, choreography))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AnimationError;
    use tileflip_timeline::{ScaleError, TweenError};

    #[test]
    fn defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.rows, 15);
        assert_eq!(config.camera.eye, Vec3::new(34.0, 30.0, -28.0));
        assert_eq!(config.window.title, "Tileflip");
    }

    #[test]
    fn build_produces_full_scene() {
        let (layout, scene, choreography) = SceneConfig::default().build().unwrap();
        assert_eq!(layout.len(), 225);
        assert_eq!(scene.tile_count(), 225);
        assert_eq!(choreography.timeline().len(), 30);
    }

    #[test]
    fn bad_grid_fails_fast() {
        let mut config = SceneConfig::default();
        config.grid.rows = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Layout(LayoutError::NoRows))
        );
    }

    #[test]
    fn bad_camera_fails_fast() {
        let mut config = SceneConfig::default();
        config.camera.near = 600.0;
        assert!(matches!(config.validate(), Err(ConfigError::Camera(_))));

        let mut config = SceneConfig::default();
        config.camera.target = config.camera.eye;
        assert!(matches!(config.validate(), Err(ConfigError::Camera(_))));

        let mut config = SceneConfig::default();
        config.camera.damping_factor = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Camera(_))));
    }

    #[test]
    fn bad_flip_fails_fast() {
        let mut config = SceneConfig::default();
        config.flip.peak_delay = -2.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Animation(AnimationError::Delay(
                ScaleError::InvalidPeak(-2.0)
            )))
        );

        let mut config = SceneConfig::default();
        config.flip.duration = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Animation(AnimationError::Tween(
                TweenError::InvalidDuration(0.0)
            )))
        );
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = SceneConfig::default();
        config.window.height = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::Window {
                width: 1280,
                height: 0
            })
        );
    }
}
