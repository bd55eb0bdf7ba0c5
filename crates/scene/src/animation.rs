use serde::{Deserialize, Serialize};
use tileflip_common::Axis;
use tileflip_timeline::{Ease, Repeat, StaggerDelay, Timeline, Tween, TweenParams};

use crate::{AnimationError, NodeId, Scene};

/// Parameters of the row-by-row flip wave.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlipParams {
    pub axis: Axis,
    /// Rotation reached at the end of a forward pass, in radians.
    pub angle: f32,
    pub duration: f32,
    /// Seconds between neighbouring tiles of one row.
    pub stagger: f32,
    pub yoyo: bool,
    pub repeat: Repeat,
    pub ease: Ease,
    /// Start delay of the middle row. The outer rows start at once.
    pub peak_delay: f32,
}

impl Default for FlipParams {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            angle: std::f32::consts::PI,
            duration: 0.5,
            stagger: 0.3,
            yoyo: true,
            repeat: Repeat::Infinite,
            ease: Ease::QuadOut,
            peak_delay: 2.0,
        }
    }
}

impl FlipParams {
    /// Tween parameters for a row starting after `delay` seconds.
    pub fn tween_params(&self, delay: f32) -> TweenParams {
        TweenParams {
            from: 0.0,
            to: self.angle,
            duration: self.duration,
            delay,
            stagger: self.stagger,
            yoyo: self.yoyo,
            repeat: self.repeat,
            ease: self.ease,
        }
    }

    pub fn validate(&self, rows: usize) -> Result<(), AnimationError> {
        if !self.angle.is_finite() {
            return Err(AnimationError::InvalidAngle(self.angle));
        }
        StaggerDelay::new(rows, self.peak_delay)?;
        self.tween_params(0.0).validate()?;
        Ok(())
    }
}

/// The flip wave over a scene: per row, one tween over the body rotations
/// and one over the outline rotations, both delayed by the row's curve value.
#[derive(Debug, Clone)]
pub struct Choreography {
    axis: Axis,
    delays: StaggerDelay,
    timeline: Timeline<NodeId>,
}

impl Choreography {
    pub fn build(scene: &Scene, params: &FlipParams) -> Result<Self, AnimationError> {
        params.validate(scene.row_count())?;
        let delays = StaggerDelay::new(scene.row_count(), params.peak_delay)?;
        let mut timeline = Timeline::new();

        for (index, row) in scene.rows().enumerate() {
            let tween_params = params.tween_params(delays.for_row(index));
            let bodies = row.iter().map(|visual| visual.body).collect();
            let outlines = row.iter().map(|visual| visual.outline).collect();
            timeline.add(Tween::new(bodies, tween_params)?);
            timeline.add(Tween::new(outlines, tween_params)?);
        }

        tracing::info!(
            rows = scene.row_count(),
            tweens = timeline.len(),
            peak_delay = params.peak_delay,
            "flip choreography ready"
        );
        Ok(Self {
            axis: params.axis,
            delays,
            timeline,
        })
    }

    pub fn delays(&self) -> &StaggerDelay {
        &self.delays
    }

    pub fn timeline(&self) -> &Timeline<NodeId> {
        &self.timeline
    }

    pub fn elapsed(&self) -> f64 {
        self.timeline.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    /// Advance by `dt` seconds and write every node's rotation.
    pub fn advance(&mut self, scene: &mut Scene, dt: f32) {
        let axis = self.axis;
        self.timeline.advance(dt, |id, angle| {
            scene.set_rotation(id, axis.rotation(angle));
        });
    }

    /// Jump to `time` seconds and write every node's rotation.
    pub fn seek(&mut self, scene: &mut Scene, time: f64) {
        let axis = self.axis;
        self.timeline.seek(time, |id, angle| {
            scene.set_rotation(id, axis.rotation(angle));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SceneStyle;
    use glam::Quat;
    use tileflip_common::TileCoord;
    use tileflip_layout::{GridLayout, GridSpec, Palette};

    fn scene(rows: usize, columns: usize) -> Scene {
        let spec = GridSpec {
            rows,
            columns,
            ..GridSpec::default()
        };
        let layout = GridLayout::generate(spec, &Palette::default()).unwrap();
        Scene::from_layout(&layout, &SceneStyle::default())
    }

    fn angle_of(scene: &Scene, id: NodeId) -> f32 {
        let (axis, angle) = scene.node(id).unwrap().transform.rotation.to_axis_angle();
        if angle.abs() < 1e-6 {
            0.0
        } else {
            // Signed angle about +X.
            angle * axis.x.signum()
        }
    }

    #[test]
    fn two_tweens_per_row() {
        let scene = scene(15, 15);
        let choreography = Choreography::build(&scene, &FlipParams::default()).unwrap();
        assert_eq!(choreography.timeline().len(), 30);
        let tweens = choreography.timeline().tweens();
        let first_bodies: Vec<NodeId> = scene.row(0).iter().map(|v| v.body).collect();
        assert_eq!(tweens[0].targets(), first_bodies.as_slice());
        assert_eq!(tweens[1].targets()[0], scene.row(0)[0].outline);
        assert_eq!(tweens[14].params().delay, choreography.delays().for_row(7));
        assert!(!choreography.is_finished());
    }

    #[test]
    fn outer_rows_start_immediately_middle_row_waits() {
        let mut scene = scene(15, 15);
        let mut choreography = Choreography::build(&scene, &FlipParams::default()).unwrap();
        choreography.seek(&mut scene, 0.25);

        let first = scene.tile(TileCoord::new(0, 0)).unwrap();
        let last = scene.tile(TileCoord::new(14, 0)).unwrap();
        let middle = scene.tile(TileCoord::new(7, 0)).unwrap();
        assert!(angle_of(&scene, first.body) > 0.5);
        assert!((angle_of(&scene, first.body) - angle_of(&scene, last.body)).abs() < 1e-4);
        assert_eq!(angle_of(&scene, middle.body), 0.0);
    }

    #[test]
    fn body_and_outline_move_together() {
        let mut scene = scene(4, 6);
        let mut choreography = Choreography::build(&scene, &FlipParams::default()).unwrap();
        for _ in 0..90 {
            choreography.advance(&mut scene, 1.0 / 60.0);
            for visual in scene.tiles() {
                let body = scene.node(visual.body).unwrap().transform.rotation;
                let outline = scene.node(visual.outline).unwrap().transform.rotation;
                assert!(body.abs_diff_eq(outline, 1e-6));
            }
        }
        assert!((choreography.elapsed() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn first_tile_completes_flip_after_duration() {
        let mut scene = scene(15, 15);
        let mut choreography = Choreography::build(&scene, &FlipParams::default()).unwrap();
        choreography.seek(&mut scene, 0.5);
        let tile = scene.tile(TileCoord::new(0, 0)).unwrap();
        let rotation = scene.node(tile.body).unwrap().transform.rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_x(std::f32::consts::PI), 1e-4));
        // Neighbour started 0.3s later and is part way through.
        let next = scene.tile(TileCoord::new(0, 1)).unwrap();
        let partial = angle_of(&scene, next.body);
        assert!(partial > 0.0 && partial < std::f32::consts::PI);
    }

    #[test]
    fn single_row_has_no_delay() {
        let mut scene = scene(1, 3);
        let mut choreography = Choreography::build(&scene, &FlipParams::default()).unwrap();
        assert_eq!(choreography.delays().delays(), vec![0.0]);
        choreography.seek(&mut scene, 0.1);
        let tile = scene.tile(TileCoord::new(0, 0)).unwrap();
        assert!(angle_of(&scene, tile.body) > 0.0);
    }

    #[test]
    fn invalid_params_are_rejected() {
        let scene = scene(3, 3);
        let bad_angle = FlipParams {
            angle: f32::INFINITY,
            ..FlipParams::default()
        };
        assert!(matches!(
            Choreography::build(&scene, &bad_angle),
            Err(AnimationError::InvalidAngle(_))
        ));
        let bad_duration = FlipParams {
            duration: -0.5,
            ..FlipParams::default()
        };
        assert!(matches!(
            Choreography::build(&scene, &bad_duration),
            Err(AnimationError::Tween(_))
        ));
        let bad_peak = FlipParams {
            peak_delay: f32::NAN,
            ..FlipParams::default()
        };
        assert!(matches!(
            Choreography::build(&scene, &bad_peak),
            Err(AnimationError::Delay(_))
        ));
    }
}
