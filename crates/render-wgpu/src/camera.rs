use glam::{Mat4, Vec3};
use tileflip_scene::CameraConfig;

/// Keeps the polar angle off the poles so the view never flips over.
const POLAR_EPSILON: f32 = 1.0e-4;
/// Radius factor for one dolly step.
const DOLLY_STEP: f32 = 0.95;

/// Orbit camera: spherical coordinates around a target point.
///
/// Input accumulates into pending deltas; [`OrbitCamera::update`] applies
/// them once per frame. With damping on, only a share of the pending orbit
/// and pan is applied each frame and the rest decays, so motion eases out.
/// Camera motion lives outside the scene and never touches tile state.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    pending_pan: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

impl OrbitCamera {
    /// Camera at `eye` orbiting `target`. `fov` is vertical, in radians.
    pub fn from_eye(eye: Vec3, target: Vec3, fov: f32, near: f32, far: f32) -> Self {
        let offset = eye - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, std::f32::consts::FRAC_PI_2)
        };
        Self {
            target,
            radius,
            theta,
            phi: phi.clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON),
            fov,
            aspect: 16.0 / 9.0,
            near,
            far,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            min_distance: near,
            max_distance: far * 0.8,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
        }
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::from_eye(
            config.eye,
            config.target,
            config.fov_y_degrees.to_radians(),
            config.near,
            config.far,
        );
        camera.aspect = aspect;
        camera.enable_damping = config.enable_damping;
        camera.damping_factor = config.damping_factor;
        camera
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target + self.radius * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalize_or(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize_or(Vec3::X)
    }

    /// Queue a rotation from a drag of `(dx, dy)` pixels in a viewport
    /// `viewport_height` pixels tall. A full-height drag is one full turn.
    pub fn orbit(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let turn = std::f32::consts::TAU * self.rotate_speed / height;
        self.pending_theta -= dx * turn;
        self.pending_phi -= dy * turn;
    }

    /// Queue a dolly of `steps` wheel lines; positive moves toward the target.
    pub fn dolly(&mut self, steps: f32) {
        if steps.is_finite() {
            self.pending_scale *= DOLLY_STEP.powf(steps);
        }
    }

    /// Queue a pan that keeps the point under the cursor under the cursor.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let target_distance = self.radius * (self.fov / 2.0).tan();
        let right = self.right();
        let up = right.cross(self.forward());
        self.pending_pan += -right * (2.0 * dx * target_distance / height)
            + up * (2.0 * dy * target_distance / height);
    }

    /// Apply pending input. Call once per frame.
    pub fn update(&mut self) {
        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        self.theta += self.pending_theta * share;
        self.phi = (self.phi + self.pending_phi * share)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * share;

        let keep = 1.0 - share;
        self.pending_theta *= keep;
        self.pending_phi *= keep;
        self.pending_pan *= keep;
        self.pending_scale = 1.0;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> OrbitCamera {
        OrbitCamera::default()
    }

    #[test]
    fn default_camera_matches_config() {
        let cam = camera();
        assert!((cam.eye() - Vec3::new(34.0, 30.0, -28.0)).length() < 1e-3);
        assert_eq!(cam.target, Vec3::ZERO);
        assert!((cam.fov - 45f32.to_radians()).abs() < 1e-6);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn damping_converges() {
        let mut cam = camera();
        let start = cam.theta();
        cam.orbit(100.0, 0.0, 720.0);
        let expected = -std::f32::consts::TAU * 100.0 / 720.0;

        cam.update();
        let first_step = cam.theta() - start;
        assert!((first_step - expected * 0.05).abs() < 1e-5);

        for _ in 0..600 {
            cam.update();
        }
        assert!((cam.theta() - start - expected).abs() < 1e-3);
        // Radius is untouched by orbiting.
        assert!((cam.radius() - Vec3::new(34.0, 30.0, -28.0).length()).abs() < 1e-3);
    }

    #[test]
    fn without_damping_motion_applies_at_once() {
        let mut cam = camera();
        cam.enable_damping = false;
        let start = cam.theta();
        cam.orbit(72.0, 0.0, 720.0);
        cam.update();
        let after = cam.theta();
        assert!((after - start + std::f32::consts::TAU * 0.1).abs() < 1e-5);
        cam.update();
        assert_eq!(cam.theta(), after);
    }

    #[test]
    fn dolly_scales_and_clamps() {
        let mut cam = camera();
        let start = cam.radius();
        cam.dolly(1.0);
        cam.update();
        assert!((cam.radius() - start * 0.95).abs() < 1e-3);

        cam.dolly(1_000.0);
        cam.update();
        assert_eq!(cam.radius(), cam.min_distance);

        cam.dolly(-1_000.0);
        cam.update();
        assert_eq!(cam.radius(), cam.max_distance);

        cam.dolly(f32::NAN);
        cam.update();
        assert_eq!(cam.radius(), cam.max_distance);
    }

    #[test]
    fn polar_angle_never_flips() {
        let mut cam = camera();
        cam.enable_damping = false;
        cam.orbit(0.0, 100_000.0, 720.0);
        cam.update();
        assert!(cam.phi() >= POLAR_EPSILON);
        cam.orbit(0.0, -200_000.0, 720.0);
        cam.update();
        assert!(cam.phi() <= std::f32::consts::PI - POLAR_EPSILON);
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut cam = camera();
        cam.enable_damping = false;
        let offset = cam.eye() - cam.target;
        cam.pan(50.0, 0.0, 720.0);
        cam.update();
        assert!(cam.target.length() > 0.1);
        assert!(((cam.eye() - cam.target) - offset).length() < 1e-3);
        // Dragging right slides the target left in view space.
        assert!(cam.target.dot(cam.right()) < 0.0);
    }

    #[test]
    fn aspect_guards_zero_height() {
        let mut cam = camera();
        cam.set_aspect(800, 0);
        assert_eq!(cam.aspect, 800.0);
        cam.set_aspect(1280, 720);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
