//! Orbit camera with damped pointer-driven rotation and zoom.

use glam::{Mat4, Vec3};

use crate::params::{OrbitSettings, RenderConfig};

/// Orbit camera: spherical coordinates around a fixed target.
///
/// Pointer input moves the *goal* yaw/pitch/radius; `update` eases the
/// actual pose toward the goal every frame, which gives the controls their
/// damped feel.
pub struct OrbitCamera {
    settings: OrbitSettings,
    yaw: f32,
    pitch: f32,
    radius: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_radius: f32,
}

impl OrbitCamera {
    /// Create a new orbit camera, deriving the initial spherical pose from
    /// the configured eye position and target
    pub fn new(settings: OrbitSettings) -> Self {
        let offset = Vec3::from_array(settings.initial_position) - Vec3::from_array(settings.target);
        let radius = offset.length().max(settings.min_radius);
        let pitch = (offset.y / radius).asin();
        let yaw = offset.x.atan2(offset.z);

        Self {
            settings,
            yaw,
            pitch,
            radius,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_radius: radius,
        }
    }

    /// Apply a pointer drag delta (pixels) to the orbit goal
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.goal_yaw -= delta_x * self.settings.rotate_speed;
        self.goal_pitch = (self.goal_pitch + delta_y * self.settings.rotate_speed)
            .clamp(-self.settings.max_pitch, self.settings.max_pitch);
    }

    /// Apply a scroll delta (lines) to the zoom goal
    pub fn zoom(&mut self, delta_lines: f32) {
        self.goal_radius = (self.goal_radius * (1.0 - delta_lines * self.settings.zoom_speed))
            .clamp(self.settings.min_radius, self.settings.max_radius);
    }

    /// Advance damping toward the input goals
    pub fn update(&mut self, dt_s: f32) {
        // Frame-rate independent exponential ease
        let blend = 1.0 - (-self.settings.damping_per_s * dt_s).exp();
        self.yaw += (self.goal_yaw - self.yaw) * blend;
        self.pitch += (self.goal_pitch - self.pitch) * blend;
        self.radius += (self.goal_radius - self.radius) * blend;
    }

    /// Current eye position in world space
    pub fn eye(&self) -> Vec3 {
        let target = Vec3::from_array(self.settings.target);
        let horizontal = self.radius * self.pitch.cos();
        target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.radius * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, eye_position)
    pub fn create_view_proj_matrix(&self, aspect: f32, config: &RenderConfig) -> (Mat4, Vec3) {
        let eye = self.eye();
        let target = Vec3::from_array(self.settings.target);

        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            config.fov_degrees.to_radians(),
            aspect,
            config.near_plane,
            config.far_plane,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_pose_matches_settings() {
        let settings = OrbitSettings::default();
        let camera = OrbitCamera::new(settings.clone());

        let eye = camera.eye();
        let expected = Vec3::from_array(settings.initial_position);
        assert!(
            eye.distance(expected) < 1e-5,
            "eye {eye} != initial position {expected}"
        );
    }

    #[test]
    fn test_damping_converges_to_goal() {
        let mut camera = OrbitCamera::new(OrbitSettings::default());
        camera.rotate(200.0, -100.0);
        let goal_yaw = camera.goal_yaw;
        let goal_pitch = camera.goal_pitch;

        // Simulate a few seconds of frames
        for _ in 0..600 {
            camera.update(1.0 / 120.0);
        }

        assert!((camera.yaw - goal_yaw).abs() < 1e-3);
        assert!((camera.pitch - goal_pitch).abs() < 1e-3);
    }

    #[test]
    fn test_pitch_stays_off_the_poles() {
        let settings = OrbitSettings::default();
        let max_pitch = settings.max_pitch;
        let mut camera = OrbitCamera::new(settings);

        camera.rotate(0.0, 1e6);
        for _ in 0..1000 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.pitch <= max_pitch + 1e-6);

        camera.rotate(0.0, -1e7);
        for _ in 0..1000 {
            camera.update(1.0 / 60.0);
        }
        assert!(camera.pitch >= -max_pitch - 1e-6);
    }

    #[test]
    fn test_zoom_clamped_to_radius_range() {
        let settings = OrbitSettings::default();
        let (min_radius, max_radius) = (settings.min_radius, settings.max_radius);
        let mut camera = OrbitCamera::new(settings);

        for _ in 0..100 {
            camera.zoom(5.0); // zoom in hard
        }
        assert!(camera.goal_radius >= min_radius);

        for _ in 0..100 {
            camera.zoom(-5.0); // zoom out hard
        }
        assert!(camera.goal_radius <= max_radius);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = OrbitCamera::new(OrbitSettings::default());
        let config = RenderConfig::default();

        let (view_proj, eye) = camera.create_view_proj_matrix(16.0 / 9.0, &config);

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(eye.x.is_finite() && eye.y.is_finite() && eye.z.is_finite());
    }
}
