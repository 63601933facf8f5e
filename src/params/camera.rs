//! Orbit camera configuration.

/// Orbit camera settings: initial pose, input sensitivity, damping
#[derive(Debug, Clone)]
pub struct OrbitSettings {
    /// Initial eye position (world units)
    pub initial_position: [f32; 3],

    /// Orbit center (world units)
    pub target: [f32; 3],

    /// Damping rate (per second); higher = snappier response to input
    pub damping_per_s: f32,

    /// Yaw/pitch radians per pixel of mouse drag
    pub rotate_speed: f32,

    /// Radius change fraction per scroll line
    pub zoom_speed: f32,

    /// Radius clamp (world units)
    pub min_radius: f32,
    pub max_radius: f32,

    /// Pitch clamp (radians), keeps the eye off the poles
    pub max_pitch: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            initial_position: [1.0, 1.0, 1.0],
            target: [0.0, 0.0, 0.0],
            damping_per_s: 6.0,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_radius: 0.3,
            max_radius: 20.0,
            max_pitch: std::f32::consts::FRAC_PI_2 - 0.01,
        }
    }
}
