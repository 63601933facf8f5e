//! Rendering and viewport configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Initial window width (logical pixels)
    pub window_width: u32,

    /// Initial window height (logical pixels)
    pub window_height: u32,

    /// Field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Upper bound on the device pixel ratio, bounds GPU cost on HiDPI
    /// monitors
    pub max_pixel_ratio: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl RenderConfig {
    /// Camera aspect ratio for a physical window size
    pub fn aspect_ratio(width: u32, height: u32) -> f32 {
        width as f32 / height.max(1) as f32
    }

    /// Effective pixel ratio for a monitor scale factor
    pub fn pixel_ratio(&self, scale_factor: f64) -> f64 {
        scale_factor.min(self.max_pixel_ratio)
    }

    /// Surface pixel size for a physical window size and monitor scale
    /// factor: the logical size rendered at the capped pixel ratio.
    pub fn surface_size(
        &self,
        physical_width: u32,
        physical_height: u32,
        scale_factor: f64,
    ) -> (u32, u32) {
        let ratio = self.pixel_ratio(scale_factor) / scale_factor.max(f64::MIN_POSITIVE);
        let width = (physical_width as f64 * ratio).round() as u32;
        let height = (physical_height as f64 * ratio).round() as u32;
        (width.max(1), height.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_exact() {
        assert_eq!(RenderConfig::aspect_ratio(1280, 720), 1280.0 / 720.0);
        assert_eq!(RenderConfig::aspect_ratio(1920, 1080), 1920.0 / 1080.0);
        // Degenerate height must not divide by zero
        assert!(RenderConfig::aspect_ratio(100, 0).is_finite());
    }

    #[test]
    fn test_pixel_ratio_capped_at_two() {
        let config = RenderConfig::default();
        assert_eq!(config.pixel_ratio(1.0), 1.0);
        assert_eq!(config.pixel_ratio(1.5), 1.5);
        assert_eq!(config.pixel_ratio(2.0), 2.0);
        assert_eq!(config.pixel_ratio(3.0), 2.0);
    }

    #[test]
    fn test_surface_size_below_cap_is_physical() {
        let config = RenderConfig::default();
        assert_eq!(config.surface_size(1280, 720, 1.0), (1280, 720));
        assert_eq!(config.surface_size(2560, 1440, 2.0), (2560, 1440));
    }

    #[test]
    fn test_surface_size_above_cap_is_scaled_down() {
        let config = RenderConfig::default();
        // 3x monitor: render at 2x of the logical size, not 3x
        let (w, h) = config.surface_size(3840, 2160, 3.0);
        assert_eq!((w, h), (2560, 1440));
    }

    #[test]
    fn test_surface_size_never_zero() {
        let config = RenderConfig::default();
        let (w, h) = config.surface_size(0, 0, 1.0);
        assert!(w >= 1 && h >= 1);
    }
}
