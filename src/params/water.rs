//! Water surface parameters: wave layers, colors, and mesh settings.

use anyhow::{bail, Context, Result};

/// Water mesh settings (fixed at startup, never uniforms)
#[derive(Debug, Clone)]
pub struct MeshSettings {
    /// Side length of the square surface (world units)
    pub size_units: f32,

    /// Subdivisions per side (512 = 263,169 vertices)
    pub resolution: usize,
}

impl Default for MeshSettings {
    fn default() -> Self {
        Self {
            size_units: 2.0,
            resolution: 512,
        }
    }
}

/// Live-tunable shader parameters for the water surface.
///
/// Every field maps to one uniform slot. Numeric fields carry no validation
/// beyond the ranges enforced by the panel widgets; the shader accepts
/// out-of-range values without error. Colors keep both the sRGB bytes the
/// panel edits and the derived linear form the shader consumes, so a color
/// write is visible on the next uniform build.
#[derive(Debug, Clone)]
pub struct WaterParams {
    /// Large-scale wave height (world units), panel range 0..=1
    pub big_wave_amplitude: f32,

    /// Large-scale spatial frequency along X and Z, panel range 0..=10 each
    pub big_wave_frequency: [f32; 2],

    /// Large-scale phase speed (radians per second), panel range 0..=4
    pub big_wave_speed: f32,

    /// Small-scale wave height (world units), panel range 0..=1
    pub small_wave_amplitude: f32,

    /// Small-scale base spatial frequency, panel range 0..=30
    pub small_wave_frequency: f32,

    /// Small-scale phase speed (radians per second), panel range 0..=4
    pub small_wave_speed: f32,

    /// Number of small-wave octaves, 0..=5. Zero disables the layer entirely.
    pub small_wave_iterations: u32,

    /// Color interpolation offset applied to elevation, panel range 0..=1
    pub color_offset: f32,

    /// Color interpolation multiplier, panel range 0..=5
    pub color_multiplier: f32,

    depth_color_srgb: [u8; 3],
    depth_color_linear: [f32; 3],
    surface_color_srgb: [u8; 3],
    surface_color_linear: [f32; 3],
}

impl Default for WaterParams {
    fn default() -> Self {
        let depth = parse_hex_color("#186691").unwrap();
        let surface = parse_hex_color("#9bd8ff").unwrap();
        Self {
            big_wave_amplitude: 0.25,
            big_wave_frequency: [4.0, 1.5],
            big_wave_speed: 0.75,
            small_wave_amplitude: 0.15,
            small_wave_frequency: 3.0,
            small_wave_speed: 0.2,
            small_wave_iterations: 4,
            color_offset: 0.08,
            color_multiplier: 3.5,
            depth_color_srgb: depth,
            depth_color_linear: srgb_to_linear(depth),
            surface_color_srgb: surface,
            surface_color_linear: srgb_to_linear(surface),
        }
    }
}

impl WaterParams {
    /// Depth color as sRGB bytes (panel-facing representation)
    pub fn depth_color_srgb(&self) -> [u8; 3] {
        self.depth_color_srgb
    }

    /// Surface color as sRGB bytes (panel-facing representation)
    pub fn surface_color_srgb(&self) -> [u8; 3] {
        self.surface_color_srgb
    }

    /// Depth color in linear RGB (shader-facing representation)
    pub fn depth_color_linear(&self) -> [f32; 3] {
        self.depth_color_linear
    }

    /// Surface color in linear RGB (shader-facing representation)
    pub fn surface_color_linear(&self) -> [f32; 3] {
        self.surface_color_linear
    }

    /// Set the depth color from sRGB bytes, re-deriving the linear form
    pub fn set_depth_color_srgb(&mut self, rgb: [u8; 3]) {
        self.depth_color_srgb = rgb;
        self.depth_color_linear = srgb_to_linear(rgb);
    }

    /// Set the surface color from sRGB bytes, re-deriving the linear form
    pub fn set_surface_color_srgb(&mut self, rgb: [u8; 3]) {
        self.surface_color_srgb = rgb;
        self.surface_color_linear = srgb_to_linear(rgb);
    }

    /// Set the depth color from a `#rrggbb` string.
    ///
    /// Invalid input is an error and leaves the current color untouched.
    pub fn set_depth_color_hex(&mut self, hex: &str) -> Result<()> {
        self.set_depth_color_srgb(parse_hex_color(hex)?);
        Ok(())
    }

    /// Set the surface color from a `#rrggbb` string.
    pub fn set_surface_color_hex(&mut self, hex: &str) -> Result<()> {
        self.set_surface_color_srgb(parse_hex_color(hex)?);
        Ok(())
    }
}

/// Parse a `#rrggbb` or `rrggbb` hex color into sRGB bytes
pub fn parse_hex_color(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        bail!("expected 6 hex digits in color '{hex}'");
    }
    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .with_context(|| format!("invalid hex color '{hex}'"))?;
    }
    Ok(rgb)
}

/// Convert sRGB bytes to linear RGB (the surface format is sRGB, so the
/// shader works in linear space)
pub fn srgb_to_linear(rgb: [u8; 3]) -> [f32; 3] {
    let channel = |c: u8| {
        let c = c as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(rgb[0]), channel(rgb[1]), channel(rgb[2])]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#186691").unwrap(), [0x18, 0x66, 0x91]);
        assert_eq!(parse_hex_color("9bd8ff").unwrap(), [0x9b, 0xd8, 0xff]);
        assert_eq!(parse_hex_color("#ffffff").unwrap(), [255, 255, 255]);
    }

    #[test]
    fn test_parse_hex_color_rejects_garbage() {
        assert!(parse_hex_color("#18669").is_err()); // too short
        assert!(parse_hex_color("#18669g").is_err()); // not hex
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear([0, 0, 0]), [0.0, 0.0, 0.0]);
        let white = srgb_to_linear([255, 255, 255]);
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_srgb_to_linear_monotonic() {
        let mut last = -1.0;
        for b in [0u8, 16, 64, 128, 200, 255] {
            let [r, _, _] = srgb_to_linear([b, 0, 0]);
            assert!(r > last, "linear value not increasing at byte {b}");
            last = r;
        }
    }

    #[test]
    fn test_color_set_rederives_linear() {
        let mut params = WaterParams::default();
        let before = params.depth_color_linear();
        params.set_depth_color_hex("#ff0000").unwrap();
        assert_eq!(params.depth_color_srgb(), [255, 0, 0]);
        assert_ne!(params.depth_color_linear(), before);
        assert!((params.depth_color_linear()[0] - 1.0).abs() < 1e-6);
        assert_eq!(params.depth_color_linear()[1], 0.0);
    }

    #[test]
    fn test_invalid_hex_leaves_color_untouched() {
        let mut params = WaterParams::default();
        let before_srgb = params.surface_color_srgb();
        let before_linear = params.surface_color_linear();
        assert!(params.set_surface_color_hex("nonsense").is_err());
        assert_eq!(params.surface_color_srgb(), before_srgb);
        assert_eq!(params.surface_color_linear(), before_linear);
    }
}
