//! Command-line argument parsing.

use anyhow::Result;
use clap::Parser;

use crate::params::{MeshSettings, RenderConfig, WaterParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "seascape")]
#[command(about = "Shader-displaced water surface demo", long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Window width (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (logical pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Grid subdivisions per side
    #[arg(long, value_name = "SUBDIVISIONS", default_value_t = 512)]
    pub resolution: usize,

    /// Depth color as #rrggbb
    #[arg(long, value_name = "HEX")]
    pub depth_color: Option<String>,

    /// Surface color as #rrggbb
    #[arg(long, value_name = "HEX")]
    pub surface_color: Option<String>,
}

impl Args {
    /// Build the water parameter set, applying any color overrides
    pub fn water_params(&self) -> Result<WaterParams> {
        let mut params = WaterParams::default();
        if let Some(hex) = &self.depth_color {
            params.set_depth_color_hex(hex)?;
        }
        if let Some(hex) = &self.surface_color {
            params.set_surface_color_hex(hex)?;
        }
        Ok(params)
    }

    /// Build the mesh settings
    pub fn mesh_settings(&self) -> MeshSettings {
        MeshSettings {
            resolution: self.resolution,
            ..MeshSettings::default()
        }
    }

    /// Build the render configuration
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            ..RenderConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_overrides_applied() {
        let args = Args::parse_from([
            "seascape",
            "--depth-color",
            "#000000",
            "--surface-color",
            "ff0000",
        ]);
        let params = args.water_params().unwrap();
        assert_eq!(params.depth_color_srgb(), [0, 0, 0]);
        assert_eq!(params.surface_color_srgb(), [255, 0, 0]);
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let args = Args::parse_from(["seascape", "--depth-color", "blue"]);
        assert!(args.water_params().is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["seascape"]);
        assert_eq!(args.mesh_settings().resolution, 512);
        let config = args.render_config();
        assert_eq!((config.window_width, config.window_height), (1280, 720));
    }
}
