//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (world units, seconds, pixels)
//! - Documented ranges and meanings
//! - Type safety where possible

mod camera;
mod render;
mod water;

// Re-export all types
pub use camera::OrbitSettings;
pub use render::RenderConfig;
pub use water::{MeshSettings, WaterParams};
