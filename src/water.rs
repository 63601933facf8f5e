//! Water surface: static mesh and CPU mirrors of the shader wave math.

pub mod mesh;
pub mod surface;

pub use mesh::{Vertex, WaterGrid};
