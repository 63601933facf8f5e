//! Flat subdivided water grid.
//!
//! The grid is built once and never mutated; all displacement happens in the
//! vertex shader, so the vertex buffer stays static for the whole session.

use bytemuck::{Pod, Zeroable};

use crate::params::MeshSettings;

/// Vertex data for the water mesh (position + UV coordinates)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Fixed-topology water grid: a `size × size` square in the XZ plane,
/// centered at the origin, at rest height y = 0
pub struct WaterGrid {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl WaterGrid {
    /// Create a new water grid with the specified settings
    pub fn new(settings: &MeshSettings) -> Self {
        let resolution = settings.resolution;
        let spacing = settings.size_units / resolution as f32;
        let half_size = settings.size_units / 2.0;

        let mut vertices = Vec::with_capacity((resolution + 1).pow(2));
        let mut indices = Vec::with_capacity(resolution.pow(2) * 6);

        // Generate flat XZ plane grid
        for z in 0..=resolution {
            for x in 0..=resolution {
                let x_pos = x as f32 * spacing - half_size;
                let z_pos = z as f32 * spacing - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                    uv: [x as f32 / resolution as f32, z as f32 / resolution as f32],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for z in 0..resolution {
            for x in 0..resolution {
                let top_left = (z * (resolution + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (resolution + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self { vertices, indices }
    }
}
