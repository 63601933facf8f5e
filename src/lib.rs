//! Seascape library - shader-displaced water surface demo

pub mod camera;
pub mod cli;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod water;
