//! Rendering system with wgpu pipeline and shader management.

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::params::{RenderConfig, WaterParams};
use crate::water::{Vertex, WaterGrid};

/// Uniform buffer for the water shader. Layout mirrors the `WaterUniforms`
/// struct in `water.wgsl`; the trailing padding keeps the size a multiple
/// of 16 bytes as uniform buffers require.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    pub big_wave_frequency: [f32; 2],
    pub big_wave_amplitude: f32,
    pub big_wave_speed: f32,
    pub small_wave_amplitude: f32,
    pub small_wave_frequency: f32,
    pub small_wave_speed: f32,
    pub small_wave_iterations: u32,
    pub color_offset: f32,
    pub color_multiplier: f32,
    pub time: f32,
    pub _padding: f32,
}

impl WaterUniforms {
    /// Assemble the full uniform set for one frame from the live parameters
    pub fn new(view_proj: Mat4, time_s: f32, params: &WaterParams) -> Self {
        let [dr, dg, db] = params.depth_color_linear();
        let [sr, sg, sb] = params.surface_color_linear();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            depth_color: [dr, dg, db, 1.0],
            surface_color: [sr, sg, sb, 1.0],
            big_wave_frequency: params.big_wave_frequency,
            big_wave_amplitude: params.big_wave_amplitude,
            big_wave_speed: params.big_wave_speed,
            small_wave_amplitude: params.small_wave_amplitude,
            small_wave_frequency: params.small_wave_frequency,
            small_wave_speed: params.small_wave_speed,
            small_wave_iterations: params.small_wave_iterations,
            color_offset: params.color_offset,
            color_multiplier: params.color_multiplier,
            time: time_s,
            _padding: 0.0,
        }
    }
}

/// Rendering system managing wgpu device, pipeline, and buffers
pub struct RenderSystem {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    index_count: u32,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: std::sync::Arc<winit::window::Window>,
        grid: &WaterGrid,
        render_config: &RenderConfig,
    ) -> Result<Self> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find suitable GPU adapter")?;

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("failed to request device")?;

        // Configure surface at the capped pixel ratio
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let (width, height) = render_config.surface_size(size.width, size.height, scale_factor);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width,
            height,
            "GPU initialized"
        );

        // Load shader
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("water.wgsl").into()),
        });

        // Create buffers; the mesh is static so only the uniforms need COPY_DST
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&grid.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&grid.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniforms = WaterUniforms::new(Mat4::IDENTITY, 0.0, &WaterParams::default());
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Create bind group
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Water Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Water Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Create render pipeline
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Water Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Water Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // No culling: the orbit camera may look at the surface from below
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            uniform_buffer,
            uniform_bind_group,
            index_count: grid.indices.len() as u32,
        })
    }

    /// Surface texture format (needed by the egui renderer)
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current surface size in pixels
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Resize the surface for a new physical window size, capping the
    /// pixel ratio per the render config
    pub fn resize(
        &mut self,
        new_size: PhysicalSize<u32>,
        scale_factor: f64,
        render_config: &RenderConfig,
    ) {
        let (width, height) =
            render_config.surface_size(new_size.width, new_size.height, scale_factor);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        tracing::debug!(width, height, "surface resized");
    }

    /// Reconfigure the surface with the current settings (after Lost/Outdated)
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Update water uniforms for this frame
    pub fn update_uniforms(&self, uniforms: &WaterUniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Record and submit the water pass into the given surface view
    pub fn render_water(&self, view: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Water Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Water Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_struct_is_16_byte_aligned() {
        // Uniform buffers require sizes in multiples of 16; a mismatch here
        // means the WGSL struct no longer lines up either.
        assert_eq!(std::mem::size_of::<WaterUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<WaterUniforms>(), 144);
    }

    #[test]
    fn test_uniforms_carry_linear_colors() {
        let mut params = WaterParams::default();
        params.set_depth_color_hex("#000000").unwrap();
        params.set_surface_color_hex("#ffffff").unwrap();

        let uniforms = WaterUniforms::new(Mat4::IDENTITY, 1.0, &params);
        assert_eq!(uniforms.depth_color, [0.0, 0.0, 0.0, 1.0]);
        for c in &uniforms.surface_color[..3] {
            assert!((c - 1.0).abs() < 1e-6);
        }
        assert_eq!(uniforms.time, 1.0);
    }

    #[test]
    fn test_uniforms_reflect_params_every_build() {
        // The uniform set is rebuilt whole each frame, so a panel edit is
        // visible on the very next build with no stale intermediate.
        let mut params = WaterParams::default();
        params.big_wave_amplitude = 0.9;
        params.small_wave_iterations = 0;

        let uniforms = WaterUniforms::new(Mat4::IDENTITY, 0.0, &params);
        assert_eq!(uniforms.big_wave_amplitude, 0.9);
        assert_eq!(uniforms.small_wave_iterations, 0);
    }
}
