//! Seascape - a shader-displaced water surface with a live parameter panel
//!
//! The mesh is a flat grid uploaded once; every wave lives in the vertex
//! shader, driven by a uniform set the panel edits at runtime.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use seascape::camera::OrbitCamera;
use seascape::cli::Args;
use seascape::panel::DebugPanel;
use seascape::params::{OrbitSettings, RenderConfig, WaterParams};
use seascape::rendering::{RenderSystem, WaterUniforms};
use seascape::water::WaterGrid;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Panel overlay
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    panel: DebugPanel,

    // Scene state
    params: WaterParams,
    grid: WaterGrid,
    camera: OrbitCamera,
    render_config: RenderConfig,

    // Input state
    dragging: bool,

    // Time tracking
    start_time: Instant,
    last_frame: Instant,
}

impl App {
    fn new(args: &Args) -> Result<Self> {
        let params = args.water_params()?;
        let grid = WaterGrid::new(&args.mesh_settings());
        let camera = OrbitCamera::new(OrbitSettings::default());
        let render_config = args.render_config();

        Ok(Self {
            window: None,
            render_system: None,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_renderer: None,
            panel: DebugPanel::default(),
            params,
            grid,
            camera,
            render_config,
            dragging: false,
            start_time: Instant::now(),
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Seascape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("create window"),
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.grid,
            &self.render_config,
        ))
        .expect("initialize rendering");

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &render_system.device,
            render_system.surface_format(),
            None,
            1,
            false,
        );

        self.start_time = Instant::now();
        self.last_frame = Instant::now();
        self.window = Some(window);
        self.render_system = Some(render_system);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Give the panel first refusal on input
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => {
                if let (Some(render_system), Some(window)) = (&mut self.render_system, &self.window)
                {
                    render_system.resize(new_size, window.scale_factor(), &self.render_config);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => match key {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::F1 => self.panel.toggle(),
                _ => {}
            },
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.dragging {
                self.camera.rotate(delta.0 as f32, delta.1 as f32);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let (Some(render_system), Some(window)) = (&self.render_system, &self.window) else {
            return;
        };

        let now = Instant::now();
        let dt_s = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        let time_s = self.start_time.elapsed().as_secs_f32();

        // Advance camera damping
        self.camera.update(dt_s);

        // Build this frame's uniforms from the live parameter set
        let size = window.inner_size();
        let aspect = RenderConfig::aspect_ratio(size.width, size.height);
        let (view_proj, _eye) = self
            .camera
            .create_view_proj_matrix(aspect, &self.render_config);
        render_system.update_uniforms(&WaterUniforms::new(view_proj, time_s, &self.params));

        // Acquire the frame
        let output = match render_system.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Water pass
        render_system.render_water(&view);

        // Panel pass
        self.draw_panel(&view);

        output.present();
    }

    /// Run egui for this frame and composite the panel over the water
    fn draw_panel(&mut self, view: &wgpu::TextureView) {
        let (Some(render_system), Some(window), Some(egui_winit), Some(egui_renderer)) = (
            &self.render_system,
            &self.window,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        ) else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();
        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.panel.ui(ctx, &mut self.params, time_s);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let (width, height) = render_system.surface_size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let device = &render_system.device;
        let queue = &render_system.queue;

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Panel Encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Panel Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        queue.submit(std::iter::once(encoder.finish()));

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("seascape starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&args)?;
    event_loop.run_app(&mut app)?;

    Ok(())
}
