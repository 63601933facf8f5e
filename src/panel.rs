//! Debug panel: egui controls bound to the water parameters.
//!
//! Every widget writes through a typed field or setter on `WaterParams`;
//! edits land before the next frame's uniform build.

use crate::params::WaterParams;
use crate::water::surface;

/// Slider ranges for the panel widgets (the shader itself accepts anything)
mod ranges {
    use std::ops::RangeInclusive;

    pub const BIG_AMPLITUDE: RangeInclusive<f32> = 0.0..=1.0;
    pub const BIG_FREQUENCY: RangeInclusive<f32> = 0.0..=10.0;
    pub const BIG_SPEED: RangeInclusive<f32> = 0.0..=4.0;
    pub const SMALL_AMPLITUDE: RangeInclusive<f32> = 0.0..=1.0;
    pub const SMALL_FREQUENCY: RangeInclusive<f32> = 0.0..=30.0;
    pub const SMALL_SPEED: RangeInclusive<f32> = 0.0..=4.0;
    pub const SMALL_ITERATIONS: RangeInclusive<u32> = 0..=5;
    pub const COLOR_OFFSET: RangeInclusive<f32> = 0.0..=1.0;
    pub const COLOR_MULTIPLIER: RangeInclusive<f32> = 0.0..=5.0;
}

/// Live-tuning panel state
pub struct DebugPanel {
    pub open: bool,
}

impl Default for DebugPanel {
    fn default() -> Self {
        Self { open: true }
    }
}

impl DebugPanel {
    /// Toggle panel visibility (bound to F1 in the app)
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Draw the panel and apply edits to the parameter set
    pub fn ui(&mut self, ctx: &egui::Context, params: &mut WaterParams, time_s: f32) {
        if !self.open {
            return;
        }

        egui::SidePanel::left("water_panel")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.heading("Water");
                ui.separator();

                ui.label("Big waves");
                ui.add(
                    egui::Slider::new(&mut params.big_wave_amplitude, ranges::BIG_AMPLITUDE)
                        .text("amplitude"),
                );
                ui.add(
                    egui::Slider::new(&mut params.big_wave_frequency[0], ranges::BIG_FREQUENCY)
                        .text("frequency X"),
                );
                ui.add(
                    egui::Slider::new(&mut params.big_wave_frequency[1], ranges::BIG_FREQUENCY)
                        .text("frequency Z"),
                );
                ui.add(egui::Slider::new(&mut params.big_wave_speed, ranges::BIG_SPEED).text("speed"));

                ui.separator();
                ui.label("Small waves");
                ui.add(
                    egui::Slider::new(&mut params.small_wave_amplitude, ranges::SMALL_AMPLITUDE)
                        .text("amplitude"),
                );
                ui.add(
                    egui::Slider::new(&mut params.small_wave_frequency, ranges::SMALL_FREQUENCY)
                        .text("frequency"),
                );
                ui.add(
                    egui::Slider::new(&mut params.small_wave_speed, ranges::SMALL_SPEED)
                        .text("speed"),
                );
                ui.add(
                    egui::Slider::new(&mut params.small_wave_iterations, ranges::SMALL_ITERATIONS)
                        .text("iterations"),
                );

                ui.separator();
                ui.label("Color");

                let mut depth = params.depth_color_srgb();
                if ui.color_edit_button_srgb(&mut depth).changed() {
                    params.set_depth_color_srgb(depth);
                }
                ui.label("depth");

                let mut surface_color = params.surface_color_srgb();
                if ui.color_edit_button_srgb(&mut surface_color).changed() {
                    params.set_surface_color_srgb(surface_color);
                }
                ui.label("surface");

                ui.add(
                    egui::Slider::new(&mut params.color_offset, ranges::COLOR_OFFSET)
                        .text("offset"),
                );
                ui.add(
                    egui::Slider::new(&mut params.color_multiplier, ranges::COLOR_MULTIPLIER)
                        .text("multiplier"),
                );

                ui.separator();
                ui.label(format!(
                    "elevation @ origin: {:.3}",
                    surface::elevation(0.0, 0.0, time_s, params)
                ));
                ui.small("F1: toggle panel | drag: orbit | scroll: zoom");
            });
    }
}
