//! Interactive particle-life viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`World`] and implements
//! [`eframe::App`] to run it and show its pixel canvas through an egui UI,
//! and [`CanvasTexture`], the [`Display`] the world renders into.

use eframe::App;
use particle_life_core::{
    attraction::AttractionMatrix,
    color::Rgb,
    config::Friction,
    display::{Display, Framebuffer, PixelSink},
    world::World,
};

/// A [`Display`] backed by an in-memory framebuffer that is uploaded to an
/// egui texture after each presented frame.
///
/// Uploading is deferred to [`CanvasTexture::ensure_texture`] so the world
/// can render without access to the egui context.
pub struct CanvasTexture {
    frame: Framebuffer,
    texture: Option<egui::TextureHandle>,
    dirty: bool,
}

impl CanvasTexture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Framebuffer::new(width, height),
            texture: None,
            dirty: false,
        }
    }

    /// Uploads the last presented frame if it has not been uploaded yet.
    ///
    /// ### Returns
    /// The texture to paint, or `None` before the first frame is presented.
    fn ensure_texture(&mut self, ctx: &egui::Context) -> Option<egui::TextureId> {
        if self.dirty {
            let size = [self.frame.width() as usize, self.frame.height() as usize];
            let image = egui::ColorImage::from_rgb(size, &self.frame.to_rgb_bytes());
            match &mut self.texture {
                Some(handle) => handle.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("particles", image, egui::TextureOptions::NEAREST));
                }
            }
            self.dirty = false;
        }
        self.texture.as_ref().map(|t| t.id())
    }
}

impl PixelSink for CanvasTexture {
    fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    fn accumulate(&mut self, x: i32, y: i32, color: Rgb) {
        self.frame.accumulate(x, y, color);
    }
}

impl Display for CanvasTexture {
    fn clear(&mut self, color: Rgb) {
        self.frame.fill(color);
    }

    fn present(&mut self) {
        self.dirty = true;
    }
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions and the `R` shortcut.
/// 2. If `running`, advance the world by the wall-clock frame time
///    ([`World::frame`]); otherwise just redraw it.
/// 3. Upload the canvas and paint it, upscaled, into the central panel.
///
/// ### Fields
/// - `world` - The simulation being shown.
/// - `canvas` - Pixel canvas the world renders into.
///
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `step_dt` - Time step used by the "Step" button (seconds).
/// - `last_dt` - Time step of the last frame (for display only).
///
/// - `matrix_edit` - Attraction coefficients being edited in the side panel;
///   they only reach the world when applied.
/// - `error` - Last rejected edit, shown in the side panel.
pub struct Viewer {
    world: World,
    canvas: CanvasTexture,

    running: bool,
    step_dt: f32,
    last_dt: f32,

    matrix_edit: Vec<Vec<f32>>,
    error: Option<String>,
}

impl Viewer {
    /// Creates a paused viewer around `world` with a canvas of the
    /// configured size.
    pub fn new(world: World) -> Self {
        let cfg = world.config();
        let mut canvas = CanvasTexture::new(cfg.canvas_width, cfg.canvas_height);
        world.draw(&mut canvas);
        let matrix_edit = world.matrix().to_rows();

        Self {
            world,
            canvas,
            running: false,
            step_dt: 1.0 / 60.0,
            last_dt: 0.0,
            matrix_edit,
            error: None,
        }
    }

    /// Re-scatters the particles, keeping the matrix and config, and stops
    /// auto-running.
    fn reset(&mut self) {
        self.world.reset();
        self.world.draw(&mut self.canvas);
        self.running = false;
        self.last_dt = 0.0;
    }

    /// Advances the world by exactly `step_dt` and redraws.
    fn step_once(&mut self) {
        self.world.step(self.step_dt);
        self.world.draw(&mut self.canvas);
        self.last_dt = self.step_dt;
    }

    fn set_running(&mut self, running: bool) {
        if running && !self.running {
            // Do not count the paused interval as one long frame.
            self.world.restart_clock();
        }
        self.running = running;
    }

    /// Draws a new random attraction matrix and syncs the editor to it.
    fn randomize_matrix(&mut self) {
        self.world.randomize_matrix();
        self.matrix_edit = self.world.matrix().to_rows();
        self.error = None;
    }

    /// Replaces the world's matrix with the edited coefficients.
    fn apply_matrix_edit(&mut self) {
        let result = AttractionMatrix::from_rows(&self.matrix_edit)
            .and_then(|m| self.world.replace_matrix(m));
        self.error = result.err().map(|e| e.to_string());
    }

    /// Runs the simulation for this UI frame, or just redraws when paused.
    fn advance(&mut self, ctx: &egui::Context) {
        if self.running {
            let now_ms = (ctx.input(|i| i.time) * 1000.0) as u64;
            self.last_dt = self.world.frame(now_ms, &mut self.canvas);
            ctx.request_repaint();
        } else {
            self.world.draw(&mut self.canvas);
        }
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, reset, randomize).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.set_running(!self.running);
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_dt)
                        .prefix("step dt = ")
                        .range(0.001..=0.1)
                        .speed(0.001),
                );

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                if ui.button("🎲 Randomize (R)").clicked() {
                    self.randomize_matrix();
                }
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let stats = self.world.stats();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_dt));
                ui.separator();
                ui.label(format!("particles = {}", self.world.particles().len()));
                ui.label(format!("dropped = {}", stats.dropped));
                ui.label(format!("peak cell = {}", stats.peak_occupancy));
                let counts = self.world.particles().group_counts(self.world.config().group_count);
                for (group, count) in counts.iter().enumerate() {
                    let c = self.world.group_color(group);
                    ui.colored_label(egui::Color32::from_rgb(c.r, c.g, c.b), count.to_string());
                }
                ui.label(format!("mean neighbors = {:.1}", stats.mean_neighbors));
                ui.label(format!("frames = {}", stats.frames));
            });
        });
    }

    /// Builds the right-hand panel with physics tunables and the matrix editor.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Physics");

                let mut physics = *self.world.physics();
                Self::labeled_drag_f32(ui, "too_close:", &mut physics.too_close, 0.0..=0.95, 0.01);
                Self::labeled_drag_f32(
                    ui,
                    "force_factor:",
                    &mut physics.force_factor,
                    0.0..=100.0,
                    0.1,
                );

                ui.horizontal(|ui| {
                    ui.label("friction:");
                    if ui
                        .selectable_label(matches!(physics.friction, Friction::Factor(_)), "factor")
                        .clicked()
                    {
                        physics.friction = Friction::Factor(0.99);
                    }
                    if ui
                        .selectable_label(
                            matches!(physics.friction, Friction::HalfLife(_)),
                            "half-life",
                        )
                        .clicked()
                    {
                        physics.friction = Friction::HalfLife(0.04);
                    }
                });
                match &mut physics.friction {
                    Friction::Factor(f) => {
                        Self::labeled_drag_f32(ui, "per frame:", f, 0.01..=1.0, 0.001)
                    }
                    Friction::HalfLife(h) => {
                        Self::labeled_drag_f32(ui, "seconds:", h, 0.001..=2.0, 0.001)
                    }
                }

                if physics != *self.world.physics()
                    && let Err(e) = self.world.set_physics(physics)
                {
                    self.error = Some(e.to_string());
                }

                ui.separator();
                ui.heading("Attraction");
                ui.label("row = subject group, column = object group");

                egui::Grid::new("attraction_matrix").show(ui, |ui| {
                    for (subject, row) in self.matrix_edit.iter_mut().enumerate() {
                        let c = self.world.group_color(subject);
                        ui.colored_label(egui::Color32::from_rgb(c.r, c.g, c.b), "●");
                        for value in row.iter_mut() {
                            ui.add(egui::DragValue::new(value).range(-1.0..=1.0).speed(0.01));
                        }
                        ui.end_row();
                    }
                });

                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        self.apply_matrix_edit();
                    }
                    if ui.button("Revert").clicked() {
                        self.matrix_edit = self.world.matrix().to_rows();
                        self.error = None;
                    }
                });

                if let Some(err) = &self.error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Builds the central panel with the upscaled pixel canvas.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_gray(20)))
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let (w, h) = self.canvas.size();
                let scale = (available.width() / w as f32)
                    .min(available.height() / h as f32)
                    .max(1.0);
                let rect = egui::Rect::from_center_size(
                    available.center(),
                    egui::vec2(w as f32 * scale, h as f32 * scale),
                );

                if let Some(texture) = self.canvas.ensure_texture(ctx) {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter_at(available).image(texture, rect, uv, egui::Color32::WHITE);
                }
            });
    }
}

impl App for Viewer {
    /// eframe callback that advances the world and builds all UI panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            self.randomize_matrix();
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.advance(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_life_core::config::Config;

    fn led_viewer() -> Viewer {
        let cfg = Config {
            rng_seed: Some(11),
            ..Config::led_matrix()
        };
        Viewer::new(World::new(cfg).unwrap())
    }

    #[test]
    fn new_viewer_is_paused_with_a_drawn_canvas() {
        let viewer = led_viewer();
        assert!(!viewer.running);
        assert_eq!(viewer.canvas.size(), (64, 32));
        assert!(viewer.canvas.dirty);
        assert_eq!(viewer.matrix_edit, viewer.world.matrix().to_rows());
    }

    #[test]
    fn canvas_clear_fills_background_and_present_marks_dirty() {
        let mut canvas = CanvasTexture::new(4, 2);
        assert!(!canvas.dirty);

        canvas.clear(Rgb::new(0, 10, 60));
        canvas.accumulate(1, 1, Rgb::new(5, 5, 5));
        canvas.present();

        assert!(canvas.dirty);
        assert_eq!(canvas.frame.get(0, 0), Some(Rgb::new(0, 10, 60)));
        assert_eq!(canvas.frame.get(1, 1), Some(Rgb::new(5, 15, 65)));
    }

    #[test]
    fn step_once_advances_by_the_fixed_step() {
        let mut viewer = led_viewer();
        let before = viewer.world.particles().particles.clone();
        viewer.step_dt = 0.02;

        viewer.step_once();

        assert_eq!(viewer.world.stats().frames, 1);
        assert_eq!(viewer.last_dt, 0.02);
        assert_ne!(viewer.world.particles().particles, before);
    }

    #[test]
    fn reset_restores_basic_state() {
        let mut viewer = led_viewer();
        viewer.step_once();
        viewer.running = true;
        viewer.last_dt = 0.5;

        viewer.reset();

        assert_eq!(viewer.world.particles().len(), 12);
        assert_eq!(viewer.world.stats().frames, 0);
        assert!(!viewer.running);
        assert_eq!(viewer.last_dt, 0.0);
    }

    #[test]
    fn randomize_syncs_the_matrix_editor() {
        let mut viewer = led_viewer();
        viewer.matrix_edit[0][0] = 0.123;
        viewer.error = Some("stale".into());

        viewer.randomize_matrix();

        assert_eq!(viewer.matrix_edit, viewer.world.matrix().to_rows());
        assert!(viewer.error.is_none());
    }

    #[test]
    fn applied_matrix_edits_replace_the_world_matrix() {
        let mut viewer = led_viewer();
        viewer.matrix_edit = vec![vec![0.5, 0.0], vec![-0.25, 1.0]];

        viewer.apply_matrix_edit();

        assert!(viewer.error.is_none());
        assert_eq!(viewer.world.matrix().get(1, 0), -0.25);
        assert_eq!(viewer.world.matrix().get(0, 0), 0.5);
    }

    #[test]
    fn rejected_matrix_edits_leave_the_world_untouched() {
        let mut viewer = led_viewer();
        let before = viewer.world.matrix().clone();
        viewer.matrix_edit = vec![vec![0.5, 0.0]];

        viewer.apply_matrix_edit();

        assert!(viewer.error.is_some());
        assert_eq!(viewer.world.matrix(), &before);
    }
}
