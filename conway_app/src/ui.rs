// ui.rs - egui front end: controls, board painting and click-to-toggle

use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use tracing::debug;

use conway::{Cell, PATTERNS, Simulation};

const CELL_PX: f32 = 12.0;
const SPACING: f32 = 0.5;
const RANDOM_DENSITY: f64 = 0.33;

pub struct LifeApp {
    sim: Simulation,
    grid_size: usize,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
}

impl LifeApp {
    pub fn new(sim: Simulation) -> Self {
        // Board dimensions are fixed for the lifetime of the simulation
        let grid_size = sim.view(|s| s.size());
        Self {
            sim,
            grid_size,
            live_color: Color32::WHITE,
            dead_color: Color32::from_rgb(28, 28, 28),
            selected_pattern: 0,
        }
    }

    /// Inner window size that fits the whole board plus the control rows.
    pub fn window_size(&self) -> [f32; 2] {
        let board = (CELL_PX + SPACING) * self.grid_size as f32;
        [board.max(640.0) + 40.0, board + 170.0]
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let (running, generation) = self.sim.view(|s| (s.is_running(), s.generation()));

        let label = match (running, generation) {
            (true, _) => "⏸ Pause",
            (false, 0) => "▶ Start",
            (false, _) => "▶ Resume",
        };
        if ui.button(label).clicked() {
            self.sim.toggle_running();
        }

        if ui.button("⏹ Reset").clicked() {
            self.sim.reset();
        }

        if ui.button("🎲 Random").clicked() {
            self.sim.set_running(false);
            if let Err(err) = self.sim.randomize(rand::random(), RANDOM_DENSITY) {
                debug!(%err, "random fill skipped");
            }
        }

        ui.separator();

        // Pattern dropdown
        ui.label("Pattern:");
        egui::ComboBox::from_id_source("pattern_selector")
            .selected_text(PATTERNS[self.selected_pattern].name)
            .show_ui(ui, |ui| {
                for (i, pattern) in PATTERNS.iter().enumerate() {
                    ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                }
            });

        if ui.button("Apply Pattern").clicked() {
            self.sim.set_running(false);
            if let Err(err) = self.sim.apply_pattern(&PATTERNS[self.selected_pattern]) {
                debug!(%err, "pattern skipped");
            }
        }

        ui.separator();

        ui.label(egui::RichText::new(format!("GEN {generation}")).strong().size(20.0));
    }

    fn board(&self, ui: &mut egui::Ui) {
        let pitch = CELL_PX + SPACING;
        let total = Vec2::splat(pitch * self.grid_size as f32 - SPACING);
        let (response, painter) = ui.allocate_painter(total, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, Color32::BLACK);

        // One read lock for the whole pass: every cell comes from the same
        // committed generation.
        self.sim.view(|s| {
            for y in 0..self.grid_size {
                for x in 0..self.grid_size {
                    let rect = Rect::from_min_size(
                        origin + Vec2::new(x as f32 * pitch, y as f32 * pitch),
                        Vec2::splat(CELL_PX),
                    );
                    let color = match s.get(x, y) {
                        Ok(Cell::Alive) => self.live_color,
                        _ => self.dead_color,
                    };
                    painter.rect_filled(rect, 1.0, color);
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        });

        // Edits go through the handle, which refuses them while running.
        if response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
            && let Some((x, y)) = cell_at(pos, origin, pitch, self.grid_size)
            && let Err(err) = self.sim.toggle_cell(x, y)
        {
            debug!(x, y, %err, "click ignored");
        }
    }

    fn statistics(&self, ui: &mut egui::Ui) {
        let live = self.sim.view(|s| s.board().population());
        let total = self.grid_size * self.grid_size;

        ui.horizontal(|ui| {
            ui.label(format!("Live cells: {live}"));
            ui.label(format!("Dead cells: {}", total - live));
            ui.label(format!("Population: {:.1}%", live as f32 / total as f32 * 100.0));
        });
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            ui.horizontal(|ui| self.controls(ui));

            ui.horizontal(|ui| {
                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
                ui.separator();
                ui.label("Click cells to toggle them while paused.");
            });

            ui.separator();
            self.board(ui);
            ui.separator();
            self.statistics(ui);
        });
    }
}

/// Maps a pointer position to the cell under it. Points left of or above the
/// board, or past its far edges, map to nothing.
pub fn cell_at(pointer: Pos2, origin: Pos2, pitch: f32, grid_size: usize) -> Option<(usize, usize)> {
    let rel = pointer - origin;
    if rel.x < 0.0 || rel.y < 0.0 || pitch <= 0.0 {
        return None;
    }
    let (x, y) = ((rel.x / pitch) as usize, (rel.y / pitch) as usize);
    (x < grid_size && y < grid_size).then_some((x, y))
}
