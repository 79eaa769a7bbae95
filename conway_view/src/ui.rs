// ui.rs - egui front end for the viewer

use std::ops::RangeInclusive;

use eframe::egui;
use egui::{Color32, Rect, TextureHandle, TextureOptions, Vec2, pos2};
use universe::PATTERNS;

use crate::frames::RepaintFrames;
use crate::playback::TICKS_PER_FRAME_RANGE;
use crate::render::Palette;
use crate::view::LifeView;

/// Range offered by the speed slider, in ticks per frame.
pub const SPEED_SLIDER_RANGE: RangeInclusive<f64> = TICKS_PER_FRAME_RANGE;

fn speed_slider(ticks_per_frame: &mut f64) -> egui::Slider<'_> {
    egui::Slider::new(ticks_per_frame, SPEED_SLIDER_RANGE)
        .logarithmic(true)
        .text("ticks / frame")
}

/// Pending speed while the slider is being dragged.
///
/// A new speed resets the tick accumulator, so drag increments are held
/// back and only the value at release is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SpeedEdit {
    draft: Option<f64>,
}

impl SpeedEdit {
    fn shown(&self, committed: f64) -> f64 {
        self.draft.unwrap_or(committed)
    }

    /// Feed one frame of slider interaction; returns the speed to apply, if any.
    ///
    /// The first frame without a drag settles the edit: a held draft or a
    /// click/keyboard change is applied then.
    fn update(&mut self, value: f64, changed: bool, dragging: bool) -> Option<f64> {
        if dragging {
            if changed {
                self.draft = Some(value);
            }
            return None;
        }
        let settled = self.draft.take().is_some();
        (settled || changed).then_some(value)
    }
}

pub struct LifeApp {
    view: LifeView<RepaintFrames>,
    texture: Option<TextureHandle>,
    selected_pattern: usize,
    speed_edit: SpeedEdit,
}

impl LifeApp {
    pub fn new(view: LifeView<RepaintFrames>) -> Self {
        Self {
            view,
            texture: None,
            selected_pattern: 0,
            speed_edit: SpeedEdit::default(),
        }
    }

    /// Largest rect with the canvas's aspect ratio that fits in `available`.
    fn fit_canvas(&self, available: Vec2) -> Vec2 {
        let [w, h] = self.view.geometry().canvas_size();
        let canvas = Vec2::new(w as f32, h as f32);
        let scale = (available.x / canvas.x).min(available.y / canvas.y).max(0.01);
        canvas * scale
    }

    fn upload_canvas(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let dirty = self.view.take_dirty();
        let image = self.view.canvas().image();
        match &mut self.texture {
            Some(texture) => {
                if dirty {
                    texture.set(image.clone(), TextureOptions::NEAREST);
                }
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("life-canvas", image.clone(), TextureOptions::NEAREST);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Frame callback first, so this repaint shows its result.
        self.view.frame();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let glyph = if self.view.is_running() { "⏸" } else { "▶" };
                if ui.button(glyph).clicked() {
                    self.view.play_pause();
                }

                if ui
                    .add_enabled(self.view.can_step_manually(), egui::Button::new("next step"))
                    .clicked()
                {
                    self.view.manual_step();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.view.clear();
                }

                if ui.button("🎲 Random").clicked() {
                    self.view.randomize();
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
                    self.view.apply_pattern(&PATTERNS[self.selected_pattern]);
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.view.generation()));
            });

            ui.separator();

            // Speed and colours
            ui.horizontal(|ui| {
                let mut ticks_per_frame = self.speed_edit.shown(self.view.ticks_per_frame());
                let response = ui.add(speed_slider(&mut ticks_per_frame));
                if let Some(speed) = self.speed_edit.update(
                    ticks_per_frame,
                    response.changed(),
                    response.dragged(),
                ) {
                    self.view.set_ticks_per_frame(speed);
                }

                ui.separator();

                let mut palette: Palette = self.view.palette();
                ui.label("Set:");
                ui.color_edit_button_srgba(&mut palette.set);
                ui.label("Unset:");
                ui.color_edit_button_srgba(&mut palette.unset);
                ui.label("Grid:");
                ui.color_edit_button_srgba(&mut palette.grid);
                self.view.set_palette(palette);
            });

            ui.separator();

            ui.label("Click a cell to toggle it. The slider sets how many generations run per displayed frame.");

            ui.separator();

            // Canvas, scaled to the space left below the stats row.
            let stats_height = ui.spacing().interact_size.y + ui.spacing().item_spacing.y * 2.0;
            let available = ui.available_size() - Vec2::new(0.0, stats_height);
            let size = self.fit_canvas(available);
            let texture_id = self.upload_canvas(ctx);

            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            ui.painter().image(
                texture_id,
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.view.click(pos, rect);
                }
            }

            ui.separator();

            // Statistics
            let live_cells = self.view.live_cells();
            let total_cells = self.view.total_cells();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!("Dead cells: {}", total_cells - live_cells));
                ui.label(format!(
                    "Population: {:.1}%",
                    live_cells as f32 / total_cells as f32 * 100.0
                ));
            });
        });

        // Input handlers above may have redrawn after the texture upload.
        if self.view.is_dirty() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameQueue;
    use crate::geometry::CanvasGeometry;
    use crate::playback::MAX_TICKS_PER_FRAME;
    use universe::Universe;

    fn queue_view(ticks_per_frame: f64) -> LifeView<FrameQueue> {
        let universe = Universe::new(8, 8).unwrap();
        let geometry = CanvasGeometry::new(8, 8, 5);
        LifeView::new(universe, FrameQueue::new(), geometry, Palette::standard(), ticks_per_frame)
    }

    #[test]
    fn drag_applies_once_on_release() {
        let mut edit = SpeedEdit::default();
        assert_eq!(edit.update(2.0, true, true), None);
        assert_eq!(edit.update(3.0, true, true), None);
        assert_eq!(edit.update(3.0, false, true), None);
        assert_eq!(edit.shown(1.0), 3.0);

        // Release frame: no longer dragging, value unchanged.
        assert_eq!(edit.update(3.0, false, false), Some(3.0));
        assert_eq!(edit.shown(1.0), 1.0);
        assert_eq!(edit.update(1.0, false, false), None);
    }

    #[test]
    fn click_applies_immediately() {
        let mut edit = SpeedEdit::default();
        assert_eq!(edit.update(0.5, true, false), Some(0.5));
        assert_eq!(edit.update(0.5, false, false), None);
    }

    #[test]
    fn dragging_keeps_owed_ticks() {
        let mut view = queue_view(0.5);
        view.play();
        view.frame();
        assert_eq!(view.controller().accumulator().owed(), 0.5);

        let mut edit = SpeedEdit::default();
        for value in [0.6, 0.7, 0.8] {
            if let Some(speed) = edit.update(value, true, true) {
                view.set_ticks_per_frame(speed);
            }
        }
        assert_eq!(view.ticks_per_frame(), 0.5);
        assert_eq!(view.controller().accumulator().owed(), 0.5);

        if let Some(speed) = edit.update(0.8, false, false) {
            view.set_ticks_per_frame(speed);
        }
        assert_eq!(view.ticks_per_frame(), 0.8);
        assert_eq!(view.controller().accumulator().owed(), 0.0);
    }

    #[test]
    fn slider_reaches_the_fastest_accepted_speed() {
        let mut view = queue_view(100.0);
        view.play();
        assert_eq!(view.frame(), crate::playback::FrameOutcome::Stepped(100));
        assert!(SPEED_SLIDER_RANGE.contains(&view.ticks_per_frame()));
        assert_eq!(*SPEED_SLIDER_RANGE.end(), MAX_TICKS_PER_FRAME);

        let ctx = egui::Context::default();
        let mut speed = MAX_TICKS_PER_FRAME;
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let response = ui.add(speed_slider(&mut speed));
                    assert!(!response.changed());
                });
            });
        }
        assert_eq!(speed, MAX_TICKS_PER_FRAME);
    }
}
