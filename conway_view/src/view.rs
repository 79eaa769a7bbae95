// view.rs - Viewer state: universe, playback and the rendered canvas

use egui::{Pos2, Rect};
use tracing::{debug, info};
use universe::{Pattern, Seed, Universe};

use crate::coords::{CellCoord, cell_at};
use crate::engine::Engine;
use crate::frames::FrameScheduler;
use crate::geometry::CanvasGeometry;
use crate::playback::{FrameOutcome, PlaybackController};
use crate::render::{GridRenderer, Palette, PixelCanvas};

/// Everything the window shows, independent of egui widgets.
///
/// Each state-changing action redraws the canvas once and marks it dirty;
/// the UI uploads a dirty canvas and clears the flag with [`LifeView::take_dirty`].
pub struct LifeView<S> {
    universe: Universe,
    controller: PlaybackController<S>,
    renderer: GridRenderer,
    canvas: PixelCanvas,
    dirty: bool,
    stop_on_cycle: bool,
}

impl<S: FrameScheduler> LifeView<S> {
    pub fn new(
        universe: Universe,
        scheduler: S,
        geometry: CanvasGeometry,
        palette: Palette,
        ticks_per_frame: f64,
    ) -> Self {
        debug_assert_eq!(
            (geometry.width, geometry.height),
            (universe.width(), universe.height()),
            "canvas geometry must match the universe"
        );
        let mut view = Self {
            universe,
            controller: PlaybackController::new(scheduler, ticks_per_frame),
            renderer: GridRenderer::new(geometry, palette),
            canvas: PixelCanvas::new(&geometry, palette.grid),
            dirty: false,
            stop_on_cycle: false,
        };
        view.redraw();
        view
    }

    pub fn with_stop_on_cycle(mut self, stop_on_cycle: bool) -> Self {
        self.stop_on_cycle = stop_on_cycle;
        self
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn controller(&self) -> &PlaybackController<S> {
        &self.controller
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        self.renderer.geometry()
    }

    pub fn palette(&self) -> Palette {
        self.renderer.palette()
    }

    pub fn is_running(&self) -> bool {
        self.controller.is_running()
    }

    /// The manual step trigger is only live while paused.
    pub fn can_step_manually(&self) -> bool {
        !self.controller.is_running()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// True once after every redraw.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Repaint gridlines and cells from the universe's current buffer.
    pub fn redraw(&mut self) {
        self.renderer.draw(&mut self.canvas, &self.universe);
        self.dirty = true;
    }

    /// Toggle the cell under `pointer`, given where the canvas is shown on screen.
    pub fn click(&mut self, pointer: Pos2, viewport: Rect) -> CellCoord {
        let cell = cell_at(pointer, viewport, self.renderer.geometry());
        Engine::toggle(&mut self.universe, cell.row, cell.col);
        debug!(row = cell.row, col = cell.col, "cell toggled");
        self.redraw();
        cell
    }

    /// One generation, then redraw. Ignored while playing.
    pub fn manual_step(&mut self) -> bool {
        let stepped = self.controller.step_once(&mut self.universe);
        if stepped {
            self.redraw();
        }
        stepped
    }

    pub fn play(&mut self) -> bool {
        self.controller.play()
    }

    pub fn pause(&mut self) -> bool {
        self.controller.pause()
    }

    pub fn play_pause(&mut self) {
        self.controller.toggle();
    }

    pub fn ticks_per_frame(&self) -> f64 {
        self.controller.ticks_per_frame()
    }

    pub fn set_ticks_per_frame(&mut self, ticks_per_frame: f64) {
        self.controller.set_ticks_per_frame(ticks_per_frame);
    }

    /// Run the frame callback if one is due; redraws only when ticks were taken.
    pub fn frame(&mut self) -> FrameOutcome {
        let outcome = self.controller.poll(&mut self.universe);
        if outcome.needs_redraw() {
            self.redraw();
            if self.stop_on_cycle && self.universe.is_cycling() {
                info!(generation = self.universe.generation(), "universe settled into a cycle; pausing");
                self.controller.pause();
            }
        }
        outcome
    }

    pub fn set_palette(&mut self, palette: Palette) {
        if palette != self.renderer.palette() {
            self.renderer.set_palette(palette);
            self.redraw();
        }
    }

    pub fn clear(&mut self) {
        self.controller.pause();
        self.universe.clear();
        self.redraw();
    }

    pub fn randomize(&mut self) {
        self.controller.pause();
        // Seed from the current state so repeated presses give different grids.
        let seed = self.universe.generation() ^ self.universe.population() as u64;
        self.universe.reseed(Seed::Random(seed));
        self.redraw();
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        self.controller.pause();
        self.universe.apply_pattern(pattern);
        debug!(pattern = pattern.name, "pattern applied");
        self.redraw();
    }

    pub fn generation(&self) -> u64 {
        self.universe.generation()
    }

    pub fn live_cells(&self) -> usize {
        self.universe.population()
    }

    pub fn total_cells(&self) -> usize {
        self.universe.width() * self.universe.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frames::FrameQueue;
    use egui::{pos2, vec2};

    fn view(width: usize, height: usize, ticks_per_frame: f64) -> LifeView<FrameQueue> {
        let universe = Universe::new(width, height).unwrap();
        let geometry = CanvasGeometry::new(width, height, 5);
        LifeView::new(universe, FrameQueue::new(), geometry, Palette::standard(), ticks_per_frame)
    }

    fn unscaled(view: &LifeView<FrameQueue>) -> Rect {
        let [w, h] = view.geometry().canvas_size();
        Rect::from_min_size(pos2(0.0, 0.0), vec2(w as f32, h as f32))
    }

    #[test]
    fn construction_draws_once() {
        let mut view = view(4, 4, 1.0);
        assert!(view.take_dirty());
        assert!(!view.take_dirty());
    }

    #[test]
    fn paused_frames_do_not_redraw() {
        let mut view = view(4, 4, 1.0);
        view.take_dirty();
        assert_eq!(view.frame(), FrameOutcome::Skipped);
        assert!(!view.take_dirty());
    }

    #[test]
    fn accumulating_frames_do_not_redraw() {
        let mut view = view(4, 4, 0.5);
        view.play();
        view.take_dirty();
        assert_eq!(view.frame(), FrameOutcome::Accumulating);
        assert!(!view.take_dirty());
        assert_eq!(view.frame(), FrameOutcome::Stepped(1));
        assert!(view.take_dirty());
    }

    #[test]
    fn manual_step_is_disabled_while_running() {
        let mut view = view(4, 4, 1.0);
        view.play();
        assert!(!view.can_step_manually());
        assert!(!view.manual_step());
        assert_eq!(view.generation(), 0);

        view.pause();
        assert!(view.manual_step());
        assert_eq!(view.generation(), 1);
    }

    #[test]
    fn click_toggles_and_redraws() {
        let mut view = view(4, 4, 1.0);
        view.take_dirty();
        let viewport = unscaled(&view);
        let cell = view.click(pos2(13.0, 7.0), viewport);
        assert_eq!(cell, CellCoord { row: 1, col: 2 });
        assert!(view.universe().is_alive(1, 2));
        assert!(view.take_dirty());
    }

    #[test]
    fn clear_and_pattern_pause_playback() {
        let mut view = view(16, 16, 1.0);
        view.play();
        view.apply_pattern(Pattern::find("Toad").unwrap());
        assert!(!view.is_running());
        assert_eq!(view.live_cells(), 6);

        view.play();
        view.clear();
        assert!(!view.is_running());
        assert_eq!(view.live_cells(), 0);
    }

    #[test]
    fn randomize_fills_some_cells() {
        let mut view = view(32, 32, 1.0);
        view.randomize();
        assert!(view.live_cells() > 0);
        assert_eq!(view.generation(), 0);
    }

    #[test]
    fn stop_on_cycle_pauses_still_life() {
        let mut view = view(8, 8, 1.0).with_stop_on_cycle(true);
        view.apply_pattern(Pattern::find("Beacon").unwrap());
        view.play();
        // The beacon has period two: generation 2 repeats the starting state.
        assert_eq!(view.frame(), FrameOutcome::Stepped(1));
        assert!(view.is_running());
        assert_eq!(view.frame(), FrameOutcome::Stepped(1));
        assert!(!view.is_running());
        assert_eq!(view.controller().accumulator().owed(), 0.0);
    }

    #[test]
    fn palette_change_redraws() {
        let mut view = view(2, 2, 1.0);
        view.take_dirty();
        view.set_palette(Palette::standard());
        assert!(!view.take_dirty());
        view.set_palette(Palette::inverted());
        assert!(view.take_dirty());
    }
}
