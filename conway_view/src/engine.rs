// engine.rs - The simulation interface the viewer drives

use universe::Universe;

/// Operations the viewer needs from a simulation engine.
///
/// The engine owns cell state and its packed buffer; the viewer only
/// reads the buffer through [`Engine::state_buffer`] and asks for changes
/// through [`Engine::step`] and [`Engine::toggle`].
pub trait Engine {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Advance one generation.
    fn step(&mut self);
    fn toggle(&mut self, row: usize, col: usize);
    fn index_of(&self, row: usize, col: usize) -> usize;
    /// Packed cell bits, one per cell, low bit first.
    ///
    /// The engine may move this buffer whenever it mutates, so borrow it
    /// afresh for every draw.
    fn state_buffer(&self) -> &[u8];
}

impl Engine for Universe {
    fn width(&self) -> usize {
        Universe::width(self)
    }

    fn height(&self) -> usize {
        Universe::height(self)
    }

    fn step(&mut self) {
        self.tick();
    }

    fn toggle(&mut self, row: usize, col: usize) {
        self.toggle_cell(row, col);
    }

    fn index_of(&self, row: usize, col: usize) -> usize {
        self.get_index(row, col)
    }

    fn state_buffer(&self) -> &[u8] {
        self.cells()
    }
}
