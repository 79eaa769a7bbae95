// render.rs - Gridlines and cell fills

use egui::{Color32, ColorImage};

use crate::cells::StateView;
use crate::engine::Engine;
use crate::geometry::CanvasGeometry;

pub const GRID_COLOR: Color32 = Color32::from_rgb(0xCC, 0xCC, 0xCC);
pub const DEAD_COLOR: Color32 = Color32::WHITE;
pub const ALIVE_COLOR: Color32 = Color32::BLACK;

/// Colours for gridlines and for cells whose bit is set or unset.
///
/// Which of `set`/`unset` means "alive" is decided here, not by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub grid: Color32,
    pub set: Color32,
    pub unset: Color32,
}

impl Palette {
    /// Set bits are live cells.
    pub const fn standard() -> Self {
        Self {
            grid: GRID_COLOR,
            set: ALIVE_COLOR,
            unset: DEAD_COLOR,
        }
    }

    /// Set bits drawn in the dead colour.
    pub const fn inverted() -> Self {
        Self {
            grid: GRID_COLOR,
            set: DEAD_COLOR,
            unset: ALIVE_COLOR,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// A full-length one pixel line across the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLine {
    Vertical { x: usize, length: usize },
    Horizontal { y: usize, length: usize },
}

/// Drawing surface the renderer paints on.
pub trait Canvas {
    /// Stroke every line in `lines` as a single path.
    fn stroke_lines(&mut self, lines: &[GridLine], color: Color32);

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Color32);
}

#[derive(Debug, Clone)]
pub struct GridRenderer {
    geometry: CanvasGeometry,
    palette: Palette,
}

impl GridRenderer {
    pub fn new(geometry: CanvasGeometry, palette: Palette) -> Self {
        Self { geometry, palette }
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.geometry
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// One vertical line per column boundary and one horizontal line per row
    /// boundary, both ends included.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let [canvas_width, canvas_height] = self.geometry.canvas_size();
        let mut lines = Vec::with_capacity(self.geometry.width + self.geometry.height + 2);

        // Vertical lines.
        for i in 0..=self.geometry.width {
            lines.push(GridLine::Vertical {
                x: self.geometry.line_offset(i),
                length: canvas_height,
            });
        }

        // Horizontal lines.
        for j in 0..=self.geometry.height {
            lines.push(GridLine::Horizontal {
                y: self.geometry.line_offset(j),
                length: canvas_width,
            });
        }

        lines
    }

    pub fn draw_grid<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.stroke_lines(&self.grid_lines(), self.palette.grid);
    }

    /// Fill every cell according to `is_set(index_of(row, col))`.
    pub fn draw_cells<C, I, S>(&self, canvas: &mut C, index_of: I, is_set: S)
    where
        C: Canvas + ?Sized,
        I: Fn(usize, usize) -> usize,
        S: Fn(usize) -> bool,
    {
        let size = self.geometry.cell_size;
        for row in 0..self.geometry.height {
            for col in 0..self.geometry.width {
                let color = if is_set(index_of(row, col)) {
                    self.palette.set
                } else {
                    self.palette.unset
                };
                let (x, y) = self.geometry.cell_origin(row, col);
                canvas.fill_rect(x, y, size, size, color);
            }
        }
    }

    /// Gridlines, then cells decoded from the engine's current buffer.
    pub fn draw<C, E>(&self, canvas: &mut C, engine: &E)
    where
        C: Canvas + ?Sized,
        E: Engine + ?Sized,
    {
        self.draw_grid(canvas);
        let view = StateView::of(engine);
        self.draw_cells(
            canvas,
            |row, col| engine.index_of(row, col),
            |index| view.is_set(index),
        );
    }
}

/// An in-memory raster, uploaded to the GPU as a texture after each redraw.
#[derive(Clone)]
pub struct PixelCanvas {
    image: ColorImage,
}

impl PixelCanvas {
    pub fn new(geometry: &CanvasGeometry, background: Color32) -> Self {
        Self {
            image: ColorImage::new(geometry.canvas_size(), background),
        }
    }

    pub fn image(&self) -> &ColorImage {
        &self.image
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color32 {
        self.image.pixels[y * self.image.size[0] + x]
    }
}

impl Canvas for PixelCanvas {
    fn stroke_lines(&mut self, lines: &[GridLine], color: Color32) {
        let [width, height] = self.image.size;
        for line in lines {
            match *line {
                GridLine::Vertical { x, length } if x < width => {
                    for y in 0..length.min(height) {
                        self.image.pixels[y * width + x] = color;
                    }
                }
                GridLine::Horizontal { y, length } if y < height => {
                    let start = y * width;
                    self.image.pixels[start..start + length.min(width)].fill(color);
                }
                _ => {}
            }
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: Color32) {
        let [canvas_width, canvas_height] = self.image.size;
        if x >= canvas_width {
            return;
        }
        let right = (x + width).min(canvas_width);
        for row in y..(y + height).min(canvas_height) {
            let start = row * canvas_width;
            self.image.pixels[start + x..start + right].fill(color);
        }
    }
}
