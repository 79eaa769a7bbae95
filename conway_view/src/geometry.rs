// geometry.rs - Pixel layout of the grid canvas

/// Grid dimensions plus the pixel size of one cell.
///
/// Every cell is separated from its neighbours by a one pixel gridline, so
/// one cell plus one line make a `pitch` of `cell_size + 1` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub width: usize,
    pub height: usize,
    pub cell_size: usize,
}

impl CanvasGeometry {
    pub fn new(width: usize, height: usize, cell_size: usize) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    #[inline]
    pub fn pitch(&self) -> usize {
        self.cell_size + 1
    }

    /// Logical canvas size in pixels as `[width, height]`.
    pub fn canvas_size(&self) -> [usize; 2] {
        [
            self.pitch() * self.width + 1,
            self.pitch() * self.height + 1,
        ]
    }

    /// Pixel row/column occupied by gridline `i`.
    #[inline]
    pub fn line_offset(&self, i: usize) -> usize {
        i * self.pitch()
    }

    /// Top-left pixel `(x, y)` of the cell at `(row, col)`.
    #[inline]
    pub fn cell_origin(&self, row: usize, col: usize) -> (usize, usize) {
        (self.line_offset(col) + 1, self.line_offset(row) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_leaves_room_for_borders() {
        let geometry = CanvasGeometry::new(64, 32, 5);
        assert_eq!(geometry.canvas_size(), [6 * 64 + 1, 6 * 32 + 1]);
    }

    #[test]
    fn last_gridline_is_last_pixel() {
        let geometry = CanvasGeometry::new(4, 3, 5);
        let [w, h] = geometry.canvas_size();
        assert_eq!(geometry.line_offset(4), w - 1);
        assert_eq!(geometry.line_offset(3), h - 1);
    }

    #[test]
    fn cells_sit_between_lines() {
        let geometry = CanvasGeometry::new(4, 4, 5);
        assert_eq!(geometry.cell_origin(0, 0), (1, 1));
        assert_eq!(geometry.cell_origin(1, 2), (13, 7));
        let (x, _) = geometry.cell_origin(0, 3);
        assert_eq!(x + geometry.cell_size, geometry.line_offset(4));
    }
}
