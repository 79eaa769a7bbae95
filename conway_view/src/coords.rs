// coords.rs - Pointer position to grid cell

use egui::{Pos2, Rect};

use crate::geometry::CanvasGeometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

/// Map a pointer position to the cell under it.
///
/// `viewport` is where the canvas is shown on screen. It may be larger or
/// smaller than the canvas's logical pixel size, so the pointer offset is
/// rescaled into canvas pixels before dividing by the cell pitch. The
/// result is always inside the grid: positions past the trailing border
/// (or outside the viewport entirely) clamp to the nearest edge cell.
pub fn cell_at(pointer: Pos2, viewport: Rect, geometry: &CanvasGeometry) -> CellCoord {
    let [canvas_width, canvas_height] = geometry.canvas_size();

    let scale_x = canvas_width as f32 / viewport.width();
    let scale_y = canvas_height as f32 / viewport.height();

    let canvas_left = (pointer.x - viewport.left()) * scale_x;
    let canvas_top = (pointer.y - viewport.top()) * scale_y;

    let pitch = geometry.pitch() as f32;
    // Float to int casts saturate: negatives and NaN land on 0.
    let row = (canvas_top / pitch).floor() as usize;
    let col = (canvas_left / pitch).floor() as usize;

    CellCoord {
        row: row.min(geometry.height.saturating_sub(1)),
        col: col.min(geometry.width.saturating_sub(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn unscaled(geometry: &CanvasGeometry) -> Rect {
        let [w, h] = geometry.canvas_size();
        Rect::from_min_size(pos2(0.0, 0.0), vec2(w as f32, h as f32))
    }

    #[test]
    fn unscaled_pixels_divide_by_pitch() {
        let geometry = CanvasGeometry::new(4, 4, 5);
        let viewport = unscaled(&geometry);
        for (x, y) in [(0.0, 0.0), (5.0, 6.0), (13.0, 7.0), (23.5, 11.9)] {
            let cell = cell_at(pos2(x, y), viewport, &geometry);
            assert_eq!(cell.row, (y / 6.0_f32).floor() as usize, "y = {y}");
            assert_eq!(cell.col, (x / 6.0_f32).floor() as usize, "x = {x}");
        }
    }

    #[test]
    fn trailing_border_clamps_to_last_cell() {
        let geometry = CanvasGeometry::new(4, 3, 5);
        let viewport = unscaled(&geometry);
        let [w, h] = geometry.canvas_size();

        let last_pixel = cell_at(pos2((w - 1) as f32, (h - 1) as f32), viewport, &geometry);
        assert_eq!(last_pixel, CellCoord { row: 2, col: 3 });

        let far_edge = cell_at(pos2(w as f32, h as f32), viewport, &geometry);
        assert_eq!(far_edge, CellCoord { row: 2, col: 3 });
    }

    #[test]
    fn scaled_viewport_maps_back_to_canvas_pixels() {
        let geometry = CanvasGeometry::new(4, 4, 3);
        let [w, h] = geometry.canvas_size();
        // Shown at twice the logical size, offset inside the window.
        let viewport = Rect::from_min_size(pos2(100.0, 50.0), vec2(2.0 * w as f32, 2.0 * h as f32));

        // Canvas pixel (9, 5) is cell (1, 2) with a pitch of 4.
        let cell = cell_at(pos2(100.0 + 18.0, 50.0 + 10.0), viewport, &geometry);
        assert_eq!(cell, CellCoord { row: 1, col: 2 });
    }

    #[test]
    fn shrunk_viewport_maps_back_to_canvas_pixels() {
        let geometry = CanvasGeometry::new(8, 8, 7);
        let [w, h] = geometry.canvas_size();
        let viewport = Rect::from_min_size(pos2(10.0, 10.0), vec2(w as f32 / 4.0, h as f32 / 4.0));

        // A quarter-size canvas: 2 screen points per cell in each direction.
        let cell = cell_at(pos2(10.0 + 2.0 * 5.0 + 0.5, 10.0 + 2.0 * 3.0 + 0.5), viewport, &geometry);
        assert_eq!(cell, CellCoord { row: 3, col: 5 });
    }

    #[test]
    fn pointer_before_viewport_clamps_to_origin() {
        let geometry = CanvasGeometry::new(4, 4, 5);
        let viewport = Rect::from_min_size(pos2(20.0, 20.0), vec2(25.0, 25.0));
        let cell = cell_at(pos2(0.0, 5.0), viewport, &geometry);
        assert_eq!(cell, CellCoord { row: 0, col: 0 });
    }

    #[test]
    fn degenerate_viewport_still_yields_a_cell() {
        let geometry = CanvasGeometry::new(4, 4, 5);
        let viewport = Rect::from_min_size(pos2(0.0, 0.0), vec2(0.0, 0.0));
        let cell = cell_at(pos2(0.0, 3.0), viewport, &geometry);
        assert!(cell.row < 4 && cell.col < 4);
    }
}
