/// Character grid canvas for terminal output
use crossterm::{cursor, style::Print, QueueableCommand};
use std::io::Write;

use glyph3d_core::Canvas;

/// A width x height buffer of glyphs the renderer draws into, flushed to
/// the terminal once per frame.
pub struct CharGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl CharGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Glyph at a cell, for inspection and tests.
    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// Queue the buffer contents to the writer, one row per terminal line.
    /// The caller flushes.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            let row: String = self.cells[y * self.width..(y + 1) * self.width]
                .iter()
                .collect();
            writer.queue(cursor::MoveTo(0, y as u16))?;
            writer.queue(Print(row))?;
        }
        Ok(())
    }

    fn rasterize(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), glyph: char) {
        // Bounding box, clipped to the grid. Non-finite coordinates
        // collapse the box and draw nothing.
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // Sample at the cell center.
                let p = (x as f32 + 0.5, y as f32 + 0.5);

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.cells[y as usize * self.width + x as usize] = glyph;
                    }
                }
            }
        }
    }
}

impl Canvas for CharGrid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn clear(&mut self, glyph: char) {
        self.cells.fill(glyph);
    }

    fn fill_triangle(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32, glyph: char) {
        self.rasterize((x1, y1), (x2, y2), (x3, y3), glyph);
    }
}

/// Barycentric coordinates of `p` in the triangle, or `None` when the
/// triangle has (near-)zero screen area.
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_overwrites_every_cell() {
        let mut grid = CharGrid::new(4, 3);
        grid.fill_triangle(0.0, 0.0, 4.0, 0.0, 0.0, 3.0, '#');
        grid.clear(' ');

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(grid.glyph_at(x, y), ' ');
            }
        }
    }

    #[test]
    fn fill_covers_interior_cells() {
        let mut grid = CharGrid::new(10, 10);
        grid.fill_triangle(0.0, 0.0, 9.0, 0.0, 0.0, 9.0, '@');

        assert_eq!(grid.glyph_at(1, 1), '@');
        assert_eq!(grid.glyph_at(3, 2), '@');
        // Opposite corner lies outside the hypotenuse.
        assert_eq!(grid.glyph_at(9, 9), ' ');
    }

    #[test]
    fn later_fills_overwrite_earlier_ones() {
        // Painter's algorithm depends on overwrite within shared cells.
        let mut grid = CharGrid::new(10, 10);
        grid.fill_triangle(0.0, 0.0, 9.0, 0.0, 0.0, 9.0, '-');
        grid.fill_triangle(0.0, 0.0, 9.0, 0.0, 0.0, 9.0, '@');

        assert_eq!(grid.glyph_at(1, 1), '@');
    }

    #[test]
    fn off_grid_coordinates_are_clipped() {
        let mut grid = CharGrid::new(5, 5);
        grid.fill_triangle(-10.0, -10.0, 20.0, -10.0, -10.0, 20.0, '#');

        // No panic, and the covered in-bounds corner got drawn.
        assert_eq!(grid.glyph_at(0, 0), '#');
    }

    #[test]
    fn fully_off_grid_triangle_draws_nothing() {
        let mut grid = CharGrid::new(5, 5);
        grid.fill_triangle(-9.0, -9.0, -5.0, -9.0, -9.0, -5.0, '#');

        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.glyph_at(x, y), ' ');
            }
        }
    }

    #[test]
    fn zero_area_triangle_draws_nothing() {
        let mut grid = CharGrid::new(5, 5);
        grid.fill_triangle(1.0, 1.0, 3.0, 3.0, 2.0, 2.0, '#');

        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.glyph_at(x, y), ' ');
            }
        }
    }

    #[test]
    fn non_finite_coordinates_draw_nothing() {
        let mut grid = CharGrid::new(5, 5);
        grid.fill_triangle(f32::NAN, f32::NAN, f32::INFINITY, 2.0, 1.0, f32::NAN, '#');

        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(grid.glyph_at(x, y), ' ');
            }
        }
    }
}
