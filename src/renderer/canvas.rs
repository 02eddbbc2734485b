//! Character canvas
//!
//! Rasterizes world-space rectangles and text into a grid of terminal cells.

use super::{Rgb, TextLine};
use crate::consts::{HEIGHT, WIDTH};
use crate::sim::Rect;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
}

/// A grid of cells covering the whole viewport
#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    background: Rgb,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let background = super::palette::BLACK;
        Self {
            cols,
            rows,
            background,
            cells: vec![Cell { ch: ' ', fg: background }; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    /// Wipe every cell and set the sky color
    pub fn clear(&mut self, background: Rgb) {
        self.background = background;
        self.cells.fill(Cell {
            ch: ' ',
            fg: background,
        });
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = row as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    fn put(&mut self, col: i32, row: i32, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    fn to_col(&self, x: f32) -> f32 {
        x / WIDTH * self.cols as f32
    }

    fn to_row(&self, y: f32) -> f32 {
        y / HEIGHT * self.rows as f32
    }

    /// Fill the cells covered by a world rectangle
    ///
    /// Anything visible covers at least one cell, however thin.
    pub fn fill_rect(&mut self, rect: &Rect, ch: char, fg: Rgb) {
        let c0 = self.to_col(rect.left()).floor() as i32;
        let c1 = (self.to_col(rect.right()).ceil() as i32).max(c0 + 1);
        let r0 = self.to_row(rect.top()).floor() as i32;
        let r1 = (self.to_row(rect.bottom()).ceil() as i32).max(r0 + 1);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, Cell { ch, fg });
            }
        }
    }

    /// Write a text line centered on its anchor
    pub fn text(&mut self, line: &TextLine) {
        let text: String = if line.size >= 40 {
            // Large type: letter-spaced
            line.text
                .chars()
                .flat_map(|c| [c, ' '])
                .collect::<String>()
                .trim_end()
                .to_string()
        } else {
            line.text.clone()
        };
        let width = text.chars().count() as i32;
        let col = self.to_col(line.x).round() as i32 - width / 2;
        let row = self.to_row(line.y).floor() as i32;
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i32, row, Cell { ch, fg: line.color });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::palette;

    #[test]
    fn test_fill_rect_scales_to_cells() {
        // 36 x 48 cells: one cell per 10 world units
        let mut canvas = Canvas::new(36, 48);
        canvas.clear(palette::LIGHT_BLUE);
        canvas.fill_rect(&Rect::new(100.0, 200.0, 30.0, 10.0), '=', palette::GRASS);

        assert_eq!(canvas.get(10, 20).map(|c| c.ch), Some('='));
        assert_eq!(canvas.get(12, 20).map(|c| c.ch), Some('='));
        assert_eq!(canvas.get(13, 20).map(|c| c.ch), Some(' '));
        assert_eq!(canvas.get(10, 21).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_thin_rect_still_visible() {
        let mut canvas = Canvas::new(36, 48);
        canvas.fill_rect(&Rect::new(100.0, 200.0, 2.0, 2.0), '*', palette::WHITE);
        assert_eq!(canvas.get(10, 20).map(|c| c.ch), Some('*'));
    }

    #[test]
    fn test_offscreen_is_clipped() {
        let mut canvas = Canvas::new(36, 48);
        canvas.fill_rect(&Rect::new(-50.0, -50.0, 30.0, 30.0), '#', palette::WHITE);
        canvas.fill_rect(&Rect::new(350.0, 470.0, 100.0, 100.0), '#', palette::WHITE);
        assert_eq!(canvas.get(35, 47).map(|c| c.ch), Some('#'));
        assert_eq!(canvas.get(0, 0).map(|c| c.ch), Some(' '));
    }

    #[test]
    fn test_text_is_centered() {
        let mut canvas = Canvas::new(36, 48);
        canvas.text(&TextLine::new("abcd", 22, palette::RED, 180.0, 100.0));
        let row: String = canvas.row(10).iter().map(|c| c.ch).collect();
        assert_eq!(row.trim(), "abcd");
        assert_eq!(canvas.get(16, 10).map(|c| c.ch), Some('a'));
    }
}
