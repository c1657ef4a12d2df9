//! Half-block presenter: shows an RGB frame buffer on a character grid
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use polyview_core::{FrameBuffer, Rgb};
use std::io::Write;

/// Upper half block: foreground paints the top sample, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Colors of one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub top: Rgb,
    pub bottom: Rgb,
}

/// Downsamples frames to `columns × rows` cells, two pixels tall each
pub struct HalfBlockRenderer {
    columns: usize,
    rows: usize,
    frame_width: usize,
    frame_height: usize,
    cells: Vec<Cell>,
}

impl HalfBlockRenderer {
    pub fn new(columns: usize, rows: usize, frame_width: usize, frame_height: usize) -> Self {
        Self {
            columns,
            rows,
            frame_width,
            frame_height,
            cells: vec![Cell::default(); columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Cell> {
        if column < self.columns && row < self.rows {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![Cell::default(); columns * rows];
    }

    /// Frame-buffer pixel under the center of a cell, for pointer events
    pub fn cell_to_pixel(&self, column: u16, row: u16) -> (i32, i32) {
        let x = band_center(usize::from(column), self.columns, self.frame_width);
        let y = band_center(usize::from(row), self.rows, self.frame_height);
        (x as i32, y as i32)
    }

    /// Sample `frame` into the cell grid
    pub fn rasterize(&mut self, frame: &FrameBuffer) {
        let half_rows = self.rows * 2;
        for row in 0..self.rows {
            let top_y = band_center(row * 2, half_rows, frame.height());
            let bottom_y = band_center(row * 2 + 1, half_rows, frame.height());
            for column in 0..self.columns {
                let x = band_center(column, self.columns, frame.width());
                self.cells[row * self.columns + column] = Cell {
                    top: frame.pixel(x, top_y).unwrap_or_default(),
                    bottom: frame.pixel(x, bottom_y).unwrap_or_default(),
                };
            }
        }
    }

    /// Queue the cell grid onto `writer`, only switching colors when they change
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Cell> = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for column in 0..self.columns {
                let cell = self.cells[row * self.columns + column];
                if current.map_or(true, |c| c.top != cell.top) {
                    writer.queue(SetForegroundColor(to_color(cell.top)))?;
                }
                if current.map_or(true, |c| c.bottom != cell.bottom) {
                    writer.queue(SetBackgroundColor(to_color(cell.bottom)))?;
                }
                current = Some(cell);
                writer.queue(Print(HALF_BLOCK))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Center of band `index` when `extent` is split into `count` equal bands
fn band_center(index: usize, count: usize, extent: usize) -> usize {
    if count == 0 {
        return 0;
    }
    ((2 * index + 1) * extent) / (2 * count)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Rgb = Rgb::new(0, 0, 0xFF);

    #[test]
    fn test_cell_to_pixel() {
        let renderer = HalfBlockRenderer::new(80, 30, 800, 600);
        assert_eq!(renderer.cell_to_pixel(0, 0), (5, 10));
        assert_eq!(renderer.cell_to_pixel(40, 15), (405, 310));
        assert_eq!(renderer.cell_to_pixel(79, 29), (795, 590));
    }

    #[test]
    fn test_rasterize_samples_halves() {
        let mut frame = FrameBuffer::new(8, 8, Rgb::WHITE);
        for x in 0..8 {
            for y in 0..2 {
                frame.set_pixel(x, y, BLUE);
            }
        }

        let mut renderer = HalfBlockRenderer::new(4, 2, 8, 8);
        renderer.rasterize(&frame);
        assert_eq!(renderer.cell(0, 0), Some(Cell { top: BLUE, bottom: Rgb::WHITE }));
        assert_eq!(renderer.cell(3, 1), Some(Cell { top: Rgb::WHITE, bottom: Rgb::WHITE }));
        assert_eq!(renderer.cell(4, 0), None);
    }

    #[test]
    fn test_draw_emits_every_cell() {
        let mut renderer = HalfBlockRenderer::new(3, 2, 6, 4);
        renderer.rasterize(&FrameBuffer::new(6, 4, Rgb::WHITE));

        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }

    #[test]
    fn test_resize() {
        let mut renderer = HalfBlockRenderer::new(3, 2, 6, 4);
        renderer.resize(10, 5);
        assert_eq!((renderer.columns(), renderer.rows()), (10, 5));
        assert_eq!(renderer.cell(9, 4), Some(Cell::default()));
    }
}
