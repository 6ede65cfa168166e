//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of [`Cell`]s representing what should be on
//! the terminal. Flat storage with row-major indexing for cache efficiency.
//! All drawing clips at the buffer edges; out-of-bounds writes are dropped,
//! never panics.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Create a new buffer filled with a background color.
    pub fn with_background(width: u16, height: u16, fg: Rgba, bg: Rgba) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::blank(fg, bg); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&self.cells[idx])
        } else {
            None
        }
    }

    /// Set a cell. Out-of-bounds writes are dropped.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a cell.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, cell: Cell) {
        for row in y..y.saturating_add(h) {
            for col in x..x.saturating_add(w) {
                self.set(col, row, cell);
            }
        }
    }

    /// Draw a string starting at (x, y), clipping at the right edge.
    ///
    /// Grapheme-aware: wide glyphs occupy their full display width, with
    /// blank continuation cells. Returns the number of columns written.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, bg: Rgba, attrs: Attr) -> u16 {
        let mut col = x;
        for grapheme in text.graphemes(true) {
            let gw = grapheme.width().max(1) as u16;
            if col.saturating_add(gw) > self.width || y >= self.height {
                break;
            }
            let ch = grapheme.chars().next().unwrap_or(' ');
            self.set(
                col,
                y,
                Cell {
                    char: ch as u32,
                    fg,
                    bg,
                    attrs,
                },
            );
            for cont in 1..gw {
                self.set(col + cont, y, Cell::blank(fg, bg));
            }
            col += gw;
        }
        col - x
    }

    /// Draw a horizontal run of one character.
    pub fn draw_hline(&mut self, x: u16, y: u16, w: u16, ch: char, fg: Rgba, bg: Rgba) {
        for col in x..x.saturating_add(w) {
            self.set(
                col,
                y,
                Cell {
                    char: ch as u32,
                    fg,
                    bg,
                    attrs: Attr::NONE,
                },
            );
        }
    }

    /// Draw a rounded border box and fill its interior.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, border: Rgba, bg: Rgba) {
        if w < 2 || h < 2 {
            return;
        }
        self.fill_rect(x, y, w, h, Cell::blank(border, bg));

        let right = x + w - 1;
        let bottom = y + h - 1;
        let edge = |ch: char| Cell {
            char: ch as u32,
            fg: border,
            bg,
            attrs: Attr::NONE,
        };

        self.set(x, y, edge('\u{256d}'));
        self.set(right, y, edge('\u{256e}'));
        self.set(x, bottom, edge('\u{2570}'));
        self.set(right, bottom, edge('\u{256f}'));
        for col in x + 1..right {
            self.set(col, y, edge('\u{2500}'));
            self.set(col, bottom, edge('\u{2500}'));
        }
        for row in y + 1..bottom {
            self.set(x, row, edge('\u{2502}'));
            self.set(right, row, edge('\u{2502}'));
        }
    }

    /// Copy a row range from another buffer (the scrolled document) into
    /// this one, starting at `dest_y`.
    pub fn blit_rows(&mut self, src: &FrameBuffer, src_start: u16, dest_y: u16, rows: u16) {
        for row in 0..rows {
            let sy = src_start.saturating_add(row);
            let dy = dest_y.saturating_add(row);
            if sy >= src.height || dy >= self.height {
                break;
            }
            for x in 0..self.width.min(src.width) {
                if let Some(cell) = src.get(x, sy) {
                    self.set(x, dy, *cell);
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
