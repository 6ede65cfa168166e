//! Differential renderer.
//!
//! Compares the current frame to the previous one and only outputs cells
//! that changed, wrapped in a synchronized-output block so the terminal
//! applies the update atomically. Output accumulates into one buffer and
//! flushes in a single write.
//!
//! # Algorithm
//!
//! 1. Begin synchronized output
//! 2. For each cell: skip if unchanged from the previous frame
//! 3. Otherwise reposition/restyle only as needed and print
//! 4. End synchronized output, flush once
//! 5. Keep the frame for the next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// DiffRenderer
// =============================================================================

/// Differential renderer for the fullscreen session.
///
/// Tracks the previous frame plus the terminal's current colors, attributes
/// and cursor position, so unchanged state emits no escape codes.
pub struct DiffRenderer {
    out: Vec<u8>,
    previous: Option<FrameBuffer>,
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Attr,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(16 * 1024),
            previous: None,
            cursor: None,
            fg: None,
            bg: None,
            attrs: Attr::NONE,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut has_changes = false;

        queue!(self.out, BeginSynchronizedUpdate)?;

        let width = buffer.width();
        let height = buffer.height();

        for y in 0..height {
            for x in 0..width {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };

                let changed = match &self.previous {
                    Some(prev) if prev.width() == width && prev.height() == height => {
                        prev.get(x, y) != Some(cell)
                    }
                    _ => true, // no previous frame or size changed
                };

                if changed {
                    has_changes = true;
                    self.emit_cell(x, y, cell)?;
                }
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Emit one cell, repositioning and restyling only as needed.
    fn emit_cell(&mut self, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        if self.cursor != Some((x, y)) {
            queue!(self.out, MoveTo(x, y))?;
        }

        if self.attrs != cell.attrs {
            // Attribute reset clears colors too; force them to re-emit
            queue!(self.out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            for attr in attribute_list(cell.attrs) {
                queue!(self.out, SetAttribute(attr))?;
            }
            self.attrs = cell.attrs;
        }

        if self.fg != Some(cell.fg) {
            queue!(self.out, SetForegroundColor(to_color(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(self.out, SetBackgroundColor(to_color(cell.bg)))?;
            self.bg = Some(cell.bg);
        }

        let ch = char::from_u32(cell.char).unwrap_or(' ');
        queue!(self.out, Print(ch))?;

        // The terminal advanced by the glyph's width
        let advance = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1) as u16;
        self.cursor = Some((x + advance, y));
        Ok(())
    }

    /// Invalidate the previous frame; the next render is a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
        self.cursor = None;
        self.fg = None;
        self.bg = None;
        self.attrs = Attr::NONE;
    }

    /// Check if there is a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen (alternate screen, hidden cursor, cleared).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen, restoring colors and the cursor.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        self.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.out.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(&self.out)?;
        stdout.flush()?;
        self.out.clear();
        Ok(())
    }
}

impl Default for DiffRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Rgba to a crossterm color. Terminal default maps to Reset.
fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

/// Expand an attribute bitfield into crossterm attributes.
fn attribute_list(attrs: Attr) -> Vec<Attribute> {
    let mut list = Vec::new();
    if attrs.contains(Attr::BOLD) {
        list.push(Attribute::Bold);
    }
    if attrs.contains(Attr::DIM) {
        list.push(Attribute::Dim);
    }
    if attrs.contains(Attr::ITALIC) {
        list.push(Attribute::Italic);
    }
    if attrs.contains(Attr::UNDERLINE) {
        list.push(Attribute::Underlined);
    }
    if attrs.contains(Attr::INVERSE) {
        list.push(Attribute::Reverse);
    }
    list
}

// =============================================================================
// Tests
// =============================================================================
