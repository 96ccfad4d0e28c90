#![forbid(unsafe_code)]

//! Frame-to-frame differential display.
//!
//! The display owns the previously rendered frame and transforms it into the
//! next one with explicit cursor movement, per-row rewrites and
//! clear-to-end-of-line/screen. It draws inline — relative to wherever the
//! cursor was when the first frame was emitted — so the shell's scrollback
//! above the prompt survives.
//!
//! # Contract
//!
//! - Row movement is relative (`CUU`/`CUD`); new rows are created with line
//!   feeds, which is the only way the display ever scrolls.
//! - Lines are truncated to the terminal width; autowrap is never relied on.
//! - No trailing newline is written on the last row.
//! - Rendering the same frame (and cursor) twice emits nothing the second
//!   time.
//! - A size change between frames forces a clear of the drawn region and a
//!   full redraw.

use std::io::{self, Write};

use asker_style::{Style, StyledLine};

use crate::ansi;

/// Sentinel for "terminal column unknown".
const COL_UNKNOWN: u16 = u16::MAX;

/// Differential renderer over styled lines.
///
/// Coordinates are display-relative: row 0 is the first line of the frame,
/// wherever that sits on the physical screen.
#[derive(Debug)]
pub struct Display {
    /// The frame currently on screen (already width-truncated).
    prev: Vec<StyledLine>,
    /// Cursor position requested by the previous update.
    prev_cursor: Option<(u16, u16)>,
    /// Terminal size observed at the previous update.
    prev_size: Option<(u16, u16)>,
    /// Tracked terminal cursor row, display-relative.
    cur_row: u16,
    /// Tracked terminal cursor column, [`COL_UNKNOWN`] when unknown.
    cur_col: u16,
    /// Highest row the display has ever visited.
    max_row: u16,
    /// Frame assembly buffer; flushed in a single write per update.
    buf: Vec<u8>,
}

impl Display {
    /// Create a display with no previous frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prev: Vec::new(),
            prev_cursor: None,
            prev_size: None,
            cur_row: 0,
            cur_col: COL_UNKNOWN,
            max_row: 0,
            buf: Vec::new(),
        }
    }

    /// Forget the previous frame, forcing the next update to redraw fully.
    ///
    /// Does not touch the terminal; use after taking over a screen region
    /// whose content is unknown.
    pub fn reset(&mut self) {
        self.prev.clear();
        self.prev_cursor = None;
        self.prev_size = None;
        self.cur_row = 0;
        self.cur_col = COL_UNKNOWN;
        self.max_row = 0;
    }

    /// Number of lines in the frame currently on screen.
    #[must_use]
    pub fn rows_drawn(&self) -> usize {
        self.prev.len()
    }

    /// Transform the on-screen frame into `lines`, leaving the terminal
    /// cursor at `cursor` (display-relative `(row, col)`).
    ///
    /// `size` is `(rows, cols)` as re-read by the caller for this frame.
    /// Frames taller than the terminal are clamped to its height; executors
    /// paginate so this is a safety net, not a layout mechanism.
    pub fn update(
        &mut self,
        w: &mut dyn Write,
        lines: &[StyledLine],
        cursor: (u16, u16),
        size: (u16, u16),
    ) -> io::Result<()> {
        let (rows, cols) = size;
        let target: Vec<StyledLine> = lines
            .iter()
            .take(rows as usize)
            .map(|l| l.truncated(cols as usize))
            .collect();

        if self.prev_size.is_some() && self.prev_size != Some(size) {
            tracing::debug!(?size, "terminal resized, full redraw");
            self.move_to(0, 0);
            self.buf.extend_from_slice(ansi::SGR_RESET);
            self.buf.extend_from_slice(ansi::ERASE_BELOW);
            self.prev.clear();
        }
        self.prev_size = Some(size);

        for (row, line) in target.iter().enumerate() {
            if self.prev.get(row) == Some(line) {
                continue;
            }
            self.draw_row(row as u16, line);
        }

        if self.prev.len() > target.len() {
            self.move_to(target.len() as u16, 0);
            self.buf.extend_from_slice(ansi::SGR_RESET);
            self.buf.extend_from_slice(ansi::ERASE_BELOW);
        }

        let final_cursor = (
            cursor.0.min(rows.saturating_sub(1)),
            cursor.1.min(cols.saturating_sub(1)),
        );
        if !self.buf.is_empty() || self.prev_cursor != Some(final_cursor) {
            self.move_to(final_cursor.0, final_cursor.1);
        }

        self.prev = target;
        self.prev_cursor = Some(final_cursor);

        if self.buf.is_empty() {
            return Ok(());
        }
        w.write_all(&self.buf)?;
        w.flush()?;
        self.buf.clear();
        Ok(())
    }

    /// Rewrite one row: position, emit spans with style tracking, reset,
    /// clear leftovers to end of line.
    fn draw_row(&mut self, row: u16, line: &StyledLine) {
        self.move_to(row, 0);
        let mut current = Style::new();
        for span in line.spans() {
            if span.style != current {
                // Infallible: Vec<u8> writes cannot fail.
                let _ = ansi::sgr(&mut self.buf, span.style);
                current = span.style;
            }
            self.buf.extend_from_slice(span.text.as_bytes());
            self.cur_col = self.cur_col.saturating_add(span.width() as u16);
        }
        if !current.is_plain() {
            self.buf.extend_from_slice(ansi::SGR_RESET);
        }
        self.buf.extend_from_slice(ansi::ERASE_TO_EOL);
    }

    /// Move the tracked cursor to `(row, col)` in display coordinates.
    ///
    /// Rows at or below [`max_row`](Self::max_row) are reached with relative
    /// moves; rows beyond it are created with line feeds (the only scrolling
    /// the display performs).
    fn move_to(&mut self, row: u16, col: u16) {
        if row > self.max_row {
            // Descend to the deepest existing row, then open new ones.
            let _ = ansi::cursor_down(&mut self.buf, self.max_row - self.cur_row);
            self.buf.extend_from_slice(ansi::CR);
            for _ in self.max_row..row {
                self.buf.push(b'\n');
            }
            self.max_row = row;
            self.cur_row = row;
            self.cur_col = 0;
        } else if row < self.cur_row {
            let _ = ansi::cursor_up(&mut self.buf, self.cur_row - row);
            self.cur_row = row;
        } else if row > self.cur_row {
            let _ = ansi::cursor_down(&mut self.buf, row - self.cur_row);
            self.cur_row = row;
        }

        if col != self.cur_col {
            let _ = ansi::cursor_column(&mut self.buf, col);
            self.cur_col = col;
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
