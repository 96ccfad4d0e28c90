#![forbid(unsafe_code)]

//! ANSI escape sequence generation helpers.
//!
//! Pure byte-generation functions for the control sequences the display
//! emits. No state tracking here; the [`crate::display`] module decides when
//! a sequence is needed.
//!
//! # Sequence Reference
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ n m` | SGR (Select Graphic Rendition) |
//! | CSI | `ESC [ n A` / `B` | Cursor up / down |
//! | CSI | `ESC [ n G` | CHA (Cursor Horizontal Absolute, 1-indexed) |
//! | CSI | `ESC [ 0 K` | EL (Erase to end of line) |
//! | CSI | `ESC [ 0 J` | ED (Erase to end of screen) |

use std::io::{self, Write};

use asker_style::style::{Style, StyleFlags};
use asker_style::Color;

/// SGR reset: `CSI 0 m`.
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Erase from the cursor to the end of the line.
pub const ERASE_TO_EOL: &[u8] = b"\x1b[0K";

/// Erase from the cursor to the end of the screen.
pub const ERASE_BELOW: &[u8] = b"\x1b[0J";

/// Carriage return (column zero).
pub const CR: &[u8] = b"\r";

/// Write SGR reset.
#[inline]
pub fn sgr_reset<W: Write + ?Sized>(w: &mut W) -> io::Result<()> {
    w.write_all(SGR_RESET)
}

/// Move the cursor up `n` rows (no-op for `n == 0`).
pub fn cursor_up<W: Write + ?Sized>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[A"),
        _ => write!(w, "\x1b[{n}A"),
    }
}

/// Move the cursor down `n` rows (no-op for `n == 0`).
pub fn cursor_down<W: Write + ?Sized>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[B"),
        _ => write!(w, "\x1b[{n}B"),
    }
}

/// Move the cursor to the absolute column `col` (0-indexed).
pub fn cursor_column<W: Write + ?Sized>(w: &mut W, col: u16) -> io::Result<()> {
    if col == 0 {
        w.write_all(CR)
    } else {
        write!(w, "\x1b[{}G", col + 1)
    }
}

/// Write the full SGR sequence for `style` in a single CSI.
///
/// Always starts from a reset (`0`) so the emitted state does not depend on
/// what was active before: `ESC [ 0 ; … m`.
pub fn sgr<W: Write + ?Sized>(w: &mut W, style: Style) -> io::Result<()> {
    if style.is_plain() {
        return sgr_reset(w);
    }

    w.write_all(b"\x1b[0")?;
    let flags = style.flags();
    for (flag, code) in [
        (StyleFlags::BOLD, 1u8),
        (StyleFlags::FAINT, 2),
        (StyleFlags::ITALIC, 3),
        (StyleFlags::UNDERLINE, 4),
        (StyleFlags::BLINK, 5),
        (StyleFlags::INVERSE, 7),
    ] {
        if flags.contains(flag) {
            write!(w, ";{code}")?;
        }
    }
    if let Some(fg) = style.fg {
        write_color(w, fg, 30)?;
    }
    if let Some(bg) = style.bg {
        write_color(w, bg, 40)?;
    }
    w.write_all(b"m")
}

/// Write one color parameter. `base` is 30 for foreground, 40 for background.
fn write_color<W: Write + ?Sized>(w: &mut W, color: Color, base: u8) -> io::Result<()> {
    match color {
        Color::Ansi(c @ 0..=7) => write!(w, ";{}", base + c),
        Color::Ansi(c @ 8..=15) => write!(w, ";{}", base + 60 + (c - 8)),
        // Out-of-range ANSI indices fall back to the 256-color form.
        Color::Ansi(c) | Color::Indexed(c) => write!(w, ";{};5;{}", base + 8, c),
        Color::Rgb(r, g, b) => write!(w, ";{};2;{};{};{}", base + 8, r, g, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_moves() {
        assert_eq!(capture(|w| cursor_up(w, 0)), "");
        assert_eq!(capture(|w| cursor_up(w, 1)), "\x1b[A");
        assert_eq!(capture(|w| cursor_up(w, 3)), "\x1b[3A");
        assert_eq!(capture(|w| cursor_down(w, 2)), "\x1b[2B");
    }

    #[test]
    fn column_zero_is_carriage_return() {
        assert_eq!(capture(|w| cursor_column(w, 0)), "\r");
        assert_eq!(capture(|w| cursor_column(w, 4)), "\x1b[5G");
    }

    #[test]
    fn plain_style_is_reset() {
        assert_eq!(capture(|w| sgr(w, Style::new())), "\x1b[0m");
    }

    #[test]
    fn sgr_flags_and_ansi_colors() {
        let style = Style::new().bold().underline().fg(Color::CYAN);
        assert_eq!(capture(|w| sgr(w, style)), "\x1b[0;1;4;36m");

        let bright = Style::new().fg(Color::Ansi(9)).bg(Color::BLACK);
        assert_eq!(capture(|w| sgr(w, bright)), "\x1b[0;91;40m");
    }

    #[test]
    fn sgr_extended_colors() {
        let indexed = Style::new().fg(Color::Indexed(208));
        assert_eq!(capture(|w| sgr(w, indexed)), "\x1b[0;38;5;208m");

        let rgb = Style::new().bg(Color::Rgb(12, 34, 56));
        assert_eq!(capture(|w| sgr(w, rgb)), "\x1b[0;48;2;12;34;56m");
    }
}
