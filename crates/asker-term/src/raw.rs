#![forbid(unsafe_code)]

//! Raw-mode RAII guard.
//!
//! Raw mode delivers input character-by-character without line buffering,
//! echo, or signal translation. The prompt engine enters it exactly once per
//! run and must restore the previous attributes on every exit path, including
//! panics. That guarantee lives here: the guard saves the original termios on
//! entry and restores it in `Drop`.

use std::io;

/// Keypad transmit mode on (smkx). Arrow keys send SS3 (`ESC O A`) forms.
pub const KEYPAD_XMIT: &[u8] = b"\x1b[?1h\x1b=";

/// Keypad transmit mode off (rmkx).
pub const KEYPAD_LOCAL: &[u8] = b"\x1b[?1l\x1b>";

/// RAII guard that saves the original termios and restores it on drop.
///
/// Even if the application panics, the `Drop` impl runs (unless
/// `panic = "abort"`) and the terminal returns to its original state.
///
/// The guard opens `/dev/tty` to get an owned fd that is valid for the
/// lifetime of the guard, avoiding unsafe `BorrowedFd` construction.
#[cfg(unix)]
pub struct RawModeGuard {
    original_termios: nix::sys::termios::Termios,
    tty: std::fs::File,
}

#[cfg(unix)]
impl RawModeGuard {
    /// Enter raw mode on the controlling terminal, returning a guard that
    /// restores the original termios on drop.
    pub fn enter() -> io::Result<Self> {
        let tty = std::fs::File::open("/dev/tty")?;

        let original_termios = nix::sys::termios::tcgetattr(&tty).map_err(io::Error::other)?;

        let mut rawed = original_termios.clone();
        nix::sys::termios::cfmakeraw(&mut rawed);
        nix::sys::termios::tcsetattr(&tty, nix::sys::termios::SetArg::TCSAFLUSH, &rawed)
            .map_err(io::Error::other)?;

        tracing::debug!("entered raw mode");
        Ok(Self {
            original_termios,
            tty,
        })
    }
}

#[cfg(unix)]
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort restore — ignore errors during cleanup.
        let _ = nix::sys::termios::tcsetattr(
            &self.tty,
            nix::sys::termios::SetArg::TCSAFLUSH,
            &self.original_termios,
        );
        tracing::debug!("restored terminal attributes");
    }
}

/// Query the window size of the given terminal fd.
///
/// Returns `None` when the ioctl fails or reports a zero dimension (e.g. a
/// pipe masquerading as a tty).
#[cfg(unix)]
pub fn window_size(tty: &std::fs::File) -> Option<(u16, u16)> {
    let ws = rustix::termios::tcgetwinsize(tty).ok()?;
    if ws.ws_row > 0 && ws.ws_col > 0 {
        Some((ws.ws_row, ws.ws_col))
    } else {
        None
    }
}
