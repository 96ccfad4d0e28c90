#![forbid(unsafe_code)]

//! Prompt terminal: the engine's single shared resource.
//!
//! Combines the non-blocking reader, the output writer, raw-mode lifecycle
//! and size queries behind one handle. Two backends exist:
//!
//! - **live** ([`PromptTerminal::open`]): reads and writes `/dev/tty`, enters
//!   raw mode with keypad transmit, installs the SIGWINCH listener;
//! - **headless** ([`PromptTerminal::headless`]): a fixed size, a byte-script
//!   input and a captured output sink, so executors are testable without a
//!   tty.
//!
//! Raw mode is guarded by RAII: whatever the exit path, dropping the terminal
//! restores the original attributes and leaves keypad transmit mode.

use std::io::{self, Cursor, Write};
use std::time::Duration;

use crate::caps::Capabilities;
use crate::raw;
use crate::reader::{NonBlockingReader, ReadOutcome};

/// Fallback when the size ioctl is unavailable.
const DEFAULT_SIZE: (u16, u16) = (24, 80);

enum Backend {
    #[cfg(unix)]
    Live {
        out: std::fs::File,
        raw_guard: Option<raw::RawModeGuard>,
        resize: Option<crate::winch::ResizeListener>,
    },
    Headless {
        size: (u16, u16),
        output: Vec<u8>,
        raw: bool,
        resized: bool,
    },
}

/// Terminal handle used by the prompt engine.
pub struct PromptTerminal {
    reader: NonBlockingReader,
    caps: Capabilities,
    backend: Backend,
}

impl PromptTerminal {
    /// Open the controlling terminal.
    ///
    /// Fails when `/dev/tty` cannot be opened or the terminal reports no
    /// cursor addressing (`TERM=dumb`).
    #[cfg(unix)]
    pub fn open() -> io::Result<Self> {
        let caps = Capabilities::detect();
        if !caps.cursor_addressing {
            return Err(io::Error::other("terminal does not support cursor addressing"));
        }
        let input = std::fs::File::open("/dev/tty")?;
        let out = std::fs::OpenOptions::new().write(true).open("/dev/tty")?;
        Ok(Self {
            reader: NonBlockingReader::new(input),
            caps,
            backend: Backend::Live {
                out,
                raw_guard: None,
                resize: None,
            },
        })
    }

    /// Create a headless terminal with a fixed size and a scripted input.
    #[must_use]
    pub fn headless(rows: u16, cols: u16, input: impl Into<Vec<u8>>) -> Self {
        Self {
            reader: NonBlockingReader::new(Cursor::new(input.into())),
            caps: Capabilities::ansi(),
            backend: Backend::Headless {
                size: (rows, cols),
                output: Vec::new(),
                raw: false,
                resized: false,
            },
        }
    }

    /// The capability table for this terminal.
    #[must_use]
    pub fn caps(&self) -> &Capabilities {
        &self.caps
    }

    /// Current size as `(rows, cols)`, re-queried from the tty on every call.
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        match &self.backend {
            #[cfg(unix)]
            Backend::Live { out, .. } => raw::window_size(out).unwrap_or(DEFAULT_SIZE),
            Backend::Headless { size, .. } => *size,
        }
    }

    /// Whether raw mode is currently active.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        match &self.backend {
            #[cfg(unix)]
            Backend::Live { raw_guard, .. } => raw_guard.is_some(),
            Backend::Headless { raw, .. } => *raw,
        }
    }

    /// Enter raw mode and keypad transmit mode. Idempotent.
    pub fn enter_raw(&mut self) -> io::Result<()> {
        match &mut self.backend {
            #[cfg(unix)]
            Backend::Live {
                out,
                raw_guard,
                resize,
            } => {
                if raw_guard.is_none() {
                    *raw_guard = Some(raw::RawModeGuard::enter()?);
                    out.write_all(self.caps.keypad_xmit)?;
                    out.flush()?;
                }
                if resize.is_none() {
                    *resize = crate::winch::ResizeListener::install().ok();
                }
                Ok(())
            }
            Backend::Headless { raw, .. } => {
                *raw = true;
                Ok(())
            }
        }
    }

    /// Leave raw mode and keypad transmit mode. Idempotent.
    pub fn leave_raw(&mut self) -> io::Result<()> {
        match &mut self.backend {
            #[cfg(unix)]
            Backend::Live {
                out,
                raw_guard,
                resize,
            } => {
                resize.take();
                if raw_guard.take().is_some() {
                    out.write_all(self.caps.keypad_local)?;
                    out.flush()?;
                }
                Ok(())
            }
            Backend::Headless { raw, .. } => {
                *raw = false;
                Ok(())
            }
        }
    }

    /// Take the pending-resize flag, clearing it.
    pub fn take_resize(&mut self) -> bool {
        match &mut self.backend {
            #[cfg(unix)]
            Backend::Live { resize, .. } => resize.as_ref().is_some_and(|r| r.take_resize()),
            Backend::Headless { resized, .. } => std::mem::take(resized),
        }
    }

    /// Simulate a resize (headless backend only).
    pub fn set_size(&mut self, rows: u16, cols: u16) {
        if let Backend::Headless { size, resized, .. } = &mut self.backend {
            *size = (rows, cols);
            *resized = true;
        }
    }

    /// Split into the input reader and the output writer.
    ///
    /// Both halves are needed simultaneously inside executor loops; the split
    /// keeps the borrows disjoint.
    pub fn io(&mut self) -> (&mut NonBlockingReader, &mut dyn Write) {
        let writer: &mut dyn Write = match &mut self.backend {
            #[cfg(unix)]
            Backend::Live { out, .. } => out,
            Backend::Headless { output, .. } => output,
        };
        (&mut self.reader, writer)
    }

    /// The output writer alone.
    pub fn writer(&mut self) -> &mut dyn Write {
        self.io().1
    }

    /// Read one character with a timeout (convenience over the reader half).
    pub fn read_char(&mut self, timeout: Duration) -> ReadOutcome {
        self.reader.read(timeout)
    }

    /// Everything written so far (headless backend; empty for live).
    #[must_use]
    pub fn output(&self) -> &[u8] {
        match &self.backend {
            #[cfg(unix)]
            Backend::Live { .. } => &[],
            Backend::Headless { output, .. } => output,
        }
    }
}

impl Drop for PromptTerminal {
    fn drop(&mut self) {
        // Best-effort: leave keypad transmit before the raw guard restores
        // termios. Errors are ignored during teardown.
        let _ = self.leave_raw();
        self.reader.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_reports_fixed_size() {
        let term = PromptTerminal::headless(24, 80, b"".to_vec());
        assert_eq!(term.size(), (24, 80));
    }

    #[test]
    fn headless_raw_mode_toggles() {
        let mut term = PromptTerminal::headless(24, 80, b"".to_vec());
        assert!(!term.is_raw());
        term.enter_raw().unwrap();
        assert!(term.is_raw());
        term.leave_raw().unwrap();
        assert!(!term.is_raw());
    }

    #[test]
    fn headless_captures_output() {
        let mut term = PromptTerminal::headless(24, 80, b"".to_vec());
        term.writer().write_all(b"hello").unwrap();
        assert_eq!(term.output(), b"hello");
    }

    #[test]
    fn headless_reads_scripted_input() {
        let mut term = PromptTerminal::headless(24, 80, b"ab".to_vec());
        assert_eq!(
            term.read_char(Duration::from_millis(100)),
            ReadOutcome::Char('a')
        );
        assert_eq!(
            term.read_char(Duration::from_millis(100)),
            ReadOutcome::Char('b')
        );
        assert_eq!(
            term.read_char(Duration::from_millis(100)),
            ReadOutcome::Eof
        );
    }

    #[test]
    fn headless_resize_flag() {
        let mut term = PromptTerminal::headless(24, 80, b"".to_vec());
        assert!(!term.take_resize());
        term.set_size(30, 100);
        assert_eq!(term.size(), (30, 100));
        assert!(term.take_resize());
        assert!(!term.take_resize());
    }
}
