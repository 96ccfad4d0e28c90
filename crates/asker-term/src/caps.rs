#![forbid(unsafe_code)]

//! Terminal capability table.
//!
//! A small terminfo-equivalent: the input sequences the key binding layer
//! needs and the mode-toggle strings the session writes. Defaults are plain
//! ANSI, which every terminal the engine targets understands. Detection is
//! limited to recognising `TERM=dumb`, where cursor addressing is off the
//! table and the engine should refuse to run interactively.

use std::env;

use crate::raw::{KEYPAD_LOCAL, KEYPAD_XMIT};

/// Input and control sequences consumed by the prompt engine.
///
/// `key_*` are the CSI forms terminals send in normal mode; `app_key_*` are
/// the SS3 forms sent while keypad transmit is active. The binding layer
/// binds both so navigation works in either mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    /// Cursor up input sequence (CSI form).
    pub key_up: &'static str,
    /// Cursor down input sequence (CSI form).
    pub key_down: &'static str,
    /// Cursor right input sequence (CSI form).
    pub key_right: &'static str,
    /// Cursor left input sequence (CSI form).
    pub key_left: &'static str,
    /// Cursor up input sequence (SS3 form, keypad transmit).
    pub app_key_up: &'static str,
    /// Cursor down input sequence (SS3 form, keypad transmit).
    pub app_key_down: &'static str,
    /// Cursor right input sequence (SS3 form, keypad transmit).
    pub app_key_right: &'static str,
    /// Cursor left input sequence (SS3 form, keypad transmit).
    pub app_key_left: &'static str,
    /// Delete key input sequence.
    pub key_delete: &'static str,
    /// Home key input sequence.
    pub key_home: &'static str,
    /// End key input sequence.
    pub key_end: &'static str,
    /// Keypad transmit on (smkx).
    pub keypad_xmit: &'static [u8],
    /// Keypad transmit off (rmkx).
    pub keypad_local: &'static [u8],
    /// Whether the terminal supports cursor addressing at all.
    pub cursor_addressing: bool,
}

impl Capabilities {
    /// The plain ANSI capability set.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            key_up: "\x1b[A",
            key_down: "\x1b[B",
            key_right: "\x1b[C",
            key_left: "\x1b[D",
            app_key_up: "\x1bOA",
            app_key_down: "\x1bOB",
            app_key_right: "\x1bOC",
            app_key_left: "\x1bOD",
            key_delete: "\x1b[3~",
            key_home: "\x1b[H",
            key_end: "\x1b[F",
            keypad_xmit: KEYPAD_XMIT,
            keypad_local: KEYPAD_LOCAL,
            cursor_addressing: true,
        }
    }

    /// Detect capabilities from the environment.
    ///
    /// Deterministic: the same environment always produces the same result.
    #[must_use]
    pub fn detect() -> Self {
        let term = env::var("TERM").unwrap_or_default();
        let mut caps = Self::ansi();
        if term.is_empty() || term == "dumb" {
            caps.cursor_addressing = false;
        }
        caps
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ansi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_arrow_sequences() {
        let caps = Capabilities::ansi();
        assert_eq!(caps.key_up, "\x1b[A");
        assert_eq!(caps.app_key_up, "\x1bOA");
        assert!(caps.cursor_addressing);
    }

    #[test]
    fn keypad_strings_are_paired() {
        let caps = Capabilities::ansi();
        assert!(caps.keypad_xmit.starts_with(b"\x1b[?1h"));
        assert!(caps.keypad_local.starts_with(b"\x1b[?1l"));
    }
}
