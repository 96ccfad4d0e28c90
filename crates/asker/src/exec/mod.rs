#![forbid(unsafe_code)]

//! Prompt executors.
//!
//! One executor per prompt variant, each a loop of render-frame /
//! read-operation / mutate-state until a commit, a back-step or a cancel. A
//! frame is always: the shared header lines, a message line, then the
//! variant-specific body; the whole frame goes through the differential
//! display with an explicit cursor position.
//!
//! Executors signal outcomes uniformly:
//! - `Ok(Some(result))` — committed;
//! - `Ok(None)` — the user pressed Escape (back one prompt);
//! - `Err(PromptError::Interrupted)` — the user pressed the interrupt key.

pub(crate) mod choice;
pub(crate) mod confirm;
pub(crate) mod input;
pub(crate) mod select;
pub(crate) mod text;

use std::io;

use asker_keymap::{BindingReader, KeyMap};
use asker_render::Display;
use asker_style::{Span, StyledLine};
use asker_term::PromptTerminal;

use crate::config::{self, PrompterConfig};
use crate::error::{PromptError, Result};
use crate::prompt::{Prompt, PromptKind};
use crate::result::PromptResult;

/// Per-run executor context: the terminal, the display, the binding reader
/// and the configuration, borrowed together so executors can interleave
/// reads and renders.
pub(crate) struct Session<'a> {
    pub term: &'a mut PromptTerminal,
    pub display: &'a mut Display,
    pub binding: &'a mut BindingReader,
    pub config: &'a PrompterConfig,
}

impl Session<'_> {
    /// Render one frame. Terminal size is re-read here, once per frame.
    pub fn render(&mut self, lines: &[StyledLine], cursor: (u16, u16)) -> Result<()> {
        let size = self.term.size();
        let (_, writer) = self.term.io();
        self.display
            .update(writer, lines, cursor, size)
            .map_err(PromptError::Io)
    }

    /// Read the next operation token.
    pub fn read_op<T: Clone>(&mut self, map: &KeyMap<T>) -> Result<T> {
        let (reader, _) = self.term.io();
        self.binding.read_binding(reader, map).ok_or_else(|| {
            PromptError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream ended mid-prompt",
            ))
        })
    }

    /// The character behind the last `unicode`/printable binding.
    pub fn last_char(&self) -> Option<char> {
        self.binding.last_binding().chars().next()
    }

    /// The standard message line: marker, message, optional answer echo.
    pub fn message_line(&self, message: &str, answer: Option<&str>) -> StyledLine {
        create_message(self.config, message, answer)
    }
}

/// Build `? message answer` with the `pr`/`me`/`an` styles. The answer span
/// is omitted (not rendered empty) when there is none.
pub(crate) fn create_message(
    config: &PrompterConfig,
    message: &str,
    answer: Option<&str>,
) -> StyledLine {
    let mut line = StyledLine::new();
    line.push(Span::styled("? ", config.style(config::PR)));
    line.push(Span::styled(format!("{message} "), config.style(config::ME)));
    if let Some(answer) = answer {
        line.push(Span::styled(answer, config.style(config::AN)));
    }
    line
}

/// Run the executor matching the prompt variant.
pub(crate) fn execute(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
) -> Result<Option<PromptResult>> {
    match prompt.kind() {
        PromptKind::Input(payload) => input::run(sess, header, prompt, payload),
        PromptKind::List(payload) => select::run_list(sess, header, prompt, payload),
        PromptKind::Checkbox(payload) => select::run_checkbox(sess, header, prompt, payload),
        PromptKind::Choice(payload) => choice::run(sess, header, prompt, payload),
        PromptKind::Confirm(payload) => confirm::run(sess, header, prompt, payload),
        PromptKind::Text(payload) => text::run(sess, header, payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_line_spans_and_answer() {
        let config = PrompterConfig::defaults();
        let line = create_message(&config, "Pick one", None);
        assert_eq!(line.to_unstyled(), "? Pick one ");

        let with_answer = create_message(&config, "Pick one", Some("left"));
        assert_eq!(with_answer.to_unstyled(), "? Pick one left");
        let last = with_answer.spans().last().unwrap();
        assert_eq!(last.text, "left");
        assert_eq!(last.style, config.style(config::AN));
    }
}
