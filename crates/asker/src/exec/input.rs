#![forbid(unsafe_code)]

//! Free-text input executor.
//!
//! Maintains a character buffer and a column cursor; a parallel display
//! string substitutes the mask character when one is set. Enter on an empty
//! buffer commits the default value when present. A failing validator writes
//! a one-line error below the prompt and keeps the loop alive.

use asker_keymap::KeyMap;
use asker_style::{Color, Span, Style, StyledLine};
use asker_term::Capabilities;
use unicode_width::UnicodeWidthChar;

use crate::error::{PromptError, Result};
use crate::prompt::{InputPrompt, Prompt};
use crate::result::PromptResult;

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputOp {
    Insert,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    BeginningOfLine,
    EndOfLine,
    SelectCandidate,
    Exit,
    Cancel,
    Escape,
}

fn keymap(caps: &Capabilities) -> KeyMap<InputOp> {
    let mut map = KeyMap::new();
    map.set_unicode(InputOp::Insert);
    map.bind_printable_ascii(InputOp::Insert);

    map.bind_all(InputOp::Backspace, &["\x08", "\x7f"]);
    map.bind(InputOp::Delete, caps.key_delete);
    map.bind_all(InputOp::Exit, &["\r", "\n"]);
    map.bind(InputOp::Cancel, "\x03");
    map.bind(InputOp::Escape, "\x1b");
    map.bind_all(InputOp::Left, &[caps.key_left, caps.app_key_left]);
    map.bind_all(InputOp::Right, &[caps.key_right, caps.app_key_right]);
    map.bind_all(InputOp::Up, &[caps.key_up, caps.app_key_up]);
    map.bind_all(InputOp::Down, &[caps.key_down, caps.app_key_down]);
    map.bind(InputOp::BeginningOfLine, "\x01");
    map.bind(InputOp::EndOfLine, "\x05");
    map.bind(InputOp::BeginningOfLine, caps.key_home);
    map.bind(InputOp::EndOfLine, caps.key_end);
    map.bind(InputOp::SelectCandidate, "\t");
    map
}

pub(crate) fn run(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
    payload: &InputPrompt,
) -> Result<Option<PromptResult>> {
    let map = keymap(sess.term.caps());
    let mut buf: Vec<char> = Vec::new();
    let mut cursor = 0usize;
    let mut error: Option<String> = None;

    loop {
        // Message prefix: "? message " plus the echoed default.
        let mut message = sess.message_line(prompt.message(), None);
        if let Some(default) = &payload.default_value {
            message.push(Span::plain(format!("({default}) ")));
        }
        let prefix_width = message.width();

        // Echo the buffer, masked when requested.
        let echo: String = match payload.mask {
            Some(mask) => std::iter::repeat(mask).take(buf.len()).collect(),
            None => buf.iter().collect(),
        };
        message.push(Span::plain(echo));

        let mut lines: Vec<StyledLine> = header.to_vec();
        let message_row = lines.len() as u16;
        lines.push(message);
        if let Some(msg) = &error {
            lines.push(StyledLine::styled(
                format!("Error: {msg}"),
                Style::new().fg(Color::RED),
            ));
        }

        let cursor_col = prefix_width + echo_width(&buf, cursor, payload.mask);
        sess.render(&lines, (message_row, cursor_col as u16))?;

        match sess.read_op(&map)? {
            InputOp::Insert => {
                if let Some(c) = sess.last_char() {
                    buf.insert(cursor, c);
                    cursor += 1;
                    error = None;
                }
            }
            InputOp::Backspace => {
                if cursor > 0 {
                    cursor -= 1;
                    buf.remove(cursor);
                    error = None;
                }
            }
            InputOp::Delete => {
                if cursor < buf.len() {
                    buf.remove(cursor);
                    error = None;
                }
            }
            InputOp::Left => cursor = cursor.saturating_sub(1),
            InputOp::Right => cursor = (cursor + 1).min(buf.len()),
            InputOp::BeginningOfLine => cursor = 0,
            InputOp::EndOfLine => cursor = buf.len(),
            // Line movement and completion have no meaning in a one-line
            // buffer; bound so the sequences don't leak as characters.
            InputOp::Up | InputOp::Down | InputOp::SelectCandidate => {}
            InputOp::Exit => {
                let typed: String = buf.iter().collect();
                let value = if typed.is_empty() {
                    payload.default_value.clone().unwrap_or(typed)
                } else {
                    typed
                };
                if let Some(validator) = &payload.validator {
                    if let Err(msg) = validator(&value) {
                        tracing::debug!(name = prompt.name(), %msg, "input rejected by validator");
                        error = Some(msg);
                        continue;
                    }
                }
                return Ok(Some(PromptResult::Input(value)));
            }
            InputOp::Escape => return Ok(None),
            InputOp::Cancel => return Err(PromptError::Interrupted),
        }
    }
}

/// Cell width of the echo up to the cursor position.
fn echo_width(buf: &[char], cursor: usize, mask: Option<char>) -> usize {
    match mask {
        Some(mask) => mask.width().unwrap_or(0) * cursor,
        None => buf[..cursor]
            .iter()
            .map(|c| c.width().unwrap_or(0))
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_width_counts_cells() {
        let buf: Vec<char> = "a你b".chars().collect();
        assert_eq!(echo_width(&buf, 0, None), 0);
        assert_eq!(echo_width(&buf, 2, None), 3);
        assert_eq!(echo_width(&buf, 3, None), 4);
    }

    #[test]
    fn echo_width_with_mask_is_uniform() {
        let buf: Vec<char> = "a你b".chars().collect();
        assert_eq!(echo_width(&buf, 3, Some('*')), 3);
    }
}
