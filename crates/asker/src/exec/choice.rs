#![forbid(unsafe_code)]

//! Single-key choice executor.
//!
//! No cursor: all choices print once, then a `Choice:` line waits for a
//! printable character matching a selectable item's shortcut
//! (case-insensitive). Enter commits the default choice when one exists and
//! echoes its key; with no default, Enter keeps waiting. The committed frame
//! re-renders the choice line with the chosen key.

use asker_keymap::KeyMap;
use asker_style::{Span, StyledLine};

use crate::config;
use crate::error::{PromptError, Result};
use crate::prompt::{ChoiceItem, ChoicePrompt, Prompt, PromptItem};
use crate::result::PromptResult;

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChoiceOp {
    Insert,
    Exit,
    Cancel,
    Escape,
}

fn keymap() -> KeyMap<ChoiceOp> {
    let mut map = KeyMap::new();
    map.set_unicode(ChoiceOp::Insert);
    map.bind_printable_ascii(ChoiceOp::Insert);
    map.bind(ChoiceOp::Exit, "\r");
    map.bind(ChoiceOp::Escape, "\x1b");
    map.bind(ChoiceOp::Cancel, "\x03");
    map
}

pub(crate) fn run(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
    payload: &ChoicePrompt,
) -> Result<Option<PromptResult>> {
    if !payload.items.iter().any(|i| i.selectable()) {
        return Ok(Some(PromptResult::Choice(String::new())));
    }

    let default_choice = payload
        .items
        .iter()
        .find(|i| i.is_default() && i.selectable());

    let mut lines: Vec<StyledLine> = header.to_vec();
    lines.push(sess.message_line(prompt.message(), None));
    lines.push(StyledLine::new());
    for item in payload.items.iter().filter(|i| i.selectable()) {
        lines.push(item_line(sess, item));
    }
    let choice_row = lines.len();
    lines.push(choice_line(sess, None));

    let map = keymap();
    loop {
        let cursor_col = lines[choice_row].width() as u16;
        sess.render(&lines, (choice_row as u16, cursor_col))?;

        match sess.read_op(&map)? {
            ChoiceOp::Insert => {
                let Some(c) = sess.last_char() else { continue };
                let hit = payload.items.iter().find(|i| {
                    i.selectable() && i.key().is_some_and(|k| k.eq_ignore_ascii_case(&c))
                });
                if let Some(item) = hit {
                    return commit(sess, &mut lines, choice_row, c, item);
                }
                // No matching shortcut: keep waiting.
            }
            ChoiceOp::Exit => {
                if let Some(item) = default_choice {
                    let key = item.key().unwrap_or(' ');
                    return commit(sess, &mut lines, choice_row, key, item);
                }
            }
            ChoiceOp::Escape => return Ok(None),
            ChoiceOp::Cancel => return Err(PromptError::Interrupted),
        }
    }
}

/// Re-render the choice line with the chosen key and return the result.
fn commit(
    sess: &mut Session<'_>,
    lines: &mut [StyledLine],
    choice_row: usize,
    key: char,
    item: &ChoiceItem,
) -> Result<Option<PromptResult>> {
    lines[choice_row] = choice_line(sess, Some(key));
    let cursor_col = lines[choice_row].width() as u16;
    sess.render(lines, (choice_row as u16, cursor_col))?;
    Ok(Some(PromptResult::Choice(item.name().to_string())))
}

fn item_line(sess: &Session<'_>, item: &ChoiceItem) -> StyledLine {
    let mut line = StyledLine::new();
    line.push(Span::plain("  "));
    if let Some(key) = item.key() {
        if key != ' ' {
            line.push(Span::styled(
                format!("{key}) "),
                sess.config.style(config::CU),
            ));
        }
    }
    line.push(Span::plain(item.text()));
    if item.is_default() {
        line.push(Span::styled(" (default)", sess.config.style(config::AN)));
    }
    line
}

fn choice_line(sess: &Session<'_>, answer: Option<char>) -> StyledLine {
    let mut line = StyledLine::new();
    line.push(Span::styled("Choice: ", sess.config.style(config::PR)));
    if let Some(c) = answer {
        line.push(Span::styled(c.to_string(), sess.config.style(config::AN)));
    }
    line
}
