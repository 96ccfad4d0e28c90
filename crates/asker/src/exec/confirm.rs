#![forbid(unsafe_code)]

//! Yes/no confirmation executor.
//!
//! The suffix advertises the default (`(y/N)` or `(Y/n)`); `y`/`n` flip the
//! pending answer and echo it, Enter commits whatever is pending.

use asker_keymap::KeyMap;
use asker_style::{Span, StyledLine};

use crate::config;
use crate::error::{PromptError, Result};
use crate::prompt::{ConfirmPrompt, Prompt};
use crate::result::{Confirmation, PromptResult};

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmOp {
    Yes,
    No,
    Exit,
    Cancel,
    Escape,
}

fn keymap() -> KeyMap<ConfirmOp> {
    let mut map = KeyMap::new();
    map.bind_all(ConfirmOp::Yes, &["y", "Y"]);
    map.bind_all(ConfirmOp::No, &["n", "N"]);
    map.bind(ConfirmOp::Exit, "\r");
    map.bind(ConfirmOp::Cancel, "\x03");
    map.bind(ConfirmOp::Escape, "\x1b");
    map
}

pub(crate) fn run(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
    payload: &ConfirmPrompt,
) -> Result<Option<PromptResult>> {
    let map = keymap();
    let mut value = if payload.default_yes {
        Confirmation::Yes
    } else {
        Confirmation::No
    };
    let mut echo: Option<char> = None;

    let suffix = if payload.default_yes { "(Y/n) " } else { "(y/N) " };

    loop {
        let mut message = sess.message_line(prompt.message(), None);
        message.push(Span::plain(suffix));
        let prefix_width = message.width();
        if let Some(c) = echo {
            message.push(Span::styled(
                c.to_string(),
                sess.config.style(config::AN),
            ));
        }

        let mut lines: Vec<StyledLine> = header.to_vec();
        let message_row = lines.len() as u16;
        let cursor_col = (prefix_width + usize::from(echo.is_some())) as u16;
        lines.push(message);
        sess.render(&lines, (message_row, cursor_col))?;

        match sess.read_op(&map)? {
            ConfirmOp::Yes => {
                value = Confirmation::Yes;
                echo = Some('y');
            }
            ConfirmOp::No => {
                value = Confirmation::No;
                echo = Some('n');
            }
            ConfirmOp::Exit => return Ok(Some(PromptResult::Confirm(value))),
            ConfirmOp::Escape => return Ok(None),
            ConfirmOp::Cancel => return Err(PromptError::Interrupted),
        }
    }
}
