#![forbid(unsafe_code)]

//! Static text executor: display the block, commit immediately.

use asker_style::StyledLine;

use crate::error::Result;
use crate::prompt::TextPrompt;
use crate::result::PromptResult;

use super::Session;

pub(crate) fn run(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    payload: &TextPrompt,
) -> Result<Option<PromptResult>> {
    let mut lines: Vec<StyledLine> = header.to_vec();
    lines.extend(payload.lines.iter().cloned());
    let park_row = lines.len().saturating_sub(1) as u16;
    sess.render(&lines, (park_row, 0))?;
    Ok(Some(PromptResult::Text))
}
