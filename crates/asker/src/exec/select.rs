#![forbid(unsafe_code)]

//! List and checkbox executors.
//!
//! Both run the same grid loop: compute the layout for the current terminal
//! size, render the visible cells, read one operation, move the cursor.
//! They differ only in the cell rendering (a checkbox column) and in the
//! commit payload (one index vs. the toggled set), so the loop is shared and
//! parameterised by per-item cell data.

use std::collections::BTreeSet;

use asker_keymap::KeyMap;
use asker_style::{Span, StyledLine};
use asker_term::Capabilities;
use unicode_width::UnicodeWidthStr;

use crate::config::{self, PrompterConfig};
use crate::error::{PromptError, Result};
use crate::grid::{self, GridLayout, ListRange, MARGIN_BETWEEN_COLUMNS};
use crate::prompt::{CheckboxPrompt, ListPrompt, Prompt, PromptItem};
use crate::result::PromptResult;

use super::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectOp {
    ForwardOneLine,
    BackwardOneLine,
    ForwardOneColumn,
    BackwardOneColumn,
    Insert,
    Toggle,
    Exit,
    Cancel,
    Escape,
    /// Unmatched keys are swallowed.
    Ignore,
}

fn keymap(caps: &Capabilities, multi_column: bool, with_insert: bool) -> KeyMap<SelectOp> {
    let mut map = KeyMap::new();
    if with_insert {
        // Shortcut jumping: printable characters first, navigation keys
        // rebound over them below.
        map.bind_printable_ascii(SelectOp::Insert);
    } else {
        map.bind(SelectOp::Toggle, " ");
    }

    map.bind_all(
        SelectOp::ForwardOneLine,
        &["e", "\x05", caps.key_down, caps.app_key_down],
    );
    map.bind_all(
        SelectOp::BackwardOneLine,
        &["y", "\x19", caps.key_up, caps.app_key_up],
    );
    if multi_column {
        map.bind_all(
            SelectOp::ForwardOneColumn,
            &[caps.key_right, caps.app_key_right],
        );
        map.bind_all(
            SelectOp::BackwardOneColumn,
            &[caps.key_left, caps.app_key_left],
        );
    }

    map.bind(SelectOp::Exit, "\r");
    map.bind(SelectOp::Escape, "\x1b");
    map.bind(SelectOp::Cancel, "\x03");
    map.set_nomatch(SelectOp::Ignore);
    map
}

// ── Cell data ────────────────────────────────────────────────────────────

/// Checkbox column content of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckCol {
    Checked,
    Unchecked,
    Unavailable,
    /// Separator rows keep the column width without a glyph.
    Pad,
}

/// Everything needed to render one grid cell.
#[derive(Debug, Clone, Copy)]
struct CellData<'a> {
    text: &'a str,
    selectable: bool,
    disabled: bool,
    disabled_text: &'a str,
    key: Option<char>,
}

impl<'a> CellData<'a> {
    fn from_item(item: &'a impl PromptItem) -> Self {
        Self {
            text: item.text(),
            selectable: item.selectable(),
            disabled: item.disabled(),
            disabled_text: item.disabled_text(),
            key: item.key(),
        }
    }

    fn key_prefix(&self) -> String {
        self.key.map(|k| format!("{k} - ")).unwrap_or_default()
    }
}

/// Widest cell in terminal cells: indicator, space, optional checkbox glyph,
/// key prefix and text.
fn max_cell_width(config: &PrompterConfig, cells: &[CellData<'_>], checkbox: bool) -> usize {
    let indicator = config.indicator().width() + 1;
    let boxes = if checkbox {
        config
            .checked_box()
            .width()
            .max(config.unchecked_box().width())
    } else {
        0
    };
    let text = cells
        .iter()
        .map(|c| c.text.width() + c.key_prefix().width())
        .max()
        .unwrap_or(0);
    indicator + boxes + text
}

/// Render one cell as a styled line fragment.
fn render_cell(
    config: &PrompterConfig,
    cell: &CellData<'_>,
    selected: bool,
    check: Option<CheckCol>,
) -> StyledLine {
    let mut line = StyledLine::new();
    let pad = " ".repeat(config.indicator().width());

    if selected {
        line.push(Span::styled(config.indicator(), config.style(config::CU)));
    } else {
        line.push(Span::plain(pad));
    }

    match check {
        Some(check) => {
            line.push(Span::plain(" "));
            match check {
                CheckCol::Checked => {
                    line.push(Span::styled(config.checked_box(), config.style(config::BE)));
                }
                CheckCol::Unchecked => {
                    line.push(Span::styled(
                        config.unchecked_box(),
                        config.style(config::BE),
                    ));
                }
                CheckCol::Unavailable => {
                    line.push(Span::styled(config.unavailable(), config.style(config::BD)));
                }
                CheckCol::Pad => {
                    line.push(Span::plain(" ".repeat(config.checked_box().width())));
                }
            }
            line.push(Span::styled(cell.text, config.style(config::CB)));
            if cell.disabled {
                line.push(Span::plain(" ("));
                line.push(Span::styled(cell.disabled_text, config.style(config::BD)));
                line.push(Span::plain(")"));
            }
        }
        None if selected => {
            line.push(Span::styled(
                format!(" {}{}", cell.key_prefix(), cell.text),
                config.style(config::SE),
            ));
        }
        None if cell.selectable => {
            line.push(Span::plain(format!(" {}{}", cell.key_prefix(), cell.text)));
        }
        None if cell.disabled => {
            line.push(Span::plain(format!(" {}", cell.key_prefix())));
            line.push(Span::styled(cell.text, config.style(config::BD)));
            line.push(Span::plain(" ("));
            line.push(Span::styled(cell.disabled_text, config.style(config::BD)));
            line.push(Span::plain(")"));
        }
        None => {
            // Separator.
            line.push(Span::styled(cell.text, config.style(config::BD)));
        }
    }

    line
}

// ── Shared grid loop ─────────────────────────────────────────────────────

struct GridCommit {
    index: usize,
    checked: Vec<bool>,
}

/// The shared input loop. `checked` is ignored for lists; `with_insert`
/// (shortcut jumping) is active only for lists.
#[allow(clippy::too_many_lines)]
fn run_grid(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    message: &str,
    cells: &[CellData<'_>],
    checkbox: bool,
    mut checked: Vec<bool>,
) -> Result<Option<GridCommit>> {
    let mask: Vec<bool> = cells.iter().map(|c| c.selectable).collect();
    let mut cursor = grid::first_selectable(&mask).unwrap_or(0);
    let mut range: Option<ListRange> = None;
    let map_single = keymap(sess.term.caps(), false, !checkbox);
    let map_multi = keymap(sess.term.caps(), true, !checkbox);

    loop {
        let (rows, cols) = sess.term.size();
        let first_item_row = header.len() + 1;
        let available_rows = (rows as usize).saturating_sub(first_item_row).max(1);

        let layout = GridLayout::compute(
            cells.len(),
            max_cell_width(sess.config, cells, checkbox),
            cols as usize,
            available_rows,
        );

        let check_of = |idx: usize| -> Option<CheckCol> {
            if !checkbox {
                return None;
            }
            let cell = &cells[idx];
            Some(if cell.selectable {
                if checked[idx] {
                    CheckCol::Checked
                } else {
                    CheckCol::Unchecked
                }
            } else if cell.disabled {
                CheckCol::Unavailable
            } else {
                CheckCol::Pad
            })
        };

        let mut lines: Vec<StyledLine> = header.to_vec();
        lines.push(sess.message_line(message, None));

        if layout.columns == 1 {
            let window = grid::compute_range(range, cursor, cells.len(), available_rows);
            range = Some(window);
            for idx in window.first..window.last.min(cells.len()) {
                lines.push(render_cell(
                    sess.config,
                    &cells[idx],
                    idx == cursor,
                    check_of(idx),
                ));
            }
        } else {
            range = None;
            let column_width = layout.column_width(cols as usize);
            for row in 0..layout.lines {
                let mut line = StyledLine::new();
                for col in 0..layout.columns {
                    let Some(idx) = layout.grid_to_index(row, col, cells.len()) else {
                        continue;
                    };
                    let mut cell =
                        render_cell(sess.config, &cells[idx], idx == cursor, check_of(idx));
                    cell = cell.truncated(column_width);
                    cell.pad_to(column_width);
                    line.extend(cell);
                    if col + 1 < layout.columns {
                        line.push(Span::plain(" ".repeat(MARGIN_BETWEEN_COLUMNS)));
                    }
                }
                lines.push(line);
            }
        }

        let park_row = (rows.saturating_sub(1)).min((first_item_row + cells.len()) as u16);
        sess.render(&lines, (park_row, 0))?;

        let map = if layout.columns > 1 {
            &map_multi
        } else {
            &map_single
        };
        match sess.read_op(map)? {
            SelectOp::ForwardOneLine => cursor = grid::next_row(&mask, cursor),
            SelectOp::BackwardOneLine => cursor = grid::prev_row(&mask, cursor),
            SelectOp::ForwardOneColumn => cursor = grid::next_column(&layout, &mask, cursor),
            SelectOp::BackwardOneColumn => cursor = grid::prev_column(&layout, &mask, cursor),
            SelectOp::Insert => {
                if let Some(c) = sess.last_char() {
                    if let Some(idx) = cells
                        .iter()
                        .position(|cell| cell.selectable && cell.key == Some(c))
                    {
                        cursor = idx;
                    }
                }
            }
            SelectOp::Toggle => {
                if mask[cursor] {
                    checked[cursor] = !checked[cursor];
                }
            }
            SelectOp::Exit => {
                return Ok(Some(GridCommit {
                    index: cursor,
                    checked,
                }));
            }
            SelectOp::Escape => return Ok(None),
            SelectOp::Cancel => return Err(PromptError::Interrupted),
            SelectOp::Ignore => {}
        }
    }
}

// ── Entry points ─────────────────────────────────────────────────────────

pub(crate) fn run_list(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
    payload: &ListPrompt,
) -> Result<Option<PromptResult>> {
    // No selectable item: commit the sentinel immediately.
    if !payload.items.iter().any(|i| i.selectable()) {
        return Ok(Some(PromptResult::List(String::new())));
    }

    let cells: Vec<CellData<'_>> = payload.items.iter().map(CellData::from_item).collect();
    match run_grid(sess, header, prompt.message(), &cells, false, Vec::new())? {
        Some(commit) => Ok(Some(PromptResult::List(
            payload.items[commit.index].name().to_string(),
        ))),
        None => Ok(None),
    }
}

pub(crate) fn run_checkbox(
    sess: &mut Session<'_>,
    header: &[StyledLine],
    prompt: &Prompt,
    payload: &CheckboxPrompt,
) -> Result<Option<PromptResult>> {
    // Initial checked set: only selectable items count, keeping the
    // committed set a subset of the selectable names.
    let checked: Vec<bool> = payload
        .items
        .iter()
        .map(|i| i.selectable() && i.initially_checked())
        .collect();

    if !payload.items.iter().any(|i| i.selectable()) {
        return Ok(Some(PromptResult::Checkbox(collect_checked(
            payload, &checked,
        ))));
    }

    let cells: Vec<CellData<'_>> = payload.items.iter().map(CellData::from_item).collect();
    match run_grid(sess, header, prompt.message(), &cells, true, checked)? {
        Some(commit) => Ok(Some(PromptResult::Checkbox(collect_checked(
            payload,
            &commit.checked,
        )))),
        None => Ok(None),
    }
}

fn collect_checked(payload: &CheckboxPrompt, checked: &[bool]) -> BTreeSet<String> {
    payload
        .items
        .iter()
        .zip(checked)
        .filter(|(_, &on)| on)
        .map(|(item, _)| item.name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{CheckboxItem, ListItem};

    fn cfg() -> PrompterConfig {
        PrompterConfig::unix()
    }

    fn cell(item: &ListItem) -> CellData<'_> {
        CellData::from_item(item)
    }

    #[test]
    fn selected_cell_leads_with_indicator() {
        let item = ListItem::new("a", "Alpha");
        let line = render_cell(&cfg(), &cell(&item), true, None);
        assert!(line.to_unstyled().starts_with("\u{276F} Alpha"));
        assert_eq!(line.spans()[0].style, cfg().style(config::CU));
    }

    #[test]
    fn unselected_cell_pads_indicator_width() {
        let item = ListItem::new("a", "Alpha");
        let line = render_cell(&cfg(), &cell(&item), false, None);
        assert_eq!(line.to_unstyled(), "  Alpha");
    }

    #[test]
    fn key_prefix_precedes_text() {
        let item = ListItem::new("a", "Alpha").with_key('a');
        let line = render_cell(&cfg(), &cell(&item), false, None);
        assert_eq!(line.to_unstyled(), "  a - Alpha");
    }

    #[test]
    fn disabled_cell_shows_reason() {
        let item = ListItem::new("a", "Alpha").with_disabled("coming soon");
        let line = render_cell(&cfg(), &cell(&item), false, None);
        assert_eq!(line.to_unstyled(), "  Alpha (coming soon)");
    }

    #[test]
    fn separator_renders_text_only() {
        let item = ListItem::separator("── group ──");
        let line = render_cell(&cfg(), &cell(&item), false, None);
        assert_eq!(line.to_unstyled(), " ── group ──");
    }

    #[test]
    fn checkbox_cell_glyphs() {
        let item = CheckboxItem::new("x", "X");
        let data = CellData::from_item(&item);
        let checked = render_cell(&cfg(), &data, false, Some(CheckCol::Checked));
        assert_eq!(checked.to_unstyled(), "  \u{25C9} X");
        let unchecked = render_cell(&cfg(), &data, false, Some(CheckCol::Unchecked));
        assert_eq!(unchecked.to_unstyled(), "  \u{25EF} X");
    }

    #[test]
    fn checkbox_unavailable_glyph_and_reason() {
        let item = CheckboxItem::new("x", "X").with_disabled("locked");
        let data = CellData::from_item(&item);
        let line = render_cell(&cfg(), &data, false, Some(CheckCol::Unavailable));
        assert_eq!(line.to_unstyled(), "  \u{229D} X (locked)");
    }

    #[test]
    fn max_width_includes_prefixes() {
        let items = [
            ListItem::new("a", "ab").with_key('a'),
            ListItem::new("b", "cdef"),
        ];
        let cells: Vec<_> = items.iter().map(CellData::from_item).collect();
        // indicator "❯" (1) + space + max("a - ab" = 6, "cdef" = 4) = 8.
        assert_eq!(max_cell_width(&cfg(), &cells, false), 8);
    }
}
