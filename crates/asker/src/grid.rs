#![forbid(unsafe_code)]

//! Grid layout, navigation and pagination shared by the list and checkbox
//! executors.
//!
//! Items live in a conceptual 2D grid. Layout is recomputed every frame from
//! the current terminal size; navigation works on item indices with a
//! selectability mask, so both executors share it and differ only in how a
//! cell is rendered.
//!
//! # Invariant
//!
//! Every navigation function returns an index whose mask entry is `true`
//! whenever at least one entry is `true`; the cursor can never land on a
//! separator or disabled item.

/// Below this many items the layout is always a single column.
pub const MIN_ITEMS_FOR_MULTICOLUMN: usize = 6;

/// Cells of whitespace between columns.
pub const MARGIN_BETWEEN_COLUMNS: usize = 2;

/// Grid shape for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of columns (≥ 1).
    pub columns: usize,
    /// Number of grid lines (≥ 1).
    pub lines: usize,
    /// Row-first (`true`, default) or column-first item ordering.
    pub rows_first: bool,
}

impl GridLayout {
    /// A single-column layout for `count` items.
    #[must_use]
    pub fn single_column(count: usize) -> Self {
        Self {
            columns: 1,
            lines: count.max(1),
            rows_first: true,
        }
    }

    /// Compute the layout for one frame.
    ///
    /// `max_item_width` is the widest rendered cell in terminal cells
    /// (indicator, glyphs and key prefix included). Fewer than
    /// [`MIN_ITEMS_FOR_MULTICOLUMN`] items force a single column; otherwise
    /// as many columns as fit are used, clamped by the item count, and the
    /// column count grows further if the line count would exceed
    /// `available_rows`.
    #[must_use]
    pub fn compute(
        count: usize,
        max_item_width: usize,
        term_cols: usize,
        available_rows: usize,
    ) -> Self {
        if count < MIN_ITEMS_FOR_MULTICOLUMN {
            return Self::single_column(count);
        }

        let mut columns = (term_cols / (max_item_width + MARGIN_BETWEEN_COLUMNS)).max(1);
        columns = columns.min(count);
        let mut lines = count.div_ceil(columns);

        if lines > available_rows && available_rows > 0 {
            lines = available_rows;
            columns = count.div_ceil(lines);
        }

        Self {
            columns,
            lines,
            rows_first: true,
        }
    }

    /// Map an item index to its `(row, col)` grid position.
    #[must_use]
    pub fn index_to_grid(&self, index: usize) -> (usize, usize) {
        if self.rows_first {
            (index / self.columns, index % self.columns)
        } else {
            (index % self.lines, index / self.lines)
        }
    }

    /// Map a grid position back to an item index; `None` when the cell is
    /// past the last item.
    #[must_use]
    pub fn grid_to_index(&self, row: usize, col: usize, count: usize) -> Option<usize> {
        let index = if self.rows_first {
            row * self.columns + col
        } else {
            col * self.lines + row
        };
        (index < count).then_some(index)
    }

    /// Width of one column cell given the terminal width.
    #[must_use]
    pub fn column_width(&self, term_cols: usize) -> usize {
        (term_cols.saturating_sub((self.columns - 1) * MARGIN_BETWEEN_COLUMNS)) / self.columns
    }
}

// ── Navigation ───────────────────────────────────────────────────────────

/// First selectable index, scanning forward from zero.
#[must_use]
pub fn first_selectable(mask: &[bool]) -> Option<usize> {
    mask.iter().position(|&s| s)
}

/// Next selectable index after `cur`, wrapping past the end.
#[must_use]
pub fn next_row(mask: &[bool], cur: usize) -> usize {
    let count = mask.len();
    for step in 1..=count {
        let idx = (cur + step) % count;
        if mask[idx] {
            return idx;
        }
    }
    cur
}

/// Previous selectable index before `cur`, wrapping past the start.
#[must_use]
pub fn prev_row(mask: &[bool], cur: usize) -> usize {
    let count = mask.len();
    for step in 1..=count {
        let idx = (cur + count - step) % count;
        if mask[idx] {
            return idx;
        }
    }
    cur
}

/// Move one column right within the current row (wrapping by column). Falls
/// back to the next selectable item when the landing cell is missing or not
/// selectable.
#[must_use]
pub fn next_column(layout: &GridLayout, mask: &[bool], cur: usize) -> usize {
    let (row, col) = layout.index_to_grid(cur);
    let col = (col + 1) % layout.columns;
    match layout.grid_to_index(row, col, mask.len()) {
        Some(idx) if mask[idx] => idx,
        _ => next_row(mask, cur),
    }
}

/// Move one column left within the current row (wrapping by column). Falls
/// back to the previous selectable item when the landing cell is missing or
/// not selectable.
#[must_use]
pub fn prev_column(layout: &GridLayout, mask: &[bool], cur: usize) -> usize {
    let (row, col) = layout.index_to_grid(cur);
    let col = (col + layout.columns - 1) % layout.columns;
    match layout.grid_to_index(row, col, mask.len()) {
        Some(idx) if mask[idx] => idx,
        _ => prev_row(mask, cur),
    }
}

// ── Pagination ───────────────────────────────────────────────────────────

/// Visible window `[first, last)` over single-column items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRange {
    /// First visible item index.
    pub first: usize,
    /// One past the last visible item index.
    pub last: usize,
}

/// Recompute the sliding pagination window for the current frame.
///
/// A still-valid previous window (cursor strictly inside, with one row of
/// lookahead at the bottom) is reused; otherwise the window is recentred so
/// the cursor sits near the bottom with a single-row lookahead.
#[must_use]
pub fn compute_range(
    prev: Option<ListRange>,
    cursor: usize,
    count: usize,
    visible_rows: usize,
) -> ListRange {
    if let Some(range) = prev {
        if range.first <= cursor && range.last > cursor + 1 {
            return range;
        }
    }

    if visible_rows >= count {
        return ListRange {
            first: 0,
            last: count,
        };
    }

    if cursor + 1 < visible_rows {
        ListRange {
            first: 0,
            last: visible_rows,
        }
    } else {
        ListRange {
            first: cursor + 2 - visible_rows,
            last: (cursor + 2).min(count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_items_force_single_column() {
        let layout = GridLayout::compute(5, 10, 200, 20);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.lines, 5);
    }

    #[test]
    fn columns_fit_terminal_width() {
        // 10 items, cells 18 wide + 2 margin = 20 per column, 80 cols → 4.
        let layout = GridLayout::compute(10, 18, 80, 20);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.lines, 3);
    }

    #[test]
    fn columns_clamped_by_item_count() {
        let layout = GridLayout::compute(6, 4, 200, 20);
        assert_eq!(layout.columns, 6);
        assert_eq!(layout.lines, 1);
    }

    #[test]
    fn columns_grow_when_height_is_short() {
        // 12 items would be 1 column × 12 lines at this width, but only 4
        // rows are available → 3 columns.
        let layout = GridLayout::compute(12, 30, 40, 4);
        assert_eq!(layout.lines, 4);
        assert_eq!(layout.columns, 3);
    }

    #[test]
    fn grid_round_trip_row_first() {
        let layout = GridLayout {
            columns: 3,
            lines: 4,
            rows_first: true,
        };
        for idx in 0..10 {
            let (row, col) = layout.index_to_grid(idx);
            assert_eq!(layout.grid_to_index(row, col, 10), Some(idx));
        }
        assert_eq!(layout.grid_to_index(3, 2, 10), None);
    }

    #[test]
    fn grid_round_trip_column_first() {
        let layout = GridLayout {
            columns: 3,
            lines: 4,
            rows_first: false,
        };
        for idx in 0..12 {
            let (row, col) = layout.index_to_grid(idx);
            assert_eq!(layout.grid_to_index(row, col, 12), Some(idx));
        }
    }

    #[test]
    fn next_row_skips_and_wraps() {
        let mask = [true, false, true];
        assert_eq!(next_row(&mask, 0), 2);
        assert_eq!(next_row(&mask, 2), 0);
        assert_eq!(prev_row(&mask, 0), 2);
        assert_eq!(prev_row(&mask, 2), 0);
    }

    #[test]
    fn single_selectable_stays_put() {
        let mask = [false, true, false];
        assert_eq!(next_row(&mask, 1), 1);
        assert_eq!(prev_row(&mask, 1), 1);
    }

    #[test]
    fn column_moves_wrap_within_row() {
        let layout = GridLayout {
            columns: 3,
            lines: 2,
            rows_first: true,
        };
        let mask = [true; 6];
        assert_eq!(next_column(&layout, &mask, 0), 1);
        assert_eq!(next_column(&layout, &mask, 2), 0);
        assert_eq!(prev_column(&layout, &mask, 0), 2);
        assert_eq!(prev_column(&layout, &mask, 4), 3);
    }

    #[test]
    fn column_move_falls_back_past_unselectable() {
        let layout = GridLayout {
            columns: 3,
            lines: 1,
            rows_first: true,
        };
        let mask = [true, false, true];
        // Landing on index 1 is not selectable → fall through to linear next.
        assert_eq!(next_column(&layout, &mask, 0), 2);
    }

    #[test]
    fn column_move_falls_back_past_ragged_edge() {
        // 4 items in a 3×2 grid: cell (1, 2) is empty.
        let layout = GridLayout {
            columns: 3,
            lines: 2,
            rows_first: true,
        };
        let mask = [true; 4];
        assert_eq!(next_column(&layout, &mask, 3), 0);
    }

    #[test]
    fn range_fits_everything_when_possible() {
        let range = compute_range(None, 0, 5, 10);
        assert_eq!(range, ListRange { first: 0, last: 5 });
    }

    #[test]
    fn range_recentres_near_bottom() {
        // 20 items, 5 visible rows, cursor at 10 → window ends one past it.
        let range = compute_range(None, 10, 20, 5);
        assert_eq!(range, ListRange { first: 7, last: 12 });
    }

    #[test]
    fn range_reused_while_cursor_inside() {
        let prev = ListRange { first: 3, last: 9 };
        assert_eq!(compute_range(Some(prev), 5, 20, 6), prev);
        // Cursor at the lookahead boundary forces a recompute.
        assert_ne!(compute_range(Some(prev), 8, 20, 6), prev);
    }

    #[test]
    fn range_top_window_when_cursor_high() {
        let range = compute_range(None, 1, 20, 5);
        assert_eq!(range, ListRange { first: 0, last: 5 });
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Navigation never lands on a non-selectable item.
            #[test]
            fn cursor_stays_on_selectable(
                mask in prop::collection::vec(any::<bool>(), 1..40),
                ops in prop::collection::vec(0u8..4, 0..60),
                cols in 1usize..6,
            ) {
                prop_assume!(mask.iter().any(|&s| s));
                let layout = GridLayout {
                    columns: cols.min(mask.len()),
                    lines: mask.len().div_ceil(cols.min(mask.len())),
                    rows_first: true,
                };
                let mut cur = first_selectable(&mask).unwrap();
                for op in ops {
                    cur = match op {
                        0 => next_row(&mask, cur),
                        1 => prev_row(&mask, cur),
                        2 => next_column(&layout, &mask, cur),
                        _ => prev_column(&layout, &mask, cur),
                    };
                    prop_assert!(mask[cur]);
                }
            }

            /// The pagination window always contains the cursor.
            #[test]
            fn window_contains_cursor(
                count in 1usize..60,
                visible in 1usize..30,
                cursor_seed in 0usize..60,
            ) {
                let cursor = cursor_seed % count;
                let range = compute_range(None, cursor, count, visible);
                prop_assert!(range.first <= cursor);
                prop_assert!(range.last > cursor);
                prop_assert!(range.last <= count || count <= visible);
            }
        }
    }
}
