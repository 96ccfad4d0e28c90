#![forbid(unsafe_code)]

//! Width-aware styled text.
//!
//! A [`Span`] is a run of text under one [`Style`]; a [`StyledLine`] is the
//! sequence of spans making up one screen row. Lines are what the
//! differential renderer compares between frames, so both types compare by
//! value. Widths are measured in terminal cells (wide CJK/emoji count as
//! two), never in bytes or chars.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::style::Style;

/// A run of text under a single style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    /// The text content.
    pub text: String,
    /// The style applied to the whole run.
    pub style: Style,
}

impl Span {
    /// An unstyled span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    /// A styled span.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Display width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One screen row of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    spans: Vec<Span>,
}

impl StyledLine {
    /// An empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A line holding one unstyled span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::plain(text)],
        }
    }

    /// A line holding one styled span.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            spans: vec![Span::styled(text, style)],
        }
    }

    /// Append an unstyled run (builder).
    #[must_use]
    pub fn then(mut self, text: impl Into<String>) -> Self {
        self.push(Span::plain(text));
        self
    }

    /// Append a styled run (builder).
    #[must_use]
    pub fn then_styled(mut self, text: impl Into<String>, style: Style) -> Self {
        self.push(Span::styled(text, style));
        self
    }

    /// Append a span, merging with the previous one when styles match.
    pub fn push(&mut self, span: Span) {
        if span.text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == span.style {
                last.text.push_str(&span.text);
                return;
            }
        }
        self.spans.push(span);
    }

    /// Append another line's spans.
    pub fn extend(&mut self, other: StyledLine) {
        for span in other.spans {
            self.push(span);
        }
    }

    /// Pad with spaces up to `width` cells (no-op when already wider).
    pub fn pad_to(&mut self, width: usize) {
        let current = self.width();
        if current < width {
            self.push(Span::plain(" ".repeat(width - current)));
        }
    }

    /// The spans of this line.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Whether the line holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.text.is_empty())
    }

    /// Display width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The concatenated text without styling.
    #[must_use]
    pub fn to_unstyled(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// A copy truncated to at most `max_width` cells.
    ///
    /// Truncation is grapheme-aware: a wide grapheme that would straddle the
    /// limit is dropped entirely rather than split.
    #[must_use]
    pub fn truncated(&self, max_width: usize) -> StyledLine {
        if self.width() <= max_width {
            return self.clone();
        }
        let mut out = StyledLine::new();
        let mut used = 0usize;
        'spans: for span in &self.spans {
            let span_width = span.width();
            if used + span_width <= max_width {
                out.push(span.clone());
                used += span_width;
                continue;
            }
            let mut kept = String::new();
            for g in span.text.graphemes(true) {
                let w = g.width();
                if used + w > max_width {
                    if !kept.is_empty() {
                        out.push(Span::styled(kept, span.style));
                    }
                    break 'spans;
                }
                kept.push_str(g);
                used += w;
            }
            out.push(Span::styled(kept, span.style));
        }
        out
    }
}

impl From<&str> for StyledLine {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledLine {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl From<Span> for StyledLine {
    fn from(span: Span) -> Self {
        let mut line = Self::new();
        line.push(span);
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn width_counts_cells_not_bytes() {
        assert_eq!(StyledLine::plain("abc").width(), 3);
        // CJK is two cells per glyph.
        assert_eq!(StyledLine::plain("你好").width(), 4);
        assert_eq!(StyledLine::plain("é").width(), 1);
    }

    #[test]
    fn push_merges_equal_styles() {
        let mut line = StyledLine::plain("foo");
        line.push(Span::plain("bar"));
        assert_eq!(line.spans().len(), 1);
        assert_eq!(line.to_unstyled(), "foobar");

        line.push(Span::styled("!", Style::new().bold()));
        assert_eq!(line.spans().len(), 2);
    }

    #[test]
    fn push_drops_empty_spans() {
        let mut line = StyledLine::new();
        line.push(Span::plain(""));
        assert!(line.is_empty());
        assert_eq!(line.spans().len(), 0);
    }

    #[test]
    fn pad_to_extends_short_lines() {
        let mut line = StyledLine::plain("ab");
        line.pad_to(5);
        assert_eq!(line.width(), 5);
        line.pad_to(3);
        assert_eq!(line.width(), 5);
    }

    #[test]
    fn truncated_respects_cell_limit() {
        let line = StyledLine::plain("hello world");
        assert_eq!(line.truncated(5).to_unstyled(), "hello");
        assert_eq!(line.truncated(100), line);
    }

    #[test]
    fn truncated_never_splits_wide_graphemes() {
        let line = StyledLine::plain("a你b");
        // "a" (1) + "你" (2) = 3; limit 2 must drop the wide glyph.
        assert_eq!(line.truncated(2).to_unstyled(), "a");
        assert_eq!(line.truncated(3).to_unstyled(), "a你");
    }

    #[test]
    fn truncated_preserves_styles() {
        let line = StyledLine::styled("abc", Style::new().fg(Color::RED))
            .then_styled("def", Style::new().bold());
        let cut = line.truncated(4);
        assert_eq!(cut.spans().len(), 2);
        assert_eq!(cut.spans()[1].text, "d");
        assert_eq!(cut.spans()[1].style, Style::new().bold());
    }

    #[test]
    fn lines_compare_by_value() {
        assert_eq!(StyledLine::plain("x"), StyledLine::plain("x"));
        assert_ne!(
            StyledLine::plain("x"),
            StyledLine::styled("x", Style::new().bold())
        );
    }
}
