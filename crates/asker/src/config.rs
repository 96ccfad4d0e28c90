#![forbid(unsafe_code)]

//! Prompter configuration: glyphs, behavior flags and the style resolver.
//!
//! Platform defaults follow convention: Unicode glyphs on Unix, plain ASCII
//! on Windows consoles.

use asker_style::{Style, StyleResolver};

/// Style key for the cursor / indicator glyph.
pub const CU: &str = "cu";
/// Style key for box elements (checkbox glyphs).
pub const BE: &str = "be";
/// Style key for disabled items.
pub const BD: &str = "bd";
/// Style key for the prompt marker.
pub const PR: &str = "pr";
/// Style key for message text.
pub const ME: &str = "me";
/// Style key for the answer echo.
pub const AN: &str = "an";
/// Style key for the selected row.
pub const SE: &str = "se";
/// Style key for checkbox row text.
pub const CB: &str = "cb";

/// Visual and behavioral configuration for a [`crate::Prompter`].
#[derive(Debug, Clone)]
pub struct PrompterConfig {
    indicator: String,
    unchecked_box: String,
    checked_box: String,
    unavailable: String,
    cancellable_first_prompt: bool,
    resolver: StyleResolver,
}

impl PrompterConfig {
    /// Platform defaults: [`unix`](Self::unix) glyphs except on Windows.
    #[must_use]
    pub fn defaults() -> Self {
        if cfg!(windows) {
            Self::windows()
        } else {
            Self::unix()
        }
    }

    /// Unix glyph set: `❯`, `◯ `, `◉ `, `⊝ `.
    #[must_use]
    pub fn unix() -> Self {
        Self::custom("\u{276F}", "\u{25EF} ", "\u{25C9} ", "\u{229D} ", false)
    }

    /// Windows glyph set: `>`, `( )`, `(x)`, `( )`.
    #[must_use]
    pub fn windows() -> Self {
        Self::custom(">", "( )", "(x)", "( )", false)
    }

    /// A fully custom glyph set.
    #[must_use]
    pub fn custom(
        indicator: &str,
        unchecked_box: &str,
        checked_box: &str,
        unavailable: &str,
        cancellable_first_prompt: bool,
    ) -> Self {
        Self {
            indicator: indicator.to_string(),
            unchecked_box: unchecked_box.to_string(),
            checked_box: checked_box.to_string(),
            unavailable: unavailable.to_string(),
            cancellable_first_prompt,
            resolver: StyleResolver::defaults(),
        }
    }

    /// Platform defaults with `PROMPTER_COLORS` overrides applied.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            resolver: StyleResolver::from_env(),
            ..Self::defaults()
        }
    }

    /// Replace the style resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: StyleResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Set whether Escape on the first prompt aborts the whole run.
    #[must_use]
    pub fn with_cancellable_first_prompt(mut self, cancellable: bool) -> Self {
        self.cancellable_first_prompt = cancellable;
        self
    }

    /// The cursor indicator glyph.
    #[must_use]
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// The unchecked checkbox glyph.
    #[must_use]
    pub fn unchecked_box(&self) -> &str {
        &self.unchecked_box
    }

    /// The checked checkbox glyph.
    #[must_use]
    pub fn checked_box(&self) -> &str {
        &self.checked_box
    }

    /// The glyph drawn for disabled checkbox items.
    #[must_use]
    pub fn unavailable(&self) -> &str {
        &self.unavailable
    }

    /// Whether Escape on the first prompt aborts the whole run.
    #[must_use]
    pub fn cancellable_first_prompt(&self) -> bool {
        self.cancellable_first_prompt
    }

    /// Resolve a semantic style key.
    #[must_use]
    pub fn style(&self, key: &str) -> Style {
        self.resolver.resolve(key)
    }
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self::defaults()
    }
}
