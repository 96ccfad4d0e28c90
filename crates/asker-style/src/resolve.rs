#![forbid(unsafe_code)]

//! Style resolver: semantic style keys and their environment overrides.
//!
//! The prompt engine styles its output through eight semantic keys rather
//! than hard-coded colors:
//!
//! | Key  | Element |
//! |------|---------|
//! | `cu` | cursor / indicator glyph |
//! | `be` | box element (checkbox glyphs) |
//! | `bd` | disabled item |
//! | `pr` | prompt marker (`?`) |
//! | `me` | message text |
//! | `an` | answer echo |
//! | `se` | selected row |
//! | `cb` | checkbox row text |
//!
//! Users override them through `PROMPTER_COLORS`, a colon-separated list of
//! `key=value` pairs. A value is a `;`-separated list of tokens: attribute
//! names (`bold`, `faint`, `italic`, `underline`, `blink`, `inverse`), a bare
//! color name (foreground), `fg-…`/`bg-…` prefixed color names or palette
//! indices, or raw numeric SGR codes. Example:
//!
//! ```text
//! PROMPTER_COLORS="cu=fg-yellow;bold:bd=faint:an=36"
//! ```
//!
//! Unknown keys and unparsable tokens are skipped with a warning; the engine
//! must keep working under a malformed environment.

use std::collections::HashMap;
use std::env;

use crate::style::{Color, Style};

/// Environment variable holding style overrides.
pub const COLORS_ENV: &str = "PROMPTER_COLORS";

/// The semantic style keys the engine resolves.
pub const STYLE_KEYS: [&str; 8] = ["cu", "be", "bd", "pr", "me", "an", "se", "cb"];

/// Maps semantic style keys to concrete styles.
#[derive(Debug, Clone, Default)]
pub struct StyleResolver {
    styles: HashMap<String, Style>,
}

impl StyleResolver {
    /// A resolver with the engine's default styling.
    #[must_use]
    pub fn defaults() -> Self {
        let mut styles = HashMap::new();
        styles.insert("cu".into(), Style::new().fg(Color::CYAN).bold());
        styles.insert("be".into(), Style::new().fg(Color::GREEN));
        styles.insert("bd".into(), Style::new().faint());
        styles.insert("pr".into(), Style::new().fg(Color::GREEN));
        styles.insert("me".into(), Style::new().bold());
        styles.insert("an".into(), Style::new().fg(Color::CYAN));
        styles.insert("se".into(), Style::new().inverse());
        styles.insert("cb".into(), Style::new());
        Self { styles }
    }

    /// A resolver with no styling at all (everything plain).
    #[must_use]
    pub fn plain() -> Self {
        Self::default()
    }

    /// The defaults layered with overrides from [`COLORS_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let mut resolver = Self::defaults();
        if let Ok(spec) = env::var(COLORS_ENV) {
            resolver.apply_spec(&spec);
        }
        resolver
    }

    /// Apply a `key=value:key=value` override string.
    pub fn apply_spec(&mut self, spec: &str) {
        for pair in spec.split(':').filter(|p| !p.is_empty()) {
            let Some((key, value)) = pair.split_once('=') else {
                tracing::warn!(pair, "ignoring malformed style override");
                continue;
            };
            if !STYLE_KEYS.contains(&key) {
                tracing::warn!(key, "ignoring unknown style key");
                continue;
            }
            self.styles.insert(key.to_string(), parse_style(value));
        }
    }

    /// Set one key explicitly.
    pub fn set(&mut self, key: &str, style: Style) {
        self.styles.insert(key.to_string(), style);
    }

    /// Resolve a key; unknown keys resolve to the plain style.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Style {
        self.styles.get(key).copied().unwrap_or_default()
    }
}

/// Parse a `;`-separated style value into a [`Style`].
#[must_use]
pub fn parse_style(value: &str) -> Style {
    let mut style = Style::new();
    for token in value.split(';').map(str::trim).filter(|t| !t.is_empty()) {
        style = apply_token(style, token);
    }
    style
}

fn apply_token(style: Style, token: &str) -> Style {
    match token {
        "bold" => return style.bold(),
        "faint" | "dim" => return style.faint(),
        "italic" => return style.italic(),
        "underline" => return style.underline(),
        "blink" => return style.blink(),
        "inverse" | "reverse" => return style.inverse(),
        _ => {}
    }
    if let Some(name) = token.strip_prefix("fg-") {
        if let Some(color) = parse_color(name) {
            return style.fg(color);
        }
    } else if let Some(name) = token.strip_prefix("bg-") {
        if let Some(color) = parse_color(name) {
            return style.bg(color);
        }
    } else if let Some(color) = Color::by_name(token) {
        return style.fg(color);
    } else if let Ok(code) = token.parse::<u8>() {
        return apply_sgr_code(style, code);
    }
    tracing::warn!(token, "ignoring unknown style token");
    style
}

/// A color name or a 256-palette index.
fn parse_color(name: &str) -> Option<Color> {
    Color::by_name(name).or_else(|| name.parse::<u8>().ok().map(Color::Indexed))
}

/// Interpret a raw SGR code the way a terminal would.
fn apply_sgr_code(style: Style, code: u8) -> Style {
    match code {
        1 => style.bold(),
        2 => style.faint(),
        3 => style.italic(),
        4 => style.underline(),
        5 => style.blink(),
        7 => style.inverse(),
        30..=37 => style.fg(Color::Ansi(code - 30)),
        40..=47 => style.bg(Color::Ansi(code - 40)),
        90..=97 => style.fg(Color::Ansi(code - 90 + 8)),
        100..=107 => style.bg(Color::Ansi(code - 100 + 8)),
        _ => {
            tracing::warn!(code, "ignoring unsupported SGR code");
            style
        }
    }
}
