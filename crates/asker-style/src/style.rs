#![forbid(unsafe_code)]

//! Style and color model.
//!
//! A [`Style`] is a small copyable value: a set of attribute flags plus
//! optional foreground and background colors. SGR emission lives in the
//! render crate; this module only models state.

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 ANSI colors (0–7 normal, 8–15 bright).
    Ansi(u8),
    /// An entry of the 256-color palette.
    Indexed(u8),
    /// 24-bit RGB.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Black (ANSI 0).
    pub const BLACK: Self = Self::Ansi(0);
    /// Red (ANSI 1).
    pub const RED: Self = Self::Ansi(1);
    /// Green (ANSI 2).
    pub const GREEN: Self = Self::Ansi(2);
    /// Yellow (ANSI 3).
    pub const YELLOW: Self = Self::Ansi(3);
    /// Blue (ANSI 4).
    pub const BLUE: Self = Self::Ansi(4);
    /// Magenta (ANSI 5).
    pub const MAGENTA: Self = Self::Ansi(5);
    /// Cyan (ANSI 6).
    pub const CYAN: Self = Self::Ansi(6);
    /// White (ANSI 7).
    pub const WHITE: Self = Self::Ansi(7);
    /// Bright black / grey (ANSI 8).
    pub const BRIGHT_BLACK: Self = Self::Ansi(8);

    /// Look up a color by its conventional name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "yellow" => Self::YELLOW,
            "blue" => Self::BLUE,
            "magenta" => Self::MAGENTA,
            "cyan" => Self::CYAN,
            "white" => Self::WHITE,
            "bright-black" | "grey" | "gray" => Self::BRIGHT_BLACK,
            "bright-red" => Self::Ansi(9),
            "bright-green" => Self::Ansi(10),
            "bright-yellow" => Self::Ansi(11),
            "bright-blue" => Self::Ansi(12),
            "bright-magenta" => Self::Ansi(13),
            "bright-cyan" => Self::Ansi(14),
            "bright-white" => Self::Ansi(15),
            _ => return None,
        };
        Some(color)
    }
}

/// Attribute flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleFlags(u8);

impl StyleFlags {
    /// No attributes.
    pub const NONE: Self = Self(0);
    /// Bold.
    pub const BOLD: Self = Self(1);
    /// Faint / dim.
    pub const FAINT: Self = Self(1 << 1);
    /// Italic.
    pub const ITALIC: Self = Self(1 << 2);
    /// Underline.
    pub const UNDERLINE: Self = Self(1 << 3);
    /// Blink.
    pub const BLINK: Self = Self(1 << 4);
    /// Reverse video.
    pub const INVERSE: Self = Self(1 << 5);

    /// Whether all bits of `other` are set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no attribute is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for StyleFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for StyleFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A text style: attribute flags plus optional colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color, `None` for the terminal default.
    pub fg: Option<Color>,
    /// Background color, `None` for the terminal default.
    pub bg: Option<Color>,
    flags: StyleFlags,
}

impl Style {
    /// The default (unstyled) style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: StyleFlags::NONE,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Enable bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::BOLD.0);
        self
    }

    /// Enable faint.
    #[must_use]
    pub const fn faint(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::FAINT.0);
        self
    }

    /// Enable italic.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::ITALIC.0);
        self
    }

    /// Enable underline.
    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::UNDERLINE.0);
        self
    }

    /// Enable blink.
    #[must_use]
    pub const fn blink(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::BLINK.0);
        self
    }

    /// Enable reverse video.
    #[must_use]
    pub const fn inverse(mut self) -> Self {
        self.flags = StyleFlags(self.flags.0 | StyleFlags::INVERSE.0);
        self
    }

    /// The attribute flags.
    #[must_use]
    pub const fn flags(&self) -> StyleFlags {
        self.flags
    }

    /// Whether this style carries no attributes and no colors.
    #[must_use]
    pub const fn is_plain(&self) -> bool {
        self.flags.is_empty() && self.fg.is_none() && self.bg.is_none()
    }
}
