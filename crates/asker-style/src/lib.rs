#![forbid(unsafe_code)]

//! Styled text for the asker prompt engine.
//!
//! Three layers:
//! - [`style`]: the `Style`/`Color` model (attribute flags plus optional
//!   foreground/background colors);
//! - [`text`]: width-aware styled [`Span`]s and [`StyledLine`]s, the unit the
//!   renderer diffs;
//! - [`resolve`]: the style resolver mapping the engine's semantic style keys
//!   (`cu`, `be`, `bd`, `pr`, `me`, `an`, `se`, `cb`) to styles, with
//!   `PROMPTER_COLORS` environment overrides.

pub mod resolve;
pub mod style;
pub mod text;

pub use resolve::StyleResolver;
pub use style::{Color, Style};
pub use text::{Span, StyledLine};
