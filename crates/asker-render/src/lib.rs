#![forbid(unsafe_code)]

//! Differential renderer for the asker prompt engine.
//!
//! [`ansi`] generates escape sequences as pure functions; [`display`] owns
//! the previous frame and emits the minimal transformation to the next one.
//! The display never assumes terminal autowrap and never scrolls except when
//! a frame genuinely grows past rows it has already visited.

pub mod ansi;
pub mod display;

pub use display::Display;
