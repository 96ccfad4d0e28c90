#![forbid(unsafe_code)]

//! Engine error type.

use std::fmt;
use std::io;

/// Convenience alias for engine results.
pub type Result<T> = std::result::Result<T, PromptError>;

/// Errors surfaced by the prompt engine.
#[derive(Debug)]
pub enum PromptError {
    /// An underlying read or write failed.
    Io(io::Error),
    /// The engine was used incorrectly (re-entry, invalid construction).
    Usage(String),
    /// The user cancelled the run with the interrupt key.
    ///
    /// Raised after terminal attributes are restored. Distinct from Escape,
    /// which is local back-navigation and never surfaces as an error.
    Interrupted,
    /// The input stream produced bytes that could not be decoded even after
    /// replacement.
    InvalidInput(String),
}

impl fmt::Display for PromptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal I/O failed: {e}"),
            Self::Usage(msg) => write!(f, "prompter misuse: {msg}"),
            Self::Interrupted => write!(f, "cancelled by user"),
            Self::InvalidInput(msg) => write!(f, "undecodable input: {msg}"),
        }
    }
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
