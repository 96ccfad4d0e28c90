#![forbid(unsafe_code)]

//! Terminal substrate for the asker prompt engine.
//!
//! This crate owns everything that touches the operating system on behalf of
//! the prompt engine: raw-mode entry/exit, terminal size queries, the
//! SIGWINCH listener, keypad-transmit toggling, and the non-blocking
//! character reader that feeds the key binding layer.
//!
//! It also carries the stateless terminal-graphics emitters (Sixel and Kitty)
//! which are invoked from user code and share no state with the prompt engine.
//!
//! ## Escape Sequence Reference
//!
//! | Feature          | Enable      | Disable     |
//! |------------------|-------------|-------------|
//! | Keypad transmit  | `CSI ?1h ESC =` | `CSI ?1l ESC >` |
//! | Cursor show/hide | `CSI ?25h`  | `CSI ?25l`  |

pub mod caps;
pub mod graphics;
pub mod raw;
pub mod reader;
pub mod terminal;
#[cfg(unix)]
pub mod winch;

pub use caps::Capabilities;
pub use reader::{NonBlockingReader, ReadOutcome};
pub use terminal::PromptTerminal;
