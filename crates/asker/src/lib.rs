#![forbid(unsafe_code)]

//! Interactive terminal prompt engine.
//!
//! asker drives a raw-mode tty through a sequence of user-facing prompts —
//! free-text input, single-select lists, multi-select checkboxes, single-key
//! choices, yes/no confirmations and static text — rendering each prompt
//! frame-by-frame with minimal-diff updates and collecting typed results.
//!
//! # Example
//!
//! ```no_run
//! use asker::{Prompt, Prompter, PrompterConfig};
//! use asker_term::PromptTerminal;
//!
//! # fn main() -> Result<(), asker::PromptError> {
//! let terminal = PromptTerminal::open().map_err(asker::PromptError::Io)?;
//! let mut prompter = Prompter::new(terminal, PrompterConfig::from_env());
//!
//! let prompts = vec![
//!     Prompt::input("name", "What is your name?").with_default("World"),
//!     Prompt::confirm("greet", "Print a greeting?", true),
//! ];
//! let answers = prompter.prompt(Vec::new(), &prompts)?;
//! # let _ = answers; Ok(())
//! # }
//! ```
//!
//! Escape steps back one prompt (rewinding both the collected result and the
//! summary line above the prompt); Ctrl-C cancels the whole run with
//! [`PromptError::Interrupted`] after the terminal is restored.

pub mod config;
pub mod error;
mod exec;
pub mod grid;
pub mod prompt;
pub mod prompter;
pub mod result;

pub use config::PrompterConfig;
pub use error::{PromptError, Result};
pub use prompt::{CheckboxItem, ChoiceItem, ListItem, Prompt, PromptItem, PromptKind};
pub use prompter::{Prompter, ResultMap};
pub use result::{Confirmation, PromptResult};
