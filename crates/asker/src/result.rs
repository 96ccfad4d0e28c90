#![forbid(unsafe_code)]

//! Committed prompt results.

use std::collections::BTreeSet;

/// Yes/no answer of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user confirmed.
    Yes,
    /// The user declined.
    No,
}

impl Confirmation {
    /// `"Yes"` or `"No"`, as echoed into the header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

/// The value committed by one prompt.
///
/// The variant always matches the prompt kind that produced it; the key it
/// is stored under in the result map is the prompt's `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Text typed into an input prompt (or its default).
    Input(String),
    /// The `name` of the selected list item.
    List(String),
    /// The `name`s of all checked items.
    Checkbox(BTreeSet<String>),
    /// The `name` of the chosen item.
    Choice(String),
    /// The confirmation answer.
    Confirm(Confirmation),
    /// Sentinel for a displayed text block.
    Text,
}

impl PromptResult {
    /// The textual answer echoed into the header summary, when one exists.
    ///
    /// Text blocks have no answer; checkbox answers are the checked names
    /// joined with `", "`.
    #[must_use]
    pub fn answer_text(&self) -> Option<String> {
        match self {
            Self::Input(s) | Self::List(s) | Self::Choice(s) => Some(s.clone()),
            Self::Checkbox(set) => {
                Some(set.iter().cloned().collect::<Vec<_>>().join(", "))
            }
            Self::Confirm(c) => Some(c.as_str().to_string()),
            Self::Text => None,
        }
    }

    /// The committed string of single-valued results.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Input(s) | Self::List(s) | Self::Choice(s) => Some(s),
            _ => None,
        }
    }

    /// The checked-id set of a checkbox result.
    #[must_use]
    pub fn as_set(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Checkbox(set) => Some(set),
            _ => None,
        }
    }

    /// The confirmation value of a confirm result.
    #[must_use]
    pub fn as_confirmation(&self) -> Option<Confirmation> {
        match self {
            Self::Confirm(c) => Some(*c),
            _ => None,
        }
    }
}
