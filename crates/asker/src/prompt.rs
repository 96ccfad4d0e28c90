#![forbid(unsafe_code)]

//! Prompt and item model.
//!
//! A [`Prompt`] is a tagged variant over the six prompt kinds, with `name`
//! (unique within a run) and `message` common to all. Items share a common
//! [`ItemCore`] record with per-variant extensions: a checkbox item carries
//! its initial checked state, a choice item its shortcut key and default
//! flag. Separators are items with `selectable = false` and no disabled
//! reason.
//!
//! Construction is by builder: `Prompt::input("name", "message")
//! .with_default("…")`, `ListItem::new("id", "text").with_key('x')`, and so
//! on.

use asker_style::StyledLine;

/// Input validator: `Err` carries the message shown inline below the prompt.
pub type Validator = Box<dyn Fn(&str) -> std::result::Result<(), String>>;

// ── Items ────────────────────────────────────────────────────────────────

/// Fields common to every selectable item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCore {
    /// Identifier committed into results. Unique within a prompt.
    pub name: String,
    /// Text shown to the user.
    pub text: String,
    /// Whether the cursor may land on this item.
    pub selectable: bool,
    /// Whether the item renders with the unavailable style and reason.
    pub disabled: bool,
    /// The reason shown after a disabled item's text.
    pub disabled_text: String,
}

impl ItemCore {
    fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            selectable: true,
            disabled: false,
            disabled_text: String::new(),
        }
    }

    fn separator(text: &str) -> Self {
        Self {
            name: String::new(),
            text: text.to_string(),
            selectable: false,
            disabled: false,
            disabled_text: String::new(),
        }
    }
}

/// Shared read surface over the three item variants.
pub trait PromptItem {
    /// The common fields.
    fn core(&self) -> &ItemCore;

    /// Item identifier.
    fn name(&self) -> &str {
        &self.core().name
    }

    /// Display text.
    fn text(&self) -> &str {
        &self.core().text
    }

    /// Whether the cursor may land here.
    fn selectable(&self) -> bool {
        self.core().selectable
    }

    /// Whether the item is disabled (as opposed to a plain separator).
    fn disabled(&self) -> bool {
        self.core().disabled
    }

    /// The disabled reason.
    fn disabled_text(&self) -> &str {
        &self.core().disabled_text
    }

    /// The shortcut key, for items exposing one.
    fn key(&self) -> Option<char> {
        None
    }
}

/// An item of a single-select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    core: ItemCore,
    shortcut: Option<char>,
}

impl ListItem {
    /// A selectable item.
    #[must_use]
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            core: ItemCore::new(name, text),
            shortcut: None,
        }
    }

    /// A non-selectable separator row.
    #[must_use]
    pub fn separator(text: &str) -> Self {
        Self {
            core: ItemCore::separator(text),
            shortcut: None,
        }
    }

    /// Mark disabled with a reason; disabled items are not selectable.
    #[must_use]
    pub fn with_disabled(mut self, reason: &str) -> Self {
        self.core.selectable = false;
        self.core.disabled = true;
        self.core.disabled_text = reason.to_string();
        self
    }

    /// Attach a jump-to shortcut key.
    #[must_use]
    pub fn with_key(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }
}

impl PromptItem for ListItem {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn key(&self) -> Option<char> {
        self.shortcut
    }
}

/// An item of a multi-select checkbox prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxItem {
    core: ItemCore,
    initially_checked: bool,
}

impl CheckboxItem {
    /// A selectable, initially unchecked item.
    #[must_use]
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            core: ItemCore::new(name, text),
            initially_checked: false,
        }
    }

    /// A non-selectable separator row.
    #[must_use]
    pub fn separator(text: &str) -> Self {
        Self {
            core: ItemCore::separator(text),
            initially_checked: false,
        }
    }

    /// Start checked.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.initially_checked = true;
        self
    }

    /// Mark disabled with a reason; disabled items are not selectable.
    #[must_use]
    pub fn with_disabled(mut self, reason: &str) -> Self {
        self.core.selectable = false;
        self.core.disabled = true;
        self.core.disabled_text = reason.to_string();
        self
    }

    /// Whether this item starts checked.
    #[must_use]
    pub fn initially_checked(&self) -> bool {
        self.initially_checked
    }
}

impl PromptItem for CheckboxItem {
    fn core(&self) -> &ItemCore {
        &self.core
    }
}

/// An item of a single-key choice prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItem {
    core: ItemCore,
    key: Option<char>,
    is_default: bool,
}

impl ChoiceItem {
    /// A selectable choice with its one-character shortcut.
    #[must_use]
    pub fn new(key: char, name: &str, text: &str) -> Self {
        Self {
            core: ItemCore::new(name, text),
            key: Some(key),
            is_default: false,
        }
    }

    /// A non-selectable separator row.
    #[must_use]
    pub fn separator(text: &str) -> Self {
        Self {
            core: ItemCore::separator(text),
            key: None,
            is_default: false,
        }
    }

    /// Mark this choice as the Enter default.
    #[must_use]
    pub fn with_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Whether this choice commits on a bare Enter.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

impl PromptItem for ChoiceItem {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn key(&self) -> Option<char> {
        self.key
    }
}

// ── Prompts ──────────────────────────────────────────────────────────────

/// Payload of an input prompt.
pub struct InputPrompt {
    /// Value committed when Enter is pressed on an empty buffer.
    pub default_value: Option<String>,
    /// Mask character substituted into the echo (passwords).
    pub mask: Option<char>,
    /// Validator run at commit; failures report inline and keep prompting.
    pub validator: Option<Validator>,
}

impl std::fmt::Debug for InputPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputPrompt")
            .field("default_value", &self.default_value)
            .field("mask", &self.mask)
            .field("validator", &self.validator.as_ref().map(|_| "…"))
            .finish()
    }
}

/// Payload of a single-select list prompt.
#[derive(Debug)]
pub struct ListPrompt {
    /// Ordered items.
    pub items: Vec<ListItem>,
}

/// Payload of a multi-select checkbox prompt.
#[derive(Debug)]
pub struct CheckboxPrompt {
    /// Ordered items.
    pub items: Vec<CheckboxItem>,
}

/// Payload of a single-key choice prompt.
#[derive(Debug)]
pub struct ChoicePrompt {
    /// Ordered items; separators print but take no key.
    pub items: Vec<ChoiceItem>,
}

/// Payload of a yes/no confirmation prompt.
#[derive(Debug)]
pub struct ConfirmPrompt {
    /// Answer committed on a bare Enter.
    pub default_yes: bool,
}

/// Payload of a static text prompt; commits automatically.
#[derive(Debug)]
pub struct TextPrompt {
    /// The styled block, one entry per line.
    pub lines: Vec<StyledLine>,
}

/// The prompt variants.
#[derive(Debug)]
pub enum PromptKind {
    /// Free-text input.
    Input(InputPrompt),
    /// Single-select list.
    List(ListPrompt),
    /// Multi-select checkboxes.
    Checkbox(CheckboxPrompt),
    /// Single-key choice.
    Choice(ChoicePrompt),
    /// Yes/no confirmation.
    Confirm(ConfirmPrompt),
    /// Static styled text.
    Text(TextPrompt),
}

/// One step of a prompt run.
#[derive(Debug)]
pub struct Prompt {
    name: String,
    message: String,
    kind: PromptKind,
}

impl Prompt {
    /// A free-text input prompt.
    #[must_use]
    pub fn input(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: PromptKind::Input(InputPrompt {
                default_value: None,
                mask: None,
                validator: None,
            }),
        }
    }

    /// A single-select list prompt.
    #[must_use]
    pub fn list(name: &str, message: &str, items: Vec<ListItem>) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: PromptKind::List(ListPrompt { items }),
        }
    }

    /// A multi-select checkbox prompt.
    #[must_use]
    pub fn checkbox(name: &str, message: &str, items: Vec<CheckboxItem>) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: PromptKind::Checkbox(CheckboxPrompt { items }),
        }
    }

    /// A single-key choice prompt.
    #[must_use]
    pub fn choice(name: &str, message: &str, items: Vec<ChoiceItem>) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: PromptKind::Choice(ChoicePrompt { items }),
        }
    }

    /// A yes/no confirmation prompt.
    #[must_use]
    pub fn confirm(name: &str, message: &str, default_yes: bool) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            kind: PromptKind::Confirm(ConfirmPrompt { default_yes }),
        }
    }

    /// A static text block; commits without user input.
    #[must_use]
    pub fn text(name: &str, lines: Vec<StyledLine>) -> Self {
        Self {
            name: name.to_string(),
            message: String::new(),
            kind: PromptKind::Text(TextPrompt { lines }),
        }
    }

    /// Set the default value (input prompts).
    #[must_use]
    pub fn with_default(mut self, value: &str) -> Self {
        if let PromptKind::Input(input) = &mut self.kind {
            input.default_value = Some(value.to_string());
        }
        self
    }

    /// Set the echo mask character (input prompts).
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        if let PromptKind::Input(input) = &mut self.kind {
            input.mask = Some(mask);
        }
        self
    }

    /// Attach a commit validator (input prompts).
    #[must_use]
    pub fn with_validator(
        mut self,
        validator: impl Fn(&str) -> std::result::Result<(), String> + 'static,
    ) -> Self {
        if let PromptKind::Input(input) = &mut self.kind {
            input.validator = Some(Box::new(validator));
        }
        self
    }

    /// The prompt's identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The prompt's message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The variant payload.
    #[must_use]
    pub fn kind(&self) -> &PromptKind {
        &self.kind
    }

    /// How many lines this prompt contributes to the shared header when it
    /// commits. Deterministic from the prompt alone so a rewind can pop the
    /// same number.
    #[must_use]
    pub fn header_rows(&self) -> usize {
        match &self.kind {
            PromptKind::Text(text) => text.lines.len(),
            _ => 1,
        }
    }
}
