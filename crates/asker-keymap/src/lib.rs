#![forbid(unsafe_code)]

//! Key binding trie and binding reader.
//!
//! A [`KeyMap`] maps input character sequences to operation tokens of an
//! arbitrary type through a prefix trie, with three extra knobs:
//!
//! - `nomatch`: token returned for sequences matching no binding;
//! - `unicode`: token returned for a single unbound printable character;
//! - `ambiguous_timeout`: how long to wait at a node that is both a binding
//!   and a prefix of longer bindings before committing the shorter one.
//!
//! The [`BindingReader`] descends the trie one character at a time over a
//! [`NonBlockingReader`]. Escape is the canonical ambiguity: `ESC` alone is a
//! binding and also the first character of every arrow-key sequence, and the
//! timeout is the *only* mechanism distinguishing the two — the reader never
//! peeks past the ambiguity window.
//!
//! Given the same character stream and the same timeout, `read_binding` is a
//! pure function: no hidden state outside the pushback buffer it manages.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use asker_term::{NonBlockingReader, ReadOutcome};

/// Default ambiguity timeout: long enough for the tail of an escape sequence
/// to arrive over a slow link, short enough that a bare Escape press feels
/// immediate.
pub const DEFAULT_AMBIGUOUS_TIMEOUT: Duration = Duration::from_millis(150);

/// Block "forever" while still letting EOF propagate through timed reads.
const BLOCK: Duration = Duration::from_secs(60 * 60 * 24);

// ── KeyMap ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Node<T> {
    token: Option<T>,
    children: HashMap<char, Node<T>>,
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self {
            token: None,
            children: HashMap::new(),
        }
    }
}

/// Prefix trie from input sequences to operation tokens.
#[derive(Debug, Clone)]
pub struct KeyMap<T> {
    root: Node<T>,
    nomatch: Option<T>,
    unicode: Option<T>,
    ambiguous_timeout: Duration,
}

impl<T> Default for KeyMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KeyMap<T> {
    /// An empty key map with the default ambiguity timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::default(),
            nomatch: None,
            unicode: None,
            ambiguous_timeout: DEFAULT_AMBIGUOUS_TIMEOUT,
        }
    }

    /// Bind `seq` to `token`, replacing any previous binding of `seq`.
    ///
    /// Binding the empty sequence is ignored.
    pub fn bind(&mut self, token: T, seq: &str) {
        if seq.is_empty() {
            return;
        }
        let mut node = &mut self.root;
        for c in seq.chars() {
            node = node.children.entry(c).or_default();
        }
        node.token = Some(token);
    }

    /// Token returned when a sequence matches nothing.
    pub fn set_nomatch(&mut self, token: T) {
        self.nomatch = Some(token);
    }

    /// Token returned for a single unbound printable character.
    pub fn set_unicode(&mut self, token: T) {
        self.unicode = Some(token);
    }

    /// Set the ambiguity timeout.
    pub fn set_ambiguous_timeout(&mut self, timeout: Duration) {
        self.ambiguous_timeout = timeout;
    }

    /// The current ambiguity timeout.
    #[must_use]
    pub fn ambiguous_timeout(&self) -> Duration {
        self.ambiguous_timeout
    }
}

impl<T: Clone> KeyMap<T> {
    /// Bind every sequence in `seqs` to `token`.
    pub fn bind_all(&mut self, token: T, seqs: &[&str]) {
        for seq in seqs {
            self.bind(token.clone(), seq);
        }
    }

    /// Bind all printable ASCII characters (space through `~`) to `token`.
    pub fn bind_printable_ascii(&mut self, token: T) {
        for c in ' '..='\x7e' {
            self.bind(token.clone(), &c.to_string());
        }
    }
}

// ── BindingReader ────────────────────────────────────────────────────────

/// Reads operation tokens from a character stream through a [`KeyMap`].
#[derive(Debug, Default)]
pub struct BindingReader {
    /// Characters consumed past a committed binding, replayed first.
    pushback: VecDeque<char>,
    /// The character sequence that produced the last returned token.
    last_binding: String,
}

impl BindingReader {
    /// A reader with no pushback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The sequence that produced the most recently returned token.
    ///
    /// For the `unicode` fallback this is the single character typed, which
    /// is how executors recover the inserted character.
    #[must_use]
    pub fn last_binding(&self) -> &str {
        &self.last_binding
    }

    /// Read the next token. Returns `None` when the stream hits EOF with no
    /// binding in progress that can be committed.
    pub fn read_binding<T: Clone>(
        &mut self,
        reader: &mut NonBlockingReader,
        map: &KeyMap<T>,
    ) -> Option<T> {
        loop {
            let mut seq = String::new();
            let mut node = &map.root;

            loop {
                let c = match self.next_char(reader, BLOCK) {
                    Some(c) => c,
                    None if seq.is_empty() => return None,
                    // EOF mid-sequence at a non-leaf: nothing to commit.
                    None => return self.finish_nomatch(map, seq),
                };

                match node.children.get(&c) {
                    Some(child) => {
                        seq.push(c);
                        node = child;
                        if node.token.is_some() && !node.children.is_empty() {
                            // Ambiguous: both a binding and a prefix. Wait
                            // out the ambiguity window for a continuation.
                            match self.next_char(reader, map.ambiguous_timeout) {
                                Some(next) => {
                                    if node.children.contains_key(&next) {
                                        self.pushback.push_front(next);
                                    } else {
                                        // The continuation belongs to the
                                        // next binding.
                                        self.pushback.push_front(next);
                                        self.last_binding = seq;
                                        return node.token.clone();
                                    }
                                }
                                None => {
                                    self.last_binding = seq;
                                    return node.token.clone();
                                }
                            }
                        } else if let Some(token) = &node.token {
                            self.last_binding = seq;
                            return Some(token.clone());
                        }
                    }
                    None => {
                        if seq.is_empty() {
                            if let Some(token) = &map.unicode {
                                if !c.is_control() {
                                    self.last_binding = c.to_string();
                                    return Some(token.clone());
                                }
                            }
                            self.last_binding = c.to_string();
                            match &map.nomatch {
                                Some(token) => return Some(token.clone()),
                                // Unbound key: swallow it and keep reading.
                                None => break,
                            }
                        }
                        seq.push(c);
                        self.last_binding = seq;
                        if let Some(token) = &map.nomatch {
                            return Some(token.clone());
                        }
                        // Unbound sequence: swallow it and keep reading.
                        break;
                    }
                }
            }
        }
    }

    /// Conclude a failed sequence: record it and return `nomatch` if set.
    fn finish_nomatch<T: Clone>(&mut self, map: &KeyMap<T>, seq: String) -> Option<T> {
        self.last_binding = seq;
        map.nomatch.clone()
    }

    /// Next character from pushback or the stream. `None` on EOF or an
    /// expired wait.
    fn next_char(&mut self, reader: &mut NonBlockingReader, timeout: Duration) -> Option<char> {
        if let Some(c) = self.pushback.pop_front() {
            return Some(c);
        }
        match reader.read(timeout) {
            ReadOutcome::Char(c) => Some(c),
            ReadOutcome::Timeout | ReadOutcome::Eof => None,
        }
    }
}
