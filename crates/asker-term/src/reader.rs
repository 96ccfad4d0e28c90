#![forbid(unsafe_code)]

//! Non-blocking character reader.
//!
//! Wraps a blocking byte source in a background pump thread that drains it
//! into a bounded buffer, and exposes timed character reads on top. This is
//! the only place in the engine where a wall-clock timeout exists; the key
//! binding layer realises its ambiguity timeout by passing it to
//! [`NonBlockingReader::read`].
//!
//! # Decoding
//!
//! Bytes are decoded incrementally as UTF-8. A partial multi-byte sequence is
//! buffered rather than stalling the stream; malformed or truncated sequences
//! decode to U+FFFD. The decoder therefore never loses bytes and never
//! blocks longer than the caller's timeout.
//!
//! # Shutdown
//!
//! [`shutdown`](NonBlockingReader::shutdown) releases the pump without
//! closing the terminal itself: the output side of the TTY stays usable until
//! teardown. A pump parked in a blocking `read(2)` cannot be interrupted
//! portably; it exits after the next byte arrives or the source hits EOF, so
//! the join is best-effort.

use std::collections::VecDeque;
use std::io::Read;
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound on buffered bytes before the pump blocks.
const PUMP_CAPACITY: usize = 8 * 1024;

/// Outcome of a timed read or peek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A decoded character.
    Char(char),
    /// No character arrived within the timeout.
    Timeout,
    /// The underlying stream is exhausted.
    Eof,
}

impl ReadOutcome {
    /// The decoded character, if any.
    #[must_use]
    pub fn char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::Timeout | Self::Eof => None,
        }
    }
}

/// Shared state between the pump thread and the reader.
#[derive(Default)]
struct PumpState {
    bytes: VecDeque<u8>,
    eof: bool,
    shutdown: bool,
}

#[derive(Default)]
struct Shared {
    state: Mutex<PumpState>,
    readable: Condvar,
    writable: Condvar,
}

/// Non-blocking character stream over a blocking byte source.
pub struct NonBlockingReader {
    shared: Arc<Shared>,
    pump: Option<thread::JoinHandle<()>>,
    /// Partially collected UTF-8 sequence.
    partial: Vec<u8>,
    /// Expected length of the sequence in `partial` (0 when empty).
    partial_expected: usize,
    /// Character consumed by `peek` but not yet by `read`.
    peeked: Option<char>,
    /// Decoder lookahead: a malformed sequence can yield the replacement
    /// character plus the byte that interrupted it.
    pending: VecDeque<char>,
}

impl std::fmt::Debug for NonBlockingReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonBlockingReader")
            .field("available", &self.available())
            .field("peeked", &self.peeked)
            .finish()
    }
}

impl NonBlockingReader {
    /// Spawn a pump thread draining `source` and return the reader.
    pub fn new(source: impl Read + Send + 'static) -> Self {
        let shared = Arc::new(Shared::default());
        let pump = thread::Builder::new()
            .name("asker-input-pump".into())
            .spawn({
                let shared = Arc::clone(&shared);
                move || pump_loop(source, &shared)
            })
            .ok();

        Self {
            shared,
            pump,
            partial: Vec::with_capacity(4),
            partial_expected: 0,
            peeked: None,
            pending: VecDeque::new(),
        }
    }

    /// Read one character, waiting at most `timeout`.
    pub fn read(&mut self, timeout: Duration) -> ReadOutcome {
        if let Some(c) = self.peeked.take() {
            return ReadOutcome::Char(c);
        }
        if let Some(c) = self.pending.pop_front() {
            return ReadOutcome::Char(c);
        }
        self.decode_next(timeout)
    }

    /// Look at the next character without consuming it, waiting at most
    /// `timeout`.
    pub fn peek(&mut self, timeout: Duration) -> ReadOutcome {
        if let Some(c) = self.peeked {
            return ReadOutcome::Char(c);
        }
        let outcome = match self.pending.pop_front() {
            Some(c) => ReadOutcome::Char(c),
            None => self.decode_next(timeout),
        };
        if let ReadOutcome::Char(c) = outcome {
            self.peeked = Some(c);
        }
        outcome
    }

    /// Number of buffered input bytes that have not been consumed yet.
    ///
    /// Zero means a `read` would block; a positive count means at least one
    /// byte (not necessarily a complete character) is ready.
    #[must_use]
    pub fn available(&self) -> usize {
        let buffered = self
            .shared
            .state
            .lock()
            .map(|s| s.bytes.len())
            .unwrap_or(0);
        buffered + self.partial.len() + self.pending.len() + usize::from(self.peeked.is_some())
    }

    /// Release the pump thread.
    ///
    /// The underlying stream is not closed here; a pump parked in a blocking
    /// read exits on its own once the source produces a byte or EOF.
    pub fn shutdown(&mut self) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.shutdown = true;
        }
        self.shared.writable.notify_all();
        self.shared.readable.notify_all();
        if let Some(handle) = self.pump.take() {
            if handle.is_finished() {
                let _ = handle.join();
            }
            // Otherwise the pump is parked in read(2); it exits on the next
            // byte or EOF. Detach rather than block teardown.
        }
    }

    /// Pop one byte from the pump buffer, waiting until `deadline`.
    fn next_byte(&self, deadline: Instant) -> ByteOutcome {
        let Ok(mut state) = self.shared.state.lock() else {
            return ByteOutcome::Eof;
        };
        loop {
            if let Some(b) = state.bytes.pop_front() {
                self.shared.writable.notify_one();
                return ByteOutcome::Byte(b);
            }
            if state.eof {
                return ByteOutcome::Eof;
            }
            let now = Instant::now();
            if now >= deadline {
                return ByteOutcome::Timeout;
            }
            let (next, timed_out) = match self.shared.readable.wait_timeout(state, deadline - now) {
                Ok((guard, res)) => (guard, res.timed_out()),
                Err(_) => return ByteOutcome::Eof,
            };
            state = next;
            if timed_out && state.bytes.is_empty() {
                return if state.eof {
                    ByteOutcome::Eof
                } else {
                    ByteOutcome::Timeout
                };
            }
        }
    }

    /// Decode the next character from the byte stream.
    fn decode_next(&mut self, timeout: Duration) -> ReadOutcome {
        let deadline = Instant::now() + timeout;
        loop {
            let b = match self.next_byte(deadline) {
                ByteOutcome::Byte(b) => b,
                ByteOutcome::Timeout => return ReadOutcome::Timeout,
                ByteOutcome::Eof => {
                    if self.partial.is_empty() {
                        return ReadOutcome::Eof;
                    }
                    // Truncated trailing sequence.
                    self.partial.clear();
                    self.partial_expected = 0;
                    return ReadOutcome::Char(char::REPLACEMENT_CHARACTER);
                }
            };

            if self.partial.is_empty() {
                match utf8_expected_len(b) {
                    Some(1) => return ReadOutcome::Char(b as char),
                    Some(n) => {
                        self.partial.push(b);
                        self.partial_expected = n;
                    }
                    // Stray continuation or invalid lead byte.
                    None => return ReadOutcome::Char(char::REPLACEMENT_CHARACTER),
                }
                continue;
            }

            // Collecting a multi-byte sequence.
            if b & 0xC0 != 0x80 {
                // Not a continuation byte: the pending sequence is malformed.
                // Substitute it and restart decoding at this byte.
                self.partial.clear();
                self.partial_expected = 0;
                match utf8_expected_len(b) {
                    Some(1) => {
                        // The substituted char is delivered now; the ASCII
                        // byte waits in the lookahead for the next call.
                        self.pending.push_back(b as char);
                    }
                    Some(n) => {
                        self.partial.push(b);
                        self.partial_expected = n;
                    }
                    None => {}
                }
                return ReadOutcome::Char(char::REPLACEMENT_CHARACTER);
            }

            self.partial.push(b);
            if self.partial.len() == self.partial_expected {
                let decoded = std::str::from_utf8(&self.partial)
                    .ok()
                    .and_then(|s| s.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                self.partial.clear();
                self.partial_expected = 0;
                return ReadOutcome::Char(decoded);
            }
        }
    }
}

impl Drop for NonBlockingReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, Clone, Copy)]
enum ByteOutcome {
    Byte(u8),
    Timeout,
    Eof,
}

/// Total byte length of a UTF-8 sequence from its lead byte.
fn utf8_expected_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

fn pump_loop(mut source: impl Read, shared: &Shared) {
    let mut chunk = [0u8; 512];
    loop {
        let n = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "input pump read failed");
                break;
            }
        };

        let Ok(mut state) = shared.state.lock() else {
            return;
        };
        for &b in &chunk[..n] {
            while state.bytes.len() >= PUMP_CAPACITY && !state.shutdown {
                state = match shared.writable.wait(state) {
                    Ok(next) => next,
                    Err(_) => return,
                };
            }
            if state.shutdown {
                return;
            }
            state.bytes.push_back(b);
        }
        drop(state);
        shared.readable.notify_one();
    }

    if let Ok(mut state) = shared.state.lock() {
        state.eof = true;
    }
    shared.readable.notify_all();
}
