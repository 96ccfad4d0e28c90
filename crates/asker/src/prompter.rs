#![forbid(unsafe_code)]

//! Flow controller.
//!
//! Threads prompts together over one raw-mode session: executes them in
//! order, accumulates a summary header line per commit, steps back one
//! prompt on Escape (rewinding both the result map and the header), and
//! unwinds with [`PromptError::Interrupted`] on the interrupt key — always
//! after restoring the terminal.
//!
//! Two entry points: [`Prompter::prompt`] runs a static list;
//! [`Prompter::prompt_with`] asks a provider for the next batch after each
//! one completes, keeping batch/result stacks so Escape can cross batch
//! boundaries.

use std::collections::HashMap;

use asker_keymap::BindingReader;
use asker_render::Display;
use asker_style::StyledLine;
use asker_term::PromptTerminal;

use crate::config::PrompterConfig;
use crate::error::{PromptError, Result};
use crate::exec::{self, Session};
use crate::prompt::{Prompt, PromptKind};
use crate::result::PromptResult;

/// Results of a run, keyed by prompt name.
///
/// Keys are exactly the prompts whose commit has been reached and not
/// rewound.
pub type ResultMap = HashMap<String, PromptResult>;

/// Drives prompt sequences over a terminal.
pub struct Prompter {
    term: PromptTerminal,
    config: PrompterConfig,
    active: bool,
}

impl Prompter {
    /// Create a prompter over `term`.
    #[must_use]
    pub fn new(term: PromptTerminal, config: PrompterConfig) -> Self {
        Self {
            term,
            config,
            active: false,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &PrompterConfig {
        &self.config
    }

    /// The underlying terminal (headless tests inspect its output).
    #[must_use]
    pub fn terminal(&self) -> &PromptTerminal {
        &self.term
    }

    /// Give the terminal back.
    #[must_use]
    pub fn into_terminal(self) -> PromptTerminal {
        self.term
    }

    /// Run a static prompt list.
    ///
    /// `header` is shown above the first prompt and grows by one summary
    /// line per commit. An empty `prompts` list returns an empty map without
    /// touching the terminal.
    pub fn prompt(&mut self, header: Vec<StyledLine>, prompts: &[Prompt]) -> Result<ResultMap> {
        if prompts.is_empty() {
            return Ok(ResultMap::new());
        }

        self.open()?;
        let mut display = Display::new();
        let mut binding = BindingReader::new();
        let mut header = header;
        let mut results = ResultMap::new();
        let cancellable = self.config.cancellable_first_prompt();

        let outcome = {
            let mut sess = Session {
                term: &mut self.term,
                display: &mut display,
                binding: &mut binding,
                config: &self.config,
            };
            prompt_internal(&mut sess, &mut header, prompts, &mut results, cancellable)
        };
        let closed = self.finish(&mut display, &header);

        outcome?;
        closed?;
        Ok(results)
    }

    /// Run prompts from a dynamic provider.
    ///
    /// The provider receives the cumulative result map and returns the next
    /// batch, or `None` (or an empty batch) to terminate. Escaping past the
    /// first prompt of a batch rewinds one step across the batch boundary:
    /// the previous batch's keys leave the cumulative map, its last prompt's
    /// header lines are popped, and that prompt re-runs.
    pub fn prompt_with<F>(&mut self, header: Vec<StyledLine>, mut provider: F) -> Result<ResultMap>
    where
        F: FnMut(&ResultMap) -> Option<Vec<Prompt>>,
    {
        self.open()?;
        let mut display = Display::new();
        let mut binding = BindingReader::new();
        let mut header = header;
        let cancellable = self.config.cancellable_first_prompt();

        let mut cumulative = ResultMap::new();
        let mut prev_batches: Vec<Vec<Prompt>> = Vec::new();
        let mut prev_results: Vec<ResultMap> = Vec::new();

        let outcome = (|| -> Result<()> {
            let mut batch = provider(&ResultMap::new()).filter(|b| !b.is_empty());
            let mut batch_results = ResultMap::new();

            while let Some(prompts) = batch {
                // Later batches are always cancellable: Escape on their
                // first prompt crosses back into the previous batch.
                let cancellable_first = !prev_batches.is_empty() || cancellable;
                {
                    let mut sess = Session {
                        term: &mut self.term,
                        display: &mut display,
                        binding: &mut binding,
                        config: &self.config,
                    };
                    prompt_internal(
                        &mut sess,
                        &mut header,
                        &prompts,
                        &mut batch_results,
                        cancellable_first,
                    )?;
                }

                if batch_results.is_empty() {
                    let (Some(prior), Some(prior_results)) =
                        (prev_batches.pop(), prev_results.pop())
                    else {
                        // Escaped out of the very first batch.
                        return Ok(());
                    };
                    tracing::debug!("back-navigating across batch boundary");
                    for key in prior_results.keys() {
                        cumulative.remove(key);
                    }
                    if let Some(last) = prior.last() {
                        for _ in 0..last.header_rows() {
                            header.pop();
                        }
                    }
                    batch = Some(prior);
                    batch_results = prior_results;
                } else {
                    for (key, value) in &batch_results {
                        cumulative.insert(key.clone(), value.clone());
                    }
                    prev_results.push(std::mem::take(&mut batch_results));
                    prev_batches.push(prompts);
                    batch = provider(&cumulative).filter(|b| !b.is_empty());
                }
            }
            Ok(())
        })();
        let closed = self.finish(&mut display, &header);

        outcome?;
        closed?;
        Ok(cumulative)
    }

    /// Enter raw mode; a second call while a run is active is a usage error.
    fn open(&mut self) -> Result<()> {
        if self.active {
            return Err(PromptError::Usage(
                "prompter is already running a prompt sequence".into(),
            ));
        }
        self.term.enter_raw().map_err(PromptError::Io)?;
        self.active = true;
        tracing::debug!("prompt run started");
        Ok(())
    }

    /// Leave the final screen showing the accumulated header, then restore
    /// the terminal. Runs on every exit path, including after errors.
    fn finish(&mut self, display: &mut Display, header: &[StyledLine]) -> Result<()> {
        let repaint: std::io::Result<()> = (|| {
            if !self.term.is_raw() {
                return Ok(());
            }
            let size = self.term.size();
            let (_, w) = self.term.io();
            display.update(w, header, (header.len() as u16, 0), size)?;
            let (_, w) = self.term.io();
            w.write_all(b"\r\n")?;
            w.flush()
        })();

        let left = self.term.leave_raw();
        self.active = false;
        tracing::debug!("prompt run finished");

        repaint.map_err(PromptError::Io)?;
        left.map_err(PromptError::Io)?;
        Ok(())
    }
}

/// The prompt loop shared by both entry points. Dynamic batches re-enter
/// with their partial `results` and resume at the last answered prompt.
fn prompt_internal(
    sess: &mut Session<'_>,
    header: &mut Vec<StyledLine>,
    prompts: &[Prompt],
    results: &mut ResultMap,
    cancellable_first: bool,
) -> Result<()> {
    let mut backward = false;
    let mut i = if results.is_empty() {
        0
    } else {
        results.len() - 1
    };

    while i < prompts.len() {
        let prompt = &prompts[i];
        if backward {
            remove_previous(prompt, results, header);
            backward = false;
        }

        match exec::execute(sess, header, prompt)? {
            Some(result) => {
                append_summary(sess.config, header, prompt, &result);
                results.insert(prompt.name().to_string(), result);
                tracing::debug!(name = prompt.name(), "prompt committed");
                i += 1;
            }
            None => {
                tracing::debug!(name = prompt.name(), "escape: one step back");
                if i > 0 {
                    i -= 1;
                    backward = true;
                } else if cancellable_first {
                    results.clear();
                    return Ok(());
                }
                // Not cancellable: re-run the same prompt.
            }
        }
    }
    Ok(())
}

/// Undo one commit: drop its result and its header rows. Deterministic for
/// any prompt kind because the row count derives from the prompt itself.
fn remove_previous(prompt: &Prompt, results: &mut ResultMap, header: &mut Vec<StyledLine>) {
    results.remove(prompt.name());
    for _ in 0..prompt.header_rows() {
        header.pop();
    }
}

/// Append the commit summary to the shared header.
///
/// Text blocks contribute their own lines verbatim; everything else gets a
/// `? message answer` line. Masked input echoes mask characters, never the
/// typed secret.
fn append_summary(
    config: &PrompterConfig,
    header: &mut Vec<StyledLine>,
    prompt: &Prompt,
    result: &PromptResult,
) {
    if let PromptKind::Text(text) = prompt.kind() {
        header.extend(text.lines.iter().cloned());
        return;
    }

    let answer = match (prompt.kind(), result) {
        (PromptKind::Input(input), PromptResult::Input(value)) => match input.mask {
            Some(mask) => Some(mask.to_string().repeat(value.chars().count())),
            None => Some(value.clone()),
        },
        _ => result.answer_text(),
    };
    header.push(exec::create_message(config, prompt.message(), answer.as_deref()));
}
