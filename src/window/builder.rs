//! Token-bounded sliding windows over an ordered line sequence.
//!
//! # Algorithm
//!
//! A single left-to-right pass packs whole lines into a pending buffer while
//! the summed line counts stay within `max_tokens`. When the next line does
//! not fit, the buffer is finalized as a window and its tail (up to
//! `floor(max_tokens * overlap_ratio)` tokens of whole lines) seeds the next
//! buffer, so a later window still sees the context leading into it. A line
//! that alone exceeds the cap is emitted as its own over-cap window, with no
//! overlap carried after it.
//!
//! Two guards keep the pass finite and the cap honest:
//!
//! - A finalized window is recounted from its joined content. If the recount
//!   exceeds the cap (separators can add tokens), trailing lines go back to
//!   the input until it fits, never below one line.
//! - The overlap seed is shrunk from its front until the pending line fits
//!   after it, so every window consumes at least one new line.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use super::counter::{counter_for, TokenCounter};
use super::preprocess::strip_terminators;
use super::source::read_lines;
use super::types::{reindex, Window, WindowConfig};

/// Lines accumulated for the next window.
///
/// `start..next` is the buffered range; the buffer is empty when
/// `start == next`. `tokens` is the packing total compared against the cap.
#[derive(Debug, Clone, Copy)]
struct Pending {
    start: usize,
    tokens: usize,
}

impl Pending {
    fn empty_at(index: usize) -> Self {
        Self {
            start: index,
            tokens: 0,
        }
    }
}

/// Splits line sequences into overlapping, token-bounded windows.
///
/// Holds no per-run state: [`WindowBuilder::build`] can be called repeatedly
/// and from several threads at once.
#[derive(Clone)]
pub struct WindowBuilder {
    config: WindowConfig,
    counter: Arc<dyn TokenCounter>,
}

impl std::fmt::Debug for WindowBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowBuilder")
            .field("config", &self.config)
            .field("counter", &self.counter.name())
            .finish()
    }
}

impl WindowBuilder {
    /// Create a builder using the counter selected by `config`.
    pub fn new(config: WindowConfig) -> Self {
        let counter = counter_for(&config);
        Self { config, counter }
    }

    /// Create a builder with an explicit counter.
    pub fn with_counter(config: WindowConfig, counter: Arc<dyn TokenCounter>) -> Self {
        Self { config, counter }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn counter(&self) -> &dyn TokenCounter {
        self.counter.as_ref()
    }

    pub(crate) fn shared_counter(&self) -> Arc<dyn TokenCounter> {
        Arc::clone(&self.counter)
    }

    /// Split `lines` into windows.
    ///
    /// Empty input yields no windows. Every line index appears in at least
    /// one window and `start_line` never decreases.
    pub fn build<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Window> {
        let max_tokens = self.config.max_tokens;
        let line_tokens: Vec<usize> = lines
            .iter()
            .map(|line| self.counter.count(line.as_ref()))
            .collect();

        let mut windows = Vec::new();
        let mut pending = Pending::empty_at(0);
        let mut next = 0;

        loop {
            if next == lines.len() {
                if pending.start == next {
                    break;
                }
                let (window, end) = self.finalize(lines, pending.start..next);
                windows.push(window);
                if end == next {
                    break;
                }
                // The recount handed lines back; keep going from there
                let returned: usize = line_tokens[end..next].iter().sum();
                let buffered = pending.tokens.saturating_sub(returned);
                next = end;
                pending = self.seed_overlap(lines, &line_tokens, pending.start..end, buffered);
                continue;
            }

            let tokens = line_tokens[next];

            if pending.tokens + tokens <= max_tokens {
                pending.tokens += tokens;
                next += 1;
            } else if pending.start < next {
                let (window, end) = self.finalize(lines, pending.start..next);
                let returned: usize = line_tokens[end..next].iter().sum();
                let buffered = pending.tokens.saturating_sub(returned);

                next = end;
                pending = self.seed_overlap(lines, &line_tokens, pending.start..end, buffered);
                windows.push(window);
            } else {
                // A lone line over the cap: emitted verbatim, never split here
                tracing::trace!(line = next, tokens, max_tokens, "oversized line window");
                windows.push(Window::new(
                    lines[next].as_ref().to_string(),
                    next,
                    next,
                    tokens,
                ));
                next += 1;
                pending = Pending::empty_at(next);
            }
        }

        reindex(&mut windows);
        tracing::debug!(
            lines = lines.len(),
            windows = windows.len(),
            counter = self.counter.name(),
            "built windows"
        );
        windows
    }

    /// Read `path` and window its lines as-is (terminators stripped, no
    /// noise filtering). An unreadable source yields no windows.
    pub fn build_from_file(&self, path: &Path) -> Vec<Window> {
        match read_lines(path) {
            Ok(raw) => {
                let lines: Vec<&str> = raw.iter().map(|l| strip_terminators(l)).collect();
                self.build(&lines)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read log file");
                Vec::new()
            }
        }
    }

    /// Join `range` into a window whose recounted content fits the cap.
    ///
    /// Returns the window and the exclusive end of the lines it kept.
    fn finalize<S: AsRef<str>>(&self, lines: &[S], range: Range<usize>) -> (Window, usize) {
        let start = range.start;
        let mut end = range.end;

        loop {
            let content = join_lines(&lines[start..end]);
            let token_count = self.counter.count(&content);
            if token_count <= self.config.max_tokens || end - start == 1 {
                return (Window::new(content, start, end - 1, token_count), end);
            }
            end -= 1;
        }
    }

    /// Choose the tail of a finalized window that seeds the next buffer.
    ///
    /// `buffered` is the packing total of `window`.
    fn seed_overlap<S: AsRef<str>>(
        &self,
        lines: &[S],
        line_tokens: &[usize],
        window: Range<usize>,
        buffered: usize,
    ) -> Pending {
        let next = window.end;
        let keep_tokens = self.config.keep_tokens();

        if self.config.overlap_ratio <= 0.0 || window.is_empty() {
            return Pending::empty_at(next);
        }

        let mut seed_start = if buffered <= keep_tokens {
            window.start
        } else {
            let mut kept = 0;
            let mut start = window.end;
            while start > window.start {
                let tokens = line_tokens[start - 1];
                if kept + tokens > keep_tokens {
                    break;
                }
                kept += tokens;
                start -= 1;
            }
            start
        };

        // The pending line must fit after the seed or the pass stalls
        let incoming = line_tokens[next];
        while seed_start < next {
            let seed_tokens = self.counter.count(&join_lines(&lines[seed_start..next]));
            let with_incoming = self.counter.count(&join_lines(&lines[seed_start..=next]));
            if seed_tokens + incoming <= self.config.max_tokens
                && with_incoming <= self.config.max_tokens
            {
                return Pending {
                    start: seed_start,
                    tokens: seed_tokens,
                };
            }
            seed_start += 1;
        }

        Pending::empty_at(next)
    }
}

/// Join lines with a single `\n`.
fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut joined = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            joined.push('\n');
        }
        joined.push_str(line.as_ref());
    }
    joined
}
