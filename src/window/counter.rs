//! Pluggable token counting.
//!
//! [`TokenCounter`] is the capability the builder, preprocessor and splitter
//! depend on. Two implementations exist:
//!
//! - [`TiktokenCounter`] - exact BPE counts for a named encoding
//! - [`ApproxCounter`] - `max(1, chars / 4)`, no tokenizer data required
//!
//! [`counter_for`] picks one from a [`WindowConfig`] and falls back to the
//! approximate counter when the exact tokenizer cannot be constructed.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;

use super::error::TokenizerError;
use super::types::{TokenizerKind, WindowConfig};

/// Characters per token assumed by [`ApproxCounter`].
const APPROX_CHARS_PER_TOKEN: usize = 4;

/// Counts tokens in a piece of text.
///
/// Implementations must be cheap to call repeatedly and safe to share across
/// threads; one counter serves every file of a parallel run.
pub trait TokenCounter: Send + Sync {
    /// Token count of `text`. At least 1 for any non-empty input.
    fn count(&self, text: &str) -> usize;

    /// Short identifier used in diagnostics.
    fn name(&self) -> &str;
}

/// Length-based approximation: `max(1, floor(chars / 4))`.
///
/// The empty string counts as 0 tokens. Callers needing exact parity with
/// the target model must use [`TiktokenCounter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxCounter;

impl TokenCounter for ApproxCounter {
    fn count(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        (text.chars().count() / APPROX_CHARS_PER_TOKEN).max(1)
    }

    fn name(&self) -> &str {
        "approx"
    }
}

/// Exact BPE token counts via `tiktoken-rs`.
pub struct TiktokenCounter {
    bpe: CoreBPE,
    encoding: String,
}

impl TiktokenCounter {
    /// Load the BPE ranks for `encoding`.
    pub fn new(encoding: &str) -> Result<Self, TokenizerError> {
        let bpe = match encoding {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "o200k_base" => tiktoken_rs::o200k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            other => return Err(TokenizerError::UnsupportedEncoding(other.to_string())),
        }
        .map_err(|e| TokenizerError::ModelInit(e.to_string()))?;

        Ok(Self {
            bpe,
            encoding: encoding.to_string(),
        })
    }

    pub fn encoding(&self) -> &str {
        &self.encoding
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    fn name(&self) -> &str {
        &self.encoding
    }
}

impl std::fmt::Debug for TiktokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenCounter")
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Build the counter selected by `config`.
///
/// An exact tokenizer that cannot be constructed is not fatal: a warning is
/// logged and the approximate counter is returned instead.
pub fn counter_for(config: &WindowConfig) -> Arc<dyn TokenCounter> {
    match config.tokenizer {
        TokenizerKind::Approximate => Arc::new(ApproxCounter),
        TokenizerKind::Exact => match TiktokenCounter::new(&config.encoding) {
            Ok(counter) => {
                tracing::debug!(encoding = %config.encoding, "using exact tokenizer");
                Arc::new(counter)
            }
            Err(e) => {
                tracing::warn!(
                    encoding = %config.encoding,
                    error = %e,
                    "exact tokenizer unavailable, falling back to approximate counting"
                );
                Arc::new(ApproxCounter)
            }
        },
    }
}
