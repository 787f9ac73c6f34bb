//! Error types for window configuration and tokenizer construction.

use thiserror::Error;

/// A `WindowConfig` (or a related setting) holds a value the builder cannot use.
///
/// Each variant names the offending field so CLI and config-file users can
/// tell exactly what to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("window.max_tokens must be > 0 (got {0})")]
    InvalidMaxTokens(usize),

    #[error("window.overlap_ratio must be strictly between 0 and 1 (got {0})")]
    InvalidOverlapRatio(f64),

    #[error("window.min_tokens must be > 0 (got {0})")]
    InvalidMinTokens(usize),

    #[error("preprocess.max_line_tokens must be > 0 (got {0})")]
    InvalidMaxLineTokens(usize),

    #[error("Unknown tokenizer '{0}'. Valid: exact, approx")]
    UnknownTokenizer(String),

    #[error("Unknown output format '{0}'. Valid: text, json")]
    UnknownFormat(String),
}

/// Failure to construct an exact (BPE) tokenizer.
///
/// Never fatal: the counter factory downgrades to the approximate counter.
#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("Unsupported encoding '{0}'. Valid: cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base")]
    UnsupportedEncoding(String),

    #[error("Tokenizer initialization failed: {0}")]
    ModelInit(String),
}
