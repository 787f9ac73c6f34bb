//! Data structures for windowing: configuration, windows and statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

/// Which token counting strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// BPE tokenizer keyed by an encoding name
    #[serde(alias = "tiktoken")]
    Exact,
    /// `chars / 4` heuristic
    #[serde(alias = "approx", alias = "simple")]
    Approximate,
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Exact => write!(f, "exact"),
            TokenizerKind::Approximate => write!(f, "approx"),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" | "tiktoken" => Ok(TokenizerKind::Exact),
            "approx" | "approximate" | "simple" => Ok(TokenizerKind::Approximate),
            _ => Err(ConfigError::UnknownTokenizer(s.to_string())),
        }
    }
}

/// Parameters for one windowing run.
///
/// Validation is a separate step ([`WindowConfig::validate`]) that runs when
/// configuration is loaded; the builder itself accepts any value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Hard cap on tokens per window
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Fraction of `max_tokens` carried into the next window
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,
    /// Windows below this are dropped by [`super::filter_by_min_tokens`]
    #[serde(default = "default_min_tokens")]
    pub min_tokens: usize,
    #[serde(default = "default_tokenizer")]
    pub tokenizer: TokenizerKind,
    /// Encoding for the exact tokenizer (ignored by the approximate one)
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

pub fn default_max_tokens() -> usize {
    5000
}

pub fn default_overlap_ratio() -> f64 {
    0.15
}

pub fn default_min_tokens() -> usize {
    100
}

pub fn default_tokenizer() -> TokenizerKind {
    TokenizerKind::Exact
}

pub fn default_encoding() -> String {
    "cl100k_base".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            overlap_ratio: default_overlap_ratio(),
            min_tokens: default_min_tokens(),
            tokenizer: default_tokenizer(),
            encoding: default_encoding(),
        }
    }
}

impl WindowConfig {
    /// Config using the approximate counter, handy for tests and dry runs.
    pub fn approximate(max_tokens: usize, overlap_ratio: f64) -> Self {
        Self {
            max_tokens,
            overlap_ratio,
            tokenizer: TokenizerKind::Approximate,
            ..Self::default()
        }
    }

    /// Reject values the builder cannot honour, naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(self.max_tokens));
        }
        if !(self.overlap_ratio > 0.0 && self.overlap_ratio < 1.0) {
            return Err(ConfigError::InvalidOverlapRatio(self.overlap_ratio));
        }
        if self.min_tokens == 0 {
            return Err(ConfigError::InvalidMinTokens(self.min_tokens));
        }
        Ok(())
    }

    /// Tokens retained from the tail of a window as the seed of the next.
    pub fn keep_tokens(&self) -> usize {
        if self.overlap_ratio <= 0.0 || !self.overlap_ratio.is_finite() {
            return 0;
        }
        (self.max_tokens as f64 * self.overlap_ratio).floor() as usize
    }
}

/// A token-bounded slice of the preprocessed line sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Constituent lines joined by `\n`
    pub content: String,
    /// First line covered (zero-based, inclusive)
    pub start_line: usize,
    /// Last line covered (zero-based, inclusive)
    pub end_line: usize,
    /// Token count of `content`
    pub token_count: usize,
    pub window_index: usize,
    /// Length of the sequence this window belongs to
    pub total_windows: usize,
}

impl Window {
    /// Create an unindexed window; indices are assigned once the sequence is complete.
    pub fn new(content: String, start_line: usize, end_line: usize, token_count: usize) -> Self {
        Self {
            content,
            start_line,
            end_line,
            token_count,
            window_index: 0,
            total_windows: 0,
        }
    }

    /// Number of lines this window spans.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// Assign `window_index` and `total_windows` over a finished sequence.
pub(crate) fn reindex(windows: &mut [Window]) {
    let total = windows.len();
    for (index, window) in windows.iter_mut().enumerate() {
        window.window_index = index;
        window.total_windows = total;
    }
}

/// Aggregate statistics over a window sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub total_windows: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_window: f64,
    pub min_tokens: usize,
    pub max_tokens: usize,
    /// Sum of every window's line span (lines shared by overlap count twice)
    pub total_lines: usize,
}

impl WindowStats {
    /// Compute statistics; an empty sequence yields all zeros.
    pub fn from_windows(windows: &[Window]) -> Self {
        if windows.is_empty() {
            return Self::default();
        }

        let total_tokens: usize = windows.iter().map(|w| w.token_count).sum();
        let total_lines = windows.iter().map(Window::line_count).sum();
        let min_tokens = windows.iter().map(|w| w.token_count).min().unwrap_or(0);
        let max_tokens = windows.iter().map(|w| w.token_count).max().unwrap_or(0);

        Self {
            total_windows: windows.len(),
            total_tokens,
            avg_tokens_per_window: total_tokens as f64 / windows.len() as f64,
            min_tokens,
            max_tokens,
            total_lines,
        }
    }
}
