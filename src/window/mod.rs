//! Token-aware sliding windows over line-oriented logs.
//!
//! This module turns arbitrarily large logs into an ordered list of windows,
//! each bounded by a token budget and overlapping its predecessor, so a
//! downstream LLM can read the log one request at a time without losing the
//! context around a window boundary.
//!
//! # Design
//!
//! - **Pure passes**: the builder keeps its accumulator local to one call, so
//!   a single [`WindowBuilder`] can serve many inputs concurrently
//! - **Whole lines only**: windows never cut a line; oversized lines are
//!   split upstream by [`split_large_lines`] or emitted alone
//! - **Pluggable counting**: [`TokenCounter`] hides whether counts are exact
//!   BPE tokens or the `chars / 4` approximation
//!
//! # Module Structure
//!
//! - [`counter`] - Token counting strategies and the fallback factory
//! - [`preprocess`] - Noise filtering and oversized-line splitting
//! - [`builder`] - The sliding-window pass
//! - [`merge`] - Coalescing, filtering and lookup over built windows
//! - [`pipeline`] - All stages wired together for files and line lists
//! - [`source`] - Reading files into raw lines
//! - [`types`] - Configuration, windows and statistics

pub mod builder;
pub mod counter;
pub mod error;
pub mod merge;
pub mod pipeline;
pub mod preprocess;
pub mod source;
pub mod types;

pub use builder::WindowBuilder;
pub use counter::{counter_for, ApproxCounter, TiktokenCounter, TokenCounter};
pub use error::{ConfigError, TokenizerError};
pub use merge::{filter_by_min_tokens, get_by_index, merge};
pub use pipeline::{PipelineOptions, PipelineOutput, WindowPipeline};
pub use preprocess::{
    split_large_lines, strip_terminators, LinePreprocessor, DEFAULT_FILTERS,
    DEFAULT_MAX_LINE_TOKENS,
};
pub use source::read_lines;
pub use types::{TokenizerKind, Window, WindowConfig, WindowStats};

use std::path::Path;

/// Window a log file with `config`, without noise filtering.
pub fn process_log_file(path: &Path, config: WindowConfig) -> Vec<Window> {
    WindowBuilder::new(config).build_from_file(path)
}

/// Window an in-memory line list with `config`.
pub fn process_log_lines<S: AsRef<str>>(lines: &[S], config: WindowConfig) -> Vec<Window> {
    WindowBuilder::new(config).build(lines)
}
