//! End-to-end windowing: raw lines in, windows and statistics out.
//!
//! Stages run in a fixed order:
//! 1. [`LinePreprocessor`] (or terminator stripping only, in raw mode)
//! 2. [`split_large_lines`] when a per-line ceiling is set
//! 3. [`WindowBuilder::build`]
//! 4. [`merge`] when a merge ceiling is set
//! 5. [`filter_by_min_tokens`] when small windows should be dropped

use std::path::Path;

use serde::Serialize;

use super::builder::WindowBuilder;
use super::merge::{filter_by_min_tokens, merge};
use super::preprocess::{split_large_lines, strip_terminators, LinePreprocessor};
use super::source::read_lines;
use super::types::{Window, WindowConfig, WindowStats};

/// Optional stages around the builder.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Noise filtering; `None` only strips line terminators
    pub preprocessor: Option<LinePreprocessor>,
    /// Split lines above this many tokens before windowing
    pub max_line_tokens: Option<usize>,
    /// Coalesce adjacent windows up to this many tokens
    pub merge_tokens: Option<usize>,
    /// Drop windows below the configured `min_tokens`
    pub drop_small: bool,
}

impl PipelineOptions {
    /// Options with the default probe filters and no other stages.
    pub fn filtered() -> Self {
        Self {
            preprocessor: Some(LinePreprocessor::default()),
            ..Self::default()
        }
    }
}

/// Result of one pipeline run, ready to hand to an LLM caller.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Source path, if the lines came from a file
    pub source: Option<String>,
    /// RFC 3339 time the run finished
    pub processed_at: String,
    /// Bytes of decoded input
    pub input_bytes: usize,
    /// Lines before preprocessing
    pub raw_lines: usize,
    /// Lines the windows index into
    pub lines: usize,
    pub stats: WindowStats,
    pub windows: Vec<Window>,
}

impl PipelineOutput {
    fn empty(source: Option<String>) -> Self {
        Self {
            source,
            processed_at: chrono::Utc::now().to_rfc3339(),
            input_bytes: 0,
            raw_lines: 0,
            lines: 0,
            stats: WindowStats::default(),
            windows: Vec::new(),
        }
    }
}

/// Preprocess, window and post-process line sequences.
#[derive(Debug, Clone)]
pub struct WindowPipeline {
    builder: WindowBuilder,
    options: PipelineOptions,
}

impl WindowPipeline {
    pub fn new(config: WindowConfig, options: PipelineOptions) -> Self {
        Self::with_builder(WindowBuilder::new(config), options)
    }

    pub fn with_builder(builder: WindowBuilder, options: PipelineOptions) -> Self {
        Self { builder, options }
    }

    pub fn builder(&self) -> &WindowBuilder {
        &self.builder
    }

    /// Run every stage over raw lines (terminators may be attached).
    pub fn run_lines<S: AsRef<str>>(&self, raw_lines: &[S]) -> PipelineOutput {
        let mut output = PipelineOutput::empty(None);
        output.raw_lines = raw_lines.len();
        output.input_bytes = raw_lines.iter().map(|l| l.as_ref().len()).sum();

        let mut lines = match &self.options.preprocessor {
            Some(pre) => pre.preprocess(raw_lines),
            None => raw_lines
                .iter()
                .map(|l| strip_terminators(l.as_ref()).to_string())
                .collect(),
        };

        if let Some(max_line_tokens) = self.options.max_line_tokens {
            let counter = self.builder.shared_counter();
            lines = split_large_lines(&lines, max_line_tokens, counter.as_ref());
        }

        let mut windows = self.builder.build(&lines);

        if let Some(merge_tokens) = self.options.merge_tokens {
            windows = merge(&windows, merge_tokens);
        }
        if self.options.drop_small {
            windows = filter_by_min_tokens(windows, self.builder.config().min_tokens);
        }

        output.lines = lines.len();
        output.stats = WindowStats::from_windows(&windows);
        output.windows = windows;
        output
    }

    /// Read `path` and run every stage. An unreadable file yields an empty
    /// output and a logged warning.
    pub fn run_file(&self, path: &Path) -> PipelineOutput {
        let source = Some(path.display().to_string());
        match read_lines(path) {
            Ok(raw) => {
                let mut output = self.run_lines(&raw);
                output.source = source;
                output
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read log file");
                PipelineOutput::empty(source)
            }
        }
    }
}
