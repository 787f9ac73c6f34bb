//! logwin Library
//!
//! Splits large line-oriented logs into overlapping, token-bounded windows
//! that fit a language model's request budget.

pub mod config;
pub mod window;

pub use config::{Config, OutputFormat};
pub use window::{
    LinePreprocessor, PipelineOptions, PipelineOutput, TokenCounter, TokenizerKind, Window,
    WindowBuilder, WindowConfig, WindowPipeline, WindowStats,
};
