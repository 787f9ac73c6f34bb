//! Configuration management for logwin

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::window::{ConfigError, LinePreprocessor, PipelineOptions};

impl Config {
    /// Get the config file path (~/.config/logwin/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/logwin)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from the default location, or defaults if not found
    pub fn load() -> Result<Self> {
        io::load_from(&io::config_path()?)
    }

    /// Load configuration from an explicit path, or defaults if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        io::save_to(self, &io::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_to(self, path)
    }

    /// Validate every section, reporting the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()?;
        if self.preprocess.max_line_tokens == 0 {
            return Err(ConfigError::InvalidMaxLineTokens(0));
        }
        Ok(())
    }

    /// Noise filtering implied by the `[preprocess]` section. An empty
    /// `filters` list turns noise filtering off.
    pub fn preprocessor(&self) -> LinePreprocessor {
        if self.preprocess.filters.is_empty() {
            LinePreprocessor::unfiltered()
        } else {
            LinePreprocessor::with_filters(&self.preprocess.filters)
        }
    }

    /// Pipeline stages implied by the `[preprocess]` section.
    ///
    /// Merging and min-token filtering are per-run choices and stay off.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            preprocessor: Some(self.preprocessor()),
            max_line_tokens: self
                .preprocess
                .split_long_lines
                .then_some(self.preprocess.max_line_tokens),
            merge_tokens: None,
            drop_small: false,
        }
    }
}
