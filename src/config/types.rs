//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::window::{ConfigError, WindowConfig, DEFAULT_FILTERS, DEFAULT_MAX_LINE_TOKENS};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Line preprocessing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Case-insensitive substrings marking noise lines; empty disables filtering
    #[serde(default = "default_filters")]
    pub filters: Vec<String>,
    /// Split lines above `max_line_tokens` before windowing
    #[serde(default)]
    pub split_long_lines: bool,
    #[serde(default = "default_max_line_tokens")]
    pub max_line_tokens: usize,
}

pub fn default_filters() -> Vec<String> {
    DEFAULT_FILTERS.iter().map(|f| f.to_string()).collect()
}

pub fn default_max_line_tokens() -> usize {
    DEFAULT_MAX_LINE_TOKENS
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            filters: default_filters(),
            split_long_lines: false,
            max_line_tokens: default_max_line_tokens(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// How windows and stats are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}
