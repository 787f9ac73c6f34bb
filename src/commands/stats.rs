//! Stats command handler

use anyhow::{Context, Result};
use humansize::{format_size, DECIMAL};
use serde::Serialize;
use std::path::{Path, PathBuf};

use logwin::{OutputFormat, PipelineOutput, WindowStats};

use super::window::run_all;
use super::{build_pipeline, write_output};
use crate::cli::{OutputArgs, WindowArgs};

/// Per-file statistics without the window bodies.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    pub source: Option<&'a str>,
    pub input_bytes: usize,
    pub raw_lines: usize,
    pub lines: usize,
    pub stats: &'a WindowStats,
}

impl<'a> From<&'a PipelineOutput> for StatsReport<'a> {
    fn from(output: &'a PipelineOutput) -> Self {
        Self {
            source: output.source.as_deref(),
            input_bytes: output.input_bytes,
            raw_lines: output.raw_lines,
            lines: output.lines,
            stats: &output.stats,
        }
    }
}

impl StatsReport<'_> {
    /// Multi-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}, {} lines, {} after preprocessing)\n\
             \x20 Windows:         {}\n\
             \x20 Total tokens:    {}\n\
             \x20 Avg tokens:      {:.1}\n\
             \x20 Min/Max tokens:  {} / {}\n\
             \x20 Lines covered:   {}",
            self.source.unwrap_or("<input>"),
            format_size(self.input_bytes, DECIMAL),
            self.raw_lines,
            self.lines,
            self.stats.total_windows,
            self.stats.total_tokens,
            self.stats.avg_tokens_per_window,
            self.stats.min_tokens,
            self.stats.max_tokens,
            self.stats.total_lines,
        )
    }
}

/// Print statistics for every file.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config_path: Option<&Path>,
    files: &[PathBuf],
    window: &WindowArgs,
    output: &OutputArgs,
) -> Result<()> {
    let (config, pipeline) = build_pipeline(config_path, window)?;
    let outputs = run_all(&pipeline, files);
    let reports: Vec<StatsReport<'_>> = outputs.iter().map(StatsReport::from).collect();

    let rendered = match output.format.unwrap_or(config.output.format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&reports).context("Failed to serialize stats")?
        }
        OutputFormat::Text => reports
            .iter()
            .map(StatsReport::summary)
            .collect::<Vec<_>>()
            .join("\n\n"),
    };
    write_output(output.output.as_deref(), &rendered)
}
