//! Window command handler

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use logwin::{OutputFormat, PipelineOutput, Window, WindowPipeline};

use super::{build_pipeline, write_output};
use crate::cli::{OutputArgs, WindowArgs};

/// Window every file and print the result.
///
/// Files run in parallel; results keep argument order. A file that cannot
/// be read produces a warning and an empty entry.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config_path: Option<&Path>,
    files: &[PathBuf],
    window: &WindowArgs,
    output: &OutputArgs,
) -> Result<()> {
    let (config, pipeline) = build_pipeline(config_path, window)?;
    let outputs = run_all(&pipeline, files);

    let rendered = match output.format.unwrap_or(config.output.format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&outputs).context("Failed to serialize windows")?
        }
        OutputFormat::Text => render_text(&outputs),
    };
    write_output(output.output.as_deref(), &rendered)
}

/// Run the pipeline over `files` on the rayon pool.
pub fn run_all(pipeline: &WindowPipeline, files: &[PathBuf]) -> Vec<PipelineOutput> {
    files
        .par_iter()
        .map(|path| pipeline.run_file(path))
        .collect()
}

/// Header line printed above each window's content.
pub fn window_header(window: &Window) -> String {
    format!(
        "--- window {}/{} | lines {}-{} | {} tokens ---",
        window.window_index + 1,
        window.total_windows,
        window.start_line,
        window.end_line,
        window.token_count
    )
}

/// Plain-text rendering: a banner per file, then each window with its header.
pub fn render_text(outputs: &[PipelineOutput]) -> String {
    let mut out = String::new();
    for (i, output) in outputs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let source = output.source.as_deref().unwrap_or("<input>");
        let _ = writeln!(
            out,
            "==> {} <== ({} windows, {} lines)",
            source, output.stats.total_windows, output.lines
        );
        for window in &output.windows {
            let _ = writeln!(out, "{}", window_header(window));
            let _ = writeln!(out, "{}", window.content);
        }
    }
    out
}
