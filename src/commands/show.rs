//! Show command handler

use anyhow::{bail, Result};
use std::path::Path;

use logwin::window::get_by_index;
use logwin::PipelineOutput;

use super::window::window_header;
use super::{build_pipeline, write_output};
use crate::cli::WindowArgs;

/// Print one window of `file` by index.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config_path: Option<&Path>,
    file: &Path,
    index: usize,
    window: &WindowArgs,
) -> Result<()> {
    let (_, pipeline) = build_pipeline(config_path, window)?;
    let output = pipeline.run_file(file);
    let rendered = render_window(&output, index)?;
    write_output(None, &rendered)
}

/// Header and content of window `index`, or an error naming the valid range.
pub fn render_window(output: &PipelineOutput, index: usize) -> Result<String> {
    let source = output.source.as_deref().unwrap_or("<input>");
    let Some(window) = get_by_index(&output.windows, index) else {
        match output.windows.len() {
            0 => bail!("{} produced no windows", source),
            n => bail!(
                "Window index {} out of range: {} has {} window(s) (0-{})",
                index,
                source,
                n,
                n - 1
            ),
        }
    };
    Ok(format!("{}\n{}\n", window_header(window), window.content))
}
