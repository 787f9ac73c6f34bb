//! Command handlers for the logwin CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod config;
pub mod show;
pub mod stats;
pub mod window;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use logwin::{Config, PipelineOptions, WindowPipeline};

use crate::cli::WindowArgs;

/// Load the config from `--config` when given, else the default location.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Layer command-line and environment overrides on top of a loaded config.
pub fn apply_overrides(config: &mut Config, args: &WindowArgs) {
    if let Some(max_tokens) = args.max_tokens {
        config.window.max_tokens = max_tokens;
    }
    if let Some(ratio) = args.overlap_ratio {
        config.window.overlap_ratio = ratio;
    }
    if let Some(min_tokens) = args.min_tokens {
        config.window.min_tokens = min_tokens;
    }
    if let Some(tokenizer) = args.tokenizer {
        config.window.tokenizer = tokenizer;
    }
    if let Some(encoding) = &args.encoding {
        config.window.encoding = encoding.clone();
    }
    if !args.filters.is_empty() {
        config.preprocess.filters = args.filters.clone();
    }
    if args.no_filters {
        config.preprocess.filters.clear();
    }
    if args.split_lines {
        config.preprocess.split_long_lines = true;
    }
    if let Some(max_line_tokens) = args.max_line_tokens {
        config.preprocess.split_long_lines = true;
        config.preprocess.max_line_tokens = max_line_tokens;
    }
}

/// Load, override and validate the effective configuration.
pub fn resolve_config(path: Option<&Path>, args: &WindowArgs) -> Result<Config> {
    let mut config = load_config(path)?;
    apply_overrides(&mut config, args);
    config.validate().context("Invalid window settings")?;
    tracing::debug!(
        max_tokens = config.window.max_tokens,
        overlap_ratio = config.window.overlap_ratio,
        tokenizer = %config.window.tokenizer,
        "resolved window config"
    );
    Ok(config)
}

/// Pipeline stages for this run: the config's preprocessing plus per-run flags.
pub fn pipeline_options(config: &Config, args: &WindowArgs) -> PipelineOptions {
    let mut options = config.pipeline_options();
    if args.raw {
        options.preprocessor = None;
    }
    options.merge_tokens = args.merge;
    options.drop_small = args.drop_small;
    options
}

/// Build the pipeline for a windowing command.
pub fn build_pipeline(path: Option<&Path>, args: &WindowArgs) -> Result<(Config, WindowPipeline)> {
    let config = resolve_config(path, args)?;
    let options = pipeline_options(&config, args);
    let pipeline = WindowPipeline::new(config.window.clone(), options);
    Ok((config, pipeline))
}

/// Write rendered output to `target`, or stdout when no target is given.
pub fn write_output(target: Option<&Path>, rendered: &str) -> Result<()> {
    match target {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            tracing::debug!(path = %path.display(), bytes = rendered.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;
        }
    }
    Ok(())
}
