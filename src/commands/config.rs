//! Config subcommands handler

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use logwin::Config;

use super::load_config;

fn target_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;
    print!("{}", toml_str);
    Ok(())
}

/// Print where the config file is read from.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(config_path: Option<&Path>) -> Result<()> {
    println!("{}", target_path(config_path)?.display());
    Ok(())
}

/// Write the default configuration unless a file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init(config_path: Option<&Path>) -> Result<()> {
    let path = target_path(config_path)?;
    if init_at(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}", path.display());
    }
    Ok(())
}

/// Returns `true` when a new file was written.
pub fn init_at(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    Config::default().save_to(path)?;
    Ok(true)
}
