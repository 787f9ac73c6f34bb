//! logwin - CLI entry point

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands};

/// Send tracing output to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let default = if verbose { "logwin=debug" } else { "logwin=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Window {
            files,
            window,
            output,
        } => commands::window::handle(config_path, &files, &window, &output),
        Commands::Stats {
            files,
            window,
            output,
        } => commands::stats::handle(config_path, &files, &window, &output),
        Commands::Show {
            file,
            index,
            window,
        } => commands::show::handle(config_path, &file, index, &window),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(config_path),
            ConfigCommands::Path => commands::config::handle_path(config_path),
            ConfigCommands::Init => commands::config::handle_init(config_path),
        },
    }
}
