//! CLI definitions for logwin
//!
//! This module contains the clap CLI structure definitions, separated from
//! main.rs so the command handlers can share the argument structs.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use logwin::{OutputFormat, TokenizerKind};

/// Version string, with the git SHA for dev builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "logwin")]
#[command(about = "[ logwin ] - split large logs into token-bounded windows for LLM analysis")]
#[command(
    long_about = "logwin - token-aware sliding windows over line-oriented logs.

logwin reads log files, drops probe noise (healthz, readiness and liveness
probes) and blank lines, and packs the remaining lines into overlapping
windows that each fit a token budget. Windows never cut a line in half; the
tail of each window is repeated at the start of the next so an LLM reading
window N still sees what led up to it.

QUICK START:
    logwin window app.log                  Print windows as text
    logwin window app.log --format json    Emit windows + stats as JSON
    logwin stats app.log                   Summarize without printing windows
    logwin show app.log 3                  Print the fourth window

Defaults come from ~/.config/logwin/config.toml (see 'logwin config')."
)]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Path to the config file
    #[arg(long, global = true, env = "LOGWIN_CONFIG", help = "Config file (default: ~/.config/logwin/config.toml)")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true, help = "Enable debug logging (RUST_LOG overrides)")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split log files into windows and print them
    #[command(long_about = "Split one or more log files into token-bounded windows.

Files are processed in parallel; output follows argument order. With
--format json the output is an array with one entry per file holding the
windows, their statistics and line counts.

EXAMPLES:
    logwin window app.log
    logwin window app.log --max-tokens 2000 --overlap-ratio 0.2
    logwin window a.log b.log --format json --output windows.json
    logwin window app.log --split-lines --max-line-tokens 500
    logwin window app.log --merge 8000 --drop-small")]
    Window {
        /// Log files to window
        #[arg(required = true, help = "Log files to process")]
        files: Vec<PathBuf>,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print window statistics for log files
    #[command(long_about = "Run the windowing pipeline and print only statistics.

EXAMPLE:
    logwin stats app.log

OUTPUT:
    app.log (1.2 MB, 12000 lines, 11850 after preprocessing)
      Windows:         42
      Total tokens:    198304
      Avg tokens:      4721.5
      Min/Max tokens:  1200 / 5000
      Lines covered:   13210")]
    Stats {
        /// Log files to summarize
        #[arg(required = true, help = "Log files to process")]
        files: Vec<PathBuf>,
        #[command(flatten)]
        window: WindowArgs,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print a single window by index
    #[command(long_about = "Print one window of a log file by its zero-based index.

EXAMPLE:
    logwin show app.log 0")]
    Show {
        /// Log file to window
        #[arg(help = "Log file to process")]
        file: PathBuf,
        /// Zero-based window index
        #[arg(help = "Zero-based window index")]
        index: usize,
        #[command(flatten)]
        window: WindowArgs,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and initialize the logwin configuration file.

Configuration is stored in ~/.config/logwin/config.toml and holds window
defaults, preprocessing filters and the output format. Command-line flags
and the WINDOW_TOKENS / OVERLAP_RATIO / MIN_TOKENS environment variables
override it.

EXAMPLES:
    logwin config show          Display the effective configuration
    logwin config path          Print the config file location
    logwin config init          Write the defaults to disk"
    )]
    Config(ConfigCommands),
}

/// Window and preprocessing overrides shared by the windowing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Hard cap on tokens per window
    #[arg(long, env = "WINDOW_TOKENS", help = "Maximum tokens per window")]
    pub max_tokens: Option<usize>,

    /// Fraction of the cap carried into the next window
    #[arg(long, env = "OVERLAP_RATIO", help = "Overlap ratio, strictly between 0 and 1")]
    pub overlap_ratio: Option<f64>,

    /// Threshold used by --drop-small
    #[arg(long, env = "MIN_TOKENS", help = "Minimum tokens for --drop-small")]
    pub min_tokens: Option<usize>,

    /// Token counting strategy
    #[arg(long, help = "Tokenizer: exact or approx")]
    pub tokenizer: Option<TokenizerKind>,

    /// Encoding for the exact tokenizer
    #[arg(long, help = "Encoding for the exact tokenizer (e.g. cl100k_base)")]
    pub encoding: Option<String>,

    /// Noise substrings, replacing the configured filters
    #[arg(long = "filter", value_name = "SUBSTRING", help = "Drop lines containing SUBSTRING (repeatable)")]
    pub filters: Vec<String>,

    /// Disable noise filtering
    #[arg(long, conflicts_with = "filters", help = "Keep probe lines (no noise filters)")]
    pub no_filters: bool,

    /// Skip preprocessing entirely
    #[arg(long, help = "Only strip line terminators (keeps blank and probe lines)")]
    pub raw: bool,

    /// Split oversized lines before windowing
    #[arg(long, help = "Split lines larger than --max-line-tokens")]
    pub split_lines: bool,

    /// Per-line ceiling for --split-lines
    #[arg(long, help = "Token ceiling per line (implies --split-lines)")]
    pub max_line_tokens: Option<usize>,

    /// Coalesce adjacent windows up to this many tokens
    #[arg(long, value_name = "TOKENS", help = "Merge adjacent windows up to TOKENS")]
    pub merge: Option<usize>,

    /// Drop windows below the minimum token count
    #[arg(long, help = "Drop windows below --min-tokens")]
    pub drop_small: bool,
}

/// Output selection shared by the printing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, help = "Output format: text or json")]
    pub format: Option<OutputFormat>,

    /// Write to a file instead of stdout
    #[arg(long, short, help = "Write output to this file")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    #[command(long_about = "Display the configuration in TOML format.

Shows the file contents merged over the defaults.

EXAMPLE:
    logwin config show")]
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration to disk
    #[command(long_about = "Write the default configuration file.

Does nothing if a config file already exists.

EXAMPLE:
    logwin config init")]
    Init,
}
