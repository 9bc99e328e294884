//! Terrain CLI: read-only inspection of infrastructure state.
//!
//! Provides `terrain output` for printing root-module output values from a
//! state file, and `terrain untaint`, which documents a state-modifying
//! command that terrain does not perform.

#![warn(missing_docs)]

mod arguments;
mod output;
mod output_view;
mod streams;
mod untaint;
mod view;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use terrain_config::{load_config, load_config_file, TerrainConfig};
use terrain_state::LocalStateReader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::streams::Streams;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "TERRAIN_LOG";

/// Terrain: inspect infrastructure state from the command line.
#[derive(Parser, Debug)]
#[command(name = "terrain", version, about = "Terrain state inspection")]
pub struct Cli {
    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output. Overrides `view.color` in `terrain.toml`.
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Path to a custom `terrain.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Show warnings-only diagnostics as a short summary list.
    #[arg(long, global = true)]
    pub compact_warnings: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show output values from your root module.
    #[command(about = output::SYNOPSIS, disable_help_flag = true)]
    Output(CommandArgs),
    /// Remove the 'tainted' state from a resource instance.
    #[command(about = untaint::SYNOPSIS, disable_help_flag = true)]
    Untaint(CommandArgs),
}

/// Tokens handed unparsed to a command's own flag grammar.
#[derive(Parser, Debug)]
pub struct CommandArgs {
    /// Flags and arguments for the command, e.g. `-json NAME`.
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

impl From<ColorChoice> for terrain_config::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => terrain_config::ColorChoice::Auto,
            ColorChoice::Always => terrain_config::ColorChoice::Always,
            ColorChoice::Never => terrain_config::ColorChoice::Never,
        }
    }
}

/// Global settings derived from CLI flags and `terrain.toml`.
pub struct GlobalArgs {
    /// Whether only errors are logged.
    pub quiet: bool,
    /// Whether debug logging is enabled.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Whether warnings-only diagnostics are summarized.
    pub compact_warnings: bool,
    /// State file read when a command gets no `-state` override.
    pub state_path: PathBuf,
}

impl GlobalArgs {
    /// Merges command-line flags over configuration file settings.
    fn resolve(cli: &Cli, config: &TerrainConfig, stdout_is_terminal: bool) -> Self {
        let color = cli.color.map_or(config.view.color, Into::into);
        Self {
            quiet: cli.quiet,
            verbose: cli.verbose,
            color: color.resolve(stdout_is_terminal),
            compact_warnings: cli.compact_warnings || config.view.compact_warnings,
            state_path: PathBuf::from(&config.state.path),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => load_config_file(Path::new(path))?,
        None => load_config(&std::env::current_dir()?)?,
    };
    let global = GlobalArgs::resolve(&cli, &config, streams::stdout_is_terminal());
    debug!(
        quiet = global.quiet,
        verbose = global.verbose,
        color = global.color,
        compact_warnings = global.compact_warnings,
        state_path = %global.state_path.display(),
        "resolved settings"
    );

    match cli.command {
        Command::Output(ref args) => {
            let reader = LocalStateReader::new(&global.state_path);
            debug!(default_path = %reader.default_path().display(), "reading local state");
            output::run(&args.args, &global, &reader, Streams::stdio())
        }
        Command::Untaint(ref args) => untaint::run(&args.args, &global, Streams::stdio()),
    }
}

/// Installs a stderr log subscriber filtered by `TERRAIN_LOG`, falling back
/// to a level chosen by `--verbose` and `--quiet`.
fn init_logging(verbose: bool, quiet: bool) {
    let fallback = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .init();
}
