#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flightnet::config::{NetworkConfig, load_config};
use output::OutputMode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "flightnet: yearly air-route networks ranked by centrality",
    long_about = None
)]
struct Cli {
    /// Path to a TOML config file (default: <config dir>/flightnet/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize a year's network and its most central airports and routes",
        after_help = "EXAMPLES:\n    # Analyze 2015 with the default table size\n    flightnet analyze --passengers T100.csv --airports GlobalAirportDatabase.txt\n\n    # Top 20 for 2012, as JSON\n    flightnet analyze --passengers T100.csv --airports gad.txt --year 2012 --top 20 --json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Print the heaviest routes with coordinates and the airport drawing order",
        after_help = "EXAMPLES:\n    # Keep the 500 busiest routes\n    flightnet view --passengers T100.csv --airports gad.txt --trim 500"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        about = "List the years present in a passenger table",
        after_help = "EXAMPLES:\n    flightnet years --passengers T100.csv"
    )]
    Years(cmd::years::YearsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("FLIGHTNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "flightnet=debug,info"
        } else {
            "flightnet=info,warn"
        })
    });

    let format = env::var("FLIGHTNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Resolve configuration: explicit `--config`, then the user config file if
/// it exists, then built-in defaults.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<NetworkConfig> {
    if let Some(path) = explicit {
        return load_config(path).with_context(|| format!("loading --config {}", path.display()));
    }

    let user_config = dirs::config_dir().map(|dir| dir.join("flightnet").join("config.toml"));
    if let Some(path) = user_config.filter(|path| path.is_file()) {
        debug!(path = %path.display(), "using user config");
        return load_config(&path);
    }

    Ok(NetworkConfig::default())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = output::resolve_output_mode(cli.format, cli.json);
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, config, output),
        Commands::View(ref args) => cmd::view::run_view(args, config, output),
        Commands::Years(ref args) => cmd::years::run_years(args, &config, output),
    }
}
