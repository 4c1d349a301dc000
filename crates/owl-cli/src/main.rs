#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use owl_core::config;
use std::env;
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "owl: consolidate window-activity logs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Consolidate tracker logs",
        long_about = "Load tracker logs (*.json.log) and consolidated files (*.json), merge them, and write one consolidated file.",
        after_help = "EXAMPLES:\n    # Consolidate a month of logs\n    owl consolidate -i 'logs/2024-05-*.json.log' -o may.json\n\n    # Merge two consolidated files, keeping first-use order\n    owl consolidate -i home.json work.json -o all.json --no-optimize"
    )]
    Consolidate(cmd::consolidate::ConsolidateArgs),

    #[command(
        about = "Summarize a consolidated file",
        after_help = "EXAMPLES:\n    owl stats may.json\n    owl stats may.json --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "List entries in a time range",
        after_help = "EXAMPLES:\n    owl query may.json --from 1714521600000 --to 1714608000000\n    owl query may.json --active --format text"
    )]
    Query(cmd::query::QueryArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("OWL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "owl=debug,info"
        } else {
            "owl=info,warn"
        })
    });

    let format = env::var("OWL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

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

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let user_config = config::load_user_config().unwrap_or_else(|err| {
        warn!("ignoring unreadable user config: {err:#}");
        config::UserConfig::default()
    });
    let output = resolve_output_mode(cli.format, cli.json, user_config.output.as_deref());

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            if let Err(render_err) = render_error(output, &CliError::from(&err)) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    match cli.command {
        Commands::Consolidate(ref args) => {
            let project_root = match args.root {
                Some(ref root) => root.clone(),
                None => env::current_dir()?,
            };
            let project_config = config::load_project_config(&project_root)?;
            cmd::consolidate::run_consolidate(args, &project_config, output, &project_root)
        }
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Query(ref args) => cmd::query::run_query(args, output),
    }
}
