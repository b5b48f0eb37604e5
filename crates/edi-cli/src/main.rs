//! # edi-cli
//!
//! Command-line front end for the EDIFACT purchase-order parser.
//!
//! Reads ORDERS documents from disk and prints the extracted order records
//! as JSON or YAML.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::{CliConfig, OutputFormat};

/// Exit code for documents that fail to parse or outputs that cannot be written
const EXIT_FAILURE: u8 = 1;
/// Exit code for an unreadable or invalid configuration file
const EXIT_CONFIG: u8 = 3;

#[derive(Parser)]
#[command(name = "edi")]
#[command(about = "EDIFACT purchase-order parser")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse purchase orders into structured records
    Parse {
        /// Input file paths
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Emit JSON on a single line
        #[arg(long)]
        compact: bool,

        /// Skip documents that fail to parse
        #[arg(long)]
        keep_going: bool,
    },

    /// List the segments of a document
    Segments {
        /// Input file path
        input: PathBuf,

        /// Only list segments with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_config = match cli.config.as_deref().map(CliConfig::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("ERROR: {err}");
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let result = match cli.command {
        Commands::Parse {
            inputs,
            output,
            format,
            compact,
            keep_going,
        } => {
            let mut config = base_config;
            if let Some(format) = format {
                config = config.with_format(format);
            }
            if compact {
                config = config.with_pretty(false);
            }
            if keep_going {
                config = config.with_keep_going(true);
            }
            tracing::debug!(?config, inputs = inputs.len(), "Running parse");
            commands::parse(inputs, output, &config).await
        }
        Commands::Segments { input, tag } => commands::segments(&input, tag.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
