//! Gridsheet - render CSV files as bordered tables with sum/product formulas

mod cli;
mod config;

use anyhow::Result;
use clap::{ArgAction, Parser};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

/// gridsheet - evaluate `#(sum ..)` / `#(prod ..)` cells in a CSV and print a table
#[derive(Parser)]
#[command(name = "gridsheet")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file to evaluate; prompts interactively when omitted
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write the table to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Field delimiter of the input
    #[arg(short, long, value_name = "CHAR")]
    delimiter: Option<char>,

    /// Border character of the table
    #[arg(long, value_name = "CHAR")]
    border: Option<char>,

    /// Config file (default: <config dir>/gridsheet/config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let (config, warnings) = config::load_config(cli.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    init_logging(cli.verbose, config.log_level.as_deref());

    let mut options = config.options;
    if let Some(delimiter) = cli.delimiter {
        options.delimiter = delimiter;
    }
    if let Some(border) = cli.border {
        options.border = border;
    }

    if let Err(e) = run(&cli, options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: &Cli, options: gridsheet_core::DocumentOptions) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.input {
        Some(input) => {
            cli::run_once(input, args.output.as_deref(), options, &mut out)?;
            if let Some(path) = &args.output {
                writeln!(out, "Exported to {}", path.display())?;
            }
            Ok(())
        }
        None => {
            let stdin = std::io::stdin();
            cli::run_interactive(stdin.lock(), &mut out, options)
        }
    }
}

/// `RUST_LOG` wins, then `-v`, then the configured level.
fn init_logging(verbose: u8, configured: Option<&str>) {
    let level = match verbose {
        0 => configured.unwrap_or(DEFAULT_LOG_LEVEL),
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|err| {
            eprintln!("Warning: invalid log level '{}': {}", level, err);
            EnvFilter::new(DEFAULT_LOG_LEVEL)
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
