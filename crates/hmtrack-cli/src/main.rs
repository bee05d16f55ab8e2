//! hmtrack CLI - Forklift hour-meter and oil-service dashboard
//!
//! Reads the daily hour-meter history and the oil maintenance log from a
//! spreadsheet source, projects today's hour-meter value per unit and shows
//! the hours left before each oil service.

mod commands;
mod diagnostics;
mod sources;

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hmtrack_core::{DashboardConfig, SourceKind};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::diagnostics::ExitCode;

#[derive(Parser)]
#[command(name = "hmtrack")]
#[command(author, version, about = "Forklift hour-meter and oil-service dashboard", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Data source kind (overrides the configuration)
    #[arg(short, long, global = true, value_enum)]
    source: Option<SourceArg>,

    /// Directory of the file-based sources (overrides the configuration)
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Fail when a table could not be read or a row had missing data
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    JsonDir,
    CsvDir,
    Sheets,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::JsonDir => SourceKind::JsonDir,
            SourceArg::CsvDir => SourceKind::CsvDir,
            SourceArg::Sheets => SourceKind::Sheets,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the oil-service dashboard (default)
    Report(ReportArgs),

    /// Show the latest reading and today's estimate per unit
    Estimate {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the enriched maintenance log back to the source
    Export {
        /// Target sheet (table) name
        #[arg(long, value_name = "NAME")]
        sheet: String,
    },
}

#[derive(Args, Default)]
struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Output file (stdout if not specified; required for excel)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Disable terminal colours
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
    Excel,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(kind) = cli.source {
        config.source.kind = kind.into();
    }
    if let Some(dir) = &cli.data_dir {
        config.source.data_dir.clone_from(dir);
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;
    let mut source = sources::open_source(&config.source)?;

    match cli.command.unwrap_or(Commands::Report(ReportArgs::default())) {
        Commands::Report(args) => commands::report(&config, &mut source, &args, cli.strict),
        Commands::Estimate { json } => commands::estimate(&config, &mut source, json, cli.strict),
        Commands::Export { sheet } => commands::export(&config, &mut source, &sheet, cli.strict),
    }
}

fn main() -> process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::Failure.into()
        }
    }
}
