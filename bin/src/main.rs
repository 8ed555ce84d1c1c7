//! macrodash CLI - US macroeconomic data from FRED, aligned and derived.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "macrodash")]
#[command(about = "US macroeconomic dashboard data from FRED", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// FRED API key. Defaults to FRED_API_KEY from the environment or .env
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Serve series from a fixture file instead of FRED
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    /// Maximum concurrent series requests
    #[arg(long, default_value = "10", global = true)]
    concurrency: usize,

    /// Per-series timeout in seconds, retries included
    #[arg(long, default_value = "120", global = true)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog series
    Catalog {
        /// Filter by frequency (quarterly, monthly, weekly)
        #[arg(short, long)]
        frequency: Option<String>,

        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Run the pipeline and summarize the tables
    Fetch {
        /// Only build this frequency group
        #[arg(short, long)]
        frequency: Option<String>,
    },

    /// Show the latest value and change of each column
    Latest {
        /// Frequency group (quarterly, monthly, weekly)
        frequency: String,

        /// Columns to show. Defaults to every column
        columns: Vec<String>,
    },

    /// Export a frequency table
    Export {
        /// Frequency group (quarterly, monthly, weekly)
        frequency: String,

        /// Output file path. Defaults to <frequency>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Label rows 2024Q1 / 2024M1 / 2025-W22 instead of ISO dates
        #[arg(long)]
        period_labels: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let options = commands::RunOptions {
        api_key: cli.api_key,
        fixtures: cli.fixtures,
        concurrency: cli.concurrency,
        timeout: std::time::Duration::from_secs(cli.timeout),
        quiet: cli.quiet,
    };

    match command {
        Commands::Catalog { frequency, search } => {
            commands::catalog::list_series(frequency.as_deref(), search.as_deref())
        }
        Commands::Fetch { frequency } => commands::fetch::fetch(&options, frequency.as_deref()).await,
        Commands::Latest { frequency, columns } => {
            commands::latest::latest(&options, &frequency, &columns).await
        }
        Commands::Export {
            frequency,
            output,
            format,
            period_labels,
        } => commands::export::export(&options, &frequency, output, format, period_labels).await,
    }
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

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
        .init();
}
