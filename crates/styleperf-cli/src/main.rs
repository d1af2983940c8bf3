mod compare;
mod inspect;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use styleperf_core::{AppConfig, FeedsFile};
use styleperf_engine::CsvDirSource;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "styleperf")]
#[command(about = "Compare style performance across marketplaces")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile both order feeds against the catalog for a date window
    Compare {
        /// First day of the window (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the window, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Directory holding the feed CSVs (overrides `STYLEPERF_FEEDS_DIR`)
        #[arg(long)]
        feeds_dir: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Print dropped-row counts to stderr
        #[arg(long)]
        show_drops: bool,
    },
    /// Resolve product labels against the catalog
    Resolve {
        /// Raw labels as they appear in an order export
        #[arg(required = true)]
        labels: Vec<String>,
        #[arg(long)]
        feeds_dir: Option<PathBuf>,
    },
    /// Load every feed and check its columns
    Validate {
        #[arg(long)]
        feeds_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = styleperf_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let feeds = styleperf_core::load_feeds_file_or_default(&config.feeds_path)?;
    tracing::debug!(env = %config.env, feeds_path = %config.feeds_path.display(), "config loaded");

    match command {
        Commands::Compare {
            start,
            end,
            feeds_dir,
            format,
            output,
            show_drops,
        } => {
            let source = feed_source(&config, &feeds, feeds_dir);
            let options = compare::CompareOptions {
                start,
                end,
                format,
                output,
                show_drops,
            };
            compare::run_compare(&source, &config, &feeds, &options)?;
        }
        Commands::Resolve { labels, feeds_dir } => {
            let source = feed_source(&config, &feeds, feeds_dir);
            inspect::run_resolve(&source, &labels)?;
        }
        Commands::Validate { feeds_dir } => {
            let source = feed_source(&config, &feeds, feeds_dir);
            inspect::run_validate(&source)?;
        }
    }

    Ok(())
}

/// CSV source for the command, preferring `--feeds-dir` over the configured
/// directory.
fn feed_source(config: &AppConfig, feeds: &FeedsFile, feeds_dir: Option<PathBuf>) -> CsvDirSource {
    let dir = feeds_dir.unwrap_or_else(|| config.feeds_dir.clone());
    CsvDirSource::new(dir).with_files(feeds.files.clone())
}
