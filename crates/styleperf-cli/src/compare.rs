//! `compare` command: run the engine and write the result view.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use styleperf_core::{AppConfig, FeedsFile};
use styleperf_engine::{run_comparison, DropStats, ResultView, TableSource, TaggingRules, Window};

use crate::OutputFormat;

#[derive(Debug, Clone)]
pub(crate) struct CompareOptions {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub show_drops: bool,
}

/// Runs a comparison and writes the view to `--output` or stdout.
///
/// # Errors
///
/// Returns an error if the window is invalid, a feed cannot be loaded or
/// lacks a required column, no orders fall inside the window, or the
/// output cannot be written.
pub(crate) fn run_compare(
    source: &impl TableSource,
    config: &AppConfig,
    feeds: &FeedsFile,
    options: &CompareOptions,
) -> anyhow::Result<()> {
    let window = Window::new(options.start, options.end)?;
    let rules = TaggingRules::from_config(config, feeds.action_hints.clone());

    let report = run_comparison(source, window, &rules)?;

    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| anyhow::anyhow!("failed to create {}: {e}", path.display()))?;
            write_view(&report.view, options.format, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), rows = report.view.len(), "result written");
        }
        None => write_view(&report.view, options.format, io::stdout().lock())?,
    }

    if options.show_drops {
        for line in drop_lines(&report.drops) {
            eprintln!("{line}");
        }
    }

    Ok(())
}

fn write_view<W: Write>(view: &ResultView, format: OutputFormat, mut writer: W) -> anyhow::Result<()> {
    match format {
        OutputFormat::Csv => view.write_csv(&mut writer)?,
        OutputFormat::Json => {
            view.write_json(&mut writer)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// One `platform reason count` line per non-zero drop counter.
pub(crate) fn drop_lines(drops: &DropStats) -> Vec<String> {
    if drops.is_empty() {
        return vec!["no rows dropped".to_string()];
    }
    drops
        .iter()
        .map(|(platform, reason, count)| {
            format!("{:<2}{:<20}{count}", platform.to_string(), reason.as_str())
        })
        .collect()
}
