//! `owl stats`: summary of a consolidated file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use owl_core::files::read_serialized;
use owl_core::{Consolidator, FormatVersion};
use serde::Serialize;

use super::format_timestamp;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `owl stats`.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Consolidated `.json` file.
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct TimeRange {
    pub from: i64,
    pub to: i64,
}

/// Report payload for `owl stats`.
#[derive(Debug, Serialize)]
pub struct LogStats {
    pub version: String,
    pub compatible: bool,
    pub entries: usize,
    pub windows: usize,
    pub paths: usize,
    pub titles: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
}

/// Execute `owl stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let serialized = read_serialized(&args.file)?;
    let consolidator = Consolidator::from_serialized(&serialized)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let col = consolidator.generate_col();

    let compatible = serialized
        .version
        .parse::<FormatVersion>()
        .is_ok_and(|v| v.is_compatible_with(FormatVersion::current()));

    let payload = LogStats {
        version: serialized.version.clone(),
        compatible,
        entries: col.size(),
        windows: consolidator.records().iter().map(|e| e.windows.len()).sum(),
        paths: col.paths().len(),
        titles: col.titles().len(),
        time_range: col.time_range().ok().map(|(from, to)| TimeRange { from, to }),
    };

    render_mode(output, &payload, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &LogStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "version\t{}", stats.version)?;
    writeln!(w, "entries\t{}", stats.entries)?;
    writeln!(w, "windows\t{}", stats.windows)?;
    writeln!(w, "paths\t{}", stats.paths)?;
    writeln!(w, "titles\t{}", stats.titles)?;
    match stats.time_range {
        Some(ref range) => writeln!(w, "range\t{}\t{}", range.from, range.to),
        None => writeln!(w, "range\tempty"),
    }
}

fn render_stats_pretty(stats: &LogStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Consolidated log")?;
    let version = if stats.compatible {
        stats.version.clone()
    } else {
        format!("{} (incompatible)", stats.version)
    };
    pretty_kv(w, "version", version)?;
    pretty_kv(w, "entries", stats.entries.to_string())?;
    pretty_kv(w, "windows", stats.windows.to_string())?;
    pretty_kv(w, "paths", stats.paths.to_string())?;
    pretty_kv(w, "titles", stats.titles.to_string())?;
    match stats.time_range {
        Some(ref range) => {
            pretty_kv(w, "from", format_timestamp(range.from))?;
            pretty_kv(w, "to", format_timestamp(range.to))
        }
        None => pretty_kv(w, "range", "empty"),
    }
}
