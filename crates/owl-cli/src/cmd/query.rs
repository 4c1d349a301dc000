//! `owl query`: list the entries of a consolidated file within a time range.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use owl_core::files::read_serialized;
use owl_core::{Consolidator, Entry, EntryRead};

use super::format_timestamp;
use crate::output::{OutputMode, pretty_rule, render_mode};

/// Arguments for `owl query`.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Consolidated `.json` file.
    pub file: PathBuf,

    /// First timestamp to include.
    #[arg(long, default_value_t = i64::MIN, allow_negative_numbers = true)]
    pub from: i64,

    /// Last timestamp to include.
    #[arg(long, default_value_t = i64::MAX, allow_negative_numbers = true)]
    pub to: i64,

    /// Only list windows the user was active in.
    #[arg(long)]
    pub active: bool,
}

/// Execute `owl query`.
pub fn run_query(args: &QueryArgs, output: OutputMode) -> anyhow::Result<()> {
    let serialized = read_serialized(&args.file)?;
    let consolidator = Consolidator::from_serialized(&serialized)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let col = consolidator.generate_col();

    let entries: Vec<Entry> = col
        .entries_view(args.from, args.to)
        .iter()
        .map(|view| {
            let mut entry = view.to_entry();
            if args.active {
                entry.windows.retain(|w| w.is_active);
            }
            entry
        })
        .collect();

    render_mode(output, &entries, render_entries_text, render_entries_pretty)
}

#[allow(clippy::ptr_arg)]
fn render_entries_text(entries: &Vec<Entry>, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in entries {
        let idle = entry
            .duration_since_last_input
            .map_or_else(String::new, |d| d.to_string());
        if entry.windows.is_empty() {
            writeln!(w, "{}\t{idle}\t\t\t", entry.timestamp)?;
        }
        for window in &entry.windows {
            writeln!(
                w,
                "{}\t{idle}\t{}\t{}\t{}",
                entry.timestamp,
                u8::from(window.is_active),
                window.path,
                window.title
            )?;
        }
    }
    Ok(())
}

#[allow(clippy::ptr_arg)]
fn render_entries_pretty(entries: &Vec<Entry>, w: &mut dyn Write) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(w, "No entries in range.");
    }

    for entry in entries {
        write!(w, "{}", format_timestamp(entry.timestamp))?;
        if let Some(idle) = entry.duration_since_last_input {
            write!(w, "  (idle {idle}s)")?;
        }
        writeln!(w)?;
        for window in &entry.windows {
            let marker = if window.is_active { '*' } else { ' ' };
            writeln!(w, "  {marker} {}  {}", window.title, window.path)?;
        }
    }
    pretty_rule(w)?;
    writeln!(w, "{} entries", entries.len())
}
