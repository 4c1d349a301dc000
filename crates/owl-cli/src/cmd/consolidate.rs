//! `owl consolidate`: merge tracker logs and consolidated files into one.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use owl_core::config::ProjectConfig;
use owl_core::files::{consolidator_from_files, resolve_output, write_serialized};
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `owl consolidate`.
#[derive(Args, Debug)]
pub struct ConsolidateArgs {
    /// Input files or glob patterns (`*.json.log` tracker logs, `*.json`
    /// consolidated files).
    #[arg(short, long = "input", value_name = "PATTERN", required = true, num_args = 1..)]
    pub inputs: Vec<String>,

    /// Output files, relative to `--root` when it is set. The consolidated
    /// JSON goes to stdout when none is given.
    #[arg(short, long = "output", value_name = "PATH", num_args = 1..)]
    pub outputs: Vec<PathBuf>,

    /// Resolve relative input patterns and output paths against this
    /// directory.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Keep dictionaries in first-use order instead of reordering by usage.
    #[arg(long)]
    pub no_optimize: bool,

    /// Indent the written JSON.
    #[arg(long)]
    pub pretty: bool,
}

/// Summary payload for `owl consolidate`.
#[derive(Debug, Serialize)]
pub struct ConsolidateOutput {
    pub logs: usize,
    pub serialized: usize,
    pub ignored: Vec<PathBuf>,
    pub entries: usize,
    pub paths: usize,
    pub titles: usize,
    pub optimized: bool,
    pub outputs: Vec<PathBuf>,
}

/// Execute `owl consolidate`.
pub fn run_consolidate(
    args: &ConsolidateArgs,
    config: &ProjectConfig,
    output: OutputMode,
    project_root: &Path,
) -> Result<()> {
    let root = args.root.as_deref().unwrap_or(project_root);
    let optimize = config.consolidate.optimize && !args.no_optimize;
    let pretty = config.consolidate.pretty || args.pretty;

    let (mut consolidator, report) = consolidator_from_files(&args.inputs, Some(root))?;
    let serialized = consolidator.serialize(optimize);

    if args.outputs.is_empty() {
        let json = serialized.to_json(pretty)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "{json}")?;
        return Ok(());
    }

    let outputs: Vec<PathBuf> = args
        .outputs
        .iter()
        .map(|path| resolve_output(path, args.root.as_deref()))
        .collect();
    for path in &outputs {
        write_serialized(path, &serialized, pretty)?;
    }
    info!(
        outputs = outputs.len(),
        entries = consolidator.len(),
        "consolidation finished"
    );

    let summary = ConsolidateOutput {
        logs: report.logs.len(),
        serialized: report.serialized.len(),
        ignored: report.ignored,
        entries: consolidator.len(),
        paths: consolidator.path_dictionary().size(),
        titles: consolidator.title_dictionary().size(),
        optimized: consolidator.is_optimized(),
        outputs,
    };

    render_mode(
        output,
        &summary,
        |s, w| {
            writeln!(w, "entries\t{}", s.entries)?;
            writeln!(w, "paths\t{}", s.paths)?;
            writeln!(w, "titles\t{}", s.titles)?;
            for path in &s.outputs {
                writeln!(w, "written\t{}", path.display())?;
            }
            Ok(())
        },
        |s, w| {
            pretty_section(w, "Consolidated")?;
            pretty_kv(
                w,
                "inputs",
                format!("{} log, {} consolidated", s.logs, s.serialized),
            )?;
            if !s.ignored.is_empty() {
                pretty_kv(w, "ignored", s.ignored.len().to_string())?;
            }
            pretty_kv(w, "entries", s.entries.to_string())?;
            pretty_kv(w, "paths", s.paths.to_string())?;
            pretty_kv(w, "titles", s.titles.to_string())?;
            pretty_kv(w, "optimized", if s.optimized { "yes" } else { "no" })?;
            for path in &s.outputs {
                pretty_kv(w, "written", path.display().to_string())?;
            }
            Ok(())
        },
    )
}
