//! Loading tracker logs and consolidated files from disk.
//!
//! Two kinds of input are recognised by name:
//!
//! - `*.json.log`: raw tracker output, one JSON entry per line. Lines without
//!   a `{` (blank lines, separators) are skipped.
//! - `*.json`: a serialized consolidated log, merged as a whole.
//!
//! Anything else matched by a pattern is ignored and listed in the
//! [`LoadReport`].

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::consolidator::Consolidator;
use crate::error::ErrorCode;
use crate::serialized::SerializedLogs;
use crate::types::EntryData;
use crate::version::FormatVersion;

/// I/O failure on a named file.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::FileReadFailed,
            Self::Write { .. } => ErrorCode::FileWriteFailed,
        }
    }
}

fn read_file(path: &Path) -> Result<String, FileError> {
    std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// How a matched file is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Log,
    Serialized,
    Other,
}

impl FileKind {
    #[must_use]
    pub fn of(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if name.ends_with(".json.log") {
            Self::Log
        } else if path.extension().is_some_and(|ext| ext == "json") {
            Self::Serialized
        } else {
            Self::Other
        }
    }
}

/// Which files were consumed by [`consolidator_from_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub logs: Vec<PathBuf>,
    pub serialized: Vec<PathBuf>,
    pub ignored: Vec<PathBuf>,
}

impl LoadReport {
    /// Number of files that contributed entries.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.logs.len() + self.serialized.len()
    }
}

/// Build a consolidator from every file matched by `patterns`.
///
/// Patterns are expanded in the order given, and the files of one pattern in
/// path order. Relative patterns are resolved against `root` when it is set.
/// Log files are appended with the chronology check, so their entries must
/// continue where the previous file stopped; serialized files are merged.
///
/// # Errors
///
/// Fails on an invalid pattern, an unreadable file, an invalid entry line,
/// an out-of-order entry, or a malformed serialized file. The error names the
/// file, and the line for log files.
pub fn consolidator_from_files<S: AsRef<str>>(
    patterns: &[S],
    root: Option<&Path>,
) -> Result<(Consolidator, LoadReport)> {
    consolidator_from_files_with(patterns, root, |_| {})
}

/// Like [`consolidator_from_files`], but passes every log entry through
/// `transform` after it is parsed and before it is appended.
///
/// Entries merged from consolidated files are not transformed.
///
/// # Errors
///
/// Same as [`consolidator_from_files`].
pub fn consolidator_from_files_with<S, F>(
    patterns: &[S],
    root: Option<&Path>,
    mut transform: F,
) -> Result<(Consolidator, LoadReport)>
where
    S: AsRef<str>,
    F: FnMut(&mut EntryData),
{
    let mut consolidator = Consolidator::new();
    let mut report = LoadReport::default();

    for pattern in patterns {
        let full_pattern = resolve_pattern(pattern.as_ref(), root);
        let paths = glob::glob(&full_pattern)
            .with_context(|| format!("invalid file pattern `{}`", pattern.as_ref()))?;

        for path in paths {
            let path = path.with_context(|| format!("cannot read match of `{full_pattern}`"))?;
            if path.is_dir() {
                continue;
            }

            match FileKind::of(&path) {
                FileKind::Log => {
                    let appended = load_log_file(&mut consolidator, &path, &mut transform)?;
                    debug!(path = %path.display(), appended, "loaded log file");
                    report.logs.push(path);
                }
                FileKind::Serialized => {
                    let merged = merge_serialized_file(&mut consolidator, &path)?;
                    debug!(path = %path.display(), merged, "loaded consolidated file");
                    report.serialized.push(path);
                }
                FileKind::Other => {
                    warn!(path = %path.display(), "ignoring file with unknown extension");
                    report.ignored.push(path);
                }
            }
        }
    }

    info!(
        files = report.loaded(),
        ignored = report.ignored.len(),
        entries = consolidator.len(),
        "consolidation input loaded"
    );
    Ok((consolidator, report))
}

/// Append every entry line of a `.json.log` file, applying `transform` to
/// each parsed entry first.
///
/// # Errors
///
/// Fails if the file cannot be read, a line is not a valid entry, or an
/// entry is older than the one before it.
pub fn load_log_file<F>(
    consolidator: &mut Consolidator,
    path: &Path,
    transform: &mut F,
) -> Result<usize>
where
    F: FnMut(&mut EntryData),
{
    let content = read_file(path)?;

    let mut appended = 0;
    for (index, line) in content.lines().enumerate() {
        if !line.contains('{') {
            continue;
        }
        let line_no = index + 1;
        let mut entry: EntryData = serde_json::from_str(line)
            .with_context(|| format!("{}:{line_no}: invalid entry", path.display()))?;
        transform(&mut entry);
        consolidator
            .append_entry(&entry)
            .with_context(|| format!("{}:{line_no}: entry rejected", path.display()))?;
        appended += 1;
    }
    Ok(appended)
}

/// Merge a `.json` consolidated file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid consolidated log.
pub fn merge_serialized_file(consolidator: &mut Consolidator, path: &Path) -> Result<usize> {
    let serialized = read_serialized(path)?;
    consolidator
        .append_from_serialized(&serialized)
        .with_context(|| format!("Failed to merge {}", path.display()))
}

/// Read and parse a consolidated file.
///
/// Logs a warning when the file was written by a different major version.
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn read_serialized(path: &Path) -> Result<SerializedLogs> {
    let content = read_file(path)?;
    let serialized = SerializedLogs::from_json(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    match serialized.version.parse::<FormatVersion>() {
        Ok(version) if !version.is_compatible_with(FormatVersion::current()) => {
            warn!(
                path = %path.display(),
                code = %ErrorCode::UnsupportedVersion,
                %version,
                current = %FormatVersion::current(),
                "file was written by an incompatible version"
            );
        }
        Ok(_) => {}
        Err(err) => warn!(path = %path.display(), %err, "file has an unreadable version"),
    }

    Ok(serialized)
}

/// Write a consolidated file.
///
/// # Errors
///
/// Fails if the file cannot be written.
pub fn write_serialized(path: &Path, serialized: &SerializedLogs, pretty: bool) -> Result<()> {
    let json = serialized
        .to_json(pretty)
        .context("Failed to encode consolidated log")?;
    std::fs::write(path, json).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = serialized.entries.len(), "wrote consolidated log");
    Ok(())
}

/// Resolve an output path against `root`. Absolute paths are kept as given.
#[must_use]
pub fn resolve_output(path: &Path, root: Option<&Path>) -> PathBuf {
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}

fn resolve_pattern(pattern: &str, root: Option<&Path>) -> String {
    match root {
        Some(root) if !Path::new(pattern).is_absolute() => {
            let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
            Path::new(&escaped_root)
                .join(pattern)
                .to_string_lossy()
                .into_owned()
        }
        _ => pattern.to_string(),
    }
}
