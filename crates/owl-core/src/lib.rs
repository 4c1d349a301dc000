//! owl-core library.
//!
//! Turns a stream of window-tracking snapshots into a compact,
//! dictionary-encoded log that can be merged with other logs, persisted as
//! JSON, and queried by time range.
//!
//! ```
//! use owl_core::{Consolidator, EntryData, WindowData};
//!
//! let mut consolidator = Consolidator::new();
//! consolidator.append_entries([
//!     EntryData::new(10).with_window(WindowData::new("/usr/bin/vim", "notes.md").active()),
//!     EntryData::new(20).with_idle(30),
//! ])?;
//!
//! let col = consolidator.generate_col();
//! assert_eq!(col.time_range()?, (10, 20));
//! assert_eq!(col.entries_view(15, 25).len(), 1);
//! # Ok::<(), owl_core::OwlError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: [`OwlError`] for the engine; `anyhow::Result` for file and
//!   config loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod config;
pub mod consolidator;
pub mod dictionary;
pub mod error;
pub mod files;
pub mod logs;
pub mod record;
pub mod serialized;
pub mod types;
pub mod version;

pub use consolidator::Consolidator;
pub use dictionary::{Dictionary, DictionaryMapper};
pub use error::{ErrorCode, OwlError};
pub use logs::{ConsolidatedOwlLogs, EntriesIter, EntriesView};
pub use record::{EntryRecord, EntryView, WindowRecord, WindowView};
pub use serialized::{
    PATH_DICTIONARY, SerializedDictionary, SerializedEntry, SerializedLogs, SerializedWindow,
    TITLE_DICTIONARY,
};
pub use types::{Entry, EntryData, EntryRead, Window, WindowData, WindowRead, same_entry};
pub use version::{FORMAT_VERSION, FormatVersion};
