//! Append-only consolidation buffer.
//!
//! A [`Consolidator`] interns every window path and title through two
//! [`Dictionary`] tables and stores entries as small integer records. It can
//! be fed raw tracker entries ([`Consolidator::append_entry`]) or previously
//! serialized logs ([`Consolidator::append_from_serialized`]), and produces
//! either the persisted form ([`Consolidator::serialize`]) or a queryable
//! snapshot ([`Consolidator::generate_col`]).
//!
//! # Ordering
//!
//! Raw appends must arrive in non-decreasing timestamp order and are rejected
//! with [`OwlError::Chronology`] otherwise. Serialized merges are never
//! rejected for ordering: logs recorded on different machines may overlap in
//! time. When a merge leaves the buffer out of order it is stably re-sorted
//! by timestamp, so snapshots stay searchable.
//!
//! # Optimization
//!
//! [`Consolidator::optimize`] renumbers both dictionaries so the most used
//! strings get the smallest indices. Decoded content is unchanged.

use std::borrow::Borrow;
use std::cmp::Reverse;

use tracing::{debug, trace};

use crate::dictionary::{Dictionary, DictionaryMapper};
use crate::error::OwlError;
use crate::logs::ConsolidatedOwlLogs;
use crate::record::{EntryRecord, WindowRecord};
use crate::serialized::{
    PATH_DICTIONARY, SerializedDictionary, SerializedEntry, SerializedLogs, SerializedWindow,
    TITLE_DICTIONARY,
};
use crate::types::EntryData;
use crate::version::FORMAT_VERSION;

/// Mutable accumulator of dictionary-encoded entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Consolidator {
    path_dictionary: Dictionary,
    title_dictionary: Dictionary,
    entries: Vec<EntryRecord>,
    optimized: bool,
}

impl Consolidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a consolidator holding the content of a serialized log.
    ///
    /// # Errors
    ///
    /// Same as [`Self::append_from_serialized`].
    pub fn from_serialized(serialized: &SerializedLogs) -> Result<Self, OwlError> {
        let mut consolidator = Self::new();
        consolidator.append_from_serialized(serialized)?;
        Ok(consolidator)
    }

    // -----------------------------------------------------------------------
    // Raw appends
    // -----------------------------------------------------------------------

    /// Encode and append one raw entry.
    ///
    /// Absent paths and titles are stored as `""`, an absent `isActive` as
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::Chronology`] if `entry` is older than the last
    /// entry. Nothing is modified in that case.
    pub fn append_entry(&mut self, entry: &EntryData) -> Result<(), OwlError> {
        if let Some(last) = self.entries.last() {
            if entry.timestamp < last.timestamp {
                return Err(OwlError::Chronology {
                    position: self.entries.len(),
                    timestamp: entry.timestamp,
                    last: last.timestamp,
                });
            }
        }

        let windows = entry
            .windows
            .iter()
            .flatten()
            .map(|w| WindowRecord {
                path_index: self.path_dictionary.use_value(w.path.as_deref()),
                title_index: self.title_dictionary.use_value(w.title.as_deref()),
                is_active: w.is_active.unwrap_or(false),
            })
            .collect();

        self.entries.push(EntryRecord {
            timestamp: entry.timestamp,
            windows,
            duration_since_last_input: entry.duration_since_last_user_input,
        });
        self.optimized = false;
        Ok(())
    }

    /// Append raw entries in order, stopping at the first failure.
    ///
    /// Entries before the failing one stay appended. Returns the number of
    /// entries appended.
    ///
    /// # Errors
    ///
    /// Returns the first [`OwlError::Chronology`] encountered.
    pub fn append_entries<I>(&mut self, entries: I) -> Result<usize, OwlError>
    where
        I: IntoIterator,
        I::Item: Borrow<EntryData>,
    {
        let mut appended = 0;
        for entry in entries {
            self.append_entry(entry.borrow())?;
            appended += 1;
        }
        Ok(appended)
    }

    // -----------------------------------------------------------------------
    // Serialized merge
    // -----------------------------------------------------------------------

    /// Merge a serialized log into this buffer.
    ///
    /// Indices are remapped into the local dictionaries; only values the
    /// incoming entries actually reference are imported. Returns the number
    /// of entries merged.
    ///
    /// Unlike [`append_entry`](Self::append_entry), merging never fails on
    /// chronology. If the merged entries start before the last existing one,
    /// the whole buffer is stably re-sorted by timestamp: existing and merged
    /// entries interleave, entries with equal timestamps keep their arrival
    /// order, and record positions seen before the merge no longer hold.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::MalformedInput`] if either dictionary is missing
    /// or a window references an index outside its dictionary. The input is
    /// fully validated first, so a failed merge leaves the buffer untouched.
    pub fn append_from_serialized(&mut self, serialized: &SerializedLogs) -> Result<usize, OwlError> {
        let paths = serialized.required_dictionary(PATH_DICTIONARY)?;
        let titles = serialized.required_dictionary(TITLE_DICTIONARY)?;
        check_indices(&serialized.entries, paths.len(), titles.len())?;

        let first_new = self.entries.len();
        let mut path_mapper = DictionaryMapper::new(paths, &mut self.path_dictionary);
        let mut title_mapper = DictionaryMapper::new(titles, &mut self.title_dictionary);

        self.entries.reserve(serialized.entries.len());
        for entry in &serialized.entries {
            let windows = entry
                .windows
                .iter()
                .map(|w| WindowRecord {
                    path_index: path_mapper.source_to_target(w.path),
                    title_index: title_mapper.source_to_target(w.title),
                    is_active: w.is_active,
                })
                .collect();

            self.entries.push(EntryRecord {
                timestamp: entry.time,
                windows,
                duration_since_last_input: entry.duration_since_last_input,
            });
        }

        if !self.entries[first_new.saturating_sub(1)..].is_sorted_by_key(|e| e.timestamp) {
            debug!(
                merged = serialized.entries.len(),
                "merged log overlaps existing entries; re-sorting by timestamp"
            );
            self.entries.sort_by_key(|e| e.timestamp);
        }

        self.optimized = false;
        debug!(
            version = %serialized.version,
            merged = serialized.entries.len(),
            total = self.entries.len(),
            "merged serialized log"
        );
        Ok(serialized.entries.len())
    }

    /// Parse JSON text and merge it.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::MalformedInput`] for invalid JSON, a wrong shape,
    /// or any failure of [`Self::append_from_serialized`].
    pub fn append_from_json(&mut self, json: &str) -> Result<usize, OwlError> {
        let serialized = SerializedLogs::from_json(json)?;
        self.append_from_serialized(&serialized)
    }

    // -----------------------------------------------------------------------
    // Optimization
    // -----------------------------------------------------------------------

    /// Renumber both dictionaries by descending usage.
    ///
    /// Values used by the same number of windows keep their relative order,
    /// so the result is deterministic. Does nothing if no entries were added
    /// since the last call.
    pub fn optimize(&mut self) {
        if self.optimized {
            return;
        }

        let mut path_counts = vec![0usize; self.path_dictionary.size()];
        let mut title_counts = vec![0usize; self.title_dictionary.size()];
        for window in self.entries.iter().flat_map(|e| &e.windows) {
            path_counts[window.path_index] += 1;
            title_counts[window.title_index] += 1;
        }

        let path_order = frequency_order(&path_counts);
        let title_order = frequency_order(&title_counts);
        trace!(?path_order, ?title_order, "dictionary reorder");

        let path_remap = inverse(&path_order);
        let title_remap = inverse(&title_order);
        for window in self.entries.iter_mut().flat_map(|e| e.windows.iter_mut()) {
            window.path_index = path_remap[window.path_index];
            window.title_index = title_remap[window.title_index];
        }

        self.path_dictionary = reordered(&self.path_dictionary, &path_order);
        self.title_dictionary = reordered(&self.title_dictionary, &title_order);
        self.optimized = true;
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Produce the persisted form, optimizing first when asked to.
    pub fn serialize(&mut self, optimize: bool) -> SerializedLogs {
        if optimize {
            self.optimize();
        }
        self.to_serialized()
    }

    /// Produce the persisted form with the current index assignment.
    #[must_use]
    pub fn to_serialized(&self) -> SerializedLogs {
        SerializedLogs {
            version: FORMAT_VERSION.to_string(),
            dictionaries: vec![
                SerializedDictionary {
                    name: PATH_DICTIONARY.to_string(),
                    set: self.path_dictionary.generate_values_list(),
                },
                SerializedDictionary {
                    name: TITLE_DICTIONARY.to_string(),
                    set: self.title_dictionary.generate_values_list(),
                },
            ],
            entries: self
                .entries
                .iter()
                .map(|entry| SerializedEntry {
                    time: entry.timestamp,
                    windows: entry
                        .windows
                        .iter()
                        .map(|w| SerializedWindow {
                            path: w.path_index,
                            title: w.title_index,
                            is_active: w.is_active,
                        })
                        .collect(),
                    duration_since_last_input: entry.duration_since_last_input,
                })
                .collect(),
        }
    }

    /// Snapshot the buffer into an immutable, queryable log.
    #[must_use]
    pub fn generate_col(&self) -> ConsolidatedOwlLogs {
        ConsolidatedOwlLogs::from_parts(
            self.entries.clone(),
            self.path_dictionary.generate_values_list(),
            self.title_dictionary.generate_values_list(),
        )
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `true` if [`Self::optimize`] ran and nothing was added since.
    #[must_use]
    pub const fn is_optimized(&self) -> bool {
        self.optimized
    }

    #[must_use]
    pub const fn path_dictionary(&self) -> &Dictionary {
        &self.path_dictionary
    }

    #[must_use]
    pub const fn title_dictionary(&self) -> &Dictionary {
        &self.title_dictionary
    }

    /// Encoded entries in buffer order.
    #[must_use]
    pub fn records(&self) -> &[EntryRecord] {
        &self.entries
    }
}

fn check_indices(entries: &[SerializedEntry], paths: usize, titles: usize) -> Result<(), OwlError> {
    for (position, entry) in entries.iter().enumerate() {
        for window in &entry.windows {
            if window.path >= paths {
                return Err(OwlError::MalformedInput(format!(
                    "entry #{position} (time {}) references path index {} but `{PATH_DICTIONARY}` has {paths} values",
                    entry.time, window.path
                )));
            }
            if window.title >= titles {
                return Err(OwlError::MalformedInput(format!(
                    "entry #{position} (time {}) references title index {} but `{TITLE_DICTIONARY}` has {titles} values",
                    entry.time, window.title
                )));
            }
        }
    }
    Ok(())
}

/// Indices sorted by descending count; `order[new] = old`.
fn frequency_order(counts: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by_key(|&index| Reverse(counts[index]));
    order
}

/// Invert a permutation; `inverse(order)[old] = new`.
fn inverse(order: &[usize]) -> Vec<usize> {
    let mut remap = vec![0; order.len()];
    for (new, &old) in order.iter().enumerate() {
        remap[old] = new;
    }
    remap
}

fn reordered(dictionary: &Dictionary, order: &[usize]) -> Dictionary {
    let values = dictionary.generate_values_list();
    Dictionary::from_values(order.iter().map(|&old| values[old].as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Entry, EntryRead, Window, WindowData, same_entry};
    use serde_json::json;

    const PATHS: [&str; 4] = [
        "/program/0.exe",
        "/program/1.exe",
        "/program/2.exe",
        "/program/3.exe",
    ];
    const TITLES: [&str; 4] = ["Zero", "One", "Two", "Three"];

    fn window_data_mock(i: usize, active: bool) -> WindowData {
        let window = WindowData::new(PATHS[i], TITLES[i]);
        if active { window.active() } else { window }
    }

    fn basic_entries() -> Vec<EntryData> {
        vec![
            EntryData::new(0)
                .with_window(window_data_mock(0, false))
                .with_window(window_data_mock(1, true))
                .with_window(window_data_mock(2, false)),
            EntryData::new(1)
                .with_window(window_data_mock(1, true))
                .with_window(window_data_mock(2, false)),
            EntryData::new(2).with_idle(60),
        ]
    }

    #[test]
    fn appended_entries_decode_to_the_originals() {
        let mut consolidator = Consolidator::new();
        for entry in basic_entries() {
            consolidator.append_entry(&entry).expect("in order");
        }

        let col = consolidator.generate_col();
        let view = col.entries_view(0, 2);
        let originals = basic_entries();
        assert_eq!(view.len(), originals.len());

        for (original, decoded) in originals.iter().zip(view) {
            assert!(same_entry(&Entry::from(original), &decoded));
        }
    }

    #[test]
    fn out_of_order_append_is_rejected_without_mutation() {
        let mut consolidator = Consolidator::new();
        consolidator
            .append_entry(&EntryData::new(100).with_window(WindowData::new("/a", "A")))
            .expect("first entry");
        let before = consolidator.clone();

        let err = consolidator
            .append_entry(&EntryData::new(50).with_window(WindowData::new("/b", "B")))
            .expect_err("older entry must be rejected");

        assert_eq!(
            err,
            OwlError::Chronology {
                position: 1,
                timestamp: 50,
                last: 100
            }
        );
        assert_eq!(consolidator.len(), 1);
        assert_eq!(consolidator, before);
        assert_eq!(consolidator.path_dictionary().index_of("/b"), None);
    }

    #[test]
    fn equal_timestamps_are_accepted() {
        let mut consolidator = Consolidator::new();
        let appended = consolidator
            .append_entries([EntryData::new(5), EntryData::new(5)])
            .expect("equal timestamps are in order");
        assert_eq!(appended, 2);
    }

    #[test]
    fn batch_append_keeps_prefix_on_failure() {
        let mut consolidator = Consolidator::new();
        let batch = [EntryData::new(1), EntryData::new(3), EntryData::new(2), EntryData::new(4)];

        let err = consolidator
            .append_entries(&batch)
            .expect_err("third entry is out of order");
        assert!(matches!(err, OwlError::Chronology { position: 2, .. }));
        assert_eq!(consolidator.len(), 2);
    }

    #[test]
    fn absent_window_fields_decode_to_defaults() {
        let mut consolidator = Consolidator::new();
        consolidator
            .append_entry(&EntryData::new(1).with_window(WindowData::default()))
            .expect("append");

        let col = consolidator.generate_col();
        let entry = col.entries().at(0).expect("one entry").to_entry();
        assert_eq!(entry.windows, [Window::new("", "", false)]);
    }

    #[test]
    fn serialize_without_optimizing_keeps_first_use_order() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entries(basic_entries()).expect("append");

        let serialized = serde_json::to_value(consolidator.serialize(false)).expect("json");
        assert_eq!(
            serialized,
            json!({
                "version": FORMAT_VERSION,
                "dictionaries": [
                    {"name": "windows[].path", "set": ["/program/0.exe", "/program/1.exe", "/program/2.exe"]},
                    {"name": "windows[].title", "set": ["Zero", "One", "Two"]}
                ],
                "entries": [
                    {"time": 0, "windows": [
                        {"path": 0, "title": 0},
                        {"path": 1, "title": 1, "isActive": true},
                        {"path": 2, "title": 2}
                    ]},
                    {"time": 1, "windows": [
                        {"path": 1, "title": 1, "isActive": true},
                        {"path": 2, "title": 2}
                    ]},
                    {"time": 2, "windows": [], "durationSinceLastInput": 60}
                ]
            })
        );
        assert!(!consolidator.is_optimized());
    }

    #[test]
    fn optimize_orders_by_descending_usage() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entries(basic_entries()).expect("append");

        let serialized = consolidator.serialize(true);
        assert_eq!(
            serialized.dictionary(PATH_DICTIONARY),
            Some(&["/program/1.exe".to_string(), "/program/2.exe".into(), "/program/0.exe".into()][..])
        );
        assert_eq!(
            serialized.dictionary(TITLE_DICTIONARY),
            Some(&["One".to_string(), "Two".into(), "Zero".into()][..])
        );
        assert_eq!(
            serde_json::to_value(&serialized.entries[0]).expect("json"),
            json!({"time": 0, "windows": [
                {"path": 2, "title": 2},
                {"path": 0, "title": 0, "isActive": true},
                {"path": 1, "title": 1}
            ]})
        );
        assert!(consolidator.is_optimized());
    }

    #[test]
    fn optimize_preserves_decoded_content() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entries(basic_entries()).expect("append");
        let before: Vec<Entry> = consolidator
            .generate_col()
            .entries()
            .iter()
            .map(|e| e.to_entry())
            .collect();

        consolidator.optimize();
        let after: Vec<Entry> = consolidator
            .generate_col()
            .entries()
            .iter()
            .map(|e| e.to_entry())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn repeated_serialize_is_stable() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entries(basic_entries()).expect("append");

        consolidator.optimize();
        let first = consolidator.serialize(true);
        let second = consolidator.serialize(true);
        assert_eq!(first, second);
    }

    #[test]
    fn append_after_optimize_marks_dirty() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entries(basic_entries()).expect("append");
        consolidator.optimize();
        assert!(consolidator.is_optimized());

        consolidator
            .append_entry(&EntryData::new(3).with_window(window_data_mock(3, false)))
            .expect("append");
        assert!(!consolidator.is_optimized());
    }

    #[test]
    fn empty_and_missing_fields_share_the_empty_string() {
        let entries = [
            EntryData::new(10010)
                .with_window(WindowData::new("C:\\program\\chrome.exe", "Chrome"))
                .with_window(WindowData::new("C:\\program\\firefox.exe", "Firefox")),
            EntryData::new(10020)
                .with_window(WindowData::new("C:\\program\\chrome.exe", "Chrome"))
                .with_window(WindowData::new("C:\\program\\firefox.exe", "Firefox"))
                .with_window(WindowData::new("", "Task Manager"))
                .with_window(WindowData::new("C:\\notepad.exe", ""))
                .with_window(WindowData::new("", ""))
                .with_window(WindowData::default()),
        ];

        let mut consolidator = Consolidator::new();
        consolidator.append_entries(&entries).expect("append");

        let serialized = serde_json::to_value(consolidator.serialize(false)).expect("json");
        assert_eq!(
            serialized["dictionaries"],
            json!([
                {"name": "windows[].path", "set": ["C:\\program\\chrome.exe", "C:\\program\\firefox.exe", "", "C:\\notepad.exe"]},
                {"name": "windows[].title", "set": ["Chrome", "Firefox", "Task Manager", ""]}
            ])
        );
        assert_eq!(
            serialized["entries"][1]["windows"],
            json!([
                {"path": 0, "title": 0},
                {"path": 1, "title": 1},
                {"path": 2, "title": 2},
                {"path": 3, "title": 3},
                {"path": 2, "title": 3},
                {"path": 2, "title": 3}
            ])
        );
    }

    #[test]
    fn merge_remaps_into_existing_dictionaries() {
        let mut local = Consolidator::new();
        local
            .append_entry(&EntryData::new(1).with_window(window_data_mock(2, false)))
            .expect("append");

        let mut remote = Consolidator::new();
        remote
            .append_entries([
                EntryData::new(5).with_window(window_data_mock(0, true)),
                EntryData::new(6)
                    .with_window(window_data_mock(2, false))
                    .with_idle(9),
            ])
            .expect("append");

        let merged = local
            .append_from_serialized(&remote.serialize(true))
            .expect("merge");
        assert_eq!(merged, 2);
        assert_eq!(local.len(), 3);
        assert_eq!(
            local.path_dictionary().generate_values_list(),
            ["/program/2.exe", "/program/0.exe"]
        );

        let col = local.generate_col();
        let last = col.entries().at(2).expect("third").to_entry();
        assert_eq!(
            last,
            Entry::new(6, vec![Window::new("/program/2.exe", "Two", false)], Some(9))
        );
        let middle = col.entries().at(1).expect("second").to_entry();
        assert_eq!(middle.windows, [Window::new("/program/0.exe", "Zero", true)]);
    }

    #[test]
    fn interleaved_merge_is_accepted_and_kept_sorted() {
        let mut first = Consolidator::new();
        first
            .append_entries([EntryData::new(10), EntryData::new(30)])
            .expect("append");
        let mut second = Consolidator::new();
        second
            .append_entries([EntryData::new(20), EntryData::new(40)])
            .expect("append");

        let mut merged = Consolidator::from_serialized(&first.serialize(true)).expect("merge");
        merged
            .append_from_serialized(&second.serialize(true))
            .expect("overlapping logs merge");

        let timestamps: Vec<i64> = merged.records().iter().map(|e| e.timestamp).collect();
        assert_eq!(timestamps, [10, 20, 30, 40]);
        assert_eq!(merged.generate_col().entries_view(15, 35).len(), 2);
    }

    #[test]
    fn equal_timestamps_keep_arrival_order_after_resort() {
        let mut local = Consolidator::new();
        local
            .append_entries([
                EntryData::new(10),
                EntryData::new(20).with_window(WindowData::new("/local", "L")),
                EntryData::new(30),
            ])
            .expect("append");
        let mut incoming = Consolidator::new();
        incoming
            .append_entries([EntryData::new(20).with_window(WindowData::new("/incoming", "I"))])
            .expect("append");

        local
            .append_from_serialized(&incoming.serialize(false))
            .expect("merge");

        let col = local.generate_col();
        let paths: Vec<String> = col
            .entries_view(20, 20)
            .iter()
            .map(|e| e.to_entry().windows[0].path.clone())
            .collect();
        assert_eq!(paths, ["/local", "/incoming"]);
        assert_eq!(col.entries().at(3).expect("entry").timestamp(), 30);
    }

    #[test]
    fn merge_requires_both_dictionaries() {
        let mut consolidator = Consolidator::new();
        let err = consolidator
            .append_from_json(
                r#"{"version": "0.3.0", "dictionaries": [{"name": "windows[].path", "set": []}], "entries": []}"#,
            )
            .expect_err("title dictionary missing");
        assert!(matches!(err, OwlError::MalformedInput(ref msg) if msg.contains(TITLE_DICTIONARY)));
    }

    #[test]
    fn dangling_index_aborts_the_whole_merge() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entry(&EntryData::new(1)).expect("append");
        let before = consolidator.clone();

        let err = consolidator
            .append_from_json(
                r#"{
                    "version": "0.3.0",
                    "dictionaries": [
                        {"name": "windows[].path", "set": ["/a"]},
                        {"name": "windows[].title", "set": ["A"]}
                    ],
                    "entries": [
                        {"time": 2, "windows": [{"path": 0, "title": 0}]},
                        {"time": 3, "windows": [{"path": 1, "title": 0}]}
                    ]
                }"#,
            )
            .expect_err("path index 1 does not exist");

        assert!(matches!(err, OwlError::MalformedInput(_)));
        assert_eq!(consolidator, before);
    }

    #[test]
    fn merge_ignores_unused_dictionary_values() {
        let mut consolidator = Consolidator::new();
        consolidator
            .append_from_json(
                r#"{
                    "version": "0.3.0",
                    "dictionaries": [
                        {"name": "windows[].title", "set": ["unused", "T"]},
                        {"name": "windows[].path", "set": ["/p"]}
                    ],
                    "entries": [{"time": 2, "windows": [{"path": 0, "title": 1, "isActive": true}]}]
                }"#,
            )
            .expect("merge");

        assert_eq!(consolidator.title_dictionary().generate_values_list(), ["T"]);
        let entry = consolidator.generate_col().entries().at(0).expect("entry").to_entry();
        assert_eq!(entry.windows, [Window::new("/p", "T", true)]);
    }

    #[test]
    fn snapshot_does_not_observe_later_appends() {
        let mut consolidator = Consolidator::new();
        consolidator.append_entry(&EntryData::new(1)).expect("append");
        let col = consolidator.generate_col();

        consolidator.append_entry(&EntryData::new(2)).expect("append");
        assert_eq!(col.size(), 1);
        assert_eq!(consolidator.generate_col().size(), 2);
    }

    #[test]
    fn empty_consolidator_serializes_empty_dictionaries() {
        let mut consolidator = Consolidator::new();
        let serialized = consolidator.serialize(true);
        assert!(serialized.entries.is_empty());
        assert_eq!(serialized.dictionary(PATH_DICTIONARY), Some(&[][..]));
        assert_eq!(serialized.dictionary(TITLE_DICTIONARY), Some(&[][..]));
    }

    #[test]
    fn frequency_order_is_stable_for_ties() {
        assert_eq!(frequency_order(&[1, 3, 1, 3, 2]), [1, 3, 4, 0, 2]);
        assert_eq!(inverse(&[1, 3, 4, 0, 2]), [3, 0, 4, 1, 2]);
    }
}
