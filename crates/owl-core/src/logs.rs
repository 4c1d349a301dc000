//! Immutable, time-sorted view of a consolidated log.

use crate::dictionary::Dictionary;
use crate::error::OwlError;
use crate::record::{EntryRecord, EntryView, WindowRecord};
use crate::types::{EntryRead, WindowRead};

/// A frozen snapshot of consolidated entries and their value lists.
///
/// Entries are kept in ascending timestamp order, which lets
/// [`Self::entries_view`] answer range queries with two binary searches.
/// The snapshot owns its data; later changes to the [`crate::Consolidator`]
/// that produced it are not observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedOwlLogs {
    entries: Vec<EntryRecord>,
    paths: Vec<String>,
    titles: Vec<String>,
}

impl ConsolidatedOwlLogs {
    /// Wrap records that are known to be sorted and in range.
    pub(crate) const fn from_parts(
        entries: Vec<EntryRecord>,
        paths: Vec<String>,
        titles: Vec<String>,
    ) -> Self {
        Self {
            entries,
            paths,
            titles,
        }
    }

    /// Build from decoded entries of any representation.
    ///
    /// `paths` and `titles` seed the value lists; strings not found in them
    /// are appended. Entries must already be in ascending timestamp order.
    pub fn from_entries<E, I>(entries: I, paths: Vec<String>, titles: Vec<String>) -> Self
    where
        E: EntryRead,
        I: IntoIterator<Item = E>,
    {
        let mut path_dictionary = Dictionary::from_values(&paths);
        let mut title_dictionary = Dictionary::from_values(&titles);

        let entries = entries
            .into_iter()
            .map(|entry| EntryRecord {
                timestamp: entry.timestamp(),
                windows: entry
                    .windows()
                    .map(|w| WindowRecord {
                        path_index: path_dictionary.use_value(w.path()),
                        title_index: title_dictionary.use_value(w.title()),
                        is_active: w.is_active(),
                    })
                    .collect(),
                duration_since_last_input: entry.duration_since_last_input(),
            })
            .collect();

        Self::from_parts(
            entries,
            path_dictionary.generate_values_list(),
            title_dictionary.generate_values_list(),
        )
    }

    /// Number of entries.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Timestamps of the first and last entries.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::EmptyRange`] when the log has no entries.
    pub fn time_range(&self) -> Result<(i64, i64), OwlError> {
        self.entries().time_range()
    }

    /// All entries with `from <= timestamp <= to`.
    ///
    /// Returns an empty view when nothing falls in the range, including
    /// when `from > to`.
    #[must_use]
    pub fn entries_view(&self, from: i64, to: i64) -> EntriesView<'_> {
        let lower = self.entries.partition_point(|e| e.timestamp < from);
        let upper = self.entries.partition_point(|e| e.timestamp <= to).max(lower);
        self.view_of(&self.entries[lower..upper])
    }

    /// Every entry.
    #[must_use]
    pub fn entries(&self) -> EntriesView<'_> {
        self.view_of(&self.entries)
    }

    /// Path values, indexed by the path indices of the records.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Title values, indexed by the title indices of the records.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    fn view_of<'a>(&'a self, records: &'a [EntryRecord]) -> EntriesView<'a> {
        EntriesView {
            records,
            paths: &self.paths,
            titles: &self.titles,
        }
    }
}

/// A contiguous, borrowed run of entries.
#[derive(Debug, Clone, Copy)]
pub struct EntriesView<'a> {
    records: &'a [EntryRecord],
    paths: &'a [String],
    titles: &'a [String],
}

impl<'a> EntriesView<'a> {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The entry at `index`, or `None` past the end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntryView<'a>> {
        self.records
            .get(index)
            .map(|record| EntryView::new(record, self.paths, self.titles))
    }

    /// The entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::IndexOutOfRange`] past the end of the view.
    pub fn at(&self, index: usize) -> Result<EntryView<'a>, OwlError> {
        self.get(index).ok_or(OwlError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Timestamps of the first and last entries in the view.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::EmptyRange`] when the view is empty.
    pub fn time_range(&self) -> Result<(i64, i64), OwlError> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Ok((first.timestamp, last.timestamp)),
            _ => Err(OwlError::EmptyRange),
        }
    }

    #[must_use]
    pub fn iter(&self) -> EntriesIter<'a> {
        EntriesIter {
            records: self.records.iter(),
            paths: self.paths,
            titles: self.titles,
        }
    }
}

impl<'a> IntoIterator for EntriesView<'a> {
    type Item = EntryView<'a>;
    type IntoIter = EntriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an [`EntriesView`].
#[derive(Debug, Clone)]
pub struct EntriesIter<'a> {
    records: std::slice::Iter<'a, EntryRecord>,
    paths: &'a [String],
    titles: &'a [String],
}

impl<'a> Iterator for EntriesIter<'a> {
    type Item = EntryView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records
            .next()
            .map(|record| EntryView::new(record, self.paths, self.titles))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl DoubleEndedIterator for EntriesIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.records
            .next_back()
            .map(|record| EntryView::new(record, self.paths, self.titles))
    }
}

impl ExactSizeIterator for EntriesIter<'_> {}
