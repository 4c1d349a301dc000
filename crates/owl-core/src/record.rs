//! Dictionary-encoded entries and the borrowed views that decode them.

use crate::types::{EntryRead, WindowRead};

/// A window whose path and title are dictionary indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowRecord {
    pub path_index: usize,
    pub title_index: usize,
    pub is_active: bool,
}

/// An entry whose windows are dictionary-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub timestamp: i64,
    pub windows: Vec<WindowRecord>,
    pub duration_since_last_input: Option<i64>,
}

/// A [`WindowRecord`] resolved against path and title value lists.
#[derive(Debug, Clone, Copy)]
pub struct WindowView<'a> {
    record: &'a WindowRecord,
    paths: &'a [String],
    titles: &'a [String],
}

impl<'a> WindowView<'a> {
    #[must_use]
    pub fn path(&self) -> &'a str {
        &self.paths[self.record.path_index]
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.titles[self.record.title_index]
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.record.is_active
    }
}

impl WindowRead for WindowView<'_> {
    fn path(&self) -> &str {
        Self::path(self)
    }

    fn title(&self) -> &str {
        Self::title(self)
    }

    fn is_active(&self) -> bool {
        Self::is_active(self)
    }
}

/// An [`EntryRecord`] resolved against path and title value lists.
///
/// Views never copy strings; they stay valid as long as the
/// [`crate::ConsolidatedOwlLogs`] they came from.
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    record: &'a EntryRecord,
    paths: &'a [String],
    titles: &'a [String],
}

impl<'a> EntryView<'a> {
    pub(crate) const fn new(
        record: &'a EntryRecord,
        paths: &'a [String],
        titles: &'a [String],
    ) -> Self {
        Self {
            record,
            paths,
            titles,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        self.record.timestamp
    }

    #[must_use]
    pub const fn duration_since_last_input(&self) -> Option<i64> {
        self.record.duration_since_last_input
    }

    /// Number of windows in the entry.
    #[must_use]
    pub fn window_count(&self) -> usize {
        self.record.windows.len()
    }

    /// Resolve the `index`-th window.
    #[must_use]
    pub fn window(&self, index: usize) -> Option<WindowView<'a>> {
        self.record.windows.get(index).map(|record| WindowView {
            record,
            paths: self.paths,
            titles: self.titles,
        })
    }
}

impl<'a> EntryRead for EntryView<'a> {
    type WindowRef<'w>
        = WindowView<'a>
    where
        Self: 'w;

    fn timestamp(&self) -> i64 {
        self.record.timestamp
    }

    fn duration_since_last_input(&self) -> Option<i64> {
        self.record.duration_since_last_input
    }

    fn windows(&self) -> impl ExactSizeIterator<Item = WindowView<'a>> {
        let (paths, titles) = (self.paths, self.titles);
        self.record.windows.iter().map(move |record| WindowView {
            record,
            paths,
            titles,
        })
    }
}
