//! Entry and window types shared by the consolidator and the read views.
//!
//! There are three families:
//!
//! - [`EntryData`] / [`WindowData`]: raw records as written by the tracker,
//!   one JSON object per line, every window field optional.
//! - [`Entry`] / [`Window`]: owned, fully resolved values.
//! - [`crate::record::EntryView`] / [`crate::record::WindowView`]: borrowed
//!   values resolved against a dictionary snapshot.
//!
//! The last two share the read-only [`EntryRead`] / [`WindowRead`] contract.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw input records
// ---------------------------------------------------------------------------

/// A window as reported by the tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowData {
    /// Path to the program that owns the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Window title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// `true` if the user is active in this window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl WindowData {
    /// Inactive window with both path and title set.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            title: Some(title.into()),
            is_active: None,
        }
    }

    /// Mark the window as the one the user is active in.
    #[must_use]
    pub const fn active(mut self) -> Self {
        self.is_active = Some(true);
        self
    }
}

/// The state of the computer at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    /// When the entry was recorded.
    pub timestamp: i64,

    /// Windows open at that moment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<WindowData>>,

    /// Seconds since the last keyboard or mouse input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_since_last_user_input: Option<i64>,
}

impl EntryData {
    #[must_use]
    pub const fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            windows: None,
            duration_since_last_user_input: None,
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowData) -> Self {
        self.windows.get_or_insert_with(Vec::new).push(window);
        self
    }

    #[must_use]
    pub const fn with_idle(mut self, seconds: i64) -> Self {
        self.duration_since_last_user_input = Some(seconds);
        self
    }
}

// ---------------------------------------------------------------------------
// Read-only contract
// ---------------------------------------------------------------------------

/// Read access to a decoded window.
pub trait WindowRead {
    /// Path to the program that owns the window (`""` when unknown).
    fn path(&self) -> &str;
    /// Window title (`""` when unknown).
    fn title(&self) -> &str;
    /// `true` if the user is active in the window.
    fn is_active(&self) -> bool;
}

impl<T: WindowRead + ?Sized> WindowRead for &T {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}

/// Read access to a decoded entry.
pub trait EntryRead {
    type WindowRef<'w>: WindowRead
    where
        Self: 'w;

    /// When the entry was recorded.
    fn timestamp(&self) -> i64;

    /// Seconds since the last user input, if recorded.
    fn duration_since_last_input(&self) -> Option<i64>;

    /// Windows in recording order.
    fn windows(&self) -> impl ExactSizeIterator<Item = Self::WindowRef<'_>>;

    /// Copy into an owned [`Entry`].
    fn to_entry(&self) -> Entry {
        Entry {
            timestamp: self.timestamp(),
            windows: self
                .windows()
                .map(|w| Window {
                    path: w.path().to_owned(),
                    title: w.title().to_owned(),
                    is_active: w.is_active(),
                })
                .collect(),
            duration_since_last_input: self.duration_since_last_input(),
        }
    }
}

/// Field-by-field comparison of two entries of any representation.
pub fn same_entry<A: EntryRead, B: EntryRead>(a: &A, b: &B) -> bool {
    if a.timestamp() != b.timestamp()
        || a.duration_since_last_input() != b.duration_since_last_input()
    {
        return false;
    }

    let (wa, wb) = (a.windows(), b.windows());
    wa.len() == wb.len()
        && wa.zip(wb).all(|(x, y)| {
            x.is_active() == y.is_active() && x.path() == y.path() && x.title() == y.title()
        })
}

// ---------------------------------------------------------------------------
// Owned values
// ---------------------------------------------------------------------------

/// Owned, decoded window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub path: String,
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
}

impl Window {
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>, is_active: bool) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            is_active,
        }
    }
}

impl WindowRead for Window {
    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl From<&WindowData> for Window {
    /// Resolve absent fields: `""` for path and title, `false` for activity.
    fn from(data: &WindowData) -> Self {
        Self {
            path: data.path.clone().unwrap_or_default(),
            title: data.title.clone().unwrap_or_default(),
            is_active: data.is_active.unwrap_or(false),
        }
    }
}

/// Owned, decoded entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub timestamp: i64,
    #[serde(default)]
    pub windows: Vec<Window>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_since_last_input: Option<i64>,
}

impl Entry {
    #[must_use]
    pub const fn new(
        timestamp: i64,
        windows: Vec<Window>,
        duration_since_last_input: Option<i64>,
    ) -> Self {
        Self {
            timestamp,
            windows,
            duration_since_last_input,
        }
    }
}

impl EntryRead for Entry {
    type WindowRef<'w> = &'w Window;

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn duration_since_last_input(&self) -> Option<i64> {
        self.duration_since_last_input
    }

    fn windows(&self) -> impl ExactSizeIterator<Item = &Window> {
        self.windows.iter()
    }
}

impl From<&EntryData> for Entry {
    fn from(data: &EntryData) -> Self {
        Self {
            timestamp: data.timestamp,
            windows: data.windows.iter().flatten().map(Window::from).collect(),
            duration_since_last_input: data.duration_since_last_user_input,
        }
    }
}
