//! The persisted JSON form of a consolidated log.
//!
//! ```json
//! {
//!   "version": "0.3.0",
//!   "dictionaries": [
//!     {"name": "windows[].path", "set": ["/usr/bin/firefox"]},
//!     {"name": "windows[].title", "set": ["Inbox"]}
//!   ],
//!   "entries": [
//!     {"time": 1000, "windows": [{"path": 0, "title": 0, "isActive": true}]},
//!     {"time": 1010, "windows": [], "durationSinceLastInput": 60}
//!   ]
//! }
//! ```
//!
//! `isActive` is written only when true and `durationSinceLastInput` only when
//! recorded; readers treat a missing key as `false` / `null`. Unknown keys are
//! ignored so files from newer minor versions still load.

use serde::{Deserialize, Serialize};

use crate::error::OwlError;

/// Dictionary name holding window paths.
pub const PATH_DICTIONARY: &str = "windows[].path";

/// Dictionary name holding window titles.
pub const TITLE_DICTIONARY: &str = "windows[].title";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedLogs {
    /// Version of the producer, e.g. `"0.3.0"`.
    pub version: String,
    pub dictionaries: Vec<SerializedDictionary>,
    pub entries: Vec<SerializedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedDictionary {
    pub name: String,
    pub set: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedEntry {
    pub time: i64,
    #[serde(default)]
    pub windows: Vec<SerializedWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_since_last_input: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedWindow {
    pub path: usize,
    pub title: usize,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_active: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // signature required by serde
const fn is_false(value: &bool) -> bool {
    !*value
}

impl SerializedLogs {
    /// Parse from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::MalformedInput`] for invalid JSON or a shape that
    /// does not match the format.
    pub fn from_json(json: &str) -> Result<Self, OwlError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from JSON bytes.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_json`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, OwlError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Convert an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, OwlError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Render as JSON text.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures from `serde_json`.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Values of the dictionary called `name`.
    #[must_use]
    pub fn dictionary(&self, name: &str) -> Option<&[String]> {
        self.dictionaries
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.set.as_slice())
    }

    /// Values of a dictionary that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`OwlError::MalformedInput`] naming the missing dictionary.
    pub fn required_dictionary(&self, name: &str) -> Result<&[String], OwlError> {
        self.dictionary(name)
            .ok_or_else(|| OwlError::MalformedInput(format!("missing dictionary `{name}`")))
    }
}
