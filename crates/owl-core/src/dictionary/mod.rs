//! String interning tables used to deduplicate window paths and titles.
//!
//! A [`Dictionary`] hands out dense indices in first-use order. The reverse
//! table is rebuilt on demand with [`Dictionary::generate_values_list`], so
//! only one copy of each string is held while a log is being consolidated.
//!
//! ```
//! use owl_core::dictionary::Dictionary;
//!
//! let mut limbs = Dictionary::new();
//! let refs: Vec<usize> = ["head", "arm", "arm", "leg", "leg"]
//!     .into_iter()
//!     .map(|limb| limbs.use_value(limb))
//!     .collect();
//! assert_eq!(refs, [0, 1, 1, 2, 2]);
//! assert_eq!(limbs.generate_values_list()[refs[2]], "arm");
//! ```

pub mod mapper;

pub use mapper::DictionaryMapper;

use std::collections::HashMap;

/// Value to index table with dense, insertion-ordered indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    index_of: HashMap<String, usize>,
    size: usize,
}

impl Dictionary {
    /// Create an empty dictionary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a dictionary from an ordered value list.
    ///
    /// Each value gets its position as index. A repeated value keeps the
    /// index of its first occurrence.
    #[must_use]
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = values.into_iter();
        let mut dict = Self {
            index_of: HashMap::with_capacity(values.size_hint().0),
            size: 0,
        };
        for value in values {
            dict.use_value(value.as_ref());
        }
        dict
    }

    /// Get or create the index for `value`.
    ///
    /// `None` is stored as the empty string, which is how absent window
    /// fields are represented.
    pub fn use_value<'a>(&mut self, value: impl Into<Option<&'a str>>) -> usize {
        let value = value.into().unwrap_or_default();
        if let Some(&index) = self.index_of.get(value) {
            return index;
        }

        let index = self.size;
        self.index_of.insert(value.to_owned(), index);
        self.size += 1;
        index
    }

    /// Look up the index of a value without inserting it.
    #[must_use]
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.index_of.get(value).copied()
    }

    /// Build the index to value table.
    ///
    /// `generate_values_list()[i]` is the value that `use_value` mapped to `i`.
    #[must_use]
    pub fn generate_values_list(&self) -> Vec<String> {
        let mut values = vec![String::new(); self.size];
        for (value, &index) in &self.index_of {
            values[index].clone_from(value);
        }
        values
    }

    /// Number of distinct values.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if no value has been used yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}
