//! Remapping of indices from a foreign dictionary into a local one.

use super::Dictionary;

/// Maps indices of a source value list onto a target [`Dictionary`].
///
/// Used when merging a serialized log: every index in the incoming log is
/// resolved against the incoming value list, then re-interned in the local
/// dictionary. Results are memoized so each distinct source index touches the
/// target at most once.
#[derive(Debug)]
pub struct DictionaryMapper<'a> {
    source_values: &'a [String],
    target: &'a mut Dictionary,
    cache: Vec<Option<usize>>,
}

impl<'a> DictionaryMapper<'a> {
    pub fn new(source_values: &'a [String], target: &'a mut Dictionary) -> Self {
        Self {
            source_values,
            target,
            cache: vec![None; source_values.len()],
        }
    }

    /// Translate a source index into the target dictionary's index.
    ///
    /// # Panics
    ///
    /// Panics if `source_index` is not a valid index into the source values.
    /// Callers holding untrusted indices must check them against
    /// [`Self::source_len`] first.
    pub fn source_to_target(&mut self, source_index: usize) -> usize {
        if let Some(target_index) = self.cache[source_index] {
            return target_index;
        }

        let target_index = self
            .target
            .use_value(self.source_values[source_index].as_str());
        self.cache[source_index] = Some(target_index);
        target_index
    }

    /// Number of values in the source list.
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.source_values.len()
    }
}
