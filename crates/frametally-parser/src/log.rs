//! Parsed machine log: normalized path key to touched frames.

use std::collections::HashMap;

/// Frames touched per normalized path, in the order keys first appeared.
///
/// Frame lists keep source order and duplicates; the merge engine sorts
/// before compressing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineLog {
    entries: Vec<(String, Vec<u64>)>,
    index: HashMap<String, usize>,
    skipped_lines: usize,
}

impl MachineLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame list for `key`, created empty on first use.
    pub fn entry(&mut self, key: String) -> &mut Vec<u64> {
        let idx = match self.index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.clone(), Vec::new()));
                self.index.insert(key, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, key: &str) -> Option<&[u64]> {
        self.index.get(key).map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u64])> {
        self.entries
            .iter()
            .map(|(key, frames)| (key.as_str(), frames.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-blank lines dropped because they lacked the required tokens.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    pub(crate) fn record_skipped(&mut self) {
        self.skipped_lines += 1;
    }
}
