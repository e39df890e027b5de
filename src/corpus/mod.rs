//! Corpus - in-memory organization of measurement files
//!
//! ## Layout
//!
//! ```text
//! Corpus
//!   └── prefix (no ordering guarantee)
//!         └── timestamp key (discovery order) ──> SweepTable
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sweep_db::corpus::CorpusLoader;
//!
//! let report = CorpusLoader::new("data").load()?;
//! for prefix in report.corpus.sorted_prefixes() {
//!     for key in report.corpus.timestamp_keys(prefix) {
//!         let table = report.corpus.get(prefix, key).unwrap();
//!         println!("{prefix}/{key}: {} rows", table.num_rows());
//!     }
//! }
//! # Ok::<(), sweep_db::Error>(())
//! ```

mod filename;
mod loader;

pub use filename::{split_timestamp, FileKey, NAME_DELIMITER};
pub use loader::{load_corpus, CorpusLoader, LoadFailure, LoadReport, DEFAULT_EXTENSION};

use rustc_hash::FxHashMap;

use crate::table::SweepTable;
use crate::Result;

/// Timestamp keys of one prefix, kept in insertion order.
#[derive(Debug, Clone, Default)]
struct PrefixGroup {
    entries: Vec<(FileKey, SweepTable)>,
    index: FxHashMap<String, usize>,
}

impl PrefixGroup {
    fn insert(&mut self, key: FileKey, table: SweepTable) {
        if let Some(&pos) = self.index.get(key.timestamp_key()) {
            self.entries[pos] = (key, table);
            return;
        }
        self.index
            .insert(key.timestamp_key().to_string(), self.entries.len());
        self.entries.push((key, table));
    }

    fn get(&self, key: &str) -> Option<&(FileKey, SweepTable)> {
        self.index.get(key).map(|&pos| &self.entries[pos])
    }
}

/// Two-level container: prefix -> timestamp key -> table.
///
/// Each entry remembers the [`FileKey`] of the file it came from.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    groups: FxHashMap<String, PrefixGroup>,
}

impl Corpus {
    /// Create an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `table` under `(prefix, key)` as `<prefix>_<key>.txt`.
    ///
    /// Re-inserting an existing key replaces its table in place.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidKey`] if either key is empty or the prefix
    /// contains `_`
    pub fn insert(&mut self, prefix: &str, key: &str, table: SweepTable) -> Result<()> {
        let file_key = FileKey::from_parts(prefix, key, DEFAULT_EXTENSION)?;
        self.insert_file(file_key, table);
        Ok(())
    }

    /// Store `table` under the prefix and timestamp key of `file_key`.
    pub fn insert_file(&mut self, file_key: FileKey, table: SweepTable) {
        self.groups
            .entry(file_key.prefix().to_string())
            .or_default()
            .insert(file_key, table);
    }

    /// Known prefixes, in no particular order.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Known prefixes sorted lexicographically.
    #[must_use]
    pub fn sorted_prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self.prefixes().collect();
        prefixes.sort_unstable();
        prefixes
    }

    /// Timestamp keys of `prefix` in discovery order (empty if unknown).
    #[must_use]
    pub fn timestamp_keys(&self, prefix: &str) -> Vec<&str> {
        self.groups.get(prefix).map_or_else(Vec::new, |group| {
            group
                .entries
                .iter()
                .map(|(key, _)| key.timestamp_key())
                .collect()
        })
    }

    /// Table for `(prefix, key)`.
    #[must_use]
    pub fn get(&self, prefix: &str, key: &str) -> Option<&SweepTable> {
        self.groups.get(prefix)?.get(key).map(|(_, table)| table)
    }

    /// Source file key for `(prefix, key)`.
    #[must_use]
    pub fn file_key(&self, prefix: &str, key: &str) -> Option<&FileKey> {
        self.groups.get(prefix)?.get(key).map(|(file_key, _)| file_key)
    }

    /// Every `(file key, table)` pair.
    pub fn iter(&self) -> impl Iterator<Item = (&FileKey, &SweepTable)> {
        self.groups
            .values()
            .flat_map(|group| group.entries.iter().map(|(key, table)| (key, table)))
    }

    /// Number of prefixes.
    #[must_use]
    pub fn prefix_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.values().map(|group| group.entries.len()).sum()
    }

    /// True when no table is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
