//! Corpus Loader - directory walk over measurement files
//!
//! One unreadable or malformed file never aborts the walk: it is logged,
//! recorded in [`LoadReport::failures`] and left out of the corpus.

use std::fs::{self, DirEntry, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{Corpus, FileKey};
use crate::table::SweepTable;
use crate::Result;

/// Extension of measurement files.
pub const DEFAULT_EXTENSION: &str = "txt";

/// A file that was skipped during loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Name of the skipped file
    pub file_name: String,
    /// Diagnostic message
    pub message: String,
}

/// Result of a directory load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Successfully parsed tables
    pub corpus: Corpus,
    /// Files that were skipped, in discovery order
    pub failures: Vec<LoadFailure>,
}

/// Loads every `<prefix>_<timestamp>.<ext>` file of a directory.
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    dir: PathBuf,
    extension: String,
}

impl CorpusLoader {
    /// Create a loader for `dir` matching `.txt` files.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Match files with a different extension (without the dot).
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Directory being scanned.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Walk the directory and parse every matching file.
    ///
    /// Timestamp keys within a prefix follow directory listing order.
    ///
    /// # Errors
    ///
    /// Returns error only if the directory itself cannot be listed
    pub fn load(&self) -> Result<LoadReport> {
        let suffix = format!(".{}", self.extension);
        let mut report = LoadReport::default();

        for entry in fs::read_dir(&self.dir)? {
            self.load_entry(entry, &suffix, &mut report);
        }

        info!(
            dir = %self.dir.display(),
            tables = report.corpus.len(),
            prefixes = report.corpus.prefix_count(),
            skipped = report.failures.len(),
            "loaded corpus"
        );
        Ok(report)
    }

    fn load_entry(&self, entry: io::Result<DirEntry>, suffix: &str, report: &mut LoadReport) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "unreadable directory entry");
                report.failures.push(LoadFailure {
                    file_name: self.dir.display().to_string(),
                    message: e.to_string(),
                });
                return;
            }
        };

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.ends_with(suffix) || !entry.path().is_file() {
            return;
        }

        match self.load_file(&entry.path(), &file_name) {
            Ok((key, table)) => {
                debug!(
                    file = %file_name,
                    prefix = key.prefix(),
                    rows = table.num_rows(),
                    "parsed measurement file"
                );
                report.corpus.insert_file(key, table);
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "skipping measurement file");
                report.failures.push(LoadFailure {
                    file_name,
                    message: e.to_string(),
                });
            }
        }
    }

    fn load_file(&self, path: &Path, file_name: &str) -> Result<(FileKey, SweepTable)> {
        let key = FileKey::parse(file_name, &self.extension)?;
        let reader = BufReader::new(File::open(path)?);
        let table = SweepTable::parse_delimited(reader, file_name)?;
        Ok((key, table))
    }
}

/// Load `dir` with default settings.
///
/// # Errors
///
/// Returns error if the directory cannot be listed
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<LoadReport> {
    CorpusLoader::new(dir).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_is_error() {
        let result = CorpusLoader::new("/definitely/not/a/dir").load();
        assert!(result.is_err());
    }

    #[test]
    fn test_extension_filter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_1.txt"), "1;2;3;4;5\n").unwrap();
        fs::write(dir.path().join("A_2.csv"), "1;2;3;4;5\n").unwrap();

        let txt = CorpusLoader::new(dir.path()).load().unwrap();
        assert_eq!(txt.corpus.timestamp_keys("A"), vec!["1"]);

        let csv = CorpusLoader::new(dir.path()).extension("csv").load().unwrap();
        assert_eq!(csv.corpus.timestamp_keys("A"), vec!["2"]);
    }

    #[test]
    fn test_bad_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_1.txt"), "1;2;3;4;5\n").unwrap();
        fs::write(dir.path().join("nodelimiter.txt"), "1;2;3;4;5\n").unwrap();
        fs::write(dir.path().join("B_1.txt"), "1;2;x;4;5\n").unwrap();

        let report = load_corpus(dir.path()).unwrap();

        assert_eq!(report.corpus.len(), 1);
        assert_eq!(report.failures.len(), 2);
        let mut skipped: Vec<_> = report.failures.iter().map(|f| f.file_name.as_str()).collect();
        skipped.sort_unstable();
        assert_eq!(skipped, vec!["B_1.txt", "nodelimiter.txt"]);
    }

    #[test]
    fn test_non_finite_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_1.txt"), "1;2;3;4;5\n").unwrap();
        fs::write(dir.path().join("B_1.txt"), "1;NaN;3;4;5\n").unwrap();
        fs::write(dir.path().join("C_1.txt"), "1;2;3;4;5\n").unwrap();

        let report = load_corpus(dir.path()).unwrap();

        assert_eq!(report.corpus.sorted_prefixes(), vec!["A", "C"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "B_1.txt");
        assert!(report.failures[0].message.contains("not a finite number"));
    }

    #[test]
    fn test_unreadable_entry_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CorpusLoader::new(dir.path());
        let mut report = LoadReport::default();

        loader.load_entry(Err(io::Error::other("entry vanished")), ".txt", &mut report);

        assert!(report.corpus.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].message.contains("entry vanished"));
    }

    #[test]
    fn test_loaded_entries_keep_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_20241201_000000.csv"), "1;2;3;4;5\n").unwrap();

        let report = CorpusLoader::new(dir.path()).extension("csv").load().unwrap();

        let key = report.corpus.file_key("A", "20241201_000000").unwrap();
        assert_eq!(key.file_name(), "A_20241201_000000.csv");
    }
}
