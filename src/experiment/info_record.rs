//! Experiment Info - one metadata row per source file

use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::corpus::FileKey;

/// Column list matching [`ExperimentInfo::from_row`].
pub(crate) const INFO_COLUMNS: &str = "experiment_id, file_name, prefix, date_str, time_str, batch_id";

/// Persisted experiment metadata.
///
/// `file_name` is the natural key; `experiment_id` is generated by the
/// store on insert. Only `batch_id` may change after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentInfo {
    experiment_id: i64,
    file_name: String,
    prefix: String,
    date_str: String,
    time_str: String,
    batch_id: String,
}

impl ExperimentInfo {
    /// Decode a row selected with [`INFO_COLUMNS`].
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            experiment_id: row.get(0)?,
            file_name: row.get(1)?,
            prefix: row.get(2)?,
            date_str: row.get(3)?,
            time_str: row.get(4)?,
            batch_id: row.get(5)?,
        })
    }

    /// Get the generated experiment ID.
    #[must_use]
    pub const fn experiment_id(&self) -> i64 {
        self.experiment_id
    }

    /// Get the source file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the grouping prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Get the date part of the timestamp key.
    #[must_use]
    pub fn date_str(&self) -> &str {
        &self.date_str
    }

    /// Get the time part of the timestamp key.
    #[must_use]
    pub fn time_str(&self) -> &str {
        &self.time_str
    }

    /// Get the batch label.
    #[must_use]
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }
}

/// Metadata for a row that has not been inserted yet.
///
/// `batch_id` defaults to the prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperimentInfo {
    pub(crate) file_name: String,
    pub(crate) prefix: String,
    pub(crate) date_str: String,
    pub(crate) time_str: String,
    pub(crate) batch_id: String,
}

impl NewExperimentInfo {
    /// Create metadata with the required fields.
    #[must_use]
    pub fn new(file_name: impl Into<String>, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            file_name: file_name.into(),
            batch_id: prefix.clone(),
            prefix,
            date_str: String::new(),
            time_str: String::new(),
        }
    }

    /// Derive metadata from a parsed file key.
    #[must_use]
    pub fn from_file_key(key: &FileKey) -> Self {
        let (date, time) = key.date_time();
        Self::new(key.file_name(), key.prefix())
            .date_str(date)
            .time_str(time)
    }

    /// Set the date string.
    #[must_use]
    pub fn date_str(mut self, date_str: impl Into<String>) -> Self {
        self.date_str = date_str.into();
        self
    }

    /// Set the time string.
    #[must_use]
    pub fn time_str(mut self, time_str: impl Into<String>) -> Self {
        self.time_str = time_str.into();
        self
    }

    /// Set the batch label.
    #[must_use]
    pub fn batch_id(mut self, batch_id: impl Into<String>) -> Self {
        self.batch_id = batch_id.into();
        self
    }

    /// Natural key of the row to be inserted.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}
