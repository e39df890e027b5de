//! File Key - `<prefix>_<timestamp>.<ext>` naming convention

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Separates the prefix from the timestamp key.
pub const NAME_DELIMITER: char = '_';

/// Length of a `YYYYMMDD` date.
const DATE_LEN: usize = 8;

/// Structured key decoded from a measurement file name.
///
/// The prefix is everything before the first `_`; the timestamp key is the
/// rest of the name without its extension, and may itself contain `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileKey {
    file_name: String,
    prefix: String,
    timestamp_key: String,
}

impl FileKey {
    /// Decode `file_name`, stripping a trailing `.<extension>` if present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFileName`] when the name has no `_`, and
    /// [`Error::InvalidKey`] when the prefix or timestamp key is empty
    pub fn parse(file_name: &str, extension: &str) -> Result<Self> {
        let (prefix, rest) = file_name
            .split_once(NAME_DELIMITER)
            .ok_or_else(|| Error::InvalidFileName(file_name.to_string()))?;

        let suffix = format!(".{extension}");
        let timestamp_key = rest.strip_suffix(suffix.as_str()).unwrap_or(rest);

        if prefix.is_empty() {
            return Err(Error::InvalidKey(format!("empty prefix in '{file_name}'")));
        }
        if timestamp_key.is_empty() {
            return Err(Error::InvalidKey(format!(
                "empty timestamp key in '{file_name}'"
            )));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            prefix: prefix.to_string(),
            timestamp_key: timestamp_key.to_string(),
        })
    }

    /// Build the key of `<prefix>_<timestamp_key>.<extension>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] when the prefix or timestamp key is
    /// empty, or the prefix contains `_`
    pub fn from_parts(prefix: &str, timestamp_key: &str, extension: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::InvalidKey("prefix must not be empty".to_string()));
        }
        if prefix.contains(NAME_DELIMITER) {
            return Err(Error::InvalidKey(format!(
                "prefix '{prefix}' must not contain '{NAME_DELIMITER}'"
            )));
        }
        if timestamp_key.is_empty() {
            return Err(Error::InvalidKey(format!(
                "timestamp key for prefix '{prefix}' must not be empty"
            )));
        }

        Ok(Self {
            file_name: format!("{prefix}{NAME_DELIMITER}{timestamp_key}.{extension}"),
            prefix: prefix.to_string(),
            timestamp_key: timestamp_key.to_string(),
        })
    }

    /// Full source file name, extension included.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Grouping label before the first `_`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Acquisition key after the first `_`, without extension.
    #[must_use]
    pub fn timestamp_key(&self) -> &str {
        &self.timestamp_key
    }

    /// Split the timestamp key into `(date_str, time_str)`.
    #[must_use]
    pub fn date_time(&self) -> (&str, &str) {
        split_timestamp(&self.timestamp_key)
    }

    /// Acquisition time, if the key follows `YYYYMMDD_HHMMSS`.
    #[must_use]
    pub fn acquired_at(&self) -> Option<NaiveDateTime> {
        let (date, time) = self.date_time();
        let date = NaiveDate::parse_from_str(date, "%Y%m%d").ok()?;
        let time = NaiveTime::parse_from_str(time, "%H%M%S").ok()?;
        Some(date.and_time(time))
    }
}

/// Split a timestamp key into date and time parts.
///
/// `20241201_134610` and `20241201134610` both give
/// `("20241201", "134610")`; anything shorter than a date is returned whole
/// with an empty time.
#[must_use]
pub fn split_timestamp(key: &str) -> (&str, &str) {
    if let Some(parts) = key.split_once(NAME_DELIMITER) {
        return parts;
    }
    if key.len() > DATE_LEN && key.is_char_boundary(DATE_LEN) {
        return key.split_at(DATE_LEN);
    }
    (key, "")
}
