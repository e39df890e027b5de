//! Batch Assignment - how ingested experiments get their `batch_id`

use std::collections::HashMap;

use crate::{Error, Result};

/// Policy for labelling newly ingested experiments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BatchAssignment {
    /// Use the file prefix as batch label.
    #[default]
    Prefix,
    /// Same label for every file.
    Uniform(String),
    /// Label per prefix; prefixes missing from the map use themselves.
    PerPrefix(HashMap<String, String>),
}

impl BatchAssignment {
    /// Batch label for a file with the given prefix.
    #[must_use]
    pub fn resolve<'a>(&'a self, prefix: &'a str) -> &'a str {
        match self {
            Self::Prefix => prefix,
            Self::Uniform(batch_id) => batch_id.as_str(),
            Self::PerPrefix(map) => map.get(prefix).map_or(prefix, String::as_str),
        }
    }

    /// Build a per-prefix policy from `PREFIX=BATCH` entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] for an entry without `=` or with an
    /// empty side
    pub fn parse_mapping<S: AsRef<str>>(entries: &[S]) -> Result<Self> {
        let mut map = HashMap::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.as_ref();
            let (prefix, batch_id) = entry
                .split_once('=')
                .filter(|(p, b)| !p.is_empty() && !b.is_empty())
                .ok_or_else(|| {
                    Error::InvalidKey(format!("batch mapping '{entry}' must be PREFIX=BATCH"))
                })?;
            map.insert(prefix.to_string(), batch_id.to_string());
        }
        Ok(Self::PerPrefix(map))
    }
}
