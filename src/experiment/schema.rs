//! Relational schema for experiment metadata and measurements
//!
//! ```text
//! experiment_info (1) ──< experiment_data (N)
//! ```
//!
//! No `ON DELETE CASCADE`: the store removes measurement rows itself
//! before deleting their metadata row.

/// Value stored in `PRAGMA user_version` once the tables exist.
pub const SCHEMA_VERSION: i64 = 1;

/// Table and index definitions, safe to run on every open.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS experiment_info (
    experiment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    file_name     TEXT    NOT NULL UNIQUE,
    prefix        TEXT    NOT NULL DEFAULT '',
    date_str      TEXT    NOT NULL DEFAULT '',
    time_str      TEXT    NOT NULL DEFAULT '',
    batch_id      TEXT    NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS experiment_data (
    data_id       INTEGER PRIMARY KEY AUTOINCREMENT,
    experiment_id INTEGER NOT NULL REFERENCES experiment_info(experiment_id),
    seq           INTEGER NOT NULL,
    frequency     REAL    NOT NULL,
    x1            REAL    NOT NULL,
    y1            REAL    NOT NULL,
    x2            REAL    NOT NULL,
    y2            REAL    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_experiment_data_experiment
    ON experiment_data (experiment_id, seq);

CREATE INDEX IF NOT EXISTS idx_experiment_info_prefix
    ON experiment_info (prefix);
";
