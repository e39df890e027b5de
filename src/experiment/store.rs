//! Experiment Store - `SQLite` gateway for experiment metadata and measurements
//!
//! The store owns one connection and is the only writer. Every multi-row
//! write runs in a single transaction and rolls back on failure, so a
//! metadata row never exists without the measurement rows written with it
//! and no measurement row outlives its metadata row.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use super::data_record::{rows_from_batch, ExperimentData};
use super::info_record::INFO_COLUMNS;
use super::schema::{SCHEMA_SQL, SCHEMA_VERSION};
use super::{BatchAssignment, ExperimentInfo, NewExperimentInfo};
use crate::corpus::Corpus;
use crate::table::{MeasurementRow, SweepTable, COLUMNS};
use crate::{Error, Result};
use arrow::record_batch::RecordBatch;

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Builder for [`ExperimentStore`].
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    location: Location,
    echo: bool,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self {
            location: Location::Memory,
            echo: false,
        }
    }
}

impl StoreBuilder {
    /// Persist to a database file (created if missing).
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.location = Location::File(path.as_ref().to_path_buf());
        self
    }

    /// Keep everything in memory (the default).
    #[must_use]
    pub fn in_memory(mut self) -> Self {
        self.location = Location::Memory;
        self
    }

    /// Log every executed SQL statement at DEBUG level.
    #[must_use]
    pub const fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Open the connection and create the tables if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or initialized
    pub fn open(self) -> Result<ExperimentStore> {
        let mut conn = match &self.location {
            Location::File(path) => Connection::open(path)?,
            Location::Memory => Connection::open_in_memory()?,
        };

        if self.echo {
            conn.trace(Some(echo_sql));
        }

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA_SQL)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        let location = match &self.location {
            Location::File(path) => path.display().to_string(),
            Location::Memory => ":memory:".to_string(),
        };
        debug!(%location, "opened experiment store");

        Ok(ExperimentStore { conn })
    }
}

fn echo_sql(sql: &str) {
    debug!(target: "sweep_db::sql", "{sql}");
}

/// A file written by [`ExperimentStore::ingest_corpus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestedFile {
    /// Stored file name
    pub file_name: String,
    /// Generated experiment ID
    pub experiment_id: i64,
    /// Number of measurement rows written
    pub rows: usize,
}

/// A file rejected by [`ExperimentStore::ingest_corpus`].
#[derive(Debug)]
pub struct SkippedFile {
    /// File name that was not written
    pub file_name: String,
    /// Why it was rejected
    pub error: Error,
}

/// Outcome of a corpus ingest.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Files written, in ingest order
    pub inserted: Vec<IngestedFile>,
    /// Files rejected, in ingest order
    pub skipped: Vec<SkippedFile>,
}

/// Relational store for experiment metadata and measurement rows.
///
/// ## Design
///
/// Created explicitly through [`ExperimentStore::builder`] and closed with
/// [`ExperimentStore::close`] (or on drop). There is no process-wide
/// connection.
///
/// ## Uniqueness
///
/// `file_name` is checked before insert. The check and the insert share a
/// transaction but are not guarded against other processes writing the same
/// database file.
#[derive(Debug)]
pub struct ExperimentStore {
    conn: Connection,
}

impl ExperimentStore {
    /// Create a builder (in-memory, no SQL echo).
    #[must_use]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Open a store backed by `path`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or initialized
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(path).open()
    }

    /// Open an empty in-memory store.
    ///
    /// # Errors
    ///
    /// Returns error if `SQLite` cannot be initialized
    pub fn open_in_memory() -> Result<Self> {
        Self::builder().in_memory().open()
    }

    /// Close the connection, reporting any error `SQLite` raises on close.
    ///
    /// # Errors
    ///
    /// Returns error if outstanding statements prevent the close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Sqlite(e))
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Insert a metadata row and return its generated `experiment_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `file_name` is already stored
    pub fn create_info(&mut self, info: &NewExperimentInfo) -> Result<i64> {
        let tx = self.conn.transaction()?;
        let experiment_id = insert_info(&tx, info)?;
        tx.commit()?;
        Ok(experiment_id)
    }

    /// Append measurement rows to an existing experiment.
    ///
    /// Rows keep their order: their `seq` continues after any rows already
    /// stored for the experiment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceError`] if no metadata row has
    /// `experiment_id`, and [`Error::NonFiniteValue`] if a row holds NaN or
    /// an infinity; nothing is written in either case
    pub fn write_rows(&mut self, experiment_id: i64, rows: &[MeasurementRow]) -> Result<()> {
        let tx = self.conn.transaction()?;
        ensure_experiment(&tx, experiment_id)?;
        ensure_finite(rows)?;
        insert_rows(&tx, experiment_id, rows)?;
        tx.commit()?;
        Ok(())
    }

    /// Append measurement rows taken from an Arrow batch.
    ///
    /// Columns are resolved by name (`frequency`/`fre`, `x1`/`X1`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceError`] for an unknown `experiment_id`
    /// (checked first), then [`Error::SchemaMismatch`] if a required field
    /// is missing
    pub fn write_table(&mut self, experiment_id: i64, batch: &RecordBatch) -> Result<()> {
        ensure_experiment(&self.conn, experiment_id)?;
        let rows = rows_from_batch(batch)?;
        self.write_rows(experiment_id, &rows)
    }

    /// Insert metadata and its measurement rows in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonFiniteValue`] if a row holds NaN or an infinity
    /// and [`Error::DuplicateKey`] if `file_name` is already stored. Any
    /// failure leaves the store unchanged.
    pub fn insert_experiment(
        &mut self,
        info: &NewExperimentInfo,
        rows: &[MeasurementRow],
    ) -> Result<i64> {
        ensure_finite(rows)?;
        let tx = self.conn.transaction()?;
        let experiment_id = insert_info(&tx, info)?;
        insert_rows(&tx, experiment_id, rows)?;
        tx.commit()?;
        Ok(experiment_id)
    }

    /// Delete an experiment and all of its measurement rows.
    ///
    /// Measurement rows go first, then the metadata row; both in one
    /// transaction. Returns the deleted metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `file_name` is unknown
    pub fn delete_by_file_name(&mut self, file_name: &str) -> Result<ExperimentInfo> {
        let tx = self.conn.transaction()?;
        let info = select_info(&tx, file_name)?.ok_or_else(|| not_found(file_name))?;

        let data_rows = tx.execute(
            "DELETE FROM experiment_data WHERE experiment_id = ?1",
            params![info.experiment_id()],
        )?;
        tx.execute(
            "DELETE FROM experiment_info WHERE experiment_id = ?1",
            params![info.experiment_id()],
        )?;
        tx.commit()?;

        info!(file = file_name, data_rows, "deleted experiment");
        Ok(info)
    }

    /// Change the batch label of an experiment and return the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `file_name` is unknown
    pub fn update_batch_id(&mut self, file_name: &str, batch_id: &str) -> Result<ExperimentInfo> {
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE experiment_info SET batch_id = ?1 WHERE file_name = ?2",
            params![batch_id, file_name],
        )?;
        if changed == 0 {
            return Err(not_found(file_name));
        }
        let info = select_info(&tx, file_name)?.ok_or_else(|| not_found(file_name))?;
        tx.commit()?;
        Ok(info)
    }

    /// Write every table of a corpus, one transaction per file.
    ///
    /// Files are visited by sorted prefix, then in timestamp-key order, and
    /// stored under their source file name (`<prefix>_<key>.<ext>`). Files
    /// rejected with a per-file error ([`Error::DuplicateKey`],
    /// [`Error::ReferenceError`], [`Error::SchemaMismatch`] or
    /// [`Error::NonFiniteValue`]) are reported in [`IngestReport::skipped`];
    /// the rest of the corpus is still written.
    ///
    /// # Errors
    ///
    /// Returns error on any other database failure
    pub fn ingest_corpus(
        &mut self,
        corpus: &Corpus,
        batches: &BatchAssignment,
    ) -> Result<IngestReport> {
        let mut report = IngestReport::default();

        for prefix in corpus.sorted_prefixes() {
            for key in corpus.timestamp_keys(prefix) {
                let (Some(file_key), Some(table)) =
                    (corpus.file_key(prefix, key), corpus.get(prefix, key))
                else {
                    continue;
                };
                let file_name = file_key.file_name().to_string();
                let info =
                    NewExperimentInfo::from_file_key(file_key).batch_id(batches.resolve(prefix));

                let rows = table.rows();
                match self.insert_experiment(&info, &rows) {
                    Ok(experiment_id) => {
                        info!(file = %file_name, experiment_id, rows = rows.len(), "ingested experiment");
                        report.inserted.push(IngestedFile {
                            file_name,
                            experiment_id,
                            rows: rows.len(),
                        });
                    }
                    Err(
                        e @ (Error::DuplicateKey { .. }
                        | Error::ReferenceError { .. }
                        | Error::SchemaMismatch { .. }
                        | Error::NonFiniteValue { .. }),
                    ) => {
                        warn!(file = %file_name, error = %e, "skipped experiment");
                        report.skipped.push(SkippedFile { file_name, error: e });
                    }
                    Err(e) => return Err(e),
                }
            }
        }

        Ok(report)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Every metadata row, ordered by `experiment_id`.
    ///
    /// # Errors
    ///
    /// Returns error on database failure
    pub fn all_info(&self) -> Result<Vec<ExperimentInfo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INFO_COLUMNS} FROM experiment_info ORDER BY experiment_id"
        ))?;
        let rows = stmt
            .query_map([], ExperimentInfo::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Metadata rows of one prefix, ordered by `experiment_id`.
    ///
    /// # Errors
    ///
    /// Returns error on database failure
    pub fn info_by_prefix(&self, prefix: &str) -> Result<Vec<ExperimentInfo>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {INFO_COLUMNS} FROM experiment_info WHERE prefix = ?1 ORDER BY experiment_id"
        ))?;
        let rows = stmt
            .query_map(params![prefix], ExperimentInfo::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Metadata for `file_name`, or `None` if it is not stored.
    ///
    /// # Errors
    ///
    /// Returns error on database failure (absence is not an error)
    pub fn info_by_file_name(&self, file_name: &str) -> Result<Option<ExperimentInfo>> {
        select_info(&self.conn, file_name)
    }

    /// Distinct prefixes, sorted.
    ///
    /// # Errors
    ///
    /// Returns error on database failure
    pub fn prefixes(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT prefix FROM experiment_info ORDER BY prefix")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(rows)
    }

    /// Measurement table of `file_name`, in source row order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `file_name` is unknown
    pub fn data_by_file_name(&self, file_name: &str) -> Result<SweepTable> {
        let rows: Vec<MeasurementRow> = self
            .data_records(file_name)?
            .iter()
            .map(|record| *record.values())
            .collect();
        SweepTable::from_rows(&rows)
    }

    /// Persisted measurement rows of `file_name`, ordered by `seq`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `file_name` is unknown
    pub fn data_records(&self, file_name: &str) -> Result<Vec<ExperimentData>> {
        let info = select_info(&self.conn, file_name)?.ok_or_else(|| not_found(file_name))?;

        let mut stmt = self.conn.prepare_cached(
            "SELECT data_id, experiment_id, seq, frequency, x1, y1, x2, y2
             FROM experiment_data WHERE experiment_id = ?1 ORDER BY seq, data_id",
        )?;
        let rows = stmt
            .query_map(params![info.experiment_id()], ExperimentData::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Number of measurement rows stored for `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if `file_name` is unknown
    pub fn data_count(&self, file_name: &str) -> Result<usize> {
        let info = select_info(&self.conn, file_name)?.ok_or_else(|| not_found(file_name))?;
        count(
            &self.conn,
            "SELECT COUNT(*) FROM experiment_data WHERE experiment_id = ?1",
            info.experiment_id(),
        )
    }

    /// Number of metadata rows.
    ///
    /// # Errors
    ///
    /// Returns error on database failure
    pub fn experiment_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM experiment_info", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }

    /// Number of measurement rows across all experiments.
    ///
    /// # Errors
    ///
    /// Returns error on database failure
    pub fn measurement_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM experiment_data", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or_default())
    }
}

fn not_found(file_name: &str) -> Error {
    Error::NotFound {
        file_name: file_name.to_string(),
    }
}

fn count(conn: &Connection, sql: &str, experiment_id: i64) -> Result<usize> {
    let n: i64 = conn.query_row(sql, params![experiment_id], |row| row.get(0))?;
    Ok(usize::try_from(n).unwrap_or_default())
}

fn select_info(conn: &Connection, file_name: &str) -> Result<Option<ExperimentInfo>> {
    let info = conn
        .query_row(
            &format!("SELECT {INFO_COLUMNS} FROM experiment_info WHERE file_name = ?1"),
            params![file_name],
            ExperimentInfo::from_row,
        )
        .optional()?;
    Ok(info)
}

fn ensure_experiment(conn: &Connection, experiment_id: i64) -> Result<()> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM experiment_info WHERE experiment_id = ?1",
            params![experiment_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if exists {
        Ok(())
    } else {
        Err(Error::ReferenceError { experiment_id })
    }
}

fn ensure_finite(rows: &[MeasurementRow]) -> Result<()> {
    for (row, values) in rows.iter().map(MeasurementRow::values).enumerate() {
        let non_finite = COLUMNS.iter().zip(values).find(|(_, v)| !v.is_finite());
        if let Some((column, value)) = non_finite {
            return Err(Error::NonFiniteValue {
                row,
                column: (*column).to_string(),
                value,
            });
        }
    }
    Ok(())
}

fn insert_info(conn: &Connection, info: &NewExperimentInfo) -> Result<i64> {
    if select_info(conn, &info.file_name)?.is_some() {
        return Err(Error::DuplicateKey {
            file_name: info.file_name.clone(),
        });
    }

    conn.execute(
        "INSERT INTO experiment_info (file_name, prefix, date_str, time_str, batch_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            info.file_name,
            info.prefix,
            info.date_str,
            info.time_str,
            info.batch_id
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn insert_rows(conn: &Connection, experiment_id: i64, rows: &[MeasurementRow]) -> Result<()> {
    let next_seq: i64 = conn.query_row(
        "SELECT COALESCE(MAX(seq) + 1, 0) FROM experiment_data WHERE experiment_id = ?1",
        params![experiment_id],
        |row| row.get(0),
    )?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO experiment_data (experiment_id, seq, frequency, x1, y1, x2, y2)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for (seq, row) in (next_seq..).zip(rows) {
        stmt.execute(params![
            experiment_id,
            seq,
            row.frequency,
            row.x1,
            row.y1,
            row.x2,
            row.y2
        ])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<MeasurementRow> {
        #[allow(clippy::cast_precision_loss)]
        let rows = (0..n)
            .map(|i| {
                let f = (i + 1) as f64;
                MeasurementRow::new(f * 100.0, f, -f, f * 0.5, f * 2.0)
            })
            .collect();
        rows
    }

    #[test]
    fn test_store_default() {
        let store = ExperimentStore::open_in_memory().unwrap();
        assert_eq!(store.experiment_count().unwrap(), 0);
        assert_eq!(store.measurement_count().unwrap(), 0);
        assert!(store.all_info().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_get() {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        let id = store
            .create_info(&NewExperimentInfo::new("A_1.txt", "A").batch_id("b1"))
            .unwrap();

        let info = store.info_by_file_name("A_1.txt").unwrap().unwrap();
        assert_eq!(info.experiment_id(), id);
        assert_eq!(info.batch_id(), "b1");
        assert!(store.info_by_file_name("missing").unwrap().is_none());
    }

    #[test]
    fn test_write_rows_appends_in_order() {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        let id = store
            .create_info(&NewExperimentInfo::new("A_1.txt", "A"))
            .unwrap();

        let all = rows(5);
        store.write_rows(id, &all[..3]).unwrap();
        store.write_rows(id, &all[3..]).unwrap();

        let records = store.data_records("A_1.txt").unwrap();
        let seqs: Vec<i64> = records.iter().map(ExperimentData::seq).collect();
        assert_eq!(seqs, vec![0, 1, 2, 3, 4]);
        assert_eq!(store.data_by_file_name("A_1.txt").unwrap().rows(), all);
    }

    #[test]
    fn test_insert_experiment_rolls_back_on_duplicate() {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        store
            .insert_experiment(&NewExperimentInfo::new("A_1.txt", "A"), &rows(3))
            .unwrap();

        let err = store
            .insert_experiment(&NewExperimentInfo::new("A_1.txt", "B"), &rows(7))
            .unwrap_err();

        assert!(matches!(err, Error::DuplicateKey { .. }));
        assert_eq!(store.measurement_count().unwrap(), 3);
        assert_eq!(
            store.info_by_file_name("A_1.txt").unwrap().unwrap().prefix(),
            "A"
        );
    }

    #[test]
    fn test_non_finite_rows_rejected_before_write() {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        let mut bad = rows(3);
        bad[1].y1 = f64::NAN;

        let err = store
            .insert_experiment(&NewExperimentInfo::new("A_1.txt", "A"), &bad)
            .unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { row: 1, ref column, .. } if column == "Y1"));
        assert_eq!(store.experiment_count().unwrap(), 0);

        let id = store
            .create_info(&NewExperimentInfo::new("A_1.txt", "A"))
            .unwrap();
        bad[1].y1 = f64::INFINITY;
        let err = store.write_rows(id, &bad).unwrap_err();
        assert!(matches!(err, Error::NonFiniteValue { row: 1, .. }));
        assert_eq!(store.measurement_count().unwrap(), 0);
    }

    #[test]
    fn test_insert_experiment_rolls_back_after_partial_write() {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        store
            .insert_experiment(&NewExperimentInfo::new("A_1.txt", "A"), &rows(2))
            .unwrap();
        store
            .conn
            .execute_batch(
                "CREATE TRIGGER fail_third_row BEFORE INSERT ON experiment_data
                 WHEN NEW.seq = 2
                 BEGIN SELECT RAISE(ABORT, 'third row rejected'); END;",
            )
            .unwrap();

        // Metadata and two rows are written before the third row fails
        let err = store
            .insert_experiment(&NewExperimentInfo::new("B_1.txt", "B"), &rows(4))
            .unwrap_err();

        assert!(matches!(err, Error::Sqlite(_)));
        assert_eq!(store.experiment_count().unwrap(), 1);
        assert_eq!(store.measurement_count().unwrap(), 2);
        assert!(store.info_by_file_name("B_1.txt").unwrap().is_none());

        store
            .conn
            .execute_batch("DROP TRIGGER fail_third_row;")
            .unwrap();
        store
            .insert_experiment(&NewExperimentInfo::new("B_1.txt", "B"), &rows(4))
            .unwrap();
        assert_eq!(store.data_count("B_1.txt").unwrap(), 4);
    }

    #[test]
    fn test_ingest_skips_non_finite_table() {
        let mut corpus = Corpus::new();
        let mut bad = rows(2);
        bad[0].x1 = f64::NAN;
        corpus
            .insert("A", "1", SweepTable::from_rows(&rows(2)).unwrap())
            .unwrap();
        corpus
            .insert("B", "1", SweepTable::from_rows(&bad).unwrap())
            .unwrap();
        corpus
            .insert("C", "1", SweepTable::from_rows(&rows(3)).unwrap())
            .unwrap();

        let report = store_ingest(&corpus);

        let inserted: Vec<&str> = report.inserted.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(inserted, vec!["A_1.txt", "C_1.txt"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file_name, "B_1.txt");
        assert!(matches!(
            report.skipped[0].error,
            Error::NonFiniteValue { row: 0, .. }
        ));
    }

    fn store_ingest(corpus: &Corpus) -> IngestReport {
        let mut store = ExperimentStore::open_in_memory().unwrap();
        store
            .ingest_corpus(corpus, &BatchAssignment::default())
            .unwrap()
    }

    #[test]
    fn test_echo_store_opens() {
        let store = ExperimentStore::builder().echo(true).open().unwrap();
        assert_eq!(store.experiment_count().unwrap(), 0);
        store.close().unwrap();
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiments.db");

        let mut store = ExperimentStore::open(&path).unwrap();
        store
            .insert_experiment(&NewExperimentInfo::new("A_1.txt", "A"), &rows(2))
            .unwrap();
        store.close().unwrap();

        let reopened = ExperimentStore::open(&path).unwrap();
        assert_eq!(reopened.data_count("A_1.txt").unwrap(), 2);
    }
}
