//! # sweep-db: Frequency-Sweep Measurement Store
//!
//! sweep-db ingests `;`-delimited frequency-sweep files named
//! `<prefix>_<timestamp>.txt`, organizes them by prefix and timestamp key,
//! and persists them into a two-table `SQLite` schema.
//!
//! ## Pipeline
//!
//! ```text
//! directory ──> CorpusLoader ──> Corpus ──> ExperimentStore
//!               (FileKey +        prefix ->   experiment_info
//!                SweepTable)      key -> table experiment_data
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sweep_db::corpus::CorpusLoader;
//! use sweep_db::experiment::{BatchAssignment, ExperimentStore};
//!
//! let report = CorpusLoader::new("data").load()?;
//! let mut store = ExperimentStore::open("experiments.db")?;
//! let ingest = store.ingest_corpus(&report.corpus, &BatchAssignment::Uniform("NOG".into()))?;
//! println!("{} written, {} skipped", ingest.inserted.len(), ingest.skipped.len());
//! store.close()?;
//! # Ok::<(), sweep_db::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod corpus;
pub mod error;
pub mod experiment;
pub mod table;

pub use error::{Error, Result};
pub use table::{MeasurementRow, SweepTable};
