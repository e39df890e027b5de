//! Experiment Storage - relational schema and gateway
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentInfo (1) ──< ExperimentData (N)
//!   file_name (unique)      seq (source row order)
//!   prefix / date / time    frequency, x1, y1, x2, y2
//!   batch_id (mutable)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sweep_db::experiment::{ExperimentStore, NewExperimentInfo};
//! use sweep_db::MeasurementRow;
//!
//! let mut store = ExperimentStore::open_in_memory()?;
//!
//! // Metadata first, then its measurement rows
//! let info = NewExperimentInfo::new("Organoid1_20241201_134610.txt", "Organoid1")
//!     .date_str("20241201")
//!     .time_str("134610")
//!     .batch_id("NOG");
//! let id = store.create_info(&info)?;
//! store.write_rows(id, &[MeasurementRow::new(1000.0, 0.1, 0.2, 0.3, 0.4)])?;
//!
//! // Read back, relabel, delete
//! let table = store.data_by_file_name("Organoid1_20241201_134610.txt")?;
//! assert_eq!(table.num_rows(), 1);
//! store.update_batch_id("Organoid1_20241201_134610.txt", "NOG-2")?;
//! store.delete_by_file_name("Organoid1_20241201_134610.txt")?;
//! store.close()?;
//! # Ok::<(), sweep_db::Error>(())
//! ```

mod batch;
mod data_record;
mod info_record;
mod schema;
mod store;

pub use batch::BatchAssignment;
pub use data_record::{rows_from_batch, ExperimentData, REQUIRED_FIELDS};
pub use info_record::{ExperimentInfo, NewExperimentInfo};
pub use schema::{SCHEMA_SQL, SCHEMA_VERSION};
pub use store::{ExperimentStore, IngestReport, IngestedFile, SkippedFile, StoreBuilder};
