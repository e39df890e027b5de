//! Experiment Data - measurement rows belonging to one experiment

use arrow::array::{Array, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::table::MeasurementRow;
use crate::{Error, Result};

/// Store-side field names, with the file-side alias for each.
pub const REQUIRED_FIELDS: [(&str, &str); 5] = [
    ("frequency", "fre"),
    ("x1", "X1"),
    ("y1", "Y1"),
    ("x2", "X2"),
    ("y2", "Y2"),
];

/// Persisted measurement row.
///
/// `seq` is the zero-based position of the sample in its source table;
/// reads order by it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentData {
    data_id: i64,
    experiment_id: i64,
    seq: i64,
    values: MeasurementRow,
}

impl ExperimentData {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            data_id: row.get(0)?,
            experiment_id: row.get(1)?,
            seq: row.get(2)?,
            values: MeasurementRow::new(
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ),
        })
    }

    /// Get the surrogate key.
    #[must_use]
    pub const fn data_id(&self) -> i64 {
        self.data_id
    }

    /// Get the owning experiment ID.
    #[must_use]
    pub const fn experiment_id(&self) -> i64 {
        self.experiment_id
    }

    /// Get the source row position.
    #[must_use]
    pub const fn seq(&self) -> i64 {
        self.seq
    }

    /// Get the measured values.
    #[must_use]
    pub const fn values(&self) -> &MeasurementRow {
        &self.values
    }
}

/// Extract value tuples from an arbitrary Arrow batch.
///
/// Each required field is matched case-insensitively by its store name
/// (`frequency`) or file alias (`fre`); extra columns are ignored. Numeric
/// columns are cast to `Float64`.
///
/// # Errors
///
/// Returns [`Error::SchemaMismatch`] listing every field that is absent,
/// not numeric, or contains nulls
pub fn rows_from_batch(batch: &RecordBatch) -> Result<Vec<MeasurementRow>> {
    let schema = batch.schema();
    let mut columns: Vec<Float64Array> = Vec::with_capacity(REQUIRED_FIELDS.len());
    let mut missing = Vec::new();

    for (name, alias) in REQUIRED_FIELDS {
        let found = schema.fields().iter().position(|field| {
            field.name().eq_ignore_ascii_case(name) || field.name().eq_ignore_ascii_case(alias)
        });

        let column = found
            .and_then(|idx| cast(batch.column(idx), &DataType::Float64).ok())
            .and_then(|array| array.as_any().downcast_ref::<Float64Array>().cloned())
            .filter(|array| array.null_count() == 0);

        match column {
            Some(array) => columns.push(array),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(Error::SchemaMismatch { missing });
    }

    Ok((0..batch.num_rows())
        .map(|i| {
            MeasurementRow::new(
                columns[0].value(i),
                columns[1].value(i),
                columns[2].value(i),
                columns[3].value(i),
                columns[4].value(i),
            )
        })
        .collect())
}
