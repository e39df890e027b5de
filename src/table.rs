//! Sweep table - the fixed five-column structured table
//!
//! Every measurement file becomes one [`SweepTable`]: an Arrow
//! `RecordBatch` with exactly the columns `fre, X1, Y1, X2, Y2`
//! (non-nullable `Float64`), one row per sample, in source order.

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Column names in positional order.
pub const COLUMNS: [&str; 5] = ["fre", "X1", "Y1", "X2", "Y2"];

/// Field separator inside measurement files.
pub const FIELD_DELIMITER: u8 = b';';

/// Lines starting with this byte are comments.
pub const COMMENT_PREFIX: u8 = b'%';

/// One sample of a frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Sweep frequency (`fre`)
    pub frequency: f64,
    /// `X1`
    pub x1: f64,
    /// `Y1`
    pub y1: f64,
    /// `X2`
    pub x2: f64,
    /// `Y2`
    pub y2: f64,
}

impl MeasurementRow {
    /// Build a row from its five values in column order.
    #[must_use]
    pub const fn new(frequency: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            frequency,
            x1,
            y1,
            x2,
            y2,
        }
    }

    /// Values in column order.
    #[must_use]
    pub const fn values(&self) -> [f64; 5] {
        [self.frequency, self.x1, self.y1, self.x2, self.y2]
    }
}

/// Arrow schema shared by every sweep table.
#[must_use]
pub fn sweep_schema() -> SchemaRef {
    Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect::<Vec<_>>(),
    ))
}

/// Structured measurement table backed by an Arrow `RecordBatch`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepTable {
    batch: RecordBatch,
}

impl SweepTable {
    /// Build a table from value tuples, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns error if Arrow rejects the assembled columns
    pub fn from_rows(rows: &[MeasurementRow]) -> Result<Self> {
        let column = |pick: fn(&MeasurementRow) -> f64| -> ArrayRef {
            Arc::new(Float64Array::from_iter_values(rows.iter().map(pick)))
        };

        let batch = RecordBatch::try_new(
            sweep_schema(),
            vec![
                column(|r| r.frequency),
                column(|r| r.x1),
                column(|r| r.y1),
                column(|r| r.x2),
                column(|r| r.y2),
            ],
        )?;

        Ok(Self { batch })
    }

    /// Wrap an existing batch.
    ///
    /// Columns are looked up by name; any column beyond `fre, X1, Y1, X2, Y2`
    /// is dropped from the wrapped table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaMismatch`] unless every one of `fre, X1, Y1,
    /// X2, Y2` is present as `Float64` without nulls
    pub fn try_from_batch(batch: RecordBatch) -> Result<Self> {
        let schema = batch.schema();
        let mut indices = Vec::with_capacity(COLUMNS.len());
        let mut missing = Vec::new();

        for name in COLUMNS {
            match schema.index_of(name) {
                Ok(idx)
                    if schema.field(idx).data_type() == &DataType::Float64
                        && batch.column(idx).null_count() == 0 =>
                {
                    indices.push(idx);
                }
                _ => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(Error::SchemaMismatch { missing });
        }

        let projected = batch.project(&indices)?;
        let batch = RecordBatch::try_new(sweep_schema(), projected.columns().to_vec())?;
        Ok(Self { batch })
    }

    /// Parse `;`-separated text into a table.
    ///
    /// Lines beginning with `%` are comments. There is no header row: fields
    /// map positionally onto `fre, X1, Y1, X2, Y2`. A single trailing `;` is
    /// tolerated. `source_name` only labels error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for a line with the wrong field count or a
    /// field that is not a finite number, and [`Error::Csv`] for reader
    /// failures
    pub fn parse_delimited<R: Read>(reader: R, source_name: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .comment(Some(COMMENT_PREFIX))
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let line = record.position().map_or(0, csv::Position::line);

            let mut fields: Vec<&str> = record.iter().collect();
            if fields.iter().all(|f| f.is_empty()) {
                continue;
            }
            if fields.len() == COLUMNS.len() + 1 && fields.last().is_some_and(|f| f.is_empty()) {
                fields.pop();
            }
            if fields.len() != COLUMNS.len() {
                return Err(Error::Parse {
                    source_name: source_name.to_string(),
                    line,
                    message: format!(
                        "expected {} fields, found {}",
                        COLUMNS.len(),
                        fields.len()
                    ),
                });
            }

            let mut values = [0.0_f64; 5];
            for (slot, (raw, name)) in values.iter_mut().zip(fields.iter().zip(COLUMNS)) {
                *slot = raw.parse::<f64>().map_err(|e| Error::Parse {
                    source_name: source_name.to_string(),
                    line,
                    message: format!("column {name}: '{raw}' is not a number ({e})"),
                })?;
                if !slot.is_finite() {
                    return Err(Error::Parse {
                        source_name: source_name.to_string(),
                        line,
                        message: format!("column {name}: '{raw}' is not a finite number"),
                    });
                }
            }
            let [frequency, x1, y1, x2, y2] = values;
            rows.push(MeasurementRow::new(frequency, x1, y1, x2, y2));
        }

        Self::from_rows(&rows)
    }

    /// Underlying Arrow batch.
    #[must_use]
    pub const fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Number of samples.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// True when the table has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Column values by name (`fre`, `X1`, `Y1`, `X2`, `Y2`).
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<Float64Array>()
            .map(|array| &**array.values())
    }

    /// The `fre` column.
    #[must_use]
    pub fn frequency(&self) -> &[f64] {
        self.column(COLUMNS[0]).unwrap_or_default()
    }

    /// Rows in table order.
    #[must_use]
    pub fn rows(&self) -> Vec<MeasurementRow> {
        let columns: Vec<&[f64]> = COLUMNS
            .iter()
            .map(|name| self.column(name).unwrap_or_default())
            .collect();

        (0..self.num_rows())
            .map(|i| {
                MeasurementRow::new(
                    columns[0][i],
                    columns[1][i],
                    columns[2][i],
                    columns[3][i],
                    columns[4][i],
                )
            })
            .collect()
    }

    /// True when every frequency is strictly positive.
    #[must_use]
    pub fn has_positive_frequency(&self) -> bool {
        self.frequency().iter().all(|f| *f > 0.0)
    }

    /// Natural log of the frequency column, the x axis of a sweep plot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveFrequency`] for the first `fre <= 0`
    pub fn log_frequency(&self) -> Result<Vec<f64>> {
        self.frequency()
            .iter()
            .enumerate()
            .map(|(row, &value)| {
                if value > 0.0 {
                    Ok(value.ln())
                } else {
                    Err(Error::NonPositiveFrequency { row, value })
                }
            })
            .collect()
    }
}

impl fmt::Display for SweepTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = arrow::util::pretty::pretty_format_batches(std::slice::from_ref(&self.batch))
            .map_err(|_| fmt::Error)?;
        write!(f, "{rendered}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "% Organoid sweep\n\
                          1000;0.1;0.2;0.3;0.4\n\
                          2000;1.1;1.2;1.3;1.4\n\
                          3000;2.1;2.2;2.3;2.4\n";

    #[test]
    fn test_parse_skips_comments() {
        let table = SweepTable::parse_delimited(SAMPLE.as_bytes(), "sample").unwrap();

        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.frequency(), &[1000.0, 2000.0, 3000.0]);
        assert_eq!(table.column("Y2"), Some(&[0.4, 1.4, 2.4][..]));
    }

    #[test]
    fn test_parse_column_names_fixed() {
        let table = SweepTable::parse_delimited(SAMPLE.as_bytes(), "sample").unwrap();
        let schema = table.batch().schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();

        assert_eq!(names, COLUMNS);
    }

    #[test]
    fn test_parse_tolerates_trailing_delimiter_and_blank_lines() {
        let text = "1;2;3;4;5;\n\n6;7;8;9;10\n";
        let table = SweepTable::parse_delimited(text.as_bytes(), "trailing").unwrap();

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows()[0], MeasurementRow::new(1.0, 2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = SweepTable::parse_delimited("1;2;3\n".as_bytes(), "short").unwrap_err();

        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("expected 5 fields, found 3"));
    }

    #[test]
    fn test_parse_non_numeric_field() {
        let err = SweepTable::parse_delimited("1;2;abc;4;5\n".as_bytes(), "bad").unwrap_err();

        assert!(err.to_string().contains("column Y1"));
    }

    #[test]
    fn test_rows_preserve_order() {
        let rows = vec![
            MeasurementRow::new(3.0, 0.0, 0.0, 0.0, 0.0),
            MeasurementRow::new(1.0, 0.0, 0.0, 0.0, 0.0),
            MeasurementRow::new(2.0, 0.0, 0.0, 0.0, 0.0),
        ];
        let table = SweepTable::from_rows(&rows).unwrap();

        assert_eq!(table.rows(), rows);
    }

    #[test]
    fn test_log_frequency_rejects_non_positive() {
        let rows = vec![
            MeasurementRow::new(10.0, 0.0, 0.0, 0.0, 0.0),
            MeasurementRow::new(0.0, 0.0, 0.0, 0.0, 0.0),
        ];
        let table = SweepTable::from_rows(&rows).unwrap();

        assert!(!table.has_positive_frequency());
        let err = table.log_frequency().unwrap_err();
        assert!(matches!(err, Error::NonPositiveFrequency { row: 1, .. }));
    }

    #[test]
    fn test_log_frequency_values() {
        let table =
            SweepTable::from_rows(&[MeasurementRow::new(std::f64::consts::E, 0.0, 0.0, 0.0, 0.0)])
                .unwrap();

        let log = table.log_frequency().unwrap();
        assert!((log[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_from_batch_rejects_foreign_schema() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "value",
            DataType::Float64,
            false,
        )]));
        let batch =
            RecordBatch::try_new(schema, vec![Arc::new(Float64Array::from(vec![1.0]))]).unwrap();

        let err = SweepTable::try_from_batch(batch).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { .. }));
    }

    #[test]
    fn test_parse_rejects_non_finite_fields() {
        for raw in ["NaN", "inf", "-infinity"] {
            let text = format!("1;2;3;4;5\n6;{raw};8;9;10\n");
            let err = SweepTable::parse_delimited(text.as_bytes(), "nan").unwrap_err();

            assert!(matches!(err, Error::Parse { line: 2, .. }), "{raw}: {err}");
            assert!(err.to_string().contains("column X1"));
        }
    }

    #[test]
    fn test_try_from_batch_drops_extra_columns() {
        let mut fields: Vec<Field> = COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect();
        fields.insert(2, Field::new("temperature", DataType::Float64, false));
        let columns: Vec<ArrayRef> = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
            .into_iter()
            .map(|v| Arc::new(Float64Array::from(vec![v])) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();

        let table = SweepTable::try_from_batch(batch).unwrap();

        assert_eq!(table.batch().schema(), sweep_schema());
        assert_eq!(table.rows(), vec![MeasurementRow::new(1.0, 2.0, 4.0, 5.0, 6.0)]);
    }

    #[test]
    fn test_try_from_batch_reports_missing_by_name() {
        let fields: Vec<Field> = COLUMNS[..4]
            .iter()
            .map(|name| Field::new(*name, DataType::Float64, false))
            .collect();
        let columns: Vec<ArrayRef> = (0..4)
            .map(|_| Arc::new(Float64Array::from(vec![1.0])) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap();

        match SweepTable::try_from_batch(batch).unwrap_err() {
            Error::SchemaMismatch { missing } => assert_eq!(missing, vec!["Y2"]),
            other => panic!("expected SchemaMismatch, got {other}"),
        }
    }
}
